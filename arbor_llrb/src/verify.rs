// Copyright 2026 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Checking the invariants a completed insertion guarantees.

use core::fmt;

use crate::node::{Node, is_red};

/// A broken left-leaning red-black invariant found by [`verify`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Violation {
    /// The root is red.
    RedRoot,
    /// A node has a red right child.
    RedRightChild,
    /// A red node has a red left child.
    DoubleRed,
    /// Two sibling subtrees have different black heights.
    BlackHeightMismatch {
        /// Black height of the left subtree.
        left: usize,
        /// Black height of the right subtree.
        right: usize,
    },
    /// An in-order walk found a key smaller than its predecessor.
    OutOfOrder,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RedRoot => f.write_str("root is red"),
            Self::RedRightChild => f.write_str("a node has a red right child"),
            Self::DoubleRed => f.write_str("a red node has a red left child"),
            Self::BlackHeightMismatch { left, right } => write!(
                f,
                "black heights differ between siblings (left {left}, right {right})"
            ),
            Self::OutOfOrder => f.write_str("keys are out of order"),
        }
    }
}

impl core::error::Error for Violation {}

/// Check that `root` is a valid left-leaning red-black tree.
///
/// Returns the black height (number of black links on every path from the root
/// down to a missing child, counting the root) on success. An empty tree has
/// black height 0.
///
/// Intermediate snapshots of an insertion may fail this check; the final
/// snapshot never does.
pub fn verify<K: Ord>(root: Option<&Node<K>>) -> Result<usize, Violation> {
    let Some(root) = root else {
        return Ok(0);
    };
    if root.is_red() {
        return Err(Violation::RedRoot);
    }
    let mut keys = root.in_order();
    if let Some(mut prev) = keys.next() {
        for key in keys {
            if key < prev {
                return Err(Violation::OutOfOrder);
            }
            prev = key;
        }
    }
    black_height(root)
}

fn black_height<K>(node: &Node<K>) -> Result<usize, Violation> {
    let left = node.left().map(|n| &**n);
    let right = node.right().map(|n| &**n);
    if is_red(right) {
        return Err(Violation::RedRightChild);
    }
    if node.is_red() && is_red(left) {
        return Err(Violation::DoubleRed);
    }
    let left = left.map_or(Ok(0), black_height)?;
    let right = right.map_or(Ok(0), black_height)?;
    if left != right {
        return Err(Violation::BlackHeightMismatch { left, right });
    }
    Ok(left + usize::from(!node.is_red()))
}
