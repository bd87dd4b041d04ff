// Copyright 2026 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The mutation log: one record per atomic step of an insertion.

use alloc::sync::Arc;
use core::fmt;

use crate::node::Node;

/// The kind of atomic transformation a [`Mutation`] records.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum MutationKind {
    /// The new node was attached as a leaf.
    Insert,
    /// A red right link was rotated to the left.
    RotateLeft,
    /// Two consecutive red left links were resolved by rotating right.
    RotateRight,
    /// A node with two red children was recolored.
    FlipColors,
    /// The red root produced by the fix-up was recolored black.
    BlackenRoot,
}

impl MutationKind {
    /// The kebab-case name used by the compact notation.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Insert => "insert",
            Self::RotateLeft => "rotate-left",
            Self::RotateRight => "rotate-right",
            Self::FlipColors => "flip-colors",
            Self::BlackenRoot => "blacken-root",
        }
    }
}

impl fmt::Display for MutationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One step of an insertion.
///
/// `result` is always a complete tree, never a diff: a consumer can render any
/// mutation without replaying the ones before it.
///
/// `node` is set for rotations and color flips. It is the subtree root as it
/// was *before* the step and is the very same allocation that appears in the
/// previous mutation's `result`, so it can be located there with
/// [`Arc::ptr_eq`]. Structurally equal subtrees may exist elsewhere in the
/// tree, so equality must not be used for that lookup.
#[derive(Clone, Debug)]
pub struct Mutation<K> {
    /// What happened.
    pub kind: MutationKind,
    /// The whole tree after this step.
    pub result: Arc<Node<K>>,
    /// The subtree root this step acted on, if the step targets a subtree.
    pub node: Option<Arc<Node<K>>>,
}

/// Renders as `kind(target) tree`, e.g. `rotate-left(H) K!H`.
impl<K: fmt::Display> fmt::Display for Mutation<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)?;
        if let Some(node) = &self.node {
            write!(f, "({})", node.value())?;
        }
        write!(f, " {}", self.result)
    }
}
