// Copyright 2026 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Immutable tree nodes, link colors, and the path-copying primitives used by insertion.

use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;

/// Color of the link from a node's parent to the node.
///
/// The root has no parent link; it is treated as black once an insertion completes.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Color {
    /// A red link glues the node to its parent (the pair forms a 3-node).
    Red,
    /// An ordinary link.
    Black,
}

impl Color {
    /// Returns `true` for [`Color::Red`].
    #[inline]
    pub const fn is_red(self) -> bool {
        matches!(self, Self::Red)
    }
}

/// A tree: either a shared root node or nothing.
pub type Tree<K> = Option<Arc<Node<K>>>;

/// Returns whether `node` is present and red.
///
/// Absent nodes count as black, so this is safe to call on missing children.
#[inline]
pub fn is_red<K>(node: Option<&Node<K>>) -> bool {
    node.is_some_and(Node::is_red)
}

/// An immutable tree node.
///
/// Nodes are never mutated once built. Structural changes produce new nodes
/// along the changed path and share every untouched subtree through [`Arc`],
/// so any snapshot stays valid while newer ones are derived from it.
///
/// Equality is structural. Use [`Arc::ptr_eq`] to compare identity.
///
/// Dropping, [`Node::size`] and [`Node::height`] handle chains of any depth.
/// Equality, hashing, formatting and [`verify`](crate::verify) recurse once per
/// level, which only matters for unbalanced trees hundreds of thousands deep.
///
/// ## Example
///
/// ```rust
/// use arbor_llrb::{Color, Node};
///
/// let tree = Node::black('C').with_left(Node::new('A'));
/// assert_eq!(tree.color(), Color::Black);
/// assert!(tree.left().is_some_and(|a| a.is_red()));
/// assert_eq!(tree.to_string(), "C!A");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Node<K> {
    value: K,
    color: Color,
    left: Tree<K>,
    right: Tree<K>,
}

/// Which child link a path step follows.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Side {
    Left,
    Right,
}

impl<K> Node<K> {
    /// Create a fresh red leaf, the state every node starts in before insertion.
    pub const fn new(value: K) -> Self {
        Self::leaf(value, Color::Red)
    }

    /// Create a black leaf.
    pub const fn black(value: K) -> Self {
        Self::leaf(value, Color::Black)
    }

    /// Create a leaf with the given color.
    pub const fn leaf(value: K, color: Color) -> Self {
        Self {
            value,
            color,
            left: None,
            right: None,
        }
    }

    /// Replace the color, keeping value and children.
    #[must_use]
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// Attach `left` as the left child, replacing any previous one.
    #[must_use]
    pub fn with_left(mut self, left: Self) -> Self {
        self.left = Some(Arc::new(left));
        self
    }

    /// Attach `right` as the right child, replacing any previous one.
    #[must_use]
    pub fn with_right(mut self, right: Self) -> Self {
        self.right = Some(Arc::new(right));
        self
    }

    /// The key stored in this node.
    #[inline]
    pub fn value(&self) -> &K {
        &self.value
    }

    /// The color of the link from the parent.
    #[inline]
    pub fn color(&self) -> Color {
        self.color
    }

    /// Returns `true` when the parent link is red.
    #[inline]
    pub fn is_red(&self) -> bool {
        self.color.is_red()
    }

    /// The shared left subtree, if any.
    #[inline]
    pub fn left(&self) -> Option<&Arc<Self>> {
        self.left.as_ref()
    }

    /// The shared right subtree, if any.
    #[inline]
    pub fn right(&self) -> Option<&Arc<Self>> {
        self.right.as_ref()
    }

    /// Returns `true` when the node has no children.
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }

    /// Number of nodes in this subtree, including `self`.
    pub fn size(&self) -> usize {
        self.in_order().count()
    }

    /// Number of nodes on the longest root-to-leaf path.
    ///
    /// Walks with an explicit stack, so degenerate chains are fine.
    pub fn height(&self) -> usize {
        let mut deepest = 0;
        let mut stack = alloc::vec![(self, 1_usize)];
        while let Some((node, depth)) = stack.pop() {
            deepest = deepest.max(depth);
            stack.extend(
                [node.left.as_deref(), node.right.as_deref()]
                    .into_iter()
                    .flatten()
                    .map(|child| (child, depth + 1)),
            );
        }
        deepest
    }

    /// Visit the keys of this subtree in ascending order.
    pub fn in_order(&self) -> InOrder<'_, K> {
        let mut iter = InOrder { stack: Vec::new() };
        iter.push_left_spine(Some(self));
        iter
    }

    pub(crate) fn child(&self, side: Side) -> Option<&Arc<Self>> {
        match side {
            Side::Left => self.left.as_ref(),
            Side::Right => self.right.as_ref(),
        }
    }
}

impl<K: Clone> Node<K> {
    /// A copy of this node with a different color. Children are shared.
    #[must_use]
    pub fn recolored(&self, color: Color) -> Self {
        let mut copy = self.clone();
        copy.color = color;
        copy
    }

    /// A copy of this node with `child` hanging off `side`.
    pub(crate) fn with_child(&self, side: Side, child: Arc<Self>) -> Self {
        let mut copy = self.clone();
        match side {
            Side::Left => copy.left = Some(child),
            Side::Right => copy.right = Some(child),
        }
        copy
    }

    /// Rotate the red right link of this node to the left.
    ///
    /// The right child becomes the subtree root and inherits this node's color.
    /// This node is copied, turned red, and becomes the new root's left child,
    /// taking the old right child's left subtree as its right subtree.
    ///
    /// # Panics
    ///
    /// Panics when the right child is absent or black. Reaching that state means
    /// the fix-up order was broken, and continuing would corrupt the tree.
    #[must_use]
    pub fn rotate_left(&self) -> Self {
        let right = self
            .right
            .as_deref()
            .filter(|right| right.is_red())
            .expect("rotation invariant violated: rotate left needs a red right child");
        let lowered = Self {
            value: self.value.clone(),
            color: Color::Red,
            left: self.left.clone(),
            right: right.left.clone(),
        };
        Self {
            value: right.value.clone(),
            color: self.color,
            left: Some(Arc::new(lowered)),
            right: right.right.clone(),
        }
    }

    /// Rotate the red left link of this node to the right. Mirror of [`Node::rotate_left`].
    ///
    /// # Panics
    ///
    /// Panics when the left child is absent or black.
    #[must_use]
    pub fn rotate_right(&self) -> Self {
        let left = self
            .left
            .as_deref()
            .filter(|left| left.is_red())
            .expect("rotation invariant violated: rotate right needs a red left child");
        let lowered = Self {
            value: self.value.clone(),
            color: Color::Red,
            left: left.right.clone(),
            right: self.right.clone(),
        };
        Self {
            value: left.value.clone(),
            color: self.color,
            left: left.left.clone(),
            right: Some(Arc::new(lowered)),
        }
    }

    /// Split a temporary 4-node: both children turn black and this node turns red.
    ///
    /// # Panics
    ///
    /// Panics unless this node is black and both of its children are present and red.
    #[must_use]
    pub fn flip_colors(&self) -> Self {
        let (Some(left), Some(right)) = (self.left.as_deref(), self.right.as_deref()) else {
            panic!("color flip invariant violated: node needs two children");
        };
        assert!(
            !self.is_red() && left.is_red() && right.is_red(),
            "color flip invariant violated: needs a black node with two red children"
        );
        Self {
            value: self.value.clone(),
            color: Color::Red,
            left: Some(Arc::new(left.recolored(Color::Black))),
            right: Some(Arc::new(right.recolored(Color::Black))),
        }
    }
}

/// Unlinks children one at a time so dropping a long chain does not recurse.
impl<K> Drop for Node<K> {
    fn drop(&mut self) {
        let mut stack: Vec<Arc<Self>> = self.left.take().into_iter().chain(self.right.take()).collect();
        while let Some(child) = stack.pop() {
            // Subtrees still shared with another snapshot stay alive untouched.
            if let Some(mut child) = Arc::into_inner(child) {
                stack.extend(child.left.take());
                stack.extend(child.right.take());
            }
        }
    }
}

/// Pre-order listing with red nodes prefixed by `!`, e.g. `R!EC!AHS`.
impl<K: fmt::Display> fmt::Display for Node<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_red() {
            f.write_str("!")?;
        }
        write!(f, "{}", self.value)?;
        if let Some(left) = &self.left {
            fmt::Display::fmt(left, f)?;
        }
        if let Some(right) = &self.right {
            fmt::Display::fmt(right, f)?;
        }
        Ok(())
    }
}

/// In-order iterator over the keys of a subtree, returned by [`Node::in_order`].
#[derive(Clone, Debug)]
pub struct InOrder<'a, K> {
    stack: Vec<&'a Node<K>>,
}

impl<'a, K> InOrder<'a, K> {
    fn push_left_spine(&mut self, mut node: Option<&'a Node<K>>) {
        while let Some(n) = node {
            self.stack.push(n);
            node = n.left.as_deref();
        }
    }
}

impl<'a, K> Iterator for InOrder<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left_spine(node.right.as_deref());
        Some(&node.value)
    }
}
