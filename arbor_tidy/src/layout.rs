// Copyright 2026 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The tidy layout pass and the resulting position map.

use core::fmt;
use core::marker::PhantomData;

use hashbrown::HashMap;
use kurbo::{Point, Size};
use smallvec::SmallVec;

use crate::fit::{CanvasFit, FitParams};

/// Horizontal distance between consecutive slots at one depth.
///
/// Two columns per slot leave room for a parent to sit centered between
/// adjacent children.
pub const LEAF_SPACING: f64 = 2.0;

/// Read-only access to the shape of a binary tree.
///
/// The layout only looks at which children exist, never at values, so any
/// node type can be laid out by exposing its two child links.
pub trait BinaryTree {
    /// The left child, if any.
    fn left(&self) -> Option<&Self>;

    /// The right child, if any.
    fn right(&self) -> Option<&Self>;

    /// Returns `true` when the node has no children.
    fn is_leaf(&self) -> bool {
        self.left().is_none() && self.right().is_none()
    }
}

/// Grid positions computed by [`tidy_layout`].
///
/// Positions are keyed by node identity (address), so two structurally equal
/// subtrees at different places in the tree get their own positions. The
/// layout borrows the tree to keep those addresses valid.
///
/// In each [`Point`], `y` is the depth (root at `0`) and `x` is the grid
/// column. A parent centered between two children sits at their midpoint,
/// so columns can be fractional: a half column over whole-column children,
/// a quarter column over half-column children, and so on down the tree.
pub struct Layout<'a, N> {
    positions: HashMap<usize, Point>,
    max_x: f64,
    max_y: f64,
    _tree: PhantomData<&'a N>,
}

impl<N> fmt::Debug for Layout<'_, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Layout")
            .field("nodes", &self.positions.len())
            .field("max_x", &self.max_x)
            .field("max_y", &self.max_y)
            .finish_non_exhaustive()
    }
}

impl<N> Layout<'_, N> {
    /// Position of `node`, or `None` if it is not part of the laid-out tree.
    pub fn position(&self, node: &N) -> Option<Point> {
        self.positions.get(&identity(node)).copied()
    }

    /// Position of `node`.
    ///
    /// # Panics
    ///
    /// Panics if `node` is not part of the laid-out tree. That happens when a
    /// node of a different tree (or a structurally equal copy) is queried.
    pub fn node_position(&self, node: &N) -> Point {
        self.position(node)
            .expect("layout lookup failed: node is not part of this layout")
    }

    /// Largest column used by any node.
    pub fn max_x(&self) -> f64 {
        self.max_x
    }

    /// Largest depth of any node.
    pub fn max_y(&self) -> f64 {
        self.max_y
    }

    /// Number of grid cells spanned in each direction (`max + 1`).
    pub fn extent(&self) -> Size {
        Size::new(self.max_x + 1.0, self.max_y + 1.0)
    }

    /// Number of positioned nodes.
    pub fn node_count(&self) -> usize {
        self.positions.len()
    }

    /// Map this layout onto a canvas of the given size.
    pub fn fit(&self, canvas: Size, params: FitParams) -> CanvasFit {
        CanvasFit::new(canvas, self.extent(), params)
    }
}

/// Compute a compact, non-overlapping grid layout for the tree rooted at `root`.
///
/// A post-order pass places leaves in the next free slot of their depth,
/// puts single-child parents one column beside their child, and centers
/// two-child parents between their children. Whenever a parent would land
/// left of the next free slot on its row, it is pushed right and the push is
/// remembered. A pre-order pass then shifts every subtree by the sum of the
/// pushes recorded on its ancestors.
///
/// The result depends only on the shape of the tree: structurally identical
/// trees get identical coordinates.
///
/// Every node must appear once in the tree. Debug builds assert that no node
/// is reachable by two paths.
///
/// Both passes recurse once per level, so a degenerate tree tens of
/// thousands of levels deep can exhaust the thread's stack.
///
/// ## Example
///
/// ```rust
/// use arbor_tidy::{BinaryTree, tidy_layout};
/// use kurbo::Point;
///
/// struct Shape(Option<Box<Shape>>, Option<Box<Shape>>);
///
/// impl BinaryTree for Shape {
///     fn left(&self) -> Option<&Self> {
///         self.0.as_deref()
///     }
///     fn right(&self) -> Option<&Self> {
///         self.1.as_deref()
///     }
/// }
///
/// let tree = Shape(Some(Box::new(Shape(None, None))), Some(Box::new(Shape(None, None))));
/// let layout = tidy_layout(&tree);
/// assert_eq!(layout.node_position(&tree), Point::new(1.0, 0.0));
/// assert_eq!(layout.node_position(tree.left().unwrap()), Point::new(0.0, 1.0));
/// assert_eq!(layout.node_position(tree.right().unwrap()), Point::new(2.0, 1.0));
/// ```
pub fn tidy_layout<N: BinaryTree>(root: &N) -> Layout<'_, N> {
    let mut pass = TidyPass::default();
    pass.place(root, 0);
    pass.apply_offsets(root, 0.0);

    let (max_x, max_y) = pass
        .positions
        .values()
        .fold((0.0_f64, 0.0_f64), |(mx, my), p| (mx.max(p.x), my.max(p.y)));
    log::trace!(
        "tidy layout: {} nodes, max_x {max_x}, max_y {max_y}",
        pass.positions.len()
    );

    Layout {
        positions: pass.positions,
        max_x,
        max_y,
        _tree: PhantomData,
    }
}

fn identity<N>(node: &N) -> usize {
    core::ptr::from_ref(node).addr()
}

/// Scratch state shared by both traversal passes.
#[derive(Default)]
struct TidyPass {
    /// Next free column per depth.
    next_x: SmallVec<[f64; 16]>,
    /// Largest push applied so far per depth.
    offsets: SmallVec<[f64; 16]>,
    /// Provisional, then final, positions.
    positions: HashMap<usize, Point>,
    /// Push recorded on each node, inherited by its whole subtree.
    pushes: HashMap<usize, f64>,
}

impl TidyPass {
    fn row(counters: &mut SmallVec<[f64; 16]>, depth: usize) -> &mut f64 {
        if counters.len() <= depth {
            counters.resize(depth + 1, 0.0);
        }
        &mut counters[depth]
    }

    fn placed_x<N>(&self, node: &N) -> f64 {
        self.positions
            .get(&identity(node))
            .expect("layout invariant violated: child not placed before its parent")
            .x
    }

    /// Post-order: children first, then this node.
    fn place<N: BinaryTree>(&mut self, node: &N, depth: usize) {
        if let Some(left) = node.left() {
            self.place(left, depth + 1);
        }
        if let Some(right) = node.right() {
            self.place(right, depth + 1);
        }

        let next = *Self::row(&mut self.next_x, depth);
        let mut x = match (node.left(), node.right()) {
            (None, None) => next,
            (None, Some(right)) => self.placed_x(right) - 1.0,
            (Some(left), None) => self.placed_x(left) + 1.0,
            (Some(left), Some(right)) => (self.placed_x(left) + self.placed_x(right)) / 2.0,
        };
        let offset = Self::row(&mut self.offsets, depth).max(next - x);
        if !node.is_leaf() {
            x += offset;
        }

        let key = identity(node);
        let previous = self.positions.insert(key, Point::new(x, depth as f64));
        debug_assert!(
            previous.is_none(),
            "layout invariant violated: node reached by two paths"
        );
        *Self::row(&mut self.next_x, depth) = x + LEAF_SPACING;
        *Self::row(&mut self.offsets, depth) = offset;
        self.pushes.insert(key, offset);
    }

    /// Pre-order: shift each node by the pushes of all its ancestors.
    fn apply_offsets<N: BinaryTree>(&mut self, node: &N, shift: f64) {
        let key = identity(node);
        let position = self
            .positions
            .get_mut(&key)
            .expect("layout invariant violated: node missing after placement");
        position.x += shift;

        let push = self.pushes.get(&key).copied().unwrap_or(0.0);
        if let Some(left) = node.left() {
            self.apply_offsets(left, shift + push);
        }
        if let Some(right) = node.right() {
            self.apply_offsets(right, shift + push);
        }
    }
}
