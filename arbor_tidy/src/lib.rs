// Copyright 2026 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Arbor Tidy: compact, deterministic grid layout for binary trees.
//!
//! Given any binary tree, [`tidy_layout`] assigns every node a grid position
//! such that:
//!
//! - `y` is the node's depth, with the root at `0`;
//! - no two nodes share a position, and subtrees never overlap;
//! - parents sit centered over two children or one column beside a single child;
//! - the result depends only on the tree's shape, so redrawing an unchanged
//!   shape never moves anything.
//!
//! The engine is generic over the [`BinaryTree`] trait, which only asks for
//! the two child links. [`Layout`] looks nodes up by identity, which matters
//! for persistent trees where equal subtrees can appear in several places.
//!
//! [`CanvasFit`] turns grid positions into canvas coordinates, centering the
//! tree and reporting when it has outgrown the drawing area.
//!
//! ## Example
//!
//! ```rust
//! use arbor_tidy::{BinaryTree, FitParams, tidy_layout};
//! use kurbo::{Point, Size};
//!
//! #[derive(Default)]
//! struct Shape {
//!     left: Option<Box<Shape>>,
//!     right: Option<Box<Shape>>,
//! }
//!
//! impl BinaryTree for Shape {
//!     fn left(&self) -> Option<&Self> {
//!         self.left.as_deref()
//!     }
//!     fn right(&self) -> Option<&Self> {
//!         self.right.as_deref()
//!     }
//! }
//!
//! let tree = Shape {
//!     left: Some(Box::new(Shape::default())),
//!     right: None,
//! };
//! let layout = tidy_layout(&tree);
//! assert_eq!(layout.node_position(&tree), Point::new(1.0, 0.0));
//! assert_eq!(layout.extent(), Size::new(2.0, 2.0));
//!
//! let fit = layout.fit(Size::new(800.0, 600.0), FitParams::default());
//! assert!(!fit.is_oversized());
//! ```
//!
//! ## Features
//!
//! - `std` (default): enables `std` support for `kurbo`.
//! - `libm`: enables `no_std` builds that rely on `libm` for floating-point math.
//! - `llrb_adapter`: implements [`BinaryTree`] for `arbor_llrb::Node` (see [`adapters`]).
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod adapters;
mod fit;
mod layout;

pub use fit::{CanvasFit, FitParams};
pub use layout::{BinaryTree, LEAF_SPACING, Layout, tidy_layout};
