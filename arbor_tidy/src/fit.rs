// Copyright 2026 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Mapping grid positions onto a drawing surface.

use kurbo::{Point, Size, Vec2};

/// Parameters controlling how grid cells map onto canvas units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FitParams {
    /// Canvas distance between two consecutive depths.
    pub node_spacing: f64,
    /// Horizontal spacing as a fraction of [`FitParams::node_spacing`].
    ///
    /// Tidy layouts use two columns per leaf slot, so values below `1.0` keep
    /// wide trees from spreading out too far.
    pub aspect_ratio: f64,
}

impl Default for FitParams {
    fn default() -> Self {
        Self {
            node_spacing: 70.0,
            aspect_ratio: 0.5,
        }
    }
}

/// Places grid positions on a canvas, centering the whole tree.
///
/// ## Example
///
/// ```rust
/// use arbor_tidy::{CanvasFit, FitParams};
/// use kurbo::{Point, Size};
///
/// let params = FitParams { node_spacing: 100.0, aspect_ratio: 1.0 };
/// // A single node on a 1000x800 canvas lands in the middle.
/// let fit = CanvasFit::new(Size::new(1000.0, 800.0), Size::new(1.0, 1.0), params);
/// assert_eq!(fit.place(Point::ZERO), Point::new(500.0, 400.0));
/// assert!(!fit.is_oversized());
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CanvasFit {
    canvas: Size,
    extent: Size,
    params: FitParams,
}

impl CanvasFit {
    /// Fit a tree spanning `extent` grid cells onto `canvas`.
    pub fn new(canvas: Size, extent: Size, params: FitParams) -> Self {
        debug_assert!(
            params.node_spacing.is_finite() && params.aspect_ratio.is_finite(),
            "FitParams must be finite; got {params:?}"
        );
        Self {
            canvas,
            extent,
            params,
        }
    }

    /// Canvas distance covered by one grid cell in each direction.
    pub fn cell(&self) -> Vec2 {
        Vec2::new(
            self.params.node_spacing * self.params.aspect_ratio,
            self.params.node_spacing,
        )
    }

    /// Canvas footprint of the whole tree.
    pub fn tree_size(&self) -> Size {
        let cell = self.cell();
        Size::new(self.extent.width * cell.x, self.extent.height * cell.y)
    }

    /// Returns `true` when the tree does not fit the canvas in either direction.
    pub fn is_oversized(&self) -> bool {
        let size = self.tree_size();
        size.width > self.canvas.width || size.height > self.canvas.height
    }

    /// Canvas point for the center of the grid cell at `grid`.
    pub fn place(&self, grid: Point) -> Point {
        let cell = self.cell();
        let size = self.tree_size();
        let margin = Vec2::new(
            (self.canvas.width - size.width) / 2.0,
            (self.canvas.height - size.height) / 2.0,
        );
        Point::new((grid.x + 0.5) * cell.x, (grid.y + 0.5) * cell.y) + margin
    }
}
