// Copyright 2025 the Vantage Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-tick geometry and the edge-crossing test.
//!
//! All coordinates are viewport-relative (as returned by
//! `getBoundingClientRect`): `y` grows downwards, the viewport spans
//! `0..width` × `0..height`.

use kurbo::{Rect, Size, Vec2};

/// Did `line` lie strictly between an element's previous and current position?
///
/// `pos` is the current position of an edge (or center) and `delta` is how
/// far the page scrolled this tick along the same axis. Scrolling the page by
/// `delta` moves every element by `-delta`, so the previous position was
/// `pos + delta`. The interval is open, and a zero delta never crosses.
///
/// ```
/// use vantage_position::crossed;
///
/// // Top edge was at 5, page scrolled down by 10, edge is now at -5.
/// assert!(crossed(0.0, -5.0, 10.0));
/// // Scrolling back up.
/// assert!(crossed(0.0, 5.0, -10.0));
/// // Resting on the far side.
/// assert!(!crossed(0.0, -5.0, 0.0));
/// ```
#[must_use]
pub fn crossed(line: f64, pos: f64, delta: f64) -> bool {
    if delta > 0.0 {
        pos < line && line < pos + delta
    } else {
        pos > line && line > pos + delta
    }
}

/// One element's box, the viewport size, and the page scroll delta for a tick.
///
/// The delta is shared by every element evaluated in the same tick.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GeometrySnapshot {
    /// Element bounding box in viewport coordinates.
    pub bounds: Rect,
    /// Viewport size (width excludes the scrollbar).
    pub viewport: Size,
    /// Scroll offset change since the previous tick (`x` left, `y` top).
    pub delta: Vec2,
}

impl GeometrySnapshot {
    /// Element top edge.
    #[must_use]
    pub fn top(&self) -> f64 {
        self.bounds.y0
    }

    /// Element bottom edge.
    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.bounds.y1
    }

    /// Element left edge.
    #[must_use]
    pub fn left(&self) -> f64 {
        self.bounds.x0
    }

    /// Element right edge.
    #[must_use]
    pub fn right(&self) -> f64 {
        self.bounds.x1
    }

    /// Element width.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.bounds.width()
    }

    /// Element height.
    #[must_use]
    pub fn height(&self) -> f64 {
        self.bounds.height()
    }

    /// The box lies entirely within the viewport (edges may touch).
    #[must_use]
    pub fn is_inside(&self) -> bool {
        self.top() >= 0.0
            && self.left() >= 0.0
            && self.bottom() <= self.viewport.height
            && self.right() <= self.viewport.width
    }

    /// At least some of the box lies outside the viewport.
    #[must_use]
    pub fn is_partially_outside(&self) -> bool {
        self.top() < 0.0
            || self.left() < 0.0
            || self.right() > self.viewport.width
            || self.bottom() > self.viewport.height
    }

    /// The box lies entirely outside the viewport.
    #[must_use]
    pub fn is_fully_outside(&self) -> bool {
        self.bottom() < 0.0
            || self.right() < 0.0
            || self.left() > self.viewport.width
            || self.top() > self.viewport.height
    }

    /// Top edge on, or crossing, the viewport top.
    #[must_use]
    pub fn top_edge(&self) -> bool {
        on_or_crossed(0.0, self.top(), self.delta.y)
    }

    /// Left edge on, or crossing, the viewport left.
    #[must_use]
    pub fn left_edge(&self) -> bool {
        on_or_crossed(0.0, self.left(), self.delta.x)
    }

    /// Right edge on, or crossing, the viewport right.
    #[must_use]
    pub fn right_edge(&self) -> bool {
        on_or_crossed(self.viewport.width, self.right(), self.delta.x)
    }

    /// Bottom edge on, or crossing, the viewport bottom.
    #[must_use]
    pub fn bottom_edge(&self) -> bool {
        on_or_crossed(self.viewport.height, self.bottom(), self.delta.y)
    }

    /// Vertical center on, or crossing, the viewport's horizontal midline.
    #[must_use]
    pub fn middle_line(&self) -> bool {
        let center = self.top() + self.height() / 2.0;
        on_or_crossed(self.viewport.height / 2.0, center, self.delta.y)
    }

    /// Horizontal center on, or crossing, the viewport's vertical midline.
    #[must_use]
    pub fn center_line(&self) -> bool {
        let center = self.left() + self.width() / 2.0;
        on_or_crossed(self.viewport.width / 2.0, center, self.delta.x)
    }
}

fn on_or_crossed(line: f64, pos: f64, delta: f64) -> bool {
    pos == line || crossed(line, pos, delta)
}
