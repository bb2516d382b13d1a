// Copyright 2025 the Loupe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Guide line descriptors produced by snapping.

use kurbo::{Line, Point, Rect};

/// Orientation of a guide line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GuideAxis {
    /// A vertical line at a world `x`; produced by snapping on the X axis.
    Vertical,
    /// A horizontal line at a world `y`; produced by snapping on the Y axis.
    Horizontal,
}

/// What a guide line indicates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GuideKind {
    /// Two edges line up.
    Edge,
    /// Two centers line up.
    Center,
    /// Equal spacing between objects. The engine never emits this kind; it
    /// exists for hosts that mix their own spacing guides into the same list.
    Spacing,
}

/// A guide line in world coordinates, ready for the host to render.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SnapGuide {
    /// Orientation.
    pub axis: GuideAxis,
    /// World `x` of a vertical guide, or world `y` of a horizontal one.
    pub position: f64,
    /// Start of the line along its axis, if bounded.
    pub start: Option<f64>,
    /// End of the line along its axis, if bounded.
    pub end: Option<f64>,
    /// What the guide indicates.
    pub kind: GuideKind,
}

impl SnapGuide {
    /// A guide at `position` covering both rectangles along the guide's
    /// direction, extended by `margin` on either end.
    #[must_use]
    pub fn spanning(
        axis: GuideAxis,
        position: f64,
        a: Rect,
        b: Rect,
        margin: f64,
        kind: GuideKind,
    ) -> Self {
        let (lo, hi) = match axis {
            GuideAxis::Vertical => (a.y0.min(b.y0), a.y1.max(b.y1)),
            GuideAxis::Horizontal => (a.x0.min(b.x0), a.x1.max(b.x1)),
        };
        Self {
            axis,
            position,
            start: Some(lo - margin),
            end: Some(hi + margin),
            kind,
        }
    }

    /// The guide as a world‑space segment, or `None` if it is unbounded.
    #[must_use]
    pub fn line(&self) -> Option<Line> {
        let (start, end) = (self.start?, self.end?);
        Some(match self.axis {
            GuideAxis::Vertical => Line::new(
                Point::new(self.position, start),
                Point::new(self.position, end),
            ),
            GuideAxis::Horizontal => Line::new(
                Point::new(start, self.position),
                Point::new(end, self.position),
            ),
        })
    }
}

#[cfg(test)]
mod tests {
    use kurbo::{Line, Point, Rect};

    use super::{GuideAxis, GuideKind, SnapGuide};

    #[test]
    fn vertical_guide_spans_both_rects_vertically() {
        let a = Rect::new(0.0, 10.0, 50.0, 60.0);
        let b = Rect::new(0.0, 100.0, 80.0, 140.0);
        let g = SnapGuide::spanning(GuideAxis::Vertical, 0.0, a, b, 20.0, GuideKind::Edge);
        assert_eq!(g.start, Some(-10.0));
        assert_eq!(g.end, Some(160.0));
        assert_eq!(
            g.line(),
            Some(Line::new(Point::new(0.0, -10.0), Point::new(0.0, 160.0)))
        );
    }

    #[test]
    fn unbounded_guide_has_no_segment() {
        let g = SnapGuide {
            axis: GuideAxis::Horizontal,
            position: 5.0,
            start: None,
            end: Some(1.0),
            kind: GuideKind::Spacing,
        };
        assert_eq!(g.line(), None);
    }
}
