// Copyright 2025 the Loupe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Affine, Point, Rect, Size, Vec2};

/// Uniform pan+zoom transform mapping world coordinates into view space.
///
/// `pan` is the view‑space position of the world origin, so
/// `world_to_view(p) = p * zoom + pan`. The transform is a plain value:
/// consumers receive copies from [`crate::ViewportController::transform`] and
/// never mutate the controller's state through it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewportTransform {
    /// Uniform zoom factor, strictly positive.
    pub zoom: f64,
    /// View‑space offset of the world origin.
    pub pan: Vec2,
}

impl Default for ViewportTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl ViewportTransform {
    /// Zoom `1.0`, no pan.
    pub const IDENTITY: Self = Self {
        zoom: 1.0,
        pan: Vec2::ZERO,
    };

    /// Creates a transform from a zoom factor and a pan offset.
    #[must_use]
    pub const fn new(zoom: f64, pan: Vec2) -> Self {
        Self { zoom, pan }
    }

    /// Returns `true` if both zoom and pan are finite and zoom is positive.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.zoom.is_finite() && self.zoom > 0.0 && self.pan.x.is_finite() && self.pan.y.is_finite()
    }

    /// Returns the equivalent affine transform (world → view).
    #[must_use]
    pub fn to_affine(&self) -> Affine {
        Affine::translate(self.pan) * Affine::scale(self.zoom)
    }

    /// Converts a world‑space point into view coordinates.
    #[must_use]
    pub fn world_to_view(&self, pt: Point) -> Point {
        Point::new(pt.x * self.zoom + self.pan.x, pt.y * self.zoom + self.pan.y)
    }

    /// Converts a view‑space point into world coordinates.
    #[must_use]
    pub fn view_to_world(&self, pt: Point) -> Point {
        Point::new(
            (pt.x - self.pan.x) / self.zoom,
            (pt.y - self.pan.y) / self.zoom,
        )
    }

    /// Converts a world‑space rectangle into view coordinates.
    ///
    /// Zoom is uniform and positive, so mapping the two corners is enough.
    #[must_use]
    pub fn world_to_view_rect(&self, rect: Rect) -> Rect {
        Rect::from_points(
            self.world_to_view(Point::new(rect.x0, rect.y0)),
            self.world_to_view(Point::new(rect.x1, rect.y1)),
        )
    }

    /// Converts a view‑space rectangle into world coordinates.
    #[must_use]
    pub fn view_to_world_rect(&self, rect: Rect) -> Rect {
        Rect::from_points(
            self.view_to_world(Point::new(rect.x0, rect.y0)),
            self.view_to_world(Point::new(rect.x1, rect.y1)),
        )
    }

    /// Converts a view‑space distance into world units.
    #[must_use]
    pub fn view_to_world_vec(&self, delta: Vec2) -> Vec2 {
        delta / self.zoom
    }

    /// Returns the world rectangle visible through a viewport of `size`
    /// whose top‑left corner sits at the view origin.
    #[must_use]
    pub fn visible_world_rect(&self, size: Size) -> Rect {
        self.view_to_world_rect(Rect::from_origin_size(Point::ORIGIN, size))
    }

    /// Returns the pan that places `world_pt` at `view_pt` under `zoom`.
    #[must_use]
    pub fn pan_for_anchor(zoom: f64, world_pt: Point, view_pt: Point) -> Vec2 {
        Vec2::new(view_pt.x - world_pt.x * zoom, view_pt.y - world_pt.y * zoom)
    }

    /// Returns the current world‑units‑per‑pixel ratio, `1.0 / zoom`.
    #[must_use]
    pub fn world_units_per_pixel(&self) -> f64 {
        1.0 / self.zoom
    }

    /// Suggests a “nice” grid spacing in world units for the current zoom.
    ///
    /// The returned value is chosen so that grid lines appear roughly tens of
    /// pixels apart (using a 1‑2‑5 ladder), with `base` treated as a lower
    /// bound on the spacing in world units. Hosts typically feed the result
    /// into the snap engine's grid size.
    #[must_use]
    pub fn suggest_grid_spacing(&self, base: f64) -> f64 {
        // A non-finite lower bound is ignored.
        let base = if base.is_finite() {
            base.abs().max(f64::MIN_POSITIVE)
        } else {
            f64::MIN_POSITIVE
        };
        let target_px = 64.0_f64;
        let desired = (self.world_units_per_pixel().abs() * target_px).max(base);
        if !desired.is_finite() {
            return f64::MAX;
        }

        let mut unit = 1.0_f64;
        while unit * 10.0 <= desired {
            unit *= 10.0;
        }
        while unit > desired {
            unit /= 10.0;
        }

        loop {
            for m in [1.0_f64, 2.0, 5.0, 10.0] {
                let step = m * unit;
                if step >= desired {
                    return step;
                }
            }
            unit *= 10.0;
        }
    }
}
