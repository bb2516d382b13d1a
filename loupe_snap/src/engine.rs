// Copyright 2025 the Loupe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The snap solver.

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _; // for `round`
use kurbo::{Point, Rect, Vec2};
use smallvec::SmallVec;

use crate::config::SnapConfig;
use crate::guide::{GuideAxis, GuideKind, SnapGuide};
use crate::types::{Best, ResizeEdges, SnapCandidate, SnapKind};

/// Outcome of one snap query.
#[derive(Clone, Debug, PartialEq)]
pub struct SnapResult {
    /// Adjusted bounds in world coordinates.
    pub bounds: Rect,
    /// One guide per snapped axis, vertical first.
    pub guides: SmallVec<[SnapGuide; 2]>,
    /// Winning alignment on the X axis.
    pub snapped_x: Option<SnapCandidate>,
    /// Winning alignment on the Y axis.
    pub snapped_y: Option<SnapCandidate>,
    /// Whether the bounds were rounded to the grid instead.
    pub grid_snapped: bool,
}

impl SnapResult {
    fn unsnapped(bounds: Rect) -> Self {
        Self {
            bounds,
            guides: SmallVec::new(),
            snapped_x: None,
            snapped_y: None,
            grid_snapped: false,
        }
    }

    /// Returns `true` if anything snapped, object or grid.
    #[must_use]
    pub fn is_snapped(&self) -> bool {
        self.snapped_x.is_some() || self.snapped_y.is_some() || self.grid_snapped
    }
}

/// Finds the best alignment of a moving or resized rectangle.
///
/// The engine holds only its configuration; every call is independent.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SnapEngine {
    config: SnapConfig,
}

impl SnapEngine {
    /// Creates an engine.
    #[must_use]
    pub fn new(config: SnapConfig) -> Self {
        Self { config }
    }

    /// Active configuration.
    #[must_use]
    pub fn config(&self) -> &SnapConfig {
        &self.config
    }

    /// Replaces the configuration.
    pub fn set_config(&mut self, config: SnapConfig) {
        log::debug!("snap config replaced: {config:?}");
        self.config = config;
    }

    fn world_threshold(&self, zoom: f64) -> Option<f64> {
        (zoom.is_finite() && zoom > 0.0).then(|| self.config.threshold() / zoom)
    }

    /// Snaps a moving rectangle against `others`.
    ///
    /// Candidates are edge pairs (each vertical edge of `moving` against both
    /// vertical edges of another, likewise horizontally) and, when enabled,
    /// center pairs. A candidate counts only if it is strictly closer than the
    /// threshold converted to world units at `zoom`. X and Y are solved
    /// independently; on equal distances the earlier candidate wins.
    ///
    /// When no object alignment applies and a grid is configured, the top
    /// left corner is rounded to the grid instead.
    #[must_use]
    pub fn calculate(&self, moving: Rect, others: &[Rect], zoom: f64) -> SnapResult {
        let Some(threshold) = self.world_threshold(zoom) else {
            log::trace!("snap skipped, invalid zoom {zoom}");
            return SnapResult::unsnapped(moving);
        };
        if !rect_is_finite(moving) {
            return SnapResult::unsnapped(moving);
        }

        let mut best_x = Best::new();
        let mut best_y = Best::new();
        for &other in others.iter().filter(|r| rect_is_finite(**r)) {
            let consider = |best: &mut Best<SnapCandidate>, current: f64, target: f64, kind| {
                let candidate = SnapCandidate::new(current, target, kind, moving, other);
                if candidate.distance < threshold {
                    best.offer(candidate.distance, candidate);
                }
            };
            if self.config.snap_to_edges() {
                for current in [moving.x0, moving.x1] {
                    for target in [other.x0, other.x1] {
                        consider(&mut best_x, current, target, SnapKind::Edge);
                    }
                }
                for current in [moving.y0, moving.y1] {
                    for target in [other.y0, other.y1] {
                        consider(&mut best_y, current, target, SnapKind::Edge);
                    }
                }
            }
            if self.config.snap_to_centers() {
                let (m, o) = (moving.center(), other.center());
                consider(&mut best_x, m.x, o.x, SnapKind::Center);
                consider(&mut best_y, m.y, o.y, SnapKind::Center);
            }
        }

        let snapped_x = best_x.into_inner();
        let snapped_y = best_y.into_inner();
        let shift = Vec2::new(
            snapped_x.map_or(0.0, |c| c.delta()),
            snapped_y.map_or(0.0, |c| c.delta()),
        );
        let mut result = SnapResult {
            bounds: moving + shift,
            guides: SmallVec::new(),
            snapped_x,
            snapped_y,
            grid_snapped: false,
        };
        self.push_guides(&mut result);

        if snapped_x.is_none() && snapped_y.is_none() {
            if let Some(grid) = self.config.grid_size() {
                let origin = Point::new(
                    round_to_grid(result.bounds.x0, grid),
                    round_to_grid(result.bounds.y0, grid),
                );
                result.bounds = result.bounds.with_origin(origin);
                result.grid_snapped = true;
            }
        }
        log::trace!("snap {moving:?} -> {:?}", result.bounds);
        result
    }

    /// Resizes `current` by moving `active_edges` by `delta`, then snaps only
    /// those edges.
    ///
    /// Each active edge is matched against both parallel edges of every other
    /// rectangle, never against centers. The best X and best Y snap apply
    /// independently to whichever edge produced them. A snap that would
    /// push an edge past the opposite edge is skipped. With edge snapping
    /// disabled, or no active edges, the resized bounds pass through.
    #[must_use]
    pub fn calculate_resize(
        &self,
        current: Rect,
        active_edges: ResizeEdges,
        delta: Vec2,
        others: &[Rect],
        zoom: f64,
    ) -> SnapResult {
        if !(rect_is_finite(current) && delta.x.is_finite() && delta.y.is_finite()) {
            log::trace!("resize snap skipped, non-finite input");
            return SnapResult::unsnapped(current);
        }
        let mut resized = current;
        if active_edges.contains(ResizeEdges::LEFT) {
            resized.x0 += delta.x;
        }
        if active_edges.contains(ResizeEdges::RIGHT) {
            resized.x1 += delta.x;
        }
        if active_edges.contains(ResizeEdges::TOP) {
            resized.y0 += delta.y;
        }
        if active_edges.contains(ResizeEdges::BOTTOM) {
            resized.y1 += delta.y;
        }
        if !self.config.snap_to_edges() || active_edges.is_empty() {
            return SnapResult::unsnapped(resized);
        }
        let Some(threshold) = self.world_threshold(zoom) else {
            return SnapResult::unsnapped(resized);
        };

        let mut best_x = Best::new();
        let mut best_y = Best::new();
        for &other in others.iter().filter(|r| rect_is_finite(**r)) {
            let consider = |best: &mut Best<(ResizeEdges, SnapCandidate)>,
                            edge: ResizeEdges,
                            current: f64,
                            target: f64| {
                let candidate = SnapCandidate::new(current, target, SnapKind::Edge, resized, other);
                if candidate.distance < threshold {
                    best.offer(candidate.distance, (edge, candidate));
                }
            };
            for target in [other.x0, other.x1] {
                if active_edges.contains(ResizeEdges::LEFT) && target <= resized.x1 {
                    consider(&mut best_x, ResizeEdges::LEFT, resized.x0, target);
                }
                if active_edges.contains(ResizeEdges::RIGHT) && target >= resized.x0 {
                    consider(&mut best_x, ResizeEdges::RIGHT, resized.x1, target);
                }
            }
            for target in [other.y0, other.y1] {
                if active_edges.contains(ResizeEdges::TOP) && target <= resized.y1 {
                    consider(&mut best_y, ResizeEdges::TOP, resized.y0, target);
                }
                if active_edges.contains(ResizeEdges::BOTTOM) && target >= resized.y0 {
                    consider(&mut best_y, ResizeEdges::BOTTOM, resized.y1, target);
                }
            }
        }

        let mut bounds = resized;
        let snapped_x = best_x.into_inner().map(|(edge, c)| {
            if edge == ResizeEdges::LEFT {
                bounds.x0 = c.target;
            } else {
                bounds.x1 = c.target;
            }
            c
        });
        let snapped_y = best_y.into_inner().map(|(edge, c)| {
            if edge == ResizeEdges::TOP {
                bounds.y0 = c.target;
            } else {
                bounds.y1 = c.target;
            }
            c
        });
        let mut result = SnapResult {
            bounds,
            guides: SmallVec::new(),
            snapped_x,
            snapped_y,
            grid_snapped: false,
        };
        self.push_guides(&mut result);
        log::trace!("resize snap {resized:?} -> {:?}", result.bounds);
        result
    }

    fn push_guides(&self, result: &mut SnapResult) {
        let margin = self.config.guide_margin();
        if let Some(c) = result.snapped_x {
            result.guides.push(SnapGuide::spanning(
                GuideAxis::Vertical,
                c.target,
                result.bounds,
                c.other,
                margin,
                guide_kind(c.kind),
            ));
        }
        if let Some(c) = result.snapped_y {
            result.guides.push(SnapGuide::spanning(
                GuideAxis::Horizontal,
                c.target,
                result.bounds,
                c.other,
                margin,
                guide_kind(c.kind),
            ));
        }
    }
}

fn guide_kind(kind: SnapKind) -> GuideKind {
    match kind {
        SnapKind::Edge => GuideKind::Edge,
        SnapKind::Center => GuideKind::Center,
    }
}

fn round_to_grid(value: f64, grid: f64) -> f64 {
    (value / grid).round() * grid
}

fn rect_is_finite(r: Rect) -> bool {
    r.x0.is_finite() && r.y0.is_finite() && r.x1.is_finite() && r.y1.is_finite()
}

#[cfg(test)]
mod tests {
    use kurbo::{Rect, Vec2};

    use super::SnapEngine;
    use crate::config::SnapConfig;
    use crate::guide::{GuideAxis, GuideKind};
    use crate::types::{ResizeEdges, SnapKind};

    fn engine() -> SnapEngine {
        SnapEngine::default()
    }

    #[test]
    fn closest_edge_wins_and_suppresses_grid() {
        let config = SnapConfig::builder()
            .threshold(5.0)
            .grid_size(Some(10.0))
            .build()
            .unwrap();
        let engine = SnapEngine::new(config);
        let moving = Rect::new(100.0, 0.0, 150.0, 50.0);
        let others = [
            Rect::new(98.0, 300.0, 198.0, 400.0),
            Rect::new(103.0, 500.0, 203.0, 600.0),
        ];
        let r = engine.calculate(moving, &others, 1.0);
        assert_eq!(r.bounds, Rect::new(98.0, 0.0, 148.0, 50.0));
        assert!(!r.grid_snapped);
        assert!(r.snapped_y.is_none());

        let x = r.snapped_x.unwrap();
        assert_eq!(x.kind, SnapKind::Edge);
        assert_eq!(x.distance, 2.0);
        assert_eq!(x.other, others[0]);

        assert_eq!(r.guides.len(), 1);
        let guide = r.guides[0];
        assert_eq!(guide.axis, GuideAxis::Vertical);
        assert_eq!(guide.position, 98.0);
        assert_eq!(guide.start, Some(-20.0));
        assert_eq!(guide.end, Some(420.0));
    }

    #[test]
    fn grid_applies_when_nothing_aligns() {
        let engine = SnapEngine::new(SnapConfig::builder().grid_size(Some(10.0)).build().unwrap());
        let r = engine.calculate(Rect::new(13.0, 27.0, 63.0, 77.0), &[], 1.0);
        assert_eq!(r.bounds, Rect::new(10.0, 30.0, 60.0, 80.0));
        assert!(r.grid_snapped);
        assert!(r.guides.is_empty());
        assert!(r.is_snapped());
    }

    #[test]
    fn threshold_is_in_view_pixels() {
        let moving = Rect::new(100.0, 0.0, 150.0, 50.0);
        let other = [Rect::new(105.0, 300.0, 155.0, 400.0)];
        let near = engine().calculate(moving, &other, 1.0);
        assert_eq!(near.bounds.x0, 105.0);
        // At 2x, 8 px is only 4 world units.
        let far = engine().calculate(moving, &other, 2.0);
        assert_eq!(far.bounds, moving);
        assert!(!far.is_snapped());
    }

    #[test]
    fn distance_equal_to_threshold_does_not_snap() {
        let moving = Rect::new(100.0, 0.0, 150.0, 50.0);
        // Edges and centers are all exactly 4 world units apart, the
        // threshold at 2x.
        let other = [Rect::new(104.0, 300.0, 154.0, 400.0)];
        let result = engine().calculate(moving, &other, 2.0);
        assert_eq!(result.bounds, moving);
        assert!(!result.is_snapped());

        let nudged = [Rect::new(103.99, 300.0, 153.99, 400.0)];
        assert!(engine().calculate(moving, &nudged, 2.0).is_snapped());
    }

    #[test]
    fn centers_align_when_edges_are_disabled() {
        let engine = SnapEngine::new(SnapConfig::builder().snap_to_edges(false).build().unwrap());
        let moving = Rect::new(0.0, 0.0, 40.0, 40.0);
        let other = Rect::new(100.0, 13.0, 140.0, 33.0);
        let r = engine.calculate(moving, &[other], 1.0);
        assert_eq!(r.bounds, Rect::new(0.0, 3.0, 40.0, 43.0));
        assert!(r.snapped_x.is_none());
        let guide = r.guides[0];
        assert_eq!(guide.axis, GuideAxis::Horizontal);
        assert_eq!(guide.kind, GuideKind::Center);
        assert_eq!(guide.position, 23.0);
        assert_eq!((guide.start, guide.end), (Some(-20.0), Some(160.0)));
    }

    #[test]
    fn axes_snap_independently() {
        let moving = Rect::new(0.0, 0.0, 50.0, 50.0);
        let other = Rect::new(52.0, 53.0, 100.0, 100.0);
        let r = engine().calculate(moving, &[other], 1.0);
        assert_eq!(r.bounds, Rect::new(2.0, 3.0, 52.0, 53.0));
        assert_eq!(r.guides.len(), 2);
        assert_eq!(r.guides[0].axis, GuideAxis::Vertical);
        assert_eq!(r.guides[1].axis, GuideAxis::Horizontal);
    }

    #[test]
    fn ties_go_to_the_first_candidate() {
        let moving = Rect::new(100.0, 0.0, 150.0, 50.0);
        let others = [
            Rect::new(97.0, 300.0, 130.0, 400.0),
            Rect::new(103.0, 500.0, 140.0, 600.0),
        ];
        let r = engine().calculate(moving, &others, 1.0);
        assert_eq!(r.bounds.x0, 97.0);
        assert_eq!(r.snapped_x.unwrap().other, others[0]);
    }

    #[test]
    fn degenerate_input_passes_through() {
        let moving = Rect::new(0.0, 0.0, 10.0, 10.0);
        let nan = Rect::new(f64::NAN, 0.0, 1.0, 1.0);
        assert_eq!(engine().calculate(moving, &[nan], 1.0).bounds, moving);
        let other = [Rect::new(1.0, 1.0, 11.0, 11.0)];
        assert!(!engine().calculate(moving, &other, 0.0).is_snapped());
        assert!(!engine().calculate(moving, &other, f64::INFINITY).is_snapped());
    }

    #[test]
    fn resize_snaps_only_the_dragged_edge() {
        let current = Rect::new(0.0, 0.0, 100.0, 50.0);
        let other = Rect::new(148.0, 200.0, 300.0, 300.0);
        let r = engine().calculate_resize(
            current,
            ResizeEdges::RIGHT,
            Vec2::new(45.0, 0.0),
            &[other],
            1.0,
        );
        assert_eq!(r.bounds, Rect::new(0.0, 0.0, 148.0, 50.0));
        assert!(r.snapped_y.is_none());
        let guide = r.guides[0];
        assert_eq!(guide.position, 148.0);
        assert_eq!((guide.start, guide.end), (Some(-20.0), Some(320.0)));
    }

    #[test]
    fn resize_ignores_centers() {
        let current = Rect::new(0.0, 0.0, 100.0, 50.0);
        // Center x is 148, both edges are far away.
        let other = Rect::new(120.0, 200.0, 176.0, 300.0);
        let r = engine().calculate_resize(
            current,
            ResizeEdges::RIGHT,
            Vec2::new(45.0, 0.0),
            &[other],
            1.0,
        );
        assert_eq!(r.bounds, Rect::new(0.0, 0.0, 145.0, 50.0));
        assert!(r.guides.is_empty());
    }

    #[test]
    fn resize_skips_inverting_snaps() {
        let current = Rect::new(100.0, 0.0, 200.0, 50.0);
        let delta = Vec2::new(99.0, 0.0);
        let inverting = Rect::new(0.0, 300.0, 203.0, 400.0);
        let r = engine().calculate_resize(current, ResizeEdges::LEFT, delta, &[inverting], 1.0);
        assert_eq!(r.bounds, Rect::new(199.0, 0.0, 200.0, 50.0));
        assert!(!r.is_snapped());

        let valid = Rect::new(0.0, 300.0, 195.0, 400.0);
        let r = engine().calculate_resize(
            current,
            ResizeEdges::LEFT,
            delta,
            &[inverting, valid],
            1.0,
        );
        assert_eq!(r.bounds.x0, 195.0);
    }

    #[test]
    fn corner_resize_maps_snaps_back_to_their_edges() {
        let other = Rect::new(150.0, 155.0, 200.0, 200.0);
        let r = engine().calculate_resize(
            Rect::new(0.0, 0.0, 100.0, 100.0),
            ResizeEdges::BOTTOM_RIGHT,
            Vec2::new(47.0, 52.0),
            &[other],
            1.0,
        );
        assert_eq!(r.bounds, Rect::new(0.0, 0.0, 150.0, 155.0));
        assert_eq!(r.guides.len(), 2);

        let other = Rect::new(0.0, 0.0, 40.0, 40.0);
        let r = engine().calculate_resize(
            Rect::new(50.0, 50.0, 100.0, 100.0),
            ResizeEdges::TOP_LEFT,
            Vec2::new(-8.0, -9.0),
            &[other],
            1.0,
        );
        assert_eq!(r.bounds, Rect::new(40.0, 40.0, 100.0, 100.0));
    }

    #[test]
    fn resize_pass_through() {
        let current = Rect::new(0.0, 0.0, 100.0, 50.0);
        let other = [Rect::new(148.0, 200.0, 300.0, 300.0)];
        let r = engine().calculate_resize(
            current,
            ResizeEdges::empty(),
            Vec2::new(10.0, 10.0),
            &other,
            1.0,
        );
        assert_eq!(r.bounds, current);
        assert!(r.guides.is_empty());

        let no_edges = SnapEngine::new(SnapConfig::builder().snap_to_edges(false).build().unwrap());
        let r = no_edges.calculate_resize(
            current,
            ResizeEdges::RIGHT,
            Vec2::new(45.0, 0.0),
            &other,
            1.0,
        );
        assert_eq!(r.bounds, Rect::new(0.0, 0.0, 145.0, 50.0));
        assert!(!r.is_snapped());
    }
}
