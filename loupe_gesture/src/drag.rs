// Copyright 2025 the Loupe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drag session: threshold classification, movement deltas and release velocity.
//!
//! ## Usage
//!
//! 1) Open a session on pointer down with [`DragSession::new`], passing the
//!    device threshold from [`crate::rules::drag_threshold_for`].
//! 2) Feed every move to [`DragSession::update`]. It reports
//!    [`DragProgress::Pending`] until the pointer has travelled further than
//!    the threshold from the down point, then [`DragProgress::Started`] once,
//!    then [`DragProgress::Moved`].
//! 3) On release, read [`DragSession::release_velocity`] and drop the session.
//!
//! ## Minimal example
//!
//! ```
//! use core::time::Duration;
//! use kurbo::{Point, Vec2};
//! use loupe_gesture::drag::{DragProgress, DragSession};
//! use loupe_gesture::event::{DeviceKind, PointerId};
//!
//! let ms = Duration::from_millis;
//! let mut drag = DragSession::new(PointerId(0), DeviceKind::Mouse, Point::new(10.0, 20.0), ms(0), 8.0);
//!
//! // Jitter below the threshold does not start a drag.
//! assert_eq!(drag.update(Point::new(13.0, 20.0), ms(8)), DragProgress::Pending);
//!
//! // Crossing it reports the whole movement since the down point.
//! assert_eq!(
//!     drag.update(Point::new(20.0, 20.0), ms(16)),
//!     DragProgress::Started { offset: Vec2::new(10.0, 0.0) }
//! );
//! assert_eq!(
//!     drag.update(Point::new(25.0, 25.0), ms(24)),
//!     DragProgress::Moved { delta: Vec2::new(5.0, 5.0) }
//! );
//! assert_eq!(drag.total_offset(), Vec2::new(15.0, 5.0));
//! ```

use core::time::Duration;

use kurbo::{Point, Vec2};

use crate::event::{DeviceKind, PointerId};
use crate::rules::ASSUME_STOPPED;
use crate::velocity::VelocityFilter;

/// Whether a session has crossed its threshold.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DragPhase {
    /// Pointer is down but has not moved far enough.
    Pending,
    /// The movement is a drag.
    Dragging,
}

/// Result of feeding a move into a [`DragSession`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DragProgress {
    /// Still within the threshold.
    Pending,
    /// The threshold was crossed by this move; `offset` is the movement since
    /// the down point.
    Started {
        /// Movement since the down point.
        offset: Vec2,
    },
    /// Movement since the previous move, while dragging.
    Moved {
        /// Movement since the previous move.
        delta: Vec2,
    },
}

/// Per‑pointer state between pointer down and pointer up.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragSession {
    pointer_id: PointerId,
    kind: DeviceKind,
    start: Point,
    last: Point,
    threshold: f64,
    phase: DragPhase,
    velocity: VelocityFilter,
}

impl DragSession {
    /// Opens a session at the down position.
    #[must_use]
    pub fn new(
        pointer_id: PointerId,
        kind: DeviceKind,
        start: Point,
        timestamp: Duration,
        threshold: f64,
    ) -> Self {
        Self {
            pointer_id,
            kind,
            start,
            last: start,
            threshold,
            phase: DragPhase::Pending,
            velocity: VelocityFilter::new(timestamp),
        }
    }

    /// Feeds a move and reports how the session progressed.
    pub fn update(&mut self, position: Point, timestamp: Duration) -> DragProgress {
        let delta = position - self.last;
        self.last = position;
        self.velocity.add(delta, timestamp);
        match self.phase {
            DragPhase::Dragging => DragProgress::Moved { delta },
            DragPhase::Pending => {
                let offset = position - self.start;
                if offset.hypot() > self.threshold {
                    self.phase = DragPhase::Dragging;
                    DragProgress::Started { offset }
                } else {
                    DragProgress::Pending
                }
            }
        }
    }

    /// Pointer that owns the session.
    #[must_use]
    pub fn pointer_id(&self) -> PointerId {
        self.pointer_id
    }

    /// Device kind of the owning pointer.
    #[must_use]
    pub fn kind(&self) -> DeviceKind {
        self.kind
    }

    /// Down position.
    #[must_use]
    pub fn start(&self) -> Point {
        self.start
    }

    /// Most recent position.
    #[must_use]
    pub fn last(&self) -> Point {
        self.last
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> DragPhase {
        self.phase
    }

    /// Returns `true` once the threshold was crossed.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.phase == DragPhase::Dragging
    }

    /// Movement from the down point to the most recent position.
    #[must_use]
    pub fn total_offset(&self) -> Vec2 {
        self.last - self.start
    }

    /// Smoothed velocity at `release`, zero if the pointer rested longer than
    /// [`ASSUME_STOPPED`] before it.
    #[must_use]
    pub fn release_velocity(&self, release: Duration) -> Vec2 {
        self.velocity.release_velocity(release, ASSUME_STOPPED)
    }
}

#[cfg(test)]
mod tests {
    use core::time::Duration;

    use kurbo::{Point, Vec2};

    use super::{DragPhase, DragProgress, DragSession};
    use crate::event::{DeviceKind, PointerId};

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    fn session(threshold: f64) -> DragSession {
        DragSession::new(
            PointerId(1),
            DeviceKind::Touch,
            Point::new(100.0, 100.0),
            ms(0),
            threshold,
        )
    }

    #[test]
    fn new_session_is_pending() {
        let s = session(8.0);
        assert_eq!(s.phase(), DragPhase::Pending);
        assert_eq!(s.start(), s.last());
        assert_eq!(s.total_offset(), Vec2::ZERO);
    }

    #[test]
    fn threshold_is_measured_from_the_down_point() {
        let mut s = session(8.0);
        // Wander around without getting further than 8 px away.
        assert_eq!(s.update(Point::new(105.0, 100.0), ms(8)), DragProgress::Pending);
        assert_eq!(s.update(Point::new(95.0, 100.0), ms(16)), DragProgress::Pending);
        assert_eq!(s.update(Point::new(100.0, 108.0), ms(24)), DragProgress::Pending);
        assert!(!s.is_dragging());

        assert_eq!(
            s.update(Point::new(100.0, 109.0), ms(32)),
            DragProgress::Started {
                offset: Vec2::new(0.0, 9.0)
            }
        );
        assert!(s.is_dragging());
    }

    #[test]
    fn start_fires_once_then_incremental_deltas() {
        let mut s = session(1.0);
        assert!(matches!(
            s.update(Point::new(110.0, 100.0), ms(8)),
            DragProgress::Started { .. }
        ));
        assert_eq!(
            s.update(Point::new(90.0, 85.0), ms(16)),
            DragProgress::Moved {
                delta: Vec2::new(-20.0, -15.0)
            }
        );
        assert_eq!(
            s.update(Point::new(90.0, 85.0), ms(24)),
            DragProgress::Moved { delta: Vec2::ZERO }
        );
        assert_eq!(s.total_offset(), Vec2::new(-10.0, -15.0));
    }

    #[test]
    fn release_velocity_follows_motion_and_rest() {
        let mut s = session(1.0);
        let mut t = 0;
        for i in 1..=10 {
            t = 16 * i;
            s.update(Point::new(100.0 + 16.0 * i as f64, 100.0), ms(t));
        }
        let v = s.release_velocity(ms(t + 5));
        assert!(v.x > 500.0 && v.y == 0.0);
        assert_eq!(s.release_velocity(ms(t + 41)), Vec2::ZERO);
    }

    #[test]
    fn large_coordinate_values() {
        let mut s = DragSession::new(
            PointerId(0),
            DeviceKind::Mouse,
            Point::new(1_000_000.0, 2_000_000.0),
            ms(0),
            0.5,
        );
        assert_eq!(
            s.update(Point::new(1_000_001.0, 2_000_002.0), ms(16)),
            DragProgress::Started {
                offset: Vec2::new(1.0, 2.0)
            }
        );
    }
}
