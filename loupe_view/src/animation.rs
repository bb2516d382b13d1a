// Copyright 2025 the Loupe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Frame‑driven animation of the viewport transform.
//!
//! Every animation is a [`Motion`]: given the current transform and the time
//! since the animation started, it proposes the next transform. The
//! controller owns at most one running motion, commits what it proposes
//! (under the physics policy) on every [`crate::ViewportController::tick`],
//! and reports completion through an [`AnimationHandle`].
//!
//! Two motions ship with the crate:
//! - [`Transition`]: eased interpolation towards a target transform.
//! - [`Glide`]: friction‑decelerated pan after a gesture is released.
//!
//! Frames are requested through a host‑provided [`FrameScheduler`]. Without
//! one, the controller jumps straight to an animation's end state.

use alloc::boxed::Box;
use alloc::rc::Rc;
use core::cell::Cell;
use core::fmt;
use core::time::Duration;

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _; // for `powf` and `ln`
use kurbo::Vec2;

use crate::transform::ViewportTransform;

/// Glides stop once their speed drops below this, in view pixels per second.
pub const GLIDE_STOP_SPEED: f64 = 5.0;

/// Pan drift (in view pixels) between frames that counts as being blocked by bounds.
const BLOCKED_EPSILON: f64 = 1e-6;

/// Host capability that delivers frame callbacks.
///
/// The controller calls [`FrameScheduler::request_frame`] whenever it needs
/// another frame; the host answers by calling
/// [`crate::ViewportController::tick`] with the frame timestamp.
pub trait FrameScheduler {
    /// Asks the host for one more frame.
    fn request_frame(&mut self);
}

impl<F: FnMut()> FrameScheduler for F {
    fn request_frame(&mut self) {
        self();
    }
}

/// Outcome of advancing a [`Motion`] by one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MotionStep {
    /// Commit this transform and keep running.
    Continue(ViewportTransform),
    /// Commit this transform and stop.
    Finish(ViewportTransform),
}

impl MotionStep {
    /// The transform proposed for this frame.
    #[must_use]
    pub fn transform(&self) -> ViewportTransform {
        match self {
            Self::Continue(t) | Self::Finish(t) => *t,
        }
    }
}

/// A time‑driven change of the viewport transform.
pub trait Motion: fmt::Debug {
    /// Proposes the transform for the current frame.
    ///
    /// `current` is the transform as committed after the previous frame
    /// (already clamped), `elapsed` the time since the first frame.
    fn step(&mut self, current: ViewportTransform, elapsed: Duration) -> MotionStep;

    /// The transform this motion ends at when no frames can be delivered.
    fn settle(&mut self, current: ViewportTransform) -> ViewportTransform;
}

/// Easing curve applied to a transition's progress.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub enum Easing {
    /// No easing.
    Linear,
    /// Cubic ease in.
    EaseIn,
    /// Cubic ease out.
    EaseOut,
    /// Cubic ease in and out.
    #[default]
    EaseInOut,
    /// Material "standard" curve: fast out, slow in.
    FastOutSlowIn,
    /// Arbitrary CSS‑style cubic Bézier through `(0,0)`, `(x1,y1)`, `(x2,y2)`, `(1,1)`.
    CubicBezier(f64, f64, f64, f64),
}

impl Easing {
    /// Maps a linear fraction in `[0, 1]` onto the curve.
    #[must_use]
    pub fn transform(&self, fraction: f64) -> f64 {
        match *self {
            Self::Linear => fraction.clamp(0.0, 1.0),
            Self::EaseIn => cubic_bezier(0.42, 0.0, 1.0, 1.0, fraction),
            Self::EaseOut => cubic_bezier(0.0, 0.0, 0.58, 1.0, fraction),
            Self::EaseInOut => cubic_bezier(0.42, 0.0, 0.58, 1.0, fraction),
            Self::FastOutSlowIn => cubic_bezier(0.4, 0.0, 0.2, 1.0, fraction),
            Self::CubicBezier(x1, y1, x2, y2) => cubic_bezier(x1, y1, x2, y2, fraction),
        }
    }
}

fn cubic_bezier(x1: f64, y1: f64, x2: f64, y2: f64, fraction: f64) -> f64 {
    if fraction <= 0.0 {
        return 0.0;
    }
    if fraction >= 1.0 {
        return 1.0;
    }

    let cx = 3.0 * x1;
    let bx = 3.0 * (x2 - x1) - cx;
    let ax = 1.0 - cx - bx;
    let cy = 3.0 * y1;
    let by = 3.0 * (y2 - y1) - cy;
    let ay = 1.0 - cy - by;

    let sample = |a: f64, b: f64, c: f64, t: f64| ((a * t + b) * t + c) * t;
    let slope = |a: f64, b: f64, c: f64, t: f64| (3.0 * a * t + 2.0 * b) * t + c;

    // Newton-Raphson for the parameter whose x matches `fraction`, falling
    // back to bisection when the slope flattens out.
    let mut t = fraction;
    let mut solved = false;
    for _ in 0..8 {
        let x = sample(ax, bx, cx, t) - fraction;
        if x.abs() < 1e-7 {
            solved = true;
            break;
        }
        let dx = slope(ax, bx, cx, t);
        if dx.abs() < 1e-7 {
            break;
        }
        t = (t - x / dx).clamp(0.0, 1.0);
    }
    if !solved {
        let (mut lo, mut hi) = (0.0, 1.0);
        t = fraction;
        for _ in 0..32 {
            let x = sample(ax, bx, cx, t) - fraction;
            if x.abs() < 1e-7 {
                break;
            }
            if x > 0.0 {
                hi = t;
            } else {
                lo = t;
            }
            t = 0.5 * (lo + hi);
        }
    }
    sample(ay, by, cy, t)
}

/// Eased interpolation from one transform to another.
///
/// Zoom is interpolated linearly and pan as a vector, both driven by the
/// eased progress.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transition {
    from: ViewportTransform,
    to: ViewportTransform,
    duration: Duration,
    easing: Easing,
}

impl Transition {
    /// Creates a transition between two transforms.
    #[must_use]
    pub fn new(
        from: ViewportTransform,
        to: ViewportTransform,
        duration: Duration,
        easing: Easing,
    ) -> Self {
        Self {
            from,
            to,
            duration,
            easing,
        }
    }

    /// Transform at linear progress `t ∈ [0, 1]`.
    #[must_use]
    pub fn sample(&self, t: f64) -> ViewportTransform {
        let e = self.easing.transform(t);
        ViewportTransform {
            zoom: self.from.zoom + (self.to.zoom - self.from.zoom) * e,
            pan: self.from.pan.lerp(self.to.pan, e),
        }
    }

    /// The end state.
    #[must_use]
    pub fn target(&self) -> ViewportTransform {
        self.to
    }
}

impl Motion for Transition {
    fn step(&mut self, _current: ViewportTransform, elapsed: Duration) -> MotionStep {
        if elapsed >= self.duration || self.duration.is_zero() {
            return MotionStep::Finish(self.to);
        }
        let t = elapsed.as_secs_f64() / self.duration.as_secs_f64();
        MotionStep::Continue(self.sample(t))
    }

    fn settle(&mut self, _current: ViewportTransform) -> ViewportTransform {
        self.to
    }
}

/// Friction‑decelerated pan at constant zoom.
///
/// Velocity decays as `v(t) = v0 * friction^t` (`t` in seconds). Each frame
/// moves the pan by the exact integral of that curve since the previous
/// frame, so the path is independent of the frame rate. An axis stops as soon
/// as the committed pan stops following it (the physics policy clamped it),
/// and the glide ends below [`GLIDE_STOP_SPEED`] or when both axes stopped.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Glide {
    velocity: Vec2,
    friction: f64,
    live_x: bool,
    live_y: bool,
    last_secs: f64,
    expected: Option<Vec2>,
}

impl Glide {
    /// Creates a glide with initial `velocity` (view pixels per second).
    ///
    /// `friction` is the fraction of velocity retained per second and is
    /// expected in `(0, 1)`.
    #[must_use]
    pub fn new(velocity: Vec2, friction: f64) -> Self {
        Self {
            velocity,
            friction,
            live_x: velocity.x != 0.0,
            live_y: velocity.y != 0.0,
            last_secs: 0.0,
            expected: None,
        }
    }

    /// Initial velocity of the glide.
    #[must_use]
    pub fn initial_velocity(&self) -> Vec2 {
        self.velocity
    }

    /// Speed after `secs` seconds on the axes that are still moving.
    #[must_use]
    pub fn speed_at(&self, secs: f64) -> f64 {
        let v = Vec2::new(
            if self.live_x { self.velocity.x } else { 0.0 },
            if self.live_y { self.velocity.y } else { 0.0 },
        );
        v.hypot() * self.friction.powf(secs)
    }

    /// Total pan distance of an unobstructed glide.
    #[must_use]
    pub fn total_displacement(&self) -> Vec2 {
        self.velocity * (-1.0 / self.friction.ln())
    }

    fn displacement_between(&self, from_secs: f64, to_secs: f64) -> Vec2 {
        let ln = self.friction.ln();
        let k = (self.friction.powf(to_secs) - self.friction.powf(from_secs)) / ln;
        Vec2::new(
            if self.live_x { self.velocity.x * k } else { 0.0 },
            if self.live_y { self.velocity.y * k } else { 0.0 },
        )
    }
}

impl Motion for Glide {
    fn step(&mut self, current: ViewportTransform, elapsed: Duration) -> MotionStep {
        if let Some(expected) = self.expected {
            if (current.pan.x - expected.x).abs() > BLOCKED_EPSILON {
                self.live_x = false;
            }
            if (current.pan.y - expected.y).abs() > BLOCKED_EPSILON {
                self.live_y = false;
            }
        }
        let secs = elapsed.as_secs_f64();
        let delta = self.displacement_between(self.last_secs, secs);
        self.last_secs = secs;

        let next = ViewportTransform::new(current.zoom, current.pan + delta);
        self.expected = Some(next.pan);
        if (!self.live_x && !self.live_y) || self.speed_at(secs) < GLIDE_STOP_SPEED {
            MotionStep::Finish(next)
        } else {
            MotionStep::Continue(next)
        }
    }

    fn settle(&mut self, current: ViewportTransform) -> ViewportTransform {
        let rest = self.displacement_between(self.last_secs, f64::INFINITY);
        ViewportTransform::new(current.zoom, current.pan + rest)
    }
}

/// State of an animation as seen through its [`AnimationHandle`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AnimationStatus {
    /// Frames are still being applied.
    Running,
    /// The animation reached its end state.
    Completed,
    /// The animation was superseded, cancelled, or the controller detached.
    Cancelled,
}

/// Completion signal of an animation.
///
/// Handles are cheap to clone; all clones observe the same status.
#[derive(Clone, Debug)]
pub struct AnimationHandle {
    status: Rc<Cell<AnimationStatus>>,
}

impl AnimationHandle {
    pub(crate) fn running() -> Self {
        Self {
            status: Rc::new(Cell::new(AnimationStatus::Running)),
        }
    }

    pub(crate) fn resolve(&self, status: AnimationStatus) {
        if self.status.get() == AnimationStatus::Running {
            self.status.set(status);
        }
    }

    /// Current status.
    #[must_use]
    pub fn status(&self) -> AnimationStatus {
        self.status.get()
    }

    /// Returns `true` while frames are still being applied.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.status() == AnimationStatus::Running
    }

    /// Returns `true` once the animation reached its end state.
    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.status() == AnimationStatus::Completed
    }
}

/// The running animation: a motion plus its clock and completion signal.
#[derive(Debug)]
pub(crate) struct Animation {
    motion: Box<dyn Motion>,
    handle: AnimationHandle,
    started_at: Option<Duration>,
}

impl Animation {
    pub(crate) fn new(motion: Box<dyn Motion>) -> Self {
        Self {
            motion,
            handle: AnimationHandle::running(),
            started_at: None,
        }
    }

    pub(crate) fn handle(&self) -> &AnimationHandle {
        &self.handle
    }

    /// Advances to frame time `now`; the first frame defines time zero.
    pub(crate) fn advance(&mut self, now: Duration, current: ViewportTransform) -> MotionStep {
        let start = *self.started_at.get_or_insert(now);
        self.motion.step(current, now.saturating_sub(start))
    }

    pub(crate) fn settle(&mut self, current: ViewportTransform) -> ViewportTransform {
        self.motion.settle(current)
    }
}

#[cfg(test)]
mod tests {
    use core::time::Duration;

    use kurbo::Vec2;

    use super::{
        AnimationHandle, AnimationStatus, Easing, GLIDE_STOP_SPEED, Glide, Motion, MotionStep,
        Transition,
    };
    use crate::transform::ViewportTransform;

    #[test]
    fn easing_curves_hit_endpoints_and_stay_monotonic() {
        for easing in [
            Easing::Linear,
            Easing::EaseIn,
            Easing::EaseOut,
            Easing::EaseInOut,
            Easing::FastOutSlowIn,
        ] {
            assert_eq!(easing.transform(0.0), 0.0);
            assert_eq!(easing.transform(1.0), 1.0);
            let mut prev = 0.0;
            for i in 1..=20 {
                let v = easing.transform(f64::from(i) / 20.0);
                assert!(v + 1e-9 >= prev, "{easing:?} not monotonic at {i}");
                prev = v;
            }
        }
        assert!((Easing::EaseInOut.transform(0.5) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn transition_interpolates_and_finishes_at_target() {
        let from = ViewportTransform::new(1.0, Vec2::ZERO);
        let to = ViewportTransform::new(3.0, Vec2::new(100.0, -50.0));
        let mut t = Transition::new(from, to, Duration::from_millis(200), Easing::Linear);

        let mid = t.step(from, Duration::from_millis(100));
        assert_eq!(
            mid,
            MotionStep::Continue(ViewportTransform::new(2.0, Vec2::new(50.0, -25.0)))
        );
        assert_eq!(t.step(from, Duration::from_millis(250)), MotionStep::Finish(to));
    }

    #[test]
    fn zero_duration_transition_finishes_immediately() {
        let to = ViewportTransform::new(2.0, Vec2::new(1.0, 1.0));
        let mut t = Transition::new(ViewportTransform::IDENTITY, to, Duration::ZERO, Easing::Linear);
        assert_eq!(
            t.step(ViewportTransform::IDENTITY, Duration::ZERO),
            MotionStep::Finish(to)
        );
    }

    #[test]
    fn glide_covers_the_analytic_distance_regardless_of_frame_rate() {
        let velocity = Vec2::new(1000.0, 0.0);
        let expected = Glide::new(velocity, 0.135).total_displacement();

        for fps in [30_u64, 60, 144] {
            let mut glide = Glide::new(velocity, 0.135);
            let mut current = ViewportTransform::IDENTITY;
            let frame = Duration::from_nanos(1_000_000_000 / fps);
            let mut now = Duration::ZERO;
            loop {
                let step = glide.step(current, now);
                current = step.transform();
                if matches!(step, MotionStep::Finish(_)) {
                    break;
                }
                now += frame;
            }
            // The tail below the stop speed is never travelled.
            let tail = GLIDE_STOP_SPEED / -(0.135_f64.ln());
            assert!((current.pan.x - expected.x).abs() <= tail + 1.0, "fps {fps}");
            assert_eq!(current.pan.y, 0.0);
        }
    }

    #[test]
    fn glide_stops_an_axis_that_was_clamped() {
        let mut glide = Glide::new(Vec2::new(500.0, 500.0), 0.135);
        let first = glide.step(ViewportTransform::IDENTITY, Duration::ZERO).transform();
        let second = glide.step(first, Duration::from_millis(16)).transform();
        assert!(second.pan.x > 0.0 && second.pan.y > 0.0);

        // Pretend the physics policy pinned x.
        let pinned = ViewportTransform::new(1.0, Vec2::new(first.pan.x, second.pan.y));
        let third = glide.step(pinned, Duration::from_millis(32)).transform();
        assert_eq!(third.pan.x, pinned.pan.x);
        assert!(third.pan.y > pinned.pan.y);

        // Pin y as well: the glide ends.
        let both = ViewportTransform::new(1.0, Vec2::new(pinned.pan.x, pinned.pan.y));
        assert!(matches!(
            glide.step(both, Duration::from_millis(48)),
            MotionStep::Finish(_)
        ));
    }

    #[test]
    fn handle_resolves_once() {
        let handle = AnimationHandle::running();
        let clone = handle.clone();
        assert!(handle.is_running());
        handle.resolve(AnimationStatus::Cancelled);
        handle.resolve(AnimationStatus::Completed);
        assert_eq!(clone.status(), AnimationStatus::Cancelled);
        assert!(!clone.is_completed());

        let done = AnimationHandle::running();
        done.resolve(AnimationStatus::Completed);
        done.resolve(AnimationStatus::Cancelled);
        assert!(done.is_completed());
    }
}
