// Copyright 2025 the Loupe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;
use core::time::Duration;

use kurbo::{Point, Rect, Size, Vec2};

use crate::animation::{
    Animation, AnimationHandle, AnimationStatus, Easing, FrameScheduler, Glide, Motion,
    MotionStep, Transition,
};
use crate::momentum::MomentumConfig;
use crate::observe::{Observers, SubscriptionId, Topics, ViewportChange};
use crate::physics::PhysicsConfig;
use crate::transform::ViewportTransform;
use crate::zoom_level::{ZoomLevel, ZoomThresholds};

/// Motion flags of the viewport.
///
/// Each flag is owned by exactly one producer: `is_panning` and `is_zooming`
/// by the gesture layer, `is_animating` by the animation driver.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct MotionState {
    /// A pan gesture is in progress.
    pub is_panning: bool,
    /// A zoom gesture is in progress.
    pub is_zooming: bool,
    /// A transition or glide is running.
    pub is_animating: bool,
}

impl MotionState {
    /// Returns `true` if any of the flags is set.
    #[must_use]
    pub fn is_in_motion(&self) -> bool {
        self.is_panning || self.is_zooming || self.is_animating
    }
}

/// End state of [`ViewportController::animate_to`].
///
/// Missing fields keep their current value.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AnimationTarget {
    /// Target pan, in view space.
    pub pan: Option<Vec2>,
    /// Target zoom factor.
    pub zoom: Option<f64>,
}

impl AnimationTarget {
    /// Targets a full transform.
    #[must_use]
    pub fn transform(transform: ViewportTransform) -> Self {
        Self {
            pan: Some(transform.pan),
            zoom: Some(transform.zoom),
        }
    }

    /// Targets a zoom factor only.
    #[must_use]
    pub fn zoom(zoom: f64) -> Self {
        Self {
            pan: None,
            zoom: Some(zoom),
        }
    }

    /// Targets a pan only.
    #[must_use]
    pub fn pan(pan: Vec2) -> Self {
        Self {
            pan: Some(pan),
            zoom: None,
        }
    }
}

/// Stateful owner of the viewport transform.
///
/// The controller applies the [`PhysicsConfig`] on every mutation, drives
/// the single running animation from host frame ticks, tracks the
/// [`MotionState`] flags and the derived [`ZoomLevel`], and notifies
/// observers synchronously after each committed change.
///
/// All inputs are absorbed: non‑finite or non‑positive arguments are ignored,
/// and operations that need a viewport size do nothing until one is known.
pub struct ViewportController {
    transform: ViewportTransform,
    physics: PhysicsConfig,
    momentum: MomentumConfig,
    thresholds: ZoomThresholds,
    viewport_size: Option<Size>,
    motion: MotionState,
    zoom_level: ZoomLevel,
    animation: Option<Animation>,
    scheduler: Option<Box<dyn FrameScheduler>>,
    observers: Observers,
    attached: bool,
}

impl fmt::Debug for ViewportController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewportController")
            .field("transform", &self.transform)
            .field("physics", &self.physics)
            .field("momentum", &self.momentum)
            .field("thresholds", &self.thresholds)
            .field("viewport_size", &self.viewport_size)
            .field("motion", &self.motion)
            .field("zoom_level", &self.zoom_level)
            .field("animation", &self.animation)
            .field("has_scheduler", &self.scheduler.is_some())
            .field("observers", &self.observers)
            .field("attached", &self.attached)
            .finish()
    }
}

impl Default for ViewportController {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewportController {
    /// Creates a detached controller with default configuration, the
    /// identity transform and no frame scheduler.
    #[must_use]
    pub fn new() -> Self {
        let thresholds = ZoomThresholds::default();
        Self {
            transform: ViewportTransform::IDENTITY,
            physics: PhysicsConfig::default(),
            momentum: MomentumConfig::default(),
            thresholds,
            viewport_size: None,
            motion: MotionState::default(),
            zoom_level: thresholds.classify(ViewportTransform::IDENTITY.zoom),
            animation: None,
            scheduler: None,
            observers: Observers::new(),
            attached: false,
        }
    }

    /// Builder‑style variant of [`ViewportController::set_frame_scheduler`].
    #[must_use]
    pub fn with_frame_scheduler(mut self, scheduler: impl FrameScheduler + 'static) -> Self {
        self.scheduler = Some(Box::new(scheduler));
        self
    }

    /// Installs or removes the host's frame scheduler.
    ///
    /// Without a scheduler, animations jump to their end state immediately.
    /// Removing the scheduler cancels the running animation.
    pub fn set_frame_scheduler(&mut self, scheduler: Option<Box<dyn FrameScheduler>>) {
        if scheduler.is_none() {
            self.cancel_animations();
        }
        self.scheduler = scheduler;
    }

    /// Binds the controller to a physics policy and a viewport.
    ///
    /// With `initial`, the transform starts from that value (clamped);
    /// otherwise the current transform is re‑clamped. A running animation is
    /// cancelled first.
    pub fn attach(
        &mut self,
        physics: PhysicsConfig,
        viewport_size: Option<Size>,
        initial: Option<ViewportTransform>,
    ) {
        self.cancel_animations();
        self.physics = physics;
        self.viewport_size = viewport_size.filter(|s| valid_size(*s));
        self.attached = true;
        log::debug!(
            "viewport attached: size {:?}, zoom range {}..{}",
            self.viewport_size,
            physics.min_zoom(),
            physics.max_zoom()
        );
        let start = initial.filter(ViewportTransform::is_valid).unwrap_or(self.transform);
        self.commit(start);
    }

    /// Cancels animations and clears every motion flag.
    pub fn detach(&mut self) {
        self.cancel_animations();
        self.set_is_panning(false);
        self.set_is_zooming(false);
        self.attached = false;
        log::debug!("viewport detached");
    }

    /// Returns `true` between [`ViewportController::attach`] and
    /// [`ViewportController::detach`].
    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.attached
    }

    /// Updates the viewport size and re‑clamps the transform.
    pub fn set_viewport_size(&mut self, size: Option<Size>) {
        let size = size.filter(|s| valid_size(*s));
        if size == self.viewport_size {
            return;
        }
        self.viewport_size = size;
        self.commit(self.transform);
    }

    /// Replaces the physics policy and re‑clamps the transform.
    pub fn set_physics(&mut self, physics: PhysicsConfig) {
        log::debug!("physics config replaced: {physics:?}");
        self.physics = physics;
        self.commit(self.transform);
    }

    /// Replaces the momentum policy; a running glide keeps its parameters.
    pub fn set_momentum_config(&mut self, momentum: MomentumConfig) {
        log::debug!("momentum config replaced: {momentum:?}");
        self.momentum = momentum;
    }

    /// Replaces the zoom level thresholds and re‑evaluates the level.
    pub fn set_zoom_thresholds(&mut self, thresholds: ZoomThresholds) {
        self.thresholds = thresholds;
        if !self.motion.is_zooming {
            self.refresh_zoom_level();
        }
    }

    /// Current transform (a copy).
    #[must_use]
    pub fn transform(&self) -> ViewportTransform {
        self.transform
    }

    /// Current zoom factor.
    #[must_use]
    pub fn zoom(&self) -> f64 {
        self.transform.zoom
    }

    /// Current pan offset.
    #[must_use]
    pub fn pan(&self) -> Vec2 {
        self.transform.pan
    }

    /// Active physics policy.
    #[must_use]
    pub fn physics(&self) -> &PhysicsConfig {
        &self.physics
    }

    /// Active momentum policy.
    #[must_use]
    pub fn momentum_config(&self) -> &MomentumConfig {
        &self.momentum
    }

    /// Active zoom level thresholds.
    #[must_use]
    pub fn zoom_thresholds(&self) -> &ZoomThresholds {
        &self.thresholds
    }

    /// Last known viewport size.
    #[must_use]
    pub fn viewport_size(&self) -> Option<Size> {
        self.viewport_size
    }

    /// Current motion flags.
    #[must_use]
    pub fn motion(&self) -> MotionState {
        self.motion
    }

    /// Returns `true` while a pan gesture is in progress.
    #[must_use]
    pub fn is_panning(&self) -> bool {
        self.motion.is_panning
    }

    /// Returns `true` while a zoom gesture is in progress.
    #[must_use]
    pub fn is_zooming(&self) -> bool {
        self.motion.is_zooming
    }

    /// Returns `true` while an animation is running.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.motion.is_animating
    }

    /// Returns `true` if any motion flag is set.
    #[must_use]
    pub fn is_in_motion(&self) -> bool {
        self.motion.is_in_motion()
    }

    /// Current zoom level.
    #[must_use]
    pub fn zoom_level(&self) -> ZoomLevel {
        self.zoom_level
    }

    /// Converts a view‑space point into world coordinates.
    #[must_use]
    pub fn view_to_world(&self, pt: Point) -> Point {
        self.transform.view_to_world(pt)
    }

    /// Converts a world‑space point into view coordinates.
    #[must_use]
    pub fn world_to_view(&self, pt: Point) -> Point {
        self.transform.world_to_view(pt)
    }

    /// Registers an observer for the given topics.
    ///
    /// Observers run synchronously, in registration order, right after the
    /// change they describe was committed.
    pub fn subscribe(
        &mut self,
        topics: Topics,
        observer: impl FnMut(&ViewportChange) + 'static,
    ) -> SubscriptionId {
        self.observers.subscribe(topics, Box::new(observer))
    }

    /// Removes an observer; returns `false` if it was already gone.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }

    /// Moves the pan by `delta` view pixels.
    pub fn pan_by(&mut self, delta: Vec2) {
        if !vec_is_finite(delta) {
            log::trace!("ignoring non-finite pan delta {delta:?}");
            return;
        }
        self.commit(ViewportTransform::new(
            self.transform.zoom,
            self.transform.pan + delta,
        ));
    }

    /// Sets the pan offset.
    pub fn set_pan(&mut self, pan: Vec2) {
        if !vec_is_finite(pan) {
            log::trace!("ignoring non-finite pan {pan:?}");
            return;
        }
        self.commit(ViewportTransform::new(self.transform.zoom, pan));
    }

    /// Sets the zoom factor.
    ///
    /// With `focal` (a view point), the world point under `focal` stays under
    /// it; only the resulting pan is re‑clamped afterwards.
    pub fn set_zoom(&mut self, zoom: f64, focal: Option<Point>) {
        if !(zoom.is_finite() && zoom > 0.0) {
            log::trace!("ignoring invalid zoom {zoom}");
            return;
        }
        let zoom = self.physics.clamp_zoom(zoom);
        let pan = match focal {
            Some(focal) if focal.x.is_finite() && focal.y.is_finite() => {
                let anchor = self.transform.view_to_world(focal);
                ViewportTransform::pan_for_anchor(zoom, anchor, focal)
            }
            _ => self.transform.pan,
        };
        self.commit(ViewportTransform::new(zoom, pan));
    }

    /// Multiplies the zoom factor by `factor`, see [`ViewportController::set_zoom`].
    pub fn zoom_by(&mut self, factor: f64, focal: Option<Point>) {
        if !(factor.is_finite() && factor > 0.0) {
            log::trace!("ignoring invalid zoom factor {factor}");
            return;
        }
        self.set_zoom(self.transform.zoom * factor, focal);
    }

    /// Pans the minimum amount needed to show `world_rect` inside the
    /// viewport inset by `margin` view pixels, and returns the applied pan
    /// change.
    ///
    /// Each axis is solved on its own. When the rectangle is larger than the
    /// inset viewport, its leading edge is shown. Zoom never changes.
    pub fn ensure_visible(&mut self, world_rect: Rect, margin: f64) -> Vec2 {
        let Some(size) = self.viewport_size else {
            return Vec2::ZERO;
        };
        if !(rect_is_finite(world_rect) && margin.is_finite()) {
            return Vec2::ZERO;
        }
        let zoom = self.transform.zoom;
        let inset = margin.max(0.0) / zoom;
        let visible = self.transform.visible_world_rect(size);
        let shift = Vec2::new(
            axis_shift(world_rect.x0, world_rect.x1, visible.x0 + inset, visible.x1 - inset),
            axis_shift(world_rect.y0, world_rect.y1, visible.y0 + inset, visible.y1 - inset),
        );
        if shift == Vec2::ZERO {
            return Vec2::ZERO;
        }
        let before = self.transform.pan;
        self.pan_by(-shift * zoom);
        self.transform.pan - before
    }

    /// Sets the motion flag owned by pan gestures.
    pub fn set_is_panning(&mut self, panning: bool) {
        if self.motion.is_panning != panning {
            self.motion.is_panning = panning;
            self.observers.notify(ViewportChange::Panning(panning));
        }
    }

    /// Sets the motion flag owned by zoom gestures.
    ///
    /// Zoom level updates are deferred while zooming and re‑evaluated once
    /// when the flag clears.
    pub fn set_is_zooming(&mut self, zooming: bool) {
        if self.motion.is_zooming != zooming {
            self.motion.is_zooming = zooming;
            self.observers.notify(ViewportChange::Zooming(zooming));
            if !zooming {
                self.refresh_zoom_level();
            }
        }
    }

    /// Starts an arbitrary [`Motion`], replacing any running animation.
    pub fn animate(&mut self, motion: impl Motion + 'static) -> AnimationHandle {
        self.cancel_animations();
        let mut animation = Animation::new(Box::new(motion));
        let handle = animation.handle().clone();

        if self.scheduler.is_none() {
            let end = animation.settle(self.transform);
            self.commit(end);
            handle.resolve(AnimationStatus::Completed);
            log::debug!("no frame scheduler, animation applied instantly");
            return handle;
        }

        log::debug!("animation started: {animation:?}");
        self.animation = Some(animation);
        self.set_is_animating(true);
        self.request_frame();
        handle
    }

    /// Animates towards `target`.
    ///
    /// The target is clamped once, up front. When only a zoom is given and
    /// the viewport size is known, the world point at the viewport center
    /// stays centered.
    pub fn animate_to(
        &mut self,
        target: AnimationTarget,
        duration: Duration,
        easing: Easing,
    ) -> AnimationHandle {
        let from = self.transform;
        let zoom = target
            .zoom
            .filter(|z| z.is_finite() && *z > 0.0)
            .map_or(from.zoom, |z| self.physics.clamp_zoom(z));
        let pan = match target.pan.filter(|p| vec_is_finite(*p)) {
            Some(pan) => pan,
            None => match self.viewport_size {
                Some(size) => {
                    let center = Point::new(size.width * 0.5, size.height * 0.5);
                    ViewportTransform::pan_for_anchor(zoom, from.view_to_world(center), center)
                }
                None => from.pan,
            },
        };
        let to = ViewportTransform::new(zoom, self.physics.clamp_pan(pan, zoom, self.viewport_size));
        self.animate(Transition::new(from, to, duration, easing))
    }

    /// Animates so `world_rect` fills the viewport minus `padding` view
    /// pixels on each side, centered.
    ///
    /// `viewport_size` overrides the controller's own size. Returns `None`
    /// (and does nothing) when no size is known, the padded area is empty,
    /// or the rectangle is degenerate.
    pub fn animate_to_fit(
        &mut self,
        world_rect: Rect,
        padding: f64,
        viewport_size: Option<Size>,
        duration: Duration,
        easing: Easing,
    ) -> Option<AnimationHandle> {
        let size = viewport_size.filter(|s| valid_size(*s)).or(self.viewport_size)?;
        let padding = if padding.is_finite() { padding.max(0.0) } else { 0.0 };
        let available = Size::new(size.width - 2.0 * padding, size.height - 2.0 * padding);
        if available.width <= 0.0 || available.height <= 0.0 || !rect_is_finite(world_rect) {
            return None;
        }
        let rect = world_rect.abs();
        let fit_x = (rect.width() > 0.0).then(|| available.width / rect.width());
        let fit_y = (rect.height() > 0.0).then(|| available.height / rect.height());
        let zoom = match (fit_x, fit_y) {
            (Some(x), Some(y)) => x.min(y),
            (Some(z), None) | (None, Some(z)) => z,
            (None, None) => return None,
        };
        let zoom = self.physics.clamp_zoom(zoom);
        let center = Point::new(size.width * 0.5, size.height * 0.5);
        let pan = ViewportTransform::pan_for_anchor(zoom, rect.center(), center);
        Some(self.animate_to(
            AnimationTarget::transform(ViewportTransform::new(zoom, pan)),
            duration,
            easing,
        ))
    }

    /// Starts a friction glide after a gesture ends.
    ///
    /// `velocity` is the release velocity in view pixels per second,
    /// `fallback` the last meaningful direction seen during the gesture, and
    /// `had_pan` whether the gesture moved at all. Returns `None` when the
    /// momentum policy rejects the glide.
    pub fn start_momentum(
        &mut self,
        velocity: Vec2,
        fallback: Vec2,
        had_pan: bool,
    ) -> Option<AnimationHandle> {
        if !self.momentum.should_apply_momentum(velocity, had_pan) {
            log::debug!("momentum rejected: velocity {velocity:?}, had_pan {had_pan}");
            return None;
        }
        let initial = self.momentum.apply_velocity_floor(velocity, fallback);
        if initial == Vec2::ZERO {
            log::debug!("momentum rejected: no usable direction");
            return None;
        }
        log::debug!("momentum started at {initial:?} px/s");
        Some(self.animate(Glide::new(initial, self.momentum.friction())))
    }

    /// Cancels the running animation, if any.
    pub fn cancel_animations(&mut self) {
        if let Some(animation) = self.animation.take() {
            animation.handle().resolve(AnimationStatus::Cancelled);
            log::debug!("animation cancelled");
            self.set_is_animating(false);
        }
    }

    /// Advances the running animation to frame time `now`.
    ///
    /// Returns `true` if another frame is needed (one has already been
    /// requested from the scheduler).
    pub fn tick(&mut self, now: Duration) -> bool {
        let Some(mut animation) = self.animation.take() else {
            return false;
        };
        let step = animation.advance(now, self.transform);
        log::trace!("tick at {now:?}: {step:?}");
        self.commit(step.transform());
        match step {
            MotionStep::Continue(_) => {
                self.animation = Some(animation);
                self.request_frame();
                true
            }
            MotionStep::Finish(_) => {
                animation.handle().resolve(AnimationStatus::Completed);
                log::debug!("animation finished at {:?}", self.transform);
                self.set_is_animating(false);
                false
            }
        }
    }

    /// World rectangle visible through a viewport of `viewport_size` (or the
    /// controller's own size).
    #[must_use]
    pub fn visible_world_bounds(&self, viewport_size: Option<Size>) -> Option<Rect> {
        let size = viewport_size.filter(|s| valid_size(*s)).or(self.viewport_size)?;
        Some(self.transform.visible_world_rect(size))
    }

    /// Keeps the items whose bounds overlap the visible world rectangle.
    ///
    /// Touching edges count as overlap. Without a known viewport size every
    /// item is kept.
    pub fn cull_to_visible<'a, T>(
        &self,
        items: &'a [T],
        bounds: impl Fn(&T) -> Rect,
        viewport_size: Option<Size>,
    ) -> Vec<&'a T> {
        let Some(visible) = self.visible_world_bounds(viewport_size) else {
            return items.iter().collect();
        };
        items
            .iter()
            .filter(|item| {
                let r = bounds(*item).abs();
                r.x0 <= visible.x1 && r.x1 >= visible.x0 && r.y0 <= visible.y1 && r.y1 >= visible.y0
            })
            .collect()
    }

    /// Snapshot of the controller state for debugging and inspection.
    #[must_use]
    pub fn debug_info(&self) -> ViewportDebugInfo {
        ViewportDebugInfo {
            zoom: self.transform.zoom,
            pan: self.transform.pan,
            viewport_size: self.viewport_size,
            visible_world_rect: self.visible_world_bounds(None),
            min_zoom: self.physics.min_zoom(),
            max_zoom: self.physics.max_zoom(),
            pan_bounds: self.physics.pan_bounds(),
            motion: self.motion,
            zoom_level: self.zoom_level,
            attached: self.attached,
        }
    }

    fn commit(&mut self, candidate: ViewportTransform) -> bool {
        let zoom = self.physics.clamp_zoom(candidate.zoom);
        let pan = self.physics.clamp_pan(candidate.pan, zoom, self.viewport_size);
        let next = ViewportTransform::new(zoom, pan);
        if !next.is_valid() || next == self.transform {
            return false;
        }
        self.transform = next;
        self.observers.notify(ViewportChange::Transform(next));
        if !self.motion.is_zooming {
            self.refresh_zoom_level();
        }
        true
    }

    fn refresh_zoom_level(&mut self) {
        let next = self.thresholds.next_level(self.zoom_level, self.transform.zoom);
        if next != self.zoom_level {
            log::debug!("zoom level {:?} -> {next:?}", self.zoom_level);
            self.zoom_level = next;
            self.observers.notify(ViewportChange::ZoomLevel(next));
        }
    }

    fn set_is_animating(&mut self, animating: bool) {
        if self.motion.is_animating != animating {
            self.motion.is_animating = animating;
            self.observers.notify(ViewportChange::Animating(animating));
        }
    }

    fn request_frame(&mut self) {
        if let Some(scheduler) = self.scheduler.as_mut() {
            scheduler.request_frame();
        }
    }
}

/// Debug snapshot of a [`ViewportController`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewportDebugInfo {
    /// Current zoom factor.
    pub zoom: f64,
    /// Current pan offset in view coordinates.
    pub pan: Vec2,
    /// Last known viewport size.
    pub viewport_size: Option<Size>,
    /// World rectangle currently visible, when the size is known.
    pub visible_world_rect: Option<Rect>,
    /// Minimum zoom factor.
    pub min_zoom: f64,
    /// Maximum zoom factor.
    pub max_zoom: f64,
    /// World‑space pan bounds.
    pub pan_bounds: Option<Rect>,
    /// Motion flags.
    pub motion: MotionState,
    /// Current zoom level.
    pub zoom_level: ZoomLevel,
    /// Whether the controller is attached.
    pub attached: bool,
}

fn valid_size(size: Size) -> bool {
    size.width.is_finite() && size.height.is_finite() && size.width > 0.0 && size.height > 0.0
}

fn vec_is_finite(v: Vec2) -> bool {
    v.x.is_finite() && v.y.is_finite()
}

fn rect_is_finite(r: Rect) -> bool {
    r.x0.is_finite() && r.y0.is_finite() && r.x1.is_finite() && r.y1.is_finite()
}

/// World distance to move a visible window `[lo, hi]` so `[min, max]` fits in it.
fn axis_shift(min: f64, max: f64, lo: f64, hi: f64) -> f64 {
    let (lo, hi) = if lo <= hi {
        (lo, hi)
    } else {
        let mid = 0.5 * (lo + hi);
        (mid, mid)
    };
    if max - min > hi - lo || min < lo {
        min - lo
    } else if max > hi {
        max - hi
    } else {
        0.0
    }
}
