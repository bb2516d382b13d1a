// Copyright 2025 the Loupe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Gesture arbitration: one interpretation per input stream.

use core::mem;

use kurbo::{Point, Vec2};
use loupe_view::ViewportController;

use crate::config::GestureConfig;
use crate::drag::{DragProgress, DragSession};
use crate::event::{
    DeviceKind, HoverEvent, Key, KeyEvent, KeyState, Modifiers, PanZoomEnd, PanZoomStart,
    PanZoomUpdate, PointerButton, PointerEvent, PointerId, ScrollEvent, ScrollSource, TapEvent,
    TapKind,
};
use crate::hover::HoverThrottle;
use crate::rules::{drag_threshold_for, scroll_sign, scroll_zoom_factor};
use crate::signal::{ScrollClaim, SignalResolver};
use crate::trackpad::TrackpadSession;

/// A domain drag crossed its threshold.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragStart {
    /// Pointer driving the drag.
    pub pointer_id: PointerId,
    /// Device kind of the pointer.
    pub kind: DeviceKind,
    /// View position of the original pointer down.
    pub view_position: Point,
    /// World position of the original pointer down.
    pub world_position: Point,
}

/// A domain drag moved.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragUpdate {
    /// Pointer driving the drag.
    pub pointer_id: PointerId,
    /// Current view position.
    pub view_position: Point,
    /// Current world position.
    pub world_position: Point,
    /// Movement in view pixels since the previous update.
    pub view_delta: Vec2,
    /// The same movement in world units (`view_delta / zoom`).
    pub world_delta: Vec2,
}

/// A domain drag finished.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragEnd {
    /// Pointer that drove the drag.
    pub pointer_id: PointerId,
    /// Release velocity in view pixels per second; zero when cancelled.
    pub velocity: Vec2,
    /// Whether the stream was cancelled rather than released.
    pub cancelled: bool,
}

/// Receiver of the gestures that do not move the viewport.
///
/// Every method has a no‑op default, so handlers implement only what they
/// need. Positions are already converted into world coordinates where the
/// name says so.
pub trait GestureHandler {
    /// Whether a pointer down may start a domain drag.
    fn handles_drag(&self) -> bool {
        false
    }

    /// A drag crossed its threshold.
    fn on_drag_start(&mut self, event: &DragStart) {
        let _ = event;
    }

    /// A drag moved.
    fn on_drag_update(&mut self, event: &DragUpdate) {
        let _ = event;
    }

    /// A drag ended or was cancelled.
    fn on_drag_end(&mut self, event: &DragEnd) {
        let _ = event;
    }

    /// Single tap at a world position.
    fn on_tap(&mut self, world: Point) {
        let _ = world;
    }

    /// Double tap at a world position.
    fn on_double_tap(&mut self, world: Point) {
        let _ = world;
    }

    /// Long press at a world position.
    fn on_long_press(&mut self, world: Point) {
        let _ = world;
    }

    /// Throttled hover movement.
    fn on_hover(&mut self, view: Point, world: Point) {
        let _ = (view, world);
    }

    /// The pointer left the viewport.
    fn on_hover_exit(&mut self) {}

    /// Veto for scroll signals at a view position; `false` leaves the event
    /// to someone else entirely.
    fn should_handle_scroll(&self, position: Point) -> bool {
        let _ = position;
        true
    }

    /// Chance to claim a scroll before the viewport does.
    fn claim_scroll(&mut self, event: &ScrollEvent, resolver: &mut SignalResolver<ScrollClaim>) {
        let _ = (event, resolver);
    }
}

impl GestureHandler for () {}

/// How a scroll signal was consumed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ScrollOutcome {
    /// Nobody used it.
    Ignored,
    /// The handler claimed it.
    Claimed,
    /// The viewport panned.
    Panned,
    /// The viewport zoomed.
    Zoomed,
}

/// Coarse state of the pointer stream, for inspection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StreamState {
    /// No pointer owns the stream.
    Idle,
    /// A pointer pans the viewport.
    Panning,
    /// A pointer is down with a drag session below its threshold.
    DragPending,
    /// A pointer drives a domain drag.
    Dragging,
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum PointerSession {
    Idle,
    Panning { pointer_id: PointerId, last: Point },
    Drag(DragSession),
}

/// Routes raw input into viewport pan/zoom or handler callbacks.
///
/// The pointer stream is in exactly one state at a time, so a drag can never
/// run while the same stream pans. The trackpad pan/zoom stream is tracked
/// independently. The arbiter borrows the [`ViewportController`] per call.
#[derive(Debug)]
pub struct GestureArbiter<H> {
    config: GestureConfig,
    handler: H,
    session: PointerSession,
    trackpad: Option<TrackpadSession>,
    space_held: bool,
    suppress_tap: bool,
    hover: HoverThrottle,
}

impl<H: GestureHandler> GestureArbiter<H> {
    /// Creates an arbiter around a handler.
    pub fn new(config: GestureConfig, handler: H) -> Self {
        Self {
            config,
            handler,
            session: PointerSession::Idle,
            trackpad: None,
            space_held: false,
            suppress_tap: false,
            hover: HoverThrottle::new(config.hover_throttle()),
        }
    }

    /// Active configuration.
    pub fn config(&self) -> &GestureConfig {
        &self.config
    }

    /// Replaces the configuration; running sessions continue.
    pub fn set_config(&mut self, config: GestureConfig) {
        log::debug!("gesture config replaced: {config:?}");
        self.hover.set_interval(config.hover_throttle());
        self.config = config;
    }

    /// The handler.
    pub fn handler(&self) -> &H {
        &self.handler
    }

    /// The handler, mutably.
    pub fn handler_mut(&mut self) -> &mut H {
        &mut self.handler
    }

    /// Consumes the arbiter and returns the handler.
    pub fn into_handler(self) -> H {
        self.handler
    }

    /// Whether space is currently held (outside text inputs).
    pub fn is_space_held(&self) -> bool {
        self.space_held
    }

    /// Coarse state of the pointer stream.
    pub fn stream_state(&self) -> StreamState {
        match &self.session {
            PointerSession::Idle => StreamState::Idle,
            PointerSession::Panning { .. } => StreamState::Panning,
            PointerSession::Drag(drag) if drag.is_dragging() => StreamState::Dragging,
            PointerSession::Drag(_) => StreamState::DragPending,
        }
    }

    /// Returns `true` while a pan/zoom stream is open.
    pub fn has_trackpad_session(&self) -> bool {
        self.trackpad.is_some()
    }

    /// Pointer down: opens a pan or drag session.
    ///
    /// Ignored while another pointer owns the stream. Otherwise any running
    /// animation is cancelled first.
    pub fn pointer_down(&mut self, controller: &mut ViewportController, event: &PointerEvent) {
        if !matches!(self.session, PointerSession::Idle) {
            log::trace!("pointer {:?} ignored, stream is owned", event.pointer_id);
            return;
        }
        if !point_is_finite(event.position) {
            return;
        }
        controller.cancel_animations();

        let middle = event.button == Some(PointerButton::Middle);
        self.suppress_tap = middle;
        let wants_pan = (self.space_held && self.config.enable_spacebar_pan())
            || (middle && self.config.enable_middle_mouse_pan());
        if wants_pan && self.config.enable_pan() {
            log::debug!("pointer {:?} pans the viewport", event.pointer_id);
            self.session = PointerSession::Panning {
                pointer_id: event.pointer_id,
                last: event.position,
            };
            controller.set_is_panning(true);
            return;
        }

        // The middle button is reserved for viewport panning and never drags
        // content, even when that pan is disabled.
        if middle {
            log::trace!("middle press on pointer {:?} ignored", event.pointer_id);
            return;
        }
        if self.handler.handles_drag() {
            let threshold = drag_threshold_for(event.kind, &self.config);
            self.session = PointerSession::Drag(DragSession::new(
                event.pointer_id,
                event.kind,
                event.position,
                event.timestamp,
                threshold,
            ));
        }
    }

    /// Pointer move: pans, or advances the drag session.
    pub fn pointer_move(&mut self, controller: &mut ViewportController, event: &PointerEvent) {
        if !point_is_finite(event.position) {
            log::trace!("ignoring non-finite pointer position");
            return;
        }
        match &mut self.session {
            PointerSession::Idle => {}
            PointerSession::Panning { pointer_id, last } => {
                if *pointer_id != event.pointer_id {
                    return;
                }
                let delta = event.position - *last;
                *last = event.position;
                controller.pan_by(delta);
            }
            PointerSession::Drag(drag) => {
                if drag.pointer_id() != event.pointer_id {
                    return;
                }
                match drag.update(event.position, event.timestamp) {
                    DragProgress::Pending => {}
                    DragProgress::Started { offset } => {
                        let start = drag.start();
                        log::debug!("pointer {:?} started a drag", event.pointer_id);
                        self.handler.on_drag_start(&DragStart {
                            pointer_id: event.pointer_id,
                            kind: drag.kind(),
                            view_position: start,
                            world_position: controller.view_to_world(start),
                        });
                        let update = drag_update(controller, event, offset);
                        self.handler.on_drag_update(&update);
                    }
                    DragProgress::Moved { delta } => {
                        let update = drag_update(controller, event, delta);
                        self.handler.on_drag_update(&update);
                    }
                }
            }
        }
    }

    /// Pointer up: ends the pan or drag owned by this pointer.
    pub fn pointer_up(&mut self, controller: &mut ViewportController, event: &PointerEvent) {
        self.finish_pointer(controller, event, false);
    }

    /// Pointer cancel: like [`GestureArbiter::pointer_up`], but a drag ends
    /// with `cancelled` set and no velocity.
    pub fn pointer_cancel(&mut self, controller: &mut ViewportController, event: &PointerEvent) {
        self.finish_pointer(controller, event, true);
    }

    fn finish_pointer(
        &mut self,
        controller: &mut ViewportController,
        event: &PointerEvent,
        cancelled: bool,
    ) {
        let owner = match &self.session {
            PointerSession::Idle => return,
            PointerSession::Panning { pointer_id, .. } => *pointer_id,
            PointerSession::Drag(drag) => drag.pointer_id(),
        };
        if owner != event.pointer_id {
            return;
        }
        match mem::replace(&mut self.session, PointerSession::Idle) {
            PointerSession::Idle => {}
            PointerSession::Panning { .. } => {
                log::debug!("pointer {owner:?} pan ended");
                controller.set_is_panning(false);
            }
            PointerSession::Drag(drag) => {
                if drag.is_dragging() {
                    let velocity = if cancelled {
                        Vec2::ZERO
                    } else {
                        drag.release_velocity(event.timestamp)
                    };
                    log::debug!("pointer {owner:?} drag ended, cancelled: {cancelled}");
                    self.handler.on_drag_end(&DragEnd {
                        pointer_id: owner,
                        velocity,
                        cancelled,
                    });
                }
            }
        }
    }

    /// Start of a trackpad pan/zoom stream.
    pub fn pan_zoom_start(&mut self, controller: &mut ViewportController, event: &PanZoomStart) {
        controller.cancel_animations();
        self.trackpad = Some(TrackpadSession::new(event.timestamp));
    }

    /// Update of a trackpad pan/zoom stream.
    ///
    /// Pan and zoom apply independently, each only when enabled.
    pub fn pan_zoom_update(&mut self, controller: &mut ViewportController, event: &PanZoomUpdate) {
        let session = self.trackpad.get_or_insert_with(|| {
            controller.cancel_animations();
            TrackpadSession::new(event.timestamp)
        });
        let momentum = *controller.momentum_config();

        if self.config.enable_pan() && vec_is_finite(event.pan_delta) {
            let sign = scroll_sign(ScrollSource::Trackpad, self.config.natural_scrolling());
            let delta = event.pan_delta * (sign * momentum.pan_sensitivity());
            if delta != Vec2::ZERO {
                session.record_pan(delta, event.timestamp);
                controller.set_is_panning(true);
                controller.pan_by(delta);
            }
        }
        if let Some(ratio) = session.record_scale(event.scale, event.timestamp) {
            if self.config.enable_zoom() && point_is_finite(event.position) {
                controller.set_is_zooming(true);
                controller.zoom_by(ratio, Some(event.position));
            }
        }
    }

    /// End of a trackpad pan/zoom stream: clears motion flags and hands the
    /// release velocity to the momentum policy.
    pub fn pan_zoom_end(&mut self, controller: &mut ViewportController, event: &PanZoomEnd) {
        let Some(session) = self.trackpad.take() else {
            return;
        };
        controller.set_is_panning(false);
        controller.set_is_zooming(false);
        if self.config.enable_pan() && controller.momentum_config().enable_momentum() {
            log::debug!(
                "trackpad stream ended at {:?} after {:.1} px",
                event.timestamp,
                session.distance()
            );
            controller.start_momentum(
                session.velocity(),
                session.fallback_velocity(),
                session.had_pan(),
            );
        }
    }

    /// Discrete scroll signal.
    ///
    /// Ctrl/Cmd + scroll zooms around the pointer. Otherwise the scroll pans
    /// when scroll panning is enabled; Shift turns a vertical‑only scroll into
    /// a horizontal one.
    pub fn scroll(
        &mut self,
        controller: &mut ViewportController,
        event: &ScrollEvent,
    ) -> ScrollOutcome {
        if !self.handler.should_handle_scroll(event.position) {
            return ScrollOutcome::Ignored;
        }
        let mut resolver = SignalResolver::new();
        self.handler.claim_scroll(event, &mut resolver);
        resolver.register(ScrollClaim::Viewport);
        if resolver.resolve() != Some(ScrollClaim::Viewport) {
            return ScrollOutcome::Claimed;
        }
        if !vec_is_finite(event.delta) || !point_is_finite(event.position) {
            log::trace!("ignoring non-finite scroll {event:?}");
            return ScrollOutcome::Ignored;
        }

        if event.modifiers.intersects(Modifiers::CTRL | Modifiers::META) {
            if !self.config.enable_zoom() {
                return ScrollOutcome::Ignored;
            }
            let Some(factor) = scroll_zoom_factor(event.delta.y) else {
                return ScrollOutcome::Ignored;
            };
            controller.cancel_animations();
            controller.zoom_by(factor, Some(event.position));
            return ScrollOutcome::Zoomed;
        }

        if !(self.config.enable_pan() && self.config.enable_scroll_pan()) {
            return ScrollOutcome::Ignored;
        }
        let mut delta = event.delta;
        if event.modifiers.contains(Modifiers::SHIFT) && delta.x == 0.0 {
            delta = Vec2::new(delta.y, 0.0);
        }
        let sign = scroll_sign(event.source, self.config.natural_scrolling());
        let sensitivity = controller.momentum_config().scroll_sensitivity();
        controller.cancel_animations();
        controller.pan_by(delta * (sign * sensitivity));
        ScrollOutcome::Panned
    }

    /// Tap, double tap or long press.
    ///
    /// A tap right after a middle‑button press is dropped.
    pub fn tap(&mut self, controller: &ViewportController, event: &TapEvent) {
        if mem::take(&mut self.suppress_tap) {
            log::trace!("tap suppressed after middle button press");
            return;
        }
        if !point_is_finite(event.position) {
            return;
        }
        let world = controller.view_to_world(event.position);
        match event.kind {
            TapKind::Single => self.handler.on_tap(world),
            TapKind::Double => self.handler.on_double_tap(world),
            TapKind::LongPress => self.handler.on_long_press(world),
        }
    }

    /// Hover movement (throttled) or exit (immediate).
    pub fn hover(&mut self, controller: &ViewportController, event: &HoverEvent) {
        match *event {
            HoverEvent::Move {
                position,
                timestamp,
            } => {
                if point_is_finite(position) && self.hover.should_emit(timestamp) {
                    self.handler
                        .on_hover(position, controller.view_to_world(position));
                }
            }
            HoverEvent::Exit => {
                self.hover.reset();
                self.handler.on_hover_exit();
            }
        }
    }

    /// Keyboard input: space toggles pan mode unless a text input has focus.
    pub fn key(&mut self, event: &KeyEvent) {
        if event.text_input_focused || event.key != Key::Space {
            return;
        }
        let held = event.state == KeyState::Down;
        if held != self.space_held {
            log::debug!("space pan mode {}", if held { "on" } else { "off" });
            self.space_held = held;
        }
    }

    /// Drops every session and clears the controller's gesture flags, as if
    /// all gestures ended. A running drag ends as cancelled.
    pub fn reset(&mut self, controller: &mut ViewportController) {
        if let PointerSession::Drag(drag) = mem::replace(&mut self.session, PointerSession::Idle) {
            if drag.is_dragging() {
                self.handler.on_drag_end(&DragEnd {
                    pointer_id: drag.pointer_id(),
                    velocity: Vec2::ZERO,
                    cancelled: true,
                });
            }
        }
        self.trackpad = None;
        self.space_held = false;
        self.suppress_tap = false;
        self.hover.reset();
        controller.set_is_panning(false);
        controller.set_is_zooming(false);
        log::debug!("gesture state reset");
    }
}

fn drag_update(controller: &ViewportController, event: &PointerEvent, delta: Vec2) -> DragUpdate {
    let zoom = controller.zoom();
    DragUpdate {
        pointer_id: event.pointer_id,
        view_position: event.position,
        world_position: controller.view_to_world(event.position),
        view_delta: delta,
        world_delta: delta / zoom,
    }
}

fn point_is_finite(p: Point) -> bool {
    p.x.is_finite() && p.y.is_finite()
}

fn vec_is_finite(v: Vec2) -> bool {
    v.x.is_finite() && v.y.is_finite()
}
