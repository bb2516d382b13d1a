// Copyright 2025 the Loupe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Input vocabulary consumed by the [`crate::GestureArbiter`].
//!
//! Positions are view‑space points (pixels relative to the viewport's top
//! left corner). Timestamps are monotonic durations from an arbitrary epoch
//! chosen by the host; only differences matter.

use core::time::Duration;

use kurbo::{Point, Vec2};

/// Kind of device that produced a pointer event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum DeviceKind {
    /// A mouse.
    #[default]
    Mouse,
    /// A finger on a touch screen.
    Touch,
    /// A pen or stylus.
    Stylus,
    /// A trackpad acting as a pointer.
    Trackpad,
}

/// Mouse button identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PointerButton {
    /// Left mouse button, or a touch/stylus contact.
    Primary,
    /// Middle mouse button (scroll wheel click).
    Middle,
    /// Right mouse button.
    Secondary,
}

bitflags::bitflags! {
    /// Modifier keys held during an event.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// Shift.
        const SHIFT = 1 << 0;
        /// Control.
        const CTRL = 1 << 1;
        /// Alt / Option.
        const ALT = 1 << 2;
        /// Meta / Command.
        const META = 1 << 3;
    }
}

/// Identifies one pointer (one mouse, one finger) for the duration of a stream.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct PointerId(pub u64);

/// Pointer down, move, up or cancel.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerEvent {
    /// Pointer that produced the event.
    pub pointer_id: PointerId,
    /// Device kind.
    pub kind: DeviceKind,
    /// Button involved in a down/up event, if any.
    pub button: Option<PointerButton>,
    /// View‑space position.
    pub position: Point,
    /// Event time.
    pub timestamp: Duration,
    /// Modifier keys held.
    pub modifiers: Modifiers,
}

impl PointerEvent {
    /// Creates a primary mouse event at `position`.
    #[must_use]
    pub fn mouse(position: Point, timestamp: Duration) -> Self {
        Self {
            pointer_id: PointerId::default(),
            kind: DeviceKind::Mouse,
            button: Some(PointerButton::Primary),
            position,
            timestamp,
            modifiers: Modifiers::empty(),
        }
    }

    /// Returns a copy with another device kind.
    #[must_use]
    pub fn with_kind(mut self, kind: DeviceKind) -> Self {
        self.kind = kind;
        self
    }

    /// Returns a copy with another button.
    #[must_use]
    pub fn with_button(mut self, button: Option<PointerButton>) -> Self {
        self.button = button;
        self
    }

    /// Returns a copy with another pointer id.
    #[must_use]
    pub fn with_pointer_id(mut self, pointer_id: PointerId) -> Self {
        self.pointer_id = pointer_id;
        self
    }
}

/// Start of a continuous pan/zoom stream (trackpad two‑finger gesture).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PanZoomStart {
    /// View‑space position of the gesture.
    pub position: Point,
    /// Event time.
    pub timestamp: Duration,
}

/// One update of a continuous pan/zoom stream.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PanZoomUpdate {
    /// View‑space focal position of the gesture.
    pub position: Point,
    /// Pan movement since the previous update, in view pixels, as reported
    /// by the device (finger direction).
    pub pan_delta: Vec2,
    /// Scale relative to the start of the stream (`1.0` means unchanged).
    pub scale: f64,
    /// Event time.
    pub timestamp: Duration,
}

/// End of a continuous pan/zoom stream.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PanZoomEnd {
    /// Event time.
    pub timestamp: Duration,
}

/// Device that produced a discrete scroll.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ScrollSource {
    /// A mouse wheel.
    Mouse,
    /// A trackpad reporting discrete scroll deltas.
    Trackpad,
}

/// A discrete scroll signal.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollEvent {
    /// View‑space pointer position.
    pub position: Point,
    /// Scroll delta in view pixels, as reported by the device.
    pub delta: Vec2,
    /// Device that produced the signal.
    pub source: ScrollSource,
    /// Modifier keys held.
    pub modifiers: Modifiers,
    /// Event time.
    pub timestamp: Duration,
}

/// Which tap gesture was recognized.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TapKind {
    /// Single tap or click.
    Single,
    /// Double tap or double click.
    Double,
    /// Press held in place.
    LongPress,
}

/// A recognized tap gesture.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TapEvent {
    /// Tap kind.
    pub kind: TapKind,
    /// View‑space position.
    pub position: Point,
    /// Event time.
    pub timestamp: Duration,
}

/// Hover movement or exit.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum HoverEvent {
    /// The pointer moved over the viewport without a pressed button.
    Move {
        /// View‑space position.
        position: Point,
        /// Event time.
        timestamp: Duration,
    },
    /// The pointer left the viewport.
    Exit,
}

/// Keys the gesture layer cares about.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    /// The space bar.
    Space,
    /// Any other key.
    Other,
}

/// Key press or release.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyState {
    /// The key went down.
    Down,
    /// The key went up.
    Up,
}

/// A keyboard event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct KeyEvent {
    /// Key involved.
    pub key: Key,
    /// Press or release.
    pub state: KeyState,
    /// Whether a text input currently holds keyboard focus.
    pub text_input_focused: bool,
}
