// Copyright 2025 the Loupe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::Rect;

/// Which feature of two rectangles a candidate aligns.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SnapKind {
    /// An edge of the moving rectangle meets an edge of the other.
    Edge,
    /// The centers line up.
    Center,
}

/// A proposed alignment on one axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SnapCandidate {
    /// Current coordinate of the moving feature.
    pub current: f64,
    /// Coordinate it would snap to.
    pub target: f64,
    /// `|target - current|`, in world units.
    pub distance: f64,
    /// Aligned feature.
    pub kind: SnapKind,
    /// The moving rectangle before snapping.
    pub moving: Rect,
    /// The rectangle aligned against.
    pub other: Rect,
}

impl SnapCandidate {
    pub(crate) fn new(current: f64, target: f64, kind: SnapKind, moving: Rect, other: Rect) -> Self {
        Self {
            current,
            target,
            distance: (target - current).abs(),
            kind,
            moving,
            other,
        }
    }

    /// Shift that moves the feature onto its target.
    #[must_use]
    pub fn delta(&self) -> f64 {
        self.target - self.current
    }
}

bitflags::bitflags! {
    /// Edges of a rectangle that a resize gesture is moving.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct ResizeEdges: u8 {
        /// Minimum `x`.
        const LEFT = 1 << 0;
        /// Maximum `x`.
        const RIGHT = 1 << 1;
        /// Minimum `y`.
        const TOP = 1 << 2;
        /// Maximum `y`.
        const BOTTOM = 1 << 3;
        /// Bottom right corner handle.
        const BOTTOM_RIGHT = Self::BOTTOM.bits() | Self::RIGHT.bits();
        /// Top left corner handle.
        const TOP_LEFT = Self::TOP.bits() | Self::LEFT.bits();
        /// Top right corner handle.
        const TOP_RIGHT = Self::TOP.bits() | Self::RIGHT.bits();
        /// Bottom left corner handle.
        const BOTTOM_LEFT = Self::BOTTOM.bits() | Self::LEFT.bits();
    }
}

/// Keeps the smallest candidate; an equal distance never replaces the
/// incumbent, so earlier candidates win ties.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Best<T> {
    best: Option<(f64, T)>,
}

impl<T> Best<T> {
    pub(crate) fn new() -> Self {
        Self { best: None }
    }

    pub(crate) fn offer(&mut self, distance: f64, value: T) {
        match &self.best {
            Some((d, _)) if distance >= *d => {}
            _ => self.best = Some((distance, value)),
        }
    }

    pub(crate) fn into_inner(self) -> Option<T> {
        self.best.map(|(_, v)| v)
    }
}
