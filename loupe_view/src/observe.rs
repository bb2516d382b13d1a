// Copyright 2025 the Loupe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Synchronous change notification for the viewport controller.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;

use crate::transform::ViewportTransform;
use crate::zoom_level::ZoomLevel;

bitflags::bitflags! {
    /// Topics an observer can subscribe to.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct Topics: u8 {
        /// Committed transform changes.
        const TRANSFORM = 1 << 0;
        /// `is_panning` flips.
        const PANNING = 1 << 1;
        /// `is_zooming` flips.
        const ZOOMING = 1 << 2;
        /// `is_animating` flips.
        const ANIMATING = 1 << 3;
        /// Zoom level changes.
        const ZOOM_LEVEL = 1 << 4;
        /// All motion flags.
        const MOTION = Self::PANNING.bits() | Self::ZOOMING.bits() | Self::ANIMATING.bits();
    }
}

/// A committed change, delivered to observers in the order it happened.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ViewportChange {
    /// The transform now has this value.
    Transform(ViewportTransform),
    /// `is_panning` changed to this value.
    Panning(bool),
    /// `is_zooming` changed to this value.
    Zooming(bool),
    /// `is_animating` changed to this value.
    Animating(bool),
    /// The zoom level changed to this value.
    ZoomLevel(ZoomLevel),
}

impl ViewportChange {
    /// The topic this change belongs to.
    #[must_use]
    pub fn topic(&self) -> Topics {
        match self {
            Self::Transform(_) => Topics::TRANSFORM,
            Self::Panning(_) => Topics::PANNING,
            Self::Zooming(_) => Topics::ZOOMING,
            Self::Animating(_) => Topics::ANIMATING,
            Self::ZoomLevel(_) => Topics::ZOOM_LEVEL,
        }
    }
}

/// Identifies a subscription for [`crate::ViewportController::unsubscribe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Observer = Box<dyn FnMut(&ViewportChange)>;

pub(crate) struct Observers {
    next_id: u64,
    entries: Vec<(SubscriptionId, Topics, Observer)>,
}

impl fmt::Debug for Observers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observers")
            .field("next_id", &self.next_id)
            .field("len", &self.entries.len())
            .finish()
    }
}

impl Observers {
    pub(crate) fn new() -> Self {
        Self {
            next_id: 0,
            entries: Vec::new(),
        }
    }

    pub(crate) fn subscribe(&mut self, topics: Topics, observer: Observer) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, topics, observer));
        id
    }

    pub(crate) fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry, _, _)| *entry != id);
        self.entries.len() != before
    }

    pub(crate) fn notify(&mut self, change: ViewportChange) {
        let topic = change.topic();
        for (_, topics, observer) in &mut self.entries {
            if topics.intersects(topic) {
                observer(&change);
            }
        }
    }
}
