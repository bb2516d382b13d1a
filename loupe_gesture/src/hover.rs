// Copyright 2025 the Loupe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hover callback throttling.
//!
//! ```
//! use core::time::Duration;
//! use loupe_gesture::hover::HoverThrottle;
//!
//! let mut hover = HoverThrottle::new(Duration::from_millis(16));
//! assert!(hover.should_emit(Duration::from_millis(100)));
//! assert!(!hover.should_emit(Duration::from_millis(110)));
//! assert!(hover.should_emit(Duration::from_millis(116)));
//! ```

use core::time::Duration;

/// Limits hover callbacks to one per interval.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct HoverThrottle {
    interval: Duration,
    last_emit: Option<Duration>,
}

impl HoverThrottle {
    /// Creates a throttle; a zero interval lets every event through.
    #[must_use]
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_emit: None,
        }
    }

    /// Changes the interval, keeping the clock.
    pub fn set_interval(&mut self, interval: Duration) {
        self.interval = interval;
    }

    /// Returns `true` if a hover at `timestamp` should reach the handler, and
    /// if so restarts the interval.
    pub fn should_emit(&mut self, timestamp: Duration) -> bool {
        let due = match self.last_emit {
            None => true,
            Some(last) => self.interval.is_zero() || timestamp.saturating_sub(last) >= self.interval,
        };
        if due {
            self.last_emit = Some(timestamp);
        }
        due
    }

    /// Forgets the last emission so the next hover passes immediately.
    pub fn reset(&mut self) {
        self.last_emit = None;
    }
}
