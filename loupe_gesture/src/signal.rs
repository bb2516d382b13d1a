// Copyright 2025 the Loupe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! First‑claim‑wins resolution of discrete pointer signals.
//!
//! A scroll signal may be wanted by several layers (a scrollable panel on
//! the canvas, the viewport itself). Each layer registers a claim while the
//! signal is dispatched; the first registration wins and later ones are
//! refused.
//!
//! ```
//! use loupe_gesture::signal::SignalResolver;
//!
//! let mut resolver = SignalResolver::new();
//! assert!(resolver.register("panel"));
//! assert!(!resolver.register("viewport"));
//! assert_eq!(resolver.winner(), Some(&"panel"));
//! ```

/// Collects claims on one signal; the first claim wins.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignalResolver<C> {
    winner: Option<C>,
}

impl<C> Default for SignalResolver<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> SignalResolver<C> {
    /// Creates a resolver with no claims.
    #[must_use]
    pub fn new() -> Self {
        Self { winner: None }
    }

    /// Registers a claim; returns `true` if it won.
    pub fn register(&mut self, claimant: C) -> bool {
        if self.winner.is_some() {
            return false;
        }
        self.winner = Some(claimant);
        true
    }

    /// The winning claim, if any.
    #[must_use]
    pub fn winner(&self) -> Option<&C> {
        self.winner.as_ref()
    }

    /// Consumes the resolver and returns the winning claim.
    #[must_use]
    pub fn resolve(self) -> Option<C> {
        self.winner
    }
}

/// Who consumes a scroll signal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ScrollClaim {
    /// The gesture handler (content on the canvas).
    Handler,
    /// The viewport pans or zooms.
    Viewport,
}
