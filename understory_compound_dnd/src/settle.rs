// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Deferred settle expiry.
//!
//! Right after the dragged nodes enter a container, further drag frames are
//! ignored for a short window so that a second container is not created before
//! the graph has settled. The controller asks a [`Scheduler`] to call back
//! later; the host then passes the token to
//! [`CompoundDnd::settle_expired`](crate::gesture::CompoundDnd::settle_expired).
//!
//! ## Minimal example
//!
//! ```
//! use core::time::Duration;
//! use understory_compound_dnd::settle::ManualScheduler;
//!
//! // Tokens scheduled by the controller come back from `advance` once due.
//! let mut timers = ManualScheduler::new();
//! assert!(timers.advance(Duration::from_millis(50)).is_empty());
//! assert_eq!(timers.pending(), 0);
//! ```

use alloc::vec::Vec;
use core::time::Duration;

use crate::types::SettleToken;

/// Something that can run a deferred callback.
///
/// The host must eventually deliver `token` to
/// [`CompoundDnd::settle_expired`](crate::gesture::CompoundDnd::settle_expired)
/// no earlier than `delay` from now. Delivering late is fine; dropping it
/// leaves the gesture settling until it ends.
pub trait Scheduler {
    /// Schedule `token` to expire after `delay`.
    fn schedule(&mut self, delay: Duration, token: SettleToken);
}

/// A scheduler driven by explicit time steps.
///
/// Suited to tests and to hosts that already tick a frame clock.
#[derive(Clone, Debug, Default)]
pub struct ManualScheduler {
    now: Duration,
    pending: Vec<(Duration, SettleToken)>,
}

impl ManualScheduler {
    /// Create a scheduler at time zero with nothing pending.
    pub fn new() -> Self {
        Self::default()
    }

    /// Time elapsed since creation.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Number of tokens not yet due.
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Move the clock forward by `dt` and return the tokens that came due, earliest first.
    pub fn advance(&mut self, dt: Duration) -> Vec<SettleToken> {
        self.now = self.now.saturating_add(dt);
        let now = self.now;
        let mut due: Vec<(Duration, SettleToken)> = Vec::new();
        self.pending.retain(|&(at, token)| {
            if at <= now {
                due.push((at, token));
                false
            } else {
                true
            }
        });
        due.sort_by_key(|&(at, _)| at);
        due.into_iter().map(|(_, token)| token).collect()
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&mut self, delay: Duration, token: SettleToken) {
        self.pending.push((self.now.saturating_add(delay), token));
    }
}
