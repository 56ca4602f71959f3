// Copyright 2026 the Ephemera Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The single dismissal path.
//!
//! Three independent triggers — countdown expiry, manual close, and a swipe
//! gesture — converge here. This module owns the only code that removes an
//! entry from the store, which is what makes the two-trigger race (say, a
//! manual close landing while the same toast's expiry is being pumped)
//! structurally safe: whichever trigger arrives second finds nothing to
//! remove and is absorbed as a no-op.
//!
//! The sequence for a winning trigger is fixed:
//!
//! 1. look up the entry; absent means another trigger already won — no-op;
//! 2. mark it `Dismissing`;
//! 3. cancel its countdown, so the scheduler can never independently
//!    re-trigger dismissal for this entry;
//! 4. delete the entry and mark the detached value `Removed`;
//! 5. notify subscribers.

use crate::Store;
use crate::entry::{ToastId, ToastState};

/// Which trigger won the race to dismiss an entry.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DismissReason {
    /// The countdown expired (also used for FIFO eviction, which dismisses
    /// the oldest entry as if its timer had run out).
    Timeout,
    /// An explicit close from application code or a close affordance.
    Manual,
    /// A swipe gesture crossed the configured threshold.
    Swipe,
}

impl<C> Store<C> {
    /// Dismiss a toast for the given reason.
    ///
    /// Idempotent: dismissing an id twice, or racing two triggers for the
    /// same id, removes the entry and notifies subscribers exactly once.
    /// Returns `true` if this call was the winning trigger.
    pub fn dismiss(&mut self, id: ToastId, reason: DismissReason) -> bool {
        if self.dismiss_quiet(id, reason) {
            self.notify();
            true
        } else {
            false
        }
    }

    /// The removal step without subscriber notification, for callers that
    /// batch several removals into one emit (`tick`, eviction,
    /// `dismiss_all`).
    pub(crate) fn dismiss_quiet(&mut self, id: ToastId, reason: DismissReason) -> bool {
        let Some(ix) = self.position(id) else {
            log::trace!("dismiss({id:?}, {reason:?}) absorbed: entry not live");
            return false;
        };
        {
            let toast = self.toast_mut(ix);
            if matches!(toast.state, ToastState::Dismissing | ToastState::Removed) {
                return false;
            }
            toast.state = ToastState::Dismissing;
        }

        // The countdown must be dead before the entry is gone; a canceled
        // handle can never surface from a later tick.
        if let Some(handle) = self.take_handle(id) {
            self.cancel_countdown(handle);
        }

        let mut toast = self.delete(ix);
        toast.state = ToastState::Removed;
        log::debug!("toast {id:?} removed ({reason:?})");
        true
    }
}
