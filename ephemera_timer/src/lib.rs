// Copyright 2026 the Ephemera Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ephemera Timer: pausable countdown scheduling over explicit timestamps.
//!
//! ## Overview
//!
//! This crate provides [`Countdowns`], a collection of independent countdown
//! timers driven entirely by caller-supplied `u64` millisecond timestamps.
//! There is no internal clock, no background thread, and no async runtime:
//! the host observes wall-clock time however it likes and pumps
//! [`Countdowns::tick`] with the current timestamp. Expired countdowns are
//! returned from `tick` — each exactly once, never before its deadline, and
//! never after [`Countdowns::cancel`].
//!
//! Because expiry is only ever delivered through `tick`, cancellation is
//! synchronous with respect to any pending expiry: once `cancel` returns,
//! that countdown cannot be observed expiring, even if its deadline had
//! already passed.
//!
//! ## Minimal example
//!
//! ```rust
//! use ephemera_timer::{AutoDismiss, Countdowns};
//!
//! let mut countdowns = Countdowns::new();
//! let id = countdowns.start(0, AutoDismiss::After(5_000));
//!
//! // Nothing is due before the deadline…
//! assert!(countdowns.tick(4_999).is_empty());
//! // …the countdown fires at the deadline…
//! assert_eq!(countdowns.tick(5_000), vec![id]);
//! // …and only once.
//! assert!(countdowns.tick(10_000).is_empty());
//! ```
//!
//! ## Pause and resume
//!
//! Pausing freezes the remaining time; resuming re-arms the deadline from
//! the frozen remainder. Wall-clock time spent paused extends the effective
//! lifetime by exactly the paused interval:
//!
//! ```rust
//! use ephemera_timer::{AutoDismiss, Countdowns};
//!
//! let mut countdowns = Countdowns::new();
//! let id = countdowns.start(0, AutoDismiss::After(5_000));
//!
//! // Pause at t=2000 with 3000ms left, resume at t=3000.
//! assert_eq!(countdowns.pause(2_000, id), Some(AutoDismiss::After(3_000)));
//! countdowns.resume(3_000, id);
//!
//! // The countdown now expires at t=6000, not t=5000.
//! assert!(countdowns.tick(5_999).is_empty());
//! assert_eq!(countdowns.tick(6_000), vec![id]);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

use alloc::vec::Vec;

use hashbrown::HashMap;
use smallvec::SmallVec;

/// Opaque handle to a single countdown inside a [`Countdowns`] collection.
///
/// Handles are unique for the lifetime of the collection and are never
/// reused, so a stale handle held after expiry or cancellation is harmless:
/// every operation on it is a no-op.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CountdownId(u64);

/// Requested lifetime of a countdown.
///
/// `Never` yields a handle that never expires but remains pausable and
/// cancelable like any other, so callers do not need a separate code path
/// for sticky entries.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum AutoDismiss {
    /// Expire after the given number of milliseconds of unpaused time.
    After(u64),
    /// Never expire; the countdown stays armed until canceled.
    Never,
}

impl AutoDismiss {
    /// Validate a raw millisecond value from a configuration or scripting
    /// boundary.
    ///
    /// Negative and NaN input is rejected with
    /// [`TimerError::InvalidDuration`] rather than clamped, so callers get
    /// deterministic feedback. Zero and positive infinity both mean "do not
    /// auto-dismiss" and map to [`AutoDismiss::Never`]. Fractional
    /// milliseconds truncate.
    pub fn try_from_millis(ms: f64) -> Result<Self, TimerError> {
        if ms.is_nan() || ms < 0.0 {
            return Err(TimerError::InvalidDuration);
        }
        if ms == 0.0 || !ms.is_finite() {
            return Ok(Self::Never);
        }
        #[allow(
            clippy::cast_possible_truncation,
            clippy::cast_sign_loss,
            reason = "Checked finite and non-negative above; sub-millisecond precision is not meaningful here."
        )]
        let whole_ms = ms as u64;
        Ok(Self::After(whole_ms))
    }
}

/// Errors reported by countdown construction.
#[derive(Copy, Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum TimerError {
    /// A duration was negative or NaN. Durations must be non-negative
    /// finite milliseconds (or an infinity meaning "never").
    #[error("countdown duration must be a non-negative number of milliseconds")]
    InvalidDuration,
}

/// Internal per-countdown state.
#[derive(Copy, Clone, Debug)]
enum Phase {
    /// Armed; expires once `now >= deadline_ms`.
    Running {
        /// Absolute expiry timestamp.
        deadline_ms: u64,
    },
    /// Frozen with `remaining_ms` left on the clock.
    Paused {
        /// Milliseconds left when the countdown was frozen.
        remaining_ms: u64,
    },
    /// Armed but with no deadline; only `cancel` retires it.
    Indefinite,
}

/// A collection of independent, pausable countdowns.
///
/// All methods take the current timestamp explicitly; the collection never
/// reads a clock. Operations on unknown handles are silent no-ops — a stale
/// handle is the expected tail end of an expiry/cancel race, not a bug.
#[derive(Debug, Default)]
pub struct Countdowns {
    entries: HashMap<CountdownId, Phase>,
    next_id: u64,
}

impl Countdowns {
    /// Create an empty collection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live (running, paused, or indefinite) countdowns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the collection holds no live countdowns.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether the handle refers to a live countdown.
    #[must_use]
    pub fn contains(&self, id: CountdownId) -> bool {
        self.entries.contains_key(&id)
    }

    /// Start a new countdown at `now_ms` and return its handle.
    ///
    /// A finite duration arms a deadline of `now_ms + duration`;
    /// [`AutoDismiss::Never`] arms an indefinite countdown that only
    /// `cancel` retires.
    pub fn start(&mut self, now_ms: u64, duration: AutoDismiss) -> CountdownId {
        let id = CountdownId(self.next_id);
        self.next_id += 1;
        let phase = match duration {
            AutoDismiss::After(ms) => Phase::Running {
                deadline_ms: now_ms.saturating_add(ms),
            },
            AutoDismiss::Never => Phase::Indefinite,
        };
        self.entries.insert(id, phase);
        log::trace!("countdown {id:?} started at {now_ms} with {duration:?}");
        id
    }

    /// Freeze a countdown and report what was left on its clock.
    ///
    /// Returns the frozen remainder (`After(ms)` for finite countdowns,
    /// `Never` for indefinite ones), or `None` if the handle is unknown.
    /// Pausing an already-paused countdown is a no-op that reports the
    /// current remainder.
    pub fn pause(&mut self, now_ms: u64, id: CountdownId) -> Option<AutoDismiss> {
        let phase = self.entries.get_mut(&id)?;
        match *phase {
            Phase::Running { deadline_ms } => {
                let remaining_ms = deadline_ms.saturating_sub(now_ms);
                *phase = Phase::Paused { remaining_ms };
                Some(AutoDismiss::After(remaining_ms))
            }
            Phase::Paused { remaining_ms } => Some(AutoDismiss::After(remaining_ms)),
            Phase::Indefinite => Some(AutoDismiss::Never),
        }
    }

    /// Re-arm a paused countdown from its frozen remainder.
    ///
    /// Returns `true` if the countdown transitioned back to running. Not
    /// paused (running, indefinite, or unknown) is a no-op returning
    /// `false`.
    pub fn resume(&mut self, now_ms: u64, id: CountdownId) -> bool {
        let Some(phase) = self.entries.get_mut(&id) else {
            return false;
        };
        match *phase {
            Phase::Paused { remaining_ms } => {
                *phase = Phase::Running {
                    deadline_ms: now_ms.saturating_add(remaining_ms),
                };
                true
            }
            Phase::Running { .. } | Phase::Indefinite => false,
        }
    }

    /// Retire a countdown permanently.
    ///
    /// After `cancel` returns, the countdown can never be yielded by
    /// [`Countdowns::tick`], even if its deadline had already passed when
    /// cancellation was requested. Returns `true` if a live countdown was
    /// removed.
    pub fn cancel(&mut self, id: CountdownId) -> bool {
        let removed = self.entries.remove(&id).is_some();
        if removed {
            log::trace!("countdown {id:?} canceled");
        }
        removed
    }

    /// Milliseconds left on a countdown's clock, or `Never` for indefinite
    /// countdowns. `None` if the handle is unknown.
    #[must_use]
    pub fn remaining(&self, now_ms: u64, id: CountdownId) -> Option<AutoDismiss> {
        match *self.entries.get(&id)? {
            Phase::Running { deadline_ms } => {
                Some(AutoDismiss::After(deadline_ms.saturating_sub(now_ms)))
            }
            Phase::Paused { remaining_ms } => Some(AutoDismiss::After(remaining_ms)),
            Phase::Indefinite => Some(AutoDismiss::Never),
        }
    }

    /// Remove and return every running countdown whose deadline is at or
    /// before `now_ms`.
    ///
    /// Simultaneous expirations are ordered by deadline, then by start
    /// order, so hosts observe a deterministic sequence. Paused and
    /// indefinite countdowns are never due.
    pub fn tick(&mut self, now_ms: u64) -> Vec<CountdownId> {
        let mut due: SmallVec<[(u64, CountdownId); 4]> = SmallVec::new();
        for (&id, phase) in &self.entries {
            if let Phase::Running { deadline_ms } = *phase
                && deadline_ms <= now_ms
            {
                due.push((deadline_ms, id));
            }
        }
        due.sort_unstable();
        due.iter().for_each(|&(_, id)| {
            self.entries.remove(&id);
        });
        due.into_iter().map(|(_, id)| id).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn expires_at_deadline_not_before() {
        let mut countdowns = Countdowns::new();
        let id = countdowns.start(1_000, AutoDismiss::After(5_000));

        assert!(countdowns.tick(5_999).is_empty());
        assert_eq!(countdowns.tick(6_000), vec![id]);
        assert!(!countdowns.contains(id));
    }

    #[test]
    fn each_countdown_fires_at_most_once() {
        let mut countdowns = Countdowns::new();
        let id = countdowns.start(0, AutoDismiss::After(100));

        assert_eq!(countdowns.tick(100), vec![id]);
        assert!(countdowns.tick(100).is_empty());
        assert!(countdowns.tick(u64::MAX).is_empty());
    }

    #[test]
    fn pause_freezes_remaining_time() {
        let mut countdowns = Countdowns::new();
        let id = countdowns.start(0, AutoDismiss::After(5_000));

        assert_eq!(countdowns.pause(2_000, id), Some(AutoDismiss::After(3_000)));

        // Wall-clock time passing while paused is not counted.
        assert!(countdowns.tick(100_000).is_empty());
        assert_eq!(
            countdowns.remaining(100_000, id),
            Some(AutoDismiss::After(3_000))
        );
    }

    #[test]
    fn paused_interval_extends_total_lifetime() {
        let mut countdowns = Countdowns::new();
        let id = countdowns.start(0, AutoDismiss::After(5_000));

        countdowns.pause(2_000, id);
        countdowns.resume(3_000, id);

        // 2000 elapsed before the pause + 3000 after the resume.
        assert!(countdowns.tick(5_999).is_empty());
        assert_eq!(countdowns.tick(6_000), vec![id]);
    }

    #[test]
    fn pause_is_idempotent() {
        let mut countdowns = Countdowns::new();
        let id = countdowns.start(0, AutoDismiss::After(5_000));

        assert_eq!(countdowns.pause(1_000, id), Some(AutoDismiss::After(4_000)));
        // Later double-pause reports the frozen remainder, unchanged.
        assert_eq!(countdowns.pause(2_500, id), Some(AutoDismiss::After(4_000)));
    }

    #[test]
    fn resume_without_pause_is_noop() {
        let mut countdowns = Countdowns::new();
        let id = countdowns.start(0, AutoDismiss::After(1_000));

        assert!(!countdowns.resume(500, id));
        assert_eq!(countdowns.tick(1_000), vec![id]);
    }

    #[test]
    fn cancel_prevents_expiry() {
        let mut countdowns = Countdowns::new();
        let id = countdowns.start(0, AutoDismiss::After(1_000));

        assert!(countdowns.cancel(id));
        assert!(countdowns.tick(5_000).is_empty());
        assert!(!countdowns.cancel(id));
    }

    #[test]
    fn cancel_wins_against_already_due_countdown() {
        let mut countdowns = Countdowns::new();
        let id = countdowns.start(0, AutoDismiss::After(100));

        // The deadline has passed but the host cancels before pumping.
        assert!(countdowns.cancel(id));
        assert!(countdowns.tick(200).is_empty());
    }

    #[test]
    fn indefinite_never_expires_but_is_cancelable() {
        let mut countdowns = Countdowns::new();
        let id = countdowns.start(0, AutoDismiss::Never);

        assert!(countdowns.tick(u64::MAX).is_empty());
        assert_eq!(countdowns.remaining(u64::MAX, id), Some(AutoDismiss::Never));

        assert_eq!(countdowns.pause(10, id), Some(AutoDismiss::Never));
        assert!(!countdowns.resume(20, id));
        assert!(countdowns.cancel(id));
        assert!(countdowns.is_empty());
    }

    #[test]
    fn pause_after_deadline_freezes_at_zero() {
        let mut countdowns = Countdowns::new();
        let id = countdowns.start(0, AutoDismiss::After(100));

        // Due but not yet pumped; pausing freezes an empty clock.
        assert_eq!(countdowns.pause(500, id), Some(AutoDismiss::After(0)));
        assert!(countdowns.tick(1_000).is_empty());

        // Resuming re-arms at the resume timestamp.
        countdowns.resume(2_000, id);
        assert_eq!(countdowns.tick(2_000), vec![id]);
    }

    #[test]
    fn simultaneous_expirations_are_deadline_ordered() {
        let mut countdowns = Countdowns::new();
        let slow_a = countdowns.start(0, AutoDismiss::After(100));
        let fast = countdowns.start(0, AutoDismiss::After(50));
        let slow_b = countdowns.start(0, AutoDismiss::After(100));

        assert_eq!(countdowns.tick(200), vec![fast, slow_a, slow_b]);
    }

    #[test]
    fn operations_on_unknown_handles_are_noops() {
        let mut countdowns = Countdowns::new();
        let id = countdowns.start(0, AutoDismiss::After(10));
        countdowns.cancel(id);

        assert_eq!(countdowns.pause(0, id), None);
        assert!(!countdowns.resume(0, id));
        assert_eq!(countdowns.remaining(0, id), None);
        assert!(!countdowns.contains(id));
    }

    #[test]
    fn handles_are_never_reused() {
        let mut countdowns = Countdowns::new();
        let first = countdowns.start(0, AutoDismiss::After(10));
        countdowns.cancel(first);
        let second = countdowns.start(0, AutoDismiss::After(10));

        assert_ne!(first, second);
    }

    #[test]
    fn try_from_millis_validates_at_the_boundary() {
        assert_eq!(
            AutoDismiss::try_from_millis(-1.0),
            Err(TimerError::InvalidDuration)
        );
        assert_eq!(
            AutoDismiss::try_from_millis(f64::NAN),
            Err(TimerError::InvalidDuration)
        );
        assert_eq!(
            AutoDismiss::try_from_millis(f64::NEG_INFINITY),
            Err(TimerError::InvalidDuration)
        );

        // Zero and infinity both mean "never auto-dismiss".
        assert_eq!(AutoDismiss::try_from_millis(0.0), Ok(AutoDismiss::Never));
        assert_eq!(
            AutoDismiss::try_from_millis(f64::INFINITY),
            Ok(AutoDismiss::Never)
        );

        assert_eq!(
            AutoDismiss::try_from_millis(1_500.7),
            Ok(AutoDismiss::After(1_500))
        );
    }
}
