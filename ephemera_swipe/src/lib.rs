// Copyright 2026 the Ephemera Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ephemera Swipe: a deterministic swipe-to-dismiss gesture state machine.
//!
//! ## Overview
//!
//! This crate turns raw pointer sequences — down → move (possibly many) →
//! up — into discrete dismissal intents, independent of any pointer-event
//! API. A [`SwipeTracker`] is configured with the one legal "page-exit"
//! [`SwipeDirection`] and a distance threshold in pixels; on release it
//! reports whether the drag crossed the threshold along that direction.
//!
//! Displacement is measured as the signed component of the drag vector
//! along the configured direction. Movement opposite to the direction, or
//! purely orthogonal to it, never dismisses — only forward travel counts.
//!
//! The tracker is generic over the entry key `K` (for example a toast id),
//! and tracks one drag per entry so simultaneous gestures on different
//! entries stay independent. It holds no timers and reads no clocks; the
//! host decides what a drag means for the entry's lifetime (typically:
//! pause the countdown while the drag is active, resume it on snapback).
//!
//! ## Minimal example
//!
//! ```rust
//! use ephemera_swipe::{SwipeOutcome, SwipeTracker};
//! use kurbo::Point;
//!
//! // Rightward swipes past 50px dismiss.
//! let mut tracker: SwipeTracker<u32> = SwipeTracker::new();
//!
//! tracker.on_down(7, Point::new(100.0, 20.0));
//! tracker.on_move(7, Point::new(130.0, 22.0));
//! // Released 60px to the right of where the drag began.
//! let outcome = tracker.on_up(7, Point::new(160.0, 25.0));
//! assert_eq!(outcome, SwipeOutcome::Dismiss);
//! ```
//!
//! A release short of the threshold snaps back instead:
//!
//! ```rust
//! use ephemera_swipe::{SwipeOutcome, SwipeTracker};
//! use kurbo::Point;
//!
//! let mut tracker: SwipeTracker<u32> = SwipeTracker::new();
//! tracker.on_down(7, Point::new(100.0, 20.0));
//! let outcome = tracker.on_up(7, Point::new(130.0, 20.0));
//! assert_eq!(outcome, SwipeOutcome::Snapback);
//! ```
//!
//! ## Features
//!
//! - `std` (default): enables `std` support for dependencies such as
//!   `kurbo`.
//! - `libm`: enables `no_std` + `alloc` builds that rely on `libm` for
//!   floating-point math.
//! - `serde`: serde derives on [`SwipeDirection`].
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

use alloc::collections::BTreeMap;

use kurbo::{Point, Vec2};

/// The direction in which a swipe is allowed to leave the page.
///
/// Only travel along this direction counts toward the dismissal threshold;
/// the opposite and orthogonal components are ignored.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SwipeDirection {
    /// Exit upward (negative y).
    Up,
    /// Exit downward (positive y).
    Down,
    /// Exit leftward (negative x).
    Left,
    /// Exit rightward (positive x).
    #[default]
    Right,
}

impl SwipeDirection {
    /// Signed length of `delta` along this direction; positive is forward
    /// travel, negative is travel away from the exit.
    #[must_use]
    pub fn along(self, delta: Vec2) -> f64 {
        match self {
            Self::Up => -delta.y,
            Self::Down => delta.y,
            Self::Left => -delta.x,
            Self::Right => delta.x,
        }
    }
}

/// What a pointer release means for the dragged entry.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SwipeOutcome {
    /// The drag crossed the threshold along the configured direction; the
    /// entry should be dismissed immediately, regardless of remaining time.
    Dismiss,
    /// The drag fell short; the entry snaps back and its countdown should
    /// resume.
    Snapback,
    /// No drag was active for this entry (for example, the entry was
    /// removed mid-gesture and the tracker already forgot it).
    Ignored,
}

/// An in-flight drag on a single entry.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Drag {
    /// Pointer position at `on_down`.
    pub origin: Point,
    /// Most recent pointer position.
    pub current: Point,
}

impl Drag {
    /// The drag vector from origin to the current position.
    #[must_use]
    pub fn delta(&self) -> Vec2 {
        self.current - self.origin
    }
}

/// Per-entry swipe gesture tracker.
///
/// One drag is tracked per entry key; a second `on_down` for the same key
/// restarts the drag from the new origin. All decisions are made from
/// positions the host feeds in, so the tracker is exactly as testable as a
/// pure function.
#[derive(Clone, Debug)]
pub struct SwipeTracker<K> {
    direction: SwipeDirection,
    threshold_px: f64,
    drags: BTreeMap<K, Drag>,
}

impl<K: Copy + Ord> SwipeTracker<K> {
    /// A tracker with the default configuration: rightward exit, 50px
    /// threshold.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(SwipeDirection::default(), 50.0)
    }

    /// A tracker with an explicit exit direction and threshold.
    #[must_use]
    pub fn with_config(direction: SwipeDirection, threshold_px: f64) -> Self {
        Self {
            direction,
            threshold_px,
            drags: BTreeMap::new(),
        }
    }

    /// The configured exit direction.
    #[must_use]
    pub fn direction(&self) -> SwipeDirection {
        self.direction
    }

    /// The configured dismissal threshold in pixels.
    #[must_use]
    pub fn threshold_px(&self) -> f64 {
        self.threshold_px
    }

    /// Begin (or restart) a drag on `id` at `position`.
    ///
    /// Returns `true` if no drag was active for this entry — the moment the
    /// host should treat as "interaction begin" and pause the countdown.
    pub fn on_down(&mut self, id: K, position: Point) -> bool {
        self.drags
            .insert(
                id,
                Drag {
                    origin: position,
                    current: position,
                },
            )
            .is_none()
    }

    /// Advance an active drag to `position`.
    ///
    /// Returns the signed displacement along the configured direction, so
    /// renderers can translate the entry with the pointer, or `None` if no
    /// drag is active for this entry.
    pub fn on_move(&mut self, id: K, position: Point) -> Option<f64> {
        let drag = self.drags.get_mut(&id)?;
        drag.current = position;
        Some(self.direction.along(drag.delta()))
    }

    /// End a drag at `position` and decide its outcome.
    ///
    /// [`SwipeOutcome::Dismiss`] when the displacement along the configured
    /// direction is at least the threshold; [`SwipeOutcome::Snapback`]
    /// otherwise; [`SwipeOutcome::Ignored`] when no drag was active.
    pub fn on_up(&mut self, id: K, position: Point) -> SwipeOutcome {
        let Some(drag) = self.drags.remove(&id) else {
            return SwipeOutcome::Ignored;
        };
        let travel = self.direction.along(position - drag.origin);
        if travel >= self.threshold_px {
            SwipeOutcome::Dismiss
        } else {
            SwipeOutcome::Snapback
        }
    }

    /// Abandon a drag without a release decision (pointer cancel, entry
    /// removed mid-gesture). Returns `true` if a drag was dropped; the host
    /// should treat it as a snapback.
    pub fn on_cancel(&mut self, id: K) -> bool {
        self.drags.remove(&id).is_some()
    }

    /// The signed displacement of the active drag on `id` along the
    /// configured direction, if one is active.
    #[must_use]
    pub fn displacement(&self, id: K) -> Option<f64> {
        let drag = self.drags.get(&id)?;
        Some(self.direction.along(drag.delta()))
    }

    /// Whether a drag is active on `id`.
    #[must_use]
    pub fn is_dragging(&self, id: K) -> bool {
        self.drags.contains_key(&id)
    }

    /// The active drag on `id`, if any.
    #[must_use]
    pub fn drag(&self, id: K) -> Option<&Drag> {
        self.drags.get(&id)
    }

    /// Keep only the drags whose keys satisfy the predicate.
    ///
    /// Hosts call this after entries are removed so a drag cannot outlive
    /// the entry it was scoped to.
    pub fn retain(&mut self, mut keep: impl FnMut(&K) -> bool) {
        self.drags.retain(|id, _| keep(id));
    }

    /// Drop every active drag.
    pub fn clear(&mut self) {
        self.drags.clear();
    }
}

impl<K: Copy + Ord> Default for SwipeTracker<K> {
    fn default() -> Self {
        Self::new()
    }
}
