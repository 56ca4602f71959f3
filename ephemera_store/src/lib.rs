// Copyright 2026 the Ephemera Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ephemera Store: the ordered collection and lifecycle of transient
//! notifications.
//!
//! ## Overview
//!
//! A [`Store`] owns the live set of toasts — the single source of truth a
//! renderer subscribes to — together with their countdowns (via
//! [`ephemera_timer`]) and the single dismissal path that the three
//! dismissal triggers (countdown expiry, manual close, swipe gesture)
//! converge on.
//!
//! The store is driven entirely by explicit `u64` millisecond timestamps:
//! the host pumps [`Store::tick`] with the current time and passes the same
//! timestamps into `create`/`pause`/`resume`. Nothing here reads a clock,
//! which keeps every lifecycle property deterministic and testable.
//!
//! Per-entry lifecycle: `Scheduled ⇄ Paused` while the user attends to the
//! toast, then `Dismissing → Removed` exactly once, whichever trigger wins.
//! Removal deletes the entry — removed entries are never retained, and a
//! stale [`ToastId`] is harmless everywhere.
//!
//! ## Minimal example
//!
//! ```rust
//! use ephemera_store::{DismissReason, Store, ToastSpec};
//!
//! let mut store: Store<&str> = Store::default();
//!
//! // A renderer subscribes and repaints from each snapshot.
//! store.subscribe(Box::new(|snapshot| {
//!     // draw snapshot…
//!     let _ = snapshot.len();
//! }));
//!
//! // Application code raises a toast with the default 5000ms lifetime.
//! let id = store.create(0, ToastSpec::success("saved")).unwrap();
//!
//! // The user hovers at t=2000 and leaves at t=3000…
//! store.pause_countdown(2_000, id);
//! store.resume_countdown(3_000, id);
//!
//! // …so the toast expires at t=6000, not t=5000.
//! assert_eq!(store.tick(5_999), 0);
//! assert_eq!(store.tick(6_000), 1);
//!
//! // Dismissing it again is an absorbed no-op, not an error.
//! assert!(!store.dismiss(id, DismissReason::Manual));
//! ```
//!
//! ## Ordering and capacity
//!
//! Display order is insertion order under the configured
//! [`InsertionOrder`] policy (oldest-first by default, newest-first with
//! [`InsertionOrder::Prepend`]). Capacity is governed by
//! [`Options::max_concurrent`]: a full store dismisses its **oldest**
//! entries — by admission, not display, order — to admit a new one, so the
//! live count never exceeds the cap.
//!
//! ## Features
//!
//! - `serde`: serde derives on configuration and tag types
//!   ([`Options`], [`InsertionOrder`], [`Variant`], [`AnnouncePriority`],
//!   [`DismissReason`]).
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod config;
mod dismiss;
mod entry;
mod store;

pub use config::{InsertionOrder, Options};
pub use dismiss::DismissReason;
pub use entry::{AnnouncePriority, Toast, ToastId, ToastPatch, ToastSpec, ToastState, Variant};
pub use store::{CreateError, Store, Subscriber, SubscriberId};

// Re-exported so hosts can name durations and the boundary error without a
// direct dependency on the timer crate.
pub use ephemera_timer::{AutoDismiss, TimerError};
