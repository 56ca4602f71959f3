// Copyright 2026 the Ephemera Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ephemera Host: the host-facing surface of the toast lifecycle.
//!
//! ## Overview
//!
//! A [`Host`] wires the three lifecycle primitives together:
//!
//! - [`ephemera_store::Store`] — the ordered source of truth a renderer
//!   subscribes to,
//! - [`ephemera_swipe::SwipeTracker`] — pointer sequences turned into
//!   dismissal intents,
//! - the countdown scheduler behind the store.
//!
//! and funnels every user-attention signal — hover, focus, an active drag,
//! or the whole notification region being attended to — into one uniform
//! rule: a toast's countdown is frozen while at least one attention source
//! holds it, and resumes when the last source lets go. Input modalities are
//! interchangeable; the store only ever sees pause and resume.
//!
//! Like the rest of the workspace, the host is driven by explicit `u64`
//! millisecond timestamps and owns no clock: the embedder forwards input
//! events with timestamps and pumps [`Host::tick`].
//!
//! ## Minimal example
//!
//! ```rust
//! use ephemera_host::{Config, Host};
//! use ephemera_store::ToastSpec;
//! use kurbo::Point;
//!
//! let mut host: Host<&str> = Host::new(Config::default());
//! let id = host.create(0, ToastSpec::new("file moved")).unwrap();
//!
//! // The user starts dragging the toast at t=400…
//! host.pointer_down(400, id, Point::new(10.0, 10.0));
//! // …and releases 60px along the exit direction at t=500: dismissed
//! // immediately, well before the 5000ms deadline.
//! host.pointer_up(500, id, Point::new(70.0, 10.0));
//! assert!(host.store().is_empty());
//! ```
//!
//! ## Features
//!
//! - `std` (default): enables `std` support for dependencies such as
//!   `kurbo`.
//! - `libm`: enables `no_std` + `alloc` builds that rely on `libm` for
//!   floating-point math.
//! - `serde`: serde derives on [`Config`] and the tag types it carries.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

use alloc::collections::BTreeMap;
use alloc::vec::Vec;

use kurbo::Point;

use ephemera_store::{
    AutoDismiss, CreateError, DismissReason, Store, Subscriber, SubscriberId, Toast, ToastId,
    ToastPatch, ToastSpec,
};
use ephemera_swipe::{SwipeOutcome, SwipeTracker};

mod config;

pub use config::Config;

bitflags::bitflags! {
    /// The independent sources of user attention that can hold a toast's
    /// countdown frozen.
    ///
    /// A countdown pauses when the first source appears and resumes when
    /// the last one clears, so overlapping signals (say, a hover that
    /// outlives a drag) never double-resume.
    #[derive(Copy, Clone, Debug, PartialEq, Eq)]
    pub struct Attention: u8 {
        /// The pointer is resting over the toast.
        const HOVER = 1 << 0;
        /// The toast (or a control inside it) has keyboard focus.
        const FOCUS = 1 << 1;
        /// A drag is in progress on the toast.
        const POINTER = 1 << 2;
        /// The whole notification region is being attended to.
        const VIEWPORT = 1 << 3;
    }
}

/// The host-facing surface of a notification region.
///
/// All mutation flows through this type: application code raises and
/// patches toasts, the input layer forwards pointer/hover/focus events,
/// and the embedder pumps [`Host::tick`]. The renderer stays read-only —
/// it subscribes for snapshots and queries [`Host::remaining`] and
/// [`Host::swipe_displacement`] while painting.
pub struct Host<C> {
    store: Store<C>,
    tracker: SwipeTracker<ToastId>,
    attention: BTreeMap<ToastId, Attention>,
    viewport_held: bool,
    config: Config,
}

impl<C> core::fmt::Debug for Host<C> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Host")
            .field("live", &self.store.len())
            .field("attended", &self.attention.len())
            .field("viewport_held", &self.viewport_held)
            .finish_non_exhaustive()
    }
}

impl<C> Default for Host<C> {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl<C> Host<C> {
    /// Build a host from provider configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            store: Store::new(config.store_options()),
            tracker: SwipeTracker::with_config(config.swipe_direction, config.swipe_threshold_px),
            attention: BTreeMap::new(),
            viewport_held: false,
            config,
        }
    }

    /// The provider configuration this host was built with.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The hotkey the renderer should bind for moving focus into the
    /// notification region. The core exposes the value and does nothing
    /// else with it.
    #[must_use]
    pub fn announce_hotkey(&self) -> Option<&str> {
        self.config.announce_hotkey.as_deref()
    }

    /// Read-only access to the underlying store.
    #[must_use]
    pub fn store(&self) -> &Store<C> {
        &self.store
    }

    /// The current snapshot, in display order.
    #[must_use]
    pub fn toasts(&self) -> &[Toast<C>] {
        self.store.toasts()
    }

    /// Milliseconds left on an entry's countdown; see
    /// [`Store::remaining`].
    #[must_use]
    pub fn remaining(&self, now_ms: u64, id: ToastId) -> Option<AutoDismiss> {
        self.store.remaining(now_ms, id)
    }

    /// Raise a new toast; see [`Store::create`].
    ///
    /// If the notification region is currently attended to as a whole, the
    /// new entry starts paused like its siblings.
    pub fn create(&mut self, now_ms: u64, spec: ToastSpec<C>) -> Result<ToastId, CreateError> {
        let id = self.store.create(now_ms, spec)?;
        self.forget_dead();
        if self.viewport_held {
            self.attention_begin(now_ms, id, Attention::VIEWPORT);
        }
        Ok(id)
    }

    /// Patch a live toast; see [`Store::update`].
    pub fn update(&mut self, id: ToastId, patch: ToastPatch<C>) -> bool {
        self.store.update(id, patch)
    }

    /// Manually dismiss a toast (a close affordance or application code).
    /// Idempotent like every dismissal path.
    pub fn dismiss(&mut self, id: ToastId) -> bool {
        let removed = self.store.dismiss(id, DismissReason::Manual);
        if removed {
            self.attention.remove(&id);
            self.tracker.on_cancel(id);
        }
        removed
    }

    /// Manually dismiss every live toast.
    pub fn dismiss_all(&mut self) -> usize {
        let removed = self.store.dismiss_all(DismissReason::Manual);
        self.attention.clear();
        self.tracker.clear();
        removed
    }

    /// Register a renderer callback; see [`Store::subscribe`].
    pub fn subscribe(&mut self, subscriber: Subscriber<C>) -> SubscriberId {
        self.store.subscribe(subscriber)
    }

    /// Remove a renderer callback; see [`Store::unsubscribe`].
    pub fn unsubscribe(&mut self, id: SubscriberId) -> bool {
        self.store.unsubscribe(id)
    }

    /// Pump expired countdowns; see [`Store::tick`]. Returns the number of
    /// entries removed.
    pub fn tick(&mut self, now_ms: u64) -> usize {
        let removed = self.store.tick(now_ms);
        if removed > 0 {
            self.forget_dead();
        }
        removed
    }

    /// The pointer came to rest over a toast.
    pub fn hover_begin(&mut self, now_ms: u64, id: ToastId) {
        self.attention_begin(now_ms, id, Attention::HOVER);
    }

    /// The pointer left a toast.
    pub fn hover_end(&mut self, now_ms: u64, id: ToastId) {
        self.attention_end(now_ms, id, Attention::HOVER);
    }

    /// A toast (or a control inside it) gained keyboard focus.
    pub fn focus_begin(&mut self, now_ms: u64, id: ToastId) {
        self.attention_begin(now_ms, id, Attention::FOCUS);
    }

    /// A toast lost keyboard focus.
    pub fn focus_end(&mut self, now_ms: u64, id: ToastId) {
        self.attention_end(now_ms, id, Attention::FOCUS);
    }

    /// The notification region as a whole is being attended to (hovered,
    /// or focus moved into it via the announce hotkey). Every live
    /// countdown freezes until [`Host::viewport_attention_end`].
    pub fn viewport_attention_begin(&mut self, now_ms: u64) {
        if self.viewport_held {
            return;
        }
        self.viewport_held = true;
        let ids: Vec<ToastId> = self.store.toasts().iter().map(|t| t.id).collect();
        for id in ids {
            self.attention_begin(now_ms, id, Attention::VIEWPORT);
        }
    }

    /// Attention left the notification region.
    pub fn viewport_attention_end(&mut self, now_ms: u64) {
        if !self.viewport_held {
            return;
        }
        self.viewport_held = false;
        let ids: Vec<ToastId> = self.attention.keys().copied().collect();
        for id in ids {
            self.attention_end(now_ms, id, Attention::VIEWPORT);
        }
    }

    /// A drag began on a toast. The drag holds the countdown like any
    /// other attention source.
    pub fn pointer_down(&mut self, now_ms: u64, id: ToastId, position: Point) {
        if self.store.get(id).is_none() {
            log::trace!("pointer_down({id:?}) absorbed: entry not live");
            return;
        }
        self.tracker.on_down(id, position);
        self.attention_begin(now_ms, id, Attention::POINTER);
    }

    /// The drag moved. Returns the displacement along the configured exit
    /// direction for renderers translating the toast with the pointer.
    pub fn pointer_move(&mut self, _now_ms: u64, id: ToastId, position: Point) -> Option<f64> {
        self.tracker.on_move(id, position)
    }

    /// The drag ended. A release past the threshold dismisses the toast
    /// immediately, regardless of remaining time; anything short snaps
    /// back and the countdown resumes (unless another source still holds
    /// it).
    pub fn pointer_up(&mut self, now_ms: u64, id: ToastId, position: Point) -> SwipeOutcome {
        let outcome = self.tracker.on_up(id, position);
        match outcome {
            SwipeOutcome::Dismiss => {
                self.attention.remove(&id);
                self.store.dismiss(id, DismissReason::Swipe);
            }
            SwipeOutcome::Snapback => {
                self.attention_end(now_ms, id, Attention::POINTER);
            }
            SwipeOutcome::Ignored => {}
        }
        outcome
    }

    /// The drag was aborted (pointer cancel). Always a snapback.
    pub fn pointer_cancel(&mut self, now_ms: u64, id: ToastId) {
        if self.tracker.on_cancel(id) {
            self.attention_end(now_ms, id, Attention::POINTER);
        }
    }

    /// The displacement of an active drag along the configured exit
    /// direction, if one is active on `id`.
    #[must_use]
    pub fn swipe_displacement(&self, id: ToastId) -> Option<f64> {
        self.tracker.displacement(id)
    }

    fn attention_begin(&mut self, now_ms: u64, id: ToastId, source: Attention) {
        if self.store.get(id).is_none() {
            log::trace!("attention on {id:?} absorbed: entry not live");
            return;
        }
        let flags = self.attention.entry(id).or_insert(Attention::empty());
        let first = flags.is_empty();
        flags.insert(source);
        if first {
            self.store.pause_countdown(now_ms, id);
        }
    }

    fn attention_end(&mut self, now_ms: u64, id: ToastId, source: Attention) {
        let Some(flags) = self.attention.get_mut(&id) else {
            return;
        };
        flags.remove(source);
        if flags.is_empty() {
            self.attention.remove(&id);
            self.store.resume_countdown(now_ms, id);
        }
    }

    /// Drop attention records and drags whose entries are no longer live.
    fn forget_dead(&mut self) {
        let store = &self.store;
        self.attention.retain(|id, _| store.get(*id).is_some());
        self.tracker.retain(|id| store.get(*id).is_some());
    }
}
