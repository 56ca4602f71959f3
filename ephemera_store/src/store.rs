// Copyright 2026 the Ephemera Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The ordered toast collection and its subscription mechanism.

use alloc::boxed::Box;
use alloc::vec::Vec;

use ephemera_timer::{AutoDismiss, Countdowns, CountdownId, TimerError};
use hashbrown::HashMap;

use crate::config::{InsertionOrder, Options};
use crate::dismiss::DismissReason;
use crate::entry::{Toast, ToastId, ToastPatch, ToastSpec, ToastState};

/// Subscriber callback; receives the ordered snapshot of live entries after
/// every state-changing operation.
pub type Subscriber<C> = Box<dyn FnMut(&[Toast<C>])>;

/// Handle returned by [`Store::subscribe`], used to unsubscribe.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct SubscriberId(u64);

/// Errors reported by [`Store::create`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum CreateError {
    /// The requested (or configured default) duration was negative or NaN.
    #[error("invalid toast duration: {0}")]
    InvalidDuration(#[from] TimerError),
}

/// The single source of truth for live toasts.
///
/// The store owns the ordered sequence of entries, the countdown scheduler,
/// and the subscriber list. All mutation goes through its operations;
/// removal goes exclusively through the dismissal path in
/// [`dismiss`](crate::dismiss). Every method that touches the clock takes
/// the current timestamp explicitly — the store never reads time on its
/// own.
///
/// Subscribers are plain `FnMut` callbacks owned by the store, so they can
/// never re-enter it; every snapshot they observe is fully applied.
pub struct Store<C> {
    /// Live entries in display order.
    toasts: Vec<Toast<C>>,
    /// Countdown handle per live entry.
    handles: HashMap<ToastId, CountdownId>,
    countdowns: Countdowns,
    subscribers: Vec<(SubscriberId, Subscriber<C>)>,
    options: Options,
    next_toast: u64,
    next_subscriber: u64,
}

impl<C> core::fmt::Debug for Store<C> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Store")
            .field("live", &self.toasts.len())
            .field("subscribers", &self.subscribers.len())
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl<C> Default for Store<C> {
    fn default() -> Self {
        Self::new(Options::default())
    }
}

impl<C> Store<C> {
    /// Create an empty store with the given options.
    #[must_use]
    pub fn new(options: Options) -> Self {
        Self {
            toasts: Vec::new(),
            handles: HashMap::new(),
            countdowns: Countdowns::new(),
            subscribers: Vec::new(),
            options,
            next_toast: 0,
            next_subscriber: 0,
        }
    }

    /// The options this store was built with.
    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Number of live entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.toasts.len()
    }

    /// Whether no entries are live.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }

    /// The current snapshot, in display order.
    #[must_use]
    pub fn toasts(&self) -> &[Toast<C>] {
        &self.toasts
    }

    /// A live entry by id.
    #[must_use]
    pub fn get(&self, id: ToastId) -> Option<&Toast<C>> {
        self.toasts.iter().find(|t| t.id == id)
    }

    /// Milliseconds left on an entry's countdown (`Never` for sticky
    /// entries), or `None` if the id is not live. Intended for renderers
    /// drawing progress indicators.
    #[must_use]
    pub fn remaining(&self, now_ms: u64, id: ToastId) -> Option<AutoDismiss> {
        let handle = *self.handles.get(&id)?;
        self.countdowns.remaining(now_ms, handle)
    }

    /// Admit a new toast and start its countdown.
    ///
    /// The requested duration (or the configured default when the spec
    /// omits one) is validated here: negative and NaN values are rejected
    /// with [`CreateError::InvalidDuration`], never clamped; zero and
    /// infinity mean "never auto-dismiss".
    ///
    /// When a `max_concurrent` cap is configured and already full, the
    /// oldest live entries are dismissed first — exactly as if their timers
    /// had expired — before the new entry is admitted, so the live count
    /// never exceeds the cap. The eviction and the admission are one
    /// logical operation and produce a single subscriber notification.
    pub fn create(&mut self, now_ms: u64, spec: ToastSpec<C>) -> Result<ToastId, CreateError> {
        let requested = spec
            .duration_ms
            .unwrap_or(self.options.default_duration_ms);
        let duration = AutoDismiss::try_from_millis(requested)?;

        if let Some(max) = self.options.max_concurrent {
            while self.toasts.len() >= max {
                let Some(oldest) = self.toasts.iter().map(|t| t.id).min() else {
                    break;
                };
                self.dismiss_quiet(oldest, DismissReason::Timeout);
            }
        }

        let id = ToastId(self.next_toast);
        self.next_toast += 1;
        let handle = self.countdowns.start(now_ms, duration);
        self.handles.insert(id, handle);

        let toast = Toast {
            id,
            title: spec.title,
            description: spec.description,
            variant: spec.variant,
            priority: spec.priority,
            state: ToastState::Scheduled,
            created_at_ms: now_ms,
        };
        match self.options.insertion_order {
            InsertionOrder::Append => self.toasts.push(toast),
            InsertionOrder::Prepend => self.toasts.insert(0, toast),
        }
        log::debug!("toast {id:?} created at {now_ms} ({duration:?})");
        self.notify();
        Ok(id)
    }

    /// Merge a patch into a live entry.
    ///
    /// Unknown ids are a silent no-op — an update racing an expiry is the
    /// expected tail of the entry's life, not a caller bug — so updates can
    /// never resurrect a removed entry. Returns `true` if anything was
    /// applied.
    pub fn update(&mut self, id: ToastId, patch: ToastPatch<C>) -> bool {
        if patch.is_empty() {
            return false;
        }
        let Some(toast) = self.toasts.iter_mut().find(|t| t.id == id) else {
            log::trace!("update({id:?}) absorbed: entry not live");
            return false;
        };
        if let Some(title) = patch.title {
            toast.title = title;
        }
        if let Some(description) = patch.description {
            toast.description = Some(description);
        }
        if let Some(variant) = patch.variant {
            toast.variant = variant;
        }
        if let Some(priority) = patch.priority {
            toast.priority = priority;
        }
        self.notify();
        true
    }

    /// Freeze an entry's countdown while the user is attending to it.
    ///
    /// Transitions `Scheduled → Paused`; a no-op (returning `false`) for
    /// unknown ids or entries already paused.
    pub fn pause_countdown(&mut self, now_ms: u64, id: ToastId) -> bool {
        let Some(toast) = self.toasts.iter_mut().find(|t| t.id == id) else {
            log::trace!("pause_countdown({id:?}) absorbed: entry not live");
            return false;
        };
        if toast.state != ToastState::Scheduled {
            return false;
        }
        toast.state = ToastState::Paused;
        if let Some(&handle) = self.handles.get(&id) {
            self.countdowns.pause(now_ms, handle);
        }
        self.notify();
        true
    }

    /// Re-arm a paused entry's countdown from its frozen remainder.
    ///
    /// Transitions `Paused → Scheduled`; a no-op for unknown ids or entries
    /// that are not paused.
    pub fn resume_countdown(&mut self, now_ms: u64, id: ToastId) -> bool {
        let Some(toast) = self.toasts.iter_mut().find(|t| t.id == id) else {
            log::trace!("resume_countdown({id:?}) absorbed: entry not live");
            return false;
        };
        if toast.state != ToastState::Paused {
            return false;
        }
        toast.state = ToastState::Scheduled;
        if let Some(&handle) = self.handles.get(&id) {
            self.countdowns.resume(now_ms, handle);
        }
        self.notify();
        true
    }

    /// Pump the scheduler and dismiss every entry whose countdown expired
    /// at or before `now_ms`. Returns the number of entries removed.
    ///
    /// Simultaneous expirations are applied in deadline order and batched
    /// into a single subscriber notification.
    pub fn tick(&mut self, now_ms: u64) -> usize {
        let mut removed = 0;
        for handle in self.countdowns.tick(now_ms) {
            let Some(id) = self
                .handles
                .iter()
                .find_map(|(&id, &h)| (h == handle).then_some(id))
            else {
                continue;
            };
            removed += usize::from(self.dismiss_quiet(id, DismissReason::Timeout));
        }
        if removed > 0 {
            self.notify();
        }
        removed
    }

    /// Dismiss every live entry for the given reason, batching the removals
    /// into one notification. Returns the number of entries removed.
    pub fn dismiss_all(&mut self, reason: DismissReason) -> usize {
        let ids: Vec<ToastId> = self.toasts.iter().map(|t| t.id).collect();
        let mut removed = 0;
        for id in ids {
            removed += usize::from(self.dismiss_quiet(id, reason));
        }
        if removed > 0 {
            self.notify();
        }
        removed
    }

    /// Register a subscriber. It receives the ordered snapshot after every
    /// state-changing operation from now on; operations that change nothing
    /// do not emit.
    pub fn subscribe(&mut self, subscriber: Subscriber<C>) -> SubscriberId {
        let id = SubscriberId(self.next_subscriber);
        self.next_subscriber += 1;
        self.subscribers.push((id, subscriber));
        id
    }

    /// Remove a subscriber. Returns `true` if it was registered.
    pub fn unsubscribe(&mut self, id: SubscriberId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sid, _)| *sid != id);
        self.subscribers.len() != before
    }

    pub(crate) fn notify(&mut self) {
        let snapshot = self.toasts.as_slice();
        for (_, subscriber) in &mut self.subscribers {
            subscriber(snapshot);
        }
    }

    pub(crate) fn position(&self, id: ToastId) -> Option<usize> {
        self.toasts.iter().position(|t| t.id == id)
    }

    pub(crate) fn toast_mut(&mut self, ix: usize) -> &mut Toast<C> {
        &mut self.toasts[ix]
    }

    pub(crate) fn delete(&mut self, ix: usize) -> Toast<C> {
        self.toasts.remove(ix)
    }

    pub(crate) fn take_handle(&mut self, id: ToastId) -> Option<CountdownId> {
        self.handles.remove(&id)
    }

    pub(crate) fn cancel_countdown(&mut self, handle: CountdownId) {
        self.countdowns.cancel(handle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::{AnnouncePriority, Variant};

    use alloc::rc::Rc;
    use alloc::vec;
    use alloc::vec::Vec;
    use core::cell::RefCell;

    fn store() -> Store<&'static str> {
        Store::new(Options::default())
    }

    /// Records the (id, state) pairs of every snapshot delivered.
    fn recording(
        store: &mut Store<&'static str>,
    ) -> (SubscriberId, Rc<RefCell<Vec<Vec<(ToastId, ToastState)>>>>) {
        let log: Rc<RefCell<Vec<Vec<(ToastId, ToastState)>>>> = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&log);
        let sid = store.subscribe(Box::new(move |snapshot| {
            sink.borrow_mut()
                .push(snapshot.iter().map(|t| (t.id, t.state)).collect());
        }));
        (sid, log)
    }

    #[test]
    fn create_returns_id_synchronously_and_defaults_apply() {
        let mut store = store();
        let id = store.create(0, ToastSpec::new("hello")).unwrap();

        let toast = store.get(id).unwrap();
        assert_eq!(toast.state, ToastState::Scheduled);
        assert_eq!(toast.variant, Variant::Default);
        assert_eq!(toast.priority, AnnouncePriority::Foreground);
        assert_eq!(toast.created_at_ms, 0);

        // The configured 5000ms default is armed.
        assert_eq!(store.remaining(0, id), Some(AutoDismiss::After(5_000)));
    }

    #[test]
    fn negative_duration_is_rejected_not_clamped() {
        let mut store = store();
        let err = store
            .create(0, ToastSpec::new("bad").duration_ms(-1.0))
            .unwrap_err();
        assert_eq!(err, CreateError::InvalidDuration(TimerError::InvalidDuration));
        assert!(store.is_empty());
    }

    #[test]
    fn zero_duration_means_never_auto_dismiss() {
        let mut store = store();
        let id = store
            .create(0, ToastSpec::new("sticky").duration_ms(0.0))
            .unwrap();

        assert_eq!(store.tick(u64::MAX), 0);
        assert_eq!(store.remaining(u64::MAX, id), Some(AutoDismiss::Never));
    }

    #[test]
    fn auto_expiry_removes_at_deadline_not_before() {
        let mut store = store();
        let id = store
            .create(0, ToastSpec::new("transient").duration_ms(5_000.0))
            .unwrap();

        assert_eq!(store.tick(4_999), 0);
        assert!(store.get(id).is_some());
        assert_eq!(store.tick(5_000), 1);
        assert!(store.get(id).is_none());
    }

    #[test]
    fn append_policy_keeps_oldest_first() {
        let mut store = store();
        let a = store.create(0, ToastSpec::new("a")).unwrap();
        let b = store.create(1, ToastSpec::new("b")).unwrap();

        let order: Vec<ToastId> = store.toasts().iter().map(|t| t.id).collect();
        assert_eq!(order, vec![a, b]);
    }

    #[test]
    fn prepend_policy_keeps_newest_first() {
        let mut store: Store<&str> = Store::new(Options {
            insertion_order: InsertionOrder::Prepend,
            ..Options::default()
        });
        let a = store.create(0, ToastSpec::new("a")).unwrap();
        let b = store.create(1, ToastSpec::new("b")).unwrap();

        let order: Vec<ToastId> = store.toasts().iter().map(|t| t.id).collect();
        assert_eq!(order, vec![b, a]);
    }

    #[test]
    fn capacity_evicts_exactly_the_oldest() {
        let mut store: Store<&str> = Store::new(Options {
            max_concurrent: Some(3),
            ..Options::default()
        });

        let first = store.create(0, ToastSpec::new("1st")).unwrap();
        let rest = [
            store.create(1, ToastSpec::new("2nd")).unwrap(),
            store.create(2, ToastSpec::new("3rd")).unwrap(),
            store.create(3, ToastSpec::new("4th")).unwrap(),
        ];

        assert_eq!(store.len(), 3);
        assert!(store.get(first).is_none());
        for id in rest {
            assert!(store.get(id).is_some(), "younger entries must survive");
        }
    }

    #[test]
    fn eviction_respects_admission_order_under_prepend() {
        let mut store: Store<&str> = Store::new(Options {
            max_concurrent: Some(2),
            insertion_order: InsertionOrder::Prepend,
            ..Options::default()
        });

        let a = store.create(0, ToastSpec::new("a")).unwrap();
        let b = store.create(1, ToastSpec::new("b")).unwrap();
        let c = store.create(2, ToastSpec::new("c")).unwrap();

        // Display order is newest-first, but eviction still removed the
        // oldest admission, not the display tail.
        assert!(store.get(a).is_none());
        let order: Vec<ToastId> = store.toasts().iter().map(|t| t.id).collect();
        assert_eq!(order, vec![c, b]);
    }

    #[test]
    fn eviction_cancels_the_evicted_countdown() {
        let mut store: Store<&str> = Store::new(Options {
            max_concurrent: Some(1),
            ..Options::default()
        });

        store.create(0, ToastSpec::new("a").duration_ms(100.0)).unwrap();
        let b = store.create(1, ToastSpec::new("b")).unwrap();

        // Only `b` is live; `a`'s countdown must not fire later.
        assert_eq!(store.tick(10_000), 1);
        assert!(store.get(b).is_none());
        assert_eq!(store.len(), 0);
    }

    #[test]
    fn update_merges_fields_without_touching_lifecycle() {
        let mut store = store();
        let id = store.create(0, ToastSpec::new("old")).unwrap();

        assert!(store.update(id, ToastPatch::new().title("new").variant(Variant::Warning)));

        let toast = store.get(id).unwrap();
        assert_eq!(toast.title, "new");
        assert_eq!(toast.variant, Variant::Warning);
        assert_eq!(toast.state, ToastState::Scheduled);
        assert_eq!(store.remaining(0, id), Some(AutoDismiss::After(5_000)));
    }

    #[test]
    fn update_of_removed_entry_is_a_silent_noop() {
        let mut store = store();
        let id = store.create(0, ToastSpec::new("gone")).unwrap();
        store.dismiss(id, DismissReason::Manual);

        assert!(!store.update(id, ToastPatch::new().title("zombie")));
        assert!(store.is_empty());
    }

    #[test]
    fn pause_and_resume_shift_the_deadline() {
        let mut store = store();
        let id = store
            .create(0, ToastSpec::new("t").duration_ms(5_000.0))
            .unwrap();

        assert!(store.pause_countdown(2_000, id));
        assert_eq!(store.get(id).unwrap().state, ToastState::Paused);

        // Paused entries do not decay.
        assert_eq!(store.tick(50_000), 0);

        assert!(store.resume_countdown(53_000, id));
        assert_eq!(store.get(id).unwrap().state, ToastState::Scheduled);

        assert_eq!(store.tick(55_999), 0);
        assert_eq!(store.tick(56_000), 1);
    }

    #[test]
    fn pause_is_not_reentrant_and_resume_requires_pause() {
        let mut store = store();
        let id = store.create(0, ToastSpec::new("t")).unwrap();

        assert!(!store.resume_countdown(0, id));
        assert!(store.pause_countdown(0, id));
        assert!(!store.pause_countdown(1, id));
    }

    #[test]
    fn dismiss_is_idempotent_and_emits_once() {
        let mut store = store();
        let id = store.create(0, ToastSpec::new("t")).unwrap();
        let (_sid, log) = recording(&mut store);

        assert!(store.dismiss(id, DismissReason::Manual));
        assert!(!store.dismiss(id, DismissReason::Manual));
        assert!(!store.dismiss(id, DismissReason::Swipe));

        // One emission for the winning trigger, nothing for the absorbed ones.
        assert_eq!(log.borrow().len(), 1);
        assert!(log.borrow()[0].is_empty());
    }

    #[test]
    fn manual_dismiss_racing_expiry_removes_once() {
        let mut store = store();
        let id = store
            .create(0, ToastSpec::new("t").duration_ms(1_000.0))
            .unwrap();
        let (_sid, log) = recording(&mut store);

        // Manual close lands first; the already-due expiry must be absorbed.
        assert!(store.dismiss(id, DismissReason::Manual));
        assert_eq!(store.tick(1_000), 0);

        assert_eq!(log.borrow().len(), 1);
    }

    #[test]
    fn subscribers_observe_ordered_consistent_snapshots() {
        let mut store = store();
        let (_sid, log) = recording(&mut store);

        let a = store.create(0, ToastSpec::new("a")).unwrap();
        let b = store.create(1, ToastSpec::new("b")).unwrap();
        store.pause_countdown(2, a);

        let emissions = log.borrow();
        assert_eq!(
            *emissions,
            vec![
                vec![(a, ToastState::Scheduled)],
                vec![(a, ToastState::Scheduled), (b, ToastState::Scheduled)],
                vec![(a, ToastState::Paused), (b, ToastState::Scheduled)],
            ]
        );
    }

    #[test]
    fn noop_operations_do_not_emit() {
        let mut store = store();
        let id = store.create(0, ToastSpec::new("t")).unwrap();
        store.dismiss(id, DismissReason::Manual);

        let (_sid, log) = recording(&mut store);
        store.update(id, ToastPatch::new().title("x"));
        store.pause_countdown(0, id);
        store.resume_countdown(0, id);
        store.dismiss(id, DismissReason::Manual);
        store.tick(100_000);

        assert!(log.borrow().is_empty());
    }

    #[test]
    fn unsubscribe_stops_deliveries() {
        let mut store = store();
        let (sid, log) = recording(&mut store);

        store.create(0, ToastSpec::new("a")).unwrap();
        assert!(store.unsubscribe(sid));
        store.create(1, ToastSpec::new("b")).unwrap();

        assert_eq!(log.borrow().len(), 1);
        assert!(!store.unsubscribe(sid));
    }

    #[test]
    fn eviction_and_admission_are_one_notification() {
        let mut store: Store<&str> = Store::new(Options {
            max_concurrent: Some(1),
            ..Options::default()
        });
        let a = store.create(0, ToastSpec::new("a")).unwrap();
        let (_sid, log) = recording(&mut store);

        let b = store.create(1, ToastSpec::new("b")).unwrap();

        let emissions = log.borrow();
        assert_eq!(emissions.len(), 1);
        assert_eq!(emissions[0], vec![(b, ToastState::Scheduled)]);
        drop(emissions);
        assert!(store.get(a).is_none());
    }

    #[test]
    fn simultaneous_expirations_batch_into_one_emit() {
        let mut store = store();
        store.create(0, ToastSpec::new("a").duration_ms(100.0)).unwrap();
        store.create(0, ToastSpec::new("b").duration_ms(100.0)).unwrap();
        let (_sid, log) = recording(&mut store);

        assert_eq!(store.tick(100), 2);
        assert_eq!(log.borrow().len(), 1);
        assert!(log.borrow()[0].is_empty());
    }

    #[test]
    fn dismiss_all_clears_everything_at_once() {
        let mut store = store();
        store.create(0, ToastSpec::new("a")).unwrap();
        store.create(1, ToastSpec::new("b")).unwrap();
        let (_sid, log) = recording(&mut store);

        assert_eq!(store.dismiss_all(DismissReason::Manual), 2);
        assert!(store.is_empty());
        assert_eq!(log.borrow().len(), 1);
        assert_eq!(store.dismiss_all(DismissReason::Manual), 0);
        assert_eq!(log.borrow().len(), 1);
    }
}
