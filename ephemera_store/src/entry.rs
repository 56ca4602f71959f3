// Copyright 2026 the Ephemera Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Toast entry model: identifiers, tags, lifecycle states, and the
//! creation/patch inputs accepted by the store.

/// Unique identifier for a toast, assigned by the store at creation.
///
/// Identifiers are assigned in admission order and never reused for the
/// lifetime of a store, so a stale id held by a renderer or input layer is
/// harmless: every operation on it is a no-op. The `Ord` impl follows
/// admission order, which is what "oldest" means for FIFO eviction,
/// independent of display order.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ToastId(pub(crate) u64);

/// Visual/semantic tag for a toast.
///
/// The lifecycle core carries this through to the renderer untouched; it
/// has no effect on scheduling, ordering, or dismissal.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Variant {
    /// Neutral notification.
    #[default]
    Default,
    /// Destructive or failed operation.
    Destructive,
    /// Completed operation.
    Success,
    /// Something worth attention but not blocking.
    Warning,
    /// Informational message.
    Info,
    /// Operation still in flight.
    Loading,
}

/// Urgency hint for assistive technology.
///
/// Foreground toasts should be announced immediately; background toasts may
/// be deferred. The core only preserves the distinction for the renderer;
/// it never acts on it.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AnnouncePriority {
    /// Surface to assistive technology immediately.
    #[default]
    Foreground,
    /// Announcement may be deferred.
    Background,
}

/// Lifecycle state of a toast.
///
/// The machine is `Scheduled ⇄ Paused` (any number of pause/resume cycles),
/// then `Dismissing` exactly once via one of the three dismissal triggers,
/// then the terminal `Removed`. Subscribers never observe `Dismissing` or
/// `Removed`: both are internal to the single dismissal path, which deletes
/// the entry before notifying.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ToastState {
    /// Countdown running (or indefinite).
    Scheduled,
    /// Countdown frozen by user attention.
    Paused,
    /// A dismissal trigger won; the countdown is being torn down.
    Dismissing,
    /// Deleted from the store. Terminal.
    Removed,
}

/// One live transient notification.
///
/// Generic over the content handle `C`, which the core treats as opaque —
/// callers typically use strings, interned keys, or rich-text handles.
#[derive(Clone, Debug)]
pub struct Toast<C> {
    /// Store-assigned identifier.
    pub id: ToastId,
    /// Opaque primary content.
    pub title: C,
    /// Opaque secondary content.
    pub description: Option<C>,
    /// Visual/semantic tag; no lifecycle effect.
    pub variant: Variant,
    /// Accessibility urgency hint, carried through to the renderer.
    pub priority: AnnouncePriority,
    /// Current lifecycle state.
    pub state: ToastState,
    /// Timestamp passed to `create`.
    pub created_at_ms: u64,
}

/// Input to [`Store::create`](crate::Store::create).
///
/// Only the title is required. The duration is raw milliseconds as supplied
/// by the embedder and is validated at creation time; when omitted, the
/// configured provider default applies.
#[derive(Clone, Debug)]
pub struct ToastSpec<C> {
    /// Opaque primary content.
    pub title: C,
    /// Opaque secondary content.
    pub description: Option<C>,
    /// Visual/semantic tag.
    pub variant: Variant,
    /// Accessibility urgency hint.
    pub priority: AnnouncePriority,
    /// Requested auto-dismiss delay in milliseconds. `0` and `+∞` mean
    /// "never auto-dismiss"; negative and NaN values are rejected by
    /// `create`. `None` selects the configured default.
    pub duration_ms: Option<f64>,
}

impl<C> ToastSpec<C> {
    /// A spec with the given title and all other fields defaulted.
    pub fn new(title: C) -> Self {
        Self {
            title,
            description: None,
            variant: Variant::Default,
            priority: AnnouncePriority::Foreground,
            duration_ms: None,
        }
    }

    /// A success-tagged spec.
    pub fn success(title: C) -> Self {
        Self::new(title).variant(Variant::Success)
    }

    /// A destructive-tagged spec.
    pub fn destructive(title: C) -> Self {
        Self::new(title).variant(Variant::Destructive)
    }

    /// Set the secondary content.
    #[must_use]
    pub fn description(mut self, description: C) -> Self {
        self.description = Some(description);
        self
    }

    /// Set the variant tag.
    #[must_use]
    pub fn variant(mut self, variant: Variant) -> Self {
        self.variant = variant;
        self
    }

    /// Set the announcement priority.
    #[must_use]
    pub fn priority(mut self, priority: AnnouncePriority) -> Self {
        self.priority = priority;
        self
    }

    /// Request an explicit auto-dismiss delay in milliseconds.
    #[must_use]
    pub fn duration_ms(mut self, ms: f64) -> Self {
        self.duration_ms = Some(ms);
        self
    }
}

/// Partial update applied by [`Store::update`](crate::Store::update).
///
/// `None` fields are left untouched. Patches never affect the lifecycle:
/// state, countdown, and ordering are unchanged by an update.
#[derive(Clone, Debug)]
pub struct ToastPatch<C> {
    /// Replacement title, if any.
    pub title: Option<C>,
    /// Replacement description, if any.
    pub description: Option<C>,
    /// Replacement variant, if any.
    pub variant: Option<Variant>,
    /// Replacement priority, if any.
    pub priority: Option<AnnouncePriority>,
}

impl<C> ToastPatch<C> {
    /// An empty patch; applying it changes nothing.
    pub fn new() -> Self {
        Self {
            title: None,
            description: None,
            variant: None,
            priority: None,
        }
    }

    /// Replace the title.
    #[must_use]
    pub fn title(mut self, title: C) -> Self {
        self.title = Some(title);
        self
    }

    /// Replace the description.
    #[must_use]
    pub fn description(mut self, description: C) -> Self {
        self.description = Some(description);
        self
    }

    /// Replace the variant tag.
    #[must_use]
    pub fn variant(mut self, variant: Variant) -> Self {
        self.variant = Some(variant);
        self
    }

    /// Replace the announcement priority.
    #[must_use]
    pub fn priority(mut self, priority: AnnouncePriority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Whether the patch carries no replacements at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.variant.is_none()
            && self.priority.is_none()
    }
}

impl<C> Default for ToastPatch<C> {
    fn default() -> Self {
        Self::new()
    }
}
