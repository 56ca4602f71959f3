// Copyright 2026 the Ephemera Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Store-level configuration.

/// Where newly created toasts land in the display order.
///
/// Display order is what subscribers receive; "oldest" for eviction is
/// always the admission order, regardless of this policy. The policy is
/// fixed for the lifetime of a store so the rendered stack never reshuffles.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InsertionOrder {
    /// New toasts are appended at the tail (oldest first).
    #[default]
    Append,
    /// New toasts are inserted at the head (newest first).
    Prepend,
}

/// Store construction options.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Options {
    /// Auto-dismiss delay in milliseconds applied when a spec omits one.
    /// Validated per `create`, like an explicit duration.
    pub default_duration_ms: f64,
    /// Maximum number of live toasts; `None` is unbounded. When a `create`
    /// would exceed the cap, the oldest live entries are dismissed first
    /// (FIFO eviction).
    pub max_concurrent: Option<usize>,
    /// Display-order policy for new toasts.
    pub insertion_order: InsertionOrder,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            default_duration_ms: 5_000.0,
            max_concurrent: Some(3),
            insertion_order: InsertionOrder::Append,
        }
    }
}
