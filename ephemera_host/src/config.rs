// Copyright 2026 the Ephemera Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Provider-level configuration.

use alloc::string::String;

use ephemera_store::{InsertionOrder, Options};
use ephemera_swipe::SwipeDirection;

/// Everything an embedder can configure about a notification region.
///
/// Lifecycle knobs (`default_duration_ms`, `max_concurrent`,
/// `insertion_order`) feed the store; gesture knobs (`swipe_direction`,
/// `swipe_threshold_px`) feed the tracker; `announce_hotkey` is exposed
/// verbatim for the external renderer, which owns focus handling.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Config {
    /// Auto-dismiss delay in milliseconds applied when a spec omits one.
    pub default_duration_ms: f64,
    /// Maximum number of live toasts; `None` is unbounded. Exceeding the
    /// cap dismisses the oldest entries first (FIFO eviction).
    pub max_concurrent: Option<usize>,
    /// The one direction in which a swipe may dismiss.
    pub swipe_direction: SwipeDirection,
    /// Distance a swipe must travel along `swipe_direction` to dismiss.
    pub swipe_threshold_px: f64,
    /// Whether new toasts land at the head or tail of the rendered stack.
    pub insertion_order: InsertionOrder,
    /// Key combination the renderer binds to move focus into the
    /// notification region. Opaque to the core.
    pub announce_hotkey: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_duration_ms: 5_000.0,
            max_concurrent: Some(3),
            swipe_direction: SwipeDirection::Right,
            swipe_threshold_px: 50.0,
            insertion_order: InsertionOrder::Append,
            announce_hotkey: None,
        }
    }
}

impl Config {
    /// The store-level slice of this configuration.
    #[must_use]
    pub(crate) fn store_options(&self) -> Options {
        Options {
            default_duration_ms: self.default_duration_ms,
            max_concurrent: self.max_concurrent,
            insertion_order: self.insertion_order,
        }
    }
}
