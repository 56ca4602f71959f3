// Copyright 2026 the Ephemera Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A scripted timeline driven through the toast lifecycle host.
//!
//! This stands in for the external Viewport renderer: it subscribes to the
//! store, prints every snapshot it is handed, and feeds the host a fixed
//! sequence of user events — creation, hover, a swipe, capacity pressure —
//! with explicit millisecond timestamps.
//!
//! Run:
//! - `cargo run -p ephemera_demos --example toast_timeline`

use ephemera_host::{Config, Host};
use ephemera_store::{ToastSpec, Variant};
use ephemera_swipe::SwipeDirection;
use kurbo::Point;

fn main() {
    let mut host: Host<String> = Host::new(Config {
        max_concurrent: Some(3),
        swipe_direction: SwipeDirection::Right,
        swipe_threshold_px: 50.0,
        announce_hotkey: Some("F8".into()),
        ..Config::default()
    });

    println!(
        "notification region ready (hotkey: {})",
        host.announce_hotkey().unwrap_or("none")
    );

    // The "renderer": repaint on every snapshot.
    host.subscribe(Box::new(|snapshot| {
        if snapshot.is_empty() {
            println!("  [viewport] empty");
        } else {
            let titles: Vec<&str> = snapshot.iter().map(|t| t.title.as_str()).collect();
            println!("  [viewport] {}", titles.join(" | "));
        }
    }));

    // t=0: a routine success toast with the default 5000ms lifetime.
    let saved = host
        .create(0, ToastSpec::success("Saved draft".to_string()))
        .unwrap();

    // t=500: a sticky failure — duration 0 means it never auto-dismisses.
    let failed = host
        .create(
            500,
            ToastSpec::destructive("Upload failed".to_string())
                .description("The connection dropped.".to_string())
                .duration_ms(0.0),
        )
        .unwrap();

    // t=2000: the user hovers the success toast, freezing its countdown…
    host.hover_begin(2_000, saved);
    println!(
        "t=2000 hover; 'Saved draft' has {:?} left",
        host.remaining(2_000, saved)
    );

    // …and leaves at t=3500, so its deadline slides to t=6500.
    host.hover_end(3_500, saved);

    // t=4000: the user swipes the failure toast 80px to the right.
    host.pointer_down(4_000, failed, Point::new(0.0, 0.0));
    host.pointer_move(4_050, failed, Point::new(40.0, 2.0));
    let outcome = host.pointer_up(4_100, failed, Point::new(80.0, 4.0));
    println!("t=4100 swipe outcome: {outcome:?}");

    // t=5000..=7000: pump the clock; the success toast expires at t=6500.
    for now in [5_000_u64, 6_000, 6_500, 7_000] {
        let removed = host.tick(now);
        if removed > 0 {
            println!("t={now} removed {removed} expired toast(s)");
        }
    }

    // t=8000..: three quick toasts, then a fourth that evicts the oldest.
    for (offset, title) in ["one", "two", "three", "four"].iter().enumerate() {
        host.create(
            8_000 + offset as u64,
            ToastSpec::new(format!("Job {title} finished")).variant(Variant::Info),
        )
        .unwrap();
    }
    println!(
        "after capacity pressure: {} live (cap 3), oldest evicted",
        host.toasts().len()
    );

    // Drain the rest of the timeline.
    let mut now = 8_003;
    while !host.store().is_empty() {
        now += 500;
        host.tick(now);
    }
    println!(
        "t={now} everything expired; sticky remaining query: {:?}",
        host.remaining(now, failed)
    );
}
