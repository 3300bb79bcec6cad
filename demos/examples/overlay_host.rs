// Copyright 2026 the Perch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A scripted host loop driving anchored-overlay controllers.
//!
//! This example stands in for a real UI host: it delivers trigger and
//! document events to `perch_controller`, advances a millisecond clock,
//! re-syncs listener ledgers after every call, and measures elements with a
//! fake `Measure` capability. It walks through:
//! - a hover tooltip with an open delay, dismissed before and after the
//!   delay elapses,
//! - a click popover near the viewport edge, clamped into view and closed
//!   by an outside pointer-down,
//! - two controlled menus coordinated through an `ExclusiveGroup`.
//!
//! Run:
//! - `cargo run -p perch_demos --example overlay_host`

use kurbo::{Point, Rect};
use perch_controller::group::ExclusiveGroup;
use perch_controller::{Measure, MeasureTarget, OverlayConfig, OverlayController};
use perch_placement::{Align, Placement, Side};
use perch_trigger::{TriggerEvent, TriggerMode};
use perch_visibility::{OpenRequest, PointerRegion};

/// Fixed rectangles standing in for DOM measurement.
struct Host {
    trigger: Rect,
    overlay_size: (f64, f64),
    viewport: Rect,
}

impl Measure for Host {
    fn rect(&self, target: MeasureTarget) -> Option<Rect> {
        Some(match target {
            MeasureTarget::Trigger => self.trigger,
            MeasureTarget::Overlay => {
                Rect::new(0.0, 0.0, self.overlay_size.0, self.overlay_size.1)
            }
            MeasureTarget::Viewport => self.viewport,
        })
    }
}

fn report(label: &str, ctl: &OverlayController) {
    println!(
        "  [{label}] open={} position={} trigger_listeners={:?} document_listeners={:?}",
        ctl.is_open(),
        ctl.position()
            .map_or("none".to_string(), |p: Point| format!("({}, {})", p.x, p.y)),
        ctl.trigger_listeners(),
        ctl.document_listeners(),
    );
}

fn hover_tooltip() {
    println!("== Hover tooltip, 300ms delay ==");
    let host = Host {
        trigger: Rect::new(100.0, 100.0, 150.0, 120.0),
        overlay_size: (120.0, 40.0),
        viewport: Rect::new(0.0, 0.0, 800.0, 600.0),
    };
    let mut ctl = OverlayController::new(OverlayConfig {
        delay: 300,
        placement: Placement {
            side: Side::Bottom,
            align: Align::Center,
            ..Placement::default()
        },
        ..OverlayConfig::default()
    });

    // Dart across the trigger: leave before the delay elapses.
    ctl.on_trigger_event(TriggerEvent::PointerEnter, 0);
    ctl.on_trigger_event(TriggerEvent::PointerLeave, 100);
    ctl.on_tick(400);
    report("after dart-across at t=400", &ctl);

    // Hover and stay: the tick at the deadline commits the open, the
    // post-render measure produces a position.
    ctl.on_trigger_event(TriggerEvent::PointerEnter, 1000);
    ctl.on_tick(1300);
    ctl.measure(&host);
    report("after dwell at t=1300", &ctl);

    ctl.on_trigger_event(TriggerEvent::PointerLeave, 2000);
    report("after leave", &ctl);
}

fn clamped_popover() {
    println!("\n== Click popover near the right viewport edge ==");
    let host = Host {
        trigger: Rect::new(750.0, 100.0, 800.0, 120.0),
        overlay_size: (120.0, 40.0),
        viewport: Rect::new(0.0, 0.0, 800.0, 600.0),
    };
    let mut ctl = OverlayController::new(OverlayConfig {
        trigger: TriggerMode::Click,
        ..OverlayConfig::default()
    });

    ctl.on_trigger_event(TriggerEvent::Press, 0);
    ctl.measure(&host);
    report("after press (x clamped to 672)", &ctl);

    ctl.on_document_pointer_down(PointerRegion::Outside);
    report("after outside pointer-down", &ctl);
}

fn exclusive_menus() {
    println!("\n== Two controlled menus, one open at a time ==");
    let mut menus = [
        OverlayController::new(OverlayConfig {
            trigger: TriggerMode::Click,
            controlled: true,
            ..OverlayConfig::default()
        }),
        OverlayController::new(OverlayConfig {
            trigger: TriggerMode::Click,
            controlled: true,
            ..OverlayConfig::default()
        }),
    ];
    let mut group: ExclusiveGroup<usize> = ExclusiveGroup::new();

    // The host applies requests and keeps the group's bookkeeping.
    fn press(
        menus: &mut [OverlayController; 2],
        group: &mut ExclusiveGroup<usize>,
        idx: usize,
        now: u64,
    ) {
        match menus[idx].on_trigger_event(TriggerEvent::Press, now) {
            Some(OpenRequest::Open) => {
                if let Some(evicted) = group.open(idx) {
                    menus[evicted].set_open(false);
                }
                menus[idx].set_open(true);
            }
            Some(OpenRequest::Close) => {
                group.close(idx);
                menus[idx].set_open(false);
            }
            None => {}
        }
    }

    press(&mut menus, &mut group, 0, 0);
    println!("  pressed menu 0: open = {:?}", group.open_id());

    press(&mut menus, &mut group, 1, 100);
    println!(
        "  pressed menu 1: open = {:?}, menu 0 open = {}",
        group.open_id(),
        menus[0].is_open()
    );

    press(&mut menus, &mut group, 1, 200);
    println!("  pressed menu 1 again: open = {:?}", group.open_id());
}

fn main() {
    hover_tooltip();
    clamped_popover();
    exclusive_menus();
}
