// Copyright 2026 the Perch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Perch Controller: one anchored-overlay controller per trigger/overlay
//! pair.
//!
//! [`OverlayController`] composes the three Perch behavior layers —
//! [`perch_trigger`] (trigger-element events → intents),
//! [`perch_visibility`] (open delay, dismissal, controlled mode), and
//! [`perch_placement`] (viewport-aware anchored placement) — behind one
//! object a host drives from its event loop. Tooltips, popovers, dropdown
//! panels, and menu popups are all the same controller with different
//! configuration.
//!
//! The host owns rendering, the clock, and event delivery; the controller
//! owns the decisions. The contract per frame:
//!
//! 1. Forward trigger-element events via
//!    [`OverlayController::on_trigger_event`], document-level events via
//!    [`OverlayController::on_escape`] /
//!    [`OverlayController::on_document_pointer_down`], and advance the
//!    clock with [`OverlayController::on_tick`].
//! 2. After every call, re-sync listeners from
//!    [`OverlayController::trigger_listeners`] and
//!    [`OverlayController::document_listeners`] — the document ledger is
//!    non-empty only while open, so no listener outlives the overlay.
//! 3. When [`OverlayController::is_open`] is true, render the overlay
//!    (hidden or deferred), then call [`OverlayController::measure`] with a
//!    [`Measure`] capability so the controller can read real rectangles.
//!    Only once [`OverlayController::position`] is `Some` may the overlay
//!    be shown; never paint it at a placeholder origin.
//!
//! Measurement is deliberately an injected capability rather than ambient
//! access: the controller asks for rectangles at defined points
//! (post-render, and again from resize/scroll handlers if the host wants
//! live repositioning), and a not-yet-attached element simply reports
//! `None`, leaving the position unset.
//!
//! ## Example
//!
//! A click-triggered popover measured with a fake host:
//!
//! ```rust
//! use kurbo::{Point, Rect};
//! use perch_controller::{Measure, MeasureTarget, OverlayConfig, OverlayController};
//! use perch_trigger::{TriggerEvent, TriggerMode};
//!
//! struct Host;
//! impl Measure for Host {
//!     fn rect(&self, target: MeasureTarget) -> Option<Rect> {
//!         Some(match target {
//!             MeasureTarget::Trigger => Rect::new(100.0, 100.0, 150.0, 120.0),
//!             MeasureTarget::Overlay => Rect::new(0.0, 0.0, 120.0, 40.0),
//!             MeasureTarget::Viewport => Rect::new(0.0, 0.0, 800.0, 600.0),
//!         })
//!     }
//! }
//!
//! let mut ctl = OverlayController::new(OverlayConfig {
//!     trigger: TriggerMode::Click,
//!     ..OverlayConfig::default()
//! });
//!
//! ctl.on_trigger_event(TriggerEvent::Press, 0);
//! assert!(ctl.is_open());
//! assert!(ctl.position().is_none()); // rendered but not yet measured
//!
//! ctl.measure(&Host);
//! assert_eq!(ctl.position(), Some(Point::new(65.0, 128.0)));
//! ```
//!
//! This crate is `no_std`.

#![no_std]

pub mod group;

use kurbo::{Point, Rect};
use perch_placement::Placement;
use perch_trigger::{Intent, TriggerBinding, TriggerEvent, TriggerListeners, TriggerMode};
use perch_visibility::{
    DocumentListeners, OpenRequest, Phase, PointerRegion, Visibility, VisibilityConfig,
};

/// Construction configuration for an [`OverlayController`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct OverlayConfig {
    /// Side, alignment, anchor gap, and viewport margin.
    pub placement: Placement,
    /// How the trigger element opens and closes the overlay.
    pub trigger: TriggerMode,
    /// Milliseconds between an open intent and the open transition.
    pub delay: u64,
    /// In click mode, whether a press while open closes (toggle).
    pub close_on_press: bool,
    /// Close on the escape key.
    pub close_on_escape: bool,
    /// Close on pointer-down outside the trigger and overlay.
    pub close_on_outside: bool,
    /// Suppress all trigger intents and report no trigger listeners.
    pub disabled: bool,
    /// Controlled mode: the host owns the open flag and applies
    /// [`OpenRequest`]s via [`OverlayController::set_open`].
    pub controlled: bool,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            placement: Placement::default(),
            trigger: TriggerMode::Hover,
            delay: 0,
            close_on_press: true,
            close_on_escape: true,
            close_on_outside: true,
            disabled: false,
            controlled: false,
        }
    }
}

/// Which rectangle a [`Measure`] capability is being asked for.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum MeasureTarget {
    /// The trigger element's bounding box.
    Trigger,
    /// The overlay element's bounding box (only its size is used).
    Overlay,
    /// The viewport bounds.
    Viewport,
}

/// Host-injected measurement capability.
///
/// All rectangles must share one coordinate space. Return `None` for
/// anything that cannot be measured yet (for example an overlay element not
/// attached on this frame); the controller treats that as "not ready" and
/// leaves its position unset.
pub trait Measure {
    /// The current bounding box of `target`, if measurable.
    fn rect(&self, target: MeasureTarget) -> Option<Rect>;
}

/// One anchored-overlay controller.
///
/// Create one per trigger/overlay pair; instances are fully independent.
/// See the crate docs for the host contract.
#[derive(Clone, Debug)]
pub struct OverlayController {
    placement: Placement,
    binding: TriggerBinding,
    visibility: Visibility,
    position: Option<Point>,
    mounted: bool,
}

impl OverlayController {
    /// Create a mounted, closed controller.
    pub fn new(config: OverlayConfig) -> Self {
        let binding = TriggerBinding {
            mode: config.trigger,
            disabled: config.disabled,
            close_on_press: config.close_on_press,
        };
        let visibility = Visibility::new(VisibilityConfig {
            delay: config.delay,
            close_on_escape: config.close_on_escape,
            close_on_outside: config.close_on_outside,
            controlled: config.controlled,
        });
        Self {
            placement: config.placement,
            binding,
            visibility,
            position: None,
            mounted: true,
        }
    }

    /// Whether the overlay is open.
    pub fn is_open(&self) -> bool {
        self.visibility.is_open()
    }

    /// Current lifecycle phase of the overlay.
    pub fn phase(&self) -> Phase {
        self.visibility.phase()
    }

    /// The solved overlay origin, if one has been measured for the current
    /// open cycle. `None` means "do not show the overlay yet".
    pub fn position(&self) -> Option<Point> {
        self.position
    }

    /// Trigger-element listeners to keep attached. Empty when disabled or
    /// unmounted.
    pub fn trigger_listeners(&self) -> TriggerListeners {
        if self.mounted {
            self.binding.listeners()
        } else {
            TriggerListeners::empty()
        }
    }

    /// Document-level listeners to keep attached. Non-empty only while
    /// open.
    pub fn document_listeners(&self) -> DocumentListeners {
        self.visibility.document_listeners()
    }

    /// Forward a trigger-element event at `now` (milliseconds).
    pub fn on_trigger_event(&mut self, event: TriggerEvent, now: u64) -> Option<OpenRequest> {
        if !self.mounted {
            return None;
        }
        let request = match self.binding.interpret(event, self.is_open())? {
            Intent::Open => self.visibility.on_open_intent(now),
            Intent::Close => self.visibility.on_close_intent(),
        };
        self.note(request)
    }

    /// Advance the clock, committing a delayed open whose deadline elapsed.
    pub fn on_tick(&mut self, now: u64) -> Option<OpenRequest> {
        if !self.mounted {
            return None;
        }
        let request = self.visibility.on_tick(now);
        self.note(request)
    }

    /// Forward an escape key-down.
    pub fn on_escape(&mut self) -> Option<OpenRequest> {
        if !self.mounted {
            return None;
        }
        let request = self.visibility.on_escape();
        self.note(request)
    }

    /// Forward a document-level pointer-down, classified by the host
    /// against the trigger and overlay bounds.
    pub fn on_document_pointer_down(&mut self, region: PointerRegion) -> Option<OpenRequest> {
        if !self.mounted {
            return None;
        }
        let request = self.visibility.on_pointer_down(region);
        self.note(request)
    }

    /// Controlled-mode feedback: the host applied an [`OpenRequest`] and
    /// reports the new open flag.
    pub fn set_open(&mut self, open: bool) {
        if !self.mounted {
            return;
        }
        self.visibility.sync_open(open);
        if !open {
            self.position = None;
        }
    }

    /// Measure and place the overlay.
    ///
    /// A no-op unless open. All three rectangles must measure; a `None`
    /// from the capability leaves the position unset so the host keeps the
    /// overlay hidden for another frame. Idempotent: re-measuring with
    /// unchanged rectangles yields the same position, so resize/scroll
    /// handlers may call this freely.
    pub fn measure(&mut self, capability: &impl Measure) {
        if !self.mounted || !self.is_open() {
            return;
        }
        let Some(trigger) = capability.rect(MeasureTarget::Trigger) else {
            return;
        };
        let Some(overlay) = capability.rect(MeasureTarget::Overlay) else {
            return;
        };
        let Some(viewport) = capability.rect(MeasureTarget::Viewport) else {
            return;
        };
        self.position = Some(perch_placement::resolve(
            trigger,
            overlay.size(),
            viewport,
            self.placement,
        ));
    }

    /// Unmount: forced closed, position and pending deadline dropped. Every
    /// later call on this controller is a guarded no-op, so a timer
    /// callback arriving after teardown cannot mutate a dead instance.
    pub fn unmount(&mut self) {
        self.visibility.clear();
        self.position = None;
        self.mounted = false;
    }

    /// Any open transition starts a fresh placement cycle; any close drops
    /// the stale position.
    fn note(&mut self, request: Option<OpenRequest>) -> Option<OpenRequest> {
        if request.is_some() {
            self.position = None;
        }
        request
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use perch_placement::{Align, Side};

    struct FakeHost {
        trigger: Option<Rect>,
        overlay: Option<Rect>,
        viewport: Option<Rect>,
    }

    impl FakeHost {
        fn ready() -> Self {
            Self {
                trigger: Some(Rect::new(100.0, 100.0, 150.0, 120.0)),
                overlay: Some(Rect::new(0.0, 0.0, 120.0, 40.0)),
                viewport: Some(Rect::new(0.0, 0.0, 800.0, 600.0)),
            }
        }
    }

    impl Measure for FakeHost {
        fn rect(&self, target: MeasureTarget) -> Option<Rect> {
            match target {
                MeasureTarget::Trigger => self.trigger,
                MeasureTarget::Overlay => self.overlay,
                MeasureTarget::Viewport => self.viewport,
            }
        }
    }

    fn click_controller() -> OverlayController {
        OverlayController::new(OverlayConfig {
            trigger: TriggerMode::Click,
            ..OverlayConfig::default()
        })
    }

    #[test]
    fn press_toggles_open_and_closed() {
        let mut ctl = click_controller();

        assert_eq!(
            ctl.on_trigger_event(TriggerEvent::Press, 0),
            Some(OpenRequest::Open)
        );
        assert!(ctl.is_open());

        assert_eq!(
            ctl.on_trigger_event(TriggerEvent::Press, 10),
            Some(OpenRequest::Close)
        );
        assert!(!ctl.is_open());
    }

    #[test]
    fn open_yields_no_position_until_measured() {
        let mut ctl = click_controller();
        ctl.on_trigger_event(TriggerEvent::Press, 0);

        assert!(ctl.position().is_none());

        ctl.measure(&FakeHost::ready());
        assert_eq!(ctl.position(), Some(Point::new(65.0, 128.0)));
    }

    #[test]
    fn unattached_overlay_leaves_position_unset() {
        let mut ctl = click_controller();
        ctl.on_trigger_event(TriggerEvent::Press, 0);

        let host = FakeHost {
            overlay: None,
            ..FakeHost::ready()
        };
        ctl.measure(&host);
        assert!(ctl.position().is_none());

        // The next frame the overlay is attached and measurement succeeds.
        ctl.measure(&FakeHost::ready());
        assert!(ctl.position().is_some());
    }

    #[test]
    fn remeasure_is_stable() {
        let mut ctl = click_controller();
        ctl.on_trigger_event(TriggerEvent::Press, 0);

        let host = FakeHost::ready();
        ctl.measure(&host);
        let first = ctl.position();
        ctl.measure(&host);
        assert_eq!(ctl.position(), first);
    }

    #[test]
    fn measure_respects_configured_placement() {
        let mut ctl = OverlayController::new(OverlayConfig {
            trigger: TriggerMode::Click,
            placement: Placement {
                side: Side::Top,
                align: Align::Start,
                ..Placement::default()
            },
            ..OverlayConfig::default()
        });
        ctl.on_trigger_event(TriggerEvent::Press, 0);
        ctl.measure(&FakeHost::ready());

        assert_eq!(ctl.position(), Some(Point::new(100.0, 100.0 - 40.0 - 8.0)));
    }

    #[test]
    fn close_drops_the_stale_position() {
        let mut ctl = click_controller();
        ctl.on_trigger_event(TriggerEvent::Press, 0);
        ctl.measure(&FakeHost::ready());
        assert!(ctl.position().is_some());

        ctl.on_trigger_event(TriggerEvent::Press, 10);
        assert!(ctl.position().is_none());
    }

    #[test]
    fn hover_with_delay_needs_a_tick_to_open() {
        let mut ctl = OverlayController::new(OverlayConfig {
            delay: 300,
            ..OverlayConfig::default()
        });

        assert!(ctl.on_trigger_event(TriggerEvent::PointerEnter, 0).is_none());
        assert!(!ctl.is_open());

        assert!(ctl.on_tick(100).is_none());
        assert_eq!(ctl.on_tick(300), Some(OpenRequest::Open));
        assert!(ctl.is_open());
    }

    #[test]
    fn hover_leave_before_delay_never_opens() {
        let mut ctl = OverlayController::new(OverlayConfig {
            delay: 300,
            ..OverlayConfig::default()
        });

        ctl.on_trigger_event(TriggerEvent::PointerEnter, 0);
        ctl.on_trigger_event(TriggerEvent::PointerLeave, 100);
        assert!(ctl.on_tick(500).is_none());
        assert!(!ctl.is_open());
    }

    #[test]
    fn escape_closes_and_removes_document_listeners() {
        let mut ctl = click_controller();
        ctl.on_trigger_event(TriggerEvent::Press, 0);
        assert_eq!(
            ctl.document_listeners(),
            DocumentListeners::KEY_DOWN | DocumentListeners::POINTER_DOWN
        );

        assert_eq!(ctl.on_escape(), Some(OpenRequest::Close));
        assert!(!ctl.is_open());
        assert!(ctl.document_listeners().is_empty());
    }

    #[test]
    fn outside_pointer_down_closes_but_inside_does_not() {
        let mut ctl = click_controller();
        ctl.on_trigger_event(TriggerEvent::Press, 0);
        ctl.measure(&FakeHost::ready());

        assert!(
            ctl.on_document_pointer_down(PointerRegion::Overlay)
                .is_none()
        );
        assert!(ctl.is_open());

        assert_eq!(
            ctl.on_document_pointer_down(PointerRegion::Outside),
            Some(OpenRequest::Close)
        );
        assert!(!ctl.is_open());
        assert!(ctl.position().is_none());
    }

    #[test]
    fn disabled_controller_is_inert() {
        let mut ctl = OverlayController::new(OverlayConfig {
            trigger: TriggerMode::Click,
            disabled: true,
            ..OverlayConfig::default()
        });

        assert!(ctl.on_trigger_event(TriggerEvent::Press, 0).is_none());
        assert!(!ctl.is_open());
        assert!(ctl.trigger_listeners().is_empty());
    }

    #[test]
    fn unmount_closes_and_guards_every_later_call() {
        let mut ctl = OverlayController::new(OverlayConfig {
            trigger: TriggerMode::Click,
            delay: 200,
            ..OverlayConfig::default()
        });
        // Leave a deadline in flight, as if torn down mid-open.
        ctl.on_trigger_event(TriggerEvent::Press, 0);
        ctl.unmount();

        assert!(!ctl.is_open());
        assert!(ctl.trigger_listeners().is_empty());
        assert!(ctl.document_listeners().is_empty());

        // The late timer callback and any stray events are no-ops.
        assert!(ctl.on_tick(1000).is_none());
        assert!(ctl.on_trigger_event(TriggerEvent::Press, 1000).is_none());
        assert!(ctl.on_escape().is_none());
        ctl.measure(&FakeHost::ready());
        assert!(ctl.position().is_none());
    }

    #[test]
    fn controlled_controller_round_trips_through_the_host() {
        let mut ctl = OverlayController::new(OverlayConfig {
            trigger: TriggerMode::Click,
            controlled: true,
            ..OverlayConfig::default()
        });

        // The controller requests the open but does not apply it.
        assert_eq!(
            ctl.on_trigger_event(TriggerEvent::Press, 0),
            Some(OpenRequest::Open)
        );
        assert!(!ctl.is_open());

        ctl.set_open(true);
        assert!(ctl.is_open());
        ctl.measure(&FakeHost::ready());
        assert!(ctl.position().is_some());

        // And symmetrically for the close.
        assert_eq!(
            ctl.on_trigger_event(TriggerEvent::Press, 10),
            Some(OpenRequest::Close)
        );
        assert!(ctl.is_open());
        ctl.set_open(false);
        assert!(!ctl.is_open());
        assert!(ctl.position().is_none());
    }

    #[test]
    fn measure_while_closed_is_a_no_op() {
        let mut ctl = click_controller();
        ctl.measure(&FakeHost::ready());
        assert!(ctl.position().is_none());
    }
}
