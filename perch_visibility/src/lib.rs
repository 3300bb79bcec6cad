// Copyright 2026 the Perch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Perch Visibility: the open/closed state machine behind anchored overlays.
//!
//! One [`Visibility`] instance owns the lifecycle of a single overlay:
//!
//! - **Opening delay.** An open intent with a configured delay arms a
//!   deadline instead of opening immediately; the host drives the clock by
//!   calling [`Visibility::on_tick`] with millisecond timestamps. Repeated
//!   open intents re-arm the deadline (timed from the last intent), so at
//!   most one deadline is ever live.
//! - **Close dominance.** Any close intent unconditionally drops a pending
//!   deadline before anything else, so an open can never "win" a race
//!   against a later close within the same tick.
//! - **Dismissal.** While open, the machine reacts to the escape key and to
//!   pointer-downs classified as outside the trigger/overlay pair, each
//!   gated by configuration.
//! - **Listener ledger.** [`Visibility::document_listeners`] reports which
//!   document-level listeners the host must keep attached: non-empty only
//!   while open, empty again the moment the machine leaves the open state.
//!   Treat it as a scoped resource and re-sync it after every call that
//!   returns a request.
//!
//! The machine is time-and-event driven with no timer runtime of its own:
//! all methods are synchronous, and timestamps are plain `u64` milliseconds
//! from any monotonic host clock.
//!
//! ## Controlled mode
//!
//! By default the machine owns its open flag. With
//! [`VisibilityConfig::controlled`] set, it never self-applies open/close
//! transitions: it still tracks the opening deadline internally, but only
//! *reports* intended transitions as [`OpenRequest`]s, and the host feeds
//! the applied value back via [`Visibility::sync_open`]. The same machine
//! therefore serves both a self-managed tooltip and an externally
//! coordinated menu-bar submenu.
//!
//! ## Example
//!
//! A hover overlay with a 300 ms open delay that is dismissed by pointing
//! away before the delay elapses:
//!
//! ```rust
//! use perch_visibility::{Visibility, VisibilityConfig};
//!
//! let mut vis = Visibility::new(VisibilityConfig {
//!     delay: 300,
//!     ..VisibilityConfig::default()
//! });
//!
//! assert!(vis.on_open_intent(0).is_none()); // deadline armed at t=300
//! assert!(vis.on_tick(100).is_none());
//! assert!(vis.on_close_intent().is_none()); // deadline dropped
//! assert!(vis.on_tick(400).is_none()); // never opens
//! assert!(!vis.is_open());
//! ```
//!
//! This crate is `no_std`.

#![no_std]

bitflags::bitflags! {
    /// Document-level listeners an open overlay needs.
    ///
    /// The host attaches these on transition into the open state and
    /// detaches them on transition out; [`Visibility::document_listeners`]
    /// is the single source of truth for what should currently be attached.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct DocumentListeners: u8 {
        /// Key-down listener for escape dismissal.
        const KEY_DOWN     = 0b0000_0001;
        /// Pointer-down listener for outside-interaction dismissal.
        const POINTER_DOWN = 0b0000_0010;
    }
}

/// Configuration for a [`Visibility`] machine.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct VisibilityConfig {
    /// Milliseconds between an open intent and the open transition. Zero
    /// opens synchronously.
    pub delay: u64,
    /// Close on the escape key while open.
    pub close_on_escape: bool,
    /// Close on a pointer-down outside the trigger and overlay while open.
    pub close_on_outside: bool,
    /// Controlled mode: never self-apply open/close, only emit
    /// [`OpenRequest`]s for the host to apply and feed back.
    pub controlled: bool,
}

impl Default for VisibilityConfig {
    fn default() -> Self {
        Self {
            delay: 0,
            close_on_escape: true,
            close_on_outside: true,
            controlled: false,
        }
    }
}

/// Lifecycle phase of the overlay.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Not visible, nothing pending.
    Closed,
    /// An open intent is waiting out the configured delay.
    Opening {
        /// Timestamp (host-clock milliseconds) at which the open commits.
        deadline: u64,
    },
    /// Visible.
    Open,
}

/// A transition the machine wants applied to the open flag.
///
/// In uncontrolled mode the machine has already applied it to itself and
/// the request is informational (drive rendering and listener sync from
/// it). In controlled mode the host owns the flag: apply the request and
/// feed the new value back with [`Visibility::sync_open`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum OpenRequest {
    /// The overlay should become open.
    Open,
    /// The overlay should become closed.
    Close,
}

/// Where a document-level pointer-down landed, relative to one overlay
/// instance.
///
/// Pointer-downs on the trigger or inside the overlay never count as
/// outside interaction; the trigger's own press handling decides what a
/// press on it means.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PointerRegion {
    /// On the trigger element.
    Trigger,
    /// Inside the overlay element.
    Overlay,
    /// Anywhere else in the document.
    Outside,
}

/// Overlay visibility state machine.
///
/// See the crate docs for the overall model. All methods are no-ops when
/// they do not apply to the current phase, so hosts can forward events
/// unconditionally.
#[derive(Clone, Debug)]
pub struct Visibility {
    config: VisibilityConfig,
    phase: Phase,
}

impl Visibility {
    /// Create a closed machine with the given configuration.
    pub const fn new(config: VisibilityConfig) -> Self {
        Self {
            config,
            phase: Phase::Closed,
        }
    }

    /// The configuration this machine was built with.
    pub const fn config(&self) -> &VisibilityConfig {
        &self.config
    }

    /// Current phase.
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// Whether the overlay is open.
    pub const fn is_open(&self) -> bool {
        matches!(self.phase, Phase::Open)
    }

    /// The pending open deadline, if an open intent is waiting out its
    /// delay.
    pub const fn pending_deadline(&self) -> Option<u64> {
        match self.phase {
            Phase::Opening { deadline } => Some(deadline),
            _ => None,
        }
    }

    /// Document-level listeners that should currently be attached.
    ///
    /// Empty in every phase except [`Phase::Open`], and even then only the
    /// flags the configuration enables.
    pub fn document_listeners(&self) -> DocumentListeners {
        let mut listeners = DocumentListeners::empty();
        if self.is_open() {
            if self.config.close_on_escape {
                listeners |= DocumentListeners::KEY_DOWN;
            }
            if self.config.close_on_outside {
                listeners |= DocumentListeners::POINTER_DOWN;
            }
        }
        listeners
    }

    /// Handle an open intent at `now` (milliseconds).
    ///
    /// With a zero delay this commits the open immediately; otherwise it
    /// arms (or re-arms) the deadline at `now + delay`. Re-arming replaces
    /// any previous deadline, so a burst of open intents results in exactly
    /// one open transition, timed from the last intent.
    pub fn on_open_intent(&mut self, now: u64) -> Option<OpenRequest> {
        if self.is_open() {
            return None;
        }
        if self.config.delay == 0 {
            return self.commit_open();
        }
        self.phase = Phase::Opening {
            deadline: now + self.config.delay,
        };
        None
    }

    /// Handle a close intent from any source.
    ///
    /// A pending deadline is dropped unconditionally before anything else,
    /// so a close always wins over an in-flight open. Closing while already
    /// closed is a no-op.
    pub fn on_close_intent(&mut self) -> Option<OpenRequest> {
        match self.phase {
            Phase::Closed => None,
            Phase::Opening { .. } => {
                // The open never committed; nothing to report.
                self.phase = Phase::Closed;
                None
            }
            Phase::Open => {
                if !self.config.controlled {
                    self.phase = Phase::Closed;
                }
                Some(OpenRequest::Close)
            }
        }
    }

    /// Advance the clock to `now`, committing a pending open whose deadline
    /// has elapsed.
    pub fn on_tick(&mut self, now: u64) -> Option<OpenRequest> {
        match self.phase {
            Phase::Opening { deadline } if now >= deadline => self.commit_open(),
            _ => None,
        }
    }

    /// Handle the escape key. Only meaningful while open and with
    /// [`VisibilityConfig::close_on_escape`] set.
    pub fn on_escape(&mut self) -> Option<OpenRequest> {
        if self.is_open() && self.config.close_on_escape {
            self.on_close_intent()
        } else {
            None
        }
    }

    /// Handle a document-level pointer-down classified by the host.
    ///
    /// Only an [`PointerRegion::Outside`] press while open closes, and only
    /// with [`VisibilityConfig::close_on_outside`] set.
    pub fn on_pointer_down(&mut self, region: PointerRegion) -> Option<OpenRequest> {
        if self.is_open() && self.config.close_on_outside && region == PointerRegion::Outside {
            self.on_close_intent()
        } else {
            None
        }
    }

    /// Feed back the externally-applied open flag (controlled mode), or
    /// force the state directly.
    ///
    /// Opening a machine this way drops any pending deadline.
    pub fn sync_open(&mut self, open: bool) {
        self.phase = if open { Phase::Open } else { Phase::Closed };
    }

    /// Unmount: forced closed, deadline dropped, nothing emitted.
    ///
    /// After this the listener ledger is empty regardless of the phase the
    /// machine was in.
    pub fn clear(&mut self) {
        self.phase = Phase::Closed;
    }

    fn commit_open(&mut self) -> Option<OpenRequest> {
        // In controlled mode the deadline is spent but the flag stays
        // external until sync_open feeds it back.
        self.phase = if self.config.controlled {
            Phase::Closed
        } else {
            Phase::Open
        };
        Some(OpenRequest::Open)
    }
}
