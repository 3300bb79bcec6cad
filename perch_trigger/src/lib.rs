// Copyright 2026 the Perch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Perch Trigger: maps trigger-element events to open/close intents.
//!
//! An anchored overlay is driven from its trigger element in one of three
//! modes: hover (pointer enter/leave), click (press toggles), or focus
//! (focus gained/lost). [`TriggerBinding`] interprets raw trigger-element
//! events against the active mode and the current open flag, producing
//! [`Intent`]s for a downstream visibility machine. It never applies a
//! delay and never looks at the document: delays belong to the visibility
//! layer, and document-level dismissal (escape, outside pointer) is that
//! layer's business too.
//!
//! [`TriggerBinding::listeners`] reports exactly which trigger-element
//! listeners the active mode needs, so hosts attach no more than necessary,
//! and nothing at all while disabled.
//!
//! ```rust
//! use perch_trigger::{Intent, TriggerBinding, TriggerEvent, TriggerMode};
//!
//! let binding = TriggerBinding::new(TriggerMode::Click);
//!
//! // A press toggles against the current open flag.
//! assert_eq!(binding.interpret(TriggerEvent::Press, false), Some(Intent::Open));
//! assert_eq!(binding.interpret(TriggerEvent::Press, true), Some(Intent::Close));
//!
//! // Events from other modes are ignored.
//! assert_eq!(binding.interpret(TriggerEvent::PointerEnter, false), None);
//! ```
//!
//! This crate is `no_std`.

#![no_std]

/// How the trigger element opens and closes its overlay.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum TriggerMode {
    /// Pointer enter opens, pointer leave closes.
    #[default]
    Hover,
    /// A press toggles.
    Click,
    /// Focus opens, blur closes.
    Focus,
}

/// A raw event delivered on the trigger element.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TriggerEvent {
    /// Pointer entered the trigger.
    PointerEnter,
    /// Pointer left the trigger.
    PointerLeave,
    /// The trigger was pressed (click/tap).
    Press,
    /// The trigger gained keyboard focus.
    FocusGained,
    /// The trigger lost keyboard focus.
    FocusLost,
}

/// The visibility intent a trigger event translates to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Intent {
    /// The overlay should open (possibly after the visibility layer's
    /// delay).
    Open,
    /// The overlay should close.
    Close,
}

bitflags::bitflags! {
    /// Listeners to attach on the trigger element for the active mode.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct TriggerListeners: u8 {
        /// Pointer-enter listener.
        const POINTER_ENTER = 0b0000_0001;
        /// Pointer-leave listener.
        const POINTER_LEAVE = 0b0000_0010;
        /// Press (click/tap) listener.
        const PRESS         = 0b0000_0100;
        /// Focus-gained listener.
        const FOCUS         = 0b0000_1000;
        /// Focus-lost listener.
        const BLUR          = 0b0001_0000;
    }
}

/// Interprets trigger-element events for one overlay instance.
#[derive(Copy, Clone, Debug)]
pub struct TriggerBinding {
    /// Active trigger mode.
    pub mode: TriggerMode,
    /// Suppress all intents and report no listeners.
    pub disabled: bool,
    /// In click mode, whether a press while open closes. When false a press
    /// while open is ignored, leaving dismissal to escape or outside
    /// interaction.
    pub close_on_press: bool,
}

impl TriggerBinding {
    /// A binding for `mode` with presses toggling and not disabled.
    pub const fn new(mode: TriggerMode) -> Self {
        Self {
            mode,
            disabled: false,
            close_on_press: true,
        }
    }

    /// Translate a trigger-element event into an intent, given the current
    /// open flag.
    ///
    /// Returns `None` for events the active mode does not use, and for
    /// everything while disabled.
    pub fn interpret(&self, event: TriggerEvent, is_open: bool) -> Option<Intent> {
        if self.disabled {
            return None;
        }
        match (self.mode, event) {
            (TriggerMode::Hover, TriggerEvent::PointerEnter) => Some(Intent::Open),
            (TriggerMode::Hover, TriggerEvent::PointerLeave) => Some(Intent::Close),
            (TriggerMode::Click, TriggerEvent::Press) => {
                if !is_open {
                    Some(Intent::Open)
                } else if self.close_on_press {
                    Some(Intent::Close)
                } else {
                    None
                }
            }
            (TriggerMode::Focus, TriggerEvent::FocusGained) => Some(Intent::Open),
            (TriggerMode::Focus, TriggerEvent::FocusLost) => Some(Intent::Close),
            _ => None,
        }
    }

    /// The trigger-element listeners the active mode needs.
    ///
    /// Empty while disabled. Never includes document-level listeners; those
    /// belong to the visibility layer's ledger.
    pub fn listeners(&self) -> TriggerListeners {
        if self.disabled {
            return TriggerListeners::empty();
        }
        match self.mode {
            TriggerMode::Hover => TriggerListeners::POINTER_ENTER | TriggerListeners::POINTER_LEAVE,
            TriggerMode::Click => TriggerListeners::PRESS,
            TriggerMode::Focus => TriggerListeners::FOCUS | TriggerListeners::BLUR,
        }
    }
}

impl Default for TriggerBinding {
    fn default() -> Self {
        Self::new(TriggerMode::Hover)
    }
}
