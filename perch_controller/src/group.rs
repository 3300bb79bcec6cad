// Copyright 2026 the Perch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Exclusivity coordination for sibling overlays.
//!
//! A menu bar or submenu level wants at most one overlay open at a time.
//! [`ExclusiveGroup`] is a pure coordinator over controlled controllers:
//! it tracks which member is open and, when another asks to open, reports
//! the member to evict instead of closing anything itself. The host applies
//! the result by calling `set_open(false)` on the evicted controller and
//! `set_open(true)` on the new one.
//!
//! ```rust
//! use perch_controller::group::ExclusiveGroup;
//!
//! let mut group: ExclusiveGroup<u32> = ExclusiveGroup::new();
//!
//! assert_eq!(group.open(1), None);
//! // Opening a sibling evicts the current member.
//! assert_eq!(group.open(2), Some(1));
//! assert!(group.is_open(2));
//! ```

/// Tracks the single open member of a group of sibling overlays.
///
/// `K` is any small, copyable member identifier the host chooses.
#[derive(Clone, Debug)]
pub struct ExclusiveGroup<K> {
    open: Option<K>,
}

impl<K> Default for ExclusiveGroup<K> {
    fn default() -> Self {
        Self { open: None }
    }
}

impl<K: Copy + Eq> ExclusiveGroup<K> {
    /// A group with no open member.
    pub const fn new() -> Self {
        Self { open: None }
    }

    /// The currently open member, if any.
    pub const fn open_id(&self) -> Option<K> {
        self.open
    }

    /// Whether `id` is the open member.
    pub fn is_open(&self, id: K) -> bool {
        self.open == Some(id)
    }

    /// Record `id` as the open member.
    ///
    /// Returns the member this evicts, which the host must close. Opening
    /// the already-open member evicts nothing.
    pub fn open(&mut self, id: K) -> Option<K> {
        let evicted = match self.open {
            Some(current) if current != id => Some(current),
            _ => None,
        };
        self.open = Some(id);
        evicted
    }

    /// Record that `id` closed. Returns `false` if `id` was not the open
    /// member (a stale close, which must not evict a newer sibling).
    pub fn close(&mut self, id: K) -> bool {
        if self.open == Some(id) {
            self.open = None;
            true
        } else {
            false
        }
    }

    /// Close whichever member is open, returning it. Used when the whole
    /// group collapses (for example the root menu closing).
    pub fn clear(&mut self) -> Option<K> {
        self.open.take()
    }
}
