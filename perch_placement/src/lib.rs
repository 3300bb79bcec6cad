// Copyright 2026 the Perch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Perch Placement: anchored-overlay placement math.
//!
//! This crate computes where a floating overlay (tooltip bubble, popover
//! panel, dropdown list) should be placed relative to a trigger element. It
//! is a pure geometry layer: callers measure the trigger, the overlay, and
//! the viewport in a shared coordinate space (typically logical pixels with
//! the origin at the viewport's top-left) and receive back an absolute
//! origin for the overlay.
//!
//! The model has two steps:
//!
//! - [`resolve_unclamped`] anchors the overlay to one [`Side`] of the
//!   trigger at a configurable gap, then slides it along the cross axis
//!   according to [`Align`].
//! - [`clamp_to_viewport`] constrains the result so the overlay's full
//!   bounding box stays inside the viewport minus a safety margin.
//!
//! [`resolve`] composes both. The clamp is a containment clamp, not a
//! flip: an overlay requested on a side it does not fit on slides along the
//! viewport edge (and may end up covering its trigger) rather than jumping
//! to the opposite side or disappearing.
//!
//! All functions are side-effect free and idempotent, so hosts may re-solve
//! on every scroll or resize without accumulating drift.
//!
//! ## Example
//!
//! A 120×40 overlay below a trigger, centered:
//!
//! ```rust
//! use kurbo::{Point, Rect, Size};
//! use perch_placement::{Align, Placement, Side, resolve};
//!
//! let trigger = Rect::new(100.0, 100.0, 150.0, 120.0);
//! let overlay = Size::new(120.0, 40.0);
//! let viewport = Rect::new(0.0, 0.0, 800.0, 600.0);
//! let placement = Placement {
//!     side: Side::Bottom,
//!     align: Align::Center,
//!     ..Placement::default()
//! };
//!
//! let origin = resolve(trigger, overlay, viewport, placement);
//! assert_eq!(origin, Point::new(65.0, 128.0));
//! ```
//!
//! This crate is `no_std`.

#![no_std]

use kurbo::{Point, Rect, Size};

/// Which edge of the trigger the overlay is anchored to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum Side {
    /// Overlay above the trigger.
    Top,
    /// Overlay below the trigger.
    #[default]
    Bottom,
    /// Overlay to the left of the trigger.
    Left,
    /// Overlay to the right of the trigger.
    Right,
}

impl Side {
    /// Whether this side anchors along the vertical axis (overlay above or
    /// below), so the cross axis is horizontal.
    pub const fn is_vertical(self) -> bool {
        matches!(self, Self::Top | Self::Bottom)
    }
}

/// Cross-axis alignment of the overlay relative to the trigger.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum Align {
    /// Leading edges flush (left edges for a vertical side, top edges for a
    /// horizontal one).
    Start,
    /// Overlay centered over the trigger's midpoint.
    #[default]
    Center,
    /// Trailing edges flush.
    End,
}

/// A full placement request: side, alignment, anchor gap, and the viewport
/// safety margin used by the containment clamp.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Placement {
    /// Edge of the trigger to anchor to.
    pub side: Side,
    /// Cross-axis alignment.
    pub align: Align,
    /// Gap between the trigger edge and the overlay, in the caller's units.
    pub offset: f64,
    /// Minimum distance kept between the overlay and the viewport edges.
    pub margin: f64,
}

impl Default for Placement {
    fn default() -> Self {
        Self {
            side: Side::Bottom,
            align: Align::Center,
            offset: 8.0,
            margin: 8.0,
        }
    }
}

/// Compute the overlay origin for a placement request, ignoring the
/// viewport.
///
/// The primary axis is set by `placement.side` at `placement.offset` from
/// the trigger's edge; the cross axis is set by `placement.align` relative
/// to the trigger's extent on that axis.
pub fn resolve_unclamped(trigger: Rect, overlay: Size, placement: Placement) -> Point {
    if placement.side.is_vertical() {
        let y = match placement.side {
            Side::Top => trigger.y0 - overlay.height - placement.offset,
            _ => trigger.y1 + placement.offset,
        };
        let x = match placement.align {
            Align::Start => trigger.x0,
            Align::Center => trigger.x0 + trigger.width() / 2.0 - overlay.width / 2.0,
            Align::End => trigger.x1 - overlay.width,
        };
        Point::new(x, y)
    } else {
        let x = match placement.side {
            Side::Left => trigger.x0 - overlay.width - placement.offset,
            _ => trigger.x1 + placement.offset,
        };
        let y = match placement.align {
            Align::Start => trigger.y0,
            Align::Center => trigger.y0 + trigger.height() / 2.0 - overlay.height / 2.0,
            Align::End => trigger.y1 - overlay.height,
        };
        Point::new(x, y)
    }
}

/// Constrain an overlay origin so the overlay's full bounding box stays
/// inside `viewport` inset by `margin` on every edge.
///
/// Each axis applies the upper bound first and the lower bound last. When
/// the overlay is too large to fit, the bounds cross and the lower bound
/// wins: the leading edge pins to the margin and the overlay overflows the
/// trailing edge instead of disappearing off-screen. (`f64::clamp` would
/// panic on crossed bounds.)
pub fn clamp_to_viewport(origin: Point, overlay: Size, viewport: Rect, margin: f64) -> Point {
    let x = origin
        .x
        .min(viewport.x1 - overlay.width - margin)
        .max(viewport.x0 + margin);
    let y = origin
        .y
        .min(viewport.y1 - overlay.height - margin)
        .max(viewport.y0 + margin);
    Point::new(x, y)
}

/// Compute the clamped overlay origin for a placement request.
///
/// Equivalent to [`resolve_unclamped`] followed by [`clamp_to_viewport`]
/// with `placement.margin`. Pure and idempotent: identical inputs always
/// yield identical output.
pub fn resolve(trigger: Rect, overlay: Size, viewport: Rect, placement: Placement) -> Point {
    let origin = resolve_unclamped(trigger, overlay, placement);
    clamp_to_viewport(origin, overlay, viewport, placement.margin)
}
