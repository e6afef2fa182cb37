// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trellis Float: anchored placement for popovers, menus, and listboxes.
//!
//! - [`compute_position`] is a pure function from anchor rectangle, floating size, viewport,
//!   and a [`PositionRequest`] to a [`PositionResult`].
//! - [`Positioner`] runs that computation for an open floating element: it starts host
//!   observation through [`MeasureHost::observe`], recomputes on every
//!   [`update`](Positioner::update), applies results with [`MeasureHost::apply_position`],
//!   and stops observing when the element closes.
//!
//! ## Collision avoidance
//!
//! With [`PositionRequest::avoid_collisions`] set, the viewport is shrunk by
//! [`PositionRequest::collision_padding`] and:
//! - main-axis overflow flips to the opposite [`Side`]; when both sides overflow, the side
//!   with more room wins;
//! - the cross axis is shifted (never re-aligned) back inside the padded viewport, and
//!   [`PositionResult::clamped`] reports that it happened.
//!
//! ```rust
//! use kurbo::{Rect, Size};
//! use trellis_float::{Align, PositionRequest, Side, compute_position};
//!
//! let viewport = Rect::new(0.0, 0.0, 800.0, 600.0);
//! let trigger = Rect::new(100.0, 560.0, 200.0, 590.0);
//! let request = PositionRequest::default()
//!     .with_placement(Side::Bottom, Align::Start)
//!     .with_offsets(4.0, 0.0);
//!
//! // Not enough room below the trigger, so the menu opens upwards.
//! let placed = compute_position(trigger, Size::new(120.0, 200.0), viewport, &request);
//! assert_eq!(placed.side.as_str(), "top");
//! assert_eq!((placed.x, placed.y), (100.0, 356.0));
//! ```
//!
//! This crate is `no_std`.

#![no_std]

#[cfg(test)]
extern crate alloc;

mod compute;
mod positioner;
mod types;

pub use compute::compute_position;
pub use positioner::{MeasureHost, ObserverId, Positioner};
pub use types::{Align, ArrowPlacement, PositionRequest, PositionResult, Side};
