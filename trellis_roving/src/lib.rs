// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trellis Roving: roving-tabindex navigation over a dynamic item collection.
//!
//! This crate models keyboard navigation inside composite widgets (tab lists, menus,
//! accordions, checkbox groups) as a combination of:
//! - An **item registry** ([`Registry`]) holding [`Item`]s in traversal order. Items
//!   register when their sub-component mounts and unregister when it unmounts.
//! - **Navigation intents** ([`Navigation`]) derived from arrow keys, Home/End, and
//!   PageUp/PageDown, interpreted through a [`NavConfig`] (orientation, text direction,
//!   and [`WrapMode`]).
//! - A pure stepping function, [`compute_next`], that skips disabled items and either
//!   wraps or stops at the ends.
//! - A stateful [`RovingGroup`] that keeps exactly one enabled item active (the single
//!   `tabindex=0` member), optionally runs typeahead, and reports what a key press did
//!   as a [`RovingOutcome`].
//!
//! ## Minimal example
//!
//! ```rust
//! use trellis_host::{Key, KeyEvent, Orientation};
//! use trellis_roving::{Item, NavConfig, RovingGroup, RovingOutcome, WrapMode};
//!
//! let mut group = RovingGroup::new(
//!     NavConfig::default()
//!         .with_orientation(Orientation::Vertical)
//!         .with_wrap(WrapMode::Never),
//! );
//! group.register(Item::new(1_u32)).unwrap();
//! group.register(Item::new(2_u32).with_disabled(true)).unwrap();
//! group.register(Item::new(3_u32)).unwrap();
//!
//! // ArrowDown skips the disabled item…
//! assert_eq!(
//!     group.on_key(&KeyEvent::new(Key::ArrowDown)),
//!     RovingOutcome::Moved { to: 3, activate: true },
//! );
//! // …and stops at the end because wrapping is off.
//! assert_eq!(group.on_key(&KeyEvent::new(Key::ArrowDown)), RovingOutcome::Unmoved);
//! assert_eq!(group.tab_index(&3), 0);
//! assert_eq!(group.tab_index(&1), -1);
//! ```
//!
//! The core types are generic over the item identifier `K`, so callers can use any small,
//! copyable handle.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod group;
mod navigation;
mod registry;

pub use group::{ActivationMode, RovingGroup, RovingOutcome, TabStops};
pub use navigation::{NavConfig, Navigation, WrapMode, compute_next, first_enabled, last_enabled};
pub use registry::{Item, Registry, RegistryError};
