// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trellis Disclosure: open/selection state for headless, accessible widgets.
//!
//! Two coordinators own all widget state:
//! - [`Disclosure`] tracks which items of a multi-item widget are open (or selected). It
//!   enforces single/multiple cardinality and collapsibility, rejects disabled items, and
//!   drives roving keyboard navigation between the item triggers.
//! - [`BinaryDisclosure`] tracks one open/closed flag through the [`Presence`] lifecycle
//!   and sets up (or tears down) the focus trap and the floating positioner on the way.
//!   Floating widgets that share a [`FocusScope`] nest their focus traps.
//!
//! Both work in uncontrolled mode (changes are applied and the render
//! [`generation`](Disclosure::generation) increases) and in controlled mode (changes come
//! back as [`Update::Requested`] and take effect once the caller feeds them back).
//!
//! The widget families are thin layers on top:
//! [`Accordion`], [`Tabs`], [`Checkbox`]/[`CheckboxGroup`], [`Popover`], [`Menu`], and
//! [`Select`]. Each turns pointer and keyboard input into coordinator operations and
//! renders [`Attrs`] snapshots (ARIA and `data-*` attributes) for the view layer.
//!
//! ## Accordion walkthrough
//!
//! ```rust
//! use trellis_disclosure::{Accordion, DisclosureActions, Update, WidgetConfig};
//! use trellis_host::{Key, KeyEvent, Orientation};
//! use trellis_roving::Item;
//!
//! let config = WidgetConfig::new("faq").with_orientation(Orientation::Vertical);
//! let mut faq = Accordion::new(&config).with_default([1_u32]);
//! for id in 1..=3 {
//!     faq.register_item(Item::new(id)).unwrap();
//! }
//!
//! // Arrows only move focus between triggers…
//! let outcome = faq.on_trigger_key(1, &KeyEvent::new(Key::ArrowDown));
//! assert_eq!(outcome.focus, Some(2));
//! assert!(faq.is_open(&1));
//!
//! // …activation changes state.
//! assert_eq!(faq.click(2), Update::Applied);
//! assert_eq!(faq.values(), [2]);
//! assert_eq!(faq.trigger_attrs(&1).get("aria-expanded"), Some("false"));
//! assert_eq!(faq.trigger_attrs(&2).get("aria-expanded"), Some("true"));
//! assert_eq!(faq.content_attrs(&2).get("aria-labelledby"), Some("faq-trigger-2"));
//! ```
//!
//! Host interaction goes through a [`Surface`]: anything implementing both
//! [`FocusHost`](trellis_focus_trap::FocusHost) and
//! [`MeasureHost`](trellis_float::MeasureHost) with the same handle type. Host failures
//! are logged and swallowed; they never surface as errors.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod accordion;
mod actions;
mod attrs;
mod binary;
mod checkbox;
mod context;
mod disclosure;
mod error;
mod menu;
mod popover;
mod presence;
mod scope;
mod select;
mod selection;
mod tabs;

#[cfg(test)]
mod testing;

pub use accordion::Accordion;
pub use actions::{BinaryActions, DisclosureActions, KeyOutcome, Surface};
pub use attrs::{Attrs, DataState, bool_str};
pub use binary::BinaryDisclosure;
pub use checkbox::{CheckedState, Checkbox, CheckboxGroup};
pub use context::{SelectionMode, WidgetConfig, WidgetContext};
pub use disclosure::Disclosure;
pub use error::Error;
pub use menu::Menu;
pub use popover::Popover;
pub use presence::Presence;
pub use scope::FocusScope;
pub use select::Select;
pub use selection::{Selection, Update};
pub use tabs::Tabs;
