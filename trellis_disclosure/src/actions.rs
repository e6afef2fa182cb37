// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Capability traits and event responses shared by the widget families.

use alloc::vec::Vec;

use trellis_float::MeasureHost;
use trellis_focus_trap::FocusHost;
use trellis_host::EventResult;

use crate::presence::Presence;
use crate::selection::Update;

/// A host that can both move focus and measure elements, using one handle type.
pub trait Surface<H>: FocusHost<Handle = H> + MeasureHost<Handle = H> {}

impl<H, T> Surface<H> for T where T: FocusHost<Handle = H> + MeasureHost<Handle = H> {}

/// State operations of multi-item disclosure widgets (accordion, checkbox group).
pub trait DisclosureActions<K> {
    /// Flip `id`.
    fn toggle(&mut self, id: K) -> Update<Vec<K>>;
    /// Open `id`. Idempotent.
    fn open(&mut self, id: K) -> Update<Vec<K>>;
    /// Close `id`. Idempotent.
    fn close(&mut self, id: K) -> Update<Vec<K>>;
    /// Whether `id` is open.
    fn is_open(&self, id: &K) -> bool;
}

/// State operations of binary widgets (popover, menu, select).
pub trait BinaryActions<H> {
    /// Request the open state.
    fn set_open<S: Surface<H>>(&mut self, surface: &mut S, open: bool) -> Update<bool>;
    /// Logical open state.
    fn is_open(&self) -> bool;
    /// Lifecycle state.
    fn presence(&self) -> Presence;

    /// Request the opposite of the current open state.
    fn toggle<S: Surface<H>>(&mut self, surface: &mut S) -> Update<bool> {
        let open = !self.is_open();
        self.set_open(surface, open)
    }
}

/// What a key press did to a widget.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyOutcome<K, V> {
    /// Whether the host should suppress the key's default action.
    pub result: EventResult,
    /// Element the host should focus next.
    pub focus: Option<K>,
    /// Item the key activated (toggled trigger, chosen menu item, committed option).
    pub activated: Option<K>,
    /// State change caused by the key.
    pub update: Update<V>,
}

impl<K, V> KeyOutcome<K, V> {
    /// The key was not for this widget.
    pub fn ignored() -> Self {
        Self {
            result: EventResult::Ignored,
            focus: None,
            activated: None,
            update: Update::Unchanged,
        }
    }

    /// The key was consumed without other effect.
    pub fn handled() -> Self {
        Self {
            result: EventResult::Handled,
            ..Self::ignored()
        }
    }

    /// Whether the host should suppress the key's default action.
    pub fn is_handled(&self) -> bool {
        self.result.is_handled()
    }

    /// Set the focus target using builder pattern.
    pub fn with_focus(mut self, focus: Option<K>) -> Self {
        self.focus = focus;
        self
    }

    /// Set the activated item using builder pattern.
    pub fn with_activated(mut self, activated: K) -> Self {
        self.activated = Some(activated);
        self
    }

    /// Set the state change using builder pattern.
    pub fn with_update(mut self, update: Update<V>) -> Self {
        self.update = update;
        self
    }
}
