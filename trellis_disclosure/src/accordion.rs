// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Accordion: a stack of disclosure sections.

use alloc::string::ToString;
use alloc::vec::Vec;
use core::fmt::{Debug, Display};
use core::hash::Hash;

use trellis_host::{Key, KeyEvent};
use trellis_roving::{Item, RovingOutcome, TabStops};

use crate::actions::{DisclosureActions, KeyOutcome};
use crate::attrs::{Attrs, DataState, bool_str};
use crate::context::WidgetConfig;
use crate::disclosure::Disclosure;
use crate::error::Error;
use crate::selection::Update;

/// Accordion state.
///
/// Every enabled trigger is a tab stop; arrows move between triggers without changing
/// which sections are open. Enter, Space, and click toggle.
#[derive(Clone, Debug)]
pub struct Accordion<K> {
    disclosure: Disclosure<K>,
}

impl<K: Copy + Eq + Hash + Debug + Display> Accordion<K> {
    /// Create an accordion from `config`.
    pub fn new(config: &WidgetConfig) -> Self {
        Self {
            disclosure: Disclosure::new(config).with_tab_stops(TabStops::All),
        }
    }

    /// Open sections initially using builder pattern.
    pub fn with_default(mut self, values: impl IntoIterator<Item = K>) -> Self {
        self.disclosure = self.disclosure.with_default(values);
        self
    }

    /// Hand state ownership to the caller using builder pattern.
    pub fn with_controlled(mut self, values: impl IntoIterator<Item = K>) -> Self {
        self.disclosure = self.disclosure.with_controlled(values);
        self
    }

    /// The underlying coordinator.
    pub fn disclosure(&self) -> &Disclosure<K> {
        &self.disclosure
    }

    /// Mutable access to the coordinator.
    pub fn disclosure_mut(&mut self) -> &mut Disclosure<K> {
        &mut self.disclosure
    }

    /// Register a section.
    pub fn register_item(&mut self, item: Item<K>) -> Result<Option<usize>, Error> {
        self.disclosure.register_item(item)
    }

    /// Remove a section.
    pub fn unregister_item(&mut self, id: &K) -> Option<Item<K>> {
        self.disclosure.unregister_item(id)
    }

    /// Open section ids.
    pub fn values(&self) -> &[K] {
        self.disclosure.values()
    }

    /// Pointer activation of a trigger.
    pub fn click(&mut self, id: K) -> Update<Vec<K>> {
        self.disclosure.toggle(id)
    }

    /// Key press on the trigger of `id`.
    pub fn on_trigger_key(&mut self, id: K, event: &KeyEvent) -> KeyOutcome<K, Vec<K>> {
        if matches!(event.key, Key::Enter | Key::Space) {
            if !event.modifiers.is_empty() {
                return KeyOutcome::ignored();
            }
            // Disabled triggers swallow activation.
            let update = self.disclosure.toggle(id);
            let outcome = KeyOutcome::handled();
            return if update.is_changed() {
                outcome.with_activated(id).with_update(update)
            } else {
                outcome
            };
        }
        match self.disclosure.navigate_from(&id, event) {
            RovingOutcome::Moved { to, .. } => KeyOutcome::handled().with_focus(Some(to)),
            RovingOutcome::Unmoved => KeyOutcome::handled(),
            RovingOutcome::Exit | RovingOutcome::Ignored => KeyOutcome::ignored(),
        }
    }

    /// Attributes of the root element.
    pub fn root_attrs(&self) -> Attrs {
        let ctx = self.disclosure.context();
        let attrs = Attrs::new().with("id", ctx.id.as_str());
        let attrs = match ctx.orientation {
            Some(orientation) => attrs.with("data-orientation", orientation.as_str()),
            None => attrs,
        };
        attrs.with_flag("data-disabled", ctx.disabled)
    }

    /// Attributes of the trigger button of `id`.
    pub fn trigger_attrs(&self, id: &K) -> Attrs {
        let ctx = self.disclosure.context();
        let open = self.disclosure.is_open(id);
        let mut attrs = Attrs::new()
            .with("id", ctx.trigger_id(id))
            .with("aria-expanded", bool_str(open))
            .with("aria-controls", ctx.content_id(id))
            .with("data-state", DataState::open(open).as_str())
            .with("tabindex", self.disclosure.tab_index(id).to_string())
            .with_disabled(self.disclosure.is_disabled(id));
        if let Some(orientation) = ctx.orientation {
            attrs.set("data-orientation", orientation.as_str());
        }
        attrs
    }

    /// Attributes of the content region of `id`.
    pub fn content_attrs(&self, id: &K) -> Attrs {
        let ctx = self.disclosure.context();
        let open = self.disclosure.is_open(id);
        Attrs::new()
            .with("id", ctx.content_id(id))
            .with("role", "region")
            .with("aria-labelledby", ctx.trigger_id(id))
            .with("data-state", DataState::open(open).as_str())
            .with_flag("data-disabled", self.disclosure.is_disabled(id))
            .with_flag("hidden", !open)
    }
}

impl<K: Copy + Eq + Hash + Debug + Display> DisclosureActions<K> for Accordion<K> {
    fn toggle(&mut self, id: K) -> Update<Vec<K>> {
        self.disclosure.toggle(id)
    }

    fn open(&mut self, id: K) -> Update<Vec<K>> {
        self.disclosure.open(id)
    }

    fn close(&mut self, id: K) -> Update<Vec<K>> {
        self.disclosure.close(id)
    }

    fn is_open(&self, id: &K) -> bool {
        self.disclosure.is_open(id)
    }
}
