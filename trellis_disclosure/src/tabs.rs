// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tabs: one selected tab, one visible panel.

use alloc::string::ToString;
use alloc::vec::Vec;
use core::fmt::{Debug, Display};
use core::hash::Hash;

use trellis_host::{Key, KeyEvent, Orientation};
use trellis_roving::{Item, RovingOutcome};

use crate::actions::{DisclosureActions, KeyOutcome};
use crate::attrs::{Attrs, DataState, bool_str};
use crate::context::{SelectionMode, WidgetConfig};
use crate::disclosure::Disclosure;
use crate::error::Error;
use crate::selection::Update;

/// Tab list state.
///
/// Selection is always single and never collapses. In automatic activation, moving focus
/// selects; in manual activation, Enter or Space on the focused tab selects.
#[derive(Clone, Debug)]
pub struct Tabs<K> {
    disclosure: Disclosure<K>,
    orientation: Orientation,
}

impl<K: Copy + Eq + Hash + Debug + Display> Tabs<K> {
    /// Create a tab list. Orientation defaults to horizontal; mode and collapsibility from
    /// `config` are overridden.
    pub fn new(config: &WidgetConfig) -> Self {
        let orientation = config.orientation.unwrap_or(Orientation::Horizontal);
        let config = config
            .clone()
            .with_mode(SelectionMode::Single)
            .with_collapsible(false)
            .with_orientation(orientation);
        Self {
            disclosure: Disclosure::new(&config),
            orientation,
        }
    }

    /// Select a tab initially using builder pattern.
    pub fn with_default(mut self, value: K) -> Self {
        self.disclosure = self.disclosure.with_default([value]);
        self
    }

    /// Hand state ownership to the caller using builder pattern.
    pub fn with_controlled(mut self, value: Option<K>) -> Self {
        self.disclosure = self.disclosure.with_controlled(value);
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

    /// The selected tab.
    pub fn selected(&self) -> Option<K> {
        self.disclosure.values().first().copied()
    }

    /// Register a tab. The selected tab becomes the roving tab stop.
    pub fn register_item(&mut self, item: Item<K>) -> Result<Option<usize>, Error> {
        let id = item.id;
        let position = self.disclosure.register_item(item)?;
        if position.is_some() && self.selected() == Some(id) {
            self.disclosure.group_mut().set_active(&id);
        }
        Ok(position)
    }

    /// Remove a tab.
    pub fn unregister_item(&mut self, id: &K) -> Option<Item<K>> {
        self.disclosure.unregister_item(id)
    }

    /// Select `id`.
    pub fn select(&mut self, id: K) -> Update<Vec<K>> {
        let update = self.disclosure.open(id);
        if update == Update::Applied {
            self.disclosure.group_mut().set_active(&id);
        }
        update
    }

    /// Store the authoritative selection (controlled mode).
    pub fn set_value(&mut self, value: K) -> bool {
        let changed = self.disclosure.set_value([value]);
        if changed {
            self.disclosure.group_mut().set_active(&value);
        }
        changed
    }

    /// Pointer activation of a tab.
    pub fn click(&mut self, id: K) -> Update<Vec<K>> {
        self.select(id)
    }

    /// Key press on the tab `id`.
    pub fn on_key(&mut self, id: K, event: &KeyEvent) -> KeyOutcome<K, Vec<K>> {
        if matches!(event.key, Key::Enter | Key::Space) && event.modifiers.is_empty() {
            let update = self.select(id);
            return if update.is_changed() {
                KeyOutcome::handled().with_activated(id).with_update(update)
            } else {
                KeyOutcome::handled()
            };
        }
        match self.disclosure.navigate_from(&id, event) {
            RovingOutcome::Moved { to, activate } => {
                let outcome = KeyOutcome::handled().with_focus(Some(to));
                if !activate {
                    return outcome;
                }
                let update = self.select(to);
                if update.is_changed() {
                    outcome.with_activated(to).with_update(update)
                } else {
                    outcome
                }
            }
            RovingOutcome::Unmoved => KeyOutcome::handled(),
            RovingOutcome::Exit | RovingOutcome::Ignored => KeyOutcome::ignored(),
        }
    }

    /// Attributes of the tab list element.
    pub fn list_attrs(&self) -> Attrs {
        Attrs::new()
            .with("role", "tablist")
            .with("aria-orientation", self.orientation.as_str())
            .with("data-orientation", self.orientation.as_str())
    }

    /// Attributes of the tab `id`.
    pub fn tab_attrs(&self, id: &K) -> Attrs {
        let ctx = self.disclosure.context();
        let selected = self.disclosure.is_open(id);
        let state = if selected { DataState::Active } else { DataState::Inactive };
        Attrs::new()
            .with("id", ctx.trigger_id(id))
            .with("role", "tab")
            .with("aria-selected", bool_str(selected))
            .with("aria-controls", ctx.content_id(id))
            .with("data-state", state.as_str())
            .with("data-orientation", self.orientation.as_str())
            .with("tabindex", self.disclosure.tab_index(id).to_string())
            .with_disabled(self.disclosure.is_disabled(id))
    }

    /// Attributes of the panel for `id`.
    pub fn panel_attrs(&self, id: &K) -> Attrs {
        let ctx = self.disclosure.context();
        let selected = self.disclosure.is_open(id);
        let state = if selected { DataState::Active } else { DataState::Inactive };
        Attrs::new()
            .with("id", ctx.content_id(id))
            .with("role", "tabpanel")
            .with("aria-labelledby", ctx.trigger_id(id))
            .with("data-state", state.as_str())
            .with("data-orientation", self.orientation.as_str())
            .with("tabindex", "0")
            .with_flag("hidden", !selected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trellis_host::TextDirection;
    use trellis_roving::ActivationMode;

    fn tabs(config: WidgetConfig) -> Tabs<&'static str> {
        let mut tabs = Tabs::new(&config).with_default("account");
        for id in ["account", "password", "billing"] {
            tabs.register_item(Item::new(id)).unwrap();
        }
        tabs
    }

    #[test]
    fn automatic_activation_selects_on_focus() {
        let mut t = tabs(WidgetConfig::new("settings"));
        let outcome = t.on_key("account", &KeyEvent::new(Key::ArrowRight));
        assert_eq!(outcome.focus, Some("password"));
        assert_eq!(outcome.update, Update::Applied);
        assert_eq!(t.selected(), Some("password"));
        assert_eq!(t.tab_attrs(&"password").get("tabindex"), Some("0"));
        assert_eq!(t.tab_attrs(&"account").get("tabindex"), Some("-1"));
    }

    #[test]
    fn manual_activation_needs_enter() {
        let mut t = tabs(WidgetConfig::new("settings").with_activation(ActivationMode::Manual));
        let outcome = t.on_key("account", &KeyEvent::new(Key::ArrowRight));
        assert_eq!(outcome.focus, Some("password"));
        assert_eq!(outcome.update, Update::Unchanged);
        assert_eq!(t.selected(), Some("account"));

        let outcome = t.on_key("password", &KeyEvent::new(Key::Enter));
        assert_eq!(outcome.activated, Some("password"));
        assert_eq!(t.selected(), Some("password"));
    }

    #[test]
    fn selected_tab_never_collapses() {
        let mut t = tabs(WidgetConfig::new("settings").with_collapsible(true));
        assert_eq!(t.click("account"), Update::Unchanged);
        assert_eq!(t.selected(), Some("account"));
    }

    #[test]
    fn rtl_mirrors_arrows() {
        let mut t = tabs(WidgetConfig::new("settings").with_dir(TextDirection::Rtl));
        let outcome = t.on_key("account", &KeyEvent::new(Key::ArrowLeft));
        assert_eq!(outcome.focus, Some("password"));
        // Vertical arrows do nothing in a horizontal list.
        let outcome = t.on_key("password", &KeyEvent::new(Key::ArrowDown));
        assert_eq!(outcome.focus, None);
    }

    #[test]
    fn attributes() {
        let t = tabs(WidgetConfig::new("settings"));
        let tab = t.tab_attrs(&"account");
        assert_eq!(tab.get("role"), Some("tab"));
        assert_eq!(tab.get("aria-selected"), Some("true"));
        assert_eq!(tab.get("data-state"), Some("active"));
        assert_eq!(tab.get("aria-controls"), Some("settings-content-account"));

        let panel = t.panel_attrs(&"billing");
        assert_eq!(panel.get("role"), Some("tabpanel"));
        assert_eq!(panel.get("aria-labelledby"), Some("settings-trigger-billing"));
        assert_eq!(panel.get("data-state"), Some("inactive"));
        assert!(panel.contains("hidden"));
        assert_eq!(t.list_attrs().get("aria-orientation"), Some("horizontal"));
    }

    #[test]
    fn controlled_selection_follows_the_caller() {
        let mut t = Tabs::new(&WidgetConfig::new("s")).with_controlled(Some(1_u32));
        for id in 1..=2 {
            t.register_item(Item::new(id)).unwrap();
        }
        assert_eq!(t.click(2), Update::Requested(alloc::vec![2]));
        assert_eq!(t.selected(), Some(1));
        assert!(t.set_value(2));
        assert_eq!(t.selected(), Some(2));
        assert_eq!(t.tab_attrs(&2).get("tabindex"), Some("0"));
    }
}
