// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dropdown menu: a trigger and a floating list of actions.

use alloc::string::ToString;
use core::fmt::{Debug, Display};
use core::hash::Hash;

use trellis_float::{PositionRequest, PositionResult};
use trellis_focus_trap::TrapOptions;
use trellis_host::{Key, KeyEvent, Orientation};
use trellis_roving::{Item, NavConfig, Navigation, RovingGroup, RovingOutcome};
use trellis_typeahead::Typeahead;

use crate::actions::{BinaryActions, KeyOutcome, Surface};
use crate::attrs::{Attrs, bool_str};
use crate::binary::BinaryDisclosure;
use crate::context::{WidgetConfig, WidgetContext};
use crate::error::Error;
use crate::presence::Presence;
use crate::scope::FocusScope;
use crate::selection::Update;

/// Dropdown menu state.
///
/// Items form a vertical roving group with typeahead; wrapping follows the config.
/// Choosing an item closes the menu, and closing returns focus to whatever was focused
/// when it opened (normally the trigger). Tab closes the menu instead of cycling.
#[derive(Clone, Debug)]
pub struct Menu<H, K> {
    context: WidgetContext,
    binary: BinaryDisclosure<H>,
    items: RovingGroup<K>,
}

impl<H, K> Menu<H, K>
where
    H: Copy + Eq + Debug,
    K: Copy + Eq + Hash + Debug + Display,
{
    /// Create a closed menu.
    pub fn new(config: &WidgetConfig) -> Self {
        let nav = NavConfig::default()
            .with_orientation(Orientation::Vertical)
            .with_dir(config.dir)
            .with_wrap(config.wrap);
        Self {
            context: config.context(),
            binary: BinaryDisclosure::new().with_modal(false).with_trap_options(TrapOptions {
                auto_focus: false,
                return_focus: true,
            }),
            items: RovingGroup::new(nav).with_typeahead(Typeahead::new()),
        }
    }

    /// Wait for exit animations using builder pattern.
    pub fn with_animated(mut self, animated: bool) -> Self {
        self.binary = self.binary.with_animated(animated);
        self
    }

    /// Set placement preferences using builder pattern.
    pub fn with_position(mut self, request: PositionRequest) -> Self {
        self.binary = self.binary.with_position(request);
        self
    }

    /// Share a focus trap stack with other floating widgets using builder pattern.
    pub fn with_focus_scope(mut self, scope: FocusScope<H>) -> Self {
        self.binary = self.binary.with_focus_scope(scope);
        self
    }

    /// Hand ownership of the open state to the caller using builder pattern.
    pub fn with_controlled(mut self, controlled: bool) -> Self {
        self.binary = self.binary.with_controlled(controlled);
        self
    }

    /// The underlying coordinator.
    pub fn binary(&self) -> &BinaryDisclosure<H> {
        &self.binary
    }

    /// Mutable access to the coordinator (lifecycle callbacks, registration).
    pub fn binary_mut(&mut self) -> &mut BinaryDisclosure<H> {
        &mut self.binary
    }

    /// The menu items.
    pub fn items(&self) -> &RovingGroup<K> {
        &self.items
    }

    /// Register a menu item.
    pub fn register_item(&mut self, item: Item<K>) -> Result<usize, Error> {
        Ok(self.items.register(item)?)
    }

    /// Remove a menu item.
    pub fn unregister_item(&mut self, id: &K) -> Option<Item<K>> {
        self.items.unregister(id)
    }

    /// The highlighted item while open.
    pub fn highlighted(&self) -> Option<K> {
        if self.binary.presence().is_open() {
            self.items.active()
        } else {
            None
        }
    }

    /// Pointer hover over an item.
    pub fn highlight(&mut self, id: &K) -> bool {
        self.items.set_active(id)
    }

    /// Store the authoritative open state (controlled mode).
    pub fn set_value<S: Surface<H>>(&mut self, surface: &mut S, open: bool) -> bool {
        self.items.reset_typeahead();
        self.binary.set_value(surface, open)
    }

    /// Pointer activation of the trigger.
    pub fn click_trigger<S: Surface<H>>(&mut self, surface: &mut S) -> Update<bool> {
        if self.context.disabled {
            return Update::Unchanged;
        }
        self.toggle(surface)
    }

    /// Key press on the trigger. Enter, Space, and ArrowDown open on the first item;
    /// ArrowUp opens on the last.
    pub fn on_trigger_key<S: Surface<H>>(&mut self, surface: &mut S, event: &KeyEvent) -> KeyOutcome<K, bool> {
        if self.context.disabled || !event.modifiers.is_empty() {
            return KeyOutcome::ignored();
        }
        let start = match event.key {
            Key::Enter | Key::Space | Key::ArrowDown => Navigation::First,
            Key::ArrowUp => Navigation::Last,
            _ => return KeyOutcome::ignored(),
        };
        let update = self.set_open(surface, true);
        let focus = self.items.navigate(start);
        KeyOutcome::handled().with_focus(focus).with_update(update)
    }

    /// Key press inside the open menu.
    pub fn on_content_key<S: Surface<H>>(&mut self, surface: &mut S, event: &KeyEvent) -> KeyOutcome<K, bool> {
        if !self.binary.presence().is_open() {
            return KeyOutcome::ignored();
        }
        match event.key {
            Key::Escape => {
                return KeyOutcome::handled().with_update(self.set_open(surface, false));
            }
            Key::Tab => {
                let mut outcome = KeyOutcome::ignored();
                outcome.update = self.set_open(surface, false);
                return outcome;
            }
            Key::Enter => return self.choose_highlighted(surface),
            Key::Space if !self.items.is_searching(event.timestamp_ms) => {
                return self.choose_highlighted(surface);
            }
            _ => {}
        }
        match self.items.on_key(event) {
            RovingOutcome::Moved { to, .. } => KeyOutcome::handled().with_focus(Some(to)),
            RovingOutcome::Unmoved => KeyOutcome::handled(),
            RovingOutcome::Exit | RovingOutcome::Ignored => KeyOutcome::ignored(),
        }
    }

    /// Pointer activation of an item.
    pub fn click_item<S: Surface<H>>(&mut self, surface: &mut S, id: K) -> KeyOutcome<K, bool> {
        if !self.binary.presence().is_open() || !self.items.registry().is_enabled(&id) {
            return KeyOutcome::handled();
        }
        tracing::debug!(item = ?id, "menu item chosen");
        let update = self.set_open(surface, false);
        KeyOutcome::handled().with_activated(id).with_update(update)
    }

    /// Re-measure while open.
    pub fn reposition<S: Surface<H>>(&mut self, surface: &mut S) -> Option<PositionResult> {
        self.binary.reposition(surface)
    }

    /// Attributes of the trigger.
    pub fn trigger_attrs(&self) -> Attrs {
        let presence = self.binary.presence();
        Attrs::new()
            .with("id", self.context.sole_trigger_id())
            .with("aria-haspopup", "menu")
            .with("aria-expanded", bool_str(presence.is_open()))
            .with("aria-controls", self.context.sole_content_id())
            .with("data-state", presence.data_state().as_str())
            .with_disabled(self.context.disabled)
    }

    /// Attributes of the menu element.
    pub fn content_attrs(&self) -> Attrs {
        let mut attrs = Attrs::new()
            .with("id", self.context.sole_content_id())
            .with("role", "menu")
            .with("aria-orientation", Orientation::Vertical.as_str())
            .with("aria-labelledby", self.context.sole_trigger_id())
            .with("data-state", self.binary.presence().data_state().as_str());
        if let Some(position) = self.binary.position() {
            attrs.set("data-side", position.side.as_str());
            attrs.set("data-align", position.align.as_str());
        }
        attrs
    }

    /// Attributes of the item `id`.
    pub fn item_attrs(&self, id: &K) -> Attrs {
        let highlighted = self.highlighted().as_ref() == Some(id);
        let disabled = !self.items.registry().is_enabled(id);
        Attrs::new()
            .with("id", self.context.item_id(id))
            .with("role", "menuitem")
            .with("tabindex", self.items.tab_index(id).to_string())
            .with_flag("data-highlighted", highlighted)
            .with_disabled(disabled)
    }

    fn choose_highlighted<S: Surface<H>>(&mut self, surface: &mut S) -> KeyOutcome<K, bool> {
        match self.highlighted() {
            Some(id) => self.click_item(surface, id),
            None => KeyOutcome::handled(),
        }
    }
}

impl<H, K> BinaryActions<H> for Menu<H, K>
where
    H: Copy + Eq + Debug,
    K: Copy + Eq + Hash + Debug + Display,
{
    fn set_open<S: Surface<H>>(&mut self, surface: &mut S, open: bool) -> Update<bool> {
        let update = self.binary.set_open(surface, open);
        if update == Update::Applied {
            self.items.reset_typeahead();
        }
        update
    }

    fn is_open(&self) -> bool {
        self.binary.is_open()
    }

    fn presence(&self) -> Presence {
        self.binary.presence()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{CONTENT, FakeSurface, TRIGGER};
    use trellis_host::EventResult;

    fn menu(surface: &mut FakeSurface) -> Menu<u32, u32> {
        let mut menu = Menu::new(&WidgetConfig::new("file"));
        menu.binary_mut().register_trigger(TRIGGER);
        menu.binary_mut().register_content(surface, CONTENT);
        for (id, label) in [(1, "New"), (2, "Open"), (3, "Save"), (4, "Save As")] {
            menu.register_item(Item::new(id).with_label(label)).unwrap();
        }
        menu.items.set_disabled(&2, true);
        surface.focused = Some(TRIGGER);
        menu
    }

    fn key(key: Key) -> KeyEvent {
        KeyEvent::new(key)
    }

    #[test]
    fn arrow_up_opens_on_the_last_item() {
        let mut surface = FakeSurface::new();
        let mut m = menu(&mut surface);
        let outcome = m.on_trigger_key(&mut surface, &key(Key::ArrowUp));
        assert_eq!(outcome.update, Update::Applied);
        assert_eq!(outcome.focus, Some(4));
        assert_eq!(m.highlighted(), Some(4));
        assert_eq!(m.trigger_attrs().get("aria-expanded"), Some("true"));
        assert_eq!(m.item_attrs(&4).get("data-highlighted"), Some(""));
    }

    #[test]
    fn enter_opens_on_the_first_item_and_arrows_loop() {
        let mut surface = FakeSurface::new();
        let mut m = menu(&mut surface);
        assert_eq!(m.on_trigger_key(&mut surface, &key(Key::Enter)).focus, Some(1));
        assert_eq!(m.on_content_key(&mut surface, &key(Key::ArrowDown)).focus, Some(3));
        m.on_content_key(&mut surface, &key(Key::ArrowDown));
        assert_eq!(m.on_content_key(&mut surface, &key(Key::ArrowDown)).focus, Some(1));
    }

    #[test]
    fn choosing_an_item_closes_and_restores_focus() {
        let mut surface = FakeSurface::new();
        let mut m = menu(&mut surface);
        m.on_trigger_key(&mut surface, &key(Key::ArrowDown));
        surface.focused = Some(CONTENT);
        let outcome = m.on_content_key(&mut surface, &key(Key::End));
        assert_eq!(outcome.focus, Some(4));

        let outcome = m.on_content_key(&mut surface, &key(Key::Enter));
        assert_eq!(outcome.activated, Some(4));
        assert_eq!(m.presence(), Presence::Closed);
        assert_eq!(surface.focused, Some(TRIGGER));
        assert!(m.highlighted().is_none());
    }

    #[test]
    fn disabled_items_cannot_be_chosen() {
        let mut surface = FakeSurface::new();
        let mut m = menu(&mut surface);
        m.click_trigger(&mut surface);
        let outcome = m.click_item(&mut surface, 2);
        assert_eq!(outcome.activated, None);
        assert_eq!(m.presence(), Presence::Open);
        assert_eq!(m.item_attrs(&2).get("aria-disabled"), Some("true"));
    }

    #[test]
    fn typeahead_and_space_while_searching() {
        let mut surface = FakeSurface::new();
        let mut m = menu(&mut surface);
        m.on_trigger_key(&mut surface, &key(Key::Enter));

        let s = KeyEvent::new(Key::Character('s')).at(1_000);
        assert_eq!(m.on_content_key(&mut surface, &s).focus, Some(3));
        // Space joins the search instead of choosing the highlighted item.
        let space = KeyEvent::new(Key::Space).at(1_100);
        let outcome = m.on_content_key(&mut surface, &space);
        assert_eq!(outcome.result, EventResult::Handled);
        assert_eq!(outcome.activated, None);
        assert_eq!(m.presence(), Presence::Open);
        assert_eq!(m.highlighted(), Some(3));

        // Once the search has lapsed, Space chooses.
        let late = KeyEvent::new(Key::Space).at(5_000);
        assert_eq!(m.on_content_key(&mut surface, &late).activated, Some(3));
    }

    #[test]
    fn escape_and_tab_close() {
        let mut surface = FakeSurface::new();
        let mut m = menu(&mut surface);
        m.on_trigger_key(&mut surface, &key(Key::Space));
        let outcome = m.on_content_key(&mut surface, &key(Key::Escape));
        assert_eq!(outcome.update, Update::Applied);
        assert_eq!(m.presence(), Presence::Closed);

        m.on_trigger_key(&mut surface, &key(Key::Space));
        let outcome = m.on_content_key(&mut surface, &key(Key::Tab));
        assert_eq!(outcome.result, EventResult::Ignored);
        assert!(!m.is_open());
    }
}
