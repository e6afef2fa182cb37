// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Select: pick one value from a floating listbox.

use alloc::string::ToString;
use core::fmt::{Debug, Display};
use core::hash::Hash;

use trellis_float::{PositionRequest, PositionResult};
use trellis_focus_trap::TrapOptions;
use trellis_host::{Key, KeyEvent, Modifiers, Orientation};
use trellis_roving::{Item, NavConfig, Navigation, RovingGroup, RovingOutcome};
use trellis_typeahead::Typeahead;

use crate::actions::{BinaryActions, KeyOutcome, Surface};
use crate::attrs::{Attrs, DataState, bool_str};
use crate::binary::BinaryDisclosure;
use crate::context::{SelectionMode, WidgetConfig, WidgetContext};
use crate::error::Error;
use crate::presence::Presence;
use crate::scope::FocusScope;
use crate::selection::{Selection, Update};

/// Select state.
///
/// The value is single and never cleared by the user. While closed, typing on the trigger
/// changes the value directly. Opening highlights the selected option (or the first);
/// Enter or Space commits the highlighted option and closes, except that Space during a
/// typeahead search is part of the search.
#[derive(Clone, Debug)]
pub struct Select<H, K> {
    context: WidgetContext,
    binary: BinaryDisclosure<H>,
    options: RovingGroup<K>,
    value: Selection<K>,
    generation: u64,
}

impl<H, K> Select<H, K>
where
    H: Copy + Eq + Debug,
    K: Copy + Eq + Hash + Debug + Display,
{
    /// Create a closed select with no value. Navigation does not wrap unless `config`
    /// asks for it.
    pub fn new(config: &WidgetConfig) -> Self {
        let nav = NavConfig::default()
            .with_orientation(Orientation::Vertical)
            .with_dir(config.dir)
            .with_wrap(config.wrap);
        Self {
            context: config.context(),
            binary: BinaryDisclosure::new().with_trap_options(TrapOptions {
                auto_focus: false,
                return_focus: true,
            }),
            options: RovingGroup::new(nav).with_typeahead(Typeahead::new()),
            value: Selection::new(SelectionMode::Single, false),
            generation: 0,
        }
    }

    /// Set the initial value using builder pattern.
    pub fn with_default(mut self, value: K) -> Self {
        self.value = self.value.with_default([value]);
        self
    }

    /// Share a focus trap stack with other floating widgets using builder pattern.
    pub fn with_focus_scope(mut self, scope: FocusScope<H>) -> Self {
        self.binary = self.binary.with_focus_scope(scope);
        self
    }

    /// Hand ownership of the value to the caller using builder pattern.
    pub fn with_controlled(mut self, value: Option<K>) -> Self {
        self.value = self.value.with_default(value).with_controlled(true);
        self
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

    /// The underlying open/close coordinator.
    pub fn binary(&self) -> &BinaryDisclosure<H> {
        &self.binary
    }

    /// Mutable access to the coordinator (lifecycle callbacks, registration).
    pub fn binary_mut(&mut self) -> &mut BinaryDisclosure<H> {
        &mut self.binary
    }

    /// The options.
    pub fn options(&self) -> &RovingGroup<K> {
        &self.options
    }

    /// The selected value.
    pub fn value(&self) -> Option<K> {
        self.value.values().first().copied()
    }

    /// Render generation; increases on every applied value or lifecycle change.
    pub fn generation(&self) -> u64 {
        self.generation.wrapping_add(self.binary.generation())
    }

    /// Register an option.
    pub fn register_option(&mut self, item: Item<K>) -> Result<usize, Error> {
        Ok(self.options.register(item)?)
    }

    /// Remove an option.
    pub fn unregister_option(&mut self, id: &K) -> Option<Item<K>> {
        self.options.unregister(id)
    }

    /// The highlighted option while open.
    pub fn highlighted(&self) -> Option<K> {
        if self.binary.presence().is_open() {
            self.options.active()
        } else {
            None
        }
    }

    /// Pointer hover over an option.
    pub fn highlight(&mut self, id: &K) -> bool {
        self.options.set_active(id)
    }

    /// Choose `id`. Disabled and unknown options are rejected.
    pub fn commit(&mut self, id: K) -> Update<Option<K>> {
        if self.context.disabled || !self.options.registry().is_enabled(&id) {
            return Update::Unchanged;
        }
        let update = self.value.open(id);
        if update == Update::Applied {
            tracing::debug!(value = ?id, "select value changed");
            self.generation = self.generation.wrapping_add(1);
        }
        update.map(|values| values.first().copied())
    }

    /// Store the authoritative value (controlled mode).
    pub fn set_value(&mut self, value: Option<K>) -> bool {
        let changed = self.value.set_value(value);
        if changed {
            self.generation = self.generation.wrapping_add(1);
        }
        changed
    }

    /// Pointer activation of the trigger.
    pub fn click_trigger<S: Surface<H>>(&mut self, surface: &mut S) {
        if self.context.disabled {
            return;
        }
        if self.binary.presence().is_open() {
            self.set_open(surface, false);
        } else {
            self.open_highlighting(surface, Navigation::First);
        }
    }

    /// Pointer activation of an option: commit and close.
    pub fn click_option<S: Surface<H>>(&mut self, surface: &mut S, id: K) -> KeyOutcome<K, Option<K>> {
        if !self.options.registry().is_enabled(&id) {
            return KeyOutcome::handled();
        }
        let update = self.commit(id);
        self.set_open(surface, false);
        KeyOutcome::handled().with_activated(id).with_update(update)
    }

    /// Key press on the closed trigger.
    pub fn on_trigger_key<S: Surface<H>>(
        &mut self,
        surface: &mut S,
        event: &KeyEvent,
    ) -> KeyOutcome<K, Option<K>> {
        if self.context.disabled || self.binary.presence().is_open() {
            return KeyOutcome::ignored();
        }
        let now = event.timestamp_ms;
        if event.key == Key::Space
            && event.modifiers.difference(Modifiers::SHIFT).is_empty()
            && self.options.is_searching(now)
        {
            return self.type_to_select(' ', now);
        }
        if let Some(ch) = event.printable() {
            return self.type_to_select(ch, now);
        }
        if !event.modifiers.is_empty() {
            return KeyOutcome::ignored();
        }
        let fallback = match event.key {
            Key::Enter | Key::Space | Key::ArrowDown => Navigation::First,
            Key::ArrowUp => Navigation::Last,
            _ => return KeyOutcome::ignored(),
        };
        let focus = self.open_highlighting(surface, fallback);
        KeyOutcome::handled().with_focus(focus)
    }

    /// Key press inside the open listbox.
    pub fn on_content_key<S: Surface<H>>(
        &mut self,
        surface: &mut S,
        event: &KeyEvent,
    ) -> KeyOutcome<K, Option<K>> {
        if !self.binary.presence().is_open() {
            return KeyOutcome::ignored();
        }
        match event.key {
            Key::Escape => {
                self.set_open(surface, false);
                return KeyOutcome::handled();
            }
            // Focus stays in the listbox until it closes.
            Key::Tab => return KeyOutcome::handled(),
            Key::Enter => return self.commit_highlighted(surface),
            Key::Space if !self.options.is_searching(event.timestamp_ms) => {
                return self.commit_highlighted(surface);
            }
            _ => {}
        }
        match self.options.on_key(event) {
            RovingOutcome::Moved { to, .. } => KeyOutcome::handled().with_focus(Some(to)),
            RovingOutcome::Unmoved => KeyOutcome::handled(),
            RovingOutcome::Exit | RovingOutcome::Ignored => KeyOutcome::ignored(),
        }
    }

    /// Re-measure while open.
    pub fn reposition<S: Surface<H>>(&mut self, surface: &mut S) -> Option<PositionResult> {
        self.binary.reposition(surface)
    }

    /// Attributes of the trigger (a combobox button).
    pub fn trigger_attrs(&self) -> Attrs {
        let presence = self.binary.presence();
        Attrs::new()
            .with("id", self.context.sole_trigger_id())
            .with("role", "combobox")
            .with("aria-haspopup", "listbox")
            .with("aria-expanded", bool_str(presence.is_open()))
            .with("aria-controls", self.context.sole_content_id())
            .with("data-state", presence.data_state().as_str())
            .with_flag("data-placeholder", self.value().is_none())
            .with_disabled(self.context.disabled)
    }

    /// Attributes of the listbox.
    pub fn content_attrs(&self) -> Attrs {
        let mut attrs = Attrs::new()
            .with("id", self.context.sole_content_id())
            .with("role", "listbox")
            .with("aria-labelledby", self.context.sole_trigger_id())
            .with("data-state", self.binary.presence().data_state().as_str());
        if let Some(position) = self.binary.position() {
            attrs.set("data-side", position.side.as_str());
            attrs.set("data-align", position.align.as_str());
        }
        attrs
    }

    /// Attributes of the option `id`.
    pub fn option_attrs(&self, id: &K) -> Attrs {
        let selected = self.value().as_ref() == Some(id);
        let state = if selected { DataState::Checked } else { DataState::Unchecked };
        Attrs::new()
            .with("id", self.context.item_id(id))
            .with("role", "option")
            .with("aria-selected", bool_str(selected))
            .with("data-state", state.as_str())
            .with("tabindex", self.options.tab_index(id).to_string())
            .with_flag("data-highlighted", self.highlighted().as_ref() == Some(id))
            .with_disabled(!self.options.registry().is_enabled(id))
    }

    fn type_to_select(&mut self, ch: char, now: u64) -> KeyOutcome<K, Option<K>> {
        if let Some(value) = self.value() {
            self.options.set_active(&value);
        }
        match self.options.on_char(ch, now) {
            RovingOutcome::Moved { to, .. } => {
                let update = self.commit(to);
                KeyOutcome::handled().with_activated(to).with_update(update)
            }
            RovingOutcome::Unmoved => KeyOutcome::handled(),
            RovingOutcome::Exit | RovingOutcome::Ignored => KeyOutcome::ignored(),
        }
    }

    fn open_highlighting<S: Surface<H>>(&mut self, surface: &mut S, fallback: Navigation) -> Option<K> {
        self.set_open(surface, true);
        match self.value() {
            Some(value) if self.options.set_active(&value) => Some(value),
            _ => self.options.navigate(fallback),
        }
    }

    fn commit_highlighted<S: Surface<H>>(&mut self, surface: &mut S) -> KeyOutcome<K, Option<K>> {
        match self.highlighted() {
            Some(id) => self.click_option(surface, id),
            None => KeyOutcome::handled(),
        }
    }
}

impl<H, K> BinaryActions<H> for Select<H, K>
where
    H: Copy + Eq + Debug,
    K: Copy + Eq + Hash + Debug + Display,
{
    fn set_open<S: Surface<H>>(&mut self, surface: &mut S, open: bool) -> Update<bool> {
        let update = self.binary.set_open(surface, open);
        if update.is_changed() {
            self.options.reset_typeahead();
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

    fn fruit(surface: &mut FakeSurface) -> Select<u32, u32> {
        let mut select = Select::new(&WidgetConfig::new("fruit").with_wrap(false));
        select.binary_mut().register_trigger(TRIGGER);
        select.binary_mut().register_content(surface, CONTENT);
        for (id, label) in [(1, "Apple"), (2, "Banana"), (3, "Blueberry"), (4, "Cherry")] {
            select.register_option(Item::new(id).with_label(label)).unwrap();
        }
        surface.focused = Some(TRIGGER);
        select
    }

    fn key(key: Key) -> KeyEvent {
        KeyEvent::new(key)
    }

    #[test]
    fn closed_typeahead_changes_the_value() {
        let mut surface = FakeSurface::new();
        let mut s = fruit(&mut surface);
        let outcome = s.on_trigger_key(&mut surface, &KeyEvent::new(Key::Character('b')).at(10));
        assert_eq!(outcome.update, Update::Applied);
        assert_eq!(s.value(), Some(2));
        s.on_trigger_key(&mut surface, &KeyEvent::new(Key::Character('b')).at(20));
        assert_eq!(s.value(), Some(3));
        assert_eq!(s.presence(), Presence::Closed);
        assert!(!s.trigger_attrs().contains("data-placeholder"));
    }

    #[test]
    fn opening_highlights_the_selected_option() {
        let mut surface = FakeSurface::new();
        let mut s = fruit(&mut surface).with_default(3);
        let outcome = s.on_trigger_key(&mut surface, &key(Key::Enter));
        assert_eq!(outcome.focus, Some(3));
        assert_eq!(s.highlighted(), Some(3));
        assert_eq!(s.option_attrs(&3).get("aria-selected"), Some("true"));
        assert_eq!(s.content_attrs().get("role"), Some("listbox"));
    }

    #[test]
    fn opening_without_value_highlights_first_or_last() {
        let mut surface = FakeSurface::new();
        let mut s = fruit(&mut surface);
        assert_eq!(s.on_trigger_key(&mut surface, &key(Key::ArrowUp)).focus, Some(4));
        s.on_content_key(&mut surface, &key(Key::Escape));
        assert_eq!(s.presence(), Presence::Closed);
        assert_eq!(s.value(), None);
        assert_eq!(s.on_trigger_key(&mut surface, &key(Key::Space)).focus, Some(1));
    }

    #[test]
    fn enter_commits_and_closes() {
        let mut surface = FakeSurface::new();
        let mut s = fruit(&mut surface);
        s.on_trigger_key(&mut surface, &key(Key::ArrowDown));
        s.on_content_key(&mut surface, &key(Key::ArrowDown));
        let outcome = s.on_content_key(&mut surface, &key(Key::Enter));
        assert_eq!(outcome.activated, Some(2));
        assert_eq!(outcome.update, Update::Applied);
        assert_eq!(s.value(), Some(2));
        assert_eq!(s.presence(), Presence::Closed);
        assert_eq!(surface.focused, Some(TRIGGER));
    }

    #[test]
    fn no_wrap_stops_at_the_end() {
        let mut surface = FakeSurface::new();
        let mut s = fruit(&mut surface);
        s.on_trigger_key(&mut surface, &key(Key::ArrowUp));
        let outcome = s.on_content_key(&mut surface, &key(Key::ArrowDown));
        assert!(outcome.is_handled());
        assert_eq!(outcome.focus, None);
        assert_eq!(s.highlighted(), Some(4));
    }

    #[test]
    fn space_during_search_is_a_search_character() {
        let mut surface = FakeSurface::new();
        let mut s = fruit(&mut surface);
        s.on_trigger_key(&mut surface, &key(Key::Enter));
        s.on_content_key(&mut surface, &KeyEvent::new(Key::Character('c')).at(100));
        assert_eq!(s.highlighted(), Some(4));

        let outcome = s.on_content_key(&mut surface, &KeyEvent::new(Key::Space).at(200));
        assert_eq!(outcome.activated, None);
        assert_eq!(s.presence(), Presence::Open);
        assert_eq!(s.value(), None);
    }

    #[test]
    fn controlled_value_is_requested() {
        let mut surface = FakeSurface::new();
        let mut s = fruit(&mut surface).with_controlled(Some(1));
        let outcome = s.click_option(&mut surface, 4);
        assert_eq!(outcome.update, Update::Requested(Some(4)));
        assert_eq!(s.value(), Some(1));
        assert!(s.set_value(Some(4)));
        assert_eq!(s.value(), Some(4));
    }

    #[test]
    fn disabled_options_are_rejected() {
        let mut surface = FakeSurface::new();
        let mut s = fruit(&mut surface);
        s.options.set_disabled(&2, true);
        assert_eq!(s.commit(2), Update::Unchanged);
        s.click_trigger(&mut surface);
        let outcome = s.click_option(&mut surface, 2);
        assert_eq!(outcome.activated, None);
        assert_eq!(s.presence(), Presence::Open);
    }
}
