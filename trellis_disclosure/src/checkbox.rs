// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tri-state checkbox and checkbox group.
//!
//! Checkboxes toggle on Space only; Enter is consumed without effect.

use alloc::string::ToString;
use alloc::vec::Vec;
use core::fmt::{Debug, Display};
use core::hash::Hash;

use trellis_host::{EventResult, Key, KeyEvent};
use trellis_roving::{Item, RovingOutcome};

use crate::actions::{DisclosureActions, KeyOutcome};
use crate::attrs::{Attrs, DataState};
use crate::context::{SelectionMode, WidgetConfig};
use crate::disclosure::Disclosure;
use crate::error::Error;
use crate::selection::Update;

/// Value of a tri-state checkbox.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum CheckedState {
    /// Not checked.
    #[default]
    Unchecked,
    /// Checked.
    Checked,
    /// Mixed; toggling it checks.
    Indeterminate,
}

impl CheckedState {
    /// The state after one toggle.
    pub fn toggled(self) -> Self {
        match self {
            Self::Checked => Self::Unchecked,
            Self::Unchecked | Self::Indeterminate => Self::Checked,
        }
    }

    /// The `aria-checked` value.
    pub fn aria_checked(self) -> &'static str {
        match self {
            Self::Checked => "true",
            Self::Unchecked => "false",
            Self::Indeterminate => "mixed",
        }
    }

    /// The `data-state` value.
    pub fn data_state(self) -> DataState {
        match self {
            Self::Checked => DataState::Checked,
            Self::Unchecked => DataState::Unchecked,
            Self::Indeterminate => DataState::Indeterminate,
        }
    }
}

impl From<bool> for CheckedState {
    fn from(checked: bool) -> Self {
        if checked { Self::Checked } else { Self::Unchecked }
    }
}

/// Whether a key toggles a checkbox: plain Space does, Enter is swallowed.
fn checkbox_key(event: &KeyEvent) -> Option<bool> {
    if !event.modifiers.is_empty() {
        return None;
    }
    match event.key {
        Key::Space => Some(true),
        Key::Enter => Some(false),
        _ => None,
    }
}

/// A standalone checkbox.
#[derive(Clone, Debug, Default)]
pub struct Checkbox {
    state: CheckedState,
    disabled: bool,
    controlled: bool,
    generation: u64,
}

impl Checkbox {
    /// An unchecked, uncontrolled checkbox.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the initial state using builder pattern.
    pub fn with_default(mut self, state: CheckedState) -> Self {
        self.state = state;
        self
    }

    /// Set the disabled flag using builder pattern.
    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Hand state ownership to the caller using builder pattern.
    pub fn with_controlled(mut self, controlled: bool) -> Self {
        self.controlled = controlled;
        self
    }

    /// Current state.
    pub fn state(&self) -> CheckedState {
        self.state
    }

    /// Render generation; increases on every applied change.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Enable or disable.
    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }

    /// Flip the state (`mixed` goes to checked).
    pub fn toggle(&mut self) -> Update<CheckedState> {
        if self.disabled {
            return Update::Unchanged;
        }
        let next = self.state.toggled();
        if self.controlled {
            return Update::Requested(next);
        }
        self.apply(next);
        Update::Applied
    }

    /// Store the authoritative state (controlled mode).
    pub fn set_value(&mut self, state: CheckedState) -> bool {
        if self.state == state {
            return false;
        }
        self.apply(state);
        true
    }

    /// Pointer activation.
    pub fn click(&mut self) -> Update<CheckedState> {
        self.toggle()
    }

    /// Key press on the checkbox.
    pub fn on_key(&mut self, event: &KeyEvent) -> (EventResult, Update<CheckedState>) {
        match checkbox_key(event) {
            Some(true) => (EventResult::Handled, self.toggle()),
            Some(false) => (EventResult::Handled, Update::Unchanged),
            None => (EventResult::Ignored, Update::Unchanged),
        }
    }

    /// Attributes of the checkbox element.
    pub fn attrs(&self) -> Attrs {
        Attrs::new()
            .with("role", "checkbox")
            .with("aria-checked", self.state.aria_checked())
            .with("data-state", self.state.data_state().as_str())
            .with_disabled(self.disabled)
    }

    fn apply(&mut self, state: CheckedState) {
        tracing::debug!(from = ?self.state, to = ?state, "checkbox changed");
        self.state = state;
        self.generation = self.generation.wrapping_add(1);
    }
}

/// A set of checkboxes sharing one multi-select value.
///
/// The members form a roving group, so the whole set is a single tab stop.
#[derive(Clone, Debug)]
pub struct CheckboxGroup<K> {
    disclosure: Disclosure<K>,
}

impl<K: Copy + Eq + Hash + Debug + Display> CheckboxGroup<K> {
    /// Create a group. The mode from `config` is overridden to multiple.
    pub fn new(config: &WidgetConfig) -> Self {
        let config = config.clone().with_mode(SelectionMode::Multiple);
        Self {
            disclosure: Disclosure::new(&config),
        }
    }

    /// Check members initially using builder pattern.
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

    /// Register a member checkbox.
    pub fn register_item(&mut self, item: Item<K>) -> Result<Option<usize>, Error> {
        self.disclosure.register_item(item)
    }

    /// Remove a member checkbox.
    pub fn unregister_item(&mut self, id: &K) -> Option<Item<K>> {
        self.disclosure.unregister_item(id)
    }

    /// Checked member ids, in the order they were checked.
    pub fn values(&self) -> &[K] {
        self.disclosure.values()
    }

    /// State of one member.
    pub fn state(&self, id: &K) -> CheckedState {
        self.disclosure.is_open(id).into()
    }

    /// Aggregate over registered members: all checked, none checked, or mixed.
    ///
    /// This is the state a "select all" parent checkbox displays.
    pub fn aggregate(&self) -> CheckedState {
        let registry = self.disclosure.group().registry();
        let checked = registry.ids().filter(|id| self.disclosure.is_open(id)).count();
        match checked {
            0 => CheckedState::Unchecked,
            n if n == registry.len() => CheckedState::Checked,
            _ => CheckedState::Indeterminate,
        }
    }

    /// Check (`true`) or clear (`false`) every enabled member, as a "select all" parent
    /// would. Disabled members keep their state.
    pub fn set_all(&mut self, checked: bool) -> Update<Vec<K>> {
        if self.disclosure.is_disposed() || self.disclosure.context().disabled {
            return Update::Unchanged;
        }
        let registry = self.disclosure.group().registry();
        let mut next: Vec<K> = self
            .values()
            .iter()
            .copied()
            .filter(|id| checked || !registry.is_enabled(id))
            .collect();
        if checked {
            for id in registry.ids() {
                if registry.is_enabled(&id) && !next.contains(&id) {
                    next.push(id);
                }
            }
        }
        if next.as_slice() == self.values() {
            return Update::Unchanged;
        }
        if self.disclosure.selection().is_controlled() {
            return Update::Requested(next);
        }
        self.disclosure.set_value(next);
        Update::Applied
    }

    /// Pointer activation of a member.
    pub fn click(&mut self, id: K) -> Update<Vec<K>> {
        self.disclosure.toggle(id)
    }

    /// Key press on the member `id`.
    pub fn on_key(&mut self, id: K, event: &KeyEvent) -> KeyOutcome<K, Vec<K>> {
        match checkbox_key(event) {
            Some(true) => {
                let update = self.disclosure.toggle(id);
                return if update.is_changed() {
                    KeyOutcome::handled().with_activated(id).with_update(update)
                } else {
                    KeyOutcome::handled()
                };
            }
            Some(false) => return KeyOutcome::handled(),
            None => {}
        }
        match self.disclosure.navigate_from(&id, event) {
            RovingOutcome::Moved { to, .. } => KeyOutcome::handled().with_focus(Some(to)),
            RovingOutcome::Unmoved => KeyOutcome::handled(),
            RovingOutcome::Exit | RovingOutcome::Ignored => KeyOutcome::ignored(),
        }
    }

    /// Attributes of the group element.
    pub fn group_attrs(&self) -> Attrs {
        let ctx = self.disclosure.context();
        Attrs::new()
            .with("id", ctx.id.as_str())
            .with("role", "group")
            .with_disabled(ctx.disabled)
    }

    /// Attributes of the member `id`.
    pub fn item_attrs(&self, id: &K) -> Attrs {
        let ctx = self.disclosure.context();
        let state = self.state(id);
        Attrs::new()
            .with("id", ctx.item_id(id))
            .with("role", "checkbox")
            .with("aria-checked", state.aria_checked())
            .with("data-state", state.data_state().as_str())
            .with("tabindex", self.disclosure.tab_index(id).to_string())
            .with_disabled(self.disclosure.is_disabled(id))
    }
}

impl<K: Copy + Eq + Hash + Debug + Display> DisclosureActions<K> for CheckboxGroup<K> {
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
