// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The multi-item state coordinator.

use alloc::vec::Vec;
use core::fmt::Debug;
use core::hash::Hash;

use trellis_host::KeyEvent;
use trellis_roving::{Item, RovingGroup, RovingOutcome, TabStops};

use crate::actions::DisclosureActions;
use crate::context::{WidgetConfig, WidgetContext};
use crate::error::Error;
use crate::selection::{Selection, Update};

/// Single source of truth for which items of a widget are open (or selected).
///
/// Owns the item registry (through a [`RovingGroup`]) and the [`Selection`]. Every
/// applied change bumps [`generation`](Self::generation) so the view layer knows to
/// re-render. Mutations of disabled items, unknown items, or a disposed widget are no-ops.
#[derive(Clone, Debug)]
pub struct Disclosure<K> {
    context: WidgetContext,
    group: RovingGroup<K>,
    selection: Selection<K>,
    generation: u64,
    disposed: bool,
}

impl<K: Copy + Eq + Hash + Debug> Disclosure<K> {
    /// Create a coordinator from `config`.
    pub fn new(config: &WidgetConfig) -> Self {
        Self {
            context: config.context(),
            group: RovingGroup::new(config.nav()).with_activation(config.activation),
            selection: Selection::new(config.mode, config.collapsible),
            generation: 0,
            disposed: false,
        }
    }

    /// Set the tab-stop policy of the item group using builder pattern.
    pub fn with_tab_stops(mut self, tab_stops: TabStops) -> Self {
        self.group = self.group.with_tab_stops(tab_stops);
        self
    }

    /// Seed the open items using builder pattern.
    pub fn with_default(mut self, values: impl IntoIterator<Item = K>) -> Self {
        self.selection = self.selection.with_default(values);
        self
    }

    /// Hand state ownership to the caller using builder pattern.
    pub fn with_controlled(mut self, values: impl IntoIterator<Item = K>) -> Self {
        self.selection = self.selection.with_default(values).with_controlled(true);
        self
    }

    /// Context for sub-components.
    pub fn context(&self) -> &WidgetContext {
        &self.context
    }

    /// The item group (registry and roving state).
    pub fn group(&self) -> &RovingGroup<K> {
        &self.group
    }

    pub(crate) fn group_mut(&mut self) -> &mut RovingGroup<K> {
        &mut self.group
    }

    /// The open set.
    pub fn selection(&self) -> &Selection<K> {
        &self.selection
    }

    /// Open ids, oldest first.
    pub fn values(&self) -> &[K] {
        self.selection.values()
    }

    /// Render generation; increases on every applied change.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Whether [`dispose`](Self::dispose) was called.
    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Whether `id` is registered and neither it nor the widget is disabled.
    pub fn is_enabled(&self, id: &K) -> bool {
        !self.disposed && !self.context.disabled && self.group.registry().is_enabled(id)
    }

    /// Whether `id` renders as disabled (unknown ids count as disabled).
    pub fn is_disabled(&self, id: &K) -> bool {
        let item_disabled = self.group.registry().get(id).is_none_or(|item| item.disabled);
        self.context.item_disabled(item_disabled)
    }

    /// Register an item when its sub-component mounts and return its position.
    ///
    /// A child that mounts after the widget was disposed is ignored (`Ok(None)`).
    pub fn register_item(&mut self, item: Item<K>) -> Result<Option<usize>, Error> {
        if self.disposed {
            tracing::trace!(id = ?item.id, "ignoring registration on a disposed widget");
            return Ok(None);
        }
        let id = item.id;
        let position = self.group.register(item)?;
        tracing::trace!(?id, position, "item registered");
        self.bump();
        Ok(Some(position))
    }

    /// Remove an item when its sub-component unmounts. The open set keeps its id.
    pub fn unregister_item(&mut self, id: &K) -> Option<Item<K>> {
        if self.disposed {
            return None;
        }
        let removed = self.group.unregister(id)?;
        self.bump();
        Some(removed)
    }

    /// Enable or disable one item.
    pub fn set_item_disabled(&mut self, id: &K, disabled: bool) -> bool {
        if self.disposed {
            return false;
        }
        let changed = self.group.set_disabled(id, disabled);
        if changed {
            self.bump();
        }
        changed
    }

    /// Enable or disable the whole widget.
    pub fn set_disabled(&mut self, disabled: bool) {
        if !self.disposed && self.context.disabled != disabled {
            self.context.disabled = disabled;
            self.bump();
        }
    }

    /// Store the authoritative value (controlled mode, or an external reset).
    pub fn set_value(&mut self, values: impl IntoIterator<Item = K>) -> bool {
        if self.disposed {
            return false;
        }
        let changed = self.selection.set_value(values);
        if changed {
            self.bump();
        }
        changed
    }

    /// Route a key press from the item `from` through roving navigation.
    pub fn navigate_from(&mut self, from: &K, event: &KeyEvent) -> RovingOutcome<K> {
        if self.disposed || self.context.disabled {
            return RovingOutcome::Ignored;
        }
        self.group.set_active(from);
        self.group.on_key(event)
    }

    /// The `tabindex` of `id`.
    pub fn tab_index(&self, id: &K) -> i32 {
        if self.context.disabled {
            -1
        } else {
            self.group.tab_index(id)
        }
    }

    /// Detach the widget from its children. The last state stays readable; every further
    /// mutation (including late registrations) is a no-op.
    pub fn dispose(&mut self) {
        if !self.disposed {
            tracing::debug!(widget = %self.context.id, "disposed");
            self.disposed = true;
        }
    }

    fn mutate(&mut self, id: K, op: impl FnOnce(&mut Selection<K>, K) -> Update<Vec<K>>) -> Update<Vec<K>> {
        if !self.is_enabled(&id) {
            tracing::trace!(?id, "ignoring state change for a disabled or unknown item");
            return Update::Unchanged;
        }
        let update = op(&mut self.selection, id);
        match &update {
            Update::Applied => {
                tracing::debug!(widget = %self.context.id, values = ?self.selection.values(), "state changed");
                self.bump();
            }
            Update::Requested(values) => {
                tracing::debug!(widget = %self.context.id, ?values, "state change requested");
            }
            Update::Unchanged => {}
        }
        update
    }

    fn bump(&mut self) {
        self.generation = self.generation.wrapping_add(1);
    }
}

impl<K: Copy + Eq + Hash + Debug> DisclosureActions<K> for Disclosure<K> {
    fn toggle(&mut self, id: K) -> Update<Vec<K>> {
        self.mutate(id, Selection::toggle)
    }

    fn open(&mut self, id: K) -> Update<Vec<K>> {
        self.mutate(id, Selection::open)
    }

    fn close(&mut self, id: K) -> Update<Vec<K>> {
        self.mutate(id, Selection::close)
    }

    fn is_open(&self, id: &K) -> bool {
        self.selection.contains(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::SelectionMode;
    use alloc::vec;
    use trellis_roving::RegistryError;

    fn three(config: WidgetConfig) -> Disclosure<u32> {
        let mut d = Disclosure::new(&config);
        for id in 1..=3 {
            d.register_item(Item::new(id)).unwrap();
        }
        d
    }

    #[test]
    fn unknown_and_disabled_items_are_rejected() {
        let mut d = three(WidgetConfig::new("d"));
        assert_eq!(d.toggle(9), Update::Unchanged);
        d.set_item_disabled(&2, true);
        assert_eq!(d.toggle(2), Update::Unchanged);
        assert!(d.values().is_empty());
    }

    #[test]
    fn disabled_widget_rejects_everything() {
        let mut d = three(WidgetConfig::new("d").with_mode(SelectionMode::Multiple));
        d.set_disabled(true);
        assert_eq!(d.open(1), Update::Unchanged);
        assert!(d.is_disabled(&1));
        assert_eq!(d.tab_index(&1), -1);
    }

    #[test]
    fn applied_changes_bump_the_generation() {
        let mut d = three(WidgetConfig::new("d"));
        let before = d.generation();
        assert_eq!(d.toggle(1), Update::Applied);
        assert_eq!(d.generation(), before + 1);
        assert_eq!(d.toggle(1), Update::Unchanged);
        assert_eq!(d.generation(), before + 1);
    }

    #[test]
    fn controlled_waits_for_the_caller() {
        let mut d = three(WidgetConfig::new("d")).with_controlled([1]);
        assert_eq!(d.toggle(2), Update::Requested(vec![2]));
        assert!(d.is_open(&1));
        assert!(d.set_value([2]));
        assert!(d.is_open(&2));
    }

    #[test]
    fn duplicate_registration_is_a_configuration_error() {
        let mut d = three(WidgetConfig::new("d"));
        assert_eq!(
            d.register_item(Item::new(2)),
            Err(Error::Registry(RegistryError::DuplicateItem { position: 1 }))
        );
    }

    #[test]
    fn disposed_widget_is_inert() {
        let mut d = three(WidgetConfig::new("d"));
        d.dispose();
        assert_eq!(d.toggle(1), Update::Unchanged);
        assert!(!d.set_value([1]));
        d.dispose();
        assert!(d.is_disposed());
    }

    #[test]
    fn late_children_of_a_disposed_widget_are_ignored() {
        let mut d = three(WidgetConfig::new("d"));
        d.toggle(1);
        d.dispose();
        let generation = d.generation();

        assert_eq!(d.register_item(Item::new(7)), Ok(None));
        assert!(!d.group().registry().contains(&7));
        assert!(d.unregister_item(&2).is_none());
        assert!(!d.set_item_disabled(&3, true));
        d.set_disabled(true);

        assert_eq!(d.generation(), generation);
        assert_eq!(d.group().registry().len(), 3);
        assert!(!d.is_disabled(&3));
        assert_eq!(d.values(), [1]);
    }

    #[test]
    fn unregister_hands_back_the_item() {
        let mut d = three(WidgetConfig::new("d"));
        d.toggle(2);
        let removed = d.unregister_item(&2).unwrap();
        assert_eq!(removed.id, 2);
        assert!(d.unregister_item(&2).is_none());
        assert_eq!(d.toggle(2), Update::Unchanged);
    }
}
