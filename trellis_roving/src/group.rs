// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A stateful roving-focus group.

use alloc::vec::Vec;
use core::hash::Hash;

use trellis_host::{EventResult, Key, KeyEvent, Modifiers};
use trellis_typeahead::Typeahead;

use crate::navigation::{NavConfig, Navigation, compute_next, first_enabled};
use crate::registry::{Item, Registry, RegistryError};

/// Whether moving focus also activates the newly focused item.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum ActivationMode {
    /// Focus movement activates (tab lists by default).
    #[default]
    Automatic,
    /// Activation needs an explicit Enter/Space.
    Manual,
}

/// Which members take part in sequential (Tab) navigation.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum TabStops {
    /// Only the active item is a tab stop; Tab leaves the group.
    #[default]
    Roving,
    /// Every enabled item is a tab stop (for example, accordion triggers).
    All,
}

/// What a key press did to the group.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RovingOutcome<K> {
    /// The active item changed; the host should focus `to`.
    Moved {
        /// Newly active item.
        to: K,
        /// Whether the widget should also activate `to`.
        activate: bool,
    },
    /// A navigation key was recognized but there is nowhere to go.
    Unmoved,
    /// Tab or Shift+Tab: focus leaves the group through the host's normal order.
    Exit,
    /// The key is not a navigation key.
    Ignored,
}

impl<K> RovingOutcome<K> {
    /// Whether the host should suppress the key's default action.
    pub fn result(&self) -> EventResult {
        match self {
            Self::Moved { .. } | Self::Unmoved => EventResult::Handled,
            Self::Exit | Self::Ignored => EventResult::Ignored,
        }
    }
}

/// Roving-tabindex state for one composite widget.
///
/// Exactly one enabled item is active whenever any enabled item exists: the stored
/// active id if it is still registered and enabled, otherwise the first enabled item.
#[derive(Clone, Debug)]
pub struct RovingGroup<K> {
    registry: Registry<K>,
    active: Option<K>,
    /// Stepping behavior.
    pub nav: NavConfig,
    /// Whether focus movement activates.
    pub activation: ActivationMode,
    /// Sequential navigation policy.
    pub tab_stops: TabStops,
    typeahead: Option<Typeahead>,
}

impl<K: Copy + Eq + Hash + core::fmt::Debug> RovingGroup<K> {
    /// Create an empty group.
    pub fn new(nav: NavConfig) -> Self {
        Self {
            registry: Registry::new(),
            active: None,
            nav,
            activation: ActivationMode::Automatic,
            tab_stops: TabStops::Roving,
            typeahead: None,
        }
    }

    /// Set the activation mode using builder pattern.
    pub fn with_activation(mut self, activation: ActivationMode) -> Self {
        self.activation = activation;
        self
    }

    /// Set the tab-stop policy using builder pattern.
    pub fn with_tab_stops(mut self, tab_stops: TabStops) -> Self {
        self.tab_stops = tab_stops;
        self
    }

    /// Enable typeahead on printable characters using builder pattern.
    pub fn with_typeahead(mut self, typeahead: Typeahead) -> Self {
        self.typeahead = Some(typeahead);
        self
    }

    /// The underlying registry.
    pub fn registry(&self) -> &Registry<K> {
        &self.registry
    }

    /// Typeahead state, if enabled.
    pub fn typeahead(&self) -> Option<&Typeahead> {
        self.typeahead.as_ref()
    }

    /// Register an item at the end of the traversal order.
    pub fn register(&mut self, item: Item<K>) -> Result<usize, RegistryError> {
        self.registry.register(item)
    }

    /// Register an item at a specific traversal position.
    pub fn insert(&mut self, position: usize, item: Item<K>) -> Result<usize, RegistryError> {
        self.registry.insert(position, item)
    }

    /// Remove an item. If it was active, the designation moves to the nearest enabled
    /// item (the one that slid into its position, else the closest one before it).
    pub fn unregister(&mut self, id: &K) -> Option<Item<K>> {
        let position = self.registry.position(id)?;
        let removed = self.registry.unregister(id)?;
        if self.active == Some(*id) {
            self.active = self.nearest_enabled(position);
            tracing::trace!(removed = ?id, active = ?self.active, "active item unregistered");
        }
        Some(removed)
    }

    /// Enable or disable an item. Disabling the active item moves the designation.
    pub fn set_disabled(&mut self, id: &K, disabled: bool) -> bool {
        if !self.registry.set_disabled(id, disabled) {
            return false;
        }
        if disabled
            && self.active == Some(*id)
            && let Some(position) = self.registry.position(id)
        {
            self.active = self.nearest_enabled(position);
        }
        true
    }

    /// The active item (the one with `tabindex=0`).
    pub fn active(&self) -> Option<K> {
        self.active_index().map(|i| self.registry.items()[i].id)
    }

    /// Traversal index of the active item.
    pub fn active_index(&self) -> Option<usize> {
        self.active
            .and_then(|id| self.registry.position(&id))
            .filter(|&i| !self.registry.items()[i].disabled)
            .or_else(|| first_enabled(self.registry.items()))
    }

    /// Make `id` the active item, for example after a pointer focus.
    ///
    /// Disabled and unknown ids are rejected.
    pub fn set_active(&mut self, id: &K) -> bool {
        if !self.registry.is_enabled(id) {
            return false;
        }
        self.active = Some(*id);
        true
    }

    /// The `tabindex` value for `id`.
    pub fn tab_index(&self, id: &K) -> i32 {
        let tabbable = match self.tab_stops {
            TabStops::Roving => self.active().as_ref() == Some(id),
            TabStops::All => self.registry.is_enabled(id),
        };
        if tabbable { 0 } else { -1 }
    }

    /// Members reachable by Tab, in order.
    pub fn tab_sequence(&self) -> Vec<K> {
        self.registry
            .ids()
            .filter(|id| self.tab_index(id) == 0)
            .collect()
    }

    /// Apply a navigation intent. Returns the newly active item.
    pub fn navigate(&mut self, nav: Navigation) -> Option<K> {
        let next = compute_next(self.registry.items(), self.active_index(), nav, &self.nav)?;
        let id = self.registry.items()[next].id;
        self.active = Some(id);
        tracing::trace!(?nav, to = ?id, "roving focus moved");
        Some(id)
    }

    /// Handle a key press on the active item.
    ///
    /// Arrows, Home/End, and PageUp/PageDown navigate (chords with modifiers are left to
    /// the host). Printable characters go to typeahead when enabled. Tab exits.
    pub fn on_key(&mut self, event: &KeyEvent) -> RovingOutcome<K> {
        if event.key == Key::Tab {
            return RovingOutcome::Exit;
        }
        if let Some(nav) = Navigation::from_key(event.key) {
            if !event.modifiers.is_empty() {
                return RovingOutcome::Ignored;
            }
            return match self.navigate(nav) {
                Some(to) => self.moved(to),
                None => RovingOutcome::Unmoved,
            };
        }
        if let Some(ch) = event.printable() {
            return self.on_char(ch, event.timestamp_ms);
        }
        if event.key == Key::Space
            && event.modifiers.difference(Modifiers::SHIFT).is_empty()
            && self
                .typeahead
                .as_ref()
                .is_some_and(|t| t.is_searching(event.timestamp_ms))
        {
            return self.on_char(' ', event.timestamp_ms);
        }
        RovingOutcome::Ignored
    }

    /// Feed a printable character to typeahead.
    pub fn on_char(&mut self, ch: char, now_ms: u64) -> RovingOutcome<K> {
        let current = self.active_index();
        let Some(typeahead) = self.typeahead.as_mut() else {
            return RovingOutcome::Ignored;
        };
        match typeahead.on_char(ch, self.registry.items(), current, now_ms) {
            Some(found) => {
                let to = self.registry.items()[found].id;
                self.active = Some(to);
                self.moved(to)
            }
            None => RovingOutcome::Unmoved,
        }
    }

    /// Whether a typeahead search is in progress at `now_ms`.
    pub fn is_searching(&self, now_ms: u64) -> bool {
        self.typeahead
            .as_ref()
            .is_some_and(|t| t.is_searching(now_ms))
    }

    /// Drop any pending typeahead search.
    pub fn reset_typeahead(&mut self) {
        if let Some(t) = self.typeahead.as_mut() {
            t.reset();
        }
    }

    fn moved(&self, to: K) -> RovingOutcome<K> {
        RovingOutcome::Moved {
            to,
            activate: self.activation == ActivationMode::Automatic,
        }
    }

    fn nearest_enabled(&self, position: usize) -> Option<K> {
        let items = self.registry.items();
        items
            .iter()
            .skip(position)
            .find(|item| !item.disabled)
            .or_else(|| items[..position.min(items.len())].iter().rfind(|item| !item.disabled))
            .map(|item| item.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigation::WrapMode;
    use trellis_host::Orientation;

    fn group(ids: &[(u32, bool)]) -> RovingGroup<u32> {
        let mut g = RovingGroup::new(
            NavConfig::default()
                .with_orientation(Orientation::Vertical)
                .with_wrap(WrapMode::Loop),
        );
        for &(id, disabled) in ids {
            g.register(Item::new(id).with_disabled(disabled)).unwrap();
        }
        g
    }

    fn key(k: Key) -> KeyEvent {
        KeyEvent::new(k)
    }

    fn tab_zero_count(g: &RovingGroup<u32>) -> usize {
        g.registry().ids().filter(|id| g.tab_index(id) == 0).count()
    }

    #[test]
    fn exactly_one_tab_stop_while_any_item_is_enabled() {
        let mut g = group(&[(1, false), (2, true), (3, false)]);
        assert_eq!(g.active(), Some(1));
        assert_eq!(tab_zero_count(&g), 1);

        g.navigate(Navigation::Down);
        assert_eq!(g.active(), Some(3));
        assert_eq!(tab_zero_count(&g), 1);

        g.set_disabled(&3, true);
        assert_eq!(g.active(), Some(1));
        assert_eq!(tab_zero_count(&g), 1);

        g.set_disabled(&1, true);
        assert_eq!(g.active(), None);
        assert_eq!(tab_zero_count(&g), 0);
    }

    #[test]
    fn arrows_skip_disabled_and_wrap() {
        let mut g = group(&[(1, false), (2, true), (3, false)]);
        assert_eq!(
            g.on_key(&key(Key::ArrowDown)),
            RovingOutcome::Moved {
                to: 3,
                activate: true
            }
        );
        assert_eq!(
            g.on_key(&key(Key::ArrowDown)),
            RovingOutcome::Moved {
                to: 1,
                activate: true
            }
        );
    }

    #[test]
    fn boundary_without_loop_is_unmoved_but_handled() {
        let mut g = group(&[(1, false), (2, false)]);
        g.nav.wrap = WrapMode::Never;
        let outcome = g.on_key(&key(Key::ArrowUp));
        assert_eq!(outcome, RovingOutcome::Unmoved);
        assert_eq!(outcome.result(), EventResult::Handled);
        assert_eq!(g.active(), Some(1));
    }

    #[test]
    fn tab_exits_and_modified_arrows_are_left_alone() {
        let mut g = group(&[(1, false), (2, false)]);
        assert_eq!(g.on_key(&key(Key::Tab)), RovingOutcome::Exit);
        let shifted = key(Key::ArrowDown).with_modifiers(Modifiers::SHIFT);
        assert_eq!(g.on_key(&shifted), RovingOutcome::Ignored);
        assert_eq!(g.active(), Some(1));
    }

    #[test]
    fn manual_activation_only_moves_focus() {
        let mut g = group(&[(1, false), (2, false)]).with_activation(ActivationMode::Manual);
        assert_eq!(
            g.on_key(&key(Key::End)),
            RovingOutcome::Moved {
                to: 2,
                activate: false
            }
        );
    }

    #[test]
    fn removing_the_active_item_hands_the_designation_on() {
        let mut g = group(&[(1, false), (2, false), (3, false)]);
        g.set_active(&2);
        let removed = g.unregister(&2).unwrap();
        assert_eq!(removed.id, 2);
        assert_eq!(g.active(), Some(3));

        g.unregister(&3);
        assert_eq!(g.active(), Some(1));
        assert!(g.unregister(&3).is_none());
    }

    #[test]
    fn set_active_rejects_disabled_items() {
        let mut g = group(&[(1, false), (2, true)]);
        assert!(!g.set_active(&2));
        assert!(!g.set_active(&9));
        assert_eq!(g.active(), Some(1));
    }

    #[test]
    fn all_tab_stops_skip_disabled_members() {
        let g = group(&[(1, false), (2, true), (3, false)]).with_tab_stops(TabStops::All);
        assert_eq!(g.tab_sequence(), [1, 3]);
        assert_eq!(g.tab_index(&2), -1);
    }

    #[test]
    fn typeahead_moves_to_matching_label() {
        let mut g = RovingGroup::new(NavConfig::default()).with_typeahead(Typeahead::new());
        for (id, label) in [(1_u32, "Apple"), (2, "Banana"), (3, "Cherry")] {
            g.register(Item::new(id).with_label(label)).unwrap();
        }
        let c = KeyEvent::new(Key::Character('c')).at(10);
        assert_eq!(
            g.on_key(&c),
            RovingOutcome::Moved {
                to: 3,
                activate: true
            }
        );
        // Space continues an in-flight search instead of being ignored.
        assert!(g.is_searching(20));
        assert_eq!(
            g.on_key(&KeyEvent::new(Key::Space).at(20)),
            RovingOutcome::Unmoved
        );
        assert_eq!(g.typeahead().map(Typeahead::buffer), Some("c "));
    }

    #[test]
    fn printable_without_typeahead_is_ignored() {
        let mut g = group(&[(1, false)]);
        assert_eq!(
            g.on_key(&KeyEvent::new(Key::Character('x'))),
            RovingOutcome::Ignored
        );
    }
}
