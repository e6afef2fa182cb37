// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ordered registry of navigable items.

use alloc::string::String;
use alloc::vec::Vec;
use core::hash::Hash;

use hashbrown::HashMap;
use trellis_typeahead::Candidate;

/// A navigable member of a composite widget.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Item<K> {
    /// Identifier, unique within the registry.
    pub id: K,
    /// Disabled items are skipped by navigation and typeahead.
    pub disabled: bool,
    /// Text used for typeahead. Items without a label never match.
    pub label: Option<String>,
}

impl<K> Item<K> {
    /// An enabled, unlabeled item.
    pub fn new(id: K) -> Self {
        Self {
            id,
            disabled: false,
            label: None,
        }
    }

    /// Set the typeahead label using builder pattern.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Set the disabled flag using builder pattern.
    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }
}

impl<K> Candidate for Item<K> {
    fn typeahead_label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    fn is_enabled(&self) -> bool {
        !self.disabled
    }
}

/// Configuration error raised by the registry.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    /// The id is already registered.
    #[error("item id is already registered at position {position}")]
    DuplicateItem {
        /// Position of the existing registration.
        position: usize,
    },
}

/// Items in traversal order, indexed by id.
///
/// An item's index is its position at registration time, shifted only by insertions and
/// removals before it. Removal hands the entry back by value, so a caller reacting to the
/// removal never observes a dangling registration.
#[derive(Clone, Debug)]
pub struct Registry<K> {
    items: Vec<Item<K>>,
    positions: HashMap<K, usize>,
}

impl<K: Copy + Eq + Hash> Default for Registry<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Copy + Eq + Hash> Registry<K> {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            positions: HashMap::new(),
        }
    }

    /// Append an item to the end of the traversal order.
    ///
    /// Returns the assigned index.
    pub fn register(&mut self, item: Item<K>) -> Result<usize, RegistryError> {
        self.insert(self.items.len(), item)
    }

    /// Insert an item at `position` (clamped to the end).
    ///
    /// Hosts that mount children out of document order use this to keep traversal order
    /// aligned with the rendered order.
    pub fn insert(&mut self, position: usize, item: Item<K>) -> Result<usize, RegistryError> {
        if let Some(&existing) = self.positions.get(&item.id) {
            return Err(RegistryError::DuplicateItem { position: existing });
        }
        let position = position.min(self.items.len());
        self.items.insert(position, item);
        self.reindex_from(position);
        Ok(position)
    }

    /// Remove an item, returning it. Unknown ids are ignored.
    pub fn unregister(&mut self, id: &K) -> Option<Item<K>> {
        let position = self.positions.remove(id)?;
        let item = self.items.remove(position);
        self.reindex_from(position);
        Some(item)
    }

    /// Update an item's disabled flag. Returns `false` for unknown ids.
    pub fn set_disabled(&mut self, id: &K, disabled: bool) -> bool {
        match self.get_mut(id) {
            Some(item) => {
                item.disabled = disabled;
                true
            }
            None => false,
        }
    }

    /// Update an item's typeahead label. Returns `false` for unknown ids.
    pub fn set_label(&mut self, id: &K, label: Option<String>) -> bool {
        match self.get_mut(id) {
            Some(item) => {
                item.label = label;
                true
            }
            None => false,
        }
    }

    /// Whether `id` is registered.
    pub fn contains(&self, id: &K) -> bool {
        self.positions.contains_key(id)
    }

    /// Traversal index of `id`.
    pub fn position(&self, id: &K) -> Option<usize> {
        self.positions.get(id).copied()
    }

    /// Look up an item by id.
    pub fn get(&self, id: &K) -> Option<&Item<K>> {
        self.position(id).map(|i| &self.items[i])
    }

    /// Whether `id` is registered and enabled.
    pub fn is_enabled(&self, id: &K) -> bool {
        self.get(id).is_some_and(|item| !item.disabled)
    }

    /// All items in traversal order.
    pub fn items(&self) -> &[Item<K>] {
        &self.items
    }

    /// Ids in traversal order.
    pub fn ids(&self) -> impl Iterator<Item = K> + '_ {
        self.items.iter().map(|item| item.id)
    }

    /// Number of registered items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn get_mut(&mut self, id: &K) -> Option<&mut Item<K>> {
        let position = self.position(id)?;
        self.items.get_mut(position)
    }

    fn reindex_from(&mut self, start: usize) {
        for (i, item) in self.items.iter().enumerate().skip(start) {
            self.positions.insert(item.id, i);
        }
    }
}
