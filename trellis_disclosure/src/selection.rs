// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Open/selected sets and controlled-mode change requests.

use alloc::vec::Vec;
use core::fmt::Debug;

use smallvec::SmallVec;

use crate::context::SelectionMode;

/// What a state mutation did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Update<T> {
    /// Nothing changed (rejected or already in the requested state).
    Unchanged,
    /// Uncontrolled: the new state was applied and the render generation bumped.
    Applied,
    /// Controlled: the caller owns the state and should feed `T` back if it agrees.
    Requested(T),
}

impl<T> Update<T> {
    /// Whether the mutation had any effect (applied or requested).
    pub fn is_changed(&self) -> bool {
        !matches!(self, Self::Unchanged)
    }

    /// Convert the requested value.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Update<U> {
        match self {
            Self::Unchanged => Update::Unchanged,
            Self::Applied => Update::Applied,
            Self::Requested(value) => Update::Requested(f(value)),
        }
    }
}

/// Insertion-ordered set of open (or selected) item ids.
///
/// Cardinality rules:
/// - [`SelectionMode::Single`], not collapsible: once an item is open, exactly one stays open;
/// - [`SelectionMode::Single`], collapsible: at most one;
/// - [`SelectionMode::Multiple`]: unconstrained;
/// - [`SelectionMode::None`]: always empty.
///
/// Mutations return an [`Update`]. In controlled mode nothing is stored until the caller
/// calls [`Selection::set_value`].
#[derive(Clone, Debug)]
pub struct Selection<K> {
    mode: SelectionMode,
    collapsible: bool,
    controlled: bool,
    values: SmallVec<[K; 4]>,
}

impl<K: Copy + Eq + Debug> Selection<K> {
    /// An empty, uncontrolled selection.
    pub fn new(mode: SelectionMode, collapsible: bool) -> Self {
        Self {
            mode,
            collapsible,
            controlled: false,
            values: SmallVec::new(),
        }
    }

    /// Seed the initial value using builder pattern.
    pub fn with_default(mut self, values: impl IntoIterator<Item = K>) -> Self {
        self.values = self.normalize(values);
        self
    }

    /// Mark the selection as owned by the caller using builder pattern.
    pub fn with_controlled(mut self, controlled: bool) -> Self {
        self.controlled = controlled;
        self
    }

    /// Cardinality mode.
    pub fn mode(&self) -> SelectionMode {
        self.mode
    }

    /// Whether the sole open item may be closed.
    pub fn collapsible(&self) -> bool {
        self.collapsible
    }

    /// Whether the caller owns the state.
    pub fn is_controlled(&self) -> bool {
        self.controlled
    }

    /// Open ids, oldest first.
    pub fn values(&self) -> &[K] {
        &self.values
    }

    /// Whether `id` is open.
    pub fn contains(&self, id: &K) -> bool {
        self.values.contains(id)
    }

    /// Number of open ids.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether nothing is open.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Flip `id`.
    pub fn toggle(&mut self, id: K) -> Update<Vec<K>> {
        match self.mode {
            SelectionMode::None => Update::Unchanged,
            SelectionMode::Multiple => {
                let mut next = self.values.clone();
                match next.iter().position(|v| *v == id) {
                    Some(i) => {
                        next.remove(i);
                    }
                    None => next.push(id),
                }
                self.propose(next)
            }
            SelectionMode::Single => {
                if self.contains(&id) {
                    self.close(id)
                } else {
                    self.propose(SmallVec::from_slice(&[id]))
                }
            }
        }
    }

    /// Open `id`. Idempotent.
    pub fn open(&mut self, id: K) -> Update<Vec<K>> {
        if self.contains(&id) {
            return Update::Unchanged;
        }
        match self.mode {
            SelectionMode::None => Update::Unchanged,
            SelectionMode::Single => self.propose(SmallVec::from_slice(&[id])),
            SelectionMode::Multiple => {
                let mut next = self.values.clone();
                next.push(id);
                self.propose(next)
            }
        }
    }

    /// Close `id`. Idempotent; closing the last open item of a non-collapsible single
    /// selection is rejected.
    pub fn close(&mut self, id: K) -> Update<Vec<K>> {
        if !self.contains(&id) {
            return Update::Unchanged;
        }
        if self.mode == SelectionMode::Single && !self.collapsible {
            tracing::trace!(?id, "refusing to collapse a non-collapsible selection");
            return Update::Unchanged;
        }
        let next = self.values.iter().copied().filter(|v| *v != id).collect();
        self.propose(next)
    }

    /// Store an authoritative value, normalized to the mode. Returns whether it differed.
    pub fn set_value(&mut self, values: impl IntoIterator<Item = K>) -> bool {
        let next = self.normalize(values);
        if next == self.values {
            return false;
        }
        self.values = next;
        true
    }

    fn propose(&mut self, next: SmallVec<[K; 4]>) -> Update<Vec<K>> {
        if next == self.values {
            return Update::Unchanged;
        }
        if self.controlled {
            return Update::Requested(next.into_vec());
        }
        self.values = next;
        Update::Applied
    }

    fn normalize(&self, values: impl IntoIterator<Item = K>) -> SmallVec<[K; 4]> {
        let mut out: SmallVec<[K; 4]> = SmallVec::new();
        for v in values {
            if !out.contains(&v) {
                out.push(v);
            }
        }
        match self.mode {
            SelectionMode::None => out.clear(),
            SelectionMode::Single => out.truncate(1),
            SelectionMode::Multiple => {}
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn single_non_collapsible_keeps_exactly_one() {
        let mut s = Selection::new(SelectionMode::Single, false);
        assert_eq!(s.toggle(1), Update::Applied);
        assert_eq!(s.toggle(1), Update::Unchanged);
        assert_eq!(s.values(), [1]);
        assert_eq!(s.close(1), Update::Unchanged);
        assert_eq!(s.toggle(2), Update::Applied);
        assert_eq!(s.values(), [2]);
        for id in [3, 3, 1, 2, 2] {
            s.toggle(id);
            assert_eq!(s.len(), 1);
        }
    }

    #[test]
    fn single_collapsible_can_empty() {
        let mut s = Selection::new(SelectionMode::Single, true);
        s.toggle(1);
        assert_eq!(s.toggle(1), Update::Applied);
        assert!(s.is_empty());
        s.toggle(1);
        assert_eq!(s.values(), [1]);
    }

    #[test]
    fn multiple_keeps_insertion_order() {
        let mut s = Selection::new(SelectionMode::Multiple, false);
        s.toggle(3);
        s.toggle(1);
        s.open(2);
        assert_eq!(s.values(), [3, 1, 2]);
        s.toggle(1);
        assert_eq!(s.values(), [3, 2]);
        assert_eq!(s.open(2), Update::Unchanged);
        assert_eq!(s.close(9), Update::Unchanged);
    }

    #[test]
    fn none_mode_ignores_everything() {
        let mut s = Selection::new(SelectionMode::None, false);
        assert_eq!(s.toggle(1), Update::Unchanged);
        assert!(!s.set_value([1, 2]));
        assert!(s.is_empty());
    }

    #[test]
    fn controlled_requests_without_storing() {
        let mut s = Selection::new(SelectionMode::Multiple, false)
            .with_default([1])
            .with_controlled(true);
        assert_eq!(s.toggle(2), Update::Requested(vec![1, 2]));
        assert_eq!(s.values(), [1]);
        assert!(s.set_value([1, 2]));
        assert_eq!(s.values(), [1, 2]);
        assert!(!s.set_value([1, 2]));
    }

    #[test]
    fn set_value_normalizes_to_the_mode() {
        let mut s = Selection::new(SelectionMode::Single, false);
        s.set_value([4, 5]);
        assert_eq!(s.values(), [4]);
    }
}
