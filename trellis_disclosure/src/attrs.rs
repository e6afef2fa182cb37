// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Attribute snapshots for the view layer.

use alloc::string::String;

use smallvec::SmallVec;

/// `data-state` values.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum DataState {
    /// Disclosure content is shown.
    Open,
    /// Disclosure content is hidden.
    Closed,
    /// Selected tab.
    Active,
    /// Unselected tab.
    Inactive,
    /// Checked checkbox.
    Checked,
    /// Unchecked checkbox.
    Unchecked,
    /// Mixed checkbox.
    Indeterminate,
}

impl DataState {
    /// The attribute value.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Closed => "closed",
            Self::Active => "active",
            Self::Inactive => "inactive",
            Self::Checked => "checked",
            Self::Unchecked => "unchecked",
            Self::Indeterminate => "indeterminate",
        }
    }

    /// `Open`/`Closed` from a boolean.
    pub fn open(open: bool) -> Self {
        if open { Self::Open } else { Self::Closed }
    }
}

/// `"true"` or `"false"`.
pub fn bool_str(value: bool) -> &'static str {
    if value { "true" } else { "false" }
}

/// Ordered name/value pairs to bind onto one element.
///
/// Absent attributes are simply not in the list; boolean presence attributes such as
/// `data-disabled` or `hidden` carry an empty value.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Attrs {
    entries: SmallVec<[(&'static str, String); 8]>,
}

impl Attrs {
    /// An empty attribute list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `name`, replacing an earlier value.
    pub fn set(&mut self, name: &'static str, value: impl Into<String>) -> &mut Self {
        let value = value.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
        self
    }

    /// Remove `name` if present.
    pub fn remove(&mut self, name: &'static str) -> &mut Self {
        self.entries.retain(|(n, _)| *n != name);
        self
    }

    /// Set `name` using builder pattern.
    pub fn with(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.set(name, value);
        self
    }

    /// Add a presence attribute (`name=""`) when `on`.
    pub fn with_flag(mut self, name: &'static str, on: bool) -> Self {
        if on {
            self.set(name, "");
        }
        self
    }

    /// `data-disabled=""` and `aria-disabled="true"` when `disabled`.
    pub fn with_disabled(self, disabled: bool) -> Self {
        let attrs = self.with_flag("data-disabled", disabled);
        if disabled {
            attrs.with("aria-disabled", "true")
        } else {
            attrs
        }
    }

    /// Value of `name`, if present.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Whether `name` is present.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> + '_ {
        self.entries.iter().map(|(n, v)| (*n, v.as_str()))
    }

    /// Number of attributes.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no attribute is set.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disabled_adds_both_markers() {
        let attrs = Attrs::new().with_disabled(true);
        assert_eq!(attrs.get("data-disabled"), Some(""));
        assert_eq!(attrs.get("aria-disabled"), Some("true"));

        let enabled = Attrs::new().with_disabled(false);
        assert!(enabled.is_empty());
    }

    #[test]
    fn set_replaces_in_place() {
        let mut attrs = Attrs::new().with("id", "a").with("tabindex", "-1");
        attrs.set("id", "b");
        let names: alloc::vec::Vec<_> = attrs.iter().collect();
        assert_eq!(names, [("id", "b"), ("tabindex", "-1")]);
        attrs.remove("id");
        assert_eq!(attrs.len(), 1);
    }

    #[test]
    fn state_strings() {
        assert_eq!(DataState::open(true).as_str(), "open");
        assert_eq!(DataState::Indeterminate.as_str(), "indeterminate");
        assert_eq!(bool_str(false), "false");
    }
}
