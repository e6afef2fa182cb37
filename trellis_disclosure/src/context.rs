// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Widget configuration and the context handed down to sub-components.

use alloc::format;
use alloc::string::String;
use core::fmt::Display;

use trellis_host::{Orientation, TextDirection};
use trellis_roving::{ActivationMode, NavConfig, WrapMode};

/// How many items may be open (or selected) at once.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum SelectionMode {
    /// At most one.
    #[default]
    Single,
    /// Any number.
    Multiple,
    /// Selection is disabled; every mutation is a no-op.
    None,
}

/// Options for one widget instance.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WidgetConfig {
    /// Instance id; element ids are derived from it.
    pub id: String,
    /// Selection cardinality.
    pub mode: SelectionMode,
    /// Layout axis for arrow-key navigation. `None` accepts both axes.
    pub orientation: Option<Orientation>,
    /// Text direction; RTL swaps Left/Right.
    pub dir: TextDirection,
    /// Whether navigation wraps at the ends.
    pub wrap: WrapMode,
    /// Disables the widget and every item in it.
    pub disabled: bool,
    /// Whether the sole open item may be closed (single mode).
    pub collapsible: bool,
    /// Whether focus movement also activates.
    pub activation: ActivationMode,
}

impl WidgetConfig {
    /// Defaults for an instance named `id`.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            mode: SelectionMode::Single,
            orientation: None,
            dir: TextDirection::Ltr,
            wrap: WrapMode::Loop,
            disabled: false,
            collapsible: false,
            activation: ActivationMode::Automatic,
        }
    }

    /// Set the selection mode using builder pattern.
    pub fn with_mode(mut self, mode: SelectionMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set the orientation using builder pattern.
    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = Some(orientation);
        self
    }

    /// Set the text direction using builder pattern.
    pub fn with_dir(mut self, dir: TextDirection) -> Self {
        self.dir = dir;
        self
    }

    /// Set wrapping using builder pattern.
    pub fn with_wrap(mut self, wrap: impl Into<WrapMode>) -> Self {
        self.wrap = wrap.into();
        self
    }

    /// Set the disabled flag using builder pattern.
    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Set collapsibility using builder pattern.
    pub fn with_collapsible(mut self, collapsible: bool) -> Self {
        self.collapsible = collapsible;
        self
    }

    /// Set the activation mode using builder pattern.
    pub fn with_activation(mut self, activation: ActivationMode) -> Self {
        self.activation = activation;
        self
    }

    /// Navigation settings derived from this configuration.
    pub fn nav(&self) -> NavConfig {
        let nav = NavConfig::default().with_dir(self.dir).with_wrap(self.wrap);
        match self.orientation {
            Some(orientation) => nav.with_orientation(orientation),
            None => nav,
        }
    }

    /// The context passed to sub-components.
    pub fn context(&self) -> WidgetContext {
        WidgetContext {
            id: self.id.clone(),
            orientation: self.orientation,
            dir: self.dir,
            disabled: self.disabled,
        }
    }
}

/// What a widget root hands to its triggers, items, and content parts.
///
/// Replaces implicit cascading: every sub-component reads the root's id, layout, and
/// disabled flag from here.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WidgetContext {
    /// Root instance id.
    pub id: String,
    /// Root orientation.
    pub orientation: Option<Orientation>,
    /// Root text direction.
    pub dir: TextDirection,
    /// Root disabled flag; cascades to every item.
    pub disabled: bool,
}

impl WidgetContext {
    /// Whether an item is effectively disabled.
    pub fn item_disabled(&self, item_disabled: bool) -> bool {
        self.disabled || item_disabled
    }

    /// Element id of the trigger for `key`.
    pub fn trigger_id(&self, key: impl Display) -> String {
        format!("{}-trigger-{}", self.id, key)
    }

    /// Element id of the content region for `key`.
    pub fn content_id(&self, key: impl Display) -> String {
        format!("{}-content-{}", self.id, key)
    }

    /// Element id of a list item (menu item or option) for `key`.
    pub fn item_id(&self, key: impl Display) -> String {
        format!("{}-item-{}", self.id, key)
    }

    /// Element id of a single trigger (binary widgets).
    pub fn sole_trigger_id(&self) -> String {
        format!("{}-trigger", self.id)
    }

    /// Element id of single content (binary widgets).
    pub fn sole_content_id(&self) -> String {
        format!("{}-content", self.id)
    }
}
