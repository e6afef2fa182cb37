// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Popover: a floating dialog anchored to its trigger.

use core::fmt::Debug;

use trellis_float::{PositionRequest, PositionResult};
use trellis_host::{EventResult, Key, KeyEvent};

use crate::actions::{BinaryActions, Surface};
use crate::attrs::{Attrs, bool_str};
use crate::binary::BinaryDisclosure;
use crate::context::{WidgetConfig, WidgetContext};
use crate::presence::Presence;
use crate::scope::FocusScope;
use crate::selection::Update;

/// Popover state.
///
/// Modal popovers (the default) contain Tab and pull escaped focus back; non-modal ones
/// only move focus in on open and back out on close. Escape closes either.
#[derive(Clone, Debug)]
pub struct Popover<H> {
    context: WidgetContext,
    binary: BinaryDisclosure<H>,
}

impl<H: Copy + Eq + Debug> Popover<H> {
    /// Create a closed popover.
    pub fn new(config: &WidgetConfig) -> Self {
        Self {
            context: config.context(),
            binary: BinaryDisclosure::new(),
        }
    }

    /// Set modality using builder pattern.
    pub fn with_modal(mut self, modal: bool) -> Self {
        self.binary = self.binary.with_modal(modal);
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

    /// Store the authoritative open state (controlled mode).
    pub fn set_value<S: Surface<H>>(&mut self, surface: &mut S, open: bool) -> bool {
        self.binary.set_value(surface, open)
    }

    /// Pointer activation of the trigger.
    pub fn click_trigger<S: Surface<H>>(&mut self, surface: &mut S) -> Update<bool> {
        if self.context.disabled {
            return Update::Unchanged;
        }
        self.binary.toggle(surface)
    }

    /// Key press inside the content.
    pub fn on_content_key<S: Surface<H>>(
        &mut self,
        surface: &mut S,
        event: &KeyEvent,
    ) -> (EventResult, Update<bool>) {
        match event.key {
            Key::Escape if self.binary.presence().is_open() => {
                (EventResult::Handled, self.binary.set_open(surface, false))
            }
            Key::Tab => (self.binary.on_tab(surface, event.shift()), Update::Unchanged),
            _ => (EventResult::Ignored, Update::Unchanged),
        }
    }

    /// Focus moved to `target`.
    pub fn on_focus_in<S: Surface<H>>(&mut self, surface: &mut S, target: H) -> Option<H> {
        self.binary.on_focus_in(surface, target)
    }

    /// Re-measure while open.
    pub fn reposition<S: Surface<H>>(&mut self, surface: &mut S) -> Option<PositionResult> {
        self.binary.reposition(surface)
    }

    /// Attributes of the trigger.
    pub fn trigger_attrs(&self) -> Attrs {
        let open = self.binary.presence().is_open();
        Attrs::new()
            .with("id", self.context.sole_trigger_id())
            .with("aria-haspopup", "dialog")
            .with("aria-expanded", bool_str(open))
            .with("aria-controls", self.context.sole_content_id())
            .with("data-state", self.binary.presence().data_state().as_str())
            .with_disabled(self.context.disabled)
    }

    /// Attributes of the content element.
    pub fn content_attrs(&self) -> Attrs {
        let mut attrs = Attrs::new()
            .with("id", self.context.sole_content_id())
            .with("role", "dialog")
            .with("aria-labelledby", self.context.sole_trigger_id())
            .with("data-state", self.binary.presence().data_state().as_str());
        if self.binary.is_modal() {
            attrs.set("aria-modal", "true");
        }
        if let Some(position) = self.binary.position() {
            attrs.set("data-side", position.side.as_str());
            attrs.set("data-align", position.align.as_str());
        }
        attrs
    }
}

impl<H: Copy + Eq + Debug> BinaryActions<H> for Popover<H> {
    fn set_open<S: Surface<H>>(&mut self, surface: &mut S, open: bool) -> Update<bool> {
        self.binary.set_open(surface, open)
    }

    fn is_open(&self) -> bool {
        self.binary.is_open()
    }

    fn presence(&self) -> Presence {
        self.binary.presence()
    }
}
