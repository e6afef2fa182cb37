// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The open/closed coordinator behind popovers, menus, and selects.

use core::fmt::Debug;

use trellis_float::{PositionRequest, PositionResult, Positioner};
use trellis_focus_trap::{TrapId, TrapOptions};
use trellis_host::EventResult;

use crate::actions::{BinaryActions, Surface};
use crate::presence::Presence;
use crate::scope::FocusScope;
use crate::selection::Update;

/// Open state, lifecycle, focus scope, and positioning of one floating widget.
///
/// Opening goes through [`Presence::Opening`] until the content element is registered;
/// then the focus trap is activated, the positioner starts, and the state becomes
/// [`Presence::Open`]. Closing goes through [`Presence::Closing`] until the exit animation
/// reports completion (immediately when not animated); teardown runs on entering
/// [`Presence::Closed`] and returns focus to the trigger (or, without a registered trigger,
/// to whatever was focused before opening).
///
/// The focus trap lives in a [`FocusScope`]. Widgets sharing a scope nest, and only the
/// innermost open one handles Tab and escaped focus.
///
/// - Reopening while `Closing` returns straight to `Open`; nothing is registered again.
/// - Closing while `Opening` tears down whatever was set up and returns to `Closed`.
#[derive(Clone, Debug)]
pub struct BinaryDisclosure<H> {
    open: bool,
    controlled: bool,
    presence: Presence,
    animated: bool,
    modal: bool,
    trap_options: TrapOptions,
    trigger: Option<H>,
    content: Option<H>,
    traps: FocusScope<H>,
    trap: Option<TrapId>,
    positioner: Positioner<H>,
    generation: u64,
    disposed: bool,
}

impl<H: Copy + Eq + Debug> Default for BinaryDisclosure<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: Copy + Eq + Debug> BinaryDisclosure<H> {
    /// A closed, uncontrolled, non-animated, modal disclosure.
    pub fn new() -> Self {
        Self {
            open: false,
            controlled: false,
            presence: Presence::Closed,
            animated: false,
            modal: true,
            trap_options: TrapOptions::default(),
            trigger: None,
            content: None,
            traps: FocusScope::new(),
            trap: None,
            positioner: Positioner::default(),
            generation: 0,
            disposed: false,
        }
    }

    /// Wait for [`on_close_complete`](Self::on_close_complete) before tearing down,
    /// using builder pattern.
    pub fn with_animated(mut self, animated: bool) -> Self {
        self.animated = animated;
        self
    }

    /// Contain Tab and pull escaped focus back while open, using builder pattern.
    pub fn with_modal(mut self, modal: bool) -> Self {
        self.modal = modal;
        self
    }

    /// Set the focus scope options using builder pattern.
    pub fn with_trap_options(mut self, options: TrapOptions) -> Self {
        self.trap_options = options;
        self
    }

    /// Set placement preferences using builder pattern.
    pub fn with_position(mut self, request: PositionRequest) -> Self {
        self.positioner.set_request(request);
        self
    }

    /// Share a focus trap stack with other floating widgets using builder pattern.
    pub fn with_focus_scope(mut self, scope: FocusScope<H>) -> Self {
        self.traps = scope;
        self
    }

    /// Hand ownership of the open state to the caller using builder pattern.
    pub fn with_controlled(mut self, controlled: bool) -> Self {
        self.controlled = controlled;
        self
    }

    /// The focus trap stack this widget registers in.
    pub fn focus_scope(&self) -> &FocusScope<H> {
        &self.traps
    }

    /// Whether the trap contains Tab.
    pub fn is_modal(&self) -> bool {
        self.modal
    }

    /// Render generation; increases on every applied change.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// The registered trigger.
    pub fn trigger(&self) -> Option<H> {
        self.trigger
    }

    /// The registered content element.
    pub fn content(&self) -> Option<H> {
        self.content
    }

    /// Latest placement while open.
    pub fn position(&self) -> Option<&PositionResult> {
        self.positioner.result()
    }

    /// Whether a focus trap is currently registered.
    pub fn is_trapping(&self) -> bool {
        self.trap.is_some()
    }

    /// Whether the positioner is observing.
    pub fn is_positioning(&self) -> bool {
        self.positioner.is_active()
    }

    /// Whether [`dispose`](Self::dispose) was called.
    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Attach the trigger element.
    pub fn register_trigger(&mut self, trigger: H) {
        if !self.disposed {
            self.trigger = Some(trigger);
        }
    }

    /// Detach the trigger element.
    pub fn unregister_trigger(&mut self) {
        self.trigger = None;
    }

    /// Attach the content element. Completes a pending open.
    pub fn register_content<S: Surface<H>>(&mut self, surface: &mut S, content: H) {
        if self.disposed {
            return;
        }
        self.content = Some(content);
        if self.presence == Presence::Opening {
            self.finish_open(surface);
        }
    }

    /// Detach the content element. Anything set up for it is torn down; an open widget
    /// waits in `Opening` for new content.
    pub fn unregister_content<S: Surface<H>>(&mut self, surface: &mut S) {
        if self.content.take().is_none() {
            return;
        }
        self.teardown(surface);
        let next = if self.open { Presence::Opening } else { Presence::Closed };
        self.transition(next);
    }

    /// Store the authoritative open state (controlled mode) and drive the lifecycle.
    pub fn set_value<S: Surface<H>>(&mut self, surface: &mut S, open: bool) -> bool {
        if self.disposed || self.open == open {
            return false;
        }
        self.open = open;
        self.drive(surface);
        true
    }

    /// The host finished mounting the content; completes a pending open.
    pub fn on_open_complete<S: Surface<H>>(&mut self, surface: &mut S) {
        if self.presence == Presence::Opening && self.content.is_some() {
            self.finish_open(surface);
        }
    }

    /// The exit animation finished; tears down and unmounts.
    pub fn on_close_complete<S: Surface<H>>(&mut self, surface: &mut S) {
        if self.presence == Presence::Closing {
            self.teardown(surface);
            self.transition(Presence::Closed);
        }
    }

    /// Re-measure after anchor resize, scroll, or viewport resize.
    pub fn reposition<S: Surface<H>>(&mut self, surface: &mut S) -> Option<PositionResult> {
        if !self.presence.is_present() {
            return None;
        }
        self.positioner.update(surface)
    }

    /// Tab inside the content. Only a modal widget contains it, and only while no widget
    /// nested in the same scope is open.
    pub fn on_tab<S: Surface<H>>(&mut self, surface: &mut S, backward: bool) -> EventResult {
        if self.in_charge() {
            self.traps.on_tab(surface, backward)
        } else {
            EventResult::Ignored
        }
    }

    /// Focus landed on `target`. A modal widget pulls focus that escaped back inside and
    /// returns the element it refocused. A nested open widget in the same scope takes over.
    pub fn on_focus_in<S: Surface<H>>(&mut self, surface: &mut S, target: H) -> Option<H> {
        if self.in_charge() {
            self.traps.on_focus_in(surface, target)
        } else {
            None
        }
    }

    /// Tear everything down. Further operations are no-ops.
    pub fn dispose<S: Surface<H>>(&mut self, surface: &mut S) {
        if self.disposed {
            return;
        }
        self.teardown(surface);
        self.open = false;
        self.presence = Presence::Closed;
        self.disposed = true;
        tracing::debug!("binary disclosure disposed");
    }

    fn drive<S: Surface<H>>(&mut self, surface: &mut S) {
        match (self.open, self.presence) {
            (true, Presence::Closed) => {
                self.transition(Presence::Opening);
                if self.content.is_some() && !self.animated {
                    self.finish_open(surface);
                }
            }
            (true, Presence::Closing) => {
                // Teardown never ran, so trap and observer are still in place.
                self.transition(Presence::Open);
            }
            (false, Presence::Opening) => {
                self.teardown(surface);
                self.transition(Presence::Closed);
            }
            (false, Presence::Open) => {
                self.transition(Presence::Closing);
                if !self.animated {
                    self.on_close_complete(surface);
                }
            }
            _ => {}
        }
    }

    fn finish_open<S: Surface<H>>(&mut self, surface: &mut S) {
        let Some(content) = self.content else {
            return;
        };
        if let Some(trigger) = self.trigger {
            self.positioner.start(surface, trigger, content);
        }
        if self.trap.is_none() {
            let trap = self.traps.activate(surface, content, self.trigger, self.trap_options);
            self.trap = Some(trap);
        }
        self.transition(Presence::Open);
    }

    fn teardown<S: Surface<H>>(&mut self, surface: &mut S) {
        self.positioner.stop(surface);
        if let Some(trap) = self.trap.take() {
            self.traps.deactivate(surface, trap);
        }
    }

    fn in_charge(&self) -> bool {
        self.modal
            && self.presence == Presence::Open
            && self.trap.is_some_and(|trap| self.traps.is_innermost(trap))
    }

    fn transition(&mut self, next: Presence) {
        if self.presence != next {
            tracing::debug!(from = ?self.presence, to = ?next, "presence changed");
            self.presence = next;
            self.generation = self.generation.wrapping_add(1);
        }
    }
}

impl<H: Copy + Eq + Debug> BinaryActions<H> for BinaryDisclosure<H> {
    fn set_open<S: Surface<H>>(&mut self, surface: &mut S, open: bool) -> Update<bool> {
        if self.disposed || self.open == open {
            return Update::Unchanged;
        }
        if self.controlled {
            tracing::debug!(open, "open state change requested");
            return Update::Requested(open);
        }
        self.open = open;
        self.drive(surface);
        Update::Applied
    }

    fn is_open(&self) -> bool {
        self.open
    }

    fn presence(&self) -> Presence {
        self.presence
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{
        CLOSE_BUTTON, CONTENT, FIELD, FakeSurface, NESTED, NESTED_BUTTON, OUTSIDE, TRIGGER,
    };

    fn opened(animated: bool) -> (BinaryDisclosure<u32>, FakeSurface) {
        let mut surface = FakeSurface::new();
        surface.focused = Some(TRIGGER);
        let mut d = BinaryDisclosure::new().with_animated(animated);
        d.register_trigger(TRIGGER);
        d.set_open(&mut surface, true);
        d.register_content(&mut surface, CONTENT);
        (d, surface)
    }

    #[test]
    fn open_waits_for_content() {
        let mut surface = FakeSurface::new();
        let mut d = BinaryDisclosure::new();
        d.register_trigger(TRIGGER);
        assert_eq!(d.set_open(&mut surface, true), Update::Applied);
        assert_eq!(d.presence(), Presence::Opening);
        assert!(!d.is_trapping());

        d.register_content(&mut surface, CONTENT);
        assert_eq!(d.presence(), Presence::Open);
        assert!(d.is_trapping());
        assert!(d.is_positioning());
        assert!(d.position().is_some());
        assert_eq!(surface.observations, 1);
    }

    #[test]
    fn close_returns_focus_to_the_trigger() {
        let (mut d, mut surface) = opened(false);
        assert_ne!(surface.focused, Some(TRIGGER));
        assert_eq!(d.set_open(&mut surface, false), Update::Applied);
        assert_eq!(d.presence(), Presence::Closed);
        assert_eq!(surface.focused, Some(TRIGGER));
        assert!(surface.observing.is_empty());
        assert!(d.position().is_none());
    }

    #[test]
    fn close_returns_focus_to_the_trigger_when_opened_from_elsewhere() {
        let mut surface = FakeSurface::new();
        surface.focused = Some(OUTSIDE);
        let mut d = BinaryDisclosure::new();
        d.register_trigger(TRIGGER);
        d.register_content(&mut surface, CONTENT);
        d.set_open(&mut surface, true);
        assert_eq!(surface.focused, Some(CLOSE_BUTTON));

        d.set_open(&mut surface, false);
        assert_eq!(surface.focused, Some(TRIGGER));
    }

    #[test]
    fn close_returns_focus_to_the_trigger_when_nothing_was_focused() {
        let mut surface = FakeSurface::new();
        let mut d = BinaryDisclosure::new();
        d.register_trigger(TRIGGER);
        d.set_open(&mut surface, true);
        d.register_content(&mut surface, CONTENT);
        assert_eq!(surface.focused, Some(CLOSE_BUTTON));

        d.set_open(&mut surface, false);
        assert_eq!(surface.focused, Some(TRIGGER));
    }

    #[test]
    fn animated_open_of_mounted_content_completes_on_callback() {
        let mut surface = FakeSurface::new();
        let mut d = BinaryDisclosure::new().with_animated(true);
        d.register_trigger(TRIGGER);
        d.register_content(&mut surface, CONTENT);
        d.set_open(&mut surface, true);
        assert_eq!(d.presence(), Presence::Opening);
        assert!(!d.is_trapping());
        assert_eq!(surface.observations, 0);

        d.on_open_complete(&mut surface);
        assert_eq!(d.presence(), Presence::Open);
        assert!(d.is_trapping());
        assert_eq!(d.focus_scope().len(), 1);
        assert_eq!(surface.observations, 1);
        assert_eq!(surface.observing.len(), 1);
        assert_eq!(surface.focused, Some(CLOSE_BUTTON));

        // A repeated completion registers nothing new.
        d.on_open_complete(&mut surface);
        assert_eq!(d.focus_scope().len(), 1);
        assert_eq!(surface.observations, 1);
    }

    #[test]
    fn content_removed_while_open_waits_for_new_content() {
        let (mut d, mut surface) = opened(false);
        assert_eq!(surface.observations, 1);

        d.unregister_content(&mut surface);
        assert_eq!(d.presence(), Presence::Opening);
        assert!(d.is_open());
        assert!(!d.is_trapping());
        assert!(d.focus_scope().is_empty());
        assert!(surface.observing.is_empty());
        assert_eq!(surface.focused, Some(TRIGGER));

        d.register_content(&mut surface, CONTENT);
        assert_eq!(d.presence(), Presence::Open);
        assert_eq!(d.focus_scope().len(), 1);
        assert_eq!(surface.observations, 2);
        assert_eq!(surface.observing.len(), 1);
    }

    #[test]
    fn nested_widgets_in_one_scope_defer_to_the_innermost() {
        let (mut outer, mut surface) = opened(false);
        let mut inner = BinaryDisclosure::new().with_focus_scope(outer.focus_scope().clone());
        inner.register_trigger(FIELD);
        surface.focused = Some(FIELD);
        inner.set_open(&mut surface, true);
        inner.register_content(&mut surface, NESTED);
        assert_eq!(surface.focused, Some(NESTED_BUTTON));
        assert_eq!(outer.focus_scope().len(), 2);
        assert_eq!(outer.focus_scope().active_container(), Some(NESTED));

        // The nested content is mounted outside the outer one; the outer widget leaves it be.
        assert_eq!(outer.on_focus_in(&mut surface, NESTED_BUTTON), None);
        assert_eq!(outer.on_tab(&mut surface, false), EventResult::Ignored);
        assert_eq!(surface.focused, Some(NESTED_BUTTON));
        assert_eq!(inner.on_tab(&mut surface, false), EventResult::Handled);
        assert_eq!(surface.focused, Some(NESTED_BUTTON));

        inner.set_open(&mut surface, false);
        assert_eq!(surface.focused, Some(FIELD));
        assert_eq!(outer.focus_scope().active_container(), Some(CONTENT));

        // The outer widget is back in charge.
        surface.focused = Some(OUTSIDE);
        assert!(outer.on_focus_in(&mut surface, OUTSIDE).is_some());
        assert_ne!(surface.focused, Some(OUTSIDE));
    }

    #[test]
    fn reopen_during_closing_registers_nothing_new() {
        let (mut d, mut surface) = opened(true);
        d.set_open(&mut surface, false);
        assert_eq!(d.presence(), Presence::Closing);
        assert!(d.is_trapping());

        d.set_open(&mut surface, true);
        assert_eq!(d.presence(), Presence::Open);
        assert_eq!(surface.observations, 1);
        assert_eq!(surface.observing.len(), 1);
        assert!(d.is_trapping());

        // A stale completion from the cancelled close does nothing.
        d.on_close_complete(&mut surface);
        assert_eq!(d.presence(), Presence::Open);
    }

    #[test]
    fn animated_close_waits_for_completion() {
        let (mut d, mut surface) = opened(true);
        d.set_open(&mut surface, false);
        assert_eq!(d.presence(), Presence::Closing);
        assert_eq!(d.presence().data_state().as_str(), "closed");
        d.on_close_complete(&mut surface);
        assert_eq!(d.presence(), Presence::Closed);
        assert!(!d.is_trapping());
        assert!(surface.observing.is_empty());
    }

    #[test]
    fn close_during_opening_leaves_nothing_registered() {
        let mut surface = FakeSurface::new();
        let mut d = BinaryDisclosure::new().with_animated(true);
        d.register_trigger(TRIGGER);
        d.register_content(&mut surface, CONTENT);
        d.set_open(&mut surface, true);
        assert_eq!(d.presence(), Presence::Opening);

        d.set_open(&mut surface, false);
        assert_eq!(d.presence(), Presence::Closed);
        assert!(!d.is_trapping());
        assert!(!d.is_positioning());
        assert!(surface.observing.is_empty());

        // The late completion of the aborted open is ignored.
        d.on_open_complete(&mut surface);
        assert_eq!(d.presence(), Presence::Closed);
    }

    #[test]
    fn controlled_mode_requests_and_then_applies() {
        let mut surface = FakeSurface::new();
        let mut d = BinaryDisclosure::new().with_controlled(true);
        d.register_trigger(TRIGGER);
        d.register_content(&mut surface, CONTENT);
        assert_eq!(d.set_open(&mut surface, true), Update::Requested(true));
        assert_eq!(d.presence(), Presence::Closed);
        assert!(d.set_value(&mut surface, true));
        assert_eq!(d.presence(), Presence::Open);
        assert!(!d.set_value(&mut surface, true));
    }

    #[test]
    fn modal_pulls_focus_back() {
        let (mut d, mut surface) = opened(false);
        surface.focused = Some(OUTSIDE);
        assert!(d.on_focus_in(&mut surface, OUTSIDE).is_some());
        assert_ne!(surface.focused, Some(OUTSIDE));

        let mut loose = BinaryDisclosure::new().with_modal(false);
        loose.register_content(&mut surface, CONTENT);
        loose.set_open(&mut surface, true);
        assert_eq!(loose.on_tab(&mut surface, false), EventResult::Ignored);
    }

    #[test]
    fn host_disconnect_during_teardown_is_swallowed() {
        let (mut d, mut surface) = opened(false);
        surface.disconnected = true;
        d.set_open(&mut surface, false);
        assert_eq!(d.presence(), Presence::Closed);
        assert!(!d.is_trapping());
    }

    #[test]
    fn disposed_is_inert() {
        let (mut d, mut surface) = opened(false);
        d.dispose(&mut surface);
        assert_eq!(d.presence(), Presence::Closed);
        assert_eq!(d.set_open(&mut surface, true), Update::Unchanged);
        d.register_content(&mut surface, CONTENT);
        assert_eq!(d.presence(), Presence::Closed);
    }
}
