// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trellis Focus Trap: keep Tab inside a container and put focus back afterwards.
//!
//! A [`FocusTraps`] stack holds one registration per trapped container. Activating a trap
//! captures the element that had focus (the restoration target, unless one is given through
//! [`FocusTraps::activate_with_origin`]) and optionally moves focus into the container;
//! deactivating it optionally restores focus to the captured element.
//!
//! ## Rules
//!
//! - While a trap is active, Tab on the last focusable element wraps to the first and
//!   Shift+Tab on the first wraps to the last ([`FocusTraps::on_tab`]). Focus that lands
//!   outside the container is pulled back in ([`FocusTraps::on_focus_in`]).
//! - Activating a trap on a container that already has one replaces the registration and
//!   keeps the original restoration target. Activating on a different container nests; the
//!   inner trap restores focus to whatever was focused when it was activated.
//! - Restoration is skipped when the captured element is no longer attached.
//! - Host failures are swallowed: a disconnected surface has no focus left to manage.
//!
//! ```rust
//! use trellis_focus_trap::{FocusHost, FocusTraps, TrapOptions};
//! use trellis_host::HostError;
//!
//! #[derive(Default)]
//! struct Page { focused: Option<u32> }
//!
//! impl FocusHost for Page {
//!     type Handle = u32;
//!     fn focused(&self) -> Result<Option<u32>, HostError> { Ok(self.focused) }
//!     fn focus(&mut self, target: u32) -> Result<(), HostError> {
//!         self.focused = Some(target);
//!         Ok(())
//!     }
//!     fn focusables(&self, container: u32) -> Result<Vec<u32>, HostError> {
//!         // Container 10 holds elements 11, 12, 13.
//!         Ok(if container == 10 { vec![11, 12, 13] } else { vec![] })
//!     }
//!     fn is_attached(&self, _target: u32) -> bool { true }
//! }
//!
//! let mut page = Page { focused: Some(1) };
//! let mut traps = FocusTraps::new();
//! let trap = traps.activate(&mut page, 10, TrapOptions::default());
//! assert_eq!(page.focused, Some(11));
//!
//! traps.on_tab(&mut page, true); // Shift+Tab on the first element wraps.
//! assert_eq!(page.focused, Some(13));
//!
//! traps.deactivate(&mut page, trap);
//! assert_eq!(page.focused, Some(1));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

use alloc::vec::Vec;
use core::fmt::Debug;

use smallvec::SmallVec;
use trellis_host::{EventResult, HostError, swallow};

/// Focus primitives supplied by the host.
///
/// `Handle` is an opaque reference to an element in the host tree; the engine never looks
/// inside it.
pub trait FocusHost {
    /// Opaque element handle.
    type Handle: Copy + Eq + Debug;

    /// The element that currently has focus, if any.
    fn focused(&self) -> Result<Option<Self::Handle>, HostError>;

    /// Move focus to `target`.
    fn focus(&mut self, target: Self::Handle) -> Result<(), HostError>;

    /// Tabbable descendants of `container`, in sequential navigation order.
    fn focusables(&self, container: Self::Handle) -> Result<Vec<Self::Handle>, HostError>;

    /// Whether `target` is still part of the host tree.
    fn is_attached(&self, target: Self::Handle) -> bool;

    /// An element the host wants focused first when `container` is trapped.
    ///
    /// For example, a destructive confirmation dialog may point at its cancel button.
    fn initial_focus(&self, container: Self::Handle) -> Option<Self::Handle> {
        let _ = container;
        None
    }
}

/// Identifier of an active trap.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct TrapId(u64);

/// Trap behavior switches.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TrapOptions {
    /// Move focus into the container on activation.
    pub auto_focus: bool,
    /// Restore focus to the captured element on deactivation.
    pub return_focus: bool,
}

impl Default for TrapOptions {
    fn default() -> Self {
        Self {
            auto_focus: true,
            return_focus: true,
        }
    }
}

#[derive(Clone, Debug)]
struct Registration<H> {
    id: TrapId,
    container: H,
    /// Element focused before activation.
    origin: Option<H>,
    options: TrapOptions,
    /// Last element focused inside the container, used to pull escaped focus back.
    last_focused: Option<H>,
}

/// Stack of active focus traps. The innermost (most recent) trap is in charge.
#[derive(Clone, Debug)]
pub struct FocusTraps<H> {
    stack: SmallVec<[Registration<H>; 2]>,
    next_id: u64,
}

impl<H: Copy + Eq + Debug> Default for FocusTraps<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: Copy + Eq + Debug> FocusTraps<H> {
    /// Create an empty trap stack.
    pub fn new() -> Self {
        Self {
            stack: SmallVec::new(),
            next_id: 1,
        }
    }

    /// Trap focus inside `container`, restoring focus on release to whatever is focused now.
    ///
    /// Re-activating a container that is already trapped replaces its options, moves it to
    /// the top of the stack, and keeps the original restoration target.
    pub fn activate<F>(&mut self, host: &mut F, container: H, options: TrapOptions) -> TrapId
    where
        F: FocusHost<Handle = H>,
    {
        self.register(host, container, None, options)
    }

    /// Trap focus inside `container`, restoring focus on release to `origin`.
    ///
    /// Use this when the element that should get focus back is known up front (the trigger
    /// of a popup), since the host may not have focused it before the trap was activated.
    pub fn activate_with_origin<F>(
        &mut self,
        host: &mut F,
        container: H,
        origin: H,
        options: TrapOptions,
    ) -> TrapId
    where
        F: FocusHost<Handle = H>,
    {
        self.register(host, container, Some(origin), options)
    }

    /// Release a trap.
    ///
    /// When the released trap is the innermost one and `return_focus` is set, focus goes back
    /// to the element captured at activation, unless it is no longer attached. Unknown ids
    /// are ignored, so repeated calls are safe. Returns whether a trap was released.
    pub fn deactivate<F>(&mut self, host: &mut F, id: TrapId) -> bool
    where
        F: FocusHost<Handle = H>,
    {
        let Some(pos) = self.stack.iter().position(|r| r.id == id) else {
            return false;
        };
        let innermost = pos + 1 == self.stack.len();
        let registration = self.stack.remove(pos);
        tracing::debug!(container = ?registration.container, innermost, "focus trap released");

        if innermost
            && registration.options.return_focus
            && let Some(origin) = registration.origin
        {
            if host.is_attached(origin) {
                swallow(host.focus(origin), "restore focus");
            } else {
                tracing::debug!(?origin, "restoration target detached; leaving focus alone");
            }
        }
        true
    }

    /// Release every trap, innermost first.
    pub fn deactivate_all<F>(&mut self, host: &mut F)
    where
        F: FocusHost<Handle = H>,
    {
        while let Some(id) = self.stack.last().map(|r| r.id) {
            self.deactivate(host, id);
        }
    }

    /// Handle Tab (`backward == false`) or Shift+Tab (`backward == true`).
    ///
    /// Moves focus to the next/previous focusable element of the innermost container,
    /// wrapping at the ends. Returns [`EventResult::Ignored`] when no trap is active.
    pub fn on_tab<F>(&mut self, host: &mut F, backward: bool) -> EventResult
    where
        F: FocusHost<Handle = H>,
    {
        let Some(container) = self.active_container() else {
            return EventResult::Ignored;
        };
        let Some(list) = swallow(host.focusables(container), "list focusables") else {
            return EventResult::Ignored;
        };
        if list.is_empty() {
            // Nothing tabbable: keep focus on the container itself.
            self.focus_inside(host, container);
            return EventResult::Handled;
        }

        let len = list.len();
        let current = swallow(host.focused(), "read focused element").flatten();
        let pos = current.and_then(|c| list.iter().position(|&h| h == c));
        let target = match (pos, backward) {
            (Some(i), false) => list[(i + 1) % len],
            (Some(i), true) => list[(i + len - 1) % len],
            (None, false) => list[0],
            (None, true) => list[len - 1],
        };
        tracing::trace!(?current, ?target, backward, "trapped tab");
        self.focus_inside(host, target);
        EventResult::Handled
    }

    /// Observe a focus change reported by the host.
    ///
    /// Focus inside the innermost container is remembered. Focus that escaped it is moved
    /// back to the last element focused inside (or the container) and the refocused handle
    /// is returned.
    pub fn on_focus_in<F>(&mut self, host: &mut F, target: H) -> Option<H>
    where
        F: FocusHost<Handle = H>,
    {
        let registration = self.stack.last()?;
        let container = registration.container;
        let inside = target == container
            || swallow(host.focusables(container), "list focusables")
                .is_some_and(|list| list.contains(&target));
        if inside {
            if let Some(top) = self.stack.last_mut() {
                top.last_focused = Some(target);
            }
            return None;
        }

        let back = registration
            .last_focused
            .filter(|&h| host.is_attached(h))
            .unwrap_or(container);
        tracing::trace!(escaped = ?target, ?back, "focus escaped trap");
        swallow(host.focus(back), "refocus trapped element")?;
        Some(back)
    }

    /// Whether `id` is still active.
    pub fn is_active(&self, id: TrapId) -> bool {
        self.stack.iter().any(|r| r.id == id)
    }

    /// The innermost trap, which handles Tab and escaped focus.
    pub fn innermost(&self) -> Option<TrapId> {
        self.stack.last().map(|r| r.id)
    }

    /// Container of the innermost trap.
    pub fn active_container(&self) -> Option<H> {
        self.stack.last().map(|r| r.container)
    }

    /// Number of active traps.
    pub fn len(&self) -> usize {
        self.stack.len()
    }

    /// Whether no trap is active.
    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    fn register<F>(
        &mut self,
        host: &mut F,
        container: H,
        origin: Option<H>,
        options: TrapOptions,
    ) -> TrapId
    where
        F: FocusHost<Handle = H>,
    {
        let id = if let Some(pos) = self.stack.iter().position(|r| r.container == container) {
            let mut registration = self.stack.remove(pos);
            registration.options = options;
            let id = registration.id;
            self.stack.push(registration);
            tracing::debug!(?container, "focus trap re-activated on the same container");
            id
        } else {
            let id = TrapId(self.next_id);
            self.next_id += 1;
            let origin =
                origin.or_else(|| swallow(host.focused(), "read focused element").flatten());
            self.stack.push(Registration {
                id,
                container,
                origin,
                options,
                last_focused: None,
            });
            tracing::debug!(?container, ?origin, depth = self.stack.len(), "focus trap activated");
            id
        };

        if options.auto_focus {
            let target = host.initial_focus(container).or_else(|| {
                swallow(host.focusables(container), "list focusables")
                    .and_then(|list| list.first().copied())
            });
            self.focus_inside(host, target.unwrap_or(container));
        }
        id
    }

    fn focus_inside<F>(&mut self, host: &mut F, target: H)
    where
        F: FocusHost<Handle = H>,
    {
        if swallow(host.focus(target), "focus trapped element").is_some()
            && let Some(top) = self.stack.last_mut()
        {
            top.last_focused = Some(target);
        }
    }
}
