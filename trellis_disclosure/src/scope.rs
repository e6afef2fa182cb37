// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! One focus trap stack shared by the floating widgets of a surface.

use alloc::rc::Rc;
use core::cell::RefCell;
use core::fmt::Debug;

use trellis_focus_trap::{FocusHost, FocusTraps, TrapId, TrapOptions};
use trellis_host::EventResult;

/// Shared handle to the focus trap stack of one surface.
///
/// Cloning is cheap and every clone refers to the same stack. Widgets built with the same
/// scope (see `with_focus_scope` on [`Popover`](crate::Popover), [`Menu`](crate::Menu),
/// and [`Select`](crate::Select)) nest: only the innermost open widget contains Tab and
/// pulls escaped focus back, and closing it hands control to the one below. Widgets built
/// without an explicit scope get a private one.
#[derive(Clone, Debug)]
pub struct FocusScope<H> {
    traps: Rc<RefCell<FocusTraps<H>>>,
}

impl<H: Copy + Eq + Debug> Default for FocusScope<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: Copy + Eq + Debug> FocusScope<H> {
    /// Create an empty scope.
    pub fn new() -> Self {
        Self {
            traps: Rc::new(RefCell::new(FocusTraps::new())),
        }
    }

    /// Number of active traps.
    pub fn len(&self) -> usize {
        self.traps.borrow().len()
    }

    /// Whether no trap is active.
    pub fn is_empty(&self) -> bool {
        self.traps.borrow().is_empty()
    }

    /// Container of the innermost trap.
    pub fn active_container(&self) -> Option<H> {
        self.traps.borrow().active_container()
    }

    pub(crate) fn activate<F>(
        &self,
        host: &mut F,
        container: H,
        origin: Option<H>,
        options: TrapOptions,
    ) -> TrapId
    where
        F: FocusHost<Handle = H>,
    {
        let mut traps = self.traps.borrow_mut();
        match origin {
            Some(origin) => traps.activate_with_origin(host, container, origin, options),
            None => traps.activate(host, container, options),
        }
    }

    pub(crate) fn deactivate<F>(&self, host: &mut F, id: TrapId) -> bool
    where
        F: FocusHost<Handle = H>,
    {
        self.traps.borrow_mut().deactivate(host, id)
    }

    pub(crate) fn is_innermost(&self, id: TrapId) -> bool {
        self.traps.borrow().innermost() == Some(id)
    }

    pub(crate) fn on_tab<F>(&self, host: &mut F, backward: bool) -> EventResult
    where
        F: FocusHost<Handle = H>,
    {
        self.traps.borrow_mut().on_tab(host, backward)
    }

    pub(crate) fn on_focus_in<F>(&self, host: &mut F, target: H) -> Option<H>
    where
        F: FocusHost<Handle = H>,
    {
        self.traps.borrow_mut().on_focus_in(host, target)
    }
}
