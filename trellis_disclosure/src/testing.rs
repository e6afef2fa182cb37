// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! In-memory surface for unit tests.

use alloc::vec;
use alloc::vec::Vec;

use kurbo::{Rect, Size};
use trellis_float::{MeasureHost, ObserverId, PositionResult};
use trellis_focus_trap::FocusHost;
use trellis_host::HostError;

pub(crate) const TRIGGER: u32 = 1;
pub(crate) const OUTSIDE: u32 = 2;
pub(crate) const CONTENT: u32 = 30;
pub(crate) const CLOSE_BUTTON: u32 = 31;
pub(crate) const FIELD: u32 = 32;
/// A second floating element, opened from [`FIELD`] and mounted outside [`CONTENT`].
pub(crate) const NESTED: u32 = 40;
pub(crate) const NESTED_BUTTON: u32 = 41;

/// A page with a trigger near the top-left and content holding two focusable elements.
#[derive(Debug)]
pub(crate) struct FakeSurface {
    pub(crate) focused: Option<u32>,
    pub(crate) trigger_rect: Rect,
    pub(crate) disconnected: bool,
    /// Total `observe` calls.
    pub(crate) observations: usize,
    pub(crate) observing: Vec<ObserverId>,
    pub(crate) applied: Vec<PositionResult>,
}

impl FakeSurface {
    pub(crate) fn new() -> Self {
        Self {
            focused: None,
            trigger_rect: Rect::new(100.0, 100.0, 180.0, 130.0),
            disconnected: false,
            observations: 0,
            observing: Vec::new(),
            applied: Vec::new(),
        }
    }

    fn check(&self) -> Result<(), HostError> {
        if self.disconnected {
            Err(HostError::Disconnected)
        } else {
            Ok(())
        }
    }
}

impl FocusHost for FakeSurface {
    type Handle = u32;

    fn focused(&self) -> Result<Option<u32>, HostError> {
        self.check()?;
        Ok(self.focused)
    }

    fn focus(&mut self, target: u32) -> Result<(), HostError> {
        self.check()?;
        self.focused = Some(target);
        Ok(())
    }

    fn focusables(&self, container: u32) -> Result<Vec<u32>, HostError> {
        self.check()?;
        Ok(match container {
            CONTENT => vec![CLOSE_BUTTON, FIELD],
            NESTED => vec![NESTED_BUTTON],
            _ => Vec::new(),
        })
    }

    fn is_attached(&self, _target: u32) -> bool {
        !self.disconnected
    }
}

impl MeasureHost for FakeSurface {
    type Handle = u32;

    fn rect(&self, target: u32) -> Result<Rect, HostError> {
        self.check()?;
        match target {
            TRIGGER => Ok(self.trigger_rect),
            FIELD => Ok(Rect::new(300.0, 200.0, 380.0, 230.0)),
            _ => Err(HostError::Unmeasurable),
        }
    }

    fn size(&self, _target: u32) -> Result<Size, HostError> {
        self.check()?;
        Ok(Size::new(200.0, 120.0))
    }

    fn viewport(&self) -> Result<Rect, HostError> {
        self.check()?;
        Ok(Rect::new(0.0, 0.0, 1024.0, 768.0))
    }

    fn observe(&mut self, _anchor: u32, _floating: u32) -> Result<ObserverId, HostError> {
        self.check()?;
        self.observations += 1;
        let id = ObserverId(self.observations as u64);
        self.observing.push(id);
        Ok(id)
    }

    fn unobserve(&mut self, id: ObserverId) -> Result<(), HostError> {
        self.check()?;
        self.observing.retain(|&o| o != id);
        Ok(())
    }

    fn apply_position(&mut self, _floating: u32, result: &PositionResult) -> Result<(), HostError> {
        self.check()?;
        self.applied.push(*result);
        Ok(())
    }
}
