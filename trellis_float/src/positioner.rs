// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Observation session keeping a floating element placed while it is open.

use core::fmt::Debug;

use kurbo::{Rect, Size};
use trellis_host::{HostError, swallow};

use crate::compute::compute_position;
use crate::types::{PositionRequest, PositionResult};

/// Measurement primitives supplied by the host.
pub trait MeasureHost {
    /// Opaque element handle.
    type Handle: Copy + Eq + Debug;

    /// Bounding rectangle of `target`, in viewport coordinates.
    fn rect(&self, target: Self::Handle) -> Result<Rect, HostError>;

    /// Intrinsic size of `target`.
    fn size(&self, target: Self::Handle) -> Result<Size, HostError>;

    /// The visible viewport.
    fn viewport(&self) -> Result<Rect, HostError>;

    /// Start watching `anchor` and `floating` for resize, scroll, and viewport changes.
    ///
    /// The host is expected to call [`Positioner::update`] whenever one fires.
    fn observe(&mut self, anchor: Self::Handle, floating: Self::Handle)
    -> Result<ObserverId, HostError>;

    /// Stop an observation started by [`MeasureHost::observe`].
    fn unobserve(&mut self, id: ObserverId) -> Result<(), HostError>;

    /// Write a computed placement back to the floating element.
    fn apply_position(
        &mut self,
        floating: Self::Handle,
        result: &PositionResult,
    ) -> Result<(), HostError>;
}

/// Host-issued identifier of a running observation.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ObserverId(pub u64);

#[derive(Copy, Clone, Debug)]
struct Session<H> {
    anchor: H,
    floating: H,
    observer: Option<ObserverId>,
}

/// Keeps one floating element positioned against its anchor.
///
/// A session runs from [`start`](Self::start) (on open) to [`stop`](Self::stop) (on close).
/// Host failures never escape: a failed measurement keeps the previous result, a failed
/// observation simply leaves the session without automatic updates.
#[derive(Clone, Debug)]
pub struct Positioner<H> {
    request: PositionRequest,
    session: Option<Session<H>>,
    last: Option<PositionResult>,
}

impl<H: Copy + Eq + Debug> Default for Positioner<H> {
    fn default() -> Self {
        Self::new(PositionRequest::default())
    }
}

impl<H: Copy + Eq + Debug> Positioner<H> {
    /// Create an idle positioner.
    pub fn new(request: PositionRequest) -> Self {
        Self {
            request,
            session: None,
            last: None,
        }
    }

    /// The placement preferences.
    pub fn request(&self) -> &PositionRequest {
        &self.request
    }

    /// Replace the placement preferences. Takes effect on the next [`update`](Self::update).
    pub fn set_request(&mut self, request: PositionRequest) {
        self.request = request;
    }

    /// Whether a session is running.
    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    /// The most recently applied placement of the running session.
    pub fn result(&self) -> Option<&PositionResult> {
        self.last.as_ref()
    }

    /// Begin observing `anchor`/`floating` and place the floating element.
    ///
    /// Starting again with the same pair only recomputes; a different pair replaces the
    /// running session.
    pub fn start<M>(&mut self, host: &mut M, anchor: H, floating: H) -> Option<PositionResult>
    where
        M: MeasureHost<Handle = H>,
    {
        if let Some(session) = &self.session {
            if session.anchor == anchor && session.floating == floating {
                return self.update(host);
            }
            self.stop(host);
        }
        let observer = swallow(host.observe(anchor, floating), "observe floating element");
        tracing::debug!(?anchor, ?floating, ?observer, "positioner started");
        self.session = Some(Session {
            anchor,
            floating,
            observer,
        });
        self.update(host)
    }

    /// Re-measure and re-apply. Returns `None` when idle or when measuring failed.
    pub fn update<M>(&mut self, host: &mut M) -> Option<PositionResult>
    where
        M: MeasureHost<Handle = H>,
    {
        let session = self.session?;
        let anchor = swallow(host.rect(session.anchor), "measure anchor")?;
        let size = swallow(host.size(session.floating), "measure floating element")?;
        let viewport = swallow(host.viewport(), "measure viewport")?;
        let result = compute_position(anchor, size, viewport, &self.request);
        swallow(
            host.apply_position(session.floating, &result),
            "apply floating position",
        );
        self.last = Some(result);
        Some(result)
    }

    /// End the session and discard the last result. Safe to call when idle.
    pub fn stop<M>(&mut self, host: &mut M)
    where
        M: MeasureHost<Handle = H>,
    {
        let Some(session) = self.session.take() else {
            return;
        };
        self.last = None;
        if let Some(observer) = session.observer {
            swallow(host.unobserve(observer), "stop observing floating element");
        }
        tracing::debug!(floating = ?session.floating, "positioner stopped");
    }
}
