// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host-side failures and the policy for absorbing them.

/// Failure reported by a host collaborator.
///
/// These never indicate a programming mistake in the caller: they describe a rendering
/// surface that is gone or an element that is no longer part of it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, thiserror::Error)]
pub enum HostError {
    /// The rendering surface is no longer reachable.
    #[error("host surface is disconnected")]
    Disconnected,
    /// The element handle no longer refers to an attached element.
    #[error("element is no longer attached to the host tree")]
    Detached,
    /// The element exists but could not be measured (for example, it is not laid out).
    #[error("element could not be measured")]
    Unmeasurable,
}

/// Absorb a host failure at the engine boundary.
///
/// Returns the success value, or logs the error at `debug` level under `operation` and
/// returns `None`. Failures are never retried.
pub fn swallow<T>(result: Result<T, HostError>, operation: &'static str) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(err) => {
            tracing::debug!(operation, error = %err, "ignoring host failure");
            None
        }
    }
}
