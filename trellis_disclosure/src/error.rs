// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Configuration errors.

use trellis_roving::RegistryError;

/// A widget was wired up incorrectly.
///
/// Host failures are not represented here: they are absorbed at the engine boundary.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// An item could not be registered.
    #[error(transparent)]
    Registry(#[from] RegistryError),
}
