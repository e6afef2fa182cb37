// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Mount/animation state of binary widgets.

use crate::attrs::DataState;

/// Where a binary widget is in its open/close lifecycle.
///
/// ```text
///   Closed ──open──▶ Opening ──content ready──▶ Open
///     ▲                 │                       │
///     │               close                   close
///     │  (abort setup)  │                       ▼
///     └─────────────────┴◀──close complete── Closing ──reopen──▶ Open
/// ```
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Presence {
    /// Content unmounted; nothing registered.
    #[default]
    Closed,
    /// Open requested; waiting for the content to register and be measured.
    Opening,
    /// Content mounted, focus and positioning set up.
    Open,
    /// Close requested; waiting for the exit animation.
    Closing,
}

impl Presence {
    /// Whether the widget is logically open (`Opening` or `Open`).
    pub fn is_open(self) -> bool {
        matches!(self, Self::Opening | Self::Open)
    }

    /// Whether the content should be mounted.
    pub fn is_present(self) -> bool {
        self != Self::Closed
    }

    /// The `data-state` for the trigger and content.
    pub fn data_state(self) -> DataState {
        DataState::open(self.is_open())
    }
}
