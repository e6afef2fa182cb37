// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trellis Host: the shared vocabulary between the interaction engine and its host.
//!
//! The Trellis crates never touch a rendering surface directly. Everything they need from
//! the outside world arrives through a small set of collaborator interfaces (focus and
//! measurement primitives, defined next to the engines that use them) plus the plain data
//! types collected here:
//!
//! - A **keyboard model** ([`Key`], [`Modifiers`], [`KeyEvent`]) covering the keys the
//!   engine reacts to: Enter, Space, arrows, Home/End, Escape, Tab, and printable
//!   characters for typeahead.
//! - An **event result** ([`EventResult`]) telling the host whether to suppress the
//!   default action of the key or pointer event it forwarded.
//! - **Layout enums** ([`Orientation`], [`TextDirection`]) with their attribute string
//!   forms.
//! - A **host error** ([`HostError`]) and the boundary policy for it ([`swallow`]).
//!
//! ## Host errors are not caller errors
//!
//! A host call can fail because the rendering surface has gone away (a closed window, a
//! disconnected session). There is nothing left to report to in that case, so engines
//! route every host result through [`swallow`], which logs the failure at `debug` level
//! and turns it into `None`.
//!
//! ```rust
//! use trellis_host::{HostError, swallow};
//!
//! let measured: Result<u32, HostError> = Err(HostError::Disconnected);
//! assert_eq!(swallow(measured, "measure anchor"), None);
//! assert_eq!(swallow(Ok::<_, HostError>(3), "measure anchor"), Some(3));
//! ```
//!
//! This crate is `no_std`.

#![no_std]

mod error;
mod keyboard;
mod layout;

pub use error::{HostError, swallow};
pub use keyboard::{EventResult, Key, KeyEvent, Modifiers};
pub use layout::{Orientation, TextDirection};
