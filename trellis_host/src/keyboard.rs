// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Keyboard input as seen by the engine.

/// A logical key.
///
/// Hosts translate their native key events into this enum. Keys the engine never reacts
/// to map to [`Key::Other`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    /// Enter / Return.
    Enter,
    /// The space bar.
    Space,
    /// Up arrow.
    ArrowUp,
    /// Down arrow.
    ArrowDown,
    /// Left arrow.
    ArrowLeft,
    /// Right arrow.
    ArrowRight,
    /// Home.
    Home,
    /// End.
    End,
    /// Page Up.
    PageUp,
    /// Page Down.
    PageDown,
    /// Escape.
    Escape,
    /// Tab. Shift+Tab is expressed through [`Modifiers::SHIFT`].
    Tab,
    /// A character-producing key.
    Character(char),
    /// Any other key.
    Other,
}

impl Key {
    /// Map a produced character to a key, folding `' '` into [`Key::Space`].
    pub fn from_char(ch: char) -> Self {
        match ch {
            ' ' => Self::Space,
            '\r' | '\n' => Self::Enter,
            '\t' => Self::Tab,
            _ => Self::Character(ch),
        }
    }
}

bitflags::bitflags! {
    /// Modifier keys held while a key was pressed.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// Shift.
        const SHIFT   = 0b0000_0001;
        /// Control.
        const CONTROL = 0b0000_0010;
        /// Alt / Option.
        const ALT     = 0b0000_0100;
        /// Meta / Command / Windows.
        const META    = 0b0000_1000;
    }
}

/// A key press forwarded by the host.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct KeyEvent {
    /// The logical key.
    pub key: Key,
    /// Modifiers held at press time.
    pub modifiers: Modifiers,
    /// Event timestamp in milliseconds, used by typeahead to detect pauses.
    pub timestamp_ms: u64,
}

impl KeyEvent {
    /// A key press with no modifiers at time zero.
    pub fn new(key: Key) -> Self {
        Self {
            key,
            modifiers: Modifiers::empty(),
            timestamp_ms: 0,
        }
    }

    /// Set the modifiers using builder pattern.
    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Set the timestamp using builder pattern.
    pub fn at(mut self, timestamp_ms: u64) -> Self {
        self.timestamp_ms = timestamp_ms;
        self
    }

    /// Whether Shift was held.
    pub fn shift(&self) -> bool {
        self.modifiers.contains(Modifiers::SHIFT)
    }

    /// The character this press should feed to typeahead, if any.
    ///
    /// Only plain (or shifted) non-control characters qualify; chords with Control, Alt,
    /// or Meta belong to the host's shortcuts.
    pub fn printable(&self) -> Option<char> {
        let Key::Character(ch) = self.key else {
            return None;
        };
        if ch.is_control()
            || self
                .modifiers
                .intersects(Modifiers::CONTROL | Modifiers::ALT | Modifiers::META)
        {
            return None;
        }
        Some(ch)
    }
}

/// Whether the engine consumed an event.
///
/// [`EventResult::Handled`] means the host should prevent the platform's default action
/// (scrolling on arrows, form submission on Enter, and so on).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum EventResult {
    /// The engine acted on the event.
    Handled,
    /// The engine ignored the event; the host should let it through.
    Ignored,
}

impl EventResult {
    /// Returns `true` for [`EventResult::Handled`].
    pub fn is_handled(self) -> bool {
        matches!(self, Self::Handled)
    }
}
