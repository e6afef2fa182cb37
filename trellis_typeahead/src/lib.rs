// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trellis Typeahead: jump to an item by typing the start of its label.
//!
//! [`Typeahead`] accumulates printable keystrokes into a case-folded search buffer and
//! resolves the buffer to the index of the next matching item. The buffer is dropped
//! whenever the user pauses for longer than the reset window
//! ([`DEFAULT_RESET_MS`] unless configured).
//!
//! ## Matching rules
//!
//! 1. The scan starts just after the current index and wraps around, so the current
//!    item is considered last.
//! 2. Only enabled candidates with a non-empty label participate; labels are compared
//!    case-insensitively by prefix.
//! 3. If nothing matches the whole buffer, the buffer collapses to the latest character
//!    and the scan repeats. Tapping the same letter therefore cycles through every item
//!    starting with it.
//! 4. If the collapsed scan also fails, the buffer is kept and nothing moves.
//!
//! ```rust
//! use trellis_typeahead::Typeahead;
//!
//! let items = ["Apple", "Banana", "Cherry"];
//! let mut search = Typeahead::new();
//!
//! assert_eq!(search.on_char('c', &items, Some(0), 1_000), Some(2));
//! // "cc" matches nothing, collapses to "c", and lands on the only "c" item again.
//! assert_eq!(search.on_char('c', &items, Some(2), 1_200), Some(2));
//! ```
//!
//! Timestamps are supplied by the caller in milliseconds, which keeps the matcher
//! deterministic and usable without a clock.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

use alloc::string::String;

/// Default pause, in milliseconds, after which the search buffer starts over.
pub const DEFAULT_RESET_MS: u64 = 700;

/// Something typeahead can match against.
pub trait Candidate {
    /// The text typeahead compares against, if any.
    fn typeahead_label(&self) -> Option<&str>;

    /// Whether the candidate can be targeted.
    fn is_enabled(&self) -> bool {
        true
    }
}

impl Candidate for &str {
    fn typeahead_label(&self) -> Option<&str> {
        Some(*self)
    }
}

impl Candidate for (&str, bool) {
    fn typeahead_label(&self) -> Option<&str> {
        Some(self.0)
    }

    fn is_enabled(&self) -> bool {
        self.1
    }
}

/// Typeahead search state.
#[derive(Clone, Debug)]
pub struct Typeahead {
    /// Accumulated, case-folded characters.
    buffer: String,
    /// Timestamp of the previous keystroke.
    last_keystroke: Option<u64>,
    /// Pause in milliseconds after which the buffer starts over.
    pub reset_ms: u64,
}

impl Default for Typeahead {
    fn default() -> Self {
        Self::new()
    }
}

impl Typeahead {
    /// Create a matcher with the default reset window.
    pub fn new() -> Self {
        Self::with_reset_window(DEFAULT_RESET_MS)
    }

    /// Create a matcher with a custom reset window in milliseconds.
    pub fn with_reset_window(reset_ms: u64) -> Self {
        Self {
            buffer: String::new(),
            last_keystroke: None,
            reset_ms,
        }
    }

    /// The current search buffer.
    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    /// Whether a search is in progress at `now_ms`.
    ///
    /// Hosts use this to decide whether Space extends the search instead of activating
    /// the focused item.
    pub fn is_searching(&self, now_ms: u64) -> bool {
        !self.buffer.is_empty() && self.within_window(now_ms)
    }

    /// Drop the buffer.
    pub fn reset(&mut self) {
        self.buffer.clear();
        self.last_keystroke = None;
    }

    /// Feed one printable character and resolve it to a target index.
    ///
    /// # Arguments
    /// * `ch` - The typed character; it is case-folded before use
    /// * `items` - Candidates in traversal order
    /// * `current` - Index of the currently focused candidate, if any
    /// * `now_ms` - Keystroke timestamp in milliseconds
    ///
    /// # Returns
    /// The index to move to, or `None` when nothing matches.
    pub fn on_char<C: Candidate>(
        &mut self,
        ch: char,
        items: &[C],
        current: Option<usize>,
        now_ms: u64,
    ) -> Option<usize> {
        if !self.within_window(now_ms) {
            self.buffer.clear();
        }
        self.buffer.extend(ch.to_lowercase());
        self.last_keystroke = Some(now_ms);

        if let Some(found) = find_match(items, current, &self.buffer) {
            tracing::trace!(buffer = %self.buffer, found, "typeahead match");
            return Some(found);
        }

        let mut single = String::new();
        single.extend(ch.to_lowercase());
        if single != self.buffer
            && let Some(found) = find_match(items, current, &single)
        {
            tracing::trace!(buffer = %single, found, "typeahead collapsed to last character");
            self.buffer = single;
            return Some(found);
        }

        tracing::trace!(buffer = %self.buffer, "typeahead found no match");
        None
    }

    fn within_window(&self, now_ms: u64) -> bool {
        self.last_keystroke
            .is_some_and(|last| now_ms.saturating_sub(last) <= self.reset_ms)
    }
}

/// First enabled candidate after `current` (wrapping) whose label starts with `prefix`.
fn find_match<C: Candidate>(items: &[C], current: Option<usize>, prefix: &str) -> Option<usize> {
    let len = items.len();
    if len == 0 || prefix.is_empty() {
        return None;
    }
    let start = current.map_or(0, |c| c.wrapping_add(1));
    (0..len)
        .map(|offset| start.wrapping_add(offset) % len)
        .find(|&idx| {
            let item = &items[idx];
            item.is_enabled()
                && item
                    .typeahead_label()
                    .is_some_and(|label| !label.is_empty() && starts_with_folded(label, prefix))
        })
}

/// Case-insensitive prefix test; `prefix` is expected to be folded already.
fn starts_with_folded(label: &str, prefix: &str) -> bool {
    let mut folded = label.chars().flat_map(char::to_lowercase);
    prefix.chars().all(|p| folded.next() == Some(p))
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRUIT: [&str; 3] = ["Apple", "Banana", "Cherry"];

    #[test]
    fn single_letter_jumps_forward() {
        let mut t = Typeahead::new();
        assert_eq!(t.on_char('c', &FRUIT, Some(0), 0), Some(2));
        assert_eq!(t.buffer(), "c");
    }

    #[test]
    fn repeated_letter_with_one_candidate_stays_put() {
        let mut t = Typeahead::new();
        assert_eq!(t.on_char('c', &FRUIT, Some(0), 0), Some(2));
        assert_eq!(t.on_char('c', &FRUIT, Some(2), 100), Some(2));
        assert_eq!(t.buffer(), "c");
    }

    #[test]
    fn repeated_letter_cycles_through_matches() {
        let items = ["Cat", "Dog", "Cow", "Crow"];
        let mut t = Typeahead::new();
        assert_eq!(t.on_char('c', &items, Some(0), 0), Some(2));
        assert_eq!(t.on_char('c', &items, Some(2), 50), Some(3));
        assert_eq!(t.on_char('c', &items, Some(3), 100), Some(0));
    }

    #[test]
    fn multi_character_prefix_refines_the_match() {
        let items = ["Banana", "Blueberry", "Blackberry"];
        let mut t = Typeahead::new();
        assert_eq!(t.on_char('b', &items, None, 0), Some(0));
        assert_eq!(t.on_char('l', &items, Some(0), 100), Some(1));
        assert_eq!(t.on_char('a', &items, Some(1), 200), Some(2));
        assert_eq!(t.buffer(), "bla");
    }

    #[test]
    fn matching_is_case_insensitive() {
        let mut t = Typeahead::new();
        assert_eq!(t.on_char('B', &FRUIT, None, 0), Some(1));
        assert_eq!(t.buffer(), "b");
    }

    #[test]
    fn pause_longer_than_window_starts_over() {
        let mut t = Typeahead::new();
        assert_eq!(t.on_char('b', &FRUIT, None, 0), Some(1));
        // Well past the reset window: "a" is a fresh search, not "ba".
        assert_eq!(t.on_char('a', &FRUIT, Some(1), 5_000), Some(0));
        assert_eq!(t.buffer(), "a");
    }

    #[test]
    fn gap_equal_to_window_still_appends() {
        let mut t = Typeahead::with_reset_window(500);
        t.on_char('b', &FRUIT, None, 0);
        t.on_char('a', &FRUIT, Some(1), 500);
        assert_eq!(t.buffer(), "ba");
    }

    #[test]
    fn disabled_and_unlabeled_candidates_are_skipped() {
        let items = [("Cherry", false), ("", true), ("Citrus", true)];
        let mut t = Typeahead::new();
        assert_eq!(t.on_char('c', &items, None, 0), Some(2));
    }

    #[test]
    fn no_match_keeps_buffer_and_reports_none() {
        let mut t = Typeahead::new();
        assert_eq!(t.on_char('a', &FRUIT, None, 0), Some(0));
        assert_eq!(t.on_char('z', &FRUIT, Some(0), 10), None);
        assert_eq!(t.buffer(), "az");
        assert!(t.is_searching(20));
        assert!(!t.is_searching(10_000));
    }

    #[test]
    fn empty_collection_never_matches() {
        let items: [&str; 0] = [];
        let mut t = Typeahead::new();
        assert_eq!(t.on_char('a', &items, None, 0), None);
    }

    #[test]
    fn reset_clears_search() {
        let mut t = Typeahead::new();
        t.on_char('a', &FRUIT, None, 0);
        t.reset();
        assert_eq!(t.buffer(), "");
        assert!(!t.is_searching(1));
    }
}
