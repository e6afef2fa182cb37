// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Navigation intents and the linear stepping algorithm.

use trellis_host::{Key, Orientation, TextDirection};
use trellis_typeahead::Candidate;

/// Navigation intent inside a composite widget.
///
/// Arrow intents are interpreted according to the group's [`NavConfig`]; `Next`/`Prev`
/// always step forward/backward in traversal order.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Navigation {
    /// Step forward in traversal order.
    Next,
    /// Step backward in traversal order.
    Prev,
    /// Move up.
    Up,
    /// Move down.
    Down,
    /// Move left (mirrored under RTL).
    Left,
    /// Move right (mirrored under RTL).
    Right,
    /// Jump to the first enabled item.
    First,
    /// Jump to the last enabled item.
    Last,
}

impl Navigation {
    /// Map a key to a navigation intent.
    ///
    /// Home/PageUp map to [`Navigation::First`] and End/PageDown to [`Navigation::Last`].
    /// Tab is not a navigation intent: it leaves the group.
    pub fn from_key(key: Key) -> Option<Self> {
        match key {
            Key::ArrowUp => Some(Self::Up),
            Key::ArrowDown => Some(Self::Down),
            Key::ArrowLeft => Some(Self::Left),
            Key::ArrowRight => Some(Self::Right),
            Key::Home | Key::PageUp => Some(Self::First),
            Key::End | Key::PageDown => Some(Self::Last),
            _ => None,
        }
    }
}

/// Wrap mode configuration for stepping.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum WrapMode {
    /// Do not wrap; stepping past the ends yields no movement.
    Never,
    /// Continue from the opposite end.
    #[default]
    Loop,
}

impl From<bool> for WrapMode {
    fn from(looping: bool) -> Self {
        if looping { Self::Loop } else { Self::Never }
    }
}

/// Per-group navigation configuration.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct NavConfig {
    /// Axis the arrows operate on. `None` accepts both axes.
    pub orientation: Option<Orientation>,
    /// Text direction; RTL mirrors Left/Right.
    pub dir: TextDirection,
    /// Behavior at the ends.
    pub wrap: WrapMode,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            orientation: None,
            dir: TextDirection::Ltr,
            wrap: WrapMode::Loop,
        }
    }
}

impl NavConfig {
    /// Set the orientation using builder pattern.
    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = Some(orientation);
        self
    }

    /// Set the text direction using builder pattern.
    pub fn with_dir(mut self, dir: TextDirection) -> Self {
        self.dir = dir;
        self
    }

    /// Set the wrap mode using builder pattern.
    pub fn with_wrap(mut self, wrap: impl Into<WrapMode>) -> Self {
        self.wrap = wrap.into();
        self
    }

    fn resolve(&self, nav: Navigation) -> Option<Target> {
        let horizontal = self.orientation != Some(Orientation::Vertical);
        let vertical = self.orientation != Some(Orientation::Horizontal);
        let rtl = self.dir == TextDirection::Rtl;
        match nav {
            Navigation::First => Some(Target::First),
            Navigation::Last => Some(Target::Last),
            Navigation::Next => Some(Target::Step(Step::Forward)),
            Navigation::Prev => Some(Target::Step(Step::Backward)),
            Navigation::Up if vertical => Some(Target::Step(Step::Backward)),
            Navigation::Down if vertical => Some(Target::Step(Step::Forward)),
            Navigation::Left if horizontal => Some(Target::Step(if rtl {
                Step::Forward
            } else {
                Step::Backward
            })),
            Navigation::Right if horizontal => Some(Target::Step(if rtl {
                Step::Backward
            } else {
                Step::Forward
            })),
            _ => None,
        }
    }
}

#[derive(Copy, Clone)]
enum Step {
    Forward,
    Backward,
}

#[derive(Copy, Clone)]
enum Target {
    First,
    Last,
    Step(Step),
}

/// Compute the index focus should move to.
///
/// Starting from `current`, steps in the resolved direction skipping disabled items.
/// With [`WrapMode::Loop`] the scan continues from the opposite end; with
/// [`WrapMode::Never`] it stops at the boundary. `First`/`Last` jump to the first/last
/// enabled item regardless of wrapping. When `current` is `None` (nothing focused yet),
/// forward steps land on the first enabled item and backward steps on the last.
///
/// Returns `None` for "no movement": no enabled item, a boundary without wrapping, or an
/// arrow orthogonal to the configured orientation.
pub fn compute_next<C: Candidate>(
    items: &[C],
    current: Option<usize>,
    nav: Navigation,
    config: &NavConfig,
) -> Option<usize> {
    let len = items.len();
    if len == 0 {
        return None;
    }
    let step = match config.resolve(nav)? {
        Target::First => return first_enabled(items),
        Target::Last => return last_enabled(items),
        Target::Step(step) => step,
    };
    let Some(origin) = current.filter(|&c| c < len) else {
        return match step {
            Step::Forward => first_enabled(items),
            Step::Backward => last_enabled(items),
        };
    };

    let wrap = config.wrap == WrapMode::Loop;
    let mut idx = origin;
    for _ in 0..len {
        idx = match step {
            Step::Forward if idx + 1 < len => idx + 1,
            Step::Forward if wrap => 0,
            Step::Backward if idx > 0 => idx - 1,
            Step::Backward if wrap => len - 1,
            _ => return None,
        };
        if items[idx].is_enabled() {
            return Some(idx);
        }
    }
    None
}

/// Index of the first enabled item.
pub fn first_enabled<C: Candidate>(items: &[C]) -> Option<usize> {
    items.iter().position(Candidate::is_enabled)
}

/// Index of the last enabled item.
pub fn last_enabled<C: Candidate>(items: &[C]) -> Option<usize> {
    items.iter().rposition(Candidate::is_enabled)
}
