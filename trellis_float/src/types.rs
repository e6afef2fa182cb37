// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Placement requests and results.

use kurbo::{Insets, Point, Rect, Size};

/// Side of the anchor the floating element is placed against.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Side {
    /// Above the anchor.
    Top,
    /// Right of the anchor.
    Right,
    /// Below the anchor.
    #[default]
    Bottom,
    /// Left of the anchor.
    Left,
}

impl Side {
    /// The opposite side.
    pub fn opposite(self) -> Self {
        match self {
            Self::Top => Self::Bottom,
            Self::Bottom => Self::Top,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Whether the main axis is vertical (top/bottom placement).
    pub fn is_vertical(self) -> bool {
        matches!(self, Self::Top | Self::Bottom)
    }

    /// The `data-side` attribute value.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Right => "right",
            Self::Bottom => "bottom",
            Self::Left => "left",
        }
    }
}

/// Alignment along the anchor's edge.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Align {
    /// Align the leading edges.
    Start,
    /// Center on the anchor.
    #[default]
    Center,
    /// Align the trailing edges.
    End,
}

impl Align {
    /// The `data-align` attribute value.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Center => "center",
            Self::End => "end",
        }
    }
}

/// Preferred placement of a floating element.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PositionRequest {
    /// Preferred side.
    pub side: Side,
    /// Preferred alignment.
    pub align: Align,
    /// Gap between anchor and floating element along the main axis.
    pub side_offset: f64,
    /// Shift along the cross axis, applied away from the aligned edge.
    pub align_offset: f64,
    /// Flip and shift to stay inside the viewport.
    pub avoid_collisions: bool,
    /// Viewport margin the floating element must respect, per edge.
    pub collision_padding: Insets,
    /// Size of the arrow indicator, if any. Its height extends the side offset.
    pub arrow: Option<Size>,
    /// Minimum distance between the arrow and the floating element's corners.
    pub arrow_padding: f64,
}

impl Default for PositionRequest {
    fn default() -> Self {
        Self {
            side: Side::Bottom,
            align: Align::Center,
            side_offset: 0.0,
            align_offset: 0.0,
            avoid_collisions: true,
            collision_padding: Insets::ZERO,
            arrow: None,
            arrow_padding: 0.0,
        }
    }
}

impl PositionRequest {
    /// Set side and alignment using builder pattern.
    pub fn with_placement(mut self, side: Side, align: Align) -> Self {
        self.side = side;
        self.align = align;
        self
    }

    /// Set the side and alignment offsets using builder pattern.
    pub fn with_offsets(mut self, side_offset: f64, align_offset: f64) -> Self {
        self.side_offset = side_offset;
        self.align_offset = align_offset;
        self
    }

    /// Set collision avoidance using builder pattern.
    pub fn with_avoid_collisions(mut self, avoid: bool) -> Self {
        self.avoid_collisions = avoid;
        self
    }

    /// Set the collision padding using builder pattern.
    pub fn with_collision_padding(mut self, padding: impl Into<Insets>) -> Self {
        self.collision_padding = padding.into();
        self
    }

    /// Add an arrow indicator using builder pattern.
    pub fn with_arrow(mut self, size: Size, padding: f64) -> Self {
        self.arrow = Some(size);
        self.arrow_padding = padding;
        self
    }
}

/// Where the arrow sits on the floating element.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ArrowPlacement {
    /// Edge of the floating element carrying the arrow (facing the anchor).
    pub edge: Side,
    /// Distance of the arrow's leading edge from the floating element's leading edge,
    /// along the cross axis.
    pub offset: f64,
    /// Whether the arrow could point at the anchor's center without leaving the padding.
    pub centered: bool,
}

/// Resolved placement.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PositionResult {
    /// Side actually used (may be flipped).
    pub side: Side,
    /// Alignment actually used.
    pub align: Align,
    /// Absolute x of the floating element's origin.
    pub x: f64,
    /// Absolute y of the floating element's origin.
    pub y: f64,
    /// Whether the cross axis was shifted to stay on screen.
    pub clamped: bool,
    /// Space available for the floating element on the resolved side.
    pub available: Size,
    /// Arrow placement, when an arrow was requested.
    pub arrow: Option<ArrowPlacement>,
}

impl PositionResult {
    /// The floating element's origin.
    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// The floating element's rectangle for a given size.
    pub fn rect(&self, size: Size) -> Rect {
        Rect::from_origin_size(self.origin(), size)
    }
}
