// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pure placement math.

use kurbo::{Point, Rect, Size};

use crate::types::{Align, ArrowPlacement, PositionRequest, PositionResult, Side};

/// Compute where a floating element of `floating` size goes relative to `anchor`.
///
/// All rectangles share one coordinate space (typically the viewport's).
///
/// 1. Place against `request.side`, offset by `side_offset` (plus the arrow height), and
///    align along the edge per `align` + `align_offset`.
/// 2. With `avoid_collisions`, if the placement overflows the padded viewport on the main
///    axis, try the opposite side; if that overflows too, keep whichever side has more room.
/// 3. With `avoid_collisions`, shift along the cross axis to stay inside the padded
///    viewport. Alignment is never re-chosen.
/// 4. Derive the arrow offset from the final position.
pub fn compute_position(
    anchor: Rect,
    floating: Size,
    viewport: Rect,
    request: &PositionRequest,
) -> PositionResult {
    let pad = request.collision_padding;
    let bounds = Rect::new(
        viewport.x0 + pad.x0,
        viewport.y0 + pad.y0,
        viewport.x1 - pad.x1,
        viewport.y1 - pad.y1,
    );
    let main_offset = request.side_offset + request.arrow.map_or(0.0, |a| a.height);

    let mut side = request.side;
    let mut origin = place(anchor, floating, side, request, main_offset);
    if request.avoid_collisions && overflows_main(origin, floating, side, bounds) {
        let flipped = side.opposite();
        let alternative = place(anchor, floating, flipped, request, main_offset);
        let take_flip = !overflows_main(alternative, floating, flipped, bounds)
            || room(anchor, flipped, bounds, main_offset) > room(anchor, side, bounds, main_offset);
        if take_flip {
            tracing::trace!(from = side.as_str(), to = flipped.as_str(), "flipped floating element");
            side = flipped;
            origin = alternative;
        }
    }

    let mut clamped = false;
    if request.avoid_collisions {
        if side.is_vertical() {
            let (x, shifted) = shift(origin.x, floating.width, bounds.x0, bounds.x1);
            origin.x = x;
            clamped = shifted;
        } else {
            let (y, shifted) = shift(origin.y, floating.height, bounds.y0, bounds.y1);
            origin.y = y;
            clamped = shifted;
        }
    }

    let main_room = room(anchor, side, bounds, main_offset).max(0.0);
    let available = if side.is_vertical() {
        Size::new(bounds.width().max(0.0), main_room)
    } else {
        Size::new(main_room, bounds.height().max(0.0))
    };

    let arrow = request
        .arrow
        .map(|size| arrow_placement(anchor, floating, origin, side, size, request.arrow_padding));

    PositionResult {
        side,
        align: request.align,
        x: origin.x,
        y: origin.y,
        clamped,
        available,
        arrow,
    }
}

fn place(anchor: Rect, floating: Size, side: Side, request: &PositionRequest, main_offset: f64) -> Point {
    let align_offset = match request.align {
        Align::End => -request.align_offset,
        Align::Start | Align::Center => request.align_offset,
    };
    if side.is_vertical() {
        let x = match request.align {
            Align::Start => anchor.x0,
            Align::Center => anchor.center().x - floating.width / 2.0,
            Align::End => anchor.x1 - floating.width,
        } + align_offset;
        let y = match side {
            Side::Top => anchor.y0 - main_offset - floating.height,
            _ => anchor.y1 + main_offset,
        };
        Point::new(x, y)
    } else {
        let y = match request.align {
            Align::Start => anchor.y0,
            Align::Center => anchor.center().y - floating.height / 2.0,
            Align::End => anchor.y1 - floating.height,
        } + align_offset;
        let x = match side {
            Side::Left => anchor.x0 - main_offset - floating.width,
            _ => anchor.x1 + main_offset,
        };
        Point::new(x, y)
    }
}

fn overflows_main(origin: Point, floating: Size, side: Side, bounds: Rect) -> bool {
    match side {
        Side::Top => origin.y < bounds.y0,
        Side::Bottom => origin.y + floating.height > bounds.y1,
        Side::Left => origin.x < bounds.x0,
        Side::Right => origin.x + floating.width > bounds.x1,
    }
}

/// Space between the anchor (plus offset) and the padded viewport edge on `side`.
fn room(anchor: Rect, side: Side, bounds: Rect, main_offset: f64) -> f64 {
    match side {
        Side::Top => anchor.y0 - main_offset - bounds.y0,
        Side::Bottom => bounds.y1 - anchor.y1 - main_offset,
        Side::Left => anchor.x0 - main_offset - bounds.x0,
        Side::Right => bounds.x1 - anchor.x1 - main_offset,
    }
}

/// Keep `[start, start + len]` inside `[min, max]`, preferring the leading edge when the
/// element is larger than the range.
fn shift(start: f64, len: f64, min: f64, max: f64) -> (f64, bool) {
    if start < min || max - len < min {
        (min, start != min)
    } else if start + len > max {
        (max - len, true)
    } else {
        (start, false)
    }
}

fn arrow_placement(
    anchor: Rect,
    floating: Size,
    origin: Point,
    side: Side,
    arrow: Size,
    padding: f64,
) -> ArrowPlacement {
    let (anchor_center, floating_start, floating_len) = if side.is_vertical() {
        (anchor.center().x, origin.x, floating.width)
    } else {
        (anchor.center().y, origin.y, floating.height)
    };
    let ideal = anchor_center - floating_start - arrow.width / 2.0;
    let min = padding;
    let max = (floating_len - arrow.width - padding).max(min);
    let offset = ideal.clamp(min, max);
    ArrowPlacement {
        edge: side.opposite(),
        offset,
        centered: (min..=max).contains(&ideal),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Insets;

    const VIEWPORT: Rect = Rect::new(0.0, 0.0, 800.0, 600.0);

    #[test]
    fn anchor_near_bottom_edge_flips_to_top() {
        let anchor = Rect::new(100.0, 560.0, 200.0, 590.0);
        let req = PositionRequest::default().with_offsets(4.0, 0.0);
        let result = compute_position(anchor, Size::new(150.0, 100.0), VIEWPORT, &req);
        assert_eq!(result.side, Side::Top);
        assert_eq!(result.side.as_str(), "top");
        assert_eq!(result.y, 456.0);
        assert_eq!(result.x, 75.0);
        assert!(!result.clamped);
    }

    #[test]
    fn without_collision_avoidance_the_preferred_side_stays() {
        let anchor = Rect::new(100.0, 560.0, 200.0, 590.0);
        let req = PositionRequest::default().with_avoid_collisions(false);
        let result = compute_position(anchor, Size::new(150.0, 100.0), VIEWPORT, &req);
        assert_eq!(result.side, Side::Bottom);
        assert_eq!(result.y, 590.0);
    }

    #[test]
    fn both_sides_overflowing_picks_the_roomier_one() {
        let viewport = Rect::new(0.0, 0.0, 800.0, 300.0);
        let floating = Size::new(50.0, 200.0);
        let req = PositionRequest::default();

        // 160 below vs 120 above: stay on the bottom.
        let low = compute_position(Rect::new(0.0, 120.0, 50.0, 140.0), floating, viewport, &req);
        assert_eq!(low.side, Side::Bottom);

        // 120 below vs 160 above: flip.
        let high = compute_position(Rect::new(0.0, 160.0, 50.0, 180.0), floating, viewport, &req);
        assert_eq!(high.side, Side::Top);
        assert_eq!(high.available.height, 160.0);
    }

    #[test]
    fn cross_axis_shifts_within_padding() {
        let anchor = Rect::new(10.0, 100.0, 30.0, 120.0);
        let req = PositionRequest::default().with_collision_padding(8.0);
        let result = compute_position(anchor, Size::new(100.0, 40.0), VIEWPORT, &req);
        assert_eq!(result.side, Side::Bottom);
        assert_eq!(result.align, Align::Center);
        assert_eq!(result.x, 8.0);
        assert!(result.clamped);
    }

    #[test]
    fn shift_pins_trailing_edge() {
        let anchor = Rect::new(770.0, 100.0, 790.0, 120.0);
        let req = PositionRequest::default().with_collision_padding(Insets::uniform(10.0));
        let result = compute_position(anchor, Size::new(100.0, 40.0), VIEWPORT, &req);
        assert_eq!(result.x, 690.0);
        assert!(result.clamped);
    }

    #[test]
    fn alignment_offsets_move_away_from_the_aligned_edge() {
        let anchor = Rect::new(100.0, 100.0, 200.0, 120.0);
        let floating = Size::new(50.0, 20.0);

        let start = PositionRequest::default()
            .with_placement(Side::Bottom, Align::Start)
            .with_offsets(0.0, 5.0);
        assert_eq!(compute_position(anchor, floating, VIEWPORT, &start).x, 105.0);

        let end = PositionRequest::default()
            .with_placement(Side::Bottom, Align::End)
            .with_offsets(0.0, 5.0);
        assert_eq!(compute_position(anchor, floating, VIEWPORT, &end).x, 145.0);
    }

    #[test]
    fn horizontal_sides_flip_left_and_right() {
        let anchor = Rect::new(700.0, 100.0, 780.0, 120.0);
        let req = PositionRequest::default().with_placement(Side::Right, Align::Start);
        let result = compute_position(anchor, Size::new(100.0, 40.0), VIEWPORT, &req);
        assert_eq!(result.side, Side::Left);
        assert_eq!(result.x, 600.0);
        assert_eq!(result.y, 100.0);
    }

    #[test]
    fn arrow_tracks_anchor_center() {
        let anchor = Rect::new(100.0, 100.0, 200.0, 120.0);
        let req = PositionRequest::default().with_arrow(Size::new(10.0, 5.0), 4.0);
        let result = compute_position(anchor, Size::new(150.0, 40.0), VIEWPORT, &req);
        // The arrow height pushes the floating element further from the anchor.
        assert_eq!(result.y, 125.0);
        let arrow = result.arrow.unwrap();
        assert_eq!(arrow.edge, Side::Top);
        assert_eq!(arrow.offset, 70.0);
        assert!(arrow.centered);
    }

    #[test]
    fn arrow_is_clamped_after_a_shift() {
        let anchor = Rect::new(10.0, 100.0, 30.0, 120.0);
        let req = PositionRequest::default()
            .with_collision_padding(8.0)
            .with_arrow(Size::new(10.0, 5.0), 8.0);
        let result = compute_position(anchor, Size::new(100.0, 40.0), VIEWPORT, &req);
        let arrow = result.arrow.unwrap();
        assert_eq!(arrow.offset, 8.0);
        assert!(!arrow.centered);
    }
}
