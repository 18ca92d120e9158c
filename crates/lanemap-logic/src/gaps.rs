//! Closes small seams and overlaps between neighbouring rectangles of a lane.
//!
//! Two independent passes, x then y. Each pass orders the rectangles by
//! their leading edge and, for every adjacent pair whose gap (positive) or
//! overlap (negative gap) is narrower than the threshold, makes both meet at
//! the midpoint: the first one's far edge moves there, the second one's near
//! edge moves there with its own far edge fixed.
//!
//! A pair is skipped when meeting would leave a rectangle with no extent or
//! push the second one onto its successor's leading edge. Joining a pair only
//! moves the two edges that form its own gap, so the pass repeats over the
//! fixed order until nothing more joins, and a second application finds
//! nothing left to close.

use crate::geometry::{Axis, RoomRect};

/// Gaps at or below this width count as already closed.
pub const GAP_EPSILON: f32 = 1e-3;

/// Close gaps narrower than `threshold` along both axes, in place.
/// Slice order is preserved.
pub fn close_gaps(rects: &mut [RoomRect], threshold: f32) -> usize {
    close_axis(rects, Axis::Horizontal, threshold) + close_axis(rects, Axis::Vertical, threshold)
}

/// One pass along `axis`. Returns the number of pairs joined.
pub fn close_axis(rects: &mut [RoomRect], axis: Axis, threshold: f32) -> usize {
    let mut order: Vec<usize> = (0..rects.len()).collect();
    order.sort_by(|&a, &b| {
        rects[a]
            .start_on(axis)
            .total_cmp(&rects[b].start_on(axis))
            .then(a.cmp(&b))
    });

    let mut closed = 0;
    loop {
        let mut joined = 0;
        for p in 0..order.len().saturating_sub(1) {
            let (i, j) = (order[p], order[p + 1]);
            let prev_start = rects[i].start_on(axis);
            let prev_end = rects[i].end_on(axis);
            let next_end = rects[j].end_on(axis);
            let gap = rects[j].start_on(axis) - prev_end;
            if gap.abs() <= GAP_EPSILON || gap.abs() >= threshold {
                continue;
            }

            let mid = prev_end + gap / 2.0;
            let successor = order.get(p + 2).map(|&k| rects[k].start_on(axis));
            if mid <= prev_start || mid >= next_end || successor.is_some_and(|s| mid >= s) {
                continue;
            }
            rects[i].set_span(axis, prev_start, mid - prev_start);
            rects[j].set_span(axis, mid, next_end - mid);
            joined += 1;
        }
        if joined == 0 {
            break;
        }
        closed += joined;
    }
    closed
}
