//! Collapses a path into maximal straight segments.

use crate::geometry::{Orientation, Point, Segment};

/// Merge consecutive path steps that share an orientation.
///
/// Zero-length steps (repeated points) extend the current run instead of
/// starting a new one. A path with fewer than two distinct points yields no
/// segments. The first segment starts at `path[0]`, the last one ends at the
/// final point, and neighbours share their boundary point.
pub fn decompose(path: &[Point]) -> Vec<Segment> {
    let mut segments: Vec<Segment> = Vec::new();
    let mut run: Option<Segment> = None;
    let Some(&first) = path.first() else {
        return segments;
    };
    let mut anchor = first;

    for pair in path.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        if a == b {
            if let Some(seg) = run.as_mut() {
                seg.end = b;
            }
            continue;
        }
        let orientation = Orientation::of(a, b);
        if let Some(seg) = run.as_mut().filter(|seg| seg.orientation == orientation) {
            seg.end = b;
            continue;
        }
        if let Some(done) = run.take() {
            anchor = done.end;
            segments.push(done);
        }
        run = Some(Segment {
            start: anchor,
            end: b,
            orientation,
        });
    }

    segments.extend(run);
    segments
}
