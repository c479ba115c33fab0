use crate::foundation::core::Point;

/// Points to process when walking from `prev` to `next`.
///
/// While a step is longer than `max_step` it is halved, depth first, so the result lists the
/// synthesized midpoints in path order followed by `next` itself. The last element is always
/// `next`; every consecutive pair in `prev, result...` is at most `max_step` apart.
pub fn split_segment(prev: Point, next: Point, max_step: f64) -> Vec<Point> {
    let mut out = Vec::new();
    push_split(prev, next, max_step, &mut out);
    out
}

fn push_split(prev: Point, next: Point, max_step: f64, out: &mut Vec<Point>) {
    let d = prev.distance(next);
    // Non-finite distances would never converge.
    if d.is_finite() && d > max_step {
        let mid = prev.midpoint(next);
        push_split(prev, mid, max_step, out);
        push_split(mid, next, max_step, out);
    } else {
        out.push(next);
    }
}

/// Resample a whole point sequence with [`split_segment`]. The first point is kept as is.
pub fn resample(points: impl IntoIterator<Item = Point>, max_step: f64) -> Vec<Point> {
    let mut out = Vec::new();
    let mut prev: Option<Point> = None;
    for p in points {
        match prev {
            Some(q) => out.extend(split_segment(q, p, max_step)),
            None => out.push(p),
        }
        prev = Some(p);
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/resample.rs"]
mod tests;
