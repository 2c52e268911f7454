//! Closed Catmull-Rom spline through a ring of points, as cubic Beziers.

use ambient_fx_core::draw::{cubic_point, Path};
use ambient_fx_core::DVec2;

/// One cubic Bezier segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicSegment {
    pub start: DVec2,
    pub c1: DVec2,
    pub c2: DVec2,
    pub end: DVec2,
}

impl CubicSegment {
    pub fn eval(&self, t: f64) -> DVec2 {
        cubic_point(self.start, self.c1, self.c2, self.end, t)
    }

    /// First derivative with respect to `t`.
    pub fn tangent(&self, t: f64) -> DVec2 {
        let u = 1.0 - t;
        (self.c1 - self.start) * (3.0 * u * u)
            + (self.c2 - self.c1) * (6.0 * u * t)
            + (self.end - self.c2) * (3.0 * t * t)
    }
}

/// Segments of the closed spline through `points`, one per point.
///
/// Segment `i` runs from `P[i]` to `P[i+1]` with controls
/// `P[i] + (P[i+1] - P[i-1]) / 6` and `P[i+1] - (P[i+2] - P[i]) / 6`,
/// indices modulo `n`. Fewer than three points yield no segments.
pub fn closed_catmull_rom(points: &[DVec2]) -> Vec<CubicSegment> {
    let n = points.len();
    if n < 3 {
        return Vec::new();
    }
    let at = |i: usize| points[i % n];
    (0..n)
        .map(|i| {
            let prev = at(i + n - 1);
            let p0 = at(i);
            let p1 = at(i + 1);
            let next = at(i + 2);
            CubicSegment {
                start: p0,
                c1: p0 + (p1 - prev) / 6.0,
                c2: p1 - (next - p0) / 6.0,
                end: p1,
            }
        })
        .collect()
}

/// Builds a closed path from segments, mapping each point through `map`.
pub fn to_path(segments: &[CubicSegment], map: impl Fn(DVec2) -> DVec2) -> Path {
    let mut path = Path::new();
    let Some(first) = segments.first() else {
        return path;
    };
    path.move_to(map(first.start));
    for seg in segments {
        path.cubic_to(map(seg.c1), map(seg.c2), map(seg.end));
    }
    path.close();
    path
}
