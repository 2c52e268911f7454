//! Immediate-mode 2D drawing seam.
//!
//! CPU effects paint through [`DrawContext`], which mirrors the subset of a
//! browser 2D canvas they use: gradient and solid paints, stroked and filled
//! paths, rectangles, and circles. Coordinates are in CSS pixels; the
//! context owns the mapping to backing-store pixels set by
//! [`DrawContext::resize`].
//!
//! [`Recorder`] is a context that stores commands instead of painting, used
//! by tests to count draw calls and compare frames.

use crate::color::Rgba;
use glam::DVec2;
use serde::{Deserialize, Serialize};

/// One color stop of a gradient; `offset` is in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GradientStop {
    pub offset: f64,
    pub color: Rgba,
}

impl GradientStop {
    pub fn new(offset: f64, color: Rgba) -> Self {
        Self { offset, color }
    }
}

/// Fill or stroke style.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Paint {
    Solid(Rgba),
    /// Gradient along the segment `from -> to`, clamped beyond its ends.
    Linear {
        from: DVec2,
        to: DVec2,
        stops: Vec<GradientStop>,
    },
    /// Gradient between two concentric circles.
    Radial {
        center: DVec2,
        inner_radius: f64,
        outer_radius: f64,
        stops: Vec<GradientStop>,
    },
}

impl Paint {
    /// Color of this paint at `point`.
    pub fn color_at(&self, point: DVec2) -> Rgba {
        match self {
            Paint::Solid(c) => *c,
            Paint::Linear { from, to, stops } => {
                let axis = *to - *from;
                let len2 = axis.length_squared();
                let t = if len2 > 0.0 {
                    (point - *from).dot(axis) / len2
                } else {
                    0.0
                };
                sample_stops(stops, t)
            }
            Paint::Radial {
                center,
                inner_radius,
                outer_radius,
                stops,
            } => {
                let span = outer_radius - inner_radius;
                let d = point.distance(*center);
                let t = if span > 0.0 {
                    (d - inner_radius) / span
                } else if d >= *outer_radius {
                    1.0
                } else {
                    0.0
                };
                sample_stops(stops, t)
            }
        }
    }

    /// Whether the paint can never produce a visible pixel.
    pub fn is_invisible(&self) -> bool {
        match self {
            Paint::Solid(c) => c.a <= 0.0,
            Paint::Linear { stops, .. } | Paint::Radial { stops, .. } => {
                stops.iter().all(|s| s.color.a <= 0.0)
            }
        }
    }
}

fn sample_stops(stops: &[GradientStop], t: f64) -> Rgba {
    let (Some(first), Some(last)) = (stops.first(), stops.last()) else {
        return Rgba::TRANSPARENT;
    };
    let t = t.clamp(0.0, 1.0);
    if t <= first.offset {
        return first.color;
    }
    if t >= last.offset {
        return last.color;
    }
    for pair in stops.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        if t >= a.offset && t <= b.offset {
            let span = b.offset - a.offset;
            let local = if span > 0.0 { (t - a.offset) / span } else { 1.0 };
            return a.color.mix(b.color, local);
        }
    }
    last.color
}

/// Path segment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PathSegment {
    MoveTo(DVec2),
    LineTo(DVec2),
    CubicTo(DVec2, DVec2, DVec2),
    Close,
}

/// Flattening resolution for cubic segments.
const CUBIC_STEPS: usize = 16;

/// A sequence of subpaths built from move, line and cubic segments.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Path {
    segments: Vec<PathSegment>,
}

impl Path {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn move_to(&mut self, p: DVec2) -> &mut Self {
        self.segments.push(PathSegment::MoveTo(p));
        self
    }

    pub fn line_to(&mut self, p: DVec2) -> &mut Self {
        self.segments.push(PathSegment::LineTo(p));
        self
    }

    pub fn cubic_to(&mut self, c1: DVec2, c2: DVec2, end: DVec2) -> &mut Self {
        self.segments.push(PathSegment::CubicTo(c1, c2, end));
        self
    }

    pub fn close(&mut self) -> &mut Self {
        self.segments.push(PathSegment::Close);
        self
    }

    /// Open polyline through `points`.
    pub fn polyline(points: &[DVec2]) -> Self {
        let mut path = Self::new();
        if let Some((first, rest)) = points.split_first() {
            path.move_to(*first);
            for p in rest {
                path.line_to(*p);
            }
        }
        path
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Converts the path to polylines, one per subpath.
    ///
    /// Returns `(points, closed)` pairs. Cubics are sampled uniformly in
    /// their parameter.
    pub fn flatten(&self) -> Vec<(Vec<DVec2>, bool)> {
        let mut out = Vec::new();
        let mut current: Vec<DVec2> = Vec::new();
        for seg in &self.segments {
            match *seg {
                PathSegment::MoveTo(p) => {
                    if current.len() > 1 {
                        out.push((std::mem::take(&mut current), false));
                    }
                    current.clear();
                    current.push(p);
                }
                PathSegment::LineTo(p) => current.push(p),
                PathSegment::CubicTo(c1, c2, end) => {
                    let start = current.last().copied().unwrap_or(c1);
                    if current.is_empty() {
                        current.push(start);
                    }
                    for i in 1..=CUBIC_STEPS {
                        let t = i as f64 / CUBIC_STEPS as f64;
                        current.push(cubic_point(start, c1, c2, end, t));
                    }
                }
                PathSegment::Close => {
                    if current.len() > 1 {
                        let first = current[0];
                        out.push((std::mem::take(&mut current), true));
                        current.push(first);
                    }
                }
            }
        }
        if current.len() > 1 {
            out.push((current, false));
        }
        out
    }

    /// Axis-aligned bounds of the flattened path as `(min, max)`.
    pub fn bounds(&self) -> Option<(DVec2, DVec2)> {
        self.flatten()
            .iter()
            .flat_map(|(pts, _)| pts.iter().copied())
            .fold(None, |acc, p| match acc {
                None => Some((p, p)),
                Some((lo, hi)) => Some((lo.min(p), hi.max(p))),
            })
    }
}

/// Point on a cubic Bezier at parameter `t`.
pub fn cubic_point(p0: DVec2, p1: DVec2, p2: DVec2, p3: DVec2, t: f64) -> DVec2 {
    let u = 1.0 - t;
    p0 * (u * u * u) + p1 * (3.0 * u * u * t) + p2 * (3.0 * u * t * t) + p3 * (t * t * t)
}

/// Drawing surface used by CPU effects.
///
/// Implementations must tolerate any input (empty paths, zero radii,
/// invisible paints) without panicking.
pub trait DrawContext {
    /// Sets the backing-store size in device pixels and the CSS-to-device scale.
    ///
    /// Resets the transform to `scale`; drawing state outside the context
    /// (particles, branches) is unaffected.
    fn resize(&mut self, px_width: u32, px_height: u32, scale: f64);

    /// Clears the whole surface to transparent.
    fn clear(&mut self);

    fn stroke_path(&mut self, path: &Path, paint: &Paint, width: f64);

    fn fill_path(&mut self, path: &Path, paint: &Paint);

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, paint: &Paint);

    fn fill_circle(&mut self, center: DVec2, radius: f64, paint: &Paint);
}

/// A recorded draw call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawCommand {
    Clear,
    StrokePath { path: Path, paint: Paint, width: f64 },
    FillPath { path: Path, paint: Paint },
    FillRect { x: f64, y: f64, width: f64, height: f64, paint: Paint },
    FillCircle { center: DVec2, radius: f64, paint: Paint },
}

/// [`DrawContext`] that records commands.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Recorder {
    commands: Vec<DrawCommand>,
    backing: (u32, u32),
    scale: f64,
}

impl Recorder {
    pub fn new() -> Self {
        Self {
            scale: 1.0,
            ..Self::default()
        }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Number of draw calls issued, including clears. Resizes are not draws.
    pub fn draw_calls(&self) -> usize {
        self.commands.len()
    }

    /// Backing-store size from the last resize.
    pub fn backing_size(&self) -> (u32, u32) {
        self.backing
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Returns the commands recorded so far and starts a fresh frame.
    pub fn take(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }
}

impl DrawContext for Recorder {
    fn resize(&mut self, px_width: u32, px_height: u32, scale: f64) {
        self.backing = (px_width, px_height);
        self.scale = scale;
    }

    fn clear(&mut self) {
        self.commands.push(DrawCommand::Clear);
    }

    fn stroke_path(&mut self, path: &Path, paint: &Paint, width: f64) {
        self.commands.push(DrawCommand::StrokePath {
            path: path.clone(),
            paint: paint.clone(),
            width,
        });
    }

    fn fill_path(&mut self, path: &Path, paint: &Paint) {
        self.commands.push(DrawCommand::FillPath {
            path: path.clone(),
            paint: paint.clone(),
        });
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, paint: &Paint) {
        self.commands.push(DrawCommand::FillRect {
            x,
            y,
            width,
            height,
            paint: paint.clone(),
        });
    }

    fn fill_circle(&mut self, center: DVec2, radius: f64, paint: &Paint) {
        self.commands.push(DrawCommand::FillCircle {
            center,
            radius,
            paint: paint.clone(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Srgb;

    fn red(a: f64) -> Rgba {
        Srgb::new(1.0, 0.0, 0.0).with_alpha(a)
    }

    #[test]
    fn linear_paint_interpolates_and_clamps() {
        let paint = Paint::Linear {
            from: DVec2::new(0.0, 0.0),
            to: DVec2::new(100.0, 0.0),
            stops: vec![GradientStop::new(0.0, red(0.0)), GradientStop::new(1.0, red(1.0))],
        };
        assert!((paint.color_at(DVec2::new(50.0, 20.0)).a - 0.5).abs() < 1e-12);
        assert_eq!(paint.color_at(DVec2::new(-10.0, 0.0)).a, 0.0);
        assert_eq!(paint.color_at(DVec2::new(500.0, 0.0)).a, 1.0);
    }

    #[test]
    fn linear_paint_with_three_stops_peaks_in_middle() {
        let paint = Paint::Linear {
            from: DVec2::ZERO,
            to: DVec2::new(1.0, 0.0),
            stops: vec![
                GradientStop::new(0.0, red(0.0)),
                GradientStop::new(0.5, red(0.8)),
                GradientStop::new(1.0, red(0.0)),
            ],
        };
        assert!((paint.color_at(DVec2::new(0.5, 0.0)).a - 0.8).abs() < 1e-12);
        assert!((paint.color_at(DVec2::new(0.75, 0.0)).a - 0.4).abs() < 1e-12);
    }

    #[test]
    fn radial_paint_measures_from_inner_radius() {
        let paint = Paint::Radial {
            center: DVec2::ZERO,
            inner_radius: 10.0,
            outer_radius: 110.0,
            stops: vec![GradientStop::new(0.0, red(1.0)), GradientStop::new(1.0, red(0.0))],
        };
        assert_eq!(paint.color_at(DVec2::new(5.0, 0.0)).a, 1.0);
        assert!((paint.color_at(DVec2::new(0.0, 60.0)).a - 0.5).abs() < 1e-12);
        assert_eq!(paint.color_at(DVec2::new(200.0, 0.0)).a, 0.0);
    }

    #[test]
    fn empty_gradient_is_transparent() {
        let paint = Paint::Linear {
            from: DVec2::ZERO,
            to: DVec2::X,
            stops: vec![],
        };
        assert_eq!(paint.color_at(DVec2::ZERO), Rgba::TRANSPARENT);
        assert!(paint.is_invisible());
    }

    #[test]
    fn flatten_splits_subpaths_and_marks_closed() {
        let mut path = Path::new();
        path.move_to(DVec2::ZERO)
            .line_to(DVec2::X)
            .line_to(DVec2::Y)
            .close()
            .move_to(DVec2::new(5.0, 5.0))
            .line_to(DVec2::new(6.0, 5.0));
        let parts = path.flatten();
        assert_eq!(parts.len(), 2);
        assert!(parts[0].1);
        assert_eq!(parts[0].0.len(), 3);
        assert!(!parts[1].1);
    }

    #[test]
    fn cubic_flatten_hits_endpoints() {
        let mut path = Path::new();
        path.move_to(DVec2::ZERO)
            .cubic_to(DVec2::new(0.0, 1.0), DVec2::new(1.0, 1.0), DVec2::new(1.0, 0.0));
        let parts = path.flatten();
        let pts = &parts[0].0;
        assert_eq!(pts.first(), Some(&DVec2::ZERO));
        assert!(pts.last().unwrap().distance(DVec2::new(1.0, 0.0)) < 1e-12);
        let (lo, hi) = path.bounds().unwrap();
        assert!(hi.y > 0.7 && hi.y <= 0.75 + 1e-12, "peak {}", hi.y);
        assert_eq!(lo, DVec2::ZERO);
    }

    #[test]
    fn recorder_counts_draws_but_not_resizes() {
        let mut rec = Recorder::new();
        rec.resize(200, 100, 2.0);
        assert_eq!(rec.draw_calls(), 0);
        rec.clear();
        rec.fill_circle(DVec2::ZERO, 3.0, &Paint::Solid(red(1.0)));
        assert_eq!(rec.draw_calls(), 2);
        assert_eq!(rec.backing_size(), (200, 100));
        assert_eq!(rec.take().len(), 2);
        assert_eq!(rec.draw_calls(), 0);
    }
}
