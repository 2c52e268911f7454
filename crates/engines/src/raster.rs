//! Software [`DrawContext`] that paints into an RGBA buffer.
//!
//! Pixels are stored premultiplied and composited source-over. Fills use
//! nonzero winding with four sub-scanlines per row; strokes, circles and
//! rectangles get analytic edge coverage. Paints are evaluated in CSS
//! pixels at each device pixel center.

use ambient_fx_core::draw::{DrawContext, Paint, Path};
use ambient_fx_core::{DVec2, FxError, Rgba};

const SUBSAMPLES: usize = 4;

/// Largest backing store a raster will allocate, in device pixels. Covers
/// a 7680x4320 surface.
pub const MAX_PIXELS: usize = 1 << 25;

/// Device pixel count of a `width` x `height` target.
///
/// # Errors
///
/// Returns `FxError::InvalidDimensions` if the product overflows or exceeds
/// [`MAX_PIXELS`].
pub fn pixel_count(width: u32, height: u32) -> Result<usize, FxError> {
    (width as usize)
        .checked_mul(height as usize)
        .filter(|&n| n <= MAX_PIXELS)
        .ok_or(FxError::InvalidDimensions)
}

/// CPU raster target.
#[derive(Debug, Clone, PartialEq)]
pub struct Raster {
    width: u32,
    height: u32,
    scale: f64,
    /// Premultiplied RGBA, row-major from the top-left.
    data: Vec<[f32; 4]>,
}

impl Raster {
    /// Creates a transparent raster. Zero-sized rasters are allowed and
    /// ignore every draw.
    ///
    /// # Errors
    ///
    /// Returns `FxError::InvalidDimensions` when the pixel count is out of
    /// range (see [`pixel_count`]).
    pub fn new(width: u32, height: u32, scale: f64) -> Result<Self, FxError> {
        let len = pixel_count(width, height)?;
        Ok(Self {
            width,
            height,
            scale: if scale.is_finite() && scale > 0.0 { scale } else { 1.0 },
            data: vec![[0.0; 4]; len],
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Straight-alpha color of a device pixel.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let [r, g, b, a] = self.data[(y * self.width + x) as usize];
        if a <= 0.0 {
            return Some(Rgba::TRANSPARENT);
        }
        let a = f64::from(a);
        Some(Rgba {
            r: f64::from(r) / a,
            g: f64::from(g) / a,
            b: f64::from(b) / a,
            a,
        })
    }

    /// Straight-alpha RGBA8 bytes, top row first.
    pub fn to_rgba8(&self) -> Vec<u8> {
        let q = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        self.data
            .iter()
            .flat_map(|&[r, g, b, a]| {
                if a <= 0.0 {
                    [0, 0, 0, 0]
                } else {
                    [q(r / a), q(g / a), q(b / a), q(a)]
                }
            })
            .collect()
    }

    fn to_device(&self, p: DVec2) -> DVec2 {
        p * self.scale
    }

    /// Pixel index range `[x0, x1) x [y0, y1)` touched by a device-space box.
    fn clip(&self, lo: DVec2, hi: DVec2) -> Option<(u32, u32, u32, u32)> {
        if !(lo.is_finite() && hi.is_finite()) {
            return None;
        }
        let x0 = lo.x.floor().max(0.0);
        let y0 = lo.y.floor().max(0.0);
        let x1 = hi.x.ceil().min(f64::from(self.width));
        let y1 = hi.y.ceil().min(f64::from(self.height));
        if x0 >= x1 || y0 >= y1 {
            return None;
        }
        Some((x0 as u32, y0 as u32, x1 as u32, y1 as u32))
    }

    fn blend(&mut self, x: u32, y: u32, color: Rgba, coverage: f64) {
        let a = (color.a * coverage).clamp(0.0, 1.0) as f32;
        if a <= 0.0 {
            return;
        }
        let dst = &mut self.data[(y * self.width + x) as usize];
        let src = [color.r as f32 * a, color.g as f32 * a, color.b as f32 * a, a];
        for k in 0..4 {
            dst[k] = src[k] + dst[k] * (1.0 - a);
        }
    }

    fn shade(&mut self, x: u32, y: u32, paint: &Paint, coverage: f64) {
        if coverage <= 0.0 {
            return;
        }
        let center = DVec2::new(f64::from(x) + 0.5, f64::from(y) + 0.5) / self.scale;
        let color = paint.color_at(center);
        self.blend(x, y, color, coverage.min(1.0));
    }

    /// Paints every pixel of the box with the coverage `cov` gives at its
    /// device-space center.
    fn cover(&mut self, lo: DVec2, hi: DVec2, paint: &Paint, cov: impl Fn(DVec2) -> f64) {
        let Some((x0, y0, x1, y1)) = self.clip(lo, hi) else {
            return;
        };
        for y in y0..y1 {
            for x in x0..x1 {
                let c = cov(DVec2::new(f64::from(x) + 0.5, f64::from(y) + 0.5));
                self.shade(x, y, paint, c);
            }
        }
    }
}

fn segment_distance(p: DVec2, a: DVec2, b: DVec2) -> f64 {
    let ab = b - a;
    let len2 = ab.length_squared();
    let t = if len2 > 0.0 { ((p - a).dot(ab) / len2).clamp(0.0, 1.0) } else { 0.0 };
    p.distance(a + ab * t)
}

fn points_bounds(points: &[DVec2]) -> (DVec2, DVec2) {
    points.iter().fold(
        (DVec2::splat(f64::INFINITY), DVec2::splat(f64::NEG_INFINITY)),
        |(lo, hi), p| (lo.min(*p), hi.max(*p)),
    )
}

impl DrawContext for Raster {
    /// An out-of-range size leaves an empty raster that ignores draws.
    fn resize(&mut self, px_width: u32, px_height: u32, scale: f64) {
        *self = Raster::new(px_width, px_height, scale).unwrap_or_else(|e| {
            tracing::warn!(px_width, px_height, error = %e, "raster resize rejected");
            Raster {
                width: 0,
                height: 0,
                scale: 1.0,
                data: Vec::new(),
            }
        });
    }

    fn clear(&mut self) {
        self.data.iter_mut().for_each(|p| *p = [0.0; 4]);
    }

    fn stroke_path(&mut self, path: &Path, paint: &Paint, width: f64) {
        if paint.is_invisible() || !(width.is_finite() && width > 0.0) {
            return;
        }
        let device_width = width * self.scale;
        // hairlines keep a 1px footprint and fade instead of thinning
        let half = (device_width * 0.5).max(0.5);
        let fade = device_width.min(1.0);

        for (points, closed) in path.flatten() {
            let mut pts: Vec<DVec2> = points.iter().map(|p| self.to_device(*p)).collect();
            if closed {
                if let Some(&first) = pts.first() {
                    pts.push(first);
                }
            }
            if pts.len() < 2 {
                continue;
            }
            let (lo, hi) = points_bounds(&pts);
            let pad = DVec2::splat(half + 1.0);
            self.cover(lo - pad, hi + pad, paint, |c| {
                let d = pts
                    .windows(2)
                    .map(|w| segment_distance(c, w[0], w[1]))
                    .fold(f64::INFINITY, f64::min);
                (half + 0.5 - d).clamp(0.0, 1.0) * fade
            });
        }
    }

    fn fill_path(&mut self, path: &Path, paint: &Paint) {
        if paint.is_invisible() {
            return;
        }
        let rings: Vec<Vec<DVec2>> = path
            .flatten()
            .into_iter()
            .map(|(pts, _)| pts.iter().map(|p| self.to_device(*p)).collect::<Vec<_>>())
            .filter(|pts| pts.len() >= 3)
            .collect();
        let all: Vec<DVec2> = rings.iter().flatten().copied().collect();
        if all.is_empty() {
            return;
        }
        let (lo, hi) = points_bounds(&all);
        let Some((x0, y0, x1, y1)) = self.clip(lo, hi) else {
            return;
        };

        let span = (x1 - x0) as usize;
        let mut row = vec![0.0_f64; span];
        let mut crossings: Vec<(f64, i32)> = Vec::new();
        for y in y0..y1 {
            row.iter_mut().for_each(|c| *c = 0.0);
            for s in 0..SUBSAMPLES {
                let sy = f64::from(y) + (s as f64 + 0.5) / SUBSAMPLES as f64;
                crossings.clear();
                for ring in &rings {
                    let n = ring.len();
                    for i in 0..n {
                        let a = ring[i];
                        let b = ring[(i + 1) % n];
                        if (a.y <= sy) != (b.y <= sy) {
                            let x = a.x + (sy - a.y) * (b.x - a.x) / (b.y - a.y);
                            crossings.push((x, if b.y > a.y { 1 } else { -1 }));
                        }
                    }
                }
                crossings.sort_by(|l, r| l.0.total_cmp(&r.0));
                let mut winding = 0;
                for pair in crossings.windows(2) {
                    winding += pair[0].1;
                    if winding == 0 {
                        continue;
                    }
                    let (start, end) = (pair[0].0, pair[1].0);
                    for (i, cell) in row.iter_mut().enumerate() {
                        let cx = f64::from(x0) + i as f64 + 0.5;
                        if cx >= start && cx < end {
                            *cell += 1.0 / SUBSAMPLES as f64;
                        }
                    }
                }
            }
            for (i, &c) in row.iter().enumerate() {
                self.shade(x0 + i as u32, y, paint, c);
            }
        }
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, paint: &Paint) {
        if paint.is_invisible() {
            return;
        }
        let a = self.to_device(DVec2::new(x, y));
        let b = self.to_device(DVec2::new(x + width, y + height));
        let (lo, hi) = (a.min(b), a.max(b));
        self.cover(lo, hi, paint, |c| {
            let ox = ((c.x + 0.5).min(hi.x) - (c.x - 0.5).max(lo.x)).max(0.0);
            let oy = ((c.y + 0.5).min(hi.y) - (c.y - 0.5).max(lo.y)).max(0.0);
            ox * oy
        });
    }

    fn fill_circle(&mut self, center: DVec2, radius: f64, paint: &Paint) {
        if paint.is_invisible() || !(radius.is_finite() && radius > 0.0) {
            return;
        }
        let c = self.to_device(center);
        let r = radius * self.scale;
        let pad = DVec2::splat(r + 1.0);
        self.cover(c - pad, c + pad, paint, |p| (r + 0.5 - p.distance(c)).clamp(0.0, 1.0));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ambient_fx_core::draw::GradientStop;

    fn solid(r: f64, g: f64, b: f64, a: f64) -> Paint {
        Paint::Solid(Rgba { r, g, b, a })
    }

    fn alpha(r: &Raster, x: u32, y: u32) -> f64 {
        r.pixel(x, y).unwrap().a
    }

    #[test]
    fn new_raster_is_transparent() {
        let r = Raster::new(4, 3, 1.0).unwrap();
        assert_eq!(r.to_rgba8(), vec![0; 4 * 3 * 4]);
    }

    #[test]
    fn rect_covers_exact_pixels() {
        let mut r = Raster::new(8, 8, 1.0).unwrap();
        r.fill_rect(2.0, 2.0, 3.0, 2.0, &solid(1.0, 0.0, 0.0, 1.0));
        assert_eq!(alpha(&r, 2, 2), 1.0);
        assert_eq!(alpha(&r, 4, 3), 1.0);
        assert_eq!(alpha(&r, 5, 3), 0.0);
        assert_eq!(alpha(&r, 2, 4), 0.0);
        assert_eq!(r.pixel(3, 3).unwrap().r, 1.0);
    }

    #[test]
    fn half_pixel_rect_gives_half_coverage() {
        let mut r = Raster::new(2, 1, 1.0).unwrap();
        r.fill_rect(0.0, 0.0, 0.5, 1.0, &solid(1.0, 1.0, 1.0, 1.0));
        assert!((alpha(&r, 0, 0) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn source_over_accumulates_alpha() {
        let mut r = Raster::new(1, 1, 1.0).unwrap();
        let half = solid(0.0, 0.0, 1.0, 0.5);
        r.fill_rect(0.0, 0.0, 1.0, 1.0, &half);
        r.fill_rect(0.0, 0.0, 1.0, 1.0, &half);
        assert!((alpha(&r, 0, 0) - 0.75).abs() < 1e-6);

        r.fill_rect(0.0, 0.0, 1.0, 1.0, &solid(1.0, 0.0, 0.0, 0.5));
        let px = r.pixel(0, 0).unwrap();
        assert!(px.r > 0.5 && px.b > 0.0);
    }

    #[test]
    fn clear_resets_everything() {
        let mut r = Raster::new(4, 4, 1.0).unwrap();
        r.fill_rect(0.0, 0.0, 4.0, 4.0, &solid(1.0, 1.0, 1.0, 1.0));
        r.clear();
        assert!(r.to_rgba8().iter().all(|&b| b == 0));
    }

    #[test]
    fn circle_is_solid_inside_and_empty_outside() {
        let mut r = Raster::new(20, 20, 1.0).unwrap();
        r.fill_circle(DVec2::new(10.0, 10.0), 5.0, &solid(1.0, 1.0, 1.0, 1.0));
        assert_eq!(alpha(&r, 10, 10), 1.0);
        assert_eq!(alpha(&r, 0, 0), 0.0);
        assert_eq!(alpha(&r, 17, 10), 0.0);
    }

    #[test]
    fn filled_square_path_matches_area() {
        let mut r = Raster::new(10, 10, 1.0).unwrap();
        let mut path = Path::new();
        path.move_to(DVec2::new(2.0, 2.0))
            .line_to(DVec2::new(6.0, 2.0))
            .line_to(DVec2::new(6.0, 6.0))
            .line_to(DVec2::new(2.0, 6.0))
            .close();
        r.fill_path(&path, &solid(1.0, 1.0, 1.0, 1.0));
        let total: f64 = (0..10)
            .flat_map(|y| (0..10).map(move |x| (x, y)))
            .map(|(x, y)| alpha(&r, x, y))
            .sum();
        assert!((total - 16.0).abs() < 0.5, "covered {total}");
    }

    #[test]
    fn stroke_marks_pixels_along_the_line() {
        let mut r = Raster::new(10, 5, 1.0).unwrap();
        let path = Path::polyline(&[DVec2::new(0.0, 2.5), DVec2::new(10.0, 2.5)]);
        r.stroke_path(&path, &solid(1.0, 1.0, 1.0, 1.0), 1.0);
        for x in 0..10 {
            assert!(alpha(&r, x, 2) > 0.9);
            assert_eq!(alpha(&r, x, 0), 0.0);
        }
    }

    #[test]
    fn scale_maps_css_to_device_pixels() {
        let mut r = Raster::new(1, 1, 1.0).unwrap();
        r.resize(8, 8, 2.0);
        assert_eq!((r.width(), r.height(), r.scale()), (8, 8, 2.0));
        r.fill_rect(0.0, 0.0, 1.0, 1.0, &solid(1.0, 1.0, 1.0, 1.0));
        assert_eq!(alpha(&r, 1, 1), 1.0);
        assert_eq!(alpha(&r, 2, 2), 0.0);
    }

    #[test]
    fn radial_paint_fades_outward() {
        let mut r = Raster::new(21, 21, 1.0).unwrap();
        let paint = Paint::Radial {
            center: DVec2::new(10.5, 10.5),
            inner_radius: 0.0,
            outer_radius: 10.0,
            stops: vec![
                GradientStop::new(0.0, Rgba { r: 1.0, g: 1.0, b: 1.0, a: 1.0 }),
                GradientStop::new(1.0, Rgba::TRANSPARENT),
            ],
        };
        r.fill_rect(0.0, 0.0, 21.0, 21.0, &paint);
        assert!(alpha(&r, 10, 10) > alpha(&r, 15, 10));
        assert!(alpha(&r, 15, 10) > alpha(&r, 20, 10));
    }

    #[test]
    fn degenerate_inputs_paint_nothing() {
        let mut r = Raster::new(8, 8, 1.0).unwrap();
        let white = solid(1.0, 1.0, 1.0, 1.0);
        r.fill_path(&Path::new(), &white);
        r.stroke_path(&Path::new(), &white, 2.0);
        r.stroke_path(&Path::polyline(&[DVec2::ZERO, DVec2::ONE]), &white, 0.0);
        r.fill_circle(DVec2::new(4.0, 4.0), 0.0, &white);
        r.fill_circle(DVec2::new(4.0, 4.0), f64::NAN, &white);
        r.fill_rect(0.0, 0.0, 8.0, 8.0, &solid(1.0, 1.0, 1.0, 0.0));
        r.fill_rect(100.0, 100.0, 5.0, 5.0, &white);
        assert!(r.to_rgba8().iter().all(|&b| b == 0));
    }

    #[test]
    fn oversized_raster_is_rejected() {
        assert!(matches!(Raster::new(1_000_000_000, 1_000_000_000, 1.0), Err(FxError::InvalidDimensions)));
        assert!(matches!(Raster::new(u32::MAX, u32::MAX, 1.0), Err(FxError::InvalidDimensions)));
        assert_eq!(pixel_count(7680, 4320).unwrap(), 7680 * 4320);
        assert!(pixel_count(8192, 8192).is_err());
    }

    #[test]
    fn oversized_resize_leaves_empty_raster() {
        let mut r = Raster::new(4, 4, 2.0).unwrap();
        r.resize(100_000, 100_000, 1.0);
        assert_eq!((r.width(), r.height()), (0, 0));
        r.fill_rect(0.0, 0.0, 10.0, 10.0, &solid(1.0, 1.0, 1.0, 1.0));
        assert!(r.to_rgba8().is_empty());
    }

    #[test]
    fn zero_sized_raster_accepts_draws() {
        let mut r = Raster::new(0, 0, 1.0).unwrap();
        r.fill_rect(0.0, 0.0, 10.0, 10.0, &solid(1.0, 1.0, 1.0, 1.0));
        r.fill_circle(DVec2::ZERO, 3.0, &solid(1.0, 1.0, 1.0, 1.0));
        assert!(r.to_rgba8().is_empty());
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn alpha_stays_in_unit_range(
                x in -20.0_f64..40.0,
                y in -20.0_f64..40.0,
                w in -10.0_f64..30.0,
                h in -10.0_f64..30.0,
                a in 0.0_f64..=1.0,
                repeats in 1_usize..4,
            ) {
                let mut r = Raster::new(16, 16, 1.0).unwrap();
                for _ in 0..repeats {
                    r.fill_rect(x, y, w, h, &solid(0.3, 0.6, 0.9, a));
                    r.fill_circle(DVec2::new(x, y), w.abs(), &solid(0.9, 0.1, 0.2, a));
                }
                for px in 0..16 {
                    for py in 0..16 {
                        let c = r.pixel(px, py).unwrap();
                        prop_assert!((0.0..=1.0 + 1e-6).contains(&c.a));
                    }
                }
            }
        }
    }
}
