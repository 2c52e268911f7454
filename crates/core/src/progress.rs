//! Scroll-derived reveal progress.
//!
//! A region's progress is a normalized `[0, 1]` value computed from its
//! bounding box and the viewport height. A region starts "arriving" once its
//! top crosses the reference line (58% down the viewport) and is complete once
//! most of it has scrolled past that line. Renderers consume the eased value.

use serde::{Deserialize, Serialize};

/// Fraction of the viewport height where regions start to reveal.
pub const REFERENCE_LINE: f64 = 0.58;

/// Fraction of the region's height that must pass the reference line
/// (beyond the line's own distance) for progress to reach 1.
pub const MARGIN_FACTOR: f64 = 0.9;

/// Vertical geometry of a region relative to the viewport, in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RegionRect {
    /// Distance from the viewport top to the region top (negative once scrolled past).
    pub top: f64,
    pub height: f64,
}

impl RegionRect {
    pub fn new(top: f64, height: f64) -> Self {
        Self { top, height }
    }
}

/// Raw scroll progress of a region, clamped to `[0, 1]`.
///
/// `clamp((line - top) / (line + height * MARGIN_FACTOR), 0, 1)` with
/// `line = REFERENCE_LINE * viewport_height`. Degenerate inputs (non-positive
/// viewport, non-positive denominator, NaN) yield 0.
pub fn raw_progress(region: RegionRect, viewport_height: f64) -> f64 {
    if viewport_height.is_nan() || viewport_height <= 0.0 {
        return 0.0;
    }
    let line = REFERENCE_LINE * viewport_height;
    let denom = line + region.height.max(0.0) * MARGIN_FACTOR;
    if denom.is_nan() || denom <= 0.0 {
        return 0.0;
    }
    let p = (line - region.top) / denom;
    if p.is_nan() {
        0.0
    } else {
        p.clamp(0.0, 1.0)
    }
}

/// Cubic ease-in-out: `4x³` below one half, `1 - (-2x + 2)³ / 2` above.
pub fn ease_in_out_cubic(x: f64) -> f64 {
    let x = x.clamp(0.0, 1.0);
    if x < 0.5 {
        4.0 * x * x * x
    } else {
        1.0 - (-2.0 * x + 2.0).powi(3) / 2.0
    }
}

/// Sub-progress for a staged reveal: `clamp((p - start) / span, 0, 1)`.
///
/// Lets one progress value drive several elements that start and finish at
/// different points. A non-positive span acts as a step at `start`.
pub fn reveal_window(p: f64, start: f64, span: f64) -> f64 {
    if span <= 0.0 {
        return if p >= start { 1.0 } else { 0.0 };
    }
    ((p - start) / span).clamp(0.0, 1.0)
}

/// Index of the active step on a `count`-step journey line.
///
/// `round(p * (count - 1))` with `p` clamped; returns 0 when `count` is 0.
pub fn stage_index(p: f64, count: usize) -> usize {
    if count == 0 {
        return 0;
    }
    let p = if p.is_nan() { 0.0 } else { p.clamp(0.0, 1.0) };
    ((p * (count - 1) as f64).round() as usize).min(count - 1)
}

/// Progress of one visual region: the raw scroll value and its eased form.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Progress {
    raw: f64,
    eased: f64,
}

impl Progress {
    /// Fully revealed progress.
    pub const COMPLETE: Progress = Progress { raw: 1.0, eased: 1.0 };

    /// Builds progress from an already-normalized raw value.
    ///
    /// With `reduced_motion` the eased value is forced to 1 so nothing
    /// animates in.
    pub fn from_raw(raw: f64, reduced_motion: bool) -> Self {
        let raw = if raw.is_nan() { 0.0 } else { raw.clamp(0.0, 1.0) };
        let eased = if reduced_motion {
            1.0
        } else {
            ease_in_out_cubic(raw)
        };
        Self { raw, eased }
    }

    /// Builds progress from region geometry.
    pub fn from_geometry(region: RegionRect, viewport_height: f64, reduced_motion: bool) -> Self {
        Self::from_raw(raw_progress(region, viewport_height), reduced_motion)
    }

    pub fn raw(&self) -> f64 {
        self.raw
    }

    pub fn eased(&self) -> f64 {
        self.eased
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn region_below_reference_line_has_zero_progress() {
        let p = raw_progress(RegionRect::new(900.0, 400.0), 1000.0);
        assert_eq!(p, 0.0);
    }

    #[test]
    fn region_at_reference_line_starts_at_zero() {
        let p = raw_progress(RegionRect::new(580.0, 400.0), 1000.0);
        assert!(p.abs() < 1e-12);
    }

    #[test]
    fn region_far_past_is_exactly_one() {
        let p = raw_progress(RegionRect::new(-5000.0, 400.0), 1000.0);
        assert_eq!(p, 1.0);
    }

    #[test]
    fn halfway_point_matches_formula() {
        // line = 580, denom = 580 + 360 = 940
        let p = raw_progress(RegionRect::new(580.0 - 470.0, 400.0), 1000.0);
        assert!((p - 0.5).abs() < 1e-12, "got {p}");
    }

    #[test]
    fn degenerate_viewport_yields_zero() {
        assert_eq!(raw_progress(RegionRect::new(0.0, 100.0), 0.0), 0.0);
        assert_eq!(raw_progress(RegionRect::new(0.0, 100.0), -10.0), 0.0);
        assert_eq!(raw_progress(RegionRect::new(0.0, 100.0), f64::NAN), 0.0);
    }

    #[test]
    fn ease_is_fixed_at_endpoints_and_midpoint() {
        assert_eq!(ease_in_out_cubic(0.0), 0.0);
        assert_eq!(ease_in_out_cubic(1.0), 1.0);
        assert!((ease_in_out_cubic(0.5) - 0.5).abs() < 1e-12);
        assert!((ease_in_out_cubic(0.25) - 0.0625).abs() < 1e-12);
    }

    #[test]
    fn reduced_motion_forces_complete_eased_progress() {
        let p = Progress::from_geometry(RegionRect::new(900.0, 400.0), 1000.0, true);
        assert_eq!(p.raw(), 0.0);
        assert_eq!(p.eased(), 1.0);
    }

    #[test]
    fn reveal_window_maps_staged_ranges() {
        assert_eq!(reveal_window(0.0, 0.18, 0.42), 0.0);
        assert!((reveal_window(0.39, 0.18, 0.42) - 0.5).abs() < 1e-12);
        assert_eq!(reveal_window(0.9, 0.18, 0.42), 1.0);
        assert_eq!(reveal_window(0.5, 0.5, 0.0), 1.0);
        assert_eq!(reveal_window(0.49, 0.5, 0.0), 0.0);
    }

    #[test]
    fn stage_index_rounds_across_six_steps() {
        assert_eq!(stage_index(0.0, 6), 0);
        assert_eq!(stage_index(0.09, 6), 0);
        assert_eq!(stage_index(0.11, 6), 1);
        assert_eq!(stage_index(1.0, 6), 5);
        assert_eq!(stage_index(3.0, 6), 5);
        assert_eq!(stage_index(0.5, 0), 0);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn raw_progress_always_in_unit_interval(
                top in -1e5_f64..1e5,
                height in -1e3_f64..1e5,
                vh in -1e3_f64..1e4,
            ) {
                let p = raw_progress(RegionRect::new(top, height), vh);
                prop_assert!((0.0..=1.0).contains(&p));
            }

            #[test]
            fn progress_non_decreasing_as_region_rises(
                top in -1e4_f64..1e4,
                rise in 0.0_f64..1e3,
                height in 0.0_f64..5e3,
                vh in 1.0_f64..5e3,
            ) {
                let before = raw_progress(RegionRect::new(top, height), vh);
                let after = raw_progress(RegionRect::new(top - rise, height), vh);
                prop_assert!(after >= before, "{after} < {before}");
            }

            #[test]
            fn progress_is_one_once_fully_past(height in 0.0_f64..5e3, vh in 1.0_f64..5e3) {
                let top = -(height * MARGIN_FACTOR) - 1.0;
                prop_assert_eq!(raw_progress(RegionRect::new(top, height), vh), 1.0);
            }

            #[test]
            fn ease_is_monotonic(a in 0.0_f64..=1.0, b in 0.0_f64..=1.0) {
                let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
                prop_assert!(ease_in_out_cubic(lo) <= ease_in_out_cubic(hi) + 1e-12);
            }
        }
    }
}
