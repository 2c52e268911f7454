//! Deterministic PRNG based on the Mulberry32 mixing function.
//!
//! Every piece of one-time layout (particle positions, branch geometry,
//! star fields) is drawn from a [`Mulberry32`] stream seeded by the surface's
//! 32-bit seed. The core step is pure wrapping `u32` arithmetic, so the same
//! seed yields the same layout on every platform and in every language that
//! implements the same bit operations.

use serde::{Deserialize, Serialize};

/// Mulberry32 deterministic PRNG. Same seed always produces the same sequence.
///
/// A 32-bit Weyl increment followed by a multiply-xorshift avalanche. Every
/// seed, including 0, is a valid starting state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mulberry32 {
    state: u32,
}

impl Mulberry32 {
    /// Weyl sequence increment added to the state on every draw.
    const INCREMENT: u32 = 0x6D2B_79F5;

    /// Creates a new generator from a 32-bit seed.
    pub fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    /// Advances the state and returns the next 32-bit value.
    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_add(Self::INCREMENT);
        let mut t = self.state;
        t = (t ^ (t >> 15)).wrapping_mul(t | 1);
        t ^= t.wrapping_add((t ^ (t >> 7)).wrapping_mul(t | 61));
        t ^ (t >> 14)
    }

    /// Returns a uniformly distributed f64 in [0, 1).
    ///
    /// The only floating-point step is the final division by 2^32, which is
    /// exact for every `u32`.
    pub fn next_f64(&mut self) -> f64 {
        f64::from(self.next_u32()) / 4_294_967_296.0
    }

    /// Returns a uniformly distributed f64 in [min, max).
    pub fn next_range(&mut self, min: f64, max: f64) -> f64 {
        min + self.next_f64() * (max - min)
    }

    /// Returns a uniformly distributed usize in [0, max).
    ///
    /// # Panics
    ///
    /// Panics if `max` is 0.
    pub fn next_usize(&mut self, max: usize) -> usize {
        (self.next_u32() as usize) % max
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_u32_produces_known_golden_values_for_seed_1() {
        // If this breaks, every seeded layout changes.
        let mut rng = Mulberry32::new(1);
        assert_eq!(rng.next_u32(), 2_693_262_067);
        assert_eq!(rng.next_u32(), 11_749_833);
        assert_eq!(rng.next_u32(), 2_265_367_787);
    }

    #[test]
    fn next_u32_produces_known_golden_values_for_seed_42() {
        let mut rng = Mulberry32::new(42);
        assert_eq!(rng.next_u32(), 2_581_720_956);
        assert_eq!(rng.next_u32(), 1_925_393_290);
        assert_eq!(rng.next_u32(), 3_661_312_704);
    }

    #[test]
    fn next_f64_matches_golden_division() {
        let mut rng = Mulberry32::new(1);
        let v = rng.next_f64();
        assert!((v - 0.627_073_940_588_161_3).abs() < 1e-15, "got {v}");
    }

    #[test]
    fn seed_zero_is_a_valid_state() {
        let mut rng = Mulberry32::new(0);
        let values: Vec<u32> = (0..8).map(|_| rng.next_u32()).collect();
        assert!(values.iter().any(|&v| v != 0));
        assert!(values.windows(2).any(|w| w[0] != w[1]));
    }

    #[test]
    fn two_instances_with_same_seed_produce_identical_sequences() {
        let mut a = Mulberry32::new(7);
        let mut b = Mulberry32::new(7);
        for i in 0..1000 {
            assert_eq!(a.next_u32(), b.next_u32(), "diverged at index {i}");
        }
    }

    #[test]
    fn distinct_seeds_produce_distinct_sequences() {
        let mut a = Mulberry32::new(7);
        let mut b = Mulberry32::new(8);
        let sa: Vec<u32> = (0..16).map(|_| a.next_u32()).collect();
        let sb: Vec<u32> = (0..16).map(|_| b.next_u32()).collect();
        assert_ne!(sa, sb);
    }

    #[test]
    fn serialization_roundtrip_preserves_state() {
        let mut rng = Mulberry32::new(99);
        for _ in 0..50 {
            rng.next_u32();
        }
        let json = serde_json::to_string(&rng).unwrap();
        let mut restored: Mulberry32 = serde_json::from_str(&json).unwrap();
        for i in 0..100 {
            assert_eq!(rng.next_u32(), restored.next_u32(), "diverged at {i}");
        }
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn same_seed_same_sequence(seed: u32) {
                let mut a = Mulberry32::new(seed);
                let mut b = Mulberry32::new(seed);
                for _ in 0..64 {
                    prop_assert_eq!(a.next_f64().to_bits(), b.next_f64().to_bits());
                }
            }

            #[test]
            fn next_f64_in_unit_interval_for_any_seed(seed: u32) {
                let mut rng = Mulberry32::new(seed);
                for _ in 0..100 {
                    let v = rng.next_f64();
                    prop_assert!((0.0..1.0).contains(&v), "next_f64() = {v} for seed {seed}");
                }
            }

            #[test]
            fn next_range_in_bounds(seed: u32, min in -1e6_f64..1e6, span in 1.0_f64..1e6) {
                let mut rng = Mulberry32::new(seed);
                let max = min + span;
                for _ in 0..100 {
                    let v = rng.next_range(min, max);
                    prop_assert!(v >= min && v < max, "{v} outside [{min}, {max})");
                }
            }

            #[test]
            fn next_usize_in_bounds(seed: u32, max in 1_usize..10_000) {
                let mut rng = Mulberry32::new(seed);
                for _ in 0..100 {
                    prop_assert!(rng.next_usize(max) < max);
                }
            }
        }
    }
}
