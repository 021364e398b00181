// SPDX-License-Identifier: MIT

//! Randomness utilities — the one place the engine touches a PRNG.
//!
//! Wraps [`rand::rngs::SmallRng`] with the small helper surface the rest of
//! the engine needs (uniform range, slice pick, biased coin). Seedable so
//! tests and reproducible generation get identical sequences.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Seedable random source for theme generation.
#[derive(Debug, Clone)]
pub struct ThemeRng {
    inner: SmallRng,
}

impl ThemeRng {
    /// An entropy-seeded generator — every call site gets fresh variation.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self { inner: SmallRng::from_os_rng() }
    }

    /// A deterministic generator for a fixed seed.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self { inner: SmallRng::seed_from_u64(seed) }
    }

    /// Uniform random f32 in `[lo, hi)`. Returns `lo` when the range is empty.
    pub fn range(&mut self, lo: f32, hi: f32) -> f32 {
        if hi <= lo {
            lo
        } else {
            self.inner.random_range(lo..hi)
        }
    }

    /// Uniform random hue in `[0, 360)`.
    pub fn hue(&mut self) -> f32 {
        self.range(0.0, 360.0)
    }

    /// Pick a random element from a non-empty slice.
    ///
    /// # Panics
    ///
    /// Panics if `slice` is empty.
    pub fn pick<'a, T>(&mut self, slice: &'a [T]) -> &'a T {
        &slice[self.inner.random_range(0..slice.len())]
    }

    /// Biased coin: true with probability `p`.
    pub fn chance(&mut self, p: f32) -> bool {
        self.inner.random::<f32>() < p
    }
}

impl Default for ThemeRng {
    fn default() -> Self {
        Self::from_entropy()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_is_deterministic() {
        let mut a = ThemeRng::seeded(42);
        let mut b = ThemeRng::seeded(42);
        for _ in 0..32 {
            assert!((a.range(0.0, 360.0) - b.range(0.0, 360.0)).abs() < f32::EPSILON);
        }
    }

    #[test]
    fn different_seeds_differ() {
        let mut a = ThemeRng::seeded(1);
        let mut b = ThemeRng::seeded(2);
        let same = (0..16).all(|_| (a.range(0.0, 1.0) - b.range(0.0, 1.0)).abs() < f32::EPSILON);
        assert!(!same, "independent seeds produced identical streams");
    }

    #[test]
    fn range_stays_in_bounds() {
        let mut rng = ThemeRng::seeded(7);
        for _ in 0..1000 {
            let v = rng.range(10.0, 20.0);
            assert!((10.0..20.0).contains(&v), "out of range: {v}");
        }
    }

    #[test]
    fn empty_range_returns_lo() {
        let mut rng = ThemeRng::seeded(7);
        assert!((rng.range(5.0, 5.0) - 5.0).abs() < f32::EPSILON);
        assert!((rng.range(5.0, 4.0) - 5.0).abs() < f32::EPSILON);
    }

    #[test]
    fn pick_covers_slice() {
        let mut rng = ThemeRng::seeded(3);
        let items = [1, 2, 3];
        let mut seen = [false; 3];
        for _ in 0..200 {
            seen[*rng.pick(&items) as usize - 1] = true;
        }
        assert_eq!(seen, [true, true, true]);
    }

    #[test]
    fn chance_extremes() {
        let mut rng = ThemeRng::seeded(9);
        assert!(!(0..100).any(|_| rng.chance(0.0)));
        assert!((0..100).all(|_| rng.chance(1.0)));
    }
}
