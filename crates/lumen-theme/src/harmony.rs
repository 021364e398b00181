// SPDX-License-Identifier: MIT

//! Hue harmony generation — pure hue-wheel math plus bounded sampling.
//!
//! Each scheme takes a `base_hue` (0–360) and produces four related hues
//! (base, primary, secondary, accent). The base hue always survives into the
//! result so palette roles remain traceable to the seed hue.

use lumen_color::{hue_distance, normalize_hue};
use tracing::warn;

use crate::rng::ThemeRng;

/// Golden angle: 360° × the fractional part of φ, ≈ 222.49°.
///
/// Stepping the hue wheel by this angle never revisits a hue and spreads
/// successive hues perceptually evenly.
pub const GOLDEN_ANGLE: f32 = 222.492_24;

/// Default minimum pairwise circular distance for the wildcard scheme.
pub const DEFAULT_MIN_SEPARATION: f32 = 90.0;

/// Default rejection-sampling retry budget per wildcard hue.
pub const DEFAULT_RETRY_BUDGET: u32 = 10;

// ---------------------------------------------------------------------------
// HueSet
// ---------------------------------------------------------------------------

/// Four harmonically related hues, all normalized to [0, 360).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HueSet {
    pub base: f32,
    pub primary: f32,
    pub secondary: f32,
    pub accent: f32,
}

impl HueSet {
    /// The four hues in generation order.
    #[must_use]
    pub const fn to_array(self) -> [f32; 4] {
        [self.base, self.primary, self.secondary, self.accent]
    }

    /// Smallest circular distance between any two hues in the set.
    #[must_use]
    pub fn min_pairwise_distance(self) -> f32 {
        let hues = self.to_array();
        let mut min = 180.0f32;
        for i in 0..hues.len() {
            for j in (i + 1)..hues.len() {
                min = min.min(hue_distance(hues[i], hues[j]));
            }
        }
        min
    }

    /// Remap every hue in the set through `f`.
    #[must_use]
    pub fn map(self, mut f: impl FnMut(f32) -> f32) -> Self {
        Self {
            base: f(self.base),
            primary: f(self.primary),
            secondary: f(self.secondary),
            accent: f(self.accent),
        }
    }
}

// ---------------------------------------------------------------------------
// HarmonyScheme
// ---------------------------------------------------------------------------

/// A named strategy for deriving related hues from a base hue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HarmonyScheme {
    /// Successive golden-angle steps — well-spread, deterministic.
    GoldenRatio,
    /// Fixed small offsets (+30°, +60°, +90°) — safe, low contrast.
    Analogous,
    /// Complement ±30° (+150°, +210°), fourth hue fully random.
    SplitComplementary,
    /// Independent random hues with a minimum pairwise separation.
    Wildcard,
}

impl HarmonyScheme {
    /// Generate four hues with default wildcard parameters.
    #[must_use]
    pub fn generate(self, base_hue: f32, rng: &mut ThemeRng) -> HueSet {
        self.generate_with(base_hue, rng, DEFAULT_MIN_SEPARATION, DEFAULT_RETRY_BUDGET)
    }

    /// Generate four hues, with explicit wildcard separation and retry budget.
    #[must_use]
    pub fn generate_with(
        self,
        base_hue: f32,
        rng: &mut ThemeRng,
        min_separation: f32,
        retry_budget: u32,
    ) -> HueSet {
        let base = normalize_hue(base_hue);
        match self {
            Self::GoldenRatio => HueSet {
                base,
                primary: normalize_hue(GOLDEN_ANGLE.mul_add(1.0, base)),
                secondary: normalize_hue(GOLDEN_ANGLE.mul_add(2.0, base)),
                accent: normalize_hue(GOLDEN_ANGLE.mul_add(3.0, base)),
            },
            Self::Analogous => HueSet {
                base,
                primary: normalize_hue(base + 30.0),
                secondary: normalize_hue(base + 60.0),
                accent: normalize_hue(base + 90.0),
            },
            Self::SplitComplementary => HueSet {
                base,
                primary: normalize_hue(base + 150.0),
                secondary: normalize_hue(base + 210.0),
                accent: rng.hue(),
            },
            Self::Wildcard => wildcard(base, rng, min_separation, retry_budget),
        }
    }

    /// Human-readable name of this scheme.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::GoldenRatio => "golden-ratio",
            Self::Analogous => "analogous",
            Self::SplitComplementary => "split-complementary",
            Self::Wildcard => "wildcard",
        }
    }

    /// Parse a scheme from its name string (case-insensitive).
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let lower = name.to_lowercase();
        Self::all().iter().find(|s| s.name() == lower).copied()
    }

    /// All available schemes.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::GoldenRatio,
            Self::Analogous,
            Self::SplitComplementary,
            Self::Wildcard,
        ]
    }
}

/// Wildcard generation: three hues sampled around the anchored base, each
/// rejection-sampled against everything chosen so far.
fn wildcard(base: f32, rng: &mut ThemeRng, min_separation: f32, retry_budget: u32) -> HueSet {
    let mut chosen = [base, 0.0, 0.0, 0.0];
    for slot in 1..4 {
        chosen[slot] = sample_separated(&chosen[..slot], rng, min_separation, retry_budget);
    }
    HueSet {
        base: chosen[0],
        primary: chosen[1],
        secondary: chosen[2],
        accent: chosen[3],
    }
}

/// Sample a hue at least `min_separation` away from every hue in `existing`.
///
/// Bounded rejection sampling: after `retry_budget` failed draws, the best
/// candidate seen so far (largest clearance) is accepted and a warning is
/// logged. Generation never fails.
fn sample_separated(
    existing: &[f32],
    rng: &mut ThemeRng,
    min_separation: f32,
    retry_budget: u32,
) -> f32 {
    let clearance = |h: f32| -> f32 {
        existing
            .iter()
            .map(|&e| hue_distance(h, e))
            .fold(180.0f32, f32::min)
    };

    let mut best = rng.hue();
    let mut best_clearance = clearance(best);
    if best_clearance >= min_separation {
        return best;
    }

    for _ in 1..retry_budget.max(1) {
        let candidate = rng.hue();
        let c = clearance(candidate);
        if c >= min_separation {
            return candidate;
        }
        if c > best_clearance {
            best = candidate;
            best_clearance = c;
        }
    }

    warn!(
        hue = best,
        clearance = best_clearance,
        min_separation,
        "wildcard retry budget exhausted; accepting closest candidate"
    );
    best
}

// ---------------------------------------------------------------------------
// SchemeWeights
// ---------------------------------------------------------------------------

/// Relative weights for random scheme selection.
///
/// Weights need not sum to 1; a zero weight disables a scheme.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SchemeWeights {
    pub golden_ratio: f32,
    pub analogous: f32,
    pub split_complementary: f32,
    pub wildcard: f32,
}

impl Default for SchemeWeights {
    fn default() -> Self {
        Self {
            golden_ratio: 0.35,
            analogous: 0.25,
            split_complementary: 0.25,
            wildcard: 0.15,
        }
    }
}

impl SchemeWeights {
    /// Weighted random scheme choice.
    ///
    /// Falls back to [`HarmonyScheme::GoldenRatio`] when all weights are zero.
    #[must_use]
    pub fn pick(&self, rng: &mut ThemeRng) -> HarmonyScheme {
        let entries = [
            (HarmonyScheme::GoldenRatio, self.golden_ratio.max(0.0)),
            (HarmonyScheme::Analogous, self.analogous.max(0.0)),
            (HarmonyScheme::SplitComplementary, self.split_complementary.max(0.0)),
            (HarmonyScheme::Wildcard, self.wildcard.max(0.0)),
        ];
        let total: f32 = entries.iter().map(|(_, w)| w).sum();
        if total <= 0.0 {
            return HarmonyScheme::GoldenRatio;
        }

        let mut point = rng.range(0.0, total);
        for (scheme, w) in entries {
            if point < w {
                return scheme;
            }
            point -= w;
        }
        HarmonyScheme::Wildcard
    }
}

// ---------------------------------------------------------------------------
// HueArc
// ---------------------------------------------------------------------------

/// A circular arc of hues, sweeping from `from` to `to` in increasing
/// direction (possibly crossing 0°).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HueArc {
    pub from: f32,
    pub to: f32,
}

impl HueArc {
    #[must_use]
    pub const fn new(from: f32, to: f32) -> Self {
        Self { from, to }
    }

    /// Angular width of the arc in degrees.
    #[must_use]
    pub fn width(self) -> f32 {
        normalize_hue(self.to - self.from)
    }

    /// Whether `hue` falls inside the arc (boundaries inclusive).
    #[must_use]
    pub fn contains(self, hue: f32) -> bool {
        normalize_hue(hue - self.from) <= self.width()
    }

    /// Uniform random hue inside the arc.
    #[must_use]
    pub fn sample(self, rng: &mut ThemeRng) -> f32 {
        normalize_hue(self.from + rng.range(0.0, self.width()))
    }

    /// Force `hue` into the arc.
    ///
    /// Hues already inside pass through unchanged (normalized). Hues outside
    /// are remapped to the nearest arc boundary plus a small random inward
    /// offset — never rejected.
    #[must_use]
    pub fn constrain(self, hue: f32, rng: &mut ThemeRng) -> f32 {
        let h = normalize_hue(hue);
        if self.contains(h) {
            return h;
        }

        let jitter = (self.width() * 0.2).min(10.0);
        let offset = rng.range(0.0, jitter);
        if hue_distance(h, self.from) <= hue_distance(h, self.to) {
            normalize_hue(self.from + offset)
        } else {
            normalize_hue(self.to - offset)
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
