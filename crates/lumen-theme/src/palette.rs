// SPDX-License-Identifier: MIT

//! Palette assembly — the bridge from hue sets to concrete role colors.
//!
//! Takes a [`HueSet`] from the harmony generator and fills every semantic
//! role of the UI: background tiers, ink, border, the three accent roles,
//! and the four status colors. Every role goes through the synthesizer, so
//! every color in a palette is gamut-safe and cached.
//!
//! Two strategies exist. `FreeRange` roams the whole hue wheel.
//! `BrandLocked` keeps the structural neutrals pinned to the golden-master
//! reference and confines every hue to the warm brand arc, deviating at most
//! ±10% from the reference recipes.

use lumen_color::Color;

use crate::contrast::ensure_contrast;
use crate::gradient::{Gradient, build_gradient};
use crate::harmony::{HueArc, HueSet};
use crate::rng::ThemeRng;
use crate::synth::ColorSynth;

/// Which palette generator to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Strategy {
    /// Unconstrained hue wheel, roles derived from the harmony scheme.
    #[default]
    FreeRange,
    /// Bounded deviation around the golden-master reference palette.
    BrandLocked,
}

impl Strategy {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::FreeRange => "free-range",
            Self::BrandLocked => "brand-locked",
        }
    }

    /// Parse a strategy from its name string (case-insensitive).
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "free-range" | "free" => Some(Self::FreeRange),
            "brand-locked" | "locked" => Some(Self::BrandLocked),
            _ => None,
        }
    }
}

// ─── Brand constraints ───────────────────────────────────────────────────────

/// The warm pink-to-cream arc brand hues must fall in.
pub const BRAND_ARC: HueArc = HueArc::new(330.0, 95.0);

/// Hue ranges the brand never uses (teal/green and blue/purple).
pub const FORBIDDEN_ARCS: [HueArc; 2] =
    [HueArc::new(110.0, 200.0), HueArc::new(210.0, 320.0)];

// Golden-master reference recipes: (lightness %, chroma, hue).
// Ink and the primary background are structural — never randomized.
// theme.rs renders the same recipes into the canonical default theme.
pub(crate) const GM_INK: (f32, f32, f32) = (23.0, 0.018, 20.0);
pub(crate) const GM_BG1: (f32, f32, f32) = (97.4, 0.012, 75.0);
pub(crate) const GM_BG2: (f32, f32, f32) = (95.2, 0.018, 68.0);
pub(crate) const GM_BG3: (f32, f32, f32) = (93.0, 0.024, 62.0);
pub(crate) const GM_BORDER: (f32, f32, f32) = (86.0, 0.022, 55.0);
pub(crate) const GM_PRIMARY: (f32, f32, f32) = (71.0, 0.125, 18.0);
pub(crate) const GM_SECONDARY: (f32, f32, f32) = (75.0, 0.105, 48.0);
pub(crate) const GM_ACCENT: (f32, f32, f32) = (74.0, 0.145, 30.0);

// Status hue offsets from the base hue.
const INFO_OFFSET: f32 = 210.0;
const SUCCESS_OFFSET: f32 = 120.0;
const WARNING_OFFSET: f32 = 40.0;
const ERROR_OFFSET: f32 = 0.0;

// ─── Palette ─────────────────────────────────────────────────────────────────

/// The complete color palette for one theme.
///
/// All colors are gamut-safe synthesized OKLCH values. The gradient is built
/// from the same hue set as the color roles.
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    // ── Surfaces ──────────────────────────────────────────────
    /// Primary app background.
    pub bg1: Color,
    /// Card / panel background.
    pub bg2: Color,
    /// Inset background (wells, list hover).
    pub bg3: Color,

    // ── Structure ─────────────────────────────────────────────
    /// Body text.
    pub ink: Color,
    /// Hairlines and dividers.
    pub border: Color,

    // ── Accents ───────────────────────────────────────────────
    pub primary: Color,
    pub secondary: Color,
    pub accent: Color,

    // ── Status (hues offset from the base hue) ────────────────
    pub info: Color,
    pub success: Color,
    pub warning: Color,
    pub error: Color,

    /// Background gradient built from the same hues.
    pub gradient: Gradient,
}

impl Palette {
    /// Generate a palette for the given strategy.
    #[must_use]
    pub fn generate(
        strategy: Strategy,
        hues: HueSet,
        synth: &mut ColorSynth,
        rng: &mut ThemeRng,
    ) -> Self {
        match strategy {
            Strategy::FreeRange => Self::free_range(hues, synth, rng),
            Strategy::BrandLocked => Self::brand_locked(hues, synth, rng),
        }
    }

    /// Role names and colors, in application order.
    #[must_use]
    pub fn color_roles(&self) -> [(&'static str, Color); 12] {
        [
            ("background", self.bg1),
            ("background-alt", self.bg2),
            ("background-faint", self.bg3),
            ("ink", self.ink),
            ("border", self.border),
            ("primary", self.primary),
            ("secondary", self.secondary),
            ("accent", self.accent),
            ("info", self.info),
            ("success", self.success),
            ("warning", self.warning),
            ("error", self.error),
        ]
    }

    fn free_range(hues: HueSet, synth: &mut ColorSynth, rng: &mut ThemeRng) -> Self {
        let base = hues.base;
        let bg_chroma = rng.range(0.015, 0.04);
        let accent_chroma = rng.range(0.11, 0.16);

        // Surfaces: high lightness, chroma scaled down per tier.
        let bg1 = synth.synthesize(rng.range(96.0, 98.0), bg_chroma * 0.6, base);
        let bg2 = synth.synthesize(rng.range(94.0, 96.0), bg_chroma * 0.8, base);
        let bg3 = synth.synthesize(rng.range(92.0, 94.0), bg_chroma, base);

        // Ink keeps a whisper of the base hue but must stay readable.
        let ink_raw = synth.synthesize(rng.range(18.0, 24.0), bg_chroma * 0.5, base);
        let ink = ensure_contrast(ink_raw, bg1, 5.5);

        let border = synth.synthesize(rng.range(82.0, 88.0), bg_chroma, base);

        // Accent roles: mid lightness, chroma scaled up.
        let primary = synth.synthesize(rng.range(70.0, 76.0), accent_chroma, hues.primary);
        let secondary =
            synth.synthesize(rng.range(72.0, 78.0), accent_chroma * 0.85, hues.secondary);
        let accent =
            synth.synthesize(rng.range(74.0, 80.0), accent_chroma * 1.15, hues.accent);

        // Status roles stay harmonically tied to the base hue.
        let info = synth.synthesize(rng.range(70.0, 76.0), 0.12, base + INFO_OFFSET);
        let success = synth.synthesize(rng.range(70.0, 76.0), 0.13, base + SUCCESS_OFFSET);
        let warning = synth.synthesize(rng.range(76.0, 82.0), 0.14, base + WARNING_OFFSET);
        let error = synth.synthesize(rng.range(62.0, 68.0), 0.16, base + ERROR_OFFSET);

        let gradient = build_gradient(&hues.to_array(), synth, rng);

        Self {
            bg1, bg2, bg3, ink, border,
            primary, secondary, accent,
            info, success, warning, error,
            gradient,
        }
    }

    fn brand_locked(hues: HueSet, synth: &mut ColorSynth, rng: &mut ThemeRng) -> Self {
        // Whatever the harmony scheme produced, brand hues live in the arc.
        let hues = hues.map(|h| BRAND_ARC.constrain(h, rng));
        let base = hues.base;

        // Structural neutrals: exact golden-master recipes.
        let ink = synth.synthesize(GM_INK.0, GM_INK.1, GM_INK.2);
        let bg1 = synth.synthesize(GM_BG1.0, GM_BG1.1, GM_BG1.2);

        let bg2 = Self::deviated(GM_BG2, GM_BG2.2, synth, rng);
        let bg3 = Self::deviated(GM_BG3, GM_BG3.2, synth, rng);
        let border = Self::deviated(GM_BORDER, GM_BORDER.2, synth, rng);

        let primary = Self::deviated(GM_PRIMARY, hues.primary, synth, rng);
        let secondary = Self::deviated(GM_SECONDARY, hues.secondary, synth, rng);
        let accent = Self::deviated(GM_ACCENT, hues.accent, synth, rng);

        let status = |l: f32, c: f32, offset: f32, synth: &mut ColorSynth, rng: &mut ThemeRng| {
            let hue = BRAND_ARC.constrain(base + offset, rng);
            synth.synthesize(l * rng.range(0.99, 1.01), c * rng.range(0.9, 1.1), hue)
        };
        let info = status(72.0, 0.11, INFO_OFFSET, synth, rng);
        let success = status(72.0, 0.12, SUCCESS_OFFSET, synth, rng);
        let warning = status(78.0, 0.13, WARNING_OFFSET, synth, rng);
        let error = status(64.0, 0.15, ERROR_OFFSET, synth, rng);

        let gradient = build_gradient(&hues.to_array(), synth, rng);

        Self {
            bg1, bg2, bg3, ink, border,
            primary, secondary, accent,
            info, success, warning, error,
            gradient,
        }
    }

    /// A reference recipe scaled within the bounded-deviation rule:
    /// lightness ±1%, chroma ±10%, hue replaced by the generated hue.
    fn deviated(
        reference: (f32, f32, f32),
        hue: f32,
        synth: &mut ColorSynth,
        rng: &mut ThemeRng,
    ) -> Color {
        let (l, c, _) = reference;
        synth.synthesize(l * rng.range(0.99, 1.01), c * rng.range(0.9, 1.1), hue)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contrast::contrast_ratio;
    use crate::harmony::HarmonyScheme;
    use crate::synth::SrgbProbe;
    use lumen_color::hue_distance;

    fn analogous_hues() -> HueSet {
        HueSet { base: 10.0, primary: 40.0, secondary: 70.0, accent: 100.0 }
    }

    fn free_palette(seed: u64) -> Palette {
        let mut synth = ColorSynth::new(SrgbProbe);
        let mut rng = ThemeRng::seeded(seed);
        Palette::generate(Strategy::FreeRange, analogous_hues(), &mut synth, &mut rng)
    }

    fn locked_palette(seed: u64) -> Palette {
        let mut synth = ColorSynth::new(SrgbProbe);
        let mut rng = ThemeRng::seeded(seed);
        let hues = HarmonyScheme::GoldenRatio.generate(30.0, &mut rng);
        Palette::generate(Strategy::BrandLocked, hues, &mut synth, &mut rng)
    }

    // ── Free-range ──────────────────────────────────────────────────

    #[test]
    fn background_lightness_band() {
        let p = free_palette(42);
        for (name, bg) in [("bg1", p.bg1), ("bg2", p.bg2), ("bg3", p.bg3)] {
            let pct = bg.l * 100.0;
            assert!((92.0..98.0).contains(&pct), "{name} lightness out of band: {pct}");
        }
    }

    #[test]
    fn accent_lightness_band() {
        let p = free_palette(42);
        for (name, c) in [("primary", p.primary), ("secondary", p.secondary), ("accent", p.accent)] {
            let pct = c.l * 100.0;
            assert!((70.0..80.0).contains(&pct), "{name} lightness out of band: {pct}");
        }
    }

    #[test]
    fn background_tiers_ordered() {
        let p = free_palette(42);
        assert!(p.bg1.l > p.bg2.l, "bg1 should be lightest");
        assert!(p.bg2.l > p.bg3.l, "bg2 should sit between bg1 and bg3");
    }

    #[test]
    fn backgrounds_low_chroma() {
        let p = free_palette(42);
        assert!(p.bg1.c < 0.05, "bg1 chroma too high: {}", p.bg1.c);
        assert!(p.bg2.c < 0.05, "bg2 chroma too high: {}", p.bg2.c);
    }

    #[test]
    fn roles_trace_back_to_hue_set() {
        // Base 10° analogous: roles must sit on {10, 40, 70, 100}.
        let p = free_palette(42);
        assert!(hue_distance(p.bg1.h, 10.0) < 1.0, "bg1 hue: {}", p.bg1.h);
        assert!(hue_distance(p.primary.h, 40.0) < 1.0, "primary hue: {}", p.primary.h);
        assert!(hue_distance(p.secondary.h, 70.0) < 1.0, "secondary hue: {}", p.secondary.h);
        assert!(hue_distance(p.accent.h, 100.0) < 1.0, "accent hue: {}", p.accent.h);
    }

    #[test]
    fn status_hues_offset_from_base() {
        let p = free_palette(42);
        assert!(hue_distance(p.info.h, 220.0) < 1.0, "info hue: {}", p.info.h);
        assert!(hue_distance(p.success.h, 130.0) < 1.0, "success hue: {}", p.success.h);
        assert!(hue_distance(p.warning.h, 50.0) < 1.0, "warning hue: {}", p.warning.h);
        assert!(hue_distance(p.error.h, 10.0) < 1.0, "error hue: {}", p.error.h);
    }

    #[test]
    fn ink_is_readable() {
        for seed in 0..20 {
            let p = free_palette(seed);
            let ratio = contrast_ratio(p.ink, p.bg1);
            assert!(ratio >= 5.5, "ink/bg1 contrast too low at seed {seed}: {ratio}");
        }
    }

    #[test]
    fn all_roles_in_gamut() {
        let p = free_palette(42);
        for (name, color) in p.color_roles() {
            assert!(color.in_srgb_gamut(), "{name} out of gamut");
        }
    }

    #[test]
    fn deterministic_for_seed() {
        assert_eq!(free_palette(7), free_palette(7));
    }

    #[test]
    fn different_seeds_differ() {
        let a = free_palette(1);
        let b = free_palette(2);
        assert_ne!(a.bg1, b.bg1);
    }

    // ── Brand-locked ────────────────────────────────────────────────

    #[test]
    fn locked_hues_inside_brand_arc() {
        // Across many generations, every role hue must sit in the allowed
        // arc and outside every forbidden arc.
        for seed in 0..1000 {
            let p = locked_palette(seed);
            for (name, color) in p.color_roles() {
                assert!(
                    BRAND_ARC.contains(color.h),
                    "seed {seed}: {name} hue {} outside brand arc",
                    color.h
                );
                for arc in FORBIDDEN_ARCS {
                    assert!(
                        !arc.contains(color.h),
                        "seed {seed}: {name} hue {} inside forbidden arc {arc:?}",
                        color.h
                    );
                }
            }
        }
    }

    #[test]
    fn locked_neutrals_never_randomized() {
        let a = locked_palette(3);
        let b = locked_palette(99);
        assert_eq!(a.ink, b.ink, "ink must be structural");
        assert_eq!(a.bg1, b.bg1, "primary background must be structural");
    }

    #[test]
    fn locked_accent_within_deviation_bounds() {
        for seed in 0..50 {
            let p = locked_palette(seed);
            let l_pct = p.accent.l * 100.0;
            assert!(
                (GM_ACCENT.0 * 0.99..=GM_ACCENT.0 * 1.01).contains(&l_pct),
                "accent lightness deviated too far: {l_pct}"
            );
            // Chroma may additionally shrink for gamut, never grow.
            assert!(p.accent.c <= GM_ACCENT.1 * 1.1 + 1e-4);
        }
    }

    #[test]
    fn locked_gradient_hues_in_arc() {
        for seed in 0..100 {
            let p = locked_palette(seed);
            for stop in &p.gradient.stops {
                assert!(
                    BRAND_ARC.contains(stop.color.h),
                    "gradient stop hue {} outside arc",
                    stop.color.h
                );
            }
        }
    }

    // ── Strategy ────────────────────────────────────────────────────

    #[test]
    fn strategy_names_roundtrip() {
        assert_eq!(Strategy::from_name("free-range"), Some(Strategy::FreeRange));
        assert_eq!(Strategy::from_name("LOCKED"), Some(Strategy::BrandLocked));
        assert_eq!(Strategy::from_name("other"), None);
    }
}
