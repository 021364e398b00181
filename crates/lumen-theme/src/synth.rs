// SPDX-License-Identifier: MIT

//! Gamut-constrained color synthesis with a bounded cache.
//!
//! A requested (lightness, chroma, hue) recipe may ask for more chroma than
//! the rendering environment can display. [`ColorSynth`] finds the closest
//! displayable color by binary-searching chroma downward, probing the
//! environment through a [`RenderProbe`]. Results are cached under the
//! rounded recipe, so palette assembly — which requests the same handful of
//! recipes over and over — does the search once per recipe.

use std::collections::VecDeque;

use ahash::AHashMap;
use lumen_color::{Color, normalize_hue};

/// Chroma below this is displayable at any lightness/hue; skip the search.
const LOW_CHROMA: f32 = 0.03;

/// Fixed binary-search iteration budget. Eight halvings of a ≤0.5 chroma
/// interval resolve to ~0.002, below a perceptible chroma step.
const SEARCH_ITERATIONS: u32 = 8;

/// Default bound on cached recipes.
pub const DEFAULT_CACHE_CAPACITY: usize = 512;

// ---------------------------------------------------------------------------
// RenderProbe
// ---------------------------------------------------------------------------

/// Capability check: can the current rendering environment display a color?
///
/// The engine's chroma search is pure and portable; only this check knows
/// about the actual output device. A browser host probes by writing the
/// color to a throwaway element and reading it back — such an implementation
/// must create and remove its scratch element with guaranteed cleanup (drop
/// guard), even when the probe itself fails.
pub trait RenderProbe {
    /// Whether `color` renders as a visible, non-transparent color.
    fn can_render(&self, color: Color) -> bool;
}

/// Exact sRGB gamut probe — the default for native hosts.
#[derive(Debug, Clone, Copy, Default)]
pub struct SrgbProbe;

impl RenderProbe for SrgbProbe {
    fn can_render(&self, color: Color) -> bool {
        !color.is_transparent() && color.in_srgb_gamut()
    }
}

// ---------------------------------------------------------------------------
// ColorSynth
// ---------------------------------------------------------------------------

/// Cache key: the recipe rounded to fixed precision.
///
/// Lightness (percent) to 1 decimal, chroma to 2 decimals, hue to the
/// nearest degree. Rounding makes float recipes hashable and collapses
/// visually identical requests onto one entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct CacheKey {
    l10: i32,
    c100: i32,
    h: i32,
}

impl CacheKey {
    #[allow(clippy::cast_possible_truncation)]
    fn new(l_pct: f32, chroma: f32, hue: f32) -> Self {
        Self {
            l10: (l_pct * 10.0).round() as i32,
            c100: (chroma * 100.0).round() as i32,
            h: normalize_hue(hue).round() as i32,
        }
    }
}

/// Gamut-constrained color synthesizer.
///
/// Owns its probe and its bounded cache; independent instances never share
/// state. Eviction is oldest-insertion-first (cache hits do not refresh an
/// entry's age).
pub struct ColorSynth {
    probe: Option<Box<dyn RenderProbe>>,
    cache: AHashMap<CacheKey, Color>,
    order: VecDeque<CacheKey>,
    capacity: usize,
}

impl ColorSynth {
    /// Synthesizer with the given probe and default cache capacity.
    #[must_use]
    pub fn new(probe: impl RenderProbe + 'static) -> Self {
        Self::with_capacity(Some(Box::new(probe)), DEFAULT_CACHE_CAPACITY)
    }

    /// Headless synthesizer: no rendering environment to probe, so requested
    /// recipes are returned unclamped (best-effort degraded mode).
    #[must_use]
    pub fn unprobed() -> Self {
        Self::with_capacity(None, DEFAULT_CACHE_CAPACITY)
    }

    /// Full constructor with explicit cache capacity.
    #[must_use]
    pub fn with_capacity(probe: Option<Box<dyn RenderProbe>>, capacity: usize) -> Self {
        Self {
            probe,
            cache: AHashMap::with_capacity(capacity.min(1024)),
            order: VecDeque::with_capacity(capacity.min(1024)),
            capacity,
        }
    }

    /// Synthesize a displayable color from a recipe.
    ///
    /// - `l_pct`: lightness in percent, 0–100
    /// - `chroma`: requested chroma (≥ 0)
    /// - `hue`: hue angle in degrees
    ///
    /// The result always has full alpha. When the requested chroma is not
    /// displayable, the nearest displayable chroma at the same lightness and
    /// hue is used instead.
    pub fn synthesize(&mut self, l_pct: f32, chroma: f32, hue: f32) -> Color {
        let key = CacheKey::new(l_pct, chroma, hue);
        if let Some(&hit) = self.cache.get(&key) {
            return hit;
        }

        let l = (l_pct / 100.0).clamp(0.0, 1.0);
        let c = chroma.max(0.0);
        let h = normalize_hue(hue);
        let requested = Color::oklch(l, c, h);

        let color = if c < LOW_CHROMA {
            requested
        } else {
            match self.probe.as_deref() {
                None => requested,
                Some(probe) => constrain_chroma(probe, requested),
            }
        };

        self.insert(key, color);
        color
    }

    /// Number of cached recipes.
    #[must_use]
    pub fn cache_len(&self) -> usize {
        self.cache.len()
    }

    /// Configured cache bound.
    #[must_use]
    pub const fn cache_capacity(&self) -> usize {
        self.capacity
    }

    fn insert(&mut self, key: CacheKey, color: Color) {
        if self.capacity == 0 {
            return;
        }
        if self.order.len() >= self.capacity {
            if let Some(oldest) = self.order.pop_front() {
                self.cache.remove(&oldest);
            }
        }
        self.order.push_back(key);
        self.cache.insert(key, color);
    }
}

impl std::fmt::Debug for ColorSynth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ColorSynth")
            .field("probed", &self.probe.is_some())
            .field("cached", &self.cache.len())
            .field("capacity", &self.capacity)
            .finish()
    }
}

/// Binary search for the highest displayable chroma in `[0, requested.c]`.
///
/// The iteration count is fixed; the last renderable candidate wins. Chroma
/// zero is displayable at any lightness, so the search always has a
/// renderable floor to fall back on.
fn constrain_chroma(probe: &dyn RenderProbe, requested: Color) -> Color {
    if probe.can_render(requested) {
        return requested;
    }

    let mut lo: f32 = 0.0;
    let mut hi: f32 = requested.c;
    let mut best = requested.set_chroma(0.0);

    for _ in 0..SEARCH_ITERATIONS {
        let mid = (lo + hi) * 0.5;
        let candidate = requested.set_chroma(mid);
        if probe.can_render(candidate) {
            best = candidate;
            lo = mid;
        } else {
            hi = mid;
        }
    }

    best
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn synth() -> ColorSynth {
        ColorSynth::new(SrgbProbe)
    }

    // ── Synthesis ───────────────────────────────────────────────────

    #[test]
    fn in_gamut_recipe_unchanged() {
        let mut s = synth();
        let color = s.synthesize(70.0, 0.10, 30.0);
        assert!((color.l - 0.70).abs() < 1e-4);
        assert!((color.c - 0.10).abs() < 1e-4);
        assert!((color.h - 30.0).abs() < 1e-4);
    }

    #[test]
    fn out_of_gamut_chroma_reduced() {
        let mut s = synth();
        // Chroma 0.35 at cyan is far outside sRGB.
        let color = s.synthesize(70.0, 0.35, 200.0);
        assert!(color.in_srgb_gamut(), "synthesized color out of gamut");
        assert!(color.c < 0.35, "chroma not reduced: {}", color.c);
        assert!((color.h - 200.0).abs() < 1e-3, "hue shifted: {}", color.h);
        assert!((color.l - 0.70).abs() < 1e-3, "lightness shifted: {}", color.l);
    }

    #[test]
    fn result_always_opaque() {
        let mut s = synth();
        for hue in [0.0, 90.0, 180.0, 270.0] {
            assert!(s.synthesize(50.0, 0.4, hue).is_opaque());
        }
    }

    #[test]
    fn low_chroma_skips_search() {
        // Extreme lightness + tiny chroma: technically may graze the gamut
        // boundary, but the fast path returns the recipe as-is.
        let mut s = synth();
        let color = s.synthesize(99.0, 0.01, 200.0);
        assert!((color.c - 0.01).abs() < 1e-5);
    }

    #[test]
    fn unprobed_returns_naive_recipe() {
        let mut s = ColorSynth::unprobed();
        let color = s.synthesize(70.0, 0.35, 200.0);
        assert!((color.c - 0.35).abs() < 1e-5, "headless mode must not clamp");
    }

    #[test]
    fn lightness_clamped_to_percent_range() {
        let mut s = synth();
        assert!((s.synthesize(150.0, 0.0, 0.0).l - 1.0).abs() < 1e-5);
        assert!(s.synthesize(-5.0, 0.0, 0.0).l.abs() < 1e-5);
    }

    // ── Caching ─────────────────────────────────────────────────────

    #[test]
    fn idempotent_and_cached() {
        let mut s = synth();
        let a = s.synthesize(70.0, 0.35, 200.0);
        let len_after_first = s.cache_len();
        let b = s.synthesize(70.0, 0.35, 200.0);
        assert_eq!(a, b);
        assert_eq!(s.cache_len(), len_after_first, "second call must hit the cache");
    }

    #[test]
    fn nearby_recipes_share_entry() {
        let mut s = synth();
        // Differ only past the rounding precision.
        s.synthesize(70.04, 0.102, 200.2);
        s.synthesize(70.01, 0.098, 199.8);
        assert_eq!(s.cache_len(), 1);
    }

    #[test]
    fn cache_never_exceeds_capacity() {
        let mut s = ColorSynth::with_capacity(Some(Box::new(SrgbProbe)), 8);
        for i in 0..50 {
            s.synthesize(50.0, 0.05, i as f32 * 7.0);
        }
        assert!(s.cache_len() <= 8, "cache grew past bound: {}", s.cache_len());
    }

    #[test]
    fn eviction_removes_oldest_inserted() {
        let mut s = ColorSynth::with_capacity(Some(Box::new(SrgbProbe)), 3);
        let first = s.synthesize(50.0, 0.05, 10.0);
        s.synthesize(50.0, 0.05, 20.0);
        s.synthesize(50.0, 0.05, 30.0);
        assert_eq!(s.cache_len(), 3);

        // Hit the oldest entry — insertion-order eviction must ignore it.
        s.synthesize(50.0, 0.05, 10.0);

        // Capacity is full; this evicts exactly the oldest entry (hue 10).
        s.synthesize(50.0, 0.05, 40.0);
        assert_eq!(s.cache_len(), 3);
        assert!(!s.cache.contains_key(&CacheKey::new(50.0, 0.05, 10.0)));
        assert!(s.cache.contains_key(&CacheKey::new(50.0, 0.05, 20.0)));

        // The evicted recipe recomputes to the same value.
        assert_eq!(s.synthesize(50.0, 0.05, 10.0), first);
    }

    #[test]
    fn zero_capacity_disables_caching() {
        let mut s = ColorSynth::with_capacity(Some(Box::new(SrgbProbe)), 0);
        s.synthesize(50.0, 0.05, 10.0);
        assert_eq!(s.cache_len(), 0);
    }

    // ── Probe ───────────────────────────────────────────────────────

    #[test]
    fn srgb_probe_rejects_transparent() {
        let c = Color::oklch(0.5, 0.05, 100.0).with_alpha(0.0);
        assert!(!SrgbProbe.can_render(c));
    }

    #[test]
    fn srgb_probe_rejects_out_of_gamut() {
        assert!(!SrgbProbe.can_render(Color::oklch(0.7, 0.35, 200.0)));
    }

    /// Probe that rejects everything above a chroma ceiling — exercises the
    /// search against an arbitrary environment, not just sRGB.
    struct CeilingProbe(f32);

    impl RenderProbe for CeilingProbe {
        fn can_render(&self, color: Color) -> bool {
            color.c <= self.0
        }
    }

    #[test]
    fn search_converges_to_probe_ceiling() {
        let mut s = ColorSynth::with_capacity(Some(Box::new(CeilingProbe(0.12))), 16);
        let color = s.synthesize(60.0, 0.40, 100.0);
        assert!(color.c <= 0.12, "exceeded ceiling: {}", color.c);
        // Eight iterations over [0, 0.4] resolve within ~0.002 of the ceiling.
        assert!(color.c > 0.10, "search stopped too far below ceiling: {}", color.c);
    }

    proptest! {
        #[test]
        fn synthesized_colors_always_displayable(
            l in 0.0f32..=100.0,
            c in 0.0f32..0.5,
            h in 0.0f32..360.0,
        ) {
            let mut s = synth();
            let color = s.synthesize(l, c, h);
            prop_assert!(color.is_opaque());
            // Low-chroma fast path can graze the boundary at extreme
            // lightness; everything else must be strictly in gamut.
            if color.c >= 0.03 {
                prop_assert!(color.in_srgb_gamut());
            }
        }
    }
}
