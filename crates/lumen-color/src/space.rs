// SPDX-License-Identifier: MIT
//
// Color space conversion functions.
//
// These implement the Oklab color space math created by Björn Ottosson.
// Reference: https://bottosson.github.io/posts/oklab/
//
// Pipeline: OKLCH ↔ Oklab ↔ Linear sRGB ↔ sRGB
//
// All functions are pure and deterministic. The Oklab ↔ Linear sRGB leg goes
// through an intermediate LMS (cone response) space; the matrices below are
// from Ottosson's original specification.

/// Normalize a hue angle to the range [0, 360).
#[inline]
#[must_use]
pub fn normalize_hue(h: f32) -> f32 {
    let h = h % 360.0;
    if h < 0.0 { h + 360.0 } else { h }
}

/// Circular distance between two hue angles (shortest arc, 0–180).
#[inline]
#[must_use]
pub fn hue_distance(a: f32, b: f32) -> f32 {
    let d = (a - b).abs() % 360.0;
    if d > 180.0 { 360.0 - d } else { d }
}

// ─── OKLCH ↔ Oklab ──────────────────────────────────────────────────────────

/// Convert OKLCH chroma and hue to Oklab a, b components.
#[inline]
pub(crate) fn oklch_to_oklab_ab(c: f32, h: f32) -> (f32, f32) {
    let h_rad = h.to_radians();
    (c * h_rad.cos(), c * h_rad.sin())
}

/// Convert Oklab a, b components to OKLCH chroma and hue.
#[inline]
pub(crate) fn oklab_ab_to_oklch(a: f32, b: f32) -> (f32, f32) {
    let c = a.hypot(b);
    let h = if c < 1e-8 {
        0.0 // Achromatic — hue is undefined, default to 0
    } else {
        let h = b.atan2(a).to_degrees();
        if h < 0.0 { h + 360.0 } else { h }
    };
    (c, h)
}

// ─── Oklab ↔ Linear sRGB ────────────────────────────────────────────────────

/// Convert Oklab (L, a, b) to linear sRGB.
#[inline]
pub(crate) fn oklab_to_linear_srgb(l_ok: f32, a: f32, b: f32) -> (f32, f32, f32) {
    // Oklab → LMS (cube roots)
    let l_ = 0.215_803_76f32.mul_add(b, 0.396_337_78f32.mul_add(a, l_ok));
    let m_ = 0.063_854_17f32.mul_add(-b, 0.105_561_346f32.mul_add(-a, l_ok));
    let s_ = 1.291_485_5f32.mul_add(-b, 0.089_484_18f32.mul_add(-a, l_ok));

    // Undo cube root
    let l = l_ * l_ * l_;
    let m = m_ * m_ * m_;
    let s = s_ * s_ * s_;

    // LMS → Linear sRGB
    let r = 0.230_969_94f32.mul_add(s, 4.076_741_7f32.mul_add(l, -(3.307_711_6 * m)));
    let g = 0.341_319_38f32.mul_add(-s, (-1.268_438f32).mul_add(l, 2.609_757_4 * m));
    let bl = 1.707_614_7f32.mul_add(s, (-0.004_196_086_3f32).mul_add(l, -(0.703_418_6 * m)));

    (r, g, bl)
}

/// Convert linear sRGB to Oklab (L, a, b).
#[inline]
pub(crate) fn linear_srgb_to_oklab(r: f32, g: f32, b: f32) -> (f32, f32, f32) {
    // Linear sRGB → LMS
    let l = 0.051_445_995f32.mul_add(b, 0.412_221_47f32.mul_add(r, 0.536_332_55 * g));
    let m = 0.107_396_96f32.mul_add(b, 0.211_903_5f32.mul_add(r, 0.680_699_5 * g));
    let s = 0.629_978_7f32.mul_add(b, 0.088_302_46f32.mul_add(r, 0.281_718_84 * g));

    // Cube root (LMS → Oklab intermediate)
    let l_ = l.cbrt();
    let m_ = m.cbrt();
    let s_ = s.cbrt();

    let l_ok = 0.004_072_047f32.mul_add(-s_, 0.210_454_26f32.mul_add(l_, 0.793_617_8 * m_));
    let a = 0.450_593_7f32.mul_add(s_, 1.977_998_5f32.mul_add(l_, -(2.428_592_2 * m_)));
    let b_ok = 0.808_675_77f32.mul_add(-s_, 0.025_904_037f32.mul_add(l_, 0.782_771_77 * m_));

    (l_ok, a, b_ok)
}

// ─── Linear sRGB ↔ sRGB (Gamma) ─────────────────────────────────────────────

/// Convert a single linear sRGB component to sRGB (apply gamma).
#[inline]
#[must_use]
pub fn linear_to_srgb(c: f32) -> f32 {
    if c <= 0.003_130_8 {
        c * 12.92
    } else {
        1.055f32.mul_add(c.powf(1.0 / 2.4), -0.055)
    }
}

/// Convert a single sRGB component to linear sRGB (remove gamma).
///
/// WCAG relative luminance is defined over these linearized components,
/// which is why this is public (see lumen-theme's contrast module).
#[inline]
#[must_use]
pub fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.040_45 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

// ─── Composite Conversions ───────────────────────────────────────────────────

/// Convert sRGB (0.0–1.0) → OKLCH.
pub(crate) fn srgb_to_oklch(r: f32, g: f32, b: f32) -> (f32, f32, f32) {
    let lr = srgb_to_linear(r);
    let lg = srgb_to_linear(g);
    let lb = srgb_to_linear(b);
    let (l, a, b_ok) = linear_srgb_to_oklab(lr, lg, lb);
    let (c, h) = oklab_ab_to_oklch(a, b_ok);
    (l, c, h)
}

/// Convert OKLCH → sRGB (0.0–1.0, may be out of gamut).
pub(crate) fn oklch_to_srgb(l: f32, c: f32, h: f32) -> (f32, f32, f32) {
    let (a, b) = oklch_to_oklab_ab(c, h);
    let (lr, lg, lb) = oklab_to_linear_srgb(l, a, b);
    (linear_to_srgb(lr), linear_to_srgb(lg), linear_to_srgb(lb))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn approx_eq(a: f32, b: f32, eps: f32) -> bool {
        (a - b).abs() < eps
    }

    #[test]
    fn normalize_negative() {
        assert!(approx_eq(normalize_hue(-30.0), 330.0, 1e-4));
    }

    #[test]
    fn normalize_over_360() {
        assert!(approx_eq(normalize_hue(720.5), 0.5, 1e-3));
    }

    #[test]
    fn hue_distance_wraps() {
        // 350° and 10° are 20° apart on the circle, not 340°.
        assert!(approx_eq(hue_distance(350.0, 10.0), 20.0, 1e-4));
    }

    #[test]
    fn hue_distance_symmetric() {
        assert!(approx_eq(hue_distance(40.0, 200.0), hue_distance(200.0, 40.0), 1e-5));
    }

    #[test]
    fn gamma_roundtrip() {
        for v in [0.0, 0.001, 0.04, 0.5, 0.99, 1.0] {
            let back = srgb_to_linear(linear_to_srgb(v));
            assert!(approx_eq(v, back, 1e-4), "gamma roundtrip at {v}: {back}");
        }
    }

    #[test]
    fn srgb_primaries_roundtrip() {
        let primaries: [(f32, f32, f32); 6] = [
            (1.0, 0.0, 0.0),
            (0.0, 1.0, 0.0),
            (0.0, 0.0, 1.0),
            (1.0, 1.0, 0.0),
            (0.0, 1.0, 1.0),
            (1.0, 0.0, 1.0),
        ];
        for (r, g, b) in primaries {
            let (l, c, h) = srgb_to_oklch(r, g, b);
            let (rr, rg, rb) = oklch_to_srgb(l, c, h);
            assert!(
                approx_eq(r, rr, 0.005) && approx_eq(g, rg, 0.005) && approx_eq(b, rb, 0.005),
                "roundtrip failed for ({r}, {g}, {b}): got ({rr:.4}, {rg:.4}, {rb:.4})"
            );
        }
    }

    proptest! {
        #[test]
        fn normalized_hue_always_in_range(h in -10_000.0f32..10_000.0) {
            let n = normalize_hue(h);
            prop_assert!((0.0..360.0).contains(&n), "normalize_hue({h}) = {n}");
        }

        #[test]
        fn hue_distance_bounded(a in 0.0f32..360.0, b in 0.0f32..360.0) {
            let d = hue_distance(a, b);
            prop_assert!((0.0..=180.0).contains(&d));
        }

        #[test]
        fn srgb_oklch_roundtrip(r in 0.0f32..=1.0, g in 0.0f32..=1.0, b in 0.0f32..=1.0) {
            let (l, c, h) = srgb_to_oklch(r, g, b);
            let (rr, rg, rb) = oklch_to_srgb(l, c, h);
            prop_assert!((r - rr).abs() < 0.01);
            prop_assert!((g - rg).abs() < 0.01);
            prop_assert!((b - rb).abs() < 0.01);
        }
    }
}
