// SPDX-License-Identifier: MIT

//! WCAG contrast enforcement for text roles.
//!
//! Readability is measured in sRGB relative luminance space (the WCAG 2.1
//! definition), but adjustments happen in OKLCH lightness, where steps are
//! perceptually uniform. Generated ink colors pass through
//! [`ensure_contrast`] so a randomized palette can never produce unreadable
//! body text.

use lumen_color::{Color, srgb_to_linear};

/// Compute the relative luminance of a color per WCAG 2.1.
///
/// `L = 0.2126·R_lin + 0.7152·G_lin + 0.0722·B_lin` over the linearized
/// sRGB components. Returns a value in [0.0, 1.0].
#[must_use]
pub fn relative_luminance(color: Color) -> f64 {
    let (r, g, b) = color.to_srgb();
    let r_lin = f64::from(srgb_to_linear(r));
    let g_lin = f64::from(srgb_to_linear(g));
    let b_lin = f64::from(srgb_to_linear(b));
    0.2126f64.mul_add(r_lin, 0.7152f64.mul_add(g_lin, 0.0722 * b_lin))
}

/// Compute the WCAG 2.1 contrast ratio between two colors.
///
/// `(L_lighter + 0.05) / (L_darker + 0.05)`, in [1.0, 21.0], symmetric in
/// its arguments.
#[must_use]
pub fn contrast_ratio(a: Color, b: Color) -> f64 {
    let la = relative_luminance(a);
    let lb = relative_luminance(b);
    let (lighter, darker) = if la >= lb { (la, lb) } else { (lb, la) };
    (lighter + 0.05) / (darker + 0.05)
}

/// Adjust a foreground color's OKLCH lightness until it meets `min_ratio`
/// contrast against `bg`.
///
/// The adjustment direction follows the background: on a light background
/// the foreground darkens, on a dark background it lightens. Binary search
/// keeps the result as close to the original lightness as the constraint
/// allows. Hue and chroma are preserved (up to gamut fitting).
#[must_use]
pub fn ensure_contrast(fg: Color, bg: Color, min_ratio: f64) -> Color {
    if contrast_ratio(fg, bg) >= min_ratio {
        return fg.to_gamut();
    }

    // Perceptual mid-gray sits near luminance 0.18.
    let darkening = relative_luminance(bg) >= 0.18;
    let (mut lo, mut hi) = if darkening { (0.0, fg.l) } else { (fg.l, 1.0) };

    let mut best = fg;
    for _ in 0..32 {
        let mid = (lo + hi) * 0.5;
        let candidate = Color::oklch(mid, fg.c, fg.h).to_gamut();
        let ratio = contrast_ratio(candidate, bg);
        if ratio >= min_ratio {
            best = candidate;
            // Constraint met — steer back toward the original lightness.
            if darkening {
                lo = mid;
            } else {
                hi = mid;
            }
        } else if darkening {
            hi = mid;
        } else {
            lo = mid;
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

    fn approx_eq(a: f64, b: f64, eps: f64) -> bool {
        (a - b).abs() < eps
    }

    // ── Relative luminance ──────────────────────────────────────────

    #[test]
    fn luminance_black_is_zero() {
        assert!(approx_eq(relative_luminance(Color::BLACK), 0.0, 0.001));
    }

    #[test]
    fn luminance_white_is_one() {
        assert!(approx_eq(relative_luminance(Color::WHITE), 1.0, 0.001));
    }

    #[test]
    fn luminance_pure_green_dominates() {
        let lum = relative_luminance(Color::srgb(0.0, 1.0, 0.0));
        assert!(approx_eq(lum, 0.7152, 0.01), "green luminance: {lum}");
    }

    // ── Contrast ratio ──────────────────────────────────────────────

    #[test]
    fn contrast_black_white_is_21() {
        let ratio = contrast_ratio(Color::BLACK, Color::WHITE);
        assert!(approx_eq(ratio, 21.0, 0.1), "B/W contrast: {ratio}");
    }

    #[test]
    fn contrast_same_color_is_1() {
        let c = Color::oklch(0.5, 0.1, 180.0);
        assert!(approx_eq(contrast_ratio(c, c), 1.0, 0.01));
    }

    #[test]
    fn contrast_is_symmetric() {
        let a = Color::srgb(0.8, 0.2, 0.3);
        let b = Color::srgb(0.1, 0.1, 0.4);
        assert!(approx_eq(contrast_ratio(a, b), contrast_ratio(b, a), 0.001));
    }

    // ── ensure_contrast ─────────────────────────────────────────────

    #[test]
    fn already_readable_unchanged_direction() {
        let fg = Color::BLACK;
        let bg = Color::WHITE;
        let adjusted = ensure_contrast(fg, bg, 4.5);
        assert!(contrast_ratio(adjusted, bg) >= 4.5);
    }

    #[test]
    fn darkens_on_light_background() {
        // Washed-out ink on a near-white background.
        let fg = Color::oklch(0.80, 0.03, 40.0);
        let bg = Color::oklch(0.97, 0.01, 40.0);
        let adjusted = ensure_contrast(fg, bg, 5.5);
        assert!(contrast_ratio(adjusted, bg) >= 5.5);
        assert!(adjusted.l < fg.l, "should have darkened");
    }

    #[test]
    fn lightens_on_dark_background() {
        let fg = Color::oklch(0.25, 0.05, 270.0);
        let bg = Color::oklch(0.15, 0.005, 270.0);
        let adjusted = ensure_contrast(fg, bg, 5.5);
        assert!(contrast_ratio(adjusted, bg) >= 5.5);
        assert!(adjusted.l > fg.l, "should have lightened");
    }

    #[test]
    fn preserves_hue() {
        let fg = Color::oklch(0.75, 0.10, 180.0);
        let bg = Color::oklch(0.97, 0.005, 40.0);
        let adjusted = ensure_contrast(fg, bg, 5.5);
        let hue_diff = (adjusted.h - fg.h).abs();
        assert!(hue_diff < 5.0 || hue_diff > 355.0, "hue shifted: {hue_diff}");
    }

    #[test]
    fn result_in_gamut() {
        let fg = Color::oklch(0.70, 0.35, 200.0);
        let bg = Color::oklch(0.97, 0.01, 40.0);
        assert!(ensure_contrast(fg, bg, 5.5).in_srgb_gamut());
    }
}
