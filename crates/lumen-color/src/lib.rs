// SPDX-License-Identifier: MIT
//
// lumen-color — OKLCH-native color support for theme generation.
//
// Everything the engine does to a color (pick a hue, scale chroma, check
// whether the result is displayable) happens in perceptual space. This crate
// holds the color type itself plus the conversion pipeline:
//
//   OKLCH ↔ Oklab ↔ Linear sRGB ↔ sRGB ↔ CSS output (oklch()/hex)
//
// Gamut checking is exact against sRGB; the engine layers its own bounded
// chroma search on top (see lumen-theme).

// Single-character variable names (r, g, b, l, c, h, a) are the standard
// mathematical convention in color science.
#![allow(clippy::many_single_char_names)]
// Hue/lightness/chroma variable names are inherently similar.
#![allow(clippy::similar_names)]
// f64→f32 truncation is intentional in conversion helpers.
#![allow(clippy::cast_possible_truncation)]

pub mod color;
pub mod space;

pub use color::Color;
pub use space::{hue_distance, normalize_hue, srgb_to_linear};
