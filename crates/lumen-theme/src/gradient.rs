// SPDX-License-Identifier: MIT

//! Background gradient synthesis.
//!
//! Builds a soft multi-stop gradient from the theme's generated hues. Stop
//! colors are pale washes of the palette hues, produced through the
//! synthesizer so the gradient is gamut-safe like every other role. Shapes
//! and angles are randomized inside deliberately narrow bands; a fully
//! random gradient reads as noise, not as a background.

use lumen_color::Color;

use crate::rng::ThemeRng;
use crate::synth::ColorSynth;

/// Share of gradients that come out linear (the rest are radial).
const LINEAR_SHARE: f32 = 0.72;

/// One color stop: a color and its position along the gradient, in percent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradientStop {
    pub color: Color,
    pub position: f32,
}

/// Gradient geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GradientShape {
    /// Straight-line gradient at `angle` degrees.
    Linear { angle: f32 },
    /// Elliptical gradient centered at (`cx`, `cy`), in percent of the surface.
    Radial { cx: f32, cy: f32 },
}

/// An ordered multi-stop background gradient.
#[derive(Debug, Clone, PartialEq)]
pub struct Gradient {
    pub shape: GradientShape,
    pub stops: Vec<GradientStop>,
}

impl Gradient {
    /// Render as a CSS gradient expression.
    #[must_use]
    pub fn to_css(&self) -> String {
        let stops = self
            .stops
            .iter()
            .map(|s| format!("{} {:.1}%", s.color.to_css(), s.position))
            .collect::<Vec<_>>()
            .join(", ");

        match self.shape {
            GradientShape::Linear { angle } => {
                format!("linear-gradient({angle:.1}deg, {stops})")
            }
            GradientShape::Radial { cx, cy } => {
                format!("radial-gradient(ellipse at {cx:.1}% {cy:.1}%, {stops})")
            }
        }
    }
}

/// Build a background gradient from 1–4 related hues.
///
/// Shape: ~72% linear with the angle confined to a diagonal band (95–165°);
/// otherwise an ellipse with a randomized off-center focal point. Stops:
/// 2–4 pale washes of the input hues, with the first stop covering the
/// largest share of the surface for smooth blending.
pub fn build_gradient(hues: &[f32], synth: &mut ColorSynth, rng: &mut ThemeRng) -> Gradient {
    let fallback = [40.0f32];
    let hues = if hues.is_empty() { &fallback[..] } else { hues };

    let shape = if rng.chance(LINEAR_SHARE) {
        GradientShape::Linear { angle: rng.range(95.0, 165.0) }
    } else {
        GradientShape::Radial {
            cx: rng.range(12.0, 88.0),
            cy: rng.range(8.0, 55.0),
        }
    };

    let count = *rng.pick(&[2usize, 3, 3, 4]);
    let positions = stop_positions(count, rng);

    let stops = positions
        .into_iter()
        .enumerate()
        .map(|(i, position)| {
            let hue = hues[i % hues.len()];
            let color = synth.synthesize(rng.range(90.0, 96.0), rng.range(0.035, 0.08), hue);
            GradientStop { color, position }
        })
        .collect();

    Gradient { shape, stops }
}

/// Stop positions in percent: always starting at 0, with the first span the
/// widest so the leading color dominates the blend.
fn stop_positions(count: usize, rng: &mut ThemeRng) -> Vec<f32> {
    match count {
        2 => vec![0.0, rng.range(65.0, 90.0)],
        3 => vec![0.0, rng.range(55.0, 75.0), 100.0],
        _ => {
            let second = rng.range(50.0, 62.0);
            let third = second + rng.range(10.0, 28.0);
            vec![0.0, second, third, 100.0]
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
