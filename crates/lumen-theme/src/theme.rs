// SPDX-License-Identifier: MIT

//! The `Theme` record — the unit that is applied, persisted, and restored.
//!
//! A theme is deliberately *stringly*: a flat map of role names to CSS value
//! expressions, plus the harmony scheme name kept for diagnostics. Once a
//! palette is rendered into a theme, no further color math happens — the
//! record round-trips through storage byte-for-byte and applies to the
//! surface verbatim.

use std::collections::BTreeMap;

use lumen_color::Color;
use serde::{Deserialize, Serialize};

use crate::gradient::{Gradient, GradientShape, GradientStop};
use crate::palette::{self, Palette};

/// The single fixed key the theme record lives under in the host's
/// key-value store.
pub const STORAGE_KEY: &str = "lumen.theme";

/// Role key the gradient expression is stored under.
pub const GRADIENT_ROLE: &str = "gradient";

/// A complete, renderer-ready theme.
///
/// Serializes to one flat JSON object of string keys and string values:
/// the scheme name plus every role's CSS expression.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Theme {
    /// Harmony scheme that produced this theme (diagnostics/display only).
    pub scheme: String,

    /// Role name → CSS value (`oklch()` color or gradient expression).
    #[serde(flatten)]
    pub vars: BTreeMap<String, String>,
}

impl Theme {
    /// Render a palette into a theme record.
    #[must_use]
    pub fn from_palette(scheme: &str, palette: &Palette) -> Self {
        let mut vars = BTreeMap::new();
        for (role, color) in palette.color_roles() {
            vars.insert(role.to_owned(), color.to_css());
        }
        vars.insert(GRADIENT_ROLE.to_owned(), palette.gradient.to_css());
        Self { scheme: scheme.to_owned(), vars }
    }

    /// The canonical golden-master theme — the fallback when nothing is
    /// persisted (or the persisted record is malformed).
    ///
    /// Rendered from the same reference recipes the brand-locked assembler
    /// deviates around, so a freshly initialized app and a zero-deviation
    /// brand generation agree on the structural colors.
    #[must_use]
    pub fn golden_master() -> Self {
        let color = |(l, c, h): (f32, f32, f32)| Color::oklch(l / 100.0, c, h).to_css();

        let mut vars = BTreeMap::new();
        vars.insert("background".to_owned(), color(palette::GM_BG1));
        vars.insert("background-alt".to_owned(), color(palette::GM_BG2));
        vars.insert("background-faint".to_owned(), color(palette::GM_BG3));
        vars.insert("ink".to_owned(), color(palette::GM_INK));
        vars.insert("border".to_owned(), color(palette::GM_BORDER));
        vars.insert("primary".to_owned(), color(palette::GM_PRIMARY));
        vars.insert("secondary".to_owned(), color(palette::GM_SECONDARY));
        vars.insert("accent".to_owned(), color(palette::GM_ACCENT));
        vars.insert("info".to_owned(), color((72.0, 0.11, 78.0)));
        vars.insert("success".to_owned(), color((72.0, 0.12, 90.0)));
        vars.insert("warning".to_owned(), color((78.0, 0.13, 50.0)));
        vars.insert("error".to_owned(), color((64.0, 0.15, 22.0)));

        let gradient = Gradient {
            shape: GradientShape::Linear { angle: 135.0 },
            stops: vec![
                GradientStop { color: Color::oklch(0.955, 0.045, 40.0), position: 0.0 },
                GradientStop { color: Color::oklch(0.935, 0.055, 75.0), position: 62.0 },
                GradientStop { color: Color::oklch(0.945, 0.04, 355.0), position: 100.0 },
            ],
        };
        vars.insert(GRADIENT_ROLE.to_owned(), gradient.to_css());

        Self { scheme: "golden-master".to_owned(), vars }
    }

    /// Look up one role's CSS value.
    #[must_use]
    pub fn get(&self, role: &str) -> Option<&str> {
        self.vars.get(role).map(String::as_str)
    }

    /// Serialize to the flat JSON record.
    ///
    /// # Errors
    ///
    /// Returns any `serde_json` serialization error.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Parse a theme from its flat JSON record.
    ///
    /// # Errors
    ///
    /// Returns the parse error; callers fall back to
    /// [`Theme::golden_master`] rather than propagating it further.
    pub fn from_json(raw: &str) -> serde_json::Result<Self> {
        serde_json::from_str(raw)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
