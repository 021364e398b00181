// SPDX-License-Identifier: MIT

//! # lumen-theme — generative color-harmony theming engine
//!
//! Synthesizes a complete, visually coherent UI palette and background
//! gradient on demand, entirely in OKLCH. One call to
//! [`ThemeEngine::randomize`] produces a new theme whose colors are
//! harmonically related, gamut-safe, and readable.
//!
//! # Architecture
//!
//! ```text
//! HarmonyScheme + base hue + ThemeRng
//!     │
//!     ▼
//! harmony.rs:  generate four related hues (pure math + bounded sampling)
//!     │
//!     ▼
//! palette.rs:  assign hues to UI color roles (backgrounds/accents/status)
//!     │            │ every role goes through…
//!     │            ▼
//! synth.rs:    gamut-constrained synthesis + bounded cache
//!     │
//!     ▼
//! gradient.rs: multi-stop background gradient from the same hues
//!     │
//!     ▼
//! engine.rs:   current-theme state, subscribe/notify, persistence,
//!              custom-property application
//! ```
//!
//! # Color Space
//!
//! All generation happens in OKLCH (perceptually uniform). Colors are
//! checked against the rendering gamut during synthesis and resolved to
//! CSS `oklch()` strings when a theme is assembled; consumers of a
//! [`Theme`] never do color math.

// Hue/lightness/chroma variable names are inherently similar.
#![allow(clippy::similar_names)]
// Mathematical code uses small integer-to-float casts (loop indices, angles).
#![allow(clippy::cast_precision_loss)]
// f64→f32 truncation is intentional (random values don't need f64 precision).
#![allow(clippy::cast_possible_truncation)]

pub mod contrast;
pub mod engine;
pub mod gradient;
pub mod harmony;
pub mod palette;
pub mod rng;
pub mod store;
pub mod synth;
pub mod theme;

pub use engine::{ApplySurface, EngineConfig, MemorySurface, ThemeEngine};
pub use harmony::{HarmonyScheme, HueSet, SchemeWeights};
pub use palette::{Palette, Strategy};
pub use rng::ThemeRng;
pub use store::{JsonFileStore, MemoryStore, ThemeStore};
pub use synth::{ColorSynth, RenderProbe, SrgbProbe};
pub use theme::Theme;
