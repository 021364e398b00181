// SPDX-License-Identifier: MIT
//
// lumen — generative OKLCH color-harmony theming engine.
//
// This is the demo binary that wires together the crates:
//
//   lumen-color → OKLCH color type, gamut math, CSS output
//   lumen-theme → harmony schemes, synthesis, palette assembly, engine
//
// It runs the same pipeline a host application would: restore the persisted
// theme, generate fresh ones on demand, and push custom properties to an
// apply surface — here, stdout as a `:root { … }` block:
//
//   init → randomize × N → flush
//
// Usage:
//
//   lumen [options] [count]
//
//   --locked           brand-locked generation (default: free-range)
//   --scheme NAME      force one harmony scheme instead of weighted choice
//   --seed N           deterministic run
//   --store PATH       theme record location (default: lumen-theme.json)

use std::env;
use std::process;

use lumen_theme::engine::{ApplySurface, EngineConfig, ThemeEngine};
use lumen_theme::harmony::{HarmonyScheme, SchemeWeights};
use lumen_theme::palette::Strategy;
use lumen_theme::store::JsonFileStore;

/// Apply surface that prints each custom property as a CSS declaration.
struct StdoutSurface;

impl ApplySurface for StdoutSurface {
    fn set_property(&mut self, name: &str, value: &str) {
        println!("  {name}: {value};");
    }
}

struct Options {
    strategy: Strategy,
    scheme: Option<HarmonyScheme>,
    seed: Option<u64>,
    store: String,
    count: usize,
}

fn parse_args() -> Result<Options, String> {
    let mut options = Options {
        strategy: Strategy::FreeRange,
        scheme: None,
        seed: None,
        store: "lumen-theme.json".to_owned(),
        count: 1,
    };

    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--locked" => options.strategy = Strategy::BrandLocked,
            "--scheme" => {
                let name = args.next().ok_or("--scheme needs a name")?;
                options.scheme = Some(
                    HarmonyScheme::from_name(&name)
                        .ok_or_else(|| format!("unknown scheme: {name}"))?,
                );
            }
            "--seed" => {
                let raw = args.next().ok_or("--seed needs a number")?;
                options.seed = Some(raw.parse().map_err(|_| format!("bad seed: {raw}"))?);
            }
            "--store" => options.store = args.next().ok_or("--store needs a path")?,
            "--help" | "-h" => {
                println!(
                    "usage: lumen [--locked] [--scheme NAME] [--seed N] [--store PATH] [count]"
                );
                process::exit(0);
            }
            other => {
                options.count = other
                    .parse()
                    .map_err(|_| format!("unexpected argument: {other}"))?;
            }
        }
    }

    Ok(options)
}

/// Weights that force a single scheme.
const fn only(scheme: HarmonyScheme) -> SchemeWeights {
    let mut weights = SchemeWeights {
        golden_ratio: 0.0,
        analogous: 0.0,
        split_complementary: 0.0,
        wildcard: 0.0,
    };
    match scheme {
        HarmonyScheme::GoldenRatio => weights.golden_ratio = 1.0,
        HarmonyScheme::Analogous => weights.analogous = 1.0,
        HarmonyScheme::SplitComplementary => weights.split_complementary = 1.0,
        HarmonyScheme::Wildcard => weights.wildcard = 1.0,
    }
    weights
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let options = match parse_args() {
        Ok(options) => options,
        Err(e) => {
            eprintln!("lumen: {e}");
            process::exit(2);
        }
    };

    let config = EngineConfig {
        strategy: options.strategy,
        weights: options.scheme.map_or_else(SchemeWeights::default, only),
        ..EngineConfig::default()
    };

    let store = JsonFileStore::new(&options.store);
    let engine = match options.seed {
        Some(seed) => ThemeEngine::seeded(config, store, StdoutSurface, seed),
        None => ThemeEngine::new(config, store, StdoutSurface),
    };

    println!(":root {{");
    engine.init();
    println!("}}");
    println!("/* restored: {} */", engine.current().scheme);

    for _ in 0..options.count {
        let theme = engine.randomize();
        println!("\n/* {} · {} */", theme.scheme, options.strategy.name());
        println!(":root {{");
        engine.flush();
        println!("}}");
    }
}
