// SPDX-License-Identifier: MIT

//! The theme engine — owns the current theme and everything that produces it.
//!
//! One [`ThemeEngine`] instance holds its own synthesizer cache, random
//! source, observer list, and storage handle; independent instances never
//! share state. All methods take `&self` — the engine is a single-threaded
//! cell-based state machine, which is what lets a subscriber call back into
//! the engine (such a re-entrant `set` is queued, never dispatched
//! recursively).
//!
//! Applying a theme to the live surface is *staged*: `set` records the theme
//! and notifies, the host's frame tick calls [`ThemeEngine::flush`] to push
//! custom properties. A newer `set` before the flush simply overwrites the
//! staged value — last write wins, nothing is cancelled.

use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, VecDeque};
use std::rc::Rc;

use tracing::{debug, warn};

use crate::harmony::{DEFAULT_MIN_SEPARATION, DEFAULT_RETRY_BUDGET, SchemeWeights};
use crate::palette::{BRAND_ARC, Palette, Strategy};
use crate::rng::ThemeRng;
use crate::store::ThemeStore;
use crate::synth::{ColorSynth, DEFAULT_CACHE_CAPACITY, SrgbProbe};
use crate::theme::Theme;

// ---------------------------------------------------------------------------
// ApplySurface
// ---------------------------------------------------------------------------

/// The live rendering surface: a sink for custom style properties.
///
/// This is the engine's only outward effect — it sets a fixed set of
/// properties (one per role, `--`-prefixed) and touches nothing else.
pub trait ApplySurface {
    fn set_property(&mut self, name: &str, value: &str);
}

/// Shared handle: lets tests (or a host) keep a view into a surface an
/// engine owns.
impl<S: ApplySurface> ApplySurface for Rc<RefCell<S>> {
    fn set_property(&mut self, name: &str, value: &str) {
        self.borrow_mut().set_property(name, value);
    }
}

/// Recording surface for tests and headless hosts.
#[derive(Debug, Default)]
pub struct MemorySurface {
    props: BTreeMap<String, String>,
    writes: usize,
}

impl MemorySurface {
    #[must_use]
    pub const fn new() -> Self {
        Self { props: BTreeMap::new(), writes: 0 }
    }

    /// Current value of a property.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.props.get(name).map(String::as_str)
    }

    /// Number of distinct properties ever set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.props.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.props.is_empty()
    }

    /// Total `set_property` calls (including overwrites).
    #[must_use]
    pub const fn writes(&self) -> usize {
        self.writes
    }
}

impl ApplySurface for MemorySurface {
    fn set_property(&mut self, name: &str, value: &str) {
        self.props.insert(name.to_owned(), value.to_owned());
        self.writes += 1;
    }
}

// ---------------------------------------------------------------------------
// EngineConfig
// ---------------------------------------------------------------------------

/// Tunables for one engine instance.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Which palette generator `randomize` runs.
    pub strategy: Strategy,
    /// Scheme selection weights.
    pub weights: SchemeWeights,
    /// Bound on the synthesizer cache.
    pub cache_capacity: usize,
    /// Wildcard scheme: minimum pairwise hue distance.
    pub min_hue_separation: f32,
    /// Wildcard scheme: rejection-sampling retry budget per hue.
    pub retry_budget: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            strategy: Strategy::FreeRange,
            weights: SchemeWeights::default(),
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            min_hue_separation: DEFAULT_MIN_SEPARATION,
            retry_budget: DEFAULT_RETRY_BUDGET,
        }
    }
}

// ---------------------------------------------------------------------------
// ThemeEngine
// ---------------------------------------------------------------------------

/// Handle for removing a subscriber.
pub type ListenerId = u64;

type Listener = Box<dyn FnMut(&Theme)>;

/// Single current-theme state machine with generation, persistence, and
/// observer dispatch.
pub struct ThemeEngine {
    config: EngineConfig,
    synth: RefCell<ColorSynth>,
    rng: RefCell<ThemeRng>,
    store: RefCell<Box<dyn ThemeStore>>,
    surface: RefCell<Box<dyn ApplySurface>>,
    current: RefCell<Theme>,
    staged: RefCell<Option<Theme>>,
    listeners: RefCell<Vec<(ListenerId, Listener)>>,
    removed: RefCell<Vec<ListenerId>>,
    queued: RefCell<VecDeque<Theme>>,
    dispatching: Cell<bool>,
    next_listener: Cell<ListenerId>,
}

impl ThemeEngine {
    /// Engine with an entropy-seeded random source.
    #[must_use]
    pub fn new(
        config: EngineConfig,
        store: impl ThemeStore + 'static,
        surface: impl ApplySurface + 'static,
    ) -> Self {
        Self::build(config, Box::new(store), Box::new(surface), ThemeRng::from_entropy())
    }

    /// Engine with a deterministic random source.
    #[must_use]
    pub fn seeded(
        config: EngineConfig,
        store: impl ThemeStore + 'static,
        surface: impl ApplySurface + 'static,
        seed: u64,
    ) -> Self {
        Self::build(config, Box::new(store), Box::new(surface), ThemeRng::seeded(seed))
    }

    fn build(
        config: EngineConfig,
        store: Box<dyn ThemeStore>,
        surface: Box<dyn ApplySurface>,
        rng: ThemeRng,
    ) -> Self {
        let synth =
            ColorSynth::with_capacity(Some(Box::new(SrgbProbe)), config.cache_capacity);
        Self {
            config,
            synth: RefCell::new(synth),
            rng: RefCell::new(rng),
            store: RefCell::new(store),
            surface: RefCell::new(surface),
            current: RefCell::new(Theme::golden_master()),
            staged: RefCell::new(None),
            listeners: RefCell::new(Vec::new()),
            removed: RefCell::new(Vec::new()),
            queued: RefCell::new(VecDeque::new()),
            dispatching: Cell::new(false),
            next_listener: Cell::new(0),
        }
    }

    /// Restore the persisted theme, or adopt the golden master.
    ///
    /// Missing or malformed storage is the first-run case, never an error:
    /// the golden master applies and the app moves on. The adopted theme is
    /// pushed to the surface immediately (startup has no frame to wait for).
    pub fn init(&self) {
        let theme = match self.store.borrow().load() {
            Ok(Some(theme)) => theme,
            Ok(None) => {
                debug!("no persisted theme; starting from the golden master");
                Theme::golden_master()
            }
            Err(err) => {
                warn!(error = %err, "could not restore persisted theme; using the golden master");
                Theme::golden_master()
            }
        };
        self.apply(&theme);
        *self.current.borrow_mut() = theme;
    }

    /// Generate a fresh theme and make it current.
    ///
    /// Picks a harmony scheme by weight, a base hue per the strategy, and
    /// runs the assembler; the result goes through [`ThemeEngine::set`].
    pub fn randomize(&self) -> Theme {
        let theme = {
            let mut rng = self.rng.borrow_mut();
            let mut synth = self.synth.borrow_mut();

            let scheme = self.config.weights.pick(&mut rng);
            let base = match self.config.strategy {
                Strategy::FreeRange => rng.hue(),
                Strategy::BrandLocked => BRAND_ARC.sample(&mut rng),
            };
            let hues = scheme.generate_with(
                base,
                &mut rng,
                self.config.min_hue_separation,
                self.config.retry_budget,
            );
            let palette = Palette::generate(self.config.strategy, hues, &mut synth, &mut rng);
            Theme::from_palette(scheme.name(), &palette)
        };
        self.set(theme.clone());
        theme
    }

    /// Replace the current theme: notify subscribers, persist, stage the
    /// surface application.
    ///
    /// Re-entrant calls (a subscriber setting a theme from inside its
    /// notification) are queued and run after the in-flight dispatch
    /// completes. A persistence failure is logged and swallowed — the
    /// in-memory theme stays authoritative.
    pub fn set(&self, theme: Theme) {
        if self.dispatching.get() {
            self.queued.borrow_mut().push_back(theme);
            return;
        }

        let mut next = Some(theme);
        while let Some(theme) = next {
            self.commit(theme);
            next = self.queued.borrow_mut().pop_front();
        }
    }

    fn commit(&self, theme: Theme) {
        *self.current.borrow_mut() = theme.clone();
        *self.staged.borrow_mut() = Some(theme.clone());

        if let Err(err) = self.store.borrow_mut().save(&theme) {
            warn!(error = %err, "theme persistence failed; keeping in-memory state");
        }

        self.dispatch(&theme);
    }

    fn dispatch(&self, theme: &Theme) {
        self.dispatching.set(true);

        let mut active = self.listeners.take();
        for (id, listener) in &mut active {
            if !self.removed.borrow().contains(id) {
                listener(theme);
            }
        }

        // Listeners may have subscribed (landing in the now-empty live list)
        // or unsubscribed (landing in `removed`) while we held the snapshot.
        let added = self.listeners.take();
        active.extend(added);
        let removed = self.removed.take();
        active.retain(|(id, _)| !removed.contains(id));
        *self.listeners.borrow_mut() = active;

        self.dispatching.set(false);
    }

    /// Push a theme's properties to the surface. Idempotent — applying the
    /// same theme twice sets the same properties to the same values.
    pub fn apply(&self, theme: &Theme) {
        let mut surface = self.surface.borrow_mut();
        for (role, value) in &theme.vars {
            surface.set_property(&format!("--{role}"), value);
        }
    }

    /// Apply the staged theme, if any. Hosts call this on their frame tick;
    /// repeated calls without an intervening `set` do nothing.
    pub fn flush(&self) {
        let staged = self.staged.borrow_mut().take();
        if let Some(theme) = staged {
            self.apply(&theme);
        }
    }

    /// The current theme.
    #[must_use]
    pub fn current(&self) -> Theme {
        self.current.borrow().clone()
    }

    /// Register a listener for theme replacements. Listeners added during a
    /// dispatch first fire on the next one.
    pub fn subscribe(&self, listener: impl FnMut(&Theme) + 'static) -> ListenerId {
        let id = self.next_listener.get();
        self.next_listener.set(id + 1);
        self.listeners.borrow_mut().push((id, Box::new(listener)));
        id
    }

    /// Remove a listener. Safe to call from inside a notification.
    pub fn unsubscribe(&self, id: ListenerId) {
        if self.dispatching.get() {
            self.removed.borrow_mut().push(id);
        } else {
            self.listeners.borrow_mut().retain(|(lid, _)| *lid != id);
        }
    }
}

impl std::fmt::Debug for ThemeEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThemeEngine")
            .field("strategy", &self.config.strategy)
            .field("scheme", &self.current.borrow().scheme)
            .field("listeners", &self.listeners.borrow().len())
            .finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
