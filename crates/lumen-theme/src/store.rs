// SPDX-License-Identifier: MIT

//! Durable storage for the single theme record.
//!
//! One record, one fixed key ([`crate::theme::STORAGE_KEY`]). Stores report
//! failures through [`StoreError`], but the engine treats every storage
//! fault as survivable: a failed load falls back to the golden master, a
//! failed save leaves the in-memory theme authoritative.

use std::cell::RefCell;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use std::collections::BTreeMap;

use thiserror::Error;

use crate::theme::{STORAGE_KEY, Theme};

/// Why a load or save failed.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("theme storage I/O: {0}")]
    Io(#[from] io::Error),

    #[error("malformed theme record: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Key-value persistence for the current theme.
pub trait ThemeStore {
    /// Read the persisted theme. `Ok(None)` means nothing was ever saved —
    /// the first-run case, not an error.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the backing storage fails or holds a
    /// record that does not parse.
    fn load(&self) -> Result<Option<Theme>, StoreError>;

    /// Replace the persisted theme.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the record cannot be written.
    fn save(&mut self, theme: &Theme) -> Result<(), StoreError>;
}

/// Shared handle: lets tests (or a host) keep a view into a store an engine
/// owns.
impl<S: ThemeStore> ThemeStore for Rc<RefCell<S>> {
    fn load(&self) -> Result<Option<Theme>, StoreError> {
        self.borrow().load()
    }

    fn save(&mut self, theme: &Theme) -> Result<(), StoreError> {
        self.borrow_mut().save(theme)
    }
}

// ---------------------------------------------------------------------------
// MemoryStore
// ---------------------------------------------------------------------------

/// In-memory key-value store; the theme record lives under
/// [`STORAGE_KEY`], the way a browser host would use `localStorage`.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: BTreeMap<String, String>,
}

impl MemoryStore {
    #[must_use]
    pub const fn new() -> Self {
        Self { records: BTreeMap::new() }
    }

    /// A store pre-seeded with a raw record — including, for tests, a
    /// corrupt one.
    #[must_use]
    pub fn with_record(raw: impl Into<String>) -> Self {
        let mut store = Self::new();
        store.records.insert(STORAGE_KEY.to_owned(), raw.into());
        store
    }

    /// The raw persisted record, if any.
    #[must_use]
    pub fn record(&self) -> Option<&str> {
        self.records.get(STORAGE_KEY).map(String::as_str)
    }
}

impl ThemeStore for MemoryStore {
    fn load(&self) -> Result<Option<Theme>, StoreError> {
        self.record()
            .map(Theme::from_json)
            .transpose()
            .map_err(StoreError::from)
    }

    fn save(&mut self, theme: &Theme) -> Result<(), StoreError> {
        let record = theme.to_json()?;
        self.records.insert(STORAGE_KEY.to_owned(), record);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// JsonFileStore
// ---------------------------------------------------------------------------

/// File-backed store: the record is one JSON file on disk.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ThemeStore for JsonFileStore {
    fn load(&self) -> Result<Option<Theme>, StoreError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        Ok(Some(Theme::from_json(&raw)?))
    }

    fn save(&mut self, theme: &Theme) -> Result<(), StoreError> {
        fs::write(&self.path, theme.to_json()?)?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
