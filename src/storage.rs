// IAP Settings - Configuration Store
// Copyright (C) 2026 Christos A. Daggas
// SPDX-License-Identifier: MIT

//! Hierarchical, path-addressed configuration store.
//!
//! Provides:
//! - The [`ConfigStore`] client interface used by the accessor
//! - [`MemoryStore`], an in-process store
//! - [`FileStore`], a [`MemoryStore`] persisted as a JSON document
//!
//! Directories are implicit: a directory exists while at least one key
//! lives below it. Stores use RwLock for thread-safe access. Lock poisoning
//! is handled by recovering the inner value, as poison indicates a panic in
//! another thread but the data itself may still be valid.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};

use chrono::{DateTime, Utc};
use semver::Version;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::models::{ConfigValue, Error, StoreError};
use crate::paths::{is_below, validate_key};

/// Result type for store calls.
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// What a recursive unset removes besides values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnsetMode {
    /// Keep schema associations of the removed keys.
    #[default]
    KeepSchemaNames,
    /// Remove schema associations too.
    IncludingSchemaNames,
}

/// Client interface of a hierarchical configuration store.
pub trait ConfigStore: Send + Sync {
    /// Whether any key lives below `dir`.
    fn dir_exists(&self, dir: &str) -> StoreResult<bool>;

    /// Read the value stored at `key`.
    fn get(&self, key: &str) -> StoreResult<Option<ConfigValue>>;

    /// Store `value` at `key`.
    fn set(&self, key: &str, value: ConfigValue) -> StoreResult<()>;

    /// Remove the value at `key`.
    fn unset(&self, key: &str) -> StoreResult<()>;

    /// Remove every key below `dir`.
    fn recursive_unset(&self, dir: &str, mode: UnsetMode) -> StoreResult<()>;

    /// Ask the backend to persist pending changes. Not a guaranteed flush.
    fn suggest_sync(&self) -> StoreResult<()>;

    /// Names of the immediate subdirectories of `dir`.
    fn all_dirs(&self, dir: &str) -> StoreResult<Vec<String>>;

    /// Claim `dir` for a new subtree.
    ///
    /// Returns `false` if the directory exists or was claimed before. The
    /// claim itself is invisible to [`ConfigStore::dir_exists`] and lasts
    /// until the first key is written below `dir`, the directory is
    /// recursively unset, or the store is dropped. Backends
    /// without a conditional-create primitive fall back to an existence
    /// check, which is racy across processes.
    fn reserve_dir(&self, dir: &str) -> StoreResult<bool> {
        Ok(!self.dir_exists(dir)?)
    }
}

impl<T: ConfigStore + ?Sized> ConfigStore for Arc<T> {
    fn dir_exists(&self, dir: &str) -> StoreResult<bool> {
        (**self).dir_exists(dir)
    }

    fn get(&self, key: &str) -> StoreResult<Option<ConfigValue>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: ConfigValue) -> StoreResult<()> {
        (**self).set(key, value)
    }

    fn unset(&self, key: &str) -> StoreResult<()> {
        (**self).unset(key)
    }

    fn recursive_unset(&self, dir: &str, mode: UnsetMode) -> StoreResult<()> {
        (**self).recursive_unset(dir, mode)
    }

    fn suggest_sync(&self) -> StoreResult<()> {
        (**self).suggest_sync()
    }

    fn all_dirs(&self, dir: &str) -> StoreResult<Vec<String>> {
        (**self).all_dirs(dir)
    }

    fn reserve_dir(&self, dir: &str) -> StoreResult<bool> {
        (**self).reserve_dir(dir)
    }
}

fn check_key(key: &str) -> StoreResult<()> {
    validate_key(key).map_err(|reason| StoreError::invalid_key(key, reason))
}

/// A stored key: its value and optional schema association.
#[derive(Debug, Clone, Default)]
struct Entry {
    value: Option<ConfigValue>,
    schema: Option<String>,
}

impl Entry {
    fn is_empty(&self) -> bool {
        self.value.is_none() && self.schema.is_none()
    }
}

#[derive(Debug, Default)]
struct StoreState {
    entries: BTreeMap<String, Entry>,
    reserved: BTreeSet<String>,
}

impl StoreState {
    fn dir_exists(&self, dir: &str) -> bool {
        let dir = dir.trim_end_matches('/');
        let prefix = format!("{}/", dir);
        self.entries
            .range(prefix.clone()..)
            .next()
            .map(|(key, _)| key.starts_with(&prefix))
            .unwrap_or(false)
    }

    /// Entry for `key`, created if missing.
    ///
    /// A write below a reserved directory turns the reservation into a real
    /// directory, so the reservation is released.
    fn entry_mut(&mut self, key: &str) -> &mut Entry {
        self.reserved.retain(|dir| !is_below(key, dir));
        self.entries.entry(key.to_string()).or_default()
    }
}

/// In-process configuration store.
#[derive(Debug)]
pub struct MemoryStore {
    state: RwLock<StoreState>,
    available: AtomicBool,
    dirty: AtomicBool,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            state: RwLock::new(StoreState::default()),
            available: AtomicBool::new(true),
            dirty: AtomicBool::new(false),
        }
    }

    /// Simulate losing (or regaining) the store connection.
    ///
    /// While unavailable every call fails with [`StoreError::Unavailable`].
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    /// Associate a schema name with `key`.
    pub fn associate_schema(&self, key: &str, schema: &str) -> StoreResult<()> {
        self.ensure_available()?;
        check_key(key)?;
        self.write_state(|state| {
            state.entry_mut(key).schema = Some(schema.to_string());
        });
        self.dirty.store(true, Ordering::SeqCst);
        Ok(())
    }

    /// Schema name associated with `key`, if any.
    pub fn schema_name(&self, key: &str) -> StoreResult<Option<String>> {
        self.ensure_available()?;
        Ok(self.read_state(|state| state.entries.get(key).and_then(|e| e.schema.clone())))
    }

    /// Snapshot of every key that holds a value.
    pub fn values(&self) -> BTreeMap<String, ConfigValue> {
        self.read_state(|state| {
            state
                .entries
                .iter()
                .filter_map(|(k, e)| e.value.clone().map(|v| (k.clone(), v)))
                .collect()
        })
    }

    /// Snapshot of every schema association.
    pub fn schemas(&self) -> BTreeMap<String, String> {
        self.read_state(|state| {
            state
                .entries
                .iter()
                .filter_map(|(k, e)| e.schema.clone().map(|s| (k.clone(), s)))
                .collect()
        })
    }

    /// Whether anything changed since the last call to `take_dirty`.
    fn take_dirty(&self) -> bool {
        self.dirty.swap(false, Ordering::SeqCst)
    }

    fn ensure_available(&self) -> StoreResult<()> {
        if self.available.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(StoreError::Unavailable)
        }
    }

    // ========================================================================
    // RwLock Helper Methods (handle poisoning gracefully)
    // ========================================================================

    fn read_state<R>(&self, reader: impl FnOnce(&StoreState) -> R) -> R {
        match self.state.read() {
            Ok(guard) => reader(&guard),
            Err(poisoned) => {
                warn!("RwLock poisoned reading store, recovering");
                reader(&poisoned.into_inner())
            }
        }
    }

    fn write_state<R>(&self, writer: impl FnOnce(&mut StoreState) -> R) -> R {
        match self.state.write() {
            Ok(mut guard) => writer(&mut guard),
            Err(poisoned) => {
                warn!("RwLock poisoned writing store, recovering");
                writer(&mut poisoned.into_inner())
            }
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore for MemoryStore {
    fn dir_exists(&self, dir: &str) -> StoreResult<bool> {
        self.ensure_available()?;
        check_key(dir)?;
        Ok(self.read_state(|state| state.dir_exists(dir)))
    }

    fn get(&self, key: &str) -> StoreResult<Option<ConfigValue>> {
        self.ensure_available()?;
        check_key(key)?;
        Ok(self.read_state(|state| state.entries.get(key).and_then(|e| e.value.clone())))
    }

    fn set(&self, key: &str, value: ConfigValue) -> StoreResult<()> {
        self.ensure_available()?;
        check_key(key)?;
        if key == "/" {
            return Err(StoreError::invalid_key(key, "can't store a value at the root"));
        }
        self.write_state(|state| {
            state.entry_mut(key).value = Some(value);
        });
        self.dirty.store(true, Ordering::SeqCst);
        Ok(())
    }

    fn unset(&self, key: &str) -> StoreResult<()> {
        self.ensure_available()?;
        check_key(key)?;
        let changed = self.write_state(|state| {
            let Some(entry) = state.entries.get_mut(key) else {
                return false;
            };
            let had_value = entry.value.take().is_some();
            if entry.is_empty() {
                state.entries.remove(key);
            }
            had_value
        });
        if changed {
            self.dirty.store(true, Ordering::SeqCst);
        }
        Ok(())
    }

    fn recursive_unset(&self, dir: &str, mode: UnsetMode) -> StoreResult<()> {
        self.ensure_available()?;
        check_key(dir)?;
        let removed = self.write_state(|state| {
            let below: Vec<String> = state
                .entries
                .keys()
                .filter(|key| is_below(key, dir))
                .cloned()
                .collect();
            for key in &below {
                match mode {
                    UnsetMode::IncludingSchemaNames => {
                        state.entries.remove(key);
                    }
                    UnsetMode::KeepSchemaNames => {
                        if let Some(entry) = state.entries.get_mut(key) {
                            entry.value = None;
                            if entry.is_empty() {
                                state.entries.remove(key);
                            }
                        }
                    }
                }
            }
            state.reserved.retain(|r| r != dir.trim_end_matches('/') && !is_below(r, dir));
            below.len()
        });
        debug!("Unset {} keys below {}", removed, dir);
        if removed > 0 {
            self.dirty.store(true, Ordering::SeqCst);
        }
        Ok(())
    }

    fn suggest_sync(&self) -> StoreResult<()> {
        self.ensure_available()
    }

    fn all_dirs(&self, dir: &str) -> StoreResult<Vec<String>> {
        self.ensure_available()?;
        check_key(dir)?;
        let prefix = format!("{}/", dir.trim_end_matches('/'));
        Ok(self.read_state(|state| {
            let dirs: BTreeSet<String> = state
                .entries
                .keys()
                .filter_map(|key| key.strip_prefix(&prefix))
                .filter_map(|rest| rest.split_once('/').map(|(first, _)| first.to_string()))
                .collect();
            dirs.into_iter().collect()
        }))
    }

    fn reserve_dir(&self, dir: &str) -> StoreResult<bool> {
        self.ensure_available()?;
        check_key(dir)?;
        let dir = dir.trim_end_matches('/').to_string();
        Ok(self.write_state(|state| {
            if state.dir_exists(&dir) || state.reserved.contains(&dir) {
                false
            } else {
                state.reserved.insert(dir);
                true
            }
        }))
    }
}

// ============================================================================
// File-backed store
// ============================================================================

/// Layout version written by this crate.
///
/// Documents with the same major and an equal or older minor can be read.
const FORMAT_VERSION: Version = Version::new(1, 0, 0);

fn default_format_version() -> Version {
    FORMAT_VERSION
}

/// On-disk layout of a [`FileStore`].
#[derive(Debug, Serialize, Deserialize)]
struct StoreDocument {
    #[serde(default = "default_format_version")]
    format_version: Version,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    saved_at: Option<DateTime<Utc>>,
    #[serde(default)]
    values: BTreeMap<String, ConfigValue>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    schemas: BTreeMap<String, String>,
}

impl StoreDocument {
    /// Snapshot the contents of `store`.
    fn capture(store: &MemoryStore) -> Self {
        Self {
            format_version: FORMAT_VERSION,
            saved_at: Some(Utc::now()),
            values: store.values(),
            schemas: store.schemas(),
        }
    }

    /// Parse a document, refusing layouts this crate cannot read.
    fn parse(content: &str) -> Result<Self, Error> {
        let document: Self = serde_json::from_str(content)?;
        let found = &document.format_version;
        if found.major != FORMAT_VERSION.major || found.minor > FORMAT_VERSION.minor {
            return Err(Error::SchemaMismatch {
                expected: FORMAT_VERSION.to_string(),
                found: found.to_string(),
            });
        }
        Ok(document)
    }

    /// Load the document into `store`.
    fn restore(self, store: &MemoryStore) {
        store.write_state(|state| {
            for (key, value) in self.values {
                state.entries.entry(key).or_default().value = Some(value);
            }
            for (key, schema) in self.schemas {
                state.entries.entry(key).or_default().schema = Some(schema);
            }
        });
    }
}

/// Configuration store persisted to a JSON file on [`ConfigStore::suggest_sync`].
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    inner: MemoryStore,
}

impl FileStore {
    /// Open the store at `path`, starting empty if the file does not exist.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, Error> {
        let path = path.into();
        let inner = MemoryStore::new();

        if path.exists() {
            let content = fs::read_to_string(&path).map_err(|e| {
                warn!("Failed to read store {:?}: {}", path, e);
                Error::StoreUnavailable
            })?;
            StoreDocument::parse(&content)?.restore(&inner);
            info!("Loaded {} keys from {:?}", inner.values().len(), path);
        } else {
            debug!("Store {:?} does not exist yet, starting empty", path);
        }

        Ok(Self { path, inner })
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// In-memory view of the store.
    pub fn memory(&self) -> &MemoryStore {
        &self.inner
    }

    /// Write the document to disk, replacing the previous file atomically.
    pub fn flush(&self) -> Result<(), Error> {
        let document = StoreDocument::capture(&self.inner);

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
            #[cfg(unix)]
            {
                use std::os::unix::fs::PermissionsExt;
                let _ = fs::set_permissions(parent, fs::Permissions::from_mode(0o700));
            }
        }

        let tmp = self.path.with_extension("json.tmp");
        {
            let file = fs::File::create(&tmp)?;
            #[cfg(unix)]
            {
                use std::os::unix::fs::PermissionsExt;
                let _ = fs::set_permissions(&tmp, fs::Permissions::from_mode(0o600));
            }
            let mut writer = BufWriter::new(file);
            serde_json::to_writer_pretty(&mut writer, &document)?;
            writer.flush()?;
        }
        fs::rename(&tmp, &self.path)?;

        info!("Saved {} keys to {:?}", document.values.len(), self.path);
        Ok(())
    }
}

impl ConfigStore for FileStore {
    fn dir_exists(&self, dir: &str) -> StoreResult<bool> {
        self.inner.dir_exists(dir)
    }

    fn get(&self, key: &str) -> StoreResult<Option<ConfigValue>> {
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: ConfigValue) -> StoreResult<()> {
        self.inner.set(key, value)
    }

    fn unset(&self, key: &str) -> StoreResult<()> {
        self.inner.unset(key)
    }

    fn recursive_unset(&self, dir: &str, mode: UnsetMode) -> StoreResult<()> {
        self.inner.recursive_unset(dir, mode)
    }

    fn suggest_sync(&self) -> StoreResult<()> {
        self.inner.suggest_sync()?;
        if !self.inner.take_dirty() {
            return Ok(());
        }
        self.flush().map_err(|e| {
            // Keep the changes pending for the next sync.
            self.inner.dirty.store(true, Ordering::SeqCst);
            StoreError::Backend(e.to_string())
        })
    }

    fn all_dirs(&self, dir: &str) -> StoreResult<Vec<String>> {
        self.inner.all_dirs(dir)
    }

    fn reserve_dir(&self, dir: &str) -> StoreResult<bool> {
        self.inner.reserve_dir(dir)
    }
}
