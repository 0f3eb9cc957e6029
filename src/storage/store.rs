// SuiteView bookmark store
// Sole read/write gateway to the persisted bookmark document: loading with
// legacy migration, atomic whole-document saves, and save notification for
// every open bar view.

use std::collections::BTreeMap;
use std::fs;

use crate::storage::migrations;
use crate::storage::paths::StorePaths;
use crate::types::bookmark::{BarData, BookmarkDocument};
use crate::types::errors::StoreError;

pub type SaveCallback = Box<dyn Fn()>;

/// Trait defining the document-store interface the bar views program against.
pub trait BookmarkStoreTrait {
    /// Live mutable handle to one bar's slice, lazily created. Callers
    /// mutate it directly and call `save()` afterward. Never fails.
    fn bar_data(&mut self, bar_id: &str) -> &mut BarData;
    /// Persists the whole document atomically, then notifies every
    /// registered callback (broadcast, not scoped to the bar that changed).
    fn save(&mut self) -> Result<(), StoreError>;
    /// Registers a save callback under a caller-supplied key. Re-registering
    /// the same `(bar_id, key)` replaces the closure, so registration is
    /// idempotent. No ordering guarantee across callbacks.
    fn register_save_callback(&mut self, bar_id: &str, key: &str, callback: SaveCallback);
    fn unregister_save_callback(&mut self, bar_id: &str, key: &str);
}

/// Document store backed by a single JSON file under the profile directory.
pub struct BookmarkStore {
    paths: StorePaths,
    document: BookmarkDocument,
    callbacks: BTreeMap<String, Vec<(String, SaveCallback)>>,
}

impl BookmarkStore {
    /// Opens the store at the given locations.
    ///
    /// A missing document yields the seed document (top bar with the
    /// built-in categories, empty sidebar); a legacy-format document is
    /// migrated; a corrupt document or failed migration falls back to an
    /// empty document, losing whatever could not be parsed.
    pub fn open(paths: StorePaths) -> Self {
        let document = match Self::load_or_migrate(&paths) {
            Ok(document) => document,
            Err(e) => {
                log::error!("Failed to load bookmark data, starting empty: {}", e);
                BookmarkDocument::empty()
            }
        };
        Self {
            paths,
            document,
            callbacks: BTreeMap::new(),
        }
    }

    /// Opens the store at the standard profile-directory locations.
    pub fn open_default() -> Self {
        Self::open(StorePaths::default_locations())
    }

    pub fn paths(&self) -> &StorePaths {
        &self.paths
    }

    pub fn document(&self) -> &BookmarkDocument {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut BookmarkDocument {
        &mut self.document
    }

    fn load_or_migrate(paths: &StorePaths) -> Result<BookmarkDocument, StoreError> {
        let unified_exists = paths.data_file.exists();
        if !unified_exists && !paths.legacy_sidebar_file.exists() {
            log::info!("No existing bookmark data found, initializing defaults");
            return Ok(BookmarkDocument::seed());
        }

        if unified_exists {
            let contents = fs::read_to_string(&paths.data_file)
                .map_err(|e| StoreError::Io(format!("Failed to read document: {}", e)))?;
            if !migrations::is_legacy(&contents) {
                let document: BookmarkDocument = serde_json::from_str(&contents)
                    .map_err(|e| StoreError::Serialization(format!("Failed to parse document: {}", e)))?;
                log::debug!("Loaded bookmark data from {:?}", paths.data_file);
                return Ok(document);
            }
        }

        let document = migrations::run(paths)?;
        // Persist the merged result immediately so the legacy inputs are
        // never consulted again.
        Self::write_document(paths, &document)?;
        Ok(document)
    }

    fn write_document(paths: &StorePaths, document: &BookmarkDocument) -> Result<(), StoreError> {
        if let Some(parent) = paths.data_file.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| StoreError::Io(format!("Failed to create profile dir: {}", e)))?;
        }

        let json = serde_json::to_string_pretty(document)
            .map_err(|e| StoreError::Serialization(format!("Failed to serialize document: {}", e)))?;

        // Temp file then rename, so a crash mid-write never corrupts the
        // real document.
        let temp_file = paths.data_file.with_extension("json.tmp");
        fs::write(&temp_file, json)
            .map_err(|e| StoreError::Io(format!("Failed to write temp file: {}", e)))?;
        fs::rename(&temp_file, &paths.data_file)
            .map_err(|e| StoreError::Io(format!("Failed to replace document: {}", e)))?;
        Ok(())
    }

    fn notify_all(&self) {
        for (bar_id, callbacks) in &self.callbacks {
            for (key, callback) in callbacks {
                log::trace!("Notifying save callback {}/{}", bar_id, key);
                callback();
            }
        }
    }
}

impl BookmarkStoreTrait for BookmarkStore {
    fn bar_data(&mut self, bar_id: &str) -> &mut BarData {
        self.document.bar_mut(bar_id)
    }

    fn save(&mut self) -> Result<(), StoreError> {
        if let Err(e) = Self::write_document(&self.paths, &self.document) {
            log::error!("Failed to save bookmark data: {}", e);
            return Err(e);
        }
        log::debug!("Saved bookmark data to {:?}", self.paths.data_file);
        self.notify_all();
        Ok(())
    }

    fn register_save_callback(&mut self, bar_id: &str, key: &str, callback: SaveCallback) {
        let callbacks = self.callbacks.entry(bar_id.to_string()).or_default();
        if let Some(slot) = callbacks.iter_mut().find(|(k, _)| k == key) {
            slot.1 = callback;
        } else {
            callbacks.push((key.to_string(), callback));
        }
    }

    fn unregister_save_callback(&mut self, bar_id: &str, key: &str) {
        if let Some(callbacks) = self.callbacks.get_mut(bar_id) {
            callbacks.retain(|(k, _)| k != key);
        }
    }
}
