//! One-time migration from the legacy two-file storage format.
//!
//! Before the unified document existed, the top bar persisted itself to
//! `bookmarks.json` (key `bar_items`) and the quick-links sidebar to a
//! separate `quick_links.json` (key `items`). Migration normalizes both
//! into the `{bars, version: 2}` shape, backs the originals up, and deletes
//! the now-redundant sidebar file.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::types::bookmark::{
    BarData, BarItem, Bookmark, BookmarkDocument, SIDEBAR_ID, TOP_BAR_ID,
};
use crate::types::errors::StoreError;

/// Legacy `bookmarks.json`: the top bar's slice at the file's top level.
#[derive(Debug, Default, Deserialize)]
struct LegacyTopBarFile {
    #[serde(default)]
    bar_items: Vec<BarItem>,
    #[serde(default)]
    categories: BTreeMap<String, Vec<Bookmark>>,
    #[serde(default)]
    category_colors: BTreeMap<String, String>,
}

/// Legacy `quick_links.json`: the sidebar's slice at the file's top level.
#[derive(Debug, Default, Deserialize)]
struct LegacySidebarFile {
    #[serde(default)]
    items: Vec<BarItem>,
    #[serde(default)]
    categories: BTreeMap<String, Vec<Bookmark>>,
    #[serde(default)]
    category_colors: BTreeMap<String, String>,
}

/// Whether the given unified-file contents still need migration:
/// no `version` field, or `version < 2`.
pub fn is_legacy(contents: &str) -> bool {
    match serde_json::from_str::<serde_json::Value>(contents) {
        Ok(value) => value
            .get("version")
            .and_then(serde_json::Value::as_u64)
            .map_or(true, |v| v < 2),
        // Unparseable input is not "legacy"; the caller handles corruption.
        Err(_) => false,
    }
}

/// Runs the legacy migration and returns the merged v2 document.
///
/// Reads whichever of the two legacy files exist, writes backups of the
/// originals into `backup_dir`, and deletes the legacy sidebar file. The
/// caller persists the returned document.
pub fn run(paths: &crate::storage::paths::StorePaths) -> Result<BookmarkDocument, StoreError> {
    let mut document = BookmarkDocument::empty();

    if paths.data_file.exists() {
        let contents = read(&paths.data_file)?;
        let legacy: LegacyTopBarFile = parse(&contents, &paths.data_file)?;
        back_up(&paths.data_file, &paths.backup_dir)?;
        document.bars.insert(
            TOP_BAR_ID.to_string(),
            normalize_bar(legacy.bar_items, legacy.categories, legacy.category_colors),
        );
        log::info!("Migrated legacy top bar from {:?}", paths.data_file);
    }

    if paths.legacy_sidebar_file.exists() {
        let contents = read(&paths.legacy_sidebar_file)?;
        let legacy: LegacySidebarFile = parse(&contents, &paths.legacy_sidebar_file)?;
        back_up(&paths.legacy_sidebar_file, &paths.backup_dir)?;
        document.bars.insert(
            SIDEBAR_ID.to_string(),
            normalize_bar(legacy.items, legacy.categories, legacy.category_colors),
        );
        // The sidebar file is the only legacy input that gets deleted; its
        // contents now live in the unified document.
        fs::remove_file(&paths.legacy_sidebar_file)
            .map_err(|e| StoreError::Migration(format!("Failed to delete legacy sidebar file: {}", e)))?;
        log::info!("Migrated legacy sidebar from {:?}", paths.legacy_sidebar_file);
    }

    Ok(document)
}

/// Repairs the items/categories consistency invariant on a migrated bar:
/// category references with no backing list are dropped, unreferenced
/// categories get a reference appended, and every contained bookmark's
/// denormalized `category` field is set to its owner.
fn normalize_bar(
    items: Vec<BarItem>,
    mut categories: BTreeMap<String, Vec<Bookmark>>,
    category_colors: BTreeMap<String, String>,
) -> BarData {
    let mut normalized: Vec<BarItem> = Vec::with_capacity(items.len());
    for item in items {
        match &item {
            BarItem::Category { name } => {
                let kept = categories.contains_key(name)
                    && !normalized.iter().any(|i| i.is_category_named(name));
                if kept {
                    normalized.push(item);
                } else {
                    log::warn!("Dropping dangling or duplicate category reference: {}", name);
                }
            }
            BarItem::Bookmark { .. } => normalized.push(item),
        }
    }

    for name in categories.keys() {
        if !normalized.iter().any(|i| i.is_category_named(name)) {
            normalized.push(BarItem::Category { name: name.clone() });
        }
    }

    for (name, bookmarks) in categories.iter_mut() {
        for bookmark in bookmarks.iter_mut() {
            bookmark.category = Some(name.clone());
        }
    }

    BarData {
        items: normalized,
        categories,
        category_colors,
    }
}

fn read(path: &Path) -> Result<String, StoreError> {
    fs::read_to_string(path)
        .map_err(|e| StoreError::Migration(format!("Failed to read {:?}: {}", path, e)))
}

fn parse<'de, T: Deserialize<'de>>(contents: &'de str, path: &Path) -> Result<T, StoreError> {
    serde_json::from_str(contents)
        .map_err(|e| StoreError::Migration(format!("Failed to parse {:?}: {}", path, e)))
}

fn back_up(file: &Path, backup_dir: &Path) -> Result<(), StoreError> {
    fs::create_dir_all(backup_dir)
        .map_err(|e| StoreError::Migration(format!("Failed to create backup dir: {}", e)))?;
    let file_name = file
        .file_name()
        .ok_or_else(|| StoreError::Migration(format!("Bad legacy file path: {:?}", file)))?;
    fs::copy(file, backup_dir.join(file_name))
        .map_err(|e| StoreError::Migration(format!("Failed to back up {:?}: {}", file, e)))?;
    Ok(())
}
