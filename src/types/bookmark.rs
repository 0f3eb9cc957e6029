use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Current on-disk document schema version.
pub const DOCUMENT_VERSION: u32 = 2;

/// Bar id of the horizontal top bar (the default bookmark bar).
pub const TOP_BAR_ID: &str = "top_bar";

/// Bar id of the vertical quick-links sidebar.
pub const SIDEBAR_ID: &str = "sidebar";

/// Categories seeded on the default bar. Protected from deletion there,
/// but not from rename.
pub const BUILTIN_CATEGORIES: [&str; 2] = ["General", "Favorites"];

/// What a bookmark points at. Determines activation behavior in the UI
/// (navigate vs. shell-open) and button coloring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookmarkType {
    Folder,
    File,
    Url,
    Sharepoint,
    Path,
}

impl Default for BookmarkType {
    fn default() -> Self {
        BookmarkType::Path
    }
}

/// A single shortcut: a named path with a type tag.
///
/// `id` is a synthetic identifier generated at creation; documents written
/// before ids existed get a fresh one on load. Identity matching prefers
/// `id` and falls back to `name` + `path` so payloads from older documents
/// still resolve (see [`BookmarkIdentity`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bookmark {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub name: String,
    pub path: String,
    #[serde(rename = "type", default)]
    pub kind: BookmarkType,
    /// Back-pointer to the owning category, carried only by bookmarks stored
    /// inside a category list. Must be swept on category rename.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default)]
    pub open_in_app: bool,
}

impl Bookmark {
    /// Creates a bookmark with a fresh id and no category back-pointer.
    pub fn new(name: &str, path: &str, kind: BookmarkType) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.to_string(),
            path: path.to_string(),
            kind,
            category: None,
            open_in_app: false,
        }
    }

    /// Returns the identity key used for matching and removal.
    pub fn identity(&self) -> BookmarkIdentity {
        BookmarkIdentity {
            id: Some(self.id),
            name: self.name.clone(),
            path: self.path.clone(),
        }
    }

    /// Whether this bookmark matches the given identity: id equality when
    /// both sides carry one, otherwise `name` + `path` equality.
    pub fn matches(&self, identity: &BookmarkIdentity) -> bool {
        if identity.id == Some(self.id) {
            return true;
        }
        self.name == identity.name && self.path == identity.path
    }
}

/// Identity key for find-and-remove operations.
///
/// Carried in drag payloads instead of a live reference; the id is optional
/// because payloads may originate from documents that predate synthetic ids.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookmarkIdentity {
    pub id: Option<Uuid>,
    pub name: String,
    pub path: String,
}

/// One entry in a bar's ordered top-level list: either an inline bookmark
/// or a by-name reference into the bar's `categories` map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum BarItem {
    Bookmark { data: Bookmark },
    Category { name: String },
}

impl BarItem {
    pub fn category_name(&self) -> Option<&str> {
        match self {
            BarItem::Category { name } => Some(name),
            BarItem::Bookmark { .. } => None,
        }
    }

    pub fn bookmark(&self) -> Option<&Bookmark> {
        match self {
            BarItem::Bookmark { data } => Some(data),
            BarItem::Category { .. } => None,
        }
    }

    pub fn is_category_named(&self, name: &str) -> bool {
        self.category_name() == Some(name)
    }
}

/// Per-bar slice of the document.
///
/// Invariant: the set of names referenced by `Category` items in `items`
/// equals the key set of `categories`, and each name appears exactly once
/// in `items`. Every mutating operation maintains both sides.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BarData {
    #[serde(default)]
    pub items: Vec<BarItem>,
    #[serde(default)]
    pub categories: BTreeMap<String, Vec<Bookmark>>,
    #[serde(default)]
    pub category_colors: BTreeMap<String, String>,
}

impl BarData {
    /// Index of the `Category` item referencing `name`, if present.
    pub fn category_item_index(&self, name: &str) -> Option<usize> {
        self.items.iter().position(|item| item.is_category_named(name))
    }

    /// Bookmarks in this bar: top-level inline ones plus category contents.
    pub fn bookmark_count(&self) -> usize {
        let inline = self.items.iter().filter(|i| i.bookmark().is_some()).count();
        let nested: usize = self.categories.values().map(Vec::len).sum();
        inline + nested
    }
}

/// The root persisted entity: every bar keyed by id, plus the schema version.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookmarkDocument {
    #[serde(default)]
    pub bars: BTreeMap<String, BarData>,
    pub version: u32,
}

impl Default for BookmarkDocument {
    fn default() -> Self {
        Self::empty()
    }
}

impl BookmarkDocument {
    /// A v2 document with no bars.
    pub fn empty() -> Self {
        Self {
            bars: BTreeMap::new(),
            version: DOCUMENT_VERSION,
        }
    }

    /// The document a fresh install starts from: a top bar seeded with the
    /// built-in categories and an empty sidebar.
    pub fn seed() -> Self {
        let mut top_bar = BarData::default();
        for name in BUILTIN_CATEGORIES {
            top_bar.categories.insert(name.to_string(), Vec::new());
            top_bar.items.push(BarItem::Category {
                name: name.to_string(),
            });
        }

        let mut bars = BTreeMap::new();
        bars.insert(TOP_BAR_ID.to_string(), top_bar);
        bars.insert(SIDEBAR_ID.to_string(), BarData::default());
        Self {
            bars,
            version: DOCUMENT_VERSION,
        }
    }

    pub fn bar(&self, bar_id: &str) -> Option<&BarData> {
        self.bars.get(bar_id)
    }

    /// Live mutable handle to a bar's slice, created empty if unseen.
    pub fn bar_mut(&mut self, bar_id: &str) -> &mut BarData {
        self.bars.entry(bar_id.to_string()).or_default()
    }

    /// Total bookmark count across every bar and category. Cross-container
    /// moves must leave this unchanged.
    pub fn total_bookmark_count(&self) -> usize {
        self.bars.values().map(BarData::bookmark_count).sum()
    }
}
