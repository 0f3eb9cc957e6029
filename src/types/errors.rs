use std::fmt;

// === BookmarkError ===

/// Validation and lookup failures for bookmark and category operations.
///
/// Every variant leaves the document unchanged; callers surface these to the
/// user and abort the operation.
#[derive(Debug)]
pub enum BookmarkError {
    /// A category with this name already exists in the bar (case-sensitive).
    DuplicateCategory(String),
    /// The named category does not exist in the bar.
    CategoryNotFound(String),
    /// No bookmark matching the given identity was found.
    NotFound(String),
    /// The category is built-in and cannot be deleted from the default bar.
    ProtectedCategory(String),
    /// A bookmark with this path already exists in the destination category.
    DuplicatePath(String),
    /// Bookmark paths must be non-empty.
    EmptyPath,
    /// The provided item index is out of bounds.
    InvalidIndex(usize),
}

impl fmt::Display for BookmarkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BookmarkError::DuplicateCategory(name) => {
                write!(f, "Category already exists: {}", name)
            }
            BookmarkError::CategoryNotFound(name) => {
                write!(f, "Category not found: {}", name)
            }
            BookmarkError::NotFound(desc) => write!(f, "Bookmark not found: {}", desc),
            BookmarkError::ProtectedCategory(name) => {
                write!(f, "Built-in category cannot be deleted: {}", name)
            }
            BookmarkError::DuplicatePath(path) => {
                write!(f, "Duplicate bookmark path: {}", path)
            }
            BookmarkError::EmptyPath => write!(f, "Bookmark path cannot be empty"),
            BookmarkError::InvalidIndex(index) => write!(f, "Invalid item index: {}", index),
        }
    }
}

impl std::error::Error for BookmarkError {}

// === StoreError ===

/// I/O, serialization and migration failures of the document store.
#[derive(Debug)]
pub enum StoreError {
    /// Reading or writing the document file failed.
    Io(String),
    /// Serializing or parsing the document failed.
    Serialization(String),
    /// Legacy-format migration failed.
    Migration(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Io(msg) => write!(f, "Bookmark store I/O error: {}", msg),
            StoreError::Serialization(msg) => {
                write!(f, "Bookmark store serialization error: {}", msg)
            }
            StoreError::Migration(msg) => write!(f, "Bookmark migration error: {}", msg),
        }
    }
}

impl std::error::Error for StoreError {}
