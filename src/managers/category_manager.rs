//! Category lifecycle: create, rename (with back-pointer sweep), delete
//! (with bookmark cascade), and color tokens.
//!
//! Every operation keeps the bar's `items` list and `categories` map
//! mutually consistent in the same call, and leaves the document untouched
//! on any validation failure.

use crate::types::bookmark::{BarItem, Bookmark, BookmarkDocument, BUILTIN_CATEGORIES, TOP_BAR_ID};
use crate::types::errors::BookmarkError;

/// Trait defining category lifecycle operations.
pub trait CategoryManagerTrait {
    /// Creates an empty category, appending its reference to the bar's
    /// items list (the "new category" menu path).
    fn create_category(&mut self, bar_id: &str, name: &str) -> Result<(), BookmarkError>;
    /// Creates an empty category with its reference inserted at `index`
    /// (the drag-originated path, which respects the drop position).
    fn create_category_at(
        &mut self,
        bar_id: &str,
        name: &str,
        index: usize,
    ) -> Result<(), BookmarkError>;
    fn rename_category(
        &mut self,
        bar_id: &str,
        old_name: &str,
        new_name: &str,
    ) -> Result<(), BookmarkError>;
    /// Deletes a category and every bookmark inside it, returning the
    /// removed bookmarks so the caller can enumerate them in its
    /// confirmation prompt.
    fn delete_category(&mut self, bar_id: &str, name: &str) -> Result<Vec<Bookmark>, BookmarkError>;
    /// Sets or clears the category's color token.
    fn set_category_color(
        &mut self,
        bar_id: &str,
        name: &str,
        color: Option<&str>,
    ) -> Result<(), BookmarkError>;
    fn category_bookmarks(&self, bar_id: &str, name: &str) -> Result<&[Bookmark], BookmarkError>;
}

/// Category manager borrowing the live document.
pub struct CategoryManager<'a> {
    doc: &'a mut BookmarkDocument,
}

impl<'a> CategoryManager<'a> {
    pub fn new(doc: &'a mut BookmarkDocument) -> Self {
        Self { doc }
    }

    /// Built-in categories are protected from deletion on the default bar
    /// only; they can still be renamed anywhere.
    fn is_protected(bar_id: &str, name: &str) -> bool {
        bar_id == TOP_BAR_ID && BUILTIN_CATEGORIES.contains(&name)
    }

    fn create_at(
        &mut self,
        bar_id: &str,
        name: &str,
        index: Option<usize>,
    ) -> Result<(), BookmarkError> {
        let bar = self.doc.bar_mut(bar_id);
        if bar.categories.contains_key(name) {
            return Err(BookmarkError::DuplicateCategory(name.to_string()));
        }
        let at = match index {
            Some(i) if i > bar.items.len() => return Err(BookmarkError::InvalidIndex(i)),
            Some(i) => i,
            None => bar.items.len(),
        };
        bar.categories.insert(name.to_string(), Vec::new());
        bar.items.insert(
            at,
            BarItem::Category {
                name: name.to_string(),
            },
        );
        Ok(())
    }
}

impl CategoryManagerTrait for CategoryManager<'_> {
    fn create_category(&mut self, bar_id: &str, name: &str) -> Result<(), BookmarkError> {
        self.create_at(bar_id, name, None)
    }

    fn create_category_at(
        &mut self,
        bar_id: &str,
        name: &str,
        index: usize,
    ) -> Result<(), BookmarkError> {
        self.create_at(bar_id, name, Some(index))
    }

    /// Renames a category: the map key, the color token, the matching
    /// items entry, and every contained bookmark's denormalized `category`
    /// field move together.
    fn rename_category(
        &mut self,
        bar_id: &str,
        old_name: &str,
        new_name: &str,
    ) -> Result<(), BookmarkError> {
        let bar = self
            .doc
            .bars
            .get_mut(bar_id)
            .ok_or_else(|| BookmarkError::CategoryNotFound(old_name.to_string()))?;
        if !bar.categories.contains_key(old_name) {
            return Err(BookmarkError::CategoryNotFound(old_name.to_string()));
        }
        if bar.categories.contains_key(new_name) {
            return Err(BookmarkError::DuplicateCategory(new_name.to_string()));
        }

        let mut bookmarks = bar.categories.remove(old_name).unwrap_or_default();
        for bookmark in bookmarks.iter_mut() {
            if bookmark.category.as_deref() == Some(old_name) {
                bookmark.category = Some(new_name.to_string());
            }
        }
        bar.categories.insert(new_name.to_string(), bookmarks);

        if let Some(color) = bar.category_colors.remove(old_name) {
            bar.category_colors.insert(new_name.to_string(), color);
        }

        for item in bar.items.iter_mut() {
            if item.is_category_named(old_name) {
                *item = BarItem::Category {
                    name: new_name.to_string(),
                };
            }
        }
        Ok(())
    }

    fn delete_category(&mut self, bar_id: &str, name: &str) -> Result<Vec<Bookmark>, BookmarkError> {
        let bar = self
            .doc
            .bars
            .get_mut(bar_id)
            .ok_or_else(|| BookmarkError::CategoryNotFound(name.to_string()))?;
        if !bar.categories.contains_key(name) {
            return Err(BookmarkError::CategoryNotFound(name.to_string()));
        }
        if Self::is_protected(bar_id, name) {
            return Err(BookmarkError::ProtectedCategory(name.to_string()));
        }

        let removed = bar.categories.remove(name).unwrap_or_default();
        bar.category_colors.remove(name);
        bar.items.retain(|item| !item.is_category_named(name));
        log::debug!(
            "Deleted category '{}' from bar '{}' with {} bookmark(s)",
            name,
            bar_id,
            removed.len()
        );
        Ok(removed)
    }

    fn set_category_color(
        &mut self,
        bar_id: &str,
        name: &str,
        color: Option<&str>,
    ) -> Result<(), BookmarkError> {
        let bar = self
            .doc
            .bars
            .get_mut(bar_id)
            .ok_or_else(|| BookmarkError::CategoryNotFound(name.to_string()))?;
        if !bar.categories.contains_key(name) {
            return Err(BookmarkError::CategoryNotFound(name.to_string()));
        }
        match color {
            Some(token) => {
                bar.category_colors.insert(name.to_string(), token.to_string());
            }
            None => {
                bar.category_colors.remove(name);
            }
        }
        Ok(())
    }

    fn category_bookmarks(&self, bar_id: &str, name: &str) -> Result<&[Bookmark], BookmarkError> {
        self.doc
            .bar(bar_id)
            .and_then(|bar| bar.categories.get(name))
            .map(Vec::as_slice)
            .ok_or_else(|| BookmarkError::CategoryNotFound(name.to_string()))
    }
}
