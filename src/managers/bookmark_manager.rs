//! Bookmark CRUD within the document, plus the shared
//! find-and-remove-by-identity helper every move and delete path uses.

use crate::types::bookmark::{BarData, BarItem, Bookmark, BookmarkDocument, BookmarkIdentity};
use crate::types::errors::BookmarkError;

/// Where a bookmark sits (or should land) within one bar.
#[derive(Debug, Clone, PartialEq)]
pub enum BookmarkSlot {
    /// The bar's top-level items list; `None` appends.
    BarTop(Option<usize>),
    /// A named category's list; `None` appends.
    Category(String, Option<usize>),
}

/// A candidate container for identity-based removal. Callers list these in
/// the priority order they want tried; removal stops at the first match.
#[derive(Debug, Clone, PartialEq)]
pub enum SourceCandidate {
    BarTop { bar_id: String },
    Category { bar_id: String, name: String },
}

/// Which container a find-and-remove matched, and at what index.
#[derive(Debug, Clone, PartialEq)]
pub enum RemovalSite {
    BarTop { bar_id: String, index: usize },
    Category { bar_id: String, name: String, index: usize },
}

/// Tries each candidate container in order and removes the first bookmark
/// matching `identity`. At most one removal occurs.
pub fn find_and_remove(
    doc: &mut BookmarkDocument,
    candidates: &[SourceCandidate],
    identity: &BookmarkIdentity,
) -> Option<(RemovalSite, Bookmark)> {
    for candidate in candidates {
        match candidate {
            SourceCandidate::BarTop { bar_id } => {
                let Some(bar) = doc.bars.get_mut(bar_id) else {
                    continue;
                };
                if let Some((index, bookmark)) = remove_from_bar_top(bar, identity) {
                    return Some((
                        RemovalSite::BarTop {
                            bar_id: bar_id.clone(),
                            index,
                        },
                        bookmark,
                    ));
                }
            }
            SourceCandidate::Category { bar_id, name } => {
                let Some(bar) = doc.bars.get_mut(bar_id) else {
                    continue;
                };
                if let Some((index, bookmark)) = remove_from_category(bar, name, identity) {
                    return Some((
                        RemovalSite::Category {
                            bar_id: bar_id.clone(),
                            name: name.clone(),
                            index,
                        },
                        bookmark,
                    ));
                }
            }
        }
    }
    None
}

fn remove_from_bar_top(bar: &mut BarData, identity: &BookmarkIdentity) -> Option<(usize, Bookmark)> {
    let index = bar
        .items
        .iter()
        .position(|item| item.bookmark().is_some_and(|b| b.matches(identity)))?;
    match bar.items.remove(index) {
        BarItem::Bookmark { data } => Some((index, data)),
        BarItem::Category { .. } => unreachable!("position matched a bookmark item"),
    }
}

fn remove_from_category(
    bar: &mut BarData,
    name: &str,
    identity: &BookmarkIdentity,
) -> Option<(usize, Bookmark)> {
    let bookmarks = bar.categories.get_mut(name)?;
    let index = bookmarks.iter().position(|b| b.matches(identity))?;
    Some((index, bookmarks.remove(index)))
}

/// Trait defining bookmark CRUD operations within one document.
pub trait BookmarkManagerTrait {
    fn add_bookmark(
        &mut self,
        bar_id: &str,
        slot: &BookmarkSlot,
        bookmark: Bookmark,
    ) -> Result<(), BookmarkError>;
    fn update_bookmark(
        &mut self,
        bar_id: &str,
        identity: &BookmarkIdentity,
        name: &str,
        path: &str,
    ) -> Result<(), BookmarkError>;
    fn remove_bookmark(
        &mut self,
        bar_id: &str,
        identity: &BookmarkIdentity,
    ) -> Result<Bookmark, BookmarkError>;
    fn find_bookmark(&self, bar_id: &str, identity: &BookmarkIdentity) -> Option<&Bookmark>;
}

/// Bookmark manager borrowing the live document.
pub struct BookmarkManager<'a> {
    doc: &'a mut BookmarkDocument,
}

impl<'a> BookmarkManager<'a> {
    pub fn new(doc: &'a mut BookmarkDocument) -> Self {
        Self { doc }
    }

    /// Every container of `bar_id` in removal priority order: top level
    /// first, then each category.
    fn bar_candidates(bar: &BarData, bar_id: &str) -> Vec<SourceCandidate> {
        let mut candidates = vec![SourceCandidate::BarTop {
            bar_id: bar_id.to_string(),
        }];
        for name in bar.categories.keys() {
            candidates.push(SourceCandidate::Category {
                bar_id: bar_id.to_string(),
                name: name.clone(),
            });
        }
        candidates
    }
}

impl BookmarkManagerTrait for BookmarkManager<'_> {
    /// Adds a bookmark to the bar's top level or a named category.
    ///
    /// An empty path is a validation failure; so is a duplicate path within
    /// the destination category. The denormalized `category` field is set
    /// to match the destination.
    fn add_bookmark(
        &mut self,
        bar_id: &str,
        slot: &BookmarkSlot,
        mut bookmark: Bookmark,
    ) -> Result<(), BookmarkError> {
        if bookmark.path.trim().is_empty() {
            return Err(BookmarkError::EmptyPath);
        }

        let bar = self.doc.bar_mut(bar_id);
        match slot {
            BookmarkSlot::BarTop(index) => {
                bookmark.category = None;
                let at = match index {
                    Some(i) if *i > bar.items.len() => return Err(BookmarkError::InvalidIndex(*i)),
                    Some(i) => *i,
                    None => bar.items.len(),
                };
                bar.items.insert(at, BarItem::Bookmark { data: bookmark });
            }
            BookmarkSlot::Category(name, index) => {
                let bookmarks = bar
                    .categories
                    .get_mut(name)
                    .ok_or_else(|| BookmarkError::CategoryNotFound(name.clone()))?;
                if bookmarks.iter().any(|b| b.path == bookmark.path) {
                    return Err(BookmarkError::DuplicatePath(bookmark.path));
                }
                bookmark.category = Some(name.clone());
                let at = match index {
                    Some(i) if *i > bookmarks.len() => return Err(BookmarkError::InvalidIndex(*i)),
                    Some(i) => *i,
                    None => bookmarks.len(),
                };
                bookmarks.insert(at, bookmark);
            }
        }
        Ok(())
    }

    /// Edits a bookmark's name and path in place, wherever it lives in the
    /// bar. The synthetic id is untouched, so identity survives the rename.
    fn update_bookmark(
        &mut self,
        bar_id: &str,
        identity: &BookmarkIdentity,
        name: &str,
        path: &str,
    ) -> Result<(), BookmarkError> {
        if path.trim().is_empty() {
            return Err(BookmarkError::EmptyPath);
        }

        let bar = self
            .doc
            .bars
            .get_mut(bar_id)
            .ok_or_else(|| BookmarkError::NotFound(identity.name.clone()))?;

        for item in bar.items.iter_mut() {
            if let BarItem::Bookmark { data } = item {
                if data.matches(identity) {
                    data.name = name.to_string();
                    data.path = path.to_string();
                    return Ok(());
                }
            }
        }
        for bookmarks in bar.categories.values_mut() {
            for bookmark in bookmarks.iter_mut() {
                if bookmark.matches(identity) {
                    bookmark.name = name.to_string();
                    bookmark.path = path.to_string();
                    return Ok(());
                }
            }
        }
        Err(BookmarkError::NotFound(identity.name.clone()))
    }

    /// Removes the first bookmark matching `identity` from the bar's top
    /// level or any of its categories, returning the removed value.
    fn remove_bookmark(
        &mut self,
        bar_id: &str,
        identity: &BookmarkIdentity,
    ) -> Result<Bookmark, BookmarkError> {
        let bar = self
            .doc
            .bars
            .get(bar_id)
            .ok_or_else(|| BookmarkError::NotFound(identity.name.clone()))?;
        let candidates = Self::bar_candidates(bar, bar_id);
        find_and_remove(self.doc, &candidates, identity)
            .map(|(_, bookmark)| bookmark)
            .ok_or_else(|| BookmarkError::NotFound(identity.name.clone()))
    }

    fn find_bookmark(&self, bar_id: &str, identity: &BookmarkIdentity) -> Option<&Bookmark> {
        let bar = self.doc.bar(bar_id)?;
        bar.items
            .iter()
            .filter_map(BarItem::bookmark)
            .find(|b| b.matches(identity))
            .or_else(|| {
                bar.categories
                    .values()
                    .flat_map(|bookmarks| bookmarks.iter())
                    .find(|b| b.matches(identity))
            })
    }
}
