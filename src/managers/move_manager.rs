//! Drop resolution: same-container reorders, cross-container bookmark
//! moves, and whole-category moves between bars.
//!
//! The GUI layer turns a drop event into a [`DragPayload`] plus a
//! destination; everything after that point is data-model work and lives
//! here. Cross-container moves are remove-then-insert by identity, never
//! by index, so a concurrent UI refresh cannot strand a bookmark.

use serde::{Deserialize, Serialize};

use crate::managers::bookmark_manager::{find_and_remove, SourceCandidate};
use crate::types::bookmark::{BarItem, Bookmark, BookmarkDocument};
use crate::types::errors::BookmarkError;

/// Computes the insertion index for a drop at `drop_pos` given the centers
/// of the already-rendered buttons along the bar's axis: the first button
/// whose center the drop position is before, or append when the drop is
/// past every button.
pub fn resolve_insertion_index(centers: &[i32], drop_pos: i32) -> usize {
    centers
        .iter()
        .position(|&center| drop_pos < center)
        .unwrap_or(centers.len())
}

/// A drag payload, classified by the metadata it carries. Mirrors the MIME
/// types the widgets exchange, minus the transport.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DragPayload {
    /// Reorder within the same container: the dragged item's current index.
    BarItemIndex { index: usize },
    /// A bookmark crossing containers, with where it came from.
    BookmarkMove {
        bookmark: Bookmark,
        source: BookmarkSource,
    },
    /// A whole category crossing bars.
    CategoryMove { name: String, source_bar: String },
}

/// Where a dragged bookmark originated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum BookmarkSource {
    /// A bar's top-level items list.
    BarTop { bar_id: String },
    /// A named category on a bar.
    Category { bar_id: String, name: String },
    /// Outside the bookmark system entirely (an OS file drop); there is
    /// nothing to remove.
    External,
}

/// Where a dragged bookmark should land.
#[derive(Debug, Clone, PartialEq)]
pub enum MoveDestination {
    BarTop { bar_id: String, index: Option<usize> },
    Category {
        bar_id: String,
        name: String,
        index: Option<usize>,
    },
}

/// How a bookmark move resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Inserted at the destination and removed from exactly one source.
    Moved,
    /// External payload: inserted, nothing to remove.
    Added,
    /// No source match was found; the destination insert stands, so the
    /// bookmark now exists twice (duplicate-over-loss).
    DuplicateRetained,
    /// The destination category already holds this path; nothing changed.
    AlreadyPresent,
}

/// Trait defining move and reorder operations.
pub trait MoveManagerTrait {
    fn reorder_item(&mut self, bar_id: &str, from: usize, to: usize) -> Result<(), BookmarkError>;
    fn move_bookmark(
        &mut self,
        bookmark: Bookmark,
        source: BookmarkSource,
        dest: MoveDestination,
    ) -> MoveOutcome;
    fn move_category(
        &mut self,
        name: &str,
        source_bar: &str,
        dest_bar: &str,
        index: Option<usize>,
    ) -> Result<(), BookmarkError>;
}

/// Move manager borrowing the live document.
pub struct MoveManager<'a> {
    doc: &'a mut BookmarkDocument,
}

impl<'a> MoveManager<'a> {
    pub fn new(doc: &'a mut BookmarkDocument) -> Self {
        Self { doc }
    }

    /// Candidate source containers in the fixed removal priority order:
    /// the declared source first, then the source bar's top level, then
    /// each of its categories, then every other bar (top level, then
    /// categories). The destination container is excluded so the freshly
    /// inserted copy can never be the one removed.
    fn removal_candidates(
        &self,
        source: &BookmarkSource,
        dest: &MoveDestination,
    ) -> Vec<SourceCandidate> {
        let mut candidates: Vec<SourceCandidate> = Vec::new();
        let mut push = |candidate: SourceCandidate| {
            if !candidates.contains(&candidate) {
                candidates.push(candidate);
            }
        };

        let source_bar = match source {
            BookmarkSource::BarTop { bar_id } => {
                push(SourceCandidate::BarTop {
                    bar_id: bar_id.clone(),
                });
                Some(bar_id.clone())
            }
            BookmarkSource::Category { bar_id, name } => {
                push(SourceCandidate::Category {
                    bar_id: bar_id.clone(),
                    name: name.clone(),
                });
                Some(bar_id.clone())
            }
            BookmarkSource::External => None,
        };

        let mut bar_ids: Vec<String> = self.doc.bars.keys().cloned().collect();
        if let Some(first) = source_bar {
            bar_ids.retain(|id| *id != first);
            bar_ids.insert(0, first);
        }
        for bar_id in bar_ids {
            push(SourceCandidate::BarTop {
                bar_id: bar_id.clone(),
            });
            if let Some(bar) = self.doc.bar(&bar_id) {
                for name in bar.categories.keys() {
                    push(SourceCandidate::Category {
                        bar_id: bar_id.clone(),
                        name: name.clone(),
                    });
                }
            }
        }

        let dest_candidate = match dest {
            MoveDestination::BarTop { bar_id, .. } => SourceCandidate::BarTop {
                bar_id: bar_id.clone(),
            },
            MoveDestination::Category { bar_id, name, .. } => SourceCandidate::Category {
                bar_id: bar_id.clone(),
                name: name.clone(),
            },
        };
        candidates.retain(|c| *c != dest_candidate);
        candidates
    }

    /// Inserts the bookmark at the destination, setting or clearing its
    /// denormalized `category` field. Returns `None` when the destination
    /// category already holds the path (the drop is a no-op).
    fn insert_at_destination(&mut self, mut bookmark: Bookmark, dest: &MoveDestination) -> Option<()> {
        match dest {
            MoveDestination::BarTop { bar_id, index } => {
                bookmark.category = None;
                let bar = self.doc.bar_mut(bar_id);
                let at = index.unwrap_or(bar.items.len()).min(bar.items.len());
                bar.items.insert(at, BarItem::Bookmark { data: bookmark });
            }
            MoveDestination::Category { bar_id, name, index } => {
                let bar = self.doc.bar_mut(bar_id);
                // Drop targets are rendered from the data, but a popup can
                // outlive a concurrent delete; recreate rather than drop
                // the bookmark on the floor.
                if !bar.categories.contains_key(name) {
                    bar.categories.insert(name.clone(), Vec::new());
                    if bar.category_item_index(name).is_none() {
                        bar.items.push(BarItem::Category { name: name.clone() });
                    }
                }
                let bookmarks = bar.categories.get_mut(name)?;
                if bookmarks.iter().any(|b| b.path == bookmark.path) {
                    return None;
                }
                bookmark.category = Some(name.clone());
                let at = index.unwrap_or(bookmarks.len()).min(bookmarks.len());
                bookmarks.insert(at, bookmark);
            }
        }
        Some(())
    }
}

impl MoveManagerTrait for MoveManager<'_> {
    /// Same-container reorder: remove at the old index, then insert at the
    /// target index, decremented by one when the removal shifted it.
    /// Dropping an item at its own index leaves the document unchanged.
    fn reorder_item(&mut self, bar_id: &str, from: usize, to: usize) -> Result<(), BookmarkError> {
        let bar = self
            .doc
            .bars
            .get_mut(bar_id)
            .ok_or(BookmarkError::InvalidIndex(from))?;
        if from >= bar.items.len() {
            return Err(BookmarkError::InvalidIndex(from));
        }
        if to > bar.items.len() {
            return Err(BookmarkError::InvalidIndex(to));
        }
        if from == to {
            return Ok(());
        }

        let item = bar.items.remove(from);
        let adjusted = if from < to { to - 1 } else { to };
        bar.items.insert(adjusted, item);
        Ok(())
    }

    /// Cross-container bookmark move: insert at the destination first, then
    /// remove the matching bookmark from the candidate sources. If no
    /// source match is found the insert stands, favoring a visible
    /// duplicate over a lost bookmark.
    fn move_bookmark(
        &mut self,
        bookmark: Bookmark,
        source: BookmarkSource,
        dest: MoveDestination,
    ) -> MoveOutcome {
        let identity = bookmark.identity();
        let candidates = self.removal_candidates(&source, &dest);

        if self.insert_at_destination(bookmark, &dest).is_none() {
            return MoveOutcome::AlreadyPresent;
        }

        if matches!(source, BookmarkSource::External) {
            return MoveOutcome::Added;
        }

        match find_and_remove(self.doc, &candidates, &identity) {
            Some(_) => MoveOutcome::Moved,
            None => {
                log::warn!(
                    "No source match for moved bookmark '{}' ({}); duplicate retained",
                    identity.name,
                    identity.path
                );
                MoveOutcome::DuplicateRetained
            }
        }
    }

    /// Moves a whole category between bars: the item list, the optional
    /// color, and the items-list reference travel together. A name
    /// collision on the destination bar is fatal to the operation.
    fn move_category(
        &mut self,
        name: &str,
        source_bar: &str,
        dest_bar: &str,
        index: Option<usize>,
    ) -> Result<(), BookmarkError> {
        let source = self
            .doc
            .bars
            .get(source_bar)
            .ok_or_else(|| BookmarkError::CategoryNotFound(name.to_string()))?;
        if !source.categories.contains_key(name) {
            return Err(BookmarkError::CategoryNotFound(name.to_string()));
        }
        if self
            .doc
            .bar(dest_bar)
            .is_some_and(|bar| bar.categories.contains_key(name))
        {
            log::warn!(
                "Category '{}' already exists on bar '{}'; move rejected",
                name,
                dest_bar
            );
            return Err(BookmarkError::DuplicateCategory(name.to_string()));
        }

        let source = self.doc.bar_mut(source_bar);
        let bookmarks = source.categories.remove(name).unwrap_or_default();
        let color = source.category_colors.remove(name);
        source.items.retain(|item| !item.is_category_named(name));

        let dest = self.doc.bar_mut(dest_bar);
        dest.categories.insert(name.to_string(), bookmarks);
        if let Some(color) = color {
            dest.category_colors.insert(name.to_string(), color);
        }
        let at = index.unwrap_or(dest.items.len()).min(dest.items.len());
        dest.items.insert(
            at,
            BarItem::Category {
                name: name.to_string(),
            },
        );
        Ok(())
    }
}
