//! Property-based tests for move and reorder conservation.
//!
//! These tests verify that cross-container moves never create or lose
//! bookmarks (except the documented duplicate-over-loss path, which only
//! ever adds) and that reorders permute without changing contents.

use proptest::prelude::*;
use suiteview_bookmarks::managers::move_manager::{
    resolve_insertion_index, BookmarkSource, MoveDestination, MoveManager, MoveManagerTrait,
    MoveOutcome,
};
use suiteview_bookmarks::types::bookmark::{
    BarItem, Bookmark, BookmarkDocument, BookmarkType, SIDEBAR_ID, TOP_BAR_ID,
};

fn arb_bookmark() -> impl Strategy<Value = Bookmark> {
    ("[a-zA-Z][a-zA-Z0-9 ]{0,15}", "[a-z/.0-9]{1,30}").prop_map(|(name, path)| {
        Bookmark::new(&name, &path, BookmarkType::Path)
    })
}

/// A document seeded with distinct-path bookmarks spread over the top bar's
/// top level and its "General" category.
fn arb_populated_doc() -> impl Strategy<Value = BookmarkDocument> {
    prop::collection::btree_map("[a-z/.0-9]{1,30}", "[a-zA-Z][a-zA-Z0-9 ]{0,15}", 1..8).prop_map(
        |paths| {
            let mut doc = BookmarkDocument::seed();
            for (i, (path, name)) in paths.into_iter().enumerate() {
                let mut bookmark = Bookmark::new(&name, &path, BookmarkType::Path);
                if i % 2 == 0 {
                    doc.bar_mut(TOP_BAR_ID)
                        .items
                        .push(BarItem::Bookmark { data: bookmark });
                } else {
                    bookmark.category = Some("General".to_string());
                    if let Some(list) = doc.bar_mut(TOP_BAR_ID).categories.get_mut("General") {
                        list.push(bookmark);
                    }
                }
            }
            doc
        },
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(20))]

    /// Moving any top-level bookmark of the top bar to the sidebar keeps the
    /// total bookmark count unchanged.
    #[test]
    fn moves_conserve_bookmark_count(doc in arb_populated_doc(), pick in any::<prop::sample::Index>()) {
        let mut doc = doc;
        let top_level: Vec<Bookmark> = doc
            .bar(TOP_BAR_ID)
            .unwrap()
            .items
            .iter()
            .filter_map(|item| item.bookmark().cloned())
            .collect();
        prop_assume!(!top_level.is_empty());
        let bookmark = top_level[pick.index(top_level.len())].clone();
        let before = doc.total_bookmark_count();

        let mut mgr = MoveManager::new(&mut doc);
        let outcome = mgr.move_bookmark(
            bookmark,
            BookmarkSource::BarTop { bar_id: TOP_BAR_ID.to_string() },
            MoveDestination::BarTop { bar_id: SIDEBAR_ID.to_string(), index: None },
        );

        prop_assert_eq!(outcome, MoveOutcome::Moved);
        prop_assert_eq!(doc.total_bookmark_count(), before);
    }

    /// The unmatched-source path only ever adds, never removes.
    #[test]
    fn unmatched_source_never_loses_bookmarks(doc in arb_populated_doc(), ghost in arb_bookmark()) {
        let mut doc = doc;
        prop_assume!(doc.bars.values().all(|bar| {
            bar.items
                .iter()
                .filter_map(|item| item.bookmark())
                .chain(bar.categories.values().flatten())
                .all(|b| b.path != ghost.path)
        }));
        let before = doc.total_bookmark_count();

        let mut mgr = MoveManager::new(&mut doc);
        let outcome = mgr.move_bookmark(
            ghost,
            BookmarkSource::BarTop { bar_id: SIDEBAR_ID.to_string() },
            MoveDestination::BarTop { bar_id: TOP_BAR_ID.to_string(), index: Some(0) },
        );

        prop_assert_eq!(outcome, MoveOutcome::DuplicateRetained);
        prop_assert_eq!(doc.total_bookmark_count(), before + 1);
    }

    /// Reordering permutes the items list without changing its contents.
    #[test]
    fn reorder_is_a_permutation(
        doc in arb_populated_doc(),
        from in any::<prop::sample::Index>(),
        to in any::<prop::sample::Index>(),
    ) {
        let mut doc = doc;
        let len = doc.bar(TOP_BAR_ID).unwrap().items.len();
        prop_assume!(len > 0);
        let from = from.index(len);
        let to = to.index(len + 1);

        let mut sorted_before: Vec<String> = doc
            .bar(TOP_BAR_ID)
            .unwrap()
            .items
            .iter()
            .map(|item| format!("{:?}", item))
            .collect();
        sorted_before.sort();

        let mut mgr = MoveManager::new(&mut doc);
        mgr.reorder_item(TOP_BAR_ID, from, to).unwrap();

        let mut sorted_after: Vec<String> = doc
            .bar(TOP_BAR_ID)
            .unwrap()
            .items
            .iter()
            .map(|item| format!("{:?}", item))
            .collect();
        sorted_after.sort();
        prop_assert_eq!(sorted_after, sorted_before);
    }

    /// The insertion index is always within bounds and ordered with the
    /// button centers.
    #[test]
    fn insertion_index_is_monotonic(
        centers in prop::collection::vec(0i32..10_000, 0..10),
        drop_pos in 0i32..10_000,
    ) {
        let mut centers = centers;
        centers.sort();
        let index = resolve_insertion_index(&centers, drop_pos);
        prop_assert!(index <= centers.len());
        if index > 0 {
            prop_assert!(centers[index - 1] <= drop_pos);
        }
        if index < centers.len() {
            prop_assert!(drop_pos < centers[index]);
        }
    }
}
