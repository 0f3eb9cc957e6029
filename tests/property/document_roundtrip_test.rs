//! Property-based tests for document serialization.
//!
//! These tests verify that any well-formed bookmark document survives a
//! JSON serialize/deserialize cycle unchanged, and that the wire shape
//! keeps its tagged-union item encoding.

use std::collections::BTreeMap;

use proptest::prelude::*;
use suiteview_bookmarks::types::bookmark::{
    BarData, BarItem, Bookmark, BookmarkDocument, BookmarkType, DOCUMENT_VERSION,
};

fn arb_kind() -> impl Strategy<Value = BookmarkType> {
    prop_oneof![
        Just(BookmarkType::Folder),
        Just(BookmarkType::File),
        Just(BookmarkType::Url),
        Just(BookmarkType::Sharepoint),
        Just(BookmarkType::Path),
    ]
}

fn arb_bookmark() -> impl Strategy<Value = Bookmark> {
    ("[a-zA-Z][a-zA-Z0-9 ]{0,20}", "[a-z/:.0-9]{1,40}", arb_kind(), any::<bool>()).prop_map(
        |(name, path, kind, open_in_app)| {
            let mut bookmark = Bookmark::new(&name, &path, kind);
            bookmark.open_in_app = open_in_app;
            bookmark
        },
    )
}

/// A bar honoring the items/categories consistency invariant: every
/// generated category gets exactly one reference in the items list, and
/// contained bookmarks carry the owner's name.
fn arb_bar() -> impl Strategy<Value = BarData> {
    (
        prop::collection::vec(arb_bookmark(), 0..5),
        prop::collection::btree_map(
            "[A-Z][a-z]{2,8}",
            prop::collection::vec(arb_bookmark(), 0..4),
            0..3,
        ),
    )
        .prop_map(|(top_level, mut categories)| {
            let mut items: Vec<BarItem> = top_level
                .into_iter()
                .map(|data| BarItem::Bookmark { data })
                .collect();
            for (name, bookmarks) in categories.iter_mut() {
                for bookmark in bookmarks.iter_mut() {
                    bookmark.category = Some(name.clone());
                }
                items.push(BarItem::Category { name: name.clone() });
            }
            BarData {
                items,
                categories,
                category_colors: BTreeMap::new(),
            }
        })
}

fn arb_document() -> impl Strategy<Value = BookmarkDocument> {
    prop::collection::btree_map("[a-z_]{3,12}", arb_bar(), 0..3).prop_map(|bars| {
        BookmarkDocument {
            bars,
            version: DOCUMENT_VERSION,
        }
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(20))]

    #[test]
    fn document_roundtrips_through_json(doc in arb_document()) {
        let json = serde_json::to_string_pretty(&doc).unwrap();
        let parsed: BookmarkDocument = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(parsed, doc);
    }

    #[test]
    fn bar_items_keep_tagged_encoding(bar in arb_bar()) {
        let json: serde_json::Value = serde_json::to_value(&bar).unwrap();
        for (item, encoded) in bar.items.iter().zip(json["items"].as_array().unwrap()) {
            match item {
                BarItem::Bookmark { data } => {
                    prop_assert_eq!(&encoded["type"], "bookmark");
                    prop_assert_eq!(encoded["data"]["name"].as_str().unwrap(), data.name.as_str());
                }
                BarItem::Category { name } => {
                    prop_assert_eq!(&encoded["type"], "category");
                    prop_assert_eq!(encoded["name"].as_str().unwrap(), name.as_str());
                }
            }
        }
    }

    #[test]
    fn roundtrip_preserves_bookmark_count(doc in arb_document()) {
        let json = serde_json::to_string(&doc).unwrap();
        let parsed: BookmarkDocument = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(parsed.total_bookmark_count(), doc.total_bookmark_count());
    }
}
