//! SuiteView bookmarks — the data core behind the SuiteView bookmark bars.
//!
//! Entry point: runs an interactive console demo exercising every layer of
//! the library against a throwaway profile directory.

use std::cell::Cell;
use std::fs;
use std::path::PathBuf;
use std::rc::Rc;

use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};

use suiteview_bookmarks::managers::bookmark_manager::{
    BookmarkManager, BookmarkManagerTrait, BookmarkSlot,
};
use suiteview_bookmarks::managers::category_manager::{CategoryManager, CategoryManagerTrait};
use suiteview_bookmarks::managers::move_manager::{
    resolve_insertion_index, BookmarkSource, MoveDestination, MoveManager, MoveManagerTrait,
};
use suiteview_bookmarks::storage::paths::StorePaths;
use suiteview_bookmarks::storage::store::{BookmarkStore, BookmarkStoreTrait};
use suiteview_bookmarks::types::bookmark::{Bookmark, BookmarkType, SIDEBAR_ID, TOP_BAR_ID};

fn main() {
    TermLogger::init(
        LevelFilter::Debug,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )
    .ok();

    println!();
    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║        SuiteView Bookmarks v{} — Demo Mode              ║", env!("CARGO_PKG_VERSION"));
    println!("║     Bookmark bar data core: store, categories, moves       ║");
    println!("╚══════════════════════════════════════════════════════════════╝");
    println!();

    let demo_dir = std::env::temp_dir().join("suiteview-bookmarks-demo");
    let _ = fs::remove_dir_all(&demo_dir);

    demo_store(&demo_dir);
    demo_categories(&demo_dir);
    demo_bookmarks(&demo_dir);
    demo_moves(&demo_dir);
    demo_migration(&demo_dir);

    let _ = fs::remove_dir_all(&demo_dir);

    println!();
    println!("═══════════════════════════════════════════════════════════════");
    println!("  ✅ All 5 components demonstrated successfully!");
    println!("═══════════════════════════════════════════════════════════════");
}

fn section(name: &str) {
    println!("───────────────────────────────────────────────────────────────");
    println!("  📦 {}", name);
    println!("───────────────────────────────────────────────────────────────");
}

fn demo_store(demo_dir: &PathBuf) {
    section("Bookmark Store");

    let mut store = BookmarkStore::open(StorePaths::in_dir(demo_dir));
    println!("  Opened store at {}", demo_dir.display());
    println!("  Bars: {:?}", store.document().bars.keys().collect::<Vec<_>>());

    let fired = Rc::new(Cell::new(0u32));
    let counter = Rc::clone(&fired);
    store.register_save_callback(TOP_BAR_ID, "demo", Box::new(move || {
        counter.set(counter.get() + 1);
    }));

    store.save().expect("save failed");
    store.save().expect("save failed");
    println!("  Saved twice; callback fired {} times", fired.get());
    store.unregister_save_callback(TOP_BAR_ID, "demo");
    println!("  ✓ BookmarkStore OK");
    println!();
}

fn demo_categories(demo_dir: &PathBuf) {
    section("Category Manager");

    let mut store = BookmarkStore::open(StorePaths::in_dir(demo_dir));
    let doc = store.document_mut();
    let mut manager = CategoryManager::new(doc);

    manager.create_category(TOP_BAR_ID, "Projects").expect("create failed");
    manager
        .set_category_color(TOP_BAR_ID, "Projects", Some("blue"))
        .expect("color failed");
    println!("  Created 'Projects' with color blue");

    manager
        .rename_category(TOP_BAR_ID, "Projects", "Work")
        .expect("rename failed");
    println!("  Renamed 'Projects' -> 'Work' (color and items entry follow)");

    let protected = manager.delete_category(TOP_BAR_ID, "General");
    println!("  Deleting built-in 'General': {:?}", protected.err());

    let removed = manager.delete_category(TOP_BAR_ID, "Work").expect("delete failed");
    println!("  Deleted 'Work' ({} bookmarks cascaded)", removed.len());

    store.save().expect("save failed");
    println!("  ✓ CategoryManager OK");
    println!();
}

fn demo_bookmarks(demo_dir: &PathBuf) {
    section("Bookmark Manager");

    let mut store = BookmarkStore::open(StorePaths::in_dir(demo_dir));
    let doc = store.document_mut();
    let mut manager = BookmarkManager::new(doc);

    let docs = Bookmark::new("Docs", "https://docs.example.com", BookmarkType::Url);
    let identity = docs.identity();
    manager
        .add_bookmark(TOP_BAR_ID, &BookmarkSlot::BarTop(None), docs)
        .expect("add failed");
    println!("  Added 'Docs' to the top bar");

    manager
        .add_bookmark(
            TOP_BAR_ID,
            &BookmarkSlot::Category("Favorites".to_string(), None),
            Bookmark::new("Reports", "/srv/reports", BookmarkType::Folder),
        )
        .expect("add failed");
    println!("  Added 'Reports' to category 'Favorites'");

    manager
        .update_bookmark(TOP_BAR_ID, &identity, "Docs (v2)", "https://docs.example.com/v2")
        .expect("update failed");
    let found = manager.find_bookmark(TOP_BAR_ID, &identity);
    println!("  Updated in place; found: {:?}", found.map(|b| b.name.as_str()));

    store.save().expect("save failed");
    println!("  ✓ BookmarkManager OK");
    println!();
}

fn demo_moves(demo_dir: &PathBuf) {
    section("Move Manager");

    let mut store = BookmarkStore::open(StorePaths::in_dir(demo_dir));
    let doc = store.document_mut();

    let index = resolve_insertion_index(&[40, 120, 200], 150);
    println!("  Drop at x=150 over centers [40, 120, 200] -> index {}", index);

    let bookmark = doc.bar(TOP_BAR_ID).and_then(|bar| {
        bar.categories
            .get("Favorites")
            .and_then(|list| list.first())
            .cloned()
    });
    if let Some(bookmark) = bookmark {
        let mut manager = MoveManager::new(doc);
        let outcome = manager.move_bookmark(
            bookmark,
            BookmarkSource::Category {
                bar_id: TOP_BAR_ID.to_string(),
                name: "Favorites".to_string(),
            },
            MoveDestination::BarTop {
                bar_id: SIDEBAR_ID.to_string(),
                index: Some(0),
            },
        );
        println!("  Moved 'Reports' from Favorites to sidebar: {:?}", outcome);
    }

    let mut manager = MoveManager::new(doc);
    manager.reorder_item(TOP_BAR_ID, 0, 2).expect("reorder failed");
    println!("  Reordered top bar item 0 -> 2");

    store.save().expect("save failed");
    println!("  ✓ MoveManager OK");
    println!();
}

fn demo_migration(demo_dir: &PathBuf) {
    section("Legacy Migration");

    let legacy_dir = demo_dir.join("legacy");
    fs::create_dir_all(&legacy_dir).expect("mkdir failed");
    fs::write(
        legacy_dir.join("bookmarks.json"),
        r#"{"bar_items":[{"type":"bookmark","data":{"name":"Home","path":"/home","type":"folder","open_in_app":false}}],"categories":{},"category_colors":{}}"#,
    )
    .expect("write failed");
    fs::write(
        legacy_dir.join("quick_links.json"),
        r#"{"items":[{"type":"bookmark","data":{"name":"Wiki","path":"https://wiki.example.com","type":"url","open_in_app":true}}]}"#,
    )
    .expect("write failed");

    let store = BookmarkStore::open(StorePaths::in_dir(&legacy_dir));
    let doc = store.document();
    println!(
        "  Migrated: top bar has {} item(s), sidebar has {} item(s)",
        doc.bar(TOP_BAR_ID).map_or(0, |bar| bar.items.len()),
        doc.bar(SIDEBAR_ID).map_or(0, |bar| bar.items.len()),
    );
    println!(
        "  Legacy sidebar file removed: {}",
        !legacy_dir.join("quick_links.json").exists()
    );
    println!(
        "  Backups written: {}",
        legacy_dir.join("backups").join("bookmarks.json").exists()
    );
    println!("  ✓ Migration OK");
    println!();
}
