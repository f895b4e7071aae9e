//! The full reconciliation scenario: a docs root with a guide subdirectory,
//! verified bullet-for-bullet.

use doc_index::{reconcile, ReconcileOptions};
use std::fs;
use tempfile::tempdir;

#[test]
fn docs_guide_scenario() {
    let td = tempdir().unwrap();
    let docs = td.path().join("docs");
    let guide = docs.join("guide");
    fs::create_dir_all(&guide).unwrap();
    fs::write(guide.join("intro.md"), "# Introduction\n\nwelcome\n").unwrap();
    fs::write(guide.join("setup.md"), "no heading here\n").unwrap();

    reconcile(&docs, &ReconcileOptions::default()).unwrap();

    let guide_index = fs::read_to_string(guide.join("index.md")).unwrap();
    assert_eq!(
        guide_index,
        "# guide\n- [Introduction](./intro.md)\n- [setup.md](./setup.md)\n"
    );

    let root_index = fs::read_to_string(docs.join("index.md")).unwrap();
    assert!(root_index.starts_with("# docs\n"));
    assert!(root_index.contains("- [guide](./guide/)\n"));
}

#[test]
fn second_run_picks_up_fresh_child_heading() {
    // After the first run the guide index exists, so the parent derives the
    // guide title from its heading.
    let td = tempdir().unwrap();
    let docs = td.path().join("docs");
    let guide = docs.join("guide");
    fs::create_dir_all(&guide).unwrap();
    fs::write(guide.join("intro.md"), "# Introduction").unwrap();
    fs::write(guide.join("setup.md"), "x").unwrap();

    let opts = ReconcileOptions::default();
    reconcile(&docs, &opts).unwrap();
    reconcile(&docs, &opts).unwrap();

    let root_index = fs::read_to_string(docs.join("index.md")).unwrap();
    assert!(root_index.contains("- [guide](./guide/)\n"));
}

#[test]
fn mixed_tree_resolves_then_indexes() {
    // A messy tree: a sole-index dir (promote), a redundant-index dir
    // (backup), and plain documents, all under one root.
    let td = tempdir().unwrap();
    let docs = td.path().join("docs");
    let lone = docs.join("lone");
    let article = docs.join("article");
    fs::create_dir_all(&lone).unwrap();
    fs::create_dir_all(&article).unwrap();
    fs::write(lone.join("index.md"), "# Lone Piece").unwrap();
    fs::write(article.join("article.md"), "# The Article").unwrap();
    fs::write(article.join("index.md"), "# Stale Index").unwrap();
    fs::write(docs.join("readme.md"), "# Read Me").unwrap();

    reconcile(&docs, &ReconcileOptions::default()).unwrap();

    // lone/: promoted, now a single-article leaf without an index.
    assert!(lone.join("lone.md").exists());
    assert!(!lone.join("index.md").exists());
    // article/: redundant index backed up by the resolver.
    assert!(article.join("article.md").exists());
    assert!(!article.join("index.md").exists());

    let root_index = fs::read_to_string(docs.join("index.md")).unwrap();
    assert!(root_index.contains("- [Read Me](./readme.md)\n"));
    assert!(root_index.contains("- [The Article](./article/article.md)\n"));
    assert!(root_index.contains("- [Lone Piece](./lone/lone.md)\n"));
    // Files sort before directories in the listing.
    let readme_pos = root_index.find("readme.md").unwrap();
    let article_pos = root_index.find("(./article/").unwrap();
    assert!(readme_pos < article_pos);
}

#[test]
fn root_display_name_used_for_root_heading() {
    let td = tempdir().unwrap();
    let docs = td.path().join("docs");
    fs::create_dir_all(&docs).unwrap();
    fs::write(docs.join("a.md"), "# A").unwrap();

    let opts = ReconcileOptions {
        root_display_name: Some("Site Docs".into()),
        ..ReconcileOptions::default()
    };
    reconcile(&docs, &opts).unwrap();
    let root_index = fs::read_to_string(docs.join("index.md")).unwrap();
    assert!(root_index.starts_with("# Site Docs\n"));
}
