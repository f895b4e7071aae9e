//! A reconciliation run is re-runnable: the second run over the same tree
//! must not rename, back up, or rewrite anything.

use doc_index::{generate_indexes, resolve_conflicts, ReconcileOptions};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::time::SystemTime;
use tempfile::tempdir;

/// Recursive snapshot: path -> (content, mtime). Directories map to None.
type Snapshot = BTreeMap<String, Option<(Vec<u8>, SystemTime)>>;

fn snapshot(root: &Path) -> Snapshot {
    let mut out = Snapshot::new();
    walk(root, root, &mut out);
    out
}

fn walk(root: &Path, dir: &Path, out: &mut Snapshot) {
    for entry in fs::read_dir(dir).unwrap() {
        let entry = entry.unwrap();
        let path = entry.path();
        let rel = path.strip_prefix(root).unwrap().to_string_lossy().into_owned();
        if path.is_dir() {
            out.insert(rel, None);
            walk(root, &path, out);
        } else {
            let content = fs::read(&path).unwrap();
            let mtime = fs::metadata(&path).unwrap().modified().unwrap();
            out.insert(rel, Some((content, mtime)));
        }
    }
}

fn run_both(root: &Path, opts: &ReconcileOptions) {
    resolve_conflicts(root, opts).unwrap();
    generate_indexes(root, opts).unwrap();
}

#[test]
fn second_run_is_a_filesystem_noop() {
    let td = tempdir().unwrap();
    let docs = td.path().join("docs");
    let guide = docs.join("guide");
    let lone = docs.join("lone");
    let article = docs.join("article");
    fs::create_dir_all(&guide).unwrap();
    fs::create_dir_all(&lone).unwrap();
    fs::create_dir_all(&article).unwrap();
    fs::write(guide.join("intro.md"), "# Introduction").unwrap();
    fs::write(guide.join("setup.md"), "plain").unwrap();
    fs::write(lone.join("index.md"), "# Lone").unwrap();
    fs::write(article.join("article.md"), "# Article").unwrap();
    fs::write(article.join("index.md"), "# Stale").unwrap();
    fs::write(docs.join("readme.md"), "# Read Me").unwrap();

    let opts = ReconcileOptions::default();
    run_both(&docs, &opts);
    let first = snapshot(&docs);

    run_both(&docs, &opts);
    let second = snapshot(&docs);

    assert_eq!(
        first.keys().collect::<Vec<_>>(),
        second.keys().collect::<Vec<_>>(),
        "no files may appear or disappear on the second run"
    );
    for (path, state) in &first {
        assert_eq!(
            state,
            second.get(path).unwrap(),
            "'{path}' changed on the second run"
        );
    }
}

#[test]
fn empty_subdirectory_does_not_break_idempotence() {
    // An empty directory must not acquire an index: the resolver would read
    // it as a sole index next time and promote it, mutating the tree forever.
    let td = tempdir().unwrap();
    let docs = td.path().join("docs");
    let guide = docs.join("guide");
    let hollow = docs.join("hollow");
    fs::create_dir_all(&guide).unwrap();
    fs::create_dir_all(&hollow).unwrap();
    fs::write(guide.join("intro.md"), "# Introduction").unwrap();
    fs::write(guide.join("setup.md"), "plain").unwrap();

    let opts = ReconcileOptions::default();
    run_both(&docs, &opts);
    let first = snapshot(&docs);
    assert!(!hollow.join("index.md").exists());
    assert!(!hollow.join("hollow.md").exists());

    run_both(&docs, &opts);
    let second = snapshot(&docs);
    assert_eq!(
        first.keys().collect::<Vec<_>>(),
        second.keys().collect::<Vec<_>>(),
        "empty subdirectory must not spawn files across runs"
    );
}

#[test]
fn second_run_creates_no_new_backups() {
    let td = tempdir().unwrap();
    let docs = td.path().join("docs");
    fs::create_dir_all(&docs).unwrap();
    fs::write(docs.join("index.md"), "# Will Be Promoted").unwrap();

    let opts = ReconcileOptions::default();
    run_both(&docs, &opts);
    let count_backups = |root: &Path| {
        snapshot(root)
            .keys()
            .filter(|k| k.ends_with(".del.bak"))
            .count()
    };
    let first = count_backups(&docs);
    run_both(&docs, &opts);
    assert_eq!(count_backups(&docs), first);
}
