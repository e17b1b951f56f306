use dupgroup::cli::OutputFormat;
use dupgroup::input::{read_records, ParseSummary};
use dupgroup::duplicates::GroupingIndex;
use dupgroup::output::{write_report, ReportOptions};
use dupgroup::scanner::{scan_tree, InodeInfo, ScanError};
use std::fs::{self, File};
use std::io::Write;
use tempfile::tempdir;

/// Scan `root` and feed the records straight into a fresh index.
fn scan_into_index(root: &std::path::Path, sep: char) -> (GroupingIndex, ParseSummary) {
    let mut records: Vec<u8> = Vec::new();
    scan_tree(root, sep, "testhost", &mut records).unwrap();

    let mut index = GroupingIndex::new();
    let mut summary = ParseSummary::default();
    read_records(records.as_slice(), "scan", sep, &mut index, &mut summary).unwrap();
    (index, summary)
}

#[test]
fn test_scan_then_report_finds_duplicates() {
    let dir = tempdir().unwrap();
    fs::create_dir(dir.path().join("sub")).unwrap();
    File::create(dir.path().join("one.txt"))
        .unwrap()
        .write_all(b"duplicate content")
        .unwrap();
    File::create(dir.path().join("sub/two.txt"))
        .unwrap()
        .write_all(b"duplicate content")
        .unwrap();
    File::create(dir.path().join("unique.txt"))
        .unwrap()
        .write_all(b"something else")
        .unwrap();

    let (index, summary) = scan_into_index(dir.path(), '\0');
    assert_eq!(summary.records, 3);
    assert!(summary.skipped.is_empty());

    let mut out = Vec::new();
    let emitted = write_report(&index, &ReportOptions::default(), OutputFormat::Text, &mut out).unwrap();
    let text = String::from_utf8(out).unwrap();

    assert_eq!(emitted, 1);
    assert!(text.contains("one.txt"));
    assert!(text.contains("two.txt"));
    assert!(!text.contains("unique.txt"));
    assert!(text.lines().skip(1).all(|l| l.starts_with("testhost  ")));
}

#[test]
fn test_scan_hard_link_is_not_a_duplicate() {
    let dir = tempdir().unwrap();
    let original = dir.path().join("original.txt");
    File::create(&original)
        .unwrap()
        .write_all(b"identical content")
        .unwrap();
    if let Err(e) = fs::hard_link(&original, dir.path().join("hardlink.txt")) {
        eprintln!("Skipping hardlink test: failed to create hardlink: {}", e);
        return;
    }

    let (index, summary) = scan_into_index(dir.path(), '\0');
    assert_eq!(summary.records, 2);

    let stats = index.stats();
    if InodeInfo::is_supported() {
        // Both paths listed under one inode
        assert_eq!(stats.groups, 1);
        assert_eq!(stats.duplicate_groups, 0);
        let (_, group) = index.iter().next().unwrap();
        assert_eq!(group.inode_count(), 1);
        assert_eq!(group.path_count(), 2);
        assert!(group.entries().all(|e| e.link_count == 2));
    } else {
        assert_eq!(stats.duplicate_groups, 1);
    }
}

#[test]
fn test_scan_hard_link_plus_copy_lists_all_paths() {
    let dir = tempdir().unwrap();
    let original = dir.path().join("a");
    fs::write(&original, b"payload").unwrap();
    fs::write(dir.path().join("c"), b"payload").unwrap();
    if fs::hard_link(&original, dir.path().join("b")).is_err() {
        return;
    }

    let (index, _) = scan_into_index(dir.path(), '\0');
    let stats = index.stats();
    assert_eq!(stats.duplicate_groups, 1);

    let mut out = Vec::new();
    write_report(&index, &ReportOptions::default(), OutputFormat::Text, &mut out).unwrap();
    let text = String::from_utf8(out).unwrap();
    // Blank separator plus three paths
    assert_eq!(text.lines().count(), 4);
    if InodeInfo::is_supported() {
        assert_eq!(stats.redundant_inodes, 1);
        assert_eq!(stats.reclaimable_bytes, 7);
    }
}

#[test]
fn test_scan_with_custom_separator() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("x"), b"1").unwrap();
    fs::write(dir.path().join("y"), b"1").unwrap();

    let (index, summary) = scan_into_index(dir.path(), '\t');
    assert_eq!(summary.records, 2);
    assert_eq!(index.stats().duplicate_groups, 1);
}

#[cfg(unix)]
#[test]
fn test_scan_ignores_symlinks() {
    let dir = tempdir().unwrap();
    let target = dir.path().join("target");
    fs::write(&target, b"content").unwrap();
    std::os::unix::fs::symlink(&target, dir.path().join("link")).unwrap();

    let (index, summary) = scan_into_index(dir.path(), '\0');
    assert_eq!(summary.records, 1);
    assert_eq!(index.stats().duplicate_groups, 0);
}

#[test]
fn test_scan_trailing_slash_is_stripped() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("file"), b"x").unwrap();
    let with_slash = format!("{}/", dir.path().display());

    let mut out = Vec::new();
    scan_tree(std::path::Path::new(&with_slash), '|', "h", &mut out).unwrap();
    let text = String::from_utf8(out).unwrap();

    assert!(!text.contains("//file"));
    assert!(text.trim_end().ends_with(&format!("{}/file", dir.path().display())));
}

#[test]
fn test_scan_missing_directory() {
    let dir = tempdir().unwrap();
    let result = scan_tree(&dir.path().join("missing"), '\0', "h", std::io::sink());

    match result {
        Err(ScanError::NotFound(path)) => assert!(path.ends_with("missing")),
        other => panic!("Expected NotFound error, got {:?}", other),
    }
}

#[cfg(unix)]
#[test]
fn test_unreadable_file_is_still_recorded() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempdir().unwrap();
    let locked = dir.path().join("locked");
    fs::write(&locked, b"secret").unwrap();
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

    // Root can read it anyway; the record must be there either way
    let mut out = Vec::new();
    let summary = scan_tree(dir.path(), '\0', "h", &mut out).unwrap();
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o644)).unwrap();

    assert_eq!(summary.files, 1);
    assert_eq!(String::from_utf8(out).unwrap().lines().count(), 1);
}
