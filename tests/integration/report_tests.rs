use dupgroup::cli::OutputFormat;
use dupgroup::input::{read_records, ParseSummary};
use dupgroup::output::{select_groups, write_report, ReportOptions};
use dupgroup::duplicates::GroupingIndex;

const HASH_A: &str = "aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa";
const HASH_B: &str = "bbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb";
const HASH_C: &str = "cccccccccccccccccccccccccccccccc";

fn line(fields: [&str; 7]) -> String {
    fields.join("\0")
}

fn index_from(lines: &[String]) -> GroupingIndex {
    let input = lines.join("\n") + "\n";
    let mut index = GroupingIndex::new();
    let mut summary = ParseSummary::default();
    read_records(input.as_bytes(), "test", '\0', &mut index, &mut summary).unwrap();
    index
}

fn render(index: &GroupingIndex, options: ReportOptions) -> String {
    let mut out = Vec::new();
    write_report(index, &options, OutputFormat::Text, &mut out).unwrap();
    String::from_utf8(out).unwrap()
}

/// Two paths on inode 100 (hard link) and one on inode 200 (true duplicate),
/// plus a unique file with another hash.
fn hard_link_scenario() -> GroupingIndex {
    index_from(&[
        line(["h1", HASH_A, "1", "100", "2", "4096", "/x/a"]),
        line(["h1", HASH_A, "1", "100", "2", "4096", "/x/b"]),
        line(["h1", HASH_A, "1", "200", "1", "4096", "/y/c"]),
        line(["h1", HASH_B, "1", "300", "1", "512", "/z/unique"]),
    ])
}

#[test]
fn test_default_mode_reports_true_duplicate_with_hard_links() {
    let index = hard_link_scenario();
    let output = render(&index, ReportOptions::default());

    assert_eq!(
        output,
        format!(
            "\n\
             h1  {HASH_A}        4096         100  /x/a\n\
             h1  {HASH_A}        4096         100  /x/b\n\
             h1  {HASH_A}        4096         200  /y/c\n"
        )
    );
}

#[test]
fn test_list_all_includes_singleton_group() {
    let index = hard_link_scenario();
    let options = ReportOptions {
        list_all: true,
        ..ReportOptions::default()
    };
    let output = render(&index, options);

    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(lines.len(), 4);
    assert!(lines.iter().all(|l| !l.is_empty()));
    assert_eq!(
        lines[3],
        format!("h1  {HASH_B}         512         300  /z/unique")
    );
}

#[test]
fn test_hard_links_alone_are_not_duplicates() {
    let index = index_from(&[
        line(["h1", HASH_A, "1", "100", "3", "10", "/a"]),
        line(["h1", HASH_A, "1", "100", "3", "10", "/b"]),
        line(["h1", HASH_A, "1", "100", "3", "10", "/c"]),
    ]);

    assert_eq!(render(&index, ReportOptions::default()), "");
    assert_eq!(index.stats().duplicate_groups, 0);
}

#[test]
fn test_one_blank_line_precedes_each_group() {
    let index = index_from(&[
        line(["h1", HASH_A, "1", "1", "1", "10", "/a1"]),
        line(["h1", HASH_A, "1", "2", "1", "10", "/a2"]),
        line(["h1", HASH_B, "1", "3", "1", "20", "/b1"]),
        line(["h1", HASH_B, "1", "4", "1", "20", "/b2"]),
    ]);
    let output = render(&index, ReportOptions::default());
    let lines: Vec<&str> = output.lines().collect();

    assert_eq!(lines.len(), 6);
    assert_eq!(lines[0], "");
    assert!(lines[1].ends_with("/a1"));
    assert!(lines[2].ends_with("/a2"));
    assert_eq!(lines[3], "");
    assert!(lines[4].ends_with("/b1"));
    assert!(lines[5].ends_with("/b2"));
}

#[test]
fn test_suppressed_separators() {
    let index = index_from(&[
        line(["h1", HASH_A, "1", "1", "1", "10", "/a1"]),
        line(["h1", HASH_A, "1", "2", "1", "10", "/a2"]),
        line(["h1", HASH_B, "1", "3", "1", "20", "/b1"]),
        line(["h1", HASH_B, "1", "4", "1", "20", "/b2"]),
    ]);
    let options = ReportOptions {
        suppress_separators: true,
        ..ReportOptions::default()
    };
    let output = render(&index, options);

    assert_eq!(output.lines().count(), 4);
    assert!(!output.contains("\n\n"));
    assert!(!output.starts_with('\n'));
}

#[test]
fn test_size_threshold_is_inclusive() {
    let index = index_from(&[
        line(["h1", HASH_A, "1", "1", "1", "4095", "/small1"]),
        line(["h1", HASH_A, "1", "2", "1", "4095", "/small2"]),
        line(["h1", HASH_B, "1", "3", "1", "4096", "/exact1"]),
        line(["h1", HASH_B, "1", "4", "1", "4096", "/exact2"]),
        line(["h1", HASH_C, "1", "5", "1", "8192", "/big1"]),
        line(["h1", HASH_C, "1", "6", "1", "8192", "/big2"]),
    ]);
    let options = ReportOptions {
        min_size: 4096,
        ..ReportOptions::default()
    };

    let selected = select_groups(&index, &options);
    let hashes: Vec<&str> = selected
        .iter()
        .map(|(key, _)| key.content_hash.as_str())
        .collect();
    assert_eq!(hashes, vec![HASH_B, HASH_C]);

    let output = render(&index, options);
    assert!(!output.contains("/small"));
    assert!(output.contains("/exact1"));
    assert!(output.contains("/big2"));
}

#[test]
fn test_size_threshold_applies_in_list_all_mode() {
    let index = index_from(&[
        line(["h1", HASH_A, "1", "1", "1", "10", "/tiny"]),
        line(["h1", HASH_B, "1", "2", "1", "100", "/large"]),
    ]);
    let options = ReportOptions {
        min_size: 50,
        list_all: true,
        suppress_separators: false,
    };

    let output = render(&index, options);
    assert!(!output.contains("/tiny"));
    assert!(output.contains("/large"));
}

#[test]
fn test_same_hash_on_different_hosts_is_not_grouped() {
    let index = index_from(&[
        line(["h1", HASH_A, "1", "100", "1", "10", "/a"]),
        line(["h2", HASH_A, "1", "100", "1", "10", "/a"]),
    ]);

    assert_eq!(index.len(), 2);
    assert_eq!(render(&index, ReportOptions::default()), "");
}

#[test]
fn test_same_hash_on_different_devices_is_not_grouped() {
    let index = index_from(&[
        line(["h1", HASH_A, "1", "100", "1", "10", "/mnt1/a"]),
        line(["h1", HASH_A, "2", "200", "1", "10", "/mnt2/a"]),
    ]);

    assert_eq!(index.len(), 2);
    assert_eq!(render(&index, ReportOptions::default()), "");
}

#[test]
fn test_json_report_structure() {
    let index = hard_link_scenario();
    let mut out = Vec::new();
    let emitted = write_report(&index, &ReportOptions::default(), OutputFormat::Json, &mut out).unwrap();
    assert_eq!(emitted, 1);

    let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
    let groups = value["groups"].as_array().unwrap();
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0]["content_hash"], HASH_A);
    assert_eq!(groups[0]["inode_count"], 2);
    assert_eq!(groups[0]["files"].as_array().unwrap().len(), 3);
    assert_eq!(value["summary"]["emitted_groups"], 1);
    assert_eq!(value["summary"]["duplicate_groups"], 1);
    assert_eq!(value["summary"]["reclaimable_bytes"], 4096);
}

#[test]
fn test_csv_report_rows() {
    let index = hard_link_scenario();
    let mut out = Vec::new();
    write_report(&index, &ReportOptions::default(), OutputFormat::Csv, &mut out).unwrap();

    let text = String::from_utf8(out).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(
        lines[0],
        "group_id,hostname,device_id,content_hash,size_bytes,inode,link_count,path"
    );
    assert_eq!(lines.len(), 4);
    assert!(lines[3].ends_with("200,1,/y/c"));
}
