//! Behavioral specs for the merge command.
//!
//! Each spec builds a directory of input shards, runs the binary, and
//! inspects the merged report.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use crate::prelude::*;
use tempfile::TempDir;

const CALCULATOR_SHARD: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<testsuites>
  <testsuite name="Calculator">
    <testsuite name="Add">
      <testcase name="addsTwoNumbers" assertions="2"/>
    </testsuite>
  </testsuite>
</testsuites>
"#;

/// Two shards reporting the same suites and case collapse into one suite
/// tree with one surviving test case; the duplicate contributes nothing.
#[test]
fn merges_identical_shards_without_double_counting() {
    let tmp = TempDir::new().unwrap();
    let shards = tmp.path().join("shards");
    std::fs::create_dir(&shards).unwrap();
    write_shard(&shards, "shard-1.xml", CALCULATOR_SHARD);
    write_shard(&shards, "shard-2.xml", CALCULATOR_SHARD);

    let out = tmp.path().join("report.xml");
    merge_to(&shards, &out);

    let report = read_report(&out);
    assert_eq!(report.matches(r#"name="Calculator""#).count(), 1);
    assert_eq!(report.matches(r#"name="Add""#).count(), 1);
    assert_eq!(report.matches("addsTwoNumbers").count(), 1);
    // Both suites carry the aggregated value from the one surviving case.
    assert_eq!(report.matches(r#"assertions="2""#).count(), 3);
}

/// Distinct cases from different shards sum into their shared ancestors.
#[test]
fn aggregates_counters_across_shards() {
    let tmp = TempDir::new().unwrap();
    let shards = tmp.path().join("shards");
    std::fs::create_dir(&shards).unwrap();
    write_shard(
        &shards,
        "shard-1.xml",
        r#"<testsuites>
  <testsuite name="Calculator">
    <testsuite name="Add">
      <testcase name="addsTwoNumbers" assertions="2"/>
    </testsuite>
  </testsuite>
</testsuites>"#,
    );
    write_shard(
        &shards,
        "shard-2.xml",
        r#"<testsuites>
  <testsuite name="Calculator">
    <testsuite name="Add">
      <testcase name="addsNegativeNumbers" assertions="3"/>
    </testsuite>
  </testsuite>
</testsuites>"#,
    );

    let out = tmp.path().join("report.xml");
    merge_to(&shards, &out);

    let report = read_report(&out);
    assert!(report.contains(r#"<testsuite name="Add" assertions="5">"#));
    assert!(report.contains(r#"<testsuite name="Calculator" assertions="5">"#));
}

/// Failure details survive the merge with their exact payload.
#[test]
fn preserves_failure_details() {
    let tmp = TempDir::new().unwrap();
    let shards = tmp.path().join("shards");
    std::fs::create_dir(&shards).unwrap();
    write_shard(
        &shards,
        "shard-1.xml",
        r#"<testsuite name="Add">
  <testcase name="addsTwoNumbers">
    <failure>expected 4 got 3</failure>
  </testcase>
</testsuite>"#,
    );

    let out = tmp.path().join("report.xml");
    merge_to(&shards, &out);

    assert!(read_report(&out).contains("<failure>expected 4 got 3</failure>"));
}

/// Reported counters on top-level suites are zeroed, not trusted.
#[test]
fn zeroes_reported_top_level_counters() {
    let tmp = TempDir::new().unwrap();
    let shards = tmp.path().join("shards");
    std::fs::create_dir(&shards).unwrap();
    write_shard(
        &shards,
        "shard-1.xml",
        r#"<testsuites><testsuite name="Calculator" tests="99"/></testsuites>"#,
    );

    let out = tmp.path().join("report.xml");
    merge_to(&shards, &out);

    let report = read_report(&out);
    assert!(report.contains(r#"tests="0""#));
    assert!(!report.contains(r#"tests="99""#));
}

/// A malformed shard changes nothing: the output equals the merge of the
/// well-formed shards alone, and the exit code stays 0.
#[test]
fn skips_malformed_shards() {
    let tmp = TempDir::new().unwrap();

    let clean = tmp.path().join("clean");
    std::fs::create_dir(&clean).unwrap();
    write_shard(&clean, "shard-1.xml", CALCULATOR_SHARD);

    let mixed = tmp.path().join("mixed");
    std::fs::create_dir(&mixed).unwrap();
    write_shard(&mixed, "shard-1.xml", CALCULATOR_SHARD);
    write_shard(&mixed, "shard-2.xml", "<testsuite name=\"Broken\"><unclosed>");

    let clean_out = tmp.path().join("clean.xml");
    let mixed_out = tmp.path().join("mixed.xml");
    merge_to(&clean, &clean_out);
    merge_to(&mixed, &mixed_out);

    assert_eq!(read_report(&clean_out), read_report(&mixed_out));
}

/// An empty input directory still produces a report: an empty container.
#[test]
fn empty_directory_produces_empty_container() {
    let tmp = TempDir::new().unwrap();
    let shards = tmp.path().join("shards");
    std::fs::create_dir(&shards).unwrap();

    let out = tmp.path().join("report.xml");
    merge_to(&shards, &out);

    assert!(read_report(&out).contains("<testsuites/>"));
}

/// A directory with only unparseable files behaves like an empty one.
#[test]
fn unparseable_only_directory_produces_empty_container() {
    let tmp = TempDir::new().unwrap();
    let shards = tmp.path().join("shards");
    std::fs::create_dir(&shards).unwrap();
    write_shard(&shards, "bad.xml", "<testsuite name=\"Broken\"><unclosed>");

    let out = tmp.path().join("report.xml");
    merge_to(&shards, &out);

    assert!(read_report(&out).contains("<testsuites/>"));
}

/// Parent directories of the output path are created as needed.
#[test]
fn creates_missing_output_directories() {
    let tmp = TempDir::new().unwrap();
    let shards = tmp.path().join("shards");
    std::fs::create_dir(&shards).unwrap();
    write_shard(&shards, "shard-1.xml", CALCULATOR_SHARD);

    let out = tmp.path().join("reports").join("nightly").join("report.xml");
    merge_to(&shards, &out);

    assert!(out.exists());
}

/// A missing input directory is a usage error.
#[test]
fn missing_input_directory_fails() {
    let tmp = TempDir::new().unwrap();
    let out = tmp.path().join("report.xml");

    shardmerge_cmd()
        .arg("merge")
        .arg(tmp.path().join("absent"))
        .arg(&out)
        .assert()
        .code(2)
        .stderr(predicates::str::contains("argument error"));
    assert!(!out.exists());
}

/// Feeding a merged report back through the merge reproduces it exactly.
#[test]
fn merge_is_idempotent() {
    let tmp = TempDir::new().unwrap();
    let shards = tmp.path().join("shards");
    std::fs::create_dir(&shards).unwrap();
    write_shard(&shards, "shard-1.xml", CALCULATOR_SHARD);
    write_shard(
        &shards,
        "shard-2.xml",
        r#"<testsuite name="Parser">
  <testcase name="parsesEmptyInput" assertions="1" time="0.25">
    <skipped/>
  </testcase>
</testsuite>"#,
    );

    let first_out = tmp.path().join("first.xml");
    merge_to(&shards, &first_out);

    let again = tmp.path().join("again");
    std::fs::create_dir(&again).unwrap();
    std::fs::copy(&first_out, again.join("report.xml")).unwrap();
    let second_out = tmp.path().join("second.xml");
    merge_to(&again, &second_out);

    assert_eq!(read_report(&first_out), read_report(&second_out));
}
