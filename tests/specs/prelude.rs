//! Test helpers for behavioral specifications.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

pub use assert_cmd::prelude::*;
pub use predicates;
use std::path::Path;
use std::process::Command;

/// Returns a Command configured to run the shardmerge binary
pub fn shardmerge_cmd() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("shardmerge"))
}

/// Write one input shard into `dir`.
pub fn write_shard(dir: &Path, name: &str, xml: &str) {
    std::fs::write(dir.join(name), xml).unwrap();
}

/// Run `merge` over `dir` writing to `out`, asserting exit code 0.
pub fn merge_to(dir: &Path, out: &Path) {
    shardmerge_cmd()
        .arg("merge")
        .arg(dir)
        .arg(out)
        .assert()
        .success();
}

/// Read the merged report back as a string.
pub fn read_report(path: &Path) -> String {
    std::fs::read_to_string(path).unwrap()
}
