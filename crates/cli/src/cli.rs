// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! CLI argument parsing with clap derive.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Merges sharded JUnit XML test reports into one consolidated report
#[derive(Parser)]
#[command(name = "shardmerge")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Merge the JUnit XML files found in a directory into a single file
    Merge(MergeArgs),
}

#[derive(clap::Args)]
pub struct MergeArgs {
    /// The directory containing JUnit XML files
    #[arg(value_name = "DIRECTORY")]
    pub directory: PathBuf,

    /// The file where to write the merged result
    #[arg(value_name = "FILE")]
    pub file: PathBuf,
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
