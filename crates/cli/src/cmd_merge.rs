// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Merge command implementation.

use shardmerge::cli::MergeArgs;
use shardmerge::merge::Merger;
use shardmerge::{discover, reader, writer};

/// Run the merge command: enumerate, parse, fold, finalize, write.
pub fn run(args: &MergeArgs) -> anyhow::Result<()> {
    let files = discover::input_files(&args.directory)?;
    tracing::debug!(count = files.len(), "discovered input files");

    let mut merger = Merger::new();
    for path in &files {
        match reader::read_document(path) {
            Ok(document) => {
                tracing::debug!(
                    path = %path.display(),
                    suites = document.suites.len(),
                    "folding document"
                );
                merger.fold(&document);
            }
            Err(err) => {
                // The merge is opportunistic: unparseable shards are
                // skipped without failing the run.
                tracing::debug!(path = %path.display(), error = %err, "skipping file");
            }
        }
    }

    let tree = merger.finalize();
    writer::write_tree(&tree, &args.file)?;
    Ok(())
}
