//! Input-file enumeration.
//!
//! Walks the input directory recursively with the `ignore` walker and
//! returns every regular file, hidden files excluded. Paths come back in
//! lexicographic order so merge results do not depend on directory
//! iteration order; that order decides which file wins name collisions.

use std::path::{Path, PathBuf};

use ignore::WalkBuilder;

use crate::error::{Error, Result};

/// Enumerate candidate input files under `directory`.
pub fn input_files(directory: &Path) -> Result<Vec<PathBuf>> {
    if !directory.is_dir() {
        return Err(Error::Argument(format!(
            "input directory not found: {}",
            directory.display()
        )));
    }

    let walker = WalkBuilder::new(directory)
        .standard_filters(false)
        .hidden(true)
        .build();

    let mut files = Vec::new();
    for entry in walker {
        let entry = entry.map_err(|e| Error::Walk {
            message: e.to_string(),
        })?;
        if entry.file_type().is_some_and(|ft| ft.is_file()) {
            files.push(entry.into_path());
        }
    }

    files.sort();
    Ok(files)
}

#[cfg(test)]
#[path = "discover_tests.rs"]
mod tests;
