//! Input file selection.
//!
//! Runs produced by the sampler are saved as `n_{dimension}_i_{iterations}_<tag>.npy`.
//! [`matches`] is the pure name predicate; [`select_files`] applies it to a
//! directory listing.
use crate::error::{HistogramError, Result};
use log::debug;
use std::fs;
use std::path::{Path, PathBuf};

pub const ARRAY_EXTENSION: &str = ".npy";

/// True if `filename` matches `n_{dimension}_i_{iterations}_*.npy`.
pub fn matches(filename: &str, dimension: usize, iterations: u64) -> bool {
    let prefix = format!("n_{dimension}_i_{iterations}_");
    filename.len() >= prefix.len() + ARRAY_EXTENSION.len()
        && filename.starts_with(&prefix)
        && filename.ends_with(ARRAY_EXTENSION)
}

/// List the input files of `dir`, sorted by path.
///
/// With `filter` set only entries whose name passes [`matches`] are kept;
/// otherwise every entry is returned. Symlinks are kept like any other
/// entry and resolved when the array is read.
pub fn select_files(
    dir: &Path,
    filter: bool,
    dimension: usize,
    iterations: u64,
) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(dir).map_err(|e| HistogramError::io(dir, e))?;
    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| HistogramError::io(dir, e))?;
        let path = entry.path();
        if filter
            && !entry
                .file_name()
                .to_str()
                .is_some_and(|name| matches(name, dimension, iterations))
        {
            continue;
        }
        files.push(path);
    }
    files.sort();
    debug!(
        "select_files dir={} filter={} selected={}",
        dir.display(),
        filter,
        files.len()
    );
    if files.is_empty() {
        return Err(HistogramError::NoInputFiles {
            dir: dir.to_path_buf(),
        });
    }
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_expected_names() {
        assert!(matches("n_100_i_1002_0.npy", 100, 1002));
        assert!(matches("n_100_i_1002_seed42_run.npy", 100, 1002));
        assert!(matches("n_100_i_1002_.npy", 100, 1002));
    }

    #[test]
    fn rejects_other_parameters_and_extensions() {
        assert!(!matches("n_10_i_1002_0.npy", 100, 1002));
        assert!(!matches("n_100_i_100_0.npy", 100, 1002));
        assert!(!matches("n_100_i_10020_0.npy", 100, 1002));
        assert!(!matches("n_100_i_1002_0.npz", 100, 1002));
        assert!(!matches("n_100_i_1002_0.npy.bak", 100, 1002));
        assert!(!matches("x_n_100_i_1002_0.npy", 100, 1002));
    }

    #[test]
    fn prefix_and_extension_may_not_overlap() {
        // "n_1_i_1_" followed directly by "npy" without the dot.
        assert!(!matches("n_1_i_1_npy", 1, 1));
        assert!(!matches("n_1_i_1.npy", 1, 1));
    }
}
