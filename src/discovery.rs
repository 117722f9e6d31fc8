//! Expansion of input patterns into source/target file pairs

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use globset::GlobBuilder;
use walkdir::WalkDir;

use crate::error::{Result, StyleDiffError};

/// One file to check and the place its reformatted copy lives
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct FilePair {
    /// Absolute path of the original file
    pub source: PathBuf,
    /// Absolute path of the formatter output for it
    pub target: PathBuf,
    /// Path of the file relative to the source root
    pub relative: PathBuf,
}

impl FilePair {
    #[must_use]
    pub fn new(source_root: &Path, output_directory: &Path, relative: PathBuf) -> Self {
        Self {
            source: source_root.join(&relative),
            target: output_directory.join(&relative),
            relative,
        }
    }
}

/// Resolve `path` against `base` unless it is already absolute
#[must_use]
pub fn absolutize(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

/// Expand glob patterns into sorted, de-duplicated file pairs
///
/// Patterns are relative to `source_root`; `*` stops at path separators and
/// `**` crosses them. Files inside `output_directory` are never picked up.
/// A pattern naming an existing file is taken literally.
pub fn discover_files(
    source_root: &Path,
    patterns: &[String],
    output_directory: &Path,
) -> Result<Vec<FilePair>> {
    let output_directory = absolutize(source_root, output_directory);
    let mut found: BTreeSet<PathBuf> = BTreeSet::new();

    for pattern in patterns {
        let matches = expand_pattern(source_root, pattern, &output_directory)?;
        if matches.is_empty() {
            log::warn!("No files found for input pattern {pattern}");
        }
        found.extend(matches);
    }

    if found.is_empty() {
        return Err(StyleDiffError::NoFilesFound);
    }

    Ok(found
        .into_iter()
        .map(|relative| FilePair::new(source_root, &output_directory, relative))
        .collect())
}

fn expand_pattern(
    source_root: &Path,
    pattern: &str,
    output_directory: &Path,
) -> Result<Vec<PathBuf>> {
    let literal = absolutize(source_root, Path::new(pattern));
    if literal.is_file() {
        let relative = literal
            .strip_prefix(source_root)
            .map_err(|_| StyleDiffError::PathOutsideRoot {
                path: literal.clone(),
                root: source_root.to_path_buf(),
            })?;
        return Ok(vec![relative.to_path_buf()]);
    }

    let matcher = GlobBuilder::new(pattern)
        .literal_separator(true)
        .build()
        .map_err(|source| StyleDiffError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })?
        .compile_matcher();

    let mut matches = Vec::new();
    for entry in WalkDir::new(source_root)
        .follow_links(false)
        .into_iter()
        .filter_entry(|e| e.path() != output_directory)
        .filter_map(|e| e.ok())
    {
        if !entry.file_type().is_file() {
            continue;
        }
        let Ok(relative) = entry.path().strip_prefix(source_root) else {
            continue;
        };
        if matcher.is_match(relative) {
            matches.push(relative.to_path_buf());
        }
    }

    Ok(matches)
}
