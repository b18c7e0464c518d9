//! File selection by glob pattern
//!
//! The base directory may be a glob itself. Non-recursive selection looks only
//! at entries directly inside each base directory. Recursive selection walks the whole tree and matches the pattern
//! against the trailing components of each file's path, so `*.rs` finds Rust
//! files at every depth, the top level included.

use crate::error::{ReplaceError, Result};
use glob::{MatchOptions, Pattern};
use std::io::Write;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

/// Expand a leading `~` in a user-supplied directory.
pub fn expand_directory(directory: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(directory).into_owned())
}

/// Select regular files under `directory` whose names match `file_pattern`.
///
/// `directory` may itself be a glob (`projects/*`); every directory it
/// matches is searched. Returns a lexicographically sorted list. A missing
/// directory is an error here; [`find_files`] turns it into a diagnostic and
/// an empty list.
pub fn select_files(file_pattern: &str, directory: &Path, recursive: bool) -> Result<Vec<PathBuf>> {
    let bases = base_directories(directory)?;

    let glob_source = if recursive {
        format!("**/{}", file_pattern)
    } else {
        file_pattern.to_string()
    };
    let pattern = Pattern::new(&glob_source).map_err(|e| ReplaceError::InvalidGlob {
        pattern: file_pattern.to_string(),
        message: e.msg.to_string(),
    })?;

    let max_depth = if recursive { usize::MAX } else { pattern_depth(file_pattern) };

    tracing::debug!(
        "Selecting '{}' in {} (recursive: {}, {} base dir(s))",
        file_pattern,
        directory.display(),
        recursive,
        bases.len()
    );

    let mut files = Vec::new();
    for base in &bases {
        collect_matching(&pattern, base, max_depth, &mut files);
    }

    files.sort_by(|a, b| a.as_os_str().cmp(b.as_os_str()));
    files.dedup();
    tracing::debug!("Selected {} file(s)", files.len());
    Ok(files)
}

/// The directories to search: `directory` itself, or what it expands to as a glob
fn base_directories(directory: &Path) -> Result<Vec<PathBuf>> {
    if directory.is_dir() {
        return Ok(vec![directory.to_path_buf()]);
    }

    let source = directory.to_string_lossy();
    if !source.contains(['*', '?', '[']) {
        return Err(ReplaceError::DirectoryNotFound(directory.to_path_buf()));
    }

    let entries = glob::glob_with(&source, MATCH_OPTIONS).map_err(|e| ReplaceError::InvalidGlob {
        pattern: source.to_string(),
        message: e.msg.to_string(),
    })?;

    let bases: Vec<PathBuf> = entries
        .filter_map(|entry| match entry {
            Ok(path) => Some(path),
            Err(err) => {
                tracing::warn!("Skipping unreadable path: {}", err);
                None
            }
        })
        .filter(|path| path.is_dir())
        .collect();

    if bases.is_empty() {
        return Err(ReplaceError::DirectoryNotFound(directory.to_path_buf()));
    }
    Ok(bases)
}

fn collect_matching(pattern: &Pattern, base: &Path, max_depth: usize, files: &mut Vec<PathBuf>) {
    for entry in WalkDir::new(base).min_depth(1).max_depth(max_depth) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                tracing::warn!("Skipping unreadable entry: {}", err);
                continue;
            }
        };

        let path = entry.path();
        // follows symlinks, like the rest of the file handling
        if !path.is_file() {
            continue;
        }

        let Ok(relative) = path.strip_prefix(base) else {
            continue;
        };
        if pattern.matches_path_with(relative, MATCH_OPTIONS) {
            files.push(path.to_path_buf());
        }
    }
}

/// Like [`select_files`], but reports selection problems to `diagnostics`
/// and returns an empty list instead of failing.
pub fn find_files(
    file_pattern: &str,
    directory: &Path,
    recursive: bool,
    diagnostics: &mut dyn Write,
) -> Vec<PathBuf> {
    match select_files(file_pattern, directory, recursive) {
        Ok(files) => files,
        Err(err) => {
            let _ = writeln!(diagnostics, "Error: {}", err);
            Vec::new()
        }
    }
}

/// Number of path components a non-recursive pattern can span
fn pattern_depth(file_pattern: &str) -> usize {
    file_pattern.split('/').filter(|part| !part.is_empty()).count().max(1)
}
