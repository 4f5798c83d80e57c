//! Fragment file discovery.

use std::path::{
    Path,
    PathBuf,
};

use globset::{
    Glob,
    GlobSet,
    GlobSetBuilder,
};
use ignore::WalkBuilder;

use crate::compiler::types::CompileError;

/// Find translation fragment files under a source root.
///
/// Walks the tree (gitignore-aware, no symlink following) and matches each
/// file's path relative to `source_root` against the include and exclude
/// glob sets.
///
/// The returned list is sorted lexicographically by path. Merge order,
/// manifest order and output bytes all derive from this order, so repeated
/// runs over the same tree are deterministic regardless of filesystem
/// enumeration order.
///
/// # Errors
/// Returns `CompileError::InvalidPattern` for an unparsable glob.
pub fn find_fragment_files(
    source_root: &Path,
    include_patterns: &[String],
    exclude_patterns: &[String],
) -> Result<Vec<PathBuf>, CompileError> {
    let include_set = build_glob_set(include_patterns)?;
    let exclude_set = build_glob_set(exclude_patterns)?;

    let mut found_files = Vec::new();

    for result in WalkBuilder::new(source_root)
        .hidden(false)
        .git_ignore(true)
        .git_global(true)
        .git_exclude(true)
        .follow_links(false)
        .build()
    {
        let entry = match result {
            Ok(entry) => entry,
            Err(err) => {
                tracing::debug!(?err, "Failed to read directory entry");
                continue;
            }
        };

        if !entry.file_type().is_some_and(|ft| ft.is_file()) {
            continue;
        }

        let path = entry.path();

        let Ok(relative_path) = path.strip_prefix(source_root) else {
            continue;
        };
        if !include_set.is_match(relative_path) || exclude_set.is_match(relative_path) {
            continue;
        }

        found_files.push(path.to_path_buf());
    }

    found_files.sort();

    tracing::debug!(count = found_files.len(), "Discovered fragment files");

    Ok(found_files)
}

/// Build a `GlobSet` from a list of patterns.
fn build_glob_set(patterns: &[String]) -> Result<GlobSet, CompileError> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = Glob::new(pattern)
            .map_err(|source| CompileError::InvalidPattern { pattern: pattern.clone(), source })?;
        builder.add(glob);
    }
    builder.build().map_err(|source| CompileError::InvalidPattern {
        pattern: patterns.join(", "),
        source,
    })
}
