//! Regular-file traversal.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::ScanError;

/// Yields every regular file under `root`, sorted by file name per directory.
///
/// Directories are skipped, and so are symbolic links unless `follow_links`
/// is set. Any walk error, including an unreadable or missing root, is
/// yielded as [`ScanError::Traversal`]. A root that is not a directory is
/// yielded as [`ScanError::NotADirectory`].
pub fn walk_files(
    root: impl AsRef<Path>,
    follow_links: bool,
) -> impl Iterator<Item = Result<PathBuf, ScanError>> {
    let root = root.as_ref().to_path_buf();
    WalkDir::new(&root)
        .follow_links(follow_links)
        .sort_by_file_name()
        .into_iter()
        .filter_map(move |entry| match entry {
            Ok(entry) if entry.depth() == 0 && !entry.file_type().is_dir() => {
                Some(Err(ScanError::NotADirectory { root: root.clone() }))
            }
            Ok(entry) if entry.file_type().is_file() => Some(Ok(entry.into_path())),
            Ok(_) => None,
            Err(source) => Some(Err(ScanError::Traversal {
                root: root.clone(),
                source,
            })),
        })
}
