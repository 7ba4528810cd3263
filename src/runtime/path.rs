//! Path helpers for link targets.

use std::path::{Path, PathBuf};

/// Compute the target to store in a symlink at `from_link` so that it
/// resolves to `to_target`, relative to the link's directory.
///
/// Returns `None` when no relative path exists (e.g. different prefixes on
/// Windows).
pub fn relative_symlink_path(from_link: &Path, to_target: &Path) -> Option<PathBuf> {
    let from_dir = from_link.parent()?;
    let result = pathdiff::diff_paths(to_target, from_dir)?;

    if result.is_absolute() {
        return None;
    }

    Some(result)
}
