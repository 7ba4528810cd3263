use anyhow::{Context, Result};
use log::{debug, info, warn};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use crate::package::{find_package_archives, index_package_paths};
use crate::runtime::{Runtime, relative_symlink_path};

/// Directory holding every package archive of a repository.
pub const ALL_DIR: &str = "All";
/// Directory holding one link per package name to its newest archive.
pub const LATEST_DIR: &str = "Latest";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LatestLink {
    pub name: String,
    /// Path of the link inside `Latest/`.
    pub link: PathBuf,
    /// Relative target stored in the link.
    pub target: PathBuf,
}

/// Point `<repo>/Latest/<name>.<ext>` at the newest archive of each package
/// in `<repo>/All/`.
///
/// Links that already point at the right archive are left alone. Links into
/// `All/` for packages that are gone are removed. Anything in `Latest/` that
/// is not a symlink is never touched.
#[tracing::instrument(skip(runtime))]
pub fn update_latest_links<R: Runtime>(runtime: &R, repo: &Path) -> Result<Vec<LatestLink>> {
    let all_dir = repo.join(ALL_DIR);
    let latest_dir = repo.join(LATEST_DIR);

    let index = index_package_paths(find_package_archives(runtime, &all_dir)?);
    runtime.create_dir_all(&latest_dir)?;

    let mut links = Vec::new();
    for (name, archives) in &index {
        let Some(newest) = archives.first() else {
            continue;
        };
        let extension = newest
            .path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or("pkg");
        let link = latest_dir.join(format!("{}.{}", name, extension));
        let target = relative_symlink_path(&link, &newest.path).with_context(|| {
            format!("Cannot link {:?} to {:?} relatively", link, newest.path)
        })?;

        if runtime.is_symlink(&link) {
            let current = runtime.read_link(&link).ok();
            if current.as_deref() == Some(target.as_path()) {
                debug!("{:?} already points at {:?}", link, target);
                links.push(LatestLink {
                    name: name.clone(),
                    link,
                    target,
                });
                continue;
            }
            runtime.remove_symlink(&link)?;
        } else if runtime.exists(&link) {
            warn!("Not replacing {:?}: it is not a symlink", link);
            continue;
        }

        info!("Linking {:?} -> {:?}", link, target);
        runtime.symlink(&target, &link)?;
        links.push(LatestLink {
            name: name.clone(),
            link,
            target,
        });
    }

    remove_stale_links(runtime, &latest_dir, &all_dir, &links)?;
    Ok(links)
}

/// Remove symlinks in `latest_dir` that point into `all_dir` but are not
/// among `kept`.
fn remove_stale_links<R: Runtime>(
    runtime: &R,
    latest_dir: &Path,
    all_dir: &Path,
    kept: &[LatestLink],
) -> Result<()> {
    let kept: BTreeSet<&Path> = kept.iter().map(|l| l.link.as_path()).collect();
    let Some(all_prefix) = relative_symlink_path(&latest_dir.join("_"), all_dir) else {
        return Ok(());
    };

    for entry in runtime.read_dir(latest_dir)? {
        if kept.contains(entry.as_path()) || !runtime.is_symlink(&entry) {
            continue;
        }
        let Ok(target) = runtime.read_link(&entry) else {
            continue;
        };
        if target.starts_with(&all_prefix) {
            info!("Removing stale link {:?}", entry);
            runtime.remove_symlink(&entry)?;
        }
    }
    Ok(())
}
