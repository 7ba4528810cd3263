use anyhow::Result;
use log::debug;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::runtime::Runtime;
use crate::version;

use super::PackageName;

/// File extensions the FreeBSD package tools have used for package archives.
const ARCHIVE_EXTENSIONS: &[&str] = &["pkg", "txz", "tzst", "tgz", "tbz", "tar"];

/// One archive of a package, as found on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexedPackage {
    pub full_version: String,
    pub path: PathBuf,
}

/// Archives grouped by package name. Each list is ordered newest first.
pub type PackageIndex = BTreeMap<String, Vec<IndexedPackage>>;

/// Find package archives directly inside `dir`.
///
/// Directory structure: `<dir>/<name>-<version>.<ext>`
#[tracing::instrument(skip(runtime, dir))]
pub fn find_package_archives<R: Runtime>(runtime: &R, dir: &Path) -> Result<Vec<PathBuf>> {
    if !runtime.exists(dir) {
        return Ok(Vec::new());
    }

    let archives = runtime
        .read_dir(dir)?
        .into_iter()
        .filter(|path| !runtime.is_dir(path))
        .filter(|path| {
            path.extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| ARCHIVE_EXTENSIONS.contains(&ext))
        })
        .collect();

    Ok(archives)
}

/// Group archive paths by the package name in their file stem.
///
/// Paths whose stem is not `name-version` are skipped. Within a name, ties
/// between equal versions keep discovery order.
pub fn index_package_paths<I>(paths: I) -> PackageIndex
where
    I: IntoIterator<Item = PathBuf>,
{
    let mut index = PackageIndex::new();

    for path in paths {
        let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
            debug!("Skipping {:?}: file name is not valid UTF-8", path);
            continue;
        };
        let parts = match PackageName::parse(stem) {
            Ok(parts) => parts,
            Err(e) => {
                debug!("Skipping {:?}: {}", path, e);
                continue;
            }
        };

        index.entry(parts.name).or_default().push(IndexedPackage {
            full_version: parts.full_version,
            path,
        });
    }

    for versions in index.values_mut() {
        versions.sort_by(|a, b| version::compare(&b.full_version, &a.full_version));
    }

    index
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::MockRuntime;
    use mockall::predicate::eq;

    #[test]
    fn test_index_groups_by_name_newest_first() {
        let index = index_package_paths(vec![
            PathBuf::from("/repo/All/curl-8.4.0.pkg"),
            PathBuf::from("/repo/All/curl-8.10.1.pkg"),
            PathBuf::from("/repo/All/git-2.43.0_1.pkg"),
            PathBuf::from("/repo/All/curl-8.5.0_2.pkg"),
        ]);

        assert_eq!(index.len(), 2);
        let curl: Vec<&str> = index["curl"]
            .iter()
            .map(|p| p.full_version.as_str())
            .collect();
        assert_eq!(curl, ["8.10.1", "8.5.0_2", "8.4.0"]);
        assert_eq!(index["git"][0].path, PathBuf::from("/repo/All/git-2.43.0_1.pkg"));
    }

    #[test]
    fn test_index_names_with_dashes() {
        let index = index_package_paths(vec![
            PathBuf::from("py311-pip-23.3.1.pkg"),
            PathBuf::from("py311-pip-24.0,1.pkg"),
        ]);
        assert_eq!(index["py311-pip"][0].full_version, "24.0,1");
    }

    #[test]
    fn test_index_keeps_discovery_order_on_ties() {
        let index = index_package_paths(vec![
            PathBuf::from("a/foo-1.09.pkg"),
            PathBuf::from("b/foo-1.9.pkg"),
        ]);
        assert_eq!(index["foo"][0].path, PathBuf::from("a/foo-1.09.pkg"));
    }

    #[test]
    fn test_index_skips_unparseable_stems() {
        let index = index_package_paths(vec![
            PathBuf::from("/repo/All/meta.conf"),
            PathBuf::from("/repo/All/foo-1.0.pkg"),
        ]);
        assert_eq!(index.keys().collect::<Vec<_>>(), ["foo"]);
    }

    #[test]
    fn test_find_package_archives() {
        let mut runtime = MockRuntime::new();
        let dir = PathBuf::from("/repo/All");

        runtime
            .expect_exists()
            .with(eq(dir.clone()))
            .returning(|_| true);
        runtime.expect_read_dir().with(eq(dir.clone())).returning(|_| {
            Ok(vec![
                PathBuf::from("/repo/All/foo-1.0.pkg"),
                PathBuf::from("/repo/All/bar-2.0.txz"),
                PathBuf::from("/repo/All/README"),
                PathBuf::from("/repo/All/sub.pkg"),
            ])
        });
        runtime
            .expect_is_dir()
            .with(eq(PathBuf::from("/repo/All/sub.pkg")))
            .returning(|_| true);
        runtime.expect_is_dir().returning(|_| false);

        let archives = find_package_archives(&runtime, &dir).unwrap();
        assert_eq!(
            archives,
            vec![
                PathBuf::from("/repo/All/foo-1.0.pkg"),
                PathBuf::from("/repo/All/bar-2.0.txz"),
            ]
        );
    }

    #[test]
    fn test_find_package_archives_missing_dir() {
        let mut runtime = MockRuntime::new();
        runtime.expect_exists().returning(|_| false);

        let archives = find_package_archives(&runtime, Path::new("/nope")).unwrap();
        assert!(archives.is_empty());
    }
}
