//! Package module
//!
//! Package descriptors, package file name parsing, version-ordered indexing
//! of archive directories and latest-version selection.

mod discovery;
mod latest;
mod name;

pub use discovery::{IndexedPackage, PackageIndex, find_package_archives, index_package_paths};
pub use latest::{LatestSelection, ScanError, select_latest};
pub use name::{PackageName, ParseError};

use crate::version;

/// The `{name, version}` pair read from an opened package archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageDescriptor {
    pub name: String,
    pub version: String,
}

impl PackageDescriptor {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }
}

/// Sort version strings oldest first, or newest first with `reverse`.
///
/// The sort is stable: versions that compare equal keep their input order.
pub fn sort_by_version<T: AsRef<str>>(items: &mut [T], reverse: bool) {
    items.sort_by(|a, b| {
        let ordering = version::compare(a.as_ref(), b.as_ref());
        if reverse { ordering.reverse() } else { ordering }
    });
}
