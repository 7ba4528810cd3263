mod compression;
mod manifest;

use crate::package::PackageDescriptor;
use crate::runtime::Runtime;
use anyhow::{Context, Result, bail};
use log::debug;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

pub use compression::Compression;
pub use manifest::{Dependency, MANIFEST_ENTRIES, Manifest};

/// Capability to read the name and version of a package archive.
#[cfg_attr(test, mockall::automock)]
pub trait PackageOpener {
    /// Open the archive at `path` and read its descriptor. Any handle on the
    /// archive is released before this returns.
    fn open(&self, path: &Path) -> Result<PackageDescriptor>;
}

/// Opens FreeBSD package archives: a tar stream, optionally compressed with
/// gzip, zstd, xz or bzip2, holding a JSON manifest entry.
pub struct ArchiveOpener<R: Runtime> {
    runtime: R,
}

impl<R: Runtime> ArchiveOpener<R> {
    pub fn new(runtime: R) -> Self {
        Self { runtime }
    }

    /// Read the manifest of the package at `path`.
    #[tracing::instrument(skip(self))]
    pub fn manifest(&self, path: &Path) -> Result<Manifest> {
        let file = self
            .runtime
            .open(path)
            .with_context(|| format!("Failed to open package at {:?}", path))?;

        let mut reader = BufReader::new(file);
        let head = reader
            .fill_buf()
            .with_context(|| format!("Failed to read package {:?}", path))?;
        let compression = Compression::detect(head);
        debug!("Package {:?} compression: {:?}", path, compression);

        let mut archive = tar::Archive::new(compression.decoder(reader)?);
        let entries = archive
            .entries()
            .with_context(|| format!("Failed to read tar entries of {:?}", path))?;

        for entry in entries {
            let mut entry = entry.with_context(|| format!("Corrupt tar entry in {:?}", path))?;
            let entry_path = entry.path()?.into_owned();
            let entry_name = entry_path.to_string_lossy();
            let entry_name = entry_name.trim_start_matches("./").trim_start_matches('/');

            if !MANIFEST_ENTRIES.contains(&entry_name) {
                continue;
            }

            let mut content = String::new();
            entry
                .read_to_string(&mut content)
                .with_context(|| format!("Failed to read {} from {:?}", entry_name, path))?;
            return serde_json::from_str(&content)
                .with_context(|| format!("Invalid {} in {:?}", entry_name, path));
        }

        bail!("No package manifest found in {:?}", path)
    }
}

impl<R: Runtime> PackageOpener for ArchiveOpener<R> {
    fn open(&self, path: &Path) -> Result<PackageDescriptor> {
        let manifest = self.manifest(path)?;
        Ok(PackageDescriptor::new(manifest.name, manifest.version))
    }
}
