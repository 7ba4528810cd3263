//! Repository catalogue maintenance.
//!
//! Building and signing the catalogue is delegated to a [`CatalogueBackend`].
//! [`refresh_catalogue`] drives the two backend phases and then rebuilds the
//! `Latest/` links of the package tree.

mod latest_links;
mod pkg_command;

use anyhow::Context;
use log::{debug, info};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::runtime::Runtime;

pub use latest_links::{ALL_DIR, LATEST_DIR, LatestLink, update_latest_links};
pub use pkg_command::PkgRepoCommand;

/// Meta file picked up from the repository root when none is given.
pub const DEFAULT_META_FILE: &str = "meta.conf";

/// Callback answering a passphrase request for a key identifier. `None`
/// means no secret is available.
pub type PasswordSupplier<'a> = &'a dyn Fn(&str) -> Option<String>;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HashOptions {
    /// Name packages by content hash.
    pub hash: bool,
    /// Also create symlinks from the plain names to the hashed ones.
    pub hash_symlink: bool,
}

/// Inputs of the catalogue creation phase.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateOptions {
    pub path: PathBuf,
    pub output_dir: Option<PathBuf>,
    pub include_filelist: bool,
    pub meta_file: Option<PathBuf>,
    pub hash: Option<HashOptions>,
}

impl CreateOptions {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ..Default::default()
        }
    }

    /// Where the catalogue is written; the repository itself unless set.
    pub fn output_dir(&self) -> &Path {
        self.output_dir.as_deref().unwrap_or(&self.path)
    }
}

/// The external catalogue builder.
///
/// `finish_repository` must follow a successful `create_repository` for the
/// same output directory. The password supplier is only borrowed for the
/// duration of the call.
pub trait CatalogueBackend {
    fn create_repository(&self, options: &CreateOptions) -> anyhow::Result<()>;

    fn finish_repository(
        &self,
        output_dir: &Path,
        password: Option<PasswordSupplier<'_>>,
        signing_key: Option<&str>,
    ) -> anyhow::Result<()>;
}

/// A failed refresh, tagged with the phase that failed. The backend's
/// message is kept verbatim.
#[derive(Debug, Error)]
pub enum CatalogueError {
    #[error("Cannot create repository catalogue: {0:#}")]
    Create(anyhow::Error),
    #[error("Cannot finish repository catalogue: {0:#}")]
    Finish(anyhow::Error),
    #[error("Cannot update Latest links: {0:#}")]
    Links(anyhow::Error),
}

#[derive(Debug, Clone, Default)]
pub struct RefreshOptions {
    pub create: CreateOptions,
    pub signing_key: Option<String>,
    pub update_latest: bool,
}

/// Create and finish the catalogue, then rebuild `Latest/` if requested.
///
/// Returns the links that now exist in `Latest/` (empty when links are not
/// updated).
#[tracing::instrument(skip(backend, runtime, password))]
pub fn refresh_catalogue<B, R>(
    backend: &B,
    runtime: &R,
    options: &RefreshOptions,
    password: Option<PasswordSupplier<'_>>,
) -> Result<Vec<LatestLink>, CatalogueError>
where
    B: CatalogueBackend + ?Sized,
    R: Runtime,
{
    let mut create = options.create.clone();
    if create.meta_file.is_none() {
        let default_meta = create.path.join(DEFAULT_META_FILE);
        if runtime.exists(&default_meta) {
            debug!("Using meta file {:?}", default_meta);
            create.meta_file = Some(default_meta);
        }
    }

    info!("Creating catalogue for {:?}", create.path);
    backend
        .create_repository(&create)
        .map_err(CatalogueError::Create)?;

    info!("Finishing catalogue in {:?}", create.output_dir());
    backend
        .finish_repository(create.output_dir(), password, options.signing_key.as_deref())
        .map_err(CatalogueError::Finish)?;

    if !options.update_latest {
        return Ok(Vec::new());
    }

    update_latest_links(runtime, &create.path)
        .with_context(|| format!("Failed to update links under {:?}", create.path))
        .map_err(CatalogueError::Links)
}
