//! Latest-version selection over a stream of candidate archives.

use log::debug;
use std::io;
use std::path::Path;
use thiserror::Error;

use crate::archive::PackageOpener;
use crate::version;

#[derive(Debug, Error)]
pub enum ScanError {
    /// The candidate list itself could not be read. Distinct from a scan
    /// that completed without a match.
    #[error("failed to read candidate list: {0}")]
    Read(#[from] io::Error),
}

/// Running maximum of a latest-version scan.
///
/// Starts from the empty version, which every non-empty version beats.
/// Only a strictly greater version replaces the held best, so among equal
/// versions the first one offered wins.
#[derive(Debug, Clone)]
pub struct LatestSelection<L> {
    best_version: String,
    best: Option<L>,
}

impl<L> Default for LatestSelection<L> {
    fn default() -> Self {
        Self::new()
    }
}

impl<L> LatestSelection<L> {
    pub fn new() -> Self {
        Self {
            best_version: String::new(),
            best: None,
        }
    }

    /// Offer a candidate. Returns true if it became the new best.
    pub fn offer(&mut self, version: &str, locator: L) -> bool {
        if !version::is_newer(&self.best_version, version) {
            return false;
        }
        self.best_version = version.to_string();
        self.best = Some(locator);
        true
    }

    pub fn best(&self) -> Option<&L> {
        self.best.as_ref()
    }

    /// Version of the held best; empty while nothing has matched.
    pub fn best_version(&self) -> &str {
        &self.best_version
    }

    pub fn into_best(self) -> Option<L> {
        self.best
    }
}

/// Pick the newest archive named `target_name` from `candidates`.
///
/// Candidates are consumed lazily, once, in order, and each is opened once.
/// A candidate that fails to open or has another name is skipped. A failure
/// to read the candidate sequence itself ends the scan with
/// [`ScanError::Read`]; `Ok(None)` means the scan finished without a match.
#[tracing::instrument(skip(candidates, opener))]
pub fn select_latest<I, L, O>(
    candidates: I,
    opener: &O,
    target_name: &str,
) -> Result<Option<L>, ScanError>
where
    I: IntoIterator<Item = io::Result<L>>,
    L: AsRef<Path>,
    O: PackageOpener + ?Sized,
{
    let mut selection = LatestSelection::new();

    for candidate in candidates {
        let locator = candidate?;

        // the descriptor owns no archive handle; the opener releases it
        // before returning
        let descriptor = match opener.open(locator.as_ref()) {
            Ok(descriptor) => descriptor,
            Err(e) => {
                debug!("Skipping {:?}: {:#}", locator.as_ref(), e);
                continue;
            }
        };

        if descriptor.name != target_name {
            continue;
        }

        if selection.offer(&descriptor.version, locator) {
            debug!(
                "New best for {}: {} at {:?}",
                target_name,
                selection.best_version(),
                selection.best().map(|l| l.as_ref())
            );
        }
    }

    Ok(selection.into_best())
}
