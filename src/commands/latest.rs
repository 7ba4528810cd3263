use anyhow::{Context, Result};
use log::debug;
use std::io::{BufRead, Write};

use crate::archive::PackageOpener;
use crate::package::select_latest;
use crate::records::{Records, path_to_bytes};

/// Print the newest archive named `name` among the NUL-delimited paths read
/// from `input`.
///
/// The winning path is written as-is, without a trailing newline. Nothing is
/// written when no archive matches.
#[tracing::instrument(skip(opener, input, output))]
pub fn latest<O, I, W>(opener: &O, input: I, output: &mut W, name: &str) -> Result<()>
where
    O: PackageOpener + ?Sized,
    I: BufRead,
    W: Write,
{
    let best = select_latest(Records::nul(input).paths(), opener, name)
        .context("Failed to read package paths")?;

    match best {
        Some(path) => {
            debug!("Latest {} is {:?}", name, path);
            output.write_all(&path_to_bytes(&path))?;
        }
        None => debug!("No package named {}", name),
    }
    output.flush()?;
    Ok(())
}
