use anyhow::{Context, Result};
use std::io::{BufRead, Write};

use crate::package::sort_by_version;
use crate::records::Records;

/// Read one version per line from `input` and print them oldest first, or
/// newest first with `reverse`. Equal versions keep their input order.
#[tracing::instrument(skip(input, output))]
pub fn sort<I: BufRead, W: Write>(input: I, output: &mut W, reverse: bool) -> Result<()> {
    let mut versions = Vec::new();
    for record in Records::lines(input) {
        let record = record.context("Failed to read versions")?;
        let line = String::from_utf8(record).context("Version is not valid UTF-8")?;
        let line = line.trim_end_matches('\r');
        if !line.is_empty() {
            versions.push(line.to_string());
        }
    }

    sort_by_version(&mut versions, reverse);

    for version in &versions {
        writeln!(output, "{}", version)?;
    }
    Ok(())
}
