use anyhow::Result;
use log::{debug, warn};
use std::io::Write;

use crate::repository::{CatalogueBackend, PasswordSupplier, RefreshOptions, refresh_catalogue};
use crate::runtime::Runtime;

/// Refresh the catalogue of a repository and print the `Latest/` links.
///
/// When `password_env` is given, the signing passphrase is read from that
/// environment variable at the moment the backend asks for it.
#[tracing::instrument(skip(backend, runtime, output))]
pub fn repo<B, R, W>(
    backend: &B,
    runtime: &R,
    options: &RefreshOptions,
    password_env: Option<&str>,
    output: &mut W,
) -> Result<()>
where
    B: CatalogueBackend + ?Sized,
    R: Runtime,
    W: Write,
{
    let supplier: PasswordSupplier<'_> = &|key: &str| {
        let var = password_env?;
        debug!("Passphrase for {} requested, reading {}", key, var);
        match runtime.env_var(var) {
            Ok(secret) => Some(secret),
            Err(e) => {
                warn!("No passphrase in {}: {}", var, e);
                None
            }
        }
    };

    let links = refresh_catalogue(backend, runtime, options, Some(supplier))?;

    for link in &links {
        writeln!(output, "{} -> {}", link.link.display(), link.target.display())?;
    }
    Ok(())
}
