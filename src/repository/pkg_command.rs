use anyhow::{Context, Result, bail};
use log::debug;
use std::ffi::OsString;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::sync::{Mutex, PoisonError};

use super::{CatalogueBackend, CreateOptions, PasswordSupplier};
use crate::runtime::Runtime;

/// Signing keys given with this prefix name an external signing command
/// instead of an RSA key file.
const SIGNING_COMMAND_PREFIX: &str = "signing_command:";

/// Catalogue backend driving `pkg repo`.
///
/// `pkg repo` builds and signs in one run, so `create_repository` only
/// validates and stages its options; `finish_repository` runs the command.
pub struct PkgRepoCommand<R: Runtime> {
    runtime: R,
    program: PathBuf,
    staged: Mutex<Option<CreateOptions>>,
}

impl<R: Runtime> PkgRepoCommand<R> {
    pub fn new(runtime: R, program: impl Into<PathBuf>) -> Self {
        Self {
            runtime,
            program: program.into(),
            staged: Mutex::new(None),
        }
    }

    /// Arguments of the `pkg repo` invocation for `options`.
    pub fn repo_args(options: &CreateOptions, signing_key: Option<&str>) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec!["repo".into()];

        if options.include_filelist {
            args.push("-l".into());
        }
        if let Some(meta_file) = &options.meta_file {
            args.push("-m".into());
            args.push(meta_file.into());
        }
        if let Some(output_dir) = &options.output_dir {
            args.push("-o".into());
            args.push(output_dir.into());
        }
        if let Some(hash) = options.hash {
            if hash.hash {
                args.push("--hash".into());
            }
            if hash.hash_symlink {
                args.push("--symlink".into());
            }
        }

        args.push(options.path.clone().into());

        if let Some(key) = signing_key {
            if key.starts_with(SIGNING_COMMAND_PREFIX) {
                args.push(key.into());
            } else {
                args.push(format!("rsa:{}", key).into());
            }
        }

        args
    }
}

impl<R: Runtime> CatalogueBackend for PkgRepoCommand<R> {
    #[tracing::instrument(skip(self))]
    fn create_repository(&self, options: &CreateOptions) -> Result<()> {
        if !self.runtime.is_dir(&options.path) {
            bail!("Repository path {:?} is not a directory", options.path);
        }
        if let Some(meta_file) = &options.meta_file {
            if !self.runtime.exists(meta_file) {
                bail!("Meta file {:?} does not exist", meta_file);
            }
        }

        let mut staged = self.staged.lock().unwrap_or_else(PoisonError::into_inner);
        *staged = Some(options.clone());
        Ok(())
    }

    #[tracing::instrument(skip(self, password))]
    fn finish_repository(
        &self,
        output_dir: &Path,
        password: Option<PasswordSupplier<'_>>,
        signing_key: Option<&str>,
    ) -> Result<()> {
        let options = self
            .staged
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
            .context("No repository has been created")?;

        if options.output_dir() != output_dir {
            bail!(
                "Repository was created for {:?}, not {:?}",
                options.output_dir(),
                output_dir
            );
        }

        let secret = match (password, signing_key) {
            (Some(supplier), Some(key)) if !key.starts_with(SIGNING_COMMAND_PREFIX) => {
                supplier(key)
            }
            _ => None,
        };

        let args = Self::repo_args(&options, signing_key);
        debug!("Running {:?} {:?}", self.program, args);

        let mut child = Command::new(&self.program)
            .args(&args)
            .stdin(if secret.is_some() {
                Stdio::piped()
            } else {
                Stdio::null()
            })
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .with_context(|| format!("Failed to run {:?}", self.program))?;

        if let (Some(secret), Some(mut stdin)) = (secret, child.stdin.take()) {
            if let Err(e) = writeln!(stdin, "{}", secret) {
                if e.kind() != io::ErrorKind::BrokenPipe {
                    return Err(e).context("Failed to pass passphrase to pkg");
                }
                debug!("pkg exited before reading the passphrase");
            }
        }

        let output = child
            .wait_with_output()
            .with_context(|| format!("Failed to wait for {:?}", self.program))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            bail!("pkg repo failed ({}): {}", output.status, stderr.trim());
        }
        debug!("{}", String::from_utf8_lossy(&output.stdout).trim());
        Ok(())
    }
}
