use anyhow::Result;
use clap::Parser;
use pkgtool::archive::ArchiveOpener;
use pkgtool::repository::{CreateOptions, HashOptions, PkgRepoCommand, RefreshOptions};
use pkgtool::runtime::RealRuntime;
use std::io;
use std::path::PathBuf;
use std::process;

/// Exit status for command line usage errors (sysexits.h).
const EX_USAGE: i32 = 64;

/// pkgtool - FreeBSD package helpers
///
/// Compare package versions, pick the newest archive of a package, print
/// archive metadata and refresh repository catalogues.
///
/// Examples:
///   find /repo/All -name 'curl-*' -print0 | pkgtool latest curl
///   pkgtool vercmp 1.2_1 1.2.1
#[derive(Parser, Debug)]
#[command(author, version = env!("PKGTOOL_VERSION"), about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Print the newest archive of a package among NUL-delimited paths on stdin
    Latest(LatestArgs),

    /// Print metadata of a package archive
    Printf(PrintfArgs),

    /// Compare two versions, printing <, = or >
    Vercmp(VercmpArgs),

    /// Sort versions read from stdin, one per line
    Sort(SortArgs),

    /// Create and sign a repository catalogue and update its Latest/ links
    Repo(RepoArgs),
}

#[derive(clap::Args, Debug)]
pub struct LatestArgs {
    /// Package name to match exactly
    #[arg(value_name = "NAME")]
    pub name: String,
}

#[derive(clap::Args, Debug)]
pub struct PrintfArgs {
    #[arg(value_name = "PKG-FILE")]
    pub pkg_file: PathBuf,

    /// Format string, e.g. "%n-%v\n"
    #[arg(value_name = "FORMAT", allow_hyphen_values = true)]
    pub format: String,
}

#[derive(clap::Args, Debug)]
pub struct VercmpArgs {
    #[arg(value_name = "A", allow_hyphen_values = true)]
    pub a: String,

    #[arg(value_name = "B", allow_hyphen_values = true)]
    pub b: String,
}

#[derive(clap::Args, Debug)]
pub struct SortArgs {
    /// Newest first
    #[arg(long, short = 'r')]
    pub reverse: bool,
}

#[derive(clap::Args, Debug)]
pub struct RepoArgs {
    /// Repository root holding the All/ directory
    #[arg(value_name = "PATH")]
    pub path: PathBuf,

    /// Write the catalogue here instead of the repository root
    #[arg(long, short = 'o', value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Include the file list of each package
    #[arg(long, short = 'l')]
    pub filelist: bool,

    /// Repository meta file (defaults to PATH/meta.conf when present)
    #[arg(long, short = 'm', value_name = "FILE")]
    pub meta_file: Option<PathBuf>,

    /// Name packages by content hash
    #[arg(long)]
    pub hash: bool,

    /// Link plain package names to the hashed ones
    #[arg(long, requires = "hash")]
    pub hash_symlink: bool,

    /// RSA key file, or "signing_command: <command>"
    #[arg(long, env = "PKGTOOL_SIGNING_KEY", value_name = "KEY")]
    pub key: Option<String>,

    /// Environment variable holding the key's passphrase
    #[arg(long, value_name = "VAR")]
    pub password_env: Option<String>,

    /// Leave the Latest/ directory alone
    #[arg(long)]
    pub no_latest: bool,

    /// The pkg executable
    #[arg(long, env = "PKGTOOL_PKG", value_name = "PROGRAM", default_value = "pkg")]
    pub pkg: PathBuf,
}

impl RepoArgs {
    fn refresh_options(&self) -> RefreshOptions {
        let hash = (self.hash || self.hash_symlink).then_some(HashOptions {
            hash: self.hash,
            hash_symlink: self.hash_symlink,
        });
        RefreshOptions {
            create: CreateOptions {
                path: self.path.clone(),
                output_dir: self.output_dir.clone(),
                include_filelist: self.filelist,
                meta_file: self.meta_file.clone(),
                hash,
            },
            signing_key: self.key.clone(),
            update_latest: !self.no_latest,
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if e.use_stderr() => {
            let _ = e.print();
            process::exit(EX_USAGE);
        }
        Err(e) => e.exit(),
    };

    run(cli)
}

fn run(cli: Cli) -> Result<()> {
    let mut stdout = io::stdout().lock();

    match cli.command {
        Commands::Latest(args) => {
            let opener = ArchiveOpener::new(RealRuntime);
            pkgtool::commands::latest(&opener, io::stdin().lock(), &mut stdout, &args.name)?
        }
        Commands::Printf(args) => {
            let opener = ArchiveOpener::new(RealRuntime);
            pkgtool::commands::printf(&opener, &args.pkg_file, &args.format, &mut stdout)?
        }
        Commands::Vercmp(args) => pkgtool::commands::vercmp(&args.a, &args.b, &mut stdout)?,
        Commands::Sort(args) => {
            pkgtool::commands::sort(io::stdin().lock(), &mut stdout, args.reverse)?
        }
        Commands::Repo(args) => {
            let backend = PkgRepoCommand::new(RealRuntime, &args.pkg);
            pkgtool::commands::repo(
                &backend,
                &RealRuntime,
                &args.refresh_options(),
                args.password_env.as_deref(),
                &mut stdout,
            )?
        }
    }
    Ok(())
}
