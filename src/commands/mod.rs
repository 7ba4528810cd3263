//! Subcommands of the `pkgtool` binary.
//!
//! Each command writes to the output it is given rather than to stdout
//! directly, so the binary decides buffering and tests can capture it.

mod latest;
mod printf;
mod repo;
mod sort;
mod vercmp;

pub use latest::latest;
pub use printf::printf;
pub use repo::repo;
pub use sort::sort;
pub use vercmp::vercmp;
