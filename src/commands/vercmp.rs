use anyhow::Result;
use std::cmp::Ordering;
use std::io::Write;

use crate::version;

/// Print `<`, `=` or `>` for the comparison of `a` against `b`.
pub fn vercmp<W: Write>(a: &str, b: &str, output: &mut W) -> Result<()> {
    let symbol = match version::compare(a, b) {
        Ordering::Less => "<",
        Ordering::Equal => "=",
        Ordering::Greater => ">",
    };
    writeln!(output, "{}", symbol)?;
    Ok(())
}
