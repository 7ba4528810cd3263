use anyhow::Result;
use log::debug;
use std::io::Write;
use std::path::Path;

use crate::archive::ArchiveOpener;
use crate::format::format_manifest;
use crate::runtime::Runtime;

/// Print the metadata of the package at `path` using `format`.
///
/// A file that cannot be opened as a package prints nothing.
#[tracing::instrument(skip(opener, output))]
pub fn printf<R: Runtime, W: Write>(
    opener: &ArchiveOpener<R>,
    path: &Path,
    format: &str,
    output: &mut W,
) -> Result<()> {
    match opener.manifest(path) {
        Ok(manifest) => {
            output.write_all(format_manifest(format, &manifest).as_bytes())?;
            output.flush()?;
        }
        Err(e) => debug!("Cannot open {:?}: {:#}", path, e),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::archive::Compression;
    use crate::runtime::MockRuntime;
    use crate::test_utils::package_archive;
    use std::io::Cursor;

    fn opener_serving(bytes: Vec<u8>) -> ArchiveOpener<MockRuntime> {
        let mut runtime = MockRuntime::new();
        runtime
            .expect_open()
            .returning(move |_| Ok(Box::new(Cursor::new(bytes.clone()))));
        ArchiveOpener::new(runtime)
    }

    #[test]
    fn test_printf_formats_manifest() {
        let opener = opener_serving(package_archive("foo", "1.2_3", Compression::Gzip));
        let mut out = Vec::new();

        printf(&opener, Path::new("foo.pkg"), "%n %v\\n", &mut out).unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), "foo 1.2_3\n");
    }

    #[test]
    fn test_printf_unreadable_package_prints_nothing() {
        let opener = opener_serving(b"not a package".to_vec());
        let mut out = Vec::new();

        printf(&opener, Path::new("junk"), "%n", &mut out).unwrap();

        assert!(out.is_empty());
    }
}
