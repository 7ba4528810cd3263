use anyhow::{Context, Result};
use bzip2::bufread::BzDecoder;
use flate2::bufread::GzDecoder;
use xz2::bufread::XzDecoder;
use std::io::{BufRead, Read};

const GZIP_MAGIC: &[u8] = &[0x1f, 0x8b];
const ZSTD_MAGIC: &[u8] = &[0x28, 0xb5, 0x2f, 0xfd];
const XZ_MAGIC: &[u8] = &[0xfd, b'7', b'z', b'X', b'Z', 0x00];
const BZIP2_MAGIC: &[u8] = b"BZh";

/// Compression wrapped around a package's tar stream, detected from the
/// leading bytes rather than the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compression {
    None,
    Gzip,
    Zstd,
    Xz,
    Bzip2,
}

impl Compression {
    pub fn detect(head: &[u8]) -> Self {
        if head.starts_with(ZSTD_MAGIC) {
            Compression::Zstd
        } else if head.starts_with(GZIP_MAGIC) {
            Compression::Gzip
        } else if head.starts_with(XZ_MAGIC) {
            Compression::Xz
        } else if head.starts_with(BZIP2_MAGIC) {
            Compression::Bzip2
        } else {
            Compression::None
        }
    }

    /// Wrap `reader` in a decoder yielding the plain tar stream.
    pub fn decoder<'a, B: BufRead + 'a>(self, reader: B) -> Result<Box<dyn Read + 'a>> {
        match self {
            Compression::None => Ok(Box::new(reader)),
            Compression::Gzip => Ok(Box::new(GzDecoder::new(reader))),
            Compression::Zstd => {
                let decoder = zstd::stream::read::Decoder::with_buffer(reader)
                    .context("Failed to initialise zstd decoder")?;
                Ok(Box::new(decoder))
            }
            Compression::Xz => Ok(Box::new(XzDecoder::new(reader))),
            Compression::Bzip2 => Ok(Box::new(BzDecoder::new(reader))),
        }
    }
}
