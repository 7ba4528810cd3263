//! Delimited record input, as produced by `find -print0` or `xargs -0`.

use std::ffi::OsString;
use std::io::{self, BufRead};
use std::path::PathBuf;

/// Iterator over the records of a delimited byte stream.
///
/// The delimiter is stripped and empty records are skipped, so a trailing
/// delimiter or a doubled one does not produce a blank entry. Read errors
/// are yielded once, after which the iterator is exhausted.
pub struct Records<R> {
    reader: R,
    delimiter: u8,
    done: bool,
}

impl<R: BufRead> Records<R> {
    pub fn new(reader: R, delimiter: u8) -> Self {
        Self {
            reader,
            delimiter,
            done: false,
        }
    }

    pub fn nul(reader: R) -> Self {
        Self::new(reader, b'\0')
    }

    pub fn lines(reader: R) -> Self {
        Self::new(reader, b'\n')
    }

    /// Map each record to a path.
    pub fn paths(self) -> impl Iterator<Item = io::Result<PathBuf>> {
        self.map(|record| record.map(path_from_bytes))
    }
}

impl<R: BufRead> Iterator for Records<R> {
    type Item = io::Result<Vec<u8>>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.done {
            let mut record = Vec::new();
            match self.reader.read_until(self.delimiter, &mut record) {
                Ok(0) => self.done = true,
                Ok(_) => {
                    if record.last() == Some(&self.delimiter) {
                        record.pop();
                    }
                    if !record.is_empty() {
                        return Some(Ok(record));
                    }
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(e) => {
                    self.done = true;
                    return Some(Err(e));
                }
            }
        }
        None
    }
}

#[cfg(unix)]
pub fn path_from_bytes(bytes: Vec<u8>) -> PathBuf {
    use std::os::unix::ffi::OsStringExt;
    PathBuf::from(OsString::from_vec(bytes))
}

#[cfg(not(unix))]
pub fn path_from_bytes(bytes: Vec<u8>) -> PathBuf {
    PathBuf::from(OsString::from(String::from_utf8_lossy(&bytes).into_owned()))
}

#[cfg(unix)]
pub fn path_to_bytes(path: &std::path::Path) -> Vec<u8> {
    use std::os::unix::ffi::OsStrExt;
    path.as_os_str().as_bytes().to_vec()
}

#[cfg(not(unix))]
pub fn path_to_bytes(path: &std::path::Path) -> Vec<u8> {
    path.to_string_lossy().into_owned().into_bytes()
}
