//! Line source for ratings files.
//!
//! Streams a file line by line for the pipeline. Opening failures are
//! reported as [`RatingsError::SourceUnavailable`]; a read failure part-way
//! through is logged and treated as end of input.

use std::fs::File;
use std::io::{BufRead, BufReader, Seek};
use std::path::{Path, PathBuf};

use ratings_core::error::{RatingsError, Result};
use tracing::{debug, warn};

// ── Lines ─────────────────────────────────────────────────────────────────────

/// Iterator over the lines of any buffered reader.
///
/// Strips `\n` and `\r\n` terminators and decodes invalid UTF-8 lossily so a
/// stray byte only spoils its own line.
pub struct Lines<R> {
    reader: R,
    buf: Vec<u8>,
    done: bool,
}

/// Wrap `reader` in a [`Lines`] iterator.
pub fn read_lines<R: BufRead>(reader: R) -> Lines<R> {
    Lines {
        reader,
        buf: Vec::new(),
        done: false,
    }
}

impl<R: BufRead> Iterator for Lines<R> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        if self.done {
            return None;
        }

        self.buf.clear();
        match self.reader.read_until(b'\n', &mut self.buf) {
            Ok(0) => {
                self.done = true;
                None
            }
            Ok(_) => {
                if self.buf.last() == Some(&b'\n') {
                    self.buf.pop();
                    if self.buf.last() == Some(&b'\r') {
                        self.buf.pop();
                    }
                }
                Some(String::from_utf8_lossy(&self.buf).into_owned())
            }
            Err(e) => {
                warn!(error = %e, "read failed; treating as end of input");
                self.done = true;
                None
            }
        }
    }
}

// ── FileLineSource ────────────────────────────────────────────────────────────

/// An opened ratings file.
pub struct FileLineSource {
    path: PathBuf,
    reader: BufReader<File>,
}

impl FileLineSource {
    /// Open `path` for reading.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = File::open(&path).map_err(|source| RatingsError::SourceUnavailable {
            path: path.clone(),
            source,
        })?;
        debug!("Opened ratings file {}", path.display());

        Ok(Self {
            path,
            reader: BufReader::new(file),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Iterate the file from its first line. Calling this again restarts
    /// from the beginning.
    pub fn lines(&mut self) -> Result<Lines<&mut BufReader<File>>> {
        self.reader
            .rewind()
            .map_err(|source| RatingsError::SourceUnavailable {
                path: self.path.clone(),
                source,
            })?;
        Ok(read_lines(&mut self.reader))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
