use crate::util::looks_like_gzip;

use std::fs::File;
use std::io;
use std::path::Path;

/// Default read/write buffer capacity.
pub const DEFAULT_CHUNK_SIZE: usize = 256 * 1024;

/// Whether a stream is stored plain or gzip-compressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Codec {
    #[default]
    Plain,
    Gzip,
}

impl Codec {
    /// `.gz` suffix convention only; does not touch the filesystem.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Self {
        match path.as_ref().extension().and_then(|s| s.to_str()) {
            Some("gz") => Codec::Gzip,
            _ => Codec::Plain,
        }
    }

    /// `.gz` extension or gzip magic bytes at the start of the file.
    pub fn detect<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let path = path.as_ref();
        if Self::from_path(path) == Codec::Gzip {
            return Ok(Codec::Gzip);
        }
        let f = File::open(path)?;
        Ok(if looks_like_gzip(&f)? {
            Codec::Gzip
        } else {
            Codec::Plain
        })
    }

    pub fn is_compressed(self) -> bool {
        self == Codec::Gzip
    }
}

impl From<bool> for Codec {
    fn from(compressed: bool) -> Self {
        if compressed { Codec::Gzip } else { Codec::Plain }
    }
}

/// Line terminator used when writing records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineSeparator {
    #[default]
    Lf,
    CrLf,
}

impl LineSeparator {
    pub fn as_bytes(self) -> &'static [u8] {
        match self {
            LineSeparator::Lf => b"\n",
            LineSeparator::CrLf => b"\r\n",
        }
    }
}

#[derive(Debug, Clone)]
pub struct StreamOptions {
    /// Buffer capacity for reads and writes.
    pub chunk_size: usize,
    pub line_separator: LineSeparator,
    /// Only used for gzip outputs.
    pub compression_level: flate2::Compression,
}

impl Default for StreamOptions {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            line_separator: LineSeparator::Lf,
            compression_level: flate2::Compression::default(),
        }
    }
}
