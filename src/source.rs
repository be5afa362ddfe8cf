use crate::error::{FastqError, FormatError, IoContext};
use crate::options::{Codec, StreamOptions};
use crate::progress::Progress;
use crate::record::FastqEntry;
use crate::stream::InputStream;
use crate::util::chomp;

use std::fs::File;
use std::io::{self, BufRead, Read};
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub enum Origin {
    Path(PathBuf),
    Reader,
}

const HEADER: usize = 0;
const SEQ: usize = 1;
const PLUS: usize = 2;
const QUAL: usize = 3;

/// Streaming FASTQ source (plain/.gz) with optional trimming and progress.
///
/// Records are parsed one at a time into a reusable current-entry slot:
///
/// ```no_run
/// use fastq_trim::{Codec, FastqSource, StreamOptions};
///
/// # fn main() -> Result<(), fastq_trim::FastqError> {
/// let mut src = FastqSource::open("reads.fq.gz", Codec::Gzip, &StreamOptions::default())?;
/// while src.next(Some(50))? {
///     if src.percentage_available() {
///         eprint!("\r{:.0}%", src.percentage());
///     }
///     let rec = src.current_entry();
///     assert!(rec.len() <= 50);
/// }
/// # Ok(())
/// # }
/// ```
pub struct FastqSource {
    src: Origin,
    rdr: InputStream,
    line_num: u64,
    byte_pos: u64,
    entry: FastqEntry,
    // Lines of the record being parsed; swapped into `entry` on success.
    lines: [Vec<u8>; 4],
    progress: Progress,
    records_read: u64,
    records_trimmed: u64,
}

impl FastqSource {
    /// Open a file. The total size for progress comes from file metadata.
    pub fn open<P: AsRef<Path>>(
        path: P,
        codec: Codec,
        opts: &StreamOptions,
    ) -> Result<Self, FastqError> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| FastqError::io_err(e, IoContext::default()))?;
        let total = f.metadata().map(|m| m.len()).ok();

        let raw: Box<dyn Read + Send> = match codec {
            Codec::Plain => {
                plain_reader(f).map_err(|e| FastqError::io_err(e, IoContext::default()))?
            }
            Codec::Gzip => Box::new(f),
        };

        log::debug!(
            "opened {} for reading ({codec:?}, {} bytes)",
            path.display(),
            total.map_or_else(|| "unknown".to_string(), |n| n.to_string())
        );

        Ok(Self::with_stream(
            Origin::Path(path.to_path_buf()),
            InputStream::new(raw, codec, opts),
            total,
        ))
    }

    /// Wrap an arbitrary reader (stdin, in-memory data).
    ///
    /// `total_size` is the raw (possibly compressed) size of the stream; with
    /// `None` the percentage stays at 0.
    pub fn from_reader<R: Read + Send + 'static>(
        reader: R,
        codec: Codec,
        total_size: Option<u64>,
        opts: &StreamOptions,
    ) -> Self {
        Self::with_stream(
            Origin::Reader,
            InputStream::new(Box::new(reader), codec, opts),
            total_size,
        )
    }

    fn with_stream(src: Origin, rdr: InputStream, total: Option<u64>) -> Self {
        Self {
            src,
            rdr,
            line_num: 0,
            byte_pos: 0,
            entry: FastqEntry::default(),
            lines: Default::default(),
            progress: Progress::new(total),
            records_read: 0,
            records_trimmed: 0,
        }
    }

    /// Parse the next record into the current-entry slot.
    ///
    /// Returns `Ok(false)` at a clean end of input, leaving the slot as it
    /// was. Blank lines before a header are skipped, so any number of
    /// trailing blank lines also ends the input cleanly. A record cut short
    /// after its header is a [`FormatError::Truncated`]. With `trim_to`,
    /// sequence and quality are cut to at most that many characters; shorter
    /// records keep their natural length.
    pub fn next(&mut self, trim_to: Option<usize>) -> Result<bool, FastqError> {
        // seek first non-empty line
        loop {
            if self.read_line(HEADER)? == 0 {
                let raw = self.raw_position();
                self.progress.finish_at(raw);
                return Ok(false);
            }
            if !self.lines[HEADER].is_empty() {
                break;
            }
        }

        let mut got = 1;
        while got < 4 {
            if self.read_line(got)? == 0 {
                return Err(FastqError::fmt_err(
                    FormatError::Truncated { lines: got },
                    self.ctx(),
                ));
            }
            got += 1;
        }

        self.check_record()?;

        std::mem::swap(&mut self.entry.id, &mut self.lines[HEADER]);
        std::mem::swap(&mut self.entry.seq, &mut self.lines[SEQ]);
        std::mem::swap(&mut self.entry.plus, &mut self.lines[PLUS]);
        std::mem::swap(&mut self.entry.qual, &mut self.lines[QUAL]);

        if let Some(len) = trim_to {
            if self.entry.trim_to(len) {
                self.records_trimmed += 1;
            }
        }
        self.records_read += 1;
        self.update_progress();
        Ok(true)
    }

    /// The record produced by the last successful [`next`](Self::next).
    pub fn current_entry(&self) -> &FastqEntry {
        &self.entry
    }

    /// Whether the last `next` call moved progress by at least one whole percent.
    pub fn percentage_available(&self) -> bool {
        self.progress.available()
    }

    /// Raw bytes consumed relative to the raw input size, in `[0, 100]`.
    pub fn percentage(&self) -> f64 {
        self.progress.percentage()
    }

    pub fn codec(&self) -> Codec {
        self.rdr.codec()
    }

    pub fn path(&self) -> Option<&Path> {
        match &self.src {
            Origin::Path(p) => Some(p),
            Origin::Reader => None,
        }
    }

    pub fn records_read(&self) -> u64 {
        self.records_read
    }

    pub fn records_trimmed(&self) -> u64 {
        self.records_trimmed
    }

    pub fn context(&self) -> IoContext {
        self.ctx()
    }

    /// Release the underlying stream.
    pub fn close(self) {
        log::debug!(
            "closing source {:?} after {} records ({} trimmed)",
            self.src,
            self.records_read,
            self.records_trimmed
        );
    }

    fn read_line(&mut self, idx: usize) -> Result<usize, FastqError> {
        let buf = &mut self.lines[idx];
        buf.clear();
        let n = match self.rdr.read_until(b'\n', buf) {
            Ok(n) => n,
            Err(e) => return Err(self.read_error(e)),
        };
        if n > 0 {
            self.line_num += 1;
            self.byte_pos += n as u64;
            chomp(&mut self.lines[idx]);
        }
        Ok(n)
    }

    fn check_record(&self) -> Result<(), FastqError> {
        let header = &self.lines[HEADER];
        if !header.starts_with(b"@") {
            let kind = if header.starts_with(b">") {
                FormatError::FastaHeaderDetected
            } else {
                FormatError::MissingHeader
            };
            return Err(FastqError::fmt_err(kind, self.ctx()));
        }
        if !self.lines[PLUS].starts_with(b"+") {
            return Err(FastqError::fmt_err(FormatError::MissingPlus, self.ctx()));
        }
        let (seq, qual) = (self.lines[SEQ].len(), self.lines[QUAL].len());
        if seq != qual {
            return Err(FastqError::fmt_err(
                FormatError::LengthMismatch { seq, qual },
                self.ctx(),
            ));
        }
        Ok(())
    }

    // Bad gzip framing is reported as a format error.
    fn read_error(&self, e: io::Error) -> FastqError {
        let framing = matches!(
            e.kind(),
            io::ErrorKind::InvalidData | io::ErrorKind::InvalidInput | io::ErrorKind::UnexpectedEof
        );
        if framing && self.rdr.codec().is_compressed() {
            FastqError::fmt_err(FormatError::Decompression(e), self.ctx())
        } else {
            FastqError::io_err(e, self.ctx())
        }
    }

    fn update_progress(&mut self) {
        let raw = self.raw_position();
        self.progress.advance(raw);
    }

    #[inline]
    fn raw_position(&self) -> u64 {
        self.rdr.compressed_bytes_read().unwrap_or(self.byte_pos)
    }

    #[inline]
    fn ctx(&self) -> IoContext {
        IoContext {
            byte_pos: self.byte_pos,
            line_num: self.line_num,
        }
    }
}

impl Iterator for FastqSource {
    type Item = Result<FastqEntry, FastqError>;
    fn next(&mut self) -> Option<Self::Item> {
        match FastqSource::next(self, None) {
            Ok(true) => Some(Ok(self.entry.clone())),
            Ok(false) => None,
            Err(err) => Some(Err(err)),
        }
    }
}

#[cfg(feature = "mmap")]
fn plain_reader(f: File) -> io::Result<Box<dyn Read + Send>> {
    use memmap2::Mmap;
    // Own the Mmap inside Cursor to avoid self-ref problems
    let mmap = unsafe { Mmap::map(&f) }?;
    Ok(Box::new(io::Cursor::new(mmap)))
}

#[cfg(not(feature = "mmap"))]
fn plain_reader(f: File) -> io::Result<Box<dyn Read + Send>> {
    Ok(Box::new(f))
}
