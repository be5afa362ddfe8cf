use crate::error::{FastqError, IoContext};
use crate::options::{Codec, LineSeparator, StreamOptions};
use crate::record::FastqEntry;
use crate::stream::OutputStream;

use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Streaming FASTQ writer (plain/.gz).
///
/// Call [`finish`](Self::finish) when done so that buffered data is written
/// and the gzip trailer is in place. Dropping an unfinished output still
/// tries to flush, but errors are lost.
pub struct FastqOutput {
    path: Option<PathBuf>,
    out: OutputStream,
    sep: LineSeparator,
    line_num: u64,
    byte_pos: u64,
    records_written: u64,
}

impl FastqOutput {
    /// Create (or truncate) a file.
    pub fn create<P: AsRef<Path>>(
        path: P,
        codec: Codec,
        opts: &StreamOptions,
    ) -> Result<Self, FastqError> {
        let path = path.as_ref();
        let f = File::create(path).map_err(|e| FastqError::io_err(e, IoContext::default()))?;
        log::debug!("opened {} for writing ({codec:?})", path.display());
        let mut out = Self::from_writer(f, codec, opts);
        out.path = Some(path.to_path_buf());
        Ok(out)
    }

    /// Wrap an arbitrary writer (stdout, sockets).
    pub fn from_writer<W: Write + Send + 'static>(
        writer: W,
        codec: Codec,
        opts: &StreamOptions,
    ) -> Self {
        Self {
            path: None,
            out: OutputStream::new(Box::new(writer), codec, opts),
            sep: opts.line_separator,
            line_num: 0,
            byte_pos: 0,
            records_written: 0,
        }
    }

    /// Append one record as four lines.
    pub fn store(&mut self, entry: &FastqEntry) -> Result<(), FastqError> {
        for line in [&entry.id, &entry.seq, &entry.plus, &entry.qual] {
            self.write_line(line)
                .map_err(|e| FastqError::io_err(e, self.ctx()))?;
        }
        self.records_written += 1;
        Ok(())
    }

    pub fn records_written(&self) -> u64 {
        self.records_written
    }

    pub fn codec(&self) -> Codec {
        self.out.codec()
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Flush buffers and finalize compression.
    pub fn finish(self) -> Result<(), FastqError> {
        let ctx = self.ctx();
        self.out.finish().map_err(|e| FastqError::io_err(e, ctx))?;
        log::debug!(
            "finished {} after {} records",
            self.path
                .as_deref()
                .map_or_else(|| "<writer>".into(), |p| p.display().to_string()),
            self.records_written
        );
        Ok(())
    }

    fn write_line(&mut self, line: &[u8]) -> io::Result<()> {
        let sep = self.sep.as_bytes();
        self.out.write_all(line)?;
        self.out.write_all(sep)?;
        self.line_num += 1;
        self.byte_pos += (line.len() + sep.len()) as u64;
        Ok(())
    }

    #[inline]
    fn ctx(&self) -> IoContext {
        IoContext {
            byte_pos: self.byte_pos,
            line_num: self.line_num,
        }
    }
}
