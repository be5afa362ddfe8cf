//! Plain and gzip byte streams behind one type each for reading and writing.
//!
//! The variant is chosen once when a source or output is built; the parser
//! and serializer only see `BufRead` / `Write`.

use crate::options::{Codec, StreamOptions};

use flate2::read::MultiGzDecoder;
use flate2::write::GzEncoder;
use std::io::{self, BufRead, BufReader, BufWriter, Read, Write};

/// Counts bytes pulled from the wrapped reader.
pub struct CountingReader<R> {
    inner: R,
    count: u64,
}

impl<R: Read> CountingReader<R> {
    pub fn new(inner: R) -> Self {
        Self { inner, count: 0 }
    }

    #[inline]
    pub fn count(&self) -> u64 {
        self.count
    }
}

impl<R: Read> Read for CountingReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.inner.read(buf)?;
        self.count += n as u64;
        Ok(n)
    }
}

type RawReader = Box<dyn Read + Send>;
type RawWriter = Box<dyn Write + Send>;

pub(crate) enum InputStream {
    Plain(BufReader<RawReader>),
    Gzip(BufReader<MultiGzDecoder<CountingReader<RawReader>>>),
}

impl InputStream {
    pub(crate) fn new(raw: RawReader, codec: Codec, opts: &StreamOptions) -> Self {
        let cap = opts.chunk_size.max(1);
        match codec {
            Codec::Plain => InputStream::Plain(BufReader::with_capacity(cap, raw)),
            Codec::Gzip => {
                let dec = MultiGzDecoder::new(CountingReader::new(raw));
                InputStream::Gzip(BufReader::with_capacity(cap, dec))
            }
        }
    }

    pub(crate) fn codec(&self) -> Codec {
        match self {
            InputStream::Plain(_) => Codec::Plain,
            InputStream::Gzip(_) => Codec::Gzip,
        }
    }

    /// Compressed bytes taken from the underlying reader so far.
    ///
    /// `None` for plain streams, where the raw offset is the logical offset.
    pub(crate) fn compressed_bytes_read(&self) -> Option<u64> {
        match self {
            InputStream::Plain(_) => None,
            InputStream::Gzip(r) => Some(r.get_ref().get_ref().count()),
        }
    }
}

impl Read for InputStream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self {
            InputStream::Plain(r) => r.read(buf),
            InputStream::Gzip(r) => r.read(buf),
        }
    }
}

impl BufRead for InputStream {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        match self {
            InputStream::Plain(r) => r.fill_buf(),
            InputStream::Gzip(r) => r.fill_buf(),
        }
    }

    fn consume(&mut self, amt: usize) {
        match self {
            InputStream::Plain(r) => r.consume(amt),
            InputStream::Gzip(r) => r.consume(amt),
        }
    }
}

pub(crate) enum OutputStream {
    Plain(BufWriter<RawWriter>),
    Gzip(GzEncoder<BufWriter<RawWriter>>),
}

impl OutputStream {
    pub(crate) fn new(raw: RawWriter, codec: Codec, opts: &StreamOptions) -> Self {
        let buf = BufWriter::with_capacity(opts.chunk_size.max(1), raw);
        match codec {
            Codec::Plain => OutputStream::Plain(buf),
            Codec::Gzip => OutputStream::Gzip(GzEncoder::new(buf, opts.compression_level)),
        }
    }

    pub(crate) fn codec(&self) -> Codec {
        match self {
            OutputStream::Plain(_) => Codec::Plain,
            OutputStream::Gzip(_) => Codec::Gzip,
        }
    }

    /// Flush everything and write the gzip trailer, if any.
    pub(crate) fn finish(self) -> io::Result<()> {
        let mut buf = match self {
            OutputStream::Plain(w) => w,
            OutputStream::Gzip(enc) => enc.finish()?,
        };
        buf.flush()
    }
}

impl Write for OutputStream {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            OutputStream::Plain(w) => w.write(buf),
            OutputStream::Gzip(w) => w.write(buf),
        }
    }

    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        match self {
            OutputStream::Plain(w) => w.write_all(buf),
            OutputStream::Gzip(w) => w.write_all(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            OutputStream::Plain(w) => w.flush(),
            OutputStream::Gzip(w) => w.flush(),
        }
    }
}
