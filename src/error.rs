use std::io;
use thiserror::Error;

/// Position of a stream when an error was raised.
///
/// For sources `byte_pos` is the logical (decompressed) offset and `line_num`
/// the number of lines read; for outputs both count what has been written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IoContext {
    pub byte_pos: u64,
    pub line_num: u64,
}

#[derive(Debug, Error)]
pub enum FormatError {
    #[error("expected header '@' at start of record")]
    MissingHeader,
    #[error("found FASTA header '>' where FASTQ '@' expected")]
    FastaHeaderDetected,
    #[error("missing '+' separator line")]
    MissingPlus,
    #[error("truncated record: only {lines} of 4 lines before end of input")]
    Truncated { lines: usize },
    #[error("quality length ({qual}) does not match sequence length ({seq})")]
    LengthMismatch { seq: usize, qual: usize },
    #[error("invalid compressed data: {0}")]
    Decompression(#[source] io::Error),
}

#[derive(Debug, Error)]
pub enum FastqError {
    #[error("I/O error at {ctx:?}: {source}")]
    Io {
        #[source]
        source: io::Error,
        ctx: IoContext,
    },
    #[error("format error at {ctx:?}: {source}")]
    Format {
        #[source]
        source: FormatError,
        ctx: IoContext,
    },
}

impl FastqError {
    pub(crate) fn io_err(source: io::Error, ctx: IoContext) -> Self {
        Self::Io { source, ctx }
    }
    pub(crate) fn fmt_err(source: FormatError, ctx: IoContext) -> Self {
        Self::Format { source, ctx }
    }

    /// True for malformed input, false for plain I/O failures.
    pub fn is_format(&self) -> bool {
        matches!(self, Self::Format { .. })
    }

    pub fn context(&self) -> IoContext {
        match self {
            Self::Io { ctx, .. } | Self::Format { ctx, .. } => *ctx,
        }
    }
}
