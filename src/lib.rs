//! Streaming FASTQ trimming.
//!
//! - Plain and gzip input/output, chosen once per stream.
//! - Record-by-record parsing into a reusable slot (no full-file buffering).
//! - Fixed-length trimming at parse time; shorter reads are never padded.
//! - Progress measured against the physical (possibly compressed) file size.
//! - Optional `mmap` for plain inputs; `zlib` feature for system-zlib parity.

pub mod error;
pub mod options;
pub mod output;
pub mod progress;
pub mod record;
pub mod source;
mod stream;
pub mod trim;
mod util;

pub use crate::error::{FastqError, FormatError, IoContext};
pub use crate::options::{Codec, DEFAULT_CHUNK_SIZE, LineSeparator, StreamOptions};
pub use crate::output::FastqOutput;
pub use crate::progress::Progress;
pub use crate::record::FastqEntry;
pub use crate::source::{FastqSource, Origin};
pub use crate::trim::{TrimStats, trim, trim_file};
