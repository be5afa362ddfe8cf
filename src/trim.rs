//! Pull records from a source, trim them, push them into an output.

use crate::error::FastqError;
use crate::options::{Codec, StreamOptions};
use crate::output::FastqOutput;
use crate::source::FastqSource;

use std::path::Path;

/// Counts from one trimming run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TrimStats {
    pub records: u64,
    pub trimmed: u64,
}

/// Copy every record from `source` to `output`, cutting reads to `trim_to`.
///
/// `on_progress` is called with the current percentage each time the source
/// reports a new whole percentage point. Neither stream is finished here.
pub fn trim<F>(
    source: &mut FastqSource,
    output: &mut FastqOutput,
    trim_to: Option<usize>,
    mut on_progress: F,
) -> Result<TrimStats, FastqError>
where
    F: FnMut(f64),
{
    let mut stats = TrimStats::default();
    let trimmed_before = source.records_trimmed();

    while source.next(trim_to)? {
        if source.percentage_available() {
            on_progress(source.percentage());
        }
        output.store(source.current_entry())?;
        stats.records += 1;
    }
    // Exhaustion can still move the percentage (trailing bytes, gzip trailer).
    if source.percentage_available() {
        on_progress(source.percentage());
    }

    stats.trimmed = source.records_trimmed() - trimmed_before;
    Ok(stats)
}

/// Trim `input` into `output`, both using `codec`.
///
/// The output is finished on success. On error both files are released and
/// the output is left as far as it was written.
pub fn trim_file<P, Q, F>(
    input: P,
    output: Q,
    trim_to: Option<usize>,
    codec: Codec,
    opts: &StreamOptions,
    on_progress: F,
) -> Result<TrimStats, FastqError>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
    F: FnMut(f64),
{
    let mut source = FastqSource::open(input, codec, opts)?;
    let mut sink = FastqOutput::create(output, codec, opts)?;

    let stats = trim(&mut source, &mut sink, trim_to, on_progress)?;

    source.close();
    sink.finish()?;
    log::info!("trimmed {} of {} records", stats.trimmed, stats.records);
    Ok(stats)
}
