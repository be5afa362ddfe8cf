use clap::Parser;
use std::ffi::OsString;
use std::io::Write;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use fastq_trim::{Codec, StreamOptions, trim_file};

#[derive(Parser)]
#[command(name = "fastq-trim")]
#[command(about = "Trim Illumina reads to a fixed length", long_about = None)]
#[command(version)]
struct Cli {
    /// FASTQ file to be trimmed (gzip if it ends with .gz)
    #[arg(short = 'i', long, value_name = "INPUT")]
    input: PathBuf,

    /// Expected length of trimmed sequences
    #[arg(short = 'l', long, value_name = "LENGTH")]
    length: NonZeroUsize,

    /// Where trimmed sequences will be written (default: INPUT-TRIMMED-TO-LENGTH)
    #[arg(short = 'o', long, value_name = "OUTPUT")]
    output: Option<PathBuf>,

    /// Do not print progress
    #[arg(short = 'q', long)]
    quiet: bool,
}

/// Output path for `input` trimmed to `length`.
///
/// Compressed inputs always get a `.gz` output.
fn output_path(input: &Path, output: Option<&Path>, length: usize) -> PathBuf {
    let compressed = Codec::from_path(input).is_compressed();
    match output {
        Some(out) if compressed && Codec::from_path(out) != Codec::Gzip => {
            let mut s = out.as_os_str().to_owned();
            s.push(".gz");
            PathBuf::from(s)
        }
        Some(out) => out.to_path_buf(),
        None if compressed => {
            let mut s: OsString = input.with_extension("").into_os_string();
            s.push(format!("-TRIMMED-TO-{length}.gz"));
            PathBuf::from(s)
        }
        None => {
            let mut s = input.as_os_str().to_owned();
            s.push(format!("-TRIMMED-TO-{length}"));
            PathBuf::from(s)
        }
    }
}

fn main() {
    let cli = Cli::parse();

    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .format_timestamp(None)
        .format_target(false)
        .init();

    let codec = Codec::from_path(&cli.input);
    let length = cli.length.get();
    let output = output_path(&cli.input, cli.output.as_deref(), length);

    log::info!(
        "trimming {} to {} bp into {}",
        cli.input.display(),
        length,
        output.display()
    );

    let quiet = cli.quiet;
    let result = trim_file(
        &cli.input,
        &output,
        Some(length),
        codec,
        &StreamOptions::default(),
        |pct| {
            if !quiet {
                let mut err = std::io::stderr().lock();
                let _ = write!(err, "\r{pct:.0}%");
                let _ = err.flush();
            }
        },
    );
    if !quiet {
        eprintln!();
    }

    if let Err(e) = result {
        log::error!("{}", e);
        std::process::exit(1);
    }
}
