use fastq_trim::{Codec, FastqError, FastqSource, FormatError, StreamOptions};
use std::fs::File;
use std::io::Write;
use tempfile::tempdir;

const SAMPLE: &str = "\
@read1 desc
ACGTN
+read1 desc
!!!!!
@read2
ACGT
+
####";

fn from_str(data: &'static str) -> FastqSource {
    FastqSource::from_reader(
        data.as_bytes(),
        Codec::Plain,
        Some(data.len() as u64),
        &StreamOptions::default(),
    )
}

fn format_kind(err: FastqError) -> FormatError {
    match err {
        FastqError::Format { source, .. } => source,
        other => panic!("expected format error, got {other}"),
    }
}

#[test]
fn parse_two_records() {
    let mut fq = from_str(SAMPLE);

    assert!(fq.next(None).unwrap());
    let r1 = fq.current_entry();
    assert_eq!(r1.id, b"@read1 desc");
    assert_eq!(r1.name(), b"read1");
    assert_eq!(r1.seq, b"ACGTN");
    assert_eq!(r1.plus, b"+read1 desc");
    assert_eq!(r1.qual, b"!!!!!");

    assert!(fq.next(None).unwrap());
    let r2 = fq.current_entry();
    assert_eq!(r2.id, b"@read2");
    assert_eq!(r2.seq, b"ACGT");
    assert_eq!(r2.plus, b"+");
    assert_eq!(r2.qual, b"####");

    assert!(!fq.next(None).unwrap());
    // end of input leaves the last record in place
    assert_eq!(fq.current_entry().id, b"@read2");
    assert_eq!(fq.records_read(), 2);
    assert!(!fq.next(None).unwrap());
}

#[test]
fn trim_cuts_long_reads_and_keeps_short_ones() {
    let data = "\
@long
ACGTACGTAC
+
IIIIIIIIII
@short
ACG
+
III
@exact
ACGTA
+
JJJJJ
";
    let mut fq = from_str(data);

    assert!(fq.next(Some(5)).unwrap());
    assert_eq!(fq.current_entry().seq, b"ACGTA");
    assert_eq!(fq.current_entry().qual, b"IIIII");

    assert!(fq.next(Some(5)).unwrap());
    assert_eq!(fq.current_entry().seq, b"ACG");
    assert_eq!(fq.current_entry().qual, b"III");

    assert!(fq.next(Some(5)).unwrap());
    assert_eq!(fq.current_entry().len(), 5);
    assert_eq!(fq.current_entry().qual.len(), 5);

    assert!(!fq.next(Some(5)).unwrap());
    assert_eq!(fq.records_read(), 3);
    assert_eq!(fq.records_trimmed(), 1);
}

#[test]
fn truncated_trailing_record_is_format_error() {
    let data = "@r1\nACGT\n+\n!!!!\n@r2\nACGT\n";
    let mut fq = from_str(data);

    assert!(fq.next(None).unwrap());
    let err = fq.next(None).unwrap_err();
    assert!(err.is_format());
    assert!(matches!(format_kind(err), FormatError::Truncated { lines: 2 }));
}

#[test]
fn empty_input_is_clean_eof() {
    let mut fq = from_str("");
    assert!(!fq.next(Some(5)).unwrap());
    assert_eq!(fq.records_read(), 0);
    assert_eq!(fq.percentage(), 100.0);
}

#[test]
fn trailing_blank_lines_are_clean_eof() {
    let mut fq = from_str("@r1\nAC\n+\n!!\n\n\n");
    assert!(fq.next(None).unwrap());
    assert!(!fq.next(None).unwrap());

    let mut fq = from_str("@r\nA\n+\n!\n\n\n\n\n\r\n");
    assert!(fq.next(None).unwrap());
    assert!(!fq.next(None).unwrap());
    assert_eq!(fq.percentage(), 100.0);
}

#[test]
fn blank_lines_before_a_header_are_skipped() {
    let mut fq = from_str("\n@r1\nAC\n+\n!!\n\n\n@r2\nG\n+\n#\n");
    assert!(fq.next(None).unwrap());
    assert_eq!(fq.current_entry().id, b"@r1");
    assert!(fq.next(None).unwrap());
    assert_eq!(fq.current_entry().id, b"@r2");
    assert!(!fq.next(None).unwrap());
}

#[test]
fn crlf_terminators_are_stripped() {
    let mut fq = from_str("@r1 x\r\nACGT\r\n+\r\n!!!!\r\n");
    assert!(fq.next(None).unwrap());
    let r = fq.current_entry();
    assert_eq!(r.id, b"@r1 x");
    assert_eq!(r.seq, b"ACGT");
    assert_eq!(r.plus, b"+");
    assert_eq!(r.qual, b"!!!!");
}

#[test]
fn structural_errors_are_reported() {
    let err = from_str("r1\nACGT\n+\n!!!!\n").next(None).unwrap_err();
    assert!(matches!(format_kind(err), FormatError::MissingHeader));

    let err = from_str(">r1\nACGT\n+\n!!!!\n").next(None).unwrap_err();
    assert!(matches!(format_kind(err), FormatError::FastaHeaderDetected));

    let err = from_str("@r1\nACGT\n-\n!!!!\n").next(None).unwrap_err();
    assert!(matches!(format_kind(err), FormatError::MissingPlus));

    let err = from_str("@r1\nACGT\n+\n!!!\n").next(None).unwrap_err();
    assert!(matches!(
        format_kind(err),
        FormatError::LengthMismatch { seq: 4, qual: 3 }
    ));
}

#[test]
fn error_context_points_at_record_end() {
    let mut fq = from_str("@r1\nAC\n+\n!!\n@r2\nACGT\n+\n!\n");
    assert!(fq.next(None).unwrap());
    let err = fq.next(None).unwrap_err();
    let ctx = err.context();
    assert_eq!(ctx.line_num, 8);
    assert_eq!(ctx.byte_pos, 25);
}

#[test]
fn end_to_end_three_records_trimmed_to_five() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("three.fastq");
    {
        let mut f = File::create(&path).unwrap();
        for i in 1..=3 {
            writeln!(f, "@read{i}").unwrap();
            writeln!(f, "ACGTACGTAC").unwrap();
            writeln!(f, "+read{i}").unwrap();
            writeln!(f, "ABCDEFGHIJ").unwrap();
        }
    }

    let mut fq = FastqSource::open(&path, Codec::Plain, &StreamOptions::default()).unwrap();
    assert_eq!(fq.path(), Some(path.as_path()));

    for i in 1..=3 {
        assert!(fq.next(Some(5)).unwrap());
        let r = fq.current_entry();
        assert_eq!(r.id, format!("@read{i}").as_bytes());
        assert_eq!(r.plus, format!("+read{i}").as_bytes());
        assert_eq!(r.seq, b"ACGTA");
        assert_eq!(r.qual, b"ABCDE");
        if i < 3 {
            assert!(fq.percentage() < 100.0);
        }
    }
    assert_eq!(fq.percentage(), 100.0);
    assert!(!fq.next(Some(5)).unwrap());
    assert_eq!(fq.percentage(), 100.0);
    fq.close();
}

#[test]
fn percentage_is_monotone_and_throttled() {
    let mut data = String::new();
    for i in 0..500 {
        data.push_str(&format!("@r{i}\nACGTACGTAC\n+\nIIIIIIIIII\n"));
    }
    let total = data.len() as u64;
    let mut fq = FastqSource::from_reader(
        std::io::Cursor::new(data.into_bytes()),
        Codec::Plain,
        Some(total),
        &StreamOptions::default(),
    );

    let mut last = 0.0;
    let mut reported: Vec<u32> = Vec::new();
    while fq.next(None).unwrap() {
        let p = fq.percentage();
        assert!(p >= last && p <= 100.0);
        last = p;
        if fq.percentage_available() {
            reported.push(p.floor() as u32);
        }
    }
    assert_eq!(fq.percentage(), 100.0);
    assert!(reported.windows(2).all(|w| w[0] < w[1]));
    assert!(reported.len() <= 101);
    assert_eq!(reported.last(), Some(&100));
}

#[test]
fn unknown_size_reports_zero() {
    let mut fq = FastqSource::from_reader(
        "@r\nA\n+\n!\n".as_bytes(),
        Codec::Plain,
        None,
        &StreamOptions::default(),
    );
    assert!(fq.next(None).unwrap());
    assert_eq!(fq.percentage(), 0.0);
    assert!(!fq.percentage_available());
    assert!(!fq.next(None).unwrap());
    assert_eq!(fq.percentage(), 0.0);
}

#[test]
fn iterator_yields_owned_entries() {
    let names: Vec<Vec<u8>> = from_str(SAMPLE)
        .map(|r| r.unwrap().name().to_vec())
        .collect();
    assert_eq!(names, vec![b"read1".to_vec(), b"read2".to_vec()]);
}

#[test]
fn small_chunk_size_parses_long_lines() {
    let opts = StreamOptions {
        chunk_size: 3,
        ..StreamOptions::default()
    };
    let data = "@a long header line\nACGTACGTACGTACGT\n+\nIIIIIIIIIIIIIIII\n";
    let mut fq = FastqSource::from_reader(data.as_bytes(), Codec::Plain, None, &opts);
    assert!(fq.next(Some(8)).unwrap());
    assert_eq!(fq.current_entry().id, b"@a long header line");
    assert_eq!(fq.current_entry().seq, b"ACGTACGT");
}

#[test]
fn missing_file_is_io_error() {
    let dir = tempdir().unwrap();
    let err = FastqSource::open(
        dir.path().join("nope.fq"),
        Codec::Plain,
        &StreamOptions::default(),
    )
    .err()
    .unwrap();
    assert!(matches!(err, FastqError::Io { .. }));
}
