//! Reader tests: stream records out of in-memory and on-disk .xsc text.

use std::io::{Cursor, Write};

use xsc::{format_header, load_file, read_first_header, HeaderRecord, XscError, XscReader, HEADER_LEN};

fn header(pressure: f64, temperature: f64, n: usize) -> HeaderRecord {
    HeaderRecord {
        molecule_name: "CF4".to_string(),
        min_wavenumber: 1000.0,
        max_wavenumber: 1000.0 + (n - 1) as f64,
        number_of_points: n,
        temperature,
        pressure,
        max_cross_section_value: 1e-18,
        instrument_resolution: 0.01,
        common_name: "PFC-14".to_string(),
        empty: String::new(),
        broadener: "air".to_string(),
        reference: "1".to_string(),
    }
}

fn header_line(pressure: f64, temperature: f64, n: usize) -> String {
    format_header(&header(pressure, temperature, n)).unwrap()
}

/// Tokens split unevenly across lines; excess on the last line is dropped.
#[test]
fn reader_splits_payload_across_lines_and_truncates() {
    let text = format!("{}\n1.0 2.0\n3.0\n\n4.0 5.0 99.0 98.0\n", header_line(10.0, 296.0, 5));
    let records: Vec<_> = XscReader::new(Cursor::new(text))
        .collect::<Result<_, _>>()
        .unwrap();

    assert_eq!(records.len(), 1);
    let r = &records[0];
    assert_eq!(r.values, vec![1.0, 2.0, 3.0, 4.0, 5.0]);
    assert_eq!(r.grid, vec![1000.0, 1001.0, 1002.0, 1003.0, 1004.0]);
    assert_eq!(r.grid.len(), r.header.number_of_points);
}

#[test]
fn reader_yields_consecutive_blocks_in_order() {
    let text = format!(
        "{}\n1 2 3\n{}\n4 5\n6\n",
        header_line(1.0, 200.0, 3),
        header_line(2.0, 250.0, 3)
    );
    let mut reader = XscReader::new(Cursor::new(text));

    let first = reader.next().unwrap().unwrap();
    assert_eq!(first.header.pressure, 1.0);
    assert_eq!(first.values, vec![1.0, 2.0, 3.0]);

    let second = reader.next().unwrap().unwrap();
    assert_eq!(second.header.temperature, 250.0);
    assert_eq!(second.values, vec![4.0, 5.0, 6.0]);

    assert!(reader.next().is_none());
    assert!(reader.next().is_none());
}

#[test]
fn reader_accepts_crlf_line_endings() {
    let text = format!("{}\r\n1E-20 2E-20\r\n{}\r\n3 4\r\n", header_line(1.0, 200.0, 2), header_line(1.0, 300.0, 2));
    let records: Vec<_> = XscReader::new(Cursor::new(text))
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].values, vec![1e-20, 2e-20]);
    assert_eq!(records[1].values, vec![3.0, 4.0]);
}

/// A blank line where a header belongs is a malformed header, then fused.
#[test]
fn reader_blank_line_between_blocks_is_format_error() {
    let text = format!("{}\r\n1E-20 2E-20\r\n\r\n{}\r\n3 4\r\n", header_line(1.0, 200.0, 2), header_line(1.0, 300.0, 2));
    let mut reader = XscReader::new(Cursor::new(text));
    assert!(reader.next().unwrap().is_ok());
    let err = reader.next().unwrap().unwrap_err();
    assert!(matches!(err, XscError::Format { line: 3, .. }), "{err}");
    assert!(reader.next().is_none());
}

#[test]
fn reader_leading_blank_line_is_format_error() {
    let text = format!("\n{}\n1 2\n", header_line(1.0, 200.0, 2));
    let err = XscReader::new(Cursor::new(text)).next().unwrap().unwrap_err();
    assert!(matches!(err, XscError::Format { line: 1, .. }), "{err}");
}

#[test]
fn reader_all_space_header_line_is_format_error() {
    let text = format!("{}\n1 2\n", " ".repeat(HEADER_LEN));
    let err = XscReader::new(Cursor::new(text)).next().unwrap().unwrap_err();
    assert!(matches!(err, XscError::Format { line: 1, .. }), "{err}");
}

#[test]
fn reader_empty_input_yields_nothing() {
    let mut reader = XscReader::new(Cursor::new(""));
    assert!(reader.next().is_none());
}

/// End of input before the declared count → IncompleteRecord, then fused.
#[test]
fn reader_truncated_payload() {
    let text = format!("{}\n1 2 3\n", header_line(1.0, 200.0, 5));
    let mut reader = XscReader::new(Cursor::new(text));
    match reader.next() {
        Some(Err(XscError::IncompleteRecord { expected, found })) => {
            assert_eq!((expected, found), (5, 3));
        }
        other => panic!("expected incomplete record, got {other:?}"),
    }
    assert!(reader.next().is_none());
}

#[test]
fn reader_non_numeric_token_reports_line() {
    let text = format!("{}\n1 2\n3 oops\n", header_line(1.0, 200.0, 4));
    let err = XscReader::new(Cursor::new(text))
        .next()
        .unwrap()
        .unwrap_err();
    match err {
        XscError::Format { line, reason } => {
            assert_eq!(line, 3);
            assert!(reason.contains("oops"), "{reason}");
        }
        other => panic!("expected format error, got {other}"),
    }
}

#[test]
fn reader_rejects_non_finite_values() {
    let text = format!("{}\n1 NaN\n", header_line(1.0, 200.0, 2));
    let err = XscReader::new(Cursor::new(text)).next().unwrap().unwrap_err();
    assert!(matches!(err, XscError::Format { line: 2, .. }), "{err}");
}

#[test]
fn reader_short_header_line() {
    let line = header_line(1.0, 200.0, 2);
    let text = format!("{}\n1 2\n", &line[..HEADER_LEN - 1]);
    let err = XscReader::new(Cursor::new(text)).next().unwrap().unwrap_err();
    assert!(matches!(err, XscError::Format { line: 1, .. }), "{err}");
}

#[test]
fn reader_single_point_header_is_grid_mismatch() {
    let mut h = header(1.0, 200.0, 2);
    h.number_of_points = 1;
    let text = format!("{}\n1\n", format_header(&h).unwrap());
    let err = XscReader::new(Cursor::new(text)).next().unwrap().unwrap_err();
    assert!(matches!(err, XscError::GridMismatch { expected: 1, .. }), "{err}");
}

#[test]
fn load_file_and_first_header_from_disk() {
    let mut file = tempfile::Builder::new().suffix(".xsc").tempfile().unwrap();
    write!(
        file,
        "{}\n1 2 3\n{}\n4 5 6\n",
        header_line(1.0, 200.0, 3),
        header_line(1.0, 300.0, 3)
    )
    .unwrap();
    file.flush().unwrap();

    let records = load_file(file.path()).unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[1].values, vec![4.0, 5.0, 6.0]);

    let first = read_first_header(file.path()).unwrap();
    assert_eq!(first, records[0].header);
}

#[test]
fn load_file_missing_path_is_io_error() {
    let err = load_file("/nonexistent/none.xsc").unwrap_err();
    assert!(matches!(err, XscError::Io(_)));
}
