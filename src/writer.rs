//! XSC writer: render headers and records back into the fixed-width format.
//!
//! Used to produce fixtures and to re-emit parsed files. Writes header line +
//! payload lines; values are written in scientific notation.

use std::io::Write;

use crate::error::{Result, XscError};
use crate::format::{CrossSectionRecord, HeaderRecord, FIELD_WIDTHS, HEADER_LEN};

/// Values per payload line used by [`write_dataset`] callers that don't care.
pub const DEFAULT_VALUES_PER_LINE: usize = 10;

enum Align {
    Left,
    Right,
}

/// Render a header as exactly [`HEADER_LEN`] characters.
///
/// Fails if any field does not fit its column or contains non-ASCII text.
pub fn format_header(header: &HeaderRecord) -> Result<String> {
    let fields: [(String, Align); 12] = [
        (header.molecule_name.clone(), Align::Left),
        (render_number(header.min_wavenumber), Align::Right),
        (render_number(header.max_wavenumber), Align::Right),
        (header.number_of_points.to_string(), Align::Right),
        (render_number(header.temperature), Align::Right),
        (render_number(header.pressure), Align::Right),
        (render_number(header.max_cross_section_value), Align::Right),
        (render_number(header.instrument_resolution), Align::Right),
        (header.common_name.clone(), Align::Left),
        (header.empty.clone(), Align::Left),
        (header.broadener.clone(), Align::Right),
        (header.reference.clone(), Align::Right),
    ];

    let mut line = String::with_capacity(HEADER_LEN);
    for ((text, align), width) in fields.iter().zip(FIELD_WIDTHS) {
        if !text.is_ascii() || text.len() > width {
            return Err(XscError::format(
                0,
                format!("{text:?} does not fit a {width}-character header field"),
            ));
        }
        match align {
            Align::Left => line.push_str(&format!("{text:<width$}")),
            Align::Right => line.push_str(&format!("{text:>width$}")),
        }
    }
    debug_assert_eq!(line.len(), HEADER_LEN);
    Ok(line)
}

/// Shortest round-trip rendering, plain or scientific.
fn render_number(value: f64) -> String {
    let plain = value.to_string();
    let sci = format!("{value:E}");
    if sci.len() < plain.len() {
        sci
    } else {
        plain
    }
}

/// Write one header line followed by the record's values, `values_per_line`
/// per payload line.
pub fn write_record<W: Write>(
    out: &mut W,
    record: &CrossSectionRecord,
    values_per_line: usize,
) -> Result<()> {
    let expected = record.header.number_of_points;
    if record.values.len() != expected {
        return Err(XscError::format(
            0,
            format!(
                "record carries {} values but its header declares {expected}",
                record.values.len()
            ),
        ));
    }

    writeln!(out, "{}", format_header(&record.header)?)?;
    for chunk in record.values.chunks(values_per_line.max(1)) {
        let line: Vec<String> = chunk.iter().map(|v| format!("{v:E}")).collect();
        writeln!(out, "{}", line.join(" "))?;
    }
    Ok(())
}

/// Write every record of a dataset back to back.
pub fn write_dataset<W: Write>(
    out: &mut W,
    records: &[CrossSectionRecord],
    values_per_line: usize,
) -> Result<()> {
    for record in records {
        write_record(out, record, values_per_line)?;
    }
    Ok(())
}
