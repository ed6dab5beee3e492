//! XSC fixed-width format types and constants.
//!
//! Defines the 100-character header layout and the record types produced by
//! the reader. A file is a sequence of blocks: one header line followed by
//! whitespace-separated cross-section values spanning as many lines as needed.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Result, XscError};

/// Conventional file extension for cross-section files.
pub const XSC_EXTENSION: &str = "xsc";

/// Length of a header line in characters.
pub const HEADER_LEN: usize = 100;

/// Broadener substituted when the header field is blank.
pub const SELF_BROADENER: &str = "self";

/// Torr → pascal conversion factor applied to the pressure axis.
pub const TORR_TO_PASCAL: f64 = 133.322368;

/// Header field widths, left to right. Sums to [`HEADER_LEN`].
pub const FIELD_WIDTHS: [usize; 12] = [20, 10, 10, 7, 7, 6, 10, 5, 15, 4, 3, 3];

/// Decoded header line of one cross-section block.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct HeaderRecord {
    /// Chemical formula, possibly followed by other tokens (e.g. "CCl4").
    pub molecule_name: String,
    /// Lower wavenumber bound, cm⁻¹.
    pub min_wavenumber: f64,
    /// Upper wavenumber bound, cm⁻¹.
    pub max_wavenumber: f64,
    /// Declared number of values in the payload.
    pub number_of_points: usize,
    /// Temperature, K.
    pub temperature: f64,
    /// Pressure, Torr.
    pub pressure: f64,
    pub max_cross_section_value: f64,
    pub instrument_resolution: f64,
    pub common_name: String,
    /// Unused 4-character field; kept so headers can be rewritten unchanged.
    pub empty: String,
    /// Broadening species; "self" when blank in the file.
    pub broadener: String,
    pub reference: String,
}

/// One header with its reconstructed grid and values.
///
/// `grid.len() == values.len() == header.number_of_points`.
#[derive(Debug, Clone, PartialEq)]
pub struct CrossSectionRecord {
    pub header: HeaderRecord,
    /// Wavenumber axis, ascending.
    pub grid: Vec<f64>,
    /// Cross-section values, cm²/molecule.
    pub values: Vec<f64>,
}

impl CrossSectionRecord {
    #[must_use]
    pub fn temperature(&self) -> f64 {
        self.header.temperature
    }

    /// Pressure in the file's native unit (Torr).
    #[must_use]
    pub fn pressure(&self) -> f64 {
        self.header.pressure
    }
}

/// All records read from one source file, in file order.
pub type Dataset = Vec<CrossSectionRecord>;

/// Parse a header line. Only the first [`HEADER_LEN`] characters are used.
pub fn parse_header(line: &str) -> Result<HeaderRecord> {
    parse_header_at(line, 0)
}

/// Same as [`parse_header`], reporting `line_no` in format errors.
pub(crate) fn parse_header_at(line: &str, line_no: usize) -> Result<HeaderRecord> {
    if line.len() < HEADER_LEN {
        return Err(XscError::format(
            line_no,
            format!(
                "header line has {} characters, expected {}",
                line.len(),
                HEADER_LEN
            ),
        ));
    }

    let mut fields = [""; 12];
    let mut start = 0;
    for (slot, width) in fields.iter_mut().zip(FIELD_WIDTHS) {
        let end = start + width;
        *slot = line
            .get(start..end)
            .ok_or_else(|| {
                XscError::format(line_no, format!("field boundary {start}..{end} splits a character"))
            })?
            .trim();
        start = end;
    }

    let [molecule_name, min_wn, max_wn, npts, temperature, pressure, max_xsec, resolution, common_name, empty, broadener, reference] =
        fields;

    let broadener = if broadener.is_empty() {
        SELF_BROADENER
    } else {
        broadener
    };

    Ok(HeaderRecord {
        molecule_name: molecule_name.to_string(),
        min_wavenumber: parse_float(min_wn, "min_wavenumber", line_no)?,
        max_wavenumber: parse_float(max_wn, "max_wavenumber", line_no)?,
        number_of_points: npts.parse().map_err(|_| {
            XscError::format(line_no, format!("number_of_points is not an integer: {npts:?}"))
        })?,
        temperature: parse_float(temperature, "temperature", line_no)?,
        pressure: parse_float(pressure, "pressure", line_no)?,
        max_cross_section_value: parse_float(max_xsec, "max_cross_section_value", line_no)?,
        instrument_resolution: parse_float(resolution, "instrument_resolution", line_no)?,
        common_name: common_name.to_string(),
        empty: empty.to_string(),
        broadener: broadener.to_string(),
        reference: reference.to_string(),
    })
}

fn parse_float(field: &str, name: &str, line_no: usize) -> Result<f64> {
    field
        .parse()
        .map_err(|_| XscError::format(line_no, format!("{name} is not a number: {field:?}")))
}
