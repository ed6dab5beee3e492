//! XSC reader: stream header + payload blocks out of a single source.
//!
//! Does not look across blocks; grouping and grid reconciliation happen in
//! the assembler.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use log::{debug, trace};

use crate::error::{Result, XscError};
use crate::format::{parse_header_at, CrossSectionRecord, Dataset, HeaderRecord};
use crate::grid::build_grid;

enum ReaderState {
    AwaitHeader,
    AwaitPayload {
        header: HeaderRecord,
        grid: Vec<f64>,
        values: Vec<f64>,
    },
    /// End of input or a previous error; the reader yields nothing more.
    Finished,
}

/// Lazy, single-pass reader of [`CrossSectionRecord`]s.
///
/// Iterating yields `Result`s; after the first error the iterator is fused.
pub struct XscReader<R> {
    source: R,
    state: ReaderState,
    line: String,
    /// 1-based number of the last line read.
    line_no: usize,
}

impl XscReader<BufReader<File>> {
    /// Open a file for reading. Nothing is parsed until the first `next()`.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        Ok(Self::new(BufReader::new(file)))
    }
}

impl<R: BufRead> XscReader<R> {
    pub fn new(source: R) -> Self {
        XscReader {
            source,
            state: ReaderState::AwaitHeader,
            line: String::new(),
            line_no: 0,
        }
    }

    /// Read the next line into `self.line` without its terminator.
    /// Returns `false` at end of input.
    fn read_line(&mut self) -> Result<bool> {
        self.line.clear();
        if self.source.read_line(&mut self.line)? == 0 {
            return Ok(false);
        }
        self.line_no += 1;
        let trimmed_len = self.line.trim_end_matches(['\n', '\r']).len();
        self.line.truncate(trimmed_len);
        Ok(true)
    }

    /// Advance the state machine until a record is complete or input ends.
    pub fn next_record(&mut self) -> Result<Option<CrossSectionRecord>> {
        loop {
            match std::mem::replace(&mut self.state, ReaderState::Finished) {
                ReaderState::Finished => return Ok(None),
                ReaderState::AwaitHeader => {
                    if !self.read_line()? {
                        return Ok(None);
                    }
                    let header = parse_header_at(&self.line, self.line_no)?;
                    let grid = build_grid(
                        header.min_wavenumber,
                        header.max_wavenumber,
                        header.number_of_points,
                    )?;
                    debug!(
                        "line {}: header {} T={} P={} n={}",
                        self.line_no,
                        header.molecule_name,
                        header.temperature,
                        header.pressure,
                        header.number_of_points
                    );
                    let values = Vec::with_capacity(header.number_of_points);
                    self.state = ReaderState::AwaitPayload { header, grid, values };
                }
                ReaderState::AwaitPayload {
                    header,
                    grid,
                    mut values,
                } => {
                    let target = header.number_of_points;
                    while values.len() < target {
                        if !self.read_line()? {
                            return Err(XscError::IncompleteRecord {
                                expected: target,
                                found: values.len(),
                            });
                        }
                        for token in self.line.split_whitespace() {
                            values.push(parse_value(token, self.line_no)?);
                        }
                    }
                    if values.len() > target {
                        trace!(
                            "line {}: discarding {} excess values",
                            self.line_no,
                            values.len() - target
                        );
                        values.truncate(target);
                    }
                    self.state = ReaderState::AwaitHeader;
                    return Ok(Some(CrossSectionRecord {
                        header,
                        grid,
                        values,
                    }));
                }
            }
        }
    }
}

impl<R: BufRead> Iterator for XscReader<R> {
    type Item = Result<CrossSectionRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        // next_record leaves the state at Finished on every error path.
        self.next_record().transpose()
    }
}

fn parse_value(token: &str, line_no: usize) -> Result<f64> {
    match token.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        Ok(_) => Err(XscError::format(
            line_no,
            format!("cross-section value is not finite: {token:?}"),
        )),
        Err(_) => Err(XscError::format(
            line_no,
            format!("cross-section value is not a number: {token:?}"),
        )),
    }
}

/// Read every record of a file. Fails on the first malformed block.
pub fn load_file<P: AsRef<Path>>(path: P) -> Result<Dataset> {
    let path = path.as_ref();
    let records = XscReader::open(path)?.collect::<Result<Dataset>>()?;
    debug!("{}: {} records", path.display(), records.len());
    Ok(records)
}

/// Parse only the first header line of a file.
pub fn read_first_header<P: AsRef<Path>>(path: P) -> Result<HeaderRecord> {
    let mut reader = BufReader::new(File::open(path)?);
    let mut line = String::new();
    reader.read_line(&mut line)?;
    parse_header_at(line.trim_end_matches(['\n', '\r']), 1)
}
