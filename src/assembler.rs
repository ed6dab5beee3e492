//! Dataset assembler: merge the records of one molecule into an [`OpacityTable`].
//!
//! Records from all files are ordered by (pressure, temperature), their grids
//! reconciled onto one wavenumber axis, and the values laid out as a dense
//! pressure × temperature × wavenumber cube.

use std::cmp::Ordering;
use std::path::Path;

use log::{debug, info, warn};

use crate::error::{Result, XscError};
use crate::format::{CrossSectionRecord, Dataset, TORR_TO_PASCAL};
use crate::grid::{grids_close, interp_clamped, mean_spacing, merge_grids};
use crate::reader::load_file;
use crate::table::{InterpMode, OpacityTable};

/// Maps the raw molecule token from a header to the name consumers use.
pub type MoleculeSanitizer = fn(&str) -> String;

/// Leaves the molecule token unchanged.
#[must_use]
pub fn keep_molecule_name(raw: &str) -> String {
    raw.to_string()
}

/// Options for assembling a table.
#[derive(Debug, Clone)]
pub struct AssembleOptions {
    /// Mode attached to the produced table.
    pub interpolation: InterpMode,
    /// Applied to the first token of the first record's molecule name.
    pub sanitizer: MoleculeSanitizer,
}

impl Default for AssembleOptions {
    fn default() -> Self {
        Self {
            interpolation: InterpMode::Linear,
            sanitizer: keep_molecule_name,
        }
    }
}

impl AssembleOptions {
    #[must_use]
    pub fn with_interpolation(interpolation: InterpMode) -> Self {
        Self {
            interpolation,
            ..Self::default()
        }
    }
}

/// Outcome of comparing every record's grid with the first one.
#[derive(Debug, Clone, PartialEq)]
pub enum GridReconciliation {
    /// All grids agree; values are used as read.
    SharedGrid(Vec<f64>),
    /// Grids differ; values were resampled onto the union axis.
    MergedGrid(Vec<f64>),
}

impl GridReconciliation {
    /// Decide between the two cases and resample `records` in place when merging.
    pub fn reconcile(records: &mut [CrossSectionRecord]) -> Self {
        let Some(first) = records.first() else {
            return GridReconciliation::SharedGrid(Vec::new());
        };
        if records.iter().all(|r| grids_close(&r.grid, &first.grid)) {
            return GridReconciliation::SharedGrid(first.grid.clone());
        }

        let merged = merge_grids(records.iter().map(|r| r.grid.as_slice()));
        debug!(
            "grids differ across {} records; resampling onto {} merged points",
            records.len(),
            merged.len()
        );
        for record in records.iter_mut() {
            record.values = interp_clamped(&merged, &record.grid, &record.values);
        }
        GridReconciliation::MergedGrid(merged)
    }

    #[must_use]
    pub fn axis(&self) -> &[f64] {
        match self {
            GridReconciliation::SharedGrid(axis) | GridReconciliation::MergedGrid(axis) => axis,
        }
    }

    #[must_use]
    pub fn into_axis(self) -> Vec<f64> {
        match self {
            GridReconciliation::SharedGrid(axis) | GridReconciliation::MergedGrid(axis) => axis,
        }
    }
}

fn by_pressure_then_temperature(a: &CrossSectionRecord, b: &CrossSectionRecord) -> Ordering {
    a.pressure()
        .total_cmp(&b.pressure())
        .then_with(|| a.temperature().total_cmp(&b.temperature()))
}

fn unique_sorted(mut values: Vec<f64>) -> Vec<f64> {
    values.sort_by(f64::total_cmp);
    values.dedup();
    values
}

/// Assemble the datasets of one molecule (one per file) into a table.
pub fn assemble(datasets: Vec<Dataset>, options: &AssembleOptions) -> Result<OpacityTable> {
    let mut records: Vec<CrossSectionRecord> = datasets.into_iter().flatten().collect();
    let Some(first) = records.first() else {
        return Err(XscError::EmptyDataset);
    };

    // Named after the first record of the first file, before any reordering.
    let raw_name = first
        .header
        .molecule_name
        .split_whitespace()
        .next()
        .unwrap_or_default();
    let molecule_name = (options.sanitizer)(raw_name);

    // Stable: equal (P, T) keep encounter order.
    records.sort_by(by_pressure_then_temperature);

    let pressures = unique_sorted(records.iter().map(CrossSectionRecord::pressure).collect());
    let temperatures = unique_sorted(records.iter().map(CrossSectionRecord::temperature).collect());

    let (np, nt) = (pressures.len(), temperatures.len());
    let shape_error = || XscError::ShapeMismatch {
        records: records.len(),
        pressures: np,
        temperatures: nt,
    };
    if records.len() != np * nt {
        return Err(shape_error());
    }
    // With the sort above, slot (i, j) must hold pressures[i] and temperatures[j].
    for (k, record) in records.iter().enumerate() {
        let (i, j) = (k / nt, k % nt);
        if record.pressure() != pressures[i] || record.temperature() != temperatures[j] {
            return Err(shape_error());
        }
    }

    let reconciliation = GridReconciliation::reconcile(&mut records);
    let wavenumbers = reconciliation.into_axis();
    let nw = wavenumbers.len();

    let mut cross_sections = Vec::with_capacity(np * nt * nw);
    for record in &records {
        cross_sections.extend_from_slice(&record.values);
    }
    debug_assert_eq!(cross_sections.len(), np * nt * nw);

    let negatives = cross_sections.iter().filter(|v| **v < 0.0).count();
    if negatives > 0 {
        warn!("{molecule_name}: {negatives} negative cross-section values kept as read");
    }

    let pressures: Vec<f64> = pressures.into_iter().map(|p| p * TORR_TO_PASCAL).collect();
    let resolution = mean_spacing(&wavenumbers);

    info!(
        "assembled {molecule_name}: {np} pressures x {nt} temperatures x {nw} wavenumbers (resolution {resolution})"
    );

    Ok(OpacityTable {
        molecule_name,
        interpolation: options.interpolation,
        pressures,
        temperatures,
        wavenumbers,
        cross_sections,
        resolution,
    })
}

/// Read each file and assemble the result. Any bad file fails the molecule.
pub fn load_molecule<P: AsRef<Path>>(files: &[P], options: &AssembleOptions) -> Result<OpacityTable> {
    let datasets = files
        .iter()
        .map(load_file)
        .collect::<Result<Vec<Dataset>>>()?;
    assemble(datasets, options)
}
