//! The assembled opacity table handed to interpolation consumers.

use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::XscError;

/// Interpolation mode requested by the consumer for point queries.
///
/// The table itself is identical for every mode; the mode travels with it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase", try_from = "String"))]
pub enum InterpMode {
    #[default]
    Linear,
    /// Exponential (log-linear) in temperature.
    Exp,
}

impl InterpMode {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            InterpMode::Linear => "linear",
            InterpMode::Exp => "exp",
        }
    }
}

impl FromStr for InterpMode {
    type Err = XscError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "linear" => Ok(InterpMode::Linear),
            "exp" => Ok(InterpMode::Exp),
            _ => Err(XscError::InvalidInterpMode(s.to_string())),
        }
    }
}

impl TryFrom<String> for InterpMode {
    type Error = XscError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl fmt::Display for InterpMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Cross-section cube over (pressure, temperature, wavenumber).
///
/// Built once by the assembler; read-only afterwards. The cube is stored
/// row-major, wavenumber fastest.
#[derive(Debug, Clone, PartialEq)]
pub struct OpacityTable {
    pub(crate) molecule_name: String,
    pub(crate) interpolation: InterpMode,
    pub(crate) pressures: Vec<f64>,
    pub(crate) temperatures: Vec<f64>,
    pub(crate) wavenumbers: Vec<f64>,
    pub(crate) cross_sections: Vec<f64>,
    pub(crate) resolution: f64,
}

impl OpacityTable {
    #[must_use]
    pub fn molecule_name(&self) -> &str {
        &self.molecule_name
    }

    #[must_use]
    pub fn interpolation(&self) -> InterpMode {
        self.interpolation
    }

    /// Pressure axis in pascals, ascending.
    #[must_use]
    pub fn pressures(&self) -> &[f64] {
        &self.pressures
    }

    /// Temperature axis in kelvin, ascending.
    #[must_use]
    pub fn temperatures(&self) -> &[f64] {
        &self.temperatures
    }

    /// Wavenumber axis in cm⁻¹, ascending.
    #[must_use]
    pub fn wavenumbers(&self) -> &[f64] {
        &self.wavenumbers
    }

    /// Flat cube, index `(p * nt + t) * nw + w`.
    #[must_use]
    pub fn cross_sections(&self) -> &[f64] {
        &self.cross_sections
    }

    /// `(pressures, temperatures, wavenumbers)` lengths.
    #[must_use]
    pub fn shape(&self) -> (usize, usize, usize) {
        (
            self.pressures.len(),
            self.temperatures.len(),
            self.wavenumbers.len(),
        )
    }

    /// Spectrum at one (pressure, temperature) node.
    #[must_use]
    pub fn spectrum(&self, p: usize, t: usize) -> Option<&[f64]> {
        let (np, nt, nw) = self.shape();
        if p >= np || t >= nt {
            return None;
        }
        let start = (p * nt + t) * nw;
        Some(&self.cross_sections[start..start + nw])
    }

    #[must_use]
    pub fn value(&self, p: usize, t: usize, w: usize) -> Option<f64> {
        self.spectrum(p, t)?.get(w).copied()
    }

    /// Mean wavenumber spacing of the axis.
    #[must_use]
    pub fn resolution(&self) -> f64 {
        self.resolution
    }

    /// SHA-256 over molecule name, axes and cube, as lowercase hex.
    ///
    /// Two assemblies of the same inputs give the same digest.
    #[must_use]
    pub fn digest(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.molecule_name.as_bytes());
        for axis in [
            &self.pressures,
            &self.temperatures,
            &self.wavenumbers,
            &self.cross_sections,
        ] {
            hasher.update((axis.len() as u64).to_le_bytes());
            for v in axis {
                hasher.update(v.to_le_bytes());
            }
        }
        hasher
            .finalize()
            .iter()
            .map(|b| format!("{b:02x}"))
            .collect()
    }

    #[must_use]
    pub fn summary(&self) -> TableSummary {
        let (np, nt, nw) = self.shape();
        TableSummary {
            molecule: self.molecule_name.clone(),
            interpolation: self.interpolation,
            pressures_pa: self.pressures.clone(),
            temperatures_k: self.temperatures.clone(),
            wavenumber_min: self.wavenumbers.first().copied().unwrap_or(f64::NAN),
            wavenumber_max: self.wavenumbers.last().copied().unwrap_or(f64::NAN),
            shape: [np, nt, nw],
            resolution: self.resolution,
            digest: self.digest(),
        }
    }
}

/// Axis overview of a table, without the cube.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct TableSummary {
    pub molecule: String,
    pub interpolation: InterpMode,
    pub pressures_pa: Vec<f64>,
    pub temperatures_k: Vec<f64>,
    pub wavenumber_min: f64,
    pub wavenumber_max: f64,
    pub shape: [usize; 3],
    pub resolution: f64,
    pub digest: String,
}
