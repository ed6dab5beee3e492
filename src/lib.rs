//! XSC — reader and assembler for HITRAN fixed-width cross-section files.
//!
//! This crate provides:
//! - **Format types** (`format`): header layout, `HeaderRecord`, `CrossSectionRecord`, `parse_header`.
//! - **Grid** (`grid`): wavenumber axis reconstruction and clamped linear resampling.
//! - **Reader** (`reader`): `XscReader`, a lazy record iterator, and `load_file(path)`.
//! - **Writer** (`writer`): `format_header` / `write_record`, the inverse of the reader.
//! - **Assembler** (`assembler`): `assemble` / `load_molecule` into an `OpacityTable`.
//! - **Discovery** (`discovery`) and **config** (`config`): scan a directory configured by `XscConfig`.
//! - **CLI** (binary `xsc`): inspect files, discover molecules, assemble tables.

pub mod assembler;
pub mod config;
pub mod discovery;
pub mod error;
pub mod format;
pub mod grid;
pub mod reader;
pub mod table;
pub mod writer;

pub use assembler::{
    assemble, keep_molecule_name, load_molecule, AssembleOptions, GridReconciliation, MoleculeSanitizer,
};
pub use config::{ConfigError, XscConfig};
pub use discovery::{discover, find_cross_section_files, map_cross_section_files, DiscoveredMolecule};
pub use error::{Result, XscError};
pub use format::{
    parse_header, CrossSectionRecord, Dataset, HeaderRecord, HEADER_LEN, SELF_BROADENER, TORR_TO_PASCAL,
    XSC_EXTENSION,
};
pub use grid::build_grid;
pub use reader::{load_file, read_first_header, XscReader};
pub use table::{InterpMode, OpacityTable, TableSummary};
pub use writer::{format_header, write_dataset, write_record, DEFAULT_VALUES_PER_LINE};
