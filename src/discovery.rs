//! Find `.xsc` files in a directory and group them by molecule.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::assembler::{load_molecule, AssembleOptions, MoleculeSanitizer};
use crate::config::XscConfig;
use crate::error::{Result, XscError};
use crate::format::XSC_EXTENSION;
use crate::reader::read_first_header;
use crate::table::{InterpMode, OpacityTable};

/// One molecule found on disk, ready to be assembled.
#[derive(Debug, Clone, PartialEq)]
pub struct DiscoveredMolecule {
    /// Sanitized molecule name.
    pub name: String,
    /// Files carrying this molecule, sorted by path.
    pub files: Vec<PathBuf>,
    pub interpolation: InterpMode,
}

impl DiscoveredMolecule {
    /// Read and assemble this molecule's files.
    pub fn load(&self, sanitizer: MoleculeSanitizer) -> Result<OpacityTable> {
        let options = AssembleOptions {
            interpolation: self.interpolation,
            sanitizer,
        };
        load_molecule(&self.files, &options)
    }
}

fn ensure_dir(dir: &Path) -> Result<()> {
    if dir.is_dir() {
        Ok(())
    } else {
        Err(XscError::NotADirectory(dir.to_path_buf()))
    }
}

/// Regular files directly inside `dir` with the `.xsc` extension, sorted.
pub fn find_cross_section_files<P: AsRef<Path>>(dir: P) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    ensure_dir(dir)?;

    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && path.extension().is_some_and(|e| e == XSC_EXTENSION) {
            files.push(path);
        }
    }
    files.sort();
    debug!("{}: {} .{XSC_EXTENSION} files", dir.display(), files.len());
    Ok(files)
}

/// Group the `.xsc` files of `dir` by the molecule named in their first header.
pub fn map_cross_section_files<P: AsRef<Path>>(dir: P) -> Result<BTreeMap<String, Vec<PathBuf>>> {
    let mut molecules: BTreeMap<String, Vec<PathBuf>> = BTreeMap::new();
    for file in find_cross_section_files(dir)? {
        let header = read_first_header(&file)?;
        molecules.entry(header.molecule_name).or_default().push(file);
    }
    Ok(molecules)
}

/// Discover every molecule under `config.xsec_path`.
///
/// Returns nothing when no path is configured. Names go through `sanitizer`
/// after taking the first token, as the assembler does.
pub fn discover(config: &XscConfig, sanitizer: MoleculeSanitizer) -> Result<Vec<DiscoveredMolecule>> {
    let Some(dir) = config.xsec_path.as_deref() else {
        debug!("no xsec_path configured; nothing to discover");
        return Ok(Vec::new());
    };

    let interpolation = config.interpolation();
    let discovered: Vec<DiscoveredMolecule> = map_cross_section_files(dir)?
        .into_iter()
        .map(|(raw, files)| DiscoveredMolecule {
            name: sanitizer(raw.split_whitespace().next().unwrap_or_default()),
            files,
            interpolation,
        })
        .collect();

    info!(
        "discovered {} molecules in {}",
        discovered.len(),
        dir.display()
    );
    Ok(discovered)
}
