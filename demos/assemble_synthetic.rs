//! Minimal example: write a two-temperature .xsc file, read it back, and
//! assemble it into an opacity table.
//!
//! Run: cargo run --example assemble_synthetic

use std::io::Write;

use xsc::{build_grid, load_molecule, write_dataset, AssembleOptions, CrossSectionRecord, HeaderRecord, XscReader};

fn record(temperature: f64, scale: f64, peak: f64) -> Result<CrossSectionRecord, xsc::XscError> {
    let (min, max, n) = (1250.0, 1260.0, 11);
    let grid = build_grid(min, max, n)?;
    let values = grid.iter().map(|wn| scale * 1e-20 * (1.0 + (wn - 1255.0).abs())).collect();
    Ok(CrossSectionRecord {
        header: HeaderRecord {
            molecule_name: "N2O".to_string(),
            min_wavenumber: min,
            max_wavenumber: max,
            number_of_points: n,
            temperature,
            pressure: 100.0,
            max_cross_section_value: peak,
            instrument_resolution: 0.1,
            common_name: "Nitrous oxide".to_string(),
            empty: String::new(),
            broadener: "N2".to_string(),
            reference: "1".to_string(),
        },
        grid,
        values,
    })
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let records = vec![record(296.0, 1.0, 6e-20)?, record(220.0, 1.5, 9e-20)?];

    let mut tmp = tempfile::Builder::new().suffix(".xsc").tempfile()?;
    write_dataset(&mut tmp, &records, 6)?;
    tmp.flush()?;

    for record in XscReader::open(tmp.path())? {
        let record = record?;
        println!(
            "{} T={} P={} points={}",
            record.header.molecule_name,
            record.header.temperature,
            record.header.pressure,
            record.values.len()
        );
    }

    let table = load_molecule(&[tmp.path()], &AssembleOptions::default())?;
    println!("shape: {:?}", table.shape());
    println!("pressures (Pa): {:?}", table.pressures());
    println!("temperatures (K): {:?}", table.temperatures());
    println!("resolution: {}", table.resolution());
    println!("sha256: {}", table.digest());
    Ok(())
}
