//! xsc: inspect HITRAN cross-section files and assemble opacity tables.
//!
//! `xsc inspect FILE` lists the records of one file, `xsc discover` groups a
//! directory by molecule, `xsc assemble FILE...` builds one table and prints
//! its axes and digest. Set RUST_LOG=debug for per-record logging.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use log::info;

use xsc::{discover, keep_molecule_name, load_molecule, AssembleOptions, InterpMode, XscConfig, XscReader};

#[derive(Parser)]
#[command(name = "xsc", version, about = "HITRAN cross-section reader and table assembler")]
struct Cli {
    /// TOML file with `xsec_path` and `xsec_interpolation`.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print one line per record of a file.
    Inspect {
        file: PathBuf,
        /// Emit headers as JSON instead.
        #[arg(long)]
        json: bool,
    },
    /// List molecules and their files.
    Discover {
        /// Directory to scan; overrides `xsec_path` from the config.
        #[arg(long)]
        path: Option<PathBuf>,
    },
    /// Assemble the given files of one molecule into a table.
    Assemble {
        #[arg(required = true)]
        files: Vec<PathBuf>,
        /// linear or exp; defaults to the config, then linear.
        #[arg(long)]
        interp: Option<InterpMode>,
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => XscConfig::load(path)?,
        None => XscConfig::default(),
    };

    match cli.command {
        Command::Inspect { file, json } => {
            for record in XscReader::open(&file)? {
                let record = record?;
                let h = &record.header;
                if json {
                    println!("{}", serde_json::to_string(h)?);
                } else {
                    println!(
                        "{:<20} {:>10} {:>10} {:>7} T={:<7} P={:<6} {}",
                        h.molecule_name,
                        h.min_wavenumber,
                        h.max_wavenumber,
                        h.number_of_points,
                        h.temperature,
                        h.pressure,
                        h.broadener
                    );
                }
            }
        }
        Command::Discover { path } => {
            if path.is_some() {
                config.xsec_path = path;
            }
            let molecules = discover(&config, keep_molecule_name)?;
            if molecules.is_empty() {
                eprintln!("no .xsc files found");
            }
            for molecule in molecules {
                println!("{} ({}, {} files)", molecule.name, molecule.interpolation, molecule.files.len());
                for file in &molecule.files {
                    println!("  {}", file.display());
                }
            }
        }
        Command::Assemble { files, interp, json } => {
            let options = AssembleOptions::with_interpolation(interp.unwrap_or_else(|| config.interpolation()));
            info!("assembling {} files", files.len());
            let table = load_molecule(&files, &options)?;
            let summary = table.summary();
            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                println!("molecule:      {}", summary.molecule);
                println!("interpolation: {}", summary.interpolation);
                println!("shape:         {:?}", summary.shape);
                println!("pressures/Pa:  {:?}", summary.pressures_pa);
                println!("temperatures:  {:?}", summary.temperatures_k);
                println!("wavenumbers:   {} .. {}", summary.wavenumber_min, summary.wavenumber_max);
                println!("resolution:    {}", summary.resolution);
                println!("sha256:        {}", summary.digest);
            }
        }
    }
    Ok(())
}
