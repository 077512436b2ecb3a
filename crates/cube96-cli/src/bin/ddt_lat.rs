//! Writes the AES S-box DDT and LAT as CSV files and reports their maxima.

#![forbid(unsafe_code)]

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use cube96_analysis::tables::{
    compute_ddt, compute_lat, differential_uniformity, max_absolute_bias, write_matrix_csv,
};

/// Dump the S-box difference distribution and linear approximation tables.
#[derive(Parser)]
#[command(name = "cube96-ddt-lat", version)]
struct Cli {
    /// Output path for the DDT CSV.
    #[arg(default_value = "ddt.csv")]
    ddt_path: PathBuf,
    /// Output path for the LAT CSV.
    #[arg(default_value = "lat.csv")]
    lat_path: PathBuf,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let ddt = compute_ddt();
    let file = File::create(&cli.ddt_path)
        .with_context(|| format!("create {}", cli.ddt_path.display()))?;
    write_matrix_csv(BufWriter::new(file), &ddt).context("write DDT")?;
    println!(
        "DDT written to {}, max differential uniformity = {}",
        cli.ddt_path.display(),
        differential_uniformity(&ddt)
    );

    let lat = compute_lat();
    let file = File::create(&cli.lat_path)
        .with_context(|| format!("create {}", cli.lat_path.display()))?;
    write_matrix_csv(BufWriter::new(file), &lat).context("write LAT")?;
    println!(
        "LAT written to {}, max absolute bias = {}/128",
        cli.lat_path.display(),
        max_absolute_bias(&lat)
    );

    Ok(())
}
