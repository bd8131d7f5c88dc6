//! Command-line entry point: renders an EAN digit string as a PNG file.

use anyhow::{Context, Result};
use barcode_encoder::generate_png;
use clap::Parser;
use std::fs;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "barcode_gen")]
#[command(author, version, about = "Render an EAN-8/EAN-13 digit string as a PNG barcode")]
struct Cli {
    /// EAN-8 or EAN-13 digit string (trailing checksum digit optional)
    code: String,

    /// Output path
    ///
    /// Defaults to `<code>.png` in the current directory.
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let png = generate_png(&cli.code)
        .with_context(|| format!("failed to encode '{}'", cli.code))?;

    let path = cli
        .output
        .unwrap_or_else(|| PathBuf::from(format!("{}.png", cli.code)));
    fs::write(&path, &png).with_context(|| format!("failed to write {}", path.display()))?;

    Ok(())
}
