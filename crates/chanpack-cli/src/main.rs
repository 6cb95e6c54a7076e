//! chanpack - pack image channels for texture pipelines

use anyhow::{Context, Result, bail};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "chanpack")]
#[command(author, version, about = "Pack image channels into one RGBA texture")]
#[command(long_about = "
Packs color channels from one or more source images into a single RGBA
image, driven by a script with one mapping per line:

  DDDD = path SSSS

DDDD names the destination channels (unique letters from r, g, b, a),
path is a source image relative to the script, and SSSS names the source
channels (r, g, b, a, or the pseudo-channels A/M/m for the per-pixel
average/maximum/minimum of all channels).

Example script:
  r  = roughness.png  r
  g  = metallic.png   A
  ba = masks.png      rg

The result is saved next to the script as <script_stem>.png. Channels no
directive targets stay opaque white.
")]
struct Cli {
    /// Channel-mapping script
    script: PathBuf,

    /// Verbose output (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if !cli.script.is_file() {
        bail!("{} does not exist or is not a file", cli.script.display());
    }

    let output = chanpack_script::execute(&cli.script)
        .with_context(|| format!("failed to run script {}", cli.script.display()))?;
    println!("Saved to {}", output.display());
    Ok(())
}
