use anyhow::{Context, Result};
use clap::Parser;
use std::io::{self, Write};
use std::path::PathBuf;
use svg_to_level::{ConvertOptions, convert_svg_file};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser)]
#[command(name = "svg_to_level")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Convert an Inkscape SVG maze into a level file", long_about = None)]
struct Cli {
    /// Filename to convert
    svgfile: PathBuf,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Level records go to stdout, so logging stays on stderr
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();

    let level = convert_svg_file(&cli.svgfile, &ConvertOptions::default())
        .with_context(|| format!("Error converting '{}'", cli.svgfile.display()))?;

    let mut stdout = io::stdout().lock();
    stdout.write_all(level.as_bytes())?;
    stdout.flush()?;

    info!(
        "Converted '{}' ({} records)",
        cli.svgfile.display(),
        level.lines().count()
    );
    Ok(())
}
