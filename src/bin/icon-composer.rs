//! Command-line front end: render a settings file and export it.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use icon_composer::{
    CanvasSpec, IconComposer, IconSettings, IconsetDirectoryPacker, IconutilPacker, LanczosResizer,
    Result, save_flat_image, spawn_load,
};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Debug, Parser)]
#[command(name = "icon-composer", about = "Compose a layered squircle icon and export it")]
struct Cli {
    /// Settings JSON; missing fields use the defaults.
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Artwork image (PNG, JPEG, WebP or SVG).
    #[arg(long)]
    artwork: Option<PathBuf>,

    /// Canvas edge in pixels.
    #[arg(long, default_value_t = CanvasSpec::DEFAULT_SIZE)]
    size: u32,

    /// Write the flat PNG here.
    #[arg(long)]
    png: Option<PathBuf>,

    /// Pack an .icns file here with iconutil.
    #[arg(long)]
    icns: Option<PathBuf>,

    /// Write a .iconset directory here.
    #[arg(long)]
    iconset: Option<PathBuf>,

    /// Print the default settings as JSON and exit.
    #[arg(long)]
    print_defaults: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    match run(Cli::parse()) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            tracing::error!("{err}");
            ExitCode::FAILURE
        }
    }
}

/// Returns `Ok(false)` when a bundle export reported a failure.
fn run(cli: Cli) -> Result<bool> {
    if cli.print_defaults {
        println!("{}", IconSettings::default().to_json_pretty()?);
        return Ok(true);
    }

    let settings = match &cli.settings {
        Some(path) => IconSettings::load(path)?,
        None => IconSettings::default(),
    };
    let mut composer = IconComposer::with_settings(CanvasSpec::new(cli.size)?, settings);

    if let Some(path) = cli.artwork {
        // The composer only sees the artwork once decoding has finished.
        let loader = spawn_load(path, composer.sender());
        if loader.join().is_err() {
            tracing::warn!("artwork loader panicked");
        }
    }
    let raster = composer.render()?;

    if let Some(path) = &cli.png {
        save_flat_image(raster, path)?;
    }

    let mut ok = true;
    if let Some(path) = &cli.iconset {
        ok &= composer.export_icon_bundle(&LanczosResizer, &IconsetDirectoryPacker, path).success;
    }
    if let Some(path) = &cli.icns {
        ok &= composer.export_icon_bundle(&LanczosResizer, &IconutilPacker::new(), path).success;
    }

    if cli.png.is_none() && cli.iconset.is_none() && cli.icns.is_none() {
        tracing::info!("nothing to export; pass --png, --iconset or --icns");
    }
    Ok(ok)
}
