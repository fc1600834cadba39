use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use aoa_sectors::SectorConfig;
use aoa_sectors::geo::GeoPoint;
use aoa_sectors::geojson::render_scene;
use aoa_sectors::io::{batch_fingerprint, load_readings, reference_readings};

#[derive(Parser, Debug)]
#[command(name = "aoa-sectors")]
#[command(author, version, about = "Project angle-of-arrival readings into GeoJSON sectors")]
struct Args {
    /// Scene config (JSON)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Sensor batch, .json or .csv. Defaults to the three reference drones
    #[arg(short, long)]
    sensors: Option<PathBuf>,

    /// Override origin longitude
    #[arg(long, allow_hyphen_values = true)]
    origin_lon: Option<f64>,

    /// Override origin latitude
    #[arg(long, allow_hyphen_values = true)]
    origin_lat: Option<f64>,

    /// Override earth radius in meters
    #[arg(long)]
    earth_radius: Option<f64>,

    /// Output file, stdout when absent
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Leave out the gimbal area circle
    #[arg(long)]
    no_gimbal: bool,

    #[arg(long)]
    pretty: bool,
}

fn main() -> Result<()> {
    // stdout carries the GeoJSON, logs go to stderr
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("aoa_sectors=info".parse()?),
        )
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => SectorConfig::load(path)?,
        None => SectorConfig::default(),
    };
    let origin = GeoPoint::new(
        args.origin_lon.unwrap_or(config.origin.longitude),
        args.origin_lat.unwrap_or(config.origin.latitude),
    );
    config.origin = origin;
    if let Some(radius) = args.earth_radius {
        config.earth_radius_m = radius;
    }
    config.validate().context("Invalid scene configuration")?;

    let readings = match &args.sensors {
        Some(path) => load_readings(path)?,
        None => reference_readings(),
    };

    info!(
        "Origin ({}, {}), {} sensors, batch {:016x}",
        origin.longitude,
        origin.latitude,
        readings.len(),
        batch_fingerprint(origin, &readings)
    );

    let scene = render_scene(&config, &readings, !args.no_gimbal);
    let text = if args.pretty {
        serde_json::to_string_pretty(&scene.collection)?
    } else {
        serde_json::to_string(&scene.collection)?
    };

    match &args.output {
        Some(path) => {
            std::fs::write(path, text).with_context(|| format!("Failed to write {:?}", path))?;
            info!("Wrote {} sectors to {:?}", scene.sector_count, path);
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{}", text)?;
        }
    }

    Ok(())
}
