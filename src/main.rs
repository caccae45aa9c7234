mod app;
mod charts;
mod color;
mod data;
mod state;
mod ui;

use std::path::PathBuf;

use anyhow::Context as _;
use clap::Parser;
use eframe::egui;

use app::RustyRichterApp;
use data::loader;

/// Interactive dashboard for a one-year earthquake catalog.
#[derive(Parser, Debug)]
#[command(name = "rusty-richter", about = "Interactive earthquake catalog dashboard")]
struct Args {
    /// Earthquake catalog CSV (USGS export format).
    #[arg(long, default_value = "earthquakes.csv")]
    catalog: PathBuf,
    /// World landmass GeoJSON for the basemap.
    #[arg(long, default_value = "world-geojson.json")]
    world: PathBuf,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let world = loader::load_world(&args.world)
        .with_context(|| format!("loading basemap {}", args.world.display()))?;
    let catalog = loader::load_catalog(&args.catalog)
        .with_context(|| format!("loading catalog {}", args.catalog.display()))?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 860.0])
            .with_min_inner_size([700.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Rusty Richter – Earthquake Dashboard",
        options,
        Box::new(move |cc| Ok(Box::new(RustyRichterApp::new(cc, catalog, world)))),
    )
    .map_err(|e| anyhow::anyhow!("{e}"))
}
