//! NASA Earth imagery viewer.
//!
//! Reads commands from stdin, shows the fetched image handle and a text
//! rendering of the tile map. With `--once` it fetches a single image for
//! the given inputs and writes it to disk.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use earth_viewer::state::{DEFAULT_DATE, DEFAULT_LATITUDE, DEFAULT_LONGITUDE};
use earth_viewer::{present, App, Controller, ViewState};
use imagery_client::{ClientConfig, ImageryClient};
use imagery_common::GeoPoint;
use map_view::{widget::DEFAULT_PRECISION, widget::DEFAULT_ZOOM, MapWidget, TileLayer};

#[derive(Parser, Debug)]
#[command(name = "earth-viewer")]
#[command(about = "Browse NASA Earth satellite imagery")]
struct Args {
    /// Initial latitude
    #[arg(long, default_value = DEFAULT_LATITUDE, allow_hyphen_values = true)]
    lat: String,

    /// Initial longitude
    #[arg(long, default_value = DEFAULT_LONGITUDE, allow_hyphen_values = true)]
    lon: String,

    /// Observation date (YYYY-MM-DD)
    #[arg(long, default_value = DEFAULT_DATE)]
    date: String,

    /// Imagery layer: natural, vegetation, thermal or none
    #[arg(long, default_value = "natural")]
    layer: String,

    /// Imagery endpoint (default: NASA_IMAGERY_URL, then the public API)
    #[arg(long)]
    endpoint: Option<String>,

    /// Initial map zoom
    #[arg(long, default_value_t = DEFAULT_ZOOM)]
    zoom: u32,

    /// Decimal places of clicked coordinates (4-6)
    #[arg(long, default_value_t = DEFAULT_PRECISION)]
    precision: usize,

    /// Request timeout in seconds (no timeout by default)
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Fetch once and exit
    #[arg(long)]
    once: bool,

    /// Where `--once` writes the image
    #[arg(long, default_value = "earth.png")]
    output: PathBuf,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let args = Args::parse();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));
    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let mut config =
        ClientConfig::from_env().with_timeout(args.timeout_secs.map(Duration::from_secs));
    if let Some(endpoint) = &args.endpoint {
        config = config.with_endpoint(endpoint.clone());
    }
    let client = ImageryClient::from_config(config).context("Failed to create imagery client")?;

    let mut state = ViewState::default();
    state.set_latitude(args.lat.clone());
    state.set_longitude(args.lon.clone());
    state.set_date(args.date.clone());
    if args.layer.eq_ignore_ascii_case("none") {
        state.clear_layer();
    } else {
        state.set_layer(&args.layer).context("Invalid --layer")?;
    }

    // A bad initial position still gets a map; the fetch reports the error.
    let centre = state
        .coordinates()
        .or_else(|_| GeoPoint::parse(DEFAULT_LATITUDE, DEFAULT_LONGITUDE))?;
    let map = MapWidget::new(centre, TileLayer::openstreetmap())
        .with_zoom(args.zoom)
        .with_precision(args.precision)
        .context("Invalid --precision")?;
    let mut controller = Controller::new(state, map);

    info!(endpoint = %client.config().endpoint, once = args.once, "Starting earth viewer");

    if args.once {
        controller.fetch(&client).await;
        let state = controller.state();
        match state.image() {
            Some(image) => {
                image
                    .save(&args.output)
                    .await
                    .with_context(|| format!("Failed to write {}", args.output.display()))?;
                println!("{}", present(state));
                println!("Saved {} bytes to {}", image.len(), args.output.display());
            }
            None => bail!("{}", present(state)),
        }
        return Ok(());
    }

    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    App::new(controller, client)
        .run(stdin, tokio::io::stdout())
        .await?;
    Ok(())
}
