//! Explore nearby landmarks from the terminal.

use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use travelguide_explore::gateway::{build_client, FixedLocator, IpLocator, Locator};
use travelguide_explore::models::{CategoryFilter, Coordinate, LandmarkId};
use travelguide_explore::presentation::{
    ListSurface, LoggingMap, MapSurface, MemoryList, MemoryMap, TerminalList,
};
use travelguide_explore::{AppError, Config, ExploreSession};

#[derive(Parser, Debug)]
#[command(name = "travelguide-explore", version, about = "Find landmarks near you")]
struct Cli {
    /// Latitude to search around (overrides TRAVELGUIDE_LATITUDE)
    #[arg(long, requires = "lon", allow_hyphen_values = true)]
    lat: Option<f64>,

    /// Longitude to search around (overrides TRAVELGUIDE_LONGITUDE)
    #[arg(long, requires = "lat", allow_hyphen_values = true)]
    lon: Option<f64>,

    /// Approximate the position from the public IP address
    #[arg(long, conflicts_with = "lat")]
    ip: bool,

    /// Landmark type to show ("all", "museum", "shopping_mall", ...)
    #[arg(long, default_value = "all")]
    filter: String,

    /// Save or unsave a landmark by id after loading (repeatable)
    #[arg(long = "toggle", value_name = "ID")]
    toggle: Vec<String>,

    /// Select a landmark by id after loading
    #[arg(long, value_name = "ID")]
    select: Option<String>,

    /// Print the landmark panel as JSON instead of text, and log as JSON
    #[arg(long)]
    json: bool,

    /// Log level (overrides TRAVELGUIDE_LOG_LEVEL)
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Load configuration
    let mut config = Config::from_env();
    if let (Some(lat), Some(lon)) = (cli.lat, cli.lon) {
        config.fixed_position = Some(Coordinate::new(lat, lon));
    }
    if let Some(level) = &cli.log_level {
        config.log_level = level.clone();
    }

    // Initialize logging
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    // --json also switches the stderr logs to JSON lines
    let (json_logs, text_logs) = if cli.json {
        let layer = tracing_subscriber::fmt::layer()
            .json()
            .with_writer(std::io::stderr);
        (Some(layer), None)
    } else {
        let layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);
        (None, Some(layer))
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_logs)
        .with(text_logs)
        .init();

    let filter = CategoryFilter::parse(&cli.filter)
        .ok_or_else(|| AppError::Config(format!("Unknown landmark type: {}", cli.filter)))?;

    tracing::info!("Overpass endpoint: {}", config.overpass_url);
    tracing::info!("Travel guide server: {}", config.app_url);

    let locator: Box<dyn Locator> = if cli.ip {
        Box::new(IpLocator::new(
            build_client(&config)?,
            config.ip_locate_url.clone(),
        ))
    } else {
        if config.fixed_position.is_none() {
            tracing::warn!("No position configured; pass --lat/--lon or --ip");
        }
        Box::new(FixedLocator::new(config.fixed_position))
    };

    let config = Arc::new(config);

    if cli.json {
        let mut session =
            ExploreSession::new(config, locator, MemoryMap::default(), MemoryList::default())?;
        run(&mut session, &cli, filter).await;
        let (_map, list) = session.leave();
        println!("{}", serde_json::to_string_pretty(&list.panel())?);
    } else {
        let mut session = ExploreSession::new(
            config,
            locator,
            LoggingMap::default(),
            TerminalList::new(std::io::stdout()),
        )?;
        run(&mut session, &cli, filter).await;
        session.leave();
    }

    Ok(())
}

/// Drive one page visit: enter, filter, then the requested user actions.
async fn run<M: MapSurface, L: ListSurface>(
    session: &mut ExploreSession<M, L>,
    cli: &Cli,
    filter: CategoryFilter,
) {
    if let Err(e) = session.enter().await {
        tracing::warn!("Explore page could not load: {}", e);
        return;
    }

    if filter != CategoryFilter::All {
        session.apply_filter(filter);
    }

    for id in &cli.toggle {
        if let Err(e) = session.toggle_save(&LandmarkId::from(id.as_str())).await {
            tracing::warn!("Toggle of {} failed: {}", id, e);
        }
    }

    if let Some(id) = &cli.select {
        if !session.select(&LandmarkId::from(id.as_str())) {
            tracing::warn!("Landmark {} is not displayed", id);
        }
    }
}
