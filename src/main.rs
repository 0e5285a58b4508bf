//! Waypost: a location report collector.
//!
//! This is the application entry point. It initializes tracing, loads
//! configuration from a TOML file, opens the location store on the configured
//! backend, builds the Axum router and starts the HTTP server.

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use waypost::config::{AppConfig, StorageMode, DEFAULT_CONFIG_PATH, DEFAULT_LOG_FILTER};
use waypost::http::start_server;
use waypost::{create_router, AppState, LocationStore};

/// Waypost: collects location reports from devices
#[derive(Parser, Debug)]
#[command(name = "waypost", version, about)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    config: String,

    /// Log level filter (e.g., "waypost=debug,tower_http=info")
    #[arg(short, long)]
    log_level: Option<String>,

    /// Override http.port from the configuration file
    #[arg(short, long)]
    port: Option<u16>,

    /// Override storage.mode from the configuration file
    #[arg(short, long, value_enum)]
    storage: Option<StorageMode>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command line arguments
    let args = Args::parse();

    // Load configuration before tracing so the log format is known
    let mut config = AppConfig::load(&args.config)?;
    if let Some(port) = args.port {
        config.http.port = port;
    }
    if let Some(mode) = args.storage {
        config.storage.mode = mode;
    }

    // Initialize tracing with priority: CLI > env > default
    let log_filter = args
        .log_level
        .or_else(|| std::env::var("RUST_LOG").ok())
        .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

    let registry =
        tracing_subscriber::registry().with(tracing_subscriber::EnvFilter::new(&log_filter));
    if config.logging.is_json() {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    tracing::info!(config = %args.config, "Loaded configuration");

    match config.storage.mode {
        StorageMode::File => tracing::info!(
            mode = %config.storage.mode,
            path = %config.storage.path.display(),
            "Location storage configured"
        ),
        StorageMode::Memory => tracing::warn!(
            mode = %config.storage.mode,
            "Location storage is memory-only, data is lost on restart"
        ),
    }
    if config.cors.permissive {
        tracing::info!("CORS open to all origins");
    }

    // Open the store on the configured backend
    let store = LocationStore::from_config(&config.storage).await;

    // Create application state
    let http_config = config.http.clone();
    let state = AppState::new(config, store);

    // Create router
    let app = create_router(state);

    start_server(app, &http_config).await?;

    Ok(())
}
