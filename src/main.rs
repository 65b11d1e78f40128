//! FVG Portal Server
//!
//! Run with: cargo run --bin fvg-portal
//!
//! # Configuration
//!
//! Reads `--config <path>` or the first `config.toml` found in the user
//! config dir, `/etc/fvg-portal` or the working directory; a file that
//! exists but does not parse stops startup. Environment variables override
//! the file:
//! - `FVG_HOST`: Host to bind to (default: 0.0.0.0)
//! - `FVG_PORT`: Port to listen on (default: 8080)
//! - `API_KEY` / `GEMINI_API_KEY`: Gemini API key
//! - `FVG_GEMINI_BASE_URL`: Gemini endpoint (default: Google's public API)
//! - `FVG_LOG_LEVEL`, `FVG_LOG_FORMAT`: Logging (default: info, pretty)
//! - `RUST_LOG`: Full filter directive, wins over `FVG_LOG_LEVEL`

use clap::Parser;
use fvg_portal::api::{serve, AppState};
use fvg_portal::assistant::Assistant;
use fvg_portal::config::{Config, LoggingConfig};
use fvg_portal::content::Catalog;
use fvg_portal::gemini::GeminiClient;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "fvg-portal")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "FVG Luxury Portal server")]
struct Args {
    /// Config file (default: search the standard locations)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Host to bind to, overriding config
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on, overriding config
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let (mut config, source) = match &args.config {
        Some(path) => (Config::load_with_env(path)?, Some(path.clone())),
        None => Config::load_default()?,
    };
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }

    init_tracing(&config.logging);

    tracing::info!("Starting FVG Portal v{}", env!("CARGO_PKG_VERSION"));
    match &source {
        Some(path) => tracing::info!("Loaded config from {:?}", path),
        None => tracing::info!("Using default config with environment overrides"),
    }

    let client = GeminiClient::new(config.gemini.client_config())?;
    let models = config.gemini.models.resolve();
    tracing::info!(
        concierge = %models.concierge,
        guide = %models.guide,
        chef = %models.chef,
        image = %models.image,
        "Gemini models"
    );

    let assistant = Assistant::new(Arc::new(client), models);
    if !assistant.is_configured() {
        tracing::warn!("No API key set (API_KEY); assistant widgets will answer with apologies");
    }

    let catalog = Catalog::builtin();
    tracing::info!(
        destinations = catalog.destinations(None).len(),
        events = catalog.events().len(),
        attractions = catalog.attractions().len(),
        "Catalog loaded"
    );

    let server_config = config.server.clone();
    let state = AppState::new(catalog, assistant, config.server);

    serve(state, &server_config).await?;

    tracing::info!("FVG Portal stopped");
    Ok(())
}

/// Install the global subscriber; `RUST_LOG` wins over the configured level
fn init_tracing(logging: &LoggingConfig) {
    let filter = || {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| logging.filter_directive().into())
    };

    if logging.is_json() {
        tracing_subscriber::registry()
            .with(filter())
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter())
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}
