//! cartwise-rec - Market-basket recommendation service
//!
//! Loads the product catalog and purchase history once at startup, then
//! serves cart recommendations over HTTP.

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use cartwise_common::config::{load_toml_config, ConfigSource, Overrides, Settings};
use cartwise_common::loader::{load_products, load_transactions};
use cartwise_rec::engine::Engine;
use cartwise_rec::{build_router, AppState};
use clap::Parser;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Command-line arguments for cartwise-rec
#[derive(Parser, Debug)]
#[command(name = "cartwise-rec")]
#[command(about = "Market-basket recommendation service")]
#[command(version)]
struct Args {
    /// Port to listen on
    #[arg(short, long, env = "CARTWISE_PORT")]
    port: Option<u16>,

    /// Address to bind to
    #[arg(short, long, env = "CARTWISE_BIND")]
    bind: Option<String>,

    /// Directory containing products.csv and transactions.csv
    #[arg(short, long, env = "CARTWISE_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// TOML config file (default: <config dir>/cartwise/config.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Seed for corpus augmentation
    #[arg(short, long, env = "CARTWISE_SEED")]
    seed: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse();

    // Loading does not log; the source is reported once tracing is up
    let (toml, config_source) =
        load_toml_config(args.config.as_deref()).context("Failed to load config file")?;
    let settings = Settings::resolve(
        Overrides {
            port: args.port,
            bind: args.bind,
            data_dir: args.data_dir,
            seed: args.seed,
        },
        toml,
    );

    // Initialize tracing: RUST_LOG wins over the configured level
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| settings.logging.level.as_str().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Log build identification immediately after tracing init
    info!(
        "Starting cartwise-rec v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    match &config_source {
        ConfigSource::File(path) => info!("Loaded config from {}", path.display()),
        ConfigSource::Missing(path) => {
            warn!("Config file not found at {}, using defaults", path.display())
        }
        ConfigSource::NoConfigDir => warn!("Could not determine config directory, using defaults"),
    }

    info!("Products: {}", settings.products_path.display());
    info!("Transactions: {}", settings.transactions_path.display());

    let products = load_products(&settings.products_path).with_context(|| {
        format!("Failed to load products from {}", settings.products_path.display())
    })?;
    let records = load_transactions(&settings.transactions_path).with_context(|| {
        format!(
            "Failed to load transactions from {}",
            settings.transactions_path.display()
        )
    })?;
    info!(
        "✓ Loaded {} products and {} transaction rows",
        products.len(),
        records.len()
    );

    if settings.augmentation.enabled {
        info!(
            "Augmenting corpus: {} rounds, mutation rate {}, seed {}",
            settings.augmentation.rounds,
            settings.augmentation.mutation_rate,
            settings.augmentation.seed
        );
    }

    let engine = Engine::from_data(
        products,
        &records,
        &settings.augmentation,
        settings.engine.clone(),
    );

    let app = build_router(AppState::new(engine));

    let ip = settings
        .bind
        .parse::<std::net::IpAddr>()
        .with_context(|| format!("Invalid bind address: {}", settings.bind))?;
    let addr = SocketAddr::new(ip, settings.port);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;
    info!("cartwise-rec listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
