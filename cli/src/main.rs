//! Energy Cost Service CLI Server
//!
//! Headless REST service computing smart meter usage costs under competing
//! price plans.
//!
//! ```sh
//! # Run with default config (~/.config/energy-cost/config.toml)
//! energy-cost-service
//!
//! # Custom config path
//! energy-cost-service --config /etc/energy-cost/config.toml
//!
//! # Override the listen port
//! energy-cost-service --port 9090
//!
//! # Validate config without starting
//! energy-cost-service --check
//! ```

use std::path::PathBuf;

use clap::Parser;
use tracing::{error, info, warn};

use energy_cost::config::{AppConfig, ConfigError};
use energy_cost::server::{init_tracing, ServerHandle, ServerOptions};

/// Energy Cost Service: price plan recommendations for smart meters.
#[derive(Parser, Debug)]
#[command(
    name = "energy-cost-service",
    version,
    about = "Energy usage cost metrics for smart meters",
    long_about = "REST API server that ranks and compares electricity price plans \
                  by the projected cost of a smart meter's readings.\n\n\
                  Default config: ~/.config/energy-cost/config.toml"
)]
struct Cli {
    /// Path to the configuration file (TOML).
    #[arg(short, long, env = "ENERGY_COST_CONFIG")]
    config: Option<PathBuf>,

    /// Override the REST API listen port.
    #[arg(short, long)]
    port: Option<u16>,

    /// Override the log level (trace, debug, info, warn, error).
    #[arg(short, long)]
    log_level: Option<String>,

    /// Validate the configuration file and exit without starting the server.
    #[arg(long)]
    check: bool,

    /// Disable the Prometheus `/metrics` endpoint.
    #[arg(long)]
    no_metrics: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // ── Load configuration ─────────────────────────────────────
    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(energy_cost::default_config_path);

    let (mut config, load_error) = match AppConfig::load(&config_path) {
        Ok(cfg) => (cfg, None),
        Err(e) if is_missing_file(&e) => (AppConfig::default(), None),
        Err(e) => (AppConfig::default(), Some(e)),
    };

    // ── Apply CLI overrides ────────────────────────────────────
    if let Some(port) = cli.port {
        config.server.port = port;
    }
    if let Some(ref level) = cli.log_level {
        config.logging.level = level.clone();
    }

    // ── Config validation mode ─────────────────────────────────
    if cli.check {
        if let Some(e) = load_error {
            eprintln!("❌ Invalid configuration in {}: {}", config_path.display(), e);
            return Err(e.into());
        }
        println!("✅ Configuration is valid");
        println!("   Config file : {}", config_path.display());
        println!("   API address : {}", config.api_address());
        println!("   Price plans : {}", config.price_plans.len());
        println!("   Meters      : {}", config.meters.len());
        println!("   Demo data   : {}", config.readings.seed_demo_data);
        println!("   Log level   : {}", config.logging.level);
        return Ok(());
    }

    // Init tracing first so subsequent logs are formatted properly
    init_tracing(&config);
    match load_error {
        Some(e) => {
            error!("Failed to load config from {}: {}", config_path.display(), e);
            error!("Using default configuration.");
        }
        None if config_path.exists() => {
            info!("Configuration loaded from {}", config_path.display());
        }
        None => warn!("No config file at {}, using defaults", config_path.display()),
    }
    if let Some(port) = cli.port {
        info!("CLI override: port = {}", port);
    }
    if let Some(ref level) = cli.log_level {
        info!("CLI override: log_level = {}", level);
    }

    // ── Start server ───────────────────────────────────────────
    let handle = ServerHandle::start(ServerOptions {
        config,
        enable_metrics: !cli.no_metrics,
    })
    .await?;

    // Install OS signal handlers (SIGTERM, SIGINT)
    handle.install_signal_handler();

    info!("🚀 Press Ctrl+C to shutdown gracefully.");

    // Wait for shutdown signal, then clean up
    handle.shutdown_signal().wait().await;
    handle.wait().await;

    Ok(())
}

fn is_missing_file(err: &ConfigError) -> bool {
    matches!(err, ConfigError::Io { source, .. } if source.kind() == std::io::ErrorKind::NotFound)
}
