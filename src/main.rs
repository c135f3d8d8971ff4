//! Zone tracker service binary.
//!
//! ```text
//! zone-tracker [--config zone-tracker.toml] [--host 0.0.0.0] [--port 8008]
//! ```

use std::path::PathBuf;

use clap::Parser;

use zone_tracker::config::{load_config, validate_config, ConfigError, ServiceConfig};
use zone_tracker::lifecycle::{startup, Shutdown};
use zone_tracker::observability::logging::init_logging;

#[derive(Parser)]
#[command(name = "zone-tracker")]
#[command(about = "Tracks GREEN/YELLOW/RED/MAX threshold zones over HTTP", long_about = None)]
struct Args {
    /// TOML config file. Defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Interface to bind, overrides `listener.host`.
    #[arg(long)]
    host: Option<String>,

    /// Port to bind, overrides `listener.port`.
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => ServiceConfig::default(),
    };
    if let Some(host) = args.host {
        config.listener.host = host;
    }
    if let Some(port) = args.port {
        config.listener.port = port;
    }
    validate_config(&config).map_err(ConfigError::Validation)?;

    init_logging(&config.observability);

    tracing::info!("zone-tracker v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        config_file = ?args.config,
        bind_address = %config.listener.bind_address(),
        request_timeout_secs = config.timeouts.request_secs,
        alerts_enabled = config.alerts.enabled,
        "Configuration loaded"
    );

    let shutdown = Shutdown::new();
    shutdown.trigger_on_signal();

    startup::run(config, shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
