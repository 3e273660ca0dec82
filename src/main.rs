//! Fleet service binary.
//!
//! Reads configuration from TOML (`~/.config/fleet-service/config.toml` or
//! `$FLEET_CONFIG`) and serves the REST API until SIGINT/SIGTERM.

use tracing::{error, info};

use fleet_service::server::{init_tracing, ServerHandle};
use fleet_service::{default_config_path, AppConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // ── Load configuration ─────────────────────────────────────
    let config_path = default_config_path();
    let (config, load_error) = match AppConfig::load(&config_path) {
        Ok(cfg) => (cfg, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };
    let config = config.with_env_overrides();

    init_tracing(&config);
    match load_error {
        None => info!("Configuration loaded from {}", config_path.display()),
        Some(e) => error!("Failed to load config: {}. Using defaults.", e),
    }

    // ── Serve until a shutdown signal arrives ──────────────────
    let handle = ServerHandle::start(config).await?;
    handle.install_signal_handler();
    info!("Press Ctrl+C to shutdown gracefully.");
    handle.wait().await;

    Ok(())
}
