//! Society CMS API server entry point
//!
//! Run with:
//! ```bash
//! cargo run -p society-api
//! ```
//!
//! Configuration is loaded from environment variables (and `.env`).

use society_common::{try_init_tracing_with_config, AppConfig, Environment, TracingConfig};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    // APP_ENV picks the log format before the rest of the config is loaded
    let env = std::env::var("APP_ENV")
        .ok()
        .and_then(|value| value.parse::<Environment>().ok())
        .unwrap_or_default();
    if let Err(e) = try_init_tracing_with_config(TracingConfig::for_environment(env)) {
        eprintln!("Warning: Failed to initialize tracing: {e}");
    }

    if let Err(e) = run().await {
        error!(error = %e, "Server failed to start");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    info!("Starting Society CMS API Server...");

    let config = AppConfig::from_env().map_err(|e| {
        error!(error = %e, "Failed to load configuration");
        e
    })?;

    info!(
        env = ?config.app.env,
        address = %config.api.address(),
        data_dir = %config.storage.data_dir.display(),
        "Configuration loaded"
    );

    society_api::run(config).await?;

    Ok(())
}
