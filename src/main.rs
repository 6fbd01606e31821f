//! # Foodgram
//!
//! Recipe publishing API server.
//!
//! Loads configuration, connects to PostgreSQL, seeds the ingredient and
//! tag catalog and serves the HTTP API.

use anyhow::Result;
use tracing::info;

use foodgram::config::Settings;
use foodgram::startup::Application;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing subscriber for structured logging
    foodgram::telemetry::init_tracing();

    info!("Starting Foodgram...");

    // Load configuration from environment and config files
    let settings = Settings::load()?;
    info!(
        host = %settings.server.host,
        port = %settings.server.port,
        environment = %settings.environment,
        "Configuration loaded"
    );

    // Build and run the application
    let application = Application::build(settings).await?;

    info!("Server ready to accept connections");
    application.run_until_stopped().await?;

    Ok(())
}
