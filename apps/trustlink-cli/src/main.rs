//! TrustLink command-line client.

mod cli;
mod commands;
mod config;
mod telemetry;

use anyhow::Result;
use clap::Parser;

use trustlink_infra::HttpBackendClient;

use crate::cli::Cli;
use crate::config::AppConfig;
use crate::telemetry::init_telemetry;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = AppConfig::load(&cli)?;

    init_telemetry(&config.telemetry);

    tracing::debug!(
        api_base = %config.client.api_base,
        ws_base = %config.client.ws_base,
        uniform_status_checks = config.client.uniform_status_checks,
        "Configuration loaded"
    );

    let client = HttpBackendClient::with_tracing(config.client)?;
    commands::run_command(&cli, &client).await
}
