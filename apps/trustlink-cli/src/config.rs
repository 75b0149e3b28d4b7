//! Application configuration: environment first, then command-line overrides.

use std::time::Duration;

use anyhow::{Context, Result};
use trustlink_infra::ClientConfig;

use crate::cli::Cli;
use crate::telemetry::TelemetryConfig;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub client: ClientConfig,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    pub fn load(cli: &Cli) -> Result<Self> {
        let env_config = ClientConfig::from_env().context("Invalid TRUSTLINK_* environment")?;
        let client = apply_overrides(env_config, cli)?;

        Ok(Self {
            client,
            telemetry: TelemetryConfig::from_env(),
        })
    }
}

fn apply_overrides(mut client: ClientConfig, cli: &Cli) -> Result<ClientConfig> {
    if let Some(api_url) = &cli.api_url {
        client = client
            .with_api_base(api_url)
            .with_context(|| format!("Invalid --api-url {}", api_url))?;
    }

    if let Some(ws_url) = &cli.ws_url {
        client = client
            .with_ws_base(ws_url)
            .with_context(|| format!("Invalid --ws-url {}", ws_url))?;
    }

    if let Some(secs) = cli.timeout {
        client = client.with_timeout(Duration::from_secs(secs));
    }

    if cli.strict_status {
        client = client.with_uniform_status_checks(true);
    }

    Ok(client)
}
