use hproxy_sdk::HProxyError;
use thiserror::Error;
use tracing::info;

use crate::config::{ConfigError, RotatorConfig};
use crate::telemetry;
use crate::walkthrough::{self, WalkthroughReport};

#[derive(Debug, Error)]
pub enum RotatorError {
    #[error("telemetry initialization failed: {0}")]
    Telemetry(#[from] telemetry::TelemetryError),
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Api(#[from] HProxyError),
    #[error("failed to render report: {0}")]
    Report(#[from] serde_json::Error),
}

pub fn run() -> Result<(), RotatorError> {
    telemetry::init_tracing()?;

    let config = RotatorConfig::from_env()?;
    let report = run_with(&config)?;

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

pub fn run_with(config: &RotatorConfig) -> Result<WalkthroughReport, RotatorError> {
    let client = config.build_client()?;
    info!(base_url = client.base_url(), "client ready");

    Ok(walkthrough::run(&client, &config.filters)?)
}
