use std::env;
use std::time::Duration;

use hproxy_sdk::{Client, HProxyError, NewProxyOptions};
use thiserror::Error;

pub const API_KEY_ENV: &str = "HPROXY_API_KEY";
pub const BASE_URL_ENV: &str = "HPROXY_BASE_URL";
pub const TIMEOUT_ENV: &str = "HPROXY_TIMEOUT_SECS";
pub const COUNTRY_CODE_ENV: &str = "HPROXY_COUNTRY_CODE";
pub const HOST_ENV: &str = "HPROXY_HOST";
pub const STATE_ENV: &str = "HPROXY_STATE";
pub const CITY_ENV: &str = "HPROXY_CITY";
pub const PROTO_TYPE_ENV: &str = "HPROXY_PROTO_TYPE";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("invalid HPROXY_TIMEOUT_SECS '{0}': expected a positive number of seconds")]
    InvalidTimeout(String),
}

pub struct RotatorConfig {
    pub api_key: String,
    pub base_url: Option<String>,
    pub timeout: Option<Duration>,
    /// Filters for the customised rotation step.
    pub filters: NewProxyOptions,
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn resolve_timeout() -> Result<Option<Duration>, ConfigError> {
    let Some(raw) = non_empty_var(TIMEOUT_ENV) else {
        return Ok(None);
    };
    match raw.parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Some(Duration::from_secs(secs))),
        _ => Err(ConfigError::InvalidTimeout(raw)),
    }
}

impl RotatorConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_key = non_empty_var(API_KEY_ENV).ok_or(ConfigError::Missing(API_KEY_ENV))?;

        let filters = NewProxyOptions {
            country_code: non_empty_var(COUNTRY_CODE_ENV),
            host: non_empty_var(HOST_ENV),
            state: non_empty_var(STATE_ENV),
            city: non_empty_var(CITY_ENV),
            proto_type: non_empty_var(PROTO_TYPE_ENV),
        };

        Ok(Self {
            api_key,
            base_url: non_empty_var(BASE_URL_ENV),
            timeout: resolve_timeout()?,
            filters,
        })
    }

    pub fn build_client(&self) -> Result<Client, HProxyError> {
        let mut builder = Client::builder(self.api_key.as_str());
        if let Some(base_url) = &self.base_url {
            builder = builder.base_url(base_url.as_str());
        }
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        builder.build()
    }
}
