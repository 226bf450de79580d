#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::utils::error::{CpStarsError, Result};
use crate::utils::validation::{validate_non_empty_string, validate_range, validate_url, Validate};
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

/// Local development backend, used when nothing else is configured. Set
/// `CPSTARS_HOST`, `--host` or `client.host_address` to query a deployed server.
pub const DEFAULT_HOST_ADDRESS: &str = "http://localhost:8081";

pub const HOST_ADDRESS_ENV: &str = "CPSTARS_HOST";
pub const TIMEOUT_ENV: &str = "CPSTARS_TIMEOUT_SECONDS";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    pub host_address: String,
    pub timeout_seconds: Option<u64>,
    pub user_agent: String,
    pub client_side_validation: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            host_address: DEFAULT_HOST_ADDRESS.to_string(),
            timeout_seconds: None,
            user_agent: format!("cpstars/{}", env!("CARGO_PKG_VERSION")),
            client_side_validation: true,
        }
    }
}

impl ClientConfig {
    pub fn with_host(host_address: impl Into<String>) -> Self {
        Self {
            host_address: host_address.into(),
            ..Self::default()
        }
    }

    /// 以環境變數覆蓋目前設定
    pub fn apply_env(self) -> Result<Self> {
        self.apply_env_from(|name| env::var(name).ok())
    }

    pub fn apply_env_from<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup(HOST_ADDRESS_ENV) {
            self.host_address = host;
        }

        if let Some(timeout) = lookup(TIMEOUT_ENV) {
            let seconds = timeout
                .parse::<u64>()
                .map_err(|e| CpStarsError::InvalidConfigValue {
                    field: TIMEOUT_ENV.to_string(),
                    value: timeout.clone(),
                    reason: e.to_string(),
                })?;
            self.timeout_seconds = Some(seconds);
        }

        Ok(self)
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_seconds.map(Duration::from_secs)
    }
}

impl Validate for ClientConfig {
    fn validate(&self) -> Result<()> {
        validate_url("host_address", &self.host_address)?;
        validate_non_empty_string("user_agent", &self.user_agent)?;

        if let Some(timeout) = self.timeout_seconds {
            validate_range("timeout_seconds", timeout, 1, 3600)?;
        }

        Ok(())
    }
}
