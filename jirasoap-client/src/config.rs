//! Client configuration.

use crate::error::{ClientError, ClientResult};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Where the SOAP service lives and how calls are bounded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Base URL of the JIRA instance (e.g. `https://jira.example.com`).
    pub endpoint_url: String,
    /// Path of the SOAP service below the endpoint.
    pub service_path: String,
    /// Bound on each call, in milliseconds. Passed to the transport with
    /// every request.
    pub timeout_ms: u64,
    /// Result cap used when a search is issued without one.
    pub default_max_results: u32,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint_url: String::new(),
            service_path: "/rpc/soap/jirasoapservice-v2".to_string(),
            timeout_ms: 30_000,
            default_max_results: 2000,
        }
    }
}

impl ClientConfig {
    pub fn new(endpoint_url: impl Into<String>) -> Self {
        Self {
            endpoint_url: endpoint_url.into(),
            ..Default::default()
        }
    }

    /// Loads a configuration from JSON; missing keys take their defaults.
    pub fn from_json(json: &str) -> ClientResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects configurations no transport could use.
    pub fn validate(&self) -> ClientResult<()> {
        if self.endpoint_url.trim().is_empty() {
            return Err(ClientError::Config("endpoint_url is empty".into()));
        }
        if self.timeout_ms == 0 {
            return Err(ClientError::Config("timeout_ms must be positive".into()));
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Endpoint and service path joined with exactly one slash.
    pub fn service_url(&self) -> String {
        let base = self.endpoint_url.trim_end_matches('/');
        let path = self.service_path.trim_start_matches('/');
        format!("{base}/{path}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.service_path, "/rpc/soap/jirasoapservice-v2");
        assert_eq!(config.timeout_ms, 30_000);
        assert_eq!(config.default_max_results, 2000);
        assert_eq!(config.timeout(), Duration::from_secs(30));
    }

    #[test]
    fn service_url_joins_cleanly() {
        let config = ClientConfig::new("https://jira.example.com/");
        assert_eq!(
            config.service_url(),
            "https://jira.example.com/rpc/soap/jirasoapservice-v2"
        );
    }
}
