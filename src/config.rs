//! Endpoint configuration
//!
//! Configuration can come from [`EndpointConfig::default`], a JSON file, or both: fields
//! missing from the file keep their default values.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Public SPARQL endpoint of the Italian Ministry of Culture, which serves ArCo.
pub const DEFAULT_ENDPOINT_URL: &str = "https://dati.cultura.gov.it/sparql";

/// Where and how to send catalogue queries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EndpointConfig {
    pub endpoint_url: String,
    /// Transport timeout for the whole request. `None` waits indefinitely.
    pub timeout_secs: Option<u64>,
    pub user_agent: String,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            endpoint_url: DEFAULT_ENDPOINT_URL.to_string(),
            timeout_secs: None,
            user_agent: format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION")),
        }
    }
}

impl EndpointConfig {
    pub fn new(endpoint_url: &str) -> Self {
        Self { endpoint_url: endpoint_url.to_string(), ..Self::default() }
    }

    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = Some(timeout_secs);
        self
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let config: EndpointConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        Self::from_json(&contents)
    }

    pub fn validate(&self) -> Result<()> {
        let url = self.endpoint_url.trim();
        if url.is_empty() {
            return Err(Error::Config("endpoint_url must not be empty".to_string()));
        }
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(Error::Config(format!(
                "endpoint_url must be an http(s) URL, got {}",
                self.endpoint_url
            )));
        }
        if self.timeout_secs == Some(0) {
            return Err(Error::Config("timeout_secs must be positive".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_points_at_public_endpoint() {
        let config = EndpointConfig::default();
        assert_eq!(config.endpoint_url, DEFAULT_ENDPOINT_URL);
        assert_eq!(config.timeout_secs, None);
        assert!(config.user_agent.starts_with("arco-catalogue/"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = EndpointConfig::from_json(r#"{"timeout_secs": 15}"#).unwrap();
        assert_eq!(config.endpoint_url, DEFAULT_ENDPOINT_URL);
        assert_eq!(config.timeout_secs, Some(15));
    }

    #[test]
    fn test_rejects_bad_values() {
        let err = EndpointConfig::from_json(r#"{"endpoint_url": "ftp://example.org"}"#).unwrap_err();
        assert!(matches!(err, Error::Config(_)));

        let err = EndpointConfig::new("http://localhost:8890/sparql")
            .with_timeout_secs(0)
            .validate()
            .unwrap_err();
        assert!(format!("{}", err).contains("timeout_secs"));

        assert!(matches!(EndpointConfig::from_json("{"), Err(Error::Serialization(_))));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = EndpointConfig::from_file("/nonexistent/arco-endpoint.json").unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
