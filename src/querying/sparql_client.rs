//! HTTP client for remote SPARQL endpoints (Virtuoso, Fuseki, Oxigraph server, ...)
//!
//! Only SELECT is supported. Queries are sent with the SPARQL 1.1 protocol "query via
//! URL-encoded POST" binding and results are requested as SPARQL JSON.

use crate::config::EndpointConfig;
use crate::core::BindingRow;
use crate::querying::row_stream::{RowSender, RowStream};
use reqwest::header::ACCEPT;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;
use tokio::runtime::Handle;
use tracing::{debug, info, warn};

pub const SPARQL_RESULTS_JSON: &str = "application/sparql-results+json";

/// Failure of a query execution, whatever the layer it happened in.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SparqlError {
    /// Connection, TLS, timeout or body read failure
    #[error("HTTP error: {0}")]
    Transport(String),

    /// The endpoint answered with a non-success status
    #[error("Query failed with status {status}: {body}")]
    Status { status: u16, body: String },

    /// The response body is not a SPARQL JSON SELECT result
    #[error("Malformed SPARQL results: {0}")]
    Decode(String),

    /// The producer went away without ending the row stream
    #[error("Row stream closed before completion")]
    StreamClosed,
}

impl From<reqwest::Error> for SparqlError {
    fn from(err: reqwest::Error) -> Self {
        SparqlError::Transport(err.to_string())
    }
}

impl From<serde_json::Error> for SparqlError {
    fn from(err: serde_json::Error) -> Self {
        SparqlError::Decode(err.to_string())
    }
}

/// Anything that can run a SELECT query and push its solutions.
///
/// Errors are never returned directly; they arrive as the terminal event of the stream.
pub trait SelectQuery {
    fn select(&self, query: &str) -> RowStream;
}

/// Decoded `application/sparql-results+json` document for a SELECT query.
#[derive(Debug, Clone, Deserialize)]
pub struct SelectResults {
    #[serde(default)]
    pub head: ResultsHead,
    pub results: ResultsBody,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResultsHead {
    #[serde(default)]
    pub vars: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResultsBody {
    pub bindings: Vec<BindingRow>,
}

pub fn parse_select_results(body: &[u8]) -> Result<SelectResults, SparqlError> {
    Ok(serde_json::from_slice(body)?)
}

/// SPARQL protocol client bound to one endpoint.
#[derive(Debug, Clone)]
pub struct SparqlClient {
    endpoint_url: String,
    client: Client,
}

impl SparqlClient {
    pub fn new(config: &EndpointConfig) -> Result<SparqlClient, SparqlError> {
        let mut builder = Client::builder().user_agent(config.user_agent.clone());
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build()?;

        Ok(SparqlClient { endpoint_url: config.endpoint_url.clone(), client })
    }

    pub fn endpoint_url(&self) -> &str {
        &self.endpoint_url
    }

    /// Run a SELECT query and decode the whole result document.
    pub async fn select_results(&self, query: &str) -> Result<SelectResults, SparqlError> {
        debug!(endpoint = %self.endpoint_url, "submitting SELECT query");

        let response = self
            .client
            .post(&self.endpoint_url)
            .header(ACCEPT, SPARQL_RESULTS_JSON)
            .form(&[("query", query)])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());
            return Err(SparqlError::Status { status: status.as_u16(), body });
        }

        let body = response.bytes().await?;
        let results = parse_select_results(&body)?;
        info!(
            endpoint = %self.endpoint_url,
            rows = results.results.bindings.len(),
            "SELECT query completed"
        );
        Ok(results)
    }

    async fn push_rows(self, query: String, tx: RowSender) {
        match self.select_results(&query).await {
            Ok(results) => {
                for row in results.results.bindings {
                    if !tx.data(row) {
                        debug!("row stream consumer dropped, discarding remaining rows");
                        return;
                    }
                }
                tx.end();
            }
            Err(err) => {
                warn!(endpoint = %self.endpoint_url, error = %err, "SELECT query failed");
                tx.error(err);
            }
        }
    }
}

impl SelectQuery for SparqlClient {
    /// Spawns the request on the current Tokio runtime and returns immediately.
    ///
    /// Outside a Tokio runtime nothing is sent and the stream fails with
    /// [`SparqlError::Transport`].
    fn select(&self, query: &str) -> RowStream {
        let handle = match Handle::try_current() {
            Ok(handle) => handle,
            Err(err) => {
                warn!(endpoint = %self.endpoint_url, error = %err, "no Tokio runtime to run the query on");
                return RowStream::failed(SparqlError::Transport(format!(
                    "no Tokio runtime available: {}",
                    err
                )));
            }
        };

        let (tx, stream) = RowStream::channel();
        handle.spawn(self.clone().push_rows(query.to_string(), tx));
        stream
    }
}
