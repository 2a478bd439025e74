//! # ArCo Catalogue
//!
//! Fetches the catalogued cultural properties of an Italian city from ArCo, the
//! knowledge graph of the Italian cultural heritage published by the Ministry of
//! Culture at `https://dati.cultura.gov.it/sparql`.
//!
//! One fixed SPARQL query is instantiated with a city identifier, its solutions
//! are streamed back, each value gets its first character upper-cased, and the
//! rows are returned as flat records.
//!
//! ## Example
//!
//! ```no_run
//! use arco_catalogue::{fetch_data, CityId, EndpointConfig, SparqlClient};
//!
//! # async fn example() -> arco_catalogue::Result<()> {
//! let client = SparqlClient::new(&EndpointConfig::default())?;
//! let city = CityId::parse("Roma")?;
//! for record in fetch_data(&client, &city).await? {
//!     println!("{}", serde_json::to_string(&record)?);
//! }
//! # Ok(())
//! # }
//! ```

#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::unnecessary_map_or)]
#![allow(clippy::new_without_default)]
#![allow(clippy::doc_markdown)]
#![allow(missing_docs)]

/// Core data structures and types
pub mod core;

/// Endpoint configuration
pub mod config;

/// Query template, row stream and SPARQL HTTP client
pub mod querying;

/// Collecting row streams into records
pub mod execution;

pub mod error {
    //! Error types and result definitions

    use crate::querying::{CityIdError, SparqlError};
    use thiserror::Error;

    /// Result type alias for catalogue operations
    pub type Result<T> = std::result::Result<T, Error>;

    /// Main error type for callers that combine configuration, validation and querying
    #[derive(Error, Debug)]
    pub enum Error {
        /// Configuration error
        #[error("Configuration error: {0}")]
        Config(String),

        /// The city identifier was rejected before querying
        #[error("Invalid city identifier: {0}")]
        InvalidCity(#[from] CityIdError),

        /// The query execution failed
        #[error("Query error: {0}")]
        Query(#[from] SparqlError),

        /// IO error
        #[error("IO error: {0}")]
        Io(#[from] std::io::Error),

        /// JSON (de)serialization error
        #[error("Serialization error: {0}")]
        Serialization(#[from] serde_json::Error),
    }
}

// Re-export commonly used types
pub use crate::config::EndpointConfig;
pub use crate::core::{BindingRow, BindingValue, Record};
pub use error::{Error, Result};
pub use execution::{fetch_data, ResultCollector};
pub use querying::{CityId, SelectQuery, SparqlClient, SparqlError};
