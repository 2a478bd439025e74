//! Query Execution Module
//!
//! Adapts the row stream of a submitted query into the records handed to callers.
//!
//! # Components
//!
//! - **ResultCollector** - consumes row events until the first terminal event
//! - **fetch_data** - renders the catalogue query for a city, submits it and collects
//!
//! # Example
//!
//! ```ignore
//! use arco_catalogue::execution::{fetch_data, ResultCollector};
//!
//! // One-shot fetch
//! let records = fetch_data(&client, &city).await?;
//!
//! // Or drive a stream obtained elsewhere
//! let records = ResultCollector::new().collect(client.select(&query)).await?;
//! ```

pub mod result_collector;

pub use result_collector::{capitalize_first, fetch_data, to_record, ResultCollector};
