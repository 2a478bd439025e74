//! Result Collector
//!
//! Turns the push-based row stream of a SELECT execution into one resolved
//! `Vec<Record>`, or into the error the stream ended with.
//!
//! # Example
//!
//! ```ignore
//! use arco_catalogue::execution::result_collector::fetch_data;
//! use arco_catalogue::querying::{CityId, SparqlClient};
//! use arco_catalogue::EndpointConfig;
//!
//! let client = SparqlClient::new(&EndpointConfig::default())?;
//! let city = CityId::parse("Roma")?;
//! let records = fetch_data(&client, &city).await?;
//! for record in &records {
//!     println!("{:?}", record.get("label"));
//! }
//! ```

use crate::core::{BindingRow, Record};
use crate::querying::query_template::{render_query, CityId, ROW_CAP};
use crate::querying::row_stream::RowEvent;
use crate::querying::sparql_client::{SelectQuery, SparqlError};
use futures_util::{Stream, StreamExt};
use tracing::{debug, info, warn};

/// Upper-case the first character of `value`, leaving the rest untouched.
///
/// Characters whose upper case spans several characters (`ß` → `SS`) expand.
pub fn capitalize_first(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Build the display record for one row. Only fields bound on the row appear.
pub fn to_record(row: &BindingRow) -> Record {
    row.iter().map(|(field, term)| (field.clone(), capitalize_first(&term.value))).collect()
}

/// Consumes a row stream until its first terminal event.
#[derive(Debug, Clone)]
pub struct ResultCollector {
    cap: usize,
}

impl ResultCollector {
    /// Collector bounded by the query's row cap.
    pub fn new() -> Self {
        Self { cap: ROW_CAP }
    }

    /// Collector keeping at most `cap` records. Rows past the cap are dropped.
    pub fn with_cap(cap: usize) -> Self {
        Self { cap }
    }

    /// Drive `rows` to completion.
    ///
    /// # Returns
    ///
    /// * `Ok(records)` on `End`, in arrival order (empty if no row came first)
    /// * `Err(err)` with the error exactly as carried by the first `Error` event;
    ///   rows received before it are discarded
    /// * `Err(SparqlError::StreamClosed)` if the stream stops without a terminal event
    ///
    /// Events after the first terminal one are never read.
    pub async fn collect<S>(&self, mut rows: S) -> Result<Vec<Record>, SparqlError>
    where
        S: Stream<Item = RowEvent> + Unpin,
    {
        let mut records = Vec::new();
        let mut dropped = 0usize;

        while let Some(event) = rows.next().await {
            match event {
                RowEvent::Data(row) => {
                    if records.len() < self.cap {
                        records.push(to_record(&row));
                    } else {
                        dropped += 1;
                    }
                }
                RowEvent::End => {
                    if dropped > 0 {
                        warn!(cap = self.cap, dropped, "row stream exceeded the row cap");
                    }
                    debug!(records = records.len(), "row stream ended");
                    return Ok(records);
                }
                RowEvent::Error(err) => {
                    debug!(discarded = records.len(), error = %err, "row stream failed");
                    return Err(err);
                }
            }
        }

        Err(SparqlError::StreamClosed)
    }
}

impl Default for ResultCollector {
    fn default() -> Self {
        Self::new()
    }
}

/// Fetch the catalogue entries located in `city`.
///
/// Renders the catalogue query, submits it through `executor` and collects the rows.
/// Independent calls share nothing and may run concurrently.
pub async fn fetch_data<Q>(executor: &Q, city: &CityId) -> Result<Vec<Record>, SparqlError>
where
    Q: SelectQuery + ?Sized,
{
    info!(city = %city, "fetching catalogue entries");
    let query = render_query(city);
    ResultCollector::new().collect(executor.select(&query)).await
}
