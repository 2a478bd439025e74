//! SPARQL querying
//!
//! - **query_template** - the catalogue query and validated city identifiers
//! - **row_stream** - push-based stream of solutions
//! - **sparql_client** - HTTP executor for remote endpoints

pub mod query_template;
pub mod row_stream;
pub mod sparql_client;

pub use query_template::{render_query, CityId, CityIdError, QUERY_TEMPLATE, ROW_CAP};
pub use row_stream::{RowEvent, RowSender, RowStream};
pub use sparql_client::{SelectQuery, SelectResults, SparqlClient, SparqlError};
