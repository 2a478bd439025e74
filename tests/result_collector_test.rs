//! Tests for ResultCollector and fetch_data against scripted row streams

use arco_catalogue::core::{BindingRow, BindingValue, Record};
use arco_catalogue::execution::result_collector::{fetch_data, ResultCollector};
use arco_catalogue::querying::{CityId, RowEvent, RowStream, SelectQuery, SparqlError};
use futures_util::stream;
use std::sync::Mutex;
use std::time::Duration;

/// Executor that replays a fixed script and remembers the queries it was given
struct ScriptedEndpoint {
    rows: Vec<BindingRow>,
    outcome: Option<SparqlError>,
    queries: Mutex<Vec<String>>,
}

impl ScriptedEndpoint {
    fn ending_with(rows: Vec<BindingRow>) -> Self {
        Self { rows, outcome: None, queries: Mutex::new(Vec::new()) }
    }

    fn failing_with(rows: Vec<BindingRow>, err: SparqlError) -> Self {
        Self { rows, outcome: Some(err), queries: Mutex::new(Vec::new()) }
    }
}

impl SelectQuery for ScriptedEndpoint {
    fn select(&self, query: &str) -> RowStream {
        self.queries.lock().unwrap().push(query.to_string());

        let (tx, stream) = RowStream::channel();
        for row in &self.rows {
            tx.data(row.clone());
        }
        match &self.outcome {
            Some(err) => tx.error(err.clone()),
            None => tx.end(),
        }
        stream
    }
}

fn row(fields: &[(&str, &str)]) -> BindingRow {
    fields
        .iter()
        .map(|(name, value)| (name.to_string(), BindingValue::literal(value)))
        .collect()
}

fn roma() -> CityId {
    CityId::parse("Roma").unwrap()
}

#[tokio::test]
async fn test_single_row_scenario() {
    let mut first = row(&[("label", "vaso"), ("date", "1900")]);
    first.insert("bc".to_string(), BindingValue::uri("http://example.org/123"));
    let endpoint = ScriptedEndpoint::ending_with(vec![first]);

    let records = fetch_data(&endpoint, &roma()).await.unwrap();

    let expected: Record = [("bc", "Http://example.org/123"), ("label", "Vaso"), ("date", "1900")]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    assert_eq!(records, vec![expected]);
}

#[tokio::test]
async fn test_zero_rows_is_empty_not_error() {
    let endpoint = ScriptedEndpoint::ending_with(Vec::new());
    let records = fetch_data(&endpoint, &roma()).await;
    assert_eq!(records, Ok(Vec::new()));
}

#[tokio::test]
async fn test_error_is_returned_unchanged() {
    let timeout = SparqlError::Transport("operation timed out".to_string());
    let endpoint = ScriptedEndpoint::failing_with(Vec::new(), timeout.clone());

    let result = fetch_data(&endpoint, &roma()).await;
    assert_eq!(result, Err(timeout));
}

#[tokio::test]
async fn test_error_after_rows_discards_them() {
    let endpoint = ScriptedEndpoint::failing_with(
        vec![row(&[("label", "vaso")]), row(&[("label", "anfora")])],
        SparqlError::Status { status: 503, body: "busy".to_string() },
    );

    let result = fetch_data(&endpoint, &roma()).await;
    assert_eq!(result, Err(SparqlError::Status { status: 503, body: "busy".to_string() }));
}

#[tokio::test]
async fn test_order_is_arrival_order() {
    let labels = ["zeta", "alfa", "mu", "beta", "alfa"];
    let rows = labels.iter().map(|label| row(&[("label", *label)])).collect();
    let endpoint = ScriptedEndpoint::ending_with(rows);

    let records = fetch_data(&endpoint, &roma()).await.unwrap();
    let got: Vec<&str> = records.iter().map(|r| r.get("label").unwrap()).collect();
    assert_eq!(got, vec!["Zeta", "Alfa", "Mu", "Beta", "Alfa"]);
}

#[tokio::test]
async fn test_absent_fields_stay_absent() {
    let endpoint = ScriptedEndpoint::ending_with(vec![
        row(&[("bc", "x"), ("label", "vaso"), ("description", "")]),
        row(&[("bc", "y")]),
    ]);

    let records = fetch_data(&endpoint, &roma()).await.unwrap();
    assert_eq!(records[0].len(), 3);
    assert_eq!(records[0].get("description"), Some(""));
    assert_eq!(records[1].len(), 1);
    assert!(!records[1].contains("label"));
    assert!(!records[1].contains("description"));
}

#[tokio::test]
async fn test_query_is_rendered_for_city() {
    let endpoint = ScriptedEndpoint::ending_with(Vec::new());
    let firenze = CityId::parse("Firenze").unwrap();
    fetch_data(&endpoint, &firenze).await.unwrap();

    let queries = endpoint.queries.lock().unwrap();
    assert_eq!(queries.len(), 1);
    assert!(queries[0].contains("<https://w3id.org/arco/resource/City/Firenze>"));
}

#[tokio::test]
async fn test_events_after_terminal_are_ignored() {
    let events = vec![
        RowEvent::Data(row(&[("label", "vaso")])),
        RowEvent::End,
        RowEvent::Data(row(&[("label", "intruso")])),
        RowEvent::Error(SparqlError::Decode("late".to_string())),
    ];

    let records = ResultCollector::new().collect(stream::iter(events)).await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].get("label"), Some("Vaso"));
}

#[tokio::test]
async fn test_second_error_is_ignored() {
    let events = vec![
        RowEvent::Error(SparqlError::Decode("first".to_string())),
        RowEvent::Error(SparqlError::Decode("second".to_string())),
    ];

    let result = ResultCollector::new().collect(stream::iter(events)).await;
    assert_eq!(result, Err(SparqlError::Decode("first".to_string())));
}

#[tokio::test]
async fn test_stream_without_terminal_event() {
    let (tx, rows) = RowStream::channel();
    tx.data(row(&[("label", "vaso")]));
    drop(tx);

    let result = ResultCollector::new().collect(rows).await;
    assert_eq!(result, Err(SparqlError::StreamClosed));
}

#[tokio::test]
async fn test_rows_past_cap_are_dropped() {
    let events: Vec<RowEvent> = (0..150)
        .map(|i| RowEvent::Data(row(&[("bc", format!("bc{}", i).as_str())])))
        .chain(std::iter::once(RowEvent::End))
        .collect();

    let records = ResultCollector::new().collect(stream::iter(events)).await.unwrap();
    assert_eq!(records.len(), 100);
    assert_eq!(records[99].get("bc"), Some("Bc99"));

    let events = vec![
        RowEvent::Data(row(&[("bc", "a")])),
        RowEvent::Data(row(&[("bc", "b")])),
        RowEvent::End,
    ];
    let records = ResultCollector::with_cap(1).collect(stream::iter(events)).await.unwrap();
    assert_eq!(records.len(), 1);
}

#[tokio::test]
async fn test_rows_pushed_from_another_task() {
    let (tx, rows) = RowStream::channel();
    let producer = tokio::spawn(async move {
        for label in ["primo", "secondo", "terzo"] {
            tokio::time::sleep(Duration::from_millis(5)).await;
            tx.data(row(&[("label", label)]));
        }
        tx.end();
    });

    let records = ResultCollector::new().collect(rows).await.unwrap();
    producer.await.unwrap();

    let got: Vec<&str> = records.iter().map(|r| r.get("label").unwrap()).collect();
    assert_eq!(got, vec!["Primo", "Secondo", "Terzo"]);
}

#[tokio::test]
async fn test_concurrent_fetches_are_independent() {
    let roma_endpoint = ScriptedEndpoint::ending_with(vec![row(&[("label", "colosseo")])]);
    let milano_endpoint = ScriptedEndpoint::failing_with(
        vec![row(&[("label", "duomo")])],
        SparqlError::Transport("connection reset".to_string()),
    );
    let roma = roma();
    let milano = CityId::parse("Milano").unwrap();

    let (roma_result, milano_result) =
        tokio::join!(fetch_data(&roma_endpoint, &roma), fetch_data(&milano_endpoint, &milano));

    assert_eq!(roma_result.unwrap()[0].get("label"), Some("Colosseo"));
    assert!(matches!(milano_result, Err(SparqlError::Transport(_))));
}
