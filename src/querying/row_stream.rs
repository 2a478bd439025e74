//! Push-based stream of SELECT solutions.
//!
//! A producer (usually [`SparqlClient`](super::sparql_client::SparqlClient)) owns a
//! [`RowSender`] and pushes rows as they are decoded; the consumer polls the matching
//! [`RowStream`]. Ending or failing the stream consumes the sender, so at most one
//! terminal event is ever sent.

use crate::core::BindingRow;
use crate::querying::sparql_client::SparqlError;
use futures_util::Stream;
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio::sync::mpsc;

/// Event delivered to the consumer of a [`RowStream`].
#[derive(Debug, Clone, PartialEq)]
pub enum RowEvent {
    Data(BindingRow),
    End,
    Error(SparqlError),
}

/// Producing half of a row stream.
#[derive(Debug)]
pub struct RowSender {
    tx: mpsc::UnboundedSender<RowEvent>,
}

impl RowSender {
    /// Push one row. Returns `false` once the consumer has gone away.
    pub fn data(&self, row: BindingRow) -> bool {
        self.tx.send(RowEvent::Data(row)).is_ok()
    }

    pub fn end(self) {
        let _ = self.tx.send(RowEvent::End);
    }

    pub fn error(self, err: SparqlError) {
        let _ = self.tx.send(RowEvent::Error(err));
    }
}

/// Consuming half of a row stream.
#[derive(Debug)]
pub struct RowStream {
    rx: mpsc::UnboundedReceiver<RowEvent>,
}

impl RowStream {
    pub fn channel() -> (RowSender, RowStream) {
        let (tx, rx) = mpsc::unbounded_channel();
        (RowSender { tx }, RowStream { rx })
    }

    /// A stream that fails immediately, for executors that reject a query before sending it.
    pub fn failed(err: SparqlError) -> RowStream {
        let (tx, stream) = RowStream::channel();
        tx.error(err);
        stream
    }
}

impl Stream for RowStream {
    type Item = RowEvent;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.rx.poll_recv(cx)
    }
}
