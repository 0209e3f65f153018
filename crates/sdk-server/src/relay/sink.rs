//! Per-connection outbound queue.

use axum::extract::ws::Utf8Bytes;
use tokio::sync::mpsc::{self, error::TrySendError};

use crate::error::SinkError;

/// Item queued for a connection's writer task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outbound {
    /// Shared across every recipient of a broadcast; cloning does not copy the payload.
    Text(Utf8Bytes),
    /// Send a close frame and stop writing.
    Close,
}

/// Sending half of a connection's outbound queue. Never blocks.
#[derive(Debug, Clone)]
pub struct ConnectionSink {
    tx: mpsc::Sender<Outbound>,
}

impl ConnectionSink {
    /// Create a sink and the receiver its writer task drains.
    pub fn channel(capacity: usize) -> (Self, mpsc::Receiver<Outbound>) {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        (Self { tx }, rx)
    }

    pub fn send(&self, text: Utf8Bytes) -> Result<(), SinkError> {
        self.tx.try_send(Outbound::Text(text)).map_err(|e| match e {
            TrySendError::Full(_) => SinkError::Full,
            TrySendError::Closed(_) => SinkError::Closed,
        })
    }

    /// Ask the writer to close the socket. If the queue is full the writer still
    /// closes once the sink is dropped and the queue drains.
    pub fn close(self) {
        let _ = self.tx.try_send(Outbound::Close);
    }

    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}
