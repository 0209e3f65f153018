//! Connection registry and broadcast fan-out.

mod sink;

pub use sink::{ConnectionSink, Outbound};

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use axum::extract::ws::Utf8Bytes;
use shared::WsMessage;
use tracing::{debug, error, warn};

use crate::error::SinkError;

/// Connection identifier, unique for the lifetime of the registry.
pub type ConnectionId = u64;

/// Outcome of one broadcast call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BroadcastReport {
    pub recipients: usize,
    pub failed: usize,
}

#[derive(Debug, Default)]
struct Connections {
    sinks: HashMap<ConnectionId, ConnectionSink>,
    /// Set by `close_all`; later registrations are refused.
    closed: bool,
}

/// Open WebSocket connections, keyed by id.
///
/// The lock only covers map access. Sends go through non-blocking sinks after the
/// current entries have been copied out, so a slow or dead client never stalls the
/// voice client thread that triggered the broadcast.
#[derive(Debug, Default)]
pub struct ConnectionRegistry {
    connections: Mutex<Connections>,
    next_id: AtomicU64,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Connections> {
        self.connections
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Allocate a fresh connection id.
    pub fn next_id(&self) -> ConnectionId {
        self.next_id.fetch_add(1, Ordering::Relaxed) + 1
    }

    /// Add a connection. Ids come from [`Self::next_id`]; reusing one is a bug.
    ///
    /// Returns `false` once [`Self::close_all`] has run: the sink is closed
    /// instead of registered and the caller must drop the connection.
    pub fn register(&self, id: ConnectionId, sink: ConnectionSink) -> bool {
        let mut connections = self.lock();
        if connections.closed {
            drop(connections);
            sink.close();
            debug!(conn_id = id, "registry closed, connection refused");
            return false;
        }
        let previous = connections.sinks.insert(id, sink);
        drop(connections);
        debug_assert!(previous.is_none(), "connection id {id} registered twice");
        if previous.is_some() {
            error!(conn_id = id, "connection id registered twice, previous sink replaced");
        }
        true
    }

    /// Remove a connection. Removing an unknown id does nothing.
    pub fn unregister(&self, id: ConnectionId) {
        if self.lock().sinks.remove(&id).is_some() {
            debug!(conn_id = id, "connection unregistered");
        }
    }

    pub fn len(&self) -> usize {
        self.lock().sinks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().sinks.is_empty()
    }

    pub fn contains(&self, id: ConnectionId) -> bool {
        self.lock().sinks.contains_key(&id)
    }

    pub fn is_closed(&self) -> bool {
        self.lock().closed
    }

    /// Send `message` to every connection registered at the time of the call.
    ///
    /// Failed sends are logged and counted; the failing connection stays registered
    /// until its own socket reports the disconnect.
    pub fn broadcast(&self, message: &WsMessage) -> BroadcastReport {
        let json: Utf8Bytes = match message.to_json() {
            Ok(j) => j.into(),
            Err(e) => {
                warn!(event_type = message.type_name(), error = %e, "failed to serialize message");
                return BroadcastReport::default();
            }
        };

        let sinks: Vec<(ConnectionId, ConnectionSink)> = self
            .lock()
            .sinks
            .iter()
            .map(|(id, sink)| (*id, sink.clone()))
            .collect();

        let mut report = BroadcastReport {
            recipients: sinks.len(),
            failed: 0,
        };
        for (id, sink) in sinks {
            if let Err(e) = sink.send(json.clone()) {
                report.failed += 1;
                warn!(conn_id = id, error = %e, "failed to send message to client");
            }
        }
        debug!(
            event_type = message.type_name(),
            recipients = report.recipients,
            failed = report.failed,
            "broadcast message"
        );
        report
    }

    /// Send `message` to a single connection.
    pub fn send_to(&self, id: ConnectionId, message: &WsMessage) -> Result<(), SinkError> {
        let sink = self.lock().sinks.get(&id).cloned().ok_or(SinkError::Closed)?;
        let json = message.to_json().map_err(|_| SinkError::Closed)?;
        sink.send(json.into())
    }

    /// Signal every connection to close, empty the registry and refuse new registrations.
    pub fn close_all(&self) {
        let drained: Vec<(ConnectionId, ConnectionSink)> = {
            let mut connections = self.lock();
            connections.closed = true;
            connections.sinks.drain().collect()
        };
        let count = drained.len();
        for (_, sink) in drained {
            sink.close();
        }
        debug!(count, "closed all connections");
    }
}
