//! Set of callsigns currently transmitting.

use std::collections::BTreeSet;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Callsigns with an open receive-begin, fed by voice client events and read by `/transmitting`.
#[derive(Debug, Default)]
pub struct TransmittingSet(Mutex<BTreeSet<String>>);

impl TransmittingSet {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, BTreeSet<String>> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn add(&self, callsign: &str) {
        self.lock().insert(callsign.to_string());
    }

    pub fn remove(&self, callsign: &str) {
        self.lock().remove(callsign);
    }

    pub fn contains(&self, callsign: &str) -> bool {
        self.lock().contains(callsign)
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    /// Current callsigns joined by `separator`, in set order.
    pub fn snapshot_joined(&self, separator: &str) -> String {
        let set = self.lock();
        set.iter().map(String::as_str).collect::<Vec<_>>().join(separator)
    }
}
