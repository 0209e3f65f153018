//! Voice client boundary.
//!
//! The voice client owns the radio state. This crate only queries it and
//! receives its notifications through [`crate::events::EventTranslator`].

use std::collections::BTreeMap;
use std::sync::{PoisonError, RwLock};

/// Per-frequency station flags, as reported by the voice client.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StationState {
    pub station_name: String,
    pub rx: bool,
    pub tx: bool,
    pub cross_couple: bool,
}

impl StationState {
    pub fn new(station_name: impl Into<String>) -> Self {
        Self {
            station_name: station_name.into(),
            ..Self::default()
        }
    }
}

/// Queries the status service needs from the voice client.
///
/// Implementations are called from HTTP handlers and event callbacks on
/// arbitrary threads.
pub trait VoiceClient: Send + Sync {
    fn is_voice_connected(&self) -> bool;

    /// Full frequency → station mapping, produced fresh on every call.
    fn radio_state(&self) -> BTreeMap<u32, StationState>;

    fn rx_state(&self, frequency_hz: u32) -> bool;

    fn tx_state(&self, frequency_hz: u32) -> bool;
}

#[derive(Debug, Default)]
struct Inner {
    connected: bool,
    stations: BTreeMap<u32, StationState>,
}

/// Voice client backed by an in-memory station table.
#[derive(Debug, Default)]
pub struct InMemoryVoiceClient(RwLock<Inner>);

impl InMemoryVoiceClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_stations(stations: impl IntoIterator<Item = (u32, StationState)>) -> Self {
        let client = Self::new();
        for (frequency_hz, state) in stations {
            client.set_station(frequency_hz, state);
        }
        client
    }

    pub fn set_connected(&self, connected: bool) {
        self.0.write().unwrap_or_else(PoisonError::into_inner).connected = connected;
    }

    pub fn set_station(&self, frequency_hz: u32, state: StationState) {
        self.0
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .stations
            .insert(frequency_hz, state);
    }

    pub fn remove_station(&self, frequency_hz: u32) {
        self.0
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .stations
            .remove(&frequency_hz);
    }

    fn station(&self, frequency_hz: u32) -> Option<StationState> {
        self.0
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .stations
            .get(&frequency_hz)
            .cloned()
    }
}

impl VoiceClient for InMemoryVoiceClient {
    fn is_voice_connected(&self) -> bool {
        self.0.read().unwrap_or_else(PoisonError::into_inner).connected
    }

    fn radio_state(&self) -> BTreeMap<u32, StationState> {
        self.0
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .stations
            .clone()
    }

    fn rx_state(&self, frequency_hz: u32) -> bool {
        self.station(frequency_hz).is_some_and(|s| s.rx)
    }

    fn tx_state(&self, frequency_hz: u32) -> bool {
        self.station(frequency_hz).is_some_and(|s| s.tx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tower(rx: bool, tx: bool) -> StationState {
        StationState {
            rx,
            tx,
            ..StationState::new("EGLL_TWR")
        }
    }

    #[test]
    fn starts_disconnected_and_empty() {
        let client = InMemoryVoiceClient::new();
        assert!(!client.is_voice_connected());
        assert!(client.radio_state().is_empty());
        assert!(!client.rx_state(118_500_000));
    }

    #[test]
    fn reports_station_flags() {
        let client = InMemoryVoiceClient::with_stations([(118_500_000, tower(true, false))]);
        client.set_connected(true);
        assert!(client.is_voice_connected());
        assert!(client.rx_state(118_500_000));
        assert!(!client.tx_state(118_500_000));
        assert!(!client.rx_state(121_500_000));
    }

    #[test]
    fn radio_state_is_a_copy() {
        let client = InMemoryVoiceClient::with_stations([(118_500_000, tower(true, true))]);
        let snapshot = client.radio_state();
        client.remove_station(118_500_000);
        assert_eq!(snapshot.len(), 1);
        assert!(client.radio_state().is_empty());
    }
}
