//! Translates voice client notifications into broadcasts and transmitting-set updates.

use std::str::FromStr;
use std::sync::Arc;

use shared::{FrequencyStatePayload, Station, WsMessage};
use tracing::{debug, trace};

use crate::error::UnknownEvent;
use crate::relay::ConnectionRegistry;
use crate::transmitting::TransmittingSet;
use crate::voice::VoiceClient;

/// Notification raised by the voice client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoiceEvent {
    RxBegin,
    RxEnd,
    FrequencyStateUpdate,
}

impl FromStr for VoiceEvent {
    type Err = UnknownEvent;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "RxBegin" | "ReceiveBegin" | "kRxBegin" => Ok(Self::RxBegin),
            "RxEnd" | "ReceiveEnd" | "kRxEnd" => Ok(Self::RxEnd),
            "FrequencyStateUpdate" | "FrequencyStateChanged" | "kFrequencyStateUpdate" => {
                Ok(Self::FrequencyStateUpdate)
            }
            other => Err(UnknownEvent(other.to_string())),
        }
    }
}

/// Entry point for voice client callbacks. Safe to call from any thread; never blocks on I/O.
pub struct EventTranslator {
    voice: Arc<dyn VoiceClient>,
    transmitting: Arc<TransmittingSet>,
    registry: Arc<ConnectionRegistry>,
}

impl EventTranslator {
    pub fn new(
        voice: Arc<dyn VoiceClient>,
        transmitting: Arc<TransmittingSet>,
        registry: Arc<ConnectionRegistry>,
    ) -> Self {
        Self {
            voice,
            transmitting,
            registry,
        }
    }

    /// Handle one notification. Events arriving while the voice client is
    /// disconnected, or missing the callsign/frequency they need, are dropped.
    pub fn handle_event(
        &self,
        event: VoiceEvent,
        callsign: Option<&str>,
        frequency_hz: Option<u32>,
    ) {
        if !self.voice.is_voice_connected() {
            trace!(?event, "voice client disconnected, event dropped");
            return;
        }

        match (event, callsign, frequency_hz) {
            (VoiceEvent::RxBegin, Some(callsign), Some(frequency_hz)) => {
                debug!(callsign, frequency_hz, "rx begin");
                self.registry
                    .broadcast(&WsMessage::rx_begin(callsign, frequency_hz));
                self.transmitting.add(callsign);
            }
            (VoiceEvent::RxEnd, Some(callsign), Some(frequency_hz)) => {
                debug!(callsign, frequency_hz, "rx end");
                self.registry
                    .broadcast(&WsMessage::rx_end(callsign, frequency_hz));
                self.transmitting.remove(callsign);
            }
            (VoiceEvent::FrequencyStateUpdate, _, _) => self.push_frequency_state(),
            (event, callsign, frequency_hz) => {
                debug!(?event, ?callsign, ?frequency_hz, "event missing parameters, dropped");
            }
        }
    }

    /// Like [`Self::handle_event`], for notifications identified by name.
    pub fn handle_named_event(
        &self,
        name: &str,
        callsign: Option<&str>,
        frequency_hz: Option<u32>,
    ) -> Result<(), UnknownEvent> {
        let event = name.parse()?;
        self.handle_event(event, callsign, frequency_hz);
        Ok(())
    }

    /// Broadcast the full frequency state to every client.
    pub fn push_frequency_state(&self) {
        if !self.voice.is_voice_connected() {
            return;
        }
        let payload = self.frequency_state();
        self.registry
            .broadcast(&WsMessage::FrequencyStateUpdate(payload));
    }

    /// Partition the current radio state into rx, tx and cross-couple lists.
    pub fn frequency_state(&self) -> FrequencyStatePayload {
        let mut payload = FrequencyStatePayload::default();
        for (frequency_hz, state) in self.voice.radio_state() {
            let station = Station::new(state.station_name, frequency_hz);
            if state.rx {
                payload.rx.push(station.clone());
            }
            if state.tx {
                payload.tx.push(station.clone());
            }
            if state.cross_couple {
                payload.xc.push(station);
            }
        }
        payload
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::relay::{ConnectionSink, Outbound};
    use crate::voice::{InMemoryVoiceClient, StationState};
    use tokio::sync::mpsc;

    struct Harness {
        voice: Arc<InMemoryVoiceClient>,
        transmitting: Arc<TransmittingSet>,
        translator: EventTranslator,
        rx: mpsc::Receiver<Outbound>,
    }

    fn harness(connected: bool) -> Harness {
        let voice = Arc::new(InMemoryVoiceClient::new());
        voice.set_connected(connected);
        let transmitting = Arc::new(TransmittingSet::new());
        let registry = Arc::new(ConnectionRegistry::new());
        let (sink, rx) = ConnectionSink::channel(16);
        registry.register(registry.next_id(), sink);
        let translator = EventTranslator::new(voice.clone(), transmitting.clone(), registry);
        Harness {
            voice,
            transmitting,
            translator,
            rx,
        }
    }

    fn next_message(rx: &mut mpsc::Receiver<Outbound>) -> Option<WsMessage> {
        match rx.try_recv().ok()? {
            Outbound::Text(t) => Some(serde_json::from_str(t.as_str()).unwrap()),
            Outbound::Close => None,
        }
    }

    fn station(name: &str, rx: bool, tx: bool, xc: bool) -> StationState {
        StationState {
            station_name: name.to_string(),
            rx,
            tx,
            cross_couple: xc,
        }
    }

    #[test]
    fn rx_begin_broadcasts_then_marks_transmitting() {
        let mut h = harness(true);
        h.translator
            .handle_event(VoiceEvent::RxBegin, Some("BAW123"), Some(121_500_000));
        assert_eq!(
            next_message(&mut h.rx),
            Some(WsMessage::rx_begin("BAW123", 121_500_000))
        );
        assert_eq!(h.transmitting.snapshot_joined(","), "BAW123");

        h.translator
            .handle_event(VoiceEvent::RxEnd, Some("BAW123"), Some(121_500_000));
        assert_eq!(
            next_message(&mut h.rx),
            Some(WsMessage::rx_end("BAW123", 121_500_000))
        );
        assert!(!h.transmitting.contains("BAW123"));
    }

    #[test]
    fn disconnected_voice_client_drops_everything() {
        let mut h = harness(false);
        h.voice
            .set_station(121_500_000, station("EGLL_TWR", true, false, false));
        h.translator
            .handle_event(VoiceEvent::RxBegin, Some("BAW123"), Some(121_500_000));
        h.translator
            .handle_event(VoiceEvent::FrequencyStateUpdate, None, None);
        assert!(next_message(&mut h.rx).is_none());
        assert!(h.transmitting.is_empty());
    }

    #[test]
    fn missing_parameters_are_ignored() {
        let mut h = harness(true);
        h.translator
            .handle_event(VoiceEvent::RxBegin, None, Some(121_500_000));
        h.translator
            .handle_event(VoiceEvent::RxEnd, Some("BAW123"), None);
        assert!(next_message(&mut h.rx).is_none());
        assert!(h.transmitting.is_empty());
    }

    #[test]
    fn frequency_state_update_single_rx_station() {
        let mut h = harness(true);
        h.voice
            .set_station(121_500_000, station("EGLL_TWR", true, false, false));
        h.translator
            .handle_event(VoiceEvent::FrequencyStateUpdate, Some("ignored"), Some(1));

        let Some(WsMessage::FrequencyStateUpdate(payload)) = next_message(&mut h.rx) else {
            panic!("expected frequency state update");
        };
        assert_eq!(payload.rx, vec![Station::new("EGLL_TWR", 121_500_000)]);
        assert!(payload.tx.is_empty());
        assert!(payload.xc.is_empty());
    }

    #[test]
    fn flags_partition_independently() {
        let h = harness(true);
        h.voice
            .set_station(118_500_000, station("EGLL_TWR", true, true, true));
        h.voice
            .set_station(121_900_000, station("EGLL_GND", false, false, false));
        h.voice
            .set_station(126_825_000, station("LON_S_CTR", true, false, true));

        let payload = h.translator.frequency_state();
        assert_eq!(
            payload.rx,
            vec![
                Station::new("EGLL_TWR", 118_500_000),
                Station::new("LON_S_CTR", 126_825_000)
            ]
        );
        assert_eq!(payload.tx, vec![Station::new("EGLL_TWR", 118_500_000)]);
        assert_eq!(payload.xc.len(), 2);
    }

    #[test]
    fn named_events() {
        let mut h = harness(true);
        assert_eq!("ReceiveBegin".parse::<VoiceEvent>(), Ok(VoiceEvent::RxBegin));
        assert_eq!(
            "FrequencyStateChanged".parse::<VoiceEvent>(),
            Ok(VoiceEvent::FrequencyStateUpdate)
        );
        assert!(h
            .translator
            .handle_named_event("StationAdded", Some("BAW123"), Some(1))
            .is_err());
        assert!(next_message(&mut h.rx).is_none());

        h.translator
            .handle_named_event("ReceiveBegin", Some("BAW123"), Some(121_500_000))
            .unwrap();
        assert!(h.transmitting.contains("BAW123"));
    }
}
