//! WebSocket wire model.
//!
//! Every frame the server pushes is a JSON object whose `type` field selects
//! the shape of `value`:
//!
//! ```text
//! {"type":"kRxBegin","value":{"callsign":"BAW123","pFrequencyHz":121500000}}
//! {"type":"kFrequencyStateUpdate","value":{"rx":[...],"tx":[...],"xc":[...]}}
//! ```

use serde::{Deserialize, Serialize};

/// A station as published on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Station {
    pub station_name: String,
    pub frequency_hz: u32,
}

impl Station {
    pub fn new(station_name: impl Into<String>, frequency_hz: u32) -> Self {
        Self {
            station_name: station_name.into(),
            frequency_hz,
        }
    }
}

/// kRxBegin / kRxEnd payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RxPayload {
    pub callsign: String,
    #[serde(rename = "pFrequencyHz")]
    pub frequency_hz: u32,
}

/// kFrequencyStateUpdate payload. A station may appear in any subset of the lists.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrequencyStatePayload {
    pub rx: Vec<Station>,
    pub tx: Vec<Station>,
    pub xc: Vec<Station>,
}

/// WebSocket message types.
pub mod ws_types {
    pub const RX_BEGIN: &str = "kRxBegin";
    pub const RX_END: &str = "kRxEnd";
    pub const FREQUENCY_STATE_UPDATE: &str = "kFrequencyStateUpdate";
}

/// A message pushed to every WebSocket client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum WsMessage {
    #[serde(rename = "kRxBegin")]
    RxBegin(RxPayload),
    #[serde(rename = "kRxEnd")]
    RxEnd(RxPayload),
    #[serde(rename = "kFrequencyStateUpdate")]
    FrequencyStateUpdate(FrequencyStatePayload),
}

impl WsMessage {
    pub fn rx_begin(callsign: impl Into<String>, frequency_hz: u32) -> Self {
        Self::RxBegin(RxPayload {
            callsign: callsign.into(),
            frequency_hz,
        })
    }

    pub fn rx_end(callsign: impl Into<String>, frequency_hz: u32) -> Self {
        Self::RxEnd(RxPayload {
            callsign: callsign.into(),
            frequency_hz,
        })
    }

    /// Value of the `type` discriminator.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::RxBegin(_) => ws_types::RX_BEGIN,
            Self::RxEnd(_) => ws_types::RX_END,
            Self::FrequencyStateUpdate(_) => ws_types::FREQUENCY_STATE_UPDATE,
        }
    }

    /// Text frame payload.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
