//! Query handlers.

use axum::{
    extract::State,
    http::{header, Method, StatusCode},
    response::{IntoResponse, Response},
};

use shared::format_frequency;

use crate::api::AppState;
use crate::voice::VoiceClient;

/// `name:frequency` for every station the predicate accepts, comma-joined.
/// Empty while the voice client is disconnected.
fn station_list(voice: &dyn VoiceClient, active: impl Fn(u32) -> bool) -> String {
    if !voice.is_voice_connected() {
        return String::new();
    }
    voice
        .radio_state()
        .into_iter()
        .filter(|(frequency_hz, _)| active(*frequency_hz))
        .map(|(frequency_hz, state)| {
            format!("{}:{}", state.station_name, format_frequency(frequency_hz))
        })
        .collect::<Vec<_>>()
        .join(",")
}

pub async fn transmitting(State(state): State<AppState>) -> String {
    state.transmitting.snapshot_joined(",")
}

pub async fn rx(State(state): State<AppState>) -> String {
    let voice = state.voice.as_ref();
    station_list(voice, |f| voice.rx_state(f))
}

pub async fn tx(State(state): State<AppState>) -> String {
    let voice = state.voice.as_ref();
    station_list(voice, |f| voice.tx_state(f))
}

pub async fn method_not_allowed() -> Response {
    (StatusCode::METHOD_NOT_ALLOWED, [(header::CONNECTION, "close")]).into_response()
}

/// Unrouted paths answer with the client name; non-GET requests are refused.
pub async fn fallback(State(state): State<AppState>, method: Method) -> Response {
    if method == Method::GET {
        state.config.client_name.clone().into_response()
    } else {
        method_not_allowed().await
    }
}
