//! Shared wire types for the voice radio status SDK.

mod frequency;
mod models;

// Explicit re-exports (avoids rust-analyzer issues with `pub use models::*`)
pub use frequency::format_frequency;
pub use models::ws_types;
pub use models::{FrequencyStatePayload, RxPayload, Station, WsMessage};
