//! Voice radio status SDK: who is transmitting, which stations are active,
//! and a WebSocket feed of radio events.

pub mod api;
pub mod config;
pub mod error;
pub mod events;
pub mod relay;
pub mod server;
pub mod transmitting;
pub mod voice;

pub use server::SdkServer;
