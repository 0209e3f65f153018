//! Client side of the SDK server: HTTP queries and the WebSocket feed.

mod http;
mod ws;

pub use http::{fetch_list, split_list};
pub use ws::{describe, watch, ws_url};
