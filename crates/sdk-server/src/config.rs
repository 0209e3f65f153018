//! Configuration for the SDK server.

use crate::error::ConfigError;
use crate::voice::StationState;

const DEFAULT_PORT: u16 = 49080;
const DEFAULT_WS_QUEUE_CAPACITY: usize = 256;

/// SDK server configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Body returned for unrouted paths.
    pub client_name: String,
    /// Per-connection outbound queue depth; a full queue drops the message for that client.
    pub ws_queue_capacity: usize,
    /// Stations seeded into the in-memory voice client.
    pub stations: Vec<(u32, StationState)>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let host = std::env::var("SDK_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port: u16 = std::env::var("SDK_PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(DEFAULT_PORT);
        let client_name =
            std::env::var("SDK_CLIENT_NAME").unwrap_or_else(|_| "AFV Status SDK".to_string());
        let ws_queue_capacity = std::env::var("SDK_WS_QUEUE_CAPACITY")
            .ok()
            .and_then(|c| c.parse().ok())
            .filter(|c: &usize| *c > 0)
            .unwrap_or(DEFAULT_WS_QUEUE_CAPACITY);
        let stations = match std::env::var("SDK_STATIONS") {
            Ok(raw) => parse_stations(&raw)?,
            Err(_) => Vec::new(),
        };

        Ok(Self {
            host,
            port,
            client_name,
            ws_queue_capacity,
            stations,
        })
    }

    /// Loopback config on an ephemeral port.
    pub fn for_test() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 0,
            client_name: "AFV Status SDK".to_string(),
            ws_queue_capacity: DEFAULT_WS_QUEUE_CAPACITY,
            stations: Vec::new(),
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Parse `NAME:HZ[:flags]` entries separated by commas. Flags are a `+`-joined
/// subset of `rx`, `tx`, `xc`; omitted flags mean receive only.
pub fn parse_stations(raw: &str) -> Result<Vec<(u32, StationState)>, ConfigError> {
    let mut out = Vec::new();
    for entry in raw.split(',').map(str::trim).filter(|e| !e.is_empty()) {
        let invalid = |reason| ConfigError::InvalidStation {
            entry: entry.to_string(),
            reason,
        };
        let mut parts = entry.split(':');
        let name = parts
            .next()
            .filter(|n| !n.is_empty())
            .ok_or_else(|| invalid("missing station name"))?;
        let frequency_hz: u32 = parts
            .next()
            .ok_or_else(|| invalid("missing frequency"))?
            .parse()
            .map_err(|_| invalid("frequency is not an integer"))?;
        let mut state = StationState::new(name);
        match parts.next() {
            None => state.rx = true,
            Some(flags) => {
                for flag in flags.split('+') {
                    match flag {
                        "rx" => state.rx = true,
                        "tx" => state.tx = true,
                        "xc" => state.cross_couple = true,
                        _ => return Err(invalid("unknown flag")),
                    }
                }
            }
        }
        if parts.next().is_some() {
            return Err(invalid("too many fields"));
        }
        out.push((frequency_hz, state));
    }
    Ok(out)
}
