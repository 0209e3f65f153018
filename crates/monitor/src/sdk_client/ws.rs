//! WebSocket feed consumer.

use anyhow::Result;
use futures_util::{SinkExt, StreamExt};
use shared::{format_frequency, Station, WsMessage};
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;

/// `http://host:port` → `ws://host:port/ws`.
pub fn ws_url(base_url: &str) -> String {
    let base = base_url.trim_end_matches('/');
    let base = if let Some(rest) = base.strip_prefix("https://") {
        format!("wss://{}", rest)
    } else if let Some(rest) = base.strip_prefix("http://") {
        format!("ws://{}", rest)
    } else {
        base.to_string()
    };
    if base.ends_with("/ws") {
        base
    } else {
        format!("{}/ws", base)
    }
}

fn stations(list: &[Station]) -> String {
    list.iter()
        .map(|s| format!("{} {}", s.station_name, format_frequency(s.frequency_hz)))
        .collect::<Vec<_>>()
        .join(", ")
}

/// One-line summary of a feed message.
pub fn describe(msg: &WsMessage) -> String {
    match msg {
        WsMessage::RxBegin(p) => format!(
            "rx begin  {} on {}",
            p.callsign,
            format_frequency(p.frequency_hz)
        ),
        WsMessage::RxEnd(p) => format!(
            "rx end    {} on {}",
            p.callsign,
            format_frequency(p.frequency_hz)
        ),
        WsMessage::FrequencyStateUpdate(p) => format!(
            "stations  rx=[{}] tx=[{}] xc=[{}]",
            stations(&p.rx),
            stations(&p.tx),
            stations(&p.xc)
        ),
    }
}

/// Print every feed message until the server closes the connection.
pub async fn watch(ws_url: &str) -> Result<()> {
    let (ws, _) = connect_async(ws_url).await?;
    tracing::info!("Connected to {}", ws_url);
    let (mut ws_tx, mut ws_rx) = ws.split();

    let mut ping_interval = tokio::time::interval(tokio::time::Duration::from_secs(30));
    ping_interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            msg = ws_rx.next() => {
                match msg {
                    Some(Ok(Message::Text(t))) => match serde_json::from_str::<WsMessage>(&t) {
                        Ok(m) => println!("{}", describe(&m)),
                        Err(e) => tracing::warn!("Unrecognised message: {} ({})", t, e),
                    },
                    Some(Ok(Message::Pong(_))) => tracing::trace!("pong"),
                    Some(Ok(Message::Close(_))) | None => break,
                    Some(Ok(_)) => {}
                    Some(Err(e)) => return Err(e.into()),
                }
            }
            _ = ping_interval.tick() => {
                ws_tx.send(Message::Ping(Vec::new())).await?;
            }
        }
    }

    tracing::info!("Feed closed");
    Ok(())
}
