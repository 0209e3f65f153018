//! Voice radio status SDK server.
//!
//! Optional env: SDK_HOST, SDK_PORT, SDK_CLIENT_NAME, SDK_WS_QUEUE_CAPACITY, SDK_STATIONS

use std::sync::Arc;

use sdk_server::{config, voice::InMemoryVoiceClient, SdkServer};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = config::Config::from_env().map_err(|e| anyhow::anyhow!("config: {}", e))?;

    let voice = Arc::new(InMemoryVoiceClient::with_stations(config.stations.clone()));
    voice.set_connected(!config.stations.is_empty());

    let server = SdkServer::new(config, voice);
    let (_addr, handle) = server.listen().await.map_err(|e| {
        tracing::error!("{}", e);
        e
    })?;

    tokio::signal::ctrl_c().await?;
    server.shutdown();
    handle.await?;

    Ok(())
}
