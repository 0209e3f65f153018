//! Server bootstrap and shutdown.

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{error, info};

use crate::api::{self, AppState};
use crate::config::Config;
use crate::error::ServerError;
use crate::events::EventTranslator;
use crate::voice::VoiceClient;

/// Owns the shared state and the listener lifecycle.
pub struct SdkServer {
    state: AppState,
    shutdown_tx: watch::Sender<bool>,
}

impl SdkServer {
    pub fn new(config: Config, voice: Arc<dyn VoiceClient>) -> Self {
        let (shutdown_tx, _) = watch::channel(false);
        Self {
            state: AppState::new(config, voice),
            shutdown_tx,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Where the voice client delivers its notifications.
    pub fn translator(&self) -> Arc<EventTranslator> {
        self.state.translator.clone()
    }

    /// Bind and start serving in the background. Port 0 picks an ephemeral port.
    pub async fn listen(&self) -> Result<(SocketAddr, JoinHandle<()>), ServerError> {
        let bind_addr = self.state.config.bind_addr();
        let listener = tokio::net::TcpListener::bind(&bind_addr)
            .await
            .map_err(|source| ServerError::Bind {
                addr: bind_addr.clone(),
                source,
            })?;
        let addr = listener.local_addr().map_err(|source| ServerError::Bind {
            addr: bind_addr,
            source,
        })?;

        let app = api::router(self.state.clone());
        let mut shutdown_rx = self.shutdown_tx.subscribe();
        let handle = tokio::spawn(async move {
            let result = axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    let _ = shutdown_rx.wait_for(|stop| *stop).await;
                })
                .await;
            if let Err(source) = result {
                error!("{}", ServerError::Serve { addr, source });
            }
        });

        info!(%addr, "SDK server listening");
        Ok((addr, handle))
    }

    /// Close every WebSocket connection, forget transmitting callsigns and stop accepting.
    pub fn shutdown(&self) {
        info!(
            connections = self.state.registry.len(),
            "shutting down SDK server"
        );
        // Stop accepting first; upgrades already in flight are refused by the closed registry.
        self.shutdown_tx.send_replace(true);
        self.state.registry.close_all();
        self.state.transmitting.clear();
    }
}
