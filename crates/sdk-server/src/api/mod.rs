//! HTTP API routes.

mod routes;
mod ws;

use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::config::Config;
use crate::events::EventTranslator;
use crate::relay::ConnectionRegistry;
use crate::transmitting::TransmittingSet;
use crate::voice::VoiceClient;

/// Shared app state.
#[derive(Clone)]
pub struct AppState {
    pub transmitting: Arc<TransmittingSet>,
    pub registry: Arc<ConnectionRegistry>,
    pub translator: Arc<EventTranslator>,
    pub voice: Arc<dyn VoiceClient>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config, voice: Arc<dyn VoiceClient>) -> Self {
        let transmitting = Arc::new(TransmittingSet::new());
        let registry = Arc::new(ConnectionRegistry::new());
        let translator = Arc::new(EventTranslator::new(
            voice.clone(),
            transmitting.clone(),
            registry.clone(),
        ));
        Self {
            transmitting,
            registry,
            translator,
            voice,
            config: Arc::new(config),
        }
    }
}

/// GET-only routes; other methods get 405 and a closed connection, other paths the client name.
///
/// `get` also answers HEAD unless a HEAD handler is set, so each route refuses it explicitly.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route(
            "/transmitting",
            get(routes::transmitting)
                .head(routes::method_not_allowed)
                .fallback(routes::method_not_allowed),
        )
        .route(
            "/rx",
            get(routes::rx)
                .head(routes::method_not_allowed)
                .fallback(routes::method_not_allowed),
        )
        .route(
            "/tx",
            get(routes::tx)
                .head(routes::method_not_allowed)
                .fallback(routes::method_not_allowed),
        )
        .route(
            "/ws",
            get(ws::ws_handler)
                .head(routes::method_not_allowed)
                .fallback(routes::method_not_allowed),
        )
        .fallback(routes::fallback)
        .layer(cors)
        .with_state(state)
}
