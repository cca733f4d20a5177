//! HTTP relay server
//!
//! `POST /api/gift` streams a gift recommendation as server-sent events,
//! `GET /test` reports liveness and the non-secret provider settings.

mod handlers;

pub use handlers::{GiftRequest, HealthResponse};

use axum::http::{Method, header};
use axum::routing::{get, post};
use axum::Router;
use genie_application::RelayGiftUseCase;
use serde::Serialize;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

/// Provider settings reported by `/test`. Never carries the credential.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PublicEnv {
    pub model: String,
    pub url: String,
}

/// Server state
#[derive(Clone)]
pub struct AppState {
    pub relay: RelayGiftUseCase,
    pub env: PublicEnv,
}

impl AppState {
    pub fn new(relay: RelayGiftUseCase, url: impl Into<String>) -> Self {
        let env = PublicEnv {
            model: relay.model().to_string(),
            url: url.into(),
        };
        Self { relay, env }
    }
}

/// Build the router with CORS and request tracing.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route("/api/gift", post(handlers::gift))
        .route("/test", get(handlers::health))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Serve until the listener fails.
pub async fn serve(listener: TcpListener, state: AppState) -> std::io::Result<()> {
    let address = listener.local_addr()?;
    info!(
        %address,
        model = %state.env.model,
        "Gift relay listening"
    );
    axum::serve(listener, router(state)).await
}
