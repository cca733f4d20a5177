//! Route handlers

use super::{AppState, PublicEnv};
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::sse::{Event, KeepAlive, Sse};
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::{SecondsFormat, Utc};
use genie_application::{RelayError, RelayGiftInput};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::convert::Infallible;
use std::time::Duration;
use tokio_stream::StreamExt;
use tokio_stream::wrappers::ReceiverStream;
use tracing::{debug, error, warn};

/// Body of `POST /api/gift`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GiftRequest {
    #[serde(default)]
    pub user_prompt: Option<String>,
    #[serde(default)]
    pub session_id: Option<String>,
}

/// Body of `GET /test`.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub alive: bool,
    pub timestamp: String,
    pub env: PublicEnv,
}

pub(super) async fn gift(
    State(state): State<AppState>,
    payload: Result<Json<GiftRequest>, JsonRejection>,
) -> Response {
    // Malformed bodies answer in the same JSON shape as a missing prompt.
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            warn!(
                status = %rejection.status(),
                "Unreadable gift request: {}",
                rejection.body_text()
            );
            return bad_request(rejection.body_text());
        }
    };
    let input = RelayGiftInput {
        user_prompt: request.user_prompt,
        session_id: request.session_id,
    };

    let stream = match state.relay.execute(input).await {
        Ok(stream) => stream,
        Err(RelayError::InvalidInput(e)) => {
            warn!("Rejected gift request: {}", e);
            return bad_request(e.to_string());
        }
        Err(e) => {
            error!("Gift request failed before streaming: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "message": e.to_string() })),
            )
                .into_response();
        }
    };

    debug!(
        session_id = %stream.session_id,
        created = stream.created,
        "Opened event stream"
    );
    let events = ReceiverStream::new(stream.events)
        .map(|event| Ok::<_, Infallible>(Event::default().data(event.to_payload())));

    let mut response = Sse::new(events)
        .keep_alive(
            KeepAlive::new()
                .interval(Duration::from_secs(15))
                .text("keep-alive"),
        )
        .into_response();
    let headers = response.headers_mut();
    headers.insert(header::CACHE_CONTROL, HeaderValue::from_static("no-cache"));
    headers.insert(header::CONNECTION, HeaderValue::from_static("keep-alive"));
    response
}

fn bad_request(message: String) -> Response {
    (StatusCode::BAD_REQUEST, Json(json!({ "message": message }))).into_response()
}

pub(super) async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        alive: true,
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        env: state.env.clone(),
    })
}
