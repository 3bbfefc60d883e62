//! `POST /callback`: signature check, payload parsing, one task per event.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    routing::post,
    Router,
};

use super::signature::{verify_signature, SIGNATURE_HEADER};
use super::types::WebhookPayload;
use crate::pipeline::EventRouter;

/// Shared state for the webhook endpoint
#[derive(Clone)]
pub struct WebhookState {
    pub router: Arc<EventRouter>,
    pub channel_secret: Arc<str>,
}

impl WebhookState {
    pub fn new(router: Arc<EventRouter>, channel_secret: &str) -> Self {
        Self {
            router,
            channel_secret: Arc::from(channel_secret),
        }
    }
}

/// Routes served for the chat platform
pub fn webhook_routes(state: WebhookState) -> Router {
    Router::new().route("/callback", post(callback_handler)).with_state(state)
}

/// POST /callback: acknowledges as soon as the body is authenticated and
/// parsed; each event is processed on its own task so a panic stays local.
async fn callback_handler(State(state): State<WebhookState>, headers: HeaderMap, body: Bytes) -> StatusCode {
    let Some(signature) = headers.get(SIGNATURE_HEADER).and_then(|v| v.to_str().ok()) else {
        log::warn!("Webhook call without {} header", SIGNATURE_HEADER);
        return StatusCode::BAD_REQUEST;
    };

    if let Err(e) = verify_signature(&state.channel_secret, &body, signature) {
        log::warn!("Rejected webhook call: {}", e);
        return StatusCode::BAD_REQUEST;
    }

    let payload: WebhookPayload = match serde_json::from_slice(&body) {
        Ok(payload) => payload,
        Err(e) => {
            log::warn!("Unparsable webhook body: {}", e);
            return StatusCode::BAD_REQUEST;
        }
    };

    log::debug!("Webhook delivered {} event(s)", payload.events.len());

    for event in payload.events {
        let event = event.into_inbound();
        let router = Arc::clone(&state.router);
        tokio::spawn(async move {
            router.dispatch(event).await;
        });
    }

    StatusCode::OK
}
