use axum::extract::State;
use axum::Json;
use serde_json::{json, Value};
use tracing::{debug, error, info};

use crate::errors::{DispatchError, RelayError};
use crate::models::{ChatReply, ChatRequest, ContactSubmission, SendEmailResponse};
use crate::state::AppState;

/// POST `/api/send-email`: relays a contact-form submission to the email provider.
pub async fn send_email_handler(
    State(state): State<AppState>,
    Json(submission): Json<ContactSubmission>,
) -> Result<Json<SendEmailResponse>, DispatchError> {
    info!("New email request from {} ({})", submission.name, submission.email);

    if let Err(e) = state.dispatcher.send(&submission).await {
        match &e {
            DispatchError::Rejected { status, .. } => {
                error!("Error sending email (provider HTTP {status}): {e}")
            }
            DispatchError::Transport(_) | DispatchError::Render(_) => {
                error!("Error sending email: {e}")
            }
        }
        return Err(e);
    }

    info!("Contact emails sent for {}", submission.email);
    Ok(Json(SendEmailResponse { success: true, error: None }))
}

/// POST `/api/chat`: single-turn chat with the portfolio assistant.
/// Provider-side errors come back as a normal reply; only transport failures are 500s.
pub async fn chat_handler(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatReply>, RelayError> {
    info!("New AI request | Mode: {}", request.mode_description());
    debug!("User message: {:?}", request.message);

    state.relay.reply(&request).await.map(Json).map_err(|e| {
        match &e {
            RelayError::Transport(source) => error!("AI Error: {source}"),
            RelayError::InvalidBody(source) => error!("AI Error: unreadable response body: {source}"),
        }
        e
    })
}

/// GET `/api/health`
pub async fn health_handler() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
