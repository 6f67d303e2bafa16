use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

use crate::models::{ErrorResponse, SendEmailResponse};
use crate::transport::TransportError;

/// Failure on the contact-form path. The display text is what the caller sees.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("{0}")]
    Transport(#[from] TransportError),

    #[error("{message}")]
    Rejected { status: u16, message: String },

    #[error("Failed to render email: {0}")]
    Render(#[source] askama::Error),
}

/// Transport-level failure on the chat path. Provider-reported errors are not
/// `RelayError`s; they are returned as reply text.
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("AI backend error")]
    Transport(#[source] TransportError),

    #[error("AI backend error")]
    InvalidBody(#[source] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read developer profile at '{path}': {source}")]
    ProfileUnreadable {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl IntoResponse for DispatchError {
    fn into_response(self) -> Response {
        let body = SendEmailResponse { success: false, error: Some(self.to_string()) };
        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let body = ErrorResponse { error: self.to_string() };
        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relay_errors_hide_the_cause() {
        let err = RelayError::Transport(TransportError::new("connection refused"));
        assert_eq!(err.to_string(), "AI backend error");

        let parse = serde_json::from_str::<serde_json::Value>("<html>").unwrap_err();
        assert_eq!(RelayError::InvalidBody(parse).to_string(), "AI backend error");
    }

    #[test]
    fn dispatch_errors_carry_provider_message() {
        let err = DispatchError::Rejected { status: 422, message: "Invalid `to` field".into() };
        assert_eq!(err.to_string(), "Invalid `to` field");

        let err = DispatchError::from(TransportError::new("dns error"));
        assert_eq!(err.to_string(), "dns error");
    }
}
