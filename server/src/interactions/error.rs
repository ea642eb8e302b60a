//! Dispatch Error Types

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use ix_common::InteractionType;
use serde::Serialize;
use thiserror::Error;

/// Fixed body of the unauthenticated response.
pub const UNAUTHENTICATED_BODY: &str = "invalid request signature";

/// Terminal failures of a webhook request.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// Signature missing or not valid for the body and timestamp.
    #[error("Invalid request signature")]
    Unauthenticated,

    /// Verified body is not an interaction.
    #[error("Malformed interaction: {0}")]
    MalformedPayload(#[from] serde_json::Error),

    /// Interaction type carries no payload it needs.
    #[error("Interaction {0} is missing its data")]
    MissingData(&'static str),

    /// Interaction type this server does not answer.
    #[error("Unsupported interaction type {0:?}")]
    Unsupported(InteractionType),

    /// Handler finished without completing its response sink.
    #[error("Handler did not respond")]
    NoResponse,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl IntoResponse for DispatchError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            // No echo of anything from the request.
            Self::Unauthenticated => {
                return (StatusCode::UNAUTHORIZED, UNAUTHENTICATED_BODY).into_response();
            }
            Self::MalformedPayload(_) | Self::MissingData(_) => {
                (StatusCode::BAD_REQUEST, "MALFORMED_INTERACTION")
            }
            Self::Unsupported(_) => (StatusCode::BAD_REQUEST, "UNSUPPORTED_INTERACTION"),
            Self::NoResponse => (StatusCode::INTERNAL_SERVER_ERROR, "NO_RESPONSE"),
        };

        let body = Json(ErrorResponse {
            error: code.to_string(),
            message: self.to_string(),
        });

        (status, body).into_response()
    }
}
