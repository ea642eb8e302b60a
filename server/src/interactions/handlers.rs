//! Interaction Webhook Handler

use axum::{body::Bytes, extract::State, http::HeaderMap, Json};
use ix_common::ResponseEnvelope;
use tracing::instrument;

use super::dispatch::{SIGNATURE_HEADER, TIMESTAMP_HEADER};
use super::error::DispatchError;
use crate::api::AppState;

fn header<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}

/// Receive one interaction.
///
/// POST /interactions
#[instrument(skip_all, fields(body_len = body.len()))]
pub async fn receive_interaction(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<ResponseEnvelope>, DispatchError> {
    state
        .dispatcher
        .dispatch(
            &body,
            header(&headers, SIGNATURE_HEADER),
            header(&headers, TIMESTAMP_HEADER),
        )
        .await
        .map(Json)
}
