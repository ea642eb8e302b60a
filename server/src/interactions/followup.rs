//! Follow-up Messages
//!
//! Calls addressed by `(application_id, token[, message_id])` that remain
//! valid after the synchronous response, for as long as the remote keeps the
//! interaction token alive.

use ix_common::{Message, MessageBody, Snowflake};
use reqwest::Method;
use thiserror::Error;
use tracing::{debug, instrument};

use crate::commands::validation::{validate_message, ValidationError};
use crate::rest::{routes, RestClient, RestError};

#[derive(Debug, Error)]
pub enum FollowupError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Rest(#[from] RestError),
}

/// Follow-up handle for one interaction.
#[derive(Clone)]
pub struct Followup {
    rest: RestClient,
    application_id: Snowflake,
    token: String,
}

impl std::fmt::Debug for Followup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Followup")
            .field("application_id", &self.application_id)
            .field("token", &"[redacted]")
            .finish_non_exhaustive()
    }
}

impl Followup {
    pub fn new(rest: RestClient, application_id: Snowflake, token: impl Into<String>) -> Self {
        Self {
            rest,
            application_id,
            token: token.into(),
        }
    }

    /// Replace the original response (the reply reserved by a deferral).
    #[instrument(skip_all, fields(application_id = %self.application_id))]
    pub async fn edit_original(&self, body: &MessageBody) -> Result<Message, FollowupError> {
        validate_message(body)?;
        let path = routes::original_response(self.application_id.as_str(), &self.token);
        let message: Message = self.rest.call_json(Method::PATCH, &path, Some(body)).await?;
        debug!(message_id = %message.id, "Original response edited");
        Ok(message)
    }

    /// Delete the original response.
    #[instrument(skip_all, fields(application_id = %self.application_id))]
    pub async fn delete_original(&self) -> Result<(), FollowupError> {
        let path = routes::original_response(self.application_id.as_str(), &self.token);
        self.rest.call_empty::<()>(Method::DELETE, &path, None).await?;
        Ok(())
    }

    /// Post an additional message.
    #[instrument(skip_all, fields(application_id = %self.application_id))]
    pub async fn create_message(&self, body: &MessageBody) -> Result<Message, FollowupError> {
        validate_message(body)?;
        // wait=true makes the remote return the created message
        let path = format!(
            "{}?wait=true",
            routes::followups(self.application_id.as_str(), &self.token)
        );
        let message: Message = self.rest.call_json(Method::POST, &path, Some(body)).await?;
        debug!(message_id = %message.id, "Follow-up message created");
        Ok(message)
    }

    /// Edit a previously created follow-up message.
    #[instrument(skip(self, body), fields(application_id = %self.application_id))]
    pub async fn edit_message(
        &self,
        message_id: &Snowflake,
        body: &MessageBody,
    ) -> Result<Message, FollowupError> {
        validate_message(body)?;
        let path = routes::followup(self.application_id.as_str(), &self.token, message_id.as_str());
        Ok(self.rest.call_json(Method::PATCH, &path, Some(body)).await?)
    }

    /// Delete a previously created follow-up message.
    #[instrument(skip(self), fields(application_id = %self.application_id))]
    pub async fn delete_message(&self, message_id: &Snowflake) -> Result<(), FollowupError> {
        let path = routes::followup(self.application_id.as_str(), &self.token, message_id.as_str());
        self.rest.call_empty::<()>(Method::DELETE, &path, None).await?;
        Ok(())
    }
}
