//! Single-use response channel handed to command handlers.

use ix_common::{MessageBody, ResponseEnvelope, Snowflake};
use thiserror::Error;
use tokio::sync::oneshot;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SinkError {
    /// The webhook request went away before the handler answered.
    #[error("Interaction {0} is no longer awaiting a response")]
    Closed(Snowflake),
}

/// Completes the synchronous response to one interaction.
///
/// Every completing method takes `self`, so a handler answers at most once.
/// Dropping the sink without answering fails the webhook request.
#[derive(Debug)]
pub struct ResponseSink {
    interaction_id: Snowflake,
    tx: oneshot::Sender<ResponseEnvelope>,
}

impl ResponseSink {
    pub(crate) fn channel(interaction_id: Snowflake) -> (Self, oneshot::Receiver<ResponseEnvelope>) {
        let (tx, rx) = oneshot::channel();
        (Self { interaction_id, tx }, rx)
    }

    pub const fn interaction_id(&self) -> &Snowflake {
        &self.interaction_id
    }

    /// Defer the visible reply. Follow up with `Followup::edit_original`.
    pub fn acknowledge(self, ephemeral: bool) -> Result<(), SinkError> {
        self.respond(ResponseEnvelope::DeferredAck { ephemeral })
    }

    /// Reply immediately with a channel message.
    pub fn reply(self, body: MessageBody) -> Result<(), SinkError> {
        self.respond(ResponseEnvelope::ChannelMessage(body))
    }

    /// Acknowledge a component interaction without changing its message.
    pub fn defer_update(self) -> Result<(), SinkError> {
        self.respond(ResponseEnvelope::DeferredUpdate)
    }

    /// Edit the message a component is attached to.
    pub fn update_message(self, body: MessageBody) -> Result<(), SinkError> {
        self.respond(ResponseEnvelope::UpdateMessage(body))
    }

    /// Send an arbitrary envelope.
    pub fn respond(self, envelope: ResponseEnvelope) -> Result<(), SinkError> {
        let Self { interaction_id, tx } = self;
        tx.send(envelope).map_err(|_| SinkError::Closed(interaction_id))
    }
}
