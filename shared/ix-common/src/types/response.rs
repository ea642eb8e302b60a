//! Interaction Response Types
//!
//! Exactly one [`ResponseEnvelope`] answers each interaction.

use serde::{Deserialize, Serialize};

use super::message::{MessageBody, EPHEMERAL_FLAG};

/// Synchronous answer to an interaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "WireResponse", try_from = "WireResponse")]
pub enum ResponseEnvelope {
    /// Answer to a `Ping`.
    Pong,
    /// Immediate visible reply.
    ChannelMessage(MessageBody),
    /// Reserve the reply slot; the real content follows as an edit.
    DeferredAck {
        /// Whether the eventual reply is visible only to the invoker.
        ephemeral: bool,
    },
    /// Acknowledge a component without changing its message yet.
    DeferredUpdate,
    /// Replace the message a component is attached to.
    UpdateMessage(MessageBody),
}

impl ResponseEnvelope {
    /// Numeric wire tag.
    pub const fn type_code(&self) -> u8 {
        match self {
            Self::Pong => 1,
            Self::ChannelMessage(_) => 4,
            Self::DeferredAck { .. } => 5,
            Self::DeferredUpdate => 6,
            Self::UpdateMessage(_) => 7,
        }
    }

    /// Name used in structured logs.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pong => "pong",
            Self::ChannelMessage(_) => "channel_message",
            Self::DeferredAck { .. } => "deferred_ack",
            Self::DeferredUpdate => "deferred_update",
            Self::UpdateMessage(_) => "update_message",
        }
    }
}

#[derive(Serialize, Deserialize)]
struct WireResponse {
    #[serde(rename = "type")]
    kind: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    data: Option<MessageBody>,
}

impl From<ResponseEnvelope> for WireResponse {
    fn from(envelope: ResponseEnvelope) -> Self {
        let kind = envelope.type_code();
        let data = match envelope {
            ResponseEnvelope::Pong | ResponseEnvelope::DeferredUpdate => None,
            ResponseEnvelope::DeferredAck { ephemeral } => ephemeral.then(|| MessageBody {
                flags: Some(EPHEMERAL_FLAG),
                ..MessageBody::default()
            }),
            ResponseEnvelope::ChannelMessage(body) | ResponseEnvelope::UpdateMessage(body) => {
                Some(body)
            }
        };
        Self { kind, data }
    }
}

impl TryFrom<WireResponse> for ResponseEnvelope {
    type Error = String;

    fn try_from(wire: WireResponse) -> Result<Self, Self::Error> {
        match wire.kind {
            1 => Ok(Self::Pong),
            4 => Ok(Self::ChannelMessage(wire.data.unwrap_or_default())),
            5 => Ok(Self::DeferredAck {
                ephemeral: wire.data.is_some_and(|d| d.is_ephemeral()),
            }),
            6 => Ok(Self::DeferredUpdate),
            7 => Ok(Self::UpdateMessage(wire.data.unwrap_or_default())),
            other => Err(format!("unsupported response type {other}")),
        }
    }
}
