//! Message Types
//!
//! Rich payload fields (embeds, components, mentions) are opaque JSON blobs
//! passed through unchanged.

use serde::{Deserialize, Serialize};

use super::id::Snowflake;

/// Message flag marking a response visible only to the invoking user.
pub const EPHEMERAL_FLAG: u64 = 1 << 6;

/// Body of a reply, edit, or follow-up message.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MessageBody {
    /// Text content.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Embeds, untouched.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub embeds: Vec<serde_json::Value>,
    /// Component rows, untouched.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub components: Vec<serde_json::Value>,
    /// Mention policy, untouched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allowed_mentions: Option<serde_json::Value>,
    /// Message flags bitset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flags: Option<u64>,
    /// Text-to-speech.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tts: Option<bool>,
}

impl MessageBody {
    /// Plain text message.
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            ..Self::default()
        }
    }

    /// Mark the message ephemeral.
    #[must_use]
    pub fn ephemeral(mut self) -> Self {
        self.flags = Some(self.flags.unwrap_or(0) | EPHEMERAL_FLAG);
        self
    }

    /// Whether the ephemeral flag is set.
    pub fn is_ephemeral(&self) -> bool {
        self.flags.is_some_and(|f| f & EPHEMERAL_FLAG != 0)
    }

    /// No content, embeds, or components.
    pub fn is_empty(&self) -> bool {
        self.content.as_deref().is_none_or(str::is_empty)
            && self.embeds.is_empty()
            && self.components.is_empty()
    }
}

/// Message as returned by the remote after a follow-up call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Message id.
    pub id: Snowflake,
    /// Channel the message lives in.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel_id: Option<Snowflake>,
    /// Text content.
    #[serde(default)]
    pub content: String,
    /// Message flags bitset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flags: Option<u64>,
}
