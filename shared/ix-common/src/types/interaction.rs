//! Interaction Types
//!
//! One inbound event per webhook request or gateway dispatch.

use serde::{Deserialize, Serialize};

use super::command::CommandOptionType;
use super::id::Snowflake;

/// Interaction kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub enum InteractionType {
    /// Endpoint health check.
    Ping,
    /// Slash command invocation.
    ApplicationCommand,
    /// Button or select menu on a message.
    ComponentInvoke,
    /// Partial input while the user is typing an option.
    Autocomplete,
    /// Submitted modal form.
    ModalSubmit,
    /// Tag this server does not understand.
    Unknown(u8),
}

impl InteractionType {
    /// Name used in structured logs.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ping => "ping",
            Self::ApplicationCommand => "application_command",
            Self::ComponentInvoke => "component_invoke",
            Self::Autocomplete => "autocomplete",
            Self::ModalSubmit => "modal_submit",
            Self::Unknown(_) => "unknown",
        }
    }
}

impl From<u8> for InteractionType {
    fn from(value: u8) -> Self {
        match value {
            1 => Self::Ping,
            2 => Self::ApplicationCommand,
            3 => Self::ComponentInvoke,
            4 => Self::Autocomplete,
            5 => Self::ModalSubmit,
            other => Self::Unknown(other),
        }
    }
}

impl From<InteractionType> for u8 {
    fn from(value: InteractionType) -> Self {
        match value {
            InteractionType::Ping => 1,
            InteractionType::ApplicationCommand => 2,
            InteractionType::ComponentInvoke => 3,
            InteractionType::Autocomplete => 4,
            InteractionType::ModalSubmit => 5,
            InteractionType::Unknown(other) => other,
        }
    }
}

/// Resolved option value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionValue {
    /// Text, or a snowflake for mention kinds.
    String(String),
    /// Whole number.
    Integer(i64),
    /// True / false.
    Boolean(bool),
    /// Fractional number.
    Number(f64),
}

impl OptionValue {
    /// Text value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Integer value.
    pub const fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Integer(n) => Some(*n),
            _ => None,
        }
    }

    /// Boolean value.
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(b) => Some(*b),
            _ => None,
        }
    }
}

/// One element of the invoked option tree.
///
/// Subcommand elements carry `options`; leaf elements carry `value`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandDataOption {
    /// Option name.
    pub name: String,
    /// Option kind, when the sender includes it.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<CommandOptionType>,
    /// Leaf value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<OptionValue>,
    /// Nested elements.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<CommandDataOption>,
    /// Set on the option being typed during autocomplete.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub focused: Option<bool>,
}

impl CommandDataOption {
    /// Leaf element with a value.
    pub fn value(name: impl Into<String>, value: OptionValue) -> Self {
        Self {
            name: name.into(),
            kind: None,
            value: Some(value),
            options: Vec::new(),
            focused: None,
        }
    }

    /// Subcommand or group element.
    pub fn nested(
        name: impl Into<String>,
        kind: CommandOptionType,
        options: Vec<Self>,
    ) -> Self {
        Self {
            name: name.into(),
            kind: Some(kind),
            value: None,
            options,
            focused: None,
        }
    }

    /// Whether this element selects a subcommand or group.
    pub fn is_subcommand(&self) -> bool {
        self.kind.is_some_and(CommandOptionType::is_subcommand)
    }
}

/// Payload of an `ApplicationCommand` or `Autocomplete` interaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandData {
    /// Invoked command id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Snowflake>,
    /// Invoked top-level name.
    pub name: String,
    /// Command kind (chat input, user, message).
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<u8>,
    /// Invoked option tree.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<CommandDataOption>,
    /// Guild the command is registered in.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guild_id: Option<Snowflake>,
    /// Resolved users, roles, and channels; passed through untouched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolved: Option<serde_json::Value>,
}

impl CommandData {
    /// Command data with the given top-level name and option tree.
    pub fn new(name: impl Into<String>, options: Vec<CommandDataOption>) -> Self {
        Self {
            id: None,
            name: name.into(),
            kind: None,
            options,
            guild_id: None,
            resolved: None,
        }
    }
}

/// Payload of a `ComponentInvoke` or `ModalSubmit` interaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentData {
    /// Developer-defined component id.
    pub custom_id: String,
    /// Component kind.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component_type: Option<u8>,
    /// Selected values for select menus.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub values: Vec<String>,
    /// Submitted modal rows; passed through untouched.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub components: Vec<serde_json::Value>,
}

/// Interaction payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum InteractionData {
    /// Command invocation.
    Command(CommandData),
    /// Component or modal submission.
    Component(ComponentData),
}

/// Invoking user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// User id.
    pub id: Snowflake,
    /// Unique username.
    pub username: String,
    /// Display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub global_name: Option<String>,
}

/// Invoking guild member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    /// Underlying user.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
    /// Guild nickname.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nick: Option<String>,
    /// Role ids.
    #[serde(default)]
    pub roles: Vec<Snowflake>,
    /// Computed permission bitset, as a decimal string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permissions: Option<String>,
}

/// Type tag and id, read before the full payload.
#[derive(Debug, Clone, Deserialize)]
pub struct InteractionHead {
    /// Interaction id, when present.
    #[serde(default)]
    pub id: Option<Snowflake>,
    /// Interaction kind.
    #[serde(rename = "type")]
    pub kind: InteractionType,
}

/// One inbound interaction.
///
/// Fields this server does not model are ignored during deserialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interaction {
    /// Interaction id.
    pub id: Snowflake,
    /// Receiving application.
    pub application_id: Snowflake,
    /// Interaction kind.
    #[serde(rename = "type")]
    pub kind: InteractionType,
    /// Payload; absent for `Ping`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<InteractionData>,
    /// Guild the interaction came from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guild_id: Option<Snowflake>,
    /// Channel the interaction came from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel_id: Option<Snowflake>,
    /// Invoking member, for guild interactions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub member: Option<Member>,
    /// Invoking user, for direct-message interactions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
    /// Continuation token for follow-up messages.
    #[serde(default)]
    pub token: String,
    /// Payload version.
    #[serde(default = "default_version")]
    pub version: u8,
}

const fn default_version() -> u8 {
    1
}

impl Interaction {
    /// Command payload, if this is a command interaction.
    pub fn command_data(&self) -> Option<&CommandData> {
        match &self.data {
            Some(InteractionData::Command(data)) => Some(data),
            _ => None,
        }
    }

    /// Component payload, if this is a component or modal interaction.
    pub fn component_data(&self) -> Option<&ComponentData> {
        match &self.data {
            Some(InteractionData::Component(data)) => Some(data),
            _ => None,
        }
    }

    /// Invoking user from either the member or the user field.
    pub fn invoker(&self) -> Option<&User> {
        self.member
            .as_ref()
            .and_then(|m| m.user.as_ref())
            .or(self.user.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_command_interaction() {
        let interaction: Interaction = serde_json::from_value(json!({
            "id": "100",
            "application_id": "200",
            "type": 2,
            "token": "tok",
            "version": 1,
            "guild_id": "300",
            "channel_id": "400",
            "member": {"user": {"id": "500", "username": "kai"}, "roles": []},
            "data": {
                "id": "600",
                "name": "group",
                "type": 1,
                "options": [{
                    "name": "sub",
                    "type": 1,
                    "options": [{"name": "arg", "type": 3, "value": "x"}]
                }]
            },
            "app_permissions": "0",
            "locale": "en-US"
        }))
        .unwrap();

        assert_eq!(interaction.kind, InteractionType::ApplicationCommand);
        let data = interaction.command_data().unwrap();
        assert_eq!(data.name, "group");
        assert!(data.options[0].is_subcommand());
        assert_eq!(
            data.options[0].options[0].value,
            Some(OptionValue::String("x".into()))
        );
        assert_eq!(interaction.invoker().unwrap().username, "kai");
    }

    #[test]
    fn parses_component_interaction() {
        let interaction: Interaction = serde_json::from_value(json!({
            "id": "1",
            "application_id": "2",
            "type": 3,
            "token": "tok",
            "data": {"custom_id": "confirm:42", "component_type": 2}
        }))
        .unwrap();
        assert_eq!(interaction.kind, InteractionType::ComponentInvoke);
        assert_eq!(interaction.component_data().unwrap().custom_id, "confirm:42");
        assert!(interaction.command_data().is_none());
    }

    #[test]
    fn head_reads_type_and_optional_id() {
        let head: InteractionHead =
            serde_json::from_value(json!({"type": 1, "anything": [1, 2, 3]})).unwrap();
        assert_eq!(head.kind, InteractionType::Ping);
        assert!(head.id.is_none());

        let head: InteractionHead =
            serde_json::from_value(json!({"id": "77", "type": 1})).unwrap();
        assert_eq!(head.id.as_ref().map(Snowflake::as_str), Some("77"));
    }

    #[test]
    fn option_values_keep_their_kind() {
        let opts: Vec<CommandDataOption> = serde_json::from_value(json!([
            {"name": "a", "value": "s"},
            {"name": "b", "value": 7},
            {"name": "c", "value": true},
            {"name": "d", "value": 0.5},
        ]))
        .unwrap();
        assert_eq!(opts[0].value.as_ref().unwrap().as_str(), Some("s"));
        assert_eq!(opts[1].value.as_ref().unwrap().as_i64(), Some(7));
        assert_eq!(opts[2].value.as_ref().unwrap().as_bool(), Some(true));
        assert_eq!(opts[3].value, Some(OptionValue::Number(0.5)));
    }
}
