//! Application Command Types
//!
//! Commands and their option schemas as declared in the remote catalog.

use serde::{Deserialize, Serialize};

use super::id::Snowflake;

/// Option kind tag.
///
/// Unrecognised tags deserialize into [`CommandOptionType::Unknown`] so a
/// malformed schema can be reported by validation instead of failing to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub enum CommandOptionType {
    /// Nested command; carries leaf options.
    SubCommand,
    /// Group of subcommands.
    SubCommandGroup,
    /// Free text.
    String,
    /// Whole number.
    Integer,
    /// True / false.
    Boolean,
    /// User mention.
    User,
    /// Channel mention.
    Channel,
    /// Role mention.
    Role,
    /// Any tag outside the supported set.
    Unknown(u8),
}

impl CommandOptionType {
    /// Whether this is one of the supported kinds.
    pub const fn is_known(self) -> bool {
        !matches!(self, Self::Unknown(_))
    }

    /// `SubCommand` or `SubCommandGroup`.
    pub const fn is_subcommand(self) -> bool {
        matches!(self, Self::SubCommand | Self::SubCommandGroup)
    }

    /// A value-carrying kind.
    pub const fn is_leaf(self) -> bool {
        self.is_known() && !self.is_subcommand()
    }
}

impl From<u8> for CommandOptionType {
    fn from(value: u8) -> Self {
        match value {
            1 => Self::SubCommand,
            2 => Self::SubCommandGroup,
            3 => Self::String,
            4 => Self::Integer,
            5 => Self::Boolean,
            6 => Self::User,
            7 => Self::Channel,
            8 => Self::Role,
            other => Self::Unknown(other),
        }
    }
}

impl From<CommandOptionType> for u8 {
    fn from(value: CommandOptionType) -> Self {
        match value {
            CommandOptionType::SubCommand => 1,
            CommandOptionType::SubCommandGroup => 2,
            CommandOptionType::String => 3,
            CommandOptionType::Integer => 4,
            CommandOptionType::Boolean => 5,
            CommandOptionType::User => 6,
            CommandOptionType::Channel => 7,
            CommandOptionType::Role => 8,
            CommandOptionType::Unknown(other) => other,
        }
    }
}

/// Value of a predefined choice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ChoiceValue {
    /// Text choice.
    String(String),
    /// Integer choice.
    Integer(i64),
    /// Anything else the wire carried; rejected by validation.
    Other(serde_json::Value),
}

/// Predefined `(name, value)` choice for a leaf option.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionChoice {
    /// Display name.
    pub name: String,
    /// Submitted value.
    pub value: ChoiceValue,
}

/// Command option schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandOption {
    /// Option kind.
    #[serde(rename = "type")]
    pub kind: CommandOptionType,
    /// Option name (unique among siblings).
    pub name: String,
    /// Option description.
    pub description: String,
    /// Whether the option must be supplied. Leaf kinds only.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub required: bool,
    /// Predefined choices. Leaf kinds only.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub choices: Vec<OptionChoice>,
    /// Nested options. Subcommand kinds only.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<CommandOption>,
}

impl CommandOption {
    /// Leaf option of the given kind.
    pub fn leaf(
        kind: CommandOptionType,
        name: impl Into<String>,
        description: impl Into<String>,
        required: bool,
    ) -> Self {
        Self {
            kind,
            name: name.into(),
            description: description.into(),
            required,
            choices: Vec::new(),
            options: Vec::new(),
        }
    }

    /// Subcommand carrying leaf options.
    pub fn sub_command(
        name: impl Into<String>,
        description: impl Into<String>,
        options: Vec<Self>,
    ) -> Self {
        Self {
            kind: CommandOptionType::SubCommand,
            name: name.into(),
            description: description.into(),
            required: false,
            choices: Vec::new(),
            options,
        }
    }

    /// Subcommand group carrying subcommands.
    pub fn group(
        name: impl Into<String>,
        description: impl Into<String>,
        options: Vec<Self>,
    ) -> Self {
        Self {
            kind: CommandOptionType::SubCommandGroup,
            ..Self::sub_command(name, description, options)
        }
    }

    /// Append a predefined choice.
    #[must_use]
    pub fn with_choice(mut self, name: impl Into<String>, value: ChoiceValue) -> Self {
        self.choices.push(OptionChoice {
            name: name.into(),
            value,
        });
        self
    }
}

/// Where a command is visible.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CommandScope {
    /// Every guild and direct messages.
    Global,
    /// A single guild.
    Guild(Snowflake),
}

impl CommandScope {
    /// Guild id for guild scope.
    pub const fn guild_id(&self) -> Option<&Snowflake> {
        match self {
            Self::Global => None,
            Self::Guild(id) => Some(id),
        }
    }
}

/// A command as stored in the remote catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Command {
    /// Command id.
    pub id: Snowflake,
    /// Owning application.
    pub application_id: Snowflake,
    /// Guild scope (absent for global commands).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guild_id: Option<Snowflake>,
    /// Command name (1-32 characters).
    pub name: String,
    /// Command description.
    pub description: String,
    /// Ordered option schema.
    #[serde(default)]
    pub options: Vec<CommandOption>,
    /// Catalog version, bumped by the remote on every update.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<Snowflake>,
}

impl Command {
    /// Scope inferred from `guild_id`.
    pub fn scope(&self) -> CommandScope {
        self.guild_id
            .clone()
            .map_or(CommandScope::Global, CommandScope::Guild)
    }

    /// Submission body for this command.
    pub fn definition(&self) -> CommandDefinition {
        CommandDefinition {
            name: self.name.clone(),
            description: self.description.clone(),
            options: self.options.clone(),
        }
    }
}

/// Request body used to create, update, or bulk-overwrite commands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandDefinition {
    /// Command name.
    pub name: String,
    /// Command description.
    pub description: String,
    /// Ordered option schema.
    #[serde(default)]
    pub options: Vec<CommandOption>,
}

impl CommandDefinition {
    /// Definition without options.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            options: Vec::new(),
        }
    }

    /// Append an option.
    #[must_use]
    pub fn option(mut self, option: CommandOption) -> Self {
        self.options.push(option);
        self
    }
}
