//! Local validation of command definitions and message bodies.
//!
//! Runs before any outbound call so malformed input never reaches the remote
//! API.

use std::collections::HashSet;

use ix_common::{ChoiceValue, CommandDefinition, CommandOption, CommandOptionType, MessageBody};
use thiserror::Error;

/// Maximum length of a command or option name.
pub const MAX_NAME_LEN: usize = 32;
/// Maximum length of a command, option, or choice description.
pub const MAX_DESCRIPTION_LEN: usize = 100;
/// Maximum options per level.
pub const MAX_OPTIONS: usize = 25;
/// Maximum choices per option.
pub const MAX_CHOICES: usize = 25;
/// Maximum message content length.
pub const MAX_CONTENT_LEN: usize = 2000;

/// A definition or body was rejected before sending.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Invalid {field}: {reason}")]
pub struct ValidationError {
    /// Dotted path to the offending field, e.g. `options[0].choices[2].value`.
    pub field: String,
    pub reason: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Option list context, decides which child kinds are allowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Level {
    Command,
    SubCommand,
    Group,
}

/// Validate a command or option name.
///
/// Names are 1-32 characters of lowercase letters, digits, hyphens, and
/// underscores.
pub fn validate_name(field: &str, name: &str) -> Result<(), ValidationError> {
    let len = name.chars().count();
    if len == 0 || len > MAX_NAME_LEN {
        return Err(ValidationError::new(
            field,
            format!("must be 1-{MAX_NAME_LEN} characters"),
        ));
    }
    if !name
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_')
    {
        return Err(ValidationError::new(
            field,
            "must contain only lowercase letters, digits, hyphens, and underscores",
        ));
    }
    Ok(())
}

/// Validate a description (1-100 characters).
pub fn validate_description(field: &str, description: &str) -> Result<(), ValidationError> {
    let len = description.chars().count();
    if len == 0 || len > MAX_DESCRIPTION_LEN {
        return Err(ValidationError::new(
            field,
            format!("must be 1-{MAX_DESCRIPTION_LEN} characters"),
        ));
    }
    Ok(())
}

/// Validate a full command definition, recursing into its option tree.
pub fn validate_definition(definition: &CommandDefinition) -> Result<(), ValidationError> {
    validate_name("name", &definition.name)?;
    validate_description("description", &definition.description)?;
    validate_options("options", &definition.options, Level::Command)
}

/// Validate a batch of definitions sharing one scope.
///
/// Field paths are prefixed with the definition index (`[1].options[0].name`).
pub fn validate_batch(definitions: &[CommandDefinition]) -> Result<(), ValidationError> {
    let mut seen = HashSet::new();
    for (i, definition) in definitions.iter().enumerate() {
        validate_definition(definition).map_err(|e| ValidationError {
            field: format!("[{i}].{}", e.field),
            reason: e.reason,
        })?;
        if !seen.insert(definition.name.as_str()) {
            return Err(ValidationError::new(
                format!("[{i}].name"),
                format!("duplicate command name '{}'", definition.name),
            ));
        }
    }
    Ok(())
}

fn validate_options(
    field: &str,
    options: &[CommandOption],
    level: Level,
) -> Result<(), ValidationError> {
    if options.len() > MAX_OPTIONS {
        return Err(ValidationError::new(
            field,
            format!("at most {MAX_OPTIONS} options allowed"),
        ));
    }

    let mut seen = HashSet::new();
    for (i, option) in options.iter().enumerate() {
        let prefix = format!("{field}[{i}]");
        validate_option(&prefix, option, level)?;
        if !seen.insert(option.name.as_str()) {
            return Err(ValidationError::new(
                format!("{prefix}.name"),
                format!("duplicate option name '{}'", option.name),
            ));
        }
    }

    // a level routes either into one subcommand or to its own handler
    let nested = options.iter().filter(|o| o.kind.is_subcommand()).count();
    if nested > 0 && nested < options.len() {
        return Err(ValidationError::new(
            field,
            "subcommands and groups cannot be mixed with value options",
        ));
    }
    Ok(())
}

fn validate_option(prefix: &str, option: &CommandOption, level: Level) -> Result<(), ValidationError> {
    let kind = option.kind;
    if !kind.is_known() {
        return Err(ValidationError::new(
            format!("{prefix}.type"),
            format!("unsupported option type {}", u8::from(kind)),
        ));
    }
    match level {
        Level::SubCommand if !kind.is_leaf() => {
            return Err(ValidationError::new(
                format!("{prefix}.type"),
                "subcommands may only contain value options",
            ));
        }
        Level::Group if !kind.is_subcommand() => {
            return Err(ValidationError::new(
                format!("{prefix}.type"),
                "groups may only contain subcommands or groups",
            ));
        }
        _ => {}
    }
    if kind.is_subcommand() && option.required {
        return Err(ValidationError::new(
            format!("{prefix}.required"),
            "subcommands and groups cannot be required",
        ));
    }

    validate_name(&format!("{prefix}.name"), &option.name)?;
    validate_description(&format!("{prefix}.description"), &option.description)?;

    let children = format!("{prefix}.options");
    match kind {
        CommandOptionType::SubCommand => validate_options(&children, &option.options, Level::SubCommand)?,
        CommandOptionType::SubCommandGroup => validate_options(&children, &option.options, Level::Group)?,
        _ if !option.options.is_empty() => {
            return Err(ValidationError::new(children, "value options cannot have children"));
        }
        _ => {}
    }

    validate_choices(prefix, option)
}

fn validate_choices(prefix: &str, option: &CommandOption) -> Result<(), ValidationError> {
    if option.choices.is_empty() {
        return Ok(());
    }
    let field = format!("{prefix}.choices");
    if !matches!(
        option.kind,
        CommandOptionType::String | CommandOptionType::Integer
    ) {
        return Err(ValidationError::new(
            field,
            "choices are only allowed on string and integer options",
        ));
    }
    if option.choices.len() > MAX_CHOICES {
        return Err(ValidationError::new(
            field,
            format!("at most {MAX_CHOICES} choices allowed"),
        ));
    }

    for (j, choice) in option.choices.iter().enumerate() {
        validate_description(&format!("{field}[{j}].name"), &choice.name)?;
        let matches_kind = matches!(
            (&choice.value, option.kind),
            (ChoiceValue::String(_), CommandOptionType::String)
                | (ChoiceValue::Integer(_), CommandOptionType::Integer)
        );
        if !matches_kind {
            return Err(ValidationError::new(
                format!("{field}[{j}].value"),
                "must be a string or integer matching the option type",
            ));
        }
    }
    Ok(())
}

/// Validate an outbound message body.
pub fn validate_message(body: &MessageBody) -> Result<(), ValidationError> {
    if body.is_empty() {
        return Err(ValidationError::new(
            "content",
            "one of content, embeds, or components is required",
        ));
    }
    if let Some(content) = &body.content {
        if content.chars().count() > MAX_CONTENT_LEN {
            return Err(ValidationError::new(
                "content",
                format!("must be at most {MAX_CONTENT_LEN} characters"),
            ));
        }
    }
    Ok(())
}
