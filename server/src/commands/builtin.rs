//! Builtin Commands
//!
//! `/ping` answers immediately. `/echo text:` defers, then edits the reserved
//! reply through the follow-up handle.

use ix_common::{CommandDefinition, CommandOption, CommandOptionType, MessageBody};

use super::handler::Invocation;
use super::registry::{CommandRegistry, RegistryBuilder, RegistryError};
use super::validation::MAX_CONTENT_LEN;
use crate::interactions::ResponseSink;

/// Definitions submitted to the remote catalog.
pub fn definitions() -> Vec<CommandDefinition> {
    vec![
        CommandDefinition::new("ping", "Check that the bot is alive"),
        CommandDefinition::new("echo", "Repeat text back").option(CommandOption::leaf(
            CommandOptionType::String,
            "text",
            "Text to repeat",
            true,
        )),
    ]
}

/// Register the builtin handlers.
pub fn register(builder: &mut RegistryBuilder) -> Result<(), RegistryError> {
    builder.register(&["ping"], ping)?.register(&["echo"], echo)?;
    Ok(())
}

/// Registry holding only the builtin handlers.
pub fn registry() -> Result<CommandRegistry, RegistryError> {
    let mut builder = RegistryBuilder::new();
    register(&mut builder)?;
    Ok(builder.build())
}

async fn ping(_invocation: Invocation, sink: ResponseSink) -> anyhow::Result<()> {
    sink.reply(MessageBody::text("Pong!"))?;
    Ok(())
}

async fn echo(invocation: Invocation, sink: ResponseSink) -> anyhow::Result<()> {
    sink.acknowledge(false)?;
    let body = echo_body(invocation.option_str("text"));
    invocation.followup().edit_original(&body).await?;
    Ok(())
}

/// Reply for `/echo`, cut to the content limit so the deferred edit is valid.
fn echo_body(text: Option<&str>) -> MessageBody {
    match text.filter(|t| !t.trim().is_empty()) {
        Some(text) => MessageBody::text(text.chars().take(MAX_CONTENT_LEN).collect::<String>()),
        None => MessageBody::text("(nothing)"),
    }
}
