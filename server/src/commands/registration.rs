//! Command Catalog Management
//!
//! Create, read, update, and delete the application's commands in the remote
//! catalog. Every write validates its definition locally first; a rejected
//! definition never reaches the network.

use ix_common::{Command, CommandDefinition, CommandOption, CommandScope, Snowflake};
use reqwest::Method;
use thiserror::Error;
use tracing::{info, instrument};

use super::validation::{validate_batch, validate_definition, ValidationError};
use crate::rest::{routes, RestClient, RestError};

/// Errors from catalog operations.
#[derive(Debug, Error)]
pub enum RegistrationError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Rest(#[from] RestError),
}

/// Catalog client for a single application.
#[derive(Debug, Clone)]
pub struct RegistrationService {
    rest: RestClient,
    application_id: Snowflake,
}

impl RegistrationService {
    pub fn new(rest: RestClient, application_id: impl Into<Snowflake>) -> Self {
        Self {
            rest,
            application_id: application_id.into(),
        }
    }

    pub const fn application_id(&self) -> &Snowflake {
        &self.application_id
    }

    fn commands_path(&self, guild_id: Option<&Snowflake>) -> String {
        routes::commands(self.application_id.as_str(), guild_id.map(Snowflake::as_str))
    }

    fn command_path(&self, guild_id: Option<&Snowflake>, command_id: &Snowflake) -> String {
        routes::command(
            self.application_id.as_str(),
            guild_id.map(Snowflake::as_str),
            command_id.as_str(),
        )
    }

    /// List global commands, or a guild's commands.
    #[instrument(skip(self), fields(application_id = %self.application_id))]
    pub async fn list_commands(
        &self,
        guild_id: Option<&Snowflake>,
    ) -> Result<Vec<Command>, RegistrationError> {
        let path = self.commands_path(guild_id);
        Ok(self.rest.call_json::<_, ()>(Method::GET, &path, None).await?)
    }

    /// Fetch a single command.
    #[instrument(skip(self), fields(application_id = %self.application_id))]
    pub async fn get_command(
        &self,
        command_id: &Snowflake,
        guild_id: Option<&Snowflake>,
    ) -> Result<Command, RegistrationError> {
        let path = self.command_path(guild_id, command_id);
        Ok(self.rest.call_json::<_, ()>(Method::GET, &path, None).await?)
    }

    /// Create a command in `scope`.
    ///
    /// Creating a command whose name already exists in the scope replaces it
    /// remotely.
    #[instrument(skip(self, description, options), fields(application_id = %self.application_id))]
    pub async fn create_command(
        &self,
        scope: &CommandScope,
        name: &str,
        description: &str,
        options: Vec<CommandOption>,
    ) -> Result<Command, RegistrationError> {
        let definition = CommandDefinition {
            name: name.to_owned(),
            description: description.to_owned(),
            options,
        };
        validate_definition(&definition)?;

        let path = self.commands_path(scope.guild_id());
        let command: Command = self
            .rest
            .call_json(Method::POST, &path, Some(&definition))
            .await?;
        info!(command_id = %command.id, name = %command.name, "Command created");
        Ok(command)
    }

    /// Re-submit a command's full definition.
    ///
    /// Scope comes from the command's own `guild_id`.
    #[instrument(skip(self, command), fields(command_id = %command.id, name = %command.name))]
    pub async fn update_command(&self, command: &Command) -> Result<Command, RegistrationError> {
        let definition = command.definition();
        validate_definition(&definition)?;

        let path = self.command_path(command.guild_id.as_ref(), &command.id);
        let updated: Command = self
            .rest
            .call_json(Method::PATCH, &path, Some(&definition))
            .await?;
        info!("Command updated");
        Ok(updated)
    }

    /// Remove a command from the catalog.
    #[instrument(skip(self, command), fields(command_id = %command.id, name = %command.name))]
    pub async fn delete_command(&self, command: &Command) -> Result<(), RegistrationError> {
        let path = self.command_path(command.guild_id.as_ref(), &command.id);
        self.rest.call_empty::<()>(Method::DELETE, &path, None).await?;
        info!("Command deleted");
        Ok(())
    }

    /// Replace every command in `scope` with `definitions`.
    ///
    /// Commands missing from `definitions` are deleted remotely.
    #[instrument(skip(self, definitions), fields(count = definitions.len()))]
    pub async fn overwrite_commands(
        &self,
        scope: &CommandScope,
        definitions: &[CommandDefinition],
    ) -> Result<Vec<Command>, RegistrationError> {
        validate_batch(definitions)?;

        let path = self.commands_path(scope.guild_id());
        let commands: Vec<Command> = self
            .rest
            .call_json(Method::PUT, &path, Some(definitions))
            .await?;
        info!(count = commands.len(), "Command catalog overwritten");
        Ok(commands)
    }
}
