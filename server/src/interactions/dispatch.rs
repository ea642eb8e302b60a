//! Interaction Dispatcher
//!
//! Drives one webhook request from receipt to response:
//!
//! - `Received` → `Rejected` when the signature does not verify
//! - `Verified` → `Responded` with `Pong` for pings
//! - `Verified` → `Routed` → `Responded` when a handler completes its sink
//! - `Verified` → `Unroutable` when no handler matches
//!
//! Handlers run on their own task. The request waits only for the sink; any
//! follow-up work the handler does afterwards outlives the request.

use std::sync::Arc;

use ix_common::{
    Interaction, InteractionHead, InteractionType, MessageBody, ResponseEnvelope, Snowflake,
};
use ix_crypto::SignatureVerifier;
use tracing::{error, info, warn};

use super::error::DispatchError;
use super::followup::Followup;
use super::sink::ResponseSink;
use crate::commands::{CommandRegistry, Invocation, Resolved, RouteError};
use crate::rest::RestClient;

/// Header carrying the hex-encoded request signature.
pub const SIGNATURE_HEADER: &str = "x-signature-ed25519";

/// Header carrying the signed timestamp.
pub const TIMESTAMP_HEADER: &str = "x-signature-timestamp";

/// Ephemeral reply sent when no handler matches an interaction.
pub const UNROUTABLE_NOTICE: &str = "This command is not available right now.";

/// Verifies, routes, and answers interactions.
///
/// Cheap to clone; clones share the registry and REST client.
#[derive(Clone)]
pub struct Dispatcher {
    inner: Arc<Inner>,
}

struct Inner {
    verifier: SignatureVerifier,
    registry: CommandRegistry,
    rest: RestClient,
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("public_key", &self.inner.verifier.public_key_hex())
            .field("registry", &self.inner.registry)
            .finish_non_exhaustive()
    }
}

impl Dispatcher {
    pub fn new(verifier: SignatureVerifier, registry: CommandRegistry, rest: RestClient) -> Self {
        Self {
            inner: Arc::new(Inner {
                verifier,
                registry,
                rest,
            }),
        }
    }

    pub fn registry(&self) -> &CommandRegistry {
        &self.inner.registry
    }

    /// Handle a raw webhook request.
    ///
    /// Nothing in `body` is parsed before the signature verifies.
    pub async fn dispatch(
        &self,
        body: &[u8],
        signature: Option<&str>,
        timestamp: Option<&str>,
    ) -> Result<ResponseEnvelope, DispatchError> {
        let verified = match (signature, timestamp) {
            (Some(signature), Some(timestamp)) => {
                self.inner.verifier.verify(body, signature, timestamp)
            }
            _ => false,
        };
        if !verified {
            warn!(
                status = "rejected",
                has_signature = signature.is_some(),
                has_timestamp = timestamp.is_some(),
                "Interaction signature rejected"
            );
            return Err(DispatchError::Unauthenticated);
        }

        // Pings are answered on the type tag alone.
        let head: InteractionHead = serde_json::from_slice(body)?;
        if head.kind == InteractionType::Ping {
            info!(
                interaction_id = head.id.as_ref().map(Snowflake::as_str),
                interaction_type = "ping",
                status = "responded",
                "Ping acknowledged"
            );
            return Ok(ResponseEnvelope::Pong);
        }

        let interaction: Interaction = serde_json::from_slice(body)?;
        self.dispatch_interaction(interaction).await
    }

    /// Handle an interaction that was authenticated elsewhere.
    pub async fn dispatch_interaction(
        &self,
        interaction: Interaction,
    ) -> Result<ResponseEnvelope, DispatchError> {
        let interaction_id = interaction.id.clone();
        let interaction_type = interaction.kind.as_str();

        let route = match interaction.kind {
            InteractionType::Ping => {
                info!(%interaction_id, interaction_type, status = "responded", "Ping acknowledged");
                return Ok(ResponseEnvelope::Pong);
            }
            InteractionType::ApplicationCommand => {
                let data = interaction
                    .command_data()
                    .ok_or(DispatchError::MissingData("command data"))?;
                self.inner.registry.resolve(data)
            }
            InteractionType::ComponentInvoke | InteractionType::ModalSubmit => {
                let data = interaction
                    .component_data()
                    .ok_or(DispatchError::MissingData("component data"))?;
                self.inner.registry.resolve_component(&data.custom_id)
            }
            kind @ (InteractionType::Autocomplete | InteractionType::Unknown(_)) => {
                warn!(%interaction_id, interaction_type, "Unsupported interaction type");
                return Err(DispatchError::Unsupported(kind));
            }
        };

        match route {
            Ok(resolved) => self.run(interaction, resolved).await,
            Err(RouteError::NotFound { path }) => {
                warn!(
                    %interaction_id,
                    interaction_type,
                    command_path = %path,
                    status = "unroutable",
                    "No handler for interaction"
                );
                Ok(ResponseEnvelope::ChannelMessage(
                    MessageBody::text(UNROUTABLE_NOTICE).ephemeral(),
                ))
            }
        }
    }

    async fn run(
        &self,
        interaction: Interaction,
        resolved: Resolved,
    ) -> Result<ResponseEnvelope, DispatchError> {
        let Resolved {
            handler,
            path,
            options,
        } = resolved;
        let interaction_id = interaction.id.clone();
        let interaction_type = interaction.kind.as_str();
        let command_path = path.join(" ");

        let followup = Followup::new(
            self.inner.rest.clone(),
            interaction.application_id.clone(),
            interaction.token.clone(),
        );
        let invocation = Invocation::new(Arc::new(interaction), path, options, followup);
        let (sink, rx) = ResponseSink::channel(interaction_id.clone());

        {
            let interaction_id = interaction_id.clone();
            let command_path = command_path.clone();
            tokio::spawn(async move {
                if let Err(e) = handler.invoke(invocation, sink).await {
                    error!(
                        %interaction_id,
                        command_path = %command_path,
                        error = %e,
                        "Command handler failed"
                    );
                }
            });
        }

        match rx.await {
            Ok(envelope) => {
                info!(
                    %interaction_id,
                    interaction_type,
                    command_path = %command_path,
                    response = envelope.as_str(),
                    status = "responded",
                    "Interaction answered"
                );
                Ok(envelope)
            }
            Err(_) => {
                error!(
                    %interaction_id,
                    interaction_type,
                    command_path = %command_path,
                    status = "abandoned",
                    "Handler dropped its response sink"
                );
                Err(DispatchError::NoResponse)
            }
        }
    }
}
