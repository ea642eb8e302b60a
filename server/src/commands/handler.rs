//! Command Handlers
//!
//! Handlers are the business-logic collaborators the dispatcher routes to.
//! Each receives the interaction, its resolved options, and a single-use
//! [`ResponseSink`].

use std::future::Future;
use std::sync::Arc;

use futures::future::BoxFuture;
use ix_common::{CommandDataOption, Interaction, OptionValue};

use crate::interactions::{Followup, ResponseSink};

/// Future returned by [`CommandHandler::invoke`].
pub type HandlerFuture<'a> = BoxFuture<'a, anyhow::Result<()>>;

/// A routable command or component handler.
///
/// The handler must complete `sink` exactly once; ownership of the sink makes a
/// second completion impossible. Work may continue after the sink is completed,
/// typically follow-up messages through [`Invocation::followup`].
pub trait CommandHandler: Send + Sync + 'static {
    /// Handle one invocation.
    fn invoke<'a>(&'a self, invocation: Invocation, sink: ResponseSink) -> HandlerFuture<'a>;
}

impl<F, Fut> CommandHandler for F
where
    F: Fn(Invocation, ResponseSink) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
{
    fn invoke<'a>(&'a self, invocation: Invocation, sink: ResponseSink) -> HandlerFuture<'a> {
        Box::pin(self(invocation, sink))
    }
}

/// Everything a handler gets about the interaction it is answering.
#[derive(Debug, Clone)]
pub struct Invocation {
    /// The full inbound interaction.
    pub interaction: Arc<Interaction>,
    /// Matched route: command names from root to leaf, or the component id.
    pub path: Vec<String>,
    /// Leaf-level options of the matched command.
    pub options: Vec<CommandDataOption>,
    followup: Followup,
}

impl Invocation {
    pub(crate) const fn new(
        interaction: Arc<Interaction>,
        path: Vec<String>,
        options: Vec<CommandDataOption>,
        followup: Followup,
    ) -> Self {
        Self {
            interaction,
            path,
            options,
            followup,
        }
    }

    /// Value of the leaf option named `name`.
    pub fn option(&self, name: &str) -> Option<&OptionValue> {
        self.options
            .iter()
            .find(|o| o.name == name)
            .and_then(|o| o.value.as_ref())
    }

    /// Text value of the leaf option named `name`.
    pub fn option_str(&self, name: &str) -> Option<&str> {
        self.option(name).and_then(OptionValue::as_str)
    }

    /// Handle for messages sent after the synchronous response.
    pub const fn followup(&self) -> &Followup {
        &self.followup
    }
}
