//! Command Registry
//!
//! Maps command paths (`["admin", "ban"]`) and component ids to handlers.
//! Built once with [`RegistryBuilder`] and frozen; lookups never lock.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use ix_common::{CommandData, CommandDataOption};
use thiserror::Error;

use super::handler::CommandHandler;

/// Separator between a component id prefix and its per-message payload.
pub const CUSTOM_ID_SEPARATOR: char = ':';

type NodeId = usize;

/// Errors raised while populating a registry.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Command path must not be empty")]
    EmptyPath,

    #[error("Command path segment must not be empty: {0}")]
    EmptySegment(String),

    #[error("A handler is already registered for '{0}'")]
    DuplicateRegistration(String),

    #[error("Component id must not be empty")]
    EmptyComponentId,
}

/// Errors raised while resolving an invocation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RouteError {
    #[error("No handler registered for '{path}'")]
    NotFound { path: String },
}

impl RouteError {
    fn not_found(path: &[String]) -> Self {
        Self::NotFound {
            path: path.join(" "),
        }
    }
}

struct Node {
    handler: Option<Arc<dyn CommandHandler>>,
    children: HashMap<String, NodeId>,
}

impl Node {
    fn empty() -> Self {
        Self {
            handler: None,
            children: HashMap::new(),
        }
    }
}

/// A handler matched to an invocation.
#[derive(Clone)]
pub struct Resolved {
    pub handler: Arc<dyn CommandHandler>,
    /// Names from the root command down to the matched node.
    pub path: Vec<String>,
    /// Option list at the matched level.
    pub options: Vec<CommandDataOption>,
}

impl fmt::Debug for Resolved {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resolved")
            .field("path", &self.path)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

/// Mutable registry used during startup.
#[derive(Default)]
pub struct RegistryBuilder {
    nodes: Vec<Node>,
    roots: HashMap<String, NodeId>,
    components: HashMap<String, Arc<dyn CommandHandler>>,
}

impl fmt::Debug for RegistryBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistryBuilder")
            .field("roots", &self.roots.keys().collect::<Vec<_>>())
            .field("components", &self.components.keys().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` for the command at `path`.
    ///
    /// Intermediate nodes are created as needed. Registering the same path twice
    /// fails and leaves the first handler in place.
    pub fn register<H: CommandHandler>(
        &mut self,
        path: &[&str],
        handler: H,
    ) -> Result<&mut Self, RegistryError> {
        let (root, rest) = path.split_first().ok_or(RegistryError::EmptyPath)?;
        if let Some(segment) = path.iter().find(|s| s.trim().is_empty()) {
            return Err(RegistryError::EmptySegment(format!("{path:?} at {segment:?}")));
        }

        let mut current = match self.roots.get(*root).copied() {
            Some(id) => id,
            None => {
                let id = self.push();
                self.roots.insert((*root).to_owned(), id);
                id
            }
        };
        for segment in rest {
            let existing = self.nodes[current].children.get(*segment).copied();
            current = match existing {
                Some(id) => id,
                None => {
                    let id = self.push();
                    self.nodes[current]
                        .children
                        .insert((*segment).to_owned(), id);
                    id
                }
            };
        }

        let node = &mut self.nodes[current];
        if node.handler.is_some() {
            return Err(RegistryError::DuplicateRegistration(path.join(" ")));
        }
        node.handler = Some(Arc::new(handler));
        Ok(self)
    }

    /// Register `handler` for component or modal interactions.
    ///
    /// Matches a `custom_id` exactly, or by the part before the first `:`.
    pub fn register_component<H: CommandHandler>(
        &mut self,
        custom_id: &str,
        handler: H,
    ) -> Result<&mut Self, RegistryError> {
        if custom_id.is_empty() {
            return Err(RegistryError::EmptyComponentId);
        }
        if self.components.contains_key(custom_id) {
            return Err(RegistryError::DuplicateRegistration(custom_id.to_owned()));
        }
        self.components
            .insert(custom_id.to_owned(), Arc::new(handler));
        Ok(self)
    }

    /// Freeze the registry.
    pub fn build(self) -> CommandRegistry {
        CommandRegistry {
            nodes: self.nodes,
            roots: self.roots,
            components: self.components,
        }
    }

    fn push(&mut self) -> NodeId {
        self.nodes.push(Node::empty());
        self.nodes.len() - 1
    }
}

/// Immutable routing table shared by all in-flight requests.
pub struct CommandRegistry {
    nodes: Vec<Node>,
    roots: HashMap<String, NodeId>,
    components: HashMap<String, Arc<dyn CommandHandler>>,
}

impl fmt::Debug for CommandRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandRegistry")
            .field("commands", &self.command_count())
            .field("components", &self.components.len())
            .finish()
    }
}

impl CommandRegistry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    /// Number of command paths with a handler.
    pub fn command_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.handler.is_some()).count()
    }

    /// Number of registered component ids.
    pub fn component_count(&self) -> usize {
        self.components.len()
    }

    /// Resolve an invoked command to its handler.
    ///
    /// Starting at the root named by `data.name`, descends into the first
    /// subcommand or group element of each option list until a level holds
    /// only leaf values. The handler registered at that node receives that
    /// level's options.
    pub fn resolve(&self, data: &CommandData) -> Result<Resolved, RouteError> {
        let mut path = vec![data.name.clone()];
        let mut node = self
            .roots
            .get(&data.name)
            .copied()
            .ok_or_else(|| RouteError::not_found(&path))?;
        let mut options = &data.options;

        while let Some(next) = options.iter().find(|o| o.is_subcommand()) {
            path.push(next.name.clone());
            node = self.nodes[node]
                .children
                .get(&next.name)
                .copied()
                .ok_or_else(|| RouteError::not_found(&path))?;
            options = &next.options;
        }

        let handler = self.nodes[node]
            .handler
            .clone()
            .ok_or_else(|| RouteError::not_found(&path))?;
        Ok(Resolved {
            handler,
            path,
            options: options.clone(),
        })
    }

    /// Resolve a component or modal `custom_id` to its handler.
    pub fn resolve_component(&self, custom_id: &str) -> Result<Resolved, RouteError> {
        let prefix = custom_id
            .split_once(CUSTOM_ID_SEPARATOR)
            .map(|(prefix, _)| prefix);
        let handler = self
            .components
            .get(custom_id)
            .or_else(|| prefix.and_then(|p| self.components.get(p)))
            .cloned()
            .ok_or_else(|| RouteError::NotFound {
                path: custom_id.to_owned(),
            })?;
        Ok(Resolved {
            handler,
            path: vec![custom_id.to_owned()],
            options: Vec::new(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::Invocation;
    use crate::interactions::ResponseSink;
    use ix_common::{CommandOptionType, OptionValue};

    async fn noop(_invocation: Invocation, sink: ResponseSink) -> anyhow::Result<()> {
        sink.acknowledge(false)?;
        Ok(())
    }

    fn registry() -> CommandRegistry {
        let mut builder = RegistryBuilder::new();
        builder
            .register(&["ping"], noop)
            .unwrap()
            .register(&["group", "sub"], noop)
            .unwrap()
            .register(&["admin", "users", "ban"], noop)
            .unwrap()
            .register_component("confirm", noop)
            .unwrap();
        builder.build()
    }

    #[test]
    fn resolves_top_level_command() {
        let data = CommandData::new(
            "ping",
            vec![CommandDataOption::value("loud", OptionValue::Boolean(true))],
        );
        let resolved = registry().resolve(&data).unwrap();
        assert_eq!(resolved.path, ["ping"]);
        assert_eq!(resolved.options, data.options);
    }

    #[test]
    fn descends_into_subcommand() {
        let arg = CommandDataOption::value("arg", OptionValue::String("x".into()));
        let data = CommandData::new(
            "group",
            vec![CommandDataOption::nested(
                "sub",
                CommandOptionType::SubCommand,
                vec![arg.clone()],
            )],
        );
        let resolved = registry().resolve(&data).unwrap();
        assert_eq!(resolved.path, ["group", "sub"]);
        assert_eq!(resolved.options, vec![arg]);
    }

    #[test]
    fn descends_through_groups() {
        let user = CommandDataOption::value("user", OptionValue::String("42".into()));
        let data = CommandData::new(
            "admin",
            vec![CommandDataOption::nested(
                "users",
                CommandOptionType::SubCommandGroup,
                vec![CommandDataOption::nested(
                    "ban",
                    CommandOptionType::SubCommand,
                    vec![user.clone()],
                )],
            )],
        );
        let resolved = registry().resolve(&data).unwrap();
        assert_eq!(resolved.path, ["admin", "users", "ban"]);
        assert_eq!(resolved.options, vec![user]);
    }

    #[test]
    fn unknown_paths_are_not_found() {
        let registry = registry();

        let err = registry.resolve(&CommandData::new("missing", vec![])).unwrap_err();
        assert_eq!(err, RouteError::NotFound { path: "missing".into() });

        let data = CommandData::new(
            "group",
            vec![CommandDataOption::nested(
                "other",
                CommandOptionType::SubCommand,
                vec![],
            )],
        );
        let err = registry.resolve(&data).unwrap_err();
        assert_eq!(err, RouteError::NotFound { path: "group other".into() });
    }

    #[test]
    fn intermediate_node_without_handler_is_not_found() {
        let err = registry()
            .resolve(&CommandData::new("group", vec![]))
            .unwrap_err();
        assert!(matches!(err, RouteError::NotFound { .. }));
    }

    #[test]
    fn duplicate_registration_keeps_first() {
        let mut builder = RegistryBuilder::new();
        builder.register(&["a", "b"], noop).unwrap();
        let err = builder.register(&["a", "b"], noop).unwrap_err();
        assert_eq!(err, RegistryError::DuplicateRegistration("a b".into()));

        builder.register(&["top"], noop).unwrap();
        assert_eq!(
            builder.register(&["top"], noop).unwrap_err(),
            RegistryError::DuplicateRegistration("top".into())
        );

        let registry = builder.build();
        assert_eq!(registry.command_count(), 2);
        assert!(registry.resolve(&CommandData::new("top", vec![])).is_ok());
        let data = CommandData::new(
            "a",
            vec![CommandDataOption::nested("b", CommandOptionType::SubCommand, vec![])],
        );
        assert!(registry.resolve(&data).is_ok());
    }

    #[test]
    fn rejects_empty_paths() {
        let mut builder = RegistryBuilder::new();
        assert_eq!(builder.register(&[], noop).unwrap_err(), RegistryError::EmptyPath);
        assert!(matches!(
            builder.register(&["a", ""], noop),
            Err(RegistryError::EmptySegment(_))
        ));
        assert_eq!(
            builder.register_component("", noop).unwrap_err(),
            RegistryError::EmptyComponentId
        );
    }

    #[test]
    fn components_match_exact_then_prefix() {
        let registry = registry();
        assert_eq!(registry.component_count(), 1);
        assert_eq!(registry.resolve_component("confirm").unwrap().path, ["confirm"]);
        assert_eq!(
            registry.resolve_component("confirm:123").unwrap().path,
            ["confirm:123"]
        );
        assert!(registry.resolve_component("cancel:123").is_err());
    }
}
