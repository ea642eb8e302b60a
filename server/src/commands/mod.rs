//! Application Commands
//!
//! Local routing of invoked commands to handlers, and management of the
//! remote command catalog.

pub mod builtin;
pub mod handler;
pub mod registration;
pub mod registry;
pub mod validation;

pub use handler::{CommandHandler, HandlerFuture, Invocation};
pub use registration::{RegistrationError, RegistrationService};
pub use registry::{CommandRegistry, RegistryBuilder, RegistryError, Resolved, RouteError};
pub use validation::ValidationError;
