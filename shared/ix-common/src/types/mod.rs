//! Wire Types

pub mod command;
pub mod id;
pub mod interaction;
pub mod message;
pub mod response;

pub use command::*;
pub use id::Snowflake;
pub use interaction::*;
pub use message::*;
pub use response::*;
