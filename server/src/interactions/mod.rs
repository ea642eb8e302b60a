//! Interaction Webhook
//!
//! Verification, routing, and synchronous responses for inbound interactions,
//! plus the follow-up handle used after the response is sent.

pub mod dispatch;
pub mod error;
pub mod followup;
pub mod handlers;
pub mod sink;

pub use dispatch::{Dispatcher, SIGNATURE_HEADER, TIMESTAMP_HEADER, UNROUTABLE_NOTICE};
pub use error::DispatchError;
pub use followup::{Followup, FollowupError};
pub use sink::{ResponseSink, SinkError};
