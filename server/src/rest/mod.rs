//! Rate-Aware REST Client
//!
//! Outbound calls to the remote command and interaction API. `429` responses
//! are absorbed by sleeping for the advertised duration and retransmitting.

pub mod client;
pub mod error;
pub mod ratelimit;
pub mod routes;

pub use client::RestClient;
pub use error::RestError;
pub use ratelimit::{RateLimitInfo, RetryPolicy};
