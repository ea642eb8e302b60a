//! Interactions Common Library
//!
//! Wire types shared by the webhook dispatcher, the REST client, and any
//! collaborator that hands over pre-parsed interactions (gateway clients).

pub mod types;

pub use types::*;
