//! Interaction Request Signatures
//!
//! Ed25519 verification of inbound webhook requests.
//!
//! - **Verifier**: checks `timestamp || body` against the application public key
//! - **Keypair**: signs requests the same way the remote service does (tests, tooling)

pub mod error;
pub mod signature;

pub use error::{KeyError, Result};
pub use signature::{verify, Keypair, SignatureVerifier};
