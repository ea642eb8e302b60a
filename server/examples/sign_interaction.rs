//! Sign an interaction body for manual testing against a local server.
//!
//! ```text
//! cargo run --example sign_interaction -- '{"type":1}'
//! ```
//!
//! Prints the public key to configure as `DISCORD_PUBLIC_KEY` and a ready
//! `curl` command. Set `SIGNING_SEED` (64 hex chars) to keep the key stable
//! across runs.

use anyhow::{bail, Context, Result};
use ix_crypto::Keypair;

fn keypair() -> Result<Keypair> {
    let Ok(seed_hex) = std::env::var("SIGNING_SEED") else {
        return Ok(Keypair::generate());
    };
    let bytes = hex::decode(seed_hex.trim()).context("SIGNING_SEED is not hex")?;
    let Ok(seed) = <[u8; 32]>::try_from(bytes.as_slice()) else {
        bail!("SIGNING_SEED must be 32 bytes, got {}", bytes.len());
    };
    Ok(Keypair::from_seed(seed))
}

fn main() -> Result<()> {
    let Some(body) = std::env::args().nth(1) else {
        bail!("Usage: sign_interaction <json-body>");
    };
    let keypair = keypair()?;
    let timestamp = chrono::Utc::now().timestamp().to_string();
    let signature = keypair.sign(&timestamp, body.as_bytes());

    println!("DISCORD_PUBLIC_KEY={}", keypair.public_key_hex());
    println!(
        "curl -X POST http://localhost:8080/interactions \\\n  -H 'Content-Type: application/json' \\\n  -H 'X-Signature-Ed25519: {signature}' \\\n  -H 'X-Signature-Timestamp: {timestamp}' \\\n  -d '{body}'"
    );
    Ok(())
}
