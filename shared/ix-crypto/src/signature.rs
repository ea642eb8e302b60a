//! Ed25519 Request Signing
//!
//! The remote service signs every webhook delivery over the concatenation of
//! the `X-Signature-Timestamp` header and the raw request body, and sends the
//! hex-encoded signature in `X-Signature-Ed25519`.

use ed25519_dalek::{Signature, Signer, SigningKey, VerifyingKey};
use rand::rngs::OsRng;

use crate::error::{KeyError, Result};

/// Length of a hex-encoded Ed25519 signature.
const SIGNATURE_HEX_LEN: usize = 128;

/// Verifies inbound requests against one application public key.
///
/// Parse the key once at startup; [`SignatureVerifier::verify`] is then a pure
/// function that never fails loudly.
#[derive(Clone, Debug)]
pub struct SignatureVerifier {
    key: VerifyingKey,
}

impl SignatureVerifier {
    /// Load a verifier from a hex-encoded 32-byte public key.
    pub fn from_hex(public_key_hex: &str) -> Result<Self> {
        let bytes = hex::decode(public_key_hex.trim())?;
        let bytes: [u8; 32] = bytes
            .as_slice()
            .try_into()
            .map_err(|_| KeyError::InvalidLength(bytes.len()))?;
        let key = VerifyingKey::from_bytes(&bytes)?;
        Ok(Self { key })
    }

    /// Hex encoding of the loaded public key.
    pub fn public_key_hex(&self) -> String {
        hex::encode(self.key.as_bytes())
    }

    /// Check `signature_hex` over `timestamp || body`.
    ///
    /// Malformed or empty inputs yield `false`.
    pub fn verify(&self, body: &[u8], signature_hex: &str, timestamp: &str) -> bool {
        if timestamp.is_empty() || signature_hex.len() != SIGNATURE_HEX_LEN {
            return false;
        }
        let mut sig_bytes = [0u8; 64];
        if hex::decode_to_slice(signature_hex, &mut sig_bytes).is_err() {
            return false;
        }
        let signature = Signature::from_bytes(&sig_bytes);

        let mut message = Vec::with_capacity(timestamp.len() + body.len());
        message.extend_from_slice(timestamp.as_bytes());
        message.extend_from_slice(body);

        self.key.verify_strict(&message, &signature).is_ok()
    }
}

/// One-shot verification with a hex public key.
///
/// Returns `false` for a malformed key as well as for a bad signature.
pub fn verify(body: &[u8], signature_hex: &str, timestamp: &str, public_key_hex: &str) -> bool {
    SignatureVerifier::from_hex(public_key_hex)
        .map(|verifier| verifier.verify(body, signature_hex, timestamp))
        .unwrap_or(false)
}

/// Ed25519 key pair that signs requests in the remote service's format.
#[derive(Clone)]
pub struct Keypair {
    signing_key: SigningKey,
}

impl std::fmt::Debug for Keypair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Keypair")
            .field("public_key", &self.public_key_hex())
            .field("signing_key", &"[redacted]")
            .finish()
    }
}

impl Keypair {
    /// Generate a fresh random key pair.
    pub fn generate() -> Self {
        Self {
            signing_key: SigningKey::generate(&mut OsRng),
        }
    }

    /// Deterministic key pair from a 32-byte seed.
    pub fn from_seed(seed: [u8; 32]) -> Self {
        Self {
            signing_key: SigningKey::from_bytes(&seed),
        }
    }

    /// Hex-encoded public key, as configured on the receiving side.
    pub fn public_key_hex(&self) -> String {
        hex::encode(self.signing_key.verifying_key().as_bytes())
    }

    /// Verifier for this key pair's public half.
    pub fn verifier(&self) -> SignatureVerifier {
        SignatureVerifier {
            key: self.signing_key.verifying_key(),
        }
    }

    /// Sign `timestamp || body` and return the hex signature.
    pub fn sign(&self, timestamp: &str, body: &[u8]) -> String {
        let mut message = Vec::with_capacity(timestamp.len() + body.len());
        message.extend_from_slice(timestamp.as_bytes());
        message.extend_from_slice(body);
        hex::encode(self.signing_key.sign(&message).to_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TIMESTAMP: &str = "1700000000";
    const BODY: &[u8] = br#"{"type":1,"id":"1","application_id":"2","token":"t","version":1}"#;

    fn keypair() -> Keypair {
        Keypair::from_seed([7u8; 32])
    }

    #[test]
    fn sign_and_verify() {
        let kp = keypair();
        let sig = kp.sign(TIMESTAMP, BODY);
        assert_eq!(sig.len(), SIGNATURE_HEX_LEN);
        assert!(verify(BODY, &sig, TIMESTAMP, &kp.public_key_hex()));
        assert!(kp.verifier().verify(BODY, &sig, TIMESTAMP));
    }

    #[test]
    fn any_flipped_body_byte_fails() {
        let kp = keypair();
        let sig = kp.sign(TIMESTAMP, BODY);
        let verifier = kp.verifier();
        for i in 0..BODY.len() {
            let mut tampered = BODY.to_vec();
            tampered[i] ^= 0x01;
            assert!(!verifier.verify(&tampered, &sig, TIMESTAMP), "byte {i}");
        }
    }

    #[test]
    fn flipped_timestamp_fails() {
        let kp = keypair();
        let sig = kp.sign(TIMESTAMP, BODY);
        let verifier = kp.verifier();
        for i in 0..TIMESTAMP.len() {
            let mut tampered = TIMESTAMP.as_bytes().to_vec();
            tampered[i] ^= 0x01;
            let tampered = String::from_utf8(tampered).unwrap();
            assert!(!verifier.verify(BODY, &sig, &tampered));
        }
    }

    #[test]
    fn flipped_signature_byte_fails() {
        let kp = keypair();
        let sig = hex::decode(kp.sign(TIMESTAMP, BODY)).unwrap();
        let verifier = kp.verifier();
        for i in 0..sig.len() {
            let mut tampered = sig.clone();
            tampered[i] ^= 0x01;
            assert!(!verifier.verify(BODY, &hex::encode(&tampered), TIMESTAMP));
        }
    }

    #[test]
    fn wrong_key_fails() {
        let sig = keypair().sign(TIMESTAMP, BODY);
        let other = Keypair::from_seed([9u8; 32]);
        assert!(!verify(BODY, &sig, TIMESTAMP, &other.public_key_hex()));
    }

    #[test]
    fn malformed_inputs_are_false_not_errors() {
        let kp = keypair();
        let sig = kp.sign(TIMESTAMP, BODY);
        let pk = kp.public_key_hex();

        assert!(!verify(BODY, "", TIMESTAMP, &pk));
        assert!(!verify(BODY, &sig, "", &pk));
        assert!(!verify(BODY, &sig, TIMESTAMP, ""));
        assert!(!verify(BODY, &sig, TIMESTAMP, "not-hex"));
        assert!(!verify(BODY, &sig[..100], TIMESTAMP, &pk));
        assert!(!verify(BODY, &"zz".repeat(64), TIMESTAMP, &pk));
        assert!(!verify(BODY, &sig, TIMESTAMP, &pk[..40]));
    }

    #[test]
    fn from_hex_reports_bad_keys() {
        assert!(matches!(
            SignatureVerifier::from_hex("abcd"),
            Err(KeyError::InvalidLength(2))
        ));
        assert!(matches!(
            SignatureVerifier::from_hex("xyz"),
            Err(KeyError::InvalidHex(_))
        ));
    }

    #[test]
    fn public_key_hex_round_trips() {
        let kp = Keypair::generate();
        let verifier = SignatureVerifier::from_hex(&kp.public_key_hex()).unwrap();
        assert_eq!(verifier.public_key_hex(), kp.public_key_hex());
    }
}
