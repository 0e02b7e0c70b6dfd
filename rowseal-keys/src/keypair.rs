//! X25519 keypair used for sealing block keys.

use crate::error::{KeyError, KeyResult};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use crypto_box::{PublicKey, SecretKey};
use rand::rngs::OsRng;

/// X25519 keypair for the asymmetric side of the hybrid scheme.
///
/// The secret key zeroizes itself on drop (from `crypto_box`).
pub struct KeyPair {
    pub secret: SecretKey,
    pub public: PublicKey,
}

impl KeyPair {
    /// Generates a fresh keypair from the OS random number generator.
    pub fn generate() -> Self {
        let secret = SecretKey::generate(&mut OsRng);
        let public = secret.public_key();
        Self { secret, public }
    }

    /// Reconstructs a keypair from raw secret key bytes.
    pub fn from_secret_bytes(bytes: [u8; 32]) -> Self {
        let secret = SecretKey::from(bytes);
        let public = secret.public_key();
        Self { secret, public }
    }

    /// Returns the public key as a raw 32-byte array.
    pub fn public_bytes(&self) -> [u8; 32] {
        *self.public.as_bytes()
    }

    /// Returns the secret key as a raw 32-byte array.
    pub fn secret_bytes(&self) -> [u8; 32] {
        self.secret.to_bytes()
    }

    /// Returns the public key as standard base64.
    pub fn public_base64(&self) -> String {
        BASE64.encode(self.public.as_bytes())
    }

    /// Returns the secret key as standard base64.
    pub fn secret_base64(&self) -> String {
        BASE64.encode(self.secret.to_bytes())
    }
}

/// Decodes a base64 string into exactly 32 key bytes.
pub(crate) fn decode_key_bytes(encoded: &str) -> KeyResult<[u8; 32]> {
    let bytes = BASE64
        .decode(encoded.trim())
        .map_err(|e| KeyError::InvalidEncoding(format!("key is not valid base64: {e}")))?;
    bytes.try_into().map_err(|bytes: Vec<u8>| {
        KeyError::InvalidKey(format!("expected 32 key bytes, got {}", bytes.len()))
    })
}
