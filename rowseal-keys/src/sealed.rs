//! Sealed-box wrap of block key material.
//!
//! Uses ephemeral X25519 key exchange + XSalsa20-Poly1305. The ephemeral
//! public key travels with the ciphertext so the recipient can reconstruct
//! the shared secret; the sender stays anonymous and each seal is
//! independently randomized.
//!
//! The output is a flat byte string rather than a structured envelope because
//! it is embedded verbatim (base64) as one field of the wire message:
//!
//! ```text
//! ephemeral public key (32) || nonce (24) || ciphertext + tag
//! ```

use crate::error::{KeyError, KeyResult};
use crypto_box::aead::Aead;
use crypto_box::{PublicKey, SalsaBox, SecretKey};
use rand::rngs::OsRng;
use rand::RngCore;

/// Ephemeral public key length, bytes.
const EPHEMERAL_KEY_SIZE: usize = 32;

/// XSalsa20 nonce length, bytes.
const NONCE_SIZE: usize = 24;

/// Minimum length of a sealed byte string (header with an empty ciphertext).
pub const SEALED_HEADER_SIZE: usize = EPHEMERAL_KEY_SIZE + NONCE_SIZE;

/// Seals `plaintext` for the holder of the secret key matching `recipient`.
///
/// A fresh ephemeral keypair and nonce are drawn for every call, so sealing
/// the same bytes twice never produces the same output.
pub fn seal(plaintext: &[u8], recipient: &PublicKey) -> KeyResult<Vec<u8>> {
    let ephemeral = SecretKey::generate(&mut OsRng);
    let ephemeral_pk = ephemeral.public_key();

    let salsa_box = SalsaBox::new(recipient, &ephemeral);

    let mut nonce = [0u8; NONCE_SIZE];
    OsRng.fill_bytes(&mut nonce);

    let ciphertext = salsa_box
        .encrypt(crypto_box::Nonce::from_slice(&nonce), plaintext)
        .map_err(|_| KeyError::Protect("seal failed".to_string()))?;

    let mut sealed = Vec::with_capacity(SEALED_HEADER_SIZE + ciphertext.len());
    sealed.extend_from_slice(ephemeral_pk.as_bytes());
    sealed.extend_from_slice(&nonce);
    sealed.extend_from_slice(&ciphertext);
    Ok(sealed)
}

/// Opens a sealed byte string with the recipient's secret key.
///
/// Fails with [`KeyError::Unseal`] when the key is wrong or the bytes were
/// tampered with, and [`KeyError::InvalidEncoding`] when the input is too
/// short to carry the ephemeral key and nonce header.
pub fn open(sealed: &[u8], recipient: &SecretKey) -> KeyResult<Vec<u8>> {
    if sealed.len() < SEALED_HEADER_SIZE {
        return Err(KeyError::InvalidEncoding(format!(
            "sealed data too short: {} bytes, need at least {SEALED_HEADER_SIZE}",
            sealed.len()
        )));
    }

    let mut ephemeral_pk = [0u8; EPHEMERAL_KEY_SIZE];
    ephemeral_pk.copy_from_slice(&sealed[..EPHEMERAL_KEY_SIZE]);
    let nonce = &sealed[EPHEMERAL_KEY_SIZE..SEALED_HEADER_SIZE];
    let ciphertext = &sealed[SEALED_HEADER_SIZE..];

    let salsa_box = SalsaBox::new(&PublicKey::from(ephemeral_pk), recipient);

    salsa_box
        .decrypt(crypto_box::Nonce::from_slice(nonce), ciphertext)
        .map_err(|_| KeyError::Unseal)
}
