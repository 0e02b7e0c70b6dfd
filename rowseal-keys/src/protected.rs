//! Passphrase protection for secret keys at rest.
//!
//! Argon2id derives a 256-bit key from the passphrase, ChaCha20-Poly1305
//! encrypts the raw secret key bytes. The salt and nonce are bundled with
//! the ciphertext so the passphrase is the only input needed to open it.

use crate::error::{KeyError, KeyResult};
use argon2::Argon2;
use chacha20poly1305::aead::{Aead, KeyInit};
use chacha20poly1305::{ChaCha20Poly1305, Key, Nonce};
use crypto_box::SecretKey;
use rand::rngs::OsRng;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

/// Argon2id salt length, bytes.
pub const SALT_SIZE: usize = 16;

/// ChaCha20-Poly1305 nonce length, bytes.
pub const NONCE_SIZE: usize = 12;

/// A secret key encrypted with a passphrase, serializable to disk.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ProtectedKey {
    pub salt: [u8; SALT_SIZE],
    pub nonce: [u8; NONCE_SIZE],
    pub ciphertext: Vec<u8>,
}

fn derive_key(passphrase: &str, salt: &[u8; SALT_SIZE]) -> KeyResult<Zeroizing<[u8; 32]>> {
    let mut derived = Zeroizing::new([0u8; 32]);
    Argon2::default()
        .hash_password_into(passphrase.as_bytes(), salt, derived.as_mut_slice())
        .map_err(|e| KeyError::Protect(format!("key derivation failed: {e}")))?;
    Ok(derived)
}

/// Encrypts a secret key with a passphrase.
pub fn protect_secret_key(secret: &SecretKey, passphrase: &str) -> KeyResult<ProtectedKey> {
    let mut salt = [0u8; SALT_SIZE];
    OsRng.fill_bytes(&mut salt);
    let mut nonce = [0u8; NONCE_SIZE];
    OsRng.fill_bytes(&mut nonce);

    let derived = derive_key(passphrase, &salt)?;
    let cipher = ChaCha20Poly1305::new(Key::from_slice(derived.as_slice()));

    let key_bytes = Zeroizing::new(secret.to_bytes());
    let ciphertext = cipher
        .encrypt(Nonce::from_slice(&nonce), key_bytes.as_slice())
        .map_err(|_| KeyError::Protect("secret key encryption failed".to_string()))?;

    Ok(ProtectedKey {
        salt,
        nonce,
        ciphertext,
    })
}

/// Decrypts a passphrase-protected secret key.
///
/// Fails with [`KeyError::Unseal`] on a wrong passphrase or tampered blob.
pub fn open_secret_key(protected: &ProtectedKey, passphrase: &str) -> KeyResult<SecretKey> {
    let derived = derive_key(passphrase, &protected.salt)?;
    let cipher = ChaCha20Poly1305::new(Key::from_slice(derived.as_slice()));

    let plaintext = Zeroizing::new(
        cipher
            .decrypt(
                Nonce::from_slice(&protected.nonce),
                protected.ciphertext.as_slice(),
            )
            .map_err(|_| KeyError::Unseal)?,
    );

    let bytes: [u8; 32] = plaintext.as_slice().try_into().map_err(|_| {
        KeyError::InvalidKey(format!("expected 32 key bytes, got {}", plaintext.len()))
    })?;
    Ok(SecretKey::from(bytes))
}
