//! Loading key material from strings and files.
//!
//! Keys on disk are standard base64 of the raw 32 bytes, one key per file,
//! surrounding whitespace tolerated. Passphrase-protected secret keys are
//! JSON blobs produced from [`ProtectedKey`](crate::protected::ProtectedKey).

use crate::error::KeyResult;
use crate::keypair::decode_key_bytes;
use crate::protected::{open_secret_key, ProtectedKey};
use crypto_box::{PublicKey, SecretKey};
use std::fs;
use std::path::Path;

/// Parses a public key from base64.
pub fn public_key_from_base64(encoded: &str) -> KeyResult<PublicKey> {
    Ok(PublicKey::from(decode_key_bytes(encoded)?))
}

/// Parses a secret key from base64.
pub fn secret_key_from_base64(encoded: &str) -> KeyResult<SecretKey> {
    Ok(SecretKey::from(decode_key_bytes(encoded)?))
}

/// Loads a base64-encoded public key from a file.
pub fn load_public_key(path: impl AsRef<Path>) -> KeyResult<PublicKey> {
    let contents = fs::read_to_string(path)?;
    public_key_from_base64(&contents)
}

/// Loads a base64-encoded secret key from a file.
pub fn load_secret_key(path: impl AsRef<Path>) -> KeyResult<SecretKey> {
    let contents = fs::read_to_string(path)?;
    secret_key_from_base64(&contents)
}

/// Loads a passphrase-protected secret key from a JSON blob on disk.
pub fn load_protected_secret_key(
    path: impl AsRef<Path>,
    passphrase: &str,
) -> KeyResult<SecretKey> {
    let contents = fs::read_to_string(path)?;
    let protected: ProtectedKey = serde_json::from_str(&contents)?;
    open_secret_key(&protected, passphrase)
}

/// Writes a passphrase-protected secret key as a JSON blob.
pub fn store_protected_secret_key(
    path: impl AsRef<Path>,
    protected: &ProtectedKey,
) -> KeyResult<()> {
    let contents = serde_json::to_string_pretty(protected)?;
    fs::write(path, contents)?;
    Ok(())
}
