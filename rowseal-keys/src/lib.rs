//! Asymmetric key management for rowseal column encryption.
//!
//! The hybrid scheme in `rowseal-core` amortizes one asymmetric operation
//! over a block of records. This crate owns that asymmetric side:
//!
//! - **Keypairs**: X25519, generated from OS randomness, reconstructible
//!   from raw secret bytes.
//! - **Sealing**: anonymous sealed-box wrap of block key material with an
//!   ephemeral keypair per seal (X25519 + XSalsa20-Poly1305).
//! - **Protection**: passphrase encryption of secret keys at rest
//!   (Argon2id -> ChaCha20-Poly1305).
//! - **Loading**: base64 key files and JSON passphrase-protected blobs.
//!
//! `PublicKey` and `SecretKey` are re-exported from `crypto_box` so callers
//! never depend on it directly.

mod error;
mod keypair;
pub mod loader;
pub mod protected;
pub mod sealed;

pub use crypto_box::{PublicKey, SecretKey};
pub use error::{KeyError, KeyResult};
pub use keypair::KeyPair;
pub use loader::{
    load_protected_secret_key, load_public_key, load_secret_key, public_key_from_base64,
    secret_key_from_base64, store_protected_secret_key,
};
pub use protected::{open_secret_key, protect_secret_key, ProtectedKey};
pub use sealed::{open, seal, SEALED_HEADER_SIZE};
