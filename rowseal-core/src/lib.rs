//! Block-amortized hybrid encryption for column-level data.
//!
//! Encrypts and decrypts very large numbers of small text values (one
//! table cell per call) at high rates. The asymmetric operation that makes
//! key management easy is far too slow to pay per record, so it is
//! amortized over a *block*:
//!
//! 1. The encrypt side generates a random AES key and IV, seals the key
//!    once with the recipient's public key, and reuses the resulting
//!    message prefix for up to `max_block_size` records or
//!    `max_block_lifetime` of wall time.
//! 2. The decrypt side caches opened block keys at two levels: a
//!    single-slot "last used" cache for consecutive records of one block,
//!    and a bounded LRU map for recurring blocks.
//!
//! Messages are self-describing strings
//! (`rsl:1:<sealed key>:<iv>:<ciphertext>`, base64 fields), so a decrypting
//! engine needs nothing but its secret key.
//!
//! Engines are deliberately single-threaded: every call mutates block or
//! cache state, and the hot path must not sit behind a lock. Create one
//! engine per worker; each carries its own caches.

pub mod cache;
pub mod cipher;
mod error;
pub mod v1;

pub use cache::{KeyCache, LastUsed, DEFAULT_KEY_CACHE_CAPACITY};
pub use cipher::{KeySize, SymmetricKey, IV_SIZE};
pub use error::{CoreError, CoreResult, CryptoCause};
pub use v1::decrypt::DecryptionCoreV1;
pub use v1::encrypt::{BlockPolicy, EncryptionCoreV1};
pub use v1::recrypt::RecryptCoreV1;

/// Capability to produce wire messages. One implementation per wire
/// format version.
pub trait Encrypts {
    fn encrypt(&mut self, value: &str) -> CoreResult<String>;
}

/// Capability to invert wire messages. One implementation per wire
/// format version.
pub trait Decrypts {
    fn decrypt(&mut self, value: &str) -> CoreResult<String>;
}

/// Capability to move a message from one key pair to another.
pub trait Recrypts {
    fn recrypt(&mut self, value: &str) -> CoreResult<String>;
}
