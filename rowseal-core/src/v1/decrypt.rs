//! Version 1 decryption engine.
//!
//! Inverts wire messages with as few asymmetric operations as possible:
//! the L1 [`LastUsed`] slot short-circuits consecutive records from the
//! same block, the L2 [`KeyCache`] catches recurring blocks, and only a
//! miss on both pays for a sealed-box open.
//!
//! Like the encrypt side, one instance per worker; calls must be
//! effectively sequential because the caches are plain mutable state.

use crate::cache::{KeyCache, LastUsed, DEFAULT_KEY_CACHE_CAPACITY};
use crate::cipher::{self, SymmetricKey, IV_SIZE};
use crate::error::{CoreError, CoreResult, CryptoCause};
use crate::v1::format;
use crate::Decrypts;
use rowseal_keys::{KeyError, SecretKey};
use tracing::trace;

/// Decryption engine for version 1 wire messages.
pub struct DecryptionCoreV1 {
    secret_key: SecretKey,
    key_cache: KeyCache,
    last_used: LastUsed,
}

impl DecryptionCoreV1 {
    /// Creates an engine with the default key cache capacity.
    pub fn new(secret_key: SecretKey) -> Self {
        Self::with_cache_capacity(secret_key, DEFAULT_KEY_CACHE_CAPACITY)
    }

    /// Creates an engine with an explicit key cache capacity. The cache is
    /// a per-instance memory budget; capacity only bounds repeated work,
    /// never correctness.
    pub fn with_cache_capacity(secret_key: SecretKey, capacity: u32) -> Self {
        Self {
            secret_key,
            key_cache: KeyCache::new(capacity),
            last_used: LastUsed::default(),
        }
    }

    /// Decrypts one version 1 wire message back to its text value.
    pub fn decrypt(&mut self, message: &str) -> CoreResult<String> {
        let parsed = format::parse(message)?;
        let plaintext =
            self.decrypt_parts(parsed.sealed_part, parsed.iv_part, parsed.data_part)?;
        Ok(String::from_utf8_lossy(&plaintext).into_owned())
    }

    /// Decrypts from the already-split fields.
    ///
    /// Fields stay as strings until the caches have been consulted; the
    /// base64 work for the sealed part and IV is only done on the paths
    /// that actually need the bytes.
    pub fn decrypt_parts(
        &mut self,
        sealed_part: &str,
        iv_part: &str,
        data_part: &str,
    ) -> CoreResult<Vec<u8>> {
        let key = self.resolve_key(sealed_part)?;
        let iv = self.resolve_iv(iv_part)?;
        let ciphertext = format::decode(data_part)?;

        // The CBC decryptor is rebuilt from (key, iv) on every call, even
        // when neither changed since the previous one. A "nothing changed"
        // fast path would let a corrupted-padding failure leave reused
        // cipher state that silently corrupts the first block of the next
        // decryption. Hard invariant; covered by a dedicated test.
        cipher::decrypt(&key, &iv, &ciphertext)
    }

    fn resolve_key(&mut self, sealed_part: &str) -> CoreResult<SymmetricKey> {
        // L1: same block as the previous record
        if let Some(key) = self.last_used.key_for(sealed_part) {
            return Ok(key.clone());
        }

        // L2: recurring block, promoted on the hit
        if let Some(key) = self.key_cache.get(sealed_part) {
            let key = key.clone();
            self.last_used.remember_key(sealed_part, key.clone());
            return Ok(key);
        }

        // Miss on both: pay for the sealed-box open, then fill both levels
        trace!("key cache miss, opening sealed block key");
        let sealed = format::decode(sealed_part)?;
        let raw = rowseal_keys::open(&sealed, &self.secret_key).map_err(|e| match e {
            KeyError::InvalidEncoding(message) => CoreError::format(message),
            _ => CoreError::crypto(CryptoCause::KeyUnwrap),
        })?;
        let key = SymmetricKey::from_bytes(raw)?;
        self.key_cache.put(sealed_part.to_owned(), key.clone());
        self.last_used.remember_key(sealed_part, key.clone());
        Ok(key)
    }

    fn resolve_iv(&mut self, iv_part: &str) -> CoreResult<[u8; IV_SIZE]> {
        if let Some(iv) = self.last_used.iv_for(iv_part) {
            return Ok(iv);
        }

        let bytes = format::decode(iv_part)?;
        let iv: [u8; IV_SIZE] = bytes
            .try_into()
            .map_err(|_| CoreError::crypto(CryptoCause::InvalidParameter))?;
        self.last_used.remember_iv(iv_part, iv);
        Ok(iv)
    }
}

impl Decrypts for DecryptionCoreV1 {
    fn decrypt(&mut self, value: &str) -> CoreResult<String> {
        DecryptionCoreV1::decrypt(self, value)
    }
}
