//! Decrypt-side caches.
//!
//! Two levels, both per-engine-instance:
//!
//! - [`LastUsed`] (L1): a single slot remembering the most recently seen
//!   sealed-part string and IV string. Skips string hashing and cache
//!   lookups entirely on the common case of consecutive records from the
//!   same encryption block.
//! - [`KeyCache`] (L2): a bounded LRU map from sealed-part string to the
//!   opened symmetric key, so a recurring block (out-of-order or
//!   re-processed records) is opened once, not per record.
//!
//! A KeyCache miss is always resolvable by re-opening the sealed part, so
//! eviction costs work, never correctness.

use crate::cipher::{SymmetricKey, IV_SIZE};
use schnellru::{ByLength, LruMap};

/// Default number of distinct blocks the key cache holds.
pub const DEFAULT_KEY_CACHE_CAPACITY: u32 = 1000;

/// Bounded LRU cache of opened block keys, keyed by the sealed-part string
/// exactly as it appears in messages.
///
/// Both `get` and `put` promote the entry to most-recently-used.
pub struct KeyCache {
    entries: LruMap<String, SymmetricKey>,
}

impl KeyCache {
    pub fn new(capacity: u32) -> Self {
        Self {
            entries: LruMap::new(ByLength::new(capacity)),
        }
    }

    pub fn get(&mut self, sealed_part: &str) -> Option<&SymmetricKey> {
        self.entries.get(sealed_part).map(|key| &*key)
    }

    pub fn put(&mut self, sealed_part: String, key: SymmetricKey) {
        self.entries.insert(sealed_part, key);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Single-slot cache of the most recently used sealed part and IV.
///
/// The two halves are independent: a message can repeat the sealed part
/// while changing the IV string (and in principle vice versa). Each half is
/// overwritten when its field differs from the remembered one and never
/// explicitly cleared.
#[derive(Default)]
pub struct LastUsed {
    key: Option<(String, SymmetricKey)>,
    iv: Option<(String, [u8; IV_SIZE])>,
}

impl LastUsed {
    /// Returns the remembered key when `sealed_part` matches the slot.
    pub fn key_for(&self, sealed_part: &str) -> Option<&SymmetricKey> {
        match &self.key {
            Some((last_part, key)) if last_part == sealed_part => Some(key),
            _ => None,
        }
    }

    pub fn remember_key(&mut self, sealed_part: &str, key: SymmetricKey) {
        self.key = Some((sealed_part.to_owned(), key));
    }

    /// Returns the remembered IV when `iv_part` matches the slot.
    pub fn iv_for(&self, iv_part: &str) -> Option<[u8; IV_SIZE]> {
        match &self.iv {
            Some((last_part, iv)) if last_part == iv_part => Some(*iv),
            _ => None,
        }
    }

    pub fn remember_iv(&mut self, iv_part: &str, iv: [u8; IV_SIZE]) {
        self.iv = Some((iv_part.to_owned(), iv));
    }
}
