//! Version 1 encryption engine.
//!
//! The engine owns a *block*: a freshly generated symmetric key and IV,
//! sealed once with the recipient's public key into a reusable message
//! prefix. Consecutive records share the block, so the expensive asymmetric
//! operation is paid once per block instead of once per record. Rotation
//! policy bounds how long a block lives, in rows and in wall time.
//!
//! Not thread-safe by design: the engine mutates block state on every call
//! and is meant to be owned by exactly one worker. Run one instance per
//! worker thread instead of sharing one behind a lock.

use crate::cipher::{self, KeySize, SymmetricKey, IV_SIZE};
use crate::error::{CoreError, CoreResult};
use crate::v1::format;
use crate::Encrypts;
use rowseal_keys::PublicKey;
use std::time::{Duration, Instant};
use tracing::debug;

/// Rotation policy for the encrypt-side block.
///
/// Smaller blocks mean more asymmetric operations and stronger per-record
/// key separation; larger blocks mean higher throughput with more records
/// sharing one key and IV.
#[derive(Clone, Debug)]
pub struct BlockPolicy {
    /// Rotation floor: the block survives at least this many records
    /// regardless of elapsed time, so wrap latency or clock jitter can
    /// never thrash rotation on every call.
    pub min_block_size: u64,

    /// Rotation ceiling: the block never serves more than this many records.
    pub max_block_size: u64,

    /// Rotation time budget, enforced only once `min_block_size` is reached.
    /// Measured from the moment the block became ready to use.
    pub max_block_lifetime: Duration,

    /// Size of the per-block symmetric key.
    pub key_size: KeySize,
}

impl Default for BlockPolicy {
    fn default() -> Self {
        Self {
            min_block_size: 10,
            max_block_size: 500_000,
            max_block_lifetime: Duration::from_millis(500),
            key_size: KeySize::Bits256,
        }
    }
}

/// The reusable (key, iv, sealed prefix) tuple shared by consecutive
/// encryptions. Replaced wholesale on rotation, never mutated in place
/// apart from the row counter.
struct Block {
    key: SymmetricKey,
    iv: [u8; IV_SIZE],
    prefix: String,
    rows_processed: u64,
    created_at: Instant,
}

/// Encryption engine for version 1 wire messages.
pub struct EncryptionCoreV1 {
    public_key: PublicKey,
    policy: BlockPolicy,
    block: Option<Block>,
}

impl EncryptionCoreV1 {
    /// Creates an engine with the default [`BlockPolicy`], sealing the
    /// first block eagerly so key problems surface at construction.
    pub fn new(public_key: PublicKey) -> CoreResult<Self> {
        Self::with_policy(public_key, BlockPolicy::default())
    }

    /// Creates an engine with an explicit rotation policy.
    pub fn with_policy(public_key: PublicKey, policy: BlockPolicy) -> CoreResult<Self> {
        let mut core = Self {
            public_key,
            policy,
            block: None,
        };
        core.block = Some(core.fresh_block()?);
        Ok(core)
    }

    fn rotation_due(&self) -> bool {
        match &self.block {
            None => true,
            Some(block) => {
                block.rows_processed >= self.policy.max_block_size
                    || (block.rows_processed >= self.policy.min_block_size
                        && block.created_at.elapsed() > self.policy.max_block_lifetime)
            }
        }
    }

    fn fresh_block(&self) -> CoreResult<Block> {
        let key = SymmetricKey::generate(self.policy.key_size);
        let iv = cipher::random_iv();
        let sealed_key = rowseal_keys::seal(key.as_bytes(), &self.public_key)
            .map_err(|e| CoreError::init(format!("failed to seal block key: {e}")))?;
        let prefix = format::serialize_block_prefix(&sealed_key, &iv);

        // Timestamp taken after the seal: lifetime is measured from "ready
        // to use", excluding wrap latency.
        Ok(Block {
            key,
            iv,
            prefix,
            rows_processed: 0,
            created_at: Instant::now(),
        })
    }

    /// Encrypts one value into a version 1 wire message.
    ///
    /// Rotation failures surface as [`CoreError::InitializationFailed`];
    /// the per-record cipher step surfaces as
    /// [`CoreError::CryptoCoreFailed`]. Neither is retried here.
    pub fn encrypt(&mut self, value: &str) -> CoreResult<String> {
        if self.rotation_due() {
            let rotated = self.fresh_block()?;
            if let Some(old) = &self.block {
                debug!(
                    rows = old.rows_processed,
                    age_ms = old.created_at.elapsed().as_millis() as u64,
                    "rotating encryption block"
                );
            }
            self.block = Some(rotated);
        }
        let block = match self.block.as_mut() {
            Some(block) => block,
            // rotation_due() returns true whenever no block is active
            None => return Err(CoreError::init("no active encryption block")),
        };

        block.rows_processed += 1;

        let ciphertext = cipher::encrypt(&block.key, &block.iv, value.as_bytes())?;
        let mut message = block.prefix.clone();
        message.push_str(&format::encode(&ciphertext));
        Ok(message)
    }
}

impl Encrypts for EncryptionCoreV1 {
    fn encrypt(&mut self, value: &str) -> CoreResult<String> {
        EncryptionCoreV1::encrypt(self, value)
    }
}
