//! Re-encryption: old key pair out, new key pair in.
//!
//! Used for key rotation across data sets: messages sealed for the old
//! public key are decrypted with the old secret key and immediately
//! re-encrypted for the new public key. Input that does not carry this
//! version's signature is rejected up front so a half-migrated column
//! never silently passes through.

use crate::error::{CoreError, CoreResult};
use crate::v1::decrypt::DecryptionCoreV1;
use crate::v1::encrypt::EncryptionCoreV1;
use crate::v1::format;
use crate::Recrypts;

/// Re-encryption engine for version 1 wire messages.
pub struct RecryptCoreV1 {
    decryptor: DecryptionCoreV1,
    encryptor: EncryptionCoreV1,
}

impl RecryptCoreV1 {
    pub fn new(decryptor: DecryptionCoreV1, encryptor: EncryptionCoreV1) -> Self {
        Self {
            decryptor,
            encryptor,
        }
    }

    /// Decrypts `message` with the old key and re-encrypts the plaintext
    /// with the new one. Both engines keep their block and cache state
    /// across calls, so bulk recryption is amortized on both sides.
    pub fn recrypt(&mut self, message: &str) -> CoreResult<String> {
        if !format::matches_signature(message) {
            return Err(CoreError::format(
                "signature not recognized or version unsupported",
            ));
        }
        let plaintext = self.decryptor.decrypt(message)?;
        self.encryptor.encrypt(&plaintext)
    }
}

impl Recrypts for RecryptCoreV1 {
    fn recrypt(&mut self, value: &str) -> CoreResult<String> {
        RecryptCoreV1::recrypt(self, value)
    }
}
