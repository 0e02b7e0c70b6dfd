//! AES-CBC (PKCS#7) symmetric cipher shared by all records of a block.
//!
//! Every call builds a fresh cipher object from (key, iv). This is a hard
//! invariant, not a performance knob: reusing cipher state across records
//! lets one corrupted-padding failure silently corrupt the first block of
//! the next decryption even with a correct key and IV.

use crate::error::{CoreError, CoreResult, CryptoCause};
use aes::cipher::block_padding::Pkcs7;
use aes::cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use rand::rngs::OsRng;
use rand::RngCore;
use zeroize::Zeroizing;

/// CBC initialization vector length, bytes.
pub const IV_SIZE: usize = 16;

/// AES block length, bytes.
const BLOCK_SIZE: usize = 16;

type Aes128CbcEnc = cbc::Encryptor<aes::Aes128>;
type Aes192CbcEnc = cbc::Encryptor<aes::Aes192>;
type Aes256CbcEnc = cbc::Encryptor<aes::Aes256>;
type Aes128CbcDec = cbc::Decryptor<aes::Aes128>;
type Aes192CbcDec = cbc::Decryptor<aes::Aes192>;
type Aes256CbcDec = cbc::Decryptor<aes::Aes256>;

/// Supported sizes for the per-block symmetric key.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum KeySize {
    Bits128,
    Bits192,
    #[default]
    Bits256,
}

impl KeySize {
    /// Key length in bytes.
    pub fn bytes(self) -> usize {
        match self {
            KeySize::Bits128 => 16,
            KeySize::Bits192 => 24,
            KeySize::Bits256 => 32,
        }
    }

    fn from_len(len: usize) -> Option<Self> {
        match len {
            16 => Some(KeySize::Bits128),
            24 => Some(KeySize::Bits192),
            32 => Some(KeySize::Bits256),
            _ => None,
        }
    }
}

/// A symmetric block key. Zeroized on drop.
#[derive(Clone)]
pub struct SymmetricKey(Zeroizing<Vec<u8>>);

impl SymmetricKey {
    /// Generates a fresh random key of the given size.
    pub fn generate(size: KeySize) -> Self {
        let mut bytes = Zeroizing::new(vec![0u8; size.bytes()]);
        OsRng.fill_bytes(bytes.as_mut_slice());
        Self(bytes)
    }

    /// Wraps raw key bytes, validating the length.
    pub fn from_bytes(bytes: Vec<u8>) -> CoreResult<Self> {
        if KeySize::from_len(bytes.len()).is_none() {
            return Err(CoreError::crypto(CryptoCause::InvalidKey));
        }
        Ok(Self(Zeroizing::new(bytes)))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

/// Draws a random CBC initialization vector.
pub fn random_iv() -> [u8; IV_SIZE] {
    let mut iv = [0u8; IV_SIZE];
    OsRng.fill_bytes(&mut iv);
    iv
}

/// Encrypts `plaintext` under (key, iv) with AES-CBC and PKCS#7 padding.
pub fn encrypt(key: &SymmetricKey, iv: &[u8; IV_SIZE], plaintext: &[u8]) -> CoreResult<Vec<u8>> {
    let key = key.as_bytes();
    let ciphertext = match key.len() {
        16 => Aes128CbcEnc::new_from_slices(key, iv)
            .map_err(|_| CoreError::crypto(CryptoCause::InvalidParameter))?
            .encrypt_padded_vec_mut::<Pkcs7>(plaintext),
        24 => Aes192CbcEnc::new_from_slices(key, iv)
            .map_err(|_| CoreError::crypto(CryptoCause::InvalidParameter))?
            .encrypt_padded_vec_mut::<Pkcs7>(plaintext),
        32 => Aes256CbcEnc::new_from_slices(key, iv)
            .map_err(|_| CoreError::crypto(CryptoCause::InvalidParameter))?
            .encrypt_padded_vec_mut::<Pkcs7>(plaintext),
        _ => return Err(CoreError::crypto(CryptoCause::InvalidKey)),
    };
    Ok(ciphertext)
}

/// Decrypts `ciphertext` under (key, iv), stripping PKCS#7 padding.
///
/// A fresh decryptor is constructed for this call and dropped afterwards;
/// see the module docs for why that must stay unconditional.
pub fn decrypt(key: &SymmetricKey, iv: &[u8; IV_SIZE], ciphertext: &[u8]) -> CoreResult<Vec<u8>> {
    if ciphertext.is_empty() || ciphertext.len() % BLOCK_SIZE != 0 {
        return Err(CoreError::crypto(CryptoCause::BlockSize));
    }
    let key = key.as_bytes();
    let plaintext = match key.len() {
        16 => Aes128CbcDec::new_from_slices(key, iv)
            .map_err(|_| CoreError::crypto(CryptoCause::InvalidParameter))?
            .decrypt_padded_vec_mut::<Pkcs7>(ciphertext),
        24 => Aes192CbcDec::new_from_slices(key, iv)
            .map_err(|_| CoreError::crypto(CryptoCause::InvalidParameter))?
            .decrypt_padded_vec_mut::<Pkcs7>(ciphertext),
        32 => Aes256CbcDec::new_from_slices(key, iv)
            .map_err(|_| CoreError::crypto(CryptoCause::InvalidParameter))?
            .decrypt_padded_vec_mut::<Pkcs7>(ciphertext),
        _ => return Err(CoreError::crypto(CryptoCause::InvalidKey)),
    };
    plaintext.map_err(|_| CoreError::crypto(CryptoCause::BadPadding))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encrypt_decrypt_roundtrip_all_key_sizes() {
        for size in [KeySize::Bits128, KeySize::Bits192, KeySize::Bits256] {
            let key = SymmetricKey::generate(size);
            let iv = random_iv();
            let ciphertext = encrypt(&key, &iv, b"hello columns").unwrap();
            assert_eq!(decrypt(&key, &iv, &ciphertext).unwrap(), b"hello columns");
        }
    }

    #[test]
    fn ciphertext_is_block_padded() {
        let key = SymmetricKey::generate(KeySize::Bits256);
        let iv = random_iv();
        // Empty plaintext still pads out to one full block
        assert_eq!(encrypt(&key, &iv, b"").unwrap().len(), BLOCK_SIZE);
        assert_eq!(encrypt(&key, &iv, &[0u8; 16]).unwrap().len(), 2 * BLOCK_SIZE);
    }

    #[test]
    fn wrong_key_never_recovers_plaintext() {
        // CBC padding is not an authenticator: a wrong key almost always
        // fails to unpad, and on the rare accidental unpad yields garbage.
        let mut saw_bad_padding = false;
        for _ in 0..32 {
            let key = SymmetricKey::generate(KeySize::Bits256);
            let other = SymmetricKey::generate(KeySize::Bits256);
            let iv = random_iv();
            let ciphertext = encrypt(&key, &iv, b"some value").unwrap();
            match decrypt(&other, &iv, &ciphertext) {
                Ok(garbage) => assert_ne!(garbage, b"some value"),
                Err(err) => {
                    assert!(matches!(
                        err,
                        CoreError::CryptoCoreFailed {
                            cause: CryptoCause::BadPadding
                        }
                    ));
                    saw_bad_padding = true;
                }
            }
        }
        assert!(saw_bad_padding);
    }

    #[test]
    fn partial_block_is_a_block_size_error() {
        let key = SymmetricKey::generate(KeySize::Bits256);
        let iv = random_iv();
        let err = decrypt(&key, &iv, &[0u8; 15]).unwrap_err();
        assert!(matches!(
            err,
            CoreError::CryptoCoreFailed {
                cause: CryptoCause::BlockSize
            }
        ));
    }

    #[test]
    fn invalid_key_length_is_rejected() {
        assert!(SymmetricKey::from_bytes(vec![0u8; 20]).is_err());
        assert!(SymmetricKey::from_bytes(vec![0u8; 32]).is_ok());
    }
}
