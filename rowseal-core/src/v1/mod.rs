//! Version 1 of the wire format and its engines.
//!
//! New format versions get a sibling module with new engine types; existing
//! versions are never modified, so old ciphertext stays decryptable.

pub mod decrypt;
pub mod encrypt;
pub mod format;
pub mod recrypt;
