//! Version 1 wire format.
//!
//! A message is a single ASCII string of exactly five `:`-delimited fields:
//!
//! ```text
//! rsl:1:<base64 sealed key part>:<base64 iv>:<base64 ciphertext>
//! ```
//!
//! Base64 output never contains `:`, so the fields are self-delimiting
//! without length prefixes. The first four fields are identical for every
//! record of a block, which is why [`serialize_block_prefix`] produces a
//! reusable prefix ending in the delimiter, ready for the per-record
//! ciphertext to be appended.

use crate::error::{CoreError, CoreResult};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;

/// Short label identifying this family of formats.
pub const SIGNATURE: &str = "rsl";

/// Layout version covered by this module.
pub const VERSION: u32 = 1;

/// Field delimiter.
pub const DELIMITER: char = ':';

/// Signature and version prefix for cheap `starts_with` routing at
/// boundary layers. Parsing does not validate it; decryption success is
/// the correctness oracle and format policy belongs to the caller.
pub const FORMAT_PREFIX: &str = "rsl:1:";

/// Number of fields in a well-formed message.
const FIELD_COUNT: usize = 5;

/// A wire message split into its five fields, borrowed from the input.
#[derive(Debug, PartialEq, Eq)]
pub struct ParsedMessage<'a> {
    pub signature: &'a str,
    pub version: &'a str,
    pub sealed_part: &'a str,
    pub iv_part: &'a str,
    pub data_part: &'a str,
}

/// True when `value` carries this format's signature and version prefix.
pub fn matches_signature(value: &str) -> bool {
    value.starts_with(FORMAT_PREFIX)
}

/// Builds the reusable block prefix `rsl:1:<b64 sealed>:<b64 iv>:`.
pub fn serialize_block_prefix(sealed_key: &[u8], iv: &[u8]) -> String {
    format!(
        "{SIGNATURE}{DELIMITER}{VERSION}{DELIMITER}{}{DELIMITER}{}{DELIMITER}",
        encode(sealed_key),
        encode(iv)
    )
}

/// Splits a message into its five fields.
///
/// Only the field count is enforced here; see [`FORMAT_PREFIX`].
pub fn parse(message: &str) -> CoreResult<ParsedMessage<'_>> {
    let fields: Vec<&str> = message.split(DELIMITER).collect();
    if fields.len() != FIELD_COUNT {
        return Err(CoreError::format(format!(
            "expected {FIELD_COUNT} delimited fields, got {}",
            fields.len()
        )));
    }
    Ok(ParsedMessage {
        signature: fields[0],
        version: fields[1],
        sealed_part: fields[2],
        iv_part: fields[3],
        data_part: fields[4],
    })
}

/// Standard base64 encode.
pub fn encode(bytes: &[u8]) -> String {
    BASE64.encode(bytes)
}

/// Standard base64 decode. Malformed input is a format error, not a
/// crypto error.
pub fn decode(value: &str) -> CoreResult<Vec<u8>> {
    BASE64
        .decode(value)
        .map_err(|e| CoreError::format(format!("field is not valid base64: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefix_has_trailing_delimiter_and_five_fields_once_completed() {
        let prefix = serialize_block_prefix(&[1, 2, 3], &[4u8; 16]);
        assert!(prefix.starts_with(FORMAT_PREFIX));
        assert!(prefix.ends_with(DELIMITER));

        let message = format!("{prefix}{}", encode(b"ciphertext"));
        let parsed = parse(&message).unwrap();
        assert_eq!(parsed.signature, SIGNATURE);
        assert_eq!(parsed.version, "1");
        assert_eq!(decode(parsed.sealed_part).unwrap(), vec![1, 2, 3]);
        assert_eq!(decode(parsed.iv_part).unwrap(), vec![4u8; 16]);
        assert_eq!(decode(parsed.data_part).unwrap(), b"ciphertext");
    }

    #[test]
    fn parse_rejects_wrong_field_counts() {
        assert!(parse("rsl:1:abc:def").is_err());
        assert!(parse("rsl:1:abc:def:ghi:jkl").is_err());
        assert!(parse("").is_err());
        assert!(parse("no delimiters here").is_err());
    }

    #[test]
    fn parse_does_not_validate_signature() {
        // Policy belongs to the boundary layer
        assert!(parse("xxx:9:a:b:c").is_ok());
    }

    #[test]
    fn decode_rejects_malformed_base64() {
        let err = decode("!!! not base64 !!!").unwrap_err();
        assert!(matches!(err, CoreError::InvalidInputFormat(_)));
    }

    #[test]
    fn matches_signature_requires_exact_prefix() {
        assert!(matches_signature("rsl:1:a:b:c"));
        assert!(!matches_signature("rsl:2:a:b:c"));
        assert!(!matches_signature("plaintext value"));
    }
}
