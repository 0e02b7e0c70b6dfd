use rowseal_keys::{open, seal, KeyError, KeyPair, SEALED_HEADER_SIZE};

#[test]
fn seal_open_roundtrip() {
    let recipient = KeyPair::generate();
    let key_material = b"0123456789abcdef0123456789abcdef";

    let sealed = seal(key_material, &recipient.public).unwrap();
    let opened = open(&sealed, &recipient.secret).unwrap();

    assert_eq!(opened, key_material);
}

#[test]
fn sealed_layout_carries_header_and_tag() {
    let recipient = KeyPair::generate();
    let sealed = seal(&[0u8; 32], &recipient.public).unwrap();

    // 32-byte ephemeral key + 24-byte nonce + 32-byte ciphertext + 16-byte tag
    assert_eq!(sealed.len(), SEALED_HEADER_SIZE + 32 + 16);
}

#[test]
fn each_seal_is_randomized() {
    let recipient = KeyPair::generate();
    let a = seal(b"same input", &recipient.public).unwrap();
    let b = seal(b"same input", &recipient.public).unwrap();
    assert_ne!(a, b);
}

#[test]
fn wrong_recipient_fails_to_open() {
    let intended = KeyPair::generate();
    let wrong = KeyPair::generate();

    let sealed = seal(b"block key material", &intended.public).unwrap();
    assert!(matches!(
        open(&sealed, &wrong.secret),
        Err(KeyError::Unseal)
    ));
}

#[test]
fn tampered_ciphertext_fails_to_open() {
    let recipient = KeyPair::generate();
    let mut sealed = seal(b"block key material", &recipient.public).unwrap();

    if let Some(byte) = sealed.last_mut() {
        *byte ^= 0xFF;
    }
    assert!(matches!(
        open(&sealed, &recipient.secret),
        Err(KeyError::Unseal)
    ));
}

#[test]
fn truncated_input_is_an_encoding_error() {
    let recipient = KeyPair::generate();
    let result = open(&[0u8; SEALED_HEADER_SIZE - 1], &recipient.secret);
    assert!(matches!(result, Err(KeyError::InvalidEncoding(_))));
}
