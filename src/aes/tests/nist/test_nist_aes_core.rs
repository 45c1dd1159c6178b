//! Test Suite for the AES Core Against NIST AESAVS Known Answer Tests
//!
//! This module validates the block cipher core against Known Answer Tests
//! (KAT) from The Advanced Encryption Standard Algorithm Validation Suite
//! (AESAVS) released on November 15, 2002, covering the GFSbox, KeySbox,
//! Variable Key and Variable Text test categories.
//!
//! The AESAVS document can be found at:
//! https://csrc.nist.gov/CSRC/media/Projects/Cryptographic-Algorithm-Validation-Program/documents/aes/AESAVS.pdf
//!
//! The vectors used here are the leading entries of their respective AESAVS
//! appendices, embedded directly as hex strings so the suite runs without
//! external data files. Every vector is exercised in both directions:
//! encryption against the expected ciphertext, then decryption back to the
//! plaintext.

use crate::aes::{aes_dec_block, aes_enc_block, Aes128, Aes192, Aes256, AES_BLOCK_SIZE};
use hex::decode as hex_decode;

fn from_hex<const N: usize>(s: &str) -> [u8; N] {
    hex_decode(s)
        .expect("valid hex")
        .try_into()
        .expect("expected length")
}

#[test]
fn test_gfsbox_kat_aes_128() {
    let key = [0u8; 16]; // All zeros key
    let plaintext: [u8; AES_BLOCK_SIZE] = from_hex("f34481ec3cc627bacd5dc3fb08f273e6");
    let expected_ciphertext: [u8; AES_BLOCK_SIZE] = from_hex("0336763e966d92595a567cc9ce537f5e");

    let cipher = Aes128::new(&key);
    assert_eq!(
        cipher.encrypt_block(&plaintext),
        expected_ciphertext,
        "Ciphertext does not match expected value"
    );
    assert_eq!(
        cipher.decrypt_block(&expected_ciphertext),
        plaintext,
        "Decrypted plaintext does not match expected value"
    );
}

#[test]
fn test_gfsbox_kat_aes_192() {
    let key = [0u8; 24]; // All zeros key
    let plaintext: [u8; AES_BLOCK_SIZE] = from_hex("1b077a6af4b7f98229de786d7516b639");
    let expected_ciphertext: [u8; AES_BLOCK_SIZE] = from_hex("275cfc0413d8ccb70513c3859b1d0f72");

    let cipher = Aes192::new(&key);
    assert_eq!(
        cipher.encrypt_block(&plaintext),
        expected_ciphertext,
        "Ciphertext does not match expected value"
    );
    assert_eq!(
        cipher.decrypt_block(&expected_ciphertext),
        plaintext,
        "Decrypted plaintext does not match expected value"
    );
}

#[test]
fn test_gfsbox_kat_aes_256() {
    let key = [0u8; 32]; // All zeros key
    let plaintext: [u8; AES_BLOCK_SIZE] = from_hex("014730f80ac625fe84f026c60bfd547d");
    let expected_ciphertext: [u8; AES_BLOCK_SIZE] = from_hex("5c9d844ed46f9885085e5d6a4f94c7d7");

    let cipher = Aes256::new(&key);
    assert_eq!(
        cipher.encrypt_block(&plaintext),
        expected_ciphertext,
        "Ciphertext does not match expected value"
    );
    assert_eq!(
        cipher.decrypt_block(&expected_ciphertext),
        plaintext,
        "Decrypted plaintext does not match expected value"
    );
}

#[test]
fn test_keysbox_kat_aes_128() {
    let key: [u8; 16] = from_hex("10a58869d74be5a374cf867cfb473859");
    let plaintext = [0u8; AES_BLOCK_SIZE]; // All zeros plaintext
    let expected_ciphertext: [u8; AES_BLOCK_SIZE] = from_hex("6d251e6944b051e04eaa6fb4dbf78465");

    let ciphertext = aes_enc_block(&plaintext, &key).expect("Encryption failed");
    assert_eq!(
        ciphertext, expected_ciphertext,
        "Ciphertext does not match expected value"
    );

    let decrypted = aes_dec_block(&ciphertext, &key).expect("Decryption failed");
    assert_eq!(
        decrypted, plaintext,
        "Decrypted plaintext does not match expected value"
    );
}

#[test]
fn test_keysbox_kat_aes_192() {
    let key: [u8; 24] = from_hex("e9f065d7c13573587f7875357dfbb16c53489f6a4bd0f7cd");
    let plaintext = [0u8; AES_BLOCK_SIZE]; // All zeros plaintext
    let expected_ciphertext: [u8; AES_BLOCK_SIZE] = from_hex("0956259c9cd5cfd0181cca53380cde06");

    let cipher = Aes192::new(&key);
    assert_eq!(
        cipher.encrypt_block(&plaintext),
        expected_ciphertext,
        "Ciphertext does not match expected value"
    );
    assert_eq!(
        cipher.decrypt_block(&expected_ciphertext),
        plaintext,
        "Decrypted plaintext does not match expected value"
    );
}

#[test]
fn test_keysbox_kat_aes_256() {
    let key: [u8; 32] =
        from_hex("c47b0294dbbbee0fec4757f22ffeee3587ca4730c3d33b691df38bab076bc558");
    let plaintext = [0u8; AES_BLOCK_SIZE]; // All zeros plaintext
    let expected_ciphertext: [u8; AES_BLOCK_SIZE] = from_hex("46f2fb342d6f0ab477476fc501242c5f");

    let cipher = Aes256::new(&key);
    assert_eq!(
        cipher.encrypt_block(&plaintext),
        expected_ciphertext,
        "Ciphertext does not match expected value"
    );
    assert_eq!(
        cipher.decrypt_block(&expected_ciphertext),
        plaintext,
        "Decrypted plaintext does not match expected value"
    );
}

#[test]
fn test_varkey_kat_aes_128() {
    let key: [u8; 16] = from_hex("80000000000000000000000000000000");
    let plaintext = [0u8; AES_BLOCK_SIZE]; // All zeros plaintext
    let expected_ciphertext: [u8; AES_BLOCK_SIZE] = from_hex("0edd33d3c621e546455bd8ba1418bec8");

    let ciphertext = aes_enc_block(&plaintext, &key).expect("Encryption failed");
    assert_eq!(
        ciphertext, expected_ciphertext,
        "Ciphertext does not match expected value"
    );

    let decrypted = aes_dec_block(&ciphertext, &key).expect("Decryption failed");
    assert_eq!(
        decrypted, plaintext,
        "Decrypted plaintext does not match expected value"
    );
}

#[test]
fn test_varkey_kat_aes_192() {
    let key: [u8; 24] = from_hex("800000000000000000000000000000000000000000000000");
    let plaintext = [0u8; AES_BLOCK_SIZE]; // All zeros plaintext
    let expected_ciphertext: [u8; AES_BLOCK_SIZE] = from_hex("de885dc87f5a92594082d02cc1e1b42c");

    let ciphertext = aes_enc_block(&plaintext, &key).expect("Encryption failed");
    assert_eq!(
        ciphertext, expected_ciphertext,
        "Ciphertext does not match expected value"
    );

    let decrypted = aes_dec_block(&ciphertext, &key).expect("Decryption failed");
    assert_eq!(
        decrypted, plaintext,
        "Decrypted plaintext does not match expected value"
    );
}

#[test]
fn test_varkey_kat_aes_256() {
    let key: [u8; 32] =
        from_hex("8000000000000000000000000000000000000000000000000000000000000000");
    let plaintext = [0u8; AES_BLOCK_SIZE]; // All zeros plaintext
    let expected_ciphertext: [u8; AES_BLOCK_SIZE] = from_hex("e35a6dcb19b201a01ebcfa8aa22b5759");

    let ciphertext = aes_enc_block(&plaintext, &key).expect("Encryption failed");
    assert_eq!(
        ciphertext, expected_ciphertext,
        "Ciphertext does not match expected value"
    );

    let decrypted = aes_dec_block(&ciphertext, &key).expect("Decryption failed");
    assert_eq!(
        decrypted, plaintext,
        "Decrypted plaintext does not match expected value"
    );
}

#[test]
fn test_vartxt_kat_aes_128() {
    let key = [0u8; 16]; // All zeros key
    let plaintext: [u8; AES_BLOCK_SIZE] = from_hex("80000000000000000000000000000000");
    let expected_ciphertext: [u8; AES_BLOCK_SIZE] = from_hex("3ad78e726c1ec02b7ebfe92b23d9ec34");

    let ciphertext = aes_enc_block(&plaintext, &key).expect("Encryption failed");
    assert_eq!(
        ciphertext, expected_ciphertext,
        "Ciphertext does not match expected value"
    );

    let decrypted = aes_dec_block(&ciphertext, &key).expect("Decryption failed");
    assert_eq!(
        decrypted, plaintext,
        "Decrypted plaintext does not match expected value"
    );
}

#[test]
fn test_vartxt_kat_aes_192() {
    let key = [0u8; 24]; // All zeros key
    let plaintext: [u8; AES_BLOCK_SIZE] = from_hex("80000000000000000000000000000000");
    let expected_ciphertext: [u8; AES_BLOCK_SIZE] = from_hex("6cd02513e8d4dc986b4afe087a60bd0c");

    let ciphertext = aes_enc_block(&plaintext, &key).expect("Encryption failed");
    assert_eq!(
        ciphertext, expected_ciphertext,
        "Ciphertext does not match expected value"
    );

    let decrypted = aes_dec_block(&ciphertext, &key).expect("Decryption failed");
    assert_eq!(
        decrypted, plaintext,
        "Decrypted plaintext does not match expected value"
    );
}

#[test]
fn test_vartxt_kat_aes_256() {
    let key = [0u8; 32]; // All zeros key
    let plaintext: [u8; AES_BLOCK_SIZE] = from_hex("80000000000000000000000000000000");
    let expected_ciphertext: [u8; AES_BLOCK_SIZE] = from_hex("ddc6bf790c15760d8d9aeb6f9a75fd4e");

    let ciphertext = aes_enc_block(&plaintext, &key).expect("Encryption failed");
    assert_eq!(
        ciphertext, expected_ciphertext,
        "Ciphertext does not match expected value"
    );

    let decrypted = aes_dec_block(&ciphertext, &key).expect("Decryption failed");
    assert_eq!(
        decrypted, plaintext,
        "Decrypted plaintext does not match expected value"
    );
}
