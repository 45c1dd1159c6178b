//! # Sliced AES
//!
//! A software implementation of the AES block cipher (AES-128, AES-192 and
//! AES-256) that runs in constant time. The cipher state is held in
//! bit-sliced form and the S-box is computed by a fixed Boolean circuit, so
//! no branch, loop bound or memory access ever depends on key or data bytes.
//! This makes the implementation resistant to cache-timing and branch-timing
//! side channels, at the cost of raw throughput.
//!
//! The crate provides single-block encryption and decryption only. Modes of
//! operation (ECB, CBC, CTR, ...), padding schemes and authenticated
//! encryption are deliberately not part of this library and must be layered
//! on top by the caller.

pub mod aes;

pub use aes::{
    aes_dec_block, aes_enc_block, Aes128, Aes192, Aes256, AES_128_KEY_SIZE, AES_192_KEY_SIZE,
    AES_256_KEY_SIZE, AES_BLOCK_SIZE,
};
