//! AES Core Implementation
//!
//! This module provides core functionalities for the AES (Advanced Encryption
//! Standard) algorithm. It includes implementations for both encryption and
//! decryption of a single 16-byte block along with the key expansion routine.
//!
//! The implementation is software-based and constant time: the cipher state
//! is kept in bit-sliced form and every transformation is a fixed sequence of
//! bitwise operations. No branch, loop bound or memory access depends on key
//! or data bytes, which makes the code resistant to cache-timing and
//! branch-timing side channels. The price is speed; this module favors a
//! small, auditable single-block implementation over throughput and makes no
//! attempt to process several blocks in parallel.
//!
//! # Representation
//!
//! A 128-bit AES state is a 4x4 matrix of bytes, transmitted column by
//! column. Here the state is held as eight 16-bit lanes, where lane `b`
//! contains bit `b` of all 16 state bytes. Within a lane, bit `r * 4 + c`
//! belongs to the byte at row `r`, column `c`, so the 16 bit positions cover
//! the matrix in this order:
//!
//! ```text
//!  0  1  2  3
//!  4  5  6  7
//!  8  9 10 11
//! 12 13 14 15
//! ```
//!
//! With this layout every AES transformation becomes lane arithmetic: the
//! S-box is a Boolean circuit evaluated on all 16 bytes at once (see the
//! `sbox` module), ShiftRows is a fixed bit permutation inside each lane,
//! MixColumns is a handful of XORs of nibble-rotated lanes, and AddRoundKey
//! is a plain XOR of two sliced states.
//!
//! # Features
//!
//! - Supports AES-128, AES-192, and AES-256 key sizes.
//! - Precomputed key schedules through the [`Aes128`], [`Aes192`] and
//!   [`Aes256`] cipher contexts, which can be reused for any number of
//!   blocks and shared freely between threads.
//! - One-shot helpers [`aes_enc_block`] and [`aes_dec_block`] that accept
//!   the key as a slice and select the variant from its length.
//!
//! # Usage
//!
//! This module handles the core operations of the AES algorithm but does not
//! include modes of operation like ECB, CBC, etc. Users of this module need
//! to handle padding, chaining, and other aspects relevant to their specific
//! use case. Zeroization of expanded key material is likewise left to the
//! caller.
//!
//! # Examples
//!
//! Basic usage for encrypting and decrypting a single block with AES-128,
//! using the test vector from FIPS 197, Appendix C.1:
//!
//! ```
//! use sliced_aes::aes::{Aes128, AES_128_KEY_SIZE, AES_BLOCK_SIZE};
//!
//! let key: [u8; AES_128_KEY_SIZE] = [
//!     0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0a, 0x0b, 0x0c, 0x0d,
//!     0x0e, 0x0f,
//! ];
//! let plaintext: [u8; AES_BLOCK_SIZE] = [
//!     0x00, 0x11, 0x22, 0x33, 0x44, 0x55, 0x66, 0x77, 0x88, 0x99, 0xaa, 0xbb, 0xcc, 0xdd,
//!     0xee, 0xff,
//! ];
//! let expected_ciphertext: [u8; AES_BLOCK_SIZE] = [
//!     0x69, 0xc4, 0xe0, 0xd8, 0x6a, 0x7b, 0x04, 0x30, 0xd8, 0xcd, 0xb7, 0x80, 0x70, 0xb4,
//!     0xc5, 0x5a,
//! ];
//!
//! let cipher = Aes128::new(&key);
//! let ciphertext = cipher.encrypt_block(&plaintext);
//! assert_eq!(ciphertext, expected_ciphertext);
//!
//! let decrypted = cipher.decrypt_block(&ciphertext);
//! assert_eq!(decrypted, plaintext);
//! ```

use super::sbox::{inv_sub_bytes, sub_bytes, sub_word};

use std::error::Error;

// AES block size is fixed at 16 bytes
pub const AES_BLOCK_SIZE: usize = 16;

/// AES key size constants define the key sizes used in the AES algorithm for
/// the three standard variations of AES.
pub const AES_128_KEY_SIZE: usize = 16;
pub const AES_192_KEY_SIZE: usize = 24;
pub const AES_256_KEY_SIZE: usize = 32;

// Round counts for the three key sizes.
const AES_128_ROUNDS: usize = 10;
const AES_192_ROUNDS: usize = 12;
const AES_256_ROUNDS: usize = 14;

// Largest schedule, 15 round keys for AES-256.
const MAX_ROUND_KEYS: usize = AES_256_ROUNDS + 1;

/// A 128-bit AES state in bit-sliced form.
///
/// Lane `b` of `slice` holds bit `b` of each of the 16 state bytes; bit
/// position `r * 4 + c` within a lane corresponds to the byte at row `r`,
/// column `c`. `slice[0]` carries the least significant bit of every byte,
/// `slice[7]` the most significant.
#[derive(Clone, Copy, Default, PartialEq, Eq)]
pub(super) struct AesState {
    pub(super) slice: [u16; 8],
}

impl AesState {
    /// Pack four big-endian 32-bit words, one per column, into sliced form.
    fn from_words(words: [u32; 4]) -> Self {
        let mut slice = [0u16; 8];
        for (c, word) in words.iter().enumerate() {
            let mut w = *word;
            for r in 0..4 {
                let mut v = (w >> 24) as u8;
                w <<= 8;
                for lane in slice.iter_mut() {
                    *lane |= u16::from(v & 1) << (r * 4 + c);
                    v >>= 1;
                }
            }
        }
        AesState { slice }
    }

    /// Load a 16-byte block into sliced form. The block is read as four
    /// big-endian words, one per state column.
    pub(super) fn from_bytes(block: &[u8; AES_BLOCK_SIZE]) -> Self {
        let mut words = [0u32; 4];
        for (i, word) in words.iter_mut().enumerate() {
            *word = u32::from(block[4 * i]) << 24
                | u32::from(block[4 * i + 1]) << 16
                | u32::from(block[4 * i + 2]) << 8
                | u32::from(block[4 * i + 3]);
        }
        Self::from_words(words)
    }

    /// Convert the sliced state back into 16 bytes. Exact inverse of
    /// [`AesState::from_bytes`].
    pub(super) fn to_bytes(self) -> [u8; AES_BLOCK_SIZE] {
        let mut block = [0u8; AES_BLOCK_SIZE];
        for c in 0..4 {
            for r in 0..4 {
                let mut v = 0u8;
                for (b, lane) in self.slice.iter().enumerate() {
                    v |= (((lane >> (r * 4 + c)) & 1) as u8) << b;
                }
                block[c * 4 + r] = v;
            }
        }
        block
    }
}

/// XOR a round key into the state.
///
/// Shared by the cipher and its inverse. With both operands in sliced form
/// the whole transformation collapses to eight lane XORs.
pub(super) fn add_round_key(state: &mut AesState, round_key: &AesState) {
    for (s, k) in state.slice.iter_mut().zip(round_key.slice.iter()) {
        *s ^= k;
    }
}

/// Perform the ShiftRows transformation for AES encryption.
///
/// Row `r` of the state is rotated left by `r` columns. Because the four
/// bits of row `r` sit at positions `r * 4 .. r * 4 + 3` of every lane, the
/// whole transformation is a fixed mask-and-shift permutation applied to
/// each lane independently.
pub(super) fn shift_rows(state: &mut AesState) {
    for lane in state.slice.iter_mut() {
        let v = *lane;
        *lane = (v & 0x000f)
            | (v & 0x0010) << 3
            | (v & 0x00e0) >> 1
            | (v & 0x0300) << 2
            | (v & 0x0c00) >> 2
            | (v & 0x7000) << 1
            | (v & 0x8000) >> 3;
    }
}

/// Perform the InvShiftRows transformation for AES decryption.
///
/// Rotates row `r` right by `r` columns, undoing [`shift_rows`].
pub(super) fn inv_shift_rows(state: &mut AesState) {
    for lane in state.slice.iter_mut() {
        let v = *lane;
        *lane = (v & 0x000f)
            | (v & 0x0070) << 1
            | (v & 0x0080) >> 3
            | (v & 0x0300) << 2
            | (v & 0x0c00) >> 2
            | (v & 0x1000) << 3
            | (v & 0xe000) >> 1;
    }
}

/// Rotate a lane by `b` column positions in all four rows at once.
fn rot(x: u16, b: u32) -> u16 {
    x.rotate_right(4 * b)
}

/// Perform the MixColumns transformation for AES encryption.
///
/// Each output byte is `b(r,c) = 02*a(r,c) + 03*a(r+1,c) + a(r+2,c) +
/// a(r+3,c)` in GF(2^8) with the AES reduction polynomial. Stepping to the
/// next row is a one-column lane rotation, and multiplication by 02 moves
/// each bit up one slice with the reduction folded into the fixed XOR
/// pattern below, so the whole transformation is eight XOR equations over
/// rotated lanes.
pub(super) fn mix_columns(state: &mut AesState) {
    let mut a01 = [0u16; 8];
    let mut a123 = [0u16; 8];
    for (i, &a) in state.slice.iter().enumerate() {
        a01[i] = a ^ rot(a, 1);
        a123[i] = rot(a01[i], 1) ^ rot(a, 3);
    }

    state.slice[0] = a01[7] ^ a123[0];
    state.slice[1] = a01[7] ^ a01[0] ^ a123[1];
    state.slice[2] = a01[1] ^ a123[2];
    state.slice[3] = a01[7] ^ a01[2] ^ a123[3];
    state.slice[4] = a01[7] ^ a01[3] ^ a123[4];
    state.slice[5] = a01[4] ^ a123[5];
    state.slice[6] = a01[5] ^ a123[6];
    state.slice[7] = a01[6] ^ a123[7];
}

/// Perform the InvMixColumns transformation for AES decryption.
///
/// The inverse matrix multipliers 0e/0b/0d/09 are decomposed as
///
/// ```text
/// b(r,c) = 08 * (a(r,c) + a(r+1,c) + a(r+2,c) + a(r+3,c)) +
///          04 * (a(r,c) + a(r+2,c)) +
///          02 * (a(r,c) + a(r+1,c)) +
///          01 * (a(r+1,c) + a(r+2,c) + a(r+3,c))
/// ```
///
/// which turns into the fixed XOR system below once the row sums are formed
/// from rotated lanes.
pub(super) fn inv_mix_columns(state: &mut AesState) {
    let mut a01 = [0u16; 8];
    let mut a12 = [0u16; 8];
    let mut a123 = [0u16; 8];
    let mut a0123 = [0u16; 8];
    let mut a02 = [0u16; 8];
    for (i, &a) in state.slice.iter().enumerate() {
        a01[i] = a ^ rot(a, 1);
        a12[i] = rot(a01[i], 1);
        a123[i] = a12[i] ^ rot(a, 3);
        a0123[i] = a ^ a123[i];
        a02[i] = a01[i] ^ a12[i];
    }

    state.slice[0] = a123[0] ^ a01[7] ^ a02[6] ^ a0123[5];
    state.slice[1] = a123[1] ^ a01[0] ^ a12[7] ^ a02[6] ^ a0123[5] ^ a0123[6];
    state.slice[2] = a123[2] ^ a01[1] ^ a02[0] ^ a02[7] ^ a0123[6] ^ a0123[7];
    state.slice[3] =
        a123[3] ^ a01[2] ^ a01[7] ^ a02[1] ^ a02[6] ^ a0123[0] ^ a0123[5] ^ a0123[7];
    state.slice[4] =
        a123[4] ^ a01[3] ^ a12[7] ^ a02[2] ^ a02[6] ^ a0123[1] ^ a0123[5] ^ a0123[6];
    state.slice[5] = a123[5] ^ a01[4] ^ a02[3] ^ a02[7] ^ a0123[2] ^ a0123[6] ^ a0123[7];
    state.slice[6] = a123[6] ^ a01[5] ^ a02[4] ^ a0123[3] ^ a0123[7];
    state.slice[7] = a123[7] ^ a01[6] ^ a02[5] ^ a0123[4];
}

/// Expand an AES key into a schedule of sliced round keys.
///
/// This function takes an initial key and expands it into a series of round
/// keys, one per output slot of `rounds`, which must hold `nr + 1` entries
/// for an `nr`-round variant. The schedule is produced through an 8-entry
/// ring buffer of the most recent key words; 8 is the smallest window that
/// serves all of `nk` = 4, 6 and 8 while keeping the indexing branch-free.
/// Every time four consecutive words have been produced they are packed into
/// the next sliced round key with the same big-endian column load used for
/// blocks.
///
/// The word transformation applies the S-box through the sliced circuit (see
/// [`sub_word`]) and steps the round constant with a masked `xtime`, so key
/// expansion is constant time like the cipher itself.
///
/// # Parameters
///
/// * `rounds`: Output slice of `nr + 1` round keys.
/// * `key`: The initial AES key, `4 * nk` bytes.
/// * `nk`: Length of the key in 32-bit words (4, 6 or 8).
fn expand_key(rounds: &mut [AesState], key: &[u8], nk: usize) {
    debug_assert_eq!(key.len(), 4 * nk);

    // The one-byte round constant.
    let mut rcon: u8 = 0x01;
    // Ring buffer of the last 8 round key words (4 are consumed per round).
    let mut rk = [0u32; 8];

    // The first nk words are taken from the key directly.
    for i in 0..nk {
        rk[i] = u32::from(key[4 * i]) << 24
            | u32::from(key[4 * i + 1]) << 16
            | u32::from(key[4 * i + 2]) << 8
            | u32::from(key[4 * i + 3]);
        if i & 3 == 3 {
            rounds[i / 4] = AesState::from_words([rk[i - 3], rk[i - 2], rk[i - 1], rk[i]]);
        }
    }

    for i in nk..4 * rounds.len() {
        // The previous round key word.
        let mut temp = rk[(i + 7) & 7];
        let pos = (i - nk) % nk;
        if pos == 0 {
            temp = sub_word(temp.rotate_left(8)) ^ (u32::from(rcon) << 24);
            // Next round constant: multiply by x modulo x^8 + x^4 + x^3 + x + 1,
            // with the reduction selected by mask rather than by branch.
            rcon = ((rcon >> 7).wrapping_neg() & 0x1b) ^ (rcon << 1);
        } else if nk > 6 && pos == 4 {
            temp = sub_word(temp);
        }
        rk[i & 7] = rk[(i + 8 - nk) & 7] ^ temp;
        if i & 3 == 3 {
            rounds[i / 4] = AesState::from_words([
                rk[(i + 5) & 7],
                rk[(i + 6) & 7],
                rk[(i + 7) & 7],
                rk[i & 7],
            ]);
        }
    }
}

/// Run the encryption rounds over one block.
///
/// `rounds` holds the full schedule; its length determines the number of
/// rounds, so the same driver serves all three key sizes.
fn encrypt_rounds(rounds: &[AesState], block: &[u8; AES_BLOCK_SIZE]) -> [u8; AES_BLOCK_SIZE] {
    let nr = rounds.len() - 1;
    let mut state = AesState::from_bytes(block);

    add_round_key(&mut state, &rounds[0]);

    for round_key in &rounds[1..nr] {
        sub_bytes(&mut state);
        shift_rows(&mut state);
        mix_columns(&mut state);
        add_round_key(&mut state, round_key);
    }

    // Final round (without mix_columns)
    sub_bytes(&mut state);
    shift_rows(&mut state);
    add_round_key(&mut state, &rounds[nr]);

    state.to_bytes()
}

/// Run the decryption rounds over one block.
///
/// This is the straight inverse cipher, not the Equivalent Inverse Cipher:
/// the inverse transforms are applied in reverse round-key order, which
/// lets encryption and decryption share a single key schedule.
fn decrypt_rounds(rounds: &[AesState], block: &[u8; AES_BLOCK_SIZE]) -> [u8; AES_BLOCK_SIZE] {
    let nr = rounds.len() - 1;
    let mut state = AesState::from_bytes(block);

    add_round_key(&mut state, &rounds[nr]);

    for round_key in rounds[1..nr].iter().rev() {
        inv_shift_rows(&mut state);
        inv_sub_bytes(&mut state);
        add_round_key(&mut state, round_key);
        inv_mix_columns(&mut state);
    }

    // Final round (without inv_mix_columns)
    inv_shift_rows(&mut state);
    inv_sub_bytes(&mut state);
    add_round_key(&mut state, &rounds[0]);

    state.to_bytes()
}

/// An AES-128 cipher context holding the 11 expanded round keys.
///
/// The context is immutable after construction; [`Aes128::encrypt_block`]
/// and [`Aes128::decrypt_block`] take `&self` and may be called concurrently
/// from any number of threads.
#[derive(Clone)]
pub struct Aes128 {
    rounds: [AesState; AES_128_ROUNDS + 1],
}

impl Aes128 {
    /// Expand a 128-bit key into a reusable cipher context.
    pub fn new(key: &[u8; AES_128_KEY_SIZE]) -> Self {
        let mut rounds = [AesState::default(); AES_128_ROUNDS + 1];
        expand_key(&mut rounds, key, AES_128_KEY_SIZE / 4);
        Aes128 { rounds }
    }

    /// Encrypt a single 16-byte block.
    pub fn encrypt_block(&self, block: &[u8; AES_BLOCK_SIZE]) -> [u8; AES_BLOCK_SIZE] {
        encrypt_rounds(&self.rounds, block)
    }

    /// Decrypt a single 16-byte block.
    pub fn decrypt_block(&self, block: &[u8; AES_BLOCK_SIZE]) -> [u8; AES_BLOCK_SIZE] {
        decrypt_rounds(&self.rounds, block)
    }
}

/// An AES-192 cipher context holding the 13 expanded round keys.
///
/// See [`Aes128`] for the usage and threading contract; only the key size
/// and round count differ.
#[derive(Clone)]
pub struct Aes192 {
    rounds: [AesState; AES_192_ROUNDS + 1],
}

impl Aes192 {
    /// Expand a 192-bit key into a reusable cipher context.
    pub fn new(key: &[u8; AES_192_KEY_SIZE]) -> Self {
        let mut rounds = [AesState::default(); AES_192_ROUNDS + 1];
        expand_key(&mut rounds, key, AES_192_KEY_SIZE / 4);
        Aes192 { rounds }
    }

    /// Encrypt a single 16-byte block.
    pub fn encrypt_block(&self, block: &[u8; AES_BLOCK_SIZE]) -> [u8; AES_BLOCK_SIZE] {
        encrypt_rounds(&self.rounds, block)
    }

    /// Decrypt a single 16-byte block.
    pub fn decrypt_block(&self, block: &[u8; AES_BLOCK_SIZE]) -> [u8; AES_BLOCK_SIZE] {
        decrypt_rounds(&self.rounds, block)
    }
}

/// An AES-256 cipher context holding the 15 expanded round keys.
///
/// See [`Aes128`] for the usage and threading contract; only the key size
/// and round count differ.
#[derive(Clone)]
pub struct Aes256 {
    rounds: [AesState; AES_256_ROUNDS + 1],
}

impl Aes256 {
    /// Expand a 256-bit key into a reusable cipher context.
    pub fn new(key: &[u8; AES_256_KEY_SIZE]) -> Self {
        let mut rounds = [AesState::default(); AES_256_ROUNDS + 1];
        expand_key(&mut rounds, key, AES_256_KEY_SIZE / 4);
        Aes256 { rounds }
    }

    /// Encrypt a single 16-byte block.
    pub fn encrypt_block(&self, block: &[u8; AES_BLOCK_SIZE]) -> [u8; AES_BLOCK_SIZE] {
        encrypt_rounds(&self.rounds, block)
    }

    /// Decrypt a single 16-byte block.
    pub fn decrypt_block(&self, block: &[u8; AES_BLOCK_SIZE]) -> [u8; AES_BLOCK_SIZE] {
        decrypt_rounds(&self.rounds, block)
    }
}

/// Map a key length in bytes to the pair `(nk, nr)`: the key length in
/// 32-bit words and the round count of the matching AES variant.
///
/// Only reached after the length has been validated, so an unexpected
/// length here is a bug in this module and panics rather than producing an
/// error value.
fn calculate_parameters(key_length_bytes: usize) -> (usize, usize) {
    let nk = key_length_bytes / 4;
    let nr = match nk {
        4 => AES_128_ROUNDS,
        6 => AES_192_ROUNDS,
        8 => AES_256_ROUNDS,
        _ => panic!("no AES variant takes a {}-byte key", key_length_bytes),
    };

    (nk, nr)
}

/// Check that a caller-supplied key slice has one of the three AES key
/// lengths.
///
/// 16, 24 and 32 bytes select AES-128, AES-192 and AES-256; every other
/// length is reported as an invalid-input error so the slice-based entry
/// points can refuse it before touching the key material.
fn validate_key_len(key_len: usize) -> Result<(), Box<dyn Error>> {
    match key_len {
        AES_128_KEY_SIZE | AES_192_KEY_SIZE | AES_256_KEY_SIZE => Ok(()),
        _ => Err(Box::new(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            format!(
                "AES key must be 16, 24 or 32 bytes, got {} bytes",
                key_len,
            ),
        ))),
    }
}

/// Encrypt one 16-byte block with a key given as a slice.
///
/// The AES variant is chosen from the slice length: 16 bytes runs AES-128,
/// 24 bytes AES-192 and 32 bytes AES-256. Any other length is rejected
/// without processing the block. The key schedule is rebuilt on every call,
/// so the cipher contexts ([`Aes128`] and friends) are the better fit when
/// several blocks share one key.
///
/// # Returns
///
/// * `Ok([u8; AES_BLOCK_SIZE])` - The ciphertext block.
/// * `Err(Box<dyn Error>)` - If the key slice has no matching AES variant.
pub fn aes_enc_block(
    block: &[u8; AES_BLOCK_SIZE],
    key: &[u8],
) -> Result<[u8; AES_BLOCK_SIZE], Box<dyn Error>> {
    validate_key_len(key.len())?;

    let (nk, nr) = calculate_parameters(key.len());

    let mut rounds = [AesState::default(); MAX_ROUND_KEYS];
    expand_key(&mut rounds[..nr + 1], key, nk);

    Ok(encrypt_rounds(&rounds[..nr + 1], block))
}

/// Decrypt one 16-byte block with a key given as a slice.
///
/// Mirror of [`aes_enc_block`]: the slice length picks the AES variant,
/// unsupported lengths are rejected, and the schedule is rebuilt per call,
/// so repeated decryptions under one key are better served by the cipher
/// contexts.
///
/// # Returns
///
/// * `Ok([u8; AES_BLOCK_SIZE])` - The recovered plaintext block.
/// * `Err(Box<dyn Error>)` - If the key slice has no matching AES variant.
pub fn aes_dec_block(
    block: &[u8; AES_BLOCK_SIZE],
    key: &[u8],
) -> Result<[u8; AES_BLOCK_SIZE], Box<dyn Error>> {
    validate_key_len(key.len())?;

    let (nk, nr) = calculate_parameters(key.len());

    let mut rounds = [AesState::default(); MAX_ROUND_KEYS];
    expand_key(&mut rounds[..nr + 1], key, nk);

    Ok(decrypt_rounds(&rounds[..nr + 1], block))
}
