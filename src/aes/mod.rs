mod aes_core;
mod sbox;

pub use aes_core::*;

#[cfg(test)]
mod tests;
