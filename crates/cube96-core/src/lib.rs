//! Cube96 is a research-grade 96-bit block cipher whose state is a 4×4×6 cube
//! of bits. Each of the eight rounds XORs a round key, applies the AES S-box
//! byte-wise, and shuffles all 96 bits with a key-dependent permutation
//! assembled from Rubik-style face and slice moves.
//!
//! The crate provides:
//! - The cube state model and bit indexing ([`state`]).
//! - An HKDF-SHA-256 key schedule with fixed salt and info ([`kdf`]).
//! - The 36-primitive permutation alphabet and its algebra ([`perm`]).
//! - Table and bitsliced AES S-box forms ([`sbox`]).
//! - The [`CubeCipher`] round engine with `Fast` and `Hardened` dispatch.
//!
//! Cube96 exists so cryptanalysts can study a small SPN with a bit-permutation
//! diffusion layer. The 96-bit key is intentionally below secure margins; this
//! is NOT a production cipher.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod cipher;
mod error;
pub mod kdf;
pub mod perm;
pub mod sbox;
pub mod state;

pub use crate::cipher::{CubeCipher, Impl, DEFAULT_IMPL};
pub use crate::error::{parse_hex, CubeError};
pub use crate::state::{Block, RoundKey, BLOCK_BYTES, KEY_BYTES, PERM_SIZE, ROUND_COUNT};
