//! The Cube96 round engine.
//!
//! Eight rounds of AddRoundKey, byte-wise SubBytes, and a key-dependent bit
//! permutation, followed by a post-whitening XOR. The `Fast` path uses the
//! S-box tables and the branching bit mover; the `Hardened` path substitutes
//! the bitsliced S-box and masked-merge permutation so no secret byte selects
//! a branch or a memory address. Both paths produce identical ciphertexts.

use core::mem;

use crate::error::CubeError;
use crate::kdf::derive_material;
use crate::perm::{
    apply_permutation, apply_permutation_ct, identity_permutation, invert, round_permutation,
    Permutation,
};
use crate::sbox::{inv_sub_bytes, inv_sub_bytes_ct, sub_bytes, sub_bytes_ct};
use crate::state::{xor_in_place, Block, RoundKey, BLOCK_BYTES, KEY_BYTES, ROUND_COUNT};

/// Implementation selected at construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Impl {
    /// Table S-box and branching bit placement.
    Fast,
    /// Bitsliced S-box and constant-time bit placement.
    Hardened,
}

/// Implementation used when the caller has no preference.
pub const DEFAULT_IMPL: Impl =
    if cfg!(any(feature = "force-constant-time", feature = "disable-fast-impl")) {
        Impl::Hardened
    } else {
        Impl::Fast
    };

/// Single-block Cube96 cipher.
///
/// Construct with an implementation choice, install a key once with
/// [`set_key`](Self::set_key), then encrypt and decrypt freely: a keyed
/// cipher is immutable and block operations are total. All derived material
/// (round keys, both permutation directions, post-whitening) is cached at
/// key install.
#[derive(Clone)]
pub struct CubeCipher {
    round_keys: [RoundKey; ROUND_COUNT],
    post_whitening: RoundKey,
    perms: [Permutation; ROUND_COUNT],
    inv_perms: [Permutation; ROUND_COUNT],
    mode: Impl,
}

impl CubeCipher {
    /// Creates a cipher with the requested implementation.
    ///
    /// Under `disable-fast-impl` a `Fast` request fails with
    /// [`CubeError::FastImplDisabled`]; under `force-constant-time` it is
    /// silently coerced to `Hardened`. No key is installed yet; call
    /// [`set_key`](Self::set_key) before any block operation.
    pub fn new(requested: Impl) -> Result<Self, CubeError> {
        let mode = match requested {
            Impl::Fast if cfg!(feature = "disable-fast-impl") => {
                return Err(CubeError::FastImplDisabled)
            }
            Impl::Fast if cfg!(feature = "force-constant-time") => Impl::Hardened,
            other => other,
        };
        let identity = identity_permutation();
        Ok(Self {
            round_keys: [[0; BLOCK_BYTES]; ROUND_COUNT],
            post_whitening: [0; BLOCK_BYTES],
            perms: [identity; ROUND_COUNT],
            inv_perms: [identity; ROUND_COUNT],
            mode,
        })
    }

    /// Whether a `Fast` request actually runs the table-based path in this
    /// build.
    pub fn has_fast_impl() -> bool {
        cfg!(not(any(feature = "disable-fast-impl", feature = "force-constant-time")))
    }

    /// The hardened path is always compiled in.
    pub fn has_hardened_impl() -> bool {
        true
    }

    /// The implementation this cipher dispatches to.
    pub fn mode(&self) -> Impl {
        self.mode
    }

    /// Derives and caches all key material. Infallible for any 12-byte key.
    pub fn set_key(&mut self, key: &[u8; KEY_BYTES]) {
        let material = derive_material(key);
        self.round_keys = material.round_keys;
        self.post_whitening = material.post_whitening;
        for (round, seed) in material.perm_seeds.iter().enumerate() {
            let perm = round_permutation(seed);
            self.inv_perms[round] = invert(&perm);
            self.perms[round] = perm;
        }
    }

    /// Encrypts one block.
    pub fn encrypt_block(&self, block: &Block) -> Block {
        let mut state = *block;
        let mut scratch = [0u8; BLOCK_BYTES];

        for round in 0..ROUND_COUNT {
            xor_in_place(&mut state, &self.round_keys[round]);
            match self.mode {
                Impl::Fast => {
                    sub_bytes(&mut state);
                    apply_permutation(&self.perms[round], &state, &mut scratch);
                }
                Impl::Hardened => {
                    sub_bytes_ct(&mut state);
                    apply_permutation_ct(&self.perms[round], &state, &mut scratch);
                }
            }
            mem::swap(&mut state, &mut scratch);
        }

        xor_in_place(&mut state, &self.post_whitening);
        state
    }

    /// Decrypts one block, reversing the round structure exactly.
    pub fn decrypt_block(&self, block: &Block) -> Block {
        let mut state = *block;
        let mut scratch = [0u8; BLOCK_BYTES];

        xor_in_place(&mut state, &self.post_whitening);

        for round in (0..ROUND_COUNT).rev() {
            match self.mode {
                Impl::Fast => {
                    apply_permutation(&self.inv_perms[round], &state, &mut scratch);
                    mem::swap(&mut state, &mut scratch);
                    inv_sub_bytes(&mut state);
                }
                Impl::Hardened => {
                    apply_permutation_ct(&self.inv_perms[round], &state, &mut scratch);
                    mem::swap(&mut state, &mut scratch);
                    inv_sub_bytes_ct(&mut state);
                }
            }
            xor_in_place(&mut state, &self.round_keys[round]);
        }

        state
    }

    /// Forward permutation cached for the given round. Exposed for the
    /// analysis kernels, which walk rounds manually.
    pub fn round_perm(&self, round: usize) -> &Permutation {
        &self.perms[round]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keyed(mode: Impl) -> CubeCipher {
        let mut cipher = CubeCipher::new(mode).expect("mode available");
        let key: [u8; KEY_BYTES] = core::array::from_fn(|i| (i as u8).wrapping_mul(17));
        cipher.set_key(&key);
        cipher
    }

    #[cfg(not(feature = "disable-fast-impl"))]
    #[test]
    fn encrypt_then_decrypt_recovers_plaintext() {
        let cipher = keyed(Impl::Fast);
        let plain: Block = *b"cube96 block";
        let cipher_text = cipher.encrypt_block(&plain);
        assert_ne!(cipher_text, plain);
        assert_eq!(cipher.decrypt_block(&cipher_text), plain);
    }

    #[cfg(all(not(feature = "disable-fast-impl"), not(feature = "force-constant-time")))]
    #[test]
    fn fast_and_hardened_agree() {
        let fast = keyed(Impl::Fast);
        let hardened = keyed(Impl::Hardened);
        for byte in [0x00u8, 0x01, 0x7f, 0xff] {
            let block = [byte; BLOCK_BYTES];
            let ct_fast = fast.encrypt_block(&block);
            assert_eq!(ct_fast, hardened.encrypt_block(&block));
            assert_eq!(fast.decrypt_block(&ct_fast), hardened.decrypt_block(&ct_fast));
        }
    }

    #[test]
    fn hardened_round_trips() {
        let cipher = keyed(Impl::Hardened);
        let plain = [0xa5; BLOCK_BYTES];
        assert_eq!(cipher.decrypt_block(&cipher.encrypt_block(&plain)), plain);
    }

    #[cfg(feature = "disable-fast-impl")]
    #[test]
    fn fast_requests_are_rejected_when_disabled() {
        assert!(matches!(
            CubeCipher::new(Impl::Fast),
            Err(CubeError::FastImplDisabled)
        ));
        assert!(!CubeCipher::has_fast_impl());
    }

    #[test]
    fn hardened_is_always_available() {
        assert!(CubeCipher::has_hardened_impl());
        assert!(CubeCipher::new(Impl::Hardened).is_ok());
    }

    #[test]
    fn round_permutations_are_key_dependent() {
        let a = keyed(Impl::Hardened);
        let mut b = CubeCipher::new(Impl::Hardened).unwrap();
        b.set_key(&[0u8; KEY_BYTES]);
        assert_ne!(a.round_perm(0), b.round_perm(0));
    }
}
