//! Empirical linear bias estimation over partial encryptions.

use cube96_core::kdf::{derive_material, DerivedMaterial};
use cube96_core::perm::{apply_permutation, round_permutation, Permutation};
use cube96_core::sbox::AES_SBOX;
use cube96_core::state::xor_in_place;
use cube96_core::{Block, BLOCK_BYTES, KEY_BYTES};
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;

use crate::tables::parity;
use crate::MAX_ANALYSIS_ROUNDS;

/// Parity of `value & mask` across the whole block.
pub fn masked_parity(value: &Block, mask: &Block) -> u8 {
    let mut acc = 0u8;
    for (v, m) in value.iter().zip(mask.iter()) {
        acc ^= parity(v & m);
    }
    acc
}

/// Runs the first `rounds` rounds of the cipher (no post-whitening), using
/// material and permutations the caller derived once.
pub fn partial_encrypt(
    material: &DerivedMaterial,
    perms: &[Permutation],
    block: &Block,
    rounds: usize,
) -> Block {
    let mut state = *block;
    let mut scratch = [0u8; BLOCK_BYTES];
    for round in 0..rounds {
        xor_in_place(&mut state, &material.round_keys[round]);
        for byte in state.iter_mut() {
            *byte = AES_SBOX[*byte as usize];
        }
        apply_permutation(&perms[round], &state, &mut scratch);
        core::mem::swap(&mut state, &mut scratch);
    }
    state
}

/// Correlation measured by [`estimate_linear_bias`].
#[derive(Clone, Copy, Debug)]
pub struct BiasEstimate {
    /// Mean of the +/-1 parity agreement indicator.
    pub correlation: f64,
    /// `correlation / 2`.
    pub bias: f64,
    /// Number of random plaintexts sampled.
    pub samples: usize,
}

/// Estimates the correlation of the linear approximation
/// `parity(mask_in . plaintext) = parity(mask_out . state)` after `rounds`
/// rounds under a fixed key, from `samples` seeded random plaintexts.
///
/// # Panics
/// Panics if `rounds` is outside `1..=4` or `samples` is zero.
pub fn estimate_linear_bias(
    key: &[u8; KEY_BYTES],
    mask_in: &Block,
    mask_out: &Block,
    rounds: usize,
    samples: usize,
    seed: u64,
) -> BiasEstimate {
    assert!(
        (1..=MAX_ANALYSIS_ROUNDS).contains(&rounds),
        "rounds must be in 1..=4"
    );
    assert!(samples > 0, "at least one sample is required");

    let material = derive_material(key);
    let perms: Vec<Permutation> = material.perm_seeds.iter().map(round_permutation).collect();

    let mut rng = ChaCha20Rng::seed_from_u64(seed);
    let mut plain: Block = [0; BLOCK_BYTES];
    let mut accumulator: i64 = 0;
    for _ in 0..samples {
        rng.fill_bytes(&mut plain);
        let state = partial_encrypt(&material, &perms, &plain, rounds);
        let agree = masked_parity(&plain, mask_in) == masked_parity(&state, mask_out);
        accumulator += if agree { 1 } else { -1 };
    }

    let correlation = accumulator as f64 / samples as f64;
    BiasEstimate {
        correlation,
        bias: correlation / 2.0,
        samples,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn masked_parity_counts_selected_bits() {
        let value: Block = [0xFF; BLOCK_BYTES];
        let mut mask: Block = [0; BLOCK_BYTES];
        assert_eq!(masked_parity(&value, &mask), 0);
        mask[0] = 0x01;
        assert_eq!(masked_parity(&value, &mask), 1);
        mask[11] = 0x03;
        assert_eq!(masked_parity(&value, &mask), 1);
    }

    #[test]
    fn partial_encrypt_of_zero_rounds_is_identity() {
        let material = derive_material(&[1u8; KEY_BYTES]);
        let perms: Vec<Permutation> =
            material.perm_seeds.iter().map(round_permutation).collect();
        let block: Block = [0x5A; BLOCK_BYTES];
        assert_eq!(partial_encrypt(&material, &perms, &block, 0), block);
    }

    #[test]
    fn estimates_are_deterministic_for_a_seed() {
        let key = [3u8; KEY_BYTES];
        let mut mask = [0u8; BLOCK_BYTES];
        mask[0] = 0x01;
        let first = estimate_linear_bias(&key, &mask, &mask, 2, 2_048, 17);
        let second = estimate_linear_bias(&key, &mask, &mask, 2, 2_048, 17);
        assert_eq!(first.correlation, second.correlation);
        assert_eq!(first.samples, 2_048);
    }

    #[test]
    fn correlation_stays_in_range() {
        let key = [9u8; KEY_BYTES];
        let mut mask_in = [0u8; BLOCK_BYTES];
        mask_in[0] = 0x80;
        let mut mask_out = [0u8; BLOCK_BYTES];
        mask_out[5] = 0x10;
        let estimate = estimate_linear_bias(&key, &mask_in, &mask_out, 3, 4_096, 99);
        assert!(estimate.correlation.abs() <= 1.0);
        assert!(estimate.bias.abs() <= 0.5);
        assert_eq!(estimate.bias, estimate.correlation / 2.0);
    }
}
