//! Randomized round-trip and implementation-equivalence sweep.

use cube96_core::{Block, CubeCipher, Impl, BLOCK_BYTES, KEY_BYTES};
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;

const DEFAULT_ITERATIONS: usize = 1_000;

/// Sample count, overridable through `CUBE96_TEST_ITERATIONS` when chasing a
/// discrepancy locally.
fn configured_iterations() -> usize {
    match std::env::var("CUBE96_TEST_ITERATIONS") {
        Ok(raw) => match raw.parse::<usize>() {
            Ok(n) if n > 0 => n,
            _ => {
                eprintln!(
                    "warning: CUBE96_TEST_ITERATIONS={raw:?} is not a positive integer; \
                     using {DEFAULT_ITERATIONS}"
                );
                DEFAULT_ITERATIONS
            }
        },
        Err(_) => DEFAULT_ITERATIONS,
    }
}

fn available_impls() -> Vec<Impl> {
    let mut impls = Vec::new();
    if CubeCipher::has_fast_impl() {
        impls.push(Impl::Fast);
    }
    if CubeCipher::has_hardened_impl() {
        impls.push(Impl::Hardened);
    }
    impls
}

#[test]
fn random_blocks_round_trip_and_impls_agree() {
    let impls = available_impls();
    assert!(!impls.is_empty());

    let mut rng = ChaCha20Rng::from_seed([0xC0; 32]);
    let mut key = [0u8; KEY_BYTES];
    let mut plain: Block = [0; BLOCK_BYTES];

    for iteration in 0..configured_iterations() {
        rng.fill_bytes(&mut key);
        rng.fill_bytes(&mut plain);

        let mut baseline: Option<Block> = None;
        for &impl_choice in &impls {
            let mut cipher = CubeCipher::new(impl_choice).expect("impl available");
            cipher.set_key(&key);

            let cipher_text = cipher.encrypt_block(&plain);
            match baseline {
                None => baseline = Some(cipher_text),
                Some(expected) => assert_eq!(
                    cipher_text, expected,
                    "implementation mismatch at iteration {iteration}"
                ),
            }

            assert_eq!(
                cipher.decrypt_block(&cipher_text),
                plain,
                "round-trip mismatch at iteration {iteration} for {impl_choice:?}"
            );
        }
    }
}
