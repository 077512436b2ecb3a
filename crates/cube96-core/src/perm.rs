//! Key-driven bit permutation layer.
//!
//! A fixed alphabet of 36 primitive permutations models Rubik-style moves on
//! the 4×4×6 cube: face rotations of each z-slice, row/column cycles inside
//! the first four slices, and whole-cube z-shifts along fixed x or y
//! coordinates. Each round's permutation is assembled by composing twelve
//! primitives drawn from a SplitMix64 stream seeded with that round's
//! 8-byte key-schedule seed.

use std::sync::OnceLock;

use crate::kdf::PERM_SEED_BYTES;
use crate::state::{
    bit_offset_in_byte, byte_index_of_bit, get_bit, idx_of, set_bit, Block, PERM_SIZE,
};

/// Bijection on bit indices, stored as `P[src] = dst`.
pub type Permutation = [u8; PERM_SIZE];

/// Size of the primitive alphabet.
pub const PRIMITIVE_COUNT: usize = 36;

/// Primitives composed into each round permutation.
pub const DRAWS_PER_ROUND: usize = 12;

/// SplitMix64 stream in the Steele-Lea formulation.
pub struct SplitMix64 {
    state: u64,
}

impl SplitMix64 {
    /// Seeds the stream.
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    /// Advances the stream and returns the next output.
    pub fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }
}

/// The permutation mapping every bit to itself.
pub fn identity_permutation() -> Permutation {
    let mut p = [0u8; PERM_SIZE];
    for (i, slot) in p.iter_mut().enumerate() {
        *slot = i as u8;
    }
    p
}

/// Composes two permutations: apply `accum`, then `step`.
pub fn compose(accum: &Permutation, step: &Permutation) -> Permutation {
    let mut out = [0u8; PERM_SIZE];
    for (slot, &mid) in out.iter_mut().zip(accum.iter()) {
        *slot = step[mid as usize];
    }
    out
}

/// Inverts a permutation, so `invert(p)[p[i]] == i`.
pub fn invert(p: &Permutation) -> Permutation {
    let mut inv = [0u8; PERM_SIZE];
    for (src, &dst) in p.iter().enumerate() {
        inv[dst as usize] = src as u8;
    }
    inv
}

/// Moves every input bit to its destination index.
pub fn apply_permutation(p: &Permutation, input: &Block, output: &mut Block) {
    output.fill(0);
    for src in 0..PERM_SIZE {
        set_bit(output, p[src] as usize, get_bit(input, src));
    }
}

/// Constant-time permutation application.
///
/// The traversal and the byte/offset arithmetic depend only on public
/// permutation indices; each destination write is a branch-free masked
/// merge so the secret bit values never select a branch.
pub fn apply_permutation_ct(p: &Permutation, input: &Block, output: &mut Block) {
    output.fill(0);
    for src in 0..PERM_SIZE {
        let bit = (input[byte_index_of_bit(src)] >> bit_offset_in_byte(src)) & 1;
        let dst = p[src] as usize;
        ct_write_bit(output, byte_index_of_bit(dst), bit_offset_in_byte(dst), bit);
    }
}

#[inline]
fn ct_write_bit(state: &mut Block, byte_index: usize, bit_pos: u32, bit: u8) {
    let bit_mask = 1u8 << bit_pos;
    let value_mask = 0u8.wrapping_sub(bit & 1);
    state[byte_index] = (state[byte_index] & !bit_mask) | (value_mask & bit_mask);
}

/// Builds one primitive from a total coordinate map.
fn cube_move<F>(map: F) -> Permutation
where
    F: Fn(usize, usize, usize) -> (usize, usize, usize),
{
    let mut p = [0u8; PERM_SIZE];
    for z in 0..6 {
        for y in 0..4 {
            for x in 0..4 {
                let (nx, ny, nz) = map(x, y, z);
                p[idx_of(x, y, z)] = idx_of(nx, ny, nz) as u8;
            }
        }
    }
    p
}

// Primitive index layout:
//   0..17  face rotations of slice z = 0..5, each as CW 90, CCW 90, 180.
//  18..29  in-slice cycles for z = 0..3: row up, row down, column right.
//  30..35  whole-cube z-shifts for x = 0, 1, 2 then y = 0, 1, 2.
fn build_primitives() -> [Permutation; PRIMITIVE_COUNT] {
    let mut primitives = [[0u8; PERM_SIZE]; PRIMITIVE_COUNT];
    let mut index = 0;

    for slice in 0..6 {
        primitives[index] =
            cube_move(|x, y, z| if z == slice { (3 - y, x, z) } else { (x, y, z) });
        primitives[index + 1] =
            cube_move(|x, y, z| if z == slice { (y, 3 - x, z) } else { (x, y, z) });
        primitives[index + 2] =
            cube_move(|x, y, z| if z == slice { (3 - x, 3 - y, z) } else { (x, y, z) });
        index += 3;
    }

    for slice in 0..4 {
        primitives[index] =
            cube_move(|x, y, z| if z == slice { (x, (y + 1) & 3, z) } else { (x, y, z) });
        primitives[index + 1] =
            cube_move(|x, y, z| if z == slice { (x, (y + 3) & 3, z) } else { (x, y, z) });
        primitives[index + 2] =
            cube_move(|x, y, z| if z == slice { ((x + 1) & 3, y, z) } else { (x, y, z) });
        index += 3;
    }

    for fixed_x in 0..3 {
        primitives[index] =
            cube_move(|x, y, z| if x == fixed_x { (x, y, (z + 1) % 6) } else { (x, y, z) });
        index += 1;
    }
    for fixed_y in 0..3 {
        primitives[index] =
            cube_move(|x, y, z| if y == fixed_y { (x, y, (z + 1) % 6) } else { (x, y, z) });
        index += 1;
    }

    debug_assert_eq!(index, PRIMITIVE_COUNT);
    primitives
}

/// The shared, immutable primitive alphabet.
pub fn primitive_set() -> &'static [Permutation; PRIMITIVE_COUNT] {
    static PRIMITIVES: OnceLock<[Permutation; PRIMITIVE_COUNT]> = OnceLock::new();
    PRIMITIVES.get_or_init(build_primitives)
}

/// Assembles the permutation for one round from its 8-byte seed.
///
/// Exactly twelve draws; each index is the raw draw reduced mod 36. The
/// reduction keeps the documented modulo bias, which the known-answer
/// vectors depend on.
pub fn round_permutation(seed: &[u8; PERM_SEED_BYTES]) -> Permutation {
    let primitives = primitive_set();
    let mut prng = SplitMix64::new(u64::from_be_bytes(*seed));
    let mut perm = identity_permutation();
    for _ in 0..DRAWS_PER_ROUND {
        let pick = (prng.next_u64() % PRIMITIVE_COUNT as u64) as usize;
        perm = compose(&perm, &primitives[pick]);
    }
    perm
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{RngCore, SeedableRng};
    use rand_chacha::ChaCha20Rng;

    fn is_bijection(p: &Permutation) -> bool {
        let mut seen = [false; PERM_SIZE];
        for &dst in p.iter() {
            if (dst as usize) >= PERM_SIZE || seen[dst as usize] {
                return false;
            }
            seen[dst as usize] = true;
        }
        true
    }

    #[test]
    fn splitmix_reference_sequence() {
        let mut prng = SplitMix64::new(0);
        assert_eq!(prng.next_u64(), 0xe220_a839_7b1d_cdaf);
        assert_eq!(prng.next_u64(), 0x6e78_9e6a_a1b9_65f4);
        assert_eq!(prng.next_u64(), 0x06c4_5d18_8009_454f);
    }

    #[test]
    fn all_primitives_are_bijections() {
        for (index, primitive) in primitive_set().iter().enumerate() {
            assert!(is_bijection(primitive), "primitive {index}");
        }
    }

    #[test]
    fn face_rotations_invert_and_halve_as_expected() {
        let primitives = primitive_set();
        let identity = identity_permutation();
        for slice in 0..6 {
            let cw = &primitives[3 * slice];
            let ccw = &primitives[3 * slice + 1];
            let half = &primitives[3 * slice + 2];
            assert_eq!(compose(cw, ccw), identity, "slice {slice}");
            assert_eq!(compose(half, half), identity, "slice {slice}");
            assert_eq!(compose(cw, cw), *half, "slice {slice}");
        }
    }

    #[test]
    fn row_cycles_are_mutual_inverses() {
        let primitives = primitive_set();
        let identity = identity_permutation();
        for slice in 0..4 {
            let up = &primitives[18 + 3 * slice];
            let down = &primitives[18 + 3 * slice + 1];
            assert_eq!(compose(up, down), identity, "slice {slice}");
        }
    }

    #[test]
    fn z_shifts_have_period_six() {
        let primitives = primitive_set();
        let identity = identity_permutation();
        for shift in &primitives[30..36] {
            let mut accum = identity_permutation();
            for _ in 0..6 {
                accum = compose(&accum, shift);
            }
            assert_eq!(accum, identity);
        }
    }

    #[test]
    fn invert_round_trips_round_permutations() {
        for round in 0..8u8 {
            let seed = [round; PERM_SEED_BYTES];
            let perm = round_permutation(&seed);
            assert!(is_bijection(&perm));
            let inv = invert(&perm);
            for i in 0..PERM_SIZE {
                assert_eq!(inv[perm[i] as usize] as usize, i);
            }
            assert_eq!(round_permutation(&seed), perm);
        }
    }

    #[test]
    fn fast_and_ct_application_agree() {
        let mut rng = ChaCha20Rng::from_seed([7u8; 32]);
        for trial in 0..64 {
            let mut seed = [0u8; PERM_SEED_BYTES];
            rng.fill_bytes(&mut seed);
            let perm = round_permutation(&seed);

            let mut input: Block = [0; 12];
            rng.fill_bytes(&mut input);
            let mut fast: Block = [0; 12];
            let mut hardened: Block = [0; 12];
            apply_permutation(&perm, &input, &mut fast);
            apply_permutation_ct(&perm, &input, &mut hardened);
            assert_eq!(fast, hardened, "trial {trial}");

            let mut recovered: Block = [0; 12];
            apply_permutation(&invert(&perm), &fast, &mut recovered);
            assert_eq!(recovered, input, "trial {trial}");
        }
    }
}
