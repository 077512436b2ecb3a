//! Branch-and-bound search for the best differential trail.
//!
//! For every byte input difference the feasible S-box output differences are
//! precomputed with their weights (`-log2(count / 256)`), sorted by ascending
//! weight, and truncated to a branch limit. The search expands round states
//! byte by byte, applies the round's key-derived permutation between rounds,
//! and prunes any partial trail whose cumulative weight already reaches the
//! best complete trail found so far.

use cube96_core::kdf::derive_material;
use cube96_core::perm::{apply_permutation, round_permutation, Permutation};
use cube96_core::sbox::AES_SBOX;
use cube96_core::{Block, BLOCK_BYTES, KEY_BYTES};

use crate::MAX_ANALYSIS_ROUNDS;

/// Default cap on S-box transitions explored per active byte.
pub const DEFAULT_BRANCH_LIMIT: usize = 8;

/// One feasible S-box difference propagation.
#[derive(Clone, Copy, Debug)]
pub struct Transition {
    /// Output difference.
    pub output: u8,
    /// `-log2` of the propagation probability.
    pub weight: f64,
    /// DDT count behind the probability.
    pub count: u16,
}

/// Best trail found by [`search_best_trail`].
#[derive(Clone, Debug)]
pub struct TrailReport {
    /// Number of rounds searched.
    pub rounds: usize,
    /// Input difference at each round boundary; the final entry is the
    /// state after the last round's permutation.
    pub states: Vec<Block>,
    /// Cumulative trail weight.
    pub weight: f64,
    /// `2^(-weight)`.
    pub probability: f64,
}

/// Precomputes the per-byte transition lists, sorted by ascending weight and
/// truncated to `branch_limit` entries (at least one is always kept).
pub fn prepare_transitions(branch_limit: usize) -> Vec<Vec<Transition>> {
    let limit = branch_limit.max(1);
    let mut transitions = Vec::with_capacity(256);
    for dx in 0..256usize {
        if dx == 0 {
            transitions.push(vec![Transition {
                output: 0,
                weight: 0.0,
                count: 256,
            }]);
            continue;
        }
        let mut counts = [0u16; 256];
        for x in 0..256usize {
            counts[(AES_SBOX[x] ^ AES_SBOX[x ^ dx]) as usize] += 1;
        }
        let mut options: Vec<Transition> = counts
            .iter()
            .enumerate()
            .filter(|&(_, &count)| count > 0)
            .map(|(dy, &count)| Transition {
                output: dy as u8,
                weight: -(f64::from(count) / 256.0).log2(),
                count,
            })
            .collect();
        options.sort_by(|a, b| a.weight.total_cmp(&b.weight).then(a.output.cmp(&b.output)));
        options.truncate(limit);
        transitions.push(options);
    }
    transitions
}

struct SearchContext<'a> {
    rounds: usize,
    transitions: &'a [Vec<Transition>],
    perms: &'a [Permutation],
    working: Vec<Block>,
    best: Vec<Block>,
    best_weight: f64,
}

impl SearchContext<'_> {
    fn search_round(&mut self, round: usize, input: &Block, weight: f64) {
        self.working[round] = *input;
        if round == self.rounds {
            if weight < self.best_weight {
                self.best_weight = weight;
                self.best.copy_from_slice(&self.working);
            }
            return;
        }
        let mut sbox_out = [0u8; BLOCK_BYTES];
        self.enumerate_bytes(round, input, &mut sbox_out, 0, weight);
    }

    fn enumerate_bytes(
        &mut self,
        round: usize,
        input: &Block,
        sbox_out: &mut Block,
        byte_index: usize,
        weight: f64,
    ) {
        if byte_index == BLOCK_BYTES {
            let mut next = [0u8; BLOCK_BYTES];
            apply_permutation(&self.perms[round], sbox_out, &mut next);
            self.search_round(round + 1, &next, weight);
            return;
        }

        let dx = input[byte_index] as usize;
        if dx == 0 {
            // An inactive byte propagates only to an inactive byte.
            sbox_out[byte_index] = 0;
            self.enumerate_bytes(round, input, sbox_out, byte_index + 1, weight);
            return;
        }

        for option_index in 0..self.transitions[dx].len() {
            let option = self.transitions[dx][option_index];
            let new_weight = weight + option.weight;
            if new_weight >= self.best_weight {
                continue;
            }
            sbox_out[byte_index] = option.output;
            self.enumerate_bytes(round, input, sbox_out, byte_index + 1, new_weight);
        }
    }
}

/// Finds the minimum-weight differential trail over `rounds` rounds of the
/// cipher keyed with `key`, starting from `input_diff`.
///
/// Returns `None` when the branch limit prunes away every complete trail.
///
/// # Panics
/// Panics if `rounds` is outside `1..=4`.
pub fn search_best_trail(
    key: &[u8; KEY_BYTES],
    input_diff: &Block,
    rounds: usize,
    branch_limit: usize,
) -> Option<TrailReport> {
    assert!(
        (1..=MAX_ANALYSIS_ROUNDS).contains(&rounds),
        "rounds must be in 1..=4"
    );

    let transitions = prepare_transitions(branch_limit);
    let material = derive_material(key);
    let perms: Vec<Permutation> = material.perm_seeds.iter().map(round_permutation).collect();

    let mut context = SearchContext {
        rounds,
        transitions: &transitions,
        perms: &perms,
        working: vec![[0u8; BLOCK_BYTES]; rounds + 1],
        best: vec![[0u8; BLOCK_BYTES]; rounds + 1],
        best_weight: f64::INFINITY,
    };
    context.search_round(0, input_diff, 0.0);

    if context.best_weight.is_finite() {
        Some(TrailReport {
            rounds,
            states: context.best,
            weight: context.best_weight,
            probability: (-context.best_weight).exp2(),
        })
    } else {
        None
    }
}
