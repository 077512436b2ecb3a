//! Differential and linear analysis kernels for Cube96.
//!
//! The kernels operate on the AES S-box and the key-dependent round
//! permutations: difference distribution and linear approximation tables
//! ([`tables`]), a weighted branch-and-bound differential trail search
//! ([`trails`]), and an empirical linear bias estimator over partial
//! encryptions ([`bias`]).

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod bias;
pub mod tables;
pub mod trails;

/// The analysis kernels walk at most this many rounds.
pub const MAX_ANALYSIS_ROUNDS: usize = 4;
