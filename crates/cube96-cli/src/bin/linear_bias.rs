//! Estimates the empirical bias of a linear approximation over partial
//! encryptions.

#![forbid(unsafe_code)]

use anyhow::{ensure, Context, Result};
use clap::Parser;
use cube96_analysis::bias::estimate_linear_bias;
use cube96_analysis::MAX_ANALYSIS_ROUNDS;
use cube96_core::{parse_hex, Block, BLOCK_BYTES, KEY_BYTES};

/// Sample a linear approximation of the reduced-round cipher.
#[derive(Parser)]
#[command(name = "cube96-linear-bias", version)]
struct Cli {
    /// Rounds to cover (1..=4).
    #[arg(long, default_value_t = 4)]
    rounds: usize,
    /// Random plaintexts to sample.
    #[arg(long, default_value_t = 1 << 16)]
    samples: usize,
    /// Plaintext mask as 24 hex characters.
    #[arg(long, default_value = "010000000000000000000000")]
    mask_in: String,
    /// State mask as 24 hex characters.
    #[arg(long, default_value = "010000000000000000000000")]
    mask_out: String,
    /// Key as 24 hex characters.
    #[arg(long, default_value = "000000000000000000000000")]
    key: String,
    /// Plaintext generator seed.
    #[arg(long, default_value_t = 0x4_3556_2456)]
    seed: u64,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    ensure!(
        (1..=MAX_ANALYSIS_ROUNDS).contains(&cli.rounds),
        "rounds must be between 1 and {MAX_ANALYSIS_ROUNDS}"
    );
    ensure!(cli.samples > 0, "at least one sample is required");

    let key: [u8; KEY_BYTES] = parse_hex(&cli.key).context("key")?;
    let mask_in: Block = parse_hex(&cli.mask_in).context("input mask")?;
    let mask_out: Block = parse_hex(&cli.mask_out).context("output mask")?;
    ensure!(
        mask_in != [0u8; BLOCK_BYTES] && mask_out != [0u8; BLOCK_BYTES],
        "masks must not be all-zero"
    );

    let estimate = estimate_linear_bias(&key, &mask_in, &mask_out, cli.rounds, cli.samples, cli.seed);
    println!(
        "correlation = {:.6}, bias = {:.6} after {} rounds using {} samples",
        estimate.correlation, estimate.bias, cli.rounds, estimate.samples
    );

    Ok(())
}
