//! Searches for the best differential trail over a few rounds.

#![forbid(unsafe_code)]

use anyhow::{bail, ensure, Context, Result};
use clap::Parser;
use cube96_analysis::trails::{search_best_trail, DEFAULT_BRANCH_LIMIT};
use cube96_analysis::MAX_ANALYSIS_ROUNDS;
use cube96_core::{parse_hex, Block, KEY_BYTES};

/// Branch-and-bound differential trail search.
#[derive(Parser)]
#[command(name = "cube96-trails", version)]
struct Cli {
    /// Rounds to cover (1..=4).
    #[arg(long, default_value_t = 4)]
    rounds: usize,
    /// Transitions explored per active byte.
    #[arg(long, default_value_t = DEFAULT_BRANCH_LIMIT)]
    branch: usize,
    /// Key as 24 hex characters.
    #[arg(long, default_value = "000000000000000000000000")]
    key: String,
    /// Input difference as 24 hex characters.
    #[arg(long, default_value = "010000000000000000000000")]
    diff: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    ensure!(
        (1..=MAX_ANALYSIS_ROUNDS).contains(&cli.rounds),
        "rounds must be between 1 and {MAX_ANALYSIS_ROUNDS}"
    );
    let branch = cli.branch.max(1);

    let key: [u8; KEY_BYTES] = parse_hex(&cli.key).context("key")?;
    let diff: Block = parse_hex(&cli.diff).context("input difference")?;

    let Some(report) = search_best_trail(&key, &diff, cli.rounds, branch) else {
        bail!("no trail found with the given parameters");
    };

    println!("Best trail over {} rounds:", report.rounds);
    for (round, state) in report.states[..report.rounds].iter().enumerate() {
        println!("  round {round} input diff: {}", hex::encode(state));
    }
    println!(
        "  after round {} permutation: {}",
        report.rounds,
        hex::encode(report.states[report.rounds])
    );
    println!(
        "  trail probability = {:e} (weight = {:.4})",
        report.probability, report.weight
    );

    Ok(())
}
