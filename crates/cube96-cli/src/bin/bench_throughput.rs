//! Single-stream throughput measurement outside the criterion harness.

#![forbid(unsafe_code)]

use std::time::Instant;

use anyhow::{ensure, Result};
use clap::Parser;
use cube96_core::{Block, CubeCipher, Impl, BLOCK_BYTES, KEY_BYTES};
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;

const DEFAULT_BYTES: usize = 64 * 1024 * 1024;

/// Measure sustained single-block encryption throughput.
#[derive(Parser)]
#[command(name = "cube96-bench", version)]
struct Cli {
    /// Bytes to process; must be a multiple of the block size.
    #[arg(long)]
    bytes: Option<usize>,
    /// Blocks to process; overrides the byte count.
    #[arg(long)]
    blocks: Option<usize>,
}

/// Workload size, from flags, `CUBE96_BENCH_BYTES`, or the default.
fn resolved_bytes(cli: &Cli) -> usize {
    if let Some(bytes) = cli.bytes {
        return bytes;
    }
    if let Some(blocks) = cli.blocks {
        return blocks * BLOCK_BYTES;
    }
    match std::env::var("CUBE96_BENCH_BYTES") {
        Ok(raw) => match raw.parse::<usize>() {
            Ok(n) if n > 0 => n,
            _ => {
                eprintln!(
                    "warning: CUBE96_BENCH_BYTES={raw:?} is not a positive integer; \
                     using {DEFAULT_BYTES}"
                );
                DEFAULT_BYTES
            }
        },
        Err(_) => DEFAULT_BYTES,
    }
}

fn run_bench(label: &str, impl_choice: Impl, buffer: &[u8]) -> Result<()> {
    let mut cipher = CubeCipher::new(impl_choice)?;
    let key: [u8; KEY_BYTES] = core::array::from_fn(|i| i as u8 * 11 + 7);
    cipher.set_key(&key);

    let mut out = vec![0u8; buffer.len()];
    let start = Instant::now();
    for (src, dst) in buffer
        .chunks_exact(BLOCK_BYTES)
        .zip(out.chunks_exact_mut(BLOCK_BYTES))
    {
        let mut block: Block = [0; BLOCK_BYTES];
        block.copy_from_slice(src);
        dst.copy_from_slice(&cipher.encrypt_block(&block));
    }
    let elapsed = start.elapsed().as_secs_f64();

    let mib = buffer.len() as f64 / (1024.0 * 1024.0);
    println!("{label} impl: {:.2} MiB/s in {elapsed:.3} s", mib / elapsed);
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let bytes = resolved_bytes(&cli);
    ensure!(
        bytes > 0 && bytes % BLOCK_BYTES == 0,
        "byte count must be a positive multiple of the block size ({BLOCK_BYTES})"
    );

    let mut buffer = vec![0u8; bytes];
    ChaCha20Rng::seed_from_u64(12345).fill_bytes(&mut buffer);

    if CubeCipher::has_fast_impl() {
        run_bench("Fast", Impl::Fast, &buffer)?;
    }
    run_bench("Hardened", Impl::Hardened, &buffer)?;

    Ok(())
}
