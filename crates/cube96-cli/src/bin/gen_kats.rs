//! Regenerates the known-answer fixture for the active layout.

#![forbid(unsafe_code)]

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use cube96_core::{parse_hex, Block, CubeCipher, DEFAULT_IMPL, KEY_BYTES};

const CASES: [(&str, &str, &str); 8] = [
    ("kat0_zero", "000000000000000000000000", "000000000000000000000000"),
    ("kat1_key_ff", "ffffffffffffffffffffffff", "000000000000000000000000"),
    ("kat2_increment", "000102030405060708090a0b", "0c0d0e0f1011121314151617"),
    ("kat3_stride", "00112233445566778899aabb", "ccddee00ff11223344556677"),
    ("kat4_mixed", "0123456789abcdef00112233", "445566778899aabbccddeeff"),
    ("kat5_descend", "fedcba9876543210ffeeddcc", "bbaa99887766554433221100"),
    ("kat6_pattern", "0f1e2d3c4b5a69788796a5b4", "c3d2e1f0ffeeddccbbaa9988"),
    ("kat7_sparse", "800000000000000000000001", "000000000000000000000001"),
];

/// Emit `name,key,plaintext,ciphertext` rows for the built-in KAT cases.
#[derive(Parser)]
#[command(name = "cube96-gen-kats", version)]
struct Cli {
    /// Output CSV path; stdout when omitted.
    out: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut sink: Box<dyn Write> = match &cli.out {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("create {}", path.display()))?,
        )),
        None => Box::new(io::stdout().lock()),
    };

    let mut cipher = CubeCipher::new(DEFAULT_IMPL)?;

    writeln!(sink, "name,key,plaintext,ciphertext")?;
    for (name, key_hex, plain_hex) in CASES {
        let key: [u8; KEY_BYTES] = parse_hex(key_hex).context(name)?;
        let plain: Block = parse_hex(plain_hex).context(name)?;
        cipher.set_key(&key);
        let ciphertext = cipher.encrypt_block(&plain);
        writeln!(sink, "{name},{key_hex},{plain_hex},{}", hex::encode(ciphertext))?;
    }
    sink.flush()?;

    Ok(())
}
