//! Single-block encrypt/decrypt front-end for Cube96.

#![forbid(unsafe_code)]

use clap::error::ErrorKind;
use clap::Parser;
use cube96_core::{parse_hex, Block, CubeCipher, CubeError, DEFAULT_IMPL, KEY_BYTES};

const EXIT_USAGE: i32 = 64;
const EXIT_DATA_ERR: i32 = 65;
const EXIT_UNKNOWN_MODE: i32 = 66;

/// Encrypt or decrypt one 96-bit block with Cube96.
#[derive(Parser)]
#[command(name = "cube96", version, about = "Encrypt or decrypt one 96-bit Cube96 block")]
struct Cli {
    /// Operation: `enc` or `dec`.
    mode: String,
    /// Key as 24 hex characters.
    key_hex: String,
    /// Block as 24 hex characters.
    data_hex: String,
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let exit = match err.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
                _ => EXIT_USAGE,
            };
            let _ = err.print();
            std::process::exit(exit);
        }
    };
    std::process::exit(run(&cli));
}

fn run(cli: &Cli) -> i32 {
    eprintln!("warning: Cube96 is a research cipher; NOT FOR PRODUCTION use");

    let key: [u8; KEY_BYTES] = match parse_hex(&cli.key_hex) {
        Ok(key) => key,
        Err(err) => {
            eprintln!("cube96: key: {err}");
            return EXIT_DATA_ERR;
        }
    };
    let data: Block = match parse_hex(&cli.data_hex) {
        Ok(data) => data,
        Err(err) => {
            eprintln!("cube96: data: {err}");
            return EXIT_DATA_ERR;
        }
    };

    let mut cipher = match CubeCipher::new(DEFAULT_IMPL) {
        Ok(cipher) => cipher,
        Err(err) => {
            eprintln!("cube96: {err}");
            return EXIT_USAGE;
        }
    };
    cipher.set_key(&key);

    let output = match cli.mode.as_str() {
        "enc" => cipher.encrypt_block(&data),
        "dec" => cipher.decrypt_block(&data),
        other => {
            eprintln!("cube96: {}", CubeError::UnknownMode(other.to_owned()));
            return EXIT_UNKNOWN_MODE;
        }
    };

    println!("{}", hex::encode(output));
    0
}
