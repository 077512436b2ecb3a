//! End-to-end tests over the compiled `cube96` binary.

use std::process::{Command, Output};

const ZEROS: &str = "000000000000000000000000";

#[cfg(not(feature = "layout-rowmajor"))]
const KAT0_CIPHERTEXT: &str = "b6393ae0d2e9a2c771e619fa";

#[cfg(feature = "layout-rowmajor")]
const KAT0_CIPHERTEXT: &str = "87c38f687f9e8a35ba28d552";

fn cube96(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_cube96"))
        .args(args)
        .output()
        .expect("binary must run")
}

#[test]
fn encrypts_the_zero_vector() {
    let output = cube96(&["enc", ZEROS, ZEROS]);
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        format!("{KAT0_CIPHERTEXT}\n")
    );
    assert!(String::from_utf8_lossy(&output.stderr).contains("NOT FOR PRODUCTION"));
}

#[test]
fn decrypts_back_to_the_zero_vector() {
    let output = cube96(&["dec", ZEROS, KAT0_CIPHERTEXT]);
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(String::from_utf8_lossy(&output.stdout), format!("{ZEROS}\n"));
}

#[test]
fn accepts_uppercase_hex() {
    let upper = KAT0_CIPHERTEXT.to_uppercase();
    let output = cube96(&["dec", ZEROS, &upper]);
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(String::from_utf8_lossy(&output.stdout), format!("{ZEROS}\n"));
}

#[test]
fn missing_arguments_exit_with_usage_code() {
    let output = cube96(&[]);
    assert_eq!(output.status.code(), Some(64));
}

#[test]
fn invalid_hex_exits_with_data_code() {
    let output = cube96(&["enc", "zz0000000000000000000000", ZEROS]);
    assert_eq!(output.status.code(), Some(65));

    let output = cube96(&["enc", ZEROS, "001122"]);
    assert_eq!(output.status.code(), Some(65));
}

#[test]
fn unknown_mode_exits_with_mode_code() {
    let output = cube96(&["rot13", ZEROS, ZEROS]);
    assert_eq!(output.status.code(), Some(66));
    assert!(String::from_utf8_lossy(&output.stderr).contains("unknown mode"));
}
