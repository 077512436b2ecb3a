//! Error type shared by the tool boundaries.
//!
//! Block operations on a keyed cipher never fail; every failure mode lives
//! at the CLI and analysis edges and is represented here.

use core::fmt;

/// Failures surfaced by the CLI and analysis tools.
#[derive(Debug)]
pub enum CubeError {
    /// Input contained a character outside `[0-9a-fA-F]`.
    InvalidHex,
    /// Input had the wrong length for the expected value.
    InvalidLength {
        /// Expected number of hex characters.
        expected: usize,
        /// Number of characters actually supplied.
        actual: usize,
    },
    /// The CLI mode was neither `enc` nor `dec`.
    UnknownMode(String),
    /// The fast implementation was removed by the `disable-fast-impl`
    /// build feature.
    FastImplDisabled,
    /// CSV or file I/O failed.
    Io(std::io::Error),
}

impl fmt::Display for CubeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CubeError::InvalidHex => write!(f, "invalid hex digit"),
            CubeError::InvalidLength { expected, actual } => {
                write!(f, "expected {expected} hex characters, got {actual}")
            }
            CubeError::UnknownMode(mode) => write!(f, "unknown mode: {mode}"),
            CubeError::FastImplDisabled => {
                write!(f, "the fast implementation is disabled in this build")
            }
            CubeError::Io(err) => write!(f, "i/o error: {err}"),
        }
    }
}

impl std::error::Error for CubeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CubeError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for CubeError {
    fn from(err: std::io::Error) -> Self {
        CubeError::Io(err)
    }
}

/// Parses an exact-length, case-insensitive hex string into a byte array.
pub fn parse_hex<const N: usize>(text: &str) -> Result<[u8; N], CubeError> {
    if text.len() != N * 2 {
        return Err(CubeError::InvalidLength {
            expected: N * 2,
            actual: text.len(),
        });
    }
    let bytes = hex::decode(text).map_err(|_| CubeError::InvalidHex)?;
    let mut out = [0u8; N];
    out.copy_from_slice(&bytes);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_both_hex_cases() {
        let block: [u8; 12] = parse_hex("00112233445566778899aAbB").unwrap();
        assert_eq!(block[0], 0x00);
        assert_eq!(block[11], 0xbb);
    }

    #[test]
    fn rejects_wrong_length() {
        let err = parse_hex::<12>("0011").unwrap_err();
        assert!(matches!(
            err,
            CubeError::InvalidLength {
                expected: 24,
                actual: 4
            }
        ));
    }

    #[test]
    fn rejects_non_hex_digits() {
        let err = parse_hex::<12>("zz112233445566778899aabb").unwrap_err();
        assert!(matches!(err, CubeError::InvalidHex));
    }
}
