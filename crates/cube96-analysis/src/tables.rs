//! Difference distribution and linear approximation tables.

use std::io::{self, Write};

use cube96_core::sbox::AES_SBOX;

/// Row and column count of both tables.
pub const TABLE_SIZE: usize = 256;

/// Parity of an 8-bit value.
#[inline]
pub fn parity(byte: u8) -> u8 {
    (byte.count_ones() & 1) as u8
}

/// Computes the DDT: `ddt[dx][dy]` counts inputs x with
/// `S(x) ^ S(x ^ dx) == dy`. Row 0 is (256, 0, 0, ...).
pub fn compute_ddt() -> Vec<[u32; TABLE_SIZE]> {
    let mut ddt = vec![[0u32; TABLE_SIZE]; TABLE_SIZE];
    for (dx, row) in ddt.iter_mut().enumerate() {
        for x in 0..TABLE_SIZE {
            let dy = AES_SBOX[x] ^ AES_SBOX[x ^ dx];
            row[dy as usize] += 1;
        }
    }
    ddt
}

/// Largest DDT entry over all nonzero input differences.
pub fn differential_uniformity(ddt: &[[u32; TABLE_SIZE]]) -> u32 {
    ddt.iter()
        .skip(1)
        .flat_map(|row| row.iter())
        .copied()
        .max()
        .unwrap_or(0)
}

/// Computes the LAT with entries stored centered as `matches - 128`, so
/// every entry lies in [-128, 128] (correlation x 256 for 8-bit masks). The
/// signed match-minus-mismatch sum is exactly twice each entry.
pub fn compute_lat() -> Vec<[i32; TABLE_SIZE]> {
    let mut lat = vec![[0i32; TABLE_SIZE]; TABLE_SIZE];
    for (a, row) in lat.iter_mut().enumerate() {
        for (b, entry) in row.iter_mut().enumerate() {
            let mut matches = 0i32;
            for x in 0..TABLE_SIZE {
                if parity(a as u8 & x as u8) == parity(b as u8 & AES_SBOX[x]) {
                    matches += 1;
                }
            }
            *entry = matches - 128;
        }
    }
    lat
}

/// Largest |LAT entry| over all pairs of nonzero masks.
pub fn max_absolute_bias(lat: &[[i32; TABLE_SIZE]]) -> i32 {
    lat.iter()
        .skip(1)
        .flat_map(|row| row.iter().skip(1))
        .map(|entry| entry.abs())
        .max()
        .unwrap_or(0)
}

/// Writes a 256x256 table as CSV: a `dx,0,1,...,255` header followed by 256
/// rows prefixed with the row index.
pub fn write_matrix_csv<W, T>(mut sink: W, matrix: &[[T; TABLE_SIZE]]) -> io::Result<()>
where
    W: Write,
    T: std::fmt::Display,
{
    write!(sink, "dx")?;
    for col in 0..TABLE_SIZE {
        write!(sink, ",{col}")?;
    }
    writeln!(sink)?;
    for (row_index, row) in matrix.iter().enumerate() {
        write!(sink, "{row_index}")?;
        for value in row.iter() {
            write!(sink, ",{value}")?;
        }
        writeln!(sink)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ddt_row_zero_is_concentrated() {
        let ddt = compute_ddt();
        assert_eq!(ddt[0][0], 256);
        assert!(ddt[0][1..].iter().all(|&count| count == 0));
    }

    #[test]
    fn ddt_rows_each_sum_to_256() {
        let ddt = compute_ddt();
        for row in &ddt {
            assert_eq!(row.iter().sum::<u32>(), 256);
        }
    }

    #[test]
    fn aes_sbox_differential_uniformity_is_four() {
        assert_eq!(differential_uniformity(&compute_ddt()), 4);
    }

    #[test]
    fn lat_trivial_masks_are_fully_correlated() {
        let lat = compute_lat();
        assert_eq!(lat[0][0], 128);
    }

    #[test]
    fn aes_sbox_max_linear_bias_is_sixteen() {
        assert_eq!(max_absolute_bias(&compute_lat()), 16);
    }

    #[test]
    fn csv_output_has_header_and_256_rows() {
        let ddt = compute_ddt();
        let mut buffer = Vec::new();
        write_matrix_csv(&mut buffer, &ddt).expect("write to Vec");
        let text = String::from_utf8(buffer).expect("ascii output");
        let mut lines = text.lines();
        let header = lines.next().unwrap();
        assert!(header.starts_with("dx,0,1,"));
        assert!(header.ends_with(",255"));
        assert_eq!(lines.clone().count(), 256);
        assert!(lines.next().unwrap().starts_with("0,256,0,"));
    }
}
