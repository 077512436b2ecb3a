//! Empirical avalanche bounds for single-bit plaintext and key flips.

use cube96_core::{
    state::{bit_offset_in_byte, byte_index_of_bit},
    Block, CubeCipher, BLOCK_BYTES, DEFAULT_IMPL, KEY_BYTES, PERM_SIZE,
};

fn hamming_distance(a: &Block, b: &Block) -> u32 {
    a.iter().zip(b.iter()).map(|(x, y)| (x ^ y).count_ones()).sum()
}

fn flip_bit(data: &mut [u8; BLOCK_BYTES], bit_index: usize) {
    data[byte_index_of_bit(bit_index)] ^= 1 << bit_offset_in_byte(bit_index);
}

#[test]
fn single_bit_flips_change_about_half_the_ciphertext() {
    let key: [u8; KEY_BYTES] = core::array::from_fn(|i| 0xAA ^ (i as u8 * 7));
    let plain: Block = core::array::from_fn(|i| i as u8 * 9);

    let mut cipher = CubeCipher::new(DEFAULT_IMPL).expect("default impl available");
    cipher.set_key(&key);
    let base = cipher.encrypt_block(&plain);

    let mut total = 0u32;
    for bit in 0..PERM_SIZE {
        let mut mutated = plain;
        flip_bit(&mut mutated, bit);
        total += hamming_distance(&base, &cipher.encrypt_block(&mutated));
    }
    let average = f64::from(total) / PERM_SIZE as f64;
    assert!(
        (40.0..=56.0).contains(&average),
        "plaintext avalanche average {average} out of range"
    );

    let mut total = 0u32;
    for bit in 0..PERM_SIZE {
        let mut mutated_key = key;
        flip_bit(&mut mutated_key, bit);
        cipher.set_key(&mutated_key);
        total += hamming_distance(&base, &cipher.encrypt_block(&plain));
    }
    let average = f64::from(total) / PERM_SIZE as f64;
    assert!(
        (40.0..=56.0).contains(&average),
        "key avalanche average {average} out of range"
    );
}
