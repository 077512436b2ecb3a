//! Encrypts one block with both implementations and checks they agree.

use cube96_core::{parse_hex, CubeCipher, Impl, KEY_BYTES};

fn main() {
    let key: [u8; KEY_BYTES] = parse_hex("000102030405060708090a0b").expect("valid key hex");
    let plain = parse_hex("0c0d0e0f1011121314151617").expect("valid block hex");

    let mut hardened = CubeCipher::new(Impl::Hardened).expect("hardened always available");
    hardened.set_key(&key);
    let ciphertext = hardened.encrypt_block(&plain);

    if CubeCipher::has_fast_impl() {
        let mut fast = CubeCipher::new(Impl::Fast).expect("fast available");
        fast.set_key(&key);
        assert_eq!(fast.encrypt_block(&plain), ciphertext);
    }

    assert_eq!(hardened.decrypt_block(&ciphertext), plain);

    println!("key:        {}", hex::encode(key));
    println!("plaintext:  {}", hex::encode(plain));
    println!("ciphertext: {}", hex::encode(ciphertext));
}
