//! HKDF-SHA-256 key schedule.
//!
//! All key material is expanded from the 12-byte cipher key in one HKDF pass
//! with a fixed salt and info string, so derivation is a pure function of the
//! key. The 172-byte output is consumed from offset 0 upward as eight round
//! keys, eight permutation seeds, and the post-whitening block; the known
//! answer fixtures depend on every byte of this layout.

use crate::state::{RoundKey, BLOCK_BYTES, KEY_BYTES, ROUND_COUNT};

/// Width of one per-round permutation seed in bytes.
pub const PERM_SEED_BYTES: usize = 8;

/// Total HKDF output consumed by [`derive_material`].
pub const OKM_BYTES: usize =
    ROUND_COUNT * BLOCK_BYTES + ROUND_COUNT * PERM_SEED_BYTES + BLOCK_BYTES;

// ASCII "StagedCube's-96-HKDF-V1" padded to 32 bytes with zeros.
const HKDF_SALT: [u8; 32] = *b"StagedCube's-96-HKDF-V1\0\0\0\0\0\0\0\0\0";

// ASCII, no terminator.
const HKDF_INFO: &[u8] = b"Cube96-RK-PS-Post-v1";

const SHA256_INIT: [u32; 8] = [
    0x6a09e667, 0xbb67ae85, 0x3c6ef372, 0xa54ff53a,
    0x510e527f, 0x9b05688c, 0x1f83d9ab, 0x5be0cd19,
];

const SHA256_K: [u32; 64] = [
    0x428a2f98, 0x71374491, 0xb5c0fbcf, 0xe9b5dba5, 0x3956c25b, 0x59f111f1,
    0x923f82a4, 0xab1c5ed5, 0xd807aa98, 0x12835b01, 0x243185be, 0x550c7dc3,
    0x72be5d74, 0x80deb1fe, 0x9bdc06a7, 0xc19bf174, 0xe49b69c1, 0xefbe4786,
    0x0fc19dc6, 0x240ca1cc, 0x2de92c6f, 0x4a7484aa, 0x5cb0a9dc, 0x76f988da,
    0x983e5152, 0xa831c66d, 0xb00327c8, 0xbf597fc7, 0xc6e00bf3, 0xd5a79147,
    0x06ca6351, 0x14292967, 0x27b70a85, 0x2e1b2138, 0x4d2c6dfc, 0x53380d13,
    0x650a7354, 0x766a0abb, 0x81c2c92e, 0x92722c85, 0xa2bfe8a1, 0xa81a664b,
    0xc24b8b70, 0xc76c51a3, 0xd192e819, 0xd6990624, 0xf40e3585, 0x106aa070,
    0x19a4c116, 0x1e376c08, 0x2748774c, 0x34b0bcb5, 0x391c0cb3, 0x4ed8aa4a,
    0x5b9cca4f, 0x682e6ff3, 0x748f82ee, 0x78a5636f, 0x84c87814, 0x8cc70208,
    0x90befffa, 0xa4506ceb, 0xbef9a3f7, 0xc67178f2,
];

/// Streaming SHA-256 with standard big-endian message and length encoding.
#[derive(Clone)]
pub struct Sha256 {
    h: [u32; 8],
    bit_len: u64,
    buffer: [u8; 64],
    buffer_len: usize,
}

impl Sha256 {
    /// Starts a fresh hash.
    pub fn new() -> Self {
        Self {
            h: SHA256_INIT,
            bit_len: 0,
            buffer: [0; 64],
            buffer_len: 0,
        }
    }

    /// Absorbs message bytes.
    pub fn update(&mut self, mut data: &[u8]) {
        self.bit_len += (data.len() as u64) * 8;
        while !data.is_empty() {
            let take = (64 - self.buffer_len).min(data.len());
            self.buffer[self.buffer_len..self.buffer_len + take]
                .copy_from_slice(&data[..take]);
            self.buffer_len += take;
            data = &data[take..];
            if self.buffer_len == 64 {
                let block = self.buffer;
                self.compress(&block);
                self.buffer_len = 0;
            }
        }
    }

    /// Pads, runs the final compressions, and returns the digest.
    pub fn finalize(mut self) -> [u8; 32] {
        let len_bytes = self.bit_len.to_be_bytes();
        self.buffer[self.buffer_len] = 0x80;
        self.buffer_len += 1;
        if self.buffer_len > 56 {
            self.buffer[self.buffer_len..].fill(0);
            let block = self.buffer;
            self.compress(&block);
            self.buffer_len = 0;
        }
        self.buffer[self.buffer_len..56].fill(0);
        self.buffer[56..].copy_from_slice(&len_bytes);
        let block = self.buffer;
        self.compress(&block);

        let mut out = [0u8; 32];
        for (chunk, word) in out.chunks_exact_mut(4).zip(self.h.iter()) {
            chunk.copy_from_slice(&word.to_be_bytes());
        }
        out
    }

    fn compress(&mut self, block: &[u8; 64]) {
        let mut w = [0u32; 64];
        for (i, chunk) in block.chunks_exact(4).enumerate() {
            w[i] = u32::from_be_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
        }
        for i in 16..64 {
            let s0 = w[i - 15].rotate_right(7) ^ w[i - 15].rotate_right(18) ^ (w[i - 15] >> 3);
            let s1 = w[i - 2].rotate_right(17) ^ w[i - 2].rotate_right(19) ^ (w[i - 2] >> 10);
            w[i] = w[i - 16]
                .wrapping_add(s0)
                .wrapping_add(w[i - 7])
                .wrapping_add(s1);
        }

        let [mut a, mut b, mut c, mut d, mut e, mut f, mut g, mut h] = self.h;
        for i in 0..64 {
            let s1 = e.rotate_right(6) ^ e.rotate_right(11) ^ e.rotate_right(25);
            let ch = (e & f) ^ (!e & g);
            let temp1 = h
                .wrapping_add(s1)
                .wrapping_add(ch)
                .wrapping_add(SHA256_K[i])
                .wrapping_add(w[i]);
            let s0 = a.rotate_right(2) ^ a.rotate_right(13) ^ a.rotate_right(22);
            let maj = (a & b) ^ (a & c) ^ (b & c);
            let temp2 = s0.wrapping_add(maj);

            h = g;
            g = f;
            f = e;
            e = d.wrapping_add(temp1);
            d = c;
            c = b;
            b = a;
            a = temp1.wrapping_add(temp2);
        }

        for (slot, value) in self.h.iter_mut().zip([a, b, c, d, e, f, g, h]) {
            *slot = slot.wrapping_add(value);
        }
    }
}

impl Default for Sha256 {
    fn default() -> Self {
        Self::new()
    }
}

/// Streaming HMAC-SHA-256 over a 64-byte block; long keys are pre-hashed.
#[derive(Clone)]
pub struct HmacSha256 {
    inner: Sha256,
    outer: Sha256,
}

impl HmacSha256 {
    /// Keys both hash directions with ipad/opad.
    pub fn new(key: &[u8]) -> Self {
        let mut key_block = [0u8; 64];
        if key.len() > 64 {
            let mut hasher = Sha256::new();
            hasher.update(key);
            key_block[..32].copy_from_slice(&hasher.finalize());
        } else {
            key_block[..key.len()].copy_from_slice(key);
        }

        let mut ipad = [0u8; 64];
        let mut opad = [0u8; 64];
        for i in 0..64 {
            ipad[i] = key_block[i] ^ 0x36;
            opad[i] = key_block[i] ^ 0x5c;
        }

        let mut inner = Sha256::new();
        inner.update(&ipad);
        let mut outer = Sha256::new();
        outer.update(&opad);
        Self { inner, outer }
    }

    /// Absorbs message bytes.
    pub fn update(&mut self, data: &[u8]) {
        self.inner.update(data);
    }

    /// Returns the MAC.
    pub fn finalize(mut self) -> [u8; 32] {
        let inner_digest = self.inner.finalize();
        self.outer.update(&inner_digest);
        self.outer.finalize()
    }
}

/// One-shot HMAC-SHA-256.
pub fn hmac_sha256(key: &[u8], data: &[u8]) -> [u8; 32] {
    let mut mac = HmacSha256::new(key);
    mac.update(data);
    mac.finalize()
}

/// HKDF expand phase: `T(i) = HMAC(PRK, T(i-1) || info || i)` with T(0)
/// empty, filling `okm` from the concatenated blocks.
pub fn hkdf_expand(prk: &[u8; 32], info: &[u8], okm: &mut [u8]) {
    debug_assert!(okm.len() <= 255 * 32);
    let base = HmacSha256::new(prk);
    let mut previous: Option<[u8; 32]> = None;
    let mut counter = 1u8;
    let mut generated = 0;
    while generated < okm.len() {
        let mut mac = base.clone();
        if let Some(prev) = &previous {
            mac.update(prev);
        }
        mac.update(info);
        mac.update(&[counter]);
        let block = mac.finalize();
        let take = (okm.len() - generated).min(32);
        okm[generated..generated + take].copy_from_slice(&block[..take]);
        previous = Some(block);
        generated += take;
        counter = counter.wrapping_add(1);
    }
}

/// Everything the cipher caches at key-install time.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DerivedMaterial {
    /// Round keys for rounds 0..7.
    pub round_keys: [RoundKey; ROUND_COUNT],
    /// Big-endian SplitMix64 seeds for the per-round permutations.
    pub perm_seeds: [[u8; PERM_SEED_BYTES]; ROUND_COUNT],
    /// XORed into the state after the last round.
    pub post_whitening: RoundKey,
}

/// Expands a cipher key into round keys, permutation seeds, and the
/// post-whitening block. Deterministic and infallible.
pub fn derive_material(key: &[u8; KEY_BYTES]) -> DerivedMaterial {
    let prk = hmac_sha256(&HKDF_SALT, key);
    let mut okm = [0u8; OKM_BYTES];
    hkdf_expand(&prk, HKDF_INFO, &mut okm);

    let mut material = DerivedMaterial::default();
    let mut offset = 0;
    for round_key in material.round_keys.iter_mut() {
        round_key.copy_from_slice(&okm[offset..offset + BLOCK_BYTES]);
        offset += BLOCK_BYTES;
    }
    for seed in material.perm_seeds.iter_mut() {
        seed.copy_from_slice(&okm[offset..offset + PERM_SEED_BYTES]);
        offset += PERM_SEED_BYTES;
    }
    material.post_whitening.copy_from_slice(&okm[offset..]);
    material
}
