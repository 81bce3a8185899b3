//! Hash functions for Bloom filter
//!
//! Filter positions use MurmurHash3 with fixed seeds. Seeds are constants so a
//! filter built in one process answers identically in any other process or
//! machine. The `murmurhash` SQL function uses 32-bit MurmurHash2.

use std::io::Cursor;

/// Seed for the first base hash (h1)
pub const H1_SEED: u32 = 0;

/// Seed for the second base hash (h2)
pub const H2_SEED: u32 = 1;

/// Hash an element with MurmurHash3 x64-128 and keep the lower 64 bits
pub fn murmur_hash(element: &[u8], seed: u32) -> u64 {
    let mut cursor = Cursor::new(element);

    // Reading from an in-memory cursor cannot fail
    let hash = murmur3::murmur3_x64_128(&mut cursor, seed).unwrap_or(0);
    hash as u64
}

/// Hash an element with 32-bit MurmurHash2
///
/// Blocks are read little-endian, so results are identical on every target.
pub fn murmur_hash2(element: &[u8], seed: u32) -> u32 {
    const M: u32 = 0x5bd1_e995;
    const R: u32 = 24;

    let mut h = seed ^ element.len() as u32;

    let mut blocks = element.chunks_exact(4);
    for block in &mut blocks {
        let mut k = u32::from_le_bytes([block[0], block[1], block[2], block[3]]);
        k = k.wrapping_mul(M);
        k ^= k >> R;
        k = k.wrapping_mul(M);

        h = h.wrapping_mul(M);
        h ^= k;
    }

    let tail = blocks.remainder();
    if tail.len() >= 3 {
        h ^= u32::from(tail[2]) << 16;
    }
    if tail.len() >= 2 {
        h ^= u32::from(tail[1]) << 8;
    }
    if let Some(&first) = tail.first() {
        h ^= u32::from(first);
        h = h.wrapping_mul(M);
    }

    h ^= h >> 13;
    h = h.wrapping_mul(M);
    h ^= h >> 15;
    h
}

/// Compute k hash positions for an element
///
/// Uses double hashing: `pos_i = (h1 + i * h2) mod m`.
pub fn hash_positions(element: &[u8], k: u32, m: u64) -> impl Iterator<Item = usize> {
    let h1 = murmur_hash(element, H1_SEED);
    let h2 = murmur_hash(element, H2_SEED);

    (0..k as u64).map(move |i| {
        let hash = h1.wrapping_add(i.wrapping_mul(h2));
        (hash % m) as usize
    })
}
