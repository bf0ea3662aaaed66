//! BLAKE3 helpers for cache keys and feature hashing.


/// Full 32-byte BLAKE3 digest of `text`.
#[inline]
pub fn hash_text(text: &str) -> [u8; 32] {
    *blake3::hash(text.as_bytes()).as_bytes()
}

/// First 8 bytes of the BLAKE3 digest as a little-endian `u64`.
///
/// Collisions only merge two features of a hashed embedding; nothing relies on
/// this value being unique.
#[inline]
pub fn hash_to_u64(data: &[u8]) -> u64 {
    let hash = blake3::hash(data);
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&hash.as_bytes()[..8]);
    u64::from_le_bytes(bytes)
}

/// Bucket index for a token in a `dim`-wide hashed feature vector.
#[inline]
pub fn feature_index(token: &str, dim: usize) -> usize {
    (hash_to_u64(token.as_bytes()) % dim.max(1) as u64) as usize
}
