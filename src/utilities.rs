use std::hash::{BuildHasher, Hash};

pub const BITS_PER_LEVEL: usize = 5;
pub const MAX_DEPTH: usize = 6;

const CHUNK_MASK: u32 = 0b11111;

/// Hashes a key and spreads its entropy over the bits consumed by the trie
/// levels.
pub fn hash_key<Q: Hash + ?Sized>(build_hasher: &impl BuildHasher, key: &Q) -> u32 {
    let hash = build_hasher.hash_one(key);
    let hash = (hash ^ (hash >> 32)) as u32;

    hash ^ (hash >> 16)
}

pub fn chunk(hash: u32, level: usize) -> u8 {
    ((hash >> (level * BITS_PER_LEVEL)) & CHUNK_MASK) as u8
}

/// Hasher passing integer keys through unchanged, so tests can place keys
/// at chosen trie positions.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct IdentityHasher(u64);

#[cfg(test)]
impl std::hash::Hasher for IdentityHasher {
    fn finish(&self) -> u64 {
        self.0
    }

    fn write(&mut self, bytes: &[u8]) {
        for byte in bytes {
            self.0 = (self.0 << 8) | u64::from(*byte);
        }
    }

    fn write_u64(&mut self, n: u64) {
        self.0 = n;
    }
}

#[cfg(test)]
pub type IdentityHashBuilder = std::hash::BuildHasherDefault<IdentityHasher>;
