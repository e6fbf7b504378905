//! Hashing algorithms.
//!
//! [`Hasher`] is derived from `rustc-hash`
//! (https://github.com/rust-lang/rustc-hash),
//! licensed under the MIT License.
//! Copyright © the Rust Project Developers.
//!
//! The rustc-hash documentation explains the design trade-offs
//! and references used.

/// A speedy non-cryptographic hash, the default for every table.
/// Keys are trusted input, so we do not trade performance for DOS protection.
pub struct Hasher {
    hash: usize,
}

#[derive(Debug, Copy, Clone, Default)]
pub struct BuildHasher;

/// Hashes integers to themselves, so `n` lands in slot `n % capacity`.
/// Handy to predict exactly which slot a key lands in.
///
/// Anything that isn't an integer is folded byte by byte, so it still works
/// for other keys, it's just a poor hash for them.
#[derive(Debug, Default)]
pub struct Identity {
    hash: u64,
    written: bool,
}

#[derive(Debug, Copy, Clone, Default)]
pub struct BuildIdentity;

/// Reference: [https://github.com/rust-lang/rustc-hash/blob/1a998d5b89b04ba730d4cd249f811e8b48aa7d8c/src/lib.rs#L63C1-L73C37]
const K: usize = 0xf1357aea2e62a9c5;

const SEEDS: [u64; 2] = [0x243f6a8885a308d3, 0x13198a2e03707344];

const PREVENT_TRIVIAL_ZERO_COLLAPSE: u64 = 0xa4093822299f31d0;

impl Hasher {
    #[inline]
    pub const fn new() -> Self {
        Self { hash: 0 }
    }

    #[inline]
    const fn add(&mut self, addition: usize) {
        self.hash = self.hash.wrapping_add(addition).wrapping_mul(K);
    }
}

#[inline]
fn read_u64(bytes: &[u8]) -> u64 {
    let mut buf = [0; 8];
    buf.copy_from_slice(&bytes[..8]);
    u64::from_le_bytes(buf)
}

#[inline]
fn read_u32(bytes: &[u8]) -> u64 {
    let mut buf = [0; 4];
    buf.copy_from_slice(&bytes[..4]);
    u32::from_le_bytes(buf) as u64
}

#[inline]
fn hash(bytes: &[u8]) -> u64 {
    let [mut s0, mut s1] = SEEDS;
    let len = bytes.len();

    if len <= 16 {
        if len >= 8 {
            s0 ^= read_u64(bytes);
            s1 ^= read_u64(&bytes[len - 8..]);
        } else if len >= 4 {
            s0 ^= read_u32(bytes);
            s1 ^= read_u32(&bytes[len - 4..]);
        } else if len > 0 {
            let lo = bytes[0];
            let mid = bytes[len / 2];
            let hi = bytes[len - 1];
            s0 ^= lo as u64;
            s1 ^= ((hi as u64) << 8) | mid as u64;
        }
    } else {
        let mut off = 0;
        while off < len - 16 {
            let x = read_u64(&bytes[off..]);
            let y = read_u64(&bytes[off + 8..]);

            let t = multiply(s0 ^ x, PREVENT_TRIVIAL_ZERO_COLLAPSE ^ y);
            s0 = s1;
            s1 = t;
            off += 16;
        }

        let suffix = &bytes[len - 16..];
        s0 ^= read_u64(suffix);
        s1 ^= read_u64(&suffix[8..]);
    }

    multiply(s0, s1) ^ (len as u64)
}

#[inline]
fn multiply(x: u64, y: u64) -> u64 {
    let full = (x as u128).wrapping_mul(y as u128);
    let lo = full as u64;
    let hi = (full >> 64) as u64;

    lo ^ hi
}

impl std::hash::Hasher for Hasher {
    fn write(&mut self, bytes: &[u8]) {
        self.write_u64(hash(bytes));
    }

    #[inline]
    fn finish(&self) -> u64 {
        const ROTATE: u32 = 26;

        self.hash.rotate_left(ROTATE) as u64
    }

    fn write_u8(&mut self, addition: u8) {
        self.add(addition as usize);
    }

    fn write_u16(&mut self, addition: u16) {
        self.add(addition as usize);
    }

    fn write_u32(&mut self, addition: u32) {
        self.add(addition as usize);
    }

    fn write_u64(&mut self, addition: u64) {
        self.add(addition as usize);
    }

    fn write_u128(&mut self, addition: u128) {
        self.add(addition as usize);
    }

    fn write_usize(&mut self, addition: usize) {
        self.add(addition);
    }
}

impl Default for Hasher {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl std::hash::BuildHasher for BuildHasher {
    type Hasher = Hasher;

    fn build_hasher(&self) -> Self::Hasher {
        Hasher::default()
    }
}

impl Identity {
    /// The first word written is the hash, later ones are folded into it.
    #[inline]
    fn fold(&mut self, n: u64) {
        self.hash = match self.written {
            false => n,
            true => self.hash.rotate_left(8) ^ n,
        };
        self.written = true;
    }
}

impl std::hash::Hasher for Identity {
    fn write(&mut self, bytes: &[u8]) {
        bytes.iter().for_each(|byte| self.fold(*byte as u64));
    }

    #[inline]
    fn finish(&self) -> u64 {
        self.hash
    }

    fn write_u8(&mut self, n: u8) {
        self.fold(n as u64);
    }

    fn write_u16(&mut self, n: u16) {
        self.fold(n as u64);
    }

    fn write_u32(&mut self, n: u32) {
        self.fold(n as u64);
    }

    fn write_u64(&mut self, n: u64) {
        self.fold(n);
    }

    fn write_usize(&mut self, n: usize) {
        self.fold(n as u64);
    }

    fn write_i8(&mut self, n: i8) {
        self.fold(n as u64);
    }

    fn write_i16(&mut self, n: i16) {
        self.fold(n as u64);
    }

    fn write_i32(&mut self, n: i32) {
        self.fold(n as u64);
    }

    fn write_i64(&mut self, n: i64) {
        self.fold(n as u64);
    }

    fn write_isize(&mut self, n: isize) {
        self.fold(n as u64);
    }
}

impl std::hash::BuildHasher for BuildIdentity {
    type Hasher = Identity;

    fn build_hasher(&self) -> Self::Hasher {
        Identity::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::hash::BuildHasher as _;

    #[test]
    fn test_identity_keeps_integers() {
        let build = BuildIdentity;

        assert_eq!(build.hash_one(6u64), 6);
        assert_eq!(build.hash_one(14i32), 14);
        assert_eq!(build.hash_one(1usize << 40), 1 << 40);
        assert_eq!(build.hash_one(-1i64), u64::MAX);
    }

    #[test]
    fn test_identity_folds_strings() {
        let build = BuildIdentity;

        assert_ne!(build.hash_one("ab"), build.hash_one("ba"));
        assert_ne!(build.hash_one("a"), build.hash_one("b"));
    }

    #[test]
    fn test_fast_hash_is_deterministic() {
        let build = BuildHasher;

        assert_eq!(build.hash_one("tombstone"), build.hash_one("tombstone"));
        assert_eq!(build.hash_one(42u64), build.hash_one(42u64));
        assert_ne!(build.hash_one("abcdefghij"), build.hash_one("abcdefghji"));
        assert_ne!(build.hash_one(1u64), build.hash_one(2u64));
    }

    #[test]
    fn test_fast_hash_all_lengths() {
        let build = BuildHasher;
        let bytes: Vec<u8> = (0..64).collect();

        let hashes: Vec<u64> = (0..bytes.len())
            .map(|len| build.hash_one(&bytes[..len]))
            .collect();

        for (i, a) in hashes.iter().enumerate() {
            for b in &hashes[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
