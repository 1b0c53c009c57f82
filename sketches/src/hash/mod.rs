// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

//! Hashing helpers shared by every sketch family.
//!
//! All sketches in this crate hash user input through murmur3-x64-128, the
//! same primitive used to derive HLL coupons and Theta hashes. The seed is
//! part of the sketch's identity: two sketches must share a seed to be
//! unioned or intersected meaningfully, which is why [`compute_seed_hash`]
//! exists — it lets a sketch embed a short fingerprint of its seed in its
//! serialized form without storing the seed itself.

use std::hash::Hasher;

/// Default seed used when a caller does not supply one.
pub const DEFAULT_UPDATE_SEED: u64 = 9001;

/// A [`std::hash::Hasher`] producing the full 128-bit murmur3-x64-128 digest.
///
/// Wraps `mur3`'s implementation so call sites only need to remember one
/// type name regardless of which sketch is hashing.
pub struct MurmurHash3X64128(mur3::Hasher128);

impl MurmurHash3X64128 {
    /// Creates a hasher seeded with `seed`.
    pub fn with_seed(seed: u64) -> Self {
        Self(mur3::Hasher128::with_seed(seed))
    }

    /// Consumes the accumulated input and returns the `(h1, h2)` 128-bit digest.
    pub fn finish128(&self) -> (u64, u64) {
        self.0.finish128()
    }
}

impl Hasher for MurmurHash3X64128 {
    fn finish(&self) -> u64 {
        self.0.finish()
    }

    fn write(&mut self, bytes: &[u8]) {
        self.0.write(bytes);
    }
}

/// Derives a 16-bit fingerprint of a hash seed for embedding in serialized
/// sketches.
///
/// Two sketches can only be combined (unioned, intersected) if their seed
/// hashes match; this lets callers detect a seed mismatch without storing
/// the full 64-bit seed in every wire image. The seed itself is hashed with
/// seed `0`, and the low 16 bits of the first 64-bit half are taken; zero is
/// never returned (it is reserved to mean "legacy, unchecked" on the
/// deserialize path), so a result of zero is remapped to one.
pub fn compute_seed_hash(seed: u64) -> u16 {
    let mut hasher = MurmurHash3X64128::with_seed(0);
    hasher.write(&seed.to_le_bytes());
    let (h1, _) = hasher.finish128();
    let hash = (h1 & 0xFFFF) as u16;
    if hash == 0 { 1 } else { hash }
}

/// Reads a little-endian `u64` from a byte slice, zero-padding if it is
/// shorter than 8 bytes.
pub(crate) fn read_u64_le(bytes: &[u8]) -> u64 {
    let mut buf = [0u8; 8];
    let n = bytes.len().min(8);
    buf[..n].copy_from_slice(&bytes[..n]);
    u64::from_le_bytes(buf)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_hash_is_deterministic() {
        assert_eq!(compute_seed_hash(DEFAULT_UPDATE_SEED), compute_seed_hash(DEFAULT_UPDATE_SEED));
    }

    #[test]
    fn seed_hash_differs_across_seeds() {
        assert_ne!(compute_seed_hash(1), compute_seed_hash(2));
    }

    #[test]
    fn hasher_is_deterministic_for_same_input() {
        let mut a = MurmurHash3X64128::with_seed(DEFAULT_UPDATE_SEED);
        let mut b = MurmurHash3X64128::with_seed(DEFAULT_UPDATE_SEED);
        a.write(b"hello");
        b.write(b"hello");
        assert_eq!(a.finish128(), b.finish128());
    }

    #[test]
    fn read_u64_le_pads_short_slices() {
        assert_eq!(read_u64_le(&[1, 0, 0, 0]), 1u64);
        assert_eq!(read_u64_le(&[]), 0u64);
    }
}
