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

//! HyperLogLog sketches for cardinality estimation.
//!
//! A sketch starts in sparse [`LIST`](sketch::HllSketch) mode (a handful of
//! coupons kept in insertion order), escalates to an open-addressed `SET` of
//! coupons as it warms up, and finally escalates to a dense register array
//! (`HLL_4`, `HLL_6`, or `HLL_8`, chosen by [`TgtHllType`]) once the
//! cardinality crosses roughly `K/8`. See [`sketch::HllSketch`] for the
//! mode-escalation state machine and [`union::HllUnion`] for merging sketches
//! of differing `lgK`/type.

use std::hash::Hash;
use std::hash::Hasher;

use crate::hash::MurmurHash3X64128;

mod array4;
mod array6;
mod array8;
mod aux_map;
mod estimator;
mod hash_set;
mod list;
mod serialization;
mod sketch;
mod union;

pub use sketch::HllSketch;
pub use sketch::HllSketchBuilder;
pub use union::HllUnion;

/// Target register width for the dense (`HLL`) mode of a sketch.
///
/// Chosen at construction time; only affects the sketch once it escalates
/// out of `LIST`/`SET` mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TgtHllType {
    /// 4 bits per register plus an auxiliary exception map. Most compact.
    Hll4,
    /// 6 bits per register, no exceptions needed.
    Hll6,
    /// 8 bits per register (one byte). Simplest, least compact.
    Hll8,
}

impl TgtHllType {
    pub(crate) fn to_tag(self) -> u8 {
        match self {
            TgtHllType::Hll4 => 0,
            TgtHllType::Hll6 => 1,
            TgtHllType::Hll8 => 2,
        }
    }

    pub(crate) fn from_tag(tag: u8) -> Result<Self, crate::error::Error> {
        match tag {
            0 => Ok(TgtHllType::Hll4),
            1 => Ok(TgtHllType::Hll6),
            2 => Ok(TgtHllType::Hll8),
            other => Err(crate::error::Error::deserial(format!(
                "unknown HLL target type tag: {other}"
            ))),
        }
    }
}

/// The three states a sketch passes through as it warms up: a short
/// insertion-ordered coupon list, an open-addressed coupon set, and
/// finally one of the three dense register arrays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Mode {
    List,
    Set,
    Hll,
}

impl Mode {
    pub(crate) fn to_tag(self) -> u8 {
        match self {
            Mode::List => 0,
            Mode::Set => 1,
            Mode::Hll => 2,
        }
    }

    pub(crate) fn from_tag(tag: u8) -> Result<Self, crate::error::Error> {
        match tag {
            0 => Ok(Mode::List),
            1 => Ok(Mode::Set),
            2 => Ok(Mode::Hll),
            other => Err(crate::error::Error::deserial(format!(
                "unknown HLL mode tag: {other}"
            ))),
        }
    }
}

/// Number of bits of a coupon's low end reserved for the register address.
///
/// `lgK` never exceeds 21 (see [`sketch`]'s `MAX_LG_K`), so 26 bits is a
/// comfortable fixed upper bound: sketches mask down to their own `lgK` at
/// every use site instead of varying the coupon layout itself.
const KEY_BITS_26: u32 = 26;
const KEY_MASK_26: u32 = (1 << KEY_BITS_26) - 1;

/// Number of distinct coupons kept in `LIST` mode before escalating to `SET`.
pub(crate) const LIST_THRESHOLD: usize = 8;
/// `lg` initial capacity of the open-addressed `SET` a `LIST` escalates into.
pub(crate) const LG_SET_INIT: u8 = 5;

/// Extracts the register index (low 26 bits) from a coupon.
#[inline]
pub(crate) fn get_slot(coupon: u32) -> u32 {
    coupon & KEY_MASK_26
}

/// Extracts the register value (high 6 bits) from a coupon.
#[inline]
pub(crate) fn get_value(coupon: u32) -> u8 {
    (coupon >> KEY_BITS_26) as u8
}

/// Packs a register index and value into a coupon.
///
/// `value` must be `> 0`; the all-zero coupon is reserved to mean "empty" by
/// every open-addressed table in this module.
#[inline]
pub(crate) fn pack_coupon(slot: u32, value: u8) -> u32 {
    ((value as u32) << KEY_BITS_26) | (slot & KEY_MASK_26)
}

/// Hashes `item` and packs the result into a coupon.
///
/// The low 26 bits of the first 64-bit hash half become the register
/// address; the number of leading zeros (plus one) of the second half,
/// capped at 62, becomes the register value. A capped leading-zero count of
/// 62 plus one is 63, which still fits the 6 value bits a coupon reserves.
pub(crate) fn coupon<T: Hash>(item: T, seed: u64) -> u32 {
    let mut hasher = MurmurHash3X64128::with_seed(seed);
    item.hash(&mut hasher);
    let (h1, h2) = hasher.finish128();
    let addr26 = h1 as u32 & KEY_MASK_26;
    let value = h2.leading_zeros().min(62) as u8 + 1;
    pack_coupon(addr26, value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pack_and_unpack_round_trip() {
        let c = pack_coupon(12345, 42);
        assert_eq!(get_slot(c), 12345);
        assert_eq!(get_value(c), 42);
    }

    #[test]
    fn coupon_is_never_zero() {
        for i in 0..1000u64 {
            assert_ne!(coupon(i, 9001), 0);
        }
    }

    #[test]
    fn coupon_is_deterministic() {
        assert_eq!(coupon("hello", 9001), coupon("hello", 9001));
        assert_ne!(coupon("hello", 9001), coupon("world", 9001));
    }
}
