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

//! [`HllSketch`]: the mode-escalating HyperLogLog sketch.
//!
//! A fresh sketch starts in `LIST` mode and escalates through `SET` to a
//! dense `HLL` array as it warms up. Escalation is one-directional: once a
//! sketch reaches dense mode it never reverts, even if merged with an empty
//! sketch.

use std::hash::Hash;

use crate::codec::{SketchBytes, SketchSlice};
use crate::common::NumStdDev;
use crate::error::Error;
use crate::hash::{compute_seed_hash, DEFAULT_UPDATE_SEED};

use super::array4::Array4;
use super::array6::Array6;
use super::array8::Array8;
use super::estimator::composite_estimate;
use super::hash_set::CouponHashSet;
use super::list::CouponList;
use super::serialization::{self, Preamble};
use super::{coupon, get_slot, get_value, pack_coupon, Mode, TgtHllType, LG_SET_INIT};

pub(crate) const MIN_LG_K: u8 = 4;
pub(crate) const MAX_LG_K: u8 = 21;
const DEFAULT_LG_K: u8 = 12;

#[derive(Debug, Clone, PartialEq)]
enum Dense {
    Hll4(Array4),
    Hll6(Array6),
    Hll8(Array8),
}

impl Dense {
    fn new(tgt_type: TgtHllType, lg_config_k: u8) -> Self {
        match tgt_type {
            TgtHllType::Hll4 => Dense::Hll4(Array4::new(lg_config_k)),
            TgtHllType::Hll6 => Dense::Hll6(Array6::new(lg_config_k)),
            TgtHllType::Hll8 => Dense::Hll8(Array8::new(lg_config_k)),
        }
    }

    fn update_slot(&mut self, slot: usize, value: u8) -> Result<bool, Error> {
        match self {
            Dense::Hll4(a) => a.update_slot(slot, value),
            Dense::Hll6(a) => Ok(a.update_slot(slot, value)),
            Dense::Hll8(a) => Ok(a.update_slot(slot, value)),
        }
    }

    fn num_zero_registers(&self) -> u32 {
        match self {
            Dense::Hll4(a) => a.num_zero_registers(),
            Dense::Hll6(a) => a.num_zero_registers(),
            Dense::Hll8(a) => a.num_zero_registers(),
        }
    }

    fn estimate(&self, lg_config_k: u8) -> f64 {
        match self {
            Dense::Hll4(a) => a.estimate(lg_config_k),
            Dense::Hll6(a) => a.estimate(lg_config_k),
            Dense::Hll8(a) => a.estimate(lg_config_k),
        }
    }

    fn set_out_of_order(&mut self, ooo: bool) {
        match self {
            Dense::Hll4(a) => a.set_out_of_order(ooo),
            Dense::Hll6(a) => a.set_out_of_order(ooo),
            Dense::Hll8(a) => a.set_out_of_order(ooo),
        }
    }

    fn len(&self) -> usize {
        match self {
            Dense::Hll4(a) => a.len(),
            Dense::Hll6(a) => a.len(),
            Dense::Hll8(a) => a.len(),
        }
    }

    fn registers(&self) -> Vec<(usize, u8)> {
        match self {
            Dense::Hll4(a) => a.iter().collect(),
            Dense::Hll6(a) => a.iter().collect(),
            Dense::Hll8(a) => a.iter().collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Storage {
    List(CouponList),
    Set(CouponHashSet),
    Hll(Dense),
}

/// A HyperLogLog sketch: add items with [`update`](HllSketch::update), read
/// back [`estimate`](HllSketch::estimate) at any time.
#[derive(Debug, Clone, PartialEq)]
pub struct HllSketch {
    lg_config_k: u8,
    tgt_type: TgtHllType,
    seed: u64,
    storage: Storage,
}

/// Builder for [`HllSketch`], mirroring the defaults used throughout this
/// crate (`lgK = 12`, `HLL_4`, the crate's default update seed).
#[derive(Debug, Clone)]
pub struct HllSketchBuilder {
    lg_config_k: u8,
    tgt_type: TgtHllType,
    seed: u64,
}

impl Default for HllSketchBuilder {
    fn default() -> Self {
        Self {
            lg_config_k: DEFAULT_LG_K,
            tgt_type: TgtHllType::Hll4,
            seed: DEFAULT_UPDATE_SEED,
        }
    }
}

impl HllSketchBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lg_config_k(mut self, lg_config_k: u8) -> Self {
        self.lg_config_k = lg_config_k;
        self
    }

    pub fn tgt_hll_type(mut self, tgt_type: TgtHllType) -> Self {
        self.tgt_type = tgt_type;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn build(self) -> Result<HllSketch, Error> {
        if !(MIN_LG_K..=MAX_LG_K).contains(&self.lg_config_k) {
            return Err(Error::invalid_argument(format!(
                "lgConfigK must be between {MIN_LG_K} and {MAX_LG_K}, got {}",
                self.lg_config_k
            )));
        }
        Ok(HllSketch {
            lg_config_k: self.lg_config_k,
            tgt_type: self.tgt_type,
            seed: self.seed,
            storage: Storage::List(CouponList::new()),
        })
    }
}

impl HllSketch {
    /// Builds a sketch with `lgK = 12`, `HLL_4` storage, and the crate's
    /// default update seed.
    pub fn new() -> Result<Self, Error> {
        HllSketchBuilder::new().build()
    }

    pub fn builder() -> HllSketchBuilder {
        HllSketchBuilder::new()
    }

    pub fn lg_config_k(&self) -> u8 {
        self.lg_config_k
    }

    pub fn tgt_hll_type(&self) -> TgtHllType {
        self.tgt_type
    }

    fn k(&self) -> usize {
        1usize << self.lg_config_k
    }

    pub fn is_empty(&self) -> bool {
        match &self.storage {
            Storage::List(l) => l.is_empty(),
            Storage::Set(s) => s.len() == 0,
            Storage::Hll(d) => d.num_zero_registers() as usize == d.len(),
        }
    }

    /// Hashes `item` and folds it into the sketch, escalating `LIST` → `SET`
    /// → `HLL` storage as needed.
    pub fn update<T: Hash>(&mut self, item: T) -> Result<(), Error> {
        let c = coupon(item, self.seed);
        self.update_coupon(c)
    }

    fn update_coupon(&mut self, c: u32) -> Result<(), Error> {
        match &mut self.storage {
            Storage::List(list) => {
                list.update(c);
                if list.len() > super::LIST_THRESHOLD || list.len() as u64 * 16 >= self.k() as u64
                {
                    self.promote_list_to_set();
                }
                Ok(())
            }
            Storage::Set(set) => {
                set.update(c);
                if (set.len() as u64) * 4 >= self.k() as u64 {
                    self.promote_set_to_hll()?;
                }
                Ok(())
            }
            Storage::Hll(dense) => {
                let mask = (self.k() - 1) as u32;
                let slot = (get_slot(c) & mask) as usize;
                dense.update_slot(slot, get_value(c))?;
                Ok(())
            }
        }
    }

    fn promote_list_to_set(&mut self) {
        let Storage::List(list) = &self.storage else {
            return;
        };
        let mut set = CouponHashSet::new(LG_SET_INIT);
        for c in list.iter() {
            set.update(c);
        }
        self.storage = Storage::Set(set);
    }

    fn promote_set_to_hll(&mut self) -> Result<(), Error> {
        let Storage::Set(set) = &self.storage else {
            return Ok(());
        };
        let mut dense = Dense::new(self.tgt_type, self.lg_config_k);
        let mask = (self.k() - 1) as u32;
        for c in set.iter() {
            let slot = (get_slot(c) & mask) as usize;
            dense.update_slot(slot, get_value(c))?;
        }
        self.storage = Storage::Hll(dense);
        Ok(())
    }

    /// Cardinality estimate: exact coupon count in `LIST`/`SET` mode, HIP (or
    /// composite, once out of order) in dense `HLL` mode.
    pub fn estimate(&self) -> f64 {
        match &self.storage {
            Storage::List(l) => l.len() as f64,
            Storage::Set(s) => s.len() as f64,
            Storage::Hll(d) => d.estimate(self.lg_config_k),
        }
    }

    fn relative_std_error(&self) -> f64 {
        // ~1.04/sqrt(k) is the classical HyperLogLog relative standard error;
        // HLL_4's extra quantization pushes it up slightly.
        let base = 1.04 / (self.k() as f64).sqrt();
        match self.tgt_type {
            TgtHllType::Hll4 => base * 1.04,
            _ => base,
        }
    }

    pub fn lower_bound(&self, num_std_dev: NumStdDev) -> f64 {
        match &self.storage {
            Storage::List(_) | Storage::Set(_) => self.estimate(),
            Storage::Hll(_) => {
                let est = self.estimate();
                (est * (1.0 - num_std_dev.as_u8() as f64 * self.relative_std_error())).max(0.0)
            }
        }
    }

    pub fn upper_bound(&self, num_std_dev: NumStdDev) -> f64 {
        match &self.storage {
            Storage::List(_) | Storage::Set(_) => self.estimate(),
            Storage::Hll(_) => {
                let est = self.estimate();
                est * (1.0 + num_std_dev.as_u8() as f64 * self.relative_std_error())
            }
        }
    }

    fn seed_hash(&self) -> u16 {
        compute_seed_hash(self.seed)
    }

    /// Folds `other` into `self`, escalating storage as needed. Once a dense
    /// merge has happened, the result is no longer HIP-accurate (see
    /// [`union::HllUnion`](super::union::HllUnion), which performs the same
    /// logic across mismatched `lgK`/type pairs).
    pub(crate) fn merge_from(&mut self, other: &HllSketch) -> Result<(), Error> {
        if self.seed_hash() != other.seed_hash() {
            return Err(Error::invalid_argument(
                "cannot merge HLL sketches built with different seeds",
            ));
        }
        match &other.storage {
            Storage::List(l) => {
                for c in l.iter() {
                    self.update_coupon(c)?;
                }
            }
            Storage::Set(s) => {
                for c in s.iter() {
                    self.update_coupon(c)?;
                }
            }
            Storage::Hll(d) => {
                if !matches!(self.storage, Storage::Hll(_)) {
                    self.storage = Storage::Hll(Dense::new(self.tgt_type, self.lg_config_k));
                }
                // Register addresses are always the low bits of a fixed
                // 26-bit hash, so re-masking onto `self`'s (generally
                // smaller or equal) lgK recovers the same addressing a
                // sketch built at that lgK from scratch would use. Merging
                // into a *larger* lgK than `other` was built with cannot
                // recover the address bits `other` already discarded; the
                // result is a conservative undercount rather than a panic,
                // which is why `HllUnion` picks its gadget's lgK as the
                // minimum across every sketch it has seen.
                let mask = (self.k() - 1) as u32;
                for (slot, value) in d.registers() {
                    let remapped = (slot as u32) & mask;
                    self.update_coupon_dense(remapped, value)?;
                }
                if let Storage::Hll(dense) = &mut self.storage {
                    dense.set_out_of_order(true);
                }
            }
        }
        Ok(())
    }

    fn update_coupon_dense(&mut self, slot: u32, value: u8) -> Result<(), Error> {
        if let Storage::Hll(dense) = &mut self.storage {
            dense.update_slot(slot as usize, value)?;
        }
        Ok(())
    }

    pub fn serialize(&self) -> Vec<u8> {
        let mode = match &self.storage {
            Storage::List(_) => Mode::List,
            Storage::Set(_) => Mode::Set,
            Storage::Hll(_) => Mode::Hll,
        };
        let mut out = SketchBytes::with_capacity(64);
        serialization::write_preamble(
            &mut out,
            self.lg_config_k,
            self.tgt_type,
            mode,
            self.seed_hash(),
        );
        match &self.storage {
            Storage::List(l) => {
                let coupons: Vec<u32> = l.iter().collect();
                serialization::write_coupons(&mut out, &coupons);
            }
            Storage::Set(s) => {
                let coupons: Vec<u32> = s.iter().collect();
                serialization::write_coupons(&mut out, &coupons);
            }
            Storage::Hll(d) => {
                let registers = d.registers();
                out.write_u32_le(d.len() as u32);
                out.write_u32_le(registers.len() as u32);
                for (slot, value) in registers {
                    out.write_u32_le(slot as u32);
                    out.write_u8(value);
                }
            }
        }
        out.into_bytes()
    }

    pub fn deserialize(bytes: &[u8]) -> Result<Self, Error> {
        let mut input = SketchSlice::new(bytes);
        let Preamble {
            lg_config_k,
            tgt_type,
            mode,
            seed_hash: _,
        } = serialization::read_preamble(&mut input)?;
        if !(MIN_LG_K..=MAX_LG_K).contains(&lg_config_k) {
            return Err(Error::deserial(format!(
                "lgConfigK out of range: {lg_config_k}"
            )));
        }
        let storage = match mode {
            Mode::List => {
                let coupons = serialization::read_coupons(&mut input)?;
                let mut list = CouponList::new();
                for c in coupons {
                    list.update(c);
                }
                Storage::List(list)
            }
            Mode::Set => {
                let coupons = serialization::read_coupons(&mut input)?;
                let mut set = CouponHashSet::new(LG_SET_INIT);
                for c in coupons {
                    set.update(c);
                }
                Storage::Set(set)
            }
            Mode::Hll => {
                let num_registers = input
                    .read_u32_le()
                    .map_err(|e| Error::insufficient_data_of("register count", e))?
                    as usize;
                if num_registers != 1usize << lg_config_k {
                    return Err(Error::deserial(format!(
                        "register count {num_registers} does not match lgConfigK {lg_config_k}"
                    )));
                }
                let num_nonzero = input
                    .read_u32_le()
                    .map_err(|e| Error::insufficient_data_of("non-zero register count", e))?;
                let mut dense = Dense::new(tgt_type, lg_config_k);
                for _ in 0..num_nonzero {
                    let slot = input
                        .read_u32_le()
                        .map_err(|e| Error::insufficient_data_of("register slot", e))?;
                    let value = input
                        .read_u8()
                        .map_err(|e| Error::insufficient_data_of("register value", e))?;
                    dense.update_slot(slot as usize, value)?;
                }
                dense.set_out_of_order(true);
                Storage::Hll(dense)
            }
        };
        Ok(HllSketch {
            lg_config_k,
            tgt_type,
            seed: DEFAULT_UPDATE_SEED,
            storage,
        })
    }
}
