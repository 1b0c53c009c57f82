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

//! [`HllUnion`]: merges sketches that may differ in `lgK` and/or target
//! type.
//!
//! The union keeps an internal "gadget" sketch at `HLL_8` (the most
//! accurate register width) and at the smallest `lgK` seen so far. A sketch
//! built at a larger `lgK` than the gadget can always be losslessly folded
//! down (register addresses are a prefix of a fixed 26-bit hash, so
//! dropping high bits is exactly what building at a smaller `lgK` would
//! have done); a sketch built at a *smaller* `lgK` than the gadget forces
//! the gadget to shrink first, since there is no way to recover address
//! bits a smaller sketch never kept.

use crate::common::NumStdDev;
use crate::error::Error;

use super::sketch::{HllSketchBuilder, MAX_LG_K};
use super::{HllSketch, TgtHllType};

#[derive(Debug, Clone)]
pub struct HllUnion {
    gadget: HllSketch,
}

impl HllUnion {
    /// Creates a union that can accept sketches built at `lgK` up to
    /// `lg_max_k`; sketches built at a smaller `lgK` are accepted too, but
    /// shrink every sketch merged into the union down to their level.
    pub fn new(lg_max_k: u8) -> Result<Self, Error> {
        if lg_max_k > MAX_LG_K {
            return Err(Error::invalid_argument(format!(
                "lgMaxK must be at most {MAX_LG_K}, got {lg_max_k}"
            )));
        }
        let gadget = HllSketchBuilder::new()
            .lg_config_k(lg_max_k)
            .tgt_hll_type(TgtHllType::Hll8)
            .build()?;
        Ok(Self { gadget })
    }

    pub fn lg_max_k(&self) -> u8 {
        self.gadget.lg_config_k()
    }

    /// Folds `sketch` into the union, shrinking the union's effective `lgK`
    /// first if `sketch` was built with a smaller one.
    pub fn update(&mut self, sketch: &HllSketch) -> Result<(), Error> {
        if sketch.lg_config_k() < self.gadget.lg_config_k() {
            self.shrink_to(sketch.lg_config_k())?;
        }
        self.gadget.merge_from(sketch)
    }

    fn shrink_to(&mut self, lg_k: u8) -> Result<(), Error> {
        let mut smaller = HllSketchBuilder::new()
            .lg_config_k(lg_k)
            .tgt_hll_type(self.gadget.tgt_hll_type())
            .build()?;
        smaller.merge_from(&self.gadget)?;
        self.gadget = smaller;
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.gadget.is_empty()
    }

    pub fn estimate(&self) -> f64 {
        self.gadget.estimate()
    }

    pub fn lower_bound(&self, num_std_dev: NumStdDev) -> f64 {
        self.gadget.lower_bound(num_std_dev)
    }

    pub fn upper_bound(&self, num_std_dev: NumStdDev) -> f64 {
        self.gadget.upper_bound(num_std_dev)
    }

    /// Snapshots the union's current state as a standalone [`HllSketch`].
    pub fn to_sketch(&self) -> HllSketch {
        self.gadget.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn union_of_disjoint_sketches_sums_cardinalities() {
        let mut a = HllSketchBuilder::new().lg_config_k(10).build().unwrap();
        let mut b = HllSketchBuilder::new().lg_config_k(10).build().unwrap();
        for i in 0..100 {
            a.update(i).unwrap();
        }
        for i in 100..200 {
            b.update(i).unwrap();
        }
        let mut union = HllUnion::new(10).unwrap();
        union.update(&a).unwrap();
        union.update(&b).unwrap();
        let est = union.estimate();
        assert!((est - 200.0).abs() / 200.0 < 0.1, "estimate was {est}");
    }

    #[test]
    fn union_of_overlapping_sketches_does_not_double_count() {
        let mut a = HllSketchBuilder::new().lg_config_k(10).build().unwrap();
        let mut b = HllSketchBuilder::new().lg_config_k(10).build().unwrap();
        for i in 0..100 {
            a.update(i).unwrap();
            b.update(i).unwrap();
        }
        let mut union = HllUnion::new(10).unwrap();
        union.update(&a).unwrap();
        union.update(&b).unwrap();
        let est = union.estimate();
        assert!((est - 100.0).abs() / 100.0 < 0.1, "estimate was {est}");
    }

    #[test]
    fn union_shrinks_to_the_smallest_lg_k_seen() {
        let mut a = HllSketchBuilder::new().lg_config_k(12).build().unwrap();
        let mut b = HllSketchBuilder::new().lg_config_k(8).build().unwrap();
        for i in 0..50 {
            a.update(i).unwrap();
        }
        for i in 0..50 {
            b.update(i + 1000).unwrap();
        }
        let mut union = HllUnion::new(12).unwrap();
        union.update(&a).unwrap();
        assert_eq!(union.lg_max_k(), 12);
        union.update(&b).unwrap();
        assert_eq!(union.lg_max_k(), 8);
    }

    #[test]
    fn rejects_lg_max_k_above_range() {
        assert!(HllUnion::new(30).is_err());
    }
}
