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

//! [`CpcUnion`]: merges CPC sketches, possibly built at different `lgK`s.
//!
//! Mirrors [`hll::union::HllUnion`](crate::hll::union): keeps an internal
//! "gadget" sketch at the smallest `lgK` seen so far, shrinking it first
//! when a smaller sketch arrives. Any merge permanently drops HIP tracking
//! in favor of the ICON estimator, since the combined rows no longer came
//! from a single well-ordered update sequence.

use crate::common::NumStdDev;

use super::sketch::{CpcSketch, MAX_LG_K};

#[derive(Debug, Clone)]
pub struct CpcUnion {
    gadget: CpcSketch,
}

impl CpcUnion {
    /// Creates a union that can accept sketches built at `lg_k` up to the
    /// given value; sketches built at a smaller `lgK` are accepted too, but
    /// shrink the union down to their level.
    pub fn new(lg_k: u8) -> Self {
        Self {
            gadget: CpcSketch::new(lg_k.min(MAX_LG_K)),
        }
    }

    /// Returns the union's current `lgK`, which may have shrunk since
    /// construction.
    pub fn lg_k(&self) -> u8 {
        self.gadget.lg_k()
    }

    /// Folds `sketch` into the union, shrinking the union's effective `lgK`
    /// first if `sketch` was built with a smaller one.
    pub fn update(&mut self, sketch: &CpcSketch) {
        if sketch.lg_k() < self.gadget.lg_k() {
            self.shrink_to(sketch.lg_k());
        }
        for (row, col) in sketch.pairs() {
            self.gadget.update_pair_masked(row, col);
        }
        self.gadget.mark_merged();
    }

    fn shrink_to(&mut self, lg_k: u8) {
        let mut smaller = CpcSketch::new(lg_k);
        for (row, col) in self.gadget.pairs() {
            smaller.update_pair_masked(row, col);
        }
        smaller.mark_merged();
        self.gadget = smaller;
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

    /// Snapshots the union's current state as a standalone [`CpcSketch`].
    pub fn to_sketch(&self) -> CpcSketch {
        self.gadget.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn union_of_disjoint_sketches_sums_cardinalities() {
        let mut a = CpcSketch::new(10);
        let mut b = CpcSketch::new(10);
        for i in 0..1000u64 {
            a.update(i);
        }
        for i in 1000..2000u64 {
            b.update(i);
        }
        let mut u = CpcUnion::new(10);
        u.update(&a);
        u.update(&b);
        let est = u.estimate();
        assert!((est - 2000.0).abs() / 2000.0 < 0.1, "estimate was {est}");
    }

    #[test]
    fn union_of_overlapping_sketches_does_not_double_count() {
        let mut a = CpcSketch::new(10);
        let mut b = CpcSketch::new(10);
        for i in 0..1000u64 {
            a.update(i);
            b.update(i);
        }
        let mut u = CpcUnion::new(10);
        u.update(&a);
        u.update(&b);
        let est = u.estimate();
        assert!((est - 1000.0).abs() / 1000.0 < 0.1, "estimate was {est}");
    }

    #[test]
    fn union_shrinks_to_the_smallest_lg_k_seen() {
        let mut a = CpcSketch::new(12);
        let mut b = CpcSketch::new(8);
        for i in 0..50u64 {
            a.update(i);
        }
        for i in 0..50u64 {
            b.update(i + 1000);
        }
        let mut u = CpcUnion::new(12);
        u.update(&a);
        assert_eq!(u.lg_k(), 12);
        u.update(&b);
        assert_eq!(u.lg_k(), 8);
    }
}
