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

//! Theta sketches for set cardinality estimation and the intersection
//! set operation over a shared hashed universe.

mod compact;
mod hash_table;
mod intersection;
mod serialization;
mod sketch;

pub use compact::CompactThetaSketch;
pub use intersection::ThetaIntersection;
pub use sketch::ThetaSketch;
pub use sketch::ThetaSketchBuilder;

/// A read-only view over a Theta sketch's retained hashes, shared by
/// [`ThetaSketch`] and [`CompactThetaSketch`] so operators like
/// [`ThetaIntersection`] can accept either.
pub trait ThetaSketchView {
    /// Whether the source set is logically empty.
    fn is_empty(&self) -> bool;

    /// Fingerprint of the hash seed used to build this sketch.
    fn seed_hash(&self) -> u16;

    /// Current theta threshold, as a raw 64-bit value.
    fn theta64(&self) -> u64;

    /// Number of retained hash entries.
    fn num_retained(&self) -> usize;

    /// Whether the retained hashes are sorted ascending.
    fn is_ordered(&self) -> bool;

    /// Iterator over the retained hash values.
    fn iter(&self) -> impl Iterator<Item = u64> + '_;
}

impl ThetaSketchView for ThetaSketch {
    fn is_empty(&self) -> bool {
        ThetaSketch::is_empty(self)
    }

    fn seed_hash(&self) -> u16 {
        ThetaSketch::seed_hash(self)
    }

    fn theta64(&self) -> u64 {
        ThetaSketch::theta64(self)
    }

    fn num_retained(&self) -> usize {
        ThetaSketch::num_retained(self)
    }

    fn is_ordered(&self) -> bool {
        // A mutable ThetaSketch's hash table is never kept sorted.
        false
    }

    fn iter(&self) -> impl Iterator<Item = u64> + '_ {
        ThetaSketch::iter(self)
    }
}

impl ThetaSketchView for CompactThetaSketch {
    fn is_empty(&self) -> bool {
        CompactThetaSketch::is_empty(self)
    }

    fn seed_hash(&self) -> u16 {
        CompactThetaSketch::seed_hash(self)
    }

    fn theta64(&self) -> u64 {
        CompactThetaSketch::theta64(self)
    }

    fn num_retained(&self) -> usize {
        CompactThetaSketch::num_retained(self)
    }

    fn is_ordered(&self) -> bool {
        CompactThetaSketch::is_ordered(self)
    }

    fn iter(&self) -> impl Iterator<Item = u64> + '_ {
        CompactThetaSketch::iter(self)
    }
}
