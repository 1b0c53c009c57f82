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

//! CPC (Compressed Probabilistic Counting) sketches for cardinality
//! estimation.
//!
//! Exposes the same update/estimate/bound/merge surface as
//! [`hll`](crate::hll): [`CpcSketch::update`] hashes an item into a coupon
//! and folds it into sparse or dense storage (see [`sketch`]), escalating
//! between the two as described by [`Flavor`]/[`Format`]; [`CpcUnion`]
//! merges sketches across `lgK`s, same as [`hll::HllUnion`](crate::hll::HllUnion)
//! does. Confidence bounds come from CPC's own empirically tabulated
//! constants ([`cpc_confidence`]) rather than HLL's curve-fit ones. Internal
//! bit-stream compression and wire serialization are out of scope.

mod cpc_confidence;
mod estimator;
mod icon_estimator;
mod pair_table;
mod sketch;
mod union;

pub use sketch::CpcSketch;
pub use sketch::Flavor;
pub use sketch::Format;
pub use union::CpcUnion;
