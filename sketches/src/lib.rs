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

//! A software library of stochastic streaming algorithms (a.k.a. sketches)
//! for cardinality estimation and set operations.
//!
//! Three sketch families are provided:
//!
//! - [`theta`]: set-cardinality sketches supporting the intersection set
//!   operation over a shared hash-sampled universe.
//! - [`hll`]: HyperLogLog cardinality sketches, trading a little accuracy
//!   for much smaller memory footprints at large cardinalities.
//! - [`cpc`]: Compressed Probabilistic Counting cardinality sketches, with
//!   their own storage and confidence-bound math.
//!
//! [`common`], [`error`], [`hash`], and [`codec`] hold plumbing shared
//! across all three families.

pub mod codec;
pub mod common;
pub mod cpc;
pub mod error;
pub mod hash;
pub mod hll;
pub mod theta;
