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

//! Example demonstrating HLL sketch usage

use datasketches::hll::{HllSketch, TgtHllType};

fn main() {
    // lg_config_k=12 means 4096 registers, ~1.6% relative error
    let mut sketch = HllSketch::builder()
        .lg_config_k(12)
        .tgt_hll_type(TgtHllType::Hll8)
        .build()
        .unwrap();

    println!("Created HLL sketch with lgConfigK=12 (K=4096)");
    println!("Initial estimate: {}", sketch.estimate());

    println!("\nAdding 10,000 unique integers...");
    for i in 0..10_000u64 {
        sketch.update(i).unwrap();
    }

    let estimate = sketch.estimate();
    let actual = 10_000;
    let error = ((estimate - actual as f64) / actual as f64 * 100.0).abs();

    println!("Actual unique values: {actual}");
    println!("Estimated unique values: {estimate:.2}");
    println!("Relative error: {error:.2}%");

    println!("\nAdding the same 10,000 values again...");
    for i in 0..10_000u64 {
        sketch.update(i).unwrap();
    }
    let estimate2 = sketch.estimate();
    println!("Estimate after duplicates: {estimate2:.2}");
    println!("(Should remain ~10,000, got {estimate2:.2})");

    println!("\nSerializing sketch...");
    let bytes = sketch.serialize();
    println!("Serialized size: {} bytes", bytes.len());

    let sketch2 = HllSketch::deserialize(&bytes).unwrap();
    let estimate3 = sketch2.estimate();
    println!("Estimate after deserialization: {estimate3:.2}");

    println!("\nDebug: {sketch2:?}");

    println!("\nHLL works with any hashable type:");
    let mut multi_sketch = HllSketch::builder()
        .lg_config_k(10)
        .tgt_hll_type(TgtHllType::Hll6)
        .build()
        .unwrap();
    multi_sketch.update("hello").unwrap();
    multi_sketch.update("world").unwrap();
    multi_sketch.update(42).unwrap();
    multi_sketch.update(vec![1, 2, 3]).unwrap();
    println!("Estimate with mixed types: {:.2}", multi_sketch.estimate());
}
