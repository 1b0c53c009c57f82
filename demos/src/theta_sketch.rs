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

//! Example demonstrating theta sketch usage

use datasketches::theta::{ThetaIntersection, ThetaSketch};

fn main() {
    println!("=== Theta Sketch Example ===\n");

    println!("1. Basic Theta Sketch Usage:");
    let mut sketch = ThetaSketch::builder().lg_k(10).build();

    for i in 0..100 {
        sketch.update(format!("item_{i}"));
    }
    sketch.update("duplicate_item");
    sketch.update("duplicate_item");

    println!("   Estimate: {:.2}", sketch.estimate());
    println!("   Theta: {:.6}", sketch.theta());
    println!("   Num retained: {}", sketch.num_retained());
    println!();

    println!("2. Add more data to enter estimation mode:");
    for i in 0..5000 {
        sketch.update(format!("item_{i}"));
    }
    println!("   Estimate: {:.2}", sketch.estimate());
    println!("   Theta: {:.6}", sketch.theta());
    println!("   Num retained: {}", sketch.num_retained());
    println!();

    println!("3. Intersecting two overlapping sketches:");
    let mut left = ThetaSketch::builder().lg_k(12).build();
    let mut right = ThetaSketch::builder().lg_k(12).build();
    for i in 0..1000 {
        left.update(i);
    }
    for i in 500..1500 {
        right.update(i);
    }

    let mut intersection = ThetaIntersection::new_with_default_seed();
    intersection.update(&left).unwrap();
    intersection.update(&right).unwrap();
    let result = intersection.result().unwrap();

    println!("   Left estimate: {:.2}", left.estimate());
    println!("   Right estimate: {:.2}", right.estimate());
    println!("   Intersection estimate: {:.2}", result.estimate());
    println!("   (Expected overlap: ~500)");
}
