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

use datasketches::hll::{HllSketch, TgtHllType};

#[test]
fn basic_update() {
    let mut sketch = HllSketch::builder()
        .lg_config_k(12)
        .tgt_hll_type(TgtHllType::Hll8)
        .build()
        .unwrap();

    assert!(sketch.is_empty());
    assert_eq!(sketch.estimate(), 0.0);

    for i in 0..100 {
        sketch.update(i).unwrap();
    }

    let estimate = sketch.estimate();
    assert!(
        (estimate - 100.0).abs() < 20.0,
        "estimate should be close to 100, got {estimate}"
    );
}

#[test]
fn list_to_set_promotion() {
    let mut sketch = HllSketch::builder()
        .lg_config_k(12)
        .tgt_hll_type(TgtHllType::Hll8)
        .build()
        .unwrap();

    for i in 0..600 {
        sketch.update(i).unwrap();
    }

    let estimate = sketch.estimate();
    assert!(
        (estimate - 600.0).abs() < 100.0,
        "estimate should be close to 600 after LIST->SET promotion, got {estimate}"
    );
}

#[test]
fn set_to_hll_promotion() {
    let mut sketch = HllSketch::builder()
        .lg_config_k(10)
        .tgt_hll_type(TgtHllType::Hll8)
        .build()
        .unwrap();

    for i in 0..1000 {
        sketch.update(i).unwrap();
    }

    let estimate = sketch.estimate();
    assert!(
        (estimate - 1000.0).abs() < 150.0,
        "estimate should be close to 1000 after full promotion, got {estimate}"
    );
}

#[test]
fn duplicate_updates_do_not_inflate_the_estimate() {
    let mut sketch = HllSketch::builder()
        .lg_config_k(12)
        .tgt_hll_type(TgtHllType::Hll8)
        .build()
        .unwrap();

    for _ in 0..10 {
        for i in 0..100 {
            sketch.update(i).unwrap();
        }
    }

    let estimate = sketch.estimate();
    assert!(
        (estimate - 100.0).abs() < 20.0,
        "duplicates should not inflate the estimate, got {estimate}"
    );
}

#[test]
fn mixed_item_types_each_count_once() {
    let mut sketch = HllSketch::builder()
        .lg_config_k(10)
        .tgt_hll_type(TgtHllType::Hll8)
        .build()
        .unwrap();

    sketch.update(42i32).unwrap();
    sketch.update("hello").unwrap();
    sketch.update(100u64).unwrap();
    sketch.update(true).unwrap();
    sketch.update(vec![1, 2, 3]).unwrap();

    assert!(sketch.estimate() >= 5.0);
}

#[test]
fn hll4_tracks_large_cardinality() {
    let mut sketch = HllSketch::builder()
        .lg_config_k(12)
        .tgt_hll_type(TgtHllType::Hll4)
        .build()
        .unwrap();

    for i in 0..1000 {
        sketch.update(i).unwrap();
    }

    let estimate = sketch.estimate();
    assert!(
        (estimate - 1000.0).abs() < 200.0,
        "HLL_4 estimate should be reasonable, got {estimate}"
    );
}

#[test]
fn hll6_tracks_large_cardinality() {
    let mut sketch = HllSketch::builder()
        .lg_config_k(12)
        .tgt_hll_type(TgtHllType::Hll6)
        .build()
        .unwrap();

    for i in 0..1000 {
        sketch.update(i).unwrap();
    }

    let estimate = sketch.estimate();
    assert!(
        (estimate - 1000.0).abs() < 200.0,
        "HLL_6 estimate should be reasonable, got {estimate}"
    );
}

#[test]
fn serialization_roundtrip_after_full_promotion() {
    let mut sketch = HllSketch::builder()
        .lg_config_k(12)
        .tgt_hll_type(TgtHllType::Hll8)
        .build()
        .unwrap();

    for i in 0..2000 {
        sketch.update(i).unwrap();
    }

    let estimate1 = sketch.estimate();
    let bytes = sketch.serialize();
    let restored = HllSketch::deserialize(&bytes).unwrap();
    let estimate2 = restored.estimate();

    let relative_error = (estimate1 - estimate2).abs() / estimate1;
    assert!(
        relative_error < 0.05,
        "estimates should match after a round trip, got {estimate1} vs {estimate2}"
    );
}

#[test]
fn large_cardinality_stays_within_expected_error() {
    let mut sketch = HllSketch::builder()
        .lg_config_k(14)
        .tgt_hll_type(TgtHllType::Hll8)
        .build()
        .unwrap();

    for i in 0..100_000 {
        sketch.update(i).unwrap();
    }

    let estimate = sketch.estimate();
    let relative_error = (estimate - 100_000.0).abs() / 100_000.0;
    assert!(
        relative_error < 0.05,
        "relative error should be under 5% for lgK=14, got {:.2}%",
        relative_error * 100.0
    );
}

#[test]
fn equal_sketches_compare_equal() {
    let mut sketch1 = HllSketch::builder().lg_config_k(10).build().unwrap();
    let mut sketch2 = HllSketch::builder().lg_config_k(10).build().unwrap();

    assert_eq!(sketch1, sketch2);

    for i in 0..100 {
        sketch1.update(i).unwrap();
        sketch2.update(i).unwrap();
    }
    assert_eq!(sketch1, sketch2);

    sketch2.update(999).unwrap();
    assert_ne!(sketch1, sketch2);
}

#[test]
fn rejects_lg_config_k_out_of_range() {
    assert!(HllSketch::builder().lg_config_k(3).build().is_err());
    assert!(HllSketch::builder().lg_config_k(22).build().is_err());
}
