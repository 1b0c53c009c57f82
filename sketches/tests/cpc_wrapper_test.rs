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

use datasketches::common::NumStdDev;
use datasketches::cpc::CpcSketch;
use datasketches::cpc::CpcUnion;
use googletest::assert_that;
use googletest::prelude::ge;
use googletest::prelude::le;

#[test]
fn test_cpc_union_matches_direct_accumulation() {
    let lg_k = 10;
    let mut sk1 = CpcSketch::new(lg_k);
    let mut sk2 = CpcSketch::new(lg_k);
    let mut sk_dst = CpcSketch::new(lg_k);

    let n = 100000u64;
    for i in 0..n {
        sk1.update(i);
        sk2.update(i + n);
        sk_dst.update(i);
        sk_dst.update(i + n);
    }

    let direct_est = sk_dst.estimate();

    let mut union = CpcUnion::new(lg_k);
    union.update(&sk1);
    union.update(&sk2);
    let merged = union.to_sketch();

    let merged_est = merged.estimate();
    let rel_err = (merged_est - direct_est).abs() / direct_est;
    assert!(
        rel_err < 0.1,
        "merged estimate {merged_est} too far from direct accumulation {direct_est}"
    );
    assert_that!(merged.estimate(), ge(merged.lower_bound(NumStdDev::Two)));
    assert_that!(merged.estimate(), le(merged.upper_bound(NumStdDev::Two)));
}
