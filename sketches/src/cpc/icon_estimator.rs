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

//! Post-merge ("ICON") cardinality estimator.
//!
//! A [`super::sketch::CpcSketch`] keeps at most one coupon per row (see
//! [`super::pair_table`]), so `kxp` here plays exactly the role
//! [`hll::estimator`](crate::hll::estimator)'s `kxq0 + kxq1` does: the sum of
//! `2^-value` over every row's current value. Once a sketch has been merged
//! its HIP trajectory is no longer valid (the merged rows were not folded in
//! one at a time by a single update sequence), so estimation falls back to
//! this raw-harmonic-mean / linear-counting blend instead, the same formula
//! `hll::estimator::composite_estimate` uses for its own raw fallback.

pub(crate) fn icon_estimate(lg_k: u8, kxp: f64, num_coupons: u32) -> f64 {
    let k = (1u64 << lg_k) as f64;
    let alpha = match lg_k {
        4 => 0.673,
        5 => 0.697,
        6 => 0.709,
        _ => 0.7213 / (1.0 + 1.079 / k),
    };
    let raw = alpha * k * k / kxp;
    let num_zero = (k as u32).saturating_sub(num_coupons);
    if num_zero == 0 || raw > 2.5 * k {
        raw
    } else {
        k * (k / num_zero as f64).ln()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn saturated_kxp_falls_back_to_raw_estimate() {
        let lg_k = 10u8;
        let k = (1u64 << lg_k) as f64;
        let est = icon_estimate(lg_k, 1.0, k as u32);
        assert!(est > k, "saturated estimate should be well above k, got {est}");
    }

    #[test]
    fn untouched_sketch_estimates_near_zero() {
        let lg_k = 10u8;
        let k = (1u64 << lg_k) as f64;
        let est = icon_estimate(lg_k, k, 0);
        assert!(est.abs() < 1e-9, "expected ~0.0, got {est}");
    }

    #[test]
    fn estimate_grows_as_coupons_accumulate() {
        let lg_k = 11u8;
        let k = (1u64 << lg_k) as f64;
        let few = icon_estimate(lg_k, k - 10.0, 10);
        let many = icon_estimate(lg_k, k - 500.0, 500);
        assert!(many > few);
    }
}
