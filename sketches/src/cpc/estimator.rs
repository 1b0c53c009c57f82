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

//! Tracks the HIP accumulator while a sketch is updated directly, and falls
//! back to the ICON estimator once it has been merged.
//!
//! Mirrors [`hll::estimator::HipAccumulator`](crate::hll::estimator): every
//! row-max transition nudges `hip_accum` by `k / kxp` before `kxp` absorbs
//! the new value's weight. A merged sketch's rows were not raised one at a
//! time by a single update sequence, so its HIP trajectory is meaningless;
//! [`set_merged`](Estimator::set_merged) permanently switches it over to
//! [`icon_estimate`](super::icon_estimator::icon_estimate).

use crate::common::NumStdDev;
use crate::cpc::cpc_confidence::{
    get_hip_confidence_ub, hip_confidence_lb, icon_confidence_lb, icon_confidence_ub,
};
use crate::cpc::icon_estimator::icon_estimate;

#[inline]
fn inv_pow2(value: u8) -> f64 {
    f64::from_bits(((1023 - value as i32) as u64) << 52)
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Estimator {
    kxp: f64,
    hip_accum: f64,
    merged: bool,
}

impl Estimator {
    pub fn new(lg_k: u8) -> Self {
        Self {
            kxp: (1u64 << lg_k) as f64,
            hip_accum: 0.0,
            merged: false,
        }
    }

    /// Called when a row's max column rises from `old` to `new`; `old == 0`
    /// means the row was previously untouched.
    pub fn on_row_raised(&mut self, lg_k: u8, old: u8, new: u8) {
        let k = (1u64 << lg_k) as f64;
        if !self.merged {
            self.hip_accum += k / self.kxp;
        }
        self.kxp -= inv_pow2(old);
        self.kxp += inv_pow2(new);
    }

    pub fn set_merged(&mut self) {
        self.merged = true;
    }

    pub fn is_merged(&self) -> bool {
        self.merged
    }

    pub fn estimate(&self, lg_k: u8, num_coupons: u32) -> f64 {
        if self.merged {
            icon_estimate(lg_k, self.kxp, num_coupons)
        } else {
            self.hip_accum
        }
    }

    pub fn lower_bound(&self, lg_k: u8, num_coupons: u32, kappa: NumStdDev) -> f64 {
        if self.merged {
            icon_confidence_lb(lg_k, num_coupons, self.kxp, kappa)
        } else {
            hip_confidence_lb(lg_k, num_coupons, self.hip_accum, kappa)
        }
    }

    pub fn upper_bound(&self, lg_k: u8, num_coupons: u32, kappa: NumStdDev) -> f64 {
        if self.merged {
            icon_confidence_ub(lg_k, num_coupons, self.kxp, kappa)
        } else {
            get_hip_confidence_ub(lg_k, num_coupons, self.hip_accum, kappa)
        }
    }
}
