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

//! Shared helpers used by more than one sketch family: confidence-bound
//! math, growth factors, and canonicalization rules.

/// Number of standard deviations used to express a confidence interval.
///
/// Matches the three tiers the DataSketches family exposes: roughly the 1-,
/// 2-, and 3-sigma bounds of a normal approximation (~68%, ~95%, ~99.7%).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumStdDev {
    /// One standard deviation (~68% confidence).
    One,
    /// Two standard deviations (~95% confidence).
    Two,
    /// Three standard deviations (~99.7% confidence).
    Three,
}

impl NumStdDev {
    /// Returns this value as a small positive integer (1, 2, or 3).
    pub fn as_u8(self) -> u8 {
        match self {
            NumStdDev::One => 1,
            NumStdDev::Two => 2,
            NumStdDev::Three => 3,
        }
    }

    fn as_f64(self) -> f64 {
        self.as_u8() as f64
    }
}

/// Growth factor used by open-addressed tables when they resize.
///
/// The value doubles `lg_value()` times on each resize step (e.g. `X4` grows
/// the table by `1 << 2` each time it needs more room).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeFactor {
    /// Never grow automatically; jump straight to the target size.
    X1,
    /// Double the table on each growth step.
    X2,
    /// Quadruple the table on each growth step.
    X4,
    /// Grow the table eightfold on each growth step.
    X8,
}

impl ResizeFactor {
    /// Returns `log2` of the growth multiplier.
    pub fn lg_value(self) -> u8 {
        match self {
            ResizeFactor::X1 => 0,
            ResizeFactor::X2 => 1,
            ResizeFactor::X4 => 2,
            ResizeFactor::X8 => 3,
        }
    }
}

/// Canonicalizes a `f64` so that values that should be considered the same
/// key hash identically.
///
/// `-0.0` is folded into `+0.0` so that "positive zero" and "negative zero"
/// updates are treated as a single distinct value, matching the behavior of
/// `Double.doubleToLongBits` canonicalization in the reference
/// implementations. `NaN` is folded to a single canonical bit pattern for the
/// same reason.
pub fn canonical_double(value: f64) -> f64 {
    if value == 0.0 {
        0.0
    } else if value.is_nan() {
        f64::NAN
    } else {
        value
    }
}

/// Normal-approximation confidence bounds for theta-sketch-style estimators.
///
/// These sketches estimate cardinality as `count / theta`, where `count` is
/// the number of retained hashes below the sampling threshold `theta`. The
/// relative standard error of that ratio is approximated (as in the
/// reference DataSketches implementations) by treating retained hashes as a
/// binomial sample of the true distinct count, giving `stdDev ≈
/// estimate * sqrt((1 - theta) / (theta * count))`.
pub mod binomial_bounds {
    use crate::error::Error;

    use super::NumStdDev;

    /// Returns the approximate lower confidence bound for an estimate derived
    /// from `count` retained entries at sampling threshold `theta`.
    ///
    /// # Errors
    ///
    /// Returns an error if `theta` is not in `(0.0, 1.0]`.
    pub fn lower_bound(count: u64, theta: f64, num_std_dev: NumStdDev) -> Result<f64, Error> {
        let estimate = estimate_and_std_dev(count, theta, num_std_dev)?;
        Ok((estimate.0 - estimate.1).max(count as f64))
    }

    /// Returns the approximate upper confidence bound for an estimate derived
    /// from `count` retained entries at sampling threshold `theta`.
    ///
    /// `is_empty` widens the bound to exactly `0.0` for an empty sketch,
    /// matching the reference behavior that an empty sketch reports zero
    /// bounds rather than a degenerate positive one.
    ///
    /// # Errors
    ///
    /// Returns an error if `theta` is not in `(0.0, 1.0]`.
    pub fn upper_bound(
        count: u64,
        theta: f64,
        num_std_dev: NumStdDev,
        is_empty: bool,
    ) -> Result<f64, Error> {
        if is_empty {
            return Ok(0.0);
        }
        let estimate = estimate_and_std_dev(count, theta, num_std_dev)?;
        Ok(estimate.0 + estimate.1)
    }

    fn estimate_and_std_dev(
        count: u64,
        theta: f64,
        num_std_dev: NumStdDev,
    ) -> Result<(f64, f64), Error> {
        if !(theta > 0.0 && theta <= 1.0) {
            return Err(Error::invalid_argument(format!(
                "theta must be in (0.0, 1.0], got {theta}"
            )));
        }
        let count = count as f64;
        let estimate = count / theta;
        if count == 0.0 {
            return Ok((estimate, 0.0));
        }
        let variance = (1.0 - theta) / theta / count;
        let std_dev = estimate * variance.sqrt();
        Ok((estimate, num_std_dev.as_f64() * std_dev))
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn exact_mode_has_no_slack() {
            let lb = lower_bound(100, 1.0, NumStdDev::Two).unwrap();
            let ub = upper_bound(100, 1.0, NumStdDev::Two, false).unwrap();
            assert_eq!(lb, 100.0);
            assert_eq!(ub, 100.0);
        }

        #[test]
        fn bounds_straddle_estimate() {
            let theta = 0.1;
            let count = 1000;
            let estimate = count as f64 / theta;
            let lb = lower_bound(count, theta, NumStdDev::Two).unwrap();
            let ub = upper_bound(count, theta, NumStdDev::Two, false).unwrap();
            assert!(lb <= estimate);
            assert!(estimate <= ub);
        }

        #[test]
        fn empty_sketch_has_zero_bounds() {
            let ub = upper_bound(0, 1.0, NumStdDev::Two, true).unwrap();
            assert_eq!(ub, 0.0);
        }

        #[test]
        fn rejects_invalid_theta() {
            assert!(lower_bound(10, 0.0, NumStdDev::One).is_err());
            assert!(lower_bound(10, 1.5, NumStdDev::One).is_err());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_double_folds_negative_zero() {
        assert_eq!(canonical_double(-0.0).to_bits(), 0.0f64.to_bits());
        assert_eq!(canonical_double(0.0).to_bits(), 0.0f64.to_bits());
    }

    #[test]
    fn canonical_double_folds_nan() {
        assert!(canonical_double(f64::NAN.copysign(-1.0)).is_nan());
    }

    #[test]
    fn canonical_double_leaves_other_values_alone() {
        assert_eq!(canonical_double(1.5), 1.5);
    }

    #[test]
    fn resize_factor_lg_values() {
        assert_eq!(ResizeFactor::X1.lg_value(), 0);
        assert_eq!(ResizeFactor::X8.lg_value(), 3);
    }
}
