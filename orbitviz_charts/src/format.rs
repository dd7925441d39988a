// Copyright 2025 the OrbitViz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Number formatting for value and tick labels.

extern crate alloc;

use alloc::format;
use alloc::string::String;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

/// Formats `value` with as many decimals as `step` needs to tell neighbors apart.
///
/// `step` is the spacing between adjacent labels (a tick step, or `0` when unknown). With no
/// usable step, whole numbers print without decimals and others with two.
pub fn format_value(value: f64, step: f64) -> String {
    if !value.is_finite() {
        return format!("{value}");
    }
    let decimals = decimals_for(value, step);
    let scale = 10_f64.powi(decimals);
    let mut rounded = (value * scale).round() / scale;
    if rounded == 0.0 {
        // Avoids printing "-0".
        rounded = 0.0;
    }
    #[allow(clippy::cast_sign_loss, reason = "`decimals_for` returns 0..=10")]
    let precision = decimals as usize;
    format!("{rounded:.precision$}")
}

fn decimals_for(value: f64, step: f64) -> i32 {
    let step = step.abs();
    if step.is_finite() && step > 0.0 {
        if step >= 1.0 {
            return 0;
        }
        let d = (-step.log10() - 1e-9).ceil().clamp(0.0, 10.0);
        #[allow(clippy::cast_possible_truncation, reason = "clamped to 0..=10")]
        let d = d as i32;
        return d;
    }
    if value == value.floor() { 0 } else { 2 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decimals_follow_step() {
        assert_eq!(format_value(1234.0, 100.0), "1234");
        assert_eq!(format_value(0.25, 0.05), "0.25");
        assert_eq!(format_value(2.0, 0.5), "2.0");
        assert_eq!(format_value(1.0 / 3.0, 0.1), "0.3");
    }

    #[test]
    fn no_step_falls_back() {
        assert_eq!(format_value(40.0, 0.0), "40");
        assert_eq!(format_value(2.5, 0.0), "2.50");
    }

    #[test]
    fn negative_zero_prints_as_zero() {
        assert_eq!(format_value(-0.0001, 1.0), "0");
    }
}
