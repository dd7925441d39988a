// Copyright 2025 the OrbitViz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Five-number summaries for box plots.

extern crate alloc;

use alloc::vec::Vec;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

/// Percentile of ascending `sorted` data by linear interpolation between closest ranks.
///
/// `p` is a fraction in `[0, 1]`; the rank is `p * (n - 1)`. Returns `NaN` for empty input.
pub fn percentile(sorted: &[f64], p: f64) -> f64 {
    match sorted {
        [] => f64::NAN,
        [only] => *only,
        _ => {
            let rank = p.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
            let lo = rank.floor();
            #[allow(
                clippy::cast_possible_truncation,
                reason = "rank is clamped to [0, len - 1]"
            )]
            let i = lo as usize;
            let frac = rank - lo;
            match sorted.get(i + 1) {
                Some(next) => sorted[i] + (next - sorted[i]) * frac,
                None => sorted[i],
            }
        }
    }
}

/// Box plot statistics for one series.
#[derive(Clone, Debug, PartialEq)]
pub struct BoxStats {
    /// Number of finite values summarized.
    pub count: usize,
    /// Smallest value.
    pub min: f64,
    /// First quartile.
    pub q1: f64,
    /// Median.
    pub median: f64,
    /// Third quartile.
    pub q3: f64,
    /// Largest value.
    pub max: f64,
    /// Interquartile range (`q3 - q1`).
    pub iqr: f64,
    /// Smallest value at or above `q1 - 1.5 * iqr`.
    pub lower_whisker: f64,
    /// Largest value at or below `q3 + 1.5 * iqr`.
    pub upper_whisker: f64,
    /// Values outside the whisker fences, ascending.
    pub outliers: Vec<f64>,
}

impl BoxStats {
    /// Summarizes `values`, ignoring non-finite entries.
    ///
    /// Returns `None` if no finite values remain.
    pub fn from_values(values: &[f64]) -> Option<Self> {
        let mut sorted: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
        if sorted.is_empty() {
            return None;
        }
        sorted.sort_by(f64::total_cmp);

        let q1 = percentile(&sorted, 0.25);
        let median = percentile(&sorted, 0.5);
        let q3 = percentile(&sorted, 0.75);
        let iqr = q3 - q1;
        let low_fence = q1 - 1.5 * iqr;
        let high_fence = q3 + 1.5 * iqr;

        let inside = || {
            sorted
                .iter()
                .copied()
                .filter(|v| *v >= low_fence && *v <= high_fence)
        };
        let lower_whisker = inside().next().unwrap_or(q1);
        let upper_whisker = inside().next_back().unwrap_or(q3);
        let outliers = sorted
            .iter()
            .copied()
            .filter(|v| *v < low_fence || *v > high_fence)
            .collect();

        Some(Self {
            count: sorted.len(),
            min: sorted[0],
            q1,
            median,
            q3,
            max: sorted[sorted.len() - 1],
            iqr,
            lower_whisker,
            upper_whisker,
            outliers,
        })
    }
}
