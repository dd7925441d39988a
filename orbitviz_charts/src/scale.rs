// Copyright 2025 the OrbitViz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Value and category scales for the cartesian charts.
//!
//! [`ScaleLinear`] places values along the value axis of the bar, box and comparison charts;
//! [`ScaleBand`] slices the category axis into equal bands with padding between them.

extern crate alloc;

use alloc::vec::Vec;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

/// Upper bound on the number of generated ticks.
const MAX_TICKS: f64 = 10_000.0;

/// Maps data values onto a pixel interval.
#[derive(Clone, Copy, Debug)]
pub struct ScaleLinear {
    domain: (f64, f64),
    range: (f64, f64),
}

impl ScaleLinear {
    /// Creates a scale sending `domain.0` to `range.0` and `domain.1` to `range.1`.
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    /// Pixel position of `value`.
    ///
    /// When both domain ends coincide every value lands on `range.0`.
    pub fn map(&self, value: f64) -> f64 {
        let (lo, hi) = self.domain;
        let width = hi - lo;
        if width == 0.0 {
            return self.range.0;
        }
        let (p0, p1) = self.range;
        p0 + (p1 - p0) * ((value - lo) / width)
    }

    /// First domain end.
    pub fn domain_min(&self) -> f64 {
        self.domain.0
    }

    /// Second domain end.
    pub fn domain_max(&self) -> f64 {
        self.domain.1
    }

    /// Round tick values covering the domain, aiming for about `count` intervals.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        TickRun::covering(self.domain, count).map_or_else(Vec::new, TickRun::values)
    }
}

/// A value domain waiting for its pixel range.
#[derive(Clone, Copy, Debug)]
pub struct ScaleLinearSpec {
    /// Data extent.
    pub domain: (f64, f64),
    /// Widen the extent outward to the nearest round ticks.
    pub nice: bool,
}

impl ScaleLinearSpec {
    /// A spec over `domain` that keeps the extent as given.
    pub fn new(domain: (f64, f64)) -> Self {
        Self {
            domain,
            nice: false,
        }
    }

    /// Turns outward rounding on or off.
    pub fn with_nice(mut self, nice: bool) -> Self {
        self.nice = nice;
        self
    }

    /// The extent the scale will use for `tick_count` ticks.
    pub fn resolved_domain(&self, tick_count: usize) -> (f64, f64) {
        if !self.nice {
            return self.domain;
        }
        match TickRun::covering(self.domain, tick_count) {
            Some(run) if run.intervals > 0 => (run.start, run.end()),
            _ => self.domain,
        }
    }

    /// Builds the scale over [`resolved_domain`](Self::resolved_domain).
    pub fn instantiate_resolved(&self, range: (f64, f64), tick_count: usize) -> ScaleLinear {
        ScaleLinear::new(self.resolved_domain(tick_count), range)
    }
}

/// Spacing between adjacent ticks, or `0` for fewer than two ticks.
pub(crate) fn tick_step(ticks: &[f64]) -> f64 {
    match ticks {
        [a, b, ..] => b - a,
        _ => 0.0,
    }
}

/// Evenly spaced ticks `start, start + step, ..., start + intervals * step`.
#[derive(Clone, Copy, Debug)]
struct TickRun {
    start: f64,
    step: f64,
    intervals: u64,
}

impl TickRun {
    /// The run of round ticks enclosing `domain`, or `None` when `count` is zero.
    fn covering(domain: (f64, f64), count: usize) -> Option<Self> {
        if count == 0 {
            return None;
        }
        let (lo, hi) = if domain.0 <= domain.1 {
            domain
        } else {
            (domain.1, domain.0)
        };
        if lo == hi {
            return Some(Self {
                start: lo,
                step: 0.0,
                intervals: 0,
            });
        }
        let step = round_step((hi - lo) / count as f64);
        if step == 0.0 {
            return Some(Self {
                start: lo,
                step: hi - lo,
                intervals: 1,
            });
        }
        let start = (lo / step).floor() * step;
        let span = ((hi / step).ceil() * step - start) / step;
        let intervals = span.round();
        if !intervals.is_finite() || intervals < 0.0 {
            return Some(Self {
                start,
                step,
                intervals: 0,
            });
        }
        #[allow(
            clippy::cast_possible_truncation,
            reason = "finite, non-negative and capped at MAX_TICKS"
        )]
        let intervals = intervals.min(MAX_TICKS) as u64;
        Some(Self {
            start,
            step,
            intervals,
        })
    }

    fn end(&self) -> f64 {
        self.start + self.step * self.intervals as f64
    }

    fn values(self) -> Vec<f64> {
        (0..=self.intervals)
            .map(|i| self.start + self.step * i as f64)
            .collect()
    }
}

/// Rounds a raw step to 1, 2, 5 or 10 times a power of ten.
fn round_step(raw: f64) -> f64 {
    if !raw.is_finite() || raw <= 0.0 {
        return 0.0;
    }
    let magnitude = 10_f64.powf(raw.log10().floor());
    let mantissa = raw / magnitude;
    let factor = [(7.5, 10.0), (3.5, 5.0), (1.5, 2.0)]
        .iter()
        .find(|(threshold, _)| mantissa >= *threshold)
        .map_or(1.0, |&(_, f)| f);
    factor * magnitude
}

/// Equal-width category bands laid along a pixel interval.
///
/// Padding is measured in band widths: `inner` between neighbours, `outer` before the
/// first band and after the last.
#[derive(Clone, Copy, Debug)]
pub struct ScaleBand {
    range: (f64, f64),
    count: usize,
    inner: f64,
    outer: f64,
}

impl ScaleBand {
    /// `count` bands over `range` with a tenth of a band of padding everywhere.
    pub fn new(range: (f64, f64), count: usize) -> Self {
        Self {
            range,
            count,
            inner: 0.1,
            outer: 0.1,
        }
    }

    /// Sets inner and outer padding; negative values clamp to zero.
    pub fn with_padding(mut self, inner: f64, outer: f64) -> Self {
        self.inner = inner.max(0.0);
        self.outer = outer.max(0.0);
        self
    }

    /// Width of one band.
    pub fn band_width(&self) -> f64 {
        if self.count == 0 {
            return 0.0;
        }
        let n = self.count as f64;
        let units = n + self.inner * (n - 1.0) + 2.0 * self.outer;
        if units == 0.0 {
            0.0
        } else {
            (self.range.1 - self.range.0).abs() / units
        }
    }

    /// Number of bands.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Leading edge of band `index`.
    pub fn x(&self, index: usize) -> f64 {
        let width = self.band_width();
        let origin = self.range.0.min(self.range.1) + width * self.outer;
        origin + index as f64 * width * (1.0 + self.inner)
    }

    /// Midpoint of band `index`.
    pub fn center(&self, index: usize) -> f64 {
        self.x(index) + 0.5 * self.band_width()
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn nice_domain_covers_data() {
        let spec = ScaleLinearSpec::new((0.0, 97.0)).with_nice(true);
        let (d0, d1) = spec.resolved_domain(5);
        assert_eq!(d0, 0.0);
        assert!(d1 >= 97.0, "nice max {d1} must cover the data");
        assert_eq!(d1, 100.0);
    }

    #[test]
    fn zero_domain_maps_to_range_start() {
        let s = ScaleLinear::new((3.0, 3.0), (10.0, 0.0));
        assert_eq!(s.map(3.0), 10.0);
        assert_eq!(s.ticks(5).len(), 1);
    }

    #[test]
    fn bands_fit_inside_range() {
        let b = ScaleBand::new((0.0, 100.0), 4);
        let last = b.x(3) + b.band_width();
        assert!(b.x(0) > 0.0);
        assert!(last < 100.0 + 1e-9, "last band ends at {last}");
        assert!(b.center(1) > b.x(1));
    }

    #[test]
    fn tick_step_of_short_lists_is_zero() {
        assert_eq!(tick_step(&[1.0]), 0.0);
        assert_eq!(tick_step(&[0.0, 20.0, 40.0]), 20.0);
    }
}
