// Copyright 2025 the OrbitViz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Proportional subdivision of a span.
//!
//! The same routine lays out circular charts (a span of up to 360 degrees) and linear ones
//! (a span in pixels), so [`Segment`] carries no unit.

extern crate alloc;

use alloc::vec::Vec;

/// A contiguous range `[start, start + width]`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Segment {
    /// Start of the range.
    pub start: f64,
    /// Extent of the range (never negative).
    pub width: f64,
}

impl Segment {
    /// Creates a segment.
    pub fn new(start: f64, width: f64) -> Self {
        Self { start, width }
    }

    /// End of the range.
    pub fn end(&self) -> f64 {
        self.start + self.width
    }

    /// Midpoint of the range.
    pub fn mid(&self) -> f64 {
        self.start + self.width * 0.5
    }

    /// Returns `true` if `x` lies within the range (inclusive).
    pub fn contains(&self, x: f64) -> bool {
        x >= self.start && x <= self.end()
    }

    /// Returns `true` if `other` lies within this range, allowing `eps` of slack on both ends.
    pub fn encloses(&self, other: &Self, eps: f64) -> bool {
        other.start >= self.start - eps && other.end() <= self.end() + eps
    }
}

/// Settings for splitting a span into value-proportional segments.
///
/// A *closed* subdivision wraps around (a full ring), so it has one gap per item. An *open*
/// subdivision has gaps only between neighbours.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Subdivision {
    /// Where the first segment starts.
    pub start: f64,
    /// Total span shared by segments and gaps.
    pub span: f64,
    /// Gap inserted after each segment (closed) or between segments (open).
    pub gap: f64,
    /// Whether the layout wraps around.
    pub closed: bool,
}

impl Default for Subdivision {
    fn default() -> Self {
        Self::full_circle()
    }
}

impl Subdivision {
    /// A closed 360-degree layout starting at 0 with no gaps.
    pub fn full_circle() -> Self {
        Self {
            start: 0.0,
            span: 360.0,
            gap: 0.0,
            closed: true,
        }
    }

    /// An open layout over `span` starting at 0 with no gaps.
    pub fn new(span: f64) -> Self {
        Self {
            start: 0.0,
            span,
            gap: 0.0,
            closed: false,
        }
    }

    /// Sets the start position.
    pub fn with_start(mut self, start: f64) -> Self {
        self.start = start;
        self
    }

    /// Sets the gap.
    pub fn with_gap(mut self, gap: f64) -> Self {
        self.gap = gap;
        self
    }

    /// Sets whether the layout wraps around.
    pub fn with_closed(mut self, closed: bool) -> Self {
        self.closed = closed;
        self
    }

    fn effective_span(&self) -> f64 {
        let span = if self.span.is_finite() {
            self.span.max(0.0)
        } else {
            0.0
        };
        if self.closed { span.min(360.0) } else { span }
    }

    fn gap_count(&self, n: usize) -> usize {
        if self.closed { n } else { n.saturating_sub(1) }
    }

    /// Gap actually used for `n` items.
    ///
    /// The gap shrinks when the requested gaps alone would exceed the span.
    pub fn effective_gap(&self, n: usize) -> f64 {
        let k = self.gap_count(n);
        if k == 0 || !self.gap.is_finite() || self.gap <= 0.0 {
            return 0.0;
        }
        let span = self.effective_span();
        let total = self.gap * k as f64;
        if total > span {
            span / k as f64
        } else {
            self.gap
        }
    }

    /// Span units per value unit, or `0` when the values sum to zero.
    pub fn scale(&self, values: &[f64]) -> f64 {
        let sum: f64 = values.iter().copied().map(sanitize).sum();
        if sum <= 0.0 {
            return 0.0;
        }
        let k = self.gap_count(values.len()) as f64;
        let available = (self.effective_span() - k * self.effective_gap(values.len())).max(0.0);
        available / sum
    }

    /// Splits the span into one segment per value, in order.
    ///
    /// Negative and non-finite values count as zero. If every value is zero the segments
    /// collapse to zero width at their start positions.
    pub fn subdivide(&self, values: &[f64]) -> Vec<Segment> {
        let gap = self.effective_gap(values.len());
        let step = self.scale(values);
        let mut cursor = self.start;
        values
            .iter()
            .map(|&v| {
                let width = sanitize(v) * step;
                let segment = Segment::new(cursor, width);
                cursor += width + gap;
                segment
            })
            .collect()
    }
}

fn sanitize(v: f64) -> f64 {
    if v.is_finite() && v > 0.0 { v } else { 0.0 }
}

/// Running sub-segment counters for stacking flows inside one item's segment.
///
/// Outgoing flows stack forward from the segment start, incoming flows stack backward from
/// the segment end. A cursor lives for one layout pass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FlowCursor {
    segment: Segment,
    per_unit: f64,
    next_outgoing: f64,
    next_incoming: f64,
}

impl FlowCursor {
    /// Creates a cursor mapping `total` value units onto `segment`.
    pub fn new(segment: Segment, total: f64) -> Self {
        let per_unit = if total.is_finite() && total > 0.0 {
            segment.width / total
        } else {
            0.0
        };
        Self {
            segment,
            per_unit,
            next_outgoing: segment.start,
            next_incoming: segment.end(),
        }
    }

    /// The segment this cursor stacks into.
    pub fn segment(&self) -> Segment {
        self.segment
    }

    /// Position where the next outgoing sub-segment starts.
    pub fn next_outgoing(&self) -> f64 {
        self.next_outgoing
    }

    /// Position where the next incoming sub-segment ends.
    pub fn next_incoming(&self) -> f64 {
        self.next_incoming
    }

    /// Reserves a sub-segment for an outgoing flow of `value`.
    pub fn take_outgoing(&mut self, value: f64) -> Segment {
        let width = sanitize(value) * self.per_unit;
        let out = Segment::new(self.next_outgoing, width);
        self.next_outgoing += width;
        out
    }

    /// Reserves a sub-segment for an incoming flow of `value`.
    pub fn take_incoming(&mut self, value: f64) -> Segment {
        let width = sanitize(value) * self.per_unit;
        self.next_incoming -= width;
        Segment::new(self.next_incoming, width)
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;

    use super::*;

    fn total(segments: &[Segment]) -> f64 {
        segments.iter().map(|s| s.width).sum()
    }

    #[test]
    fn open_layout_widths_and_gaps_fill_the_span() {
        let values = [3.0, 1.0, 4.0, 1.0, 5.0];
        let sub = Subdivision::new(270.0).with_gap(2.0);
        let segments = sub.subdivide(&values);
        assert_eq!(segments.len(), 5);
        let sum = total(&segments) + 4.0 * 2.0;
        assert!((sum - 270.0).abs() < 1e-9, "sum was {sum}");
        let last = segments.last().unwrap();
        assert!((last.end() - 270.0).abs() < 1e-9);
    }

    #[test]
    fn closed_layout_reserves_one_gap_per_item() {
        let values = [10.0, 20.0, 30.0];
        let sub = Subdivision::full_circle().with_gap(5.0);
        let segments = sub.subdivide(&values);
        let sum = total(&segments) + 3.0 * 5.0;
        assert!((sum - 360.0).abs() < 1e-9);
        assert!((segments[1].start - (segments[0].end() + 5.0)).abs() < 1e-9);
        assert!((segments[2].width / segments[0].width - 3.0).abs() < 1e-9);
    }

    #[test]
    fn widths_are_proportional_to_values() {
        let sub = Subdivision::full_circle();
        let segments = sub.subdivide(&[1.0, 1.0, 2.0]);
        assert_eq!(segments[0], Segment::new(0.0, 90.0));
        assert_eq!(segments[1], Segment::new(90.0, 90.0));
        assert_eq!(segments[2], Segment::new(180.0, 180.0));
    }

    #[test]
    fn start_offset_shifts_every_segment() {
        let sub = Subdivision::full_circle().with_start(-90.0);
        let segments = sub.subdivide(&[1.0, 1.0]);
        assert_eq!(segments[0].start, -90.0);
        assert_eq!(segments[1].start, 90.0);
    }

    #[test]
    fn single_open_item_ignores_the_gap() {
        let sub = Subdivision::new(100.0).with_gap(25.0);
        let segments = sub.subdivide(&[7.0]);
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].start, 0.0);
        assert!((segments[0].width - 100.0).abs() < 1e-9);
    }

    #[test]
    fn oversized_gap_shrinks_to_fit() {
        let sub = Subdivision::full_circle().with_gap(200.0);
        assert_eq!(sub.effective_gap(4), 90.0);
        let segments = sub.subdivide(&[1.0, 2.0, 3.0, 4.0]);
        assert!(segments.iter().all(|s| s.width == 0.0));
    }

    #[test]
    fn closed_span_is_clamped_to_a_full_turn() {
        let sub = Subdivision::full_circle().with_closed(true);
        let sub = Subdivision { span: 720.0, ..sub };
        let segments = sub.subdivide(&[1.0, 1.0]);
        assert!((total(&segments) - 360.0).abs() < 1e-9);
    }

    #[test]
    fn single_zero_item_collapses_without_nan() {
        let sub = Subdivision::full_circle().with_gap(3.0);
        let segments = sub.subdivide(&[0.0]);
        assert_eq!(segments, vec![Segment::new(0.0, 0.0)]);
        assert_eq!(sub.scale(&[0.0]), 0.0);
    }

    #[test]
    fn all_zero_values_advance_by_gap_only() {
        let sub = Subdivision::new(100.0).with_gap(10.0);
        let segments = sub.subdivide(&[0.0, 0.0, 0.0]);
        let starts: Vec<f64> = segments.iter().map(|s| s.start).collect();
        assert_eq!(starts, vec![0.0, 10.0, 20.0]);
        assert!(
            segments
                .iter()
                .all(|s| s.width == 0.0 && s.start.is_finite()),
            "zero widths at finite starts"
        );
    }

    #[test]
    fn negative_and_nan_values_count_as_zero() {
        let sub = Subdivision::new(100.0);
        let segments = sub.subdivide(&[-5.0, f64::NAN, 4.0]);
        assert_eq!(segments[0].width, 0.0);
        assert_eq!(segments[1].width, 0.0);
        assert_eq!(segments[2].width, 100.0);
    }

    #[test]
    fn empty_input_has_no_segments() {
        assert!(Subdivision::full_circle().subdivide(&[]).is_empty());
    }

    #[test]
    fn flow_cursor_stacks_from_both_ends() {
        let mut cursor = FlowCursor::new(Segment::new(10.0, 100.0), 10.0);
        assert_eq!(cursor.take_outgoing(2.0), Segment::new(10.0, 20.0));
        assert_eq!(cursor.take_outgoing(3.0), Segment::new(30.0, 30.0));
        assert_eq!(cursor.take_incoming(4.0), Segment::new(70.0, 40.0));
        assert_eq!(cursor.next_outgoing(), 60.0);
        assert_eq!(cursor.next_incoming(), 70.0);
    }

    #[test]
    fn flow_cursor_with_zero_total_yields_empty_slices() {
        let mut cursor = FlowCursor::new(Segment::new(5.0, 50.0), 0.0);
        let s = cursor.take_outgoing(3.0);
        assert_eq!(s, Segment::new(5.0, 0.0));
        let s = cursor.take_incoming(3.0);
        assert_eq!(s, Segment::new(55.0, 0.0));
    }
}
