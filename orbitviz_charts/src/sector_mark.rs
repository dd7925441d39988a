// Copyright 2025 the OrbitViz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Annular sector marks for the circular, coxcomb and sunburst charts.

use kurbo::Point;
use orbitviz_layout::{Segment, sector};
use peniko::Brush;

use crate::mark::{Mark, MarkId, PathMark, StrokeStyle};

/// A ring sector (or pie slice when `inner_radius` is 0).
///
/// Angles are in degrees clockwise from 12 o'clock, matching [`orbitviz_layout::kurbo_angle`].
#[derive(Clone, Debug)]
pub struct SectorMarkSpec {
    /// Stable mark id.
    pub id: MarkId,
    /// Ring center.
    pub center: Point,
    /// Radius of the hole; `0` gives a wedge.
    pub inner_radius: f64,
    /// Radius of the rim.
    pub outer_radius: f64,
    /// Start and sweep of the sector.
    pub segment: Segment,
    /// Fill paint.
    pub fill: Brush,
    /// Optional outline stroke.
    pub stroke: Option<StrokeStyle>,
    /// Paint order; defaults to [`SEGMENTS`](crate::SEGMENTS).
    pub z_index: i32,
}

impl SectorMarkSpec {
    /// An unfilled, unstroked sector between two radii.
    pub fn new(
        id: MarkId,
        center: Point,
        inner_radius: f64,
        outer_radius: f64,
        segment: Segment,
    ) -> Self {
        Self {
            id,
            center,
            inner_radius,
            outer_radius,
            segment,
            fill: Brush::default(),
            stroke: None,
            z_index: crate::z_order::SEGMENTS,
        }
    }

    /// Sets the fill paint.
    pub fn with_fill(mut self, fill: impl Into<Brush>) -> Self {
        self.fill = fill.into();
        self
    }

    /// Sets the outline stroke.
    pub fn with_stroke(mut self, stroke: StrokeStyle) -> Self {
        self.stroke = Some(stroke);
        self
    }

    /// Sets or clears the outline stroke.
    pub fn with_optional_stroke(mut self, stroke: Option<StrokeStyle>) -> Self {
        self.stroke = stroke;
        self
    }

    /// Overrides the paint order.
    pub fn with_z_index(mut self, z_index: i32) -> Self {
        self.z_index = z_index;
        self
    }

    /// Builds the closed sector path.
    pub fn mark(&self) -> Mark {
        let path = sector(
            self.center,
            self.inner_radius,
            self.outer_radius,
            self.segment,
        );
        Mark::path(
            self.id,
            self.z_index,
            PathMark::new(path)
                .with_fill(self.fill.clone())
                .with_optional_stroke(self.stroke.as_ref()),
        )
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use peniko::color::palette::css;

    use super::*;

    #[test]
    fn sector_emits_a_path_mark_with_bounds() {
        let sector = SectorMarkSpec::new(
            MarkId::from_raw(1),
            Point::new(50.0, 50.0),
            10.0,
            20.0,
            Segment::new(0.0, 90.0),
        )
        .with_fill(css::TOMATO)
        .with_stroke(StrokeStyle::solid(css::BLACK, 2.0));

        let mark = sector.mark();
        assert_eq!(mark.id, MarkId::from_raw(1));
        let bounds = mark.bounds().expect("sector has bounds");
        // A quarter ring starting at 12 o'clock sits in the upper-right quadrant.
        assert!(bounds.x0 >= 50.0 - 0.2, "bounds {bounds:?}");
        assert!(bounds.y1 <= 50.0 + 0.2, "bounds {bounds:?}");

        let p = mark.as_path().expect("path payload");
        assert_eq!(p.fill, css::TOMATO.into());
        assert_eq!(p.stroke, css::BLACK.into());
        assert_eq!(p.stroke_width, 2.0);
    }

    #[test]
    fn sector_without_stroke_has_zero_stroke_width() {
        let mark = SectorMarkSpec::new(
            MarkId::from_raw(1),
            Point::ORIGIN,
            0.0,
            10.0,
            Segment::new(0.0, 180.0),
        )
        .mark();
        assert_eq!(mark.as_path().map(|p| p.stroke_width), Some(0.0));
    }
}
