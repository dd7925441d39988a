// Copyright 2025 the OrbitViz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Path builders for segments, ribbons and links.
//!
//! Angles follow the [`crate::kurbo_angle`] convention (degrees, clockwise from 12 o'clock).
//! Every builder accepts degenerate input (coincident endpoints, zero-width segments) and
//! returns a path that may enclose no area.

use kurbo::{Arc, BezPath, Circle, Point, Shape, Vec2};

use crate::polar::{Polar, angular_mid, kurbo_angle, to_radians};
use crate::subdivide::Segment;

/// Flattening tolerance used when converting arcs to curves.
const TOLERANCE: f64 = 0.1;

fn append_arc(path: &mut BezPath, center: Point, radius: f64, start: f64, sweep: f64) {
    let arc = Arc {
        center,
        radii: Vec2::new(radius, radius),
        start_angle: kurbo_angle(start),
        sweep_angle: to_radians(sweep),
        x_rotation: 0.0,
    };
    path.extend(arc.append_iter(TOLERANCE));
}

/// A ring sector covering `segment` between `inner` and `outer` radii.
pub fn sector(center: Point, inner: f64, outer: f64, segment: Segment) -> BezPath {
    let circle = Circle::new(center, outer.max(0.0));
    let segment = circle.segment(
        inner.clamp(0.0, outer.max(0.0)),
        kurbo_angle(segment.start),
        to_radians(segment.width),
    );
    segment.path_elements(TOLERANCE).collect()
}

/// A ribbon connecting two angular sub-segments on the same circle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ribbon {
    /// Radius where the ribbon meets the segments.
    pub radius: f64,
    /// How far control points are pulled toward the center, in `[0, 1]`.
    ///
    /// `0` keeps them on the rim, `1` puts them at the center.
    pub spread: f64,
    /// Depth of the arrow tip drawn at the target end, if any.
    pub direction_indicator: Option<f64>,
}

impl Ribbon {
    /// Creates a ribbon builder with `spread = 1` and no direction indicator.
    pub fn new(radius: f64) -> Self {
        Self {
            radius,
            spread: 1.0,
            direction_indicator: None,
        }
    }

    /// Sets the control point spread.
    pub fn with_spread(mut self, spread: f64) -> Self {
        self.spread = spread;
        self
    }

    /// Draws an arrow tip of depth `depth` at the target end.
    pub fn with_direction_indicator(mut self, depth: f64) -> Self {
        self.direction_indicator = Some(depth);
        self
    }

    /// Disables the arrow tip.
    pub fn without_direction_indicator(mut self) -> Self {
        self.direction_indicator = None;
        self
    }

    fn control(&self, center: Point, a: f64, b: f64) -> Point {
        let spread = if self.spread.is_finite() {
            self.spread.clamp(0.0, 1.0)
        } else {
            1.0
        };
        Polar::new(self.radius * (1.0 - spread), angular_mid(a, b)).to_point(center)
    }

    /// Builds the ribbon path from `source` to `target`.
    pub fn path(&self, center: Point, source: Segment, target: Segment) -> BezPath {
        let r = self.radius;
        let at = |radius: f64, angle: f64| Polar::new(radius, angle).to_point(center);

        let mut path = BezPath::new();
        path.move_to(at(r, source.start));
        append_arc(&mut path, center, r, source.start, source.width);

        match self.direction_indicator {
            Some(depth) if depth > 0.0 => {
                let inner = (r - depth).max(0.0);
                path.quad_to(
                    self.control(center, source.end(), target.start),
                    at(inner, target.start),
                );
                path.line_to(at(r, target.mid()));
                path.line_to(at(inner, target.end()));
            }
            _ => {
                path.quad_to(
                    self.control(center, source.end(), target.start),
                    at(r, target.start),
                );
                append_arc(&mut path, center, r, target.start, target.width);
            }
        }

        path.quad_to(
            self.control(center, target.end(), source.start),
            at(r, source.start),
        );
        path.close_path();
        path
    }
}

/// A cubic link between two polar positions, bending through the mid radius.
///
/// The curve leaves `from` radially and arrives at `to` radially, widening outward when
/// `to` is farther from the center and narrowing when it is closer.
pub fn radial_link(center: Point, from: Polar, to: Polar) -> BezPath {
    let mid = (from.radius + to.radius) * 0.5;
    let mut path = BezPath::new();
    path.move_to(from.to_point(center));
    path.curve_to(
        Polar::new(mid, from.angle).to_point(center),
        Polar::new(mid, to.angle).to_point(center),
        to.to_point(center),
    );
    path
}

/// A horizontal band from `source` (a y range at `x0`) to `target` (a y range at `x1`).
///
/// Control points sit `curvature` of the way across from each end. With a direction
/// indicator the target edge becomes an arrow tip of the given depth.
pub fn band_link(
    source: Segment,
    target: Segment,
    x0: f64,
    x1: f64,
    curvature: f64,
    direction_indicator: Option<f64>,
) -> BezPath {
    let dx = x1 - x0;
    let cx0 = x0 + dx * curvature;
    let cx1 = x1 - dx * curvature;
    let tip = direction_indicator
        .filter(|d| *d > 0.0)
        .map(|d| d.min(dx.abs()));
    let x_end = tip.map_or(x1, |d| x1 - d * dx.signum());

    let mut path = BezPath::new();
    path.move_to((x0, source.start));
    path.curve_to(
        (cx0, source.start),
        (cx1, target.start),
        (x_end, target.start),
    );
    if tip.is_some() {
        path.line_to((x1, target.mid()));
        path.line_to((x_end, target.end()));
    } else {
        path.line_to((x1, target.end()));
    }
    path.curve_to((cx1, target.end()), (cx0, source.end()), (x0, source.end()));
    path.close_path();
    path
}

/// Which side of the baseline an [`arc_link`] bulges toward.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArcSide {
    /// Toward smaller y (up on screen).
    Above,
    /// Toward larger y (down on screen).
    Below,
}

/// A semicircular band of `thickness` joining two positions on a horizontal baseline.
pub fn arc_link(from_x: f64, to_x: f64, baseline: f64, thickness: f64, side: ArcSide) -> BezPath {
    let thickness = thickness.max(0.0);
    let cx = (from_x + to_x) * 0.5;
    let half = (to_x - from_x).abs() * 0.5;
    let outer = half + thickness * 0.5;
    let inner = (half - thickness * 0.5).max(0.0);
    let center = Point::new(cx, baseline);
    let sigma = match side {
        ArcSide::Above => 1.0,
        ArcSide::Below => -1.0,
    };
    let pi = core::f64::consts::PI;

    let mut path = BezPath::new();
    path.move_to((cx - outer, baseline));
    path.extend(
        Arc {
            center,
            radii: Vec2::new(outer, outer),
            start_angle: pi,
            sweep_angle: sigma * pi,
            x_rotation: 0.0,
        }
        .append_iter(TOLERANCE),
    );
    path.line_to((cx + inner, baseline));
    path.extend(
        Arc {
            center,
            radii: Vec2::new(inner, inner),
            start_angle: pi + sigma * pi,
            sweep_angle: -sigma * pi,
            x_rotation: 0.0,
        }
        .append_iter(TOLERANCE),
    );
    path.close_path();
    path
}
