// Copyright 2025 the OrbitViz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Polar coordinates in chart convention.
//!
//! Angles are degrees, `0` points to 12 o'clock and angles grow clockwise on a y-down
//! screen. kurbo measures radians from the +x axis, also clockwise on a y-down screen, so the
//! two differ by a quarter turn (see [`kurbo_angle`]).

use kurbo::{Affine, Point};

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

/// Converts degrees to radians.
pub fn to_radians(degrees: f64) -> f64 {
    degrees * (core::f64::consts::PI / 180.0)
}

/// Converts a chart angle (degrees from 12 o'clock) into a kurbo angle (radians from +x).
pub fn kurbo_angle(degrees: f64) -> f64 {
    to_radians(degrees - 90.0)
}

/// Wraps an angle into `[0, 360)`.
pub fn normalize_degrees(degrees: f64) -> f64 {
    let a = degrees.rem_euclid(360.0);
    // `rem_euclid` can round up to exactly 360 for tiny negative inputs.
    if a >= 360.0 { 0.0 } else { a }
}

/// Midpoint between two angles along the shorter arc, in `[0, 360)`.
pub fn angular_mid(a: f64, b: f64) -> f64 {
    let mut d = normalize_degrees(b - a);
    if d > 180.0 {
        d -= 360.0;
    }
    normalize_degrees(a + d * 0.5)
}

/// Rotates `p` clockwise (on screen) around `center` by `degrees`.
pub fn rotate_point(p: Point, center: Point, degrees: f64) -> Point {
    Affine::rotate_about(to_radians(degrees), center) * p
}

/// A point given as a radius and a chart angle around some center.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Polar {
    /// Distance from the center.
    pub radius: f64,
    /// Chart angle in degrees.
    pub angle: f64,
}

impl Polar {
    /// Creates a polar coordinate.
    pub fn new(radius: f64, angle: f64) -> Self {
        Self { radius, angle }
    }

    /// Resolves this coordinate around `center`.
    pub fn to_point(self, center: Point) -> Point {
        let t = to_radians(self.angle);
        Point::new(
            center.x + self.radius * t.sin(),
            center.y - self.radius * t.cos(),
        )
    }

    /// Expresses `p` in polar form around `center`.
    pub fn from_point(center: Point, p: Point) -> Self {
        let dx = p.x - center.x;
        let dy = p.y - center.y;
        let radius = (dx * dx + dy * dy).sqrt();
        let angle = normalize_degrees(dx.atan2(-dy) * (180.0 / core::f64::consts::PI));
        Self { radius, angle }
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    fn close(a: Point, b: Point) -> bool {
        (a.x - b.x).abs() < 1e-9 && (a.y - b.y).abs() < 1e-9
    }

    #[test]
    fn zero_degrees_points_up_and_ninety_points_right() {
        let c = Point::new(100.0, 100.0);
        let cases = [
            (0.0, Point::new(100.0, 90.0)),
            (90.0, Point::new(110.0, 100.0)),
            (180.0, Point::new(100.0, 110.0)),
            (270.0, Point::new(90.0, 100.0)),
        ];
        for (angle, expected) in cases {
            let p = Polar::new(10.0, angle).to_point(c);
            assert!(close(p, expected), "{angle} maps to {p:?}");
        }
    }

    #[test]
    fn from_point_inverts_to_point() {
        let c = Point::new(3.0, -4.0);
        for angle in [0.0, 45.0, 135.0, 200.0, 359.0] {
            let p = Polar::new(7.5, angle).to_point(c);
            let back = Polar::from_point(c, p);
            assert!((back.radius - 7.5).abs() < 1e-9);
            assert!(
                (back.angle - angle).abs() < 1e-9,
                "{angle} -> {}",
                back.angle
            );
        }
    }

    #[test]
    fn kurbo_angle_agrees_with_polar_points() {
        let c = Point::ORIGIN;
        let a = 30.0;
        let t = kurbo_angle(a);
        let via_kurbo = Point::new(5.0 * t.cos(), 5.0 * t.sin());
        assert!(close(via_kurbo, Polar::new(5.0, a).to_point(c)));
    }

    #[test]
    fn angular_mid_takes_the_short_way_round() {
        assert!((angular_mid(10.0, 50.0) - 30.0).abs() < 1e-9);
        assert!((angular_mid(350.0, 10.0) - 0.0).abs() < 1e-9);
        assert!((angular_mid(10.0, 350.0) - 0.0).abs() < 1e-9);
    }

    #[test]
    fn normalize_wraps_negative_and_large_angles() {
        assert_eq!(normalize_degrees(-90.0), 270.0);
        assert_eq!(normalize_degrees(720.0), 0.0);
        assert_eq!(normalize_degrees(365.0), 5.0);
    }

    #[test]
    fn rotation_is_clockwise_on_screen() {
        let c = Point::new(0.0, 0.0);
        let top = Point::new(0.0, -1.0);
        assert!(close(rotate_point(top, c, 90.0), Point::new(1.0, 0.0)));
    }
}
