// Copyright 2025 the OrbitViz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The display list charts generate.
//!
//! A [`Mark`] is one drawable: a filled/stroked [`BezPath`] or a line of unshaped text. Marks
//! carry a stable [`MarkId`] and a `z_index`; renderers paint in `(z_index, id)` order.

use kurbo::{BezPath, Circle, Point, Rect, Shape};
use peniko::Brush;
use peniko::color::palette::css;

use crate::text_mark::TextMark;

const PATH_TOLERANCE: f64 = 0.1;

const LANE_BITS: u32 = 20;
const LANE_CAPACITY: usize = 1 << LANE_BITS;

/// Stable identity for a mark across redraws.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MarkId(pub u64);

impl MarkId {
    /// Wraps a raw id.
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Derives an id from a chart's `id_base`, a per-kind lane and an index.
    ///
    /// Each lane holds up to 2^20 marks before it would run into the next lane.
    pub fn for_lane(id_base: u64, lane: u64, index: usize) -> Self {
        debug_assert!(
            index < LANE_CAPACITY,
            "mark index {index} overflows lane {lane}"
        );
        Self(id_base + (lane << LANE_BITS) + index as u64)
    }
}

/// Stroke paint and width.
#[derive(Clone, Debug, PartialEq)]
pub struct StrokeStyle {
    /// Stroke paint.
    pub brush: Brush,
    /// Stroke width in scene coordinates.
    pub stroke_width: f64,
}

impl StrokeStyle {
    /// Convenience for a solid stroke.
    pub fn solid(brush: impl Into<Brush>, stroke_width: f64) -> Self {
        Self {
            brush: brush.into(),
            stroke_width,
        }
    }
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self::solid(css::BLACK, 1.0)
    }
}

/// Horizontal text anchor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextAnchor {
    /// Text starts at the anchor point.
    Start,
    /// Text is centered on the anchor point.
    Middle,
    /// Text ends at the anchor point.
    End,
}

/// Vertical text baseline.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextBaseline {
    /// The anchor is the vertical middle of the text.
    Middle,
    /// The anchor is the alphabetic baseline.
    Alphabetic,
    /// The anchor is the top of the text.
    Hanging,
    /// The anchor is the ideographic baseline.
    Ideographic,
}

/// A path with fill and optional stroke.
#[derive(Clone, Debug, PartialEq)]
pub struct PathMark {
    /// Geometry in scene coordinates.
    pub path: BezPath,
    /// Fill paint (`Brush::default()` is transparent black).
    pub fill: Brush,
    /// Stroke paint.
    pub stroke: Brush,
    /// Stroke width; `0` disables the stroke.
    pub stroke_width: f64,
}

impl PathMark {
    /// Creates an unfilled, unstroked path mark.
    pub fn new(path: BezPath) -> Self {
        Self {
            path,
            fill: Brush::Solid(peniko::Color::TRANSPARENT),
            stroke: Brush::default(),
            stroke_width: 0.0,
        }
    }

    /// An axis-aligned rectangle.
    pub fn rect(rect: Rect) -> Self {
        Self::new(rect.to_path(PATH_TOLERANCE))
    }

    /// A circle.
    pub fn circle(center: Point, radius: f64) -> Self {
        Self::new(Circle::new(center, radius.max(0.0)).to_path(PATH_TOLERANCE))
    }

    /// A straight line from `a` to `b`, to be stroked.
    pub fn line(a: Point, b: Point) -> Self {
        let mut path = BezPath::new();
        path.move_to(a);
        path.line_to(b);
        Self::new(path)
    }

    /// Sets the fill paint.
    pub fn with_fill(mut self, fill: impl Into<Brush>) -> Self {
        self.fill = fill.into();
        self
    }

    /// Sets the stroke.
    pub fn with_stroke(mut self, stroke: StrokeStyle) -> Self {
        self.stroke = stroke.brush;
        self.stroke_width = stroke.stroke_width;
        self
    }

    /// Sets the stroke if `stroke` is `Some`.
    pub fn with_optional_stroke(self, stroke: Option<&StrokeStyle>) -> Self {
        match stroke {
            Some(s) => self.with_stroke(s.clone()),
            None => self,
        }
    }
}

/// Mark contents.
#[derive(Clone, Debug, PartialEq)]
pub enum MarkPayload {
    /// A path.
    Path(PathMark),
    /// A line of text.
    Text(TextMark),
}

impl MarkPayload {
    /// Geometric bounds, if known without text measurement.
    pub fn bounds(&self) -> Option<Rect> {
        match self {
            Self::Path(p) => {
                if p.path.elements().is_empty() {
                    None
                } else {
                    Some(p.path.bounding_box())
                }
            }
            Self::Text(_) => None,
        }
    }
}

/// One drawable item.
#[derive(Clone, Debug, PartialEq)]
pub struct Mark {
    /// Stable id.
    pub id: MarkId,
    /// Paint order; lower first.
    pub z_index: i32,
    /// Contents.
    pub payload: MarkPayload,
}

impl Mark {
    /// Creates a path mark.
    pub fn path(id: MarkId, z_index: i32, path: PathMark) -> Self {
        Self {
            id,
            z_index,
            payload: MarkPayload::Path(path),
        }
    }

    /// Creates a text mark.
    pub fn text(id: MarkId, z_index: i32, text: TextMark) -> Self {
        Self {
            id,
            z_index,
            payload: MarkPayload::Text(text),
        }
    }

    /// Geometric bounds, if known without text measurement.
    pub fn bounds(&self) -> Option<Rect> {
        self.payload.bounds()
    }

    /// The path payload, if this is a path mark.
    pub fn as_path(&self) -> Option<&PathMark> {
        match &self.payload {
            MarkPayload::Path(p) => Some(p),
            MarkPayload::Text(_) => None,
        }
    }

    /// The text payload, if this is a text mark.
    pub fn as_text(&self) -> Option<&TextMark> {
        match &self.payload {
            MarkPayload::Text(t) => Some(t),
            MarkPayload::Path(_) => None,
        }
    }
}
