// Copyright 2025 the OrbitViz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Label marks: node names, tick values and titles.

extern crate alloc;

use alloc::string::String;

use kurbo::Point;
use peniko::Brush;

use crate::mark::{Mark, MarkId, TextAnchor, TextBaseline};

/// Anchor for a label placed outside a ring at `angle` (degrees clockwise from 12 o'clock).
///
/// Labels on the right half start at the anchor, labels on the left half end there, and labels
/// within a few degrees of the vertical axis are centered.
pub(crate) fn radial_anchor(angle: f64) -> TextAnchor {
    let a = orbitviz_layout::normalize_degrees(angle);
    if !(5.0..=355.0).contains(&a) || (a - 180.0).abs() < 5.0 {
        TextAnchor::Middle
    } else if a < 180.0 {
        TextAnchor::Start
    } else {
        TextAnchor::End
    }
}

/// An unshaped line of text, as stored in a [`Mark`].
#[derive(Clone, Debug, PartialEq)]
pub struct TextMark {
    /// Anchor position in scene coordinates.
    pub pos: Point,
    /// Text content.
    pub text: String,
    /// Font size in scene coordinates.
    pub font_size: f64,
    /// Rotation about `pos`, in degrees clockwise.
    pub angle: f64,
    /// Horizontal anchor.
    pub anchor: TextAnchor,
    /// Vertical baseline.
    pub baseline: TextBaseline,
    /// Fill paint.
    pub fill: Brush,
}

/// Builder for a label [`Mark`].
#[derive(Clone, Debug)]
pub struct TextMarkSpec {
    /// Stable mark id.
    pub id: MarkId,
    /// Anchor position in scene coordinates.
    pub pos: Point,
    /// Label text, left for the renderer to shape.
    pub text: String,
    /// Font size in scene coordinates.
    pub font_size: f64,
    /// Rotation about `pos`, in degrees clockwise.
    pub angle: f64,
    /// Horizontal anchor.
    pub anchor: TextAnchor,
    /// Vertical baseline.
    pub baseline: TextBaseline,
    /// Fill paint.
    pub fill: Brush,
    /// Paint order; defaults to [`LABELS`](crate::LABELS).
    pub z_index: i32,
}

impl TextMarkSpec {
    /// A 12pt label starting at `pos`, vertically centered.
    pub fn new(id: MarkId, pos: Point, text: impl Into<String>) -> Self {
        Self {
            id,
            pos,
            text: text.into(),
            font_size: 12.0,
            angle: 0.0,
            anchor: TextAnchor::Start,
            baseline: TextBaseline::Middle,
            fill: Brush::default(),
            z_index: crate::z_order::LABELS,
        }
    }

    /// Sets the font size.
    pub fn with_font_size(mut self, font_size: f64) -> Self {
        self.font_size = font_size;
        self
    }

    /// Sets the fill paint.
    pub fn with_fill(mut self, fill: impl Into<Brush>) -> Self {
        self.fill = fill.into();
        self
    }

    /// Sets the horizontal anchor.
    pub fn with_anchor(mut self, anchor: TextAnchor) -> Self {
        self.anchor = anchor;
        self
    }

    /// Sets the vertical baseline.
    pub fn with_baseline(mut self, baseline: TextBaseline) -> Self {
        self.baseline = baseline;
        self
    }

    /// Rotates the label about its anchor, in degrees clockwise.
    pub fn with_angle(mut self, angle: f64) -> Self {
        self.angle = angle;
        self
    }

    /// Overrides the paint order.
    pub fn with_z_index(mut self, z_index: i32) -> Self {
        self.z_index = z_index;
        self
    }

    /// Builds the label mark.
    pub fn mark(&self) -> Mark {
        Mark::text(
            self.id,
            self.z_index,
            TextMark {
                pos: self.pos,
                text: self.text.clone(),
                font_size: self.font_size,
                angle: self.angle,
                anchor: self.anchor,
                baseline: self.baseline,
                fill: self.fill.clone(),
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn radial_anchor_by_half() {
        assert_eq!(radial_anchor(90.0), TextAnchor::Start);
        assert_eq!(radial_anchor(270.0), TextAnchor::End);
        assert_eq!(radial_anchor(-90.0), TextAnchor::End);
        assert_eq!(radial_anchor(0.0), TextAnchor::Middle);
        assert_eq!(radial_anchor(181.0), TextAnchor::Middle);
    }

    #[test]
    fn spec_builds_text_payload() {
        let m = TextMarkSpec::new(MarkId(3), Point::new(1.0, 2.0), "hi")
            .with_anchor(TextAnchor::End)
            .with_z_index(7)
            .mark();
        assert_eq!(m.z_index, 7);
        let t = m.as_text().expect("text payload");
        assert_eq!(t.text, "hi");
        assert_eq!(t.anchor, TextAnchor::End);
        assert_eq!(t.pos, Point::new(1.0, 2.0));
    }
}
