// Copyright 2025 the OrbitViz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Value and category guides shared by the cartesian charts.

extern crate alloc;

use alloc::vec::Vec;

use kurbo::{Point, Rect};
use peniko::Brush;
use peniko::color::palette::css;

use crate::format::format_value;
use crate::mark::{Mark, MarkId, PathMark, StrokeStyle, TextAnchor, TextBaseline};
use crate::scale::{ScaleLinear, tick_step};
use crate::text_mark::TextMarkSpec;
use crate::z_order;

/// Styling for chart guides (gridlines, tick and category labels).
#[derive(Clone, Debug)]
pub struct GuideStyle {
    /// Gridline stroke; `None` disables gridlines.
    pub grid: Option<StrokeStyle>,
    /// Label font size.
    pub label_font_size: f64,
    /// Label paint.
    pub label_fill: Brush,
    /// Distance between a label and the plot edge.
    pub label_padding: f64,
}

impl Default for GuideStyle {
    fn default() -> Self {
        Self {
            grid: Some(StrokeStyle::solid(css::BLACK.with_alpha(40.0 / 255.0), 1.0)),
            label_font_size: 10.0,
            label_fill: css::BLACK.into(),
            label_padding: 4.0,
        }
    }
}

/// The plot area left after removing `(left, top, right, bottom)` margins from `viewport`.
///
/// Oversized margins collapse the plot to zero size instead of inverting it.
pub(crate) fn inset(viewport: Rect, margins: (f64, f64, f64, f64)) -> Rect {
    let (l, t, r, b) = margins;
    let x0 = viewport.x0 + l;
    let y0 = viewport.y0 + t;
    Rect::new(x0, y0, (viewport.x1 - r).max(x0), (viewport.y1 - b).max(y0))
}

/// Horizontal gridlines and left-hand tick labels for a vertical value scale.
///
/// Gridlines use mark id lane `grid_lane` and labels use `grid_lane + 1`.
pub(crate) fn value_guides(
    id_base: u64,
    grid_lane: u64,
    scale: &ScaleLinear,
    tick_count: usize,
    plot: Rect,
    style: &GuideStyle,
) -> Vec<Mark> {
    let ticks = scale.ticks(tick_count);
    let step = tick_step(&ticks);
    let (lo, hi) = (
        scale.domain_min().min(scale.domain_max()),
        scale.domain_min().max(scale.domain_max()),
    );
    let mut out = Vec::new();
    for (i, v) in ticks
        .iter()
        .copied()
        .filter(|v| *v >= lo - 1e-9 && *v <= hi + 1e-9)
        .enumerate()
    {
        let y = scale.map(v);
        if let Some(grid) = &style.grid {
            out.push(Mark::path(
                MarkId::for_lane(id_base, grid_lane, i),
                z_order::GRID_LINES,
                PathMark::line(Point::new(plot.x0, y), Point::new(plot.x1, y))
                    .with_stroke(grid.clone()),
            ));
        }
        out.push(
            TextMarkSpec::new(
                MarkId::for_lane(id_base, grid_lane + 1, i),
                Point::new(plot.x0 - style.label_padding, y),
                format_value(v, step),
            )
            .with_font_size(style.label_font_size)
            .with_fill(style.label_fill.clone())
            .with_anchor(TextAnchor::End)
            .with_baseline(TextBaseline::Middle)
            .mark(),
        );
    }
    out
}

/// A centered category label below the plot at `x`.
pub(crate) fn category_label(
    id: MarkId,
    x: f64,
    plot: Rect,
    text: &str,
    style: &GuideStyle,
) -> Mark {
    TextMarkSpec::new(id, Point::new(x, plot.y1 + style.label_padding), text)
        .with_font_size(style.label_font_size)
        .with_fill(style.label_fill.clone())
        .with_anchor(TextAnchor::Middle)
        .with_baseline(TextBaseline::Hanging)
        .mark()
}
