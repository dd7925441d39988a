// Copyright 2025 the OrbitViz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Comparison (butterfly) bar chart: two series over the same categories, one growing left and
//! one growing right from a shared label column.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::{Point, Rect};
use peniko::Color;

use crate::axis::{GuideStyle, inset};
use crate::chart::Chart;
use crate::error::{ChartError, check_value};
use crate::events::{ItemEvent, RedrawReason, RedrawRequest, Subscribers, SubscriptionId};
use crate::format::format_value;
use crate::log;
use crate::mark::{Mark, MarkId, PathMark, TextAnchor, TextBaseline};
use crate::measure::{HeuristicTextMeasurer, TextMeasurer, max_label_width};
use crate::palette::palette_color;
use crate::scale::ScaleBand;
use crate::text_mark::TextMarkSpec;
use crate::z_order;

/// A named series of per-category values.
#[derive(Clone, Debug, PartialEq)]
pub struct CategorySeries {
    name: String,
    values: Vec<(String, f64)>,
    fill: Option<Color>,
}

impl CategorySeries {
    /// Creates a series, rejecting empty input, repeated categories and invalid values.
    pub fn new<S: Into<String>>(
        name: impl Into<String>,
        values: impl IntoIterator<Item = (S, f64)>,
    ) -> Result<Self, ChartError> {
        let mut out: Vec<(String, f64)> = Vec::new();
        for (category, value) in values {
            let category = category.into();
            let value = check_value(&category, value)?;
            if out.iter().any(|(c, _)| *c == category) {
                return Err(ChartError::DuplicateItem(category));
            }
            out.push((category, value));
        }
        if out.is_empty() {
            return Err(ChartError::EmptySeries);
        }
        Ok(Self {
            name: name.into(),
            values: out,
            fill: None,
        })
    }

    /// Sets the bar fill.
    pub fn with_fill(mut self, fill: Color) -> Self {
        self.fill = Some(fill);
        self
    }

    /// Series name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// `(category, value)` pairs in insertion order.
    pub fn values(&self) -> &[(String, f64)] {
        &self.values
    }

    /// Value for `category`.
    pub fn get(&self, category: &str) -> Option<f64> {
        self.values
            .iter()
            .find(|(c, _)| c == category)
            .map(|(_, v)| *v)
    }

    fn max(&self) -> f64 {
        self.values.iter().map(|(_, v)| *v).fold(0.0, f64::max)
    }
}

/// Appearance and layout options for [`ComparisonBarChart`].
#[derive(Clone, Debug)]
pub struct ComparisonBarConfig {
    /// Base for mark ids.
    pub id_base: u64,
    /// Plot margins `(left, top, right, bottom)`; the top holds the series titles.
    pub margins: (f64, f64, f64, f64),
    /// Space on each side of the category labels.
    pub label_gap: f64,
    /// Inner band padding between bars, in band units.
    pub band_padding: f64,
    /// Draw values at the bar ends.
    pub show_values: bool,
    /// Label and title styling (`grid` is unused).
    pub guides: GuideStyle,
}

impl Default for ComparisonBarConfig {
    fn default() -> Self {
        Self {
            id_base: 0x9000_0000,
            margins: (40.0, 28.0, 40.0, 8.0),
            label_gap: 8.0,
            band_padding: 0.25,
            show_values: true,
            guides: GuideStyle::default(),
        }
    }
}

impl ComparisonBarConfig {
    /// Sets the mark id base.
    pub fn with_id_base(mut self, id_base: u64) -> Self {
        self.id_base = id_base;
        self
    }

    /// Sets the plot margins.
    pub fn with_margins(mut self, left: f64, top: f64, right: f64, bottom: f64) -> Self {
        self.margins = (left, top, right, bottom);
        self
    }

    /// Enables or disables value labels.
    pub fn with_values(mut self, show: bool) -> Self {
        self.show_values = show;
        self
    }
}

/// Checks that both series cover the same categories.
fn check_pair(left: &CategorySeries, right: &CategorySeries) -> Result<(), ChartError> {
    let same = left.values.len() == right.values.len()
        && left.values.iter().all(|(c, _)| right.get(c).is_some());
    if same {
        Ok(())
    } else {
        log::warn!(
            left = left.name(),
            right = right.name(),
            "comparison series categories differ"
        );
        Err(ChartError::CategoryMismatch)
    }
}

/// Two series compared category by category.
#[derive(Debug)]
pub struct ComparisonBarChart {
    left: CategorySeries,
    right: CategorySeries,
    config: ComparisonBarConfig,
    item_events: Subscribers<ItemEvent>,
    redraw: Subscribers<RedrawRequest>,
}

impl ComparisonBarChart {
    /// Creates a chart; the series must share their category set.
    pub fn new(left: CategorySeries, right: CategorySeries) -> Result<Self, ChartError> {
        check_pair(&left, &right)?;
        Ok(Self {
            left,
            right,
            config: ComparisonBarConfig::default(),
            item_events: Subscribers::new(),
            redraw: Subscribers::new(),
        })
    }

    /// Replaces the configuration.
    pub fn with_config(mut self, config: ComparisonBarConfig) -> Self {
        self.config = config;
        self
    }

    /// Current configuration.
    pub fn config(&self) -> &ComparisonBarConfig {
        &self.config
    }

    /// Replaces the configuration and requests a redraw.
    pub fn set_config(&mut self, config: ComparisonBarConfig) {
        self.config = config;
        self.request_redraw(RedrawReason::Config);
    }

    /// The series drawn to the left.
    pub fn left(&self) -> &CategorySeries {
        &self.left
    }

    /// The series drawn to the right.
    pub fn right(&self) -> &CategorySeries {
        &self.right
    }

    /// Replaces both series; on error nothing changes.
    pub fn set_series(
        &mut self,
        left: CategorySeries,
        right: CategorySeries,
    ) -> Result<(), ChartError> {
        check_pair(&left, &right)?;
        self.left = left;
        self.right = right;
        self.item_events.emit(&ItemEvent::Replaced {
            count: self.left.values.len(),
        });
        self.request_redraw(RedrawReason::Items);
        Ok(())
    }

    /// Registers a redraw listener.
    pub fn on_redraw(&mut self, listener: impl FnMut(&RedrawRequest) + 'static) -> SubscriptionId {
        self.redraw.subscribe(listener)
    }

    /// Registers a series change listener.
    pub fn on_item_event(&mut self, listener: impl FnMut(&ItemEvent) + 'static) -> SubscriptionId {
        self.item_events.subscribe(listener)
    }

    fn request_redraw(&mut self, reason: RedrawReason) {
        self.redraw.emit(&RedrawRequest::new(reason));
    }

    /// Width of the center label column for `measurer`.
    pub fn label_column_width(&self, measurer: &dyn TextMeasurer) -> f64 {
        let labels = self.left.values.iter().map(|(c, _)| c.as_str());
        max_label_width(measurer, labels, self.config.guides.label_font_size)
            + 2.0 * self.config.label_gap
    }

    /// Like [`Chart::marks`], sizing the label column with `measurer`.
    pub fn marks_with(&self, viewport: Rect, measurer: &dyn TextMeasurer) -> Vec<Mark> {
        let cfg = &self.config;
        let style = &cfg.guides;
        let plot = inset(viewport, cfg.margins);
        let column = self.label_column_width(measurer).min(plot.width());
        let mid = plot.center().x;
        let (left_edge, right_edge) = (mid - 0.5 * column, mid + 0.5 * column);
        let half = (0.5 * (plot.width() - column)).max(0.0);
        let max = self.left.max().max(self.right.max());
        let length = |v: f64| if max > 0.0 { v / max * half } else { 0.0 };

        let rows = ScaleBand::new((plot.y0, plot.y1), self.left.values.len())
            .with_padding(cfg.band_padding, 0.5 * cfg.band_padding);
        let h = rows.band_width();
        let left_fill = self.left.fill.unwrap_or_else(|| palette_color(0));
        let right_fill = self.right.fill.unwrap_or_else(|| palette_color(1));

        let text = |lane: u64, i: usize, pos: Point, s: &str, anchor: TextAnchor| {
            TextMarkSpec::new(MarkId::for_lane(cfg.id_base, lane, i), pos, s)
                .with_font_size(style.label_font_size)
                .with_fill(style.label_fill.clone())
                .with_anchor(anchor)
                .with_baseline(TextBaseline::Middle)
                .mark()
        };

        let mut out = Vec::new();
        for (i, (category, lv)) in self.left.values.iter().enumerate() {
            let rv = self.right.get(category).unwrap_or(0.0);
            let (y0, cy) = (rows.x(i), rows.center(i));
            let (lw, rw) = (length(*lv), length(rv));
            out.push(Mark::path(
                MarkId::for_lane(cfg.id_base, 0, i),
                z_order::SEGMENTS,
                PathMark::rect(Rect::new(left_edge - lw, y0, left_edge, y0 + h))
                    .with_fill(left_fill),
            ));
            out.push(Mark::path(
                MarkId::for_lane(cfg.id_base, 1, i),
                z_order::SEGMENTS,
                PathMark::rect(Rect::new(right_edge, y0, right_edge + rw, y0 + h))
                    .with_fill(right_fill),
            ));
            out.push(text(
                2,
                i,
                Point::new(mid, cy),
                category,
                TextAnchor::Middle,
            ));
            if cfg.show_values {
                let pad = style.label_padding;
                out.push(text(
                    3,
                    i,
                    Point::new(left_edge - lw - pad, cy),
                    &format_value(*lv, 0.0),
                    TextAnchor::End,
                ));
                out.push(text(
                    4,
                    i,
                    Point::new(right_edge + rw + pad, cy),
                    &format_value(rv, 0.0),
                    TextAnchor::Start,
                ));
            }
        }

        let title_y = plot.y0 - style.label_padding;
        for (i, (name, x, anchor)) in [
            (self.left.name(), left_edge, TextAnchor::End),
            (self.right.name(), right_edge, TextAnchor::Start),
        ]
        .into_iter()
        .enumerate()
        {
            out.push(
                TextMarkSpec::new(
                    MarkId::for_lane(cfg.id_base, 5, i),
                    Point::new(x, title_y),
                    name,
                )
                    .with_font_size(style.label_font_size * 1.2)
                    .with_fill(style.label_fill.clone())
                    .with_anchor(anchor)
                    .with_baseline(TextBaseline::Alphabetic)
                    .with_z_index(z_order::TITLES)
                    .mark(),
            );
        }

        log::debug!(marks = out.len(), "comparison bar marks");
        out
    }
}

impl Chart for ComparisonBarChart {
    fn marks(&self, viewport: Rect) -> Vec<Mark> {
        self.marks_with(viewport, &HeuristicTextMeasurer)
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;

    use super::*;

    fn series(name: &str, values: &[(&str, f64)]) -> CategorySeries {
        CategorySeries::new(name, values.iter().copied()).unwrap()
    }

    #[test]
    fn mismatched_or_empty_series_are_rejected() {
        let a = series("a", &[("x", 1.0), ("y", 2.0)]);
        let b = series("b", &[("x", 1.0), ("z", 2.0)]);
        assert_eq!(
            ComparisonBarChart::new(a.clone(), b).err(),
            Some(ChartError::CategoryMismatch)
        );
        let short = series("c", &[("x", 1.0)]);
        assert_eq!(
            ComparisonBarChart::new(a, short).err(),
            Some(ChartError::CategoryMismatch)
        );
        assert_eq!(
            CategorySeries::new("e", Vec::<(&str, f64)>::new()).err(),
            Some(ChartError::EmptySeries)
        );
        assert_eq!(
            CategorySeries::new("d", vec![("x", 1.0), ("x", 2.0)]).err(),
            Some(ChartError::DuplicateItem("x".into()))
        );
    }

    #[test]
    fn bars_share_one_scale_around_the_label_column() {
        let config = ComparisonBarConfig::default().with_margins(0.0, 0.0, 0.0, 0.0);
        let chart = ComparisonBarChart::new(
            series("left", &[("a", 10.0), ("b", 5.0)]),
            series("right", &[("b", 2.5), ("a", 0.0)]),
        )
        .unwrap()
        .with_config(config);
        let viewport = Rect::new(0.0, 0.0, 200.0, 100.0);
        let column = chart.label_column_width(&HeuristicTextMeasurer);
        // One-character labels at 10px plus 8px on each side.
        assert!((column - 22.0).abs() < 1e-9);

        let marks = chart.marks(viewport);
        let bar = |lane: u64, i: usize| -> Rect {
            let id = MarkId::for_lane(chart.config().id_base, lane, i);
            let m = marks.iter().find(|m| m.id == id).unwrap();
            m.bounds().unwrap()
        };
        let half = 0.5 * (200.0 - column);
        assert!(
            (bar(0, 0).width() - half).abs() < 1e-9,
            "largest bar fills its half"
        );
        assert!((bar(0, 0).x1 - (100.0 - 11.0)).abs() < 1e-9);
        assert!((bar(0, 1).width() - 0.5 * half).abs() < 1e-9);
        assert!((bar(1, 1).width() - 0.25 * half).abs() < 1e-9);
        assert!((bar(1, 1).x0 - (100.0 + 11.0)).abs() < 1e-9);
        assert_eq!(bar(1, 0).width(), 0.0);
    }
}
