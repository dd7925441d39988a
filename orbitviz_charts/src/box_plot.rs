// Copyright 2025 the OrbitViz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Box plot: quartiles, whiskers and outliers per named series.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::{Point, Rect};
use orbitviz_layout::BoxStats;
use peniko::Color;
use peniko::color::palette::css;

use crate::axis::{GuideStyle, category_label, inset, value_guides};
use crate::chart::{Chart, ItemList, Named};
use crate::error::ChartError;
use crate::events::{ItemEvent, RedrawReason, RedrawRequest, SubscriptionId};
use crate::log;
use crate::mark::{Mark, MarkId, PathMark, StrokeStyle};
use crate::palette::palette_color;
use crate::scale::{ScaleBand, ScaleLinearSpec};
use crate::z_order;

/// A named series of observations and its summary.
#[derive(Clone, Debug, PartialEq)]
pub struct Series {
    name: String,
    values: Vec<f64>,
    stats: BoxStats,
    fill: Option<Color>,
}

impl Series {
    /// Summarizes `values`; non-finite values are ignored.
    ///
    /// Fails with [`ChartError::EmptySeries`] if no finite values remain.
    pub fn new(name: impl Into<String>, values: impl Into<Vec<f64>>) -> Result<Self, ChartError> {
        let values = values.into();
        let stats = BoxStats::from_values(&values).ok_or(ChartError::EmptySeries)?;
        Ok(Self {
            name: name.into(),
            values,
            stats,
            fill: None,
        })
    }

    /// Sets the box fill.
    pub fn with_fill(mut self, fill: Color) -> Self {
        self.fill = Some(fill);
        self
    }

    /// The raw observations.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// The box statistics.
    pub fn stats(&self) -> &BoxStats {
        &self.stats
    }
}

impl Named for Series {
    fn name(&self) -> &str {
        &self.name
    }

    /// The median.
    fn value(&self) -> f64 {
        self.stats.median
    }
}

/// Appearance and layout options for [`BoxPlot`].
#[derive(Clone, Debug)]
pub struct BoxPlotConfig {
    /// Base for mark ids.
    pub id_base: u64,
    /// Plot area inside the viewport: `(left, top, right, bottom)` margins.
    pub margins: (f64, f64, f64, f64),
    /// Approximate number of value ticks.
    pub tick_count: usize,
    /// Inner band padding, in band units; larger values give narrower boxes.
    pub band_padding: f64,
    /// Whisker cap width as a fraction of the box width.
    pub cap_width: f64,
    /// Box outline, median and whisker stroke.
    pub stroke: StrokeStyle,
    /// Outlier dot radius.
    pub outlier_radius: f64,
    /// Gridline and label styling.
    pub guides: GuideStyle,
}

impl Default for BoxPlotConfig {
    fn default() -> Self {
        Self {
            id_base: 0x7000_0000,
            margins: (48.0, 16.0, 16.0, 32.0),
            tick_count: 5,
            band_padding: 0.4,
            cap_width: 0.5,
            stroke: StrokeStyle::solid(css::BLACK, 1.0),
            outlier_radius: 2.5,
            guides: GuideStyle::default(),
        }
    }
}

impl BoxPlotConfig {
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

    /// Sets the tick count.
    pub fn with_tick_count(mut self, tick_count: usize) -> Self {
        self.tick_count = tick_count;
        self
    }
}

/// A box plot over one or more [`Series`].
#[derive(Debug)]
pub struct BoxPlot {
    series: ItemList<Series>,
    config: BoxPlotConfig,
}

impl BoxPlot {
    /// Creates a box plot, rejecting an empty series list.
    pub fn new(series: impl Into<Vec<Series>>) -> Result<Self, ChartError> {
        let series = series.into();
        if series.is_empty() {
            return Err(ChartError::EmptySeries);
        }
        Ok(Self {
            series: ItemList::new(series),
            config: BoxPlotConfig::default(),
        })
    }

    /// Replaces the configuration.
    pub fn with_config(mut self, config: BoxPlotConfig) -> Self {
        self.config = config;
        self
    }

    /// Current configuration.
    pub fn config(&self) -> &BoxPlotConfig {
        &self.config
    }

    /// Replaces the configuration and requests a redraw.
    pub fn set_config(&mut self, config: BoxPlotConfig) {
        self.config = config;
        self.series.request_redraw(RedrawReason::Config);
    }

    /// Series in display order.
    pub fn series(&self) -> &[Series] {
        self.series.items()
    }

    /// Replaces every series, rejecting an empty list.
    pub fn set_series(&mut self, series: Vec<Series>) -> Result<(), ChartError> {
        if series.is_empty() {
            return Err(ChartError::EmptySeries);
        }
        self.series.set_items(series);
        Ok(())
    }

    /// Appends a series; returns `false` for a duplicate name.
    pub fn add_series(&mut self, series: Series) -> bool {
        self.series.add_item(series)
    }

    /// Registers a redraw listener.
    pub fn on_redraw(&mut self, listener: impl FnMut(&RedrawRequest) + 'static) -> SubscriptionId {
        self.series.on_redraw(listener)
    }

    /// Registers a series change listener.
    pub fn on_item_event(&mut self, listener: impl FnMut(&ItemEvent) + 'static) -> SubscriptionId {
        self.series.on_item_event(listener)
    }
}

impl Chart for BoxPlot {
    fn marks(&self, viewport: Rect) -> Vec<Mark> {
        let cfg = &self.config;
        let series = self.series.items();
        let plot = inset(viewport, cfg.margins);

        let lo = series
            .iter()
            .map(|s| s.stats.min)
            .fold(f64::INFINITY, f64::min);
        let hi = series
            .iter()
            .map(|s| s.stats.max)
            .fold(f64::NEG_INFINITY, f64::max);
        if lo == hi {
            log::warn!(
                series = series.len(),
                "every value is equal; boxes collapse"
            );
        }
        let domain = if lo.is_finite() && hi.is_finite() {
            (lo, hi)
        } else {
            (0.0, 1.0)
        };
        let y = ScaleLinearSpec::new(domain)
            .with_nice(true)
            .instantiate_resolved((plot.y1, plot.y0), cfg.tick_count);
        let x = ScaleBand::new((plot.x0, plot.x1), series.len())
            .with_padding(cfg.band_padding, 0.5 * cfg.band_padding);
        let w = x.band_width();

        let mut out = value_guides(cfg.id_base, 0, &y, cfg.tick_count, plot, &cfg.guides);
        let line = |lane: u64, i: usize, a: Point, b: Point| {
            Mark::path(
                MarkId::for_lane(cfg.id_base, lane, i),
                z_order::OUTLINES,
                PathMark::line(a, b).with_stroke(cfg.stroke.clone()),
            )
        };

        let mut outlier_count = 0;
        for (i, s) in series.iter().enumerate() {
            let st = &s.stats;
            let x0 = x.x(i);
            let cx = x.center(i);
            let cap = 0.5 * w * cfg.cap_width;
            let body = Rect::new(x0, y.map(st.q3), x0 + w, y.map(st.q1));
            out.push(Mark::path(
                MarkId::for_lane(cfg.id_base, 2, i),
                z_order::SEGMENTS,
                PathMark::rect(body)
                    .with_fill(s.fill.unwrap_or_else(|| palette_color(i)))
                    .with_stroke(cfg.stroke.clone()),
            ));
            let ym = y.map(st.median);
            out.push(line(3, i, Point::new(x0, ym), Point::new(x0 + w, ym)));

            let (y_low, y_high) = (y.map(st.lower_whisker), y.map(st.upper_whisker));
            out.push(line(
                4,
                i,
                Point::new(cx, y.map(st.q1)),
                Point::new(cx, y_low),
            ));
            out.push(line(
                5,
                i,
                Point::new(cx, y.map(st.q3)),
                Point::new(cx, y_high),
            ));
            out.push(line(
                6,
                i,
                Point::new(cx - cap, y_low),
                Point::new(cx + cap, y_low),
            ));
            out.push(line(
                7,
                i,
                Point::new(cx - cap, y_high),
                Point::new(cx + cap, y_high),
            ));

            for v in &st.outliers {
                out.push(Mark::path(
                    MarkId::for_lane(cfg.id_base, 9, outlier_count),
                    z_order::POINTS,
                    PathMark::circle(Point::new(cx, y.map(*v)), cfg.outlier_radius)
                        .with_stroke(cfg.stroke.clone()),
                ));
                outlier_count += 1;
            }

            out.push(category_label(
                MarkId::for_lane(cfg.id_base, 8, i),
                cx,
                plot,
                s.name(),
                &cfg.guides,
            ));
        }

        log::debug!(marks = out.len(), "box plot marks");
        out
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;

    use super::*;

    #[test]
    fn empty_inputs_are_rejected() {
        assert_eq!(
            BoxPlot::new(Vec::<Series>::new()).err(),
            Some(ChartError::EmptySeries)
        );
        assert_eq!(
            Series::new("nan", vec![f64::NAN]).err(),
            Some(ChartError::EmptySeries)
        );
    }

    #[test]
    fn series_value_is_the_median() {
        let s = Series::new("s", vec![9.0, 1.0, 5.0, 3.0, 7.0, 2.0, 4.0, 6.0, 8.0]).unwrap();
        assert_eq!(s.value(), 5.0);
        assert_eq!((s.stats().q1, s.stats().q3), (3.0, 7.0));
    }

    #[test]
    fn box_spans_the_quartiles() {
        let plot = BoxPlot::new(vec![
            Series::new("a", vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0]).unwrap(),
            Series::new("b", vec![2.0, 3.0, 3.0, 4.0, 40.0]).unwrap(),
        ])
        .unwrap();
        let viewport = Rect::new(0.0, 0.0, 300.0, 200.0);
        let marks = plot.marks(viewport);
        let boxes: Vec<Rect> = marks
            .iter()
            .filter(|m| m.z_index == z_order::SEGMENTS)
            .filter_map(Mark::bounds)
            .collect();
        assert_eq!(boxes.len(), 2);
        // Nice domain is 0..40 over the 16..168 plot rows.
        let per_unit = (200.0 - 16.0 - 32.0) / 40.0;
        let a = boxes[0];
        assert!((a.height() - 4.0 * per_unit).abs() < 1e-6, "box {a:?}");
        let outliers = marks
            .iter()
            .filter(|m| m.z_index == z_order::POINTS)
            .count();
        assert_eq!(outliers, 1, "40 lies outside b's fences");
    }

    #[test]
    fn outlier_ids_stay_inside_the_chart_range() {
        let base = BoxPlotConfig::default().id_base;
        let series: Vec<Series> = (0..300)
            .map(|i| {
                Series::new(
                    std::format!("s{i}"),
                    vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 100.0],
                )
                .unwrap()
            })
            .collect();
        let marks = BoxPlot::new(series)
            .unwrap()
            .marks(Rect::new(0.0, 0.0, 3000.0, 200.0));
        let outliers: Vec<u64> = marks
            .iter()
            .filter(|m| m.z_index == z_order::POINTS)
            .map(|m| m.id.0)
            .collect();
        assert_eq!(outliers.len(), 300);
        let unique: hashbrown::HashSet<u64> = outliers.iter().copied().collect();
        assert_eq!(unique.len(), outliers.len(), "outlier ids are unique");
        assert!(
            marks
                .iter()
                .all(|m| m.id.0 >= base && m.id.0 < base + 0x1000_0000),
            "every id stays below the next chart's base"
        );
    }
}
