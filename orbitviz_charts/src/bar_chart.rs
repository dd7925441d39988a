// Copyright 2025 the OrbitViz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Vertical bar chart over [`Item`]s.

extern crate alloc;

use alloc::vec::Vec;

use kurbo::{Point, Rect};

use crate::axis::{GuideStyle, category_label, inset, value_guides};
use crate::chart::{Chart, ItemList};
use crate::events::{ItemEvent, RedrawReason, RedrawRequest, SubscriptionId};
use crate::format::format_value;
use crate::item::{Item, SortOrder};
use crate::log;
use crate::mark::{Mark, MarkId, PathMark, StrokeStyle, TextAnchor, TextBaseline};
use crate::scale::{ScaleBand, ScaleLinearSpec, tick_step};
use crate::text_mark::TextMarkSpec;
use crate::z_order;

/// Appearance and layout options for [`BarChart`].
#[derive(Clone, Debug)]
pub struct BarChartConfig {
    /// Base for mark ids.
    pub id_base: u64,
    /// Plot margins `(left, top, right, bottom)`.
    pub margins: (f64, f64, f64, f64),
    /// Approximate number of value ticks.
    pub tick_count: usize,
    /// Inner band padding, in band units.
    pub band_padding: f64,
    /// Optional bar outline.
    pub bar_stroke: Option<StrokeStyle>,
    /// Draw each value above its bar.
    pub show_values: bool,
    /// Gridline and label styling.
    pub guides: GuideStyle,
}

impl Default for BarChartConfig {
    fn default() -> Self {
        Self {
            id_base: 0xA000_0000,
            margins: (48.0, 20.0, 16.0, 32.0),
            tick_count: 5,
            band_padding: 0.2,
            bar_stroke: None,
            show_values: false,
            guides: GuideStyle::default(),
        }
    }
}

impl BarChartConfig {
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

    /// Enables or disables value labels.
    pub fn with_values(mut self, show: bool) -> Self {
        self.show_values = show;
        self
    }
}

/// A bar chart with one bar per item, in item order.
#[derive(Debug)]
pub struct BarChart {
    items: ItemList<Item>,
    config: BarChartConfig,
}

impl BarChart {
    /// Creates a chart with default configuration.
    pub fn new(items: impl Into<Vec<Item>>) -> Self {
        Self {
            items: ItemList::new(items.into()),
            config: BarChartConfig::default(),
        }
    }

    /// Replaces the configuration.
    pub fn with_config(mut self, config: BarChartConfig) -> Self {
        self.config = config;
        self
    }

    /// Current configuration.
    pub fn config(&self) -> &BarChartConfig {
        &self.config
    }

    /// Replaces the configuration and requests a redraw.
    pub fn set_config(&mut self, config: BarChartConfig) {
        self.config = config;
        self.items.request_redraw(RedrawReason::Config);
    }

    /// Items in display order.
    pub fn items(&self) -> &[Item] {
        self.items.items()
    }

    /// Replaces every item.
    pub fn set_items(&mut self, items: Vec<Item>) {
        self.items.set_items(items);
    }

    /// Appends an item; returns `false` for a duplicate name.
    pub fn add_item(&mut self, item: Item) -> bool {
        self.items.add_item(item)
    }

    /// Removes the item named `name`.
    pub fn remove_item(&mut self, name: &str) -> Option<Item> {
        self.items.remove_item(name)
    }

    /// Reorders bars by value.
    pub fn sort_by_value(&mut self, order: SortOrder) {
        self.items.sort_by_value(order);
    }

    /// Registers a redraw listener.
    pub fn on_redraw(&mut self, listener: impl FnMut(&RedrawRequest) + 'static) -> SubscriptionId {
        self.items.on_redraw(listener)
    }

    /// Registers an item change listener.
    pub fn on_item_event(&mut self, listener: impl FnMut(&ItemEvent) + 'static) -> SubscriptionId {
        self.items.on_item_event(listener)
    }
}

impl Chart for BarChart {
    fn marks(&self, viewport: Rect) -> Vec<Mark> {
        let cfg = &self.config;
        let items = self.items.items();
        let plot = inset(viewport, cfg.margins);

        let max = items.iter().map(Item::value).fold(0.0, f64::max);
        if !items.is_empty() && max == 0.0 {
            log::warn!(items = items.len(), "all items are zero; bars collapse");
        }
        let y = ScaleLinearSpec::new((0.0, if max > 0.0 { max } else { 1.0 }))
            .with_nice(true)
            .instantiate_resolved((plot.y1, plot.y0), cfg.tick_count);
        let step = tick_step(&y.ticks(cfg.tick_count));
        let x = ScaleBand::new((plot.x0, plot.x1), items.len())
            .with_padding(cfg.band_padding, 0.5 * cfg.band_padding);
        let w = x.band_width();
        let base = y.map(0.0);

        let mut out = value_guides(cfg.id_base, 0, &y, cfg.tick_count, plot, &cfg.guides);
        for (i, item) in items.iter().enumerate() {
            let top = y.map(item.value());
            out.push(Mark::path(
                MarkId::for_lane(cfg.id_base, 2, i),
                z_order::SEGMENTS,
                PathMark::rect(Rect::new(x.x(i), top.min(base), x.x(i) + w, top.max(base)))
                    .with_fill(item.resolved_fill(i))
                    .with_optional_stroke(cfg.bar_stroke.as_ref()),
            ));
            out.push(category_label(
                MarkId::for_lane(cfg.id_base, 3, i),
                x.center(i),
                plot,
                item.name(),
                &cfg.guides,
            ));
            if cfg.show_values {
                out.push(
                    TextMarkSpec::new(
                        MarkId::for_lane(cfg.id_base, 4, i),
                        Point::new(x.center(i), top - cfg.guides.label_padding),
                        format_value(item.value(), 0.1 * step),
                    )
                    .with_font_size(cfg.guides.label_font_size)
                    .with_fill(cfg.guides.label_fill.clone())
                    .with_anchor(TextAnchor::Middle)
                    .with_baseline(TextBaseline::Alphabetic)
                    .mark(),
                );
            }
        }

        log::debug!(bars = items.len(), marks = out.len(), "bar chart marks");
        out
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;

    use super::*;

    fn chart() -> BarChart {
        BarChart::new(vec![
            Item::new("a", 30.0).unwrap(),
            Item::new("b", 100.0).unwrap(),
            Item::new("c", 0.0).unwrap(),
        ])
        .with_config(
            BarChartConfig::default()
                .with_margins(0.0, 0.0, 0.0, 0.0)
                .with_values(true),
        )
    }

    #[test]
    fn bars_rise_from_the_baseline() {
        let marks = chart().marks(Rect::new(0.0, 0.0, 300.0, 200.0));
        let bars: Vec<Rect> = marks
            .iter()
            .filter(|m| m.z_index == z_order::SEGMENTS)
            .filter_map(Mark::bounds)
            .collect();
        assert_eq!(bars.len(), 3);
        for b in &bars {
            assert!(
                (b.y1 - 200.0).abs() < 1e-9,
                "bars start at the baseline: {b:?}"
            );
        }
        assert!(
            (bars[1].height() - 200.0).abs() < 1e-9,
            "max reaches the top"
        );
        assert!((bars[0].height() - 60.0).abs() < 1e-9);
        assert_eq!(bars[2].height(), 0.0);
    }

    #[test]
    fn value_labels_use_tick_precision() {
        let marks = chart().marks(Rect::new(0.0, 0.0, 300.0, 200.0));
        let id = MarkId::for_lane(BarChartConfig::default().id_base, 4, 0);
        let label = marks.iter().find(|m| m.id == id).and_then(Mark::as_text);
        assert_eq!(label.map(|t| t.text.as_str()), Some("30"));
    }

    #[test]
    fn sorting_reorders_bars() {
        let mut c = chart();
        c.sort_by_value(SortOrder::Desc);
        let names: Vec<&str> = c.items().iter().map(Item::name).collect();
        assert_eq!(names, ["b", "a", "c"]);
    }
}
