// Copyright 2025 the OrbitViz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Coxcomb (polar area) chart: equal angular wedges whose radius follows the value.

extern crate alloc;

use alloc::vec;
use alloc::vec::Vec;

use kurbo::Rect;
use orbitviz_layout::{Polar, Segment, Subdivision};
use peniko::Brush;
use peniko::color::palette::css;

use crate::chart::{Chart, ItemList};
use crate::events::{ItemEvent, RedrawReason, RedrawRequest, SubscriptionId};
use crate::item::{Item, SortOrder, sort_items};
use crate::log;
use crate::mark::{Mark, MarkId, StrokeStyle, TextBaseline};
use crate::sector_mark::SectorMarkSpec;
use crate::text_mark::{TextMarkSpec, radial_anchor};

/// Appearance and layout options for [`CoxcombChart`].
#[derive(Clone, Debug)]
pub struct CoxcombConfig {
    /// Base for mark ids.
    pub id_base: u64,
    /// Angle of the first wedge's start, in degrees clockwise from 12 o'clock.
    pub start_angle: f64,
    /// Gap between wedges, in degrees.
    pub gap: f64,
    /// Radius of the empty center as a fraction of the outer radius.
    pub inner_radius: f64,
    /// Space between the viewport edge and the largest wedge.
    pub padding: f64,
    /// Order wedges by value before layout; `None` keeps item order.
    pub sort: Option<SortOrder>,
    /// Optional outline around each wedge.
    pub segment_stroke: Option<StrokeStyle>,
    /// Draw item names outside the wedges.
    pub show_labels: bool,
    /// Wedges narrower than this many degrees get no label.
    pub min_label_angle: f64,
    /// Label font size.
    pub label_font_size: f64,
    /// Label paint.
    pub label_fill: Brush,
}

impl Default for CoxcombConfig {
    fn default() -> Self {
        Self {
            id_base: 0x4000_0000,
            start_angle: 0.0,
            gap: 1.0,
            inner_radius: 0.1,
            padding: 30.0,
            sort: None,
            segment_stroke: Some(StrokeStyle::solid(css::WHITE, 1.0)),
            show_labels: true,
            min_label_angle: 8.0,
            label_font_size: 11.0,
            label_fill: css::BLACK.into(),
        }
    }
}

impl CoxcombConfig {
    /// Sets the mark id base.
    pub fn with_id_base(mut self, id_base: u64) -> Self {
        self.id_base = id_base;
        self
    }

    /// Sets the start angle.
    pub fn with_start_angle(mut self, start_angle: f64) -> Self {
        self.start_angle = start_angle;
        self
    }

    /// Sets the inner radius fraction.
    pub fn with_inner_radius(mut self, inner_radius: f64) -> Self {
        self.inner_radius = inner_radius;
        self
    }

    /// Sets the sort order.
    pub fn with_sort(mut self, sort: Option<SortOrder>) -> Self {
        self.sort = sort;
        self
    }

    /// Enables or disables labels.
    pub fn with_labels(mut self, show: bool) -> Self {
        self.show_labels = show;
        self
    }
}

/// A coxcomb chart over [`Item`]s.
#[derive(Debug)]
pub struct CoxcombChart {
    items: ItemList<Item>,
    config: CoxcombConfig,
}

impl CoxcombChart {
    /// Creates a chart with default configuration.
    pub fn new(items: impl Into<Vec<Item>>) -> Self {
        Self {
            items: ItemList::new(items.into()),
            config: CoxcombConfig::default(),
        }
    }

    /// Replaces the configuration.
    pub fn with_config(mut self, config: CoxcombConfig) -> Self {
        self.config = config;
        self
    }

    /// Current configuration.
    pub fn config(&self) -> &CoxcombConfig {
        &self.config
    }

    /// Replaces the configuration and requests a redraw.
    pub fn set_config(&mut self, config: CoxcombConfig) {
        self.config = config;
        self.items.request_redraw(RedrawReason::Config);
    }

    /// Sets the sort order and requests a redraw.
    pub fn set_sort(&mut self, sort: Option<SortOrder>) {
        self.config.sort = sort;
        self.items.request_redraw(RedrawReason::Config);
    }

    /// Items in insertion order.
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

    /// Registers a redraw listener.
    pub fn on_redraw(&mut self, listener: impl FnMut(&RedrawRequest) + 'static) -> SubscriptionId {
        self.items.on_redraw(listener)
    }

    /// Registers an item change listener.
    pub fn on_item_event(&mut self, listener: impl FnMut(&ItemEvent) + 'static) -> SubscriptionId {
        self.items.on_item_event(listener)
    }

    /// Items in wedge order, each paired with its original index (for palette fills).
    fn ordered(&self) -> Vec<(usize, &Item)> {
        let mut ordered: Vec<(usize, &Item)> = self.items.items().iter().enumerate().collect();
        if let Some(order) = self.config.sort {
            let mut keyed: Vec<Keyed<'_>> = ordered.into_iter().map(Keyed).collect();
            sort_items(&mut keyed, order);
            ordered = keyed.into_iter().map(|k| k.0).collect();
        }
        ordered
    }

    /// Wedges in display order as `(item index, angular segment)`.
    pub fn wedges(&self) -> Vec<(usize, Segment)> {
        let ordered = self.ordered();
        let segments = Subdivision::full_circle()
            .with_start(self.config.start_angle)
            .with_gap(self.config.gap)
            .subdivide(&vec![1.0; ordered.len()]);
        ordered.iter().map(|(i, _)| *i).zip(segments).collect()
    }
}

/// Sorting adapter that keeps the original index alongside the item.
struct Keyed<'a>((usize, &'a Item));

impl crate::chart::Named for Keyed<'_> {
    fn name(&self) -> &str {
        self.0.1.name()
    }

    fn value(&self) -> f64 {
        self.0.1.value()
    }
}

impl Chart for CoxcombChart {
    fn marks(&self, viewport: Rect) -> Vec<Mark> {
        let cfg = &self.config;
        let items = self.items.items();
        let center = viewport.center();
        let outer = (0.5 * viewport.width().min(viewport.height()) - cfg.padding).max(0.0);
        let inner = outer * cfg.inner_radius.clamp(0.0, 1.0);
        let max = items.iter().map(Item::value).fold(0.0, f64::max);
        if !items.is_empty() && max == 0.0 {
            log::warn!(items = items.len(), "all items are zero; wedges collapse");
        }

        let mut out = Vec::new();
        let wedges = self.wedges();
        for (slot, (i, segment)) in wedges.iter().enumerate() {
            let item = &items[*i];
            let t = if max > 0.0 { item.value() / max } else { 0.0 };
            let radius = inner + (outer - inner) * t;
            out.push(
                SectorMarkSpec::new(
                    MarkId::for_lane(cfg.id_base, 0, slot),
                    center,
                    inner,
                    radius,
                    *segment,
                )
                .with_fill(item.resolved_fill(*i))
                .with_optional_stroke(cfg.segment_stroke.clone())
                .mark(),
            );
            if cfg.show_labels && segment.width >= cfg.min_label_angle {
                let angle = segment.mid();
                let pos = Polar::new(radius + 0.5 * cfg.label_font_size, angle).to_point(center);
                out.push(
                    TextMarkSpec::new(MarkId::for_lane(cfg.id_base, 1, slot), pos, item.name())
                        .with_font_size(cfg.label_font_size)
                        .with_fill(cfg.label_fill.clone())
                        .with_anchor(radial_anchor(angle))
                        .with_baseline(TextBaseline::Middle)
                        .mark(),
                );
            }
        }

        log::debug!(marks = out.len(), "coxcomb marks");
        out
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    fn sample() -> CoxcombChart {
        CoxcombChart::new(vec![
            Item::new("jan", 5.0).unwrap(),
            Item::new("feb", 20.0).unwrap(),
            Item::new("mar", 10.0).unwrap(),
        ])
    }

    #[test]
    fn wedges_share_the_circle_equally() {
        let chart = sample();
        let wedges = chart.wedges();
        let expected = (360.0 - 3.0 * chart.config().gap) / 3.0;
        for (_, s) in &wedges {
            assert!((s.width - expected).abs() < 1e-9);
        }
    }

    #[test]
    fn sort_reorders_wedges_not_items() {
        let mut chart = sample();
        chart.set_sort(Some(SortOrder::Desc));
        let order: Vec<usize> = chart.wedges().iter().map(|(i, _)| *i).collect();
        assert_eq!(order, [1, 2, 0]);
        assert_eq!(chart.items()[0].name(), "jan");
    }

    #[test]
    fn largest_value_reaches_the_outer_radius() {
        let chart = sample().with_config(CoxcombConfig::default().with_labels(false));
        let viewport = Rect::new(0.0, 0.0, 260.0, 260.0);
        let outer = 130.0 - chart.config().padding;
        let marks = chart.marks(viewport);
        assert_eq!(marks.len(), 3);
        let extent = |m: &Mark| {
            let b = m.bounds().expect("wedge bounds");
            let c = viewport.center();
            [b.x0 - c.x, c.x - b.x1, b.y0 - c.y, c.y - b.y1]
                .into_iter()
                .map(f64::abs)
                .fold(0.0, f64::max)
        };
        let feb = extent(&marks[1]);
        // The stroke does not count toward bounds; allow for curve flattening.
        assert!(
            (feb - outer).abs() < 0.5,
            "feb reaches {feb}, outer {outer}"
        );
        assert!(extent(&marks[0]) < feb);
    }
}
