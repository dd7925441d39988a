// Copyright 2025 the OrbitViz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Arc diagram: items along a horizontal baseline, flows as semicircular bands.

extern crate alloc;

use alloc::vec::Vec;

use kurbo::{Point, Rect};
use orbitviz_layout::{ArcSide, FlowCursor, Segment, Subdivision, arc_link};
use peniko::Brush;
use peniko::color::palette::css;

use crate::chart::{Chart, ItemList};
use crate::events::{ItemEvent, RedrawReason, RedrawRequest, SubscriptionId};
use crate::item::{FlowItem, connections, incoming_sums, outgoing_sums};
use crate::log;
use crate::mark::{Mark, MarkId, PathMark, TextAnchor, TextBaseline};
use crate::text_mark::TextMarkSpec;
use crate::z_order;

/// Appearance and layout options for [`ArcChart`].
#[derive(Clone, Debug)]
pub struct ArcChartConfig {
    /// Base for mark ids.
    pub id_base: u64,
    /// Horizontal space left free at each end of the baseline.
    pub padding: f64,
    /// Gap between adjacent nodes, in scene units.
    pub gap: f64,
    /// Vertical position of the baseline as a fraction of the viewport height.
    pub baseline: f64,
    /// Height of the node bars.
    pub node_thickness: f64,
    /// Alpha applied to connection fills.
    pub connection_opacity: f32,
    /// Draw item names under the nodes.
    pub show_labels: bool,
    /// Label font size.
    pub label_font_size: f64,
    /// Label paint.
    pub label_fill: Brush,
}

impl Default for ArcChartConfig {
    fn default() -> Self {
        Self {
            id_base: 0x2000_0000,
            padding: 20.0,
            gap: 8.0,
            baseline: 0.5,
            node_thickness: 6.0,
            connection_opacity: 0.6,
            show_labels: true,
            label_font_size: 11.0,
            label_fill: css::BLACK.into(),
        }
    }
}

impl ArcChartConfig {
    /// Sets the mark id base.
    pub fn with_id_base(mut self, id_base: u64) -> Self {
        self.id_base = id_base;
        self
    }

    /// Sets the gap between nodes.
    pub fn with_gap(mut self, gap: f64) -> Self {
        self.gap = gap;
        self
    }

    /// Sets the baseline position fraction.
    pub fn with_baseline(mut self, baseline: f64) -> Self {
        self.baseline = baseline;
        self
    }

    /// Sets the connection alpha.
    pub fn with_connection_opacity(mut self, opacity: f32) -> Self {
        self.connection_opacity = opacity;
        self
    }

    /// Enables or disables labels.
    pub fn with_labels(mut self, show: bool) -> Self {
        self.show_labels = show;
        self
    }
}

/// An arc diagram over [`FlowItem`]s.
///
/// Flows to an item further right bulge above the baseline; flows to the left bulge below.
#[derive(Debug)]
pub struct ArcChart {
    items: ItemList<FlowItem>,
    config: ArcChartConfig,
}

impl ArcChart {
    /// Creates a chart with default configuration.
    pub fn new(items: impl Into<Vec<FlowItem>>) -> Self {
        Self {
            items: ItemList::new(items.into()),
            config: ArcChartConfig::default(),
        }
    }

    /// Replaces the configuration.
    pub fn with_config(mut self, config: ArcChartConfig) -> Self {
        self.config = config;
        self
    }

    /// Current configuration.
    pub fn config(&self) -> &ArcChartConfig {
        &self.config
    }

    /// Replaces the configuration and requests a redraw.
    pub fn set_config(&mut self, config: ArcChartConfig) {
        self.config = config;
        self.items.request_redraw(RedrawReason::Config);
    }

    /// Sets the node gap and requests a redraw.
    pub fn set_gap(&mut self, gap: f64) {
        self.config.gap = gap;
        self.items.request_redraw(RedrawReason::Config);
    }

    /// Items in baseline order.
    pub fn items(&self) -> &[FlowItem] {
        self.items.items()
    }

    /// Replaces every item.
    pub fn set_items(&mut self, items: Vec<FlowItem>) {
        self.items.set_items(items);
    }

    /// Appends an item; returns `false` for a duplicate name.
    pub fn add_item(&mut self, item: FlowItem) -> bool {
        self.items.add_item(item)
    }

    /// Removes the item named `name`.
    pub fn remove_item(&mut self, name: &str) -> Option<FlowItem> {
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

    fn node_values(&self) -> Vec<f64> {
        let items = self.items.items();
        let conns = connections(items);
        let outgoing = outgoing_sums(items, &conns);
        let incoming = incoming_sums(items, &conns);
        items
            .iter()
            .zip(outgoing.iter().zip(&incoming))
            .map(|(item, (o, i))| item.item.value().max(o + i))
            .collect()
    }

    /// Node extents along the x axis of `viewport`.
    pub fn node_segments(&self, viewport: Rect) -> Vec<Segment> {
        let span = (viewport.width() - 2.0 * self.config.padding).max(0.0);
        Subdivision::new(span)
            .with_start(viewport.x0 + self.config.padding)
            .with_gap(self.config.gap)
            .subdivide(&self.node_values())
    }
}

impl Chart for ArcChart {
    fn marks(&self, viewport: Rect) -> Vec<Mark> {
        let cfg = &self.config;
        let items = self.items.items();
        let values = self.node_values();
        let segments = self.node_segments(viewport);
        let baseline = viewport.y0 + viewport.height() * cfg.baseline.clamp(0.0, 1.0);
        let half = 0.5 * cfg.node_thickness.max(0.0);
        if !items.is_empty() && values.iter().all(|v| *v == 0.0) {
            log::warn!(items = items.len(), "all items are zero; nodes collapse");
        }

        let mut out = Vec::new();
        for (i, (item, s)) in items.iter().zip(&segments).enumerate() {
            let bar = Rect::new(s.start, baseline - half, s.end(), baseline + half);
            out.push(Mark::path(
                MarkId::for_lane(cfg.id_base, 0, i),
                z_order::SEGMENTS,
                PathMark::rect(bar).with_fill(item.item.resolved_fill(i)),
            ));
        }

        let mut cursors: Vec<FlowCursor> = segments
            .iter()
            .zip(&values)
            .map(|(s, v)| FlowCursor::new(*s, *v))
            .collect();
        for (i, c) in connections(items).iter().enumerate() {
            let source = cursors[c.source].take_outgoing(c.value);
            let target = cursors[c.target].take_incoming(c.value);
            let side = if source.mid() < target.mid() {
                ArcSide::Above
            } else {
                ArcSide::Below
            };
            let path = arc_link(source.mid(), target.mid(), baseline, source.width, side);
            out.push(Mark::path(
                MarkId::for_lane(cfg.id_base, 1, i),
                z_order::CONNECTIONS,
                PathMark::new(path).with_fill(c.fill.with_alpha(cfg.connection_opacity)),
            ));
        }

        if cfg.show_labels {
            for (i, (item, s)) in items.iter().zip(&segments).enumerate() {
                let pos = Point::new(s.mid(), baseline + half + 0.5 * cfg.label_font_size);
                out.push(
                    TextMarkSpec::new(MarkId::for_lane(cfg.id_base, 2, i), pos, item.item.name())
                        .with_font_size(cfg.label_font_size)
                        .with_fill(cfg.label_fill.clone())
                        .with_anchor(TextAnchor::Middle)
                        .with_baseline(TextBaseline::Hanging)
                        .mark(),
                );
            }
        }

        log::debug!(marks = out.len(), "arc chart marks");
        out
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;

    use super::*;

    fn sample() -> ArcChart {
        ArcChart::new(vec![
            FlowItem::new("a", 4.0)
                .unwrap()
                .with_outgoing("c", 2.0)
                .unwrap(),
            FlowItem::new("b", 2.0).unwrap(),
            FlowItem::new("c", 4.0)
                .unwrap()
                .with_outgoing("b", 1.0)
                .unwrap(),
        ])
    }

    #[test]
    fn nodes_split_the_plot_width() {
        let chart = sample();
        let viewport = Rect::new(0.0, 0.0, 540.0, 300.0);
        let segments = chart.node_segments(viewport);
        let span = 540.0 - 2.0 * chart.config().padding;
        let total: f64 = segments.iter().map(|s| s.width).sum::<f64>() + 2.0 * chart.config().gap;
        assert!((total - span).abs() < 1e-9, "total {total}");
        assert!((segments[0].start - chart.config().padding).abs() < 1e-9);
        assert!((segments[0].width - segments[2].width).abs() < 1e-9);
    }

    #[test]
    fn rightward_flows_go_above_and_leftward_below() {
        let chart = sample();
        let viewport = Rect::new(0.0, 0.0, 540.0, 300.0);
        let baseline = 150.0;
        let marks = chart.marks(viewport);
        let arcs: Vec<Rect> = marks
            .iter()
            .filter(|m| m.z_index == z_order::CONNECTIONS)
            .filter_map(Mark::bounds)
            .collect();
        assert_eq!(arcs.len(), 2);
        // a -> c goes right.
        assert!(arcs[0].y1 <= baseline + 1e-6, "{:?}", arcs[0]);
        assert!(arcs[0].y0 < baseline);
        // c -> b goes left.
        assert!(arcs[1].y0 >= baseline - 1e-6, "{:?}", arcs[1]);
        assert!(arcs[1].y1 > baseline);
    }
}
