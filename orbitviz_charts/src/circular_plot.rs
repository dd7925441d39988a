// Copyright 2025 the OrbitViz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Circular flow plot.
//!
//! Items sit on a ring, each taking an angular segment proportional to its size. Flows between
//! items are drawn as ribbons through the ring's interior: a flow leaves from a slice at the
//! start of the source segment and lands in a slice at the end of the target segment.

extern crate alloc;

use alloc::vec::Vec;

use kurbo::{Point, Rect};
use orbitviz_layout::{FlowCursor, Polar, Ribbon, Segment, Subdivision};
use peniko::Brush;
use peniko::color::palette::css;

use crate::chart::{Chart, ItemList};
use crate::events::{ItemEvent, RedrawReason, RedrawRequest, SubscriptionId};
use crate::item::{FlowItem, connections, incoming_sums, outgoing_sums};
use crate::log;
use crate::mark::{Mark, MarkId, PathMark, StrokeStyle, TextBaseline};
use crate::sector_mark::SectorMarkSpec;
use crate::text_mark::{TextMarkSpec, radial_anchor};
use crate::z_order;

/// Appearance and layout options for [`CircularPlot`].
#[derive(Clone, Debug)]
pub struct CircularPlotConfig {
    /// Base for mark ids.
    pub id_base: u64,
    /// Angle of the first segment's start, in degrees clockwise from 12 o'clock.
    pub start_angle: f64,
    /// Gap between adjacent segments, in degrees.
    pub gap: f64,
    /// Ring thickness as a fraction of the outer radius.
    pub ring_width: f64,
    /// Space between the viewport edge and the ring, for labels.
    pub padding: f64,
    /// Alpha applied to connection fills.
    pub connection_opacity: f32,
    /// How far ribbon control points are pulled toward the center, in `[0, 1]`.
    pub connection_spread: f64,
    /// Draw an arrow tip where each ribbon meets its target.
    pub show_flow_direction: bool,
    /// Depth of the arrow tip.
    pub direction_indicator: f64,
    /// Optional outline around each segment.
    pub segment_stroke: Option<StrokeStyle>,
    /// Draw item names outside the ring.
    pub show_labels: bool,
    /// Label font size.
    pub label_font_size: f64,
    /// Label paint.
    pub label_fill: Brush,
}

impl Default for CircularPlotConfig {
    fn default() -> Self {
        Self {
            id_base: 0x1000_0000,
            start_angle: 0.0,
            gap: 2.0,
            ring_width: 0.08,
            padding: 40.0,
            connection_opacity: 0.6,
            connection_spread: 1.0,
            show_flow_direction: false,
            direction_indicator: 8.0,
            segment_stroke: None,
            show_labels: true,
            label_font_size: 12.0,
            label_fill: css::BLACK.into(),
        }
    }
}

impl CircularPlotConfig {
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

    /// Sets the gap between segments.
    pub fn with_gap(mut self, gap: f64) -> Self {
        self.gap = gap;
        self
    }

    /// Sets the ring thickness fraction.
    pub fn with_ring_width(mut self, ring_width: f64) -> Self {
        self.ring_width = ring_width;
        self
    }

    /// Sets the outer padding.
    pub fn with_padding(mut self, padding: f64) -> Self {
        self.padding = padding;
        self
    }

    /// Sets the connection alpha.
    pub fn with_connection_opacity(mut self, opacity: f32) -> Self {
        self.connection_opacity = opacity;
        self
    }

    /// Sets the ribbon control point spread.
    pub fn with_connection_spread(mut self, spread: f64) -> Self {
        self.connection_spread = spread;
        self
    }

    /// Enables or disables arrow tips.
    pub fn with_flow_direction(mut self, show: bool) -> Self {
        self.show_flow_direction = show;
        self
    }

    /// Sets the arrow tip depth.
    pub fn with_direction_indicator(mut self, depth: f64) -> Self {
        self.direction_indicator = depth;
        self
    }

    /// Sets the segment outline.
    pub fn with_segment_stroke(mut self, stroke: StrokeStyle) -> Self {
        self.segment_stroke = Some(stroke);
        self
    }

    /// Enables or disables labels.
    pub fn with_labels(mut self, show: bool) -> Self {
        self.show_labels = show;
        self
    }
}

/// A circular flow plot over [`FlowItem`]s.
#[derive(Debug)]
pub struct CircularPlot {
    items: ItemList<FlowItem>,
    config: CircularPlotConfig,
}

impl CircularPlot {
    /// Creates a plot with default configuration.
    pub fn new(items: impl Into<Vec<FlowItem>>) -> Self {
        Self {
            items: ItemList::new(items.into()),
            config: CircularPlotConfig::default(),
        }
    }

    /// Replaces the configuration.
    pub fn with_config(mut self, config: CircularPlotConfig) -> Self {
        self.config = config;
        self
    }

    /// Current configuration.
    pub fn config(&self) -> &CircularPlotConfig {
        &self.config
    }

    /// Replaces the configuration and requests a redraw.
    pub fn set_config(&mut self, config: CircularPlotConfig) {
        self.config = config;
        self.items.request_redraw(RedrawReason::Config);
    }

    /// Sets the gap between segments and requests a redraw.
    pub fn set_gap(&mut self, gap: f64) {
        self.config.gap = gap;
        self.items.request_redraw(RedrawReason::Config);
    }

    /// Sets the start angle and requests a redraw.
    pub fn set_start_angle(&mut self, start_angle: f64) {
        self.config.start_angle = start_angle;
        self.items.request_redraw(RedrawReason::Config);
    }

    /// Enables or disables arrow tips and requests a redraw.
    pub fn set_show_flow_direction(&mut self, show: bool) {
        self.config.show_flow_direction = show;
        self.items.request_redraw(RedrawReason::Config);
    }

    /// Items in display order.
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

    /// Segment size per item: its value, raised to cover its total flow.
    pub fn segment_values(&self) -> Vec<f64> {
        let items = self.items.items();
        let conns = connections(items);
        let outgoing = outgoing_sums(items, &conns);
        let incoming = incoming_sums(items, &conns);
        items
            .iter()
            .zip(outgoing.iter().zip(&incoming))
            .map(|(item, (o, i))| {
                let flow = o + i;
                let value = item.item.value();
                if flow > value {
                    log::debug!(
                        item = item.item.name(),
                        value,
                        flow,
                        "raising segment to cover its flows"
                    );
                    flow
                } else {
                    value
                }
            })
            .collect()
    }

    /// Angular segments per item, in degrees.
    pub fn segments(&self) -> Vec<Segment> {
        self.subdivision().subdivide(&self.segment_values())
    }

    fn subdivision(&self) -> Subdivision {
        Subdivision::full_circle()
            .with_start(self.config.start_angle)
            .with_gap(self.config.gap)
    }
}

impl Chart for CircularPlot {
    fn marks(&self, viewport: Rect) -> Vec<Mark> {
        let cfg = &self.config;
        let items = self.items.items();
        let sizes = self.segment_values();
        let segments = self.subdivision().subdivide(&sizes);
        if !items.is_empty() && sizes.iter().all(|v| *v == 0.0) {
            log::warn!(items = items.len(), "all items are zero; segments collapse");
        }

        let center = viewport.center();
        let radius = (0.5 * viewport.width().min(viewport.height()) - cfg.padding).max(0.0);
        let inner = radius * (1.0 - cfg.ring_width.clamp(0.0, 1.0));

        let mut out = Vec::new();

        for (i, (item, segment)) in items.iter().zip(&segments).enumerate() {
            out.push(
                SectorMarkSpec::new(
                    MarkId::for_lane(cfg.id_base, 0, i),
                    center,
                    inner,
                    radius,
                    *segment,
                )
                .with_fill(item.item.resolved_fill(i))
                .with_optional_stroke(cfg.segment_stroke.clone())
                .mark(),
            );
        }

        let mut cursors: Vec<FlowCursor> = segments
            .iter()
            .zip(&sizes)
            .map(|(s, v)| FlowCursor::new(*s, *v))
            .collect();
        let mut ribbon = Ribbon::new(inner).with_spread(cfg.connection_spread);
        if cfg.show_flow_direction {
            ribbon = ribbon.with_direction_indicator(cfg.direction_indicator);
        }
        for (i, c) in connections(items).iter().enumerate() {
            let source = cursors[c.source].take_outgoing(c.value);
            let target = cursors[c.target].take_incoming(c.value);
            let path = ribbon.path(center, source, target);
            out.push(Mark::path(
                MarkId::for_lane(cfg.id_base, 1, i),
                z_order::CONNECTIONS,
                PathMark::new(path).with_fill(c.fill.with_alpha(cfg.connection_opacity)),
            ));
        }

        if cfg.show_labels {
            let label_radius = radius + 0.5 * cfg.label_font_size;
            for (i, (item, segment)) in items.iter().zip(&segments).enumerate() {
                let angle = segment.mid();
                let pos: Point = Polar::new(label_radius, angle).to_point(center);
                out.push(
                    TextMarkSpec::new(MarkId::for_lane(cfg.id_base, 2, i), pos, item.item.name())
                        .with_font_size(cfg.label_font_size)
                        .with_fill(cfg.label_fill.clone())
                        .with_anchor(radial_anchor(angle))
                        .with_baseline(TextBaseline::Middle)
                        .mark(),
                );
            }
        }

        log::debug!(marks = out.len(), "circular plot marks");
        out
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::rc::Rc;
    use alloc::vec;
    use core::cell::Cell;

    use super::*;

    fn sample() -> CircularPlot {
        CircularPlot::new(vec![
            FlowItem::new("a", 10.0)
                .unwrap()
                .with_outgoing("b", 4.0)
                .unwrap()
                .with_outgoing("c", 2.0)
                .unwrap(),
            FlowItem::new("b", 3.0)
                .unwrap()
                .with_outgoing("c", 1.0)
                .unwrap(),
            FlowItem::new("c", 6.0).unwrap(),
        ])
    }

    #[test]
    fn values_are_raised_to_cover_flows() {
        // `b` declares 3 but moves 4 in and 1 out.
        assert_eq!(sample().segment_values(), [10.0, 5.0, 6.0]);
    }

    #[test]
    fn segments_and_gaps_fill_the_circle() {
        let plot = sample();
        let segments = plot.segments();
        let total: f64 = segments.iter().map(|s| s.width).sum::<f64>() + 3.0 * plot.config().gap;
        assert!((total - 360.0).abs() < 1e-9, "total {total}");
    }

    #[test]
    fn marks_cover_segments_ribbons_and_labels() {
        let marks = sample().marks(Rect::new(0.0, 0.0, 400.0, 400.0));
        let ribbons = marks
            .iter()
            .filter(|m| m.z_index == z_order::CONNECTIONS)
            .count();
        let labels = marks.iter().filter(|m| m.as_text().is_some()).count();
        assert_eq!(ribbons, 3);
        assert_eq!(labels, 3);
        assert_eq!(marks.len(), 9);
        for m in &marks {
            if let Some(b) = m.bounds() {
                assert!(
                    b.x0 >= -1.0 && b.x1 <= 401.0 && b.y0 >= -1.0 && b.y1 <= 401.0,
                    "mark {:?} out of viewport: {b:?}",
                    m.id
                );
            }
        }
    }

    #[test]
    fn config_setters_request_redraw() {
        let mut plot = sample();
        let count = Rc::new(Cell::new(0));
        let c = Rc::clone(&count);
        plot.on_redraw(move |r| {
            assert_eq!(r.reason, RedrawReason::Config);
            c.set(c.get() + 1);
        });
        plot.set_gap(5.0);
        plot.set_show_flow_direction(true);
        assert_eq!(count.get(), 2);
        assert_eq!(plot.config().gap, 5.0);
    }

    #[test]
    fn direction_indicator_changes_ribbons_only() {
        let mut plot = sample();
        let viewport = Rect::new(0.0, 0.0, 300.0, 300.0);
        let plain = plot.marks(viewport);
        plot.set_show_flow_direction(true);
        let arrows = plot.marks(viewport);
        assert_eq!(plain.len(), arrows.len());
        for (a, b) in plain.iter().zip(&arrows) {
            if a.z_index == z_order::CONNECTIONS {
                assert_ne!(a, b, "ribbon {:?} should change", a.id);
            } else {
                assert_eq!(a, b);
            }
        }
    }
}
