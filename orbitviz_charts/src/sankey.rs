// Copyright 2025 the OrbitViz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sankey diagram: items in level columns, flows as horizontal bands.
//!
//! All columns share one vertical scale (the tightest one any column needs), so equal values
//! have equal heights everywhere. Columns are centered vertically.

extern crate alloc;

use alloc::vec::Vec;

use hashbrown::HashMap;
use kurbo::{Point, Rect};
use orbitviz_layout::{FlowCursor, Segment, Subdivision, band_link};
use peniko::Brush;
use peniko::color::palette::css;

use crate::axis::inset;
use crate::chart::{Chart, ItemList, Named};
use crate::error::ChartError;
use crate::events::{ItemEvent, RedrawReason, RedrawRequest, SubscriptionId};
use crate::item::{FlowItem, connections, incoming_sums, outgoing_sums};
use crate::log;
use crate::mark::{Mark, MarkId, PathMark, TextAnchor, TextBaseline};
use crate::text_mark::TextMarkSpec;
use crate::z_order;

/// Appearance and layout options for [`SankeyPlot`].
#[derive(Clone, Debug)]
pub struct SankeyConfig {
    /// Base for mark ids.
    pub id_base: u64,
    /// Space between the viewport edge and the plot.
    pub padding: f64,
    /// Width of the node bars.
    pub node_width: f64,
    /// Vertical gap between nodes in a column.
    pub node_gap: f64,
    /// Horizontal position of band control points, as a fraction of the column distance.
    pub curvature: f64,
    /// Alpha applied to band fills.
    pub connection_opacity: f32,
    /// Draw an arrow tip where each band meets its target.
    pub show_flow_direction: bool,
    /// Depth of the arrow tip.
    pub direction_indicator: f64,
    /// Draw item names beside the nodes.
    pub show_labels: bool,
    /// Label font size.
    pub label_font_size: f64,
    /// Label paint.
    pub label_fill: Brush,
}

impl Default for SankeyConfig {
    fn default() -> Self {
        Self {
            id_base: 0x3000_0000,
            padding: 20.0,
            node_width: 16.0,
            node_gap: 12.0,
            curvature: 0.5,
            connection_opacity: 0.5,
            show_flow_direction: false,
            direction_indicator: 6.0,
            show_labels: true,
            label_font_size: 11.0,
            label_fill: css::BLACK.into(),
        }
    }
}

impl SankeyConfig {
    /// Sets the mark id base.
    pub fn with_id_base(mut self, id_base: u64) -> Self {
        self.id_base = id_base;
        self
    }

    /// Sets the node bar width.
    pub fn with_node_width(mut self, node_width: f64) -> Self {
        self.node_width = node_width;
        self
    }

    /// Sets the vertical gap between nodes.
    pub fn with_node_gap(mut self, node_gap: f64) -> Self {
        self.node_gap = node_gap;
        self
    }

    /// Sets the band curvature.
    pub fn with_curvature(mut self, curvature: f64) -> Self {
        self.curvature = curvature;
        self
    }

    /// Enables or disables arrow tips.
    pub fn with_flow_direction(mut self, show: bool) -> Self {
        self.show_flow_direction = show;
        self
    }

    /// Enables or disables labels.
    pub fn with_labels(mut self, show: bool) -> Self {
        self.show_labels = show;
        self
    }
}

/// A sankey diagram over leveled [`FlowItem`]s.
#[derive(Debug)]
pub struct SankeyPlot {
    items: ItemList<FlowItem>,
    config: SankeyConfig,
}

/// Rejects duplicate names, unknown flow targets and flows that do not move to a later level.
fn validate(items: &[FlowItem]) -> Result<(), ChartError> {
    let mut levels: HashMap<&str, usize> = HashMap::with_capacity(items.len());
    for item in items {
        if levels.insert(item.name(), item.level).is_some() {
            return Err(ChartError::DuplicateItem(item.name().into()));
        }
    }
    for item in items {
        for (target, _) in item.outgoing() {
            let Some(&level) = levels.get(target.as_str()) else {
                return Err(ChartError::UnknownItem(target.clone()));
            };
            if level <= item.level {
                return Err(ChartError::FlowAgainstLevels {
                    from: item.name().into(),
                    to: target.clone(),
                });
            }
        }
    }
    Ok(())
}

impl SankeyPlot {
    /// Creates a plot after validating flows against levels.
    pub fn new(items: impl Into<Vec<FlowItem>>) -> Result<Self, ChartError> {
        let items = items.into();
        validate(&items)?;
        Ok(Self {
            items: ItemList::new(items),
            config: SankeyConfig::default(),
        })
    }

    /// Replaces the configuration.
    pub fn with_config(mut self, config: SankeyConfig) -> Self {
        self.config = config;
        self
    }

    /// Current configuration.
    pub fn config(&self) -> &SankeyConfig {
        &self.config
    }

    /// Replaces the configuration and requests a redraw.
    pub fn set_config(&mut self, config: SankeyConfig) {
        self.config = config;
        self.items.request_redraw(RedrawReason::Config);
    }

    /// Enables or disables arrow tips and requests a redraw.
    pub fn set_show_flow_direction(&mut self, show: bool) {
        self.config.show_flow_direction = show;
        self.items.request_redraw(RedrawReason::Config);
    }

    /// Items in insertion order.
    pub fn items(&self) -> &[FlowItem] {
        self.items.items()
    }

    /// Replaces every item after validation. On error nothing changes.
    pub fn set_items(&mut self, items: Vec<FlowItem>) -> Result<(), ChartError> {
        validate(&items)?;
        self.items.set_items(items);
        Ok(())
    }

    /// Appends an item after validation.
    ///
    /// Returns `Ok(false)` for a duplicate name. Flows from and to the new item must respect
    /// levels; the new item may not target items that do not exist yet.
    pub fn add_item(&mut self, item: FlowItem) -> Result<bool, ChartError> {
        if self.items.get(item.name()).is_some() {
            return Ok(false);
        }
        let mut candidate: Vec<FlowItem> = self.items.items().to_vec();
        candidate.push(item.clone());
        validate(&candidate)?;
        Ok(self.items.add_item(item))
    }

    /// Removes the item named `name`, failing if other items still flow into it.
    pub fn remove_item(&mut self, name: &str) -> Result<Option<FlowItem>, ChartError> {
        let candidate: Vec<FlowItem> = self
            .items
            .items()
            .iter()
            .filter(|i| i.name() != name)
            .cloned()
            .collect();
        validate(&candidate)?;
        Ok(self.items.remove_item(name))
    }

    /// Registers a redraw listener.
    pub fn on_redraw(&mut self, listener: impl FnMut(&RedrawRequest) + 'static) -> SubscriptionId {
        self.items.on_redraw(listener)
    }

    /// Registers an item change listener.
    pub fn on_item_event(&mut self, listener: impl FnMut(&ItemEvent) + 'static) -> SubscriptionId {
        self.items.on_item_event(listener)
    }

    /// Node size per item: its value, raised to its larger flow total.
    pub fn node_values(&self) -> Vec<f64> {
        let items = self.items.items();
        let conns = connections(items);
        let outgoing = outgoing_sums(items, &conns);
        let incoming = incoming_sums(items, &conns);
        items
            .iter()
            .zip(outgoing.iter().zip(&incoming))
            .map(|(item, (o, i))| {
                let flow = o.max(*i);
                if flow > item.value() {
                    log::debug!(item = item.name(), flow, "raising node to cover its flows");
                }
                item.value().max(flow)
            })
            .collect()
    }

    /// Node rectangles inside `viewport`, indexed like [`SankeyPlot::items`].
    pub fn node_rects(&self, viewport: Rect) -> Vec<Rect> {
        let cfg = &self.config;
        let items = self.items.items();
        let values = self.node_values();
        let p = cfg.padding;
        let plot = inset(viewport, (p, p, p, p));
        let height = plot.height();

        let mut levels: Vec<usize> = items.iter().map(|i| i.level).collect();
        levels.sort_unstable();
        levels.dedup();
        let columns: Vec<Vec<usize>> = levels
            .iter()
            .map(|l| {
                (0..items.len())
                    .filter(|&i| items[i].level == *l)
                    .collect()
            })
            .collect();

        let column_layout = Subdivision::new(height).with_gap(cfg.node_gap);
        let scale = columns
            .iter()
            .map(|c| {
                let vs: Vec<f64> = c.iter().map(|&i| values[i]).collect();
                column_layout.scale(&vs)
            })
            .filter(|s| *s > 0.0)
            .fold(f64::INFINITY, f64::min);
        let scale = if scale.is_finite() { scale } else { 0.0 };

        let node_width = cfg.node_width.max(0.0);
        let column_step = if columns.len() > 1 {
            (plot.width() - node_width).max(0.0) / (columns.len() - 1) as f64
        } else {
            0.0
        };
        let first_x = if columns.len() > 1 {
            plot.x0
        } else {
            plot.center().x - 0.5 * node_width
        };

        let mut rects = alloc::vec![Rect::ZERO; items.len()];
        for (k, column) in columns.iter().enumerate() {
            let gap = column_layout.effective_gap(column.len());
            let total: f64 = column.iter().map(|&i| values[i] * scale).sum::<f64>()
                + gap * column.len().saturating_sub(1) as f64;
            let mut y = plot.y0 + 0.5 * (height - total).max(0.0);
            let x = first_x + column_step * k as f64;
            for &i in column {
                let h = values[i] * scale;
                rects[i] = Rect::new(x, y, x + node_width, y + h);
                y += h + gap;
            }
        }
        rects
    }
}

impl Chart for SankeyPlot {
    fn marks(&self, viewport: Rect) -> Vec<Mark> {
        let cfg = &self.config;
        let items = self.items.items();
        let values = self.node_values();
        let rects = self.node_rects(viewport);
        if !items.is_empty() && values.iter().all(|v| *v == 0.0) {
            log::warn!(items = items.len(), "all items are zero; nodes collapse");
        }

        let mut out = Vec::new();
        for (i, (item, rect)) in items.iter().zip(&rects).enumerate() {
            out.push(Mark::path(
                MarkId::for_lane(cfg.id_base, 0, i),
                z_order::SEGMENTS,
                PathMark::rect(*rect).with_fill(item.item.resolved_fill(i)),
            ));
        }

        let vertical = |r: &Rect| Segment::new(r.y0, r.height());
        let mut out_cursors: Vec<FlowCursor> = rects
            .iter()
            .zip(&values)
            .map(|(r, v)| FlowCursor::new(vertical(r), *v))
            .collect();
        let mut in_cursors = out_cursors.clone();
        let indicator = cfg
            .show_flow_direction
            .then_some(cfg.direction_indicator);
        for (i, c) in connections(items).iter().enumerate() {
            let source = out_cursors[c.source].take_outgoing(c.value);
            let target = in_cursors[c.target].take_outgoing(c.value);
            let path = band_link(
                source,
                target,
                rects[c.source].x1,
                rects[c.target].x0,
                cfg.curvature,
                indicator,
            );
            out.push(Mark::path(
                MarkId::for_lane(cfg.id_base, 1, i),
                z_order::CONNECTIONS,
                PathMark::new(path).with_fill(c.fill.with_alpha(cfg.connection_opacity)),
            ));
        }

        if cfg.show_labels {
            let last_level = items.iter().map(|i| i.level).max();
            for (i, (item, rect)) in items.iter().zip(&rects).enumerate() {
                let on_last = items.len() > 1 && Some(item.level) == last_level;
                let (x, anchor) = if on_last {
                    (rect.x0 - 4.0, TextAnchor::End)
                } else {
                    (rect.x1 + 4.0, TextAnchor::Start)
                };
                out.push(
                    TextMarkSpec::new(
                        MarkId::for_lane(cfg.id_base, 2, i),
                        Point::new(x, rect.center().y),
                        item.name(),
                    )
                    .with_font_size(cfg.label_font_size)
                    .with_fill(cfg.label_fill.clone())
                    .with_anchor(anchor)
                    .with_baseline(TextBaseline::Middle)
                    .mark(),
                );
            }
        }

        log::debug!(marks = out.len(), "sankey marks");
        out
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;

    use super::*;

    fn sample_items() -> Vec<FlowItem> {
        vec![
            FlowItem::new("coal", 30.0)
                .unwrap()
                .with_outgoing("power", 25.0)
                .unwrap()
                .with_outgoing("steel", 5.0)
                .unwrap(),
            FlowItem::new("gas", 20.0)
                .unwrap()
                .with_outgoing("power", 20.0)
                .unwrap(),
            FlowItem::new("power", 0.0).unwrap().with_level(1),
            FlowItem::new("steel", 0.0).unwrap().with_level(1),
        ]
    }

    #[test]
    fn rejects_flows_against_levels() {
        let items = vec![
            FlowItem::new("a", 1.0).unwrap().with_level(1),
            FlowItem::new("b", 1.0)
                .unwrap()
                .with_level(1)
                .with_outgoing("a", 1.0)
                .unwrap(),
        ];
        assert_eq!(
            SankeyPlot::new(items).err(),
            Some(ChartError::FlowAgainstLevels {
                from: "b".into(),
                to: "a".into()
            })
        );
    }

    #[test]
    fn rejects_unknown_targets_and_duplicates() {
        let unknown = vec![
            FlowItem::new("a", 1.0)
                .unwrap()
                .with_outgoing("nowhere", 1.0)
                .unwrap(),
        ];
        assert_eq!(
            SankeyPlot::new(unknown).err(),
            Some(ChartError::UnknownItem("nowhere".into()))
        );
        let dup = vec![
            FlowItem::new("a", 1.0).unwrap(),
            FlowItem::new("a", 2.0).unwrap(),
        ];
        assert_eq!(
            SankeyPlot::new(dup).err(),
            Some(ChartError::DuplicateItem("a".into()))
        );
    }

    #[test]
    fn targets_grow_to_incoming_flow() {
        let plot = SankeyPlot::new(sample_items()).unwrap();
        assert_eq!(plot.node_values(), [30.0, 20.0, 45.0, 5.0]);
    }

    #[test]
    fn columns_share_one_scale() {
        let plot = SankeyPlot::new(sample_items()).unwrap();
        let viewport = Rect::new(0.0, 0.0, 400.0, 300.0);
        let rects = plot.node_rects(viewport);
        let values = plot.node_values();
        let per_unit: Vec<f64> = rects
            .iter()
            .zip(&values)
            .map(|(r, v)| r.height() / v)
            .collect();
        for s in &per_unit {
            assert!((s - per_unit[0]).abs() < 1e-9, "scales {per_unit:?}");
        }
        for r in &rects {
            assert!(r.y0 >= 20.0 - 1e-9 && r.y1 <= 280.0 + 1e-9, "{r:?}");
        }
        assert!(rects[2].x0 > rects[0].x1, "level 1 is right of level 0");
    }

    #[test]
    fn add_item_validates_levels() {
        let mut plot = SankeyPlot::new(sample_items()).unwrap();
        let back = FlowItem::new("loop", 1.0)
            .unwrap()
            .with_outgoing("coal", 1.0)
            .unwrap();
        assert!(plot.add_item(back).is_err());
        assert_eq!(plot.items().len(), 4);
        let ok = FlowItem::new("oil", 2.0)
            .unwrap()
            .with_outgoing("power", 2.0)
            .unwrap();
        assert_eq!(plot.add_item(ok.clone()), Ok(true));
        assert_eq!(plot.add_item(ok), Ok(false));
        assert!(plot.remove_item("power").is_err(), "still a flow target");
    }

    #[test]
    fn bands_connect_node_edges() {
        let plot = SankeyPlot::new(sample_items()).unwrap();
        let viewport = Rect::new(0.0, 0.0, 400.0, 300.0);
        let rects = plot.node_rects(viewport);
        let marks = plot.marks(viewport);
        let bands: Vec<Rect> = marks
            .iter()
            .filter(|m| m.z_index == z_order::CONNECTIONS)
            .filter_map(Mark::bounds)
            .collect();
        assert_eq!(bands.len(), 3);
        for b in &bands {
            assert!((b.x0 - rects[0].x1).abs() < 1e-9);
            assert!((b.x1 - rects[2].x0).abs() < 1e-9);
        }
    }
}
