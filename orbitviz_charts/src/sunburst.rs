// Copyright 2025 the OrbitViz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sunburst chart: a hierarchy drawn as concentric rings.
//!
//! The root is not drawn; it spans the configured angle and its children form the innermost
//! ring. Every other node's wedge nests inside its parent's wedge, proportional to value.

extern crate alloc;

use alloc::vec::Vec;

use kurbo::Rect;
use orbitviz_layout::{NodeId, Polar, Segment, Tree, propagate};
use peniko::color::palette::css;
use peniko::{Brush, Color};

use crate::chart::Chart;
use crate::error::ChartError;
use crate::events::{ItemEvent, RedrawReason, RedrawRequest, Subscribers, SubscriptionId};
use crate::item::Item;
use crate::log;
use crate::mark::{Mark, MarkId, StrokeStyle, TextAnchor, TextBaseline};
use crate::palette::{lighten, palette_color};
use crate::sector_mark::SectorMarkSpec;
use crate::text_mark::TextMarkSpec;

/// Appearance and layout options for [`SunburstChart`].
#[derive(Clone, Debug)]
pub struct SunburstConfig {
    /// Base for mark ids.
    pub id_base: u64,
    /// Angle where the root's range starts, in degrees clockwise from 12 o'clock.
    pub start_angle: f64,
    /// Angular range covered by the root, in degrees.
    pub span: f64,
    /// Space between the viewport edge and the outermost ring.
    pub padding: f64,
    /// Radius of the empty center as a fraction of the outer radius.
    pub hole: f64,
    /// Size parents by their subtree totals instead of their own values.
    pub auto_sum: bool,
    /// Children without a fill use a lightened copy of their top-level ancestor's fill.
    pub inherit_colors: bool,
    /// Optional outline around each wedge.
    pub segment_stroke: Option<StrokeStyle>,
    /// Draw node names inside their wedges.
    pub show_labels: bool,
    /// Wedges narrower than this many degrees get no label.
    pub min_label_angle: f64,
    /// Label font size.
    pub label_font_size: f64,
    /// Label paint.
    pub label_fill: Brush,
}

impl Default for SunburstConfig {
    fn default() -> Self {
        Self {
            id_base: 0x5000_0000,
            start_angle: 0.0,
            span: 360.0,
            padding: 20.0,
            hole: 0.15,
            auto_sum: true,
            inherit_colors: true,
            segment_stroke: Some(StrokeStyle::solid(css::WHITE, 1.0)),
            show_labels: true,
            min_label_angle: 10.0,
            label_font_size: 10.0,
            label_fill: css::BLACK.into(),
        }
    }
}

impl SunburstConfig {
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

    /// Sets the angular range.
    pub fn with_span(mut self, span: f64) -> Self {
        self.span = span;
        self
    }

    /// Sets the center hole fraction.
    pub fn with_hole(mut self, hole: f64) -> Self {
        self.hole = hole;
        self
    }

    /// Enables or disables parent auto-summing.
    pub fn with_auto_sum(mut self, auto_sum: bool) -> Self {
        self.auto_sum = auto_sum;
        self
    }

    /// Enables or disables color inheritance.
    pub fn with_inherit_colors(mut self, inherit: bool) -> Self {
        self.inherit_colors = inherit;
        self
    }

    /// Enables or disables labels.
    pub fn with_labels(mut self, show: bool) -> Self {
        self.show_labels = show;
        self
    }
}

/// A sunburst over a [`Tree`] of [`Item`]s.
#[derive(Debug)]
pub struct SunburstChart {
    tree: Tree<Item>,
    config: SunburstConfig,
    item_events: Subscribers<ItemEvent>,
    redraw: Subscribers<RedrawRequest>,
}

impl SunburstChart {
    /// Creates a chart over `tree`.
    pub fn new(tree: Tree<Item>) -> Self {
        Self {
            tree,
            config: SunburstConfig::default(),
            item_events: Subscribers::new(),
            redraw: Subscribers::new(),
        }
    }

    /// Creates a chart holding only a synthetic root.
    pub fn with_root(name: impl Into<alloc::string::String>) -> Self {
        Self::new(Tree::new(Item::named(name)))
    }

    /// Replaces the configuration.
    pub fn with_config(mut self, config: SunburstConfig) -> Self {
        self.config = config;
        self
    }

    /// Current configuration.
    pub fn config(&self) -> &SunburstConfig {
        &self.config
    }

    /// Replaces the configuration and requests a redraw.
    pub fn set_config(&mut self, config: SunburstConfig) {
        self.config = config;
        self.request_redraw(RedrawReason::Config);
    }

    /// Enables or disables parent auto-summing and requests a redraw.
    pub fn set_auto_sum(&mut self, auto_sum: bool) {
        self.config.auto_sum = auto_sum;
        self.request_redraw(RedrawReason::Config);
    }

    /// The hierarchy.
    pub fn tree(&self) -> &Tree<Item> {
        &self.tree
    }

    /// Replaces the hierarchy.
    pub fn set_tree(&mut self, tree: Tree<Item>) {
        self.tree = tree;
        self.item_events.emit(&ItemEvent::Replaced {
            count: self.tree.len() - 1,
        });
        self.request_redraw(RedrawReason::Items);
    }

    /// Adds `item` under `parent`.
    pub fn add_child(&mut self, parent: NodeId, item: Item) -> Result<NodeId, ChartError> {
        let event = ItemEvent::Added(item.name().into());
        let id = self.tree.add_child(parent, item)?;
        self.item_events.emit(&event);
        self.request_redraw(RedrawReason::Items);
        Ok(id)
    }

    /// Changes the value of node `id`.
    pub fn set_value(&mut self, id: NodeId, value: f64) -> Result<(), ChartError> {
        let item = self
            .tree
            .get_mut(id)
            .ok_or(orbitviz_layout::TreeError::UnknownNode(id))?;
        item.set_value(value)?;
        self.request_redraw(RedrawReason::Items);
        Ok(())
    }

    /// Registers a redraw listener.
    pub fn on_redraw(&mut self, listener: impl FnMut(&RedrawRequest) + 'static) -> SubscriptionId {
        self.redraw.subscribe(listener)
    }

    /// Registers an item change listener.
    pub fn on_item_event(&mut self, listener: impl FnMut(&ItemEvent) + 'static) -> SubscriptionId {
        self.item_events.subscribe(listener)
    }

    fn request_redraw(&mut self, reason: RedrawReason) {
        self.redraw.emit(&RedrawRequest::new(reason));
    }

    /// Angular segment per node, indexed by [`NodeId::index`].
    pub fn segments(&self) -> Vec<Segment> {
        let root = Segment::new(self.config.start_angle, self.config.span.clamp(0.0, 360.0));
        if self.config.auto_sum {
            let sums = self.tree.subtree_sums(Item::value);
            let sized = self.tree.map(|id, _| sums[id.index()]);
            propagate(&sized, root, |v| *v)
        } else {
            propagate(&self.tree, root, Item::value)
        }
    }

    fn fills(&self) -> Vec<Color> {
        let tree = &self.tree;
        let mut fills = alloc::vec![palette_color(0); tree.len()];
        let mut top_level = 0;
        for id in tree.depth_first() {
            let Some(item) = tree.get(id) else { continue };
            let depth = tree.depth(id);
            fills[id.index()] = if let Some(fill) = item.fill() {
                fill
            } else if depth == 1 {
                palette_color(top_level)
            } else if let (true, Some(parent)) = (self.config.inherit_colors, tree.parent(id)) {
                lighten(fills[parent.index()], 0.2)
            } else {
                palette_color(id.index())
            };
            if depth == 1 {
                top_level += 1;
            }
        }
        fills
    }
}

impl Chart for SunburstChart {
    fn marks(&self, viewport: Rect) -> Vec<Mark> {
        let cfg = &self.config;
        let tree = &self.tree;
        let segments = self.segments();
        let fills = self.fills();
        let center = viewport.center();
        let outer = (0.5 * viewport.width().min(viewport.height()) - cfg.padding).max(0.0);
        let hole = outer * cfg.hole.clamp(0.0, 1.0);
        let depth = tree.max_depth();
        let ring = if depth > 0 {
            (outer - hole) / f64::from(depth)
        } else {
            0.0
        };
        if tree.len() > 1 && segments.iter().skip(1).all(|s| s.width == 0.0) {
            log::warn!(nodes = tree.len(), "all nodes are zero; rings collapse");
        }

        let mut out = Vec::new();
        for id in tree.depth_first().skip(1) {
            let Some(item) = tree.get(id) else { continue };
            let segment = segments[id.index()];
            let d = f64::from(tree.depth(id));
            let r0 = hole + ring * (d - 1.0);
            let r1 = r0 + ring;
            out.push(
                SectorMarkSpec::new(
                    MarkId::for_lane(cfg.id_base, 0, id.index()),
                    center,
                    r0,
                    r1,
                    segment,
                )
                .with_fill(fills[id.index()])
                .with_optional_stroke(cfg.segment_stroke.clone())
                .mark(),
            );
            if cfg.show_labels && segment.width >= cfg.min_label_angle {
                let pos = Polar::new(0.5 * (r0 + r1), segment.mid()).to_point(center);
                out.push(
                    TextMarkSpec::new(
                        MarkId::for_lane(cfg.id_base, 1, id.index()),
                        pos,
                        item.name(),
                    )
                        .with_font_size(cfg.label_font_size)
                        .with_fill(cfg.label_fill.clone())
                        .with_anchor(TextAnchor::Middle)
                        .with_baseline(TextBaseline::Middle)
                        .mark(),
                );
            }
        }

        log::debug!(marks = out.len(), "sunburst marks");
        out
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    const EPS: f64 = 1e-9;

    fn sample() -> (SunburstChart, [NodeId; 4]) {
        let mut chart = SunburstChart::with_root("all");
        let root = chart.tree().root();
        let a = chart.add_child(root, Item::named("a")).unwrap();
        let b = chart.add_child(root, Item::new("b", 2.0).unwrap()).unwrap();
        let a1 = chart.add_child(a, Item::new("a1", 1.0).unwrap()).unwrap();
        let a2 = chart.add_child(a, Item::new("a2", 3.0).unwrap()).unwrap();
        (chart, [a, b, a1, a2])
    }

    #[test]
    fn auto_sum_sizes_parents_by_subtree() {
        let (chart, [a, b, a1, a2]) = sample();
        let s = chart.segments();
        assert!((s[a.index()].width - 240.0).abs() < EPS);
        assert!((s[b.index()].width - 120.0).abs() < EPS);
        assert!((s[a1.index()].width - 60.0).abs() < EPS);
        assert!((s[a2.index()].width - 180.0).abs() < EPS);
        assert!(s[a.index()].encloses(&s[a2.index()], EPS));
    }

    #[test]
    fn without_auto_sum_an_empty_parent_collapses() {
        let (mut chart, [a, b, a1, _]) = sample();
        chart.set_auto_sum(false);
        let s = chart.segments();
        // The root is 0 so its children split by their own values: a = 0, b = 2.
        assert_eq!(s[a.index()].width, 0.0);
        assert!((s[b.index()].width - 360.0).abs() < EPS);
        assert_eq!(s[a1.index()].width, 0.0);
        for seg in &s {
            assert!(seg.start.is_finite() && seg.width.is_finite());
        }
    }

    #[test]
    fn children_inherit_lightened_fills() {
        let (chart, [a, _, a1, _]) = sample();
        let fills = chart.fills();
        assert_eq!(fills[a.index()], palette_color(0));
        assert_eq!(fills[a1.index()], lighten(palette_color(0), 0.2));
    }

    #[test]
    fn one_wedge_per_non_root_node() {
        let (chart, _) = sample();
        let marks = chart.marks(Rect::new(0.0, 0.0, 300.0, 300.0));
        let wedges = marks.iter().filter(|m| m.as_path().is_some()).count();
        assert_eq!(wedges, 4);
    }

    #[test]
    fn unknown_parent_is_an_error() {
        let (mut chart, _) = sample();
        let err = chart
            .add_child(NodeId(99), Item::named("x"))
            .expect_err("unknown parent");
        assert_eq!(
            err,
            ChartError::Tree(orbitviz_layout::TreeError::UnknownNode(NodeId(99)))
        );
    }
}
