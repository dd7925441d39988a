// Copyright 2025 the OrbitViz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Radial tidy tree: root at the center, one circle of nodes per depth.

extern crate alloc;

use alloc::vec::Vec;

use kurbo::{Point, Rect};
use orbitviz_layout::{NodeId, Polar, Tree, normalize_degrees, radial_link, radial_tidy};
use peniko::Brush;
use peniko::color::palette::css;

use crate::chart::Chart;
use crate::error::ChartError;
use crate::events::{ItemEvent, RedrawReason, RedrawRequest, Subscribers, SubscriptionId};
use crate::item::Item;
use crate::log;
use crate::mark::{Mark, MarkId, PathMark, StrokeStyle, TextAnchor, TextBaseline};
use crate::text_mark::TextMarkSpec;
use crate::z_order;

/// Appearance and layout options for [`RadialTidyTree`].
#[derive(Clone, Debug)]
pub struct RadialTidyTreeConfig {
    /// Base for mark ids.
    pub id_base: u64,
    /// Angle of the first leaf's share, in degrees clockwise from 12 o'clock.
    pub start_angle: f64,
    /// Angular range shared by the leaves, in degrees.
    pub span: f64,
    /// Space between the viewport edge and the outermost nodes, for labels.
    pub padding: f64,
    /// Node dot radius.
    pub node_radius: f64,
    /// Fill for nodes without their own fill.
    pub node_fill: Brush,
    /// Link stroke.
    pub link_stroke: StrokeStyle,
    /// Draw leaf names.
    pub show_labels: bool,
    /// Label font size.
    pub label_font_size: f64,
    /// Label paint.
    pub label_fill: Brush,
}

impl Default for RadialTidyTreeConfig {
    fn default() -> Self {
        Self {
            id_base: 0x6000_0000,
            start_angle: 0.0,
            span: 360.0,
            padding: 60.0,
            node_radius: 3.0,
            node_fill: css::DARK_SLATE_GRAY.into(),
            link_stroke: StrokeStyle::solid(css::GRAY, 1.0),
            show_labels: true,
            label_font_size: 10.0,
            label_fill: css::BLACK.into(),
        }
    }
}

impl RadialTidyTreeConfig {
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

    /// Sets the leaf span.
    pub fn with_span(mut self, span: f64) -> Self {
        self.span = span;
        self
    }

    /// Sets the node dot radius.
    pub fn with_node_radius(mut self, node_radius: f64) -> Self {
        self.node_radius = node_radius;
        self
    }

    /// Enables or disables labels.
    pub fn with_labels(mut self, show: bool) -> Self {
        self.show_labels = show;
        self
    }
}

/// A radial tidy tree over a [`Tree`] of [`Item`]s.
#[derive(Debug)]
pub struct RadialTidyTree {
    tree: Tree<Item>,
    config: RadialTidyTreeConfig,
    item_events: Subscribers<ItemEvent>,
    redraw: Subscribers<RedrawRequest>,
}

impl RadialTidyTree {
    /// Creates a chart over `tree`.
    pub fn new(tree: Tree<Item>) -> Self {
        Self {
            tree,
            config: RadialTidyTreeConfig::default(),
            item_events: Subscribers::new(),
            redraw: Subscribers::new(),
        }
    }

    /// Replaces the configuration.
    pub fn with_config(mut self, config: RadialTidyTreeConfig) -> Self {
        self.config = config;
        self
    }

    /// Current configuration.
    pub fn config(&self) -> &RadialTidyTreeConfig {
        &self.config
    }

    /// Replaces the configuration and requests a redraw.
    pub fn set_config(&mut self, config: RadialTidyTreeConfig) {
        self.config = config;
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
            count: self.tree.len(),
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

    /// Polar position per node for an outer radius of `radius`, indexed by [`NodeId::index`].
    pub fn positions(&self, radius: f64) -> Vec<Polar> {
        let depth = self.tree.max_depth();
        let spacing = if depth > 0 {
            radius / f64::from(depth)
        } else {
            0.0
        };
        radial_tidy(&self.tree, self.config.span, spacing)
            .into_iter()
            .map(|p| Polar::new(p.radius, p.angle + self.config.start_angle))
            .collect()
    }
}

/// Rotation and anchor that make a leaf label read outward from the center.
///
/// Labels on the left half are flipped so they are never upside down.
fn outward_label(angle: f64) -> (f64, TextAnchor) {
    let a = normalize_degrees(angle);
    if a < 180.0 {
        (a - 90.0, TextAnchor::Start)
    } else {
        (a - 270.0, TextAnchor::End)
    }
}

impl Chart for RadialTidyTree {
    fn marks(&self, viewport: Rect) -> Vec<Mark> {
        let cfg = &self.config;
        let tree = &self.tree;
        let center = viewport.center();
        let radius = (0.5 * viewport.width().min(viewport.height()) - cfg.padding).max(0.0);
        let positions = self.positions(radius);
        let point = |id: NodeId| -> Point { positions[id.index()].to_point(center) };

        let mut out = Vec::new();
        for id in tree.ids().skip(1) {
            let Some(parent) = tree.parent(id) else { continue };
            let path = radial_link(center, positions[parent.index()], positions[id.index()]);
            out.push(Mark::path(
                MarkId::for_lane(cfg.id_base, 0, id.index()),
                z_order::CONNECTIONS,
                PathMark::new(path).with_stroke(cfg.link_stroke.clone()),
            ));
        }

        for id in tree.ids() {
            let Some(item) = tree.get(id) else { continue };
            let fill = item
                .fill()
                .map_or_else(|| cfg.node_fill.clone(), Brush::from);
            out.push(Mark::path(
                MarkId::for_lane(cfg.id_base, 1, id.index()),
                z_order::POINTS,
                PathMark::circle(point(id), cfg.node_radius).with_fill(fill),
            ));
        }

        if cfg.show_labels {
            for id in tree.leaves() {
                let Some(item) = tree.get(id) else { continue };
                let p = positions[id.index()];
                let (rotation, anchor) = outward_label(p.angle);
                let pos = Polar::new(p.radius + cfg.node_radius + 4.0, p.angle).to_point(center);
                out.push(
                    TextMarkSpec::new(
                        MarkId::for_lane(cfg.id_base, 2, id.index()),
                        pos,
                        item.name(),
                    )
                        .with_font_size(cfg.label_font_size)
                        .with_fill(cfg.label_fill.clone())
                        .with_anchor(anchor)
                        .with_baseline(TextBaseline::Middle)
                        .with_angle(rotation)
                        .mark(),
                );
            }
        }

        log::debug!(marks = out.len(), "radial tidy tree marks");
        out
    }
}
