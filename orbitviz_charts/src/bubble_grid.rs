// Copyright 2025 the OrbitViz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bubble grid: one circle per (column, row) pair, area following the value.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use hashbrown::HashSet;
use kurbo::{Point, Rect};
use peniko::Color;
use peniko::color::palette::css;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

use crate::axis::{GuideStyle, category_label, inset};
use crate::chart::Chart;
use crate::error::{ChartError, check_value};
use crate::events::{ItemEvent, RedrawReason, RedrawRequest, Subscribers, SubscriptionId};
use crate::log;
use crate::mark::{Mark, MarkId, PathMark, StrokeStyle, TextAnchor, TextBaseline};
use crate::palette::palette_color;
use crate::text_mark::TextMarkSpec;
use crate::z_order;

/// One grid cell value.
#[derive(Clone, Debug, PartialEq)]
pub struct BubbleGridEntry {
    /// Column category.
    pub x: String,
    /// Row category.
    pub y: String,
    value: f64,
    /// Explicit bubble fill; unset bubbles take the palette color of their row.
    pub fill: Option<Color>,
}

impl BubbleGridEntry {
    /// Creates an entry, rejecting negative and non-finite values.
    pub fn new(x: impl Into<String>, y: impl Into<String>, value: f64) -> Result<Self, ChartError> {
        let x = x.into();
        let y = y.into();
        let value = check_value(&x, value)?;
        Ok(Self {
            x,
            y,
            value,
            fill: None,
        })
    }

    /// Sets the fill.
    pub fn with_fill(mut self, fill: Color) -> Self {
        self.fill = Some(fill);
        self
    }

    /// The cell value.
    pub fn value(&self) -> f64 {
        self.value
    }
}

/// Appearance and layout options for [`BubbleGridChart`].
#[derive(Clone, Debug)]
pub struct BubbleGridConfig {
    /// Base for mark ids.
    pub id_base: u64,
    /// Plot margins `(left, top, right, bottom)`; the left and bottom hold the labels.
    pub margins: (f64, f64, f64, f64),
    /// Largest bubble diameter as a fraction of the smaller cell side.
    pub fill_ratio: f64,
    /// Optional bubble outline.
    pub bubble_stroke: Option<StrokeStyle>,
    /// Cell border lines; `None` disables them.
    pub grid: Option<StrokeStyle>,
    /// Label styling.
    pub guides: GuideStyle,
}

impl Default for BubbleGridConfig {
    fn default() -> Self {
        Self {
            id_base: 0x8000_0000,
            margins: (80.0, 16.0, 16.0, 32.0),
            fill_ratio: 0.9,
            bubble_stroke: None,
            grid: Some(StrokeStyle::solid(css::LIGHT_GRAY, 1.0)),
            guides: GuideStyle::default(),
        }
    }
}

impl BubbleGridConfig {
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

    /// Sets the bubble outline.
    pub fn with_bubble_stroke(mut self, stroke: Option<StrokeStyle>) -> Self {
        self.bubble_stroke = stroke;
        self
    }
}

/// A grid of bubbles indexed by two categorical axes.
#[derive(Debug)]
pub struct BubbleGridChart {
    entries: Vec<BubbleGridEntry>,
    config: BubbleGridConfig,
    item_events: Subscribers<ItemEvent>,
    redraw: Subscribers<RedrawRequest>,
}

/// Distinct values in first-appearance order.
fn categories<'a>(values: impl Iterator<Item = &'a str>) -> Vec<&'a str> {
    let mut out: Vec<&str> = Vec::new();
    for v in values {
        if !out.contains(&v) {
            out.push(v);
        }
    }
    out
}

/// Rejects an empty list and two entries sharing a cell.
fn check_entries(entries: &[BubbleGridEntry]) -> Result<(), ChartError> {
    if entries.is_empty() {
        return Err(ChartError::EmptyItems);
    }
    let mut cells: HashSet<(&str, &str)> = HashSet::with_capacity(entries.len());
    for e in entries {
        if !cells.insert((e.x.as_str(), e.y.as_str())) {
            log::warn!(x = %e.x, y = %e.y, "bubble grid cell given twice");
            return Err(ChartError::DuplicateItem(alloc::format!("{}/{}", e.x, e.y)));
        }
    }
    Ok(())
}

impl BubbleGridChart {
    /// Creates a chart, rejecting an empty entry list or a repeated cell.
    pub fn new(entries: impl Into<Vec<BubbleGridEntry>>) -> Result<Self, ChartError> {
        let entries = entries.into();
        check_entries(&entries)?;
        Ok(Self {
            entries,
            config: BubbleGridConfig::default(),
            item_events: Subscribers::new(),
            redraw: Subscribers::new(),
        })
    }

    /// Replaces the configuration.
    pub fn with_config(mut self, config: BubbleGridConfig) -> Self {
        self.config = config;
        self
    }

    /// Current configuration.
    pub fn config(&self) -> &BubbleGridConfig {
        &self.config
    }

    /// Replaces the configuration and requests a redraw.
    pub fn set_config(&mut self, config: BubbleGridConfig) {
        self.config = config;
        self.request_redraw(RedrawReason::Config);
    }

    /// Entries in insertion order.
    pub fn entries(&self) -> &[BubbleGridEntry] {
        &self.entries
    }

    /// Replaces every entry, rejecting an empty list or a repeated cell.
    pub fn set_entries(&mut self, entries: Vec<BubbleGridEntry>) -> Result<(), ChartError> {
        check_entries(&entries)?;
        self.entries = entries;
        self.item_events.emit(&ItemEvent::Replaced {
            count: self.entries.len(),
        });
        self.request_redraw(RedrawReason::Items);
        Ok(())
    }

    /// Appends an entry; returns `false` if its cell is already taken.
    pub fn add_entry(&mut self, entry: BubbleGridEntry) -> bool {
        if self
            .entries
            .iter()
            .any(|e| e.x == entry.x && e.y == entry.y)
        {
            return false;
        }
        let event = ItemEvent::Added(entry.x.clone());
        self.entries.push(entry);
        self.item_events.emit(&event);
        self.request_redraw(RedrawReason::Items);
        true
    }

    /// Column categories in first-appearance order.
    pub fn columns(&self) -> Vec<&str> {
        categories(self.entries.iter().map(|e| e.x.as_str()))
    }

    /// Row categories in first-appearance order.
    pub fn rows(&self) -> Vec<&str> {
        categories(self.entries.iter().map(|e| e.y.as_str()))
    }

    /// Registers a redraw listener.
    pub fn on_redraw(&mut self, listener: impl FnMut(&RedrawRequest) + 'static) -> SubscriptionId {
        self.redraw.subscribe(listener)
    }

    /// Registers an entry change listener.
    pub fn on_item_event(&mut self, listener: impl FnMut(&ItemEvent) + 'static) -> SubscriptionId {
        self.item_events.subscribe(listener)
    }

    fn request_redraw(&mut self, reason: RedrawReason) {
        self.redraw.emit(&RedrawRequest::new(reason));
    }
}

impl Chart for BubbleGridChart {
    fn marks(&self, viewport: Rect) -> Vec<Mark> {
        let cfg = &self.config;
        let columns = self.columns();
        let rows = self.rows();
        let plot = inset(viewport, cfg.margins);
        let cell_w = plot.width() / columns.len().max(1) as f64;
        let cell_h = plot.height() / rows.len().max(1) as f64;
        let max_radius = 0.5 * cfg.fill_ratio * cell_w.min(cell_h);
        let max = self.entries.iter().map(|e| e.value).fold(0.0, f64::max);
        if max == 0.0 {
            log::warn!(
                entries = self.entries.len(),
                "all entries are zero; bubbles collapse"
            );
        }

        let index_of = |list: &[&str], name: &str| list.iter().position(|c| *c == name);
        let mut out = Vec::new();

        if let Some(grid) = &cfg.grid {
            for i in 0..=columns.len() {
                let x = plot.x0 + cell_w * i as f64;
                out.push(Mark::path(
                    MarkId::for_lane(cfg.id_base, 0, i),
                    z_order::GRID_LINES,
                    PathMark::line(Point::new(x, plot.y0), Point::new(x, plot.y1))
                        .with_stroke(grid.clone()),
                ));
            }
            for j in 0..=rows.len() {
                let y = plot.y0 + cell_h * j as f64;
                out.push(Mark::path(
                    MarkId::for_lane(cfg.id_base, 1, j),
                    z_order::GRID_LINES,
                    PathMark::line(Point::new(plot.x0, y), Point::new(plot.x1, y))
                        .with_stroke(grid.clone()),
                ));
            }
        }

        for (k, e) in self.entries.iter().enumerate() {
            let (Some(i), Some(j)) = (index_of(&columns, &e.x), index_of(&rows, &e.y)) else {
                continue;
            };
            let radius = if max > 0.0 {
                (e.value / max).sqrt() * max_radius
            } else {
                0.0
            };
            let center = Point::new(
                plot.x0 + cell_w * (i as f64 + 0.5),
                plot.y0 + cell_h * (j as f64 + 0.5),
            );
            out.push(Mark::path(
                MarkId::for_lane(cfg.id_base, 2, k),
                z_order::POINTS,
                PathMark::circle(center, radius)
                    .with_fill(e.fill.unwrap_or_else(|| palette_color(j)))
                    .with_optional_stroke(cfg.bubble_stroke.as_ref()),
            ));
        }

        for (i, name) in columns.iter().enumerate() {
            let x = plot.x0 + cell_w * (i as f64 + 0.5);
            out.push(category_label(
                MarkId::for_lane(cfg.id_base, 3, i),
                x,
                plot,
                name,
                &cfg.guides,
            ));
        }
        for (j, name) in rows.iter().enumerate() {
            let y = plot.y0 + cell_h * (j as f64 + 0.5);
            out.push(
                TextMarkSpec::new(
                    MarkId::for_lane(cfg.id_base, 4, j),
                    Point::new(plot.x0 - cfg.guides.label_padding, y),
                    *name,
                )
                .with_font_size(cfg.guides.label_font_size)
                .with_fill(cfg.guides.label_fill.clone())
                .with_anchor(TextAnchor::End)
                .with_baseline(TextBaseline::Middle)
                .mark(),
            );
        }

        log::debug!(
            columns = columns.len(),
            rows = rows.len(),
            marks = out.len(),
            "bubble grid marks"
        );
        out
    }
}
