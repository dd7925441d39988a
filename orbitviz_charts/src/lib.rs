// Copyright 2025 the OrbitViz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Flow, hierarchy and statistical charts for `orbitviz_layout`.
//!
//! Each chart owns its data and a configuration struct, and generates a list of [`Mark`]s
//! (filled/stroked paths and unshaped text) for a viewport rectangle:
//! - **Flow charts**: [`CircularPlot`], [`ArcChart`], [`SankeyPlot`].
//! - **Radial charts**: [`CoxcombChart`], [`SunburstChart`], [`RadialTidyTree`].
//! - **Grid and bar charts**: [`BoxPlot`], [`BubbleGridChart`], [`ComparisonBarChart`],
//!   [`BarChart`].
//!
//! Mutating a chart (items, tree nodes, or configuration) notifies subscribers through typed
//! [`Subscribers`] lists; the host is expected to call [`Chart::marks`] again on a
//! [`RedrawRequest`]. Mark generation is pure: nothing is cached between calls.
//!
//! With the `std` feature, [`svg::write_svg`] exports a chart to an SVG file.

#![no_std]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

mod arc_chart;
mod axis;
mod bar_chart;
mod box_plot;
mod bubble_grid;
mod chart;
#[cfg(test)]
mod chart_tests;
mod circular_plot;
mod comparison_bar;
mod coxcomb;
mod error;
mod events;
#[cfg(not(feature = "std"))]
mod float;
mod format;
mod item;
mod log;
mod mark;
mod measure;
mod palette;
mod radial_tidy_tree;
mod sankey;
mod scale;
mod sector_mark;
mod sunburst;
#[cfg(feature = "std")]
pub mod svg;
mod text_mark;
mod z_order;

pub use arc_chart::{ArcChart, ArcChartConfig};
pub use axis::GuideStyle;
pub use bar_chart::{BarChart, BarChartConfig};
pub use box_plot::{BoxPlot, BoxPlotConfig, Series};
pub use bubble_grid::{BubbleGridChart, BubbleGridConfig, BubbleGridEntry};
pub use chart::{Chart, ItemList, Named};
pub use circular_plot::{CircularPlot, CircularPlotConfig};
pub use comparison_bar::{CategorySeries, ComparisonBarChart, ComparisonBarConfig};
pub use coxcomb::{CoxcombChart, CoxcombConfig};
pub use error::ChartError;
pub use events::{ItemEvent, RedrawReason, RedrawRequest, Subscribers, SubscriptionId};
pub use format::format_value;
pub use item::{
    Connection, FlowItem, Item, SortOrder, connections, incoming_sums, outgoing_sums, sort_items,
};
pub use mark::{Mark, MarkId, MarkPayload, PathMark, StrokeStyle, TextAnchor, TextBaseline};
pub use measure::{HeuristicTextMeasurer, TextMeasurer};
pub use palette::{DEFAULT_PALETTE, lighten, palette_color};
pub use radial_tidy_tree::{RadialTidyTree, RadialTidyTreeConfig};
pub use sankey::{SankeyConfig, SankeyPlot};
pub use scale::{ScaleBand, ScaleLinear, ScaleLinearSpec};
pub use sector_mark::SectorMarkSpec;
pub use sunburst::{SunburstChart, SunburstConfig};
pub use text_mark::{TextMark, TextMarkSpec};
pub use z_order::*;

pub use orbitviz_layout::{NodeId, Tree, TreeError};
