// Copyright 2025 the OrbitViz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Z-order conventions for chart-generated marks.
//!
//! Every chart assigns these layers consistently, so flows sit under the segments they connect
//! and labels sit above everything. Renderers sort by `(z_index, MarkId)` for a deterministic
//! tie-break.

/// Plot background fills.
pub const BACKGROUND: i32 = -100;
/// Gridlines drawn behind data marks.
pub const GRID_LINES: i32 = -50;

/// Flow ribbons, arcs and tree links.
pub const CONNECTIONS: i32 = 0;
/// Filled data marks (ring segments, nodes, bars, boxes, bubbles).
pub const SEGMENTS: i32 = 10;
/// Medians, whiskers and other strokes drawn on top of filled marks.
pub const OUTLINES: i32 = 20;
/// Outlier points and tree nodes.
pub const POINTS: i32 = 30;

/// Item, category and tick labels.
pub const LABELS: i32 = 40;
/// Chart-level titles and annotations.
pub const TITLES: i32 = 80;
