// Copyright 2025 the OrbitViz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Geometry core for radial and flow charts.
//!
//! This crate holds the layout math shared by the `orbitviz_charts` chart models:
//! - **Subdivision** splits a span (degrees or pixels) into value-proportional segments.
//! - **Propagation** nests child segments inside their parent's range over an arena tree.
//! - **Paths** build ribbons, links and sectors as `kurbo::BezPath`s.
//! - **Stats** computes box plot summaries.
//!
//! Every function here is pure: the same inputs always produce the same geometry, and nothing
//! is cached between calls. Degenerate inputs (zero totals, zero-width segments) produce
//! zero-sized output instead of NaN.

#![no_std]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

#[cfg(not(feature = "std"))]
mod float;
mod path;
mod polar;
mod propagate;
mod stats;
mod subdivide;
mod tree;

pub use path::{ArcSide, Ribbon, arc_link, band_link, radial_link, sector};
pub use polar::{Polar, angular_mid, kurbo_angle, normalize_degrees, rotate_point, to_radians};
pub use propagate::{propagate, radial_tidy};
pub use stats::{BoxStats, percentile};
pub use subdivide::{FlowCursor, Segment, Subdivision};
pub use tree::{DepthFirst, NodeId, Tree, TreeError};
