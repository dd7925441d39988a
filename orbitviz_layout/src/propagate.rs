// Copyright 2025 the OrbitViz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Angle assignment over a [`Tree`].

extern crate alloc;

use alloc::vec;
use alloc::vec::Vec;

use crate::polar::Polar;
use crate::subdivide::Segment;
use crate::tree::{NodeId, Tree};

/// Nests every node's segment inside its parent's segment, proportional to value.
///
/// The root receives `root_segment`. Each parent's children are laid end to end from the
/// parent's start, each taking `parent.width * child / max(parent, sum of children)`. Using the
/// larger of the two keeps over-full children inside the parent range and lets a synthetic
/// root (value 0) span its children. A zero denominator collapses the children to zero width.
///
/// The result is indexed by [`NodeId::index`].
pub fn propagate<T>(
    tree: &Tree<T>,
    root_segment: Segment,
    value_of: impl Fn(&T) -> f64,
) -> Vec<Segment> {
    let values: Vec<f64> = tree
        .ids()
        .map(|id| tree.get(id).map_or(0.0, &value_of))
        .map(|v| if v.is_finite() { v.max(0.0) } else { 0.0 })
        .collect();

    let mut out = vec![Segment::default(); tree.len()];
    out[NodeId::ROOT.index()] = root_segment;

    for parent in tree.depth_first() {
        let children = tree.children(parent);
        if children.is_empty() {
            continue;
        }
        let parent_segment = out[parent.index()];
        let child_sum: f64 = children.iter().map(|c| values[c.index()]).sum();
        let denom = values[parent.index()].max(child_sum);
        let mut acc = parent_segment.start;
        for child in children {
            let width = if denom > 0.0 {
                parent_segment.width * (values[child.index()] / denom)
            } else {
                0.0
            };
            out[child.index()] = Segment::new(acc, width);
            acc += width;
        }
    }
    out
}

/// Radial tidy-tree placement.
///
/// Leaves share `span` degrees equally in depth-first order and sit at the middle of their
/// share. An inner node sits halfway between its first and last child. The radius is
/// `depth * level_spacing`, so the root is at the center.
pub fn radial_tidy<T>(tree: &Tree<T>, span: f64, level_spacing: f64) -> Vec<Polar> {
    let leaf_count = tree.leaf_count(tree.root());
    let share = if leaf_count > 0 {
        span / leaf_count as f64
    } else {
        0.0
    };

    let mut angles = vec![0.0; tree.len()];
    let mut next_leaf = 0.0;
    for id in tree.leaves() {
        angles[id.index()] = (next_leaf + 0.5) * share;
        next_leaf += 1.0;
    }

    // Parents precede children in arena order, so a reverse sweep sees children first.
    for id in tree.ids().rev() {
        let children = tree.children(id);
        if let (Some(first), Some(last)) = (children.first(), children.last()) {
            angles[id.index()] = (angles[first.index()] + angles[last.index()]) * 0.5;
        }
    }

    tree.ids()
        .map(|id| {
            let radius = f64::from(tree.depth(id)) * level_spacing;
            Polar::new(radius, angles[id.index()])
        })
        .collect()
}
