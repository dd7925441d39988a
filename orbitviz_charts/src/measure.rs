// Copyright 2025 the OrbitViz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Text measurement hooks for label layout.
//!
//! Charts do not shape text. Where a layout depends on label extents (the comparison bar
//! chart's center column, bar chart margins) it asks a measurer for rough bounds.

/// Reports the extent of a label before it is placed.
///
/// Hosts with a text shaper implement this over their font stack; otherwise use
/// [`HeuristicTextMeasurer`].
pub trait TextMeasurer {
    /// `(width, height)` of `text` at `font_size`, in mark coordinates.
    fn measure(&self, text: &str, font_size: f64) -> (f64, f64);
}

/// Estimates extents from the character count: 0.6em per character, 1em tall.
#[derive(Clone, Copy, Debug, Default)]
pub struct HeuristicTextMeasurer;

impl TextMeasurer for HeuristicTextMeasurer {
    fn measure(&self, text: &str, font_size: f64) -> (f64, f64) {
        let width = 0.6 * font_size * text.chars().count() as f64;
        (width, font_size)
    }
}

/// Width of the widest label, or `0` when there are none.
pub(crate) fn max_label_width<'a>(
    measurer: &dyn TextMeasurer,
    labels: impl IntoIterator<Item = &'a str>,
    font_size: f64,
) -> f64 {
    labels
        .into_iter()
        .map(|l| measurer.measure(l, font_size).0)
        .fold(0.0, f64::max)
}
