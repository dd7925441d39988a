// Copyright 2025 the OrbitViz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Default item colors.

use peniko::Color;
use peniko::color::palette::css;

/// Categorical fills assigned to items that do not set their own.
///
/// Colors repeat when there are more items than entries.
pub const DEFAULT_PALETTE: [Color; 10] = [
    css::CORNFLOWER_BLUE,
    css::ORANGE,
    css::MEDIUM_SEA_GREEN,
    css::CRIMSON,
    css::GOLDENROD,
    css::SLATE_BLUE,
    css::DARK_CYAN,
    css::HOT_PINK,
    css::SIENNA,
    css::OLIVE_DRAB,
];

/// The palette entry for the `index`-th item.
pub fn palette_color(index: usize) -> Color {
    DEFAULT_PALETTE[index % DEFAULT_PALETTE.len()]
}

/// Mixes `color` toward white by `amount` in `[0, 1]`, keeping alpha.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "channels are mixed within 0..=255 and rounded"
)]
pub fn lighten(color: Color, amount: f64) -> Color {
    let t = if amount.is_finite() {
        amount.clamp(0.0, 1.0)
    } else {
        0.0
    };
    let rgba = color.to_rgba8();
    let mix = |c: u8| {
        let c = f64::from(c);
        (c + (255.0 - c) * t + 0.5) as u8
    };
    Color::from_rgba8(mix(rgba.r), mix(rgba.g), mix(rgba.b), rgba.a)
}
