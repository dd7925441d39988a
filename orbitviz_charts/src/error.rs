// Copyright 2025 the OrbitViz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chart construction and mutation errors.

extern crate alloc;

use alloc::string::String;

use orbitviz_layout::TreeError;

/// Errors returned when building or mutating a chart.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ChartError {
    /// A chart that needs items was given none.
    #[error("at least one item is required")]
    EmptyItems,
    /// A chart that needs series was given none (or an empty one).
    #[error("at least one non-empty series is required")]
    EmptySeries,
    /// Two series that must share categories do not.
    #[error("series categories do not match")]
    CategoryMismatch,
    /// A value was negative.
    #[error("value {value} of `{name}` is negative")]
    NegativeValue {
        /// Item (or category) name.
        name: String,
        /// The rejected value.
        value: f64,
    },
    /// A value was NaN or infinite.
    #[error("value of `{name}` is not finite")]
    NonFiniteValue {
        /// Item (or category) name.
        name: String,
    },
    /// A flow or lookup referenced a name that is not in the chart.
    #[error("unknown item `{0}`")]
    UnknownItem(String),
    /// A name appeared twice where names must be unique.
    #[error("duplicate item `{0}`")]
    DuplicateItem(String),
    /// A sankey flow does not go to a later level.
    #[error("flow from `{from}` to `{to}` must go to a later level")]
    FlowAgainstLevels {
        /// Source item name.
        from: String,
        /// Target item name.
        to: String,
    },
    /// A tree mutation failed.
    #[error(transparent)]
    Tree(#[from] TreeError),
}

/// Rejects negative and non-finite values.
pub(crate) fn check_value(name: &str, value: f64) -> Result<f64, ChartError> {
    if !value.is_finite() {
        return Err(ChartError::NonFiniteValue { name: name.into() });
    }
    if value < 0.0 {
        return Err(ChartError::NegativeValue {
            name: name.into(),
            value,
        });
    }
    Ok(value)
}
