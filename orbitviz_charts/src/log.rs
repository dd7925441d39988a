// Copyright 2025 the OrbitViz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Conditional logging macros.
//!
//! With the `tracing` feature these are the `tracing` macros. Without it they expand to
//! nothing, so arguments are not evaluated.

#[cfg(feature = "tracing")]
pub(crate) use tracing::{debug, warn};

#[cfg(not(feature = "tracing"))]
macro_rules! debug_noop {
    ($($arg:tt)*) => {};
}

#[cfg(not(feature = "tracing"))]
macro_rules! warn_noop {
    ($($arg:tt)*) => {};
}

#[cfg(not(feature = "tracing"))]
pub(crate) use {debug_noop as debug, warn_noop as warn};

#[cfg(test)]
mod tests {
    #[test]
    fn structured_fields_are_accepted() {
        let name = "a";
        let count = 3_usize;
        super::debug!(count, "plain field");
        super::warn!(name = %name, items = count, "display and named fields");
        assert_eq!(
            (name, count),
            ("a", 3),
            "macros leave their arguments alone"
        );
    }
}
