// Copyright 2025 the OrbitViz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Float helpers for `no_std` builds.
//!
//! `f64::sin`, `f64::sqrt` and friends live in `std`, not `core`. This trait dispatches to
//! `libm` when `std` is off.

/// Float math helpers for `f64` in `no_std` mode.
pub(crate) trait FloatExt {
    fn sin(self) -> Self;
    fn cos(self) -> Self;
    fn atan2(self, other: Self) -> Self;
    fn sqrt(self) -> Self;
    fn floor(self) -> Self;
    fn rem_euclid(self, rhs: Self) -> Self;
}

#[cfg(all(not(feature = "std"), feature = "libm"))]
impl FloatExt for f64 {
    fn sin(self) -> Self {
        libm::sin(self)
    }

    fn cos(self) -> Self {
        libm::cos(self)
    }

    fn atan2(self, other: Self) -> Self {
        libm::atan2(self, other)
    }

    fn sqrt(self) -> Self {
        libm::sqrt(self)
    }

    fn floor(self) -> Self {
        libm::floor(self)
    }

    fn rem_euclid(self, rhs: Self) -> Self {
        let r = libm::fmod(self, rhs);
        if r < 0.0 { r + libm::fabs(rhs) } else { r }
    }
}

#[cfg(all(not(feature = "std"), not(feature = "libm")))]
compile_error!(
    "orbitviz_layout requires either the `std` or `libm` feature"
);
