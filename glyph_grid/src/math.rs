// Copyright 2025 the Vello Authors and the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Mathematical helper functions.

#[cfg(feature = "libm")]
#[allow(unused_imports, reason = "only needed when `std` is disabled")]
use core_maths::CoreFloat;

/// Relative tolerance used when comparing quantities that scale with the
/// square of outline coordinates.
pub(crate) const RELATIVE_TOLERANCE: f32 = 1.0e-5;

/// A number of useful methods for f32 numbers.
pub(crate) trait FloatExt: Sized {
    /// Whether the number is approximately 0, with a given tolerance.
    fn is_nearly_zero_within_tolerance(self, tolerance: f32) -> bool;
}

impl FloatExt for f32 {
    #[inline(always)]
    fn is_nearly_zero_within_tolerance(self, tolerance: f32) -> bool {
        debug_assert!(tolerance >= 0.0, "tolerance must be positive");

        self.abs() <= tolerance
    }
}

/// Square root that works with either `std` or `libm`.
#[inline]
pub(crate) fn sqrt(x: f32) -> f32 {
    x.sqrt()
}
