// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tolerant comparison of pixel geometry.

use crate::bbox::BoundingBox;

/// Default absolute tolerance for pixel comparisons.
pub const EQUALITY_TOLERANCE: f64 = 1e-2;

/// Returns `true` if `a` and `b` differ by less than `tolerance`.
pub fn coords_eq(a: f64, b: f64, tolerance: f64) -> bool {
    (a - b).abs() < tolerance
}

impl BoundingBox {
    /// Component-wise comparison of `x`, `y`, `width` and `height`.
    pub fn approx_eq(&self, other: &Self, tolerance: f64) -> bool {
        coords_eq(self.x, other.x, tolerance)
            && coords_eq(self.y, other.y, tolerance)
            && coords_eq(self.width, other.width, tolerance)
            && coords_eq(self.height, other.height, tolerance)
    }
}
