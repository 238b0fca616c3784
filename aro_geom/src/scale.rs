// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Continuous scales from data units to pixels.

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

use crate::axis::AxisType;

/// A continuous scale for one axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AxisScale {
    /// Linear scale.
    Linear(ScaleLinear),
    /// Base-10 log scale.
    Log(ScaleLog),
}

impl AxisScale {
    /// Instantiates the scale matching `axis_type`.
    pub fn new(axis_type: AxisType, domain: (f64, f64), range: (f64, f64)) -> Self {
        match axis_type {
            AxisType::Linear => Self::Linear(ScaleLinear::new(domain, range)),
            AxisType::Log => Self::Log(ScaleLog::new(domain, range)),
        }
    }

    /// Maps a value from data space into pixel space.
    pub fn map(&self, x: f64) -> f64 {
        match self {
            Self::Linear(s) => s.map(x),
            Self::Log(s) => s.map(x),
        }
    }
}

/// A linear mapping from a continuous domain to a continuous range.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleLinear {
    domain: (f64, f64),
    range: (f64, f64),
}

impl ScaleLinear {
    /// Creates a new scale mapping `domain` values to `range` values.
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    /// Maps a value from domain space into range space.
    pub fn map(&self, x: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let denom = d1 - d0;
        if denom == 0.0 {
            return r0;
        }
        let t = (x - d0) / denom;
        r0 + t * (r1 - r0)
    }
}

/// A base-10 log mapping from a positive domain to a range.
///
/// Non-positive inputs map to `NaN`; callers validate before mapping.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleLog {
    inner: ScaleLinear,
}

impl ScaleLog {
    /// Creates a new log scale.
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self {
            inner: ScaleLinear::new((log10(domain.0), log10(domain.1)), range),
        }
    }

    /// Maps a value from domain space into range space.
    pub fn map(&self, x: f64) -> f64 {
        self.inner.map(log10(x))
    }
}

fn log10(x: f64) -> f64 {
    if x > 0.0 { x.log10() } else { f64::NAN }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_scale_interpolates_and_extrapolates() {
        let s = ScaleLinear::new((0.0, 10.0), (400.0, 100.0));
        assert!((s.map(0.0) - 400.0).abs() < 1e-9, "min maps to r0");
        assert!((s.map(10.0) - 100.0).abs() < 1e-9, "max maps to r1");
        assert!((s.map(2.0) - 340.0).abs() < 1e-9, "interior value");
        assert!((s.map(12.0) - 40.0).abs() < 1e-9, "beyond the domain");
    }

    #[test]
    fn degenerate_domain_maps_to_range_start() {
        let s = ScaleLinear::new((3.0, 3.0), (7.0, 9.0));
        assert_eq!(s.map(100.0), 7.0, "zero-width domain");
    }

    #[test]
    fn log_scale_maps_decades_evenly() {
        let s = ScaleLog::new((1.0, 100.0), (0.0, 10.0));
        assert!((s.map(1.0) - 0.0).abs() < 1e-9, "first decade");
        assert!((s.map(10.0) - 5.0).abs() < 1e-9, "middle decade");
        assert!((s.map(100.0) - 10.0).abs() < 1e-9, "last decade");
        assert!(s.map(0.0).is_nan(), "zero has no logarithm");
    }
}
