// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Annotation arrow scaling and reconciliation.
//!
//! The rendered arrow of an annotation stops where it meets the text box, and
//! the text box size is unknown to the harness. Two annotations are therefore
//! drawn from the same head, the second with its tail `k` times as far away.
//! The text box clips both arrows by the same vector, so the difference of the
//! two rendered far edges is `(k - 1)` times the true head-to-tail delta.

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

use kurbo::{Point, Vec2};

use crate::axis::{AxisType, PlotGeometry};
use crate::bbox::BoundingBox;
use crate::compare::coords_eq;
use crate::object::{ArrowCoord, Coord};
use crate::reference::{ArrowRef, AxisRef};

/// How an arrow tail value scales when the arrow is lengthened.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArrowScaling {
    /// The tail is a pixel offset: `k * a`.
    Pixel,
    /// The tail is a linear coordinate: `v + k * (a - v)`.
    Linear,
    /// The tail is a log-axis data value; scaling happens on exponents.
    Log,
}

impl ArrowScaling {
    /// Picks the scaling for an arrow tail relative to its anchor.
    ///
    /// Pixel tails, and tails whose reference kind differs from the anchor's,
    /// are pixel deltas. Only range references on log axes scale by exponent;
    /// domain and paper fractions are linear even on log axes.
    pub fn resolve(geometry: &PlotGeometry, anchor: Coord, arrow: ArrowCoord) -> Self {
        match arrow.reference {
            ArrowRef::Axis(r) if r.kind() == anchor.reference.kind() => match r {
                AxisRef::Range(id)
                    if geometry
                        .axis(id)
                        .is_some_and(|axis| axis.axis_type == AxisType::Log) =>
                {
                    Self::Log
                }
                _ => Self::Linear,
            },
            ArrowRef::Axis(_) | ArrowRef::Pixel => Self::Pixel,
        }
    }
}

/// Returns the tail value that makes the arrow `k` times as long in pixels.
///
/// For log axes the result is `10^(log10(anchor) + k * (log10(arrow) - log10(anchor)))`,
/// which multiplies the pixel length by `k` because the axis is linear in exponents.
pub fn scale_arrow_value(anchor: f64, arrow: f64, scaling: ArrowScaling, k: f64) -> f64 {
    match scaling {
        ArrowScaling::Pixel => k * arrow,
        ArrowScaling::Linear => anchor + k * (arrow - anchor),
        ArrowScaling::Log => {
            let (la, lv) = (arrow.log10(), anchor.log10());
            10_f64.powf(lv + k * (la - lv))
        }
    }
}

/// Expected arrow geometry, checked against two rendered arrows.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ArrowReconciliation {
    /// Expected arrow head, in pixels.
    pub head: Point,
    /// Expected head-to-tail delta of the shorter arrow, in pixels.
    pub delta: Vec2,
    /// Length ratio of the second arrow to the first.
    pub k: f64,
}

impl ArrowReconciliation {
    /// Solves the true head-to-tail delta from the two rendered arrow boxes.
    ///
    /// `short` is the box of the 1x arrow and `long` the box of the `k`x arrow.
    /// The far edge of each box is the one away from the head, chosen by the
    /// sign of the expected delta.
    pub fn solve(&self, short: BoundingBox, long: BoundingBox) -> Vec2 {
        let far = |b: BoundingBox| {
            Vec2::new(
                if self.delta.x >= 0.0 { b.x1() } else { b.x },
                if self.delta.y >= 0.0 { b.y1() } else { b.y },
            )
        };
        (far(long) - far(short)) / (self.k - 1.0)
    }

    /// The corner of `short` the arrow head should sit on.
    pub fn head_corner(&self, short: BoundingBox) -> Point {
        Point::new(
            if self.delta.x >= 0.0 { short.x } else { short.x1() },
            if self.delta.y >= 0.0 { short.y } else { short.y1() },
        )
    }

    /// Checks both the solved delta and the head position within `tolerance`.
    pub fn check(&self, short: BoundingBox, long: BoundingBox, tolerance: f64) -> bool {
        let solved = self.solve(short, long);
        let head = self.head_corner(short);
        coords_eq(solved.x, self.delta.x, tolerance)
            && coords_eq(solved.y, self.delta.y, tolerance)
            && coords_eq(head.x, self.head.x, tolerance)
            && coords_eq(head.y, self.head.y, tolerance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::axis::AxisGeometry;
    use crate::mapper::CoordinateMapper;
    use crate::reference::{AxisId, AxisLetter};

    const EPS: f64 = 1e-9;

    #[test]
    fn linear_and_pixel_scaling() {
        assert!((scale_arrow_value(2.0, 3.0, ArrowScaling::Linear, 2.0) - 4.0).abs() < EPS);
        assert!((scale_arrow_value(2.0, 50.0, ArrowScaling::Pixel, 2.0) - 100.0).abs() < EPS);
    }

    #[test]
    fn log_scaling_doubles_exponent_distance() {
        let got = scale_arrow_value(10.0, 100.0, ArrowScaling::Log, 2.0);
        assert!((got - 1000.0).abs() < 1e-6, "got {got}");
    }

    #[test]
    fn both_scalings_double_the_pixel_length() {
        for axis_type in AxisType::ALL {
            let g = PlotGeometry::new(800.0, 600.0).with_axis(
                AxisId::X,
                AxisGeometry::new((0.5, 50.0), (0.1, 0.9)).with_type(axis_type),
            );
            let m = CoordinateMapper::new(&g);
            let x = AxisRef::Range(AxisId::X);
            let anchor = Coord::new(x, 2.0);
            let arrow = ArrowCoord::at(x, 3.0);
            let scaling = ArrowScaling::resolve(&g, anchor, arrow);
            let far = scale_arrow_value(2.0, 3.0, scaling, 2.0);
            let px = |v| m.to_pixel_at(x, AxisLetter::X, v).unwrap();
            let one = px(3.0) - px(2.0);
            let two = px(far) - px(2.0);
            assert!((two - 2.0 * one).abs() < 1e-6, "{axis_type}: {one} vs {two}");
        }
    }

    #[test]
    fn resolve_treats_mismatched_kinds_as_pixels() {
        let g = PlotGeometry::new(100.0, 100.0).with_axis(
            AxisId::Y,
            AxisGeometry::new((1.0, 10.0), (0.0, 1.0)).with_type(AxisType::Log),
        );
        let anchor = Coord::new(AxisRef::Range(AxisId::Y), 2.0);
        assert_eq!(
            ArrowScaling::resolve(&g, anchor, ArrowCoord::at(AxisRef::Paper, 0.5)),
            ArrowScaling::Pixel
        );
        assert_eq!(
            ArrowScaling::resolve(&g, anchor, ArrowCoord::pixel(30.0)),
            ArrowScaling::Pixel
        );
        assert_eq!(
            ArrowScaling::resolve(&g, anchor, ArrowCoord::at(AxisRef::Range(AxisId::Y), 3.0)),
            ArrowScaling::Log
        );
        let domain = Coord::new(AxisRef::Domain(AxisId::Y), 0.2);
        assert_eq!(
            ArrowScaling::resolve(&g, domain, ArrowCoord::at(AxisRef::Domain(AxisId::Y), 0.7)),
            ArrowScaling::Linear
        );
    }

    #[test]
    fn reconciliation_ignores_the_text_box_clip() {
        // Head at (100, 300), tail 50px right and 30px up; the text box eats
        // (8, -6) off the tail end of both arrows.
        let rec = ArrowReconciliation {
            head: Point::new(100.0, 300.0),
            delta: Vec2::new(50.0, -30.0),
            k: 2.0,
        };
        let short = BoundingBox::new(100.0, 276.0, 42.0, 24.0);
        let long = BoundingBox::new(100.0, 246.0, 92.0, 54.0);
        let solved = rec.solve(short, long);
        assert!((solved - rec.delta).hypot() < EPS, "{solved:?}");
        assert!(rec.check(short, long, 1e-2), "reconciles");

        let off = BoundingBox::new(101.0, 276.0, 42.0, 24.0);
        assert!(!rec.check(off, long, 1e-2), "head moved");
    }
}
