// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Built-in fixture values.

use aro_geom::{
    AxisGeometry, AxisId, AxisType, Margins, PlotGeometry, RefKind, ShapeKind, XAnchor, YAnchor,
};

use crate::case::ArrowMode;

/// Made-up coordinates for one reference kind along one axis letter.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RefPosition {
    /// Reference kind these values are expressed in.
    pub kind: RefKind,
    /// First and second coordinate (`x0`/`x1`, or anchor/arrow tail).
    pub values: (f64, f64),
    /// Image size along this letter.
    pub size: f64,
    /// Arrow tail offset in pixels, used when the arrow is pixel-referenced.
    pub pixel: f64,
}

impl RefPosition {
    /// Creates a position.
    pub fn new(kind: RefKind, values: (f64, f64), size: f64, pixel: f64) -> Self {
        Self {
            kind,
            values,
            size,
            pixel,
        }
    }
}

/// The value lists the generator takes the cross product of.
#[derive(Clone, Debug, PartialEq)]
pub struct Fixture {
    /// `(x axis, y axis)` pairs.
    pub axis_pairs: Vec<(AxisId, AxisId)>,
    /// Axis types tried for each letter.
    pub axis_types: Vec<AxisType>,
    /// One position per reference kind along x.
    pub x_positions: Vec<RefPosition>,
    /// One position per reference kind along y.
    pub y_positions: Vec<RefPosition>,
    /// Shape kinds.
    pub shape_kinds: Vec<ShapeKind>,
    /// Arrow tail modes `(x, y)` for annotations.
    pub arrow_modes: Vec<(ArrowMode, ArrowMode)>,
    /// Image x anchors.
    pub x_anchors: Vec<XAnchor>,
    /// Image y anchors.
    pub y_anchors: Vec<YAnchor>,
    /// Skip combinations that differ only in the axis (or axis type) of a
    /// paper-referenced coordinate, since paper placement ignores both.
    pub dedupe_paper: bool,
}

impl Default for Fixture {
    fn default() -> Self {
        Self {
            axis_pairs: vec![
                (AxisId::X, AxisId::Y),
                (AxisId::X2, AxisId::Y),
                (AxisId::X, AxisId::Y2),
                (AxisId::X2, AxisId::Y2),
            ],
            axis_types: AxisType::ALL.to_vec(),
            x_positions: vec![
                RefPosition::new(RefKind::Range, (2.0, 3.0), 1.5, 50.0),
                RefPosition::new(RefKind::Domain, (0.2, 0.75), 0.3, 60.0),
                RefPosition::new(RefKind::Paper, (0.25, 0.8), 0.35, 70.0),
            ],
            // The range size keeps top-anchored images above zero on log axes.
            y_positions: vec![
                RefPosition::new(RefKind::Range, (1.0, 2.0), 0.8, 30.0),
                RefPosition::new(RefKind::Domain, (0.25, 0.7), 0.2, 40.0),
                RefPosition::new(RefKind::Paper, (0.2, 0.85), 0.3, 80.0),
            ],
            shape_kinds: ShapeKind::ALL.to_vec(),
            arrow_modes: vec![
                (ArrowMode::Same, ArrowMode::Same),
                (ArrowMode::Pixel, ArrowMode::Same),
                (ArrowMode::Same, ArrowMode::Pixel),
                (ArrowMode::Pixel, ArrowMode::Pixel),
            ],
            x_anchors: XAnchor::ALL.to_vec(),
            y_anchors: YAnchor::ALL.to_vec(),
            dedupe_paper: true,
        }
    }
}

/// The base plot every case starts from.
///
/// Two axes per letter split the paper; ranges are positive so every axis can
/// be switched to log.
pub fn base_geometry() -> PlotGeometry {
    PlotGeometry::new(600.0, 500.0)
        .with_margins(Margins {
            left: 80.0,
            right: 20.0,
            top: 40.0,
            bottom: 60.0,
        })
        .with_axis(AxisId::X, AxisGeometry::new((0.5, 5.0), (0.0, 0.45)))
        .with_axis(AxisId::X2, AxisGeometry::new((0.5, 5.0), (0.55, 1.0)))
        .with_axis(AxisId::Y, AxisGeometry::new((0.5, 4.0), (0.0, 0.45)))
        .with_axis(AxisId::Y2, AxisGeometry::new((0.5, 4.0), (0.55, 1.0)))
}
