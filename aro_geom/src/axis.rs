// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Plot geometry: canvas size, margins and per-axis range/domain.

use alloc::collections::BTreeMap;
use alloc::string::ToString;
use core::fmt;
use core::str::FromStr;

use kurbo::Rect;

use crate::reference::{AxisId, AxisLetter, RefError};
use crate::scale::AxisScale;

/// How an axis maps its data range onto pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum AxisType {
    /// Linear interpolation.
    #[default]
    Linear,
    /// Base-10 logarithmic interpolation.
    Log,
}

impl AxisType {
    /// Both axis types, in fixture order.
    pub const ALL: [Self; 2] = [Self::Linear, Self::Log];

    /// Returns the lowercase name of the type.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::Log => "log",
        }
    }
}

impl fmt::Display for AxisType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AxisType {
    type Err = RefError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "linear" => Ok(Self::Linear),
            "log" => Ok(Self::Log),
            _ => Err(RefError::UnsupportedAxisType(s.to_string())),
        }
    }
}

/// Range, domain and type of one data axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AxisGeometry {
    /// Data-unit bounds, `(start, end)`.
    ///
    /// Log axes require both bounds to be positive.
    pub range: (f64, f64),
    /// Fraction-of-paper interval the axis is plotted over.
    pub domain: (f64, f64),
    /// Axis type.
    pub axis_type: AxisType,
}

impl AxisGeometry {
    /// Creates a linear axis.
    pub fn new(range: (f64, f64), domain: (f64, f64)) -> Self {
        Self {
            range,
            domain,
            axis_type: AxisType::Linear,
        }
    }

    /// Returns a copy with the given axis type.
    #[must_use]
    pub fn with_type(mut self, axis_type: AxisType) -> Self {
        self.axis_type = axis_type;
        self
    }
}

/// Space between the canvas edges and the paper.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Margins {
    /// Left margin in pixels.
    pub left: f64,
    /// Right margin in pixels.
    pub right: f64,
    /// Top margin in pixels.
    pub top: f64,
    /// Bottom margin in pixels.
    pub bottom: f64,
}

impl Margins {
    /// The same margin on every side.
    pub fn uniform(m: f64) -> Self {
        Self {
            left: m,
            right: m,
            top: m,
            bottom: m,
        }
    }
}

/// Canvas size, margins and the axes laid out on the paper.
///
/// The paper is the canvas inset by the margins. Axis domains are fractions of
/// the paper; paper fraction 0 is the left (x) or bottom (y) edge.
#[derive(Clone, Debug, PartialEq)]
pub struct PlotGeometry {
    /// Canvas width in pixels.
    pub width: f64,
    /// Canvas height in pixels.
    pub height: f64,
    /// Margins around the paper.
    pub margins: Margins,
    axes: BTreeMap<AxisId, AxisGeometry>,
}

impl PlotGeometry {
    /// Creates a canvas with no margins and no axes.
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            margins: Margins::default(),
            axes: BTreeMap::new(),
        }
    }

    /// Sets the margins.
    #[must_use]
    pub fn with_margins(mut self, margins: Margins) -> Self {
        self.margins = margins;
        self
    }

    /// Adds or replaces an axis.
    #[must_use]
    pub fn with_axis(mut self, id: AxisId, axis: AxisGeometry) -> Self {
        self.axes.insert(id, axis);
        self
    }

    /// Returns a copy with the type of axis `id` changed.
    ///
    /// Unknown axes are left alone; mapping against them fails later with a
    /// descriptive error.
    #[must_use]
    pub fn with_axis_type(mut self, id: AxisId, axis_type: AxisType) -> Self {
        if let Some(axis) = self.axes.get_mut(&id) {
            axis.axis_type = axis_type;
        }
        self
    }

    /// Looks up an axis.
    pub fn axis(&self, id: AxisId) -> Option<&AxisGeometry> {
        self.axes.get(&id)
    }

    /// The canvas rectangle.
    pub fn canvas(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height)
    }

    /// The paper rectangle (canvas minus margins).
    pub fn paper(&self) -> Rect {
        let m = self.margins;
        let x1 = (self.width - m.right).max(m.left);
        let y1 = (self.height - m.bottom).max(m.top);
        Rect::new(m.left, m.top, x1, y1)
    }

    /// Pixel coordinates of paper fractions 0 and 1 along `letter`.
    pub fn paper_span(&self, letter: AxisLetter) -> (f64, f64) {
        self.fraction_span(letter, (0.0, 1.0))
    }

    /// Pixel coordinates of domain fractions 0 and 1 for axis `id`.
    pub fn axis_span(&self, id: AxisId) -> Option<(f64, f64)> {
        self.axis(id)
            .map(|axis| self.fraction_span(id.letter(), axis.domain))
    }

    /// The data-to-pixel scale for axis `id`.
    pub fn scale(&self, id: AxisId) -> Option<AxisScale> {
        let axis = self.axis(id)?;
        let span = self.fraction_span(id.letter(), axis.domain);
        Some(AxisScale::new(axis.axis_type, axis.range, span))
    }

    fn fraction_span(&self, letter: AxisLetter, (f0, f1): (f64, f64)) -> (f64, f64) {
        let paper = self.paper();
        match letter {
            AxisLetter::X => (
                paper.x0 + f0 * paper.width(),
                paper.x0 + f1 * paper.width(),
            ),
            AxisLetter::Y => (
                paper.y1 - f0 * paper.height(),
                paper.y1 - f1 * paper.height(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_by_two() -> PlotGeometry {
        let x2 = AxisId::new(AxisLetter::X, 2).unwrap();
        PlotGeometry::new(600.0, 500.0)
            .with_margins(Margins {
                left: 80.0,
                right: 20.0,
                top: 100.0,
                bottom: 0.0,
            })
            .with_axis(AxisId::X, AxisGeometry::new((0.0, 10.0), (0.0, 0.5)))
            .with_axis(x2, AxisGeometry::new((0.0, 10.0), (0.5, 1.0)))
            .with_axis(AxisId::Y, AxisGeometry::new((0.0, 10.0), (0.0, 1.0)))
    }

    #[test]
    fn paper_is_canvas_inset_by_margins() {
        let g = two_by_two();
        assert_eq!(g.paper(), Rect::new(80.0, 100.0, 580.0, 500.0));
        assert_eq!(g.canvas(), Rect::new(0.0, 0.0, 600.0, 500.0));
    }

    #[test]
    fn axis_spans_follow_domains() {
        let g = two_by_two();
        let x2 = AxisId::new(AxisLetter::X, 2).unwrap();
        assert_eq!(g.axis_span(AxisId::X), Some((80.0, 330.0)));
        assert_eq!(g.axis_span(x2), Some((330.0, 580.0)));
        // y grows downward: domain 0 is the bottom of the paper.
        assert_eq!(g.axis_span(AxisId::Y), Some((500.0, 100.0)));
        assert_eq!(g.axis_span(AxisId::new(AxisLetter::Y, 2).unwrap()), None);
    }

    #[test]
    fn toggling_type_leaves_the_original_untouched() {
        let g = two_by_two();
        let log = g.clone().with_axis_type(AxisId::Y, AxisType::Log);
        assert_eq!(g.axis(AxisId::Y).unwrap().axis_type, AxisType::Linear);
        assert_eq!(log.axis(AxisId::Y).unwrap().axis_type, AxisType::Log);
    }

    #[test]
    fn axis_type_parses() {
        assert_eq!("log".parse::<AxisType>(), Ok(AxisType::Log));
        assert!(matches!(
            "category".parse::<AxisType>(),
            Err(RefError::UnsupportedAxisType(_))
        ));
    }
}
