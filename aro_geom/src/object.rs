// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Axis-referencing objects: shapes, annotations and images.
//!
//! Each object kind carries only the fields that are meaningful for it.
//! Coordinates are grouped per axis role (`x`, `y`) so the value and its
//! reference always travel together.

use alloc::string::{String, ToString};
use core::fmt;
use core::str::FromStr;

use peniko::Color;

use crate::reference::{ArrowRef, AxisLetter, AxisRef, RefError};

/// A single coordinate with its reference.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Coord {
    /// What `value` is measured against.
    pub reference: AxisRef,
    /// The coordinate value.
    pub value: f64,
}

impl Coord {
    /// Creates a coordinate.
    pub fn new(reference: AxisRef, value: f64) -> Self {
        Self { reference, value }
    }
}

/// Two coordinates along one axis role sharing a reference.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CoordPair {
    /// What both values are measured against.
    pub reference: AxisRef,
    /// First value (`x0` / `y0`).
    pub value0: f64,
    /// Second value (`x1` / `y1`).
    pub value1: f64,
}

impl CoordPair {
    /// Creates a coordinate pair.
    pub fn new(reference: AxisRef, value0: f64, value1: f64) -> Self {
        Self {
            reference,
            value0,
            value1,
        }
    }
}

/// One coordinate of an annotation arrow tail.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ArrowCoord {
    /// Either a pixel offset or a reference.
    pub reference: ArrowRef,
    /// The tail value (pixels for [`ArrowRef::Pixel`]).
    pub value: f64,
}

impl ArrowCoord {
    /// A tail offset in pixels from the head.
    pub fn pixel(value: f64) -> Self {
        Self {
            reference: ArrowRef::Pixel,
            value,
        }
    }

    /// A tail position in the given reference.
    pub fn at(reference: AxisRef, value: f64) -> Self {
        Self {
            reference: ArrowRef::Axis(reference),
            value,
        }
    }
}

/// Shape geometry kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    /// A straight segment from `(x0, y0)` to `(x1, y1)`.
    Line,
    /// An axis-aligned rectangle spanning both points.
    Rect,
}

impl ShapeKind {
    /// Both shape kinds, in fixture order.
    pub const ALL: [Self; 2] = [Self::Line, Self::Rect];

    /// Returns the lowercase name of the kind.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Line => "line",
            Self::Rect => "rect",
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Horizontal anchor of an image: which edge the declared `x` is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum XAnchor {
    /// `x` is the left edge.
    Left,
    /// `x` is the horizontal centre.
    Center,
    /// `x` is the right edge.
    Right,
}

impl XAnchor {
    /// All anchors, in fixture order.
    pub const ALL: [Self; 3] = [Self::Left, Self::Center, Self::Right];

    /// Returns the lowercase name of the anchor.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Center => "center",
            Self::Right => "right",
        }
    }

    /// Offsets (in units of size) of the low and high edges from the anchor.
    pub fn edge_offsets(self) -> (f64, f64) {
        match self {
            Self::Left => (0.0, 1.0),
            Self::Center => (-0.5, 0.5),
            Self::Right => (-1.0, 0.0),
        }
    }
}

impl FromStr for XAnchor {
    type Err = RefError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "left" => Ok(Self::Left),
            "center" => Ok(Self::Center),
            "right" => Ok(Self::Right),
            _ => Err(RefError::UnsupportedAnchor {
                letter: AxisLetter::X,
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for XAnchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Vertical anchor of an image: which edge the declared `y` is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum YAnchor {
    /// `y` is the top edge.
    Top,
    /// `y` is the vertical middle.
    Middle,
    /// `y` is the bottom edge.
    Bottom,
}

impl YAnchor {
    /// All anchors, in fixture order.
    pub const ALL: [Self; 3] = [Self::Top, Self::Middle, Self::Bottom];

    /// Returns the lowercase name of the anchor.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Middle => "middle",
            Self::Bottom => "bottom",
        }
    }

    /// Offsets (in units of size) of the low and high data edges from the anchor.
    pub fn edge_offsets(self) -> (f64, f64) {
        match self {
            Self::Bottom => (0.0, 1.0),
            Self::Middle => (-0.5, 0.5),
            Self::Top => (-1.0, 0.0),
        }
    }
}

impl FromStr for YAnchor {
    type Err = RefError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "top" => Ok(Self::Top),
            "middle" => Ok(Self::Middle),
            "bottom" => Ok(Self::Bottom),
            _ => Err(RefError::UnsupportedAnchor {
                letter: AxisLetter::Y,
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for YAnchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A line or rectangle shape.
#[derive(Clone, Debug, PartialEq)]
pub struct ShapeSpec {
    /// Line or rect.
    pub kind: ShapeKind,
    /// `x0`, `x1` and `xref`.
    pub x: CoordPair,
    /// `y0`, `y1` and `yref`. `y0` is the lower edge in data space.
    pub y: CoordPair,
    /// Stroke colour, used to find the rendered path.
    pub color: Color,
}

/// A text annotation with an arrow pointing at `(x, y)`.
#[derive(Clone, Debug, PartialEq)]
pub struct AnnotationSpec {
    /// Arrow head position along x.
    pub x: Coord,
    /// Arrow head position along y.
    pub y: Coord,
    /// Arrow tail along x.
    pub arrow_x: ArrowCoord,
    /// Arrow tail along y.
    pub arrow_y: ArrowCoord,
    /// Annotation text, drawn centred on the tail.
    pub text: String,
    /// Arrow colour, used to find the rendered path.
    pub color: Color,
}

impl AnnotationSpec {
    /// Creates an annotation with the default single-glyph text.
    pub fn new(x: Coord, y: Coord, arrow_x: ArrowCoord, arrow_y: ArrowCoord, color: Color) -> Self {
        Self {
            x,
            y,
            arrow_x,
            arrow_y,
            text: "A".to_string(),
            color,
        }
    }
}

/// An image stretched over an anchored rectangle.
#[derive(Clone, Debug, PartialEq)]
pub struct ImageSpec {
    /// Anchor position along x.
    pub x: Coord,
    /// Anchor position along y.
    pub y: Coord,
    /// Width in the units of `x.reference`.
    pub size_x: f64,
    /// Height in the units of `y.reference`.
    pub size_y: f64,
    /// Which edge `x` denotes.
    pub x_anchor: XAnchor,
    /// Which edge `y` denotes.
    pub y_anchor: YAnchor,
    /// Image source URL.
    pub source: String,
}

/// The object kinds the harness places.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AroKind {
    /// [`ShapeSpec`].
    Shape,
    /// [`AnnotationSpec`].
    Annotation,
    /// [`ImageSpec`].
    Image,
}

impl AroKind {
    /// All kinds, in fixture order.
    pub const ALL: [Self; 3] = [Self::Shape, Self::Annotation, Self::Image];

    /// Returns the lowercase name of the kind.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Shape => "shape",
            Self::Annotation => "annotation",
            Self::Image => "image",
        }
    }
}

impl fmt::Display for AroKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AroKind {
    type Err = RefError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "shape" => Ok(Self::Shape),
            "annotation" => Ok(Self::Annotation),
            "image" => Ok(Self::Image),
            _ => Err(RefError::UnsupportedObjectKind(s.to_string())),
        }
    }
}

/// An axis-referencing object.
#[derive(Clone, Debug, PartialEq)]
pub enum Aro {
    /// A line or rect shape.
    Shape(ShapeSpec),
    /// An annotation with an arrow.
    Annotation(AnnotationSpec),
    /// An image.
    Image(ImageSpec),
}

impl Aro {
    /// Returns the object kind.
    pub fn kind(&self) -> AroKind {
        match self {
            Self::Shape(_) => AroKind::Shape,
            Self::Annotation(_) => AroKind::Annotation,
            Self::Image(_) => AroKind::Image,
        }
    }
}

impl From<ShapeSpec> for Aro {
    fn from(value: ShapeSpec) -> Self {
        Self::Shape(value)
    }
}

impl From<AnnotationSpec> for Aro {
    fn from(value: AnnotationSpec) -> Self {
        Self::Annotation(value)
    }
}

impl From<ImageSpec> for Aro {
    fn from(value: ImageSpec) -> Self {
        Self::Image(value)
    }
}
