// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Immutable test-case records and the objects they place.

use core::fmt;

use aro_geom::{
    AnnotationSpec, ArrowCoord, ArrowScaling, Aro, AroKind, AxisId, AxisRef, AxisType, Coord,
    CoordPair, ImageSpec, PlotGeometry, RefKind, ShapeKind, ShapeSpec, XAnchor, YAnchor,
    scale_arrow_value,
};
use peniko::Color;

use crate::fixture::RefPosition;

/// Stroke colour of shapes, distinct so the rendered path can be found.
pub const ARO_COLOR: Color = Color::from_rgba8(50, 100, 150, 255);

/// Arrow colours of the short and long annotation of an annotation case.
pub const ANNOTATION_COLORS: [Color; 2] = [
    Color::from_rgba8(10, 20, 30, 255),
    Color::from_rgba8(10, 20, 31, 255),
];

/// Source used for every placed image.
pub const TEST_IMAGE: &str = "https://images.plot.ly/language-icons/api-home/js-logo.png";

/// Length ratio of the second annotation arrow to the first.
pub(crate) const ARROW_RATIO: f64 = 2.0;

/// How an annotation arrow tail is expressed along one letter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ArrowMode {
    /// In the same reference as the arrow head.
    Same,
    /// As a pixel offset from the head.
    Pixel,
}

impl fmt::Display for ArrowMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Same => "same",
            Self::Pixel => "pixel",
        })
    }
}

/// The object-kind-specific part of a case.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CaseVariant {
    /// One shape of the given kind.
    Shape(ShapeKind),
    /// Two annotations sharing a head, the second with a longer arrow.
    Annotation {
        /// Tail mode along x.
        x: ArrowMode,
        /// Tail mode along y.
        y: ArrowMode,
    },
    /// One image.
    Image {
        /// Horizontal anchor.
        x_anchor: XAnchor,
        /// Vertical anchor.
        y_anchor: YAnchor,
    },
}

impl CaseVariant {
    /// The object kind placed by this variant.
    pub fn kind(self) -> AroKind {
        match self {
            Self::Shape(_) => AroKind::Shape,
            Self::Annotation { .. } => AroKind::Annotation,
            Self::Image { .. } => AroKind::Image,
        }
    }
}

/// One generated combination.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TestCase {
    /// Position in the generated sequence.
    pub index: usize,
    /// Axis the x coordinates refer to (unless paper-referenced).
    pub x_axis: AxisId,
    /// Axis the y coordinates refer to (unless paper-referenced).
    pub y_axis: AxisId,
    /// Type of `x_axis` for this case.
    pub x_type: AxisType,
    /// Type of `y_axis` for this case.
    pub y_type: AxisType,
    /// X coordinates and their reference kind.
    pub x_position: RefPosition,
    /// Y coordinates and their reference kind.
    pub y_position: RefPosition,
    /// What gets placed.
    pub variant: CaseVariant,
}

impl TestCase {
    /// The object kind placed by this case.
    pub fn kind(&self) -> AroKind {
        self.variant.kind()
    }

    /// The x reference.
    pub fn x_ref(&self) -> AxisRef {
        AxisRef::from_kind(self.x_axis, self.x_position.kind)
    }

    /// The y reference.
    pub fn y_ref(&self) -> AxisRef {
        AxisRef::from_kind(self.y_axis, self.y_position.kind)
    }

    /// The base geometry with this case's axis types applied.
    ///
    /// Paper-referenced letters leave their axis untouched.
    pub fn geometry(&self, base: &PlotGeometry) -> PlotGeometry {
        let mut geometry = base.clone();
        if self.x_position.kind != RefKind::Paper {
            geometry = geometry.with_axis_type(self.x_axis, self.x_type);
        }
        if self.y_position.kind != RefKind::Paper {
            geometry = geometry.with_axis_type(self.y_axis, self.y_type);
        }
        geometry
    }

    /// The objects to place, given the geometry from [`TestCase::geometry`].
    pub fn objects(&self, geometry: &PlotGeometry) -> Vec<Aro> {
        match self.variant {
            CaseVariant::Shape(kind) => vec![self.shape(kind).into()],
            CaseVariant::Annotation { x, y } => self
                .annotations(geometry, x, y)
                .into_iter()
                .map(Aro::from)
                .collect(),
            CaseVariant::Image { x_anchor, y_anchor } => {
                vec![self.image(x_anchor, y_anchor).into()]
            }
        }
    }

    /// The shape placed by a shape case.
    pub fn shape(&self, kind: ShapeKind) -> ShapeSpec {
        let (x0, x1) = self.x_position.values;
        let (y0, y1) = self.y_position.values;
        ShapeSpec {
            kind,
            x: CoordPair::new(self.x_ref(), x0, x1),
            y: CoordPair::new(self.y_ref(), y0, y1),
            color: ARO_COLOR,
        }
    }

    /// The short and long annotation of an annotation case.
    ///
    /// Both share a head; the second tail is scaled so its arrow is twice as
    /// long in pixels.
    pub fn annotations(
        &self,
        geometry: &PlotGeometry,
        x_mode: ArrowMode,
        y_mode: ArrowMode,
    ) -> [AnnotationSpec; 2] {
        let head_x = Coord::new(self.x_ref(), self.x_position.values.0);
        let head_y = Coord::new(self.y_ref(), self.y_position.values.0);
        let tail_x = tail(head_x, self.x_position, x_mode);
        let tail_y = tail(head_y, self.y_position, y_mode);
        let long_x = lengthen(geometry, head_x, tail_x);
        let long_y = lengthen(geometry, head_y, tail_y);
        [
            AnnotationSpec::new(head_x, head_y, tail_x, tail_y, ANNOTATION_COLORS[0]),
            AnnotationSpec::new(head_x, head_y, long_x, long_y, ANNOTATION_COLORS[1]),
        ]
    }

    /// The image placed by an image case.
    pub fn image(&self, x_anchor: XAnchor, y_anchor: YAnchor) -> ImageSpec {
        ImageSpec {
            x: Coord::new(self.x_ref(), self.x_position.values.0),
            y: Coord::new(self.y_ref(), self.y_position.values.0),
            size_x: self.x_position.size,
            size_y: self.y_position.size,
            x_anchor,
            y_anchor,
            source: TEST_IMAGE.to_string(),
        }
    }

    /// A sentence describing the case.
    pub fn description(&self) -> String {
        let what = match self.variant {
            CaseVariant::Shape(kind) => format!("a {kind} shape"),
            CaseVariant::Annotation { x, y } => {
                format!("an annotation with {x} x and {y} y arrow tails")
            }
            CaseVariant::Image { x_anchor, y_anchor } => {
                format!("an image anchored {x_anchor}/{y_anchor}")
            }
        };
        format!(
            "should draw {what} for {} of type {} with a value referencing {} \
             and for {} of type {} with a value referencing {}",
            self.x_axis,
            self.x_type,
            self.x_position.kind,
            self.y_axis,
            self.y_type,
            self.y_position.kind,
        )
    }
}

impl fmt::Display for TestCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} {}", self.index, self.description())
    }
}

fn tail(head: Coord, position: RefPosition, mode: ArrowMode) -> ArrowCoord {
    match mode {
        ArrowMode::Same => ArrowCoord::at(head.reference, position.values.1),
        ArrowMode::Pixel => ArrowCoord::pixel(position.pixel),
    }
}

fn lengthen(geometry: &PlotGeometry, head: Coord, tail: ArrowCoord) -> ArrowCoord {
    let scaling = ArrowScaling::resolve(geometry, head, tail);
    ArrowCoord {
        reference: tail.reference,
        value: scale_arrow_value(head.value, tail.value, scaling, ARROW_RATIO),
    }
}
