// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Expected on-screen bounding boxes for placed objects.

use kurbo::{Point, Rect, Vec2};

use crate::mapper::{CoordinateMapper, MapError};
use crate::object::{AnnotationSpec, ArrowCoord, Coord, ImageSpec, ShapeSpec};
use crate::reference::{ArrowRef, AxisLetter};

/// An axis-aligned box in screen pixels with a top-left origin.
///
/// [`BoundingBox::new`] keeps whatever extents it is given. The builders in
/// this module normalize, so `y` is the smaller pixel edge and the extents are
/// never negative, even on a reversed axis.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BoundingBox {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Horizontal extent.
    pub width: f64,
    /// Vertical extent.
    pub height: f64,
}

impl BoundingBox {
    /// Creates a box from its origin and extents.
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Converts a (normalized) `kurbo` rectangle.
    pub fn from_rect(rect: Rect) -> Self {
        let r = rect.abs();
        Self::new(r.x0, r.y0, r.width(), r.height())
    }

    /// Converts to a `kurbo` rectangle spanning the same corners.
    pub fn to_rect(self) -> Rect {
        Rect::new(self.x, self.y, self.x + self.width, self.y + self.height)
    }

    /// The right edge.
    pub fn x1(self) -> f64 {
        self.x + self.width
    }

    /// The bottom edge.
    pub fn y1(self) -> f64 {
        self.y + self.height
    }
}

impl From<Rect> for BoundingBox {
    fn from(value: Rect) -> Self {
        Self::from_rect(value)
    }
}

/// Expected box of a line or rect.
///
/// On an increasing axis `y0` is the lower edge in data space and therefore
/// the larger pixel value, so the box's top comes from `y1`.
pub fn shape_bbox(
    mapper: &CoordinateMapper<'_>,
    shape: &ShapeSpec,
) -> Result<BoundingBox, MapError> {
    let x0 = mapper.to_pixel_at(shape.x.reference, AxisLetter::X, shape.x.value0)?;
    let x1 = mapper.to_pixel_at(shape.x.reference, AxisLetter::X, shape.x.value1)?;
    let top = mapper.to_pixel_at(shape.y.reference, AxisLetter::Y, shape.y.value1)?;
    let bottom = mapper.to_pixel_at(shape.y.reference, AxisLetter::Y, shape.y.value0)?;
    Ok(Rect::new(x0, top, x1, bottom).into())
}

/// Expected box of a stretched image.
///
/// The anchors decide which edges the declared point is on; the opposite edges
/// are the point offset by the size (or half of it for `center`/`middle`).
pub fn image_bbox(
    mapper: &CoordinateMapper<'_>,
    image: &ImageSpec,
) -> Result<BoundingBox, MapError> {
    let (lo, hi) = image.x_anchor.edge_offsets();
    let x = image.x;
    let left = mapper.to_pixel(x.reference, AxisLetter::X, x.value, lo * image.size_x)?;
    let right = mapper.to_pixel(x.reference, AxisLetter::X, x.value, hi * image.size_x)?;

    let (lo, hi) = image.y_anchor.edge_offsets();
    let y = image.y;
    let bottom = mapper.to_pixel(y.reference, AxisLetter::Y, y.value, lo * image.size_y)?;
    let top = mapper.to_pixel(y.reference, AxisLetter::Y, y.value, hi * image.size_y)?;

    Ok(Rect::new(left, top, right, bottom).into())
}

/// Pixel position of an annotation's arrow head.
pub fn annotation_anchor(
    mapper: &CoordinateMapper<'_>,
    annotation: &AnnotationSpec,
) -> Result<Point, MapError> {
    let x = mapper.to_pixel_at(annotation.x.reference, AxisLetter::X, annotation.x.value)?;
    let y = mapper.to_pixel_at(annotation.y.reference, AxisLetter::Y, annotation.y.value)?;
    Ok(Point::new(x, y))
}

/// Pixel vector from an annotation's arrow head to its tail.
pub fn arrow_delta(
    mapper: &CoordinateMapper<'_>,
    annotation: &AnnotationSpec,
) -> Result<Vec2, MapError> {
    let dx = arrow_component(mapper, annotation.x, annotation.arrow_x, AxisLetter::X)?;
    let dy = arrow_component(mapper, annotation.y, annotation.arrow_y, AxisLetter::Y)?;
    Ok(Vec2::new(dx, dy))
}

/// A tail whose reference kind differs from the anchor's is already a pixel delta.
fn arrow_component(
    mapper: &CoordinateMapper<'_>,
    anchor: Coord,
    arrow: ArrowCoord,
    letter: AxisLetter,
) -> Result<f64, MapError> {
    match arrow.reference {
        ArrowRef::Axis(r) if r.kind() == anchor.reference.kind() => {
            let tail = mapper.to_pixel_at(r, letter, arrow.value)?;
            let head = mapper.to_pixel_at(anchor.reference, letter, anchor.value)?;
            Ok(tail - head)
        }
        ArrowRef::Axis(_) | ArrowRef::Pixel => Ok(arrow.value),
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::String;

    use peniko::Color;
    use peniko::color::palette::css;

    use super::*;
    use crate::axis::{AxisGeometry, AxisType, PlotGeometry};
    use crate::object::{CoordPair, ShapeKind, XAnchor, YAnchor};
    use crate::reference::{AxisId, AxisRef};

    const EPS: f64 = 1e-9;

    /// 500x500 canvas; `x` range [0,10] over [0,500], `y` range [0,10] over [400,100].
    fn geometry() -> PlotGeometry {
        PlotGeometry::new(500.0, 500.0)
            .with_axis(AxisId::X, AxisGeometry::new((0.0, 10.0), (0.0, 1.0)))
            .with_axis(AxisId::Y, AxisGeometry::new((0.0, 10.0), (0.2, 0.8)))
    }

    fn assert_box_close(a: BoundingBox, b: BoundingBox) {
        assert!((a.x - b.x).abs() <= EPS, "x {a:?} != {b:?}");
        assert!((a.y - b.y).abs() <= EPS, "y {a:?} != {b:?}");
        assert!((a.width - b.width).abs() <= EPS, "width {a:?} != {b:?}");
        assert!((a.height - b.height).abs() <= EPS, "height {a:?} != {b:?}");
    }

    fn image(x_anchor: XAnchor, y_anchor: YAnchor) -> ImageSpec {
        ImageSpec {
            x: Coord::new(AxisRef::Range(AxisId::X), 3.0),
            y: Coord::new(AxisRef::Range(AxisId::Y), 5.0),
            size_x: 1.5,
            size_y: 2.0,
            x_anchor,
            y_anchor,
            source: String::new(),
        }
    }

    #[test]
    fn rect_with_domain_x_and_range_y() {
        let g = geometry();
        let m = CoordinateMapper::new(&g);
        let shape = ShapeSpec {
            kind: ShapeKind::Rect,
            x: CoordPair::new(AxisRef::Domain(AxisId::X), 0.2, 0.75),
            y: CoordPair::new(AxisRef::Range(AxisId::Y), 1.0, 2.0),
            color: Color::from_rgba8(50, 100, 150, 255),
        };
        let got = shape_bbox(&m, &shape).unwrap();
        assert_box_close(got, BoundingBox::new(100.0, 340.0, 275.0, 30.0));
    }

    #[test]
    fn increasing_rects_have_non_negative_extents() {
        let g = geometry().with_axis(
            AxisId::X,
            AxisGeometry::new((0.5, 10.0), (0.0, 1.0)).with_type(AxisType::Log),
        );
        let m = CoordinateMapper::new(&g);
        for (x0, x1, y0, y1) in [(1.0, 2.0, 0.0, 0.5), (0.6, 9.0, 3.0, 3.1)] {
            let shape = ShapeSpec {
                kind: ShapeKind::Rect,
                x: CoordPair::new(AxisRef::Range(AxisId::X), x0, x1),
                y: CoordPair::new(AxisRef::Range(AxisId::Y), y0, y1),
                color: css::BLACK,
            };
            let b = shape_bbox(&m, &shape).unwrap();
            assert!(b.width >= 0.0 && b.height >= 0.0, "{b:?}");
        }
    }

    #[test]
    fn right_anchored_image_extends_left_of_x() {
        let g = geometry();
        let m = CoordinateMapper::new(&g);
        let b = image_bbox(&m, &image(XAnchor::Right, YAnchor::Bottom)).unwrap();
        assert!((b.x - 75.0).abs() < EPS, "x0 {b:?}");
        assert!((b.x1() - 150.0).abs() < EPS, "x1 {b:?}");
        // bottom anchored: data [5, 7] -> pixels [250, 190]
        assert!((b.y - 190.0).abs() < EPS, "top {b:?}");
        assert!((b.height - 60.0).abs() < EPS, "height {b:?}");
    }

    #[test]
    fn centred_images_straddle_the_anchor() {
        let g = geometry();
        let m = CoordinateMapper::new(&g);
        let b = image_bbox(&m, &image(XAnchor::Center, YAnchor::Middle)).unwrap();
        assert_box_close(b, BoundingBox::new(112.5, 220.0, 75.0, 60.0));
        let b = image_bbox(&m, &image(XAnchor::Left, YAnchor::Top)).unwrap();
        assert_box_close(b, BoundingBox::new(150.0, 250.0, 75.0, 60.0));
    }

    #[test]
    fn reversed_axes_still_give_the_top_edge_and_positive_extents() {
        let g = geometry()
            .with_axis(AxisId::X, AxisGeometry::new((10.0, 0.0), (0.0, 1.0)))
            .with_axis(
                AxisId::Y,
                AxisGeometry::new((4.0, 0.5), (0.0, 0.45)).with_type(AxisType::Log),
            );
        let m = CoordinateMapper::new(&g);
        let mut img = image(XAnchor::Left, YAnchor::Bottom);
        img.y = Coord::new(AxisRef::Range(AxisId::Y), 1.0);
        img.size_y = 0.8;

        let b = image_bbox(&m, &img).unwrap();
        let y = |v: f64| m.to_pixel_at(AxisRef::Range(AxisId::Y), AxisLetter::Y, v).unwrap();
        let (edge0, edge1) = (y(1.0), y(1.8));
        assert!(b.height > 0.0 && b.width > 0.0, "{b:?}");
        assert!((b.y - edge0.min(edge1)).abs() < EPS, "top {b:?}");
        assert!((b.height - (edge1 - edge0).abs()).abs() < EPS, "height {b:?}");
        // x range [10,0] over [0,500]: data [3, 4.5] -> pixels [350, 275]
        assert_box_close(b, BoundingBox::new(275.0, b.y, 75.0, b.height));

        let shape = ShapeSpec {
            kind: ShapeKind::Rect,
            x: CoordPair::new(AxisRef::Range(AxisId::X), 1.0, 2.0),
            y: CoordPair::new(AxisRef::Range(AxisId::Y), 1.0, 2.0),
            color: css::BLACK,
        };
        let b = shape_bbox(&m, &shape).unwrap();
        assert!(b.width > 0.0 && b.height > 0.0, "{b:?}");
        assert!((b.y - y(1.0).min(y(2.0))).abs() < EPS, "shape top {b:?}");
    }

    #[test]
    fn arrow_delta_maps_same_kind_and_passes_pixels_through() {
        let g = geometry();
        let m = CoordinateMapper::new(&g);
        let x = AxisRef::Range(AxisId::X);
        let y = AxisRef::Range(AxisId::Y);
        let mut a = AnnotationSpec::new(
            Coord::new(x, 2.0),
            Coord::new(y, 1.0),
            ArrowCoord::at(x, 3.0),
            ArrowCoord::pixel(30.0),
            css::BLACK,
        );
        let head = annotation_anchor(&m, &a).unwrap();
        assert!((head - Point::new(100.0, 370.0)).hypot() < EPS, "{head:?}");
        let d = arrow_delta(&m, &a).unwrap();
        assert!((d.x - 50.0).abs() < EPS, "{d:?}");
        assert!((d.y - 30.0).abs() < EPS, "{d:?}");

        // A domain tail on a range anchor is read as pixels.
        a.arrow_x = ArrowCoord::at(AxisRef::Domain(AxisId::X), 0.75);
        let d = arrow_delta(&m, &a).unwrap();
        assert!((d.x - 0.75).abs() < EPS, "{d:?}");
    }

    #[test]
    fn rect_round_trips_through_kurbo() {
        let b = BoundingBox::new(10.0, 20.0, 30.0, 40.0);
        assert_eq!(BoundingBox::from_rect(b.to_rect()), b);
        let flipped = Rect::new(40.0, 60.0, 10.0, 20.0);
        assert_eq!(BoundingBox::from(flipped), b);
    }
}
