// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A reference [`RenderSurface`] that draws into an in-memory scene.

use aro_geom::{
    AnnotationSpec, ArrowCoord, ArrowRef, AxisLetter, BoundingBox, Coord, CoordinateMapper,
    ImageSpec, MapError, ShapeKind, ShapeSpec, XAnchor, YAnchor,
};
use aro_harness::{ElementId, Layout, RenderSurface, SurfaceError};
use kurbo::{BezPath, Point, Rect, Shape};
use peniko::Color;
use peniko::color::palette::css;

use crate::measure::{HeuristicTextMeasurer, TextMeasurer, text_box};

const PATH_TOLERANCE: f64 = 0.1;

/// One drawn element.
#[derive(Clone, Debug, PartialEq)]
pub enum SceneMark {
    /// A stroked path.
    Path {
        /// Path geometry.
        path: BezPath,
        /// Stroke colour.
        stroke: Color,
        /// Stroke width in pixels.
        stroke_width: f64,
    },
    /// Annotation text with its padded box.
    Text {
        /// Box the text is centred in.
        bounds: Rect,
        /// Font size in pixels.
        font_size: f64,
        /// The text.
        text: String,
    },
    /// A stretched image.
    Image {
        /// Where the image is drawn.
        rect: Rect,
        /// Image source.
        href: String,
    },
}

impl SceneMark {
    /// Screen-space bounds of the mark, excluding stroke width.
    pub fn bounds(&self) -> Rect {
        match self {
            Self::Path { path, .. } => path.bounding_box(),
            Self::Text { bounds, .. } => *bounds,
            Self::Image { rect, .. } => rect.abs(),
        }
    }
}

/// Lays out shapes, annotations and images the way a plotting library would.
///
/// Annotation text is centred on the arrow tail and the arrow stops where it
/// enters the text box. An arrow whose reference equals its anchor's is read
/// as data; any other arrow is a pixel offset from the head.
pub struct SceneSurface {
    marks: Vec<SceneMark>,
    view: Rect,
    measurer: Box<dyn TextMeasurer>,
    font_size: f64,
    padding: f64,
    stroke_width: f64,
}

impl core::fmt::Debug for SceneSurface {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SceneSurface")
            .field("marks", &self.marks)
            .field("view", &self.view)
            .field("font_size", &self.font_size)
            .field("padding", &self.padding)
            .field("stroke_width", &self.stroke_width)
            .finish_non_exhaustive()
    }
}

impl Default for SceneSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneSurface {
    /// An empty scene with heuristic text measurement, 12px text and 3px padding.
    pub fn new() -> Self {
        Self {
            marks: Vec::new(),
            view: Rect::ZERO,
            measurer: Box::new(HeuristicTextMeasurer),
            font_size: 12.0,
            padding: 3.0,
            stroke_width: 2.0,
        }
    }

    /// Replaces the text measurer.
    #[must_use]
    pub fn with_measurer(mut self, measurer: impl TextMeasurer + 'static) -> Self {
        self.measurer = Box::new(measurer);
        self
    }

    /// Sets the annotation font size and text box padding.
    #[must_use]
    pub fn with_text_style(mut self, font_size: f64, padding: f64) -> Self {
        self.font_size = font_size;
        self.padding = padding;
        self
    }

    /// The drawn marks, in drawing order.
    pub fn marks(&self) -> &[SceneMark] {
        &self.marks
    }

    /// The canvas of the last layout.
    pub fn view(&self) -> Rect {
        self.view
    }

    fn push_shape(
        &mut self,
        mapper: &CoordinateMapper<'_>,
        shape: &ShapeSpec,
    ) -> Result<(), MapError> {
        let x0 = mapper.to_pixel_at(shape.x.reference, AxisLetter::X, shape.x.value0)?;
        let x1 = mapper.to_pixel_at(shape.x.reference, AxisLetter::X, shape.x.value1)?;
        let y0 = mapper.to_pixel_at(shape.y.reference, AxisLetter::Y, shape.y.value0)?;
        let y1 = mapper.to_pixel_at(shape.y.reference, AxisLetter::Y, shape.y.value1)?;
        let path = match shape.kind {
            ShapeKind::Line => {
                let mut path = BezPath::new();
                path.move_to((x0, y0));
                path.line_to((x1, y1));
                path
            }
            ShapeKind::Rect => Rect::new(x0, y0, x1, y1).to_path(PATH_TOLERANCE),
        };
        self.marks.push(SceneMark::Path {
            path,
            stroke: shape.color,
            stroke_width: self.stroke_width,
        });
        Ok(())
    }

    fn push_annotation(
        &mut self,
        mapper: &CoordinateMapper<'_>,
        annotation: &AnnotationSpec,
    ) -> Result<(), MapError> {
        let (x, y) = (annotation.x, annotation.y);
        let head = Point::new(
            mapper.to_pixel_at(x.reference, AxisLetter::X, x.value)?,
            mapper.to_pixel_at(y.reference, AxisLetter::Y, y.value)?,
        );
        let tail = Point::new(
            tail_pixel(mapper, x, annotation.arrow_x, AxisLetter::X, head.x)?,
            tail_pixel(mapper, y, annotation.arrow_y, AxisLetter::Y, head.y)?,
        );
        let bounds = text_box(
            &*self.measurer,
            &annotation.text,
            self.font_size,
            self.padding,
            tail,
        );

        // Fraction of the tail-to-head segment inside the text box.
        let back = tail - head;
        let inside = [
            (back.x.abs(), 0.5 * bounds.width()),
            (back.y.abs(), 0.5 * bounds.height()),
        ]
        .into_iter()
        .filter(|(d, _)| *d > 0.0)
        .map(|(d, half)| half / d)
        .fold(f64::INFINITY, f64::min);
        if inside < 1.0 {
            let mut path = BezPath::new();
            path.move_to(head);
            path.line_to(tail - back * inside);
            self.marks.push(SceneMark::Path {
                path,
                stroke: annotation.color,
                stroke_width: self.stroke_width,
            });
        } else {
            tracing::debug!(?head, ?tail, "arrow head inside the text box, arrow hidden");
        }
        self.marks.push(SceneMark::Text {
            bounds,
            font_size: self.font_size,
            text: annotation.text.clone(),
        });
        Ok(())
    }

    fn push_image(
        &mut self,
        mapper: &CoordinateMapper<'_>,
        image: &ImageSpec,
    ) -> Result<(), MapError> {
        let (left, right) = match image.x_anchor {
            XAnchor::Left => (0.0, image.size_x),
            XAnchor::Center => (-0.5 * image.size_x, 0.5 * image.size_x),
            XAnchor::Right => (-image.size_x, 0.0),
        };
        let (bottom, top) = match image.y_anchor {
            YAnchor::Bottom => (0.0, image.size_y),
            YAnchor::Middle => (-0.5 * image.size_y, 0.5 * image.size_y),
            YAnchor::Top => (-image.size_y, 0.0),
        };
        let x = image.x;
        let y = image.y;
        let rect = Rect::new(
            mapper.to_pixel(x.reference, AxisLetter::X, x.value, left)?,
            mapper.to_pixel(y.reference, AxisLetter::Y, y.value, top)?,
            mapper.to_pixel(x.reference, AxisLetter::X, x.value, right)?,
            mapper.to_pixel(y.reference, AxisLetter::Y, y.value, bottom)?,
        );
        self.marks.push(SceneMark::Image {
            rect,
            href: image.source.clone(),
        });
        Ok(())
    }

    fn push_paper(&mut self, paper: Rect) {
        self.marks.push(SceneMark::Path {
            path: paper.to_path(PATH_TOLERANCE),
            stroke: css::LIGHT_GRAY,
            stroke_width: 1.0,
        });
    }
}

fn tail_pixel(
    mapper: &CoordinateMapper<'_>,
    anchor: Coord,
    arrow: ArrowCoord,
    letter: AxisLetter,
    head: f64,
) -> Result<f64, MapError> {
    match arrow.reference {
        ArrowRef::Axis(r) if r.kind() == anchor.reference.kind() => {
            mapper.to_pixel_at(r, letter, arrow.value)
        }
        ArrowRef::Axis(_) | ArrowRef::Pixel => Ok(head + arrow.value),
    }
}

fn placement(object: String) -> impl FnOnce(MapError) -> SurfaceError {
    move |err| SurfaceError::Placement {
        object,
        reason: err.to_string(),
    }
}

impl RenderSurface for SceneSurface {
    fn relayout(&mut self, layout: &Layout) -> Result<(), SurfaceError> {
        let geometry = &layout.geometry;
        let mapper = CoordinateMapper::new(geometry);
        self.marks.clear();
        self.view = geometry.canvas();
        self.push_paper(geometry.paper());
        for (i, shape) in layout.shapes.iter().enumerate() {
            self.push_shape(&mapper, shape)
                .map_err(placement(format!("shape {i}")))?;
        }
        for (i, annotation) in layout.annotations.iter().enumerate() {
            self.push_annotation(&mapper, annotation)
                .map_err(placement(format!("annotation {i}")))?;
        }
        for (i, image) in layout.images.iter().enumerate() {
            self.push_image(&mapper, image)
                .map_err(placement(format!("image {i}")))?;
        }
        Ok(())
    }

    fn find_by_stroke(&self, color: Color) -> Option<ElementId> {
        let index = self.marks.iter().position(
            |mark| matches!(mark, SceneMark::Path { stroke, .. } if *stroke == color),
        )?;
        u32::try_from(index).ok().map(ElementId)
    }

    fn first_image(&self) -> Option<ElementId> {
        let index = self
            .marks
            .iter()
            .position(|mark| matches!(mark, SceneMark::Image { .. }))?;
        u32::try_from(index).ok().map(ElementId)
    }

    fn screen_bbox(&self, element: ElementId) -> Option<BoundingBox> {
        let mark = self.marks.get(usize::try_from(element.0).ok()?)?;
        Some(mark.bounds().into())
    }
}
