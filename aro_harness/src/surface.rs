// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The rendering surface the harness checks against.

use aro_geom::{AnnotationSpec, Aro, BoundingBox, ImageSpec, PlotGeometry, ShapeSpec};
use peniko::Color;

/// A plot description handed to a surface: geometry plus the objects to place.
#[derive(Clone, Debug, PartialEq)]
pub struct Layout {
    /// Canvas, margins and axes.
    pub geometry: PlotGeometry,
    /// Shapes, in drawing order.
    pub shapes: Vec<ShapeSpec>,
    /// Annotations, in drawing order.
    pub annotations: Vec<AnnotationSpec>,
    /// Images, in drawing order.
    pub images: Vec<ImageSpec>,
}

impl Layout {
    /// Creates a layout with no objects.
    pub fn new(geometry: PlotGeometry) -> Self {
        Self {
            geometry,
            shapes: Vec::new(),
            annotations: Vec::new(),
            images: Vec::new(),
        }
    }

    /// Adds objects, each to the list matching its kind.
    #[must_use]
    pub fn with_objects(mut self, objects: impl IntoIterator<Item = Aro>) -> Self {
        for aro in objects {
            self.push(aro);
        }
        self
    }

    /// Adds one object to the list matching its kind.
    pub fn push(&mut self, aro: Aro) {
        match aro {
            Aro::Shape(s) => self.shapes.push(s),
            Aro::Annotation(a) => self.annotations.push(a),
            Aro::Image(i) => self.images.push(i),
        }
    }
}

/// Identifies a rendered element within a surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub u32);

/// Errors a surface may report when laying out.
#[derive(Debug, thiserror::Error)]
pub enum SurfaceError {
    /// The surface could not place an object.
    #[error("cannot place {object}: {reason}")]
    Placement {
        /// Which object (e.g. `annotation 1`).
        object: String,
        /// Why placement failed.
        reason: String,
    },
}

/// A renderer that can lay out a [`Layout`] and report element geometry.
///
/// Calls are synchronous: after `relayout` returns, queries reflect the new layout.
pub trait RenderSurface {
    /// Replaces whatever was rendered with `layout`.
    fn relayout(&mut self, layout: &Layout) -> Result<(), SurfaceError>;

    /// Finds a rendered path by its stroke colour.
    fn find_by_stroke(&self, color: Color) -> Option<ElementId>;

    /// Finds the first rendered image.
    fn first_image(&self) -> Option<ElementId>;

    /// The screen-space bounding box of a rendered element.
    fn screen_bbox(&self, element: ElementId) -> Option<BoundingBox>;
}

impl<S: RenderSurface + ?Sized> RenderSurface for &mut S {
    fn relayout(&mut self, layout: &Layout) -> Result<(), SurfaceError> {
        (**self).relayout(layout)
    }

    fn find_by_stroke(&self, color: Color) -> Option<ElementId> {
        (**self).find_by_stroke(color)
    }

    fn first_image(&self) -> Option<ElementId> {
        (**self).first_image()
    }

    fn screen_bbox(&self, element: ElementId) -> Option<BoundingBox> {
        (**self).screen_bbox(element)
    }
}
