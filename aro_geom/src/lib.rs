// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Placement geometry for axis-referencing objects (AROs).
//!
//! An ARO is a shape, annotation or image whose coordinates refer to an axis
//! data range, a fraction of an axis domain, or a fraction of the paper. This
//! crate turns those declared coordinates into screen pixels:
//! - **References** ([`AxisRef`]) are parsed once into a tagged variant.
//! - **Mapping** ([`CoordinateMapper`]) converts a value into a pixel offset
//!   along one axis letter.
//! - **Bounding boxes** ([`shape_bbox`], [`image_bbox`]) derive the expected
//!   on-screen rectangle of an object.
//! - **Comparison** ([`BoundingBox::approx_eq`], [`ArrowReconciliation`])
//!   checks expected geometry against what a renderer reports.
//!
//! Rendering is out of scope; renderers live downstream and report geometry back.

#![no_std]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

mod arrow;
mod axis;
mod bbox;
mod compare;
#[cfg(not(feature = "std"))]
mod float;
mod mapper;
mod object;
mod reference;
mod scale;

pub use arrow::{ArrowReconciliation, ArrowScaling, scale_arrow_value};
pub use axis::{AxisGeometry, AxisType, Margins, PlotGeometry};
pub use bbox::{BoundingBox, annotation_anchor, arrow_delta, image_bbox, shape_bbox};
pub use compare::{EQUALITY_TOLERANCE, coords_eq};
pub use mapper::{CoordinateMapper, MapError};
pub use object::{
    AnnotationSpec, ArrowCoord, Aro, AroKind, Coord, CoordPair, ImageSpec, ShapeKind, ShapeSpec,
    XAnchor, YAnchor,
};
pub use reference::{ArrowRef, AxisId, AxisLetter, AxisRef, RefError, RefKind};
pub use scale::{AxisScale, ScaleLinear, ScaleLog};
