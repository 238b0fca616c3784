// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Mapping declared coordinates to screen pixels.

use crate::axis::{AxisType, PlotGeometry};
use crate::reference::{AxisId, AxisLetter, AxisRef, RefError};

/// Faults raised while mapping a coordinate.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum MapError {
    /// A reference, anchor or axis type could not be parsed.
    #[error(transparent)]
    Ref(#[from] RefError),
    /// The reference names an axis the plot does not have.
    #[error("axis {0} is not part of the plot")]
    UnknownAxis(AxisId),
    /// An `x` coordinate referenced a `y` axis, or vice versa.
    #[error("{letter} coordinate cannot reference axis {axis}")]
    LetterMismatch {
        /// Letter of the coordinate being mapped.
        letter: AxisLetter,
        /// The referenced axis.
        axis: AxisId,
    },
    /// A log axis was asked to map a non-positive value, or has a non-positive range.
    #[error("log axis {axis} cannot map {value}")]
    NonPositiveLog {
        /// The log axis.
        axis: AxisId,
        /// The offending value (or range bound).
        value: f64,
    },
    /// The mapping produced a non-finite pixel coordinate.
    #[error("{reference} value {value} maps to a non-finite pixel")]
    NonFinite {
        /// The reference used.
        reference: AxisRef,
        /// The input value (offset included).
        value: f64,
    },
}

/// Converts `(reference, value)` pairs into pixel coordinates for one plot.
#[derive(Clone, Copy, Debug)]
pub struct CoordinateMapper<'a> {
    geometry: &'a PlotGeometry,
}

impl<'a> CoordinateMapper<'a> {
    /// Creates a mapper reading from `geometry`.
    pub fn new(geometry: &'a PlotGeometry) -> Self {
        Self { geometry }
    }

    /// The geometry this mapper reads from.
    pub fn geometry(&self) -> &'a PlotGeometry {
        self.geometry
    }

    /// Maps `value` without an offset.
    pub fn to_pixel_at(
        &self,
        reference: AxisRef,
        letter: AxisLetter,
        value: f64,
    ) -> Result<f64, MapError> {
        self.to_pixel(reference, letter, value, 0.0)
    }

    /// Maps `value + offset` along `letter`.
    ///
    /// - `Range` values go through the axis scale (log10 on log axes).
    /// - `Domain` values are fractions of the axis span and are never log-transformed.
    /// - `Paper` values are fractions of the paper along `letter`.
    pub fn to_pixel(
        &self,
        reference: AxisRef,
        letter: AxisLetter,
        value: f64,
        offset: f64,
    ) -> Result<f64, MapError> {
        let v = value + offset;
        let px = match reference {
            AxisRef::Range(id) => {
                self.check_letter(letter, id)?;
                let axis = self.geometry.axis(id).ok_or(MapError::UnknownAxis(id))?;
                if axis.axis_type == AxisType::Log {
                    for bad in [v, axis.range.0, axis.range.1] {
                        if bad <= 0.0 {
                            return Err(MapError::NonPositiveLog {
                                axis: id,
                                value: bad,
                            });
                        }
                    }
                }
                let scale = self.geometry.scale(id).ok_or(MapError::UnknownAxis(id))?;
                scale.map(v)
            }
            AxisRef::Domain(id) => {
                self.check_letter(letter, id)?;
                let span = self
                    .geometry
                    .axis_span(id)
                    .ok_or(MapError::UnknownAxis(id))?;
                lerp(span, v)
            }
            AxisRef::Paper => lerp(self.geometry.paper_span(letter), v),
        };
        if px.is_finite() {
            Ok(px)
        } else {
            Err(MapError::NonFinite {
                reference,
                value: v,
            })
        }
    }

    fn check_letter(&self, letter: AxisLetter, axis: AxisId) -> Result<(), MapError> {
        if axis.letter() == letter {
            Ok(())
        } else {
            Err(MapError::LetterMismatch { letter, axis })
        }
    }
}

fn lerp((p0, p1): (f64, f64), t: f64) -> f64 {
    p0 + t * (p1 - p0)
}
