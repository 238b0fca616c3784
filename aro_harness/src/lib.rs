// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Combinatorial placement checks for axis-referencing objects.
//!
//! The harness enumerates every combination of axis pair, axis type,
//! reference kind and object kind from a [`Fixture`], installs the resulting
//! objects on a [`RenderSurface`], and compares the geometry the surface
//! reports with what `aro_geom` predicts.
//!
//! Each [`TestCase`] is an immutable record; the only shared state is the
//! surface itself, which every case re-lays out from the base geometry.

mod case;
mod config;
mod error;
mod fixture;
mod generator;
mod runner;
mod surface;

pub use case::{ANNOTATION_COLORS, ARO_COLOR, ArrowMode, CaseVariant, TEST_IMAGE, TestCase};
pub use config::{AxisConfig, HarnessConfig, MarginsConfig, PlotConfig, PositionConfig};
pub use error::HarnessError;
pub use fixture::{Fixture, RefPosition, base_geometry};
pub use generator::CaseGenerator;
pub use runner::{CaseOutcome, CaseResult, Mismatch, RunReport, Runner};
pub use surface::{ElementId, Layout, RenderSurface, SurfaceError};
