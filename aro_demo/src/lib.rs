// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Reference surface for `aro_harness`.
//!
//! [`SceneSurface`] lays objects out into an in-memory scene and reports
//! their bounds, which is enough to run every generated case without a
//! browser. The scene can be dumped as SVG for inspection.

mod measure;
mod scene;
mod svg;

pub use measure::{HeuristicTextMeasurer, TextMeasurer};
pub use scene::{SceneMark, SceneSurface};
