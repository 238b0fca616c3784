// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors that stop a case or a run from being evaluated.

use std::path::PathBuf;

use aro_geom::{MapError, RefError};

use crate::surface::SurfaceError;

/// Faults that abort a single case (or configuration loading).
#[derive(Debug, thiserror::Error)]
pub enum HarnessError {
    /// A coordinate could not be mapped.
    #[error(transparent)]
    Map(#[from] MapError),
    /// A reference, anchor or axis type could not be parsed.
    #[error(transparent)]
    Ref(#[from] RefError),
    /// The surface rejected the layout.
    #[error(transparent)]
    Surface(#[from] SurfaceError),
    /// The surface did not render an element the case expects.
    #[error("no rendered element for {0}")]
    MissingElement(String),
    /// The configuration JSON is malformed.
    #[error("invalid configuration JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// The configuration is well-formed but describes an impossible setup.
    #[error("invalid configuration: {0}")]
    Config(String),
    /// The configuration file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        /// The path that failed.
        path: PathBuf,
        /// The underlying error.
        source: std::io::Error,
    },
}
