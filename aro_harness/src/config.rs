// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! JSON overrides for the base plot and the fixture.
//!
//! Every field is optional; an empty object `{}` yields the built-in
//! [`base_geometry`] and [`Fixture::default`].
//!
//! ```json
//! {
//!   "tolerance": 0.01,
//!   "plot": {
//!     "width": 600, "height": 500,
//!     "margins": { "left": 80, "right": 20, "top": 40, "bottom": 60 },
//!     "axes": { "x": { "range": [0.5, 5], "domain": [0, 1] } }
//!   },
//!   "axis_pairs": [["x", "y"]],
//!   "kinds": ["shape"]
//! }
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use aro_geom::{
    AroKind, AxisGeometry, AxisId, AxisLetter, AxisType, EQUALITY_TOLERANCE, Margins,
    PlotGeometry, RefKind,
};
use serde::Deserialize;

use crate::error::HarnessError;
use crate::fixture::{Fixture, RefPosition, base_geometry};

/// Top-level harness configuration.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HarnessConfig {
    /// Pixel tolerance for every comparison.
    pub tolerance: f64,
    /// Log expected and observed geometry for every case, not only failures.
    pub debug: bool,
    /// Replaces the base plot.
    pub plot: Option<PlotConfig>,
    /// Replaces the axis pairs, as `["x2", "y"]`.
    pub axis_pairs: Option<Vec<[String; 2]>>,
    /// Replaces the x positions.
    pub x_positions: Option<Vec<PositionConfig>>,
    /// Replaces the y positions.
    pub y_positions: Option<Vec<PositionConfig>>,
    /// Restricts the object kinds that are generated.
    pub kinds: Option<Vec<String>>,
    /// Keep combinations that differ only in a paper coordinate's axis.
    pub keep_paper_duplicates: bool,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            tolerance: EQUALITY_TOLERANCE,
            debug: false,
            plot: None,
            axis_pairs: None,
            x_positions: None,
            y_positions: None,
            kinds: None,
            keep_paper_duplicates: false,
        }
    }
}

/// Canvas, margins and axes of the base plot.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PlotConfig {
    /// Canvas width in pixels.
    pub width: f64,
    /// Canvas height in pixels.
    pub height: f64,
    /// Margins around the paper.
    #[serde(default)]
    pub margins: MarginsConfig,
    /// Axes keyed by id (`"x"`, `"y2"`, ...).
    pub axes: BTreeMap<String, AxisConfig>,
}

/// Margins in pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MarginsConfig {
    /// Left margin.
    pub left: f64,
    /// Right margin.
    pub right: f64,
    /// Top margin.
    pub top: f64,
    /// Bottom margin.
    pub bottom: f64,
}

impl From<MarginsConfig> for Margins {
    fn from(m: MarginsConfig) -> Self {
        Self {
            left: m.left,
            right: m.right,
            top: m.top,
            bottom: m.bottom,
        }
    }
}

/// One data axis.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AxisConfig {
    /// Data range.
    pub range: [f64; 2],
    /// Fraction of the paper the axis spans.
    pub domain: [f64; 2],
    /// Base axis type, `linear` (default) or `log`.
    #[serde(rename = "type", default = "default_axis_type")]
    pub axis_type: String,
}

fn default_axis_type() -> String {
    AxisType::Linear.as_str().to_string()
}

/// Coordinates for one reference kind.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PositionConfig {
    /// `range`, `domain` or `paper`.
    #[serde(rename = "ref")]
    pub reference: String,
    /// First and second coordinate.
    pub values: [f64; 2],
    /// Image size.
    pub size: f64,
    /// Arrow tail offset in pixels.
    pub pixel: f64,
}

impl PositionConfig {
    fn to_position(&self) -> Result<RefPosition, HarnessError> {
        let kind: RefKind = self.reference.parse()?;
        let [v0, v1] = self.values;
        Ok(RefPosition::new(kind, (v0, v1), self.size, self.pixel))
    }
}

impl HarnessConfig {
    /// Parses a configuration from JSON text.
    pub fn from_json_str(text: &str) -> Result<Self, HarnessError> {
        let config: Self = serde_json::from_str(text)?;
        if !(config.tolerance.is_finite() && config.tolerance > 0.0) {
            return Err(HarnessError::Config(format!(
                "tolerance must be positive, got {}",
                config.tolerance
            )));
        }
        Ok(config)
    }

    /// Reads and parses a configuration file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, HarnessError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| HarnessError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    /// The base plot geometry.
    pub fn plot_geometry(&self) -> Result<PlotGeometry, HarnessError> {
        let Some(plot) = &self.plot else {
            return Ok(base_geometry());
        };
        if !(plot.width > 0.0 && plot.height > 0.0) {
            return Err(HarnessError::Config(format!(
                "canvas must have positive size, got {}x{}",
                plot.width, plot.height
            )));
        }
        let mut geometry =
            PlotGeometry::new(plot.width, plot.height).with_margins(plot.margins.into());
        let paper = geometry.paper();
        if paper.width() <= 0.0 || paper.height() <= 0.0 {
            return Err(HarnessError::Config("margins leave no paper".into()));
        }
        for (name, axis) in &plot.axes {
            let id: AxisId = name.parse()?;
            let axis_type: AxisType = axis.axis_type.parse()?;
            let [r0, r1] = axis.range;
            let [d0, d1] = axis.domain;
            if axis_type == AxisType::Log && (r0 <= 0.0 || r1 <= 0.0) {
                return Err(HarnessError::Config(format!(
                    "log axis {id} needs a positive range, got [{r0}, {r1}]"
                )));
            }
            geometry = geometry.with_axis(
                id,
                AxisGeometry::new((r0, r1), (d0, d1)).with_type(axis_type),
            );
        }
        Ok(geometry)
    }

    /// The fixture with this configuration's overrides applied.
    pub fn fixture(&self) -> Result<Fixture, HarnessError> {
        let mut fixture = Fixture {
            dedupe_paper: !self.keep_paper_duplicates,
            ..Fixture::default()
        };
        if let Some(pairs) = &self.axis_pairs {
            fixture.axis_pairs = pairs
                .iter()
                .map(|[x, y]| parse_pair(x, y))
                .collect::<Result<_, _>>()?;
        }
        if let Some(positions) = &self.x_positions {
            fixture.x_positions = positions
                .iter()
                .map(PositionConfig::to_position)
                .collect::<Result<_, _>>()?;
        }
        if let Some(positions) = &self.y_positions {
            fixture.y_positions = positions
                .iter()
                .map(PositionConfig::to_position)
                .collect::<Result<_, _>>()?;
        }
        Ok(fixture)
    }

    /// The object kinds to generate.
    pub fn kinds(&self) -> Result<Vec<AroKind>, HarnessError> {
        match &self.kinds {
            None => Ok(AroKind::ALL.to_vec()),
            Some(kinds) => kinds
                .iter()
                .map(|k| k.parse::<AroKind>().map_err(HarnessError::from))
                .collect(),
        }
    }
}

fn parse_pair(x: &str, y: &str) -> Result<(AxisId, AxisId), HarnessError> {
    let (x, y): (AxisId, AxisId) = (x.parse()?, y.parse()?);
    if x.letter() != AxisLetter::X || y.letter() != AxisLetter::Y {
        return Err(HarnessError::Config(format!(
            "axis pair must be [x, y], got [{x}, {y}]"
        )));
    }
    Ok((x, y))
}

#[cfg(test)]
mod tests {
    use aro_geom::RefError;

    use super::*;

    #[test]
    fn empty_object_is_the_built_in_setup() {
        let config = HarnessConfig::from_json_str("{}").unwrap();
        assert_eq!(config, HarnessConfig::default());
        assert_eq!(config.plot_geometry().unwrap(), base_geometry());
        assert_eq!(config.fixture().unwrap(), Fixture::default());
        assert_eq!(config.kinds().unwrap(), AroKind::ALL.to_vec());
    }

    #[test]
    fn plot_and_fixture_overrides() {
        let config = HarnessConfig::from_json_str(
            r#"{
                "tolerance": 0.5,
                "plot": {
                    "width": 400, "height": 300,
                    "margins": { "left": 10, "bottom": 20 },
                    "axes": {
                        "x": { "range": [1, 100], "domain": [0, 1], "type": "log" },
                        "y": { "range": [0, 10], "domain": [0, 1] }
                    }
                },
                "axis_pairs": [["x", "y"]],
                "x_positions": [{ "ref": "paper", "values": [0.1, 0.9], "size": 0.2, "pixel": 15 }],
                "kinds": ["image", "shape"]
            }"#,
        )
        .unwrap();
        assert_eq!(config.tolerance, 0.5);

        let geometry = config.plot_geometry().unwrap();
        assert_eq!(geometry.paper(), kurbo::Rect::new(10.0, 0.0, 400.0, 280.0));
        assert_eq!(geometry.axis(AxisId::X).unwrap().axis_type, AxisType::Log);
        assert_eq!(geometry.axis(AxisId::Y).unwrap().axis_type, AxisType::Linear);
        assert!(geometry.axis(AxisId::X2).is_none());

        let fixture = config.fixture().unwrap();
        assert_eq!(fixture.axis_pairs, vec![(AxisId::X, AxisId::Y)]);
        assert_eq!(fixture.x_positions.len(), 1);
        assert_eq!(fixture.x_positions[0].kind, RefKind::Paper);
        assert_eq!(fixture.y_positions, Fixture::default().y_positions);
        assert_eq!(config.kinds().unwrap(), vec![AroKind::Image, AroKind::Shape]);
    }

    #[test]
    fn bad_values_are_reported() {
        let err = HarnessConfig::from_json_str(r#"{ "axis_pairs": [["y", "x"]] }"#)
            .unwrap()
            .fixture()
            .unwrap_err();
        assert!(matches!(err, HarnessError::Config(_)), "{err}");

        let err = HarnessConfig::from_json_str(
            r#"{ "y_positions": [{ "ref": "figure", "values": [0, 1], "size": 1, "pixel": 1 }] }"#,
        )
        .unwrap()
        .fixture()
        .unwrap_err();
        assert!(
            matches!(
                &err,
                HarnessError::Ref(RefError::UnsupportedReference(s)) if s == "figure"
            ),
            "{err}"
        );

        let err = HarnessConfig::from_json_str(
            r#"{ "plot": { "width": 10, "height": 10,
                 "axes": { "x": { "range": [0, 1], "domain": [0, 1], "type": "log" } } } }"#,
        )
        .unwrap()
        .plot_geometry()
        .unwrap_err();
        assert!(matches!(err, HarnessError::Config(_)), "{err}");

        let err = HarnessConfig::from_json_str(r#"{ "kinds": ["legend"] }"#)
            .unwrap()
            .kinds()
            .unwrap_err();
        assert!(matches!(err, HarnessError::Ref(_)), "{err}");

        assert!(matches!(
            HarnessConfig::from_json_str(r#"{ "tolerance": -1 }"#),
            Err(HarnessError::Config(_))
        ));
        assert!(matches!(
            HarnessConfig::from_json_str(r#"{ "tolerence": 1 }"#),
            Err(HarnessError::Json(_))
        ));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = HarnessConfig::from_path("/nonexistent/aro-harness.json").unwrap_err();
        assert!(matches!(err, HarnessError::Io { .. }), "{err}");
    }
}
