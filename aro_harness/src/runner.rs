// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Runs cases against a surface and collects outcomes.

use core::fmt;

use aro_geom::{
    ArrowReconciliation, BoundingBox, CoordinateMapper, EQUALITY_TOLERANCE, PlotGeometry,
    annotation_anchor, arrow_delta, image_bbox, shape_bbox,
};
use kurbo::{Point, Vec2};
use peniko::Color;

use crate::case::{ANNOTATION_COLORS, ARROW_RATIO, CaseVariant, TestCase};
use crate::config::HarnessConfig;
use crate::error::HarnessError;
use crate::surface::{ElementId, Layout, RenderSurface};

/// Expected and observed geometry that disagree beyond the tolerance.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Mismatch {
    /// A shape or image box.
    BoundingBox {
        /// What the mapper predicts.
        expected: BoundingBox,
        /// What the surface reports.
        observed: BoundingBox,
    },
    /// An annotation arrow.
    Arrow {
        /// Predicted head and head-to-tail delta.
        expected: ArrowReconciliation,
        /// Delta solved from the two rendered arrows.
        solved_delta: Vec2,
        /// Head corner of the shorter rendered arrow.
        head: Point,
    },
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BoundingBox { expected, observed } => write!(
                f,
                "expected box ({:.2}, {:.2}, {:.2}x{:.2}), observed ({:.2}, {:.2}, {:.2}x{:.2})",
                expected.x,
                expected.y,
                expected.width,
                expected.height,
                observed.x,
                observed.y,
                observed.width,
                observed.height,
            ),
            Self::Arrow {
                expected,
                solved_delta,
                head,
            } => write!(
                f,
                "expected arrow from ({:.2}, {:.2}) by ({:.2}, {:.2}), \
                 observed from ({:.2}, {:.2}) by ({:.2}, {:.2})",
                expected.head.x,
                expected.head.y,
                expected.delta.x,
                expected.delta.y,
                head.x,
                head.y,
                solved_delta.x,
                solved_delta.y,
            ),
        }
    }
}

/// What happened to one case.
#[derive(Debug)]
pub enum CaseOutcome {
    /// Geometry matched.
    Pass,
    /// Geometry disagreed.
    Mismatch(Mismatch),
    /// The case could not be evaluated.
    Fault(HarnessError),
}

impl CaseOutcome {
    /// Whether the case passed.
    pub fn is_pass(&self) -> bool {
        matches!(self, Self::Pass)
    }
}

/// A case and its outcome.
#[derive(Debug)]
pub struct CaseResult {
    /// The case that ran.
    pub case: TestCase,
    /// Its outcome.
    pub outcome: CaseOutcome,
}

impl fmt::Display for CaseResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.outcome {
            CaseOutcome::Pass => write!(f, "{}: ok", self.case),
            CaseOutcome::Mismatch(m) => write!(f, "{}: {m}", self.case),
            CaseOutcome::Fault(e) => write!(f, "{}: fault: {e}", self.case),
        }
    }
}

/// Counts of every outcome plus the failing cases.
#[derive(Debug, Default)]
pub struct RunReport {
    /// Cases that matched.
    pub passed: usize,
    /// Cases whose geometry disagreed.
    pub mismatched: usize,
    /// Cases that could not be evaluated.
    pub faulted: usize,
    /// Every non-passing result, in run order.
    pub failures: Vec<CaseResult>,
}

impl RunReport {
    /// Total number of cases run.
    pub fn total(&self) -> usize {
        self.passed + self.mismatched + self.faulted
    }

    /// Whether every case passed.
    pub fn is_success(&self) -> bool {
        self.mismatched == 0 && self.faulted == 0
    }

    fn record(&mut self, result: CaseResult) {
        match result.outcome {
            CaseOutcome::Pass => self.passed += 1,
            CaseOutcome::Mismatch(_) => {
                self.mismatched += 1;
                self.failures.push(result);
            }
            CaseOutcome::Fault(_) => {
                self.faulted += 1;
                self.failures.push(result);
            }
        }
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} cases: {} passed, {} mismatched, {} faulted",
            self.total(),
            self.passed,
            self.mismatched,
            self.faulted
        )?;
        for failure in &self.failures {
            writeln!(f, "  {failure}")?;
        }
        Ok(())
    }
}

/// Where an expected box is found on the surface.
#[derive(Clone, Copy, Debug)]
enum Locator {
    Stroke(Color),
    FirstImage,
}

#[derive(Clone, Copy, Debug)]
enum Expected {
    Box {
        bbox: BoundingBox,
        locator: Locator,
        label: &'static str,
    },
    Arrow(ArrowReconciliation),
}

/// Drives a [`RenderSurface`] through a sequence of cases.
///
/// Every case starts from a fresh copy of the base geometry, so nothing
/// leaks between cases except what the surface itself retains.
#[derive(Debug)]
pub struct Runner<S> {
    surface: S,
    base: PlotGeometry,
    tolerance: f64,
    debug: bool,
}

impl<S: RenderSurface> Runner<S> {
    /// Creates a runner with the default tolerance.
    pub fn new(surface: S, base: PlotGeometry) -> Self {
        Self {
            surface,
            base,
            tolerance: EQUALITY_TOLERANCE,
            debug: false,
        }
    }

    /// Creates a runner from a configuration's plot, tolerance and debug flag.
    pub fn from_config(surface: S, config: &HarnessConfig) -> Result<Self, HarnessError> {
        Ok(Self::new(surface, config.plot_geometry()?)
            .with_tolerance(config.tolerance)
            .with_debug(config.debug))
    }

    /// Sets the pixel tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Logs the geometry of passing cases as well as failing ones.
    #[must_use]
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// The surface.
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Runs every case and summarizes.
    pub fn run_all(&mut self, cases: impl IntoIterator<Item = TestCase>) -> RunReport {
        let mut report = RunReport::default();
        for case in cases {
            report.record(self.run_case(&case));
        }
        tracing::info!(
            total = report.total(),
            passed = report.passed,
            mismatched = report.mismatched,
            faulted = report.faulted,
            "run finished"
        );
        report
    }

    /// Runs one case. Faults are captured in the outcome.
    pub fn run_case(&mut self, case: &TestCase) -> CaseResult {
        let outcome = match self.evaluate(case) {
            Ok(None) => {
                if self.debug {
                    tracing::info!(index = case.index, %case, "pass");
                } else {
                    tracing::debug!(index = case.index, "pass");
                }
                CaseOutcome::Pass
            }
            Ok(Some(mismatch)) => {
                tracing::warn!(index = case.index, %case, %mismatch, "geometry mismatch");
                CaseOutcome::Mismatch(mismatch)
            }
            Err(err) => {
                tracing::warn!(index = case.index, %case, %err, "case fault");
                CaseOutcome::Fault(err)
            }
        };
        CaseResult {
            case: *case,
            outcome,
        }
    }

    fn evaluate(&mut self, case: &TestCase) -> Result<Option<Mismatch>, HarnessError> {
        let geometry = case.geometry(&self.base);
        let expected = expectation(case, &geometry)?;
        let layout = Layout::new(geometry.clone()).with_objects(case.objects(&geometry));
        self.surface.relayout(&layout)?;

        match expected {
            Expected::Box {
                bbox,
                locator,
                label,
            } => {
                let element = match locator {
                    Locator::Stroke(color) => self.surface.find_by_stroke(color),
                    Locator::FirstImage => self.surface.first_image(),
                };
                let observed = self.observe(element, label)?;
                tracing::debug!(index = case.index, ?bbox, ?observed, "box");
                Ok((!bbox.approx_eq(&observed, self.tolerance))
                    .then_some(Mismatch::BoundingBox {
                        expected: bbox,
                        observed,
                    }))
            }
            Expected::Arrow(rec) => {
                let short = self.surface.find_by_stroke(ANNOTATION_COLORS[0]);
                let short = self.observe(short, "annotation arrow")?;
                let long = self.surface.find_by_stroke(ANNOTATION_COLORS[1]);
                let long = self.observe(long, "long annotation arrow")?;
                let solved_delta = rec.solve(short, long);
                let head = rec.head_corner(short);
                tracing::debug!(
                    index = case.index,
                    expected = ?rec,
                    ?solved_delta,
                    ?head,
                    "arrow"
                );
                Ok((!rec.check(short, long, self.tolerance)).then_some(Mismatch::Arrow {
                    expected: rec,
                    solved_delta,
                    head,
                }))
            }
        }
    }

    fn observe(
        &self,
        element: Option<ElementId>,
        label: &str,
    ) -> Result<BoundingBox, HarnessError> {
        element
            .and_then(|id| self.surface.screen_bbox(id))
            .ok_or_else(|| HarnessError::MissingElement(label.to_string()))
    }
}

fn expectation(case: &TestCase, geometry: &PlotGeometry) -> Result<Expected, HarnessError> {
    let mapper = CoordinateMapper::new(geometry);
    Ok(match case.variant {
        CaseVariant::Shape(kind) => {
            let shape = case.shape(kind);
            Expected::Box {
                bbox: shape_bbox(&mapper, &shape)?,
                locator: Locator::Stroke(shape.color),
                label: "shape",
            }
        }
        CaseVariant::Annotation { x, y } => {
            let [short, _] = case.annotations(geometry, x, y);
            Expected::Arrow(ArrowReconciliation {
                head: annotation_anchor(&mapper, &short)?,
                delta: arrow_delta(&mapper, &short)?,
                k: ARROW_RATIO,
            })
        }
        CaseVariant::Image { x_anchor, y_anchor } => Expected::Box {
            bbox: image_bbox(&mapper, &case.image(x_anchor, y_anchor))?,
            locator: Locator::FirstImage,
            label: "image",
        },
    })
}

#[cfg(test)]
mod tests {
    use aro_geom::{AroKind, MapError, RefKind};
    use kurbo::Rect;

    use super::*;
    use crate::fixture::{Fixture, RefPosition, base_geometry};
    use crate::surface::SurfaceError;

    /// Draws every object exactly where the mapper says, clipping each arrow
    /// by a fixed amount at its tail like a text box would.
    #[derive(Default)]
    struct IdealSurface {
        elements: Vec<(Option<Color>, BoundingBox)>,
        shape_offset: f64,
        fail_relayout: bool,
        hide_images: bool,
    }

    impl RenderSurface for IdealSurface {
        fn relayout(&mut self, layout: &Layout) -> Result<(), SurfaceError> {
            if self.fail_relayout {
                return Err(SurfaceError::Placement {
                    object: "everything".into(),
                    reason: "surface is broken".into(),
                });
            }
            let map = |e: MapError| SurfaceError::Placement {
                object: "object".into(),
                reason: e.to_string(),
            };
            let mapper = CoordinateMapper::new(&layout.geometry);
            self.elements.clear();
            for shape in &layout.shapes {
                let mut b = shape_bbox(&mapper, shape).map_err(map)?;
                b.x += self.shape_offset;
                self.elements.push((Some(shape.color), b));
            }
            for a in &layout.annotations {
                let head = annotation_anchor(&mapper, a).map_err(map)?;
                let delta = arrow_delta(&mapper, a).map_err(map)?;
                let clip = Vec2::new(4.0 * delta.x.signum(), 4.0 * delta.y.signum());
                let rect = Rect::from_points(head, head + delta - clip);
                self.elements.push((Some(a.color), rect.into()));
            }
            if !self.hide_images {
                for image in &layout.images {
                    let b = image_bbox(&mapper, image).map_err(map)?;
                    self.elements.push((None, b));
                }
            }
            Ok(())
        }

        fn find_by_stroke(&self, color: Color) -> Option<ElementId> {
            self.elements
                .iter()
                .position(|(c, _)| *c == Some(color))
                .map(|i| ElementId(i as u32))
        }

        fn first_image(&self) -> Option<ElementId> {
            self.elements
                .iter()
                .position(|(c, _)| c.is_none())
                .map(|i| ElementId(i as u32))
        }

        fn screen_bbox(&self, element: ElementId) -> Option<BoundingBox> {
            self.elements.get(element.0 as usize).map(|(_, b)| *b)
        }
    }

    #[test]
    fn ideal_surface_passes_every_case() {
        let fixture = Fixture::default();
        let mut runner = Runner::new(IdealSurface::default(), base_geometry());
        let report = runner.run_all(fixture.cases());
        assert!(report.is_success(), "{report}");
        assert_eq!(report.total(), fixture.cases().count());
    }

    #[test]
    fn shifted_shapes_are_mismatches() {
        let fixture = Fixture::default();
        let surface = IdealSurface {
            shape_offset: 1.0,
            ..IdealSurface::default()
        };
        let mut runner = Runner::new(surface, base_geometry());
        let report = runner.run_all(fixture.cases().with_kinds(&[AroKind::Shape]));
        assert_eq!(report.passed, 0, "{report}");
        assert_eq!(report.mismatched, report.total());
        let Some(CaseResult {
            outcome: CaseOutcome::Mismatch(Mismatch::BoundingBox { expected, observed }),
            ..
        }) = report.failures.first()
        else {
            panic!("expected a box mismatch: {report}");
        };
        assert!((observed.x - expected.x - 1.0).abs() < 1e-9);

        // Well within a looser tolerance.
        let mut runner = runner.with_tolerance(2.0);
        let report = runner.run_all(fixture.cases().with_kinds(&[AroKind::Shape]));
        assert!(report.is_success(), "{report}");
    }

    #[test]
    fn faults_are_recorded_and_the_run_continues() {
        let fixture = Fixture::default();
        let surface = IdealSurface {
            hide_images: true,
            ..IdealSurface::default()
        };
        let mut runner = Runner::new(surface, base_geometry());
        let report = runner.run_all(fixture.cases());
        let images = fixture.cases().with_kinds(&[AroKind::Image]).count();
        assert_eq!(report.faulted, images);
        assert_eq!(report.passed, report.total() - images);
        assert!(report.failures.iter().all(|r| matches!(
            &r.outcome,
            CaseOutcome::Fault(HarnessError::MissingElement(label)) if label == "image"
        )));
    }

    #[test]
    fn surface_errors_become_faults() {
        let surface = IdealSurface {
            fail_relayout: true,
            ..IdealSurface::default()
        };
        let fixture = Fixture::default();
        let mut runner = Runner::new(surface, base_geometry());
        let result = runner.run_case(&fixture.cases().next().unwrap());
        assert!(
            matches!(result.outcome, CaseOutcome::Fault(HarnessError::Surface(_))),
            "{result}"
        );
    }

    #[test]
    fn non_positive_log_values_fault_before_layout() {
        let fixture = Fixture {
            x_positions: vec![RefPosition::new(RefKind::Range, (-1.0, 3.0), 1.0, 50.0)],
            ..Fixture::default()
        };
        let mut runner = Runner::new(IdealSurface::default(), base_geometry());
        let report = runner.run_all(fixture.cases().with_kinds(&[AroKind::Shape]));
        assert!(report.faulted > 0, "{report}");
        assert!(report.failures.iter().all(|r| {
            r.case.x_type == aro_geom::AxisType::Log
                && matches!(
                    r.outcome,
                    CaseOutcome::Fault(HarnessError::Map(MapError::NonPositiveLog { .. }))
                )
        }));
        assert_eq!(report.passed + report.faulted, report.total());
    }

    #[test]
    fn report_lists_failures() {
        let surface = IdealSurface {
            shape_offset: 5.0,
            ..IdealSurface::default()
        };
        let fixture = Fixture::default();
        let mut runner = Runner::new(surface, base_geometry());
        let report = runner.run_all(fixture.cases().with_kinds(&[AroKind::Shape]).take(1));
        let text = report.to_string();
        assert!(text.starts_with("1 cases: 0 passed, 1 mismatched, 0 faulted"), "{text}");
        assert!(text.contains("#0 should draw a line shape"), "{text}");
    }
}
