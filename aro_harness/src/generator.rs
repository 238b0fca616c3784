// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Lazy, deterministic enumeration of test cases.

use aro_geom::{AroKind, RefKind};

use crate::case::{CaseVariant, TestCase};
use crate::fixture::Fixture;

/// Iterates the cross product of a [`Fixture`]'s value lists.
///
/// Cases are decoded from a running index in mixed radix, so nothing is
/// materialized up front and the order is the same on every run. The variant
/// is the slowest-varying digit, followed by axis pair, x type, y type, x
/// position and y position.
#[derive(Clone, Debug)]
pub struct CaseGenerator<'a> {
    fixture: &'a Fixture,
    variants: Vec<CaseVariant>,
    cursor: usize,
    total: usize,
    emitted: usize,
}

impl<'a> CaseGenerator<'a> {
    /// Creates a generator over every object kind.
    pub fn new(fixture: &'a Fixture) -> Self {
        let variants = variants(fixture, &AroKind::ALL);
        Self::with_variants(fixture, variants)
    }

    /// Restricts generation to the given object kinds.
    #[must_use]
    pub fn with_kinds(self, kinds: &[AroKind]) -> Self {
        let variants = variants(self.fixture, kinds);
        Self::with_variants(self.fixture, variants)
    }

    fn with_variants(fixture: &'a Fixture, variants: Vec<CaseVariant>) -> Self {
        let total = variants.len()
            * fixture.axis_pairs.len()
            * fixture.axis_types.len()
            * fixture.axis_types.len()
            * fixture.x_positions.len()
            * fixture.y_positions.len();
        Self {
            fixture,
            variants,
            cursor: 0,
            total,
            emitted: 0,
        }
    }

    /// The number of raw combinations, before paper deduplication.
    pub fn raw_len(&self) -> usize {
        self.total
    }

    fn decode(&self, mut i: usize) -> TestCase {
        let f = self.fixture;
        let types = f.axis_types.len();
        let y_pos = i % f.y_positions.len();
        i /= f.y_positions.len();
        let x_pos = i % f.x_positions.len();
        i /= f.x_positions.len();
        let y_type = i % types;
        i /= types;
        let x_type = i % types;
        i /= types;
        let pair = i % f.axis_pairs.len();
        i /= f.axis_pairs.len();
        let variant = self.variants[i];

        let (x_axis, y_axis) = f.axis_pairs[pair];
        TestCase {
            index: self.emitted,
            x_axis,
            y_axis,
            x_type: f.axis_types[x_type],
            y_type: f.axis_types[y_type],
            x_position: f.x_positions[x_pos],
            y_position: f.y_positions[y_pos],
            variant,
        }
    }

    /// Whether a case only repeats another in a paper-referenced letter.
    ///
    /// Paper placement ignores the axis and its type, so only the first axis
    /// type and the first pair's axis are kept for a paper coordinate.
    fn is_paper_duplicate(&self, case: &TestCase) -> bool {
        let f = self.fixture;
        let (Some(&(first_x, first_y)), Some(&first_type)) =
            (f.axis_pairs.first(), f.axis_types.first())
        else {
            return false;
        };
        let x_dup = case.x_position.kind == RefKind::Paper
            && (case.x_axis != first_x || case.x_type != first_type);
        let y_dup = case.y_position.kind == RefKind::Paper
            && (case.y_axis != first_y || case.y_type != first_type);
        x_dup || y_dup
    }
}

impl Iterator for CaseGenerator<'_> {
    type Item = TestCase;

    fn next(&mut self) -> Option<Self::Item> {
        while self.cursor < self.total {
            let case = self.decode(self.cursor);
            self.cursor += 1;
            if self.fixture.dedupe_paper && self.is_paper_duplicate(&case) {
                continue;
            }
            self.emitted += 1;
            return Some(case);
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.total - self.cursor;
        if self.fixture.dedupe_paper {
            (0, Some(remaining))
        } else {
            (remaining, Some(remaining))
        }
    }
}

impl Fixture {
    /// Every case this fixture describes, in generation order.
    pub fn cases(&self) -> CaseGenerator<'_> {
        CaseGenerator::new(self)
    }
}

fn variants(fixture: &Fixture, kinds: &[AroKind]) -> Vec<CaseVariant> {
    let mut out = Vec::new();
    for kind in AroKind::ALL {
        if !kinds.contains(&kind) {
            continue;
        }
        match kind {
            AroKind::Shape => {
                out.extend(fixture.shape_kinds.iter().copied().map(CaseVariant::Shape));
            }
            AroKind::Annotation => {
                out.extend(
                    fixture
                        .arrow_modes
                        .iter()
                        .map(|&(x, y)| CaseVariant::Annotation { x, y }),
                );
            }
            AroKind::Image => {
                for &x_anchor in &fixture.x_anchors {
                    for &y_anchor in &fixture.y_anchors {
                        out.push(CaseVariant::Image { x_anchor, y_anchor });
                    }
                }
            }
        }
    }
    out
}
