// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Text measurement for annotation boxes.

use kurbo::{Point, Rect, Size};

/// Measures annotation text so the scene can size its text box.
///
/// The harness never sees the text box directly; it only has to be the same
/// size for both annotations of a case.
pub trait TextMeasurer {
    /// Returns the size of `text` in pixels.
    fn measure(&self, text: &str, font_size: f64) -> Size;
}

/// Assumes an average glyph width of 0.6em and a line height of 1em.
#[derive(Clone, Copy, Debug, Default)]
pub struct HeuristicTextMeasurer;

impl TextMeasurer for HeuristicTextMeasurer {
    fn measure(&self, text: &str, font_size: f64) -> Size {
        Size::new(0.6 * font_size * text.chars().count() as f64, font_size)
    }
}

/// The padded box of `text` centred on `center`.
pub(crate) fn text_box(
    measurer: &dyn TextMeasurer,
    text: &str,
    font_size: f64,
    padding: f64,
    center: Point,
) -> Rect {
    let size = measurer.measure(text, font_size);
    Rect::from_center_size(
        center,
        (size.width + 2.0 * padding, size.height + 2.0 * padding),
    )
}
