// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Axis references.
//!
//! A reference string such as `"x2"`, `"y domain"` or `"paper"` is parsed once
//! into an [`AxisRef`]. Everything downstream matches on the variant; nothing
//! re-inspects the string.

use alloc::string::{String, ToString};
use core::fmt;
use core::str::FromStr;

/// Errors raised while parsing references, anchors and axis types.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RefError {
    /// The text is not a known reference (or reference kind).
    #[error("unsupported reference: {0:?}")]
    UnsupportedReference(String),
    /// The text is not a valid anchor for the given axis letter.
    #[error("unsupported {letter} anchor: {value:?}")]
    UnsupportedAnchor {
        /// The axis letter the anchor was parsed for.
        letter: AxisLetter,
        /// The offending text.
        value: String,
    },
    /// The text is neither `linear` nor `log`.
    #[error("unsupported axis type: {0:?}")]
    UnsupportedAxisType(String),
    /// The text is not `shape`, `annotation` or `image`.
    #[error("unsupported object kind: {0:?}")]
    UnsupportedObjectKind(String),
}

/// The two axis letters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AxisLetter {
    /// Horizontal.
    X,
    /// Vertical.
    Y,
}

impl AxisLetter {
    /// Returns the lowercase letter used in reference strings.
    pub fn as_char(self) -> char {
        match self {
            Self::X => 'x',
            Self::Y => 'y',
        }
    }
}

impl fmt::Display for AxisLetter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Identifies one data axis, e.g. `x`, `x2` or `y3`.
///
/// The first axis of each letter has index 1 and is written without a number.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AxisId {
    letter: AxisLetter,
    index: u16,
}

impl AxisId {
    /// The primary x axis (`x`).
    pub const X: Self = Self {
        letter: AxisLetter::X,
        index: 1,
    };
    /// The primary y axis (`y`).
    pub const Y: Self = Self {
        letter: AxisLetter::Y,
        index: 1,
    };
    /// The secondary x axis (`x2`).
    pub const X2: Self = Self {
        letter: AxisLetter::X,
        index: 2,
    };
    /// The secondary y axis (`y2`).
    pub const Y2: Self = Self {
        letter: AxisLetter::Y,
        index: 2,
    };

    /// Creates an axis id. Returns `None` for index 0.
    pub fn new(letter: AxisLetter, index: u16) -> Option<Self> {
        (index >= 1).then_some(Self { letter, index })
    }

    /// Returns the axis letter.
    pub fn letter(self) -> AxisLetter {
        self.letter
    }
}

impl fmt::Display for AxisId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.index == 1 {
            write!(f, "{}", self.letter)
        } else {
            write!(f, "{}{}", self.letter, self.index)
        }
    }
}

impl FromStr for AxisId {
    type Err = RefError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unsupported = || RefError::UnsupportedReference(s.to_string());
        let mut chars = s.chars();
        let letter = match chars.next() {
            Some('x') => AxisLetter::X,
            Some('y') => AxisLetter::Y,
            _ => return Err(unsupported()),
        };
        let digits = chars.as_str();
        if digits.is_empty() {
            return Ok(Self { letter, index: 1 });
        }
        // `x1` and `x02` would alias `x` and `x2`.
        if digits.starts_with('0') || digits == "1" || !digits.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(unsupported());
        }
        let index: u16 = digits.parse().map_err(|_| unsupported())?;
        Ok(Self { letter, index })
    }
}

/// What a coordinate value is measured against.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RefKind {
    /// Native data units of an axis.
    Range,
    /// Fraction (0–1) of an axis's plotted span.
    Domain,
    /// Fraction (0–1) of the paper.
    Paper,
}

impl RefKind {
    /// All kinds, in fixture order.
    pub const ALL: [Self; 3] = [Self::Range, Self::Domain, Self::Paper];

    /// Returns the lowercase name of the kind.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Range => "range",
            Self::Domain => "domain",
            Self::Paper => "paper",
        }
    }
}

impl fmt::Display for RefKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RefKind {
    type Err = RefError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "range" => Ok(Self::Range),
            "domain" => Ok(Self::Domain),
            "paper" => Ok(Self::Paper),
            _ => Err(RefError::UnsupportedReference(s.to_string())),
        }
    }
}

/// A parsed coordinate reference.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AxisRef {
    /// Data units of the given axis (`"x2"`).
    Range(AxisId),
    /// Fraction of the given axis's domain (`"x2 domain"`).
    Domain(AxisId),
    /// Fraction of the paper (`"paper"`).
    Paper,
}

impl AxisRef {
    /// Builds a reference to `axis` of the given kind.
    ///
    /// `Paper` ignores the axis.
    pub fn from_kind(axis: AxisId, kind: RefKind) -> Self {
        match kind {
            RefKind::Range => Self::Range(axis),
            RefKind::Domain => Self::Domain(axis),
            RefKind::Paper => Self::Paper,
        }
    }

    /// Like [`AxisRef::from_kind`], but takes the kind as text.
    pub fn from_kind_str(axis: AxisId, kind: &str) -> Result<Self, RefError> {
        kind.parse().map(|kind| Self::from_kind(axis, kind))
    }

    /// Returns the reference kind.
    pub fn kind(self) -> RefKind {
        match self {
            Self::Range(_) => RefKind::Range,
            Self::Domain(_) => RefKind::Domain,
            Self::Paper => RefKind::Paper,
        }
    }

    /// Returns the referenced axis, if any.
    pub fn axis(self) -> Option<AxisId> {
        match self {
            Self::Range(id) | Self::Domain(id) => Some(id),
            Self::Paper => None,
        }
    }
}

impl fmt::Display for AxisRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Range(id) => write!(f, "{id}"),
            Self::Domain(id) => write!(f, "{id} domain"),
            Self::Paper => f.write_str("paper"),
        }
    }
}

impl FromStr for AxisRef {
    type Err = RefError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "paper" {
            return Ok(Self::Paper);
        }
        let unsupported = |_| RefError::UnsupportedReference(s.to_string());
        match s.split_once(' ') {
            None => s.parse().map(Self::Range).map_err(unsupported),
            Some((id, "domain")) => id.parse().map(Self::Domain).map_err(unsupported),
            Some(_) => Err(RefError::UnsupportedReference(s.to_string())),
        }
    }
}

/// The reference of an annotation arrow tail.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ArrowRef {
    /// The tail is a pixel offset from the head.
    Pixel,
    /// The tail is a coordinate in the given reference.
    Axis(AxisRef),
}

impl ArrowRef {
    /// Returns the reference kind, or `None` for pixel offsets.
    pub fn kind(self) -> Option<RefKind> {
        match self {
            Self::Pixel => None,
            Self::Axis(r) => Some(r.kind()),
        }
    }
}

impl From<AxisRef> for ArrowRef {
    fn from(value: AxisRef) -> Self {
        Self::Axis(value)
    }
}

impl fmt::Display for ArrowRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pixel => f.write_str("pixel"),
            Self::Axis(r) => write!(f, "{r}"),
        }
    }
}

impl FromStr for ArrowRef {
    type Err = RefError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "pixel" {
            Ok(Self::Pixel)
        } else {
            s.parse().map(Self::Axis)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_and_prints_the_conventional_strings() {
        for s in ["x", "y", "x2", "y13", "x2 domain", "y domain", "paper"] {
            let r: AxisRef = s.parse().expect("valid reference");
            assert_eq!(r.to_string(), s, "round trip of {s:?}");
        }
    }

    #[test]
    fn classifies_kinds() {
        let r: AxisRef = "x2 domain".parse().unwrap();
        assert_eq!(r.kind(), RefKind::Domain);
        assert_eq!(r.axis(), AxisId::new(AxisLetter::X, 2));
        assert_eq!("paper".parse::<AxisRef>().unwrap().axis(), None);
        assert_eq!("y".parse::<AxisRef>().unwrap().kind(), RefKind::Range);
    }

    #[test]
    fn rejects_unknown_references() {
        for s in ["", "z", "x1", "x0", "x02", "x2 domian", "x domain extra", "Paper", "x-2"] {
            assert_eq!(
                s.parse::<AxisRef>(),
                Err(RefError::UnsupportedReference(s.to_string())),
                "{s:?} should be rejected",
            );
        }
    }

    #[test]
    fn building_from_an_unknown_kind_fails_with_the_kind() {
        let err = AxisRef::from_kind_str(AxisId::X, "pixels").unwrap_err();
        assert_eq!(err, RefError::UnsupportedReference("pixels".to_string()));
        assert_eq!(
            AxisRef::from_kind_str(AxisId::Y, "paper"),
            Ok(AxisRef::Paper)
        );
    }

    #[test]
    fn arrow_refs_accept_pixel() {
        assert_eq!("pixel".parse::<ArrowRef>(), Ok(ArrowRef::Pixel));
        assert_eq!(
            "y domain".parse::<ArrowRef>().unwrap().kind(),
            Some(RefKind::Domain)
        );
        assert_eq!(ArrowRef::Pixel.kind(), None);
    }
}
