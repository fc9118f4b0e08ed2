//! Errors raised while decoding, and their diagnostic categories.

use core::fmt;

use thiserror::Error;

/// An error decoding a substructure.
///
/// Errors never cross a group boundary: [`crate::reader::Reader::group`]
/// turns them into a [`crate::sink::Diagnostic`] and decoding resumes with
/// the next sibling.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A read needed more bytes than remain in the region.
    #[error("Truncated: {requested} bytes requested, {available} available.")]
    Truncated { requested: usize, available: usize },
    /// A declared length violates the structure's length rule.
    #[error("Invalid length ({found}), expected {expected}.")]
    LengthInvalid { found: usize, expected: LengthRule },
    /// An attribute identifier with no decoder.
    #[error("Unknown attribute ID ({0}).")]
    UnknownAttributeId(u8),
    /// An operating class with no channel table row.
    #[error("Unknown operating class ({0}).")]
    UnknownOperatingClass(u8),
    /// A beacon interval matching neither discovery nor sync beacons.
    #[error("Unknown beacon type (interval {0}).")]
    UnknownBeaconType(u16),
}

impl Error {
    /// The diagnostic category this error reports under.
    pub fn kind(&self) -> DiagnosticKind {
        match self {
            Self::Truncated { .. } | Self::LengthInvalid { .. } => DiagnosticKind::MalformedLength,
            Self::UnknownAttributeId(_) => DiagnosticKind::UnknownAttributeId,
            Self::UnknownOperatingClass(_) => DiagnosticKind::UnknownOperatingClass,
            Self::UnknownBeaconType(_) => DiagnosticKind::UnknownBeaconType,
        }
    }

    /// Check a declared length against a rule.
    pub fn check(found: usize, expected: LengthRule) -> Result<(), Self> {
        if expected.accepts(found) {
            Ok(())
        } else {
            Err(Self::LengthInvalid { found, expected })
        }
    }
}

/// A length constraint on a structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LengthRule {
    Exact(usize),
    AtLeast(usize),
    /// A non-zero multiple of the record size.
    MultipleOf(usize),
}

impl LengthRule {
    pub fn accepts(self, found: usize) -> bool {
        match self {
            Self::Exact(n) => found == n,
            Self::AtLeast(n) => found >= n,
            Self::MultipleOf(n) => found != 0 && found % n == 0,
        }
    }
}

impl fmt::Display for LengthRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact(n) => write!(f, "exactly {n}"),
            Self::AtLeast(n) => write!(f, "at least {n}"),
            Self::MultipleOf(n) => write!(f, "a multiple of {n}"),
        }
    }
}

/// Diagnostic categories reported to a sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticKind {
    MalformedLength,
    UnknownAttributeId,
    UnknownOperatingClass,
    UnknownBeaconType,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn length_rules() {
        assert!(LengthRule::Exact(9).accepts(9));
        assert!(!LengthRule::Exact(9).accepts(10));
        assert!(LengthRule::AtLeast(9).accepts(12));
        assert!(!LengthRule::AtLeast(9).accepts(5));
        assert!(LengthRule::MultipleOf(6).accepts(12));
        assert!(!LengthRule::MultipleOf(6).accepts(13));
        assert!(!LengthRule::MultipleOf(6).accepts(0));
    }

    #[test]
    fn kinds() {
        let e = Error::Truncated { requested: 4, available: 1 };
        assert_eq!(e.kind(), DiagnosticKind::MalformedLength);
        assert_eq!(Error::UnknownOperatingClass(3).kind(), DiagnosticKind::UnknownOperatingClass);
    }
}
