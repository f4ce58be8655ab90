//! Quay identifier types.

use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Prefix shared by every National Stop Register quay id.
pub const QUAY_PREFIX: &str = "NSR:Quay:";

/// Error returned when parsing an invalid quay id.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid quay id: {reason}")]
pub struct InvalidQuayId {
    reason: &'static str,
}

/// Identifier of a physical stop or platform.
///
/// Ids read from data files are kept verbatim, so a `QuayId` built with
/// [`QuayId::new`] is opaque. [`QuayId::parse`] additionally checks the
/// `NSR:Quay:<digits>` shape and is meant for user input.
///
/// # Examples
///
/// ```
/// use trip_server::domain::QuayId;
///
/// let id = QuayId::parse("NSR:Quay:7788").unwrap();
/// assert_eq!(id.as_str(), "NSR:Quay:7788");
///
/// assert!(QuayId::parse("NSR:Quay:").is_err());
/// assert!(QuayId::parse("NSR:StopPlace:12").is_err());
///
/// // Bare numbers are expanded
/// assert_eq!(QuayId::normalize(" 7788 ").as_str(), "NSR:Quay:7788");
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuayId(String);

impl QuayId {
    /// Wrap an id without validation.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Parse a strictly formatted `NSR:Quay:<digits>` id.
    pub fn parse(s: &str) -> Result<Self, InvalidQuayId> {
        let digits = s.strip_prefix(QUAY_PREFIX).ok_or(InvalidQuayId {
            reason: "must start with NSR:Quay:",
        })?;

        if digits.is_empty() {
            return Err(InvalidQuayId {
                reason: "missing numeric suffix",
            });
        }

        if !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(InvalidQuayId {
                reason: "suffix must be ASCII digits",
            });
        }

        Ok(Self(s.to_string()))
    }

    /// Normalize free-form id input.
    ///
    /// Trims whitespace and expands a bare number to a full quay id.
    /// Anything else is kept as typed.
    pub fn normalize(input: &str) -> Self {
        let trimmed = input.trim();
        if !trimmed.is_empty() && trimmed.bytes().all(|b| b.is_ascii_digit()) {
            Self(format!("{QUAY_PREFIX}{trimmed}"))
        } else {
            Self(trimmed.to_string())
        }
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for QuayId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for QuayId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "QuayId({})", self.0)
    }
}

impl fmt::Display for QuayId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for QuayId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_valid() {
        let id = QuayId::parse("NSR:Quay:101").unwrap();
        assert_eq!(id.as_str(), "NSR:Quay:101");
        assert_eq!(id.to_string(), "NSR:Quay:101");
    }

    #[test]
    fn parse_rejects_wrong_prefix() {
        assert!(QuayId::parse("NSR:StopPlace:101").is_err());
        assert!(QuayId::parse("nsr:quay:101").is_err());
        assert!(QuayId::parse("101").is_err());
    }

    #[test]
    fn parse_rejects_bad_suffix() {
        assert!(QuayId::parse("NSR:Quay:").is_err());
        assert!(QuayId::parse("NSR:Quay:12a").is_err());
        assert!(QuayId::parse("NSR:Quay: 12").is_err());
    }

    #[test]
    fn normalize_expands_digits() {
        assert_eq!(QuayId::normalize("42").as_str(), "NSR:Quay:42");
        assert_eq!(QuayId::normalize("  42\n").as_str(), "NSR:Quay:42");
    }

    #[test]
    fn normalize_keeps_other_input() {
        assert_eq!(
            QuayId::normalize(" NSR:Quay:42 ").as_str(),
            "NSR:Quay:42"
        );
        assert_eq!(QuayId::normalize("Halden").as_str(), "Halden");
        assert_eq!(QuayId::normalize("").as_str(), "");
    }

    #[test]
    fn debug_format() {
        let id = QuayId::new("NSR:Quay:7");
        assert_eq!(format!("{:?}", id), "QuayId(NSR:Quay:7)");
    }

    #[test]
    fn error_display() {
        let err = QuayId::parse("X").unwrap_err();
        assert_eq!(err.to_string(), "invalid quay id: must start with NSR:Quay:");
    }
}
