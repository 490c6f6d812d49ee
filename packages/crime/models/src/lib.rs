#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Crime type taxonomy, severity definitions, and the shared marker palette.
//!
//! This crate defines the canonical crime type labels used across the
//! aggregation pipeline, plus the single process-wide category→color table
//! consumed by cluster markers, legends, and search results. The palette is
//! constructed once as `const` data and never mutated.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Marker color shared by every crime type in the "violent" color class.
pub const VIOLENT_COLOR: &str = "#d32f2f";

/// Marker color for labels that don't map to any known crime type.
pub const FALLBACK_COLOR: &str = "#757575";

/// Severity level for a crime type, from 1 (minimal) to 5 (critical).
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum CrimeSeverity {
    /// Level 1: Non-criminal or minor offenses
    Minimal = 1,
    /// Level 2: Low-level offenses
    Low = 2,
    /// Level 3: Moderate offenses
    Moderate = 3,
    /// Level 4: Serious offenses
    High = 4,
    /// Level 5: Most severe offenses
    Critical = 5,
}

impl CrimeSeverity {
    /// Returns the numeric value of this severity level.
    #[must_use]
    pub const fn value(self) -> u8 {
        self as u8
    }

    /// Creates a severity level from a numeric value.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is not in the range 1-5.
    pub const fn from_value(value: u8) -> Result<Self, InvalidSeverityError> {
        match value {
            1 => Ok(Self::Minimal),
            2 => Ok(Self::Low),
            3 => Ok(Self::Moderate),
            4 => Ok(Self::High),
            5 => Ok(Self::Critical),
            _ => Err(InvalidSeverityError { value }),
        }
    }
}

/// Error returned when attempting to create a [`CrimeSeverity`] from an
/// invalid numeric value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidSeverityError {
    /// The invalid severity value that was provided.
    pub value: u8,
}

impl std::fmt::Display for InvalidSeverityError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid severity value {}: expected 1-5", self.value)
    }
}

impl std::error::Error for InvalidSeverityError {}

/// Canonical crime type labels.
///
/// Backend payloads may carry category names outside this set; those pass
/// through the pipeline as free-form uppercase labels and fall back to
/// [`FALLBACK_COLOR`] when rendered. This enum covers the labels the
/// keyword classifier can produce, in classifier priority order.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum CrimeType {
    /// Murder and manslaughter
    Homicide,
    /// Taking property by force or threat
    Robbery,
    /// Theft without force
    Stealing,
    /// Breaking and entering, burglary
    Breakings,
    /// Drug and narcotics offenses
    DangerousDrugs,
    /// Traffic offenses
    Traffic,
    /// Bribery and abuse of office
    Corruption,
    /// Willful destruction or damage of property
    CriminalDamage,
    /// Financial and economic crimes
    Economic,
    /// Violent offenses not covered by a more specific label
    Violent,
    /// Offenses that don't map to any other label
    Other,
}

impl CrimeType {
    /// Returns the marker color for this crime type.
    ///
    /// [`Homicide`](Self::Homicide), [`Robbery`](Self::Robbery), and
    /// [`Violent`](Self::Violent) share [`VIOLENT_COLOR`]; that shared color
    /// is what makes them the "violent" color class.
    #[must_use]
    pub const fn marker_color(self) -> &'static str {
        match self {
            Self::Homicide | Self::Robbery | Self::Violent => VIOLENT_COLOR,
            Self::Stealing => "#f57c00",
            Self::Breakings => "#7b1fa2",
            Self::DangerousDrugs => "#388e3c",
            Self::Traffic => "#1976d2",
            Self::Corruption => "#5d4037",
            Self::CriminalDamage => "#fbc02d",
            Self::Economic => "#0097a7",
            Self::Other => FALLBACK_COLOR,
        }
    }

    /// Returns `true` if this crime type belongs to the violent color class.
    #[must_use]
    pub const fn is_violent(self) -> bool {
        matches!(self, Self::Homicide | Self::Robbery | Self::Violent)
    }

    /// Returns the severity for this crime type.
    #[must_use]
    pub const fn severity(self) -> CrimeSeverity {
        match self {
            Self::Homicide => CrimeSeverity::Critical,
            Self::Robbery | Self::Violent => CrimeSeverity::High,
            Self::Breakings | Self::DangerousDrugs | Self::Corruption => CrimeSeverity::Moderate,
            Self::Stealing | Self::CriminalDamage | Self::Economic => CrimeSeverity::Low,
            Self::Traffic | Self::Other => CrimeSeverity::Minimal,
        }
    }

    /// Returns all variants of this enum, in classifier priority order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Homicide,
            Self::Robbery,
            Self::Stealing,
            Self::Breakings,
            Self::DangerousDrugs,
            Self::Traffic,
            Self::Corruption,
            Self::CriminalDamage,
            Self::Economic,
            Self::Violent,
            Self::Other,
        ]
    }
}

/// Looks up the marker color for a free-form uppercase label.
///
/// Labels outside the canonical taxonomy (backend categories pass through
/// verbatim) get [`FALLBACK_COLOR`].
#[must_use]
pub fn marker_color_for_label(label: &str) -> &'static str {
    label
        .parse::<CrimeType>()
        .map_or(FALLBACK_COLOR, CrimeType::marker_color)
}

/// Returns `true` if a free-form label maps to the violent color class.
///
/// Defined in terms of the palette so that the filter semantics and the
/// rendered marker colors can never disagree.
#[must_use]
pub fn is_violent_label(label: &str) -> bool {
    marker_color_for_label(label) == VIOLENT_COLOR
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn violent_class_matches_palette() {
        for crime_type in CrimeType::all() {
            assert_eq!(
                crime_type.is_violent(),
                crime_type.marker_color() == VIOLENT_COLOR,
                "{crime_type:?} violent flag disagrees with its marker color"
            );
        }
    }

    #[test]
    fn label_lookup_roundtrip() {
        for crime_type in CrimeType::all() {
            let label = crime_type.to_string();
            assert_eq!(marker_color_for_label(&label), crime_type.marker_color());
            assert_eq!(is_violent_label(&label), crime_type.is_violent());
        }
    }

    #[test]
    fn unknown_label_falls_back() {
        assert_eq!(marker_color_for_label("THEFT"), FALLBACK_COLOR);
        assert!(!is_violent_label("THEFT"));
    }

    #[test]
    fn screaming_snake_case_labels() {
        assert_eq!(CrimeType::DangerousDrugs.to_string(), "DANGEROUS_DRUGS");
        assert_eq!(CrimeType::CriminalDamage.to_string(), "CRIMINAL_DAMAGE");
        assert_eq!("BREAKINGS".parse::<CrimeType>(), Ok(CrimeType::Breakings));
    }

    #[test]
    fn severity_range_valid() {
        for crime_type in CrimeType::all() {
            let val = crime_type.severity().value();
            assert!((1..=5).contains(&val), "{crime_type:?} severity {val} out of range");
        }
    }

    #[test]
    fn severity_from_value_roundtrip() {
        for v in 1..=5u8 {
            let severity = CrimeSeverity::from_value(v).unwrap();
            assert_eq!(severity.value(), v);
        }
        assert!(CrimeSeverity::from_value(0).is_err());
        assert!(CrimeSeverity::from_value(6).is_err());
    }
}
