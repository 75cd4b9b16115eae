//! Error taxonomy for validation and sizing failures.
//!
//! Every engine-level failure is returned as a typed value carrying the
//! offending field and constraint — never logged-and-ignored, never silently
//! defaulted. The orchestrator propagates the first failure only.

use std::error::Error;
use std::fmt;

/// Malformed or out-of-range input data, caught before any computation.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Dotted field path (e.g., `"load.samples[3]"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl ValidationError {
    /// Builds a validation error from a field path and message.
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "validation error: {} — {}", self.field, self.message)
    }
}

impl Error for ValidationError {}

/// A computation precondition violated despite (or instead of) validation.
///
/// The `DivisionByZero` variant is defensive: profile validation guarantees a
/// non-zero worst-day value, but the sizers re-check rather than assume.
#[derive(Debug, Clone, PartialEq)]
pub enum SizingError {
    /// Input data failed model construction.
    Validation(ValidationError),
    /// An assumption (DoD, efficiency, head, ...) is outside its valid range.
    InvalidAssumption {
        /// Name of the offending assumption field.
        field: String,
        /// The rejected value.
        value: f32,
        /// Constraint description.
        message: String,
    },
    /// A divisor that validation should have made non-zero was zero.
    DivisionByZero {
        /// Where the zero divisor arose.
        context: String,
    },
    /// Load and irradiance profiles disagree on period count or length and no
    /// alignment policy was supplied.
    IncompatiblePeriods {
        /// Period count of the load profile.
        load_periods: usize,
        /// Period count of the irradiance profile.
        irradiance_periods: usize,
        /// Constraint description.
        detail: String,
    },
    /// The sizer does not apply to this load profile (e.g., pump sizing over
    /// a pure-energy load).
    UnsupportedLoad {
        /// What was expected and what was found.
        detail: String,
    },
}

impl SizingError {
    /// Convenience constructor for `InvalidAssumption`.
    pub fn invalid_assumption(field: impl Into<String>, value: f32, message: impl Into<String>) -> Self {
        SizingError::InvalidAssumption {
            field: field.into(),
            value,
            message: message.into(),
        }
    }
}

impl fmt::Display for SizingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SizingError::Validation(e) => write!(f, "{e}"),
            SizingError::InvalidAssumption {
                field,
                value,
                message,
            } => {
                write!(f, "invalid assumption: {field} = {value} — {message}")
            }
            SizingError::DivisionByZero { context } => {
                write!(f, "division by zero in {context}")
            }
            SizingError::IncompatiblePeriods {
                load_periods,
                irradiance_periods,
                detail,
            } => write!(
                f,
                "incompatible periods: load has {load_periods}, irradiance has {irradiance_periods} — {detail}"
            ),
            SizingError::UnsupportedLoad { detail } => {
                write!(f, "unsupported load: {detail}")
            }
        }
    }
}

impl Error for SizingError {}

impl From<ValidationError> for SizingError {
    fn from(e: ValidationError) -> Self {
        SizingError::Validation(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_display_names_field() {
        let e = ValidationError::new("load.samples[2]", "must be >= 0");
        let s = format!("{e}");
        assert!(s.contains("load.samples[2]"));
        assert!(s.contains("must be >= 0"));
    }

    #[test]
    fn sizing_error_display_carries_value() {
        let e = SizingError::invalid_assumption("depth_of_discharge", 1.5, "must be in (0, 1]");
        let s = format!("{e}");
        assert!(s.contains("depth_of_discharge"));
        assert!(s.contains("1.5"));
    }

    #[test]
    fn validation_error_converts_into_sizing_error() {
        let v = ValidationError::new("irradiance.samples", "all samples are zero");
        let s: SizingError = v.clone().into();
        assert_eq!(s, SizingError::Validation(v));
    }

    #[test]
    fn incompatible_periods_display_shows_both_counts() {
        let e = SizingError::IncompatiblePeriods {
            load_periods: 24,
            irradiance_periods: 12,
            detail: "no alignment policy supplied".into(),
        };
        let s = format!("{e}");
        assert!(s.contains("24"));
        assert!(s.contains("12"));
    }
}
