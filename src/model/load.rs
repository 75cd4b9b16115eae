//! Validated, immutable demand profile.

use crate::sizing::error::ValidationError;
use crate::units::{HOURS_PER_DAY, LoadKind, LoadUnit};

/// Ordered sequence of per-period demand samples in canonical units.
///
/// Energy loads are stored as kWh per period, water loads as liters per
/// period; the conversion happens once in [`LoadProfile::build`]. The profile
/// is immutable after construction and all aggregates are pure reads.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadProfile {
    samples: Vec<f32>,
    period_hours: f32,
    kind: LoadKind,
    unit: LoadUnit,
    label: String,
}

impl LoadProfile {
    /// Builds a profile from raw samples, validating and canonicalizing them.
    ///
    /// # Arguments
    ///
    /// * `samples` - Raw per-period demand values in `unit`
    /// * `period_hours` - Length of one period in hours
    /// * `unit` - Unit of the raw samples
    /// * `label` - Human-readable profile name
    ///
    /// # Errors
    ///
    /// Returns a `ValidationError` if the sequence is empty, any sample is
    /// negative or non-finite, or the period length is not a positive finite
    /// number.
    pub fn build(
        samples: &[f32],
        period_hours: f32,
        unit: LoadUnit,
        label: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        if samples.is_empty() {
            return Err(ValidationError::new(
                "load.samples",
                "must contain at least one period",
            ));
        }
        if !(period_hours > 0.0 && period_hours.is_finite()) {
            return Err(ValidationError::new(
                "load.period_hours",
                format!("must be a positive finite number, got {period_hours}"),
            ));
        }
        for (i, &v) in samples.iter().enumerate() {
            if !v.is_finite() || v < 0.0 {
                return Err(ValidationError::new(
                    format!("load.samples[{i}]"),
                    format!("must be >= 0 and finite, got {v}"),
                ));
            }
        }

        let canonical = samples
            .iter()
            .map(|&v| unit.to_canonical(v, period_hours))
            .collect();

        Ok(Self {
            samples: canonical,
            period_hours,
            kind: unit.kind(),
            unit,
            label: label.into(),
        })
    }

    /// Sum of all samples in the canonical unit.
    pub fn total(&self) -> f32 {
        self.samples.iter().sum()
    }

    /// Maximum single-period value — the worst-case design driver.
    pub fn peak(&self) -> f32 {
        self.samples.iter().fold(0.0_f32, |acc, &v| acc.max(v))
    }

    /// Mean per-period value (`total / period count`).
    pub fn average(&self) -> f32 {
        self.total() / self.samples.len() as f32
    }

    /// Total demand scaled to a per-day figure.
    pub fn daily_average(&self) -> f32 {
        let covered_hours = self.samples.len() as f32 * self.period_hours;
        self.total() / covered_hours * HOURS_PER_DAY
    }

    /// Number of periods.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Always false after a successful build; present for slice-like APIs.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Canonical per-period samples.
    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    /// Period length in hours.
    pub fn period_hours(&self) -> f32 {
        self.period_hours
    }

    /// Whether this is an energy or a water profile.
    pub fn kind(&self) -> LoadKind {
        self.kind
    }

    /// The unit the raw samples were supplied in.
    pub fn source_unit(&self) -> LoadUnit {
        self.unit
    }

    /// Human-readable profile name.
    pub fn label(&self) -> &str {
        &self.label
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn energy_profile(samples: &[f32]) -> LoadProfile {
        LoadProfile::build(samples, 24.0, LoadUnit::KilowattHours, "test").unwrap()
    }

    #[test]
    fn build_rejects_empty_samples() {
        let err = LoadProfile::build(&[], 24.0, LoadUnit::KilowattHours, "x").unwrap_err();
        assert_eq!(err.field, "load.samples");
    }

    #[test]
    fn build_rejects_negative_sample() {
        let err =
            LoadProfile::build(&[1.0, -0.5, 2.0], 24.0, LoadUnit::KilowattHours, "x").unwrap_err();
        assert_eq!(err.field, "load.samples[1]");
    }

    #[test]
    fn build_rejects_nan_sample() {
        let err =
            LoadProfile::build(&[1.0, f32::NAN], 24.0, LoadUnit::KilowattHours, "x").unwrap_err();
        assert_eq!(err.field, "load.samples[1]");
    }

    #[test]
    fn build_rejects_non_positive_period() {
        let err = LoadProfile::build(&[1.0], 0.0, LoadUnit::KilowattHours, "x").unwrap_err();
        assert_eq!(err.field, "load.period_hours");
    }

    #[test]
    fn aggregates_over_daily_samples() {
        let p = energy_profile(&[8.0, 12.0, 10.0]);
        assert_eq!(p.total(), 30.0);
        assert_eq!(p.peak(), 12.0);
        assert_eq!(p.average(), 10.0);
        assert!((p.daily_average() - 10.0).abs() < 1e-6);
        assert_eq!(p.len(), 3);
        assert_eq!(p.kind(), LoadKind::Energy);
    }

    #[test]
    fn kw_samples_canonicalize_to_kwh() {
        // 2 kW mean over 1-hour periods = 2 kWh per period
        let p = LoadProfile::build(&[2.0, 2.0], 1.0, LoadUnit::Kilowatts, "x").unwrap();
        assert_eq!(p.samples(), &[2.0, 2.0]);
        assert_eq!(p.total(), 4.0);
        // 4 kWh over 2 hours covered → 48 kWh/day
        assert!((p.daily_average() - 48.0).abs() < 1e-4);
    }

    #[test]
    fn cubic_meter_samples_canonicalize_to_liters() {
        let p = LoadProfile::build(&[0.5, 1.0], 24.0, LoadUnit::CubicMeters, "well").unwrap();
        assert_eq!(p.samples(), &[500.0, 1000.0]);
        assert_eq!(p.kind(), LoadKind::Water);
        assert_eq!(p.peak(), 1000.0);
    }

    #[test]
    fn hourly_profile_daily_average_scales_up() {
        // 1 kWh every hour for 12 hours → 24 kWh/day equivalent
        let p = LoadProfile::build(&[1.0; 12], 1.0, LoadUnit::KilowattHours, "x").unwrap();
        assert!((p.daily_average() - 24.0).abs() < 1e-4);
    }

    #[test]
    fn all_zero_profile_is_valid() {
        let p = energy_profile(&[0.0, 0.0]);
        assert_eq!(p.total(), 0.0);
        assert_eq!(p.peak(), 0.0);
        assert_eq!(p.daily_average(), 0.0);
    }
}
