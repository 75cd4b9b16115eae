//! Validated, immutable site solar-resource profile.

use crate::sizing::error::ValidationError;
use crate::units::{HOURS_PER_DAY, IrradianceUnit};

/// Ordered per-period solar resource values, canonicalized to equivalent
/// peak-sun-hours per period.
///
/// A profile with no non-zero sample is rejected at build time: PV sizing is
/// undefined over it and must fail explicitly rather than produce an infinite
/// array. True-zero periods inside an otherwise valid profile are kept; they
/// are excluded from [`IrradianceProfile::worst_day`] and instead checked
/// against the battery autonomy window by the orchestrator.
#[derive(Debug, Clone, PartialEq)]
pub struct IrradianceProfile {
    samples: Vec<f32>,
    period_hours: f32,
    unit: IrradianceUnit,
}

impl IrradianceProfile {
    /// Builds a profile from raw samples, validating and canonicalizing them.
    ///
    /// # Errors
    ///
    /// Returns a `ValidationError` if the sequence is empty, any sample is
    /// negative or non-finite, the period length is not positive and finite,
    /// or every sample is zero.
    pub fn build(
        samples: &[f32],
        period_hours: f32,
        unit: IrradianceUnit,
    ) -> Result<Self, ValidationError> {
        if samples.is_empty() {
            return Err(ValidationError::new(
                "irradiance.samples",
                "must contain at least one period",
            ));
        }
        if !(period_hours > 0.0 && period_hours.is_finite()) {
            return Err(ValidationError::new(
                "irradiance.period_hours",
                format!("must be a positive finite number, got {period_hours}"),
            ));
        }
        for (i, &v) in samples.iter().enumerate() {
            if !v.is_finite() || v < 0.0 {
                return Err(ValidationError::new(
                    format!("irradiance.samples[{i}]"),
                    format!("must be >= 0 and finite, got {v}"),
                ));
            }
        }
        if samples.iter().all(|&v| v == 0.0) {
            return Err(ValidationError::new(
                "irradiance.samples",
                "at least one sample must be non-zero — PV sizing is undefined over a zero resource",
            ));
        }

        let canonical = samples
            .iter()
            .map(|&v| unit.to_canonical(v, period_hours))
            .collect();

        Ok(Self {
            samples: canonical,
            period_hours,
            unit,
        })
    }

    /// Minimum strictly positive sample, scaled to per-day peak-sun-hours —
    /// the conservative PV design input.
    ///
    /// True-zero periods are excluded from the minimum; their coverage is a
    /// battery-autonomy concern, not a divisor.
    pub fn worst_day(&self) -> f32 {
        let min_period = self
            .samples
            .iter()
            .copied()
            .filter(|&v| v > 0.0)
            .fold(f32::INFINITY, f32::min);
        min_period / self.period_hours * HOURS_PER_DAY
    }

    /// Mean over all samples (zeros included), per-day peak-sun-hours.
    pub fn average(&self) -> f32 {
        let sum: f32 = self.samples.iter().sum();
        let covered_hours = self.samples.len() as f32 * self.period_hours;
        sum / covered_hours * HOURS_PER_DAY
    }

    /// Number of true-zero periods in the profile.
    pub fn zero_period_count(&self) -> usize {
        self.samples.iter().filter(|&&v| v == 0.0).count()
    }

    /// Length of the longest consecutive run of true-zero periods.
    pub fn longest_zero_run(&self) -> usize {
        let mut longest = 0;
        let mut current = 0;
        for &v in &self.samples {
            if v == 0.0 {
                current += 1;
                longest = longest.max(current);
            } else {
                current = 0;
            }
        }
        longest
    }

    /// Number of periods.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Always false after a successful build; present for slice-like APIs.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Canonical per-period samples (peak-sun-hours per period).
    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    /// Period length in hours.
    pub fn period_hours(&self) -> f32 {
        self.period_hours
    }

    /// The unit the raw samples were supplied in.
    pub fn source_unit(&self) -> IrradianceUnit {
        self.unit
    }

    /// Rebuilds the profile with the given canonical samples, keeping period
    /// metadata. Used by the alignment policy; not public API.
    pub(crate) fn with_samples(&self, samples: Vec<f32>) -> Self {
        Self {
            samples,
            period_hours: self.period_hours,
            unit: self.unit,
        }
    }
}
