//! Scalar sizing configuration, validated once and owned by a single run.

use serde::{Deserialize, Serialize};

use crate::sizing::error::ValidationError;

/// Upper bound on the combined design margin, matching field practice of
/// capping stacked dust/weather margins.
pub const MAX_DESIGN_MARGIN: f32 = 0.20;

/// Immutable scalar configuration for one sizing run.
///
/// Constructed from the scenario config (or API request), validated through
/// [`SizingAssumptions::validate`] before any sizer touches it. Sizers still
/// defensively re-check the specific bounds they divide by.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SizingAssumptions {
    /// Days the battery must carry the load with zero solar input.
    pub autonomy_days: f32,
    /// Usable fraction of battery nameplate capacity, in (0, 1].
    pub depth_of_discharge: f32,
    /// Fraction of stored energy recovered from the battery, in (0, 1].
    pub round_trip_efficiency: f32,
    /// Pump system head in meters; `None` when unknown (proxy energy only).
    pub pump_head_m: Option<f32>,
    /// Pump wire-to-water efficiency, in (0, 1].
    pub pump_efficiency: f32,
    /// Baseline emissions factor (kg CO₂ per kWh displaced).
    pub emissions_factor_kg_per_kwh: f32,
    /// Headroom applied to the PV array, in [0, `MAX_DESIGN_MARGIN`].
    pub design_margin: f32,
    /// Installable array area in m²; `None` leaves the array uncapped.
    pub array_area_m2: Option<f32>,
    /// Module power density (kWp per m²) used with `array_area_m2`.
    pub power_density_kwp_per_m2: f32,
    /// DC-to-AC ratio for the inverter rating intermediate; >= 1.
    pub dc_ac_ratio: f32,
}

impl Default for SizingAssumptions {
    fn default() -> Self {
        Self {
            autonomy_days: 1.0,
            depth_of_discharge: 0.8,
            round_trip_efficiency: 0.9,
            pump_head_m: None,
            pump_efficiency: 0.55,
            emissions_factor_kg_per_kwh: 0.6,
            design_margin: 0.0,
            array_area_m2: None,
            power_density_kwp_per_m2: 0.19,
            dc_ac_ratio: 1.2,
        }
    }
}

impl SizingAssumptions {
    /// Checks every field against its documented bounds.
    ///
    /// # Errors
    ///
    /// Returns the first `ValidationError` encountered, naming the field.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !(self.autonomy_days >= 0.0 && self.autonomy_days.is_finite()) {
            return Err(ValidationError::new(
                "assumptions.autonomy_days",
                format!("must be >= 0 and finite, got {}", self.autonomy_days),
            ));
        }
        check_fraction("assumptions.depth_of_discharge", self.depth_of_discharge)?;
        check_fraction(
            "assumptions.round_trip_efficiency",
            self.round_trip_efficiency,
        )?;
        if let Some(head) = self.pump_head_m {
            if !(head > 0.0 && head.is_finite()) {
                return Err(ValidationError::new(
                    "assumptions.pump_head_m",
                    format!("must be > 0 when present, got {head}"),
                ));
            }
        }
        check_fraction("assumptions.pump_efficiency", self.pump_efficiency)?;
        if !(self.emissions_factor_kg_per_kwh >= 0.0 && self.emissions_factor_kg_per_kwh.is_finite())
        {
            return Err(ValidationError::new(
                "assumptions.emissions_factor_kg_per_kwh",
                format!("must be >= 0, got {}", self.emissions_factor_kg_per_kwh),
            ));
        }
        if !(0.0..=MAX_DESIGN_MARGIN).contains(&self.design_margin) {
            return Err(ValidationError::new(
                "assumptions.design_margin",
                format!(
                    "must be in [0, {MAX_DESIGN_MARGIN}], got {}",
                    self.design_margin
                ),
            ));
        }
        if let Some(area) = self.array_area_m2 {
            if !(area >= 0.0 && area.is_finite()) {
                return Err(ValidationError::new(
                    "assumptions.array_area_m2",
                    format!("must be >= 0 when present, got {area}"),
                ));
            }
        }
        if !(self.power_density_kwp_per_m2 > 0.0 && self.power_density_kwp_per_m2.is_finite()) {
            return Err(ValidationError::new(
                "assumptions.power_density_kwp_per_m2",
                format!("must be > 0, got {}", self.power_density_kwp_per_m2),
            ));
        }
        if !(self.dc_ac_ratio >= 1.0 && self.dc_ac_ratio.is_finite()) {
            return Err(ValidationError::new(
                "assumptions.dc_ac_ratio",
                format!("must be >= 1, got {}", self.dc_ac_ratio),
            ));
        }
        Ok(())
    }

    /// Installable kWp ceiling from area and power density, if an area is set.
    pub fn array_cap_kwp(&self) -> Option<f32> {
        self.array_area_m2
            .map(|area| area * self.power_density_kwp_per_m2)
    }
}

fn check_fraction(field: &str, value: f32) -> Result<(), ValidationError> {
    if value > 0.0 && value <= 1.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ValidationError::new(
            field,
            format!("must be in (0, 1], got {value}"),
        ))
    }
}
