//! PV array sizing against the worst recorded solar-resource day.

use serde::{Deserialize, Serialize};

use crate::model::{IrradianceProfile, LoadProfile, LossChain, SizingAssumptions};
use crate::units::{DAYS_PER_YEAR, LoadKind};

use super::error::SizingError;
use super::result::{Quantity, SizingResult, keys};

/// How to resolve mismatched period counts between load and irradiance data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlignmentPolicy {
    /// Mismatched period counts are an error. The default: no implicit
    /// resampling policy is guessed on the caller's behalf.
    #[default]
    Strict,
    /// Cycle (or truncate) the irradiance sequence over the load horizon,
    /// attaching an extrapolation warning when it is extended.
    RepeatIrradiance,
}

/// Sizes the PV array from load, irradiance, and a loss chain.
///
/// The divisor is `worst_day()`, not `average()`: the array must cover the
/// worst recorded solar-resource day, or the system is chronically undersized
/// on exactly the days it matters.
#[derive(Debug, Default, Clone, Copy)]
pub struct PvArraySizer;

impl PvArraySizer {
    /// Computes the required array capacity in kWp.
    ///
    /// # Errors
    ///
    /// * `SizingError::UnsupportedLoad` — the load profile is not an energy
    ///   profile.
    /// * `SizingError::IncompatiblePeriods` — period length mismatch, or
    ///   period count mismatch under [`AlignmentPolicy::Strict`].
    /// * `SizingError::DivisionByZero` — worst-day irradiance or derate is
    ///   zero (defensive; profile validation makes this unreachable).
    pub fn size(
        load: &LoadProfile,
        irradiance: &IrradianceProfile,
        losses: &LossChain,
        assumptions: &SizingAssumptions,
        alignment: AlignmentPolicy,
    ) -> Result<SizingResult, SizingError> {
        if load.kind() != LoadKind::Energy {
            return Err(SizingError::UnsupportedLoad {
                detail: format!(
                    "PV sizing requires an energy load profile, got {:?} (\"{}\")",
                    load.kind(),
                    load.label()
                ),
            });
        }

        let (irradiance, mut warnings) = align(load, irradiance, alignment)?;

        let worst_day = irradiance.worst_day();
        if worst_day <= 0.0 || !worst_day.is_finite() {
            return Err(SizingError::DivisionByZero {
                context: "PV sizing: worst-day irradiance".into(),
            });
        }
        let derate = losses.derate();
        if derate <= 0.0 {
            return Err(SizingError::DivisionByZero {
                context: "PV sizing: loss chain derate".into(),
            });
        }

        let daily_load = load.daily_average();
        let margin = assumptions.design_margin;
        let kwp_raw = daily_load / (worst_day * derate) * (1.0 + margin);

        let kwp = match assumptions.array_cap_kwp() {
            Some(cap) if kwp_raw > cap => {
                warnings.push(format!(
                    "required array {kwp_raw:.3} kWp exceeds the installable cap {cap:.3} kWp — capacity clamped to the available area"
                ));
                cap
            }
            _ => kwp_raw,
        };

        let annual_yield = kwp * worst_day * derate * DAYS_PER_YEAR;
        let annual_load = daily_load * DAYS_PER_YEAR;

        let mut result = SizingResult::new(Quantity::new("pv_array", kwp, "kWp"));
        result.push_intermediate("daily_load_kwh", daily_load, "kWh/day");
        result.push_intermediate("worst_day_irradiance", worst_day, "psh/day");
        result.push_intermediate("loss_chain_derate", derate, "fraction");
        result.push_intermediate("design_margin", margin, "fraction");
        result.push_intermediate("array_raw_kwp", kwp_raw, "kWp");
        if let Some(cap) = assumptions.array_cap_kwp() {
            result.push_intermediate("array_cap_kwp", cap, "kWp");
        }
        result.push_intermediate("inverter_ac_kw", kwp / assumptions.dc_ac_ratio, "kW");
        result.push_intermediate(keys::ANNUAL_YIELD_KWH, annual_yield, "kWh/year");
        result.push_intermediate(keys::ANNUAL_LOAD_KWH, annual_load, "kWh/year");
        result.warnings = warnings;
        Ok(result)
    }
}

/// Resolves the two profiles to a common period count per the policy.
fn align(
    load: &LoadProfile,
    irradiance: &IrradianceProfile,
    policy: AlignmentPolicy,
) -> Result<(IrradianceProfile, Vec<String>), SizingError> {
    if (load.period_hours() - irradiance.period_hours()).abs() > 1e-6 {
        return Err(SizingError::IncompatiblePeriods {
            load_periods: load.len(),
            irradiance_periods: irradiance.len(),
            detail: format!(
                "period length differs ({} h vs {} h) and cannot be aligned",
                load.period_hours(),
                irradiance.period_hours()
            ),
        });
    }

    if load.len() == irradiance.len() {
        return Ok((irradiance.clone(), Vec::new()));
    }

    match policy {
        AlignmentPolicy::Strict => Err(SizingError::IncompatiblePeriods {
            load_periods: load.len(),
            irradiance_periods: irradiance.len(),
            detail: "no alignment policy supplied".into(),
        }),
        AlignmentPolicy::RepeatIrradiance => {
            let horizon = load.len();
            let base = irradiance.samples();
            let mut extended = Vec::with_capacity(horizon);
            while extended.len() < horizon {
                for &v in base {
                    if extended.len() == horizon {
                        break;
                    }
                    extended.push(v);
                }
            }
            let warnings = if irradiance.len() < horizon {
                vec![
                    "irradiance data covers fewer periods than load data — extrapolated"
                        .to_string(),
                ]
            } else {
                vec!["irradiance data covers more periods than load data — truncated".to_string()]
            };
            Ok((irradiance.with_samples(extended), warnings))
        }
    }
}
