//! Water pump sizing from peak flow, head, and pump efficiency.

use crate::model::{LoadProfile, SizingAssumptions};
use crate::units::{
    DAYS_PER_MONTH, GRAVITY_M_PER_S2, JOULES_PER_KWH, LITERS_PER_M3, LoadKind,
    PROXY_PUMP_ENERGY_KWH_PER_M3, SECONDS_PER_HOUR, WATER_DENSITY_KG_PER_M3,
};

use super::error::SizingError;
use super::result::{Quantity, SizingResult};

/// Sizes the pump to deliver the worst single-period water demand within its
/// operating window.
///
/// `peak()` drives the sizing, not `average()` — undersizing on peak flow is
/// the failure mode being guarded against. The delivery window is the
/// profile's own period length.
#[derive(Debug, Default, Clone, Copy)]
pub struct PumpSizer;

impl PumpSizer {
    /// Computes the required electrical pump power in watts.
    ///
    /// # Errors
    ///
    /// * `SizingError::UnsupportedLoad` — the profile carries no water-volume
    ///   unit; pump sizing is inapplicable to pure-energy loads.
    /// * `SizingError::InvalidAssumption` — head is absent or non-positive,
    ///   or pump efficiency is outside (0, 1].
    pub fn size(
        water_load: &LoadProfile,
        assumptions: &SizingAssumptions,
    ) -> Result<SizingResult, SizingError> {
        if water_load.kind() != LoadKind::Water {
            return Err(SizingError::UnsupportedLoad {
                detail: format!(
                    "pump sizing requires a water-volume load profile, got {:?} (\"{}\")",
                    water_load.kind(),
                    water_load.label()
                ),
            });
        }

        let eff = assumptions.pump_efficiency;
        if !(eff > 0.0 && eff <= 1.0) {
            return Err(SizingError::invalid_assumption(
                "pump_efficiency",
                eff,
                "must be in (0, 1]",
            ));
        }
        let head = match assumptions.pump_head_m {
            Some(h) if h > 0.0 => h,
            Some(h) => {
                return Err(SizingError::invalid_assumption(
                    "pump_head_m",
                    h,
                    "must be > 0",
                ));
            }
            None => {
                return Err(SizingError::invalid_assumption(
                    "pump_head_m",
                    0.0,
                    "pump power sizing requires a known system head",
                ));
            }
        };

        let peak_liters = water_load.peak();
        let window_s = water_load.period_hours() * SECONDS_PER_HOUR;
        let flow_m3_s = peak_liters / LITERS_PER_M3 / window_s;
        let hydraulic_w = WATER_DENSITY_KG_PER_M3 * GRAVITY_M_PER_S2 * flow_m3_s * head;
        let electrical_w = hydraulic_w / eff;

        let mut result = SizingResult::new(Quantity::new("pump_electrical", electrical_w, "W"));
        result.push_intermediate("peak_volume_l", peak_liters, "L");
        result.push_intermediate("delivery_window_s", window_s, "s");
        result.push_intermediate("peak_flow_m3_s", flow_m3_s, "m³/s");
        result.push_intermediate("system_head_m", head, "m");
        result.push_intermediate("hydraulic_power_w", hydraulic_w, "W");
        result.push_intermediate("pump_efficiency", eff, "fraction");
        result.push_intermediate(
            "daily_energy_kwh",
            Self::daily_energy_kwh(water_load, assumptions),
            "kWh/day",
        );
        Ok(result)
    }

    /// Daily pumping energy for audit and demand accounting.
    ///
    /// With a known head this is the hydraulic energy over the daily volume;
    /// without one it falls back to the proxy specific energy
    /// ([`PROXY_PUMP_ENERGY_KWH_PER_M3`]).
    pub fn daily_energy_kwh(water_load: &LoadProfile, assumptions: &SizingAssumptions) -> f32 {
        let daily_liters = water_load.daily_average();
        let m3_per_day = daily_liters / LITERS_PER_M3;
        match assumptions.pump_head_m {
            Some(head) if head > 0.0 => {
                let joules = WATER_DENSITY_KG_PER_M3 * GRAVITY_M_PER_S2 * head * m3_per_day;
                (joules / (assumptions.pump_efficiency * JOULES_PER_KWH)).max(0.0)
            }
            _ => m3_per_day * PROXY_PUMP_ENERGY_KWH_PER_M3,
        }
    }

    /// Daily pumping energy for a monthly volume figure, the utility-bill
    /// style input (liters per 30-day month).
    pub fn daily_energy_from_monthly_liters(
        monthly_liters: f32,
        assumptions: &SizingAssumptions,
    ) -> f32 {
        let m3_per_day = monthly_liters / DAYS_PER_MONTH / LITERS_PER_M3;
        match assumptions.pump_head_m {
            Some(head) if head > 0.0 => {
                let joules = WATER_DENSITY_KG_PER_M3 * GRAVITY_M_PER_S2 * head * m3_per_day;
                (joules / (assumptions.pump_efficiency * JOULES_PER_KWH)).max(0.0)
            }
            _ => m3_per_day * PROXY_PUMP_ENERGY_KWH_PER_M3,
        }
    }
}
