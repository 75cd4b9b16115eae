//! Avoided-emissions estimate against a fossil baseline.

use crate::model::SizingAssumptions;
use crate::units::KG_PER_TONNE;

use super::result::{Quantity, SizingResult, keys};

/// Converts the PV array's displaced energy into avoided emissions.
///
/// A pure function over an already-sized PV result: displaced energy is the
/// lesser of annual yield and annual load (surplus generation displaces
/// nothing), multiplied by the baseline emissions factor.
#[derive(Debug, Default, Clone, Copy)]
pub struct CarbonOffsetCalculator;

impl CarbonOffsetCalculator {
    /// Estimates avoided emissions in kg CO₂ per year.
    ///
    /// Cannot fail given a PV result from [`super::pv::PvArraySizer`]; a PV
    /// result lacking the annual-energy intermediates degrades to a zero
    /// estimate with a warning rather than an error.
    pub fn estimate(pv: &SizingResult, assumptions: &SizingAssumptions) -> SizingResult {
        let mut warnings = Vec::new();
        let annual_yield = pv.intermediate(keys::ANNUAL_YIELD_KWH).unwrap_or_else(|| {
            warnings.push("PV result carries no annual yield estimate — offset is zero".into());
            0.0
        });
        let annual_load = pv
            .intermediate(keys::ANNUAL_LOAD_KWH)
            .unwrap_or(annual_yield);

        let displaced_kwh = annual_yield.min(annual_load);
        let avoided_kg = displaced_kwh * assumptions.emissions_factor_kg_per_kwh;

        let mut result = SizingResult::new(Quantity::new(
            "avoided_emissions",
            avoided_kg,
            "kg CO₂/year",
        ));
        result.push_intermediate("displaced_energy_kwh", displaced_kwh, "kWh/year");
        result.push_intermediate(
            "emissions_factor",
            assumptions.emissions_factor_kg_per_kwh,
            "kg CO₂/kWh",
        );
        result.push_intermediate("avoided_tonnes", avoided_kg / KG_PER_TONNE, "t CO₂/year");
        result.warnings = warnings;
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pv_result(annual_yield: f32, annual_load: f32) -> SizingResult {
        let mut r = SizingResult::new(Quantity::new("pv_array", 3.0, "kWp"));
        r.push_intermediate(keys::ANNUAL_YIELD_KWH, annual_yield, "kWh/year");
        r.push_intermediate(keys::ANNUAL_LOAD_KWH, annual_load, "kWh/year");
        r
    }

    #[test]
    fn offset_scales_with_emissions_factor() {
        let pv = pv_result(3650.0, 4000.0);
        let a = SizingAssumptions {
            emissions_factor_kg_per_kwh: 0.6,
            ..SizingAssumptions::default()
        };
        let r = CarbonOffsetCalculator::estimate(&pv, &a);
        assert!((r.capacity.value - 2190.0).abs() < 0.5);
        assert!((r.intermediate("avoided_tonnes").unwrap() - 2.19).abs() < 1e-3);
    }

    #[test]
    fn displaced_energy_is_capped_by_load() {
        // Yield above load: only the matched energy displaces emissions.
        let pv = pv_result(5000.0, 3000.0);
        let a = SizingAssumptions {
            emissions_factor_kg_per_kwh: 1.0,
            ..SizingAssumptions::default()
        };
        let r = CarbonOffsetCalculator::estimate(&pv, &a);
        assert!((r.capacity.value - 3000.0).abs() < 0.5);
    }

    #[test]
    fn zero_emissions_factor_yields_zero_offset() {
        let pv = pv_result(3650.0, 3650.0);
        let a = SizingAssumptions {
            emissions_factor_kg_per_kwh: 0.0,
            ..SizingAssumptions::default()
        };
        let r = CarbonOffsetCalculator::estimate(&pv, &a);
        assert_eq!(r.capacity.value, 0.0);
    }

    #[test]
    fn missing_intermediates_degrade_with_warning() {
        let bare = SizingResult::new(Quantity::new("pv_array", 3.0, "kWp"));
        let r = CarbonOffsetCalculator::estimate(&bare, &SizingAssumptions::default());
        assert_eq!(r.capacity.value, 0.0);
        assert!(!r.warnings.is_empty());
    }
}
