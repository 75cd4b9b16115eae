//! Battery nameplate sizing from autonomy, depth of discharge, and losses.

use crate::model::{LoadProfile, SizingAssumptions};
use crate::units::LoadKind;

use super::error::SizingError;
use super::result::{Quantity, SizingResult};

/// Sizes the battery so the *delivered* energy, not the stored energy, meets
/// the load over the autonomy window.
///
/// Dividing by depth of discharge keeps the plan from ever discharging the
/// bank below its rated floor; dividing by round-trip efficiency accounts for
/// charge/discharge losses.
#[derive(Debug, Default, Clone, Copy)]
pub struct BatterySizer;

impl BatterySizer {
    /// Computes the required nameplate capacity in kWh.
    ///
    /// # Errors
    ///
    /// * `SizingError::UnsupportedLoad` — the load profile is not an energy
    ///   profile.
    /// * `SizingError::InvalidAssumption` — DoD or round-trip efficiency is
    ///   outside (0, 1].
    pub fn size(
        load: &LoadProfile,
        assumptions: &SizingAssumptions,
    ) -> Result<SizingResult, SizingError> {
        if load.kind() != LoadKind::Energy {
            return Err(SizingError::UnsupportedLoad {
                detail: format!(
                    "battery sizing requires an energy load profile, got {:?} (\"{}\")",
                    load.kind(),
                    load.label()
                ),
            });
        }

        let dod = assumptions.depth_of_discharge;
        if !(dod > 0.0 && dod <= 1.0) {
            return Err(SizingError::invalid_assumption(
                "depth_of_discharge",
                dod,
                "must be in (0, 1]",
            ));
        }
        let rte = assumptions.round_trip_efficiency;
        if !(rte > 0.0 && rte <= 1.0) {
            return Err(SizingError::invalid_assumption(
                "round_trip_efficiency",
                rte,
                "must be in (0, 1]",
            ));
        }

        let daily_load = load.daily_average();
        let usable = daily_load * assumptions.autonomy_days;
        let nameplate = usable / (dod * rte);

        let mut result = SizingResult::new(Quantity::new("battery_bank", nameplate, "kWh"));
        result.push_intermediate("daily_load_kwh", daily_load, "kWh/day");
        result.push_intermediate("autonomy_days", assumptions.autonomy_days, "days");
        result.push_intermediate("usable_energy_kwh", usable, "kWh");
        result.push_intermediate("depth_of_discharge", dod, "fraction");
        result.push_intermediate("round_trip_efficiency", rte, "fraction");
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use crate::units::LoadUnit;

    use super::*;

    fn load_daily(samples: &[f32]) -> LoadProfile {
        LoadProfile::build(samples, 24.0, LoadUnit::KilowattHours, "load").unwrap()
    }

    #[test]
    fn reference_scenario_forty_four_kwh() {
        // 10 kWh/day, autonomy 2 days, DoD 0.5, RTE 0.9 → 44.44 kWh
        let load = load_daily(&[10.0, 10.0]);
        let a = SizingAssumptions {
            autonomy_days: 2.0,
            depth_of_discharge: 0.5,
            round_trip_efficiency: 0.9,
            ..SizingAssumptions::default()
        };
        let r = BatterySizer::size(&load, &a).unwrap();
        assert!((r.capacity.value - 44.4444).abs() < 1e-2);
        assert_eq!(r.capacity.unit, "kWh");
        assert!((r.intermediate("usable_energy_kwh").unwrap() - 20.0).abs() < 1e-4);
    }

    #[test]
    fn lower_dod_never_shrinks_the_bank() {
        let load = load_daily(&[10.0]);
        let mut previous = 0.0_f32;
        for dod in [1.0_f32, 0.8, 0.5, 0.3, 0.1] {
            let a = SizingAssumptions {
                depth_of_discharge: dod,
                ..SizingAssumptions::default()
            };
            let r = BatterySizer::size(&load, &a).unwrap();
            assert!(
                r.capacity.value >= previous,
                "bank shrank when DoD fell to {dod}"
            );
            previous = r.capacity.value;
        }
    }

    #[test]
    fn all_zero_load_sizes_to_exactly_zero() {
        let load = load_daily(&[0.0, 0.0, 0.0]);
        let r = BatterySizer::size(&load, &SizingAssumptions::default()).unwrap();
        assert_eq!(r.capacity.value, 0.0);
    }

    #[test]
    fn zero_autonomy_sizes_to_zero() {
        let load = load_daily(&[10.0]);
        let a = SizingAssumptions {
            autonomy_days: 0.0,
            ..SizingAssumptions::default()
        };
        let r = BatterySizer::size(&load, &a).unwrap();
        assert_eq!(r.capacity.value, 0.0);
    }

    #[test]
    fn out_of_range_dod_is_rejected() {
        let load = load_daily(&[10.0]);
        let a = SizingAssumptions {
            depth_of_discharge: 1.2,
            ..SizingAssumptions::default()
        };
        let err = BatterySizer::size(&load, &a).unwrap_err();
        assert!(matches!(
            err,
            SizingError::InvalidAssumption { ref field, .. } if field == "depth_of_discharge"
        ));
    }

    #[test]
    fn zero_rte_is_rejected_not_infinite() {
        let load = load_daily(&[10.0]);
        let a = SizingAssumptions {
            round_trip_efficiency: 0.0,
            ..SizingAssumptions::default()
        };
        assert!(BatterySizer::size(&load, &a).is_err());
    }

    #[test]
    fn water_load_is_unsupported() {
        let water = LoadProfile::build(&[500.0], 24.0, LoadUnit::Liters, "well").unwrap();
        let err = BatterySizer::size(&water, &SizingAssumptions::default()).unwrap_err();
        assert!(matches!(err, SizingError::UnsupportedLoad { .. }));
    }
}
