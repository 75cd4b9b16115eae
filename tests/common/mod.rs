//! Shared test fixtures for integration tests.

use solar_sizer::model::SizingAssumptions;
use solar_sizer::sizing::{AlignmentPolicy, RawSizingInput};
use solar_sizer::units::{IrradianceUnit, LoadUnit};

/// Reference assumptions used by the capacity scenarios: 2 days autonomy,
/// DoD 0.5, RTE 0.9, 20 m head, 60% pump efficiency.
pub fn reference_assumptions() -> SizingAssumptions {
    SizingAssumptions {
        autonomy_days: 2.0,
        depth_of_discharge: 0.5,
        round_trip_efficiency: 0.9,
        pump_head_m: Some(20.0),
        pump_efficiency: 0.6,
        design_margin: 0.0,
        ..SizingAssumptions::default()
    }
}

/// Flat 10 kWh/day load with matching 4-PSH irradiance over one week.
pub fn flat_input(label: &str) -> RawSizingInput {
    RawSizingInput {
        label: label.to_string(),
        load_samples: vec![10.0; 7],
        load_unit: LoadUnit::KilowattHours,
        load_period_hours: 24.0,
        irradiance_samples: vec![4.0; 7],
        irradiance_unit: IrradianceUnit::PeakSunHours,
        irradiance_period_hours: 24.0,
        water_samples: None,
        water_unit: None,
        water_period_hours: None,
        loss_factors: Vec::new(),
        alignment: AlignmentPolicy::Strict,
    }
}

/// Adds an hourly water delivery profile peaking at 500 L in one hour.
pub fn with_water(mut input: RawSizingInput) -> RawSizingInput {
    let mut samples = vec![0.0f32; 24];
    samples[9] = 250.0;
    samples[10] = 500.0;
    samples[11] = 300.0;
    input.water_samples = Some(samples);
    input.water_unit = Some(LoadUnit::Liters);
    input.water_period_hours = Some(1.0);
    input
}
