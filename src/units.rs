//! Physical constants and validated unit conversions.
//!
//! Every numeric input to the engine carries an explicit unit tag; conversion
//! to the canonical unit (kWh per period for energy, liters per period for
//! water, peak-sun-hours per period for irradiance) happens exactly once, at
//! profile construction. Sizers never see raw units.

use std::fmt;

use serde::{Deserialize, Serialize};

// -- Time --

/// Seconds in one hour.
pub const SECONDS_PER_HOUR: f32 = 3600.0;
/// Hours in one day.
pub const HOURS_PER_DAY: f32 = 24.0;
/// Seconds in one day.
pub const SECONDS_PER_DAY: f32 = 86_400.0;
/// Days per year used for annualized energy figures.
pub const DAYS_PER_YEAR: f32 = 365.0;
/// Days per billing month (utility-bill convention).
pub const DAYS_PER_MONTH: f32 = 30.0;

// -- Energy & hydraulics --

/// Joules in one kilowatt-hour.
pub const JOULES_PER_KWH: f32 = 3.6e6;
/// Liters in one cubic meter.
pub const LITERS_PER_M3: f32 = 1000.0;
/// Density of water (kg/m³).
pub const WATER_DENSITY_KG_PER_M3: f32 = 1000.0;
/// Standard gravity (m/s²).
pub const GRAVITY_M_PER_S2: f32 = 9.81;
/// Kilograms in one metric tonne.
pub const KG_PER_TONNE: f32 = 1000.0;

/// Specific pumping energy (kWh/m³) used when the system head is unknown.
pub const PROXY_PUMP_ENERGY_KWH_PER_M3: f32 = 0.45;

/// Broad category of a load profile, derived from its unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoadKind {
    /// Electrical energy demand, canonical unit kWh per period.
    Energy,
    /// Water volume demand, canonical unit liters per period.
    Water,
}

/// Unit of raw load samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadUnit {
    /// Energy per period (kWh) — already canonical.
    KilowattHours,
    /// Mean power over the period (kW); converts via period length.
    Kilowatts,
    /// Water volume per period (L) — already canonical.
    Liters,
    /// Water volume per period (m³); converts via [`LITERS_PER_M3`].
    CubicMeters,
}

impl LoadUnit {
    /// The load category this unit belongs to.
    pub fn kind(self) -> LoadKind {
        match self {
            LoadUnit::KilowattHours | LoadUnit::Kilowatts => LoadKind::Energy,
            LoadUnit::Liters | LoadUnit::CubicMeters => LoadKind::Water,
        }
    }

    /// Converts one raw sample to the canonical per-period value.
    ///
    /// # Arguments
    ///
    /// * `value` - Raw sample in this unit
    /// * `period_hours` - Length of one period in hours (must be > 0)
    pub fn to_canonical(self, value: f32, period_hours: f32) -> f32 {
        match self {
            LoadUnit::KilowattHours | LoadUnit::Liters => value,
            LoadUnit::Kilowatts => value * period_hours,
            LoadUnit::CubicMeters => value * LITERS_PER_M3,
        }
    }

    /// Parses the config-file spelling of a unit.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "kwh" => Some(LoadUnit::KilowattHours),
            "kw" => Some(LoadUnit::Kilowatts),
            "liters" | "l" => Some(LoadUnit::Liters),
            "m3" => Some(LoadUnit::CubicMeters),
            _ => None,
        }
    }
}

impl fmt::Display for LoadUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LoadUnit::KilowattHours => "kWh",
            LoadUnit::Kilowatts => "kW",
            LoadUnit::Liters => "L",
            LoadUnit::CubicMeters => "m³",
        };
        write!(f, "{s}")
    }
}

/// Unit of raw irradiance samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IrradianceUnit {
    /// Equivalent peak-sun-hours accumulated over the period — canonical.
    PeakSunHours,
    /// Mean irradiance over the period (W/m²); converts against the
    /// 1000 W/m² standard-test-condition reference.
    WattsPerSquareMeter,
}

impl IrradianceUnit {
    /// Converts one raw sample to canonical peak-sun-hours per period.
    pub fn to_canonical(self, value: f32, period_hours: f32) -> f32 {
        match self {
            IrradianceUnit::PeakSunHours => value,
            IrradianceUnit::WattsPerSquareMeter => value * period_hours / 1000.0,
        }
    }

    /// Parses the config-file spelling of a unit.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "psh" => Some(IrradianceUnit::PeakSunHours),
            "w_m2" | "wm2" => Some(IrradianceUnit::WattsPerSquareMeter),
            _ => None,
        }
    }
}

impl fmt::Display for IrradianceUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            IrradianceUnit::PeakSunHours => "peak-sun-hours",
            IrradianceUnit::WattsPerSquareMeter => "W/m²",
        };
        write!(f, "{s}")
    }
}
