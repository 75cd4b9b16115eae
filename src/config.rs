//! TOML-based scenario configuration and preset definitions.

use std::fmt;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::model::SizingAssumptions;
use crate::sizing::{AlignmentPolicy, RawLossFactor, RawSizingInput};
use crate::units::{IrradianceUnit, LoadUnit};

/// Top-level scenario configuration parsed from TOML.
///
/// All fields have defaults matching the `homestead` preset. Load from TOML
/// with [`ScenarioConfig::from_toml_file`] or use
/// [`ScenarioConfig::homestead`] for the built-in default.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScenarioConfig {
    /// Site metadata.
    #[serde(default)]
    pub site: SiteConfig,
    /// Energy demand samples and unit.
    #[serde(default)]
    pub load: LoadConfig,
    /// Solar resource samples and unit.
    #[serde(default)]
    pub irradiance: IrradianceConfig,
    /// Water demand samples; empty unless a pump is sized.
    #[serde(default)]
    pub water: WaterConfig,
    /// PV derating factors.
    #[serde(default)]
    pub losses: LossesConfig,
    /// Battery, pump, and margin assumptions.
    #[serde(default)]
    pub assumptions: AssumptionsConfig,
    /// Emissions baseline selection and factors.
    #[serde(default)]
    pub carbon: CarbonConfig,
}

/// Site metadata.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Label carried onto the report.
    pub label: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            label: "Unnamed Site".to_string(),
        }
    }
}

/// Energy demand samples and unit.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoadConfig {
    /// Per-period demand samples.
    pub samples: Vec<f32>,
    /// Sample unit: `"kwh"` or `"kw"`.
    pub unit: String,
    /// Period length in hours.
    pub period_hours: f32,
}

impl Default for LoadConfig {
    fn default() -> Self {
        // A week of daily household demand (kWh/day).
        Self {
            samples: vec![9.5, 10.0, 10.5, 9.8, 10.2, 11.0, 9.0],
            unit: "kwh".to_string(),
            period_hours: 24.0,
        }
    }
}

/// Solar resource samples and unit.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IrradianceConfig {
    /// Per-period resource samples.
    pub samples: Vec<f32>,
    /// Sample unit: `"psh"` or `"w_m2"`.
    pub unit: String,
    /// Period length in hours.
    pub period_hours: f32,
    /// Period-count alignment policy: `"strict"` or `"repeat_irradiance"`.
    pub alignment: String,
}

impl Default for IrradianceConfig {
    fn default() -> Self {
        // Matching week of daily peak-sun-hours.
        Self {
            samples: vec![5.2, 4.8, 4.5, 5.5, 4.0, 5.0, 5.8],
            unit: "psh".to_string(),
            period_hours: 24.0,
            alignment: "strict".to_string(),
        }
    }
}

/// Water demand samples; empty disables pump sizing inputs.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default, deny_unknown_fields)]
pub struct WaterConfig {
    /// Per-period volume samples; empty means no water load.
    pub samples: Vec<f32>,
    /// Sample unit: `"liters"` or `"m3"`.
    pub unit: Option<String>,
    /// Period length in hours.
    pub period_hours: Option<f32>,
}

/// PV derating factors, each in (0, 1].
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LossesConfig {
    /// Wiring losses.
    pub wiring: f32,
    /// Inverter conversion losses.
    pub inverter: f32,
    /// Soiling losses.
    pub soiling: f32,
    /// Temperature derating.
    pub temperature: f32,
}

impl Default for LossesConfig {
    fn default() -> Self {
        Self {
            wiring: 0.98,
            inverter: 0.95,
            soiling: 0.97,
            temperature: 0.90,
        }
    }
}

/// Battery, pump, and margin assumptions.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AssumptionsConfig {
    /// Battery autonomy in days.
    pub autonomy_days: f32,
    /// Battery depth of discharge (0–1].
    pub depth_of_discharge: f32,
    /// Battery round-trip efficiency (0–1].
    pub round_trip_efficiency: f32,
    /// Pump system head in meters; 0 means unknown.
    pub pump_head_m: f32,
    /// Pump wire-to-water efficiency (0–1].
    pub pump_efficiency: f32,
    /// PV design margin [0–0.2].
    pub design_margin: f32,
    /// Installable array area in m²; 0 leaves the array uncapped.
    pub array_area_m2: f32,
    /// Module power density (kWp/m²).
    pub power_density_kwp_per_m2: f32,
    /// DC-to-AC ratio for the inverter rating.
    pub dc_ac_ratio: f32,
}

impl Default for AssumptionsConfig {
    fn default() -> Self {
        Self {
            autonomy_days: 1.0,
            depth_of_discharge: 0.8,
            round_trip_efficiency: 0.9,
            pump_head_m: 0.0,
            pump_efficiency: 0.55,
            design_margin: 0.05,
            array_area_m2: 0.0,
            power_density_kwp_per_m2: 0.19,
            dc_ac_ratio: 1.2,
        }
    }
}

/// Emissions baseline selection and factors.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CarbonConfig {
    /// Baseline displaced by the PV system: `"grid"` or `"diesel"`.
    pub baseline: String,
    /// Grid emissions factor (kg CO₂/kWh).
    pub grid_factor: f32,
    /// Diesel-generator emissions factor (kg CO₂/kWh).
    pub diesel_factor: f32,
}

impl Default for CarbonConfig {
    fn default() -> Self {
        Self {
            baseline: "grid".to_string(),
            grid_factor: 0.6,
            diesel_factor: 0.8,
        }
    }
}

/// Configuration error with field path and constraint description.
#[derive(Debug)]
pub struct ConfigError {
    /// Dotted field path (e.g., `"load.period_hours"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "config error: {} — {}", self.field, self.message)
    }
}

impl ScenarioConfig {
    /// Returns the homestead preset: a week of household demand, no pump.
    pub fn homestead() -> Self {
        Self {
            site: SiteConfig {
                label: "Homestead".to_string(),
            },
            load: LoadConfig::default(),
            irradiance: IrradianceConfig::default(),
            water: WaterConfig::default(),
            losses: LossesConfig::default(),
            assumptions: AssumptionsConfig::default(),
            carbon: CarbonConfig::default(),
        }
    }

    /// Returns the clinic preset: critical loads, long autonomy, diesel
    /// baseline.
    pub fn clinic() -> Self {
        Self {
            site: SiteConfig {
                label: "Rural Clinic".to_string(),
            },
            load: LoadConfig {
                samples: vec![18.0, 18.5, 17.5, 19.0, 18.0, 16.5, 16.0],
                ..LoadConfig::default()
            },
            assumptions: AssumptionsConfig {
                autonomy_days: 3.0,
                depth_of_discharge: 0.7,
                design_margin: 0.10,
                ..AssumptionsConfig::default()
            },
            carbon: CarbonConfig {
                baseline: "diesel".to_string(),
                ..CarbonConfig::default()
            },
            ..Self::homestead()
        }
    }

    /// Returns the irrigation preset: pump-dominated load with hourly water
    /// delivery.
    pub fn irrigation() -> Self {
        Self {
            site: SiteConfig {
                label: "Irrigation Block".to_string(),
            },
            load: LoadConfig {
                samples: vec![6.0, 6.5, 6.0, 7.0, 6.2, 6.8, 6.4],
                ..LoadConfig::default()
            },
            water: WaterConfig {
                samples: vec![
                    0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 1500.0, 3000.0, 4500.0, 4000.0, 3500.0, 2000.0,
                    1000.0, 500.0, 500.0, 1000.0, 2000.0, 1500.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0,
                ],
                unit: Some("liters".to_string()),
                period_hours: Some(1.0),
            },
            assumptions: AssumptionsConfig {
                pump_head_m: 25.0,
                pump_efficiency: 0.6,
                ..AssumptionsConfig::default()
            },
            ..Self::homestead()
        }
    }

    /// Available preset names.
    pub const PRESETS: &[&str] = &["homestead", "clinic", "irrigation"];

    /// Loads a scenario from a named preset.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the preset name is unknown.
    pub fn from_preset(name: &str) -> Result<Self, ConfigError> {
        match name {
            "homestead" => Ok(Self::homestead()),
            "clinic" => Ok(Self::clinic()),
            "irrigation" => Ok(Self::irrigation()),
            _ => Err(ConfigError {
                field: "preset".to_string(),
                message: format!(
                    "unknown preset \"{name}\", available: {}",
                    Self::PRESETS.join(", ")
                ),
            }),
        }
    }

    /// Parses a scenario from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is
    /// invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError {
            field: "scenario".to_string(),
            message: format!("cannot read \"{}\": {e}", path.display()),
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a scenario from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown
    /// fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError {
            field: "toml".to_string(),
            message: e.to_string(),
        })
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Field-level checks only; the engine re-validates semantic invariants
    /// (sample bounds, efficiency ranges) when the models are built.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if self.load.samples.is_empty() {
            errors.push(ConfigError {
                field: "load.samples".into(),
                message: "must contain at least one period".into(),
            });
        }
        if LoadUnit::parse(&self.load.unit).is_none_or(|u| u.kind() != crate::units::LoadKind::Energy)
        {
            errors.push(ConfigError {
                field: "load.unit".into(),
                message: format!("must be \"kwh\" or \"kw\", got \"{}\"", self.load.unit),
            });
        }
        if self.load.period_hours <= 0.0 {
            errors.push(ConfigError {
                field: "load.period_hours".into(),
                message: "must be > 0".into(),
            });
        }

        if self.irradiance.samples.is_empty() {
            errors.push(ConfigError {
                field: "irradiance.samples".into(),
                message: "must contain at least one period".into(),
            });
        }
        if IrradianceUnit::parse(&self.irradiance.unit).is_none() {
            errors.push(ConfigError {
                field: "irradiance.unit".into(),
                message: format!("must be \"psh\" or \"w_m2\", got \"{}\"", self.irradiance.unit),
            });
        }
        if self.irradiance.period_hours <= 0.0 {
            errors.push(ConfigError {
                field: "irradiance.period_hours".into(),
                message: "must be > 0".into(),
            });
        }
        if self.parse_alignment().is_none() {
            errors.push(ConfigError {
                field: "irradiance.alignment".into(),
                message: format!(
                    "must be \"strict\" or \"repeat_irradiance\", got \"{}\"",
                    self.irradiance.alignment
                ),
            });
        }

        if !self.water.samples.is_empty() {
            match self.water.unit.as_deref().map(LoadUnit::parse) {
                Some(Some(u)) if u.kind() == crate::units::LoadKind::Water => {}
                _ => errors.push(ConfigError {
                    field: "water.unit".into(),
                    message: "must be \"liters\" or \"m3\" when water samples are given".into(),
                }),
            }
            if self.water.period_hours.is_none_or(|p| p <= 0.0) {
                errors.push(ConfigError {
                    field: "water.period_hours".into(),
                    message: "must be > 0 when water samples are given".into(),
                });
            }
        }

        for (name, value) in [
            ("losses.wiring", self.losses.wiring),
            ("losses.inverter", self.losses.inverter),
            ("losses.soiling", self.losses.soiling),
            ("losses.temperature", self.losses.temperature),
        ] {
            if !(value > 0.0 && value <= 1.0) {
                errors.push(ConfigError {
                    field: name.into(),
                    message: format!("must be in (0, 1], got {value}"),
                });
            }
        }

        let a = &self.assumptions;
        if a.autonomy_days < 0.0 {
            errors.push(ConfigError {
                field: "assumptions.autonomy_days".into(),
                message: "must be >= 0".into(),
            });
        }
        for (name, value) in [
            ("assumptions.depth_of_discharge", a.depth_of_discharge),
            ("assumptions.round_trip_efficiency", a.round_trip_efficiency),
            ("assumptions.pump_efficiency", a.pump_efficiency),
        ] {
            if !(value > 0.0 && value <= 1.0) {
                errors.push(ConfigError {
                    field: name.into(),
                    message: format!("must be in (0, 1], got {value}"),
                });
            }
        }

        if self.carbon.baseline != "grid" && self.carbon.baseline != "diesel" {
            errors.push(ConfigError {
                field: "carbon.baseline".into(),
                message: format!(
                    "must be \"grid\" or \"diesel\", got \"{}\"",
                    self.carbon.baseline
                ),
            });
        }
        if self.carbon.grid_factor < 0.0 || self.carbon.diesel_factor < 0.0 {
            errors.push(ConfigError {
                field: "carbon".into(),
                message: "emissions factors must be >= 0".into(),
            });
        }

        errors
    }

    /// The emissions factor selected by the configured baseline.
    pub fn emissions_factor(&self) -> f32 {
        if self.carbon.baseline == "diesel" {
            self.carbon.diesel_factor
        } else {
            self.carbon.grid_factor
        }
    }

    fn parse_alignment(&self) -> Option<AlignmentPolicy> {
        match self.irradiance.alignment.as_str() {
            "strict" => Some(AlignmentPolicy::Strict),
            "repeat_irradiance" => Some(AlignmentPolicy::RepeatIrradiance),
            _ => None,
        }
    }

    /// Bridges the config into the engine's raw input bundle.
    ///
    /// Call after [`ScenarioConfig::validate`]; unparseable units fall back
    /// to the canonical defaults here, since validation already reported
    /// them.
    pub fn to_input(&self) -> RawSizingInput {
        let water_present = !self.water.samples.is_empty();
        RawSizingInput {
            label: self.site.label.clone(),
            load_samples: self.load.samples.clone(),
            load_unit: LoadUnit::parse(&self.load.unit).unwrap_or(LoadUnit::KilowattHours),
            load_period_hours: self.load.period_hours,
            irradiance_samples: self.irradiance.samples.clone(),
            irradiance_unit: IrradianceUnit::parse(&self.irradiance.unit)
                .unwrap_or(IrradianceUnit::PeakSunHours),
            irradiance_period_hours: self.irradiance.period_hours,
            water_samples: water_present.then(|| self.water.samples.clone()),
            water_unit: water_present.then(|| {
                self.water
                    .unit
                    .as_deref()
                    .and_then(LoadUnit::parse)
                    .unwrap_or(LoadUnit::Liters)
            }),
            water_period_hours: water_present.then(|| self.water.period_hours.unwrap_or(24.0)),
            loss_factors: vec![
                RawLossFactor {
                    name: "wiring".into(),
                    factor: self.losses.wiring,
                },
                RawLossFactor {
                    name: "inverter".into(),
                    factor: self.losses.inverter,
                },
                RawLossFactor {
                    name: "soiling".into(),
                    factor: self.losses.soiling,
                },
                RawLossFactor {
                    name: "temperature".into(),
                    factor: self.losses.temperature,
                },
            ],
            alignment: self.parse_alignment().unwrap_or_default(),
        }
    }

    /// Bridges the config into the engine's assumptions object.
    pub fn to_assumptions(&self) -> SizingAssumptions {
        let a = &self.assumptions;
        SizingAssumptions {
            autonomy_days: a.autonomy_days,
            depth_of_discharge: a.depth_of_discharge,
            round_trip_efficiency: a.round_trip_efficiency,
            pump_head_m: (a.pump_head_m > 0.0).then_some(a.pump_head_m),
            pump_efficiency: a.pump_efficiency,
            emissions_factor_kg_per_kwh: self.emissions_factor(),
            design_margin: a.design_margin,
            array_area_m2: (a.array_area_m2 > 0.0).then_some(a.array_area_m2),
            power_density_kwp_per_m2: a.power_density_kwp_per_m2,
            dc_ac_ratio: a.dc_ac_ratio,
        }
    }

    /// Whether this scenario carries a water load (enables the pump scope).
    pub fn has_water_load(&self) -> bool {
        !self.water.samples.is_empty()
    }
}
