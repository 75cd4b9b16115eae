//! One sizing run: input collection, fail-fast validation, sizer sequencing.

use std::fmt;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::model::{IrradianceProfile, LoadProfile, LossChain, SizingAssumptions};
use crate::units::{HOURS_PER_DAY, IrradianceUnit, LoadUnit};

use super::battery::BatterySizer;
use super::carbon::CarbonOffsetCalculator;
use super::error::{SizingError, ValidationError};
use super::pump::PumpSizer;
use super::pv::{AlignmentPolicy, PvArraySizer};
use super::result::SizingReport;

/// Which optional sizers run. PV and the carbon offset run in every scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SizingScope {
    /// PV array only.
    Pv,
    /// PV array plus battery bank.
    PvBattery,
    /// PV array, battery bank, and water pump.
    PvBatteryPump,
}

impl SizingScope {
    /// Parses the CLI spelling of a scope.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pv" => Some(SizingScope::Pv),
            "pv-battery" => Some(SizingScope::PvBattery),
            "pv-battery-pump" => Some(SizingScope::PvBatteryPump),
            _ => None,
        }
    }

    /// Whether battery sizing is part of this scope.
    pub fn includes_battery(self) -> bool {
        matches!(self, SizingScope::PvBattery | SizingScope::PvBatteryPump)
    }

    /// Whether pump sizing is part of this scope.
    pub fn includes_pump(self) -> bool {
        matches!(self, SizingScope::PvBatteryPump)
    }
}

impl fmt::Display for SizingScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SizingScope::Pv => "pv",
            SizingScope::PvBattery => "pv-battery",
            SizingScope::PvBatteryPump => "pv-battery-pump",
        };
        write!(f, "{s}")
    }
}

/// One named loss factor as supplied by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawLossFactor {
    /// What the factor derates for.
    pub name: String,
    /// Derating fraction, validated into (0, 1] at model build.
    pub factor: f32,
}

/// Raw, unvalidated input bundle for one sizing run.
///
/// This is the shape the UI/CLI layer hands over; the orchestrator turns it
/// into the immutable models of [`crate::model`] or fails with the first
/// validation error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawSizingInput {
    /// Site / scenario label carried onto the report.
    pub label: String,
    /// Raw energy demand samples.
    pub load_samples: Vec<f32>,
    /// Unit of `load_samples`.
    pub load_unit: LoadUnit,
    /// Period length of the load samples, hours.
    pub load_period_hours: f32,
    /// Raw solar resource samples.
    pub irradiance_samples: Vec<f32>,
    /// Unit of `irradiance_samples`.
    pub irradiance_unit: IrradianceUnit,
    /// Period length of the irradiance samples, hours.
    pub irradiance_period_hours: f32,
    /// Raw water demand samples; required for pump scope.
    #[serde(default)]
    pub water_samples: Option<Vec<f32>>,
    /// Unit of `water_samples`.
    #[serde(default)]
    pub water_unit: Option<LoadUnit>,
    /// Period length of the water samples, hours.
    #[serde(default)]
    pub water_period_hours: Option<f32>,
    /// Derating factors applied to the PV array.
    #[serde(default)]
    pub loss_factors: Vec<RawLossFactor>,
    /// Period-count alignment policy for PV sizing.
    #[serde(default)]
    pub alignment: AlignmentPolicy,
}

/// Lifecycle of a sizing run.
///
/// `Collecting → Validating → Sizing → Complete | Failed`. The two terminal
/// states carry the report or the first error; there are no retries — a
/// failure always means the input or assumptions must change.
#[derive(Debug)]
pub enum RunState {
    /// Accumulating raw inputs.
    Collecting,
    /// Building the immutable models (fail-fast).
    Validating,
    /// Invoking sizers in dependency order.
    Sizing,
    /// Run finished; report available.
    Complete(SizingReport),
    /// Run aborted with the first error encountered.
    Failed(SizingError),
}

/// A single sizing run, owning its inputs and assumptions.
///
/// Holds no state shared with any other run; independent runs may execute
/// fully in parallel.
#[derive(Debug)]
pub struct SizingRun {
    scope: SizingScope,
    assumptions: SizingAssumptions,
    label: String,
    load: Option<(Vec<f32>, f32, LoadUnit)>,
    irradiance: Option<(Vec<f32>, f32, IrradianceUnit)>,
    water: Option<(Vec<f32>, f32, LoadUnit)>,
    loss_factors: Vec<RawLossFactor>,
    alignment: AlignmentPolicy,
    state: RunState,
}

impl SizingRun {
    /// Starts a run in the `Collecting` state.
    pub fn new(assumptions: SizingAssumptions, scope: SizingScope) -> Self {
        Self {
            scope,
            assumptions,
            label: String::new(),
            load: None,
            irradiance: None,
            water: None,
            loss_factors: Vec::new(),
            alignment: AlignmentPolicy::default(),
            state: RunState::Collecting,
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> &RunState {
        &self.state
    }

    /// Supplies the energy load samples.
    pub fn set_load(&mut self, samples: Vec<f32>, period_hours: f32, unit: LoadUnit) {
        self.load = Some((samples, period_hours, unit));
    }

    /// Supplies the irradiance samples.
    pub fn set_irradiance(&mut self, samples: Vec<f32>, period_hours: f32, unit: IrradianceUnit) {
        self.irradiance = Some((samples, period_hours, unit));
    }

    /// Supplies the water demand samples.
    pub fn set_water(&mut self, samples: Vec<f32>, period_hours: f32, unit: LoadUnit) {
        self.water = Some((samples, period_hours, unit));
    }

    /// Supplies the PV loss factors.
    pub fn set_losses(&mut self, factors: Vec<RawLossFactor>) {
        self.loss_factors = factors;
    }

    /// Sets the period alignment policy (default: strict).
    pub fn set_alignment(&mut self, policy: AlignmentPolicy) {
        self.alignment = policy;
    }

    /// Sets the report label.
    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = label.into();
    }

    /// Absorbs a complete raw input bundle in one call.
    pub fn collect(&mut self, input: RawSizingInput) {
        self.set_label(input.label);
        self.set_load(input.load_samples, input.load_period_hours, input.load_unit);
        self.set_irradiance(
            input.irradiance_samples,
            input.irradiance_period_hours,
            input.irradiance_unit,
        );
        if let (Some(samples), Some(unit), Some(period)) = (
            input.water_samples,
            input.water_unit,
            input.water_period_hours,
        ) {
            self.set_water(samples, period, unit);
        }
        self.set_losses(input.loss_factors);
        self.set_alignment(input.alignment);
    }

    /// Whether every input the scope requires has been collected.
    pub fn ready(&self) -> bool {
        self.load.is_some()
            && self.irradiance.is_some()
            && (!self.scope.includes_pump() || self.water.is_some())
    }

    /// Drives the run from `Collecting` through to a terminal state.
    ///
    /// Calling `execute` on a terminal run is a no-op.
    pub fn execute(&mut self) {
        if !matches!(self.state, RunState::Collecting) {
            return;
        }
        self.state = RunState::Validating;
        match self.validate_and_size() {
            Ok(report) => self.state = RunState::Complete(report),
            Err(e) => self.state = RunState::Failed(e),
        }
    }

    /// Consumes the run, returning the report or the first error.
    pub fn into_result(self) -> Result<SizingReport, SizingError> {
        match self.state {
            RunState::Complete(report) => Ok(report),
            RunState::Failed(e) => Err(e),
            RunState::Collecting | RunState::Validating | RunState::Sizing => {
                Err(SizingError::Validation(ValidationError::new(
                    "run",
                    "sizing run was not executed to completion",
                )))
            }
        }
    }

    /// Reassembles the raw input bundle for the report's audit echo.
    fn input_echo(&self) -> RawSizingInput {
        let (load_samples, load_period_hours, load_unit) = self
            .load
            .clone()
            .unwrap_or((Vec::new(), 0.0, LoadUnit::KilowattHours));
        let (irradiance_samples, irradiance_period_hours, irradiance_unit) = self
            .irradiance
            .clone()
            .unwrap_or((Vec::new(), 0.0, IrradianceUnit::PeakSunHours));
        let (water_samples, water_unit, water_period_hours) = match self.water.clone() {
            Some((samples, period, unit)) => (Some(samples), Some(unit), Some(period)),
            None => (None, None, None),
        };
        RawSizingInput {
            label: self.label.clone(),
            load_samples,
            load_unit,
            load_period_hours,
            irradiance_samples,
            irradiance_unit,
            irradiance_period_hours,
            water_samples,
            water_unit,
            water_period_hours,
            loss_factors: self.loss_factors.clone(),
            alignment: self.alignment,
        }
    }

    fn validate_and_size(&mut self) -> Result<SizingReport, SizingError> {
        // -- Validating --
        if !self.ready() {
            let missing = if self.load.is_none() {
                "load"
            } else if self.irradiance.is_none() {
                "irradiance"
            } else {
                "water"
            };
            return Err(SizingError::Validation(ValidationError::new(
                format!("input.{missing}"),
                format!("required for scope {} but not supplied", self.scope),
            )));
        }

        self.assumptions.validate()?;

        // ready() already checked presence; the let-else keeps the path typed.
        let Some((load_samples, load_period, load_unit)) = self.load.clone() else {
            return Err(SizingError::Validation(ValidationError::new(
                "input.load",
                "not supplied",
            )));
        };
        let load = LoadProfile::build(&load_samples, load_period, load_unit, self.label.clone())?;

        let Some((irr_samples, irr_period, irr_unit)) = self.irradiance.clone() else {
            return Err(SizingError::Validation(ValidationError::new(
                "input.irradiance",
                "not supplied",
            )));
        };
        let irradiance = IrradianceProfile::build(&irr_samples, irr_period, irr_unit)?;

        let pairs: Vec<(&str, f32)> = self
            .loss_factors
            .iter()
            .map(|f| (f.name.as_str(), f.factor))
            .collect();
        let losses = LossChain::build(&pairs)?;

        let water = match &self.water {
            Some((samples, period, unit)) if self.scope.includes_pump() => Some(
                LoadProfile::build(samples, *period, *unit, format!("{} (water)", self.label))?,
            ),
            _ => None,
        };

        // -- Sizing (dependency order: PV first, carbon last) --
        self.state = RunState::Sizing;

        let pv = PvArraySizer::size(&load, &irradiance, &losses, &self.assumptions, self.alignment)?;

        let battery = if self.scope.includes_battery() {
            Some(BatterySizer::size(&load, &self.assumptions)?)
        } else {
            None
        };

        let pump = match water {
            Some(ref w) => Some(PumpSizer::size(w, &self.assumptions)?),
            None => None,
        };

        let carbon = Some(CarbonOffsetCalculator::estimate(&pv, &self.assumptions));

        let mut warnings = Vec::new();
        let zero_run_days =
            irradiance.longest_zero_run() as f32 * irradiance.period_hours() / HOURS_PER_DAY;
        if zero_run_days > self.assumptions.autonomy_days {
            warnings.push(format!(
                "continuous zero-irradiance periods ({zero_run_days:.1} days) exceed the configured autonomy window ({} days)",
                self.assumptions.autonomy_days
            ));
        }

        Ok(SizingReport {
            label: self.label.clone(),
            scope: self.scope,
            created_at: Utc::now(),
            assumptions: self.assumptions.clone(),
            input: self.input_echo(),
            pv,
            battery,
            pump,
            carbon,
            warnings,
        })
    }
}

/// The engine's single synchronous entry point.
///
/// Builds a [`SizingRun`], feeds it the raw input bundle, executes it, and
/// returns the report or the first failure. Pure and deterministic: identical
/// inputs and assumptions produce identical numeric content.
///
/// # Errors
///
/// Returns the first `SizingError` encountered during validation or sizing.
pub fn run_sizing(
    input: RawSizingInput,
    assumptions: SizingAssumptions,
    scope: SizingScope,
) -> Result<SizingReport, SizingError> {
    let mut run = SizingRun::new(assumptions, scope);
    run.collect(input);
    run.execute();
    run.into_result()
}
