//! Sizing results and the aggregated report.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::model::SizingAssumptions;

use super::orchestrator::{RawSizingInput, SizingScope};

/// Well-known intermediate names shared between sizers.
///
/// The carbon calculator reads these from the PV result; keeping them as
/// constants avoids free-string drift between producer and consumer.
pub mod keys {
    /// Annual PV yield at the sized capacity (kWh/year).
    pub const ANNUAL_YIELD_KWH: &str = "annual_yield_kwh";
    /// Annual load demand (kWh/year).
    pub const ANNUAL_LOAD_KWH: &str = "annual_load_kwh";
}

/// One dimensioned figure: a name, a value, and its unit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Quantity {
    /// What the figure is.
    pub name: String,
    /// Numeric value.
    pub value: f32,
    /// Unit string (kWp, kWh, W, ...).
    pub unit: String,
}

impl Quantity {
    /// Builds a quantity from name, value, and unit.
    pub fn new(name: impl Into<String>, value: f32, unit: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value,
            unit: unit.into(),
        }
    }
}

/// Output of one sizer: the computed capacity plus the intermediate
/// quantities used to derive it, and any warnings attached along the way.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SizingResult {
    /// The dimensioned capacity this sizer produced.
    pub capacity: Quantity,
    /// Derivation audit trail, in computation order.
    pub intermediates: Vec<Quantity>,
    /// Non-fatal findings (extrapolation, area capping, ...).
    pub warnings: Vec<String>,
}

impl SizingResult {
    /// Builds a result with an empty audit trail.
    pub fn new(capacity: Quantity) -> Self {
        Self {
            capacity,
            intermediates: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Appends one intermediate quantity.
    pub fn push_intermediate(&mut self, name: impl Into<String>, value: f32, unit: impl Into<String>) {
        self.intermediates.push(Quantity::new(name, value, unit));
    }

    /// Looks up an intermediate value by name.
    pub fn intermediate(&self, name: &str) -> Option<f32> {
        self.intermediates
            .iter()
            .find(|q| q.name == name)
            .map(|q| q.value)
    }
}

/// Read-only aggregate of one complete sizing run.
///
/// Owned by the caller that requested the run; the engine holds no state
/// between runs. `created_at` is presentation metadata — the numeric content
/// of two reports over identical inputs is identical.
#[derive(Debug, Clone, Serialize)]
pub struct SizingReport {
    /// Site / scenario label.
    pub label: String,
    /// Which sizers ran.
    pub scope: SizingScope,
    /// When the report was assembled (UTC).
    pub created_at: DateTime<Utc>,
    /// Assumptions the run was configured with.
    pub assumptions: SizingAssumptions,
    /// The raw input bundle the run was fed, echoed for audit.
    pub input: RawSizingInput,
    /// PV array sizing; present in every scope.
    pub pv: SizingResult,
    /// Battery sizing, when in scope.
    pub battery: Option<SizingResult>,
    /// Pump sizing, when in scope.
    pub pump: Option<SizingResult>,
    /// Carbon offset estimate; present in every scope.
    pub carbon: Option<SizingResult>,
    /// Run-level warnings not attributable to a single sizer.
    pub warnings: Vec<String>,
}

fn write_result(f: &mut fmt::Formatter<'_>, heading: &str, r: &SizingResult) -> fmt::Result {
    writeln!(
        f,
        "{heading:<14} {:>10.3} {}",
        r.capacity.value, r.capacity.unit
    )?;
    for q in &r.intermediates {
        writeln!(f, "    {:<28} {:>12.4} {}", q.name, q.value, q.unit)?;
    }
    for w in &r.warnings {
        writeln!(f, "    warning: {w}")?;
    }
    Ok(())
}

impl fmt::Display for SizingReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Sizing Report: {} ({}) ---", self.label, self.scope)?;
        write_result(f, "PV array", &self.pv)?;
        if let Some(ref b) = self.battery {
            write_result(f, "Battery", b)?;
        }
        if let Some(ref p) = self.pump {
            write_result(f, "Pump", p)?;
        }
        if let Some(ref c) = self.carbon {
            write_result(f, "Carbon offset", c)?;
        }
        for w in &self.warnings {
            writeln!(f, "warning: {w}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intermediate_lookup_by_name() {
        let mut r = SizingResult::new(Quantity::new("pv_array", 3.125, "kWp"));
        r.push_intermediate("worst_day_psh", 4.0, "h/day");
        r.push_intermediate(keys::ANNUAL_YIELD_KWH, 3650.0, "kWh/year");
        assert_eq!(r.intermediate("worst_day_psh"), Some(4.0));
        assert_eq!(r.intermediate(keys::ANNUAL_YIELD_KWH), Some(3650.0));
        assert_eq!(r.intermediate("missing"), None);
    }

    fn demo_input() -> RawSizingInput {
        RawSizingInput {
            label: "Demo Site".into(),
            load_samples: vec![10.0],
            load_unit: crate::units::LoadUnit::KilowattHours,
            load_period_hours: 24.0,
            irradiance_samples: vec![4.0],
            irradiance_unit: crate::units::IrradianceUnit::PeakSunHours,
            irradiance_period_hours: 24.0,
            water_samples: None,
            water_unit: None,
            water_period_hours: None,
            loss_factors: Vec::new(),
            alignment: Default::default(),
        }
    }

    #[test]
    fn report_display_includes_sections_and_warnings() {
        let mut pv = SizingResult::new(Quantity::new("pv_array", 3.125, "kWp"));
        pv.warnings.push("array capped by available area".into());
        let report = SizingReport {
            label: "Demo Site".into(),
            scope: SizingScope::PvBattery,
            created_at: Utc::now(),
            assumptions: SizingAssumptions::default(),
            input: demo_input(),
            pv,
            battery: Some(SizingResult::new(Quantity::new("battery", 44.4, "kWh"))),
            pump: None,
            carbon: None,
            warnings: vec!["zero-irradiance run exceeds autonomy".into()],
        };
        let s = format!("{report}");
        assert!(s.contains("Demo Site"));
        assert!(s.contains("PV array"));
        assert!(s.contains("Battery"));
        assert!(!s.contains("Pump"));
        assert!(s.contains("array capped"));
        assert!(s.contains("zero-irradiance run exceeds autonomy"));
    }
}
