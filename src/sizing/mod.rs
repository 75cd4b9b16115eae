//! The sizing calculation engine: sizers, errors, results, orchestration.

/// Battery nameplate sizing.
pub mod battery;
/// Avoided-emissions estimation.
pub mod carbon;
pub mod error;
pub mod orchestrator;
/// Water pump sizing.
pub mod pump;
/// PV array sizing and period alignment.
pub mod pv;
/// Sizing results and the aggregated report.
pub mod result;

pub use battery::BatterySizer;
pub use carbon::CarbonOffsetCalculator;
pub use error::{SizingError, ValidationError};
pub use orchestrator::{RawLossFactor, RawSizingInput, RunState, SizingRun, SizingScope, run_sizing};
pub use pump::PumpSizer;
pub use pv::{AlignmentPolicy, PvArraySizer};
pub use result::{Quantity, SizingReport, SizingResult};
