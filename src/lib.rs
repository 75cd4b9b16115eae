//! Sizing calculation engine for off-grid and hybrid solar installations.
//!
//! Converts a validated load profile and site irradiance data into PV array
//! capacity, battery storage capacity, pump power, and an avoided-emissions
//! estimate. The engine is a pure, synchronous computation over immutable
//! inputs; the CLI, file export, and optional REST API are thin collaborators.

#[cfg(feature = "api")]
pub mod api;
/// TOML scenario configuration and named presets.
pub mod config;
pub mod io;
/// Validated, immutable input models (load, irradiance, losses, assumptions).
pub mod model;
/// The sizers, their error taxonomy, and the orchestrating entry point.
pub mod sizing;
pub mod units;
