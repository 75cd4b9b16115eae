//! Validated value objects consumed by the sizers.
//!
//! All four models are constructed through validating builders that reject
//! malformed input at the boundary; sizers never re-validate raw data.

/// Scalar run configuration.
pub mod assumptions;
/// Site solar-resource profile.
pub mod irradiance;
/// Energy / water demand profile.
pub mod load;
/// Named derating factors.
pub mod losses;

pub use assumptions::SizingAssumptions;
pub use irradiance::IrradianceProfile;
pub use load::LoadProfile;
pub use losses::{LossChain, LossFactor};
