//! API request and response types.

use serde::{Deserialize, Serialize};

use crate::model::SizingAssumptions;
use crate::sizing::{RawSizingInput, SizingScope};

/// Request body for `POST /size`.
#[derive(Debug, Deserialize)]
pub struct SizeRequest {
    /// Raw input bundle: samples, units, periods, loss factors.
    pub input: RawSizingInput,
    /// Scalar assumptions; defaults apply for omitted fields.
    #[serde(default)]
    pub assumptions: SizingAssumptions,
    /// Which sizers run; defaults to PV plus battery.
    #[serde(default = "default_scope")]
    pub scope: SizingScope,
}

fn default_scope() -> SizingScope {
    SizingScope::PvBattery
}

/// Error response body for 4xx errors.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable error message.
    pub error: String,
}
