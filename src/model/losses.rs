//! Ordered chain of named derating factors.

use serde::Serialize;

use crate::sizing::error::ValidationError;

/// One named derating factor in (0, 1].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LossFactor {
    /// What this factor derates for (wiring, inverter, soiling, ...).
    pub name: String,
    /// The derating fraction.
    pub factor: f32,
}

/// Ordered set of derating factors whose product is the system derate.
///
/// A zero-efficiency chain is a validation error, not a valid
/// "infinite array" result; every factor must be in (0, 1]. An empty chain is
/// valid and derates by 1.0.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LossChain {
    factors: Vec<LossFactor>,
}

impl LossChain {
    /// Builds a chain from `(name, factor)` pairs.
    ///
    /// # Errors
    ///
    /// Returns a `ValidationError` if any factor is outside (0, 1] or not
    /// finite.
    pub fn build(factors: &[(&str, f32)]) -> Result<Self, ValidationError> {
        let mut out = Vec::with_capacity(factors.len());
        for &(name, factor) in factors {
            if !(factor > 0.0 && factor <= 1.0 && factor.is_finite()) {
                return Err(ValidationError::new(
                    format!("losses.{name}"),
                    format!("must be in (0, 1], got {factor}"),
                ));
            }
            out.push(LossFactor {
                name: name.to_string(),
                factor,
            });
        }
        Ok(Self { factors: out })
    }

    /// Product of all factors; > 0 by construction, 1.0 for an empty chain.
    pub fn derate(&self) -> f32 {
        self.factors.iter().map(|f| f.factor).product()
    }

    /// The individual factors, in order, for audit output.
    pub fn factors(&self) -> &[LossFactor] {
        &self.factors
    }
}
