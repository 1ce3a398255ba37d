//! Price plan domain entity

use crate::domain::{DomainError, DomainResult};

/// A supplier's flat per-kWh tariff.
#[derive(Debug, Clone, PartialEq)]
pub struct PricePlan {
    pub id: String,
    pub supplier: String,
    /// Price per kWh
    pub rate: f64,
}

impl PricePlan {
    pub fn new(id: impl Into<String>, supplier: impl Into<String>, rate: f64) -> Self {
        Self {
            id: id.into(),
            supplier: supplier.into(),
            rate,
        }
    }

    /// Reject plans that would make every downstream cost meaningless.
    pub fn validate(&self) -> DomainResult<()> {
        if self.id.trim().is_empty() {
            return Err(DomainError::Validation(
                "price plan id must not be empty".to_string(),
            ));
        }
        if !self.rate.is_finite() || self.rate < 0.0 {
            return Err(DomainError::Validation(format!(
                "price plan {} has invalid rate {}: must be a finite non-negative number",
                self.id, self.rate
            )));
        }
        Ok(())
    }
}

// ── Tests ──────────────────────────────────────────────────────
