//! Cost calculation from aggregated readings

use super::aggregate::Aggregate;
use crate::domain::Reading;

/// Outcome of a cost computation.
///
/// A cost is undefined when no whole hour has elapsed across the readings
/// (or there are no readings at all); it is never reported as a non-finite
/// number.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UsageCost {
    Computed(f64),
    Undefined,
}

impl UsageCost {
    pub fn value(self) -> Option<f64> {
        match self {
            Self::Computed(v) => Some(v),
            Self::Undefined => None,
        }
    }

    /// Degenerate time spans cost nothing.
    pub fn or_zero(self) -> f64 {
        self.value().unwrap_or(0.0)
    }

    pub fn map(self, f: impl FnOnce(f64) -> f64) -> Self {
        match self {
            Self::Computed(v) => Self::Computed(f(v)),
            Self::Undefined => Self::Undefined,
        }
    }

    /// Price a usage rate at `rate` per kWh.
    pub fn at_rate(self, rate: f64) -> Self {
        self.map(|usage| usage * rate)
    }
}

/// Average power divided by elapsed whole hours.
pub fn usage_rate(readings: &[Reading]) -> UsageCost {
    match Aggregate::from_readings(readings) {
        Some(agg) if agg.has_time_span() => {
            UsageCost::Computed(agg.average_kw / agg.elapsed_hours as f64)
        }
        _ => UsageCost::Undefined,
    }
}

/// Usage rate priced at `rate` per kWh.
///
/// `rate` is taken as-is; catalogs validate rates when they are built.
pub fn usage_cost(readings: &[Reading], rate: f64) -> UsageCost {
    usage_rate(readings).at_rate(rate)
}

/// Energy actually consumed across the readings (average kW × elapsed hours)
/// priced at `rate` per kWh.
///
/// Fewer than two readings cannot span any time and cost `0`.
pub fn energy_cost(readings: &[Reading], rate: f64) -> f64 {
    match Aggregate::from_readings(readings) {
        Some(agg) if agg.has_time_span() => agg.average_kw * agg.elapsed_hours as f64 * rate,
        _ => 0.0,
    }
}

// ── Tests ──────────────────────────────────────────────────────
