//! Reading aggregation: mean power and elapsed time span

use crate::domain::Reading;

pub const SECONDS_PER_HOUR: i64 = 3_600;

/// Arithmetic mean of the reading values in kW.
///
/// Returns `None` for an empty slice.
pub fn average(readings: &[Reading]) -> Option<f64> {
    if readings.is_empty() {
        return None;
    }

    let total: f64 = readings.iter().map(|r| r.reading).sum();
    Some(total / readings.len() as f64)
}

/// Whole hours between the earliest and the latest reading.
///
/// The slice is neither sorted nor assumed to be sorted, so the same reading
/// set can be shared between concurrent requests. Returns `None` for an
/// empty slice and `Some(0)` for a single reading.
pub fn elapsed_hours(readings: &[Reading]) -> Option<i64> {
    let first = readings.iter().map(|r| r.time).min()?;
    let last = readings.iter().map(|r| r.time).max()?;

    // abs_diff cannot overflow; the quotient always fits back into i64.
    Some((last.abs_diff(first) / SECONDS_PER_HOUR as u64) as i64)
}

/// Per-request summary of a reading set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aggregate {
    pub average_kw: f64,
    pub elapsed_hours: i64,
    pub sample_count: usize,
}

impl Aggregate {
    pub fn from_readings(readings: &[Reading]) -> Option<Self> {
        Some(Self {
            average_kw: average(readings)?,
            elapsed_hours: elapsed_hours(readings)?,
            sample_count: readings.len(),
        })
    }

    /// At least two readings spanning one or more whole hours.
    pub fn has_time_span(&self) -> bool {
        self.sample_count >= 2 && self.elapsed_hours > 0
    }
}
