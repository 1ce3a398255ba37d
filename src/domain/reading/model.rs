//! Meter reading entity

/// Instantaneous power sample reported by a smart meter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reading {
    /// Sample time in epoch seconds
    pub time: i64,
    /// Power draw in kW
    pub reading: f64,
}

impl Reading {
    pub fn new(time: i64, reading: f64) -> Self {
        Self { time, reading }
    }

    /// A reading is usable for cost computation when its value is a finite,
    /// non-negative power and its timestamp is not before the epoch.
    pub fn is_valid(&self) -> bool {
        self.reading.is_finite() && self.reading >= 0.0 && self.time >= 0
    }
}
