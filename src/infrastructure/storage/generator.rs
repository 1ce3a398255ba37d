//! Random demo readings
//!
//! Produces plausible meter histories so the service is usable without a
//! real metering backend. A fixed seed makes the output reproducible.

use std::ops::RangeInclusive;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::domain::Reading;

const HOUR: i64 = 3_600;
const DAY: i64 = 24 * HOUR;

/// Number of readings generated per meter.
pub const READINGS_PER_METER: RangeInclusive<usize> = 11..=30;

/// Upper bound (exclusive) of a generated power sample in kW.
pub const MAX_READING_KW: f64 = 2.0;

pub struct ReadingGenerator {
    rng: StdRng,
}

impl ReadingGenerator {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { rng }
    }

    /// Hourly readings stepping backwards from two days before `now`.
    pub fn generate(&mut self, now: i64) -> Vec<Reading> {
        let start = now - 2 * DAY;
        let count = self.rng.gen_range(READINGS_PER_METER);

        (0..count)
            .map(|i| {
                Reading::new(
                    start - i as i64 * HOUR,
                    self.rng.gen_range(0.0..MAX_READING_KW),
                )
            })
            .collect()
    }

    pub fn generate_for<'a, I>(&mut self, meter_ids: I, now: i64) -> Vec<(String, Vec<Reading>)>
    where
        I: IntoIterator<Item = &'a str>,
    {
        meter_ids
            .into_iter()
            .map(|id| (id.to_string(), self.generate(now)))
            .collect()
    }
}
