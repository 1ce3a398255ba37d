//! Trailing time-window filter

use chrono::TimeDelta;

use crate::domain::Reading;

/// Window used by the weekly usage report.
pub const WEEKLY_WINDOW_DAYS: u32 = 7;

/// Earliest timestamp (inclusive) that falls inside a `days`-long window
/// ending at `now`.
pub fn window_start(now: i64, days: u32) -> i64 {
    now - TimeDelta::days(i64::from(days)).num_seconds()
}

/// Readings taken within the last `days` days before `now`.
///
/// Relative order of the retained readings is preserved; the input is left
/// untouched.
pub fn last_n_days(readings: &[Reading], now: i64, days: u32) -> Vec<Reading> {
    let start = window_start(now, days);
    readings.iter().filter(|r| r.time >= start).copied().collect()
}
