//! Usage and cost computation
//!
//! Pure functions over reading slices: aggregation, cost calculation,
//! trailing-window filtering and multi-plan comparison. Nothing here
//! mutates its input or holds state between calls.

pub mod aggregate;
pub mod comparison;
pub mod cost;
pub mod window;

pub use aggregate::{average, elapsed_hours, Aggregate};
pub use comparison::{cost_for_all_plans, rank, PlanCost};
pub use cost::{energy_cost, usage_cost, usage_rate, UsageCost};
pub use window::{last_n_days, window_start, WEEKLY_WINDOW_DAYS};
