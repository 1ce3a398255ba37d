//! Application services

mod readings;
mod usage;

pub use readings::ReadingService;
pub use usage::{PlanComparison, UsageService, WeeklyUsage, WeeklyUsageCost, WEEKLY_PERIOD};
