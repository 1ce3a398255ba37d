pub mod services;

// Re-export key types for convenience
pub use services::{
    PlanComparison, ReadingService, UsageService, WeeklyUsage, WeeklyUsageCost, WEEKLY_PERIOD,
};
