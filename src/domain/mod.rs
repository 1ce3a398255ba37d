pub mod error;
pub mod price_plan;
pub mod reading;
pub mod usage;

// Re-export commonly used types
pub use error::{DomainError, DomainResult};
pub use price_plan::{PricePlan, PricePlanRepository};
pub use reading::{Reading, ReadingRepository};
pub use usage::{PlanCost, UsageCost};
