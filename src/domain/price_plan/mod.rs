//! Price plan aggregate
//!
//! Contains the PricePlan entity and the catalog / meter-assignment interface.

pub mod model;
pub mod repository;

pub use model::PricePlan;
pub use repository::PricePlanRepository;
