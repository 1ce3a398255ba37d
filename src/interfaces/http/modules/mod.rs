pub mod health;
pub mod metrics;
pub mod price_plans;
pub mod readings;
pub mod request_id;
