//! # Energy Cost Service
//!
//! Energy usage cost metrics for smart meters under competing price plans.
//!
//! ## Architecture
//!
//! The project follows Clean Architecture principles:
//!
//! - **domain**: Readings, price plans, the usage/cost computations and
//!   repository traits
//! - **application**: Query and ingestion services
//! - **infrastructure**: In-memory reading store, static price plan catalog
//!   and demo reading generator
//! - **interfaces**: REST API with Swagger documentation
//! - **shared**: Graceful shutdown coordination
//! - **server**: Runtime wiring used by the CLI binary

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod server;
pub mod shared;

pub use config::{default_config_path, AppConfig, ConfigError};

// Re-export API router
pub use interfaces::http::{create_api_router, ApiState};
