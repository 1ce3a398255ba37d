//! HTTP REST API
//!
//! - `common`: response envelope, validated JSON extractor, error mapping
//! - `modules`: handlers and DTOs per resource, plus middleware
//! - `router`: API router with Swagger documentation

pub mod common;
pub mod modules;
pub mod router;

pub use router::{create_api_router, ApiDoc, ApiState};
