//! Price plan catalog, recommendation, comparison and weekly usage

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
