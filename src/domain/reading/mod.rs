//! Reading aggregate
//!
//! The reading entity and the reading-source interface.

pub mod model;
pub mod repository;

pub use model::Reading;
pub use repository::ReadingRepository;
