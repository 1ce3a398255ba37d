//! In-process backings of the reading source and the price plan catalog

mod catalog;
mod generator;
mod memory;

pub use catalog::StaticPricePlanCatalog;
pub use generator::{ReadingGenerator, MAX_READING_KW, READINGS_PER_METER};
pub use memory::InMemoryReadingStore;
