//! Meter reading DTOs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::Reading;

/// A single power sample
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema)]
pub struct ReadingDto {
    /// Epoch seconds
    pub time: i64,
    /// Power draw in kW
    pub reading: f64,
}

impl From<Reading> for ReadingDto {
    fn from(r: Reading) -> Self {
        Self {
            time: r.time,
            reading: r.reading,
        }
    }
}

impl From<ReadingDto> for Reading {
    fn from(r: ReadingDto) -> Self {
        Reading::new(r.time, r.reading)
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StoreReadingsRequest {
    #[validate(length(min = 1, max = 128, message = "smart meter id is required"))]
    pub smart_meter_id: String,
    #[validate(length(min = 1, message = "at least one reading is required"))]
    pub electricity_readings: Vec<ReadingDto>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StoreReadingsResponse {
    pub meter_id: String,
    /// Number of readings appended
    pub stored: usize,
}
