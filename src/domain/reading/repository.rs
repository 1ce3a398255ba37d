//! Reading source interface

use async_trait::async_trait;

use super::model::Reading;
use crate::domain::DomainResult;

/// Source of meter readings.
///
/// `find_by_meter` distinguishes a meter the source has never seen (`None`)
/// from one with an empty history (`Some(vec![])`); callers treat both as
/// "no data".
#[async_trait]
pub trait ReadingRepository: Send + Sync {
    async fn find_by_meter(&self, meter_id: &str) -> DomainResult<Option<Vec<Reading>>>;
    async fn append(&self, meter_id: &str, readings: Vec<Reading>) -> DomainResult<()>;
    async fn meter_ids(&self) -> DomainResult<Vec<String>>;
}
