//! Price plan catalog interface

use async_trait::async_trait;

use super::model::PricePlan;
use crate::domain::DomainResult;

#[async_trait]
pub trait PricePlanRepository: Send + Sync {
    /// All plans, in catalog order.
    async fn find_all(&self) -> DomainResult<Vec<PricePlan>>;
    /// The plan assigned to a meter, if any.
    async fn find_for_meter(&self, meter_id: &str) -> DomainResult<Option<PricePlan>>;
}
