//! Static price plan catalog and meter assignment table

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;

use crate::domain::{DomainError, DomainResult, PricePlan, PricePlanRepository};

/// Read-only catalog built once (usually from configuration).
///
/// Plans keep the order they were supplied in.
#[derive(Debug, Clone)]
pub struct StaticPricePlanCatalog {
    plans: Vec<PricePlan>,
    assignments: HashMap<String, String>,
}

impl StaticPricePlanCatalog {
    /// Build a catalog from plans and `(meter_id, plan_id)` assignments.
    ///
    /// Fails when a plan is invalid, a plan id is repeated, or a meter is
    /// assigned to a plan the catalog does not contain.
    pub fn new<I, M, P>(plans: Vec<PricePlan>, assignments: I) -> DomainResult<Self>
    where
        I: IntoIterator<Item = (M, P)>,
        M: Into<String>,
        P: Into<String>,
    {
        let mut seen = HashSet::new();
        for plan in &plans {
            plan.validate()?;
            if !seen.insert(plan.id.as_str()) {
                return Err(DomainError::Validation(format!(
                    "duplicate price plan id {}",
                    plan.id
                )));
            }
        }

        let mut table = HashMap::new();
        for (meter_id, plan_id) in assignments {
            let (meter_id, plan_id) = (meter_id.into(), plan_id.into());
            if !seen.contains(plan_id.as_str()) {
                return Err(DomainError::NotFound {
                    entity: "PricePlan",
                    field: "id",
                    value: plan_id,
                });
            }
            table.insert(meter_id, plan_id);
        }

        Ok(Self {
            plans,
            assignments: table,
        })
    }

    pub fn plans(&self) -> &[PricePlan] {
        &self.plans
    }

    fn plan(&self, id: &str) -> Option<&PricePlan> {
        self.plans.iter().find(|p| p.id == id)
    }
}

#[async_trait]
impl PricePlanRepository for StaticPricePlanCatalog {
    async fn find_all(&self) -> DomainResult<Vec<PricePlan>> {
        Ok(self.plans.clone())
    }

    async fn find_for_meter(&self, meter_id: &str) -> DomainResult<Option<PricePlan>> {
        Ok(self
            .assignments
            .get(meter_id)
            .and_then(|plan_id| self.plan(plan_id))
            .cloned())
    }
}
