//! Price plan DTOs

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::application::{PlanComparison, WeeklyUsageCost};
use crate::domain::{DomainError, PlanCost, PricePlan};

/// Catalog entry
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PricePlanDto {
    pub price_plan_id: String,
    pub supplier: String,
    /// Price per kWh
    pub rate: f64,
}

impl From<PricePlan> for PricePlanDto {
    fn from(p: PricePlan) -> Self {
        Self {
            price_plan_id: p.id,
            supplier: p.supplier,
            rate: p.rate,
        }
    }
}

/// Projected cost of a meter's usage under one plan
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PlanCostDto {
    pub price_plan_id: String,
    pub cost: f64,
}

impl From<PlanCost> for PlanCostDto {
    fn from(c: PlanCost) -> Self {
        Self {
            price_plan_id: c.price_plan_id,
            cost: c.cost,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PlanComparisonResponse {
    pub meter_id: String,
    /// One entry per plan, in catalog order
    pub price_plan_comparisons: Vec<PlanCostDto>,
}

impl From<PlanComparison> for PlanComparisonResponse {
    fn from(c: PlanComparison) -> Self {
        Self {
            meter_id: c.meter_id,
            price_plan_comparisons: c
                .price_plan_comparisons
                .into_iter()
                .map(Into::into)
                .collect(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyUsageResponse {
    pub meter_id: String,
    pub supplier: String,
    pub rate: f64,
    pub weekly_usage_cost: f64,
    /// Always `Last 7 days`
    pub period: String,
}

impl From<WeeklyUsageCost> for WeeklyUsageResponse {
    fn from(w: WeeklyUsageCost) -> Self {
        Self {
            meter_id: w.meter_id,
            supplier: w.supplier,
            rate: w.rate,
            weekly_usage_cost: w.weekly_usage_cost,
            period: w.period.to_string(),
        }
    }
}

/// Error payload for meter queries: `{error, meterId}`
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MeterErrorResponse {
    pub error: String,
    pub meter_id: String,
}

impl MeterErrorResponse {
    pub fn no_price_plan(meter_id: String) -> Self {
        Self {
            error: format!(
                "Smart meter {} does not have a price plan attached. \
                 Please contact customer service to set up a price plan.",
                meter_id
            ),
            meter_id,
        }
    }

    pub fn no_readings(meter_id: String) -> Self {
        Self::from_error(
            &DomainError::NoReadings {
                meter_id: meter_id.clone(),
            },
            meter_id,
        )
    }

    pub fn from_error(err: &DomainError, meter_id: String) -> Self {
        Self {
            error: err.to_string(),
            meter_id,
        }
    }
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct RecommendParams {
    /// Return only the N cheapest plans
    pub limit: Option<usize>,
}
