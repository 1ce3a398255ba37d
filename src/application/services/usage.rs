//! Usage service: price plan recommendation, comparison and weekly cost

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, warn};

use crate::domain::usage::{cost_for_all_plans, energy_cost, last_n_days, rank, WEEKLY_WINDOW_DAYS};
use crate::domain::{
    DomainError, DomainResult, PlanCost, PricePlan, PricePlanRepository, Reading,
    ReadingRepository,
};

/// Label attached to weekly usage results.
pub const WEEKLY_PERIOD: &str = "Last 7 days";

/// Per-plan costs for one meter, in catalog order.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanComparison {
    pub meter_id: String,
    pub price_plan_comparisons: Vec<PlanCost>,
}

/// Weekly cost under the meter's assigned plan.
#[derive(Debug, Clone, PartialEq)]
pub struct WeeklyUsageCost {
    pub meter_id: String,
    pub supplier: String,
    pub rate: f64,
    pub weekly_usage_cost: f64,
    pub period: &'static str,
}

/// Outcome of a weekly usage query.
///
/// A missing plan or missing data is an expected answer, not a failure.
#[derive(Debug, Clone, PartialEq)]
pub enum WeeklyUsage {
    Cost(WeeklyUsageCost),
    NoPricePlan { meter_id: String },
    NoReadings { meter_id: String },
}

impl WeeklyUsage {
    pub fn outcome(&self) -> &'static str {
        match self {
            Self::Cost(_) => "cost",
            Self::NoPricePlan { .. } => "no_price_plan",
            Self::NoReadings { .. } => "no_readings",
        }
    }
}

/// Service answering cost queries for a meter
pub struct UsageService {
    readings: Arc<dyn ReadingRepository>,
    price_plans: Arc<dyn PricePlanRepository>,
}

impl UsageService {
    pub fn new(
        readings: Arc<dyn ReadingRepository>,
        price_plans: Arc<dyn PricePlanRepository>,
    ) -> Self {
        Self {
            readings,
            price_plans,
        }
    }

    /// The price plan catalog, in catalog order.
    pub async fn price_plans(&self) -> DomainResult<Vec<PricePlan>> {
        self.price_plans.find_all().await
    }

    /// Every plan's cost for the meter's full history, cheapest first.
    pub async fn recommend(
        &self,
        meter_id: &str,
        limit: Option<usize>,
    ) -> DomainResult<Vec<PlanCost>> {
        let readings = self.require_readings(meter_id).await?;
        let plans = self.price_plans.find_all().await?;

        let ranked = rank(cost_for_all_plans(&plans, &readings), limit);

        info!(
            meter_id,
            readings = readings.len(),
            plans = plans.len(),
            ?limit,
            returned = ranked.len(),
            "Price plans recommended"
        );

        Ok(ranked)
    }

    /// Every plan's cost for the meter's full history, in catalog order.
    pub async fn compare(&self, meter_id: &str) -> DomainResult<PlanComparison> {
        let readings = self.require_readings(meter_id).await?;
        let plans = self.price_plans.find_all().await?;

        let price_plan_comparisons = cost_for_all_plans(&plans, &readings);

        info!(
            meter_id,
            readings = readings.len(),
            plans = plans.len(),
            "Price plans compared"
        );

        Ok(PlanComparison {
            meter_id: meter_id.to_string(),
            price_plan_comparisons,
        })
    }

    /// Weekly cost relative to the current time.
    pub async fn weekly_usage(&self, meter_id: &str) -> DomainResult<WeeklyUsage> {
        self.weekly_usage_at(meter_id, Utc::now().timestamp()).await
    }

    /// Cost of the readings taken in the seven days before `now` (epoch
    /// seconds) under the meter's assigned plan.
    pub async fn weekly_usage_at(&self, meter_id: &str, now: i64) -> DomainResult<WeeklyUsage> {
        let Some(plan) = self.price_plans.find_for_meter(meter_id).await? else {
            warn!(meter_id, "Weekly usage requested for meter without price plan");
            return Ok(WeeklyUsage::NoPricePlan {
                meter_id: meter_id.to_string(),
            });
        };

        let readings = match self.readings.find_by_meter(meter_id).await? {
            Some(readings) if !readings.is_empty() => readings,
            _ => {
                warn!(meter_id, "Weekly usage requested for meter without readings");
                return Ok(WeeklyUsage::NoReadings {
                    meter_id: meter_id.to_string(),
                });
            }
        };

        let weekly = last_n_days(&readings, now, WEEKLY_WINDOW_DAYS);
        let cost = energy_cost(&weekly, plan.rate);

        debug!(
            meter_id,
            total_readings = readings.len(),
            weekly_readings = weekly.len(),
            "Weekly window applied"
        );
        info!(
            meter_id,
            price_plan = plan.id.as_str(),
            rate = plan.rate,
            weekly_usage_cost = cost,
            "Weekly usage cost calculated"
        );

        Ok(WeeklyUsage::Cost(WeeklyUsageCost {
            meter_id: meter_id.to_string(),
            supplier: plan.supplier,
            rate: plan.rate,
            weekly_usage_cost: cost,
            period: WEEKLY_PERIOD,
        }))
    }

    async fn require_readings(&self, meter_id: &str) -> DomainResult<Vec<Reading>> {
        match self.readings.find_by_meter(meter_id).await? {
            Some(readings) if !readings.is_empty() => Ok(readings),
            _ => Err(DomainError::NoReadings {
                meter_id: meter_id.to_string(),
            }),
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::infrastructure::{InMemoryReadingStore, StaticPricePlanCatalog};

    const NOW: i64 = 1_700_000_000;
    const HOUR: i64 = 3_600;

    fn catalog() -> StaticPricePlanCatalog {
        StaticPricePlanCatalog::new(
            vec![
                PricePlan::new("price-plan-0", "Dr Evil's Dark Energy", 10.0),
                PricePlan::new("price-plan-1", "The Green Eco", 2.0),
                PricePlan::new("price-plan-2", "Power for Everyone", 1.0),
            ],
            [
                ("smart-meter-0", "price-plan-0"),
                ("smart-meter-2", "price-plan-2"),
                ("smart-meter-empty", "price-plan-1"),
            ],
        )
        .unwrap()
    }

    fn service() -> UsageService {
        let store = InMemoryReadingStore::with_readings([
            (
                "smart-meter-0",
                vec![
                    Reading::new(1_607_686_125, 0.26785),
                    Reading::new(1_607_599_724, 0.26785),
                    Reading::new(1_607_513_324, 0.26785),
                ],
            ),
            (
                "smart-meter-2",
                vec![
                    Reading::new(NOW - 7_200, 1.0),
                    Reading::new(NOW - 3_600, 1.2),
                    Reading::new(NOW, 0.8),
                    // Outside the weekly window
                    Reading::new(NOW - 9 * 24 * HOUR, 50.0),
                ],
            ),
            ("smart-meter-empty", vec![]),
            ("smart-meter-unassigned", vec![Reading::new(NOW, 1.0)]),
        ]);
        UsageService::new(Arc::new(store), Arc::new(catalog()))
    }

    #[tokio::test]
    async fn recommend_ranks_all_plans() {
        let ranked = service().recommend("smart-meter-0", None).await.unwrap();
        let ids: Vec<_> = ranked.iter().map(|c| c.price_plan_id.as_str()).collect();
        assert_eq!(ids, ["price-plan-2", "price-plan-1", "price-plan-0"]);
        assert_relative_eq!(ranked[0].cost, 0.26785 / 48.0, epsilon = 1e-12);
    }

    #[tokio::test]
    async fn recommend_with_limit_returns_cheapest() {
        let ranked = service().recommend("smart-meter-0", Some(1)).await.unwrap();
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].price_plan_id, "price-plan-2");
    }

    #[tokio::test]
    async fn recommend_without_readings_is_no_data() {
        let err = service().recommend("smart-meter-404", None).await.unwrap_err();
        assert_eq!(
            err,
            DomainError::NoReadings {
                meter_id: "smart-meter-404".into()
            }
        );
        assert!(service().recommend("smart-meter-empty", None).await.is_err());
    }

    #[tokio::test]
    async fn compare_keeps_catalog_order() {
        let comparison = service().compare("smart-meter-0").await.unwrap();
        assert_eq!(comparison.meter_id, "smart-meter-0");
        let ids: Vec<_> = comparison
            .price_plan_comparisons
            .iter()
            .map(|c| c.price_plan_id.as_str())
            .collect();
        assert_eq!(ids, ["price-plan-0", "price-plan-1", "price-plan-2"]);
        assert_relative_eq!(
            comparison.price_plan_comparisons[0].cost,
            0.26785 / 48.0 * 10.0,
            epsilon = 1e-12
        );
    }

    #[tokio::test]
    async fn weekly_usage_prices_only_recent_readings() {
        let WeeklyUsage::Cost(cost) = service()
            .weekly_usage_at("smart-meter-2", NOW)
            .await
            .unwrap()
        else {
            panic!("expected a cost");
        };

        assert_eq!(cost.meter_id, "smart-meter-2");
        assert_eq!(cost.supplier, "Power for Everyone");
        assert_eq!(cost.rate, 1.0);
        assert_eq!(cost.period, "Last 7 days");
        // 1.0 kW average over 2 h at 1.0 per kWh
        assert_relative_eq!(cost.weekly_usage_cost, 2.0, epsilon = 1e-9);
    }

    #[tokio::test]
    async fn weekly_usage_without_plan() {
        let outcome = service()
            .weekly_usage_at("smart-meter-unassigned", NOW)
            .await
            .unwrap();
        assert_eq!(
            outcome,
            WeeklyUsage::NoPricePlan {
                meter_id: "smart-meter-unassigned".into()
            }
        );
        assert_eq!(outcome.outcome(), "no_price_plan");
    }

    #[tokio::test]
    async fn weekly_usage_without_readings() {
        let outcome = service()
            .weekly_usage_at("smart-meter-empty", NOW)
            .await
            .unwrap();
        assert_eq!(
            outcome,
            WeeklyUsage::NoReadings {
                meter_id: "smart-meter-empty".into()
            }
        );
    }

    #[tokio::test]
    async fn weekly_usage_with_only_stale_readings_costs_zero() {
        // smart-meter-0's readings are from 2020, far outside the window.
        let outcome = service().weekly_usage_at("smart-meter-0", NOW).await.unwrap();
        let WeeklyUsage::Cost(cost) = outcome else {
            panic!("expected a cost");
        };
        assert_eq!(cost.weekly_usage_cost, 0.0);
    }

    #[tokio::test]
    async fn queries_are_repeatable() {
        let service = service();
        let first = service.compare("smart-meter-0").await.unwrap();
        let second = service.compare("smart-meter-0").await.unwrap();
        assert_eq!(first, second);

        let a = service.weekly_usage_at("smart-meter-2", NOW).await.unwrap();
        let b = service.weekly_usage_at("smart-meter-2", NOW).await.unwrap();
        assert_eq!(a, b);
    }
}
