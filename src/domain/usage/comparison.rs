//! Multi-plan cost comparison and ranking

use super::cost::usage_rate;
use crate::domain::{PricePlan, Reading};

/// Projected cost of a reading set under one price plan.
///
/// The plan id travels with its cost so that the pairing survives ranking.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanCost {
    pub price_plan_id: String,
    pub cost: f64,
}

/// Cost of the readings under every plan, in catalog order.
///
/// The usage rate is computed once and priced per plan. When no whole hour
/// has elapsed across the readings every plan costs `0`.
pub fn cost_for_all_plans(plans: &[PricePlan], readings: &[Reading]) -> Vec<PlanCost> {
    let usage = usage_rate(readings);

    plans
        .iter()
        .map(|plan| PlanCost {
            price_plan_id: plan.id.clone(),
            cost: usage.at_rate(plan.rate).or_zero(),
        })
        .collect()
}

/// Cheapest first, keeping at most `limit` entries.
///
/// The sort is stable: plans with equal cost keep their catalog order.
pub fn rank(mut costs: Vec<PlanCost>, limit: Option<usize>) -> Vec<PlanCost> {
    costs.sort_by(|a, b| a.cost.total_cmp(&b.cost));
    if let Some(limit) = limit {
        costs.truncate(limit);
    }
    costs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::usage::cost::usage_cost;

    fn catalog() -> Vec<PricePlan> {
        vec![
            PricePlan::new("price-plan-0", "Dr Evil's Dark Energy", 10.0),
            PricePlan::new("price-plan-1", "The Green Eco", 2.0),
            PricePlan::new("price-plan-2", "Power for Everyone", 1.0),
        ]
    }

    fn readings() -> Vec<Reading> {
        vec![
            Reading::new(1_607_686_125, 0.26785),
            Reading::new(1_607_599_724, 0.26785),
            Reading::new(1_607_513_324, 0.26785),
        ]
    }

    fn cost(id: &str, cost: f64) -> PlanCost {
        PlanCost {
            price_plan_id: id.to_string(),
            cost,
        }
    }

    #[test]
    fn one_entry_per_plan_in_catalog_order() {
        let costs = cost_for_all_plans(&catalog(), &readings());
        assert_eq!(
            costs,
            vec![
                cost("price-plan-0", 0.26785 / 48.0 * 10.0),
                cost("price-plan-1", 0.26785 / 48.0 * 2.0),
                cost("price-plan-2", 0.26785 / 48.0 * 1.0),
            ]
        );
    }

    #[test]
    fn plan_costs_match_single_plan_usage_cost() {
        let readings = readings();
        for (plan, entry) in catalog().iter().zip(cost_for_all_plans(&catalog(), &readings)) {
            assert_eq!(entry.cost, usage_cost(&readings, plan.rate).or_zero());
        }
    }

    #[test]
    fn degenerate_span_costs_zero_for_every_plan() {
        let costs = cost_for_all_plans(&catalog(), &[Reading::new(0, 1.5)]);
        assert_eq!(costs.len(), 3);
        assert!(costs.iter().all(|c| c.cost == 0.0));
    }

    #[test]
    fn empty_catalog_yields_nothing() {
        assert!(cost_for_all_plans(&[], &readings()).is_empty());
    }

    #[test]
    fn rank_sorts_ascending() {
        let ranked = rank(cost_for_all_plans(&catalog(), &readings()), None);
        let ids: Vec<_> = ranked.iter().map(|c| c.price_plan_id.as_str()).collect();
        assert_eq!(ids, ["price-plan-2", "price-plan-1", "price-plan-0"]);
    }

    #[test]
    fn rank_truncates_to_limit() {
        let costs = cost_for_all_plans(&catalog(), &readings());

        let top = rank(costs.clone(), Some(1));
        assert_eq!(top, vec![cost("price-plan-2", 0.26785 / 48.0)]);

        assert!(rank(costs.clone(), Some(0)).is_empty());
        assert_eq!(rank(costs, Some(10)).len(), 3);
    }

    #[test]
    fn rank_keeps_catalog_order_for_ties() {
        let ranked = rank(
            vec![cost("b", 1.0), cost("a", 1.0), cost("c", 0.5)],
            None,
        );
        let ids: Vec<_> = ranked.iter().map(|c| c.price_plan_id.as_str()).collect();
        assert_eq!(ids, ["c", "b", "a"]);
    }
}
