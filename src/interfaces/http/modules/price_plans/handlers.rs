//! Price plan REST API handlers

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use tracing::debug;

use super::dto::{
    MeterErrorResponse, PlanComparisonResponse, PlanCostDto, PricePlanDto, RecommendParams,
    WeeklyUsageResponse,
};
use crate::application::{UsageService, WeeklyUsage};
use crate::domain::DomainError;
use crate::interfaces::http::common::{status_for, ApiResponse};

#[derive(Clone)]
pub struct PricePlanState {
    pub service: Arc<UsageService>,
}

type MeterError = (StatusCode, Json<MeterErrorResponse>);

fn meter_error(meter_id: String, err: DomainError) -> MeterError {
    let status = status_for(&err);
    debug!(meter_id = meter_id.as_str(), %status, error = %err, "Price plan query rejected");
    (status, Json(MeterErrorResponse::from_error(&err, meter_id)))
}

#[utoipa::path(
    get,
    path = "/api/v1/price-plans",
    tag = "Price Plans",
    responses(
        (status = 200, description = "Price plan catalog", body = Vec<PricePlanDto>)
    )
)]
pub async fn list_price_plans(
    State(state): State<PricePlanState>,
) -> Result<Json<Vec<PricePlanDto>>, (StatusCode, Json<ApiResponse<()>>)> {
    match state.service.price_plans().await {
        Ok(plans) => Ok(Json(plans.into_iter().map(Into::into).collect())),
        Err(e) => Err((
            status_for(&e),
            Json(ApiResponse::error(format!("Failed to list price plans: {}", e))),
        )),
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/price-plans/recommend/{meter_id}",
    tag = "Price Plans",
    params(
        ("meter_id" = String, Path, description = "Smart meter ID"),
        RecommendParams
    ),
    responses(
        (status = 200, description = "Plans ranked cheapest first", body = Vec<PlanCostDto>),
        (status = 400, description = "Invalid limit"),
        (status = 404, description = "No readings for the meter", body = MeterErrorResponse)
    )
)]
pub async fn recommend(
    State(state): State<PricePlanState>,
    Path(meter_id): Path<String>,
    Query(params): Query<RecommendParams>,
) -> Result<Json<Vec<PlanCostDto>>, MeterError> {
    match state.service.recommend(&meter_id, params.limit).await {
        Ok(costs) => Ok(Json(costs.into_iter().map(Into::into).collect())),
        Err(e) => Err(meter_error(meter_id, e)),
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/price-plans/compare/{meter_id}",
    tag = "Price Plans",
    params(("meter_id" = String, Path, description = "Smart meter ID")),
    responses(
        (status = 200, description = "Cost under every plan, catalog order", body = PlanComparisonResponse),
        (status = 404, description = "No readings for the meter", body = MeterErrorResponse)
    )
)]
pub async fn compare(
    State(state): State<PricePlanState>,
    Path(meter_id): Path<String>,
) -> Result<Json<PlanComparisonResponse>, MeterError> {
    match state.service.compare(&meter_id).await {
        Ok(comparison) => Ok(Json(comparison.into())),
        Err(e) => Err(meter_error(meter_id, e)),
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/price-plans/weekly-usage/{meter_id}",
    tag = "Price Plans",
    params(("meter_id" = String, Path, description = "Smart meter ID")),
    responses(
        (status = 200, description = "Cost of the last 7 days under the assigned plan", body = WeeklyUsageResponse),
        (status = 404, description = "No price plan assigned or no readings", body = MeterErrorResponse)
    )
)]
pub async fn weekly_usage(
    State(state): State<PricePlanState>,
    Path(meter_id): Path<String>,
) -> Result<Json<WeeklyUsageResponse>, MeterError> {
    let outcome = match state.service.weekly_usage(&meter_id).await {
        Ok(outcome) => outcome,
        Err(e) => return Err(meter_error(meter_id, e)),
    };

    metrics::counter!("weekly_usage_queries_total", "outcome" => outcome.outcome()).increment(1);

    match outcome {
        WeeklyUsage::Cost(cost) => Ok(Json(cost.into())),
        WeeklyUsage::NoPricePlan { meter_id } => Err((
            StatusCode::NOT_FOUND,
            Json(MeterErrorResponse::no_price_plan(meter_id)),
        )),
        WeeklyUsage::NoReadings { meter_id } => Err((
            StatusCode::NOT_FOUND,
            Json(MeterErrorResponse::no_readings(meter_id)),
        )),
    }
}
