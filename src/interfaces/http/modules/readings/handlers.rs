//! Meter reading REST API handlers

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use super::dto::{ReadingDto, StoreReadingsRequest, StoreReadingsResponse};
use crate::application::ReadingService;
use crate::interfaces::http::common::{status_for, ApiResponse, ValidatedJson};

#[derive(Clone)]
pub struct ReadingState {
    pub service: Arc<ReadingService>,
}

#[utoipa::path(
    post,
    path = "/api/v1/readings/store",
    tag = "Readings",
    request_body = StoreReadingsRequest,
    responses(
        (status = 200, description = "Readings appended", body = ApiResponse<StoreReadingsResponse>),
        (status = 400, description = "Malformed JSON"),
        (status = 422, description = "Invalid meter id or readings")
    )
)]
pub async fn store_readings(
    State(state): State<ReadingState>,
    ValidatedJson(body): ValidatedJson<StoreReadingsRequest>,
) -> Result<Json<ApiResponse<StoreReadingsResponse>>, (StatusCode, Json<ApiResponse<()>>)> {
    let readings = body.electricity_readings.into_iter().map(Into::into).collect();

    match state.service.store(&body.smart_meter_id, readings).await {
        Ok(stored) => Ok(Json(ApiResponse::success(StoreReadingsResponse {
            meter_id: body.smart_meter_id,
            stored,
        }))),
        Err(e) => Err((status_for(&e), Json(ApiResponse::error(e.to_string())))),
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/readings/read/{meter_id}",
    tag = "Readings",
    params(("meter_id" = String, Path, description = "Smart meter ID")),
    responses(
        (status = 200, description = "All readings of the meter", body = ApiResponse<Vec<ReadingDto>>),
        (status = 404, description = "No readings for the meter")
    )
)]
pub async fn read_readings(
    State(state): State<ReadingState>,
    Path(meter_id): Path<String>,
) -> Result<Json<ApiResponse<Vec<ReadingDto>>>, (StatusCode, Json<ApiResponse<()>>)> {
    match state.service.read(&meter_id).await {
        Ok(readings) => Ok(Json(ApiResponse::success(
            readings.into_iter().map(Into::into).collect(),
        ))),
        Err(e) => Err((status_for(&e), Json(ApiResponse::error(e.to_string())))),
    }
}
