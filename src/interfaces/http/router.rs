//! API Router with Swagger UI

use std::sync::Arc;

use axum::{extract::FromRef, middleware, routing::get, routing::post, Router};
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::application::{ReadingService, UsageService};
use crate::domain::{PricePlanRepository, ReadingRepository};

use super::common::ApiResponse;
use super::modules::health::{self, HealthState};
use super::modules::metrics::{http_metrics_middleware, prometheus_metrics, MetricsState};
use super::modules::price_plans::{self, PricePlanState};
use super::modules::readings::{self, ReadingState};
use super::modules::request_id::request_id_middleware;

/// Unified router state. Each handler extracts its own slice via `FromRef`.
#[derive(Clone)]
pub struct ApiState {
    pub usage_service: Arc<UsageService>,
    pub reading_service: Arc<ReadingService>,
    pub health: HealthState,
}

impl ApiState {
    pub fn new(
        readings: Arc<dyn ReadingRepository>,
        price_plans: Arc<dyn PricePlanRepository>,
    ) -> Self {
        Self {
            usage_service: Arc::new(UsageService::new(readings.clone(), price_plans)),
            reading_service: Arc::new(ReadingService::new(readings)),
            health: HealthState::new(),
        }
    }
}

impl FromRef<ApiState> for PricePlanState {
    fn from_ref(s: &ApiState) -> Self {
        PricePlanState {
            service: Arc::clone(&s.usage_service),
        }
    }
}

impl FromRef<ApiState> for ReadingState {
    fn from_ref(s: &ApiState) -> Self {
        ReadingState {
            service: Arc::clone(&s.reading_service),
        }
    }
}

impl FromRef<ApiState> for HealthState {
    fn from_ref(s: &ApiState) -> Self {
        s.health.clone()
    }
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        // Health
        health::health_check,
        // Price plans
        price_plans::list_price_plans,
        price_plans::recommend,
        price_plans::compare,
        price_plans::weekly_usage,
        // Readings
        readings::store_readings,
        readings::read_readings,
    ),
    components(
        schemas(
            // Common
            ApiResponse<String>,
            health::HealthResponse,
            // Price plans
            price_plans::PricePlanDto,
            price_plans::PlanCostDto,
            price_plans::PlanComparisonResponse,
            price_plans::WeeklyUsageResponse,
            price_plans::MeterErrorResponse,
            // Readings
            readings::ReadingDto,
            readings::StoreReadingsRequest,
            readings::StoreReadingsResponse,
        )
    ),
    tags(
        (name = "Health", description = "Service health check"),
        (name = "Price Plans", description = "Price plan catalog, recommendations, comparisons and weekly usage cost"),
        (name = "Readings", description = "Smart meter reading ingestion and retrieval"),
    ),
    info(
        title = "Energy Cost Service API",
        version = "1.0.0",
        description = "Energy usage cost metrics for smart meters under competing price plans",
        license(name = "MIT")
    )
)]
pub struct ApiDoc;

/// Create the API router with all routes.
///
/// `/metrics` is mounted only when a Prometheus handle is supplied.
pub fn create_api_router(state: ApiState, prometheus: Option<PrometheusHandle>) -> Router {
    let price_plan_routes = Router::new()
        .route("/", get(price_plans::list_price_plans))
        .route("/recommend/{meter_id}", get(price_plans::recommend))
        .route("/compare/{meter_id}", get(price_plans::compare))
        .route("/weekly-usage/{meter_id}", get(price_plans::weekly_usage));

    let reading_routes = Router::new()
        .route("/store", post(readings::store_readings))
        .route("/read/{meter_id}", get(readings::read_readings));

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let swagger_routes = SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi());

    let mut router = Router::new()
        .route("/health", get(health::health_check))
        .nest("/api/v1/price-plans", price_plan_routes)
        .nest("/api/v1/readings", reading_routes)
        .with_state(state)
        .merge(swagger_routes);

    if let Some(handle) = prometheus {
        router = router.merge(
            Router::new()
                .route("/metrics", get(prometheus_metrics))
                .with_state(MetricsState { handle }),
        );
    }

    router
        .layer(middleware::from_fn(http_metrics_middleware))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

// ── Tests ──────────────────────────────────────────────────────
