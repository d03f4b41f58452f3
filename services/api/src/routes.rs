use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use career_compass::assessments::{assessment_router, AssessmentService, TestSessionStore};
use career_compass::recommendations::{
    recommendation_router, RecommendationClient, RecommendationService,
};
use serde_json::json;
use std::sync::Arc;

/// Test-taking and recommendation routes plus the operational endpoints.
pub(crate) fn with_service_routes<S, C>(
    assessments: Arc<AssessmentService<S>>,
    recommendations: Arc<RecommendationService<S, C>>,
) -> axum::Router
where
    S: TestSessionStore + 'static,
    C: RecommendationClient + 'static,
{
    assessment_router(assessments)
        .merge(recommendation_router(recommendations))
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}
