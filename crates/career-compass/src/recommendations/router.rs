use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::aggregate::{AggregationError, CareerTunables, UniversityTunables};
use super::client::{ExternalServiceError, RecommendationClient};
use super::schema::{AssessmentBlock, CareerMatch, ProfileAnalysis};
use super::service::{RecommendationService, RecommendationServiceError};
use crate::assessments::domain::StudentId;
use crate::assessments::repository::TestSessionStore;
use crate::assessments::router::{assessment_error_response, error_response};

/// Router builder exposing the recommendation endpoints.
pub fn recommendation_router<S, C>(service: Arc<RecommendationService<S, C>>) -> Router
where
    S: TestSessionStore + 'static,
    C: RecommendationClient + 'static,
{
    Router::new()
        .route("/api/v1/career-assessment", post(career_handler::<S, C>))
        .route(
            "/api/v1/predict-universities",
            post(universities_handler::<S, C>),
        )
        .with_state(service)
}

#[derive(Debug, Clone, Deserialize)]
pub struct CareerAssessmentBody {
    pub student_id: StudentId,
    #[serde(default)]
    pub top_n: Option<u32>,
    #[serde(default)]
    pub min_match_score: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UniversityRecommendationBody {
    pub student_id: StudentId,
    #[serde(default)]
    pub profile_analysis: Option<ProfileAnalysis>,
    #[serde(default)]
    pub top_n: Option<u32>,
    #[serde(default)]
    pub min_match_score: Option<f64>,
    #[serde(default)]
    pub duration_months: Option<u32>,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
}

#[derive(Serialize)]
struct CareerAssessmentView {
    success: bool,
    assessment: AssessmentBlock,
    recommendations: Vec<CareerMatch>,
    message: String,
}

fn external_status(error: &ExternalServiceError) -> StatusCode {
    match error {
        ExternalServiceError::Unreachable(_)
        | ExternalServiceError::Timeout(_)
        | ExternalServiceError::Status(_) => StatusCode::SERVICE_UNAVAILABLE,
        ExternalServiceError::InvalidResponse(_) | ExternalServiceError::Rejected(_) => {
            StatusCode::BAD_GATEWAY
        }
    }
}

fn recommendation_error_response(error: RecommendationServiceError) -> Response {
    match error {
        RecommendationServiceError::Assessment(inner) => assessment_error_response(inner),
        RecommendationServiceError::Aggregation(inner) => {
            let status = match inner {
                AggregationError::MissingPrerequisite { .. } => StatusCode::BAD_REQUEST,
                AggregationError::InvalidTunable { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            };
            error_response(status, inner.to_string())
        }
        RecommendationServiceError::External(inner) => {
            error_response(external_status(&inner), inner.to_string())
        }
    }
}

pub(crate) async fn career_handler<S, C>(
    State(service): State<Arc<RecommendationService<S, C>>>,
    axum::Json(body): axum::Json<CareerAssessmentBody>,
) -> Response
where
    S: TestSessionStore + 'static,
    C: RecommendationClient + 'static,
{
    let defaults = CareerTunables::default();
    let tunables = CareerTunables {
        top_n: body.top_n.unwrap_or(defaults.top_n),
        min_match_score: body.min_match_score.unwrap_or(defaults.min_match_score),
    };

    match service.career_assessment(&body.student_id, tunables).await {
        Ok(outcome) => {
            let view = CareerAssessmentView {
                success: true,
                assessment: outcome.assessment,
                recommendations: outcome.recommendations,
                message: outcome.message,
            };
            (StatusCode::OK, axum::Json(view)).into_response()
        }
        Err(error) => recommendation_error_response(error),
    }
}

pub(crate) async fn universities_handler<S, C>(
    State(service): State<Arc<RecommendationService<S, C>>>,
    axum::Json(body): axum::Json<UniversityRecommendationBody>,
) -> Response
where
    S: TestSessionStore + 'static,
    C: RecommendationClient + 'static,
{
    let defaults = UniversityTunables::default();
    let tunables = UniversityTunables {
        top_n: body.top_n.unwrap_or(defaults.top_n),
        min_match_score: body.min_match_score.unwrap_or(defaults.min_match_score),
        duration_months: body.duration_months.unwrap_or(defaults.duration_months),
        start_date: body.start_date,
    };

    match service
        .university_recommendations(&body.student_id, body.profile_analysis, tunables)
        .await
    {
        Ok(response) => (StatusCode::OK, axum::Json(response)).into_response(),
        Err(error) => recommendation_error_response(error),
    }
}
