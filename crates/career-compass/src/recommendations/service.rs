use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use serde::Serialize;
use tracing::{info, warn};

use super::aggregate::{
    aggregate, AggregationError, CareerTunables, CompletedAssessments, UniversityTunables,
};
use super::client::{ExternalServiceError, RecommendationClient};
use super::schema::{
    parse_career_response, parse_university_response, AssessmentBlock, CareerMatch,
    ProfileAnalysis, UniversityRecommendationResponse,
};
use crate::assessments::domain::{StudentId, TestType};
use crate::assessments::repository::TestSessionStore;
use crate::assessments::service::{AssessmentService, AssessmentServiceError};

/// Career recommendations mapped for display alongside the recommender's assessment echo.
#[derive(Debug, Clone, Serialize)]
pub struct CareerAssessmentOutcome {
    pub assessment: AssessmentBlock,
    pub recommendations: Vec<CareerMatch>,
    pub message: String,
}

/// Builds recommender payloads from completed sessions and validates the replies.
pub struct RecommendationService<S, C> {
    assessments: Arc<AssessmentService<S>>,
    client: Arc<C>,
}

impl<S, C> RecommendationService<S, C>
where
    S: TestSessionStore + 'static,
    C: RecommendationClient + 'static,
{
    pub fn new(assessments: Arc<AssessmentService<S>>, client: Arc<C>) -> Self {
        Self {
            assessments,
            client,
        }
    }

    /// Rebuilds the aggregate from the student's stored sessions.
    pub fn completed_assessments(
        &self,
        student_id: &StudentId,
    ) -> Result<CompletedAssessments, RecommendationServiceError> {
        let sessions = self.assessments.sessions(student_id)?;
        let find = |test_type: TestType| {
            sessions
                .iter()
                .find(|(candidate, _)| *candidate == test_type)
                .and_then(|(_, session)| session.as_ref())
        };

        aggregate(
            find(TestType::Mbti),
            find(TestType::Riasec),
            find(TestType::Grit),
        )
        .map_err(|err| {
            warn!(student = %student_id.0, error = %err, "aggregation refused");
            RecommendationServiceError::from(err)
        })
    }

    pub async fn career_assessment(
        &self,
        student_id: &StudentId,
        tunables: CareerTunables,
    ) -> Result<CareerAssessmentOutcome, RecommendationServiceError> {
        let completed = self.completed_assessments(student_id)?;
        let request = completed.career_request(&tunables)?;

        info!(
            student = %student_id.0,
            mbti = request.mbti_answers.len(),
            riasec = request.riasec_answers.len(),
            grit = request.grit_answers.len(),
            "requesting career recommendations"
        );

        let raw = self
            .client
            .career_assessment(&request)
            .await
            .map_err(|err| log_external(student_id, err))?;
        let response = parse_career_response(raw).map_err(|err| log_external(student_id, err))?;

        let recommendations: Vec<CareerMatch> =
            response.recommendations.iter().map(CareerMatch::from).collect();
        info!(
            student = %student_id.0,
            count = recommendations.len(),
            "career recommendations received"
        );

        Ok(CareerAssessmentOutcome {
            message: format!("Found {} career recommendations", recommendations.len()),
            assessment: response.assessment,
            recommendations,
        })
    }

    pub async fn university_recommendations(
        &self,
        student_id: &StudentId,
        profile: Option<ProfileAnalysis>,
        tunables: UniversityTunables,
    ) -> Result<UniversityRecommendationResponse, RecommendationServiceError> {
        self.university_recommendations_on(student_id, profile, tunables, Utc::now().date_naive())
            .await
    }

    /// Same as [`Self::university_recommendations`] with an explicit default start date.
    pub async fn university_recommendations_on(
        &self,
        student_id: &StudentId,
        profile: Option<ProfileAnalysis>,
        tunables: UniversityTunables,
        today: NaiveDate,
    ) -> Result<UniversityRecommendationResponse, RecommendationServiceError> {
        let completed = self.completed_assessments(student_id)?;
        if profile.is_none() {
            warn!(student = %student_id.0, "no profile analysis supplied; using neutral pillars");
        }
        let request = completed.university_request(profile, &tunables, today)?;

        info!(
            student = %student_id.0,
            top_n = request.top_n,
            start = %request.start_date,
            "requesting university recommendations"
        );

        let raw = self
            .client
            .university_recommendation(&request)
            .await
            .map_err(|err| log_external(student_id, err))?;
        let response =
            parse_university_response(raw).map_err(|err| log_external(student_id, err))?;

        info!(
            student = %student_id.0,
            total = response.total_count(),
            "university recommendations received"
        );
        Ok(response)
    }
}

fn log_external(student_id: &StudentId, err: ExternalServiceError) -> ExternalServiceError {
    warn!(student = %student_id.0, error = %err, "recommendation service call failed");
    err
}

/// Error raised by the recommendation service.
#[derive(Debug, thiserror::Error)]
pub enum RecommendationServiceError {
    #[error(transparent)]
    Assessment(#[from] AssessmentServiceError),
    #[error(transparent)]
    Aggregation(#[from] AggregationError),
    #[error(transparent)]
    External(#[from] ExternalServiceError),
}
