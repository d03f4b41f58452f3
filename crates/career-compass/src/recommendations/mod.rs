//! Aggregation of completed tests into recommender payloads and the outbound client.

pub mod aggregate;
pub mod client;
pub mod router;
pub mod schema;
pub mod service;

#[cfg(test)]
mod tests;

pub use aggregate::{
    aggregate, AggregationError, CareerTunables, CompletedAssessments, UniversityTunables,
};
pub use client::{ExternalServiceError, HttpRecommendationClient, RecommendationClient};
pub use router::recommendation_router;
pub use schema::{
    parse_career_response, parse_university_response, sort_by_match_score, AssessmentBlock,
    CareerAssessmentRequest, CareerAssessmentResponse, CareerMatch, ProfileAnalysis,
    UniversityRecommendationRequest, UniversityRecommendationResponse, UniversityTier,
};
pub use service::{CareerAssessmentOutcome, RecommendationService, RecommendationServiceError};
