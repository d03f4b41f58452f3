use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use super::schema::{CareerAssessmentRequest, UniversityRecommendationRequest};
use crate::config::RecommenderConfig;

/// Failure talking to the recommender. Never carries a partial result.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExternalServiceError {
    #[error("recommendation service unreachable: {0}")]
    Unreachable(String),
    #[error("recommendation service timed out after {0:?}")]
    Timeout(Duration),
    #[error("recommendation service returned status {0}")]
    Status(u16),
    #[error("invalid response from recommendation service: {0}")]
    InvalidResponse(String),
    #[error("recommendation service rejected the request: {0}")]
    Rejected(String),
}

/// Outbound calls to the recommender; responses are returned raw for schema validation.
#[async_trait]
pub trait RecommendationClient: Send + Sync {
    async fn career_assessment(
        &self,
        request: &CareerAssessmentRequest,
    ) -> Result<Value, ExternalServiceError>;

    async fn university_recommendation(
        &self,
        request: &UniversityRecommendationRequest,
    ) -> Result<Value, ExternalServiceError>;
}

/// `reqwest` backed client honoring the configured timeout.
pub struct HttpRecommendationClient {
    http: reqwest::Client,
    career_url: String,
    university_url: String,
    timeout: Duration,
}

impl HttpRecommendationClient {
    pub fn new(config: &RecommenderConfig) -> Result<Self, ExternalServiceError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|err| ExternalServiceError::Unreachable(err.to_string()))?;

        Ok(Self {
            http,
            career_url: config.career_url.clone(),
            university_url: config.university_url.clone(),
            timeout: config.timeout,
        })
    }

    async fn post_json<B>(&self, url: &str, body: &B) -> Result<Value, ExternalServiceError>
    where
        B: Serialize + Sync,
    {
        debug!(url, "calling recommendation service");
        let response = self
            .http
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|err| self.transport_error(err))?;

        let status = response.status();
        if !status.is_success() {
            warn!(url, status = status.as_u16(), "recommendation service returned an error");
            return Err(ExternalServiceError::Status(status.as_u16()));
        }

        response.json::<Value>().await.map_err(|err| {
            if err.is_timeout() {
                ExternalServiceError::Timeout(self.timeout)
            } else {
                ExternalServiceError::InvalidResponse(err.to_string())
            }
        })
    }

    fn transport_error(&self, err: reqwest::Error) -> ExternalServiceError {
        if err.is_timeout() {
            ExternalServiceError::Timeout(self.timeout)
        } else {
            ExternalServiceError::Unreachable(err.to_string())
        }
    }
}

#[async_trait]
impl RecommendationClient for HttpRecommendationClient {
    async fn career_assessment(
        &self,
        request: &CareerAssessmentRequest,
    ) -> Result<Value, ExternalServiceError> {
        self.post_json(&self.career_url, request).await
    }

    async fn university_recommendation(
        &self,
        request: &UniversityRecommendationRequest,
    ) -> Result<Value, ExternalServiceError> {
        self.post_json(&self.university_url, request).await
    }
}
