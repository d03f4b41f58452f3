use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::domain::{SessionId, StudentId, TestStatus, TestType};
use super::repository::{RepositoryError, TestSessionStore};
use super::scoring::TestResult;
use super::service::{AnswerSubmission, AssessmentService, AssessmentServiceError};
use super::session::SubmissionError;

/// Router builder exposing the test-taking endpoints.
pub fn assessment_router<S>(service: Arc<AssessmentService<S>>) -> Router
where
    S: TestSessionStore + 'static,
{
    Router::new()
        .route(
            "/api/v1/tests/:test_type/:student_id/start",
            post(start_handler::<S>),
        )
        .route(
            "/api/v1/tests/:test_type/:student_id",
            get(progress_handler::<S>),
        )
        .route("/api/v1/tests/answer", post(answer_handler::<S>))
        .route("/api/v1/tests/complete", post(complete_handler::<S>))
        .route(
            "/api/v1/tests/results/:student_id",
            get(results_handler::<S>),
        )
        .with_state(service)
}

#[derive(Debug, Clone, Deserialize)]
pub struct CompletionRequest {
    pub test_type: TestType,
    pub student_id: StudentId,
}

#[derive(Serialize)]
struct Success<T> {
    success: bool,
    #[serde(flatten)]
    body: T,
}

fn success<T: Serialize>(status: StatusCode, body: T) -> Response {
    (
        status,
        axum::Json(Success {
            success: true,
            body,
        }),
    )
        .into_response()
}

pub(crate) fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    let payload = json!({
        "success": false,
        "error": message.into(),
    });
    (status, axum::Json(payload)).into_response()
}

fn parse_test_type(raw: &str) -> Result<TestType, Response> {
    raw.parse::<TestType>()
        .map_err(|err| error_response(StatusCode::BAD_REQUEST, err.to_string()))
}

pub(crate) fn submission_status(error: &SubmissionError) -> StatusCode {
    match error {
        SubmissionError::OutOfRangeAnswer { .. }
        | SubmissionError::InvalidAnswer { .. }
        | SubmissionError::UnknownQuestion { .. }
        | SubmissionError::TestTypeMismatch { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        SubmissionError::Incomplete { .. } => StatusCode::BAD_REQUEST,
        SubmissionError::SessionCompleted(_)
        | SubmissionError::AwaitingCompletion(_)
        | SubmissionError::StaleStep { .. }
        | SubmissionError::StaleResult { .. } => StatusCode::CONFLICT,
    }
}

pub(crate) fn repository_status(error: &RepositoryError) -> StatusCode {
    match error {
        RepositoryError::NotFound => StatusCode::NOT_FOUND,
        RepositoryError::Conflict => StatusCode::CONFLICT,
        RepositoryError::Rejected(rejection) => submission_status(rejection),
        RepositoryError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
    }
}

pub(crate) fn assessment_error_response(error: AssessmentServiceError) -> Response {
    let status = match &error {
        AssessmentServiceError::Submission(rejection) => submission_status(rejection),
        AssessmentServiceError::Scoring(_) => StatusCode::UNPROCESSABLE_ENTITY,
        AssessmentServiceError::Repository(RepositoryError::NotFound) => {
            return error_response(
                StatusCode::NOT_FOUND,
                "Test not found. Start a new test first.",
            );
        }
        AssessmentServiceError::Repository(other) => repository_status(other),
    };
    error_response(status, error.to_string())
}

#[derive(Serialize)]
struct SessionView {
    test_id: SessionId,
    test_type: TestType,
    status: TestStatus,
    current_step: u16,
    total_questions: u16,
}

pub(crate) async fn start_handler<S>(
    State(service): State<Arc<AssessmentService<S>>>,
    Path((test_type, student_id)): Path<(String, String)>,
) -> Response
where
    S: TestSessionStore + 'static,
{
    let test_type = match parse_test_type(&test_type) {
        Ok(test_type) => test_type,
        Err(response) => return response,
    };

    match service.start(test_type, &StudentId(student_id)) {
        Ok(session) => {
            let view = SessionView {
                total_questions: session.total_questions(),
                test_id: session.id,
                test_type: session.test_type,
                status: session.status,
                current_step: session.current_step,
            };
            success(StatusCode::OK, view)
        }
        Err(error) => assessment_error_response(error),
    }
}

pub(crate) async fn progress_handler<S>(
    State(service): State<Arc<AssessmentService<S>>>,
    Path((test_type, student_id)): Path<(String, String)>,
) -> Response
where
    S: TestSessionStore + 'static,
{
    let test_type = match parse_test_type(&test_type) {
        Ok(test_type) => test_type,
        Err(response) => return response,
    };

    match service.progress(test_type, &StudentId(student_id)) {
        Ok(progress) => success(StatusCode::OK, progress),
        Err(error) => assessment_error_response(error),
    }
}

pub(crate) async fn answer_handler<S>(
    State(service): State<Arc<AssessmentService<S>>>,
    axum::Json(submission): axum::Json<AnswerSubmission>,
) -> Response
where
    S: TestSessionStore + 'static,
{
    match service.submit_answer(submission) {
        Ok(receipt) => success(StatusCode::OK, receipt),
        Err(error) => assessment_error_response(error),
    }
}

#[derive(Serialize)]
struct CompletionView {
    test_id: SessionId,
    test_type: TestType,
    status: TestStatus,
    result: Option<TestResult>,
}

pub(crate) async fn complete_handler<S>(
    State(service): State<Arc<AssessmentService<S>>>,
    axum::Json(request): axum::Json<CompletionRequest>,
) -> Response
where
    S: TestSessionStore + 'static,
{
    match service.complete(request.test_type, &request.student_id) {
        Ok(session) => success(
            StatusCode::OK,
            CompletionView {
                test_id: session.id,
                test_type: session.test_type,
                status: session.status,
                result: session.result,
            },
        ),
        Err(error) => assessment_error_response(error),
    }
}

pub(crate) async fn results_handler<S>(
    State(service): State<Arc<AssessmentService<S>>>,
    Path(student_id): Path<String>,
) -> Response
where
    S: TestSessionStore + 'static,
{
    match service.results(&StudentId(student_id)) {
        Ok(results) => success(StatusCode::OK, results),
        Err(error) => assessment_error_response(error),
    }
}
