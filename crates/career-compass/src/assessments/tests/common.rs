use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::{DateTime, TimeZone, Utc};
use serde_json::Value;

use crate::assessments::bank::StandardQuestionBank;
use crate::assessments::domain::{SessionId, StudentId, TestType};
use crate::assessments::repository::{
    InMemorySessionStore, RepositoryError, TestSessionStore,
};
use crate::assessments::scoring::{ScoringEngine, TestResult};
use crate::assessments::service::{AnswerSubmission, AssessmentService};
use crate::assessments::session::TestSession;
use crate::assessments::transform::{AnswerSheet, RawAnswer};

pub(super) fn student() -> StudentId {
    StudentId("student-001".to_string())
}

pub(super) fn fixed_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 9, 1, 8, 30, 0)
        .single()
        .expect("valid timestamp")
}

pub(super) fn number(value: f64) -> RawAnswer {
    RawAnswer::Number(value)
}

pub(super) fn engine() -> ScoringEngine {
    ScoringEngine::new(&StandardQuestionBank)
}

/// Sheet answering every question of `test_type` through `answer(question_id)`.
pub(super) fn sheet_with(test_type: TestType, answer: impl Fn(u16) -> RawAnswer) -> AnswerSheet {
    (1..=test_type.question_count())
        .map(|id| (id, answer(id)))
        .collect()
}

pub(super) fn build_service() -> (
    AssessmentService<InMemorySessionStore>,
    Arc<InMemorySessionStore>,
) {
    let store = Arc::new(InMemorySessionStore::new());
    let service = AssessmentService::new(store.clone());
    (service, store)
}

pub(super) fn submission(
    session: &TestSession,
    question_number: i64,
    answer: RawAnswer,
) -> AnswerSubmission {
    AnswerSubmission {
        test_id: session.id.clone(),
        test_type: session.test_type,
        question_number,
        answer,
    }
}

/// Answers every question in order; the final answer completes the session.
pub(super) fn answer_all(
    service: &AssessmentService<InMemorySessionStore>,
    test_type: TestType,
    student: &StudentId,
    answer: impl Fn(u16) -> RawAnswer,
) -> TestSession {
    let session = service.start(test_type, student).expect("session starts");
    for number in 0..test_type.question_count() {
        service
            .submit_answer(submission(&session, i64::from(number), answer(number + 1)))
            .expect("answer accepted");
    }
    service
        .complete(test_type, student)
        .expect("completed session")
}

pub(super) struct UnavailableStore;

impl TestSessionStore for UnavailableStore {
    fn get(
        &self,
        _test_type: TestType,
        _student_id: &StudentId,
    ) -> Result<Option<TestSession>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _session_id: &SessionId) -> Result<Option<TestSession>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn insert(&self, _session: TestSession) -> Result<TestSession, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn upsert_answer(
        &self,
        _session_id: &SessionId,
        _expected_step: u16,
        _question_id: u16,
        _value: RawAnswer,
        _at: DateTime<Utc>,
    ) -> Result<TestSession, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn mark_completed(
        &self,
        _session_id: &SessionId,
        _scored_step: u16,
        _scored_answers: &AnswerSheet,
        _result: TestResult,
        _at: DateTime<Utc>,
    ) -> Result<TestSession, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

/// Store that lands a rewrite of question 1 between scoring and storing the result, the
/// way a concurrent request holding the final step would.
#[derive(Default)]
pub(super) struct InterleavingStore {
    pub(super) inner: InMemorySessionStore,
    pub(super) late_write: Mutex<Option<Result<TestSession, RepositoryError>>>,
}

impl TestSessionStore for InterleavingStore {
    fn get(
        &self,
        test_type: TestType,
        student_id: &StudentId,
    ) -> Result<Option<TestSession>, RepositoryError> {
        self.inner.get(test_type, student_id)
    }

    fn fetch(&self, session_id: &SessionId) -> Result<Option<TestSession>, RepositoryError> {
        self.inner.fetch(session_id)
    }

    fn insert(&self, session: TestSession) -> Result<TestSession, RepositoryError> {
        self.inner.insert(session)
    }

    fn upsert_answer(
        &self,
        session_id: &SessionId,
        expected_step: u16,
        question_id: u16,
        value: RawAnswer,
        at: DateTime<Utc>,
    ) -> Result<TestSession, RepositoryError> {
        self.inner
            .upsert_answer(session_id, expected_step, question_id, value, at)
    }

    fn mark_completed(
        &self,
        session_id: &SessionId,
        scored_step: u16,
        scored_answers: &AnswerSheet,
        result: TestResult,
        at: DateTime<Utc>,
    ) -> Result<TestSession, RepositoryError> {
        let outcome = self
            .inner
            .upsert_answer(session_id, scored_step, 1, RawAnswer::Number(5.0), at);
        *self.late_write.lock().expect("late write lock") = Some(outcome);
        self.inner
            .mark_completed(session_id, scored_step, scored_answers, result, at)
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
