use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{DateTime, Utc};

use super::domain::{SessionId, StudentId, TestType};
use super::scoring::TestResult;
use super::session::{SubmissionError, TestSession};
use super::transform::{AnswerSheet, RawAnswer};

/// Storage abstraction for test sessions. Answer writes are compare-and-swap on the step.
pub trait TestSessionStore: Send + Sync {
    fn get(
        &self,
        test_type: TestType,
        student_id: &StudentId,
    ) -> Result<Option<TestSession>, RepositoryError>;
    fn fetch(&self, session_id: &SessionId) -> Result<Option<TestSession>, RepositoryError>;
    fn insert(&self, session: TestSession) -> Result<TestSession, RepositoryError>;
    fn upsert_answer(
        &self,
        session_id: &SessionId,
        expected_step: u16,
        question_id: u16,
        value: RawAnswer,
        at: DateTime<Utc>,
    ) -> Result<TestSession, RepositoryError>;
    /// Stores `result` only if the session still holds the step and answers it was scored from.
    fn mark_completed(
        &self,
        session_id: &SessionId,
        scored_step: u16,
        scored_answers: &AnswerSheet,
        result: TestResult,
        at: DateTime<Utc>,
    ) -> Result<TestSession, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("session already exists")]
    Conflict,
    #[error("session not found")]
    NotFound,
    #[error(transparent)]
    Rejected(#[from] SubmissionError),
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Process-local store keyed by session id.
#[derive(Debug, Default, Clone)]
pub struct InMemorySessionStore {
    sessions: Arc<Mutex<HashMap<SessionId, TestSession>>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<SessionId, TestSession>>, RepositoryError> {
        self.sessions
            .lock()
            .map_err(|_| RepositoryError::Unavailable("session store lock poisoned".to_string()))
    }
}

impl TestSessionStore for InMemorySessionStore {
    fn get(
        &self,
        test_type: TestType,
        student_id: &StudentId,
    ) -> Result<Option<TestSession>, RepositoryError> {
        let guard = self.lock()?;
        Ok(guard
            .values()
            .find(|session| session.test_type == test_type && &session.student_id == student_id)
            .cloned())
    }

    fn fetch(&self, session_id: &SessionId) -> Result<Option<TestSession>, RepositoryError> {
        let guard = self.lock()?;
        Ok(guard.get(session_id).cloned())
    }

    fn insert(&self, session: TestSession) -> Result<TestSession, RepositoryError> {
        let mut guard = self.lock()?;
        let duplicate = guard.contains_key(&session.id)
            || guard.values().any(|existing| {
                existing.test_type == session.test_type
                    && existing.student_id == session.student_id
            });
        if duplicate {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(session.id.clone(), session.clone());
        Ok(session)
    }

    fn upsert_answer(
        &self,
        session_id: &SessionId,
        expected_step: u16,
        question_id: u16,
        value: RawAnswer,
        at: DateTime<Utc>,
    ) -> Result<TestSession, RepositoryError> {
        let mut guard = self.lock()?;
        let session = guard.get_mut(session_id).ok_or(RepositoryError::NotFound)?;
        session.apply_answer(expected_step, question_id, value, at)?;
        Ok(session.clone())
    }

    fn mark_completed(
        &self,
        session_id: &SessionId,
        scored_step: u16,
        scored_answers: &AnswerSheet,
        result: TestResult,
        at: DateTime<Utc>,
    ) -> Result<TestSession, RepositoryError> {
        let mut guard = self.lock()?;
        let session = guard.get_mut(session_id).ok_or(RepositoryError::NotFound)?;
        session.complete(scored_step, scored_answers, result, at)?;
        Ok(session.clone())
    }
}
