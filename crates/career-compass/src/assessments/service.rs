use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::bank::{QuestionBank, StandardQuestionBank};
use super::domain::{QuestionView, SessionId, StudentId, TestStatus, TestType};
use super::repository::{RepositoryError, TestSessionStore};
use super::scoring::{ScoringEngine, ScoringError, TestResult};
use super::session::{validate_answer, SubmissionError, TestSession};
use super::transform::{AnswerSheet, RawAnswer};

const COMPLETED_MESSAGE: &str = "Test completed! Results are available.";
const SAVED_MESSAGE: &str = "Answer saved";

/// Payload for a single answer. `question_number` is 0-based.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerSubmission {
    pub test_id: SessionId,
    pub test_type: TestType,
    pub question_number: i64,
    pub answer: RawAnswer,
}

/// Outcome of recording an answer.
#[derive(Debug, Clone, Serialize)]
pub struct AnswerReceipt {
    pub test_id: SessionId,
    pub current_step: u16,
    pub total_questions: u16,
    pub is_completed: bool,
    pub result: Option<TestResult>,
    pub message: &'static str,
}

/// Full view of one test for resuming or displaying a session.
#[derive(Debug, Clone, Serialize)]
pub struct TestProgress {
    pub test_id: SessionId,
    pub test_type: TestType,
    pub status: TestStatus,
    pub current_step: u16,
    pub total_questions: u16,
    pub answers: AnswerSheet,
    pub questions: Vec<QuestionView>,
    pub result: Option<TestResult>,
}

/// Per-test line in a student's overview.
#[derive(Debug, Clone, Serialize)]
pub struct TestOverview {
    pub test_type: TestType,
    pub status: TestStatus,
    pub current_step: u16,
    pub total_questions: u16,
    pub result: Option<TestResult>,
}

#[derive(Debug, Clone, Serialize)]
pub struct StudentResults {
    pub student_id: StudentId,
    pub tests: Vec<TestOverview>,
    pub completed_count: usize,
    pub all_completed: bool,
}

/// Service composing the session store, question banks and scorers.
pub struct AssessmentService<S> {
    store: Arc<S>,
    bank: Arc<dyn QuestionBank>,
    engine: Arc<ScoringEngine>,
}

impl<S> AssessmentService<S>
where
    S: TestSessionStore + 'static,
{
    pub fn new(store: Arc<S>) -> Self {
        Self::with_bank(store, Arc::new(StandardQuestionBank))
    }

    pub fn with_bank(store: Arc<S>, bank: Arc<dyn QuestionBank>) -> Self {
        let engine = Arc::new(ScoringEngine::new(bank.as_ref()));
        Self {
            store,
            bank,
            engine,
        }
    }

    /// Returns the student's existing session or creates a NOT_STARTED one.
    pub fn start(
        &self,
        test_type: TestType,
        student_id: &StudentId,
    ) -> Result<TestSession, AssessmentServiceError> {
        if let Some(existing) = self.store.get(test_type, student_id)? {
            return Ok(existing);
        }

        let session = TestSession::new(
            test_type,
            student_id.clone(),
            self.bank.total(test_type),
            Utc::now(),
        );
        match self.store.insert(session) {
            Ok(created) => {
                info!(session = %created.id, test = %test_type, "test session started");
                Ok(created)
            }
            Err(RepositoryError::Conflict) => self
                .store
                .get(test_type, student_id)?
                .ok_or(AssessmentServiceError::Repository(RepositoryError::NotFound)),
            Err(other) => Err(other.into()),
        }
    }

    /// Records one answer and completes the session once the final step is reached.
    pub fn submit_answer(
        &self,
        submission: AnswerSubmission,
    ) -> Result<AnswerReceipt, AssessmentServiceError> {
        let session = self
            .store
            .fetch(&submission.test_id)?
            .ok_or(RepositoryError::NotFound)?;

        if session.test_type != submission.test_type {
            return Err(SubmissionError::TestTypeMismatch {
                expected: session.test_type,
                found: submission.test_type,
            }
            .into());
        }
        if session.is_completed() {
            return Err(SubmissionError::SessionCompleted(session.test_type).into());
        }

        let total = session.total_questions();
        let question_id = validate_answer(
            session.test_type,
            submission.question_number,
            &submission.answer,
            total,
        )?;

        let updated = self
            .store
            .upsert_answer(
                &session.id,
                session.current_step,
                question_id,
                submission.answer,
                Utc::now(),
            )
            .map_err(AssessmentServiceError::from_store)?;

        info!(
            session = %updated.id,
            question = question_id,
            step = updated.current_step,
            total,
            "answer recorded"
        );

        let finished = if updated.is_ready_to_complete() {
            self.finalize(updated)?
        } else {
            updated
        };

        let is_completed = finished.is_completed();
        Ok(AnswerReceipt {
            test_id: finished.id,
            current_step: finished.current_step,
            total_questions: total,
            is_completed,
            result: finished.result,
            message: if is_completed {
                COMPLETED_MESSAGE
            } else {
                SAVED_MESSAGE
            },
        })
    }

    /// Returns the stored result, scoring the session first if it is ready.
    pub fn complete(
        &self,
        test_type: TestType,
        student_id: &StudentId,
    ) -> Result<TestSession, AssessmentServiceError> {
        let session = self
            .store
            .get(test_type, student_id)?
            .ok_or(RepositoryError::NotFound)?;

        if session.is_completed() {
            return Ok(session);
        }
        if !session.is_ready_to_complete() {
            warn!(
                session = %session.id,
                step = session.current_step,
                "completion requested before the final question"
            );
            return Err(SubmissionError::Incomplete {
                test_type,
                answered: session.current_step,
                total: session.total_questions(),
            }
            .into());
        }

        self.finalize(session)
    }

    pub fn progress(
        &self,
        test_type: TestType,
        student_id: &StudentId,
    ) -> Result<TestProgress, AssessmentServiceError> {
        let session = self
            .store
            .get(test_type, student_id)?
            .ok_or(RepositoryError::NotFound)?;

        Ok(TestProgress {
            test_id: session.id.clone(),
            test_type,
            status: session.status,
            current_step: session.current_step,
            total_questions: session.total_questions(),
            answers: session.answers,
            questions: self.bank.questions(test_type),
            result: session.result,
        })
    }

    pub fn results(&self, student_id: &StudentId) -> Result<StudentResults, AssessmentServiceError> {
        let mut tests = Vec::with_capacity(TestType::ALL.len());
        for (test_type, session) in self.sessions(student_id)? {
            let overview = match session {
                Some(session) => TestOverview {
                    test_type,
                    status: session.status,
                    current_step: session.current_step,
                    total_questions: session.total_questions(),
                    result: session.result,
                },
                None => TestOverview {
                    test_type,
                    status: TestStatus::NotStarted,
                    current_step: 0,
                    total_questions: self.bank.total(test_type),
                    result: None,
                },
            };
            tests.push(overview);
        }

        let completed_count = tests
            .iter()
            .filter(|test| test.status == TestStatus::Completed)
            .count();

        Ok(StudentResults {
            student_id: student_id.clone(),
            all_completed: completed_count == TestType::ALL.len(),
            completed_count,
            tests,
        })
    }

    /// All three sessions for a student, in MBTI, RIASEC, GRIT order.
    pub fn sessions(
        &self,
        student_id: &StudentId,
    ) -> Result<Vec<(TestType, Option<TestSession>)>, AssessmentServiceError> {
        let mut sessions = Vec::with_capacity(TestType::ALL.len());
        for test_type in TestType::ALL {
            sessions.push((test_type, self.store.get(test_type, student_id)?));
        }
        Ok(sessions)
    }

    /// Scores the snapshot and stores the result if the session has not moved since.
    fn finalize(&self, session: TestSession) -> Result<TestSession, AssessmentServiceError> {
        let result = self
            .engine
            .score(session.test_type, Some(&session.answers))?;
        let completed = self
            .store
            .mark_completed(
                &session.id,
                session.current_step,
                &session.answers,
                result,
                Utc::now(),
            )
            .map_err(AssessmentServiceError::from_store)?;
        info!(session = %completed.id, test = %completed.test_type, "test session completed");
        Ok(completed)
    }
}

/// Error raised by the assessment service.
#[derive(Debug, thiserror::Error)]
pub enum AssessmentServiceError {
    #[error(transparent)]
    Submission(#[from] SubmissionError),
    #[error(transparent)]
    Scoring(#[from] ScoringError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl AssessmentServiceError {
    /// Surfaces store-side rejections as submission errors.
    fn from_store(error: RepositoryError) -> Self {
        match error {
            RepositoryError::Rejected(rejection) => Self::Submission(rejection),
            other => Self::Repository(other),
        }
    }
}
