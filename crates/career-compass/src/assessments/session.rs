use chrono::{DateTime, Utc};
use serde::Serialize;

use super::domain::{SessionId, StudentId, TestStatus, TestType};
use super::scoring::TestResult;
use super::transform::{self, RawAnswer};

const MBTI_RANGE: (f64, f64) = (-3.0, 3.0);
const LIKERT_RANGE: (f64, f64) = (1.0, 5.0);

/// A student's progress through one test, finalized exactly once.
#[derive(Debug, Clone, Serialize)]
pub struct TestSession {
    pub id: SessionId,
    pub student_id: StudentId,
    pub test_type: TestType,
    pub status: TestStatus,
    pub current_step: u16,
    total_questions: u16,
    pub answers: transform::AnswerSheet,
    pub result: Option<TestResult>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl TestSession {
    /// `total_questions` is the size of the bank the session is answered against.
    pub fn new(
        test_type: TestType,
        student_id: StudentId,
        total_questions: u16,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: SessionId::for_student(test_type, &student_id),
            student_id,
            test_type,
            status: TestStatus::NotStarted,
            current_step: 0,
            total_questions,
            answers: transform::AnswerSheet::new(),
            result: None,
            created_at: now,
            updated_at: now,
            completed_at: None,
        }
    }

    pub fn total_questions(&self) -> u16 {
        self.total_questions
    }

    pub fn is_completed(&self) -> bool {
        self.status == TestStatus::Completed
    }

    /// The step has reached the bank size, so the session may be scored.
    pub fn is_ready_to_complete(&self) -> bool {
        self.current_step >= self.total_questions()
    }

    /// Records an answer if the caller saw the current step. Step never moves backwards.
    ///
    /// Once every step is answered the sheet is frozen until the session is completed.
    pub fn apply_answer(
        &mut self,
        expected_step: u16,
        question_id: u16,
        value: RawAnswer,
        now: DateTime<Utc>,
    ) -> Result<(), SubmissionError> {
        if self.is_completed() {
            return Err(SubmissionError::SessionCompleted(self.test_type));
        }
        if self.is_ready_to_complete() {
            return Err(SubmissionError::AwaitingCompletion(self.test_type));
        }
        if self.current_step != expected_step {
            return Err(SubmissionError::StaleStep {
                expected: expected_step,
                found: self.current_step,
            });
        }

        self.answers.record(question_id, value);
        self.current_step = self.current_step.max(question_id);
        self.status = TestStatus::InProgress;
        self.updated_at = now;
        Ok(())
    }

    /// Stores a result scored from the answers seen at `scored_step`.
    ///
    /// A completed session keeps its original result. A result scored from a sheet that no
    /// longer matches the session is rejected.
    pub fn complete(
        &mut self,
        scored_step: u16,
        scored_answers: &transform::AnswerSheet,
        result: TestResult,
        now: DateTime<Utc>,
    ) -> Result<(), SubmissionError> {
        if self.is_completed() {
            return Ok(());
        }
        if self.current_step != scored_step || &self.answers != scored_answers {
            return Err(SubmissionError::StaleResult {
                scored: scored_step,
                found: self.current_step,
            });
        }
        if !self.is_ready_to_complete() {
            return Err(SubmissionError::Incomplete {
                test_type: self.test_type,
                answered: self.current_step,
                total: self.total_questions,
            });
        }
        self.status = TestStatus::Completed;
        self.result = Some(result);
        self.updated_at = now;
        self.completed_at = Some(now);
        Ok(())
    }
}

/// Rejections raised at the answer submission boundary.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SubmissionError {
    #[error("{test_type} answer must be between {min} and {max}, got {value}")]
    OutOfRangeAnswer {
        test_type: TestType,
        value: f64,
        min: f64,
        max: f64,
    },
    #[error("{test_type} answer must be {expected}")]
    InvalidAnswer {
        test_type: TestType,
        expected: &'static str,
    },
    #[error("{test_type} has {total} questions; question_number {question_number} is out of range")]
    UnknownQuestion {
        test_type: TestType,
        question_number: i64,
        total: u16,
    },
    #[error("{0} test is already completed")]
    SessionCompleted(TestType),
    #[error("every {0} question is answered; the test is waiting to be completed")]
    AwaitingCompletion(TestType),
    #[error("{test_type} test is incomplete: {answered} of {total} questions answered")]
    Incomplete {
        test_type: TestType,
        answered: u16,
        total: u16,
    },
    #[error("answer was based on step {expected} but the session is at step {found}")]
    StaleStep { expected: u16, found: u16 },
    #[error("result was scored at step {scored} but the session changed (now at step {found})")]
    StaleResult { scored: u16, found: u16 },
    #[error("session belongs to the {expected} test, not {found}")]
    TestTypeMismatch { expected: TestType, found: TestType },
}

/// Checks range and question number, returning the 1-based question id to store.
pub fn validate_answer(
    test_type: TestType,
    question_number: i64,
    answer: &RawAnswer,
    total: u16,
) -> Result<u16, SubmissionError> {
    let question_id =
        transform::question_id(question_number, total).ok_or(SubmissionError::UnknownQuestion {
            test_type,
            question_number,
            total,
        })?;

    let (min, max, expected) = match test_type {
        TestType::Mbti => (MBTI_RANGE.0, MBTI_RANGE.1, "an integer between -3 and 3"),
        TestType::Riasec => {
            if let RawAnswer::Flag(_) = answer {
                return Ok(question_id);
            }
            (
                LIKERT_RANGE.0,
                LIKERT_RANGE.1,
                "a boolean or an integer between 1 and 5",
            )
        }
        TestType::Grit => (LIKERT_RANGE.0, LIKERT_RANGE.1, "an integer between 1 and 5"),
    };

    let value = match answer {
        RawAnswer::Number(value) if value.is_finite() => *value,
        _ => {
            return Err(SubmissionError::InvalidAnswer {
                test_type,
                expected,
            })
        }
    };
    if value < min || value > max {
        return Err(SubmissionError::OutOfRangeAnswer {
            test_type,
            value,
            min,
            max,
        });
    }
    if value.fract() != 0.0 {
        return Err(SubmissionError::InvalidAnswer {
            test_type,
            expected,
        });
    }

    Ok(question_id)
}
