//! Psychometric test sessions: question banks, answer normalization, scoring and the
//! HTTP surface students use to take MBTI, RIASEC and GRIT tests.

pub mod bank;
pub mod domain;
pub mod repository;
pub mod router;
pub mod scoring;
pub mod service;
pub mod session;
pub mod transform;

#[cfg(test)]
mod tests;

pub use bank::{QuestionBank, StandardQuestionBank};
pub use domain::{
    GritComponent, MbtiPair, MbtiPole, QuestionView, RiasecCategory, SessionId, StudentId,
    TestStatus, TestType, UnknownTestType,
};
pub use repository::{InMemorySessionStore, RepositoryError, TestSessionStore};
pub use router::assessment_router;
pub use scoring::{
    GritLevel, GritResult, MbtiResult, RiasecResult, ScoringEngine, ScoringError, TestResult,
};
pub use service::{
    AnswerReceipt, AnswerSubmission, AssessmentService, AssessmentServiceError, StudentResults,
    TestOverview, TestProgress,
};
pub use session::{validate_answer, SubmissionError, TestSession};
pub use transform::{AnswerSheet, RawAnswer};
