//! Deterministic scorers. Each is pure over its answer map and safe to share across threads.

mod grit;
mod mbti;
mod riasec;

pub use grit::{ComponentScore, GritLevel, GritResult, GritScorer};
pub use mbti::{MbtiResult, MbtiScorer};
pub use riasec::{RankedCategory, RiasecResult, RiasecScorer};

use serde::Serialize;

use super::bank::QuestionBank;
use super::domain::TestType;
use super::transform::{self, AnswerSheet};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScoringError {
    #[error("no {0} answers were provided to score")]
    InvalidInput(TestType),
}

/// Result of scoring one completed test.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "test_type", rename_all = "lowercase")]
pub enum TestResult {
    Mbti(MbtiResult),
    Riasec(RiasecResult),
    Grit(GritResult),
}

impl TestResult {
    pub fn test_type(&self) -> TestType {
        match self {
            TestResult::Mbti(_) => TestType::Mbti,
            TestResult::Riasec(_) => TestType::Riasec,
            TestResult::Grit(_) => TestType::Grit,
        }
    }

    pub fn as_mbti(&self) -> Option<&MbtiResult> {
        match self {
            TestResult::Mbti(result) => Some(result),
            _ => None,
        }
    }

    pub fn as_riasec(&self) -> Option<&RiasecResult> {
        match self {
            TestResult::Riasec(result) => Some(result),
            _ => None,
        }
    }

    pub fn as_grit(&self) -> Option<&GritResult> {
        match self {
            TestResult::Grit(result) => Some(result),
            _ => None,
        }
    }
}

/// Dispatches a stored answer sheet to the scorer for its test type.
///
/// Answer ids are read up to the size of the bank the engine was built from.
#[derive(Debug, Clone)]
pub struct ScoringEngine {
    mbti: MbtiScorer,
    riasec: RiasecScorer,
    grit: GritScorer,
    mbti_total: u16,
    riasec_total: u16,
    grit_total: u16,
}

impl ScoringEngine {
    pub fn new(bank: &dyn QuestionBank) -> Self {
        Self {
            mbti: MbtiScorer::new(bank.mbti()),
            riasec: RiasecScorer::new(bank.riasec()),
            grit: GritScorer::new(bank.grit()),
            mbti_total: bank.total(TestType::Mbti),
            riasec_total: bank.total(TestType::Riasec),
            grit_total: bank.total(TestType::Grit),
        }
    }

    pub fn score(
        &self,
        test_type: TestType,
        answers: Option<&AnswerSheet>,
    ) -> Result<TestResult, ScoringError> {
        let sheet = answers.ok_or(ScoringError::InvalidInput(test_type))?;
        match test_type {
            TestType::Mbti => {
                let answers = transform::mbti_answers(sheet, self.mbti_total);
                self.mbti.score(Some(&answers)).map(TestResult::Mbti)
            }
            TestType::Riasec => {
                let answers = transform::riasec_scoring_answers(sheet, self.riasec_total);
                self.riasec.score(Some(&answers)).map(TestResult::Riasec)
            }
            TestType::Grit => {
                let answers = transform::grit_answers(sheet, self.grit_total);
                self.grit.score(Some(&answers)).map(TestResult::Grit)
            }
        }
    }
}

pub(crate) fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
