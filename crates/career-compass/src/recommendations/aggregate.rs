//! Merges three completed test sessions into the payloads the recommender consumes.
//!
//! The aggregate is never persisted; it is rebuilt from the authoritative sessions on every
//! request and refuses to run unless all three tests are COMPLETED.

use chrono::NaiveDate;

use super::schema::{
    AssessmentBlock, AssessmentOutput, CareerAssessmentRequest, GritBlock, MbtiBlock,
    ProfileAnalysis, RiasecBlock, UniversityRecommendationRequest,
};
use crate::assessments::domain::{MbtiPole, RiasecCategory, TestType};
use crate::assessments::scoring::{GritResult, MbtiResult, RiasecResult, TestResult};
use crate::assessments::session::TestSession;
use crate::assessments::transform::{self, AnswerSheet};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AggregationError {
    #[error(
        "please complete all tests (MBTI, RIASEC, GRIT) first; not completed: {}",
        labels(.missing)
    )]
    MissingPrerequisite { missing: Vec<TestType> },
    #[error("invalid {field}: {reason}")]
    InvalidTunable { field: &'static str, reason: String },
}

fn labels(missing: &[TestType]) -> String {
    missing
        .iter()
        .map(|test_type| test_type.label())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Knobs for the career recommendation call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CareerTunables {
    pub top_n: u32,
    pub min_match_score: f64,
}

impl Default for CareerTunables {
    fn default() -> Self {
        Self {
            top_n: 10,
            min_match_score: 50.0,
        }
    }
}

/// Knobs for the university recommendation call. `start_date` falls back to today.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UniversityTunables {
    pub top_n: u32,
    pub min_match_score: f64,
    pub duration_months: u32,
    pub start_date: Option<NaiveDate>,
}

impl Default for UniversityTunables {
    fn default() -> Self {
        Self {
            top_n: 50,
            min_match_score: 30.0,
            duration_months: 12,
            start_date: None,
        }
    }
}

fn validate_common(top_n: u32, min_match_score: f64) -> Result<(), AggregationError> {
    if top_n == 0 {
        return Err(AggregationError::InvalidTunable {
            field: "top_n",
            reason: "must be greater than zero".to_string(),
        });
    }
    if !(0.0..=100.0).contains(&min_match_score) {
        return Err(AggregationError::InvalidTunable {
            field: "min_match_score",
            reason: format!("must be between 0 and 100, got {min_match_score}"),
        });
    }
    Ok(())
}

impl CareerTunables {
    pub fn validate(&self) -> Result<(), AggregationError> {
        validate_common(self.top_n, self.min_match_score)
    }
}

impl UniversityTunables {
    pub fn validate(&self) -> Result<(), AggregationError> {
        validate_common(self.top_n, self.min_match_score)?;
        if self.duration_months == 0 {
            return Err(AggregationError::InvalidTunable {
                field: "duration_months",
                reason: "must be greater than zero".to_string(),
            });
        }
        Ok(())
    }
}

/// Results and raw answers of a student's three completed tests.
#[derive(Debug, Clone)]
pub struct CompletedAssessments {
    pub mbti: MbtiResult,
    pub riasec: RiasecResult,
    pub grit: GritResult,
    pub mbti_answers: AnswerSheet,
    pub riasec_answers: AnswerSheet,
    pub grit_answers: AnswerSheet,
}

fn completed(session: Option<&TestSession>) -> Option<(&TestResult, &AnswerSheet)> {
    let session = session.filter(|session| session.is_completed())?;
    session.result.as_ref().map(|result| (result, &session.answers))
}

/// Requires all three sessions to be COMPLETED, naming every one that is not.
pub fn aggregate(
    mbti: Option<&TestSession>,
    riasec: Option<&TestSession>,
    grit: Option<&TestSession>,
) -> Result<CompletedAssessments, AggregationError> {
    let mbti = completed(mbti)
        .and_then(|(result, answers)| result.as_mbti().map(|result| (result, answers)));
    let riasec = completed(riasec)
        .and_then(|(result, answers)| result.as_riasec().map(|result| (result, answers)));
    let grit = completed(grit)
        .and_then(|(result, answers)| result.as_grit().map(|result| (result, answers)));

    match (mbti, riasec, grit) {
        (Some(mbti), Some(riasec), Some(grit)) => Ok(CompletedAssessments {
            mbti: mbti.0.clone(),
            riasec: riasec.0.clone(),
            grit: grit.0.clone(),
            mbti_answers: mbti.1.clone(),
            riasec_answers: riasec.1.clone(),
            grit_answers: grit.1.clone(),
        }),
        (mbti, riasec, grit) => {
            let missing = [
                (TestType::Mbti, mbti.is_some()),
                (TestType::Riasec, riasec.is_some()),
                (TestType::Grit, grit.is_some()),
            ]
            .into_iter()
            .filter(|(_, present)| !present)
            .map(|(test_type, _)| test_type)
            .collect();
            Err(AggregationError::MissingPrerequisite { missing })
        }
    }
}

impl CompletedAssessments {
    pub fn assessment_block(&self) -> AssessmentBlock {
        let dimension_scores = MbtiPole::ALL
            .iter()
            .map(|pole| (pole.letter().to_string(), f64::from(self.mbti.score(*pole))))
            .collect();

        let scores = RiasecCategory::ALL
            .iter()
            .map(|category| {
                (
                    category.name().to_string(),
                    f64::from(self.riasec.score(*category)),
                )
            })
            .collect();

        let top3 = self
            .riasec
            .top_three
            .iter()
            .map(|entry| (entry.category.letter().to_string(), f64::from(entry.score)))
            .collect();

        AssessmentBlock {
            mbti: MbtiBlock {
                personality_type: self.mbti.personality_type.clone(),
                dimension_scores,
                confidence: self.mbti.confidence,
            },
            grit: GritBlock {
                score: self.grit.score,
                level: self.grit.level.label().to_string(),
                description: self.grit.description.clone(),
            },
            riasec: RiasecBlock {
                code: self.riasec.holland_code.clone(),
                scores,
                top3,
            },
        }
    }

    pub fn assessment_output(&self) -> AssessmentOutput {
        AssessmentOutput {
            success: true,
            assessment: self.assessment_block(),
            recommendations: Vec::new(),
        }
    }

    pub fn career_request(
        &self,
        tunables: &CareerTunables,
    ) -> Result<CareerAssessmentRequest, AggregationError> {
        tunables.validate()?;
        // The recommender takes fixed-size payloads of 60, 12 and 48 answers.
        Ok(CareerAssessmentRequest {
            mbti_answers: transform::mbti_answer_sequence(
                &self.mbti_answers,
                TestType::Mbti.question_count(),
            ),
            grit_answers: transform::grit_answers(
                &self.grit_answers,
                TestType::Grit.question_count(),
            ),
            riasec_answers: transform::riasec_payload_answers(
                &self.riasec_answers,
                TestType::Riasec.question_count(),
            ),
            top_n: tunables.top_n,
            min_match_score: tunables.min_match_score,
        })
    }

    pub fn university_request(
        &self,
        profile: Option<ProfileAnalysis>,
        tunables: &UniversityTunables,
        today: NaiveDate,
    ) -> Result<UniversityRecommendationRequest, AggregationError> {
        tunables.validate()?;
        Ok(UniversityRecommendationRequest {
            feature1_output: profile.unwrap_or_else(ProfileAnalysis::unknown),
            feature2_output: self.assessment_output(),
            top_n: tunables.top_n,
            min_match_score: tunables.min_match_score,
            duration_months: tunables.duration_months,
            start_date: tunables.start_date.unwrap_or(today),
        })
    }
}
