use std::collections::BTreeMap;

use serde::Serialize;

use super::{round_to, ScoringError};
use crate::assessments::bank::type_title;
use crate::assessments::domain::{MbtiPair, MbtiPole, MbtiQuestion, TestType};
use crate::assessments::transform::AnswerMap;

const ANSWER_MIN: i32 = -3;
const ANSWER_MAX: i32 = 3;
const ANSWER_OFFSET: i32 = 3;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MbtiResult {
    pub personality_type: String,
    pub type_title: String,
    pub dimension_scores: BTreeMap<MbtiPole, u32>,
    pub percentages: BTreeMap<MbtiPole, u8>,
    /// Mean preference clarity across the four pairs, in [0, 1].
    pub confidence: f64,
}

impl MbtiResult {
    pub fn score(&self, pole: MbtiPole) -> u32 {
        self.dimension_scores.get(&pole).copied().unwrap_or(0)
    }

    pub fn percentage(&self, pole: MbtiPole) -> u8 {
        self.percentages.get(&pole).copied().unwrap_or(0)
    }
}

#[derive(Debug, Clone)]
pub struct MbtiScorer {
    questions: Vec<MbtiQuestion>,
}

impl MbtiScorer {
    pub fn new(questions: &[MbtiQuestion]) -> Self {
        Self {
            questions: questions.to_vec(),
        }
    }

    /// Each answer `a` adds `a + 3` to the tagged pole and `3 - a` to its opposite.
    pub fn score(&self, answers: Option<&AnswerMap<i32>>) -> Result<MbtiResult, ScoringError> {
        let answers = answers.ok_or(ScoringError::InvalidInput(TestType::Mbti))?;

        let mut dimension_scores: BTreeMap<MbtiPole, u32> =
            MbtiPole::ALL.iter().map(|pole| (*pole, 0)).collect();

        for question in &self.questions {
            let answer = answers
                .get(&question.id)
                .copied()
                .unwrap_or(0)
                .clamp(ANSWER_MIN, ANSWER_MAX);
            *dimension_scores.entry(question.dimension).or_default() +=
                (answer + ANSWER_OFFSET) as u32;
            *dimension_scores
                .entry(question.dimension.opposite())
                .or_default() += (ANSWER_OFFSET - answer) as u32;
        }

        let mut percentages = BTreeMap::new();
        let mut personality_type = String::with_capacity(4);
        let mut clarity = 0.0;

        for pair in MbtiPair::ALL {
            let (first, second) = pair.poles();
            let first_score = dimension_scores[&first];
            let second_score = dimension_scores[&second];
            let total = first_score + second_score;

            let first_pct = if total == 0 {
                50
            } else {
                (100.0 * f64::from(first_score) / f64::from(total)).round() as u8
            };
            percentages.insert(first, first_pct);
            percentages.insert(second, 100 - first_pct);

            let dominant = if second_score > first_score {
                second
            } else {
                first
            };
            personality_type.push(dominant.letter());
            clarity += (f64::from(first_pct) - 50.0).abs() / 50.0;
        }

        let type_title = type_title(&personality_type)
            .unwrap_or("Unclassified")
            .to_string();

        Ok(MbtiResult {
            personality_type,
            type_title,
            dimension_scores,
            percentages,
            confidence: round_to(clarity / MbtiPair::ALL.len() as f64, 2),
        })
    }
}
