use std::collections::BTreeMap;

use serde::Serialize;

use super::ScoringError;
use crate::assessments::bank::{holland_profile, HollandProfile};
use crate::assessments::domain::{RiasecCategory, RiasecQuestion, TestType};
use crate::assessments::transform::AnswerMap;

const CODE_LENGTH: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RankedCategory {
    pub category: RiasecCategory,
    pub score: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiasecResult {
    pub holland_code: String,
    pub scores: BTreeMap<RiasecCategory, u8>,
    pub percentages: BTreeMap<RiasecCategory, u8>,
    pub top_three: Vec<RankedCategory>,
    pub dominant: RiasecCategory,
    pub profile: HollandProfile,
}

impl RiasecResult {
    pub fn score(&self, category: RiasecCategory) -> u8 {
        self.scores.get(&category).copied().unwrap_or(0)
    }
}

#[derive(Debug, Clone)]
pub struct RiasecScorer {
    questions: Vec<RiasecQuestion>,
}

impl RiasecScorer {
    pub fn new(questions: &[RiasecQuestion]) -> Self {
        Self {
            questions: questions.to_vec(),
        }
    }

    pub fn score(&self, answers: Option<&AnswerMap<bool>>) -> Result<RiasecResult, ScoringError> {
        let answers = answers.ok_or(ScoringError::InvalidInput(TestType::Riasec))?;

        let mut scores: BTreeMap<RiasecCategory, u8> =
            RiasecCategory::ALL.iter().map(|c| (*c, 0)).collect();
        let mut per_category: BTreeMap<RiasecCategory, u8> =
            RiasecCategory::ALL.iter().map(|c| (*c, 0)).collect();

        for question in &self.questions {
            *per_category.entry(question.category).or_default() += 1;
            if answers.get(&question.id).copied().unwrap_or(false) {
                *scores.entry(question.category).or_default() += 1;
            }
        }

        let percentages = scores
            .iter()
            .map(|(category, count)| {
                let available = per_category[category];
                let pct = if available == 0 {
                    0
                } else {
                    (f64::from(*count) / f64::from(available) * 100.0).round() as u8
                };
                (*category, pct)
            })
            .collect();

        // Stable sort over R, I, A, S, E, C keeps that order among equal counts.
        let mut ranked: Vec<RankedCategory> = RiasecCategory::ALL
            .iter()
            .map(|category| RankedCategory {
                category: *category,
                score: scores[category],
            })
            .collect();
        ranked.sort_by(|a, b| b.score.cmp(&a.score));
        ranked.truncate(CODE_LENGTH);

        let code: Vec<RiasecCategory> = ranked.iter().map(|entry| entry.category).collect();
        let holland_code: String = code.iter().map(|category| category.letter()).collect();

        Ok(RiasecResult {
            holland_code,
            scores,
            percentages,
            dominant: code[0],
            profile: holland_profile(&code),
            top_three: ranked,
        })
    }
}
