use serde::Serialize;

use super::{round_to, ScoringError};
use crate::assessments::domain::{GritComponent, GritQuestion, TestType};
use crate::assessments::transform::AnswerMap;

const ANSWER_MIN: i32 = 1;
const ANSWER_MAX: i32 = 5;
const NEUTRAL: i32 = 3;
const REVERSE_BASE: i32 = 6;

/// Qualitative grit band; lower bounds are inclusive and checked from the top.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GritLevel {
    #[serde(rename = "Very High")]
    VeryHigh,
    High,
    Moderate,
    Low,
    #[serde(rename = "Very Low")]
    VeryLow,
}

impl GritLevel {
    const BANDS: [(f64, GritLevel); 4] = [
        (4.5, GritLevel::VeryHigh),
        (3.5, GritLevel::High),
        (2.5, GritLevel::Moderate),
        (1.5, GritLevel::Low),
    ];

    pub fn for_score(score: f64) -> Self {
        Self::BANDS
            .iter()
            .find(|(lower, _)| score >= *lower)
            .map(|(_, level)| *level)
            .unwrap_or(GritLevel::VeryLow)
    }

    pub fn label(self) -> &'static str {
        match self {
            GritLevel::VeryHigh => "Very High",
            GritLevel::High => "High",
            GritLevel::Moderate => "Moderate",
            GritLevel::Low => "Low",
            GritLevel::VeryLow => "Very Low",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            GritLevel::VeryHigh => {
                "Exceptional persistence and passion; you stay with long-term goals through setbacks."
            }
            GritLevel::High => {
                "Strong perseverance and steady interests; you usually finish what you start."
            }
            GritLevel::Moderate => {
                "Balanced grit; you persist on goals that matter but sometimes shift focus."
            }
            GritLevel::Low => {
                "Interests and effort tend to change; building routines can strengthen follow-through."
            }
            GritLevel::VeryLow => {
                "Long-term goals are hard to sustain right now; small, short milestones can help."
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ComponentScore {
    pub component: GritComponent,
    pub score: f64,
    pub level: GritLevel,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GritResult {
    pub score: f64,
    pub level: GritLevel,
    pub description: String,
    pub passion: ComponentScore,
    pub perseverance: ComponentScore,
}

#[derive(Debug, Clone)]
pub struct GritScorer {
    questions: Vec<GritQuestion>,
}

impl GritScorer {
    pub fn new(questions: &[GritQuestion]) -> Self {
        Self {
            questions: questions.to_vec(),
        }
    }

    pub fn score(&self, answers: Option<&AnswerMap<i32>>) -> Result<GritResult, ScoringError> {
        let answers = answers.ok_or(ScoringError::InvalidInput(TestType::Grit))?;

        let mut passion = Vec::new();
        let mut perseverance = Vec::new();
        for question in &self.questions {
            let raw = answers
                .get(&question.id)
                .copied()
                .unwrap_or(NEUTRAL)
                .clamp(ANSWER_MIN, ANSWER_MAX);
            let value = if question.reverse {
                REVERSE_BASE - raw
            } else {
                raw
            };
            match question.component {
                GritComponent::Passion => passion.push(value),
                GritComponent::Perseverance => perseverance.push(value),
            }
        }

        let passion_mean = mean(&passion);
        let perseverance_mean = mean(&perseverance);
        let score = round_to((passion_mean + perseverance_mean) / 2.0, 1);
        let level = GritLevel::for_score(score);

        Ok(GritResult {
            score,
            level,
            description: level.description().to_string(),
            passion: component_score(GritComponent::Passion, passion_mean),
            perseverance: component_score(GritComponent::Perseverance, perseverance_mean),
        })
    }
}

fn mean(values: &[i32]) -> f64 {
    if values.is_empty() {
        return f64::from(NEUTRAL);
    }
    f64::from(values.iter().sum::<i32>()) / values.len() as f64
}

fn component_score(component: GritComponent, mean: f64) -> ComponentScore {
    let score = round_to(mean, 1);
    ComponentScore {
        component,
        score,
        level: GritLevel::for_score(score),
    }
}
