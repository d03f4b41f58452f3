//! Canonical answer representation and the adapters that feed scorers and the recommender.
//!
//! Answers are keyed by 1-based question id everywhere inside the crate. The submission
//! boundary speaks 0-based `question_number`s, and stored answers may arrive as either a
//! dense array (position `i` answers question `i + 1`) or an object keyed `"1".."N"`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub type AnswerMap<T> = BTreeMap<u16, T>;

const MBTI_MIN: i32 = -3;
const MBTI_MAX: i32 = 3;
const MBTI_NEUTRAL: i32 = 0;
const LIKERT_MIN: i32 = 1;
const LIKERT_MAX: i32 = 5;
const GRIT_NEUTRAL: i32 = 3;
const RIASEC_YES: i32 = 4;
const RIASEC_NO: i32 = 2;

/// Raw value exactly as submitted: a flag, a number, or text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawAnswer {
    Flag(bool),
    Number(f64),
    Text(String),
}

impl RawAnswer {
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Bool(flag) => Some(RawAnswer::Flag(*flag)),
            Value::Number(number) => number.as_f64().map(RawAnswer::Number),
            Value::String(text) => Some(RawAnswer::Text(text.clone())),
            _ => None,
        }
    }

    /// Numeric reading of the answer. Flags are not numbers.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            RawAnswer::Number(number) if number.is_finite() => Some(*number),
            RawAnswer::Text(text) => text
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|number| number.is_finite()),
            _ => None,
        }
    }

    /// `true`, `1` and `"true"` are truthy; everything else is not.
    pub fn is_truthy(&self) -> bool {
        match self {
            RawAnswer::Flag(flag) => *flag,
            RawAnswer::Number(number) => *number == 1.0,
            RawAnswer::Text(text) => text.trim().eq_ignore_ascii_case("true"),
        }
    }
}

/// Ordered answers for one session, keyed by 1-based question id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerSheet(BTreeMap<u16, RawAnswer>);

impl AnswerSheet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a stored answer collection. Returns `None` for anything but an array or object.
    pub fn from_value(value: &Value) -> Option<Self> {
        let mut sheet = AnswerSheet::new();
        match value {
            Value::Array(items) => {
                for (index, item) in items.iter().enumerate() {
                    let Ok(id) = u16::try_from(index + 1) else {
                        break;
                    };
                    if let Some(answer) = RawAnswer::from_value(item) {
                        sheet.record(id, answer);
                    }
                }
            }
            Value::Object(entries) => {
                for (key, item) in entries {
                    let Some(id) = key.trim().parse::<u16>().ok().filter(|id| *id > 0) else {
                        continue;
                    };
                    if let Some(answer) = RawAnswer::from_value(item) {
                        sheet.record(id, answer);
                    }
                }
            }
            _ => return None,
        }
        Some(sheet)
    }

    pub fn record(&mut self, question_id: u16, answer: RawAnswer) {
        self.0.insert(question_id, answer);
    }

    pub fn get(&self, question_id: u16) -> Option<&RawAnswer> {
        self.0.get(&question_id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u16, &RawAnswer)> {
        self.0.iter().map(|(id, answer)| (*id, answer))
    }
}

impl FromIterator<(u16, RawAnswer)> for AnswerSheet {
    fn from_iter<T: IntoIterator<Item = (u16, RawAnswer)>>(iter: T) -> Self {
        AnswerSheet(iter.into_iter().collect())
    }
}

/// Converts a 0-based boundary `question_number` into a 1-based question id within `total`.
pub fn question_id(question_number: i64, total: u16) -> Option<u16> {
    if question_number < 0 || question_number >= i64::from(total) {
        return None;
    }
    u16::try_from(question_number + 1).ok()
}

fn rounded(number: f64) -> i32 {
    number.round().clamp(f64::from(i32::MIN), f64::from(i32::MAX)) as i32
}

fn mbti_value(answer: Option<&RawAnswer>) -> i32 {
    answer
        .and_then(RawAnswer::as_number)
        .map(|number| rounded(number).clamp(MBTI_MIN, MBTI_MAX))
        .unwrap_or(MBTI_NEUTRAL)
}

/// Every MBTI question id up to `total` mapped to a value in [-3, 3]; absent or non-numeric answers are 0.
pub fn mbti_answers(sheet: &AnswerSheet, total: u16) -> AnswerMap<i32> {
    (1..=total)
        .map(|id| (id, mbti_value(sheet.get(id))))
        .collect()
}

/// Dense sequence of the MBTI answers, position `i` holding question `i + 1`.
pub fn mbti_answer_sequence(sheet: &AnswerSheet, total: u16) -> Vec<i32> {
    mbti_answers(sheet, total).into_values().collect()
}

/// Truthy normalization used by the RIASEC scorer.
pub fn riasec_scoring_answers(sheet: &AnswerSheet, total: u16) -> AnswerMap<bool> {
    (1..=total)
        .map(|id| (id, sheet.get(id).map(RawAnswer::is_truthy).unwrap_or(false)))
        .collect()
}

/// Likert encoding the recommender expects: yes is 4, no is 2, numbers are clamped into [1, 5].
pub fn riasec_payload_answers(sheet: &AnswerSheet, total: u16) -> AnswerMap<i32> {
    (1..=total)
        .map(|id| {
            let value = match sheet.get(id) {
                Some(RawAnswer::Flag(true)) => RIASEC_YES,
                Some(RawAnswer::Flag(false)) => RIASEC_NO,
                Some(other) => match other.as_number().map(rounded) {
                    Some(number) if number != 0 => number.clamp(LIKERT_MIN, LIKERT_MAX),
                    _ => RIASEC_NO,
                },
                None => RIASEC_NO,
            };
            (id, value)
        })
        .collect()
}

/// GRIT answers clamped into [1, 5]; absent, zero or invalid answers are the neutral 3.
pub fn grit_answers(sheet: &AnswerSheet, total: u16) -> AnswerMap<i32> {
    (1..=total)
        .map(|id| {
            let value = match sheet.get(id).and_then(RawAnswer::as_number).map(rounded) {
                Some(number) if number != 0 => number.clamp(LIKERT_MIN, LIKERT_MAX),
                _ => GRIT_NEUTRAL,
            };
            (id, value)
        })
        .collect()
}
