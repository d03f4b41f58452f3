//! Static, read-only question banks and lookup tables.

mod grit;
mod mbti;
mod riasec;

pub use grit::GRIT_QUESTIONS;
pub use mbti::{type_title, MBTI_QUESTIONS};
pub use riasec::{category_info, holland_profile, CategoryInfo, HollandProfile, RIASEC_QUESTIONS};

use super::domain::{GritQuestion, MbtiQuestion, QuestionView, RiasecQuestion, TestType};

/// Provider of ordered questions per test type.
pub trait QuestionBank: Send + Sync {
    fn mbti(&self) -> &[MbtiQuestion];
    fn riasec(&self) -> &[RiasecQuestion];
    fn grit(&self) -> &[GritQuestion];

    fn total(&self, test_type: TestType) -> u16 {
        let len = match test_type {
            TestType::Mbti => self.mbti().len(),
            TestType::Riasec => self.riasec().len(),
            TestType::Grit => self.grit().len(),
        };
        u16::try_from(len).unwrap_or(u16::MAX)
    }

    fn questions(&self, test_type: TestType) -> Vec<QuestionView> {
        match test_type {
            TestType::Mbti => self.mbti().iter().copied().map(QuestionView::Mbti).collect(),
            TestType::Riasec => self
                .riasec()
                .iter()
                .copied()
                .map(QuestionView::Riasec)
                .collect(),
            TestType::Grit => self.grit().iter().copied().map(QuestionView::Grit).collect(),
        }
    }
}

/// The banks shipped with the crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardQuestionBank;

impl QuestionBank for StandardQuestionBank {
    fn mbti(&self) -> &[MbtiQuestion] {
        &MBTI_QUESTIONS
    }

    fn riasec(&self) -> &[RiasecQuestion] {
        &RIASEC_QUESTIONS
    }

    fn grit(&self) -> &[GritQuestion] {
        &GRIT_QUESTIONS
    }
}
