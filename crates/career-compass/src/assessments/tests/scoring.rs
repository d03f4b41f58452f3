use std::collections::BTreeMap;

use serde_json::json;

use super::common::*;
use crate::assessments::bank::{StandardQuestionBank, MBTI_QUESTIONS};
use crate::assessments::domain::{MbtiPair, MbtiPole, RiasecCategory, TestType};
use crate::assessments::scoring::{
    GritLevel, GritScorer, MbtiScorer, RiasecScorer, ScoringError, TestResult,
};
use crate::assessments::transform::{AnswerSheet, RawAnswer};
use crate::assessments::QuestionBank;

fn mbti(sheet: &AnswerSheet) -> crate::assessments::MbtiResult {
    match engine().score(TestType::Mbti, Some(sheet)) {
        Ok(TestResult::Mbti(result)) => result,
        other => panic!("expected mbti result, got {other:?}"),
    }
}

fn riasec(sheet: &AnswerSheet) -> crate::assessments::RiasecResult {
    match engine().score(TestType::Riasec, Some(sheet)) {
        Ok(TestResult::Riasec(result)) => result,
        other => panic!("expected riasec result, got {other:?}"),
    }
}

fn grit(sheet: &AnswerSheet) -> crate::assessments::GritResult {
    match engine().score(TestType::Grit, Some(sheet)) {
        Ok(TestResult::Grit(result)) => result,
        other => panic!("expected grit result, got {other:?}"),
    }
}

#[test]
fn mbti_all_neutral_is_balanced_and_breaks_ties_toward_first_pole() {
    let result = mbti(&sheet_with(TestType::Mbti, |_| number(0.0)));

    assert_eq!(result.personality_type, "ESTJ");
    assert_eq!(result.type_title, "The Supervisor");
    for pole in MbtiPole::ALL {
        assert_eq!(result.percentage(pole), 50, "{pole:?} should be 50%");
    }
    assert_eq!(result.score(MbtiPole::E), 45);
    assert_eq!(result.score(MbtiPole::I), 45);
    assert_eq!(result.confidence, 0.0);
}

#[test]
fn mbti_empty_answers_score_like_neutral_answers() {
    let empty = mbti(&AnswerSheet::new());
    let neutral = mbti(&sheet_with(TestType::Mbti, |_| number(0.0)));
    assert_eq!(empty, neutral);
}

#[test]
fn mbti_strong_second_pole_answers_flip_every_letter() {
    let sheet = sheet_with(TestType::Mbti, |id| {
        let pole = MBTI_QUESTIONS[usize::from(id - 1)].dimension;
        let (first, _) = pole.pair().poles();
        if pole == first {
            number(-3.0)
        } else {
            number(3.0)
        }
    });

    let result = mbti(&sheet);

    assert_eq!(result.personality_type, "INFP");
    assert_eq!(result.score(MbtiPole::I), 90);
    assert_eq!(result.score(MbtiPole::E), 0);
    assert_eq!(result.percentage(MbtiPole::I), 100);
    assert_eq!(result.percentage(MbtiPole::E), 0);
    assert_eq!(result.confidence, 1.0);
}

#[test]
fn mbti_pair_percentages_always_sum_to_one_hundred() {
    let sheet = sheet_with(TestType::Mbti, |id| number(f64::from((id % 7) as i32 - 3)));
    let result = mbti(&sheet);

    for pair in MbtiPair::ALL {
        let (first, second) = pair.poles();
        assert_eq!(
            u32::from(result.percentage(first)) + u32::from(result.percentage(second)),
            100,
            "{pair:?}"
        );
        assert_eq!(result.score(first) + result.score(second), 90, "{pair:?}");
    }
}

#[test]
fn mbti_scorer_clamps_out_of_range_values() {
    let scorer = MbtiScorer::new(StandardQuestionBank.mbti());
    let mut high = BTreeMap::new();
    high.insert(1, 4);
    let mut capped = BTreeMap::new();
    capped.insert(1, 3);

    assert_eq!(
        scorer.score(Some(&high)).expect("scores"),
        scorer.score(Some(&capped)).expect("scores")
    );
}

#[test]
fn mbti_dense_array_and_keyed_object_inputs_agree() {
    let dense: Vec<i32> = (0..60).map(|index| (index % 7) - 3).collect();
    let keyed: serde_json::Map<String, serde_json::Value> = dense
        .iter()
        .enumerate()
        .map(|(index, value)| ((index + 1).to_string(), json!(value)))
        .collect();

    let from_array = AnswerSheet::from_value(&json!(dense)).expect("array parses");
    let from_object =
        AnswerSheet::from_value(&serde_json::Value::Object(keyed)).expect("object parses");

    assert_eq!(mbti(&from_array), mbti(&from_object));
}

#[test]
fn riasec_all_yes_fills_every_category_and_codes_ria() {
    let result = riasec(&sheet_with(TestType::Riasec, |_| RawAnswer::Flag(true)));

    for category in RiasecCategory::ALL {
        assert_eq!(result.score(category), 8);
        assert_eq!(result.percentages[&category], 100);
    }
    assert_eq!(result.holland_code, "RIA");
    assert_eq!(result.dominant, RiasecCategory::R);
    assert_eq!(result.profile.title, "Creative Engineer");
    assert!(!result.profile.synthesized);
}

#[test]
fn riasec_ranks_by_count_then_fixed_priority() {
    // S and C both full, E half, everything else empty.
    let sheet = sheet_with(TestType::Riasec, |id| match id {
        25..=32 | 41..=48 => RawAnswer::Flag(true),
        33..=36 => RawAnswer::Flag(true),
        _ => RawAnswer::Flag(false),
    });

    let result = riasec(&sheet);

    assert_eq!(result.holland_code, "SCE");
    assert_eq!(result.percentages[&RiasecCategory::E], 50);
    let ranked: Vec<(RiasecCategory, u8)> = result
        .top_three
        .iter()
        .map(|entry| (entry.category, entry.score))
        .collect();
    assert_eq!(
        ranked,
        vec![
            (RiasecCategory::S, 8),
            (RiasecCategory::C, 8),
            (RiasecCategory::E, 4)
        ]
    );
}

#[test]
fn riasec_unknown_code_synthesizes_profile_from_categories() {
    let sheet = sheet_with(TestType::Riasec, |id| match id {
        25..=32 | 41..=48 | 33..=36 => RawAnswer::Flag(true),
        _ => RawAnswer::Flag(false),
    });

    let profile = riasec(&sheet).profile;

    assert!(profile.synthesized);
    assert_eq!(profile.title, "Social - Conventional - Enterprising");
    assert_eq!(
        profile.strengths,
        vec!["Social", "Conventional", "Enterprising"]
    );
    assert_eq!(
        profile.careers,
        vec![
            "Teacher",
            "Nurse",
            "Accountant",
            "Secretary",
            "Entrepreneur",
            "Manager"
        ]
    );
    assert!(profile
        .description
        .starts_with("You tend to combine: enjoys helping"));
}

#[test]
fn riasec_counts_only_truthy_values() {
    let mut sheet = AnswerSheet::new();
    sheet.record(1, RawAnswer::Number(1.0));
    sheet.record(2, RawAnswer::Text("true".to_string()));
    sheet.record(3, RawAnswer::Number(4.0));
    sheet.record(4, RawAnswer::Text("yes".to_string()));
    sheet.record(5, RawAnswer::Flag(false));

    let result = riasec(&sheet);

    assert_eq!(result.score(RiasecCategory::R), 2);
    assert_eq!(result.percentages[&RiasecCategory::R], 25);
}

#[test]
fn riasec_all_no_still_produces_a_code() {
    let scorer = RiasecScorer::new(StandardQuestionBank.riasec());
    let result = scorer.score(Some(&BTreeMap::new())).expect("scores");
    assert_eq!(result.holland_code, "RIA");
    assert!(RiasecCategory::ALL
        .iter()
        .all(|category| result.score(*category) == 0));
}

#[test]
fn grit_neutral_answers_are_moderate() {
    let result = grit(&sheet_with(TestType::Grit, |_| number(3.0)));

    assert_eq!(result.score, 3.0);
    assert_eq!(result.level, GritLevel::Moderate);
    assert_eq!(result.passion.score, 3.0);
    assert_eq!(result.perseverance.score, 3.0);
    assert_eq!(result.description, GritLevel::Moderate.description());
}

#[test]
fn grit_reverse_items_mirror_the_scale() {
    let result = grit(&sheet_with(TestType::Grit, |_| number(5.0)));

    assert_eq!(result.passion.score, 1.0);
    assert_eq!(result.passion.level, GritLevel::VeryLow);
    assert_eq!(result.perseverance.score, 5.0);
    assert_eq!(result.perseverance.level, GritLevel::VeryHigh);
    assert_eq!(result.score, 3.0);
}

#[test]
fn grit_high_profile_rounds_to_one_decimal() {
    // Passion items answered 1 (reverse to 5), perseverance answered 4 and 5 alternately.
    let sheet = sheet_with(TestType::Grit, |id| match id {
        2 | 3 | 5 | 7 | 8 | 11 => number(1.0),
        1 | 6 | 10 => number(4.0),
        _ => number(5.0),
    });

    let result = grit(&sheet);

    assert_eq!(result.passion.score, 5.0);
    assert_eq!(result.perseverance.score, 4.5);
    assert_eq!(result.score, 4.8);
    assert_eq!(result.level, GritLevel::VeryHigh);
}

#[test]
fn grit_scorer_clamps_instead_of_rejecting() {
    let scorer = GritScorer::new(StandardQuestionBank.grit());
    let wild: BTreeMap<u16, i32> = (1..=12).map(|id| (id, 9)).collect();
    let capped: BTreeMap<u16, i32> = (1..=12).map(|id| (id, 5)).collect();

    assert_eq!(
        scorer.score(Some(&wild)).expect("scores"),
        scorer.score(Some(&capped)).expect("scores")
    );
}

#[test]
fn grit_level_bounds_are_inclusive() {
    assert_eq!(GritLevel::for_score(4.5), GritLevel::VeryHigh);
    assert_eq!(GritLevel::for_score(4.4), GritLevel::High);
    assert_eq!(GritLevel::for_score(3.5), GritLevel::High);
    assert_eq!(GritLevel::for_score(2.5), GritLevel::Moderate);
    assert_eq!(GritLevel::for_score(1.5), GritLevel::Low);
    assert_eq!(GritLevel::for_score(1.4), GritLevel::VeryLow);
    assert_eq!(GritLevel::for_score(1.0), GritLevel::VeryLow);
}

#[test]
fn missing_answer_mapping_is_invalid_input() {
    for test_type in TestType::ALL {
        assert_eq!(
            engine().score(test_type, None),
            Err(ScoringError::InvalidInput(test_type))
        );
    }
    let scorer = MbtiScorer::new(StandardQuestionBank.mbti());
    assert_eq!(
        scorer.score(None),
        Err(ScoringError::InvalidInput(TestType::Mbti))
    );
}

#[test]
fn rescoring_the_same_answers_is_deterministic() {
    let sheet = sheet_with(TestType::Riasec, |id| RawAnswer::Flag(id % 3 == 0));
    let engine = engine();
    let first = engine.score(TestType::Riasec, Some(&sheet)).expect("scores");
    let second = engine.score(TestType::Riasec, Some(&sheet)).expect("scores");
    assert_eq!(first, second);
}

#[test]
fn banks_match_documented_layout() {
    let bank = StandardQuestionBank;
    for test_type in TestType::ALL {
        assert_eq!(bank.total(test_type), test_type.question_count());
    }
    for pair in MbtiPair::ALL {
        let count = bank
            .mbti()
            .iter()
            .filter(|question| question.dimension.pair() == pair)
            .count();
        assert_eq!(count, 15, "{pair:?}");
    }
    for category in RiasecCategory::ALL {
        let count = bank
            .riasec()
            .iter()
            .filter(|question| question.category == category)
            .count();
        assert_eq!(count, 8, "{category:?}");
    }
    let reversed: Vec<u16> = bank
        .grit()
        .iter()
        .filter(|question| question.reverse)
        .map(|question| question.id)
        .collect();
    assert_eq!(reversed, vec![2, 3, 5, 7, 8, 11]);
}
