use serde_json::json;

use super::common::*;
use crate::assessments::domain::TestType;
use crate::assessments::transform::{self, AnswerSheet, RawAnswer};

#[test]
fn question_numbers_are_zero_based_at_the_boundary() {
    assert_eq!(transform::question_id(0, 60), Some(1));
    assert_eq!(transform::question_id(59, 60), Some(60));
    assert_eq!(transform::question_id(60, 60), None);
    assert_eq!(transform::question_id(-1, 12), None);
}

#[test]
fn array_sheets_map_positions_to_question_ids() {
    let sheet = AnswerSheet::from_value(&json!([2, null, -1, "3"])).expect("array parses");

    assert_eq!(sheet.len(), 3);
    assert_eq!(sheet.get(1), Some(&RawAnswer::Number(2.0)));
    assert_eq!(sheet.get(2), None);
    assert_eq!(sheet.get(3), Some(&RawAnswer::Number(-1.0)));
    assert_eq!(sheet.get(4), Some(&RawAnswer::Text("3".to_string())));
}

#[test]
fn object_sheets_ignore_unusable_keys() {
    let sheet = AnswerSheet::from_value(&json!({
        "1": true,
        "12": false,
        "0": true,
        "abc": true,
        "7": null
    }))
    .expect("object parses");

    let ids: Vec<u16> = sheet.iter().map(|(id, _)| id).collect();
    assert_eq!(ids, vec![1, 12]);
}

#[test]
fn scalar_sheets_are_rejected() {
    assert!(AnswerSheet::from_value(&json!(42)).is_none());
    assert!(AnswerSheet::from_value(&json!("answers")).is_none());
    assert!(AnswerSheet::from_value(&json!(null)).is_none());
}

#[test]
fn numbers_can_be_read_from_text() {
    assert_eq!(RawAnswer::Text(" 4 ".to_string()).as_number(), Some(4.0));
    assert_eq!(RawAnswer::Text("many".to_string()).as_number(), None);
    assert_eq!(RawAnswer::Flag(true).as_number(), None);
    assert_eq!(RawAnswer::Number(f64::NAN).as_number(), None);
}

#[test]
fn truthiness_accepts_true_one_and_true_text() {
    assert!(RawAnswer::Flag(true).is_truthy());
    assert!(RawAnswer::Number(1.0).is_truthy());
    assert!(RawAnswer::Text("TRUE".to_string()).is_truthy());
    assert!(!RawAnswer::Number(5.0).is_truthy());
    assert!(!RawAnswer::Text("1".to_string()).is_truthy());
    assert!(!RawAnswer::Flag(false).is_truthy());
}

#[test]
fn mbti_adapter_fills_clamps_and_rounds() {
    let mut sheet = AnswerSheet::new();
    sheet.record(1, number(2.6));
    sheet.record(2, number(-7.0));
    sheet.record(3, RawAnswer::Text("oops".to_string()));

    let answers = transform::mbti_answers(&sheet, 60);

    assert_eq!(answers.len(), 60);
    assert_eq!(answers[&1], 3);
    assert_eq!(answers[&2], -3);
    assert_eq!(answers[&3], 0);
    assert_eq!(answers[&60], 0);

    let sequence = transform::mbti_answer_sequence(&sheet, 60);
    assert_eq!(sequence.len(), 60);
    assert_eq!(&sequence[..4], &[3, -3, 0, 0]);
}

#[test]
fn riasec_payload_encodes_flags_as_likert() {
    let mut sheet = AnswerSheet::new();
    sheet.record(1, RawAnswer::Flag(true));
    sheet.record(2, RawAnswer::Flag(false));
    sheet.record(3, number(5.0));
    sheet.record(4, number(0.0));
    sheet.record(5, number(9.0));

    let payload = transform::riasec_payload_answers(&sheet, 48);

    assert_eq!(payload.len(), 48);
    assert_eq!(payload[&1], 4);
    assert_eq!(payload[&2], 2);
    assert_eq!(payload[&3], 5);
    assert_eq!(payload[&4], 2);
    assert_eq!(payload[&5], 5);
    assert_eq!(payload[&48], 2);

    let scoring = transform::riasec_scoring_answers(&sheet, 48);
    assert!(scoring[&1]);
    assert!(!scoring[&3]);
}

#[test]
fn grit_adapter_defaults_to_neutral() {
    let mut sheet = sheet_with(TestType::Grit, |_| number(4.0));
    sheet.record(1, number(0.0));
    sheet.record(2, RawAnswer::Flag(true));
    sheet.record(3, number(-2.0));
    sheet.record(4, number(12.0));

    let answers = transform::grit_answers(&sheet, 12);

    assert_eq!(answers[&1], 3);
    assert_eq!(answers[&2], 3);
    assert_eq!(answers[&3], 1);
    assert_eq!(answers[&4], 5);
    assert_eq!(answers[&12], 4);
}

#[test]
fn sheets_serialize_as_keyed_objects() {
    let mut sheet = AnswerSheet::new();
    sheet.record(2, RawAnswer::Flag(true));
    sheet.record(10, number(3.0));

    let value = serde_json::to_value(&sheet).expect("serializes");
    assert_eq!(value, json!({"2": true, "10": 3.0}));
}
