use chrono::NaiveDate;
use serde_json::json;

use super::common::*;
use crate::assessments::domain::TestType;
use crate::assessments::transform::RawAnswer;
use crate::recommendations::aggregate::{
    aggregate, AggregationError, CareerTunables, UniversityTunables,
};
use crate::recommendations::schema::ProfileAnalysis;

fn sessions_for(
    service: &crate::assessments::AssessmentService<crate::assessments::InMemorySessionStore>,
) -> Vec<Option<crate::assessments::TestSession>> {
    service
        .sessions(&student())
        .expect("sessions")
        .into_iter()
        .map(|(_, session)| session)
        .collect()
}

#[test]
fn aggregation_names_every_missing_test() {
    let service = assessment_service();
    take_test(&service, TestType::Grit, &student(), |_| RawAnswer::Number(4.0));
    service
        .start(TestType::Mbti, &student())
        .expect("session starts");

    let sessions = sessions_for(&service);
    let err = aggregate(sessions[0].as_ref(), sessions[1].as_ref(), sessions[2].as_ref())
        .expect_err("two tests missing");

    assert_eq!(
        err,
        AggregationError::MissingPrerequisite {
            missing: vec![TestType::Mbti, TestType::Riasec]
        }
    );
    assert_eq!(
        err.to_string(),
        "please complete all tests (MBTI, RIASEC, GRIT) first; not completed: MBTI, RIASEC"
    );
}

#[test]
fn assessment_block_summarizes_all_three_results() {
    let service = assessment_service();
    complete_all(&service, &student());
    let sessions = sessions_for(&service);

    let completed = aggregate(sessions[0].as_ref(), sessions[1].as_ref(), sessions[2].as_ref())
        .expect("all complete");
    let block = completed.assessment_block();

    assert_eq!(block.mbti.personality_type, "ESTJ");
    assert_eq!(block.mbti.dimension_scores["E"], 47.0);
    assert_eq!(block.mbti.dimension_scores["I"], 43.0);
    assert_eq!(block.riasec.code, "IAE");
    assert_eq!(block.riasec.scores["Investigative"], 3.0);
    assert_eq!(block.riasec.scores["Realistic"], 2.0);
    assert_eq!(
        block.riasec.top3,
        vec![
            ("I".to_string(), 3.0),
            ("A".to_string(), 3.0),
            ("E".to_string(), 3.0)
        ]
    );
    assert_eq!(block.grit.score, 3.0);
    assert_eq!(block.grit.level, "Moderate");
}

#[test]
fn career_request_uses_recommender_encodings() {
    let service = assessment_service();
    complete_all(&service, &student());
    let sessions = sessions_for(&service);
    let completed = aggregate(sessions[0].as_ref(), sessions[1].as_ref(), sessions[2].as_ref())
        .expect("all complete");

    let request = completed
        .career_request(&CareerTunables::default())
        .expect("valid tunables");

    assert_eq!(request.mbti_answers, vec![2; 60]);
    assert_eq!(request.riasec_answers.len(), 48);
    assert_eq!(request.riasec_answers[&3], 4);
    assert_eq!(request.riasec_answers[&4], 2);
    assert!(request.grit_answers.values().all(|value| *value == 4));
    assert_eq!(request.top_n, 10);
    assert_eq!(request.min_match_score, 50.0);
}

#[test]
fn university_request_defaults_profile_and_start_date() {
    let service = assessment_service();
    complete_all(&service, &student());
    let sessions = sessions_for(&service);
    let completed = aggregate(sessions[0].as_ref(), sessions[1].as_ref(), sessions[2].as_ref())
        .expect("all complete");

    let request = completed
        .university_request(None, &UniversityTunables::default(), today())
        .expect("valid tunables");

    assert_eq!(request.feature1_output, ProfileAnalysis::unknown());
    assert_eq!(request.feature1_output.summary.main_spike, "Unknown");
    assert_eq!(request.start_date, today());
    assert_eq!(request.top_n, 50);
    assert_eq!(request.min_match_score, 30.0);
    assert_eq!(request.duration_months, 12);
    assert!(request.feature2_output.success);
    assert!(request.feature2_output.recommendations.is_empty());

    let payload = serde_json::to_value(&request).expect("serializes");
    assert_eq!(payload["start_date"], json!("2025-09-01"));
    assert_eq!(
        payload["feature1_output"]["summary"]["total_pillar_scores"]["hdnk"],
        json!(0.0)
    );
}

#[test]
fn explicit_start_date_wins_over_today() {
    let service = assessment_service();
    complete_all(&service, &student());
    let sessions = sessions_for(&service);
    let completed = aggregate(sessions[0].as_ref(), sessions[1].as_ref(), sessions[2].as_ref())
        .expect("all complete");
    let start = NaiveDate::from_ymd_opt(2026, 1, 15).expect("valid date");
    let tunables = UniversityTunables {
        start_date: Some(start),
        ..UniversityTunables::default()
    };

    let request = completed
        .university_request(None, &tunables, today())
        .expect("valid tunables");

    assert_eq!(request.start_date, start);
}

#[test]
fn tunables_are_validated() {
    let zero_top = CareerTunables {
        top_n: 0,
        ..CareerTunables::default()
    };
    assert!(matches!(
        zero_top.validate(),
        Err(AggregationError::InvalidTunable { field: "top_n", .. })
    ));

    let wild_score = CareerTunables {
        min_match_score: 140.0,
        ..CareerTunables::default()
    };
    assert!(matches!(
        wild_score.validate(),
        Err(AggregationError::InvalidTunable {
            field: "min_match_score",
            ..
        })
    ));

    let no_duration = UniversityTunables {
        duration_months: 0,
        ..UniversityTunables::default()
    };
    assert!(matches!(
        no_duration.validate(),
        Err(AggregationError::InvalidTunable {
            field: "duration_months",
            ..
        })
    ));
    assert!(UniversityTunables::default().validate().is_ok());
}
