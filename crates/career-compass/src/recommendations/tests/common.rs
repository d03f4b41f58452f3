use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::NaiveDate;
use serde_json::{json, Value};

use crate::assessments::domain::{StudentId, TestType};
use crate::assessments::repository::InMemorySessionStore;
use crate::assessments::service::{AnswerSubmission, AssessmentService};
use crate::assessments::transform::RawAnswer;
use crate::recommendations::client::{ExternalServiceError, RecommendationClient};
use crate::recommendations::schema::{CareerAssessmentRequest, UniversityRecommendationRequest};
use crate::recommendations::service::RecommendationService;

pub(super) fn student() -> StudentId {
    StudentId("student-042".to_string())
}

pub(super) fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 9, 1).expect("valid date")
}

/// Client double replaying canned replies and recording every request it sees.
#[derive(Default)]
pub(super) struct StubClient {
    career_reply: Mutex<Option<Result<Value, ExternalServiceError>>>,
    university_reply: Mutex<Option<Result<Value, ExternalServiceError>>>,
    pub(super) career_requests: Mutex<Vec<CareerAssessmentRequest>>,
    pub(super) university_requests: Mutex<Vec<UniversityRecommendationRequest>>,
}

impl StubClient {
    pub(super) fn with_career(reply: Result<Value, ExternalServiceError>) -> Self {
        let client = Self::default();
        *client.career_reply.lock().expect("lock") = Some(reply);
        client
    }

    pub(super) fn with_university(reply: Result<Value, ExternalServiceError>) -> Self {
        let client = Self::default();
        *client.university_reply.lock().expect("lock") = Some(reply);
        client
    }

    pub(super) fn career_calls(&self) -> usize {
        self.career_requests.lock().expect("lock").len()
    }

    pub(super) fn university_calls(&self) -> usize {
        self.university_requests.lock().expect("lock").len()
    }
}

#[async_trait]
impl RecommendationClient for StubClient {
    async fn career_assessment(
        &self,
        request: &CareerAssessmentRequest,
    ) -> Result<Value, ExternalServiceError> {
        self.career_requests
            .lock()
            .expect("lock")
            .push(request.clone());
        self.career_reply
            .lock()
            .expect("lock")
            .clone()
            .unwrap_or_else(|| Err(ExternalServiceError::Unreachable("no reply".to_string())))
    }

    async fn university_recommendation(
        &self,
        request: &UniversityRecommendationRequest,
    ) -> Result<Value, ExternalServiceError> {
        self.university_requests
            .lock()
            .expect("lock")
            .push(request.clone());
        self.university_reply
            .lock()
            .expect("lock")
            .clone()
            .unwrap_or_else(|| Err(ExternalServiceError::Unreachable("no reply".to_string())))
    }
}

pub(super) fn assessment_service() -> Arc<AssessmentService<InMemorySessionStore>> {
    Arc::new(AssessmentService::new(Arc::new(InMemorySessionStore::new())))
}

pub(super) fn take_test(
    service: &AssessmentService<InMemorySessionStore>,
    test_type: TestType,
    student: &StudentId,
    answer: impl Fn(u16) -> RawAnswer,
) {
    let session = service.start(test_type, student).expect("session starts");
    for number in 0..test_type.question_count() {
        service
            .submit_answer(AnswerSubmission {
                test_id: session.id.clone(),
                test_type,
                question_number: i64::from(number),
                answer: answer(number + 1),
            })
            .expect("answer accepted");
    }
}

/// MBTI all +2, RIASEC yes on every third question, GRIT all 4.
pub(super) fn complete_all(
    service: &AssessmentService<InMemorySessionStore>,
    student: &StudentId,
) {
    take_test(service, TestType::Mbti, student, |_| RawAnswer::Number(2.0));
    take_test(service, TestType::Riasec, student, |id| {
        RawAnswer::Flag(id % 3 == 0)
    });
    take_test(service, TestType::Grit, student, |_| RawAnswer::Number(4.0));
}

pub(super) fn recommendation_service(
    client: StubClient,
) -> (
    RecommendationService<InMemorySessionStore, StubClient>,
    Arc<AssessmentService<InMemorySessionStore>>,
    Arc<StubClient>,
) {
    let assessments = assessment_service();
    let client = Arc::new(client);
    let service = RecommendationService::new(assessments.clone(), client.clone());
    (service, assessments, client)
}

pub(super) fn career_fixture() -> Value {
    json!({
        "success": true,
        "assessment": {
            "mbti": {
                "personality_type": "ESTJ",
                "dimension_scores": {"E": 75.0, "I": 15.0},
                "confidence": 0.67
            },
            "grit": {"score": 4.0, "level": "High", "description": "Strong perseverance"},
            "riasec": {
                "code": "RIA",
                "scores": {"Realistic": 2.0, "Investigative": 3.0},
                "top3": [["I", 3.0], ["R", 2.0], ["A", 2.0]]
            }
        },
        "recommendations": [
            {
                "title": "Civil Engineer",
                "match_score": 87.46,
                "riasec_code": "RIC",
                "riasec_scores": {"R": 6.0, "I": 5.0, "C": 4.0}
            },
            {
                "title": "Data Scientist",
                "match_score": 72.5,
                "riasec_code": "ICR",
                "description": "Finds patterns in data"
            }
        ]
    })
}

fn university(id: Value, name: &str, match_score: f64) -> Value {
    json!({
        "id": id,
        "name": name,
        "country": "USA",
        "ranking": 12,
        "match_score": match_score,
        "match_reasons": ["Strong program fit"],
        "scholarship_info": {
            "merit_based": true,
            "need_based": false,
            "amount_range": "$5,000 - $20,000"
        }
    })
}

pub(super) fn university_fixture() -> Value {
    json!({
        "success": true,
        "universities": {
            "REACH": {
                "count": 1,
                "description": "Ambitious choices",
                "universities": [university(json!(1), "Stanford University", 71.0)]
            },
            "MATCH": {
                "count": 2,
                "description": "Good fit",
                "universities": [
                    university(json!("u-7"), "University of Michigan", 88.5),
                    university(json!(3), "Purdue University", 71.0)
                ]
            },
            "SAFETY": {
                "count": 1,
                "description": "Likely admits",
                "universities": [university(json!(4), "Arizona State University", 93.0)]
            }
        },
        "roadmap": {
            "start_date": "2025-09-01",
            "duration_months": 12,
            "overall_goals": ["Raise SAT score"],
            "key_milestones": [
                {"month": 3, "name": "SAT", "description": "Sit the first SAT"}
            ],
            "monthly_plans": [
                {
                    "month": 1,
                    "month_name": "September 2025",
                    "focus_areas": ["Test prep"],
                    "tasks": ["Take a diagnostic test"],
                    "goals": ["Baseline score"],
                    "priority": "High"
                }
            ]
        },
        "summary": {
            "total_matched": 4,
            "reach_count": 1,
            "match_count": 2,
            "safety_count": 1
        }
    })
}
