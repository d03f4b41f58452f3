//! Wire shapes exchanged with the external recommendation service, plus response validation.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::client::ExternalServiceError;

/// Assessment summary shared by the outgoing university payload and the career response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentBlock {
    pub mbti: MbtiBlock,
    pub grit: GritBlock,
    pub riasec: RiasecBlock,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MbtiBlock {
    pub personality_type: String,
    #[serde(default)]
    pub dimension_scores: BTreeMap<String, f64>,
    #[serde(default)]
    pub confidence: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GritBlock {
    pub score: f64,
    pub level: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiasecBlock {
    pub code: String,
    pub scores: BTreeMap<String, f64>,
    /// `[letter, count]` pairs in ranked order.
    #[serde(default)]
    pub top3: Vec<(String, f64)>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CareerAssessmentRequest {
    pub mbti_answers: Vec<i32>,
    pub grit_answers: BTreeMap<u16, i32>,
    pub riasec_answers: BTreeMap<u16, i32>,
    pub top_n: u32,
    pub min_match_score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CareerRecommendation {
    pub title: String,
    pub match_score: f64,
    pub riasec_code: String,
    #[serde(default)]
    pub riasec_scores: BTreeMap<String, f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CareerAssessmentResponse {
    pub success: bool,
    pub assessment: AssessmentBlock,
    pub recommendations: Vec<CareerRecommendation>,
}

/// Display shape of a career recommendation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CareerMatch {
    pub name: String,
    pub category: String,
    pub match_reason: String,
    pub match_percentage: i64,
    pub riasec_code: String,
    pub riasec_scores: BTreeMap<String, f64>,
}

impl From<&CareerRecommendation> for CareerMatch {
    fn from(recommendation: &CareerRecommendation) -> Self {
        CareerMatch {
            name: recommendation.title.clone(),
            category: recommendation.riasec_code.clone(),
            match_reason: format!(
                "Matches {:.1}% of your test results",
                recommendation.match_score
            ),
            match_percentage: recommendation.match_score.round() as i64,
            riasec_code: recommendation.riasec_code.clone(),
            riasec_scores: recommendation.riasec_scores.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PillarScores {
    pub aca: f64,
    pub lan: f64,
    pub hdnk: f64,
    pub skill: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileSummary {
    pub success: bool,
    pub total_pillar_scores: PillarScores,
    pub main_spike: String,
    pub sharpness: String,
}

/// Profile analysis ("feature 1") output. Sections beyond the summary pass through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileAnalysis {
    pub summary: ProfileSummary,
    #[serde(flatten)]
    pub sections: Map<String, Value>,
}

impl ProfileAnalysis {
    /// Stand-in used when the student has no stored profile analysis.
    pub fn unknown() -> Self {
        ProfileAnalysis {
            summary: ProfileSummary {
                success: true,
                total_pillar_scores: PillarScores::default(),
                main_spike: "Unknown".to_string(),
                sharpness: "Low".to_string(),
            },
            sections: Map::new(),
        }
    }
}

/// Career assessment ("feature 2") output as forwarded to the university recommender.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentOutput {
    pub success: bool,
    pub assessment: AssessmentBlock,
    #[serde(default)]
    pub recommendations: Vec<CareerRecommendation>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UniversityRecommendationRequest {
    pub feature1_output: ProfileAnalysis,
    pub feature2_output: AssessmentOutput,
    pub top_n: u32,
    pub min_match_score: f64,
    pub duration_months: u32,
    pub start_date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UniversityId {
    Number(serde_json::Number),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScholarshipInfo {
    pub merit_based: bool,
    pub need_based: bool,
    pub amount_range: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UniversityRecommendation {
    pub id: UniversityId,
    pub name: String,
    pub country: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    pub ranking: f64,
    pub match_score: f64,
    pub match_reasons: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub essay_requirements: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scholarship_info: Option<ScholarshipInfo>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UniversityCategory {
    pub count: u32,
    pub description: String,
    pub universities: Vec<UniversityRecommendation>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum UniversityTier {
    Reach,
    Match,
    Safety,
}

impl UniversityTier {
    pub const ALL: [UniversityTier; 3] = [
        UniversityTier::Reach,
        UniversityTier::Match,
        UniversityTier::Safety,
    ];
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UniversityCategories {
    #[serde(rename = "REACH")]
    pub reach: UniversityCategory,
    #[serde(rename = "MATCH")]
    pub matched: UniversityCategory,
    #[serde(rename = "SAFETY")]
    pub safety: UniversityCategory,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoadmapMilestone {
    pub month: u32,
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyPlan {
    pub month: u32,
    pub month_name: String,
    pub focus_areas: Vec<String>,
    pub tasks: Vec<String>,
    pub goals: Vec<String>,
    pub priority: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Roadmap {
    pub start_date: String,
    pub duration_months: u32,
    pub overall_goals: Vec<String>,
    pub key_milestones: Vec<RoadmapMilestone>,
    pub monthly_plans: Vec<MonthlyPlan>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendationSummary {
    pub total_matched: u32,
    pub reach_count: u32,
    pub match_count: u32,
    pub safety_count: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UniversityRecommendationResponse {
    pub success: bool,
    pub universities: UniversityCategories,
    pub roadmap: Roadmap,
    pub summary: RecommendationSummary,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl UniversityRecommendationResponse {
    pub fn category(&self, tier: UniversityTier) -> &UniversityCategory {
        match tier {
            UniversityTier::Reach => &self.universities.reach,
            UniversityTier::Match => &self.universities.matched,
            UniversityTier::Safety => &self.universities.safety,
        }
    }

    /// Sum of the counts reported by each category.
    pub fn total_count(&self) -> u32 {
        UniversityTier::ALL
            .iter()
            .map(|tier| self.category(*tier).count)
            .sum()
    }

    /// Reach, then match, then safety universities in one list.
    pub fn all_universities(&self) -> Vec<&UniversityRecommendation> {
        UniversityTier::ALL
            .iter()
            .flat_map(|tier| self.category(*tier).universities.iter())
            .collect()
    }

    fn validate(&self) -> Result<(), String> {
        for tier in UniversityTier::ALL {
            validate_category(tier, self.category(tier))?;
        }
        validate_roadmap(&self.roadmap)
    }
}

/// Highest match score first; the sort is stable for equal scores.
pub fn sort_by_match_score(
    mut universities: Vec<&UniversityRecommendation>,
) -> Vec<&UniversityRecommendation> {
    universities.sort_by(|a, b| b.match_score.total_cmp(&a.match_score));
    universities
}

fn non_empty(value: &str) -> bool {
    !value.trim().is_empty()
}

fn require(condition: bool, message: impl FnOnce() -> String) -> Result<(), String> {
    if condition {
        Ok(())
    } else {
        Err(message())
    }
}

fn validate_category(tier: UniversityTier, category: &UniversityCategory) -> Result<(), String> {
    require(non_empty(&category.description), || {
        format!("{tier:?} category has an empty description")
    })?;
    for university in &category.universities {
        require(
            non_empty(&university.name) && non_empty(&university.country),
            || format!("{tier:?} university is missing a name or country"),
        )?;
        require(
            university.ranking.is_finite() && university.match_score.is_finite(),
            || format!("{} has a non-numeric ranking or match score", university.name),
        )?;
        require(
            university.match_reasons.iter().all(|reason| non_empty(reason)),
            || format!("{} has an empty match reason", university.name),
        )?;
        if let Some(scholarship) = &university.scholarship_info {
            require(non_empty(&scholarship.amount_range), || {
                format!("{} has an empty scholarship amount range", university.name)
            })?;
        }
    }
    Ok(())
}

fn validate_roadmap(roadmap: &Roadmap) -> Result<(), String> {
    require(non_empty(&roadmap.start_date), || {
        "roadmap start_date is empty".to_string()
    })?;
    require(roadmap.overall_goals.iter().all(|goal| non_empty(goal)), || {
        "roadmap has an empty overall goal".to_string()
    })?;
    for milestone in &roadmap.key_milestones {
        require(
            non_empty(&milestone.name) && non_empty(&milestone.description),
            || format!("milestone for month {} is incomplete", milestone.month),
        )?;
    }
    for plan in &roadmap.monthly_plans {
        let lists_filled = [&plan.focus_areas, &plan.tasks, &plan.goals]
            .iter()
            .all(|items| items.iter().all(|item| non_empty(item)));
        require(
            non_empty(&plan.month_name) && non_empty(&plan.priority) && lists_filled,
            || format!("monthly plan for month {} is incomplete", plan.month),
        )?;
    }
    Ok(())
}

fn ensure_success(value: &Value, fallback: &str) -> Result<(), ExternalServiceError> {
    let Some(object) = value.as_object() else {
        return Err(ExternalServiceError::InvalidResponse(
            "response body is not a JSON object".to_string(),
        ));
    };
    if object.get("success") == Some(&Value::Bool(true)) {
        return Ok(());
    }
    let message = object
        .get("error")
        .and_then(Value::as_str)
        .filter(|message| non_empty(message))
        .unwrap_or(fallback);
    Err(ExternalServiceError::Rejected(message.to_string()))
}

pub fn parse_career_response(value: Value) -> Result<CareerAssessmentResponse, ExternalServiceError> {
    ensure_success(&value, "Career assessment failed")?;
    serde_json::from_value(value)
        .map_err(|err| ExternalServiceError::InvalidResponse(err.to_string()))
}

pub fn parse_university_response(
    value: Value,
) -> Result<UniversityRecommendationResponse, ExternalServiceError> {
    ensure_success(&value, "Failed to get university recommendations")?;
    let response: UniversityRecommendationResponse = serde_json::from_value(value)
        .map_err(|err| ExternalServiceError::InvalidResponse(err.to_string()))?;
    response
        .validate()
        .map_err(ExternalServiceError::InvalidResponse)?;
    Ok(response)
}
