use career_compass::assessments::{
    AnswerSheet, ScoringEngine, StandardQuestionBank, TestResult, TestType,
};
use career_compass::error::AppError;
use clap::Args;
use serde::Serialize;
use serde_json::Value;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// Test type to score (mbti, riasec or grit)
    #[arg(value_parser = crate::infra::parse_test_type)]
    pub(crate) test_type: TestType,
    /// JSON file holding an answer array or an object keyed by question id
    pub(crate) answers: PathBuf,
    /// Print the raw result as JSON instead of a summary
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Debug, Serialize)]
pub(crate) struct ScoreReport {
    pub(crate) test_type: TestType,
    pub(crate) answered: usize,
    pub(crate) total_questions: u16,
    pub(crate) result: TestResult,
}

pub(crate) fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let raw = std::fs::read_to_string(&args.answers)?;
    let value: Value = serde_json::from_str(&raw)?;
    let report = score_value(args.test_type, &value)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        render_report(&report);
    }
    Ok(())
}

/// Scores a parsed answers document. Non-collection documents have nothing to score.
pub(crate) fn score_value(test_type: TestType, value: &Value) -> Result<ScoreReport, AppError> {
    let sheet = AnswerSheet::from_value(value);
    let engine = ScoringEngine::new(&StandardQuestionBank);
    let result = engine.score(test_type, sheet.as_ref())?;

    Ok(ScoreReport {
        test_type,
        answered: sheet.map(|sheet| sheet.len()).unwrap_or(0),
        total_questions: test_type.question_count(),
        result,
    })
}

fn render_report(report: &ScoreReport) {
    println!(
        "{} result ({} of {} questions answered)",
        report.test_type, report.answered, report.total_questions
    );

    match &report.result {
        TestResult::Mbti(mbti) => {
            println!("Type: {} ({})", mbti.personality_type, mbti.type_title);
            for (pole, pct) in &mbti.percentages {
                println!("  {:?}: {}% (raw {})", pole, pct, mbti.score(*pole));
            }
            println!("Confidence: {:.2}", mbti.confidence);
        }
        TestResult::Riasec(riasec) => {
            println!("Holland code: {} ({})", riasec.holland_code, riasec.profile.title);
            for entry in &riasec.top_three {
                println!("  {}: {}", entry.category.name(), entry.score);
            }
            if !riasec.profile.careers.is_empty() {
                println!("Careers: {}", riasec.profile.careers.join(", "));
            }
        }
        TestResult::Grit(grit) => {
            println!("Grit: {:.1} ({})", grit.score, grit.level.label());
            println!(
                "  Passion: {:.1}, Perseverance: {:.1}",
                grit.passion.score, grit.perseverance.score
            );
            println!("{}", grit.description);
        }
    }
}
