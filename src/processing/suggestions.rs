//! Improvement suggestions derived from the score breakdown

use crate::model::ResumeData;
use crate::processing::scorer::{has_metrics, ScoreBreakdown};
use crate::processing::vocabulary::{contains_any, ACTION_VERBS};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Missing keywords named in a single suggestion
const MISSING_KEYWORDS_SHOWN: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    #[serde(rename = "type")]
    pub kind: SuggestionType,
    pub category: SuggestionCategory,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionType {
    Critical,
    Warning,
    Info,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionCategory {
    Format,
    Keywords,
    Structure,
    Readability,
}

impl fmt::Display for SuggestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SuggestionType::Critical => "critical",
            SuggestionType::Warning => "warning",
            SuggestionType::Info => "info",
        };
        write!(f, "{}", label)
    }
}

impl fmt::Display for SuggestionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SuggestionCategory::Format => "format",
            SuggestionCategory::Keywords => "keywords",
            SuggestionCategory::Structure => "structure",
            SuggestionCategory::Readability => "readability",
        };
        write!(f, "{}", label)
    }
}

impl Suggestion {
    fn new(kind: SuggestionType, category: SuggestionCategory, message: impl Into<String>) -> Self {
        Self {
            kind,
            category,
            message: message.into(),
        }
    }
}

/// Evaluate the suggestion rules in their fixed order.
///
/// Each group only fires when its sub-score is below threshold; rules inside a
/// group are independent of each other.
pub fn generate(
    breakdown: &ScoreBreakdown,
    resume: &ResumeData,
    job_description: &str,
    resume_text: &str,
    job_keywords: &[String],
    matched_keywords: &[String],
) -> Vec<Suggestion> {
    let mut suggestions = Vec::new();

    if breakdown.format < 80 {
        if resume.education.is_empty() {
            suggestions.push(Suggestion::new(
                SuggestionType::Critical,
                SuggestionCategory::Format,
                "Add education section - most ATS systems require this",
            ));
        }
        if resume.experience.is_empty() {
            suggestions.push(Suggestion::new(
                SuggestionType::Critical,
                SuggestionCategory::Format,
                "Add work experience or internships",
            ));
        }
        if !resume.has_skills() {
            suggestions.push(Suggestion::new(
                SuggestionType::Warning,
                SuggestionCategory::Format,
                "Add a skills section with relevant technical and soft skills",
            ));
        }
    }

    if breakdown.keywords < 70 && !job_description.is_empty() {
        let missing: Vec<&str> = job_keywords
            .iter()
            .filter(|k| !matched_keywords.contains(k))
            .take(MISSING_KEYWORDS_SHOWN)
            .map(String::as_str)
            .collect();

        if !missing.is_empty() {
            suggestions.push(Suggestion::new(
                SuggestionType::Warning,
                SuggestionCategory::Keywords,
                format!(
                    "Add these missing keywords from the job description: {}",
                    missing.join(", ")
                ),
            ));
        }
    }

    if breakdown.structure < 80 {
        if resume.summary_len() < 50 {
            suggestions.push(Suggestion::new(
                SuggestionType::Info,
                SuggestionCategory::Structure,
                "Add a professional summary at the top of your resume",
            ));
        }
        if resume.experience.iter().any(|exp| exp.achievements.is_empty()) {
            suggestions.push(Suggestion::new(
                SuggestionType::Info,
                SuggestionCategory::Structure,
                "Add achievement bullet points to your experience entries",
            ));
        }
    }

    if breakdown.readability < 80 {
        if !has_metrics(resume_text) {
            suggestions.push(Suggestion::new(
                SuggestionType::Info,
                SuggestionCategory::Readability,
                "Add quantifiable metrics to your achievements (e.g., \"increased by 25%\", \"managed team of 5\")",
            ));
        }
        if !contains_any(&resume_text.to_lowercase(), ACTION_VERBS) {
            suggestions.push(Suggestion::new(
                SuggestionType::Info,
                SuggestionCategory::Readability,
                "Use strong action verbs (developed, implemented, designed, led, etc.)",
            ));
        }
    }

    suggestions
}
