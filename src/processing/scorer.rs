//! ATS compatibility scoring
//!
//! Four sub-scores, each on a 0-100 scale, are combined with fixed weights:
//!
//! | sub-score   | weight |
//! |-------------|--------|
//! | format      | 0.25   |
//! | keywords    | 0.40   |
//! | structure   | 0.20   |
//! | readability | 0.15   |
//!
//! The thresholds and point values below are scoring policy, kept verbatim so
//! results stay comparable across versions.

use crate::model::ResumeData;
use crate::processing::flattener::flatten_resume;
use crate::processing::keywords::{matched_keywords, KeywordExtractor};
use crate::processing::suggestions::{self, Suggestion};
use crate::processing::vocabulary::{contains_any, ACTION_VERBS, GENERIC_TECHNICAL_TERMS};
use log::debug;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

pub const FORMAT_WEIGHT: f64 = 0.25;
pub const KEYWORD_WEIGHT: f64 = 0.40;
pub const STRUCTURE_WEIGHT: f64 = 0.20;
pub const READABILITY_WEIGHT: f64 = 0.15;

/// Flattened text shorter than this is not worth keyword analysis
const MIN_KEYWORD_TEXT_LEN: usize = 20;

/// Outcome of a single scoring call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreResult {
    #[serde(rename = "score")]
    pub overall: u8,
    pub breakdown: ScoreBreakdown,
    pub suggestions: Vec<Suggestion>,
    /// Ranked job description keywords
    #[serde(rename = "keywords")]
    pub extracted_keywords: Vec<String>,
    pub matched_keywords: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub format: u8,
    pub keywords: u8,
    pub structure: u8,
    pub readability: u8,
    pub overall: u8,
}

impl ScoreResult {
    /// Extracted keywords the resume does not mention
    pub fn missing_keywords(&self) -> Vec<&str> {
        self.extracted_keywords
            .iter()
            .filter(|k| !self.matched_keywords.contains(k))
            .map(String::as_str)
            .collect()
    }
}

/// Stateless scorer; the extractor only carries tuning values
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AtsScorer {
    extractor: KeywordExtractor,
}

/// Score a resume against a job description with the default keyword policy
pub fn score(resume: &ResumeData, job_description: &str) -> ScoreResult {
    AtsScorer::default().score(resume, job_description)
}

impl AtsScorer {
    pub fn new(extractor: KeywordExtractor) -> Self {
        Self { extractor }
    }

    pub fn extractor(&self) -> &KeywordExtractor {
        &self.extractor
    }

    pub fn score(&self, resume: &ResumeData, job_description: &str) -> ScoreResult {
        let text = flatten_resume(resume);
        let extracted_keywords = self.extractor.extract(job_description);
        let matched = matched_keywords(&text, &extracted_keywords);

        let format = format_score(resume);
        let keywords = keyword_score(&text, job_description, extracted_keywords.len(), matched.len());
        let structure = structure_score(resume);
        let readability = readability_score(resume, &text);
        let overall = overall_score(format, keywords, structure, readability);

        let breakdown = ScoreBreakdown {
            format,
            keywords,
            structure,
            readability,
            overall,
        };

        debug!(
            "ATS score breakdown: format={} keywords={} structure={} readability={} overall={} (name: {}, summary: {}, keywords {}/{})",
            format,
            keywords,
            structure,
            readability,
            overall,
            resume.has_full_name(),
            resume.summary_text().is_some(),
            matched.len(),
            extracted_keywords.len()
        );

        let suggestions = suggestions::generate(
            &breakdown,
            resume,
            job_description,
            &text,
            &extracted_keywords,
            &matched,
        );

        ScoreResult {
            overall,
            breakdown,
            suggestions,
            extracted_keywords,
            matched_keywords: matched,
        }
    }
}

/// Weighted combination, rounded half up
pub fn overall_score(format: u8, keywords: u8, structure: u8, readability: u8) -> u8 {
    let weighted = f64::from(format) * FORMAT_WEIGHT
        + f64::from(keywords) * KEYWORD_WEIGHT
        + f64::from(structure) * STRUCTURE_WEIGHT
        + f64::from(readability) * READABILITY_WEIGHT;
    weighted.round().clamp(0.0, 100.0) as u8
}

/// Section presence: 0 for an empty resume, otherwise 50 plus per-section points
pub fn format_score(resume: &ResumeData) -> u8 {
    let has_personal_info = resume.has_full_name() || resume.has_email();
    let has_summary = resume.summary.as_deref().is_some_and(|s| !s.trim().is_empty());
    let has_education = !resume.education.is_empty();
    let has_experience = !resume.experience.is_empty();
    let has_skills = resume.has_skills();

    if !(has_personal_info || has_summary || has_education || has_experience || has_skills) {
        return 0;
    }

    let mut score = 50u32;
    if has_personal_info {
        score += 15;
    }
    if has_summary {
        score += 10;
    }
    if has_education {
        score += 10;
    }
    if has_experience {
        score += 10;
    }
    if has_skills {
        score += 5;
    }

    score.min(100) as u8
}

/// Keyword coverage of the job description, bucketed by match percentage
pub fn keyword_score(resume_text: &str, job_description: &str, total: usize, matched: usize) -> u8 {
    if resume_text.trim().chars().count() < MIN_KEYWORD_TEXT_LEN {
        return 0;
    }

    if job_description.trim().is_empty() {
        let lowercase = resume_text.to_lowercase();
        let mut score = 30;
        if contains_any(&lowercase, ACTION_VERBS) {
            score += 20;
        }
        if contains_any(&lowercase, GENERIC_TECHNICAL_TERMS) {
            score += 15;
        }
        return score;
    }

    if total == 0 {
        return 40;
    }

    let match_percentage = (matched as f64 / total as f64) * 100.0;
    match match_percentage {
        p if p >= 70.0 => 100,
        p if p >= 50.0 => 85,
        p if p >= 30.0 => 70,
        p if p >= 15.0 => 50,
        _ => 30,
    }
}

/// Additive points for contact details and section depth, capped at 100
pub fn structure_score(resume: &ResumeData) -> u8 {
    let mut score = 0u32;

    if resume.has_full_name() {
        score += 15;
    }
    if resume.has_email() {
        score += 15;
    }
    if resume.has_phone() {
        score += 10;
    }

    if resume.summary_len() > 50 {
        score += 15;
    }

    if !resume.experience.is_empty() {
        score += 15;
        if resume.experience.iter().any(|exp| !exp.achievements.is_empty()) {
            score += 10;
        }
    }

    if !resume.technical_skills().is_empty() {
        score += 10;
    }
    if !resume.soft_skills().is_empty() {
        score += 5;
    }

    if !resume.projects.is_empty() {
        score += 5;
    }

    score.min(100) as u8
}

/// Starts at 100 and deducts for summary shape, weak verbs and missing metrics
pub fn readability_score(resume: &ResumeData, resume_text: &str) -> u8 {
    let summary = resume.summary_text();
    if summary.is_none() && resume.experience.is_empty() && resume.education.is_empty() {
        return 0;
    }

    let mut score = 100i32;

    match summary {
        Some(summary) => {
            let sentences = sentence_count(summary);
            if sentences < 2 {
                score -= 10;
            }
            if sentences > 5 {
                score -= 5;
            }
        }
        None => score -= 20,
    }

    if !resume.experience.is_empty() && !achievements_use_action_verbs(resume) {
        score -= 15;
    }

    if !has_metrics(resume_text) {
        score -= 10;
    }

    score.max(0) as u8
}

fn sentence_regex() -> &'static Regex {
    static SENTENCE: OnceLock<Regex> = OnceLock::new();
    SENTENCE.get_or_init(|| Regex::new(r"[.!?]+").expect("Invalid sentence regex"))
}

fn metric_regex() -> &'static Regex {
    static METRIC: OnceLock<Regex> = OnceLock::new();
    // 25%, $40, 10+, "5 engineers"
    METRIC.get_or_init(|| {
        Regex::new(r"[0-9]+%|\$[0-9]+|[0-9]+\+|[0-9]+ [a-zA-Z]+").expect("Invalid metric regex")
    })
}

/// Sentences separated by runs of `.`, `!` or `?`, ignoring blank pieces
pub fn sentence_count(text: &str) -> usize {
    sentence_regex()
        .split(text)
        .filter(|s| !s.trim().is_empty())
        .count()
}

/// Whether the text carries a quantifiable figure
pub fn has_metrics(text: &str) -> bool {
    metric_regex().is_match(text)
}

fn achievements_use_action_verbs(resume: &ResumeData) -> bool {
    resume.experience.iter().any(|exp| {
        let achievements = exp.achievements.join(" ").to_lowercase();
        contains_any(&achievements, ACTION_VERBS)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Education, Experience, PersonalInfo, Project, Skills};
    use crate::processing::suggestions::{SuggestionCategory, SuggestionType};

    const SUMMARY: &str = "Backend engineer with eight years of experience shipping data platforms.";

    fn jane_doe() -> ResumeData {
        ResumeData {
            personal_info: Some(PersonalInfo {
                full_name: Some("Jane Doe".into()),
                email: Some("jane@x.com".into()),
                ..Default::default()
            }),
            summary: Some(SUMMARY.into()),
            experience: vec![Experience {
                title: Some("Engineer".into()),
                company: Some("Acme".into()),
                achievements: vec!["Reduced latency by 30%".into()],
                ..Default::default()
            }],
            skills: Some(Skills {
                technical: vec!["Python".into(), "SQL".into()],
                soft: vec!["Communication".into()],
            }),
            ..Default::default()
        }
    }

    fn complete_resume() -> ResumeData {
        ResumeData {
            personal_info: Some(PersonalInfo {
                full_name: Some("Alex Kim".into()),
                email: Some("a@k.io".into()),
                phone: Some("555".into()),
                ..Default::default()
            }),
            summary: Some(
                "Platform engineer focused on reliability. Built deployment tooling for large teams.".into(),
            ),
            education: vec![Education {
                degree: Some("BSc Computer Science".into()),
                institution: Some("State University".into()),
                ..Default::default()
            }],
            experience: vec![
                Experience {
                    title: Some("Senior Engineer".into()),
                    company: Some("Globex".into()),
                    achievements: vec![
                        "Led migration of 40 services to Kubernetes".into(),
                        "Improved build times by 35%".into(),
                    ],
                    ..Default::default()
                },
                Experience {
                    title: Some("Engineer".into()),
                    company: Some("Initech".into()),
                    ..Default::default()
                },
            ],
            skills: Some(Skills {
                technical: vec!["Go".into(), "Kubernetes".into(), "Terraform".into()],
                soft: vec!["Mentoring".into()],
            }),
            projects: vec![Project {
                name: Some("kbench".into()),
                description: Some("Benchmark harness for clusters".into()),
                technologies: vec!["Go".into()],
                link: None,
            }],
        }
    }

    #[test]
    fn test_empty_resume_scores_zero() {
        let result = score(&ResumeData::default(), "");
        assert_eq!(
            result.breakdown,
            ScoreBreakdown {
                format: 0,
                keywords: 0,
                structure: 0,
                readability: 0,
                overall: 0,
            }
        );
        assert_eq!(result.overall, 0);
        assert!(result.extracted_keywords.is_empty());
        assert!(result.matched_keywords.is_empty());
    }

    #[test]
    fn test_jane_doe_without_job_description() {
        assert_eq!(SUMMARY.chars().count(), 72);

        let result = score(&jane_doe(), "");
        assert_eq!(result.breakdown.format, 90);
        assert_eq!(result.breakdown.keywords, 30);
        assert_eq!(result.breakdown.structure, 85);
        assert_eq!(result.breakdown.readability, 75);
        assert_eq!(result.overall, 63);
        assert_eq!(result.breakdown.overall, 63);

        assert_eq!(result.suggestions.len(), 1);
        assert_eq!(result.suggestions[0].kind, SuggestionType::Info);
        assert_eq!(result.suggestions[0].category, SuggestionCategory::Readability);
        assert!(result.suggestions[0].message.starts_with("Use strong action verbs"));
    }

    #[test]
    fn test_summary_raises_structure_monotonically() {
        let empty = score(&ResumeData::default(), "");
        let with_summary = score(
            &ResumeData {
                summary: Some(SUMMARY.into()),
                ..Default::default()
            },
            "",
        );

        assert!(with_summary.breakdown.structure >= empty.breakdown.structure + 15);
        assert!(with_summary.breakdown.format >= empty.breakdown.format);
        assert!(with_summary.breakdown.keywords >= empty.breakdown.keywords);
        assert!(with_summary.breakdown.readability >= empty.breakdown.readability);
        assert_eq!(
            with_summary.breakdown,
            ScoreBreakdown {
                format: 60,
                keywords: 30,
                structure: 15,
                readability: 80,
                overall: 42,
            }
        );
    }

    #[test]
    fn test_scoring_is_idempotent() {
        let resume = complete_resume();
        let job = "Kubernetes Kubernetes Terraform Terraform AWS AWS";
        assert_eq!(score(&resume, job), score(&resume, job));
    }

    #[test]
    fn test_half_of_keywords_matched_hits_85_bucket() {
        let resume = ResumeData {
            personal_info: Some(PersonalInfo {
                full_name: Some("Sam Lee".into()),
                ..Default::default()
            }),
            skills: Some(Skills {
                technical: vec!["Java".into(), "Python".into(), "JavaScript".into()],
                soft: vec![],
            }),
            ..Default::default()
        };
        let job = "Java java Kubernetes kubernetes Python python Docker docker";

        let result = score(&resume, job);
        assert_eq!(result.extracted_keywords, vec!["java", "kubernetes", "python", "docker"]);
        assert_eq!(result.matched_keywords, vec!["java", "python"]);
        assert_eq!(result.breakdown.keywords, 85);
        assert_eq!(result.breakdown.format, 70);
        assert_eq!(result.breakdown.structure, 25);
        assert_eq!(result.breakdown.readability, 0);
        assert_eq!(result.overall, 57);
        assert_eq!(result.missing_keywords(), vec!["kubernetes", "docker"]);
    }

    #[test]
    fn test_javascript_does_not_match_java() {
        let resume = ResumeData {
            skills: Some(Skills {
                technical: vec!["JavaScript development".into()],
                soft: vec![],
            }),
            ..Default::default()
        };

        let result = score(&resume, "Java java Kubernetes kubernetes");
        assert!(result.matched_keywords.is_empty());
        assert_eq!(result.breakdown.keywords, 30);
        assert_eq!(result.overall, 28);
    }

    #[test]
    fn test_complete_resume_against_posting() {
        let job = "We are hiring a platform engineer. The engineer will own Kubernetes clusters and \
                   Terraform modules. Experience with Kubernetes and Terraform required. Python and \
                   AWS a plus; AWS certification preferred. Python scripting.";

        let result = score(&complete_resume(), job);
        assert_eq!(
            result.extracted_keywords,
            vec!["engineer", "kubernetes", "terraform", "python", "aws"]
        );
        assert_eq!(result.matched_keywords, vec!["engineer", "kubernetes", "terraform"]);
        assert_eq!(
            result.breakdown,
            ScoreBreakdown {
                format: 100,
                keywords: 85,
                structure: 100,
                readability: 100,
                overall: 94,
            }
        );
        assert!(result.suggestions.is_empty());
    }

    #[test]
    fn test_short_resume_text_scores_no_keywords() {
        let resume = ResumeData {
            education: vec![Education {
                degree: Some("BA".into()),
                ..Default::default()
            }],
            ..Default::default()
        };

        let result = score(&resume, "python python sql sql");
        assert_eq!(result.breakdown.keywords, 0);
        assert_eq!(result.breakdown.format, 60);
        assert_eq!(result.breakdown.readability, 70);
        assert_eq!(result.overall, 26);
    }

    #[test]
    fn test_job_without_repeated_terms_scores_40() {
        let text = "Senior engineer who shipped payment systems";
        assert_eq!(keyword_score(text, "One mention of everything", 0, 0), 40);
    }

    #[test]
    fn test_generic_keyword_signals() {
        let text = "Developed internal software for logistics teams";
        assert_eq!(keyword_score(text, "", 0, 0), 65);
        assert_eq!(keyword_score(text, "   ", 0, 0), 65);
        assert_eq!(keyword_score("Answered customer calls daily", "", 0, 0), 30);
    }

    #[test]
    fn test_keyword_buckets() {
        let text = "plenty of resume text for analysis";
        let job = "anything";
        assert_eq!(keyword_score(text, job, 10, 7), 100);
        assert_eq!(keyword_score(text, job, 10, 6), 85);
        assert_eq!(keyword_score(text, job, 10, 3), 70);
        assert_eq!(keyword_score(text, job, 20, 3), 50);
        assert_eq!(keyword_score(text, job, 10, 1), 30);
    }

    #[test]
    fn test_readability_summary_penalties() {
        let mut resume = ResumeData {
            summary: Some("One. Two. Three! Four? Five. Six.".into()),
            ..Default::default()
        };
        // six sentences, no metrics
        assert_eq!(readability_score(&resume, "One. Two."), 85);

        resume.summary = Some("   ".into());
        // present but blank: counts as zero sentences
        assert_eq!(readability_score(&resume, "   "), 80);
    }

    #[test]
    fn test_sentence_count() {
        assert_eq!(sentence_count("One sentence"), 1);
        assert_eq!(sentence_count("First... Second!? Third."), 3);
        assert_eq!(sentence_count("..."), 0);
    }

    #[test]
    fn test_metric_patterns() {
        assert!(has_metrics("grew revenue 25%"));
        assert!(has_metrics("saved $4000"));
        assert!(has_metrics("10+ years"));
        assert!(has_metrics("managed 5 engineers"));
        assert!(!has_metrics("managed several engineers"));
        assert!(!has_metrics("version v2"));
    }

    #[test]
    fn test_overall_rounds_half_up() {
        // 90*.25 + 30*.4 + 85*.2 + 75*.15 = 62.75
        assert_eq!(overall_score(90, 30, 85, 75), 63);
        assert_eq!(overall_score(100, 100, 100, 100), 100);
        assert_eq!(overall_score(0, 0, 0, 0), 0);
    }
}
