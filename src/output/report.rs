//! Report envelope around a scoring run

use crate::processing::job_matcher::JobMatchResult;
use crate::processing::scorer::ScoreResult;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Everything a formatter needs to render one analysis
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AtsReport {
    pub result: ScoreResult,

    /// Skills view of the posting, present when a job description was given
    pub job_match: Option<JobMatchResult>,

    /// General ATS advice, empty unless requested
    pub tips: Vec<String>,

    pub metadata: ReportMetadata,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub generated_at: DateTime<Utc>,
    pub processing_time_ms: u64,
    pub resume_file: String,
    pub job_file: Option<String>,
    pub version: String,
}

impl ReportMetadata {
    pub fn new(resume_file: impl Into<String>, job_file: Option<String>, processing_time_ms: u64) -> Self {
        Self {
            generated_at: Utc::now(),
            processing_time_ms,
            resume_file: resume_file.into(),
            job_file,
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

impl AtsReport {
    pub fn new(result: ScoreResult, metadata: ReportMetadata) -> Self {
        Self {
            result,
            job_match: None,
            tips: Vec::new(),
            metadata,
        }
    }

    pub fn with_job_match(mut self, job_match: JobMatchResult) -> Self {
        self.job_match = Some(job_match);
        self
    }

    pub fn with_tips<I, S>(mut self, tips: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tips = tips.into_iter().map(Into::into).collect();
        self
    }

    /// Verdict wording shared by every output format
    pub fn verdict(&self) -> &'static str {
        match self.result.overall {
            80..=100 => "Strong ATS compatibility",
            60..=79 => "Good foundation with room to improve",
            40..=59 => "Needs work before applying",
            _ => "Likely to be filtered out by ATS systems",
        }
    }
}

/// Label for a 0-100 score
pub fn score_label(score: u8) -> &'static str {
    match score {
        90..=100 => "Excellent",
        80..=89 => "Very Good",
        70..=79 => "Good",
        60..=69 => "Fair",
        50..=59 => "Below Average",
        _ => "Poor",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ResumeData;
    use crate::processing::scorer::score;

    #[test]
    fn test_builder_and_verdict() {
        let result = score(&ResumeData::default(), "");
        let report = AtsReport::new(result, ReportMetadata::new("resume.json", None, 3))
            .with_tips(["Use bullet points"]);

        assert_eq!(report.tips, vec!["Use bullet points".to_string()]);
        assert!(report.job_match.is_none());
        assert_eq!(report.verdict(), "Likely to be filtered out by ATS systems");
        assert_eq!(report.metadata.version, env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn test_score_labels() {
        assert_eq!(score_label(94), "Excellent");
        assert_eq!(score_label(63), "Fair");
        assert_eq!(score_label(0), "Poor");
    }
}
