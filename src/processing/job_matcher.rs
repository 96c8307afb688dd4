//! Vocabulary-driven job description matching
//!
//! Complements the ATS scorer with a skills view of a posting: which known
//! technical and soft skills it names, which terms it repeats, and which of
//! those the resume never mentions.

use crate::error::{Result, ResumeAtsError};
use crate::model::ResumeData;
use crate::processing::flattener::content_text;
use crate::processing::vocabulary::{COMMON_WORDS, MATCHER_SOFT_SKILLS, MATCHER_TECHNICAL_SKILLS};
use aho_corasick::AhoCorasick;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

const MAX_IMPORTANT_TERMS: usize = 20;
const MAX_PHRASES: usize = 10;
const HIGH_PRIORITY_SHOWN: usize = 5;
const MEDIUM_PRIORITY_SHOWN: usize = 3;
/// Summaries shorter than this should be rewritten around the posting
const MIN_TAILORED_SUMMARY_LEN: usize = 100;

/// Skills and terms found in a posting
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobKeywords {
    pub technical: Vec<String>,
    pub soft: Vec<String>,
    pub important: Vec<String>,
    pub phrases: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeywordKind {
    Technical,
    Soft,
    Term,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchPriority {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchedKeyword {
    pub keyword: String,
    #[serde(rename = "type")]
    pub kind: KeywordKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissingKeyword {
    pub keyword: String,
    #[serde(rename = "type")]
    pub kind: KeywordKind,
    pub priority: MatchPriority,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchSuggestionType {
    Skills,
    Summary,
    Experience,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSuggestion {
    #[serde(rename = "type")]
    pub kind: MatchSuggestionType,
    pub message: String,
    pub priority: MatchPriority,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobMatchResult {
    /// Share of posting skills found in the resume, 0-100
    pub match_score: u8,
    pub matched_keywords: Vec<MatchedKeyword>,
    pub missing_keywords: Vec<MissingKeyword>,
    pub suggestions: Vec<MatchSuggestion>,
}

impl JobMatchResult {
    /// Missing keywords worth showing to the user (everything above low priority)
    pub fn notable_missing(&self) -> impl Iterator<Item = &MissingKeyword> {
        self.missing_keywords
            .iter()
            .filter(|k| k.priority != MatchPriority::Low)
    }
}

/// Matches postings against the built-in skill vocabularies
pub struct JobDescriptionMatcher {
    technical_matcher: AhoCorasick,
    soft_matcher: AhoCorasick,
    word_regex: Regex,
    phrase_regex: Regex,
    common_words: HashSet<&'static str>,
}

impl JobDescriptionMatcher {
    pub fn new() -> Result<Self> {
        let technical_matcher = Self::build_matcher(MATCHER_TECHNICAL_SKILLS)?;
        let soft_matcher = Self::build_matcher(MATCHER_SOFT_SKILLS)?;

        let word_regex = Regex::new(r"(?-u:\b)[a-z]{3,}(?-u:\b)")
            .map_err(|e| ResumeAtsError::AnalysisFailed(format!("Invalid word pattern: {}", e)))?;
        let phrase_regex = Regex::new(r"(?-u:\b)[a-z]+\s+[a-z]+(?-u:\b)")
            .map_err(|e| ResumeAtsError::AnalysisFailed(format!("Invalid phrase pattern: {}", e)))?;

        Ok(Self {
            technical_matcher,
            soft_matcher,
            word_regex,
            phrase_regex,
            common_words: COMMON_WORDS.iter().copied().collect(),
        })
    }

    fn build_matcher(vocabulary: &[&str]) -> Result<AhoCorasick> {
        // Standard semantics so overlapping entries ("java", "javascript") are all reported
        AhoCorasick::builder()
            .match_kind(aho_corasick::MatchKind::Standard)
            .build(vocabulary)
            .map_err(|e| ResumeAtsError::AnalysisFailed(format!("Failed to build skill matcher: {}", e)))
    }

    /// Vocabulary entries occurring anywhere in `text`, in vocabulary order
    fn vocabulary_hits(matcher: &AhoCorasick, vocabulary: &[&str], text: &str) -> Vec<String> {
        let found: HashSet<usize> = matcher
            .find_overlapping_iter(text)
            .map(|m| m.pattern().as_usize())
            .collect();

        vocabulary
            .iter()
            .enumerate()
            .filter(|(id, _)| found.contains(id))
            .map(|(_, kw)| kw.to_string())
            .collect()
    }

    /// Extract known skills, repeated terms and two-word phrases from a posting
    pub fn extract_keywords(&self, job_description: &str) -> JobKeywords {
        let text = job_description.to_lowercase();

        let mut counts: Vec<(&str, usize)> = Vec::new();
        let mut index: HashMap<&str, usize> = HashMap::new();
        for word in self.word_regex.find_iter(&text).map(|m| m.as_str()) {
            match index.get(word) {
                Some(&slot) => counts[slot].1 += 1,
                None => {
                    index.insert(word, counts.len());
                    counts.push((word, 1));
                }
            }
        }

        let mut phrases: Vec<String> = Vec::new();
        let mut seen: HashSet<&str> = HashSet::new();
        for phrase in self.phrase_regex.find_iter(&text).map(|m| m.as_str()) {
            if phrase.len() > 6 && seen.insert(phrase) {
                phrases.push(phrase.to_string());
            }
        }
        phrases.truncate(MAX_PHRASES);

        let technical = Self::vocabulary_hits(&self.technical_matcher, MATCHER_TECHNICAL_SKILLS, &text);
        let soft = Self::vocabulary_hits(&self.soft_matcher, MATCHER_SOFT_SKILLS, &text);

        counts.retain(|(word, count)| *count >= 2 && word.len() > 4);
        counts.sort_by(|a, b| b.1.cmp(&a.1));
        let important = counts
            .into_iter()
            .take(MAX_IMPORTANT_TERMS)
            .map(|(word, _)| word.to_string())
            .collect();

        JobKeywords {
            technical,
            soft,
            important,
            phrases,
        }
    }

    /// Compare a resume with a posting's skill vocabulary
    pub fn analyze(&self, resume: &ResumeData, job_description: &str) -> JobMatchResult {
        let keywords = self.extract_keywords(job_description);
        let resume_text = content_text(resume).to_lowercase();

        let mut matched_keywords = Vec::new();
        let mut missing_keywords = Vec::new();

        let groups = [
            (&keywords.technical, KeywordKind::Technical, MatchPriority::High),
            (&keywords.soft, KeywordKind::Soft, MatchPriority::Medium),
        ];
        for (group, kind, priority) in groups {
            for keyword in group {
                if resume_text.contains(keyword.as_str()) {
                    matched_keywords.push(MatchedKeyword {
                        keyword: keyword.clone(),
                        kind,
                    });
                } else {
                    missing_keywords.push(MissingKeyword {
                        keyword: keyword.clone(),
                        kind,
                        priority,
                    });
                }
            }
        }

        for term in &keywords.important {
            if !resume_text.contains(term.as_str()) && !self.common_words.contains(term.as_str()) {
                missing_keywords.push(MissingKeyword {
                    keyword: term.clone(),
                    kind: KeywordKind::Term,
                    priority: MatchPriority::Low,
                });
            }
        }

        let total = keywords.technical.len() + keywords.soft.len();
        let match_score = if total > 0 {
            (matched_keywords.len() as f64 / total as f64 * 100.0).round() as u8
        } else {
            0
        };

        let suggestions = Self::suggestions(&missing_keywords, resume);

        JobMatchResult {
            match_score,
            matched_keywords,
            missing_keywords,
            suggestions,
        }
    }

    fn suggestions(missing: &[MissingKeyword], resume: &ResumeData) -> Vec<MatchSuggestion> {
        let mut suggestions = Vec::new();

        let by_priority = |priority: MatchPriority, limit: usize| -> Vec<&str> {
            missing
                .iter()
                .filter(|k| k.priority == priority)
                .take(limit)
                .map(|k| k.keyword.as_str())
                .collect()
        };

        let high = by_priority(MatchPriority::High, HIGH_PRIORITY_SHOWN);
        if !high.is_empty() {
            suggestions.push(MatchSuggestion {
                kind: MatchSuggestionType::Skills,
                message: format!("Add these technical skills if you have them: {}", high.join(", ")),
                priority: MatchPriority::High,
            });
        }

        let medium = by_priority(MatchPriority::Medium, MEDIUM_PRIORITY_SHOWN);
        if !medium.is_empty() {
            suggestions.push(MatchSuggestion {
                kind: MatchSuggestionType::Summary,
                message: format!("Consider mentioning these skills in your summary: {}", medium.join(", ")),
                priority: MatchPriority::Medium,
            });
        }

        if resume.summary_len() < MIN_TAILORED_SUMMARY_LEN {
            suggestions.push(MatchSuggestion {
                kind: MatchSuggestionType::Summary,
                message: "Add a professional summary that includes key terms from the job description".to_string(),
                priority: MatchPriority::High,
            });
        }

        if resume.experience.is_empty() {
            suggestions.push(MatchSuggestion {
                kind: MatchSuggestionType::Experience,
                message: "Add relevant work experience that demonstrates required skills".to_string(),
                priority: MatchPriority::High,
            });
        }

        suggestions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Experience, Skills};

    const POSTING: &str = "We need a Python developer with AWS and Docker experience. Strong communication \
                           and leadership required. Python services on AWS, Kubernetes a plus. Leadership of small teams.";

    fn matcher() -> JobDescriptionMatcher {
        JobDescriptionMatcher::new().unwrap()
    }

    fn resume() -> ResumeData {
        ResumeData {
            summary: Some("Python developer shipping services on AWS.".into()),
            skills: Some(Skills {
                technical: vec!["Python".into(), "Docker".into()],
                soft: vec!["Communication".into()],
            }),
            experience: vec![Experience {
                title: Some("Developer".into()),
                company: Some("Acme".into()),
                achievements: vec!["Built APIs".into()],
                ..Default::default()
            }],
            ..Default::default()
        }
    }

    #[test]
    fn test_extract_keywords() {
        let keywords = matcher().extract_keywords(POSTING);
        assert_eq!(keywords.technical, vec!["python", "aws", "docker", "kubernetes"]);
        assert_eq!(keywords.soft, vec!["leadership", "communication"]);
        assert_eq!(keywords.important, vec!["python", "leadership"]);
        assert_eq!(
            keywords.phrases,
            vec![
                "we need",
                "a python",
                "developer with",
                "aws and",
                "docker experience",
                "strong communication",
                "and leadership",
                "python services",
                "kubernetes a",
                "leadership of",
            ]
        );
    }

    #[test]
    fn test_vocabulary_matching_is_substring_based() {
        let keywords = matcher().extract_keywords("Senior JavaScript engineer");
        assert_eq!(keywords.technical, vec!["javascript", "java"]);
    }

    #[test]
    fn test_analyze_match() {
        let result = matcher().analyze(&resume(), POSTING);

        assert_eq!(result.match_score, 67);
        let matched: Vec<&str> = result.matched_keywords.iter().map(|k| k.keyword.as_str()).collect();
        assert_eq!(matched, vec!["python", "aws", "docker", "communication"]);

        assert_eq!(
            result.missing_keywords,
            vec![
                MissingKeyword {
                    keyword: "kubernetes".into(),
                    kind: KeywordKind::Technical,
                    priority: MatchPriority::High,
                },
                MissingKeyword {
                    keyword: "leadership".into(),
                    kind: KeywordKind::Soft,
                    priority: MatchPriority::Medium,
                },
                MissingKeyword {
                    keyword: "leadership".into(),
                    kind: KeywordKind::Term,
                    priority: MatchPriority::Low,
                },
            ]
        );
        assert_eq!(result.notable_missing().count(), 2);

        let messages: Vec<&str> = result.suggestions.iter().map(|s| s.message.as_str()).collect();
        assert_eq!(
            messages,
            vec![
                "Add these technical skills if you have them: kubernetes",
                "Consider mentioning these skills in your summary: leadership",
                "Add a professional summary that includes key terms from the job description",
            ]
        );
    }

    #[test]
    fn test_posting_without_known_skills() {
        let result = matcher().analyze(&ResumeData::default(), "nothing relevant here at all");

        assert_eq!(result.match_score, 0);
        assert!(result.matched_keywords.is_empty());
        assert!(result.missing_keywords.is_empty());
        let kinds: Vec<MatchSuggestionType> = result.suggestions.iter().map(|s| s.kind).collect();
        assert_eq!(kinds, vec![MatchSuggestionType::Summary, MatchSuggestionType::Experience]);
    }

    #[test]
    fn test_result_serializes_camel_case() {
        let result = matcher().analyze(&resume(), POSTING);
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["matchScore"], 67);
        assert_eq!(json["missingKeywords"][0]["type"], "technical");
        assert_eq!(json["missingKeywords"][0]["priority"], "high");
    }
}
