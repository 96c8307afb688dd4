//! Keyword density of a single term across the resume

use crate::model::ResumeData;
use crate::processing::flattener::flatten_resume;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KeywordDensity {
    /// Words containing the term
    pub count: usize,
    /// Percentage of all words, two decimals
    pub density: f64,
}

fn whitespace_regex() -> &'static Regex {
    static WHITESPACE: OnceLock<Regex> = OnceLock::new();
    WHITESPACE.get_or_init(|| Regex::new(r"\s+").expect("Invalid whitespace regex"))
}

/// Count words of the flattened resume that contain `term`, case-insensitively
pub fn keyword_density(resume: &ResumeData, term: &str) -> KeywordDensity {
    let text = flatten_resume(resume).to_lowercase();
    let term = term.to_lowercase();

    let words: Vec<&str> = whitespace_regex().split(&text).collect();
    let count = words.iter().filter(|word| word.contains(term.as_str())).count();

    let density = if words.is_empty() {
        0.0
    } else {
        (count as f64 / words.len() as f64 * 100.0 * 100.0).round() / 100.0
    };

    KeywordDensity { count, density }
}
