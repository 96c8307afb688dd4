//! Frequency-based keyword extraction from job descriptions

use crate::processing::vocabulary::STOP_WORDS;
use log::warn;
use regex::Regex;
use std::collections::HashMap;
use std::sync::OnceLock;

pub const DEFAULT_MAX_KEYWORDS: usize = 30;
pub const DEFAULT_MIN_FREQUENCY: usize = 2;

/// Characters escaped before a keyword is embedded in a pattern
const PATTERN_METACHARACTERS: &[char] = &[
    '.', '*', '+', '?', '^', '$', '{', '}', '(', ')', '|', '[', ']', '\\',
];

fn token_regex() -> &'static Regex {
    static TOKEN: OnceLock<Regex> = OnceLock::new();
    // ASCII word boundaries; tokens may carry +, # and . after the first letter
    TOKEN.get_or_init(|| {
        Regex::new(r"(?-u:\b)[a-z][a-z0-9+#.]+(?-u:\b)").expect("Invalid token regex")
    })
}

/// Ranks repeated terms of a job description
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeywordExtractor {
    max_keywords: usize,
    min_frequency: usize,
}

impl Default for KeywordExtractor {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_KEYWORDS, DEFAULT_MIN_FREQUENCY)
    }
}

impl KeywordExtractor {
    pub fn new(max_keywords: usize, min_frequency: usize) -> Self {
        Self { max_keywords, min_frequency }
    }

    pub fn max_keywords(&self) -> usize {
        self.max_keywords
    }

    pub fn min_frequency(&self) -> usize {
        self.min_frequency
    }

    /// Keywords ordered by descending frequency, ties in first-occurrence order
    pub fn extract(&self, job_description: &str) -> Vec<String> {
        self.ranked_terms(job_description)
            .into_iter()
            .map(|(word, _)| word)
            .collect()
    }

    /// Same ranking as [`extract`](Self::extract) with the mention counts attached
    pub fn ranked_terms(&self, job_description: &str) -> Vec<(String, usize)> {
        if job_description.is_empty() {
            return Vec::new();
        }

        let text = job_description.to_lowercase();

        let mut order: Vec<(String, usize)> = Vec::new();
        let mut index: HashMap<&str, usize> = HashMap::new();

        for token in token_regex().find_iter(&text).map(|m| m.as_str()) {
            if token.len() <= 2 || STOP_WORDS.contains(&token) {
                continue;
            }
            match index.get(token) {
                Some(&slot) => order[slot].1 += 1,
                None => {
                    index.insert(token, order.len());
                    order.push((token.to_string(), 1));
                }
            }
        }

        order.retain(|(_, count)| *count >= self.min_frequency);
        // stable: equal counts keep first-occurrence order
        order.sort_by(|a, b| b.1.cmp(&a.1));
        order.truncate(self.max_keywords);
        order
    }
}

/// Escape the pattern metacharacters a keyword may carry, e.g. `c++` or `node.js`
pub fn escape_keyword(keyword: &str) -> String {
    let mut escaped = String::with_capacity(keyword.len() * 2);
    for c in keyword.chars() {
        if PATTERN_METACHARACTERS.contains(&c) {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Whole-word, case-insensitive search for a keyword
pub fn contains_keyword(text: &str, keyword: &str) -> bool {
    let pattern = format!(r"(?i)(?-u:\b){}(?-u:\b)", escape_keyword(keyword));
    match Regex::new(&pattern) {
        Ok(regex) => regex.is_match(text),
        Err(e) => {
            warn!("Skipping keyword '{}': {}", keyword, e);
            false
        }
    }
}

/// Keywords present in `text`, in the order given
pub fn matched_keywords(text: &str, keywords: &[String]) -> Vec<String> {
    keywords
        .iter()
        .filter(|keyword| contains_keyword(text, keyword))
        .cloned()
        .collect()
}
