//! Fixed vocabularies used as presence signals

/// Verbs that signal accomplishment in achievement bullets
pub const ACTION_VERBS: &[&str] = &[
    "developed", "implemented", "designed", "created", "built", "optimized",
    "improved", "managed", "led", "coordinated", "achieved", "delivered",
];

/// Generic technical vocabulary for scoring without a job description
pub const GENERIC_TECHNICAL_TERMS: &[&str] = &[
    "programming", "development", "software", "engineering", "coding",
    "debugging", "testing", "deployment", "architecture", "design",
];

pub const GENERIC_SOFT_TERMS: &[&str] = &[
    "leadership", "communication", "teamwork", "problem-solving", "analytical",
    "collaborative", "innovative", "efficient", "organized", "detail-oriented",
];

/// Words excluded from job description keyword extraction
pub const STOP_WORDS: &[&str] = &[
    "the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for",
    "of", "with", "by", "from", "as", "is", "was", "are", "were", "be",
    "been", "being", "have", "has", "had", "do", "does", "did", "will",
    "would", "should", "could", "may", "might", "must", "can", "about",
    "into", "through", "during", "before", "after", "above", "below",
    "between", "under", "over", "again", "further", "then", "once", "here",
    "there", "when", "where", "why", "how", "all", "both", "each", "few",
    "more", "most", "other", "some", "such", "no", "nor", "not", "only",
    "own", "same", "so", "than", "too", "very", "that", "these", "those",
    "this", "we", "you", "your", "our",
];

/// Skills the job matcher looks for verbatim in postings
pub const MATCHER_TECHNICAL_SKILLS: &[&str] = &[
    "javascript", "python", "java", "react", "node", "sql", "aws", "docker",
    "kubernetes", "git", "api", "rest", "graphql", "typescript", "html", "css",
    "mongodb", "postgresql", "redis", "agile", "scrum", "ci/cd", "devops",
    "machine learning", "data analysis",
];

pub const MATCHER_SOFT_SKILLS: &[&str] = &[
    "leadership", "communication", "teamwork", "problem-solving", "analytical",
    "collaborative", "self-motivated", "detail-oriented", "time management",
    "adaptable", "creative", "proactive", "organized",
];

/// Frequent posting words never worth suggesting
pub const COMMON_WORDS: &[&str] = &[
    "with", "that", "have", "this", "will", "your", "from", "they", "been",
    "many", "some", "them", "these", "what", "about", "which", "when", "make",
    "like", "just", "over", "such", "into", "year", "good", "most", "work",
    "also", "after",
];

const ATS_TIPS: &[&str] = &[
    "Use standard section headers: Summary, Experience, Education, Skills",
    "Avoid images, graphics, and fancy formatting",
    "Use simple, readable fonts",
    "Include relevant keywords from the job description",
    "Use standard date formats (MM/YYYY)",
    "Spell out acronyms on first use",
    "Use bullet points for achievements",
    "Quantify achievements with numbers and percentages",
    "Save in ATS-friendly format (PDF or DOCX)",
    "Keep formatting consistent throughout",
];

/// General advice for getting a resume through applicant tracking systems
pub fn ats_tips() -> &'static [&'static str] {
    ATS_TIPS
}

/// True when any term occurs as a substring of the already lowercased text
pub fn contains_any(lowercase_text: &str, terms: &[&str]) -> bool {
    terms.iter().any(|term| lowercase_text.contains(term))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_any_is_substring_based() {
        // "led" hides inside "scheduled"
        assert!(contains_any("scheduled releases", ACTION_VERBS));
        assert!(!contains_any("reduced latency", ACTION_VERBS));
    }

    #[test]
    fn test_tips_are_stable() {
        let tips = ats_tips();
        assert_eq!(tips.len(), 10);
        assert!(tips[0].starts_with("Use standard section headers"));
    }
}
