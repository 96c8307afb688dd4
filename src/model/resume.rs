//! Structured resume data as supplied by the form layer

use serde::{Deserialize, Deserializer, Serialize};

/// A possibly sparse resume. Every field defaults to empty so partially
/// filled forms deserialize without error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResumeData {
    pub personal_info: Option<PersonalInfo>,
    pub summary: Option<String>,
    #[serde(deserialize_with = "null_as_empty")]
    pub education: Vec<Education>,
    #[serde(deserialize_with = "null_as_empty")]
    pub experience: Vec<Experience>,
    pub skills: Option<Skills>,
    #[serde(deserialize_with = "null_as_empty")]
    pub projects: Vec<Project>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersonalInfo {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub linkedin: Option<String>,
    pub website: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Education {
    pub degree: Option<String>,
    pub institution: Option<String>,
    pub location: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub gpa: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Experience {
    pub title: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    #[serde(deserialize_with = "null_as_empty")]
    pub achievements: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Skills {
    #[serde(deserialize_with = "null_as_empty")]
    pub technical: Vec<String>,
    #[serde(deserialize_with = "null_as_empty")]
    pub soft: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Project {
    pub name: Option<String>,
    pub description: Option<String>,
    #[serde(deserialize_with = "null_as_empty")]
    pub technologies: Vec<String>,
    pub link: Option<String>,
}

/// Form layers send `null` for lists that were never touched
fn null_as_empty<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Treats `None` and `""` alike
fn filled(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|s| !s.is_empty())
}

impl ResumeData {
    pub fn full_name(&self) -> Option<&str> {
        self.personal_info.as_ref().and_then(|p| p.full_name.as_deref())
    }

    pub fn has_full_name(&self) -> bool {
        self.personal_info.as_ref().is_some_and(|p| filled(&p.full_name))
    }

    pub fn has_email(&self) -> bool {
        self.personal_info.as_ref().is_some_and(|p| filled(&p.email))
    }

    pub fn has_phone(&self) -> bool {
        self.personal_info.as_ref().is_some_and(|p| filled(&p.phone))
    }

    /// Non-empty summary, whitespace included
    pub fn summary_text(&self) -> Option<&str> {
        self.summary.as_deref().filter(|s| !s.is_empty())
    }

    /// Length of the summary in characters, 0 when absent
    pub fn summary_len(&self) -> usize {
        self.summary.as_deref().map_or(0, |s| s.chars().count())
    }

    pub fn technical_skills(&self) -> &[String] {
        self.skills.as_ref().map_or(&[], |s| s.technical.as_slice())
    }

    pub fn soft_skills(&self) -> &[String] {
        self.skills.as_ref().map_or(&[], |s| s.soft.as_slice())
    }

    pub fn has_skills(&self) -> bool {
        !self.technical_skills().is_empty() || !self.soft_skills().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserializes_camel_case_and_ignores_unknown_fields() {
        let json = r#"{
            "personalInfo": {"fullName": "Jane Doe", "email": "jane@x.com", "github": "jdoe"},
            "summary": "Engineer",
            "experience": [{"title": "Engineer", "company": "Acme", "startDate": "2020-01"}],
            "skills": {"technical": ["Rust"]},
            "theme": "dark"
        }"#;

        let resume: ResumeData = serde_json::from_str(json).unwrap();
        assert_eq!(resume.full_name(), Some("Jane Doe"));
        assert!(resume.has_email());
        assert!(!resume.has_phone());
        assert_eq!(resume.experience[0].start_date.as_deref(), Some("2020-01"));
        assert!(resume.experience[0].achievements.is_empty());
        assert!(resume.soft_skills().is_empty());
        assert!(resume.projects.is_empty());
    }

    #[test]
    fn test_null_lists_deserialize_as_empty() {
        let json = r#"{"education": null, "experience": [{"title": "Dev", "achievements": null}]}"#;

        let resume: ResumeData = serde_json::from_str(json).unwrap();
        assert!(resume.education.is_empty());
        assert!(resume.experience[0].achievements.is_empty());
    }

    #[test]
    fn test_empty_object_is_valid() {
        let resume: ResumeData = serde_json::from_str("{}").unwrap();
        assert_eq!(resume, ResumeData::default());
        assert!(!resume.has_skills());
        assert_eq!(resume.summary_len(), 0);
    }

    #[test]
    fn test_empty_strings_count_as_missing() {
        let resume = ResumeData {
            personal_info: Some(PersonalInfo {
                full_name: Some(String::new()),
                ..Default::default()
            }),
            summary: Some(String::new()),
            ..Default::default()
        };

        assert!(!resume.has_full_name());
        assert!(resume.summary_text().is_none());
    }
}
