//! Projection of structured resume data into searchable text

use crate::model::ResumeData;

fn part(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("")
}

/// Flatten a resume into one space-joined blob for keyword and metric search.
///
/// Order: full name, summary, education (degree, institution), experience
/// (title, company, achievements), technical then soft skills, projects
/// (name, description, technologies). Missing values contribute an empty part.
pub fn flatten_resume(resume: &ResumeData) -> String {
    let mut parts: Vec<&str> = Vec::new();

    if let Some(info) = &resume.personal_info {
        parts.push(part(&info.full_name));
    }

    if let Some(summary) = resume.summary_text() {
        parts.push(summary);
    }

    for edu in &resume.education {
        parts.push(part(&edu.degree));
        parts.push(part(&edu.institution));
    }

    for exp in &resume.experience {
        parts.push(part(&exp.title));
        parts.push(part(&exp.company));
        parts.extend(exp.achievements.iter().map(String::as_str));
    }

    parts.extend(resume.technical_skills().iter().map(String::as_str));
    parts.extend(resume.soft_skills().iter().map(String::as_str));

    for project in &resume.projects {
        parts.push(part(&project.name));
        parts.push(part(&project.description));
        parts.extend(project.technologies.iter().map(String::as_str));
    }

    parts.join(" ")
}

/// Resume content without contact details, used by the job description matcher
pub fn content_text(resume: &ResumeData) -> String {
    let mut parts: Vec<String> = Vec::new();

    if let Some(summary) = resume.summary_text() {
        parts.push(summary.to_string());
    }

    if let Some(skills) = &resume.skills {
        parts.push(skills.technical.join(" "));
        parts.push(skills.soft.join(" "));
    }

    for exp in &resume.experience {
        parts.push(part(&exp.title).to_string());
        parts.push(part(&exp.company).to_string());
        parts.push(exp.achievements.join(" "));
    }

    for project in &resume.projects {
        parts.push(part(&project.name).to_string());
        parts.push(part(&project.description).to_string());
        parts.push(project.technologies.join(" "));
    }

    for edu in &resume.education {
        parts.push(part(&edu.degree).to_string());
        parts.push(part(&edu.institution).to_string());
    }

    parts.join(" ")
}
