//! Output formatters for ATS reports

use crate::config::OutputFormat;
use crate::error::Result;
use crate::output::report::{score_label, AtsReport};
use crate::processing::job_matcher::JobMatchResult;
use crate::processing::scorer::{FORMAT_WEIGHT, KEYWORD_WEIGHT, READABILITY_WEIGHT, STRUCTURE_WEIGHT};
use crate::processing::suggestions::{Suggestion, SuggestionType};
use askama::Template;
use colored::{Color, Colorize};
use std::path::Path;

/// Trait for rendering an ATS report
pub trait OutputFormatter {
    fn format_report(&self, report: &AtsReport) -> Result<String>;
    fn supports_format(&self) -> OutputFormat;
}

/// Console formatter with colors
pub struct ConsoleFormatter {
    use_colors: bool,
    detailed: bool,
}

/// JSON formatter for integration with other tools
pub struct JsonFormatter {
    pretty: bool,
}

pub struct MarkdownFormatter {
    include_metadata: bool,
}

pub struct HtmlFormatter {
    include_styles: bool,
}

/// Report generator that coordinates the formatters
pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
    markdown_formatter: MarkdownFormatter,
    html_formatter: HtmlFormatter,
}

fn breakdown_rows(report: &AtsReport) -> [(&'static str, u8, f64); 4] {
    let breakdown = &report.result.breakdown;
    [
        ("Format", breakdown.format, FORMAT_WEIGHT),
        ("Keywords", breakdown.keywords, KEYWORD_WEIGHT),
        ("Structure", breakdown.structure, STRUCTURE_WEIGHT),
        ("Readability", breakdown.readability, READABILITY_WEIGHT),
    ]
}

#[derive(Template)]
#[template(source = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>ATS Compatibility Report</title>
    {% if include_styles %}
    <style>
        body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; line-height: 1.6; color: #333; max-width: 900px; margin: 0 auto; padding: 20px; background: #f8f9fa; }
        .container { background: white; padding: 30px; border-radius: 8px; box-shadow: 0 2px 10px rgba(0,0,0,0.1); }
        .header { text-align: center; border-bottom: 3px solid #007acc; padding-bottom: 20px; }
        .score-badge { display: inline-block; padding: 8px 16px; border-radius: 20px; font-weight: bold; color: white; margin-left: 10px; }
        .score-excellent { background: #28a745; }
        .score-good { background: #17a2b8; }
        .score-fair { background: #ffc107; color: #000; }
        .score-poor { background: #dc3545; }
        .score-breakdown { display: grid; grid-template-columns: repeat(auto-fit, minmax(180px, 1fr)); gap: 15px; }
        .score-item { background: #f8f9fa; padding: 15px; border-radius: 6px; border-left: 4px solid #007acc; }
        .suggestion { padding: 10px 15px; margin: 8px 0; border-radius: 6px; border-left: 4px solid #17a2b8; background: #f8f9fa; }
        .suggestion-critical { border-left-color: #dc3545; }
        .suggestion-warning { border-left-color: #ffc107; }
        .tag { display: inline-block; padding: 2px 10px; margin: 3px; border-radius: 12px; font-size: 0.9em; }
        .tag-matched { background: #d4edda; }
        .tag-missing { background: #f8d7da; }
        .metadata { background: #e9ecef; padding: 15px; border-radius: 6px; margin-top: 30px; font-size: 0.9em; color: #6c757d; }
    </style>
    {% endif %}
</head>
<body>
    <div class="container">
        <div class="header">
            <h1>ATS Compatibility Report</h1>
            <p>Generated: {{ generated_at }} | Processing time: {{ processing_time }}ms</p>
        </div>

        <h2>Overall Score: {{ overall_score }}% <span class="score-badge {{ score_class }}">{{ score_label }}</span></h2>
        <p><strong>Verdict:</strong> {{ verdict }}</p>

        <div class="score-breakdown">
            {% for row in breakdown %}
            <div class="score-item">
                <h4>{{ row.name }}</h4>
                <p><strong>{{ row.score }}%</strong> (weight: {{ row.weight }})</p>
            </div>
            {% endfor %}
        </div>

        {% if has_keywords %}
        <h2>Job Keywords</h2>
        <div>
            {% for keyword in matched_keywords %}<span class="tag tag-matched">{{ keyword }}</span>{% endfor %}
            {% for keyword in missing_keywords %}<span class="tag tag-missing">{{ keyword }}</span>{% endfor %}
        </div>
        {% endif %}

        {% if has_skill_match %}
        <h2>Skills Match: {{ skill_match_score }}%</h2>
        <div>
            {% for keyword in skill_missing %}<span class="tag tag-missing">{{ keyword }}</span>{% endfor %}
        </div>
        {% endif %}

        <h2>Suggestions</h2>
        {% if suggestions.is_empty() %}
        <p>No suggestions. The resume covers every check.</p>
        {% endif %}
        {% for suggestion in suggestions %}
        <div class="suggestion suggestion-{{ suggestion.kind }}">
            <strong>[{{ suggestion.kind }}]</strong> {{ suggestion.message }} <em>({{ suggestion.category }})</em>
        </div>
        {% endfor %}

        {% if !tips.is_empty() %}
        <h2>ATS Tips</h2>
        <ul>
            {% for tip in tips %}<li>{{ tip }}</li>{% endfor %}
        </ul>
        {% endif %}

        <div class="metadata">
            <p><strong>Generated by resume-ats v{{ version }}</strong></p>
            <p><strong>Resume:</strong> {{ resume_file }} | <strong>Job:</strong> {{ job_file }}</p>
        </div>
    </div>
</body>
</html>"#, ext = "html")]
struct HtmlTemplate {
    include_styles: bool,
    generated_at: String,
    processing_time: u64,
    overall_score: u8,
    score_class: &'static str,
    score_label: &'static str,
    verdict: &'static str,
    breakdown: Vec<HtmlScoreRow>,
    has_keywords: bool,
    matched_keywords: Vec<String>,
    missing_keywords: Vec<String>,
    has_skill_match: bool,
    skill_match_score: u8,
    skill_missing: Vec<String>,
    suggestions: Vec<Suggestion>,
    tips: Vec<String>,
    version: String,
    resume_file: String,
    job_file: String,
}

struct HtmlScoreRow {
    name: &'static str,
    score: u8,
    weight: String,
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool, detailed: bool) -> Self {
        Self { use_colors, detailed }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str, level: u8) -> String {
        let prefix = match level {
            1 => "█",
            2 => "▓",
            _ => "▒",
        };

        let color = match level {
            1 => Color::Blue,
            2 => Color::Green,
            _ => Color::Yellow,
        };

        if self.use_colors {
            format!("\n{} {}\n", prefix.color(color).bold(), title.color(color).bold())
        } else {
            format!("\n{} {}\n", prefix, title)
        }
    }

    fn format_score_badge(&self, score: u8) -> String {
        let color = match score {
            90..=100 => Color::Green,
            80..=89 => Color::BrightGreen,
            70..=79 => Color::Yellow,
            60..=69 => Color::BrightYellow,
            50..=59 => Color::Red,
            _ => Color::BrightRed,
        };
        let badge = score_label(score).to_uppercase();

        if self.use_colors {
            format!("[{}]", badge.color(color).bold())
        } else {
            format!("[{}]", badge)
        }
    }

    fn format_suggestion_icon(&self, kind: SuggestionType) -> &'static str {
        match (kind, self.use_colors) {
            (SuggestionType::Critical, true) => "🚨",
            (SuggestionType::Warning, true) => "⚠️ ",
            (SuggestionType::Info, true) => "💡",
            (SuggestionType::Critical, false) => "[!]",
            (SuggestionType::Warning, false) => "[*]",
            (SuggestionType::Info, false) => "[-]",
        }
    }

    fn format_job_match(&self, job_match: &JobMatchResult, output: &mut String) {
        output.push_str(&self.format_header("Skills Match", 2));
        output.push_str(&format!("Match: {}%\n", job_match.match_score));

        if !job_match.matched_keywords.is_empty() {
            let matched: Vec<&str> = job_match.matched_keywords.iter().map(|k| k.keyword.as_str()).collect();
            output.push_str(&format!("  ✓ {}\n", self.colorize(&matched.join(", "), Color::Green)));
        }

        let missing: Vec<&str> = job_match.notable_missing().map(|k| k.keyword.as_str()).collect();
        if !missing.is_empty() {
            output.push_str(&format!("  ✗ {}\n", self.colorize(&missing.join(", "), Color::Red)));
        }

        if self.detailed {
            for suggestion in &job_match.suggestions {
                output.push_str(&format!("  • {}\n", suggestion.message));
            }
        }
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, report: &AtsReport) -> Result<String> {
        let result = &report.result;
        let mut output = String::new();

        output.push_str(&self.format_header("📊 ATS COMPATIBILITY ANALYSIS", 1));
        output.push_str(&format!(
            "Generated: {} | Processing time: {}ms\n",
            report.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
            report.metadata.processing_time_ms
        ));

        output.push_str(&self.format_header("Overall Score", 2));
        output.push_str(&format!(
            "Overall Score: {}% {}\n",
            result.overall,
            self.format_score_badge(result.overall)
        ));
        output.push_str(&format!("Verdict: {}\n", self.colorize(report.verdict(), Color::Cyan)));

        output.push_str(&self.format_header("Score Breakdown", 3));
        for (name, score, weight) in breakdown_rows(report) {
            output.push_str(&format!(
                "  {:<12} {:>3}% (weight: {:.0}%)\n",
                name,
                score,
                weight * 100.0
            ));
        }

        if !result.extracted_keywords.is_empty() {
            output.push_str(&self.format_header("Job Keywords", 3));
            output.push_str(&format!(
                "Matched {} of {}\n",
                result.matched_keywords.len(),
                result.extracted_keywords.len()
            ));
            if !result.matched_keywords.is_empty() {
                output.push_str(&format!(
                    "  ✓ {}\n",
                    self.colorize(&result.matched_keywords.join(", "), Color::Green)
                ));
            }
            let missing = result.missing_keywords();
            if !missing.is_empty() {
                output.push_str(&format!("  ✗ {}\n", self.colorize(&missing.join(", "), Color::Red)));
            }
        }

        if let Some(job_match) = &report.job_match {
            self.format_job_match(job_match, &mut output);
        }

        output.push_str(&self.format_header("📋 Suggestions", 2));
        if result.suggestions.is_empty() {
            output.push_str(&self.colorize("No suggestions. The resume covers every check.\n", Color::Green));
        }
        for (i, suggestion) in result.suggestions.iter().enumerate() {
            output.push_str(&format!(
                "{}. {} {} {}\n",
                i + 1,
                self.format_suggestion_icon(suggestion.kind),
                suggestion.message,
                self.colorize(&format!("({})", suggestion.category), Color::BrightBlack)
            ));
        }

        if !report.tips.is_empty() {
            output.push_str(&self.format_header("ATS Tips", 2));
            for tip in &report.tips {
                output.push_str(&format!("  • {}\n", tip));
            }
        }

        if self.detailed {
            output.push_str(&self.format_header("Details", 3));
            output.push_str(&format!("Resume: {}\n", report.metadata.resume_file));
            if let Some(job_file) = &report.metadata.job_file {
                output.push_str(&format!("Job description: {}\n", job_file));
            }
            output.push_str(&format!("resume-ats v{}\n", report.metadata.version));
        }

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Console
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, report: &AtsReport) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(report)?)
        } else {
            Ok(serde_json::to_string(report)?)
        }
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Json
    }
}

impl MarkdownFormatter {
    pub fn new(include_metadata: bool) -> Self {
        Self { include_metadata }
    }

    fn suggestion_badge(kind: SuggestionType) -> &'static str {
        match kind {
            SuggestionType::Critical => "🚨 Critical",
            SuggestionType::Warning => "⚠️ Warning",
            SuggestionType::Info => "💡 Info",
        }
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_report(&self, report: &AtsReport) -> Result<String> {
        let result = &report.result;
        let mut output = String::new();

        output.push_str("# 📊 ATS Compatibility Report\n\n");

        if self.include_metadata {
            output.push_str(&format!(
                "**Generated:** {} | **Processing Time:** {}ms\n",
                report.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
                report.metadata.processing_time_ms
            ));
            output.push_str(&format!(
                "**Resume:** `{}` | **Job:** `{}`\n\n",
                file_name(&report.metadata.resume_file),
                report.metadata.job_file.as_deref().map(file_name).unwrap_or_else(|| "none".to_string())
            ));
        }

        output.push_str(&format!(
            "**Overall Score:** {}% ({})\n\n",
            result.overall,
            score_label(result.overall)
        ));
        output.push_str(&format!("**Verdict:** {}\n\n", report.verdict()));

        output.push_str("## Score Breakdown\n\n");
        output.push_str("| Component | Score | Weight |\n");
        output.push_str("|-----------|-------|--------|\n");
        for (name, score, weight) in breakdown_rows(report) {
            output.push_str(&format!("| {} | {}% | {:.0}% |\n", name, score, weight * 100.0));
        }
        output.push('\n');

        if !result.extracted_keywords.is_empty() {
            output.push_str("## Job Keywords\n\n");
            output.push_str(&format!(
                "**Matched ({}/{}):** {}\n\n",
                result.matched_keywords.len(),
                result.extracted_keywords.len(),
                code_list(result.matched_keywords.iter().map(String::as_str))
            ));
            output.push_str(&format!(
                "**Missing:** {}\n\n",
                code_list(result.missing_keywords().into_iter())
            ));
        }

        if let Some(job_match) = &report.job_match {
            output.push_str(&format!("## Skills Match: {}%\n\n", job_match.match_score));
            for suggestion in &job_match.suggestions {
                output.push_str(&format!("- {}\n", suggestion.message));
            }
            output.push('\n');
        }

        output.push_str("## 📋 Suggestions\n\n");
        if result.suggestions.is_empty() {
            output.push_str("No suggestions. The resume covers every check.\n\n");
        } else {
            for (i, suggestion) in result.suggestions.iter().enumerate() {
                output.push_str(&format!(
                    "{}. **{}** ({}): {}\n",
                    i + 1,
                    Self::suggestion_badge(suggestion.kind),
                    suggestion.category,
                    suggestion.message
                ));
            }
            output.push('\n');
        }

        if !report.tips.is_empty() {
            output.push_str("## ATS Tips\n\n");
            for tip in &report.tips {
                output.push_str(&format!("- {}\n", tip));
            }
            output.push('\n');
        }

        if self.include_metadata {
            output.push_str("---\n\n");
            output.push_str(&format!("*Generated by resume-ats v{}*\n", report.metadata.version));
        }

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Markdown
    }
}

impl HtmlFormatter {
    pub fn new(include_styles: bool) -> Self {
        Self { include_styles }
    }

    fn create_template_data(&self, report: &AtsReport) -> HtmlTemplate {
        let result = &report.result;
        let score_class = match result.overall {
            90..=100 => "score-excellent",
            70..=89 => "score-good",
            60..=69 => "score-fair",
            _ => "score-poor",
        };

        let breakdown = breakdown_rows(report)
            .into_iter()
            .map(|(name, score, weight)| HtmlScoreRow {
                name,
                score,
                weight: format!("{:.0}%", weight * 100.0),
            })
            .collect();

        let (has_skill_match, skill_match_score, skill_missing) = match &report.job_match {
            Some(job_match) => (
                true,
                job_match.match_score,
                job_match.notable_missing().map(|k| k.keyword.clone()).collect(),
            ),
            None => (false, 0, Vec::new()),
        };

        HtmlTemplate {
            include_styles: self.include_styles,
            generated_at: report.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
            processing_time: report.metadata.processing_time_ms,
            overall_score: result.overall,
            score_class,
            score_label: score_label(result.overall),
            verdict: report.verdict(),
            breakdown,
            has_keywords: !result.extracted_keywords.is_empty(),
            matched_keywords: result.matched_keywords.clone(),
            missing_keywords: result.missing_keywords().into_iter().map(String::from).collect(),
            has_skill_match,
            skill_match_score,
            skill_missing,
            suggestions: result.suggestions.clone(),
            tips: report.tips.clone(),
            version: report.metadata.version.clone(),
            resume_file: report.metadata.resume_file.clone(),
            job_file: report.metadata.job_file.clone().unwrap_or_else(|| "none".to_string()),
        }
    }
}

impl OutputFormatter for HtmlFormatter {
    fn format_report(&self, report: &AtsReport) -> Result<String> {
        Ok(self.create_template_data(report).render()?)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Html
    }
}

impl ReportGenerator {
    pub fn new() -> Self {
        Self::with_options(true, false, true, true, true)
    }

    pub fn with_options(
        use_colors: bool,
        detailed: bool,
        pretty_json: bool,
        include_metadata: bool,
        include_html_styles: bool,
    ) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors, detailed),
            json_formatter: JsonFormatter::new(pretty_json),
            markdown_formatter: MarkdownFormatter::new(include_metadata),
            html_formatter: HtmlFormatter::new(include_html_styles),
        }
    }

    pub fn generate_report(&self, report: &AtsReport, format: &OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Console => self.console_formatter.format_report(report),
            OutputFormat::Json => self.json_formatter.format_report(report),
            OutputFormat::Markdown => self.markdown_formatter.format_report(report),
            OutputFormat::Html => self.html_formatter.format_report(report),
        }
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

fn file_name(path: &str) -> String {
    Path::new(path)
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| path.to_string())
}

fn code_list<'a>(items: impl Iterator<Item = &'a str>) -> String {
    let items: Vec<String> = items.map(|item| format!("`{}`", item)).collect();
    if items.is_empty() {
        "none".to_string()
    } else {
        items.join(", ")
    }
}

pub fn save_report_to_file(content: &str, file_path: &Path) -> Result<()> {
    use std::fs;
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(file_path, content)?;
    Ok(())
}

pub fn suggest_filename(format: &OutputFormat, resume_name: &str, timestamp: bool) -> String {
    let base_name = Path::new(resume_name)
        .file_stem()
        .unwrap_or_default()
        .to_string_lossy();

    let timestamp_suffix = if timestamp {
        format!("_{}", chrono::Utc::now().format("%Y%m%d_%H%M%S"))
    } else {
        String::new()
    };

    let extension = match format {
        OutputFormat::Console => "txt",
        OutputFormat::Json => "json",
        OutputFormat::Markdown => "md",
        OutputFormat::Html => "html",
    };

    format!("{}_ats{}.{}", base_name, timestamp_suffix, extension)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{PersonalInfo, ResumeData, Skills};
    use crate::output::report::ReportMetadata;
    use crate::processing::scorer::score;

    fn sample_report() -> AtsReport {
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
        let result = score(&resume, "Java java Kubernetes kubernetes Python python Docker docker");
        AtsReport::new(result, ReportMetadata::new("out/sam.json", Some("job.txt".into()), 1))
    }

    #[test]
    fn test_console_without_colors() {
        let output = ConsoleFormatter::new(false, true)
            .format_report(&sample_report())
            .unwrap();

        assert!(output.contains("Overall Score: 57% [BELOW AVERAGE]"));
        assert!(output.contains("Matched 2 of 4"));
        assert!(output.contains("✗ kubernetes, docker"));
        assert!(output.contains("[!] Add education section"));
        assert!(output.contains("Job description: job.txt"));
    }

    #[test]
    fn test_json_uses_result_field_names() {
        let output = JsonFormatter::new(false).format_report(&sample_report()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value["result"]["score"], 57);
        assert_eq!(value["result"]["breakdown"]["keywords"], 85);
        assert_eq!(value["result"]["keywords"][0], "java");
        assert_eq!(value["result"]["matchedKeywords"][1], "python");
        assert_eq!(value["result"]["suggestions"][0]["type"], "critical");
    }

    #[test]
    fn test_markdown_sections() {
        let output = MarkdownFormatter::new(true).format_report(&sample_report()).unwrap();

        assert!(output.contains("| Keywords | 85% | 40% |"));
        assert!(output.contains("**Missing:** `kubernetes`, `docker`"));
        assert!(output.contains("**Resume:** `sam.json` | **Job:** `job.txt`"));
    }

    #[test]
    fn test_html_escapes_and_renders() {
        let mut report = sample_report();
        report.tips = vec!["Use <b>plain</b> text".to_string()];

        let output = HtmlFormatter::new(false).format_report(&report).unwrap();
        assert!(output.contains("Overall Score: 57%"));
        assert!(output.contains("tag-missing\">kubernetes"));
        assert!(output.contains("suggestion-critical"));
        assert!(!output.contains("<b>plain</b>"));
        assert!(!output.contains("<style>"));
    }

    #[test]
    fn test_generator_routes_by_format() {
        let generator = ReportGenerator::with_options(false, false, true, false, false);
        let report = sample_report();

        let json = generator.generate_report(&report, &OutputFormat::Json).unwrap();
        assert!(json.starts_with('{'));
        let markdown = generator.generate_report(&report, &OutputFormat::Markdown).unwrap();
        assert!(markdown.starts_with("# "));
    }

    #[test]
    fn test_suggest_filename() {
        assert_eq!(suggest_filename(&OutputFormat::Json, "data/jane.json", false), "jane_ats.json");
        assert_eq!(suggest_filename(&OutputFormat::Html, "jane.json", false), "jane_ats.html");
    }
}
