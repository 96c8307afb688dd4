//! CLI interface for the resume ATS scorer

use crate::config::OutputFormat;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

pub const RESUME_EXTENSIONS: &[&str] = &["json"];
pub const JOB_EXTENSIONS: &[&str] = &["txt", "md", "markdown", "pdf"];

#[derive(Parser)]
#[command(name = "resume-ats")]
#[command(about = "ATS compatibility scoring for structured resumes")]
#[command(long_about = "Score a JSON resume for applicant tracking system compatibility, optionally against a job description")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Disable colored console output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Score a resume for ATS compatibility
    Score {
        /// Path to resume data (JSON)
        #[arg(short, long)]
        resume: PathBuf,

        /// Path to job description file (TXT, MD, PDF)
        #[arg(short, long)]
        job: Option<PathBuf>,

        /// Output format: console, json, markdown, html
        #[arg(short, long)]
        output: Option<String>,

        /// Save output to file
        #[arg(short, long)]
        save: Option<PathBuf>,

        /// Include file details and skills-match suggestions
        #[arg(short, long)]
        detailed: bool,

        /// Append general ATS tips to the report
        #[arg(short, long)]
        tips: bool,
    },

    /// Compare resume skills with a job description's vocabulary
    Match {
        /// Path to resume data (JSON)
        #[arg(short, long)]
        resume: PathBuf,

        /// Path to job description file (TXT, MD, PDF)
        #[arg(short, long)]
        job: PathBuf,

        /// Output format: console, json
        #[arg(short, long, default_value = "console")]
        output: String,
    },

    /// List the keywords extracted from a job description
    Keywords {
        /// Path to job description file (TXT, MD, PDF)
        #[arg(short, long)]
        job: PathBuf,

        /// Maximum number of keywords to show
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Count how often a term appears in a resume
    Density {
        /// Path to resume data (JSON)
        #[arg(short, long)]
        resume: PathBuf,

        /// Term to look for
        #[arg(short, long)]
        term: String,
    },

    /// Show general ATS formatting tips
    Tips,

    /// Show configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Print the configuration file location
    Path,

    /// Reset configuration to defaults
    Reset,
}

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> Result<OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" => Ok(OutputFormat::Console),
        "json" => Ok(OutputFormat::Json),
        "markdown" | "md" => Ok(OutputFormat::Markdown),
        "html" => Ok(OutputFormat::Html),
        _ => Err(format!("Invalid output format: {}. Supported: console, json, markdown, html", format)),
    }
}

/// Validate file extension
pub fn validate_file_extension(path: &Path, allowed_extensions: &[&str]) -> Result<(), String> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => {
            if allowed_extensions.contains(&ext.to_lowercase().as_str()) {
                Ok(())
            } else {
                Err(format!(
                    "Unsupported file extension: .{}. Allowed: {}",
                    ext,
                    allowed_extensions.join(", ")
                ))
            }
        }
        None => Err("File has no extension".to_string()),
    }
}
