//! Input manager for resume data and job description files

use crate::error::{Result, ResumeAtsError};
use crate::input::file_detector::FileType;
use crate::input::text_extractor::{MarkdownExtractor, PdfExtractor, PlainTextExtractor, TextExtractor};
use crate::model::ResumeData;
use log::info;
use std::collections::HashMap;
use std::path::Path;

pub struct InputManager {
    cache: HashMap<String, String>,
    enable_cache: bool,
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}

impl InputManager {
    pub fn new() -> Self {
        Self {
            cache: HashMap::new(),
            enable_cache: true,
        }
    }

    pub fn with_cache(mut self, enable: bool) -> Self {
        self.enable_cache = enable;
        self
    }

    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }

    /// Load resume data from a JSON file
    pub async fn load_resume(&self, path: &Path) -> Result<ResumeData> {
        Self::ensure_exists(path)?;

        if FileType::from_path(path) != FileType::Json {
            return Err(ResumeAtsError::UnsupportedFormat(format!(
                "Resume data must be a .json file: {}",
                path.display()
            )));
        }

        info!("Loading resume data: {}", path.display());
        let content = tokio::fs::read_to_string(path).await?;
        parse_resume(&content)
    }

    /// Read a job description from a text, Markdown or PDF file
    pub async fn extract_text(&mut self, path: &Path) -> Result<String> {
        let path_str = path.to_string_lossy().to_string();

        if self.enable_cache {
            if let Some(cached_text) = self.cache.get(&path_str) {
                info!("Using cached text for: {}", path.display());
                return Ok(cached_text.clone());
            }
        }

        Self::ensure_exists(path)?;

        let file_type = FileType::from_path(path);
        if !file_type.is_job_description() {
            return Err(ResumeAtsError::UnsupportedFormat(format!(
                "Unsupported job description file: {}",
                path.display()
            )));
        }

        let text = match file_type {
            FileType::Pdf => {
                info!("Extracting text from PDF: {}", path.display());
                PdfExtractor.extract(path).await?
            }
            FileType::Markdown => {
                info!("Processing markdown file: {}", path.display());
                MarkdownExtractor.extract(path).await?
            }
            _ => {
                info!("Reading plain text file: {}", path.display());
                PlainTextExtractor.extract(path).await?
            }
        };

        if self.enable_cache {
            self.cache.insert(path_str, text.clone());
        }

        Ok(text)
    }

    fn ensure_exists(path: &Path) -> Result<()> {
        if path.exists() {
            Ok(())
        } else {
            Err(ResumeAtsError::InvalidInput(format!(
                "File does not exist: {}",
                path.display()
            )))
        }
    }
}

/// Parse resume JSON, rejecting documents whose top level is not an object
pub fn parse_resume(content: &str) -> Result<ResumeData> {
    let value: serde_json::Value = serde_json::from_str(content)?;

    if !value.is_object() {
        return Err(ResumeAtsError::InvalidInput(format!(
            "Resume data must be a JSON object, found {}",
            json_kind(&value)
        )));
    }

    Ok(serde_json::from_value(value)?)
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
