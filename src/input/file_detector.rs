//! File type detection

use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    Json,
    Pdf,
    Text,
    Markdown,
    Unknown,
}

impl FileType {
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "json" => FileType::Json,
            "pdf" => FileType::Pdf,
            "txt" => FileType::Text,
            "md" | "markdown" => FileType::Markdown,
            _ => FileType::Unknown,
        }
    }

    pub fn from_path(path: &Path) -> Self {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(Self::from_extension)
            .unwrap_or(FileType::Unknown)
    }

    /// Formats a job description can be read from
    pub fn is_job_description(&self) -> bool {
        matches!(self, FileType::Pdf | FileType::Text | FileType::Markdown)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detection() {
        assert_eq!(FileType::from_path(Path::new("resume.JSON")), FileType::Json);
        assert_eq!(FileType::from_path(Path::new("job.markdown")), FileType::Markdown);
        assert_eq!(FileType::from_path(Path::new("job")), FileType::Unknown);
        assert!(FileType::Pdf.is_job_description());
        assert!(!FileType::Json.is_job_description());
    }
}
