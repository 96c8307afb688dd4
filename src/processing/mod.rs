//! Resume text analysis and ATS scoring

pub mod vocabulary;
pub mod flattener;
pub mod keywords;
pub mod scorer;
pub mod suggestions;
pub mod density;
pub mod job_matcher;
