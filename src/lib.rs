//! Resume ATS scoring library

pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod model;
pub mod processing;
pub mod output;

pub use error::{Result, ResumeAtsError};
pub use config::Config;
pub use model::ResumeData;
pub use processing::keywords::KeywordExtractor;
pub use processing::scorer::{score, AtsScorer, ScoreBreakdown, ScoreResult};
