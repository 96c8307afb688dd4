//! resume-ats: ATS compatibility scoring for structured resumes

use clap::Parser;
use colored::Colorize;
use log::{debug, error, info};
use resume_ats::cli::{self, Cli, Commands, ConfigAction};
use resume_ats::config::{Config, OutputFormat};
use resume_ats::input::InputManager;
use resume_ats::output::formatter::{save_report_to_file, suggest_filename};
use resume_ats::output::{AtsReport, ReportGenerator, ReportMetadata};
use resume_ats::processing::density::keyword_density;
use resume_ats::processing::job_matcher::JobDescriptionMatcher;
use resume_ats::processing::vocabulary::ats_tips;
use resume_ats::{AtsScorer, Result, ResumeAtsError};
use std::path::{Path, PathBuf};
use std::process;
use std::time::Instant;

#[tokio::main]
async fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    // Load configuration
    let config_path = cli.config.clone().unwrap_or_else(Config::config_path);
    let config = match Config::load_from(&config_path) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    let use_colors = config.output.color_output && !cli.no_color;
    if !use_colors {
        colored::control::set_override(false);
    }

    if let Err(e) = run_command(cli.command, config, &config_path, use_colors).await {
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

async fn run_command(command: Commands, config: Config, config_path: &Path, use_colors: bool) -> Result<()> {
    match command {
        Commands::Score {
            resume,
            job,
            output,
            save,
            detailed,
            tips,
        } => {
            let output_format = match output {
                Some(format) => cli::parse_output_format(&format).map_err(ResumeAtsError::InvalidInput)?,
                None => config.output.format,
            };
            let detailed = detailed || config.output.detailed;
            let include_tips = tips || config.output.include_tips;
            let progress = output_format == OutputFormat::Console && save.is_none();

            validate_resume_path(&resume)?;
            if let Some(job) = &job {
                validate_job_path(job)?;
            }

            if progress {
                println!("🚀 ATS compatibility analysis");
                println!("📄 Resume: {}", resume.display());
                if let Some(job) = &job {
                    println!("💼 Job Description: {}", job.display());
                }
            }

            let start = Instant::now();
            let mut input_manager = InputManager::new();
            let resume_data = input_manager.load_resume(&resume).await?;
            let job_text = match &job {
                Some(job) => input_manager.extract_text(job).await?,
                None => String::new(),
            };

            let scorer = AtsScorer::new(config.keyword_extractor());
            let result = scorer.score(&resume_data, &job_text);
            info!("Scored {} with overall {}", resume.display(), result.overall);

            let job_match = if job_text.trim().is_empty() {
                None
            } else {
                Some(JobDescriptionMatcher::new()?.analyze(&resume_data, &job_text))
            };

            let metadata = ReportMetadata::new(
                resume.to_string_lossy(),
                job.as_ref().map(|path| path.to_string_lossy().to_string()),
                start.elapsed().as_millis() as u64,
            );
            let mut report = AtsReport::new(result, metadata);
            if let Some(job_match) = job_match {
                report = report.with_job_match(job_match);
            }
            if include_tips {
                report = report.with_tips(ats_tips().iter().copied());
            }

            let generator = ReportGenerator::with_options(use_colors, detailed, true, true, true);
            let rendered = generator.generate_report(&report, &output_format)?;

            match save {
                Some(path) => {
                    let path = resolve_save_path(path, &output_format, &resume);
                    // colors never go to disk
                    let content = if output_format == OutputFormat::Console && use_colors {
                        ReportGenerator::with_options(false, detailed, true, true, true)
                            .generate_report(&report, &output_format)?
                    } else {
                        rendered
                    };
                    save_report_to_file(&content, &path)?;
                    println!("💾 Report saved to {}", path.display());
                }
                None => println!("{}", rendered),
            }
        }

        Commands::Match { resume, job, output } => {
            let output_format = cli::parse_output_format(&output).map_err(ResumeAtsError::InvalidInput)?;
            validate_resume_path(&resume)?;
            validate_job_path(&job)?;

            let mut input_manager = InputManager::new();
            let resume_data = input_manager.load_resume(&resume).await?;
            let job_text = input_manager.extract_text(&job).await?;

            let matcher = JobDescriptionMatcher::new()?;
            let result = matcher.analyze(&resume_data, &job_text);

            match output_format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&result)?),
                OutputFormat::Console => {
                    println!("🎯 Skills match: {}%", result.match_score.to_string().bold());

                    if !result.matched_keywords.is_empty() {
                        println!("\n✅ Found in resume:");
                        for matched in &result.matched_keywords {
                            println!("  • {}", matched.keyword.green());
                        }
                    }

                    let missing: Vec<_> = result.notable_missing().collect();
                    if !missing.is_empty() {
                        println!("\n❌ Missing from resume:");
                        for keyword in missing {
                            println!("  • {} ({:?} priority)", keyword.keyword.red(), keyword.priority);
                        }
                    }

                    if !result.suggestions.is_empty() {
                        println!("\n💡 Suggestions:");
                        for suggestion in &result.suggestions {
                            println!("  • {}", suggestion.message);
                        }
                    }
                }
                other => {
                    return Err(ResumeAtsError::InvalidInput(format!(
                        "Match output supports console and json, not {:?}",
                        other
                    )));
                }
            }
        }

        Commands::Keywords { job, limit } => {
            validate_job_path(&job)?;

            let mut input_manager = InputManager::new();
            let job_text = input_manager.extract_text(&job).await?;

            let mut ranked = config.keyword_extractor().ranked_terms(&job_text);
            if let Some(limit) = limit {
                ranked.truncate(limit);
            }
            debug!("Extracted {} keywords from {}", ranked.len(), job.display());

            if ranked.is_empty() {
                println!("No keyword is repeated often enough in {}", job.display());
            } else {
                println!("🔑 Keywords from {}:", job.display());
                for (i, (term, count)) in ranked.iter().enumerate() {
                    println!("  {:>2}. {:<24} {}", i + 1, term.cyan(), count);
                }
            }
        }

        Commands::Density { resume, term } => {
            validate_resume_path(&resume)?;
            if term.trim().is_empty() {
                return Err(ResumeAtsError::InvalidInput("Term must not be empty".to_string()));
            }

            let input_manager = InputManager::new();
            let resume_data = input_manager.load_resume(&resume).await?;
            let density = keyword_density(&resume_data, &term);

            println!(
                "📈 '{}' appears in {} word(s), density {:.2}%",
                term.bold(),
                density.count,
                density.density
            );
        }

        Commands::Tips => {
            println!("💡 ATS tips:");
            for tip in ats_tips() {
                println!("  • {}", tip);
            }
        }

        Commands::Config { action } => match action.unwrap_or(ConfigAction::Show) {
            ConfigAction::Show => {
                let content = toml::to_string_pretty(&config)
                    .map_err(|e| ResumeAtsError::Configuration(format!("Failed to serialize config: {}", e)))?;
                println!("⚙️  Configuration ({}):\n", config_path.display());
                println!("{}", content);
            }
            ConfigAction::Path => println!("{}", config_path.display()),
            ConfigAction::Reset => {
                Config::default().save_to(config_path)?;
                println!("🔄 Configuration reset to defaults: {}", config_path.display());
            }
        },
    }

    Ok(())
}

fn validate_resume_path(path: &Path) -> Result<()> {
    cli::validate_file_extension(path, cli::RESUME_EXTENSIONS)
        .map_err(|e| ResumeAtsError::InvalidInput(format!("Resume file: {}", e)))
}

fn validate_job_path(path: &Path) -> Result<()> {
    cli::validate_file_extension(path, cli::JOB_EXTENSIONS)
        .map_err(|e| ResumeAtsError::InvalidInput(format!("Job description file: {}", e)))
}

/// A directory target gets a generated file name
fn resolve_save_path(path: PathBuf, format: &OutputFormat, resume: &Path) -> PathBuf {
    if path.is_dir() {
        path.join(suggest_filename(format, &resume.to_string_lossy(), true))
    } else {
        path
    }
}
