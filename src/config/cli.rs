use crate::core::query::ReportQuery;
use crate::domain::model::ReportFormat;
use crate::utils::error::{ReportError, Result};
use crate::utils::validation::{self, Validate};
use clap::{Parser, ValueEnum};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    Csv,
    Pdf,
    All,
}

impl FormatArg {
    pub fn formats(self) -> Vec<ReportFormat> {
        match self {
            FormatArg::Csv => vec![ReportFormat::Csv],
            FormatArg::Pdf => vec![ReportFormat::Pdf],
            FormatArg::All => ReportFormat::ALL.to_vec(),
        }
    }
}

#[derive(Debug, Clone, Parser)]
#[command(name = "skill-matrix")]
#[command(about = "Generate employee skill matrix reports as CSV and PDF")]
pub struct CliConfig {
    #[arg(long, help = "Path to a JSON skill dataset", conflicts_with = "source_url")]
    pub dataset: Option<String>,

    #[arg(long, help = "HTTP endpoint serving the JSON skill dataset")]
    pub source_url: Option<String>,

    #[arg(short, long, help = "Path to TOML configuration file")]
    pub config: Option<String>,

    #[arg(long, help = "Only report this skill (exact, case-sensitive)")]
    pub skill: Option<String>,

    #[arg(long, help = "Only report this proficiency level (1-3)")]
    pub skill_level: Option<String>,

    #[arg(long, help = "Only report this employee (exact name)")]
    pub employee: Option<String>,

    #[arg(long, value_enum)]
    pub format: Option<FormatArg>,

    #[arg(long)]
    pub output_path: Option<String>,

    #[arg(long, help = "Also pack the reports into a zip archive")]
    pub bundle: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,
}

impl CliConfig {
    pub fn query(&self) -> ReportQuery {
        ReportQuery {
            skill: self.skill.clone(),
            skill_level: self.skill_level.clone(),
            employee: self.employee.clone(),
        }
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        if let Some(url) = &self.source_url {
            validation::validate_url("source_url", url)?;
        }
        if let Some(dataset) = &self.dataset {
            validation::validate_path("dataset", dataset)?;
            validation::validate_file_extension("dataset", dataset, &["json"])?;
        }
        if let Some(config) = &self.config {
            validation::validate_file_extension("config", config, &["toml"])?;
        }
        if let Some(path) = &self.output_path {
            validation::validate_path("output_path", path)?;
        }
        if let Some(level) = &self.skill_level {
            validation::validate_skill_level("skill_level", level)?;
        }
        if self.config.is_none() && self.dataset.is_none() && self.source_url.is_none() {
            return Err(ReportError::MissingConfigError {
                field: "dataset or source_url".to_string(),
            });
        }
        Ok(())
    }
}
