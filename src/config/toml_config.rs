use crate::config::settings::{EmptyRowPolicy, PageSize, ReportSettings, NO_MATCH_PLACEHOLDER};
use crate::domain::model::ReportFormat;
use crate::utils::error::{ReportError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub report: ReportSection,
    #[serde(default)]
    pub source: SourceSection,
    #[serde(default)]
    pub output: OutputSection,
    #[serde(default)]
    pub csv: EmptyRowsSection,
    #[serde(default)]
    pub pdf: PdfSection,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportSection {
    pub title: Option<String>,
    pub file_stem: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourceSection {
    pub dataset: Option<String>,
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputSection {
    pub path: Option<String>,
    pub formats: Option<Vec<ReportFormat>>,
    pub bundle: Option<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmptyRowsMode {
    Placeholder,
    Drop,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmptyRowsSection {
    pub empty_rows: Option<EmptyRowsMode>,
    pub placeholder: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PdfSection {
    pub empty_rows: Option<EmptyRowsMode>,
    pub placeholder: Option<String>,
    pub page_size: Option<PageSize>,
    pub margin: Option<f64>,
    pub title_font_size: Option<f64>,
    pub font_size: Option<f64>,
    pub column_padding: Option<f64>,
    pub row_height: Option<f64>,
    pub text_inset_x: Option<f64>,
    pub text_inset_y: Option<f64>,
    pub repeat_header: Option<bool>,
    pub include_timestamp: Option<bool>,
}

impl EmptyRowsSection {
    fn policy(&self, default: EmptyRowPolicy) -> EmptyRowPolicy {
        empty_row_policy(self.empty_rows, self.placeholder.as_deref(), default)
    }
}

fn empty_row_policy(
    mode: Option<EmptyRowsMode>,
    placeholder: Option<&str>,
    default: EmptyRowPolicy,
) -> EmptyRowPolicy {
    match mode {
        Some(EmptyRowsMode::Drop) => EmptyRowPolicy::Drop,
        Some(EmptyRowsMode::Placeholder) => {
            EmptyRowPolicy::Placeholder(placeholder.unwrap_or(NO_MATCH_PLACEHOLDER).to_string())
        }
        None => match (default, placeholder) {
            (EmptyRowPolicy::Placeholder(_), Some(text)) => {
                EmptyRowPolicy::Placeholder(text.to_string())
            }
            (default, _) => default,
        },
    }
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| ReportError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${SKILL_DATA_URL})
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| ReportError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn output_path(&self) -> Option<&str> {
        self.output.path.as_deref()
    }

    pub fn formats(&self) -> Option<&[ReportFormat]> {
        self.output.formats.as_deref()
    }

    pub fn bundle_enabled(&self) -> bool {
        self.output.bundle.unwrap_or(false)
    }

    /// 將設定檔內容套用到預設報表設定上
    pub fn to_settings(&self) -> ReportSettings {
        let mut settings = ReportSettings::default();

        if let Some(title) = &self.report.title {
            settings.title = title.clone();
        }
        if let Some(file_stem) = &self.report.file_stem {
            settings.file_stem = file_stem.clone();
        }

        settings.csv_empty_rows = self.csv.policy(settings.csv_empty_rows);
        settings.pdf_empty_rows = empty_row_policy(
            self.pdf.empty_rows,
            self.pdf.placeholder.as_deref(),
            settings.pdf_empty_rows,
        );

        let pdf = &self.pdf;
        let page = &mut settings.page;
        page.size = pdf.page_size.unwrap_or(page.size);
        page.margin = pdf.margin.unwrap_or(page.margin);
        page.title_font_size = pdf.title_font_size.unwrap_or(page.title_font_size);
        page.font_size = pdf.font_size.unwrap_or(page.font_size);
        page.repeat_header = pdf.repeat_header.unwrap_or(page.repeat_header);
        page.include_timestamp = pdf.include_timestamp.unwrap_or(page.include_timestamp);

        let layout = &mut settings.layout;
        layout.column_padding = pdf.column_padding.unwrap_or(layout.column_padding);
        layout.row_height = pdf.row_height.unwrap_or(layout.row_height);
        layout.text_inset_x = pdf.text_inset_x.unwrap_or(layout.text_inset_x);
        layout.text_inset_y = pdf.text_inset_y.unwrap_or(layout.text_inset_y);

        settings
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        if let Some(url) = &self.source.url {
            validation::validate_url("source.url", url)?;
        }
        if let Some(dataset) = &self.source.dataset {
            validation::validate_path("source.dataset", dataset)?;
        }
        if let Some(path) = &self.output.path {
            validation::validate_path("output.path", path)?;
        }
        if let Some(title) = &self.report.title {
            validation::validate_non_empty_string("report.title", title)?;
        }
        if let Some(file_stem) = &self.report.file_stem {
            validation::validate_non_empty_string("report.file_stem", file_stem)?;
        }
        if matches!(&self.output.formats, Some(formats) if formats.is_empty()) {
            return Err(ReportError::InvalidConfigValueError {
                field: "output.formats".to_string(),
                value: "[]".to_string(),
                reason: "At least one output format is required (csv, pdf)".to_string(),
            });
        }

        let settings = self.to_settings();
        validation::validate_positive("pdf.font_size", settings.page.font_size)?;
        validation::validate_positive("pdf.title_font_size", settings.page.title_font_size)?;
        validation::validate_positive("pdf.row_height", settings.layout.row_height)?;
        validation::validate_non_negative("pdf.margin", settings.page.margin)?;
        validation::validate_non_negative("pdf.column_padding", settings.layout.column_padding)?;
        validation::validate_non_negative("pdf.text_inset_x", settings.layout.text_inset_x)?;
        validation::validate_non_negative("pdf.text_inset_y", settings.layout.text_inset_y)?;

        let (width, height) = settings.page.size.dimensions_pt();
        if settings.page.margin * 2.0 >= width.min(height) {
            return Err(ReportError::InvalidConfigValueError {
                field: "pdf.margin".to_string(),
                value: settings.page.margin.to_string(),
                reason: "Margins leave no printable area".to_string(),
            });
        }

        Ok(())
    }
}
