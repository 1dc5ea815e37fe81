use serde::{Deserialize, Serialize};

pub const DEFAULT_TITLE: &str = "Skill Matrix Report";
pub const DEFAULT_FILE_STEM: &str = "skill-matrix";
pub const NO_MATCH_PLACEHOLDER: &str = "No skills matching the criteria";

/// What to do with an included employee whose skills all fail the entry-level filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmptyRowPolicy {
    Placeholder(String),
    Drop,
}

impl EmptyRowPolicy {
    pub fn placeholder() -> Self {
        EmptyRowPolicy::Placeholder(NO_MATCH_PLACEHOLDER.to_string())
    }
}

/// Table grid geometry, in points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutSettings {
    /// Added once per column on top of the widest measured cell.
    pub column_padding: f64,
    pub row_height: f64,
    pub text_inset_x: f64,
    pub text_inset_y: f64,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            column_padding: 20.0,
            row_height: 20.0,
            text_inset_x: 10.0,
            text_inset_y: 5.0,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageSize {
    #[default]
    Letter,
    A4,
}

impl PageSize {
    /// (width, height) in points
    pub fn dimensions_pt(self) -> (f64, f64) {
        match self {
            PageSize::Letter => (612.0, 792.0),
            PageSize::A4 => (595.28, 841.89),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageSettings {
    pub size: PageSize,
    pub margin: f64,
    pub title_font_size: f64,
    pub font_size: f64,
    pub repeat_header: bool,
    pub include_timestamp: bool,
}

impl Default for PageSettings {
    fn default() -> Self {
        Self {
            size: PageSize::Letter,
            margin: 72.0,
            title_font_size: 25.0,
            font_size: 12.0,
            repeat_header: true,
            include_timestamp: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReportSettings {
    pub title: String,
    pub file_stem: String,
    pub csv_empty_rows: EmptyRowPolicy,
    pub pdf_empty_rows: EmptyRowPolicy,
    pub layout: LayoutSettings,
    pub page: PageSettings,
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            file_stem: DEFAULT_FILE_STEM.to_string(),
            csv_empty_rows: EmptyRowPolicy::placeholder(),
            pdf_empty_rows: EmptyRowPolicy::Drop,
            layout: LayoutSettings::default(),
            page: PageSettings::default(),
        }
    }
}

impl ReportSettings {
    pub fn filename(&self, extension: &str) -> String {
        format!("{}.{}", self.file_stem, extension)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_keep_format_asymmetry() {
        let settings = ReportSettings::default();
        assert_eq!(
            settings.csv_empty_rows,
            EmptyRowPolicy::Placeholder("No skills matching the criteria".to_string())
        );
        assert_eq!(settings.pdf_empty_rows, EmptyRowPolicy::Drop);
        assert_eq!(settings.filename("csv"), "skill-matrix.csv");
    }

    #[test]
    fn test_page_dimensions() {
        assert_eq!(PageSize::Letter.dimensions_pt(), (612.0, 792.0));
        let (width, height) = PageSize::A4.dimensions_pt();
        assert!(width < height);
    }
}
