use crate::domain::proficiency;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmployeeRef(String);

impl EmployeeRef {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmployeeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    pub id: EmployeeRef,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillEntry {
    pub name: String,
    // 缺少熟練度時視為 0，標籤為空字串
    #[serde(default)]
    pub proficiency: i64,
}

impl SkillEntry {
    pub fn new(name: impl Into<String>, proficiency: i64) -> Self {
        Self {
            name: name.into(),
            proficiency,
        }
    }

    pub fn label(&self) -> &'static str {
        proficiency::label(self.proficiency)
    }
}

/// One employee's self-assessed skills, already joined with the display name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillRecord {
    pub employee_ref: EmployeeRef,
    pub employee_name: String,
    pub skills: Vec<SkillEntry>,
}

/// Parsed proficiency predicate. Text levels are coerced to numbers once so
/// `"2"`, `" 2 "` and `"2.0"` all select proficiency 2.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelFilter {
    Exact(i64),
    Unmatchable,
}

impl LevelFilter {
    /// Returns `None` for blank input, which means "no level constraint".
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }

        if let Ok(level) = trimmed.parse::<i64>() {
            return Some(LevelFilter::Exact(level));
        }

        let level = match trimmed.parse::<f64>() {
            Ok(value) if value.is_finite() && value.fract() == 0.0 => {
                LevelFilter::Exact(value as i64)
            }
            _ => LevelFilter::Unmatchable,
        };
        Some(level)
    }

    pub fn matches(&self, proficiency: i64) -> bool {
        match self {
            LevelFilter::Exact(level) => *level == proficiency,
            LevelFilter::Unmatchable => false,
        }
    }
}

impl From<i64> for LevelFilter {
    fn from(level: i64) -> Self {
        LevelFilter::Exact(level)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterCriteria {
    pub skill_name: Option<String>,
    pub proficiency_level: Option<LevelFilter>,
    pub employee_name: Option<String>,
}

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_skill(mut self, skill_name: impl Into<String>) -> Self {
        self.skill_name = Some(skill_name.into());
        self
    }

    pub fn with_level(mut self, level: impl Into<LevelFilter>) -> Self {
        self.proficiency_level = Some(level.into());
        self
    }

    pub fn with_employee(mut self, employee_name: impl Into<String>) -> Self {
        self.employee_name = Some(employee_name.into());
        self
    }

    pub fn matches_skill_name(&self, entry: &SkillEntry) -> bool {
        self.skill_name
            .as_deref()
            .is_none_or(|name| entry.name == name)
    }

    pub fn matches_level(&self, entry: &SkillEntry) -> bool {
        self.proficiency_level
            .is_none_or(|level| level.matches(entry.proficiency))
    }

    /// 單筆技能必須同時符合所有啟用中的條件
    pub fn entry_matches(&self, entry: &SkillEntry) -> bool {
        self.matches_skill_name(entry) && self.matches_level(entry)
    }
}

/// Outcome of resolving the employee-name filter against the directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmployeeScope {
    All,
    Only(EmployeeRef),
    /// The name did not resolve. Matches no record at all.
    Nobody,
}

impl EmployeeScope {
    pub fn includes(&self, employee_ref: &EmployeeRef) -> bool {
        match self {
            EmployeeScope::All => true,
            EmployeeScope::Only(only) => only == employee_ref,
            EmployeeScope::Nobody => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchedSkill {
    pub name: String,
    pub label: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportRow {
    pub employee_name: String,
    pub matched_skills: Vec<MatchedSkill>,
}

impl ReportRow {
    pub fn has_skills(&self) -> bool {
        !self.matched_skills.is_empty()
    }

    /// `Go (Expert), SQL (Beginner)`
    pub fn csv_skills_text(&self) -> String {
        self.matched_skills
            .iter()
            .map(|skill| format!("{} ({})", skill.name, skill.label))
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// `Go: Expert, SQL: Beginner`
    pub fn pdf_skills_text(&self) -> String {
        self.matched_skills
            .iter()
            .map(|skill| format!("{}: {}", skill.name, skill.label))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableSpec {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl TableSpec {
    pub fn new<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    pub fn push_row<I, S>(&mut self, row: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rows.push(row.into_iter().map(Into::into).collect());
    }

    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    /// Cell text at `(row, column)`. Short rows read as empty cells.
    pub fn cell(&self, row: usize, column: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|cells| cells.get(column))
            .map_or("", String::as_str)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    Csv,
    Pdf,
}

impl ReportFormat {
    pub const ALL: [ReportFormat; 2] = [ReportFormat::Csv, ReportFormat::Pdf];

    pub fn content_type(self) -> &'static str {
        match self {
            ReportFormat::Csv => "text/csv",
            ReportFormat::Pdf => "application/pdf",
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            ReportFormat::Csv => "csv",
            ReportFormat::Pdf => "pdf",
        }
    }
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

#[derive(Debug, Clone)]
pub struct ReportOutput {
    pub format: ReportFormat,
    pub filename: String,
    pub body: Vec<u8>,
    /// Number of data rows that made it into the document.
    pub row_count: usize,
}

impl ReportOutput {
    pub fn content_type(&self) -> &'static str {
        self.format.content_type()
    }

    pub fn content_disposition(&self) -> String {
        format!("attachment; filename=\"{}\"", self.filename)
    }
}
