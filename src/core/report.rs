use crate::config::settings::ReportSettings;
use crate::core::csv_report::render_csv;
use crate::core::filter::filter_records;
use crate::core::pdf::render_pdf;
use crate::core::projector::{csv_lines, pdf_table, project_rows};
use crate::core::query::ReportQuery;
use crate::domain::model::{
    EmployeeScope, FilterCriteria, ReportFormat, ReportOutput, ReportRow, SkillRecord,
};
use crate::domain::ports::{EmployeeDirectory, SkillRecordSource};
use crate::utils::error::{ReportError, Result};

/// Runs one report request: resolve the employee, fetch a snapshot, filter,
/// project and render. Holds no state between requests.
pub struct ReportEngine<R: SkillRecordSource, D: EmployeeDirectory> {
    records: R,
    directory: D,
    settings: ReportSettings,
}

impl<R: SkillRecordSource, D: EmployeeDirectory> ReportEngine<R, D> {
    pub fn new(records: R, directory: D) -> Self {
        Self::with_settings(records, directory, ReportSettings::default())
    }

    pub fn with_settings(records: R, directory: D, settings: ReportSettings) -> Self {
        Self {
            records,
            directory,
            settings,
        }
    }

    pub fn settings(&self) -> &ReportSettings {
        &self.settings
    }

    pub async fn resolve_scope(&self, employee_name: Option<&str>) -> Result<EmployeeScope> {
        let Some(name) = employee_name else {
            return Ok(EmployeeScope::All);
        };

        match self.directory.find_by_name(name).await? {
            Some(employee_ref) => {
                tracing::debug!("Resolved employee '{}' to {}", name, employee_ref);
                Ok(EmployeeScope::Only(employee_ref))
            }
            None => {
                // 找不到員工時回傳空結果，不退回成「全部員工」
                tracing::info!("Employee '{}' not found, report will be empty", name);
                Ok(EmployeeScope::Nobody)
            }
        }
    }

    async fn fetch_snapshot(&self, scope: &EmployeeScope) -> Result<Vec<SkillRecord>> {
        let records = match scope {
            EmployeeScope::Nobody => Vec::new(),
            EmployeeScope::All => self.records.fetch_records(None).await?,
            EmployeeScope::Only(employee_ref) => {
                self.records.fetch_records(Some(employee_ref)).await?
            }
        };
        tracing::debug!("Fetched {} skill records", records.len());
        Ok(records)
    }

    /// Filtered, projected rows before any format-specific empty-row policy.
    pub async fn collect_rows(&self, criteria: &FilterCriteria) -> Result<Vec<ReportRow>> {
        let scope = self.resolve_scope(criteria.employee_name.as_deref()).await?;
        let records = self.fetch_snapshot(&scope).await?;
        let selected = filter_records(&records, criteria, &scope);
        Ok(project_rows(&selected, criteria))
    }

    pub async fn generate(&self, query: &ReportQuery, format: ReportFormat) -> Result<ReportOutput> {
        let mut outputs = self.generate_all(query, &[format]).await?;
        outputs
            .pop()
            .ok_or_else(|| ReportError::render("no output produced"))
    }

    /// Renders several formats from the same snapshot.
    pub async fn generate_all(
        &self,
        query: &ReportQuery,
        formats: &[ReportFormat],
    ) -> Result<Vec<ReportOutput>> {
        let criteria = query.to_criteria();
        tracing::debug!("Report criteria: {:?}", criteria);

        let rows = self.collect_rows(&criteria).await?;
        formats
            .iter()
            .map(|format| self.render(&rows, *format))
            .collect()
    }

    pub fn render(&self, rows: &[ReportRow], format: ReportFormat) -> Result<ReportOutput> {
        let (body, row_count) = match format {
            ReportFormat::Csv => {
                let lines = csv_lines(rows, &self.settings.csv_empty_rows);
                (render_csv(&lines), lines.len())
            }
            ReportFormat::Pdf => {
                let table = pdf_table(rows, &self.settings.pdf_empty_rows);
                (render_pdf(&table, &self.settings), table.rows.len())
            }
        };

        // 輸出失敗一律視為報表產生失敗，不回傳部分內容
        let body = body.map_err(|e| {
            tracing::error!("Error generating {} report: {}", format, e);
            ReportError::render(format!("{} rendering failed: {}", format, e))
        })?;

        tracing::info!(
            "Generated {} report: {} rows, {} bytes",
            format,
            row_count,
            body.len()
        );

        Ok(ReportOutput {
            format,
            filename: self.settings.filename(format.extension()),
            body,
            row_count,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::settings::EmptyRowPolicy;
    use crate::domain::model::{EmployeeRef, SkillEntry};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[derive(Clone, Default)]
    struct MockRecords {
        records: Vec<SkillRecord>,
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl SkillRecordSource for MockRecords {
        async fn fetch_records(&self, employee: Option<&EmployeeRef>) -> Result<Vec<SkillRecord>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self
                .records
                .iter()
                .filter(|r| employee.is_none_or(|e| &r.employee_ref == e))
                .cloned()
                .collect())
        }
    }

    struct MockDirectory;

    #[async_trait]
    impl EmployeeDirectory for MockDirectory {
        async fn find_by_name(&self, name: &str) -> Result<Option<EmployeeRef>> {
            Ok(match name {
                "Ann" => Some(EmployeeRef::new("u1")),
                "Bob" => Some(EmployeeRef::new("u2")),
                _ => None,
            })
        }
    }

    fn records() -> MockRecords {
        let record = |id: &str, name: &str, skills: Vec<SkillEntry>| SkillRecord {
            employee_ref: EmployeeRef::new(id),
            employee_name: name.to_string(),
            skills,
        };
        MockRecords {
            records: vec![
                record(
                    "u1",
                    "Ann",
                    vec![SkillEntry::new("Go", 3), SkillEntry::new("SQL", 1)],
                ),
                record(
                    "u2",
                    "Bob",
                    vec![SkillEntry::new("Rust", 2), SkillEntry::new("SQL", 2)],
                ),
            ],
            calls: Arc::default(),
        }
    }

    fn query(skill: Option<&str>, level: Option<&str>, employee: Option<&str>) -> ReportQuery {
        ReportQuery {
            skill: skill.map(String::from),
            skill_level: level.map(String::from),
            employee: employee.map(String::from),
        }
    }

    #[tokio::test]
    async fn test_unknown_employee_yields_no_rows_without_fetching() {
        let source = records();
        let calls = source.calls.clone();
        let engine = ReportEngine::new(source, MockDirectory);

        let output = engine
            .generate(&query(None, None, Some("Zed")), ReportFormat::Csv)
            .await
            .unwrap();

        assert_eq!(output.row_count, 0);
        assert_eq!(String::from_utf8(output.body).unwrap(), "name,skills\n");
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_known_employee_scopes_rows() {
        let engine = ReportEngine::new(records(), MockDirectory);
        let rows = engine
            .collect_rows(&query(None, None, Some("Bob")).to_criteria())
            .await
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].employee_name, "Bob");
    }

    #[tokio::test]
    async fn test_csv_output() {
        let engine = ReportEngine::new(records(), MockDirectory);
        let output = engine
            .generate(&query(Some("SQL"), None, None), ReportFormat::Csv)
            .await
            .unwrap();

        assert_eq!(output.filename, "skill-matrix.csv");
        assert_eq!(output.content_type(), "text/csv");
        assert_eq!(
            String::from_utf8(output.body).unwrap(),
            "name,skills\nAnn,SQL (Beginner)\nBob,SQL (Proficient)\n"
        );
    }

    #[tokio::test]
    async fn test_empty_row_asymmetry_between_formats() {
        let engine = ReportEngine::new(records(), MockDirectory);
        // Ann 通過記錄層級篩選（有 SQL、也有 Expert），但沒有單筆技能同時符合
        let outputs = engine
            .generate_all(&query(Some("SQL"), Some("3"), None), &ReportFormat::ALL)
            .await
            .unwrap();

        let csv = &outputs[0];
        assert_eq!(csv.row_count, 1);
        assert!(String::from_utf8_lossy(&csv.body).contains("Ann,No skills matching the criteria"));

        let pdf = &outputs[1];
        assert_eq!(pdf.row_count, 0);
        assert!(pdf.body.starts_with(b"%PDF"));
    }

    #[tokio::test]
    async fn test_configured_policy_unifies_formats() {
        let mut settings = ReportSettings::default();
        settings.csv_empty_rows = EmptyRowPolicy::Drop;
        let engine = ReportEngine::with_settings(records(), MockDirectory, settings);

        let output = engine
            .generate(&query(Some("SQL"), Some("3"), None), ReportFormat::Csv)
            .await
            .unwrap();
        assert_eq!(output.row_count, 0);
    }

    #[tokio::test]
    async fn test_non_numeric_level_matches_nothing() {
        let engine = ReportEngine::new(records(), MockDirectory);
        let output = engine
            .generate(&query(None, Some("expert"), None), ReportFormat::Pdf)
            .await
            .unwrap();
        assert_eq!(output.row_count, 0);
        assert_eq!(output.filename, "skill-matrix.pdf");
    }
}
