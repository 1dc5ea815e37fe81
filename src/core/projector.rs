use crate::config::settings::EmptyRowPolicy;
use crate::domain::model::{FilterCriteria, MatchedSkill, ReportRow, SkillRecord, TableSpec};

pub const PDF_HEADERS: [&str; 2] = ["Employee Name", "Skills"];

/// One row per surviving record, keeping only the skills that satisfy every
/// active filter. Rows may come out with no skills; the renderers decide what
/// to do with those via [`EmptyRowPolicy`].
pub fn project_rows(records: &[&SkillRecord], criteria: &FilterCriteria) -> Vec<ReportRow> {
    records
        .iter()
        .map(|record| ReportRow {
            employee_name: record.employee_name.clone(),
            matched_skills: record
                .skills
                .iter()
                .filter(|entry| criteria.entry_matches(entry))
                .map(|entry| MatchedSkill {
                    name: entry.name.clone(),
                    label: entry.label(),
                })
                .collect(),
        })
        .collect()
}

/// (name, skills) pairs for the CSV body.
pub fn csv_lines(rows: &[ReportRow], policy: &EmptyRowPolicy) -> Vec<(String, String)> {
    rows.iter()
        .filter_map(|row| {
            let skills = skills_or_policy(row, policy, ReportRow::csv_skills_text)?;
            Some((row.employee_name.clone(), skills))
        })
        .collect()
}

/// Two-column table: employee name and one combined skills cell.
pub fn pdf_table(rows: &[ReportRow], policy: &EmptyRowPolicy) -> TableSpec {
    let mut table = TableSpec::new(PDF_HEADERS);
    for row in rows {
        if let Some(skills) = skills_or_policy(row, policy, ReportRow::pdf_skills_text) {
            table.push_row([row.employee_name.clone(), skills]);
        }
    }
    table
}

fn skills_or_policy(
    row: &ReportRow,
    policy: &EmptyRowPolicy,
    format: fn(&ReportRow) -> String,
) -> Option<String> {
    if row.has_skills() {
        return Some(format(row));
    }
    match policy {
        EmptyRowPolicy::Placeholder(text) => Some(text.clone()),
        EmptyRowPolicy::Drop => {
            tracing::debug!("Dropping row for {}: no matching skills", row.employee_name);
            None
        }
    }
}
