use crate::domain::model::{EmployeeScope, FilterCriteria, SkillRecord};

/// Record-level inclusion. A record survives when it belongs to the resolved
/// employee scope and owns at least one skill satisfying each active filter.
/// The skills inside a surviving record are left untouched; narrowing them is
/// the projector's job.
pub fn filter_records<'a>(
    records: &'a [SkillRecord],
    criteria: &FilterCriteria,
    scope: &EmployeeScope,
) -> Vec<&'a SkillRecord> {
    let selected: Vec<&SkillRecord> = records
        .iter()
        .filter(|record| scope.includes(&record.employee_ref))
        // 兩個條件各自獨立檢查，不要求落在同一筆技能上
        .filter(|record| {
            criteria.skill_name.is_none()
                || record
                    .skills
                    .iter()
                    .any(|entry| criteria.matches_skill_name(entry))
        })
        .filter(|record| {
            criteria.proficiency_level.is_none()
                || record.skills.iter().any(|entry| criteria.matches_level(entry))
        })
        .collect();

    tracing::debug!(
        "Filter kept {} of {} records (scope: {:?})",
        selected.len(),
        records.len(),
        scope
    );

    selected
}
