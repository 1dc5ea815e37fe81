use crate::domain::model::{FilterCriteria, LevelFilter};
use serde::{Deserialize, Serialize};

/// Raw report parameters as they arrive from a request or the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportQuery {
    pub skill: Option<String>,
    #[serde(rename = "skillLevel")]
    pub skill_level: Option<String>,
    pub employee: Option<String>,
}

impl ReportQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Blank parameters mean "no constraint". The level is parsed once here.
    pub fn to_criteria(&self) -> FilterCriteria {
        FilterCriteria {
            skill_name: non_blank(&self.skill),
            proficiency_level: self.skill_level.as_deref().and_then(LevelFilter::parse),
            employee_name: non_blank(&self.employee),
        }
    }
}

fn non_blank(value: &Option<String>) -> Option<String> {
    value.as_ref().filter(|v| !v.is_empty()).cloned()
}
