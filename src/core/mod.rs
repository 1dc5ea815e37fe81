pub mod bundle;
pub mod csv_report;
pub mod filter;
pub mod pdf;
pub mod projector;
pub mod query;
pub mod report;

pub use crate::domain::model::{ReportFormat, ReportOutput, ReportRow, SkillRecord};
pub use crate::domain::ports::{EmployeeDirectory, SkillRecordSource, Storage, TextMeasure};
pub use crate::utils::error::Result;
