use crate::domain::model::{EmployeeRef, SkillRecord};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
    fn remove_file(&self, path: &str) -> impl std::future::Future<Output = Result<()>> + Send;
}

/// Persistence collaborator: hands out skill records already joined with the
/// employee display name.
#[async_trait]
pub trait SkillRecordSource: Send + Sync {
    async fn fetch_records(&self, employee: Option<&EmployeeRef>) -> Result<Vec<SkillRecord>>;
}

/// Directory collaborator. `Ok(None)` is a normal outcome, not an error.
#[async_trait]
pub trait EmployeeDirectory: Send + Sync {
    async fn find_by_name(&self, name: &str) -> Result<Option<EmployeeRef>>;
}

/// Font-metrics capability the PDF layout needs: width of a string in points.
pub trait TextMeasure {
    fn width_of(&self, text: &str) -> f64;
}

impl<F> TextMeasure for F
where
    F: Fn(&str) -> f64,
{
    fn width_of(&self, text: &str) -> f64 {
        self(text)
    }
}
