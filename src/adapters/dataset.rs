use crate::domain::model::{Employee, EmployeeRef, SkillEntry, SkillRecord};
use crate::domain::ports::{EmployeeDirectory, SkillRecordSource, Storage};
use crate::utils::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// On-disk / over-the-wire layout of a skill dataset.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DatasetDocument {
    #[serde(default)]
    pub employees: Vec<Employee>,
    #[serde(default)]
    pub skill_records: Vec<StoredSkillRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredSkillRecord {
    pub employee_id: EmployeeRef,
    #[serde(default)]
    pub skills: Vec<SkillEntry>,
}

/// In-memory snapshot serving both the record source and the directory.
#[derive(Debug, Clone, Default)]
pub struct JsonDataset {
    document: DatasetDocument,
}

impl JsonDataset {
    pub fn new(document: DatasetDocument) -> Self {
        Self { document }
    }

    pub fn from_json_slice(data: &[u8]) -> Result<Self> {
        let document: DatasetDocument = serde_json::from_slice(data)?;
        tracing::debug!(
            "Loaded dataset: {} employees, {} skill records",
            document.employees.len(),
            document.skill_records.len()
        );
        Ok(Self::new(document))
    }

    pub async fn load<S: Storage>(storage: &S, path: &str) -> Result<Self> {
        let data = storage.read_file(path).await?;
        Self::from_json_slice(&data)
    }

    pub fn document(&self) -> &DatasetDocument {
        &self.document
    }

    /// Joins stored records with employee names. Records pointing at an
    /// unknown employee are skipped.
    pub fn joined_records(&self, employee: Option<&EmployeeRef>) -> Vec<SkillRecord> {
        let names: HashMap<&EmployeeRef, &str> = self
            .document
            .employees
            .iter()
            .map(|e| (&e.id, e.name.as_str()))
            .collect();

        self.document
            .skill_records
            .iter()
            .filter(|stored| employee.is_none_or(|id| &stored.employee_id == id))
            .filter_map(|stored| match names.get(&stored.employee_id) {
                Some(name) => Some(SkillRecord {
                    employee_ref: stored.employee_id.clone(),
                    employee_name: name.to_string(),
                    skills: stored.skills.clone(),
                }),
                None => {
                    tracing::warn!(
                        "Skipping skill record for unknown employee {}",
                        stored.employee_id
                    );
                    None
                }
            })
            .collect()
    }

    pub fn find_employee(&self, name: &str) -> Option<EmployeeRef> {
        self.document
            .employees
            .iter()
            .find(|e| e.name == name)
            .map(|e| e.id.clone())
    }
}

#[async_trait]
impl SkillRecordSource for JsonDataset {
    async fn fetch_records(&self, employee: Option<&EmployeeRef>) -> Result<Vec<SkillRecord>> {
        Ok(self.joined_records(employee))
    }
}

#[async_trait]
impl EmployeeDirectory for JsonDataset {
    async fn find_by_name(&self, name: &str) -> Result<Option<EmployeeRef>> {
        Ok(self.find_employee(name))
    }
}
