use crate::adapters::dataset::JsonDataset;
use crate::adapters::http::HttpDataset;
use crate::adapters::storage::LocalStorage;
use crate::config::settings::ReportSettings;
use crate::config::toml_config::TomlConfig;
use crate::core::bundle::bundle;
use crate::core::query::ReportQuery;
use crate::core::report::ReportEngine;
use crate::domain::model::{ReportFormat, ReportOutput};
use crate::domain::ports::{EmployeeDirectory, SkillRecordSource, Storage};
use crate::utils::error::{ReportError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    File(String),
    Url(String),
}

impl DataSource {
    /// Command line wins over the config file.
    pub fn resolve(
        dataset: Option<&str>,
        source_url: Option<&str>,
        file_config: &TomlConfig,
    ) -> Result<Self> {
        if let Some(path) = dataset {
            return Ok(DataSource::File(path.to_string()));
        }
        if let Some(url) = source_url {
            return Ok(DataSource::Url(url.to_string()));
        }

        match (&file_config.source.dataset, &file_config.source.url) {
            (Some(path), _) => Ok(DataSource::File(path.clone())),
            (None, Some(url)) => Ok(DataSource::Url(url.clone())),
            (None, None) => Err(ReportError::MissingConfigError {
                field: "dataset or source_url".to_string(),
            }),
        }
    }
}

/// One report run: fetch, render every requested format, write the files.
#[derive(Debug, Clone)]
pub struct ReportJob {
    pub source: DataSource,
    pub query: ReportQuery,
    pub formats: Vec<ReportFormat>,
    pub bundle: bool,
    pub settings: ReportSettings,
}

impl ReportJob {
    /// Returns the written file names, relative to the storage root.
    pub async fn run<S: Storage>(&self, storage: &S) -> Result<Vec<String>> {
        let outputs = match &self.source {
            DataSource::File(path) => {
                tracing::info!("📁 Loading dataset from: {}", path);
                let dataset = JsonDataset::load(&LocalStorage::new(String::new()), path).await?;
                self.render(dataset.clone(), dataset).await?
            }
            DataSource::Url(url) => {
                tracing::info!("📡 Fetching dataset from: {}", url);
                let dataset = HttpDataset::new(url.clone());
                self.render(dataset.clone(), dataset).await?
            }
        };

        let mut written = Vec::with_capacity(outputs.len() + 1);
        if let Err(e) = self.write_outputs(storage, &outputs, &mut written).await {
            // 任何一個檔案寫入失敗，就移除已寫出的檔案，不留下部分結果
            tracing::error!("Writing reports failed: {}", e);
            rollback(storage, &written).await;
            return Err(e);
        }

        Ok(written)
    }

    async fn write_outputs<S: Storage>(
        &self,
        storage: &S,
        outputs: &[ReportOutput],
        written: &mut Vec<String>,
    ) -> Result<()> {
        let archive = if self.bundle {
            Some(bundle(outputs)?)
        } else {
            None
        };

        for output in outputs {
            storage.write_file(&output.filename, &output.body).await?;
            tracing::debug!("Wrote {} ({} bytes)", output.filename, output.body.len());
            written.push(output.filename.clone());
        }

        if let Some(archive) = archive {
            let filename = self.settings.filename("zip");
            storage.write_file(&filename, &archive).await?;
            written.push(filename);
        }

        Ok(())
    }

    async fn render<R, D>(&self, records: R, directory: D) -> Result<Vec<ReportOutput>>
    where
        R: SkillRecordSource,
        D: EmployeeDirectory,
    {
        let engine = ReportEngine::with_settings(records, directory, self.settings.clone());
        engine.generate_all(&self.query, &self.formats).await
    }
}

async fn rollback<S: Storage>(storage: &S, written: &[String]) {
    for filename in written {
        match storage.remove_file(filename).await {
            Ok(()) => tracing::debug!("Removed partial output {}", filename),
            Err(e) => tracing::warn!("Could not remove partial output {}: {}", filename, e),
        }
    }
}
