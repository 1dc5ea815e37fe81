pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{dataset::JsonDataset, http::HttpDataset, storage::LocalStorage};
pub use app::job::{DataSource, ReportJob};
pub use config::settings::ReportSettings;
pub use crate::core::{query::ReportQuery, report::ReportEngine};
pub use domain::model::{FilterCriteria, ReportFormat, ReportOutput};
pub use utils::error::{ReportError, Result};
