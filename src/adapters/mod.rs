// Adapters layer: concrete implementations for external systems (storage, datasets, http).

pub mod dataset;
pub mod http;
pub mod storage;
