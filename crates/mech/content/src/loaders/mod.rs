//! Content loaders for reading mech data from files.
//!
//! Loaders are strict: a missing or malformed file is an error carrying the
//! file path. Callers that must degrade to empty data (the bootstrap layer)
//! decide how to recover.

pub mod buildings;
pub mod config;
pub mod descriptions;
pub mod factory;
pub mod parts;
pub mod research;
pub mod schema;

pub use buildings::{BuildingInfo, BuildingLoader};
pub use config::ConfigLoader;
pub use descriptions::DescriptionLoader;
pub use factory::ContentFactory;
pub use parts::PartsLoader;
pub use research::ResearchDefaultsLoader;
pub use schema::SchemaLoader;

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}

/// Collects the non-blank strings of a JSON array.
pub(crate) fn string_list(items: Vec<serde_json::Value>) -> Vec<String> {
    items
        .into_iter()
        .filter_map(|item| match item {
            serde_json::Value::String(text) => Some(text),
            serde_json::Value::Number(number) => Some(number.to_string()),
            _ => None,
        })
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
        .collect()
}
