//! Action and tag description loader.

use std::path::Path;

use serde::Deserialize;

use crate::loaders::{LoadResult, read_file};

#[derive(Debug, Deserialize)]
struct DescriptionRecord {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    description: Option<String>,
}

/// Loader for `[{ "name": ..., "description": ... }]` files.
///
/// Used for both `actions.json` and `tags.json`. Entries with a blank name are
/// dropped; a missing description becomes an empty string.
pub struct DescriptionLoader;

impl DescriptionLoader {
    pub fn load(path: &Path) -> LoadResult<Vec<(String, String)>> {
        let content = read_file(path)?;
        Self::parse(&content).map_err(|e| {
            anyhow::anyhow!("Failed to parse descriptions {}: {}", path.display(), e)
        })
    }

    pub fn parse(content: &str) -> LoadResult<Vec<(String, String)>> {
        let records: Vec<DescriptionRecord> = serde_json::from_str(content)?;
        Ok(records
            .into_iter()
            .filter_map(|record| {
                let name = record.name?.trim().to_string();
                (!name.is_empty()).then(|| (name, record.description.unwrap_or_default()))
            })
            .collect())
    }
}
