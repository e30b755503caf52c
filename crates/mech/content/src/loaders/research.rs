//! Default research loader.

use std::path::Path;

use serde_json::Value;

use crate::loaders::{LoadResult, read_file, string_list};

/// Loader for `default_research.json`, the parts unlocked at every start.
pub struct ResearchDefaultsLoader;

impl ResearchDefaultsLoader {
    /// Unlocked when the defaults file is missing, malformed or empty.
    pub const FALLBACK: [&'static str; 8] = [
        "Exosuit-Frame",
        "Gun",
        "Siege-Mount",
        "Joint",
        "Connector",
        "Hand",
        "Foot",
        "Turret",
    ];

    pub fn load(path: &Path) -> LoadResult<Vec<String>> {
        let content = read_file(path)?;
        let items: Vec<Value> = serde_json::from_str(&content).map_err(|e| {
            anyhow::anyhow!("Failed to parse research defaults {}: {}", path.display(), e)
        })?;
        Ok(string_list(items))
    }

    pub fn fallback() -> Vec<String> {
        Self::FALLBACK.iter().map(|name| name.to_string()).collect()
    }
}
