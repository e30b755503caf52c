//! District building list loader.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// A building in the district directory.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildingInfo {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

impl BuildingInfo {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
        }
    }
}

/// Either a bare name or a `{name, description}` record.
#[derive(Deserialize)]
#[serde(untagged)]
enum BuildingEntry {
    Name(String),
    Info(BuildingInfo),
}

/// Loader for `buildings.json`.
pub struct BuildingLoader;

impl BuildingLoader {
    /// Buildings shown when no usable list is available.
    pub const FALLBACK: [&'static str; 5] = [
        "Design Bureau",
        "Mech Factory",
        "Research Lab",
        "Sales Office",
        "Operations Office",
    ];

    pub fn load(path: &Path) -> LoadResult<Vec<BuildingInfo>> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse buildings {}: {}", path.display(), e))
    }

    pub fn parse(content: &str) -> LoadResult<Vec<BuildingInfo>> {
        let entries: Vec<BuildingEntry> = serde_json::from_str(content)?;
        Ok(entries
            .into_iter()
            .map(|entry| match entry {
                BuildingEntry::Name(name) => BuildingInfo::new(name),
                BuildingEntry::Info(info) => info,
            })
            .filter(|info| !info.name.trim().is_empty())
            .collect())
    }

    pub fn fallback() -> Vec<BuildingInfo> {
        Self::FALLBACK.iter().copied().map(BuildingInfo::new).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_names_and_records() {
        let buildings = BuildingLoader::parse(
            r#"["Design Bureau", {"name": "Archive", "description": "Past research"}, ""]"#,
        )
        .unwrap();

        assert_eq!(buildings.len(), 2);
        assert_eq!(buildings[0], BuildingInfo::new("Design Bureau"));
        assert_eq!(buildings[1].description, "Past research");
    }

    #[test]
    fn fallback_lists_core_buildings() {
        let names: Vec<_> = BuildingLoader::fallback()
            .into_iter()
            .map(|b| b.name)
            .collect();
        assert_eq!(names[0], "Design Bureau");
        assert!(names.contains(&"Research Lab".to_string()));
    }
}
