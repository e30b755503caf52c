//! Display-property schema loader.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

use crate::loaders::{LoadResult, read_file};

/// Shape of `categories.toml`.
///
/// ```toml
/// [categories]
/// Frame = ["Scale", "MinScale", "MaxScale", "WeightLimit"]
/// Weapon = ["Scale", "MinScale", "MaxScale", "Description"]
/// ```
#[derive(Debug, Default, Deserialize)]
struct SchemaFile {
    #[serde(default)]
    categories: BTreeMap<String, Vec<String>>,
}

/// Loader for the per-category display-property schema.
pub struct SchemaLoader;

impl SchemaLoader {
    /// Returns category → property names, category names as written.
    pub fn load(path: &Path) -> LoadResult<BTreeMap<String, Vec<String>>> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse schema TOML {}: {}", path.display(), e))
    }

    pub fn parse(content: &str) -> LoadResult<BTreeMap<String, Vec<String>>> {
        let file: SchemaFile = toml::from_str(content)?;
        Ok(file.categories)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_category_table() {
        let schema = SchemaLoader::parse(
            r#"
            [categories]
            Frame = ["Scale", "WeightLimit"]
            Weapon = ["Scale", "MinScale", "MaxScale"]
            "#,
        )
        .unwrap();

        assert_eq!(schema["Frame"], vec!["Scale", "WeightLimit"]);
        assert_eq!(schema.len(), 2);
    }

    #[test]
    fn empty_file_means_no_overrides() {
        assert!(SchemaLoader::parse("").unwrap().is_empty());
    }
}
