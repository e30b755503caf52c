//! Part catalog loader.

use std::path::Path;

use mech_core::PartDefinition;
use serde_json::Value;

use crate::loaders::{LoadResult, read_file};

/// Loader for the part catalog (`parts.json`).
///
/// The file is an ordered JSON array of records. Records that are not objects
/// or have no `name` are skipped with a warning; catalog order is preserved.
pub struct PartsLoader;

impl PartsLoader {
    pub fn load(path: &Path) -> LoadResult<Vec<PartDefinition>> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse part catalog {}: {}", path.display(), e))
    }

    pub fn parse(content: &str) -> LoadResult<Vec<PartDefinition>> {
        let records: Vec<Value> = serde_json::from_str(content)?;
        let mut parts = Vec::with_capacity(records.len());
        for (position, record) in records.into_iter().enumerate() {
            let definition = match record {
                Value::Object(fields) => PartDefinition::from_record(fields),
                _ => None,
            };
            match definition {
                Some(definition) => parts.push(definition),
                None => tracing::warn!("Skipping catalog record {position}: missing name"),
            }
        }
        Ok(parts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_order_and_skips_nameless_records() {
        let parts = PartsLoader::parse(
            r#"[
                {"name": "Exosuit-Frame", "type": "Frame", "WeightLimit": 2000},
                {"type": "Weapon"},
                "not a record",
                {"name": "Gun", "type": "Weapon", "MinScale": 1, "MaxScale": 2}
            ]"#,
        )
        .unwrap();

        let names: Vec<_> = parts.iter().map(PartDefinition::name).collect();
        assert_eq!(names, vec!["Exosuit-Frame", "Gun"]);
        assert_eq!(parts[1].max_scale_level(), 2);
    }

    #[test]
    fn rejects_non_array_documents() {
        assert!(PartsLoader::parse(r#"{"name": "Gun"}"#).is_err());
    }

    #[test]
    fn missing_file_is_an_error_with_path() {
        let err = PartsLoader::load(Path::new("/nonexistent/parts.json")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/parts.json"));
    }
}
