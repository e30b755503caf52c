//! Helpers for constructing oracle managers consumed by the workshop.
use std::path::{Path, PathBuf};
use std::sync::Arc;

use mech_content::{ContentFactory, LoadResult};
use runtime::{ActionOracleImpl, OracleManager, PartOracleImpl, TagOracleImpl};

use crate::config::RuntimeConfig;

pub trait OracleFactory: Send + Sync {
    fn build(&self) -> OracleManager;
}

/// Oracle factory that loads mech content from data files.
///
/// Every file is optional: a missing or malformed file is logged and the
/// matching oracle starts empty, so the builder always has a usable (possibly
/// empty) catalog.
#[derive(Clone, Debug)]
pub struct ContentOracleFactory {
    data_dir: PathBuf,
}

impl ContentOracleFactory {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn from_config(config: &RuntimeConfig) -> Self {
        Self::new(config.data_dir.clone())
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

impl OracleFactory for ContentOracleFactory {
    fn build(&self) -> OracleManager {
        if !self.data_dir.exists() {
            tracing::warn!(
                "Content data directory not found: {} (set MECH_DATA_DIR to override)",
                self.data_dir.display()
            );
        }

        let factory = ContentFactory::new(&self.data_dir);

        let definitions = or_default(factory.load_parts(), "part catalog");
        let schema = or_default(factory.load_schema(), "display schema");
        let actions = or_default(factory.load_actions(), "action descriptions");
        let tags = or_default(factory.load_tags(), "tag descriptions");

        let parts = PartOracleImpl::from_definitions(definitions).with_schema(schema);
        tracing::info!(
            parts = parts.len(),
            actions = actions.len(),
            tags = tags.len(),
            "Content loaded from {}",
            self.data_dir.display()
        );

        OracleManager::new(
            Arc::new(parts),
            Arc::new(ActionOracleImpl::from_entries(actions)),
            Arc::new(TagOracleImpl::from_entries(tags)),
        )
    }
}

/// Unwraps a load result, degrading to `T::default()` with a warning.
pub(crate) fn or_default<T: Default>(result: LoadResult<T>, what: &str) -> T {
    result.unwrap_or_else(|e| {
        tracing::warn!("Using empty {what}: {e:#}");
        T::default()
    })
}

#[cfg(test)]
mod tests {
    use mech_core::PartOracle;

    use super::*;

    #[test]
    fn missing_directory_yields_empty_oracles() {
        let dir = tempfile::tempdir().unwrap();
        let oracles = ContentOracleFactory::new(dir.path().join("nope")).build();
        assert!(oracles.parts().is_empty());
        assert!(oracles.actions().is_empty());
    }

    #[test]
    fn malformed_catalog_degrades_to_empty() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("parts.json"), "not json").unwrap();
        std::fs::write(
            dir.path().join("actions.json"),
            r#"[{"name": "Grab", "description": "Hold"}]"#,
        )
        .unwrap();

        let oracles = ContentOracleFactory::new(dir.path()).build();
        assert!(oracles.parts().part_names().is_empty());
        assert_eq!(oracles.actions().len(), 1);
    }
}
