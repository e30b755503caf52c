//! Content factory for reading the whole data directory.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use mech_core::{MechConfig, PartDefinition};

use crate::loaders::{
    BuildingInfo, BuildingLoader, ConfigLoader, DescriptionLoader, LoadResult, PartsLoader,
    ResearchDefaultsLoader, SchemaLoader,
};

/// Content factory that loads all mech content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// ├── parts.json
/// ├── categories.toml
/// ├── actions.json
/// ├── tags.json
/// ├── buildings.json
/// └── default_research.json
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    pub const CONFIG_FILE: &'static str = "config.toml";
    pub const PARTS_FILE: &'static str = "parts.json";
    pub const SCHEMA_FILE: &'static str = "categories.toml";
    pub const ACTIONS_FILE: &'static str = "actions.json";
    pub const TAGS_FILE: &'static str = "tags.json";
    pub const BUILDINGS_FILE: &'static str = "buildings.json";
    pub const RESEARCH_FILE: &'static str = "default_research.json";

    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn load_config(&self) -> LoadResult<MechConfig> {
        ConfigLoader::load(&self.path(Self::CONFIG_FILE))
    }

    pub fn load_parts(&self) -> LoadResult<Vec<PartDefinition>> {
        PartsLoader::load(&self.path(Self::PARTS_FILE))
    }

    pub fn load_schema(&self) -> LoadResult<BTreeMap<String, Vec<String>>> {
        SchemaLoader::load(&self.path(Self::SCHEMA_FILE))
    }

    pub fn load_actions(&self) -> LoadResult<Vec<(String, String)>> {
        DescriptionLoader::load(&self.path(Self::ACTIONS_FILE))
    }

    pub fn load_tags(&self) -> LoadResult<Vec<(String, String)>> {
        DescriptionLoader::load(&self.path(Self::TAGS_FILE))
    }

    pub fn load_buildings(&self) -> LoadResult<Vec<BuildingInfo>> {
        BuildingLoader::load(&self.path(Self::BUILDINGS_FILE))
    }

    pub fn load_default_research(&self) -> LoadResult<Vec<String>> {
        ResearchDefaultsLoader::load(&self.path(Self::RESEARCH_FILE))
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    fn path(&self, file: &str) -> PathBuf {
        self.data_dir.join(file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shipped_data() -> ContentFactory {
        ContentFactory::new(Path::new(env!("CARGO_MANIFEST_DIR")).join("data"))
    }

    #[test]
    fn test_factory_paths() {
        let factory = ContentFactory::new("/tmp/data");
        assert_eq!(factory.data_dir(), Path::new("/tmp/data"));
    }

    #[test]
    fn shipped_data_directory_loads() {
        let factory = shipped_data();

        let parts = factory.load_parts().unwrap();
        let frame = parts
            .iter()
            .find(|part| part.name() == "Exosuit-Frame")
            .unwrap();
        assert!(frame.is_root_category());
        assert_eq!(frame.weight_limit(), Some(2000));

        assert!(factory.load_config().is_ok());
        assert!(factory.load_schema().unwrap().contains_key("Frame"));
        assert!(!factory.load_actions().unwrap().is_empty());
        assert!(!factory.load_tags().unwrap().is_empty());
        assert!(
            factory
                .load_buildings()
                .unwrap()
                .iter()
                .any(|b| b.name == "Archive")
        );

        // Every default unlock names a catalog part
        for name in factory.load_default_research().unwrap() {
            assert!(
                parts.iter().any(|p| p.name().eq_ignore_ascii_case(&name)),
                "{name} missing from catalog"
            );
        }
    }

    #[test]
    fn missing_directory_fails_each_loader() {
        let dir = tempfile::tempdir().unwrap();
        let factory = ContentFactory::new(dir.path());
        assert!(factory.load_parts().is_err());
        assert!(factory.load_buildings().is_err());
        assert!(factory.load_config().is_err());
    }
}
