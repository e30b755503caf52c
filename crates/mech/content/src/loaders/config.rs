//! Builder configuration loader.

use std::path::Path;

use mech_core::MechConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for builder configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    ///
    /// Fields missing from the file keep their [`MechConfig::default`] values.
    pub fn load(path: &Path) -> LoadResult<MechConfig> {
        let content = read_file(path)?;
        let config: MechConfig = toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use mech_core::ResearchGate;

    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "research_gate = \"decorative\"").unwrap();

        let config = ConfigLoader::load(file.path()).unwrap();
        assert_eq!(config.research_gate, ResearchGate::Decorative);
        assert_eq!(config.starting_gold, MechConfig::DEFAULT_STARTING_GOLD);
    }

    #[test]
    fn unknown_gate_is_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "research_gate = \"sometimes\"").unwrap();
        assert!(ConfigLoader::load(file.path()).is_err());
    }
}
