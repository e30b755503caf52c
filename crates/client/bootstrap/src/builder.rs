//! Builds the workshop, oracles, and config bundle used by front-ends.
use std::sync::Arc;

use anyhow::{Context, Result};
use mech_content::{BuildingInfo, BuildingLoader, ContentFactory, ResearchDefaultsLoader};
use runtime::{FileTemplateRepository, ResearchLedger, ResourceLedger, Workshop};

use crate::config::RuntimeConfig;
use crate::oracles::{ContentOracleFactory, OracleFactory, or_default};

/// Builder that assembles the workshop and its collaborators for clients.
pub struct RuntimeBuilder {
    config: RuntimeConfig,
    oracle_factory: Option<Arc<dyn OracleFactory>>,
}

impl RuntimeBuilder {
    pub fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            oracle_factory: None,
        }
    }

    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Provide a custom oracle factory (defaults to the data directory).
    pub fn oracle_factory(mut self, factory: impl OracleFactory + 'static) -> Self {
        self.oracle_factory = Some(Arc::new(factory));
        self
    }

    /// Loads content, opens the ledgers and template store, and applies the
    /// default research set.
    pub fn build(self) -> Result<RuntimeSetup> {
        let content = ContentFactory::new(&self.config.data_dir);
        let oracles = match &self.oracle_factory {
            Some(factory) => factory.build(),
            None => ContentOracleFactory::from_config(&self.config).build(),
        };

        let mech_config = self
            .config
            .apply_overrides(or_default(content.load_config(), "configuration"));

        let templates = FileTemplateRepository::new(self.config.templates_dir())
            .with_context(|| {
                format!(
                    "Failed to create template directory {}",
                    self.config.templates_dir().display()
                )
            })?;

        let mut research = ResearchLedger::open(self.config.research_path());
        research.apply_defaults(non_empty_or(
            content.load_default_research(),
            "default research",
            ResearchDefaultsLoader::fallback,
        ));

        let resources =
            ResourceLedger::open(self.config.resources_path(), mech_config.starting_gold);

        let buildings = non_empty_or(
            content.load_buildings(),
            "building list",
            BuildingLoader::fallback,
        );

        tracing::info!(
            save_dir = %self.config.save_data_dir.display(),
            research_gate = %mech_config.research_gate,
            "Runtime assembled"
        );

        let workshop = Workshop::builder()
            .config(mech_config)
            .oracles(oracles)
            .templates(templates)
            .research(research)
            .resources(resources)
            .build();

        Ok(RuntimeSetup {
            config: self.config,
            workshop,
            buildings,
        })
    }
}

impl Default for RuntimeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub struct RuntimeSetup {
    pub config: RuntimeConfig,
    pub workshop: Workshop,
    pub buildings: Vec<BuildingInfo>,
}

/// Loaded list, or `fallback()` when loading fails or yields nothing.
fn non_empty_or<T>(
    result: mech_content::LoadResult<Vec<T>>,
    what: &str,
    fallback: impl FnOnce() -> Vec<T>,
) -> Vec<T> {
    match result {
        Ok(items) if !items.is_empty() => items,
        Ok(_) => {
            tracing::warn!("Empty {what}; using built-in list");
            fallback()
        }
        Err(e) => {
            tracing::warn!("Using built-in {what}: {e:#}");
            fallback()
        }
    }
}
