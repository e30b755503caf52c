//! The design session: one part tree plus everything needed to grow it.
//!
//! [`Workshop`] owns the tree being built, the static oracles, the template
//! repository and both ledgers. Front-ends drive it through plain method
//! calls; it performs no console I/O of its own.

use std::sync::Arc;

use mech_core::{
    AttachRequest, CompositionEngine, MechConfig, MechEnv, MechError, MechStats, PartId,
    PartOracle, PartTree, ResearchOracle, ScaleChooser, mech_stats,
};

use crate::error::{Result, RuntimeError};
use crate::ledger::{ResearchLedger, ResourceLedger};
use crate::oracle::OracleManager;
use crate::repository::{InMemoryTemplateRepo, TemplateRepository};

/// A single-user design session.
pub struct Workshop {
    config: MechConfig,
    oracles: OracleManager,
    tree: PartTree,
    templates: Arc<dyn TemplateRepository>,
    research: ResearchLedger,
    resources: ResourceLedger,
}

impl Workshop {
    /// Create a new workshop builder
    pub fn builder() -> WorkshopBuilder {
        WorkshopBuilder::new()
    }

    pub fn config(&self) -> &MechConfig {
        &self.config
    }

    pub fn oracles(&self) -> &OracleManager {
        &self.oracles
    }

    pub fn tree(&self) -> &PartTree {
        &self.tree
    }

    pub fn research(&self) -> &ResearchLedger {
        &self.research
    }

    pub fn research_mut(&mut self) -> &mut ResearchLedger {
        &mut self.research
    }

    pub fn resources(&self) -> &ResourceLedger {
        &self.resources
    }

    pub fn resources_mut(&mut self) -> &mut ResourceLedger {
        &mut self.resources
    }

    /// Environment for composition and stats, research gate applied.
    pub fn env(&self) -> MechEnv<'_> {
        mech_env(&self.config, &self.oracles, &self.research)
    }

    /// Attaches a part to the current tree.
    ///
    /// On failure the tree is unchanged and the rejection is logged.
    pub fn attach(
        &mut self,
        request: &AttachRequest,
        chooser: &mut dyn ScaleChooser,
    ) -> Result<PartId> {
        let env = mech_env(&self.config, &self.oracles, &self.research);
        CompositionEngine::new(&mut self.tree)
            .attach(&env, request, chooser)
            .map_err(|e| {
                tracing::warn!(
                    part = %request.name,
                    code = e.error_code(),
                    severity = e.severity().as_str(),
                    "Attach rejected: {}",
                    e
                );
                RuntimeError::from(e)
            })
    }

    /// See [`CompositionEngine::can_add`].
    pub fn can_add(&self, parent: Option<PartId>) -> bool {
        mech_core::can_add(&self.tree, &self.env(), parent)
    }

    /// Weight, capacity, scale and granted actions of the current tree.
    pub fn stats(&self) -> MechStats {
        mech_stats(&self.tree, &self.env())
    }

    /// Whether menus may offer `part_name` under the current research gate.
    pub fn is_available(&self, part_name: &str) -> bool {
        !self.config.research_gate.is_enforced() || self.research.is_researched(part_name)
    }

    /// Root-category parts that may start a template.
    pub fn root_parts(&self) -> Vec<String> {
        self.parts_in_category(MechConfig::ROOT_CATEGORY)
    }

    /// Categories offered under an existing part; the root category is excluded.
    pub fn child_categories(&self) -> Vec<String> {
        self.oracles
            .parts()
            .categories()
            .into_iter()
            .filter(|category| !MechConfig::is_root_category(category))
            .collect()
    }

    /// Available parts of `category` in catalog order.
    pub fn parts_in_category(&self, category: &str) -> Vec<String> {
        self.oracles
            .parts()
            .parts_in_category(category)
            .into_iter()
            .filter(|name| self.is_available(name))
            .collect()
    }

    /// Saves the current tree under `name`, replacing any previous template.
    pub fn save_template(&self, name: &str) -> Result<()> {
        self.templates.save(name, &self.tree)?;
        tracing::info!(template = name, parts = self.tree.len(), "Template saved");
        Ok(())
    }

    /// Replaces the current tree with the template saved under `name`.
    ///
    /// IDs assigned afterwards continue above the largest restored `PartID`.
    pub fn load_template(&mut self, name: &str) -> Result<()> {
        let tree = self
            .templates
            .load(name)?
            .ok_or_else(|| RuntimeError::TemplateNotFound {
                name: name.to_string(),
            })?;
        tracing::info!(
            template = name,
            parts = tree.len(),
            next_id = ?tree.next_part_id(),
            "Template loaded"
        );
        self.tree = tree;
        Ok(())
    }

    pub fn template_names(&self) -> Result<Vec<String>> {
        Ok(self.templates.list_names()?)
    }
}

fn mech_env<'a>(
    config: &MechConfig,
    oracles: &'a OracleManager,
    research: &'a ResearchLedger,
) -> MechEnv<'a> {
    let research = config
        .research_gate
        .is_enforced()
        .then_some(research as &dyn ResearchOracle);
    oracles.as_mech_env(research)
}

/// Builder for [`Workshop`]. Every component defaults to an empty, in-memory one.
pub struct WorkshopBuilder {
    config: MechConfig,
    oracles: OracleManager,
    tree: PartTree,
    templates: Option<Arc<dyn TemplateRepository>>,
    research: ResearchLedger,
    resources: Option<ResourceLedger>,
}

impl WorkshopBuilder {
    fn new() -> Self {
        Self {
            config: MechConfig::default(),
            oracles: OracleManager::default(),
            tree: PartTree::new(),
            templates: None,
            research: ResearchLedger::in_memory(),
            resources: None,
        }
    }

    /// Override builder configuration
    pub fn config(mut self, config: MechConfig) -> Self {
        self.config = config;
        self
    }

    pub fn oracles(mut self, oracles: OracleManager) -> Self {
        self.oracles = oracles;
        self
    }

    /// Start from an existing tree instead of an empty one.
    pub fn tree(mut self, tree: PartTree) -> Self {
        self.tree = tree;
        self
    }

    pub fn templates(mut self, templates: impl TemplateRepository + 'static) -> Self {
        self.templates = Some(Arc::new(templates));
        self
    }

    pub fn research(mut self, research: ResearchLedger) -> Self {
        self.research = research;
        self
    }

    pub fn resources(mut self, resources: ResourceLedger) -> Self {
        self.resources = Some(resources);
        self
    }

    pub fn build(self) -> Workshop {
        let resources = self
            .resources
            .unwrap_or_else(|| ResourceLedger::in_memory(self.config.starting_gold));
        let templates = self
            .templates
            .unwrap_or_else(|| Arc::new(InMemoryTemplateRepo::new()));
        tracing::debug!(
            parts = self.oracles.parts().len(),
            research_gate = %self.config.research_gate,
            "Workshop ready"
        );
        Workshop {
            config: self.config,
            oracles: self.oracles,
            tree: self.tree,
            templates,
            research: self.research,
            resources,
        }
    }
}
