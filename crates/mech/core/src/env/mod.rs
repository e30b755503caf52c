//! Traits describing read-only mech data.
//!
//! Oracles expose the part catalog, action and tag descriptions, and the set
//! of researched parts. The [`MechEnv`] aggregate bundles them so the engine
//! and stat aggregation can reach everything they need without coupling to
//! concrete implementations.
mod descriptions;
mod parts;
mod research;

pub use descriptions::{ActionOracle, TagOracle, tag_base_name, tag_numeric_value};
pub use parts::{PartDefinition, PartOracle, default_display_properties, keys};
pub use research::ResearchOracle;

/// Aggregates the read-only oracles required by composition and stats.
///
/// The part catalog is mandatory; descriptions and research are optional.
/// Without a research oracle the research gate is not applied.
#[derive(Clone, Copy)]
pub struct MechEnv<'a> {
    parts: &'a dyn PartOracle,
    actions: Option<&'a dyn ActionOracle>,
    research: Option<&'a dyn ResearchOracle>,
}

impl<'a> MechEnv<'a> {
    pub fn new(parts: &'a dyn PartOracle) -> Self {
        Self {
            parts,
            actions: None,
            research: None,
        }
    }

    #[must_use]
    pub fn with_actions(mut self, actions: &'a dyn ActionOracle) -> Self {
        self.actions = Some(actions);
        self
    }

    #[must_use]
    pub fn with_research(mut self, research: &'a dyn ResearchOracle) -> Self {
        self.research = Some(research);
        self
    }

    pub fn parts(&self) -> &'a dyn PartOracle {
        self.parts
    }

    pub fn actions(&self) -> Option<&'a dyn ActionOracle> {
        self.actions
    }

    pub fn research(&self) -> Option<&'a dyn ResearchOracle> {
        self.research
    }
}

impl core::fmt::Debug for MechEnv<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("MechEnv")
            .field("parts", &self.parts.part_names().len())
            .field("actions", &self.actions.is_some())
            .field("research", &self.research.is_some())
            .finish()
    }
}
