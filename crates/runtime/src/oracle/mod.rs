//! Runtime wrappers around static mech content.
//!
//! These implementations expose `mech-core` oracle traits and bundle them into
//! an [`OracleManager`] so the workshop can build [`mech_core::MechEnv`]
//! snapshots on demand. The data is immutable at runtime; the part tree and
//! ledgers hold everything that changes.
mod descriptions;
mod parts;

use std::sync::Arc;

use mech_core::{MechEnv, ResearchOracle};

pub use descriptions::{ActionOracleImpl, TagOracleImpl};
pub use parts::PartOracleImpl;

/// Manages all oracle implementations and provides unified access
#[derive(Clone, Debug, Default)]
pub struct OracleManager {
    pub(crate) parts: Arc<PartOracleImpl>,
    pub(crate) actions: Arc<ActionOracleImpl>,
    pub(crate) tags: Arc<TagOracleImpl>,
}

impl OracleManager {
    pub fn new(
        parts: Arc<PartOracleImpl>,
        actions: Arc<ActionOracleImpl>,
        tags: Arc<TagOracleImpl>,
    ) -> Self {
        Self {
            parts,
            actions,
            tags,
        }
    }

    /// Oracles over a catalog alone, without descriptions.
    pub fn from_parts(parts: PartOracleImpl) -> Self {
        Self {
            parts: Arc::new(parts),
            ..Self::default()
        }
    }

    /// Builds the environment for composition and stats.
    ///
    /// `research` is attached only when the research gate is enforced.
    pub fn as_mech_env<'a>(&'a self, research: Option<&'a dyn ResearchOracle>) -> MechEnv<'a> {
        let env = MechEnv::new(self.parts.as_ref()).with_actions(self.actions.as_ref());
        match research {
            Some(research) => env.with_research(research),
            None => env,
        }
    }

    pub fn parts(&self) -> &PartOracleImpl {
        &self.parts
    }

    pub fn actions(&self) -> &ActionOracleImpl {
        &self.actions
    }

    pub fn tags(&self) -> &TagOracleImpl {
        &self.tags
    }
}
