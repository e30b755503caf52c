//! Composition rules for hierarchical mech templates.
//!
//! `mech-core` defines scale resolution, the part catalog contract, the part
//! tree and the validated attach pipeline. It performs no file or console I/O:
//! static data is reached through the oracle traits in [`env`], and new parts
//! only enter a [`PartTree`] through [`engine::CompositionEngine`].
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod scale;
pub mod state;
pub mod stats;
pub use config::{MechConfig, ResearchGate};
pub use engine::{AttachError, AttachRequest, CompositionEngine, can_add};
pub use env::{
    ActionOracle, MechEnv, PartDefinition, PartOracle, ResearchOracle, TagOracle,
    default_display_properties, tag_base_name, tag_numeric_value,
};
pub use error::{ErrorSeverity, MechError};
pub use scale::{NoScaleChoice, ScaleChooser, ScaleLevel, choose_scale, level_of};
pub use state::{PartId, PartInstance, PartTree};
pub use stats::{GrantedAction, MechStats, mech_stats, total_weight, weight_limit};
