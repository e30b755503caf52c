//! Static mech data and the loaders that read it.
//!
//! The data directory holds JSON and TOML files:
//! - Part catalog (`parts.json`)
//! - Display-property schema per category (`categories.toml`)
//! - Action and tag descriptions (`actions.json`, `tags.json`)
//! - District buildings (`buildings.json`)
//! - Research unlocked on startup (`default_research.json`)
//! - Builder configuration (`config.toml`)
//!
//! Content is consumed by runtime oracles and ledgers; it never appears in a
//! saved template except as the property snapshots stamped at attach time.

pub mod loaders;

pub use loaders::{
    BuildingInfo, BuildingLoader, ConfigLoader, ContentFactory, DescriptionLoader, LoadResult,
    PartsLoader, ResearchDefaultsLoader, SchemaLoader,
};
