//! Shared bootstrap utilities for client front-ends.
//!
//! Provides configuration loading, oracle assembly, and workshop setup that
//! can be reused by the console menus or any other front-end crate.
pub mod builder;
pub mod config;
pub mod oracles;

pub use builder::{RuntimeBuilder, RuntimeSetup};
pub use config::RuntimeConfig;
pub use oracles::{ContentOracleFactory, OracleFactory};

pub use mech_content::BuildingInfo;
