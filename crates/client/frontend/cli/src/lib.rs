//! Console front-end for the mech template builder.
//!
//! Numbered text menus over any `BufRead`/`Write` pair:
//! - District directory listing the buildings
//! - Design bureau navigator for growing the part tree
//! - Research lab and archive for the research ledger
//!
//! All composition rules live in the workshop; this crate only prompts,
//! renders, and forwards choices.

mod app;
mod config;
mod console;
pub mod logging;
mod screens;

pub use app::CliFrontend;
pub use config::{CliConfig, KeyConfig};
pub use console::{Console, Selection};
