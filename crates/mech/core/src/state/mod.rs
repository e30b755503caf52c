//! Authoritative template state.
//!
//! [`PartTree`] owns every placed [`PartInstance`]. Callers read it freely but
//! mutate it exclusively through [`crate::engine::CompositionEngine`].
mod instance;
mod tree;

pub use instance::{PartId, PartInstance};
pub use tree::PartTree;
