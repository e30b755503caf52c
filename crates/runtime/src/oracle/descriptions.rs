//! Description oracles for actions and tags.
use std::collections::HashMap;

use mech_core::{ActionOracle, TagOracle};

/// Action name → description, exact match.
#[derive(Clone, Debug, Default)]
pub struct ActionOracleImpl {
    descriptions: HashMap<String, String>,
}

impl ActionOracleImpl {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries(entries: impl IntoIterator<Item = (String, String)>) -> Self {
        Self {
            descriptions: entries.into_iter().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.descriptions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptions.is_empty()
    }
}

impl ActionOracle for ActionOracleImpl {
    fn description(&self, action: &str) -> Option<&str> {
        self.descriptions.get(action).map(String::as_str)
    }
}

/// Tag base name → description, case-insensitive.
#[derive(Clone, Debug, Default)]
pub struct TagOracleImpl {
    descriptions: HashMap<String, String>,
}

impl TagOracleImpl {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries(entries: impl IntoIterator<Item = (String, String)>) -> Self {
        Self {
            descriptions: entries
                .into_iter()
                .map(|(name, description)| (name.to_lowercase(), description))
                .collect(),
        }
    }
}

impl TagOracle for TagOracleImpl {
    fn base_description(&self, base_name: &str) -> Option<&str> {
        self.descriptions
            .get(&base_name.to_lowercase())
            .map(String::as_str)
    }
}
