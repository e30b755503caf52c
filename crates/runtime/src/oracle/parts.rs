//! [`mech_core::PartOracle`] backed by the loaded catalog.
use std::collections::{BTreeMap, HashMap};

use mech_core::{PartDefinition, PartOracle, default_display_properties};

/// Part catalog indexed by lowercase name.
///
/// Keeps catalog order for listings. When two records share a name the first
/// one wins.
#[derive(Clone, Debug, Default)]
pub struct PartOracleImpl {
    definitions: Vec<PartDefinition>,
    by_name: HashMap<String, usize>,
    /// Lowercase category → display properties.
    schema: HashMap<String, Vec<String>>,
}

impl PartOracleImpl {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_definitions(definitions: impl IntoIterator<Item = PartDefinition>) -> Self {
        let mut oracle = Self::new();
        for definition in definitions {
            oracle.add_definition(definition);
        }
        oracle
    }

    /// Add a part definition
    pub fn add_definition(&mut self, definition: PartDefinition) {
        let key = definition.name().to_lowercase();
        if self.by_name.contains_key(&key) {
            tracing::warn!("Duplicate part '{}' in catalog ignored", definition.name());
            return;
        }
        self.by_name.insert(key, self.definitions.len());
        self.definitions.push(definition);
    }

    /// Replaces the display-property schema.
    #[must_use]
    pub fn with_schema(mut self, schema: BTreeMap<String, Vec<String>>) -> Self {
        self.schema = schema
            .into_iter()
            .map(|(category, properties)| (category.to_lowercase(), properties))
            .collect();
        self
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    pub fn definitions(&self) -> &[PartDefinition] {
        &self.definitions
    }
}

impl PartOracle for PartOracleImpl {
    fn definition(&self, name: &str) -> Option<&PartDefinition> {
        let index = *self.by_name.get(&name.to_lowercase())?;
        self.definitions.get(index)
    }

    fn part_names(&self) -> Vec<String> {
        self.definitions
            .iter()
            .map(|def| def.name().to_string())
            .collect()
    }

    fn parts_in_category(&self, category: &str) -> Vec<String> {
        self.definitions
            .iter()
            .filter(|def| def.category().eq_ignore_ascii_case(category))
            .map(|def| def.name().to_string())
            .collect()
    }

    fn categories(&self) -> Vec<String> {
        let mut categories: Vec<String> = Vec::new();
        for def in &self.definitions {
            let category = def.category();
            let seen = categories
                .iter()
                .any(|known| known.eq_ignore_ascii_case(category));
            if !category.is_empty() && !seen {
                categories.push(category.to_string());
            }
        }
        categories
    }

    fn display_properties(&self, category: &str) -> Vec<String> {
        self.schema
            .get(&category.to_lowercase())
            .cloned()
            .unwrap_or_else(|| default_display_properties(category))
    }
}
