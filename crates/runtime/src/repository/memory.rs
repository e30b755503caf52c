//! In-memory TemplateRepository implementation for tests and local runs.

use std::collections::BTreeMap;
use std::sync::RwLock;

use mech_core::PartTree;

use super::{RepositoryError, Result, TemplateRepository, normalize_name};

/// In-memory implementation of TemplateRepository.
pub struct InMemoryTemplateRepo {
    templates: RwLock<BTreeMap<String, PartTree>>,
}

impl InMemoryTemplateRepo {
    /// Create a new empty in-memory repository.
    pub fn new() -> Self {
        Self {
            templates: RwLock::new(BTreeMap::new()),
        }
    }

    fn key(name: &str) -> Result<String> {
        normalize_name(name)
            .map(str::to_string)
            .ok_or_else(|| RepositoryError::InvalidName(name.to_string()))
    }
}

impl Default for InMemoryTemplateRepo {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateRepository for InMemoryTemplateRepo {
    fn save(&self, name: &str, tree: &PartTree) -> Result<()> {
        let key = Self::key(name)?;
        let mut templates = self
            .templates
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        templates.insert(key, tree.clone());
        Ok(())
    }

    fn load(&self, name: &str) -> Result<Option<PartTree>> {
        let key = Self::key(name)?;
        let templates = self
            .templates
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(templates.get(&key).cloned())
    }

    fn exists(&self, name: &str) -> bool {
        let Ok(key) = Self::key(name) else {
            return false;
        };
        self.templates
            .read()
            .map(|templates| templates.contains_key(&key))
            .unwrap_or(false)
    }

    fn delete(&self, name: &str) -> Result<()> {
        let key = Self::key(name)?;
        let mut templates = self
            .templates
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        templates.remove(&key);
        Ok(())
    }

    fn list_names(&self) -> Result<Vec<String>> {
        let templates = self
            .templates
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(templates.keys().cloned().collect())
    }
}
