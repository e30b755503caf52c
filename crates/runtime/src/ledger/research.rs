//! Set of researched (unlocked) part names.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use mech_core::{PartOracle, ResearchOracle};

use super::write_json;

/// Case-insensitive set of unlocked part names.
///
/// Persisted as a JSON array of names. Listings are sorted case-insensitively
/// and keep the spelling first recorded.
#[derive(Clone, Debug, Default)]
pub struct ResearchLedger {
    path: Option<PathBuf>,
    /// Lowercase name → name as recorded.
    unlocked: BTreeMap<String, String>,
}

impl ResearchLedger {
    /// Ledger that is never written to disk.
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Opens the ledger stored at `path`; starts empty when the file is
    /// missing or malformed.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let unlocked = read_names(&path)
            .into_iter()
            .map(|name| (name.to_lowercase(), name))
            .collect();
        Self {
            path: Some(path),
            unlocked,
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn is_researched(&self, part_name: &str) -> bool {
        self.unlocked.contains_key(&part_name.trim().to_lowercase())
    }

    /// Unlocks `part_name`. Returns `false` when it was already unlocked or blank.
    pub fn research(&mut self, part_name: &str) -> bool {
        let name = part_name.trim();
        if name.is_empty() || self.is_researched(name) {
            return false;
        }
        self.unlocked.insert(name.to_lowercase(), name.to_string());
        tracing::info!(part = name, "Part researched");
        self.persist();
        true
    }

    /// Locks `part_name` again. Returns `false` when it was not unlocked.
    pub fn unresearch(&mut self, part_name: &str) -> bool {
        let removed = self
            .unlocked
            .remove(&part_name.trim().to_lowercase())
            .is_some();
        if removed {
            tracing::info!(part = part_name.trim(), "Part research revoked");
            self.persist();
        }
        removed
    }

    /// Unlocked names, sorted.
    pub fn researched(&self) -> Vec<String> {
        self.unlocked.values().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.unlocked.len()
    }

    pub fn is_empty(&self) -> bool {
        self.unlocked.is_empty()
    }

    /// Catalog parts not yet unlocked, sorted.
    pub fn unresearched(&self, parts: &dyn PartOracle) -> Vec<String> {
        self.locked(parts.part_names())
    }

    /// Parts of `category` not yet unlocked, sorted.
    pub fn unresearched_in_category(&self, parts: &dyn PartOracle, category: &str) -> Vec<String> {
        self.locked(parts.parts_in_category(category))
    }

    /// Replaces the whole set with `defaults` and persists it.
    ///
    /// Called once at startup; research does not carry across restarts.
    pub fn apply_defaults<I, S>(&mut self, defaults: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.unlocked.clear();
        for name in defaults {
            let name = name.as_ref().trim();
            if !name.is_empty() {
                self.unlocked
                    .entry(name.to_lowercase())
                    .or_insert_with(|| name.to_string());
            }
        }
        tracing::debug!(count = self.unlocked.len(), "Applied default research");
        self.persist();
    }

    fn locked(&self, names: Vec<String>) -> Vec<String> {
        let mut locked: Vec<String> = names
            .into_iter()
            .filter(|name| !self.is_researched(name))
            .collect();
        locked.sort_by_key(|name| name.to_lowercase());
        locked
    }

    fn persist(&self) {
        let Some(path) = &self.path else {
            return;
        };
        let names = self.researched();
        if let Err(e) = write_json(path, &names) {
            tracing::warn!("Failed to save research ledger {}: {}", path.display(), e);
        }
    }
}

impl ResearchOracle for ResearchLedger {
    fn is_researched(&self, part_name: &str) -> bool {
        ResearchLedger::is_researched(self, part_name)
    }
}

fn read_names(path: &Path) -> Vec<String> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Vec::new(),
        Err(e) => {
            tracing::warn!("Failed to read research ledger {}: {}", path.display(), e);
            return Vec::new();
        }
    };
    match serde_json::from_str::<Vec<serde_json::Value>>(&content) {
        Ok(items) => items
            .into_iter()
            .filter_map(|item| item.as_str().map(|s| s.trim().to_string()))
            .filter(|name| !name.is_empty())
            .collect(),
        Err(e) => {
            tracing::warn!("Malformed research ledger {}: {}", path.display(), e);
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mech_core::PartDefinition;

    use crate::oracle::PartOracleImpl;

    #[test]
    fn names_are_case_insensitive_and_unique() {
        let mut ledger = ResearchLedger::in_memory();
        assert!(ledger.research("Gun"));
        assert!(!ledger.research("GUN"));
        assert!(!ledger.research("  "));
        assert!(ledger.is_researched("gun"));
        assert_eq!(ledger.researched(), vec!["Gun"]);

        assert!(ledger.unresearch("gUN"));
        assert!(!ledger.unresearch("Gun"));
        assert!(ledger.is_empty());
    }

    #[test]
    fn persists_and_reopens() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("research.json");

        let mut ledger = ResearchLedger::open(&path);
        ledger.research("Turret");
        ledger.research("Hand");

        let reopened = ResearchLedger::open(&path);
        assert_eq!(reopened.researched(), vec!["Hand", "Turret"]);
    }

    #[test]
    fn malformed_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("research.json");
        fs::write(&path, "{\"oops\": true}").unwrap();

        assert!(ResearchLedger::open(&path).is_empty());
    }

    #[test]
    fn defaults_replace_previous_research() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("research.json");
        let mut ledger = ResearchLedger::open(&path);
        ledger.research("Core");

        ledger.apply_defaults(["Exosuit-Frame", "Gun", "gun"]);

        assert_eq!(ledger.researched(), vec!["Exosuit-Frame", "Gun"]);
        assert!(!ledger.is_researched("Core"));
        assert_eq!(ResearchLedger::open(&path).len(), 2);
    }

    #[test]
    fn lists_locked_parts_sorted() {
        let parts = PartOracleImpl::from_definitions([
            PartDefinition::new("Turret", "Weapon"),
            PartDefinition::new("Gun", "Weapon"),
            PartDefinition::new("Core", "Extremity"),
            PartDefinition::new("Hand", "Extremity"),
        ]);
        let mut ledger = ResearchLedger::in_memory();
        ledger.research("Hand");

        assert_eq!(ledger.unresearched(&parts), vec!["Core", "Gun", "Turret"]);
        assert_eq!(
            ledger.unresearched_in_category(&parts, "extremity"),
            vec!["Core"]
        );
    }
}
