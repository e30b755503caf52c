//! The gold counter.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{LedgerError, write_json};

/// Persisted shape: `{ "Gold": 1000 }`.
#[derive(Debug, Serialize, Deserialize)]
struct ResourceRecord {
    #[serde(rename = "Gold")]
    gold: i64,
}

/// Single named counter of gold.
#[derive(Clone, Debug)]
pub struct ResourceLedger {
    path: Option<PathBuf>,
    gold: i64,
    starting_gold: i64,
}

impl ResourceLedger {
    /// Ledger that is never written to disk.
    pub fn in_memory(starting_gold: i64) -> Self {
        Self {
            path: None,
            gold: starting_gold,
            starting_gold,
        }
    }

    /// Opens the ledger stored at `path`.
    ///
    /// A missing file is created with `starting_gold`. A malformed one is left
    /// alone and the ledger starts from `starting_gold`.
    pub fn open(path: impl Into<PathBuf>, starting_gold: i64) -> Self {
        let path = path.into();
        let mut ledger = Self {
            path: Some(path.clone()),
            gold: starting_gold,
            starting_gold,
        };
        match read_gold(&path) {
            Ok(Some(gold)) => {
                ledger.gold = gold;
                tracing::info!(gold, "Resources loaded");
            }
            Ok(None) => {
                tracing::info!(gold = starting_gold, "Resources initialized");
                ledger.persist();
            }
            Err(e) => {
                tracing::warn!("Unreadable resource file {}: {}", path.display(), e);
            }
        }
        ledger
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn gold(&self) -> i64 {
        self.gold
    }

    pub fn starting_gold(&self) -> i64 {
        self.starting_gold
    }

    pub fn set_gold(&mut self, amount: i64) {
        self.gold = amount;
        self.persist();
    }

    /// Adds `delta` (negative to spend). Fails without change when the result
    /// would drop below zero.
    pub fn add_gold(&mut self, delta: i64) -> Result<i64, LedgerError> {
        let total = self.gold.saturating_add(delta);
        if total < 0 {
            return Err(LedgerError::InsufficientFunds {
                needed: delta.saturating_neg(),
                available: self.gold,
            });
        }
        self.set_gold(total);
        Ok(total)
    }

    pub fn has_gold(&self, amount: i64) -> bool {
        self.gold >= amount
    }

    /// Restores the starting amount.
    pub fn reset(&mut self) {
        self.set_gold(self.starting_gold);
        tracing::info!(gold = self.starting_gold, "Resources reset");
    }

    fn persist(&self) {
        let Some(path) = &self.path else {
            return;
        };
        if let Err(e) = write_json(path, &ResourceRecord { gold: self.gold }) {
            tracing::warn!("Failed to save resources {}: {}", path.display(), e);
        }
    }
}

/// `Ok(None)` when the file does not exist yet.
fn read_gold(path: &Path) -> Result<Option<i64>, LedgerError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    let record: ResourceRecord =
        serde_json::from_str(&content).map_err(|e| LedgerError::Json(e.to_string()))?;
    Ok(Some(record.gold))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spending_more_than_available_fails() {
        let mut ledger = ResourceLedger::in_memory(100);
        assert_eq!(ledger.add_gold(-40).unwrap(), 60);

        let err = ledger.add_gold(-61).unwrap_err();
        assert!(matches!(
            err,
            LedgerError::InsufficientFunds {
                needed: 61,
                available: 60
            }
        ));
        assert_eq!(ledger.gold(), 60);
        assert!(ledger.has_gold(60));
        assert!(!ledger.has_gold(61));
    }

    #[test]
    fn first_open_writes_starting_gold() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("resources.json");

        let ledger = ResourceLedger::open(&path, 1000);
        assert_eq!(ledger.gold(), 1000);

        let written = fs::read_to_string(&path).unwrap();
        assert!(written.contains("\"Gold\": 1000"));
    }

    #[test]
    fn reopen_keeps_balance_and_reset_restores() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("resources.json");

        let mut ledger = ResourceLedger::open(&path, 1000);
        ledger.add_gold(250).unwrap();

        let mut reopened = ResourceLedger::open(&path, 1000);
        assert_eq!(reopened.gold(), 1250);

        reopened.reset();
        assert_eq!(ResourceLedger::open(&path, 1000).gold(), 1000);
    }

    #[test]
    fn malformed_file_falls_back_to_starting_gold() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("resources.json");
        fs::write(&path, "{\"Gold\": \"lots\"}").unwrap();

        let ledger = ResourceLedger::open(&path, 500);
        assert_eq!(ledger.gold(), 500);
        // The unreadable file is left for inspection
        assert!(fs::read_to_string(&path).unwrap().contains("lots"));
    }
}
