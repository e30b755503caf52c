//! Persistent ledgers for unlocked parts and gold.
//!
//! Both ledgers keep their state in memory and rewrite a small JSON file after
//! every change. A missing or unreadable file never stops the builder: the
//! ledger starts from its default and logs a warning. Write failures are
//! logged the same way.

mod error;
mod research;
mod resources;

pub use error::LedgerError;
pub use research::ResearchLedger;
pub use resources::ResourceLedger;

use std::fs;
use std::path::Path;

use serde::Serialize;

/// Writes `value` as pretty JSON through a temp file and an atomic rename.
fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), LedgerError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(value).map_err(|e| LedgerError::Json(e.to_string()))?;
    let temp_path = path.with_extension("json.tmp");
    fs::write(&temp_path, json)?;
    fs::rename(&temp_path, path)?;
    Ok(())
}
