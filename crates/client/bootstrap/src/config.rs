//! Runtime configuration structures and loaders.
use std::env;
use std::path::PathBuf;

use mech_core::{MechConfig, ResearchGate};

/// Where static content and save data live, plus environment overrides.
#[derive(Clone, Debug)]
pub struct RuntimeConfig {
    /// Static data directory (catalog, schema, descriptions, `config.toml`).
    pub data_dir: PathBuf,
    /// Root of everything the builder writes: templates and ledgers.
    pub save_data_dir: PathBuf,
    /// Overrides `research_gate` from `config.toml`.
    pub research_gate: Option<ResearchGate>,
    /// Overrides `starting_gold` from `config.toml`.
    pub starting_gold: Option<i64>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            save_data_dir: default_save_data_dir(),
            research_gate: None,
            starting_gold: None,
        }
    }
}

impl RuntimeConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `MECH_DATA_DIR` - Static data directory (default: `crates/mech/content/data`
    ///   next to the executable's workspace, then the current directory)
    /// - `SAVE_DATA_DIR` - Directory for templates and ledgers (default: platform-specific)
    /// - `RESEARCH_GATE` - `enforce` or `decorative`
    /// - `STARTING_GOLD` - Gold for a fresh resource file
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(dir) = env::var("MECH_DATA_DIR") {
            config.data_dir = PathBuf::from(dir);
        }

        if let Ok(dir) = env::var("SAVE_DATA_DIR") {
            config.save_data_dir = PathBuf::from(dir);
        }

        config.research_gate = read_env::<ResearchGate>("RESEARCH_GATE");
        config.starting_gold = read_env::<i64>("STARTING_GOLD");

        config
    }

    pub fn templates_dir(&self) -> PathBuf {
        self.save_data_dir.join("templates")
    }

    pub fn research_path(&self) -> PathBuf {
        self.save_data_dir.join("research.json")
    }

    pub fn resources_path(&self) -> PathBuf {
        self.save_data_dir.join("resources.json")
    }

    /// Applies the environment overrides on top of file configuration.
    pub fn apply_overrides(&self, mut config: MechConfig) -> MechConfig {
        if let Some(gate) = self.research_gate {
            config.research_gate = gate;
        }
        if let Some(gold) = self.starting_gold {
            config.starting_gold = gold;
        }
        config
    }
}

/// Locates the shipped data directory.
///
/// Tries, in order:
/// 1. Relative to current executable (`target/<profile>/` → workspace root)
/// 2. Relative to current directory
fn default_data_dir() -> PathBuf {
    const RELATIVE: &str = "crates/mech/content/data";

    let from_exe = env::current_exe().ok().and_then(|exe| {
        exe.parent()
            .and_then(|p| p.parent())
            .and_then(|p| p.parent())
            .map(|root| root.join(RELATIVE))
    });
    match from_exe {
        Some(dir) if dir.exists() => dir,
        _ => env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(RELATIVE),
    }
}

/// Platform data directory for the builder.
///
/// - macOS: `~/Library/Application Support/mechapp`
/// - Linux: `~/.local/share/mechapp` (or `$XDG_DATA_HOME/mechapp`)
/// - Windows: `%APPDATA%\mechapp`
/// - Fallback: `./save_data`
fn default_save_data_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", "mechapp")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("./save_data"))
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.trim().parse().ok()
}
