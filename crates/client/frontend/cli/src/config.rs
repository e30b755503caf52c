//! CLI-specific configuration for the console menus.
use std::env;

/// Console menu configuration.
///
/// Settings specific to the text interface, separate from the runtime
/// configuration that locates data and save files.
#[derive(Clone, Debug)]
pub struct CliConfig {
    pub keys: KeyConfig,
    /// Clear the terminal before drawing each screen.
    pub clear_screen: bool,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            keys: KeyConfig::default(),
            clear_screen: true,
        }
    }
}

impl CliConfig {
    /// Construct CLI configuration from environment variables.
    ///
    /// Environment variables:
    /// - `MECH_GO_UP_KEY` - Navigator key for moving to the parent part (default: `U`)
    /// - `MECH_ADD_PART_KEY` - Navigator key for adding a part (default: `A`)
    /// - `MECH_SAVE_KEY` - Navigator key for saving the template (default: `S`)
    /// - `MECH_LOAD_KEY` - Navigator key for loading a template (default: `L`)
    /// - `MECH_CLEAR_SCREEN` - Clear the terminal between screens (default: `true`)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(key) = read_key("MECH_GO_UP_KEY") {
            config.keys.go_up = key;
        }
        if let Some(key) = read_key("MECH_ADD_PART_KEY") {
            config.keys.add_part = key;
        }
        if let Some(key) = read_key("MECH_SAVE_KEY") {
            config.keys.save = key;
        }
        if let Some(key) = read_key("MECH_LOAD_KEY") {
            config.keys.load = key;
        }
        if let Some(clear) = read_env::<bool>("MECH_CLEAR_SCREEN") {
            config.clear_screen = clear;
        }

        config
    }
}

/// Single-letter navigator commands. Matched case-insensitively.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyConfig {
    pub go_up: char,
    pub add_part: char,
    pub save: char,
    pub load: char,
}

impl Default for KeyConfig {
    fn default() -> Self {
        Self {
            go_up: 'U',
            add_part: 'A',
            save: 'S',
            load: 'L',
        }
    }
}

impl KeyConfig {
    /// Whether `input` is exactly `key`, ignoring case.
    pub fn matches(key: char, input: &str) -> bool {
        let mut chars = input.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => c.eq_ignore_ascii_case(&key),
            _ => false,
        }
    }
}

/// Reads a key binding; `q` and digits are reserved by the navigator.
fn read_key(key: &str) -> Option<char> {
    read_env::<char>(key)
        .map(|c| c.to_ascii_uppercase())
        .filter(|c| c.is_ascii_alphabetic() && *c != 'Q')
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.trim().parse().ok()
}
