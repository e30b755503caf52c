use serde::{Deserialize, Serialize};

/// Whether unresearched parts may be attached.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ResearchGate {
    /// Attaching a part requires it to be researched first.
    #[default]
    Enforce,
    /// Research is tracked and browsable but never blocks composition.
    Decorative,
}

impl ResearchGate {
    pub const fn is_enforced(self) -> bool {
        matches!(self, Self::Enforce)
    }
}

/// Mech builder configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MechConfig {
    /// Gold granted on first start and on ledger reset.
    pub starting_gold: i64,
    /// Research gate policy applied to composition and part menus.
    pub research_gate: ResearchGate,
}

impl MechConfig {
    // ===== compile-time constants =====
    /// The single category allowed at the root of a template. Defines weight capacity.
    pub const ROOT_CATEGORY: &'static str = "Frame";
    /// Highest scale level; the implicit maximum for parts without `MaxScale`.
    pub const MAX_SCALE_LEVEL: u8 = 4;
    /// Weight multiplier per scale level above `Personal(1)` when a part has no `WeightGrowth`.
    pub const DEFAULT_WEIGHT_GROWTH: f64 = 4.0;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_STARTING_GOLD: i64 = 1000;

    pub fn new() -> Self {
        Self {
            starting_gold: Self::DEFAULT_STARTING_GOLD,
            research_gate: ResearchGate::default(),
        }
    }

    /// Case-insensitive check against [`Self::ROOT_CATEGORY`].
    pub fn is_root_category(category: &str) -> bool {
        category.eq_ignore_ascii_case(Self::ROOT_CATEGORY)
    }
}

impl Default for MechConfig {
    fn default() -> Self {
        Self::new()
    }
}
