//! Scale levels and parent/child scale compatibility.
//!
//! Scales form a fixed ordered list. Internally a scale is a [`ScaleLevel`];
//! the legacy `"Name(level)"` string form only appears at the data boundary
//! (catalog records and persisted templates), where the embedded number is
//! authoritative and the name is cosmetic.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use strum::IntoEnumIterator;

use crate::config::MechConfig;
use crate::env::PartDefinition;

/// Ordered scale enumeration backed by an integer rank.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    strum::EnumIter,
    strum::IntoStaticStr,
)]
#[serde(into = "String", try_from = "String")]
#[repr(u8)]
pub enum ScaleLevel {
    Personal = 1,
    Vehicle = 2,
    House = 3,
    Building = 4,
}

impl ScaleLevel {
    /// Numeric rank, the authoritative ordering key.
    #[inline]
    pub const fn level(self) -> u8 {
        self as u8
    }

    /// Cosmetic name without the level suffix.
    pub fn name(self) -> &'static str {
        self.into()
    }

    pub fn from_level(level: u8) -> Option<Self> {
        Self::iter().find(|scale| scale.level() == level)
    }

    /// Parses the legacy `"Name(level)"` form. Only the level is consulted.
    pub fn parse_label(label: &str) -> Option<Self> {
        Self::from_level(level_of(label))
    }

    /// All scales in ascending order.
    pub fn all() -> impl Iterator<Item = Self> {
        Self::iter()
    }
}

impl fmt::Display for ScaleLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.name(), self.level())
    }
}

impl FromStr for ScaleLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_label(s).ok_or_else(|| format!("invalid scale label '{}'", s))
    }
}

impl From<ScaleLevel> for String {
    fn from(scale: ScaleLevel) -> Self {
        scale.to_string()
    }
}

impl TryFrom<String> for ScaleLevel {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Returns the level embedded in a scale label such as `"House(3)"`.
///
/// Returns 0 when no level can be parsed; 0 sorts before every valid level.
pub fn level_of(label: &str) -> u8 {
    let Some(open) = label.rfind('(') else {
        return 0;
    };
    label[open + 1..]
        .split_once(')')
        .and_then(|(digits, _)| digits.trim().parse::<u8>().ok())
        .unwrap_or(0)
}

/// Reads a scale level from a catalog field.
///
/// Accepts a bare integer (`2` or `2.0`), a numeric string (`"2"`) or a label
/// (`"Vehicle(2)"`). Zero and anything unparsable yield `None`.
pub fn level_from_value(value: &Value) -> Option<u8> {
    let level = match value {
        Value::Number(number) => number
            .as_u64()
            .or_else(|| {
                number
                    .as_f64()
                    .filter(|f| f.fract() == 0.0 && *f >= 0.0)
                    .map(|f| f as u64)
            })
            .and_then(|n| u8::try_from(n).ok())?,
        Value::String(text) => {
            let text = text.trim();
            text.parse::<u8>().unwrap_or_else(|_| level_of(text))
        }
        _ => return None,
    };
    (level > 0).then_some(level)
}

/// Lower scale bound declared by a definition, if any.
pub fn min_level_for(definition: Option<&PartDefinition>) -> Option<u8> {
    definition.and_then(PartDefinition::min_scale_level)
}

/// Upper scale bound declared by a definition; defaults to [`MechConfig::MAX_SCALE_LEVEL`].
pub fn max_level_for(definition: Option<&PartDefinition>) -> u8 {
    definition
        .map(PartDefinition::max_scale_level)
        .unwrap_or(MechConfig::MAX_SCALE_LEVEL)
}

/// Scales a new part may take given its parent and its own bounds, ascending.
pub fn scale_candidates(
    parent: Option<ScaleLevel>,
    min_level: Option<u8>,
    max_level: Option<u8>,
) -> Vec<ScaleLevel> {
    ScaleLevel::all()
        .filter(|scale| parent.is_none_or(|p| scale.level() <= p.level()))
        .filter(|scale| min_level.is_none_or(|min| scale.level() >= min))
        .filter(|scale| max_level.is_none_or(|max| scale.level() <= max))
        .collect()
}

/// Interactive scale selection.
///
/// Implementors present `candidates` and return the index of the pick, or
/// `None` when the user cancels or enters something unusable.
pub trait ScaleChooser {
    fn choose(&mut self, part_name: &str, candidates: &[ScaleLevel]) -> Option<usize>;
}

impl<F> ScaleChooser for F
where
    F: FnMut(&str, &[ScaleLevel]) -> Option<usize>,
{
    fn choose(&mut self, part_name: &str, candidates: &[ScaleLevel]) -> Option<usize> {
        self(part_name, candidates)
    }
}

/// Chooser that never selects. Useful when every part is expected to carry a fixed scale.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoScaleChoice;

impl ScaleChooser for NoScaleChoice {
    fn choose(&mut self, _part_name: &str, _candidates: &[ScaleLevel]) -> Option<usize> {
        None
    }
}

/// Offers the compatible scales to `chooser` and returns the selected one.
///
/// Fails with `None` when no scale is compatible or the choice is out of range.
pub fn choose_scale(
    chooser: &mut dyn ScaleChooser,
    part_name: &str,
    parent: Option<ScaleLevel>,
    min_level: Option<u8>,
    max_level: Option<u8>,
) -> Option<ScaleLevel> {
    let candidates = scale_candidates(parent, min_level, max_level);
    if candidates.is_empty() {
        return None;
    }
    let index = chooser.choose(part_name, &candidates)?;
    candidates.get(index).copied()
}
