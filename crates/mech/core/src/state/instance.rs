use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::scale::ScaleLevel;

/// Unique identifier of a placed part.
///
/// Assigned from a monotonically increasing counter starting at 1 and never
/// reused, even across template save/restore.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct PartId(pub u32);

impl PartId {
    pub const FIRST: Self = Self(1);

    /// Identifier following this one, or `None` on overflow.
    pub const fn next(self) -> Option<Self> {
        match self.0.checked_add(1) {
            Some(value) => Some(Self(value)),
            None => None,
        }
    }
}

impl fmt::Display for PartId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A node of the part tree: one placed copy of a catalog part.
///
/// Scale bounds and display properties are snapshots taken at attach time;
/// later catalog edits never reach an already placed instance.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PartInstance {
    #[serde(rename = "PartID")]
    pub part_id: PartId,

    pub name: String,

    #[serde(rename = "Scale")]
    pub scale: ScaleLevel,

    #[serde(rename = "MinScale", default, skip_serializing_if = "Option::is_none")]
    pub min_level: Option<u8>,

    #[serde(rename = "MaxScale")]
    pub max_level: u8,

    /// Display properties copied from the definition.
    #[serde(flatten)]
    pub properties: BTreeMap<String, Value>,

    /// Attached children in insertion order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<PartInstance>,
}

impl PartInstance {
    pub fn new(part_id: PartId, name: impl Into<String>, scale: ScaleLevel, max_level: u8) -> Self {
        Self {
            part_id,
            name: name.into(),
            scale,
            min_level: None,
            max_level,
            properties: BTreeMap::new(),
            children: Vec::new(),
        }
    }

    /// Depth-first iterator over this node and every descendant.
    pub fn iter(&self) -> impl Iterator<Item = &PartInstance> {
        let mut stack = vec![self];
        std::iter::from_fn(move || {
            let node = stack.pop()?;
            stack.extend(node.children.iter().rev());
            Some(node)
        })
    }

    /// Value of a stamped display property, rendered for the console.
    ///
    /// Scale fields are answered from the typed stamps.
    pub fn display_value(&self, property: &str) -> Option<String> {
        match property {
            "Scale" => Some(self.scale.to_string()),
            "MinScale" => self.min_level.map(render_level),
            "MaxScale" => Some(render_level(self.max_level)),
            _ => self.properties.get(property).map(|value| match value {
                Value::String(text) => text.clone(),
                other => other.to_string(),
            }),
        }
    }
}

fn render_level(level: u8) -> String {
    ScaleLevel::from_level(level)
        .map(|scale| scale.to_string())
        .unwrap_or_else(|| level.to_string())
}
