use serde_json::{Map, Value};

use crate::config::MechConfig;
use crate::scale::{self, ScaleLevel};

/// Field names of a catalog record.
pub mod keys {
    pub const NAME: &str = "name";
    pub const PART_ID: &str = "PartID";
    pub const CHILDREN: &str = "children";
    pub const CATEGORY: &str = "type";
    pub const MIN_SCALE: &str = "MinScale";
    pub const MAX_SCALE: &str = "MaxScale";
    pub const SCALE: &str = "Scale";
    pub const WEIGHT_LIMIT: &str = "WeightLimit";
    pub const WEIGHT: &str = "Weight";
    pub const WEIGHT_GROWTH: &str = "WeightGrowth";
    pub const ACTIONS: &str = "Actions";
    pub const TAGS: &str = "Tags";
    pub const DESCRIPTION: &str = "Description";
}

/// Read-only access to the part catalog.
///
/// Lookups by name are case-insensitive. An empty catalog is a normal state:
/// list operations return empty vectors and lookups return `None`.
pub trait PartOracle {
    fn definition(&self, name: &str) -> Option<&PartDefinition>;

    /// All part names in catalog order.
    fn part_names(&self) -> Vec<String>;

    /// Part names whose category matches `category` case-insensitively, in catalog order.
    fn parts_in_category(&self, category: &str) -> Vec<String>;

    /// Distinct categories (case-insensitive) in first-seen order, first spelling.
    fn categories(&self) -> Vec<String>;

    /// Property names shown for (and stamped onto) parts of `category`.
    fn display_properties(&self, category: &str) -> Vec<String> {
        default_display_properties(category)
    }

    fn category_of(&self, name: &str) -> Option<&str> {
        self.definition(name).map(PartDefinition::category)
    }

    fn is_root_part(&self, name: &str) -> bool {
        self.category_of(name)
            .is_some_and(MechConfig::is_root_category)
    }

    /// Weight of `name` at `scale`; parts missing from the catalog weigh nothing.
    fn weight_of(&self, name: &str, scale: ScaleLevel) -> f64 {
        self.definition(name)
            .map(|def| def.weight_at(scale))
            .unwrap_or(0.0)
    }
}

/// Display properties used when a category declares none.
pub fn default_display_properties(category: &str) -> Vec<String> {
    let mut properties = vec![
        keys::SCALE.to_string(),
        keys::MIN_SCALE.to_string(),
        keys::MAX_SCALE.to_string(),
    ];
    if MechConfig::is_root_category(category) {
        properties.push(keys::WEIGHT_LIMIT.to_string());
    }
    properties
}

/// A part as declared in the catalog.
///
/// Keeps the full source record so arbitrary display properties survive; the
/// typed accessors interpret the well-known fields.
#[derive(Clone, Debug, PartialEq)]
pub struct PartDefinition {
    name: String,
    category: String,
    fields: Map<String, Value>,
}

impl PartDefinition {
    pub fn new(name: impl Into<String>, category: impl Into<String>) -> Self {
        let name = name.into();
        let category = category.into();
        let mut fields = Map::new();
        fields.insert(keys::NAME.to_string(), Value::String(name.clone()));
        fields.insert(keys::CATEGORY.to_string(), Value::String(category.clone()));
        Self {
            name,
            category,
            fields,
        }
    }

    /// Builds a definition from a raw catalog record.
    ///
    /// Returns `None` when the record has no non-empty `name`. A missing `type`
    /// yields an empty category.
    pub fn from_record(fields: Map<String, Value>) -> Option<Self> {
        let name = fields
            .get(keys::NAME)
            .and_then(value_as_text)
            .filter(|name| !name.trim().is_empty())?;
        let category = fields
            .get(keys::CATEGORY)
            .and_then(value_as_text)
            .unwrap_or_default();
        Some(Self {
            name,
            category,
            fields,
        })
    }

    /// Sets an extra field (builder pattern).
    #[must_use]
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn is_root_category(&self) -> bool {
        MechConfig::is_root_category(&self.category)
    }

    pub fn field(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    pub fn min_scale_level(&self) -> Option<u8> {
        self.field(keys::MIN_SCALE).and_then(scale::level_from_value)
    }

    pub fn max_scale_level(&self) -> u8 {
        self.field(keys::MAX_SCALE)
            .and_then(scale::level_from_value)
            .unwrap_or(MechConfig::MAX_SCALE_LEVEL)
    }

    /// Scale pre-assigned by the definition. Frames always carry one.
    pub fn fixed_scale(&self) -> Option<ScaleLevel> {
        self.field(keys::SCALE)
            .and_then(scale::level_from_value)
            .and_then(ScaleLevel::from_level)
    }

    pub fn weight_limit(&self) -> Option<i64> {
        self.field(keys::WEIGHT_LIMIT).and_then(value_as_i64)
    }

    pub fn base_weight(&self) -> f64 {
        self.field(keys::WEIGHT)
            .and_then(value_as_f64)
            .unwrap_or(0.0)
    }

    pub fn weight_growth(&self) -> f64 {
        self.field(keys::WEIGHT_GROWTH)
            .and_then(value_as_f64)
            .unwrap_or(MechConfig::DEFAULT_WEIGHT_GROWTH)
    }

    /// `Weight × WeightGrowth^(level − 1)`.
    pub fn weight_at(&self, scale: ScaleLevel) -> f64 {
        let exponent = i32::from(scale.level()) - 1;
        self.base_weight() * self.weight_growth().powi(exponent)
    }

    /// Actions granted by this part, in declaration order.
    pub fn actions(&self) -> Vec<&str> {
        self.string_list(keys::ACTIONS)
    }

    pub fn tags(&self) -> Vec<&str> {
        self.string_list(keys::TAGS)
    }

    pub fn description(&self) -> Option<&str> {
        self.field(keys::DESCRIPTION).and_then(Value::as_str)
    }

    fn string_list(&self, key: &str) -> Vec<&str> {
        match self.field(key) {
            Some(Value::Array(items)) => items.iter().filter_map(Value::as_str).collect(),
            Some(Value::String(single)) if !single.is_empty() => vec![single.as_str()],
            _ => Vec::new(),
        }
    }
}

fn value_as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

fn value_as_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Number(number) => number.as_i64(),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}

fn value_as_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}
