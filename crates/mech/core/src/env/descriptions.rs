/// Human-readable descriptions for the actions parts grant.
pub trait ActionOracle {
    fn description(&self, action: &str) -> Option<&str>;
}

/// Human-readable descriptions for part tags.
///
/// Tags may carry a value, e.g. `Energy(40)`; descriptions are keyed by the
/// base name with the value stripped.
pub trait TagOracle {
    /// Description registered for the tag's base name.
    fn base_description(&self, base_name: &str) -> Option<&str>;

    fn description(&self, tag: &str) -> Option<&str> {
        self.base_description(tag_base_name(tag))
    }
}

/// Strips a parenthesised value: `"Energy(40)"` → `"Energy"`.
pub fn tag_base_name(tag: &str) -> &str {
    let trimmed = tag.trim();
    match trimmed.find('(') {
        Some(open) => trimmed[..open].trim_end(),
        None => trimmed,
    }
}

/// Parses the numeric value of a tag like `"distance(300)"`.
pub fn tag_numeric_value(tag: &str) -> Option<f64> {
    let open = tag.find('(')?;
    let (inner, _) = tag[open + 1..].split_once(')')?;
    inner.trim().parse().ok()
}
