//! Repository contracts for saving and loading templates.

use mech_core::PartTree;

use super::Result;

/// Repository for named part-tree templates.
///
/// This is for DYNAMIC data the user creates:
/// - Save the current tree under a name, overwriting any previous one
/// - Restore a saved tree; the ID counter resumes above its largest `PartID`
pub trait TemplateRepository: Send + Sync {
    /// Save a template under `name`
    fn save(&self, name: &str, tree: &PartTree) -> Result<()>;

    /// Load a template by name.
    ///
    /// Returns `Ok(None)` when no template exists under `name`, or when the
    /// stored data cannot be read back as a template.
    fn load(&self, name: &str) -> Result<Option<PartTree>>;

    /// Check if a template exists
    fn exists(&self, name: &str) -> bool;

    /// Delete a template
    fn delete(&self, name: &str) -> Result<()>;

    /// List saved template names, sorted
    fn list_names(&self) -> Result<Vec<String>> {
        Ok(vec![])
    }
}

/// Validates and normalizes a template name.
///
/// Trims whitespace and strips a trailing `.json`. Empty names and names that
/// could escape the template directory are rejected.
pub fn normalize_name(name: &str) -> Option<&str> {
    let name = name.trim();
    let name = name.strip_suffix(".json").unwrap_or(name).trim();
    let escapes = name.contains(['/', '\\']) || name == "." || name == "..";
    (!name.is_empty() && !escapes).then_some(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_names() {
        assert_eq!(normalize_name(" scout.json "), Some("scout"));
        assert_eq!(normalize_name("heavy lifter"), Some("heavy lifter"));
        assert_eq!(normalize_name(""), None);
        assert_eq!(normalize_name(".json"), None);
        assert_eq!(normalize_name("../escape"), None);
        assert_eq!(normalize_name("a\\b"), None);
    }
}
