//! File-based TemplateRepository implementation.

use std::fs;
use std::path::{Path, PathBuf};

use mech_core::PartTree;

use super::{RepositoryError, Result, TemplateRepository, normalize_name};

/// File-based implementation of TemplateRepository.
///
/// Stores each template as `{name}.json` (pretty-printed) in a single
/// directory. Writes go through a temp file and an atomic rename.
pub struct FileTemplateRepository {
    base_dir: PathBuf,
}

impl FileTemplateRepository {
    /// Create a new file-based template repository.
    pub fn new(base_dir: impl AsRef<Path>) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        fs::create_dir_all(&base_dir).map_err(RepositoryError::Io)?;
        Ok(Self { base_dir })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Get the path to a template file.
    fn template_path(&self, name: &str) -> Result<PathBuf> {
        let name =
            normalize_name(name).ok_or_else(|| RepositoryError::InvalidName(name.to_string()))?;
        Ok(self.base_dir.join(format!("{}.json", name)))
    }
}

impl TemplateRepository for FileTemplateRepository {
    fn save(&self, name: &str, tree: &PartTree) -> Result<()> {
        let path = self.template_path(name)?;
        let temp_path = path.with_extension("json.tmp");

        let json =
            serde_json::to_string_pretty(tree).map_err(|e| RepositoryError::Json(e.to_string()))?;

        fs::write(&temp_path, json).map_err(RepositoryError::Io)?;
        fs::rename(&temp_path, &path).map_err(RepositoryError::Io)?;

        tracing::debug!("Saved template '{}' to {}", name, path.display());

        Ok(())
    }

    fn load(&self, name: &str) -> Result<Option<PartTree>> {
        let path = self.template_path(name)?;

        if !path.exists() {
            return Ok(None);
        }

        let json = fs::read_to_string(&path).map_err(RepositoryError::Io)?;
        match serde_json::from_str::<PartTree>(&json) {
            Ok(tree) => {
                tracing::debug!("Loaded template '{}' from {}", name, path.display());
                Ok(Some(tree))
            }
            Err(e) => {
                tracing::warn!("Ignoring malformed template {}: {}", path.display(), e);
                Ok(None)
            }
        }
    }

    fn exists(&self, name: &str) -> bool {
        self.template_path(name)
            .map(|path| path.exists())
            .unwrap_or(false)
    }

    fn delete(&self, name: &str) -> Result<()> {
        let path = self.template_path(name)?;

        if path.exists() {
            fs::remove_file(&path).map_err(RepositoryError::Io)?;
            tracing::debug!("Deleted template '{}'", name);
        }

        Ok(())
    }

    fn list_names(&self) -> Result<Vec<String>> {
        let mut names = Vec::new();

        let entries = fs::read_dir(&self.base_dir).map_err(RepositoryError::Io)?;

        for entry in entries {
            let entry = entry.map_err(RepositoryError::Io)?;
            let path = entry.path();

            let stem = path
                .file_name()
                .and_then(|s| s.to_str())
                .and_then(|filename| filename.strip_suffix(".json"));
            if let Some(stem) = stem.filter(|stem| !stem.is_empty()) {
                names.push(stem.to_string());
            }
        }

        names.sort_unstable();
        Ok(names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mech_core::{PartId, PartInstance, ScaleLevel};

    fn sample_tree() -> PartTree {
        let mut frame = PartInstance::new(PartId(1), "Exosuit-Frame", ScaleLevel::Building, 4);
        frame
            .children
            .push(PartInstance::new(PartId(7), "Gun", ScaleLevel::Personal, 2));
        PartTree::from_roots(vec![frame])
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let repo = FileTemplateRepository::new(dir.path()).unwrap();
        let tree = sample_tree();

        repo.save("scout", &tree).unwrap();
        assert!(repo.exists("scout.json"));
        assert!(dir.path().join("scout.json").exists());
        assert!(!dir.path().join("scout.json.tmp").exists());

        let loaded = repo.load("scout").unwrap().unwrap();
        assert_eq!(loaded, tree);
        assert_eq!(loaded.next_part_id(), Some(PartId(8)));
    }

    #[test]
    fn missing_and_malformed_templates_load_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let repo = FileTemplateRepository::new(dir.path()).unwrap();

        assert!(repo.load("ghost").unwrap().is_none());

        fs::write(dir.path().join("broken.json"), "{ not json").unwrap();
        assert!(repo.load("broken").unwrap().is_none());
    }

    #[test]
    fn rejects_path_traversal() {
        let dir = tempfile::tempdir().unwrap();
        let repo = FileTemplateRepository::new(dir.path()).unwrap();

        let err = repo.save("../outside", &sample_tree()).unwrap_err();
        assert!(matches!(err, RepositoryError::InvalidName(_)));
        assert!(!repo.exists("../outside"));
    }

    #[test]
    fn lists_sorted_and_deletes() {
        let dir = tempfile::tempdir().unwrap();
        let repo = FileTemplateRepository::new(dir.path()).unwrap();
        let tree = sample_tree();

        repo.save("walker", &tree).unwrap();
        repo.save("assault", &tree).unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        assert_eq!(repo.list_names().unwrap(), vec!["assault", "walker"]);

        repo.delete("walker").unwrap();
        repo.delete("walker").unwrap();
        assert_eq!(repo.list_names().unwrap(), vec!["assault"]);
    }
}
