//! Project discovery and structure

use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::core::identity::EntityId;

/// Represents a QIT project
#[derive(Debug)]
pub struct Project {
    /// Root directory of the project (parent of .qit/)
    root: PathBuf,
}

impl Project {
    /// Find project root by walking up from the current directory
    pub fn discover() -> Result<Self, ProjectError> {
        let current =
            std::env::current_dir().map_err(|e| ProjectError::IoError(e.to_string()))?;
        Self::discover_from(&current)
    }

    /// Find project root by walking up from the given directory
    pub fn discover_from(start: &Path) -> Result<Self, ProjectError> {
        let mut current = start
            .canonicalize()
            .map_err(|e| ProjectError::IoError(e.to_string()))?;

        loop {
            let qit_dir = current.join(".qit");
            if qit_dir.is_dir() {
                return Ok(Self { root: current });
            }

            if !current.pop() {
                return Err(ProjectError::NotFound {
                    searched_from: start.to_path_buf(),
                });
            }
        }
    }

    /// Create a new project structure at the given path
    pub fn init(path: &Path) -> Result<Self, ProjectError> {
        let root = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());

        let qit_dir = root.join(".qit");
        if qit_dir.exists() {
            return Err(ProjectError::AlreadyExists(root.clone()));
        }

        Self::write_structure(&root)?;

        Ok(Self { root })
    }

    /// Force initialization even if .qit/ exists
    pub fn init_force(path: &Path) -> Result<Self, ProjectError> {
        let root = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());

        Self::write_structure(&root)?;

        Ok(Self { root })
    }

    fn write_structure(root: &Path) -> Result<(), ProjectError> {
        let qit_dir = root.join(".qit");
        std::fs::create_dir_all(&qit_dir)
            .map_err(|e| ProjectError::IoError(e.to_string()))?;

        let config_path = qit_dir.join("config.yaml");
        std::fs::write(&config_path, Self::default_config())
            .map_err(|e| ProjectError::IoError(e.to_string()))?;

        std::fs::create_dir_all(root.join("inspections"))
            .map_err(|e| ProjectError::IoError(e.to_string()))?;

        Ok(())
    }

    fn default_config() -> &'static str {
        r#"# QIT Project Configuration

# Default company scope for reports (blank = all companies)
# company: ""

# Default output format (auto, md, json)
# default_format: auto
"#
    }

    /// Get the project root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Get the .qit configuration directory
    pub fn qit_dir(&self) -> PathBuf {
        self.root.join(".qit")
    }

    /// Get the directory holding inspection record files
    pub fn inspections_dir(&self) -> PathBuf {
        self.root.join("inspections")
    }

    /// Get the path for a new inspection record file
    pub fn inspection_path(&self, id: &EntityId) -> PathBuf {
        self.inspections_dir().join(format!("{}.yaml", id))
    }

    /// Iterate all inspection record files
    pub fn iter_inspection_files(&self) -> impl Iterator<Item = PathBuf> {
        walkdir::WalkDir::new(self.inspections_dir())
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .filter(|e| e.path().extension().is_some_and(|ext| ext == "yaml"))
            .map(|e| e.path().to_path_buf())
    }
}

/// Errors that can occur during project operations
#[derive(Debug, Error)]
pub enum ProjectError {
    #[error("not a QIT project (searched from {searched_from:?}). Run 'qit init' to create one.")]
    NotFound { searched_from: PathBuf },

    #[error("QIT project already exists at {0:?}")]
    AlreadyExists(PathBuf),

    #[error("IO error: {0}")]
    IoError(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_project_init_creates_structure() {
        let tmp = tempdir().unwrap();
        let project = Project::init(tmp.path()).unwrap();

        assert!(project.qit_dir().exists());
        assert!(project.qit_dir().join("config.yaml").exists());
        assert!(project.inspections_dir().is_dir());
    }

    #[test]
    fn test_project_init_fails_if_exists() {
        let tmp = tempdir().unwrap();
        Project::init(tmp.path()).unwrap();

        let err = Project::init(tmp.path()).unwrap_err();
        assert!(matches!(err, ProjectError::AlreadyExists(_)));
    }

    #[test]
    fn test_project_discover_finds_qit_dir() {
        let tmp = tempdir().unwrap();
        Project::init(tmp.path()).unwrap();

        let subdir = tmp.path().join("some/nested/dir");
        std::fs::create_dir_all(&subdir).unwrap();

        let project = Project::discover_from(&subdir).unwrap();
        assert_eq!(
            project.root().canonicalize().unwrap(),
            tmp.path().canonicalize().unwrap()
        );
    }

    #[test]
    fn test_project_discover_fails_outside_project() {
        let tmp = tempdir().unwrap();
        let err = Project::discover_from(tmp.path()).unwrap_err();
        assert!(matches!(err, ProjectError::NotFound { .. }));
    }

    #[test]
    fn test_iter_inspection_files_skips_non_yaml() {
        let tmp = tempdir().unwrap();
        let project = Project::init(tmp.path()).unwrap();

        std::fs::write(project.inspections_dir().join("a.yaml"), "x: 1").unwrap();
        std::fs::write(project.inspections_dir().join("notes.txt"), "hi").unwrap();

        let files: Vec<_> = project.iter_inspection_files().collect();
        assert_eq!(files.len(), 1);
    }
}
