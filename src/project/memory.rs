//! In-memory project model — a YAML-persistable `ProjectHandle` host.
//!
//! Duplicate policy: re-enabling a plugin, re-declaring a repository, or
//! re-adding an identical (scope, coordinate) pair is a no-op. Identity
//! and properties are last-write-wins.

use super::ProjectHandle;
use crate::core::types::{well_formed_coordinate, DependencyDeclaration, DependencyScope};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Declared configuration state of one project.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectModel {
    /// Enabled plugins, in enablement order
    #[serde(default)]
    pub plugins: Vec<String>,

    /// Group identifier
    #[serde(default)]
    pub group: Option<String>,

    /// Version string
    #[serde(default)]
    pub version: Option<String>,

    /// Extra properties (order-preserving)
    #[serde(default)]
    pub properties: IndexMap<String, String>,

    /// Declared repositories
    #[serde(default)]
    pub repositories: Vec<String>,

    /// Registered dependency declarations
    #[serde(default)]
    pub dependencies: Vec<DependencyDeclaration>,
}

impl ProjectModel {
    /// Distinct coordinates across all scopes.
    pub fn distinct_coordinates(&self) -> usize {
        let mut coordinates: Vec<&str> =
            self.dependencies.iter().map(|d| d.coordinate.as_str()).collect();
        coordinates.sort_unstable();
        coordinates.dedup();
        coordinates.len()
    }
}

impl ProjectHandle for ProjectModel {
    fn enable_plugin(&mut self, id: &str) -> Result<(), String> {
        if id.is_empty() {
            return Err("plugin id must not be empty".to_string());
        }
        if !self.plugins.iter().any(|p| p == id) {
            self.plugins.push(id.to_string());
        }
        Ok(())
    }

    fn set_identity(&mut self, group: &str, version: &str) -> Result<(), String> {
        if group.is_empty() {
            return Err("group must not be empty".to_string());
        }
        if version.is_empty() {
            return Err("version must not be empty".to_string());
        }
        self.group = Some(group.to_string());
        self.version = Some(version.to_string());
        Ok(())
    }

    fn set_property(&mut self, key: &str, value: &str) -> Result<(), String> {
        if key.is_empty() {
            return Err("property key must not be empty".to_string());
        }
        self.properties.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn add_repository(&mut self, id: &str) -> Result<(), String> {
        if id.is_empty() {
            return Err("repository id must not be empty".to_string());
        }
        if !self.repositories.iter().any(|r| r == id) {
            self.repositories.push(id.to_string());
        }
        Ok(())
    }

    fn add_dependency(&mut self, scope: DependencyScope, coordinate: &str) -> Result<(), String> {
        if !well_formed_coordinate(coordinate) {
            return Err(format!(
                "malformed coordinate '{}': expected group:artifact[:version]",
                coordinate
            ));
        }
        let declaration = DependencyDeclaration {
            scope,
            coordinate: coordinate.to_string(),
        };
        if !self.dependencies.contains(&declaration) {
            self.dependencies.push(declaration);
        }
        Ok(())
    }
}

/// Derive a project's display name from its model file path.
pub fn project_name(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "project".to_string())
}

/// Load a project model. Returns None if the file doesn't exist.
pub fn load_project(path: &Path) -> Result<Option<ProjectModel>, String> {
    if !path.exists() {
        return Ok(None);
    }
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("cannot read {}: {}", path.display(), e))?;
    let model: ProjectModel = serde_yaml_ng::from_str(&content)
        .map_err(|e| format!("invalid project model {}: {}", path.display(), e))?;
    Ok(Some(model))
}

/// Save a project model atomically (write to temp, then rename).
pub fn save_project(path: &Path, model: &ProjectModel) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("cannot create dir {}: {}", parent.display(), e))?;
        }
    }

    let yaml =
        serde_yaml_ng::to_string(model).map_err(|e| format!("serialize error: {}", e))?;

    let tmp_path: PathBuf = path.with_extension("yaml.tmp");
    std::fs::write(&tmp_path, &yaml)
        .map_err(|e| format!("cannot write {}: {}", tmp_path.display(), e))?;
    std::fs::rename(&tmp_path, path).map_err(|e| {
        format!("cannot rename {} → {}: {}", tmp_path.display(), path.display(), e)
    })?;

    Ok(())
}
