//! Recipe validation — structural constraints, checked before apply.
//!
//! Validation never touches a project handle. It catches recipes that
//! would be rejected by any reasonable host: empty identifiers, malformed
//! coordinates, duplicate declarations.

use super::recipe::Recipe;
use super::types::well_formed_coordinate;

/// Validation error.
#[derive(Debug, Clone)]
pub struct ValidationError {
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

fn error(errors: &mut Vec<ValidationError>, message: String) {
    errors.push(ValidationError { message });
}

/// Validate a recipe. Returns a list of errors (empty = valid).
pub fn validate_recipe(recipe: &Recipe) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if recipe.name.is_empty() {
        error(&mut errors, "recipe name must not be empty".to_string());
    }

    for (i, id) in recipe.plugins.iter().enumerate() {
        if id.is_empty() {
            error(&mut errors, format!("plugin {} has an empty id", i));
        }
        if recipe.plugins[..i].contains(id) {
            error(&mut errors, format!("plugin '{}' is enabled twice", id));
        }
    }

    match (&recipe.group, &recipe.version) {
        (Some(group), None) => error(
            &mut errors,
            format!("group '{}' declared without a version", group),
        ),
        (None, Some(version)) => error(
            &mut errors,
            format!("version '{}' declared without a group", version),
        ),
        (Some(group), Some(version)) => {
            if group.is_empty() {
                error(&mut errors, "group must not be empty".to_string());
            }
            if version.is_empty() {
                error(&mut errors, "version must not be empty".to_string());
            }
        }
        (None, None) => {}
    }

    for key in recipe.properties.keys() {
        if key.is_empty() {
            error(&mut errors, "property with an empty key".to_string());
        }
    }

    for (i, id) in recipe.repositories.iter().enumerate() {
        if id.is_empty() {
            error(&mut errors, format!("repository {} has an empty id", i));
        }
        if recipe.repositories[..i].contains(id) {
            error(&mut errors, format!("repository '{}' is declared twice", id));
        }
    }

    for (i, dep) in recipe.dependencies.iter().enumerate() {
        if !well_formed_coordinate(&dep.coordinate) {
            error(
                &mut errors,
                format!(
                    "dependency {} has malformed coordinate '{}' (expected group:artifact[:version])",
                    i, dep.coordinate
                ),
            );
        }
        // Same coordinate in two scopes is legitimate (annotation
        // processing libraries need it); the same (scope, coordinate)
        // pair twice is not.
        if recipe.dependencies[..i].contains(dep) {
            error(
                &mut errors,
                format!(
                    "dependency '{}' is declared twice in scope {}",
                    dep.coordinate, dep.scope
                ),
            );
        }
    }

    errors
}
