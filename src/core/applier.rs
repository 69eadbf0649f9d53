//! Recipe application — ordered, synchronous, stop on first rejection.
//!
//! Forwards each recipe action to the host capability set exactly once, in
//! declaration order. The applier never inspects project state before
//! mutating and never rolls back: actions applied before a rejection stay
//! applied on the handle.

use super::recipe::Recipe;
use super::types::{ApplyError, ApplyReport, RecipeAction};
use crate::project::ProjectHandle;

/// Apply a recipe to a project handle.
///
/// Returns the per-kind action counters on success, or
/// `ApplyError::HostRejected` naming the first rejected action and its
/// index in the recipe.
pub fn apply(recipe: &Recipe, project: &mut dyn ProjectHandle) -> Result<ApplyReport, ApplyError> {
    let mut report = ApplyReport::default();

    for (index, action) in recipe.actions().into_iter().enumerate() {
        let result = match &action {
            RecipeAction::EnablePlugin { id } => project.enable_plugin(id),
            RecipeAction::SetIdentity { group, version } => project.set_identity(group, version),
            RecipeAction::SetProperty { key, value } => project.set_property(key, value),
            RecipeAction::AddRepository { id } => project.add_repository(id),
            RecipeAction::AddDependency { scope, coordinate } => {
                project.add_dependency(*scope, coordinate)
            }
        };

        if let Err(cause) = result {
            return Err(ApplyError::HostRejected { index, action, cause });
        }

        match action {
            RecipeAction::EnablePlugin { .. } => report.plugins_enabled += 1,
            RecipeAction::SetIdentity { .. } => report.identity_set = true,
            RecipeAction::SetProperty { .. } => report.properties_set += 1,
            RecipeAction::AddRepository { .. } => report.repositories_added += 1,
            RecipeAction::AddDependency { .. } => report.dependencies_added += 1,
        }
    }

    Ok(report)
}
