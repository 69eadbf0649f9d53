//! Plan generation — diff a recipe against a model's declared state.
//!
//! The applier itself never reads project state; planning is a separate,
//! read-only pass used for `plan` and `--dry-run` output.

use super::recipe::Recipe;
use super::types::{DependencyDeclaration, PlanAction, PlannedAction, RecipeAction, RecipePlan};
use crate::project::memory::ProjectModel;

/// Generate a plan by comparing recipe actions to declared state.
pub fn plan(recipe: &Recipe, model: &ProjectModel) -> RecipePlan {
    let mut changes = Vec::new();
    let mut to_declare = 0u32;
    let mut unchanged = 0u32;

    for action in recipe.actions() {
        let op = determine_action(&action, model);
        match op {
            PlanAction::Declare => to_declare += 1,
            PlanAction::NoOp => unchanged += 1,
        }
        changes.push(PlannedAction { action, op });
    }

    RecipePlan {
        name: recipe.name.clone(),
        changes,
        to_declare,
        unchanged,
    }
}

/// Decide whether an action would change the model's declared state.
fn determine_action(action: &RecipeAction, model: &ProjectModel) -> PlanAction {
    let already_declared = match action {
        RecipeAction::EnablePlugin { id } => model.plugins.iter().any(|p| p == id),
        RecipeAction::SetIdentity { group, version } => {
            model.group.as_deref() == Some(group.as_str())
                && model.version.as_deref() == Some(version.as_str())
        }
        RecipeAction::SetProperty { key, value } => {
            model.properties.get(key).map(String::as_str) == Some(value.as_str())
        }
        RecipeAction::AddRepository { id } => model.repositories.iter().any(|r| r == id),
        RecipeAction::AddDependency { scope, coordinate } => {
            model.dependencies.contains(&DependencyDeclaration {
                scope: *scope,
                coordinate: coordinate.clone(),
            })
        }
    };

    if already_declared {
        PlanAction::NoOp
    } else {
        PlanAction::Declare
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::applier;
    use crate::core::types::DependencyScope;
    use crate::project::ProjectHandle;

    #[test]
    fn test_plan_empty_model_declares_everything() {
        let recipe = Recipe::backend_service();
        let model = ProjectModel::default();

        let plan = plan(&recipe, &model);
        assert_eq!(plan.name, "backend-service");
        assert_eq!(plan.changes.len(), 13);
        assert_eq!(plan.to_declare, 13);
        assert_eq!(plan.unchanged, 0);
        assert!(plan.changes.iter().all(|c| c.op == PlanAction::Declare));
    }

    #[test]
    fn test_plan_applied_model_is_all_noop() {
        let recipe = Recipe::backend_service();
        let mut model = ProjectModel::default();
        applier::apply(&recipe, &mut model).unwrap();

        let plan = plan(&recipe, &model);
        assert_eq!(plan.to_declare, 0);
        assert_eq!(plan.unchanged, 13);
        assert!(plan.changes.iter().all(|c| c.op == PlanAction::NoOp));
    }

    #[test]
    fn test_plan_partial_model() {
        let recipe = Recipe::backend_service();
        let mut model = ProjectModel::default();
        model.enable_plugin("java").unwrap();
        model.add_repository("maven-central").unwrap();

        let result = plan(&recipe, &model);
        assert_eq!(result.unchanged, 2);
        assert_eq!(result.to_declare, 11);
    }

    #[test]
    fn test_plan_detects_changed_property_value() {
        let recipe = Recipe::backend_service();
        let mut model = ProjectModel::default();
        model.set_property("springBootVersion", "3.4.3").unwrap();

        let result = plan(&recipe, &model);
        let property = result
            .changes
            .iter()
            .find(|c| matches!(c.action, RecipeAction::SetProperty { .. }))
            .unwrap();
        assert_eq!(property.op, PlanAction::Declare);
    }

    #[test]
    fn test_plan_detects_changed_identity() {
        let recipe = Recipe::backend_service();
        let mut model = ProjectModel::default();
        model.set_identity("com.example", "0.0.2-SNAPSHOT").unwrap();

        let result = plan(&recipe, &model);
        let identity = result
            .changes
            .iter()
            .find(|c| matches!(c.action, RecipeAction::SetIdentity { .. }))
            .unwrap();
        assert_eq!(identity.op, PlanAction::Declare);
    }

    #[test]
    fn test_plan_same_coordinate_other_scope_still_declares() {
        let recipe = Recipe::backend_service();
        let mut model = ProjectModel::default();
        model
            .add_dependency(
                DependencyScope::CompileOnly,
                "org.projectlombok:lombok",
            )
            .unwrap();

        let result = plan(&recipe, &model);
        let annotation_scope = result
            .changes
            .iter()
            .find(|c| {
                matches!(
                    &c.action,
                    RecipeAction::AddDependency { scope, coordinate }
                        if *scope == DependencyScope::AnnotationProcessor
                            && coordinate == "org.projectlombok:lombok"
                )
            })
            .unwrap();
        assert_eq!(annotation_scope.op, PlanAction::Declare);
    }
}
