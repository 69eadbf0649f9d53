//! CLI subcommands — init, show, validate, plan, apply, render, status.

use crate::core::types::{ApplyError, PlanAction, ProvenanceEvent};
use crate::core::{applier, codegen, planner, recipe, validate};
use crate::project::memory::{self, ProjectModel};
use crate::provenance::{eventlog, fingerprint};
use clap::Subcommand;
use std::path::{Path, PathBuf};

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize an empty project model
    Init {
        /// Directory to initialize (default: current)
        #[arg(default_value = ".")]
        path: PathBuf,
    },

    /// Print the effective recipe as YAML
    Show {
        /// Recipe file (default: the built-in backend-service convention)
        #[arg(short, long)]
        recipe: Option<PathBuf>,
    },

    /// Validate a recipe without touching any project
    Validate {
        /// Recipe file (default: the built-in backend-service convention)
        #[arg(short, long)]
        recipe: Option<PathBuf>,
    },

    /// Show which actions would declare something new
    Plan {
        /// Path to the project model
        #[arg(short, long, default_value = "project.yaml")]
        project: PathBuf,

        /// Recipe file (default: the built-in backend-service convention)
        #[arg(short, long)]
        recipe: Option<PathBuf>,
    },

    /// Apply the recipe to a project model
    Apply {
        /// Path to the project model
        #[arg(short, long, default_value = "project.yaml")]
        project: PathBuf,

        /// Recipe file (default: the built-in backend-service convention)
        #[arg(short, long)]
        recipe: Option<PathBuf>,

        /// Show what would be declared without writing anything
        #[arg(long)]
        dry_run: bool,

        /// State directory for the apply log
        #[arg(long, default_value = "state")]
        state_dir: PathBuf,
    },

    /// Render the recipe as a build-script declaration block
    Render {
        /// Recipe file (default: the built-in backend-service convention)
        #[arg(short, long)]
        recipe: Option<PathBuf>,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show a project model's declared state
    Status {
        /// Path to the project model
        #[arg(short, long, default_value = "project.yaml")]
        project: PathBuf,
    },
}

/// Dispatch a CLI command.
pub fn dispatch(cmd: Commands) -> Result<(), String> {
    match cmd {
        Commands::Init { path } => cmd_init(&path),
        Commands::Show { recipe } => cmd_show(recipe.as_deref()),
        Commands::Validate { recipe } => cmd_validate(recipe.as_deref()),
        Commands::Plan { project, recipe } => cmd_plan(&project, recipe.as_deref()),
        Commands::Apply {
            project,
            recipe,
            dry_run,
            state_dir,
        } => cmd_apply(&project, recipe.as_deref(), dry_run, &state_dir),
        Commands::Render { recipe, output } => cmd_render(recipe.as_deref(), output.as_deref()),
        Commands::Status { project } => cmd_status(&project),
    }
}

/// Load a recipe file, or fall back to the built-in convention.
fn effective_recipe(path: Option<&Path>) -> Result<recipe::Recipe, String> {
    match path {
        Some(p) => recipe::load_recipe(p),
        None => Ok(recipe::Recipe::backend_service()),
    }
}

/// Load a recipe and reject it if structurally invalid.
fn load_and_validate(path: Option<&Path>) -> Result<recipe::Recipe, String> {
    let recipe = effective_recipe(path)?;
    let errors = validate::validate_recipe(&recipe);
    if errors.is_empty() {
        return Ok(recipe);
    }
    for e in &errors {
        eprintln!("  ERROR: {}", e);
    }
    Err(format!("{} validation error(s)", errors.len()))
}

/// Load a project model, or start from an empty one.
fn load_or_empty(path: &Path) -> Result<ProjectModel, String> {
    Ok(memory::load_project(path)?.unwrap_or_default())
}

fn cmd_init(path: &Path) -> Result<(), String> {
    let project_path = path.join("project.yaml");
    if project_path.exists() {
        return Err(format!("{} already exists", project_path.display()));
    }

    let state_dir = path.join("state");
    std::fs::create_dir_all(&state_dir).map_err(|e| format!("cannot create state dir: {}", e))?;

    memory::save_project(&project_path, &ProjectModel::default())?;

    println!("Initialized receta project at {}", path.display());
    println!("  Created: {}", project_path.display());
    println!("  Created: {}/", state_dir.display());
    Ok(())
}

fn cmd_show(recipe_path: Option<&Path>) -> Result<(), String> {
    let recipe = effective_recipe(recipe_path)?;
    let yaml =
        serde_yaml_ng::to_string(&recipe).map_err(|e| format!("serialize error: {}", e))?;
    print!("{}", yaml);
    Ok(())
}

fn cmd_validate(recipe_path: Option<&Path>) -> Result<(), String> {
    let recipe = effective_recipe(recipe_path)?;
    let errors = validate::validate_recipe(&recipe);

    if errors.is_empty() {
        println!(
            "OK: {} ({} plugins, {} properties, {} dependencies)",
            recipe.name,
            recipe.plugins.len(),
            recipe.properties.len(),
            recipe.dependencies.len()
        );
        Ok(())
    } else {
        for e in &errors {
            eprintln!("  ERROR: {}", e);
        }
        Err(format!("{} validation error(s)", errors.len()))
    }
}

fn cmd_plan(project_path: &Path, recipe_path: Option<&Path>) -> Result<(), String> {
    let recipe = load_and_validate(recipe_path)?;
    let model = load_or_empty(project_path)?;

    let plan = planner::plan(&recipe, &model);
    print_plan(&plan);
    Ok(())
}

/// Display a plan to stdout.
fn print_plan(plan: &crate::core::types::RecipePlan) {
    println!("Planning: {} ({} actions)", plan.name, plan.changes.len());
    println!();

    for change in &plan.changes {
        let symbol = match change.op {
            PlanAction::Declare => "+",
            PlanAction::NoOp => " ",
        };
        println!("  {} {}", symbol, change.action);
    }

    println!();
    println!(
        "Plan: {} to declare, {} unchanged.",
        plan.to_declare, plan.unchanged
    );
}

fn cmd_apply(
    project_path: &Path,
    recipe_path: Option<&Path>,
    dry_run: bool,
    state_dir: &Path,
) -> Result<(), String> {
    let recipe = load_and_validate(recipe_path)?;
    let mut model = load_or_empty(project_path)?;

    if dry_run {
        let plan = planner::plan(&recipe, &model);
        print_plan(&plan);
        println!("Dry run — no changes applied.");
        return Ok(());
    }

    let project = memory::project_name(project_path);
    let run_id = eventlog::generate_run_id();

    eventlog::append_event(
        state_dir,
        &project,
        ProvenanceEvent::ApplyStarted {
            project: project.clone(),
            recipe: recipe.name.clone(),
            run_id: run_id.clone(),
            receta_version: env!("CARGO_PKG_VERSION").to_string(),
        },
    )?;

    let report = match applier::apply(&recipe, &mut model) {
        Ok(report) => report,
        Err(e) => {
            let ApplyError::HostRejected {
                index,
                ref action,
                ref cause,
            } = e;
            let _ = eventlog::append_event(
                state_dir,
                &project,
                ProvenanceEvent::ActionRejected {
                    project: project.clone(),
                    recipe: recipe.name.clone(),
                    index,
                    action: action.to_string(),
                    cause: cause.clone(),
                },
            );
            return Err(e.to_string());
        }
    };

    memory::save_project(project_path, &model)?;
    let fp = fingerprint::fingerprint(&model)?;

    eventlog::append_event(
        state_dir,
        &project,
        ProvenanceEvent::ApplyCompleted {
            project: project.clone(),
            recipe: recipe.name.clone(),
            run_id,
            actions_declared: report.total_actions(),
            fingerprint: fp.clone(),
        },
    )?;

    println!(
        "{}: {} plugins, {} properties, {} repositories, {} dependencies",
        project,
        report.plugins_enabled,
        report.properties_set,
        report.repositories_added,
        report.dependencies_added
    );
    println!();
    println!("Apply complete: {} actions declared.", report.total_actions());
    println!("Fingerprint: {}", fp);
    Ok(())
}

fn cmd_render(recipe_path: Option<&Path>, output: Option<&Path>) -> Result<(), String> {
    let recipe = load_and_validate(recipe_path)?;
    let script = codegen::render_build_script(&recipe);

    match output {
        Some(path) => {
            std::fs::write(path, &script)
                .map_err(|e| format!("cannot write {}: {}", path.display(), e))?;
            println!("Rendered {} to {}", recipe.name, path.display());
        }
        None => print!("{}", script),
    }
    Ok(())
}

fn cmd_status(project_path: &Path) -> Result<(), String> {
    let model = memory::load_project(project_path)?
        .ok_or_else(|| format!("no project model at {}", project_path.display()))?;

    let project = memory::project_name(project_path);
    println!("{}:", project);
    match (&model.group, &model.version) {
        (Some(group), Some(version)) => println!("  identity: {}:{}", group, version),
        _ => println!("  identity: (unset)"),
    }
    println!("  plugins: {}", model.plugins.len());
    for plugin in &model.plugins {
        println!("    - {}", plugin);
    }
    println!("  properties: {}", model.properties.len());
    println!("  repositories: {}", model.repositories.len());
    println!(
        "  dependencies: {} ({} distinct coordinates)",
        model.dependencies.len(),
        model.distinct_coordinates()
    );
    println!("  fingerprint: {}", fingerprint::fingerprint(&model)?);

    let plan = planner::plan(&recipe::Recipe::backend_service(), &model);
    if plan.to_declare == 0 {
        println!("  convention: backend-service applied");
    } else {
        println!(
            "  convention: backend-service not applied ({} action(s) undeclared)",
            plan.to_declare
        );
    }
    Ok(())
}
