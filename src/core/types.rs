//! Types for recipes, plans, apply results, and provenance events.
//!
//! Recipe and dependency types derive Serialize/Deserialize for YAML
//! roundtripping; plan types are in-memory only.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

// ============================================================================
// Dependency scopes
// ============================================================================

/// Build phase a dependency declaration is visible in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DependencyScope {
    /// Compile-time and runtime (the default library scope).
    Implementation,
    /// Compile-time only, not packaged.
    CompileOnly,
    /// Consumed by annotation processors at compile time.
    AnnotationProcessor,
    /// Runtime only, not on the compile classpath.
    RuntimeOnly,
    /// Test compile-time and test runtime.
    TestImplementation,
    /// Test runtime only.
    TestRuntimeOnly,
}

impl DependencyScope {
    /// The host build-script configuration name for this scope.
    pub fn configuration_name(&self) -> &'static str {
        match self {
            Self::Implementation => "implementation",
            Self::CompileOnly => "compileOnly",
            Self::AnnotationProcessor => "annotationProcessor",
            Self::RuntimeOnly => "runtimeOnly",
            Self::TestImplementation => "testImplementation",
            Self::TestRuntimeOnly => "testRuntimeOnly",
        }
    }
}

impl fmt::Display for DependencyScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Implementation => write!(f, "implementation"),
            Self::CompileOnly => write!(f, "compile_only"),
            Self::AnnotationProcessor => write!(f, "annotation_processor"),
            Self::RuntimeOnly => write!(f, "runtime_only"),
            Self::TestImplementation => write!(f, "test_implementation"),
            Self::TestRuntimeOnly => write!(f, "test_runtime_only"),
        }
    }
}

// ============================================================================
// Dependency declarations
// ============================================================================

/// A scoped artifact coordinate (`group:artifact` or `group:artifact:version`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyDeclaration {
    pub scope: DependencyScope,
    pub coordinate: String,
}

/// Check that a coordinate has 2 or 3 non-empty colon-separated segments.
///
/// Version-less coordinates are legal — version pinning is delegated to a
/// dependency-management plugin on the host side.
pub fn well_formed_coordinate(coordinate: &str) -> bool {
    let segments: Vec<&str> = coordinate.split(':').collect();
    (2..=3).contains(&segments.len()) && segments.iter().all(|s| !s.is_empty())
}

// ============================================================================
// Recipe actions
// ============================================================================

/// A single configuration action, in the order the applier executes it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecipeAction {
    EnablePlugin { id: String },
    SetIdentity { group: String, version: String },
    SetProperty { key: String, value: String },
    AddRepository { id: String },
    AddDependency { scope: DependencyScope, coordinate: String },
}

impl fmt::Display for RecipeAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EnablePlugin { id } => write!(f, "enable plugin '{}'", id),
            Self::SetIdentity { group, version } => {
                write!(f, "set identity {}:{}", group, version)
            }
            Self::SetProperty { key, value } => write!(f, "set property {}={}", key, value),
            Self::AddRepository { id } => write!(f, "add repository '{}'", id),
            Self::AddDependency { scope, coordinate } => {
                write!(f, "add {} dependency '{}'", scope, coordinate)
            }
        }
    }
}

// ============================================================================
// Apply errors and results
// ============================================================================

/// The single failure mode of an apply: the host rejected a capability call.
///
/// Fatal to the apply in progress. Actions already forwarded to the host
/// stay applied; the applier performs no rollback and no retries.
#[derive(Debug, Error)]
pub enum ApplyError {
    #[error("host rejected action {index} ({action}): {cause}")]
    HostRejected {
        index: usize,
        action: RecipeAction,
        cause: String,
    },
}

/// Counters for one successful apply.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplyReport {
    pub plugins_enabled: u32,
    pub identity_set: bool,
    pub properties_set: u32,
    pub repositories_added: u32,
    pub dependencies_added: u32,
}

impl ApplyReport {
    /// Total actions forwarded to the host.
    pub fn total_actions(&self) -> u32 {
        self.plugins_enabled
            + u32::from(self.identity_set)
            + self.properties_set
            + self.repositories_added
            + self.dependencies_added
    }
}

// ============================================================================
// Plan
// ============================================================================

/// What the applier would do with an action against a given model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanAction {
    Declare,
    NoOp,
}

impl fmt::Display for PlanAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Declare => write!(f, "DECLARE"),
            Self::NoOp => write!(f, "NO-OP"),
        }
    }
}

/// A single planned action.
#[derive(Debug, Clone)]
pub struct PlannedAction {
    pub action: RecipeAction,
    pub op: PlanAction,
}

/// Full plan for applying a recipe to a project model.
#[derive(Debug, Clone)]
pub struct RecipePlan {
    /// Recipe name.
    pub name: String,

    /// Planned actions in execution order.
    pub changes: Vec<PlannedAction>,

    /// Summary counts.
    pub to_declare: u32,
    pub unchanged: u32,
}

// ============================================================================
// Provenance events
// ============================================================================

/// Provenance event for the JSONL apply log.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ProvenanceEvent {
    ApplyStarted {
        project: String,
        recipe: String,
        run_id: String,
        receta_version: String,
    },
    ActionRejected {
        project: String,
        recipe: String,
        index: usize,
        action: String,
        cause: String,
    },
    ApplyCompleted {
        project: String,
        recipe: String,
        run_id: String,
        actions_declared: u32,
        fingerprint: String,
    },
}

/// Timestamped event wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimestampedEvent {
    pub ts: String,
    #[serde(flatten)]
    pub event: ProvenanceEvent,
}

// ============================================================================
// Tests
// ============================================================================
