//! Recipe model, the built-in backend-service convention, and YAML loading.
//!
//! A recipe is an ordered set of configuration actions: plugins, identity,
//! extra properties, repositories, and scoped dependency declarations.
//! Recipes are immutable after load and safe to share across applies.

use super::types::{DependencyDeclaration, DependencyScope, RecipeAction};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Well-known id for the central public artifact repository.
pub const MAVEN_CENTRAL: &str = "maven-central";

/// A reusable project convention.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    /// Convention name
    pub name: String,

    /// Optional description
    #[serde(default)]
    pub description: Option<String>,

    /// Capability plugins to enable, in order
    #[serde(default)]
    pub plugins: Vec<String>,

    /// Project group identifier
    #[serde(default)]
    pub group: Option<String>,

    /// Project version string
    #[serde(default)]
    pub version: Option<String>,

    /// Extra properties (order-preserving, each key assigned once)
    #[serde(default)]
    pub properties: IndexMap<String, String>,

    /// Artifact repositories to declare
    #[serde(default)]
    pub repositories: Vec<String>,

    /// Scoped dependency declarations, in order
    #[serde(default)]
    pub dependencies: Vec<DependencyDeclaration>,
}

impl Recipe {
    /// Flatten the recipe into its ordered action sequence.
    ///
    /// Plugins come first: later actions may only be meaningful once the
    /// relevant capability plugin is active. Identity, properties, and
    /// repositories follow; dependencies last. No action reads another's
    /// effect, so the order beyond plugins-first is fixed but arbitrary.
    pub fn actions(&self) -> Vec<RecipeAction> {
        let mut actions = Vec::new();

        for id in &self.plugins {
            actions.push(RecipeAction::EnablePlugin { id: id.clone() });
        }

        if let (Some(group), Some(version)) = (&self.group, &self.version) {
            actions.push(RecipeAction::SetIdentity {
                group: group.clone(),
                version: version.clone(),
            });
        }

        for (key, value) in &self.properties {
            actions.push(RecipeAction::SetProperty {
                key: key.clone(),
                value: value.clone(),
            });
        }

        for id in &self.repositories {
            actions.push(RecipeAction::AddRepository { id: id.clone() });
        }

        for dep in &self.dependencies {
            actions.push(RecipeAction::AddDependency {
                scope: dep.scope,
                coordinate: dep.coordinate.clone(),
            });
        }

        actions
    }

    /// The built-in backend service convention.
    ///
    /// A Spring Boot web + JPA stack with Lombok code generation, an
    /// embedded H2 database for runtime, and the JUnit platform for tests.
    /// Lombok is declared in both compile_only and annotation_processor
    /// scopes; that class of library needs both.
    pub fn backend_service() -> Self {
        Self {
            name: "backend-service".to_string(),
            description: Some("Spring Boot backend service convention".to_string()),
            plugins: vec![
                "java".to_string(),
                "org.springframework.boot".to_string(),
                "io.spring.dependency-management".to_string(),
            ],
            group: Some("com.example".to_string()),
            version: Some("0.0.1-SNAPSHOT".to_string()),
            properties: IndexMap::from([(
                "springBootVersion".to_string(),
                "3.4.4".to_string(),
            )]),
            repositories: vec![MAVEN_CENTRAL.to_string()],
            dependencies: vec![
                dep(
                    DependencyScope::Implementation,
                    "org.springframework.boot:spring-boot-starter-web",
                ),
                dep(
                    DependencyScope::Implementation,
                    "org.springframework.boot:spring-boot-starter-data-jpa",
                ),
                dep(DependencyScope::CompileOnly, "org.projectlombok:lombok"),
                dep(
                    DependencyScope::AnnotationProcessor,
                    "org.projectlombok:lombok",
                ),
                dep(DependencyScope::RuntimeOnly, "com.h2database:h2"),
                dep(
                    DependencyScope::TestImplementation,
                    "org.springframework.boot:spring-boot-starter-test",
                ),
                dep(
                    DependencyScope::TestRuntimeOnly,
                    "org.junit.platform:junit-platform-launcher",
                ),
            ],
        }
    }
}

fn dep(scope: DependencyScope, coordinate: &str) -> DependencyDeclaration {
    DependencyDeclaration {
        scope,
        coordinate: coordinate.to_string(),
    }
}

/// Load a recipe from a YAML file.
pub fn load_recipe(path: &Path) -> Result<Recipe, String> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("cannot read recipe {}: {}", path.display(), e))?;
    parse_recipe(&content)
}

/// Parse a recipe from a YAML string.
pub fn parse_recipe(yaml: &str) -> Result<Recipe, String> {
    serde_yaml_ng::from_str(yaml).map_err(|e| format!("recipe parse error: {}", e))
}
