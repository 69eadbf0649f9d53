//! Build-script generation — render a recipe as host build DSL text.
//!
//! Output is deterministic: same recipe, same text. Empty sections are
//! omitted entirely.

use super::recipe::{Recipe, MAVEN_CENTRAL};

/// Render a recipe into a build-script declaration block.
pub fn render_build_script(recipe: &Recipe) -> String {
    let mut script = String::new();

    if !recipe.plugins.is_empty() {
        script.push_str("plugins {\n");
        for id in &recipe.plugins {
            script.push_str(&format!("    id '{}'\n", id));
        }
        script.push_str("}\n");
    }

    if let (Some(group), Some(version)) = (&recipe.group, &recipe.version) {
        if !script.is_empty() {
            script.push('\n');
        }
        script.push_str(&format!("group = '{}'\n", group));
        script.push_str(&format!("version = '{}'\n", version));
    }

    if !recipe.properties.is_empty() {
        if !script.is_empty() {
            script.push('\n');
        }
        script.push_str("ext {\n");
        for (key, value) in &recipe.properties {
            script.push_str(&format!("    {} = '{}'\n", key, value));
        }
        script.push_str("}\n");
    }

    if !recipe.repositories.is_empty() {
        if !script.is_empty() {
            script.push('\n');
        }
        script.push_str("repositories {\n");
        for id in &recipe.repositories {
            script.push_str(&format!("    {}\n", repository_entry(id)));
        }
        script.push_str("}\n");
    }

    if !recipe.dependencies.is_empty() {
        if !script.is_empty() {
            script.push('\n');
        }
        script.push_str("dependencies {\n");
        for dep in &recipe.dependencies {
            script.push_str(&format!(
                "    {} '{}'\n",
                dep.scope.configuration_name(),
                dep.coordinate
            ));
        }
        script.push_str("}\n");
    }

    script
}

/// Render a repository reference. Well-known ids get their DSL shorthand;
/// anything else is treated as a URL.
fn repository_entry(id: &str) -> String {
    if id == MAVEN_CENTRAL {
        "mavenCentral()".to_string()
    } else {
        format!("maven {{ url '{}' }}", id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{DependencyDeclaration, DependencyScope};
    use indexmap::IndexMap;

    #[test]
    fn test_render_backend_service() {
        let script = render_build_script(&Recipe::backend_service());

        assert!(script.contains("    id 'java'\n"));
        assert!(script.contains("    id 'org.springframework.boot'\n"));
        assert!(script.contains("    id 'io.spring.dependency-management'\n"));
        assert!(script.contains("group = 'com.example'\n"));
        assert!(script.contains("version = '0.0.1-SNAPSHOT'\n"));
        assert!(script.contains("    springBootVersion = '3.4.4'\n"));
        assert!(script.contains("    mavenCentral()\n"));
        assert!(script
            .contains("    implementation 'org.springframework.boot:spring-boot-starter-web'\n"));
        assert!(script.contains("    compileOnly 'org.projectlombok:lombok'\n"));
        assert!(script.contains("    annotationProcessor 'org.projectlombok:lombok'\n"));
        assert!(script.contains("    runtimeOnly 'com.h2database:h2'\n"));
        assert!(script.contains(
            "    testRuntimeOnly 'org.junit.platform:junit-platform-launcher'\n"
        ));
    }

    #[test]
    fn test_render_plugin_block_first() {
        let script = render_build_script(&Recipe::backend_service());
        assert!(script.starts_with("plugins {\n"));
        assert!(script.find("plugins {").unwrap() < script.find("dependencies {").unwrap());
    }

    #[test]
    fn test_render_is_deterministic() {
        let recipe = Recipe::backend_service();
        assert_eq!(render_build_script(&recipe), render_build_script(&recipe));
    }

    #[test]
    fn test_render_empty_recipe() {
        let recipe = Recipe {
            name: "empty".to_string(),
            description: None,
            plugins: vec![],
            group: None,
            version: None,
            properties: IndexMap::new(),
            repositories: vec![],
            dependencies: vec![],
        };
        assert_eq!(render_build_script(&recipe), "");
    }

    #[test]
    fn test_render_custom_repository_as_url() {
        let recipe = Recipe {
            name: "mirrored".to_string(),
            description: None,
            plugins: vec![],
            group: None,
            version: None,
            properties: IndexMap::new(),
            repositories: vec!["https://repo.example.com/maven2".to_string()],
            dependencies: vec![],
        };
        let script = render_build_script(&recipe);
        assert!(script.contains("maven { url 'https://repo.example.com/maven2' }"));
    }

    #[test]
    fn test_render_versioned_coordinate() {
        let recipe = Recipe {
            name: "pinned".to_string(),
            description: None,
            plugins: vec![],
            group: None,
            version: None,
            properties: IndexMap::new(),
            repositories: vec![],
            dependencies: vec![DependencyDeclaration {
                scope: DependencyScope::RuntimeOnly,
                coordinate: "com.h2database:h2:2.3.232".to_string(),
            }],
        };
        let script = render_build_script(&recipe);
        assert!(script.contains("    runtimeOnly 'com.h2database:h2:2.3.232'\n"));
    }
}
