//! BLAKE3 fingerprinting of declared project state.
//!
//! Fingerprints are computed over the canonical YAML serialization of a
//! model. Both the model's collections and the applier's action order are
//! deterministic, so equal declared state yields equal fingerprints.

use crate::project::memory::ProjectModel;

/// Hash a string. Returns `"blake3:{hex}"`.
pub fn hash_string(s: &str) -> String {
    format!("blake3:{}", blake3::hash(s.as_bytes()).to_hex())
}

/// Fingerprint a project model's declared state.
pub fn fingerprint(model: &ProjectModel) -> Result<String, String> {
    let yaml =
        serde_yaml_ng::to_string(model).map_err(|e| format!("serialize error: {}", e))?;
    Ok(hash_string(&yaml))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::applier;
    use crate::core::recipe::Recipe;
    use crate::project::ProjectHandle;

    #[test]
    fn test_hash_string_format() {
        let h = hash_string("hello");
        assert!(h.starts_with("blake3:"));
        assert_eq!(h.len(), 7 + 64); // "blake3:" + 64 hex chars
    }

    #[test]
    fn test_hash_string_deterministic() {
        assert_eq!(hash_string("receta"), hash_string("receta"));
        assert_ne!(hash_string("receta"), hash_string("forjar"));
    }

    #[test]
    fn test_fingerprint_equal_for_equal_state() {
        let recipe = Recipe::backend_service();
        let mut first = ProjectModel::default();
        let mut second = ProjectModel::default();
        applier::apply(&recipe, &mut first).unwrap();
        applier::apply(&recipe, &mut second).unwrap();

        assert_eq!(fingerprint(&first).unwrap(), fingerprint(&second).unwrap());
    }

    #[test]
    fn test_fingerprint_changes_with_state() {
        let mut model = ProjectModel::default();
        let before = fingerprint(&model).unwrap();
        model.enable_plugin("java").unwrap();
        let after = fingerprint(&model).unwrap();
        assert_ne!(before, after);
    }

    #[test]
    fn test_fingerprint_stable_across_reapply() {
        let recipe = Recipe::backend_service();
        let mut model = ProjectModel::default();
        applier::apply(&recipe, &mut model).unwrap();
        let first = fingerprint(&model).unwrap();
        applier::apply(&recipe, &mut model).unwrap();
        assert_eq!(fingerprint(&model).unwrap(), first);
    }
}
