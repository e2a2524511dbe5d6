use serde_json::{json, Map, Value};

use super::path::file_name;

pub const MANIFEST_FILE: &str = "package.json";
pub const ROOT_MANIFEST: &str = "/package.json";

/// Packages every generated project depends on.
pub const BASELINE_DEPENDENCIES: [(&str, &str); 2] =
    [("react", "^18.2.0"), ("react-dom", "^18.2.0")];

pub fn is_manifest_path(path: &str) -> bool {
    file_name(path) == MANIFEST_FILE
}

fn baseline_map() -> Map<String, Value> {
    BASELINE_DEPENDENCIES
        .iter()
        .map(|(name, version)| (name.to_string(), Value::String(version.to_string())))
        .collect()
}

/// Minimal valid manifest with the baseline dependencies.
pub fn default_manifest() -> String {
    let manifest = json!({
        "name": "generated-app",
        "version": "1.0.0",
        "private": true,
        "description": "Generated web application",
        "dependencies": baseline_map(),
    });

    serde_json::to_string_pretty(&manifest).unwrap_or_default()
}

/// Make a model-written manifest valid.
///
/// A parseable object keeps its fields, gains a `dependencies` object if it has
/// none and receives any missing baseline entries; model-provided versions are
/// never overwritten. Anything else is replaced by [`default_manifest`].
pub fn repair_manifest(content: &str) -> String {
    let mut manifest = match serde_json::from_str::<Value>(content) {
        Ok(Value::Object(manifest)) => manifest,
        Ok(_) | Err(_) => {
            log::warn!("Invalid {MANIFEST_FILE} content, using the default manifest");
            return default_manifest();
        }
    };

    let dependencies = manifest
        .entry("dependencies")
        .or_insert_with(|| Value::Object(Map::new()));

    if !dependencies.is_object() {
        log::warn!("{MANIFEST_FILE} has a non-object dependencies field, replacing it");
        *dependencies = Value::Object(Map::new());
    }

    if let Value::Object(dependencies) = dependencies {
        for (name, version) in BASELINE_DEPENDENCIES {
            dependencies
                .entry(name)
                .or_insert_with(|| Value::String(version.to_string()));
        }
    }

    serde_json::to_string_pretty(&Value::Object(manifest)).unwrap_or_else(|_| default_manifest())
}

/// `dependencies` of a manifest as name/version pairs, string versions only.
pub fn declared_dependencies(content: &str) -> Vec<(String, String)> {
    let Ok(manifest) = serde_json::from_str::<Value>(content) else {
        return Vec::new();
    };

    manifest
        .get("dependencies")
        .and_then(Value::as_object)
        .map(|dependencies| {
            dependencies
                .iter()
                .filter_map(|(name, version)| {
                    version
                        .as_str()
                        .map(|version| (name.clone(), version.to_string()))
                })
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(content: &str) -> Value {
        serde_json::from_str(content).unwrap()
    }

    #[test]
    fn test_is_manifest_path() {
        assert!(is_manifest_path("/package.json"));
        assert!(is_manifest_path("/app/package.json"));
        assert!(!is_manifest_path("/package.json.bak"));
        assert!(!is_manifest_path("/my-package.json"));
    }

    #[test]
    fn test_default_manifest_has_baseline() {
        let manifest = parse(&default_manifest());
        assert_eq!(manifest["name"], "generated-app");
        assert_eq!(manifest["dependencies"]["react"], "^18.2.0");
        assert_eq!(manifest["dependencies"]["react-dom"], "^18.2.0");
    }

    #[test]
    fn test_invalid_json_is_replaced() {
        assert_eq!(repair_manifest("{bad json}"), default_manifest());
        assert_eq!(repair_manifest(""), default_manifest());
    }

    #[test]
    fn test_non_object_is_replaced() {
        assert_eq!(repair_manifest("[1, 2]"), default_manifest());
    }

    #[test]
    fn test_missing_dependencies_are_added() {
        let manifest = parse(&repair_manifest(r#"{"name": "todo"}"#));
        assert_eq!(manifest["name"], "todo");
        assert_eq!(manifest["dependencies"]["react"], "^18.2.0");
        assert_eq!(manifest["dependencies"]["react-dom"], "^18.2.0");
    }

    #[test]
    fn test_model_versions_are_kept() {
        let manifest = parse(&repair_manifest(
            r#"{"dependencies": {"react": "17.0.2", "axios": "^1.6.0"}}"#,
        ));
        assert_eq!(manifest["dependencies"]["react"], "17.0.2");
        assert_eq!(manifest["dependencies"]["axios"], "^1.6.0");
        assert_eq!(manifest["dependencies"]["react-dom"], "^18.2.0");
    }

    #[test]
    fn test_non_object_dependencies_are_replaced() {
        let manifest = parse(&repair_manifest(r#"{"dependencies": "react"}"#));
        assert_eq!(manifest["dependencies"]["react"], "^18.2.0");
    }

    #[test]
    fn test_declared_dependencies() {
        let declared = declared_dependencies(
            r#"{"dependencies": {"axios": "^1.6.0", "weird": 3}, "devDependencies": {"vite": "5"}}"#,
        );
        assert_eq!(declared, vec![("axios".to_string(), "^1.6.0".to_string())]);
        assert!(declared_dependencies("nope").is_empty());
    }
}
