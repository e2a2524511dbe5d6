//! Best-effort package dependency inference for a materialized project.

pub mod heuristics;
pub mod imports;

use std::collections::BTreeMap;

use crate::materialize::manifest::{declared_dependencies, BASELINE_DEPENDENCIES, ROOT_MANIFEST};
use crate::materialize::FileMap;

pub use heuristics::detect_packages;
pub use imports::{import_specifiers, package_name};

/// Package name to version specifier (semver range or `latest`).
pub type DependencyMap = BTreeMap<String, String>;

const SOURCE_EXTENSIONS: [&str; 6] = [".js", ".jsx", ".ts", ".tsx", ".mjs", ".cjs"];

/// The framework runtime itself never needs to be added from an import.
const FRAMEWORK_RUNTIME: &str = "react";

pub fn is_source_path(path: &str) -> bool {
    SOURCE_EXTENSIONS.iter().any(|ext| path.ends_with(ext))
}

pub fn is_stylesheet_path(path: &str) -> bool {
    path.ends_with(".css")
}

fn add(dependencies: &mut DependencyMap, name: &str, version: &str) {
    dependencies
        .entry(name.to_string())
        .or_insert_with(|| version.to_string());
}

/// Infer the packages a project needs.
///
/// Passes run in a fixed order and never overwrite an earlier entry: baseline
/// runtime, versions declared in the root manifest, usage heuristics, then
/// bare import specifiers as `latest`. The result does not depend on the
/// order files are visited in.
pub fn infer(files: &FileMap) -> DependencyMap {
    let mut dependencies = DependencyMap::new();

    for (name, version) in BASELINE_DEPENDENCIES {
        add(&mut dependencies, name, version);
    }

    if let Some(manifest) = files.get(ROOT_MANIFEST) {
        for (name, version) in declared_dependencies(manifest) {
            add(&mut dependencies, &name, &version);
        }
    }

    for (path, content) in files {
        let stylesheet = is_stylesheet_path(path);
        if !stylesheet && !is_source_path(path) {
            continue;
        }
        for (name, version) in detect_packages(content, stylesheet) {
            add(&mut dependencies, name, version);
        }
    }

    for (path, content) in files.iter().filter(|(path, _)| is_source_path(path)) {
        for specifier in import_specifiers(content) {
            let Some(name) = package_name(specifier) else {
                continue;
            };
            if name == FRAMEWORK_RUNTIME {
                continue;
            }
            if !dependencies.contains_key(name) {
                log::debug!("{path} imports {name}, adding it as latest");
                add(&mut dependencies, name, "latest");
            }
        }
    }

    dependencies
}
