use serde::{Deserialize, Serialize};

use crate::deps::DependencyMap;
use crate::materialize::skeleton::find_bootstrap;
use crate::materialize::FileMap;

/// Entry used when no file follows the index naming convention.
pub const DEFAULT_PREVIEW_ENTRY: &str = "/index.js";

/// Payload handed to the sandboxed preview environment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreviewBundle {
    pub files: FileMap,
    pub dependencies: DependencyMap,
    pub entry: String,
}

impl PreviewBundle {
    pub fn assemble(files: FileMap, dependencies: DependencyMap) -> Self {
        let entry = resolve_entry(&files);
        Self {
            files,
            dependencies,
            entry,
        }
    }
}

/// The bootstrap module: `index.{js,jsx,ts,tsx}` in `/`, then in `/src`.
///
/// Materialized projects always have one; other maps fall back to `/index.js`.
pub fn resolve_entry(files: &FileMap) -> String {
    find_bootstrap(files).unwrap_or_else(|| DEFAULT_PREVIEW_ENTRY.to_string())
}
