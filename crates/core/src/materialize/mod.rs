//! Turn a raw model reply into a complete project file map.
//!
//! [`materialize`] never fails: anything it cannot interpret degrades to the
//! [`fallback_project`], and parseable replies are repaired until they contain
//! every file the preview needs.

pub mod delimiter;
pub mod detect;
pub mod fence;
pub mod json;
pub mod manifest;
pub mod path;
pub mod skeleton;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub use detect::{detect_format, WireFormat};
pub use fence::strip_code_fence;
pub use manifest::{default_manifest, repair_manifest, BASELINE_DEPENDENCIES};
pub use path::normalize_path;
pub use skeleton::{ensure_required_files, fallback_project};

/// Path (single leading `/`) to file content.
pub type FileMap = BTreeMap<String, String>;

/// Result of interpreting a reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", content = "files", rename_all = "lowercase")]
pub enum ParseOutcome {
    /// Files parsed from the reply, repaired and completed.
    Success(FileMap),
    /// The reply could not be interpreted; the fallback project.
    Fallback(FileMap),
}

impl ParseOutcome {
    pub fn files(&self) -> &FileMap {
        match self {
            ParseOutcome::Success(files) | ParseOutcome::Fallback(files) => files,
        }
    }

    pub fn into_files(self) -> FileMap {
        match self {
            ParseOutcome::Success(files) | ParseOutcome::Fallback(files) => files,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, ParseOutcome::Fallback(_))
    }
}

/// Parse a raw reply into a runnable project.
pub fn materialize(raw: &str) -> ParseOutcome {
    let entries = match detect_format(raw) {
        WireFormat::Delimiter(body) => delimiter::extract_blocks(body),
        WireFormat::Json(candidates) => {
            match candidates.into_iter().find_map(json::extract_files) {
                Some(entries) => entries,
                None => {
                    log::warn!("Reply looks like JSON but no candidate could be parsed");
                    Vec::new()
                }
            }
        }
        WireFormat::Unrecognized => {
            log::warn!("Reply contains no file envelope or JSON document, using fallback project");
            return ParseOutcome::Fallback(fallback_project());
        }
    };

    let mut files = collect_files(entries);

    if files.is_empty() {
        log::warn!("No files could be extracted from the reply, using fallback project");
        return ParseOutcome::Fallback(fallback_project());
    }

    ensure_required_files(&mut files);
    ParseOutcome::Success(files)
}

/// Normalize paths, strip fences and repair manifests. Last write wins.
fn collect_files(entries: Vec<(String, String)>) -> FileMap {
    let mut files = FileMap::new();

    for (raw_path, content) in entries {
        let Some(path) = normalize_path(&raw_path) else {
            log::warn!("Skipping file with a blank or out-of-root path: {raw_path:?}");
            continue;
        };

        let content = strip_code_fence(&content);
        let content = if manifest::is_manifest_path(&path) {
            repair_manifest(&content)
        } else {
            content
        };

        log::debug!("Extracted {path} ({} bytes)", content.len());
        if files.insert(path.clone(), content).is_some() {
            log::debug!("{path} appeared more than once, keeping the last one");
        }
    }

    files
}
