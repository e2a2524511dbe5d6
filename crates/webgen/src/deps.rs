use crate::output::{print_dependencies, print_json};
use crate::prelude::{eprintln, *};
use ignore::WalkBuilder;
use std::path::{Path, PathBuf};
use webgen_core::deps::{infer, is_source_path, is_stylesheet_path, DependencyMap};
use webgen_core::materialize::manifest::is_manifest_path;
use webgen_core::materialize::FileMap;

/// Files larger than this are skipped.
const MAX_FILE_BYTES: u64 = 1024 * 1024;

#[derive(Debug, clap::Args)]
pub struct DepsOptions {
    /// Project directory to scan
    #[arg(default_value = ".")]
    dir: PathBuf,

    /// Output as JSON
    #[arg(long)]
    json: bool,
}

fn is_relevant(path: &str) -> bool {
    is_source_path(path) || is_stylesheet_path(path) || is_manifest_path(path)
}

/// Load the files of a project directory that take part in inference.
///
/// Honors `.gitignore` and skips `node_modules`.
pub fn load_project(root: &Path) -> Result<FileMap> {
    if !root.is_dir() {
        return Err(eyre!("{} is not a directory", root.display()));
    }

    let mut files = FileMap::new();
    let walker = WalkBuilder::new(root)
        .filter_entry(|entry| entry.file_name() != "node_modules")
        .build();

    for entry in walker {
        let entry = entry.map_err(|e| eyre!("Failed to walk {}: {}", root.display(), e))?;
        if !entry.file_type().is_some_and(|t| t.is_file()) {
            continue;
        }

        let relative = match entry.path().strip_prefix(root) {
            Ok(relative) => relative,
            Err(_) => continue,
        };
        let key = f!("/{}", relative.to_string_lossy().replace('\\', "/"));
        if !is_relevant(&key) {
            continue;
        }

        if entry.metadata().map(|m| m.len()).unwrap_or(0) > MAX_FILE_BYTES {
            log::warn!("Skipping large file {}", entry.path().display());
            continue;
        }

        match std::fs::read_to_string(entry.path()) {
            Ok(content) => {
                files.insert(key, content);
            }
            Err(e) => log::warn!("Skipping {}: {}", entry.path().display(), e),
        }
    }

    Ok(files)
}

/// Infer the dependencies of a project directory
pub fn deps_data(root: &Path) -> Result<DependencyMap> {
    let files = load_project(root)?;
    log::debug!("Scanned {} files in {}", files.len(), root.display());
    Ok(infer(&files))
}

/// Handle the deps command
pub async fn run(options: DepsOptions, global: crate::Global) -> Result<()> {
    if global.verbose {
        eprintln!("Scanning {}", options.dir.display());
        eprintln!();
    }

    let dependencies = deps_data(&options.dir)?;

    if options.json {
        return print_json(&dependencies);
    }

    print_dependencies(&dependencies);
    Ok(())
}
