use crate::prelude::{println, *};
use colored::Colorize;
use std::path::{Component, Path, PathBuf};
use webgen_core::materialize::FileMap;
use webgen_core::preview::PreviewBundle;

/// Map a project path such as `/src/App.js` onto `root`.
///
/// Rejects paths that would escape `root`.
pub fn resolve_target(root: &Path, project_path: &str) -> Result<PathBuf> {
    let relative = Path::new(project_path.trim_start_matches('/'));
    let mut target = root.to_path_buf();

    for component in relative.components() {
        match component {
            Component::Normal(part) => target.push(part),
            Component::CurDir => {}
            _ => return Err(Error::UnsafePath(project_path.to_string()).into()),
        }
    }

    if target == root {
        return Err(Error::UnsafePath(project_path.to_string()).into());
    }

    Ok(target)
}

/// Write every file of the map below `root`, creating directories as needed.
///
/// All targets are resolved before the first write, so an unsafe path leaves
/// `root` untouched.
pub fn write_project(root: &Path, files: &FileMap) -> Result<Vec<PathBuf>> {
    let targets = files
        .iter()
        .map(|(path, content)| resolve_target(root, path).map(|target| (target, content)))
        .collect::<Result<Vec<_>>>()?;

    let mut written = Vec::with_capacity(targets.len());
    for (target, content) in targets {
        if let Some(parent) = target.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| eyre!("Failed to create {}: {}", parent.display(), e))?;
        }
        std::fs::write(&target, content)
            .map_err(|e| eyre!("Failed to write {}: {}", target.display(), e))?;
        log::debug!("Wrote {}", target.display());
        written.push(target);
    }

    Ok(written)
}

pub fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    let json_output = serde_json::to_string_pretty(value)
        .map_err(|e| eyre!("Failed to serialize output: {}", e))?;
    println!("{}", json_output);
    Ok(())
}

/// Human readable summary of a bundle.
pub fn print_bundle(bundle: &PreviewBundle, fallback: bool) {
    if fallback {
        println!(
            "\n{}",
            "The model response could not be parsed, showing the fallback project."
                .yellow()
                .bold()
        );
    }

    println!("\n{} ({}):", "Files".bold().cyan(), bundle.files.len());
    for (path, content) in &bundle.files {
        let marker = if *path == bundle.entry { " (entry)" } else { "" };
        println!(
            "  {}{} {}",
            path.bright_white(),
            marker.bright_green(),
            f!("{} bytes", content.len()).dimmed()
        );
    }

    print_dependencies(&bundle.dependencies);
}

pub fn print_dependencies(dependencies: &webgen_core::deps::DependencyMap) {
    println!("\n{} ({}):", "Dependencies".bold().cyan(), dependencies.len());
    for (name, version) in dependencies {
        println!("  {} {}", name.bright_magenta(), version.bright_yellow());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_target() {
        let root = Path::new("/tmp/out");
        assert_eq!(
            resolve_target(root, "/src/App.js").unwrap(),
            PathBuf::from("/tmp/out/src/App.js")
        );
        assert_eq!(
            resolve_target(root, "./index.html").unwrap(),
            PathBuf::from("/tmp/out/index.html")
        );
    }

    #[test]
    fn test_resolve_target_rejects_escapes() {
        let root = Path::new("/tmp/out");
        assert!(resolve_target(root, "/../etc/passwd").is_err());
        assert!(resolve_target(root, "src/../../x.js").is_err());
        assert!(resolve_target(root, "/").is_err());
    }

    #[test]
    fn test_write_project() {
        let dir = tempfile::tempdir().unwrap();
        let mut files = FileMap::new();
        files.insert("/App.js".to_string(), "export default 1;".to_string());
        files.insert(
            "/src/components/Button.js".to_string(),
            "export const Button = 1;".to_string(),
        );

        let written = write_project(dir.path(), &files).unwrap();

        assert_eq!(written.len(), 2);
        assert_eq!(
            std::fs::read_to_string(dir.path().join("App.js")).unwrap(),
            "export default 1;"
        );
        assert_eq!(
            std::fs::read_to_string(dir.path().join("src/components/Button.js")).unwrap(),
            "export const Button = 1;"
        );
    }

    #[test]
    fn test_write_project_unsafe_path() {
        let dir = tempfile::tempdir().unwrap();
        let mut files = FileMap::new();
        files.insert("/../escape.js".to_string(), String::new());

        let err = write_project(dir.path(), &files).unwrap_err();
        assert!(err.to_string().contains("Refusing to write"));
        assert!(!dir.path().parent().unwrap().join("escape.js").exists());
    }

    #[test]
    fn test_write_project_is_all_or_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let mut files = FileMap::new();
        files.insert("/App.js".to_string(), "app".to_string());
        files.insert("/index.html".to_string(), "<html></html>".to_string());
        files.insert("/src/../../x.js".to_string(), "escape".to_string());

        assert!(write_project(dir.path(), &files).is_err());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}
