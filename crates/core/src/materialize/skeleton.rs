//! Required project files and the fallback project.

use regex::Regex;
use std::sync::LazyLock;

use super::manifest::{default_manifest, ROOT_MANIFEST};
use super::path::{parent_dir, relative_import};
use super::FileMap;

static ENTRY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:^|/)App\.(?:js|jsx|ts|tsx)$").expect("valid entry regex"));

static BOOTSTRAP_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^/(?:src/)?index\.(?:js|jsx|ts|tsx)$").expect("valid bootstrap regex")
});

static MAIN_MODULE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^/(?:src/)?main\.(?:js|jsx|ts|tsx)$").expect("valid main module regex")
});

static TAILWIND_DIRECTIVE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"@tailwind\b|@import[^;\n]*tailwind").expect("valid tailwind directive regex")
});

pub const DEFAULT_ENTRY: &str = "/App.js";
pub const DEFAULT_STYLESHEET: &str = "/styles.css";
pub const ALTERNATE_STYLESHEET: &str = "/tailwind.css";
pub const DEFAULT_HTML: &str = "/index.html";
pub const TAILWIND_CONFIG: &str = "/tailwind.config.js";

/// Directories a bootstrap module may live in, in lookup order.
pub const BOOTSTRAP_DIRS: [&str; 2] = ["/", "/src"];

const STYLESHEET_TEMPLATE: &str = r#"@import url('https://cdn.jsdelivr.net/npm/tailwindcss@2.2.19/dist/tailwind.min.css');

body {
  font-family: ui-sans-serif, system-ui, -apple-system, sans-serif;
  margin: 0;
  padding: 0;
}

.container-center {
  display: flex;
  align-items: center;
  justify-content: center;
  min-height: 100vh;
}

.card {
  background: #ffffff;
  border-radius: 0.5rem;
  box-shadow: 0 10px 15px -3px rgba(0, 0, 0, 0.1);
  padding: 1.5rem;
}
"#;

const ENTRY_TEMPLATE: &str = r#"import React from "react";

export default function App() {
  return (
    <div className="flex items-center justify-center min-h-screen bg-gray-100">
      <div className="p-6 bg-white rounded-lg shadow-lg">
        <h1 className="text-2xl font-bold text-center">Welcome to your app!</h1>
        <p className="mt-2 text-gray-600 text-center">
          This is a default app created by the Text to Web Generator.
        </p>
      </div>
    </div>
  );
}
"#;

const FALLBACK_ENTRY_TEMPLATE: &str = r#"import React from "react";

export default function App() {
  return (
    <div className="flex items-center justify-center min-h-screen bg-gray-100">
      <div className="p-6 bg-white rounded-lg shadow-lg">
        <h1 className="text-2xl font-bold text-center">Error Processing Response</h1>
        <p className="mt-2 text-gray-600 text-center">
          There was an error processing the AI response. Please try again with a more detailed prompt.
        </p>
      </div>
    </div>
  );
}
"#;

const HTML_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
  <head>
    <meta charset="UTF-8" />
    <meta name="viewport" content="width=device-width, initial-scale=1.0" />
    <title>Generated App</title>
  </head>
  <body>
    <div id="root"></div>
  </body>
</html>
"#;

const TAILWIND_CONFIG_TEMPLATE: &str = r#"/** @type {import('tailwindcss').Config} */
module.exports = {
  content: ["./**/*.{js,jsx,ts,tsx,html}"],
  theme: {
    extend: {},
  },
  plugins: [],
};
"#;

/// Path follows the `App.{js,jsx,ts,tsx}` entry component convention.
pub fn is_entry_path(path: &str) -> bool {
    ENTRY_RE.is_match(path)
}

/// `index.{js,jsx,ts,tsx}` at the root or in `/src`.
///
/// Nested `index` modules are barrel files, not bootstraps.
pub fn is_bootstrap_path(path: &str) -> bool {
    BOOTSTRAP_RE.is_match(path)
}

/// Vite-style `main.{js,jsx,ts,tsx}` at the root or in `/src`.
pub fn is_main_module_path(path: &str) -> bool {
    MAIN_MODULE_RE.is_match(path)
}

/// First module matching `accept`, looking in [`BOOTSTRAP_DIRS`] order.
fn find_in_bootstrap_dirs(files: &FileMap, accept: impl Fn(&str) -> bool) -> Option<String> {
    BOOTSTRAP_DIRS.iter().find_map(|dir| {
        files
            .keys()
            .find(|path| parent_dir(path) == *dir && accept(path))
            .cloned()
    })
}

/// The module the preview starts from, if the project has one.
pub fn find_bootstrap(files: &FileMap) -> Option<String> {
    find_in_bootstrap_dirs(files, is_bootstrap_path)
}

pub fn is_html_path(path: &str) -> bool {
    path.ends_with(".html")
}

/// Stylesheet that pulls in Tailwind.
pub fn has_tailwind_directive(path: &str, content: &str) -> bool {
    path.ends_with(".css") && TAILWIND_DIRECTIVE_RE.is_match(content)
}

fn bootstrap_source(entry_path: &str, stylesheet: Option<&str>, dir: &str) -> String {
    let mut source = String::from("import React from \"react\";\n");
    source.push_str("import { createRoot } from \"react-dom/client\";\n");
    source.push_str(&format!(
        "import App from \"{}\";\n",
        relative_import(dir, strip_extension(entry_path))
    ));
    if let Some(stylesheet) = stylesheet {
        source.push_str(&format!(
            "import \"{}\";\n",
            relative_import(dir, stylesheet)
        ));
    }
    source.push_str(
        "\nconst rootElement = document.getElementById(\"root\");\n\
         const root = createRoot(rootElement);\n\
         root.render(<App />);\n",
    );
    source
}

fn main_shim_source(main_path: &str, stylesheet: Option<&str>) -> String {
    let dir = parent_dir(main_path);
    let mut source = String::new();
    if let Some(stylesheet) = stylesheet {
        source.push_str(&format!(
            "import \"{}\";\n",
            relative_import(dir, stylesheet)
        ));
    }
    source.push_str(&format!(
        "import \"{}\";\n",
        relative_import(dir, strip_extension(main_path))
    ));
    source
}

fn strip_extension(path: &str) -> &str {
    match path.rfind('.') {
        Some(idx) if idx > path.rfind('/').unwrap_or(0) => &path[..idx],
        _ => path,
    }
}

fn index_path(dir: &str) -> String {
    if dir == "/" {
        "/index.js".to_string()
    } else {
        format!("{dir}/index.js")
    }
}

/// Add whatever a runnable project is missing. Existing files are never modified.
///
/// Checked in order: root manifest, Tailwind stylesheet, `App` entry
/// component, bootstrap module, HTML shell. A missing bootstrap is created in
/// `/` or `/src`: next to a Vite `main` module, which it imports, or else next
/// to the entry component when that lives in one of those directories.
pub fn ensure_required_files(files: &mut FileMap) {
    if !files.contains_key(ROOT_MANIFEST) {
        log::debug!("Synthesizing {ROOT_MANIFEST}");
        files.insert(ROOT_MANIFEST.to_string(), default_manifest());
    }

    let mut stylesheet = files
        .iter()
        .find(|(path, content)| has_tailwind_directive(path, content))
        .map(|(path, _)| path.clone());

    if stylesheet.is_none() {
        let path = if files.contains_key(DEFAULT_STYLESHEET) {
            ALTERNATE_STYLESHEET
        } else {
            DEFAULT_STYLESHEET
        };
        log::debug!("Synthesizing {path}");
        files.insert(path.to_string(), STYLESHEET_TEMPLATE.to_string());
        stylesheet = Some(path.to_string());
    }

    let existing_entry = files.keys().find(|path| is_entry_path(path)).cloned();
    let entry = match existing_entry {
        Some(entry) => entry,
        None => {
            log::debug!("Synthesizing {DEFAULT_ENTRY}");
            files.insert(DEFAULT_ENTRY.to_string(), ENTRY_TEMPLATE.to_string());
            DEFAULT_ENTRY.to_string()
        }
    };

    if find_bootstrap(files).is_none() {
        let (path, source) = match find_in_bootstrap_dirs(files, is_main_module_path) {
            Some(main) => (
                index_path(parent_dir(&main)),
                main_shim_source(&main, stylesheet.as_deref()),
            ),
            None => {
                let dir = match parent_dir(&entry) {
                    dir if BOOTSTRAP_DIRS.contains(&dir) => dir,
                    _ => "/",
                };
                (
                    index_path(dir),
                    bootstrap_source(&entry, stylesheet.as_deref(), dir),
                )
            }
        };
        log::debug!("Synthesizing {path}");
        files.insert(path, source);
    }

    if !files.keys().any(|path| is_html_path(path)) {
        log::debug!("Synthesizing {DEFAULT_HTML}");
        files.insert(DEFAULT_HTML.to_string(), HTML_TEMPLATE.to_string());
    }
}

/// The project substituted when a reply cannot be parsed at all.
///
/// Built from the same required-file pass as a repaired project, so both
/// outcomes have the same shape.
pub fn fallback_project() -> FileMap {
    let mut files = FileMap::new();
    files.insert(
        DEFAULT_ENTRY.to_string(),
        FALLBACK_ENTRY_TEMPLATE.to_string(),
    );
    files.insert(
        TAILWIND_CONFIG.to_string(),
        TAILWIND_CONFIG_TEMPLATE.to_string(),
    );
    ensure_required_files(&mut files);
    files
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(files: &FileMap) -> Vec<&str> {
        files.keys().map(String::as_str).collect()
    }

    #[test]
    fn test_naming_conventions() {
        assert!(is_entry_path("/App.js"));
        assert!(is_entry_path("/src/App.tsx"));
        assert!(!is_entry_path("/MyApp.js"));
        assert!(!is_entry_path("/App.css"));
        assert!(is_bootstrap_path("/index.js"));
        assert!(is_bootstrap_path("/src/index.tsx"));
        assert!(!is_bootstrap_path("/src/main.jsx"));
        assert!(!is_bootstrap_path("/components/index.js"));
        assert!(!is_bootstrap_path("/index.html"));
        assert!(is_main_module_path("/src/main.jsx"));
        assert!(!is_main_module_path("/lib/main.js"));
    }

    #[test]
    fn test_tailwind_directive() {
        assert!(has_tailwind_directive("/a.css", "@tailwind base;"));
        assert!(has_tailwind_directive(
            "/a.css",
            "@import url('https://cdn.jsdelivr.net/npm/tailwindcss@2/dist/tailwind.min.css');"
        ));
        assert!(has_tailwind_directive("/a.css", "@import \"tailwindcss\";"));
        assert!(!has_tailwind_directive("/a.css", "body { margin: 0 }"));
        assert!(!has_tailwind_directive("/a.js", "@tailwind base;"));
    }

    #[test]
    fn test_empty_map_gets_full_skeleton() {
        let mut files = FileMap::new();
        ensure_required_files(&mut files);
        assert_eq!(
            keys(&files),
            vec![
                "/App.js",
                "/index.html",
                "/index.js",
                "/package.json",
                "/styles.css"
            ]
        );
        assert!(files["/index.js"].contains("import App from \"./App\";"));
        assert!(files["/index.js"].contains("import \"./styles.css\";"));
        assert!(files["/index.html"].contains("<div id=\"root\"></div>"));
    }

    #[test]
    fn test_existing_files_are_untouched() {
        let mut files = FileMap::new();
        files.insert("/styles.css".to_string(), "body { margin: 0 }".to_string());
        files.insert("/App.jsx".to_string(), "app".to_string());
        ensure_required_files(&mut files);

        assert_eq!(files["/styles.css"], "body { margin: 0 }");
        assert_eq!(files["/App.jsx"], "app");
        assert!(has_tailwind_directive("/tailwind.css", &files["/tailwind.css"]));
        assert!(files["/index.js"].contains("import App from \"./App\";"));
        assert!(files["/index.js"].contains("import \"./tailwind.css\";"));
        assert!(!files.contains_key("/App.js"));
    }

    #[test]
    fn test_bootstrap_next_to_nested_entry() {
        let mut files = FileMap::new();
        files.insert("/src/App.tsx".to_string(), "app".to_string());
        files.insert("/src/index.css".to_string(), "@tailwind base;".to_string());
        ensure_required_files(&mut files);

        let bootstrap = &files["/src/index.js"];
        assert!(bootstrap.contains("import App from \"./App\";"));
        assert!(bootstrap.contains("import \"./index.css\";"));
        assert!(!files.contains_key("/index.js"));
        assert!(!files.contains_key("/styles.css"));
    }

    #[test]
    fn test_existing_bootstrap_and_html_are_respected() {
        let mut files = FileMap::new();
        files.insert("/src/index.jsx".to_string(), "boot".to_string());
        files.insert("/public/index.html".to_string(), "<html></html>".to_string());
        ensure_required_files(&mut files);

        assert!(!files.contains_key("/index.js"));
        assert!(!files.contains_key("/src/index.js"));
        assert!(!files.contains_key("/index.html"));
        assert_eq!(files["/src/index.jsx"], "boot");
        assert_eq!(find_bootstrap(&files).as_deref(), Some("/src/index.jsx"));
    }

    #[test]
    fn test_vite_main_module_gets_index_shim() {
        let mut files = FileMap::new();
        files.insert("/src/App.jsx".to_string(), "app".to_string());
        files.insert("/src/main.jsx".to_string(), "main".to_string());
        ensure_required_files(&mut files);

        assert_eq!(
            files["/src/index.js"],
            "import \"../styles.css\";\nimport \"./main\";\n"
        );
        assert_eq!(files["/src/main.jsx"], "main");
        assert_eq!(find_bootstrap(&files).as_deref(), Some("/src/index.js"));
    }

    #[test]
    fn test_barrel_index_is_not_a_bootstrap() {
        let mut files = FileMap::new();
        files.insert("/App.js".to_string(), "app".to_string());
        files.insert("/components/index.js".to_string(), "export * from './Button';".to_string());
        ensure_required_files(&mut files);

        assert!(files["/index.js"].contains("import App from \"./App\";"));
        assert_eq!(files["/components/index.js"], "export * from './Button';");
        assert_eq!(find_bootstrap(&files).as_deref(), Some("/index.js"));
    }

    #[test]
    fn test_entry_outside_bootstrap_dirs() {
        let mut files = FileMap::new();
        files.insert("/app/App.tsx".to_string(), "app".to_string());
        ensure_required_files(&mut files);

        assert!(files["/index.js"].contains("import App from \"./app/App\";"));
        assert!(!files.contains_key("/app/index.js"));
    }

    #[test]
    fn test_fallback_project_shape() {
        let files = fallback_project();
        assert_eq!(
            keys(&files),
            vec![
                "/App.js",
                "/index.html",
                "/index.js",
                "/package.json",
                "/styles.css",
                "/tailwind.config.js"
            ]
        );
        assert!(files["/App.js"].contains("Error Processing Response"));
        assert_eq!(fallback_project(), files);
    }

    #[test]
    fn test_strip_extension() {
        assert_eq!(strip_extension("/src/App.tsx"), "/src/App");
        assert_eq!(strip_extension("/App"), "/App");
        assert_eq!(strip_extension("/v1.0/App"), "/v1.0/App");
    }
}
