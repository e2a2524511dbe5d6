/// Normalize a model-supplied path to a single leading `/`.
///
/// Strips surrounding quotes/backticks, converts backslashes, drops `.` and
/// empty segments and resolves `..` against the segments before it. Returns
/// `None` for blank paths and for paths that climb above the project root.
pub fn normalize_path(raw: &str) -> Option<String> {
    let trimmed = raw
        .trim()
        .trim_matches(|c| c == '`' || c == '"' || c == '\'')
        .trim();

    let mut segments: Vec<&str> = Vec::new();
    for segment in trimmed.split(['/', '\\']).map(str::trim) {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop()?;
            }
            _ => segments.push(segment),
        }
    }

    if segments.is_empty() {
        return None;
    }

    Some(format!("/{}", segments.join("/")))
}

/// Last path segment.
pub fn file_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

/// Directory part of a normalized path, `/` for root files.
pub fn parent_dir(path: &str) -> &str {
    match path.rfind('/') {
        Some(0) | None => "/",
        Some(idx) => &path[..idx],
    }
}

/// Relative import specifier from `from_dir` to `target`, both normalized.
///
/// `relative_import("/src", "/styles.css")` is `"../styles.css"`.
pub fn relative_import(from_dir: &str, target: &str) -> String {
    let from: Vec<&str> = from_dir.split('/').filter(|s| !s.is_empty()).collect();
    let to: Vec<&str> = target.split('/').filter(|s| !s.is_empty()).collect();

    let target_dir = &to[..to.len().saturating_sub(1)];
    let common = from
        .iter()
        .zip(target_dir.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let ups = from.len() - common;
    let rest = to[common..].join("/");

    if ups == 0 {
        format!("./{rest}")
    } else {
        format!("{}{rest}", "../".repeat(ups))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_adds_leading_slash() {
        assert_eq!(normalize_path("App.js").unwrap(), "/App.js");
        assert_eq!(normalize_path("src/App.js").unwrap(), "/src/App.js");
    }

    #[test]
    fn test_normalize_collapses_slashes() {
        assert_eq!(normalize_path("//src//App.js").unwrap(), "/src/App.js");
        assert_eq!(normalize_path("/App.js").unwrap(), "/App.js");
    }

    #[test]
    fn test_normalize_strips_dot_and_backslashes() {
        assert_eq!(normalize_path("./src/index.js").unwrap(), "/src/index.js");
        assert_eq!(
            normalize_path("src\\components\\Nav.jsx").unwrap(),
            "/src/components/Nav.jsx"
        );
    }

    #[test]
    fn test_normalize_strips_quotes() {
        assert_eq!(normalize_path(" `App.js` ").unwrap(), "/App.js");
        assert_eq!(normalize_path("\"styles.css\"").unwrap(), "/styles.css");
    }

    #[test]
    fn test_normalize_blank_is_none() {
        assert_eq!(normalize_path(""), None);
        assert_eq!(normalize_path("   "), None);
        assert_eq!(normalize_path("/"), None);
    }

    #[test]
    fn test_normalize_resolves_parent_segments() {
        assert_eq!(normalize_path("src/../App.js").unwrap(), "/App.js");
        assert_eq!(
            normalize_path("src/components/../hooks/useTodos.js").unwrap(),
            "/src/hooks/useTodos.js"
        );
    }

    #[test]
    fn test_normalize_rejects_paths_above_root() {
        assert_eq!(normalize_path("src/../../etc/x.js"), None);
        assert_eq!(normalize_path("../App.js"), None);
        assert_eq!(normalize_path("..\\..\\secrets.js"), None);
        assert_eq!(normalize_path("src/.."), None);
    }

    #[test]
    fn test_file_name_and_parent() {
        assert_eq!(file_name("/src/package.json"), "package.json");
        assert_eq!(parent_dir("/src/App.js"), "/src");
        assert_eq!(parent_dir("/App.js"), "/");
    }

    #[test]
    fn test_relative_import() {
        assert_eq!(relative_import("/", "/styles.css"), "./styles.css");
        assert_eq!(relative_import("/src", "/styles.css"), "../styles.css");
        assert_eq!(relative_import("/src", "/src/index.css"), "./index.css");
        assert_eq!(
            relative_import("/", "/src/styles/main.css"),
            "./src/styles/main.css"
        );
        assert_eq!(
            relative_import("/src/app", "/src/styles.css"),
            "../styles.css"
        );
    }
}
