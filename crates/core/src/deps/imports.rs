use regex::Regex;
use std::sync::LazyLock;

static IMPORT_FROM_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?m)^\s*(?:import|export)\s[^'";]*?\bfrom\s*["']([^"'\n]+)["']"#)
        .expect("valid import regex")
});

static SIDE_EFFECT_IMPORT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?m)^\s*import\s*["']([^"'\n]+)["']"#).expect("valid side-effect import regex")
});

/// Module specifiers of the top-level `import`/`export ... from` statements.
pub fn import_specifiers(source: &str) -> Vec<&str> {
    IMPORT_FROM_RE
        .captures_iter(source)
        .chain(SIDE_EFFECT_IMPORT_RE.captures_iter(source))
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
        .collect()
}

/// npm package a bare specifier resolves to.
///
/// `@scope/pkg/sub` is `@scope/pkg`, `lodash/debounce` is `lodash`. Relative
/// and absolute paths, `@/` and `~` aliases, URLs and `node:` builtins are not
/// packages.
pub fn package_name(specifier: &str) -> Option<&str> {
    let specifier = specifier.trim();

    if specifier.is_empty()
        || specifier.starts_with('.')
        || specifier.starts_with('/')
        || specifier.starts_with('~')
        || specifier.starts_with("@/")
        || specifier.starts_with("node:")
        || specifier.contains("://")
        || specifier.chars().any(char::is_whitespace)
    {
        return None;
    }

    if specifier.starts_with('@') {
        let mut segments = specifier.splitn(3, '/');
        let scope = segments.next()?;
        let name = segments.next().filter(|name| !name.is_empty())?;
        let len = scope.len() + 1 + name.len();
        return Some(&specifier[..len]);
    }

    specifier.split('/').next().filter(|name| !name.is_empty())
}
