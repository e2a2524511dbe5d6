use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;

static FENCED_JSON_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)```json[^\n]*\n(.*?)```").expect("valid fenced json regex"));

static FENCED_ANY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)```[^\n]*\n(.*?)```").expect("valid fenced block regex"));

/// JSON object candidates in preference order: ```json blocks, other fenced
/// blocks starting with `{`, then the text between the outermost braces.
pub fn candidates(raw: &str) -> Vec<&str> {
    let mut found: Vec<&str> = Vec::new();

    for caps in FENCED_JSON_RE.captures_iter(raw) {
        if let Some(m) = caps.get(1) {
            found.push(m.as_str().trim());
        }
    }

    for caps in FENCED_ANY_RE.captures_iter(raw) {
        if let Some(m) = caps.get(1) {
            let body = m.as_str().trim();
            if body.starts_with('{') && !found.contains(&body) {
                found.push(body);
            }
        }
    }

    if let (Some(start), Some(end)) = (raw.find('{'), raw.rfind('}')) {
        if start < end {
            let body = &raw[start..=end];
            if !found.contains(&body) {
                found.push(body);
            }
        }
    }

    found
}

/// Best-effort repair of model-written JSON.
///
/// Removes a BOM, escapes raw control characters and stray backslashes inside
/// string literals, and drops trailing commas before `}` or `]`.
pub fn repair_json(text: &str) -> String {
    let chars: Vec<char> = text.trim_start_matches('\u{feff}').chars().collect();
    let mut out = String::with_capacity(chars.len());
    let mut in_string = false;
    let mut escaped = false;

    for (idx, &c) in chars.iter().enumerate() {
        if in_string {
            if escaped {
                out.push(c);
                escaped = false;
                continue;
            }
            match c {
                '\\' => {
                    let next = chars.get(idx + 1).copied();
                    if matches!(
                        next,
                        Some('"' | '\\' | '/' | 'b' | 'f' | 'n' | 'r' | 't' | 'u')
                    ) {
                        out.push(c);
                        escaped = true;
                    } else {
                        out.push_str("\\\\");
                    }
                }
                '"' => {
                    out.push(c);
                    in_string = false;
                }
                '\n' => out.push_str("\\n"),
                '\r' => out.push_str("\\r"),
                '\t' => out.push_str("\\t"),
                _ => out.push(c),
            }
        } else {
            match c {
                '"' => {
                    out.push(c);
                    in_string = true;
                }
                ',' => {
                    let next = chars[idx + 1..].iter().find(|c| !c.is_whitespace());
                    if !matches!(next, Some('}' | ']')) {
                        out.push(c);
                    }
                }
                _ => out.push(c),
            }
        }
    }

    out
}

/// Strict parse, then a second attempt on the repaired text.
pub fn parse_lenient(text: &str) -> Option<Value> {
    serde_json::from_str(text)
        .or_else(|_| serde_json::from_str(&repair_json(text)))
        .ok()
}

/// Extract `(path, content)` pairs from a `{ "files": ... }` document.
///
/// `files` may be an object keyed by path or an array of
/// `{ path | filename | name, content | code }` entries. Returns `None` when the
/// candidate is not such a document.
pub fn extract_files(candidate: &str) -> Option<Vec<(String, String)>> {
    let value = parse_lenient(candidate)?;

    match value.get("files")? {
        Value::Object(map) => Some(
            map.iter()
                .map(|(path, content)| (path.clone(), content_to_string(content)))
                .collect(),
        ),
        Value::Array(items) => Some(
            items
                .iter()
                .filter_map(|item| {
                    let path = ["path", "filename", "name"]
                        .iter()
                        .find_map(|key| item.get(*key).and_then(Value::as_str))?;
                    let content = ["content", "code"]
                        .iter()
                        .find_map(|key| item.get(*key))
                        .map(content_to_string)
                        .unwrap_or_default();
                    Some((path.to_string(), content))
                })
                .collect(),
        ),
        _ => None,
    }
}

fn content_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => serde_json::to_string_pretty(other).unwrap_or_else(|_| other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candidates_prefer_json_fence() {
        let raw = "Here:\n```js\n{\"a\": 1}\n```\n```json\n{\"files\": {}}\n```";
        let found = candidates(raw);
        assert_eq!(found[0], "{\"files\": {}}");
        assert_eq!(found[1], "{\"a\": 1}");
    }

    #[test]
    fn test_candidates_whole_text() {
        let raw = "Result: {\"files\": {\"/a.js\": \"x\"}} done";
        assert_eq!(candidates(raw), vec!["{\"files\": {\"/a.js\": \"x\"}}"]);
    }

    #[test]
    fn test_candidates_none() {
        assert!(candidates("no braces here").is_empty());
    }

    #[test]
    fn test_repair_trailing_commas() {
        let repaired = repair_json("{\"a\": [1, 2,], \"b\": 3,\n}");
        let value: Value = serde_json::from_str(&repaired).unwrap();
        assert_eq!(value["a"][1], 2);
        assert_eq!(value["b"], 3);
    }

    #[test]
    fn test_repair_raw_newlines_in_strings() {
        let repaired = repair_json("{\"code\": \"line1\nline2\tend\"}");
        let value: Value = serde_json::from_str(&repaired).unwrap();
        assert_eq!(value["code"], "line1\nline2\tend");
    }

    #[test]
    fn test_repair_keeps_commas_inside_strings() {
        let repaired = repair_json("{\"a\": \"x, }\"}");
        let value: Value = serde_json::from_str(&repaired).unwrap();
        assert_eq!(value["a"], "x, }");
    }

    #[test]
    fn test_repair_invalid_escape() {
        let repaired = repair_json(r#"{"re": "\d+\.\w", "q": "say \"hi\""}"#);
        let value: Value = serde_json::from_str(&repaired).unwrap();
        assert_eq!(value["re"], r"\d+\.\w");
        assert_eq!(value["q"], "say \"hi\"");
    }

    #[test]
    fn test_extract_files_object() {
        let files = extract_files(r#"{"files": {"/App.js": "x", "package.json": {"name": "a"}}}"#)
            .unwrap();
        assert_eq!(files[0], ("/App.js".to_string(), "x".to_string()));
        assert_eq!(files[1].0, "package.json");
        let manifest: Value = serde_json::from_str(&files[1].1).unwrap();
        assert_eq!(manifest["name"], "a");
    }

    #[test]
    fn test_extract_files_array() {
        let files = extract_files(
            r#"{"files": [{"filename": "App.js", "content": "a"}, {"path": "b.css", "code": "b"}, {"content": "orphan"}]}"#,
        )
        .unwrap();
        assert_eq!(
            files,
            vec![
                ("App.js".to_string(), "a".to_string()),
                ("b.css".to_string(), "b".to_string()),
            ]
        );
    }

    #[test]
    fn test_extract_files_requires_files_key() {
        assert_eq!(extract_files(r#"{"name": "x"}"#), None);
        assert_eq!(extract_files(r#"{"files": "nope"}"#), None);
        assert_eq!(extract_files("not json"), None);
    }
}
