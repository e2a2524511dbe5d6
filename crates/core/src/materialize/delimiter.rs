use regex::Regex;
use std::sync::LazyLock;

pub const FILES_OPEN: &str = "---FILES---";
pub const FILES_CLOSE: &str = "---ENDFILES---";

static FILE_BLOCK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)---FILE:([^\n]*?)---(.*?)---ENDFILE---").expect("valid file block regex")
});

/// Body of the `---FILES---` envelope.
///
/// A missing `---ENDFILES---` is tolerated and the body runs to the end of the
/// text, which is what a reply cut off by the token limit looks like.
pub fn envelope_body(raw: &str) -> Option<&str> {
    let start = raw.find(FILES_OPEN)? + FILES_OPEN.len();
    let rest = &raw[start..];

    match rest.find(FILES_CLOSE) {
        Some(end) => Some(&rest[..end]),
        None => {
            log::warn!("Reply has no {FILES_CLOSE} marker, reading to end of text");
            Some(rest)
        }
    }
}

/// Extract `(path, content)` pairs from an envelope body, in order.
///
/// Paths and contents are returned trimmed but otherwise untouched.
pub fn extract_blocks(body: &str) -> Vec<(String, String)> {
    let mut blocks = Vec::new();
    let mut last_end = 0;

    for caps in FILE_BLOCK_RE.captures_iter(body) {
        let path = caps.get(1).map_or("", |m| m.as_str()).trim();
        let content = caps.get(2).map_or("", |m| m.as_str()).trim();
        blocks.push((path.to_string(), content.to_string()));
        last_end = caps.get(0).map_or(last_end, |m| m.end());
    }

    if body[last_end..].contains("---FILE:") {
        log::warn!("Dropping unterminated file block at the end of the reply");
    }

    blocks
}
