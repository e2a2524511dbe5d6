use super::{delimiter, json};

/// Wire format recognized in a raw reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WireFormat<'a> {
    /// Body of the `---FILES---` envelope.
    Delimiter(&'a str),
    /// JSON object candidates mentioning `"files"`, in preference order.
    Json(Vec<&'a str>),
    Unrecognized,
}

/// Classify a raw reply. The delimiter envelope takes precedence over any
/// JSON-looking content.
pub fn detect_format(raw: &str) -> WireFormat<'_> {
    if let Some(body) = delimiter::envelope_body(raw) {
        return WireFormat::Delimiter(body);
    }

    let candidates: Vec<&str> = json::candidates(raw)
        .into_iter()
        .filter(|candidate| candidate.contains("\"files\""))
        .collect();

    if candidates.is_empty() {
        WireFormat::Unrecognized
    } else {
        WireFormat::Json(candidates)
    }
}
