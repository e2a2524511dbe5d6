/// Trim content and remove a single wrapping markdown code fence.
///
/// The opening fence line is dropped together with its language tag. The
/// closing fence is only removed when it ends the content.
pub fn strip_code_fence(content: &str) -> String {
    let trimmed = content.trim();

    if !trimmed.starts_with("```") {
        return trimmed.to_string();
    }

    let body = match trimmed.find('\n') {
        Some(idx) => &trimmed[idx + 1..],
        // One-liner such as ```console.log(1)```
        None => trimmed.trim_start_matches('`'),
    };

    let body = body.trim_end();
    let body = body.strip_suffix("```").unwrap_or(body);

    body.trim().to_string()
}
