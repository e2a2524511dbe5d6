/// Failures that prevent obtaining any reply text.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerationError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Upstream error (HTTP {status}): {message}")]
    Upstream { status: u16, message: String },

    #[error("The model returned no content")]
    EmptyResponse,
}
