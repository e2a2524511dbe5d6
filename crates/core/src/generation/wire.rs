//! Request and response bodies of the `generateContent` endpoint.

use serde::{Deserialize, Serialize};

use super::error::GenerationError;
use super::prompt::build_prompt;
use super::types::GenerationRequest;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentBody {
    pub contents: Vec<ContentBody>,
    pub generation_config: GenerationConfigBody,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentBody {
    pub role: String,
    pub parts: Vec<Part>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Part {
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfigBody {
    pub temperature: f32,
    pub max_output_tokens: u32,
    pub top_k: u32,
    pub top_p: f32,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<CandidateContent>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Debug, Clone, Deserialize)]
struct ErrorEnvelope {
    error: Option<ErrorBody>,
}

#[derive(Debug, Clone, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// Build the JSON body for a single-turn generation request.
pub fn build_request_body(request: &GenerationRequest) -> GenerateContentBody {
    GenerateContentBody {
        contents: vec![ContentBody {
            role: "user".to_string(),
            parts: vec![Part {
                text: Some(build_prompt(request)),
            }],
        }],
        generation_config: GenerationConfigBody {
            temperature: request.sampling.temperature,
            max_output_tokens: request.sampling.max_tokens,
            top_k: request.sampling.top_k,
            top_p: request.sampling.top_p,
        },
    }
}

/// Interpret an HTTP status and body returned by the endpoint.
///
/// Non-2xx statuses become [`GenerationError::Upstream`] carrying the upstream
/// `error.message` when the body has one. A 2xx without any candidate text is
/// [`GenerationError::EmptyResponse`]. All text parts of the first candidate are
/// joined.
pub fn parse_generate_response(status: u16, body: &str) -> Result<String, GenerationError> {
    if !(200..300).contains(&status) {
        let message = serde_json::from_str::<ErrorEnvelope>(body)
            .ok()
            .and_then(|envelope| envelope.error)
            .and_then(|error| error.message)
            .filter(|message| !message.trim().is_empty())
            .unwrap_or_else(|| format!("Error calling generation endpoint (HTTP {status})"));
        return Err(GenerationError::Upstream { status, message });
    }

    let response: GenerateContentResponse = serde_json::from_str(body).map_err(|e| {
        log::warn!("Unreadable generation response body: {e}");
        GenerationError::EmptyResponse
    })?;

    extract_reply_text(&response).ok_or(GenerationError::EmptyResponse)
}

/// Concatenate the text parts of the first candidate, if there is any text.
pub fn extract_reply_text(response: &GenerateContentResponse) -> Option<String> {
    let content = response.candidates.first()?.content.as_ref()?;
    let text: String = content
        .parts
        .iter()
        .filter_map(|part| part.text.as_deref())
        .collect();

    if text.trim().is_empty() {
        None
    } else {
        Some(text)
    }
}
