use crate::config::GeminiConfig;
use crate::prelude::*;
use webgen_core::generation::{
    build_request_body, parse_generate_response, GenerationConfig, GenerationError,
    GenerationRequest,
};
use webgen_core::status::{Stage, StatusSink};

/// HTTP client for the Gemini `generateContent` endpoint.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: reqwest::Client,
    config: GeminiConfig,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| eyre!("Failed to build HTTP client: {}", e))?;

        Ok(Self { client, config })
    }

    /// Send one generation request and return the raw reply text.
    ///
    /// Reports [`Stage::Requesting`] before the call and [`Stage::Received`] or
    /// [`Stage::Failed`] after it. Failures are returned as-is, without retries.
    pub async fn generate(
        &self,
        prompt_text: &str,
        config: GenerationConfig,
        sink: &dyn StatusSink,
    ) -> std::result::Result<String, GenerationError> {
        let request = GenerationRequest::new(prompt_text, config);

        sink.on_status(&Stage::Requesting);
        let result = self.send(&request).await;

        match &result {
            Ok(text) => sink.on_status(&Stage::Received { bytes: text.len() }),
            Err(e) => {
                log::error!("Gemini request failed: {e}");
                sink.on_status(&Stage::Failed {
                    message: e.to_string(),
                })
            }
        }

        result
    }

    async fn send(
        &self,
        request: &GenerationRequest,
    ) -> std::result::Result<String, GenerationError> {
        let body = build_request_body(request);

        log::info!(
            "Sending request to {} ({} framework, {:?} contract)",
            self.config.model,
            request.framework,
            request.contract
        );

        let response = self
            .client
            .post(self.config.endpoint())
            .query(&[("key", self.config.api_key.as_str())])
            .json(&body)
            .send()
            .await
            .map_err(|e| GenerationError::Network(e.without_url().to_string()))?;

        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| GenerationError::Network(e.without_url().to_string()))?;

        log::debug!("Gemini answered HTTP {status} with {} bytes", text.len());

        parse_generate_response(status, &text)
    }
}
