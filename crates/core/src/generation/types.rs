use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Target framework the model is asked to generate for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Framework {
    #[default]
    React,
    ReactTs,
    Next,
    Vite,
}

impl Framework {
    pub fn as_str(&self) -> &'static str {
        match self {
            Framework::React => "react",
            Framework::ReactTs => "react-ts",
            Framework::Next => "next",
            Framework::Vite => "vite",
        }
    }
}

impl fmt::Display for Framework {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Framework {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "react" => Ok(Framework::React),
            "react-ts" | "react_ts" | "typescript" => Ok(Framework::ReactTs),
            "next" | "nextjs" => Ok(Framework::Next),
            "vite" => Ok(Framework::Vite),
            other => Err(format!(
                "Invalid framework: {other}. Valid values: react, react-ts, next, vite"
            )),
        }
    }
}

/// Wire format the model is instructed to answer in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputContract {
    #[default]
    Delimiter,
    Json,
}

impl FromStr for OutputContract {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "delimiter" => Ok(OutputContract::Delimiter),
            "json" => Ok(OutputContract::Json),
            other => Err(format!(
                "Invalid output contract: {other}. Valid values: delimiter, json"
            )),
        }
    }
}

/// Sampling parameters forwarded as `generationConfig`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SamplingConfig {
    pub temperature: f32,
    pub max_tokens: u32,
    pub top_k: u32,
    pub top_p: f32,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            max_tokens: 8192,
            top_k: 40,
            top_p: 0.95,
        }
    }
}

/// Per-call generation options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct GenerationConfig {
    pub sampling: SamplingConfig,
    pub framework: Framework,
    pub contract: OutputContract,
}

/// A fully specified generation request. Built once per call and never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub prompt_text: String,
    pub sampling: SamplingConfig,
    pub framework: Framework,
    pub contract: OutputContract,
}

impl GenerationRequest {
    pub fn new(prompt_text: impl Into<String>, config: GenerationConfig) -> Self {
        Self {
            prompt_text: prompt_text.into(),
            sampling: config.sampling,
            framework: config.framework,
            contract: config.contract,
        }
    }
}
