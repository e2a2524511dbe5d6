use crate::config::GeminiConfig;
use crate::generate::{generate_data, GenerateParams};
use crate::pipeline::Pipeline;
use crate::prelude::{eprintln, *};
use crate::status::LogSink;
use serde::Deserialize;
use std::path::Path;
use webgen_core::deps::infer;
use webgen_core::generation::{Framework, GenerationConfig, OutputContract, SamplingConfig};
use webgen_core::materialize::{normalize_path, FileMap};

use super::{text_result, JsonRpcError};

fn parse_arguments<T: serde::de::DeserializeOwned>(
    arguments: Option<serde_json::Value>,
) -> Result<T, JsonRpcError> {
    serde_json::from_value(arguments.unwrap_or(serde_json::Value::Null))
        .map_err(|e| JsonRpcError::invalid_params(format!("Invalid arguments: {e}")))
}

fn tool_error(e: impl std::fmt::Display) -> JsonRpcError {
    JsonRpcError::internal(format!("Tool execution error: {e}"))
}

pub async fn handle_generate(
    arguments: Option<serde_json::Value>,
    global: &crate::Global,
    pipeline: &Pipeline,
) -> Result<serde_json::Value, JsonRpcError> {
    #[derive(Deserialize)]
    struct GenerateArgs {
        prompt: String,
        framework: Option<String>,
        contract: Option<String>,
        temperature: Option<f32>,
        max_tokens: Option<u32>,
        top_k: Option<u32>,
        top_p: Option<f32>,
        model: Option<String>,
    }

    let args: GenerateArgs = parse_arguments(arguments)?;

    let framework = match &args.framework {
        Some(value) => value
            .parse::<Framework>()
            .map_err(JsonRpcError::invalid_params)?,
        None => Framework::default(),
    };
    let contract = match &args.contract {
        Some(value) => value
            .parse::<OutputContract>()
            .map_err(JsonRpcError::invalid_params)?,
        None => OutputContract::default(),
    };

    let defaults = SamplingConfig::default();
    let config = GenerationConfig {
        sampling: SamplingConfig {
            temperature: args.temperature.unwrap_or(defaults.temperature),
            max_tokens: args.max_tokens.unwrap_or(defaults.max_tokens),
            top_k: args.top_k.unwrap_or(defaults.top_k),
            top_p: args.top_p.unwrap_or(defaults.top_p),
        },
        framework,
        contract,
    };

    let gemini = GeminiConfig::from_env()
        .map_err(tool_error)?
        .with_overrides(None, args.model, None);

    if global.verbose {
        eprintln!(
            "Calling webgen_generate: model={}, framework={}",
            gemini.model, framework
        );
    }

    let output = generate_data(
        pipeline,
        GenerateParams {
            prompt: args.prompt,
            config,
            gemini,
        },
        &LogSink,
    )
    .await
    .map_err(tool_error)?;

    text_result(&output)
}

pub fn handle_materialize(
    arguments: Option<serde_json::Value>,
    global: &crate::Global,
) -> Result<serde_json::Value, JsonRpcError> {
    #[derive(Deserialize)]
    struct MaterializeArgs {
        raw: String,
    }

    let args: MaterializeArgs = parse_arguments(arguments)?;

    if global.verbose {
        eprintln!("Calling webgen_materialize: {} bytes", args.raw.len());
    }

    let output = crate::materialize::materialize_data(args.raw);
    text_result(&output)
}

pub fn handle_infer_dependencies(
    arguments: Option<serde_json::Value>,
    global: &crate::Global,
) -> Result<serde_json::Value, JsonRpcError> {
    #[derive(Deserialize)]
    struct InferArgs {
        files: Option<FileMap>,
        dir: Option<String>,
    }

    let args: InferArgs = parse_arguments(arguments)?;

    let dependencies = match (args.files, args.dir) {
        (Some(files), _) => {
            if global.verbose {
                eprintln!("Calling webgen_infer_dependencies: {} files", files.len());
            }
            let files: FileMap = files
                .into_iter()
                .filter_map(|(path, content)| normalize_path(&path).map(|path| (path, content)))
                .collect();
            infer(&files)
        }
        (None, Some(dir)) => {
            if global.verbose {
                eprintln!("Calling webgen_infer_dependencies: dir={dir}");
            }
            crate::deps::deps_data(Path::new(&dir)).map_err(tool_error)?
        }
        (None, None) => {
            return Err(JsonRpcError::invalid_params(
                "Either 'files' or 'dir' is required",
            ))
        }
    };

    text_result(&dependencies)
}
