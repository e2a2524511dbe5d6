use crate::config::{GeminiArgs, GeminiConfig};
use crate::gemini::GeminiClient;
use crate::output::{print_bundle, print_json, write_project};
use crate::pipeline::{Pipeline, PipelineOutput};
use crate::prelude::{eprintln, *};
use crate::status::TerminalSink;
use colored::Colorize;
use std::path::PathBuf;
use webgen_core::generation::{Framework, GenerationConfig, OutputContract, SamplingConfig};
use webgen_core::status::StatusSink;

#[derive(Debug, clap::Args)]
pub struct GenerateOptions {
    /// Description of the web application to build
    #[clap(env = "WEBGEN_PROMPT")]
    prompt: String,

    /// Target framework (react, react-ts, next, vite)
    #[arg(short, long, default_value = "react")]
    framework: Framework,

    /// Sampling temperature
    #[arg(long, default_value_t = 0.7)]
    temperature: f32,

    /// Maximum number of output tokens
    #[arg(long, default_value_t = 8192)]
    max_tokens: u32,

    /// Top-k sampling
    #[arg(long, default_value_t = 40)]
    top_k: u32,

    /// Nucleus sampling probability
    #[arg(long, default_value_t = 0.95)]
    top_p: f32,

    /// Reply format requested from the model (delimiter, json)
    #[arg(long, default_value = "delimiter")]
    contract: OutputContract,

    /// Write the generated project into this directory
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// Save the raw model reply to this file
    #[arg(long)]
    save_raw: Option<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    json: bool,

    #[clap(flatten)]
    gemini: GeminiArgs,
}

impl GenerateOptions {
    fn generation_config(&self) -> GenerationConfig {
        GenerationConfig {
            sampling: SamplingConfig {
                temperature: self.temperature,
                max_tokens: self.max_tokens,
                top_k: self.top_k,
                top_p: self.top_p,
            },
            framework: self.framework,
            contract: self.contract,
        }
    }
}

/// Parameters for one generation run
#[derive(Debug, Clone)]
pub struct GenerateParams {
    pub prompt: String,
    pub config: GenerationConfig,
    pub gemini: GeminiConfig,
}

/// Run the full pipeline and return the preview bundle
///
/// Shared by the `generate` command and the MCP `webgen_generate` tool. Runs
/// sharing `pipeline` supersede each other: only the latest one publishes.
pub async fn generate_data(
    pipeline: &Pipeline,
    params: GenerateParams,
    sink: &dyn StatusSink,
) -> Result<PipelineOutput> {
    let GenerateParams {
        prompt,
        config,
        gemini,
    } = params;

    if prompt.trim().is_empty() {
        return Err(eyre!("Prompt must not be empty"));
    }

    let client = GeminiClient::new(gemini)?;
    let output = pipeline
        .run(&client, &prompt, config, sink)
        .await
        .map_err(Error::from)?;

    output.ok_or_eyre("Generation was superseded by a newer request")
}

/// Handle the generate command
pub async fn run(options: GenerateOptions, global: crate::Global) -> Result<()> {
    let config = options.generation_config();
    let gemini = GeminiConfig::try_from(options.gemini.clone())?;

    if global.verbose {
        eprintln!("Model: {}", gemini.model);
        eprintln!("Endpoint: {}", gemini.endpoint());
        eprintln!("Framework: {}", config.framework);
        eprintln!();
    }

    let params = GenerateParams {
        prompt: options.prompt.clone(),
        config,
        gemini,
    };

    let sink = TerminalSink::new();
    let result = generate_data(&Pipeline::new(), params, &sink).await;
    sink.finish();
    let output = result?;

    if let Some(path) = &options.save_raw {
        std::fs::write(path, &output.raw)
            .map_err(|e| eyre!("Failed to save raw reply to {}: {}", path.display(), e))?;
        log::info!("Saved raw reply to {}", path.display());
    }

    if let Some(dir) = &options.out {
        let written = write_project(dir, &output.bundle.files)?;
        eprintln!(
            "{} {} files to {}",
            "Wrote".green().bold(),
            written.len(),
            dir.display()
        );
    }

    if options.json {
        return print_json(&output);
    }

    print_bundle(&output.bundle, output.fallback);
    Ok(())
}
