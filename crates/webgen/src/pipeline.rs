use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;
use webgen_core::deps::infer;
use webgen_core::generation::{GenerationConfig, GenerationError};
use webgen_core::materialize::materialize;
use webgen_core::preview::PreviewBundle;
use webgen_core::status::{Stage, StatusSink};

use crate::gemini::GeminiClient;

/// Identifies one pipeline run. Only the most recent ticket may publish.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

/// Result of one generation run.
#[derive(Debug, Clone, Serialize)]
pub struct PipelineOutput {
    #[serde(skip)]
    pub raw: String,
    pub fallback: bool,
    #[serde(flatten)]
    pub bundle: PreviewBundle,
}

/// Prompt → reply → files → dependencies, with stale-result protection.
///
/// One `Pipeline` is shared by every run a front end starts, whatever client
/// each run uses. Runs are not cancelled. A run that finishes after a newer
/// one has started yields `None` instead of its bundle.
#[derive(Debug, Default)]
pub struct Pipeline {
    generation: AtomicU64,
}

impl Pipeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&self) -> Ticket {
        Ticket(self.generation.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.generation.load(Ordering::SeqCst) == ticket.0
    }

    pub async fn run(
        &self,
        client: &GeminiClient,
        prompt_text: &str,
        config: GenerationConfig,
        sink: &dyn StatusSink,
    ) -> Result<Option<PipelineOutput>, GenerationError> {
        let ticket = self.begin();
        let raw = client.generate(prompt_text, config, sink).await?;

        if !self.is_current(ticket) {
            log::info!("Discarding reply of superseded request #{}", ticket.0);
            return Ok(None);
        }

        Ok(Some(complete(raw, sink)))
    }
}

/// Materialize a raw reply and infer its dependencies.
pub fn complete(raw: String, sink: &dyn StatusSink) -> PipelineOutput {
    let outcome = materialize(&raw);
    let fallback = outcome.is_fallback();
    let files = outcome.into_files();

    sink.on_status(&Stage::Materialized {
        files: files.len(),
        fallback,
    });

    let dependencies = infer(&files);
    sink.on_status(&Stage::DependenciesResolved {
        count: dependencies.len(),
    });

    PipelineOutput {
        raw,
        fallback,
        bundle: PreviewBundle::assemble(files, dependencies),
    }
}
