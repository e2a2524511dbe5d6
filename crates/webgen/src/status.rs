use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use webgen_core::status::{Stage, StatusSink};

/// Reports pipeline progress on a stderr spinner.
#[derive(Debug, Clone)]
pub struct TerminalSink {
    spinner: ProgressBar,
}

impl TerminalSink {
    pub fn new() -> Self {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.cyan} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        spinner.enable_steady_tick(std::time::Duration::from_millis(100));
        Self { spinner }
    }

    pub fn finish(&self) {
        self.spinner.finish_and_clear();
    }
}

impl Default for TerminalSink {
    fn default() -> Self {
        Self::new()
    }
}

impl StatusSink for TerminalSink {
    fn on_status(&self, stage: &Stage) {
        log::debug!("{stage}");
        match stage {
            Stage::Failed { .. } => {
                self.spinner.suspend(|| {
                    anstream::eprintln!("{} {}", "✗".red().bold(), stage.to_string().red())
                });
            }
            Stage::Materialized { fallback: true, .. } => {
                self.spinner.suspend(|| {
                    anstream::eprintln!("{} {}", "!".yellow().bold(), stage.to_string().yellow())
                });
            }
            _ => self.spinner.set_message(stage.to_string()),
        }
    }
}

/// Reports pipeline progress through the `log` facade only.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl StatusSink for LogSink {
    fn on_status(&self, stage: &Stage) {
        match stage {
            Stage::Failed { .. } => log::warn!("{stage}"),
            _ => log::info!("{stage}"),
        }
    }
}
