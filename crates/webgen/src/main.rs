use crate::prelude::*;
use clap::Parser;

mod config;
mod deps;
mod error;
mod gemini;
mod generate;
mod materialize;
mod mcp;
mod output;
mod pipeline;
mod prelude;
mod status;

#[derive(Debug, clap::Parser)]
#[command(
    author,
    version,
    about,
    long_about = "Generate runnable React web applications from a natural-language description"
)]
pub struct App {
    #[command(subcommand)]
    pub command: SubCommands,

    #[clap(flatten)]
    global: Global,
}

#[derive(Debug, Clone, clap::Args)]
pub struct Global {
    /// Whether to display additional information.
    #[clap(long, env = "WEBGEN_VERBOSE", global = true, default_value = "false")]
    verbose: bool,
}

#[derive(Debug, clap::Parser)]
pub enum SubCommands {
    /// Generate a web application from a prompt
    Generate(crate::generate::GenerateOptions),

    /// Turn a saved model reply into a project, without calling the model
    Materialize(crate::materialize::MaterializeOptions),

    /// Infer the npm dependencies of a project directory
    Deps(crate::deps::DepsOptions),

    /// Model Context Protocol server
    MCP(crate::mcp::App),
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    color_eyre::install()?;

    let app = App::parse();

    match app.command {
        SubCommands::Generate(options) => crate::generate::run(options, app.global).await,
        SubCommands::Materialize(options) => crate::materialize::run(options, app.global).await,
        SubCommands::Deps(options) => crate::deps::run(options, app.global).await,
        SubCommands::MCP(sub_app) => crate::mcp::run(sub_app, app.global).await,
    }
    .map_err(|err: color_eyre::eyre::Report| eyre!(err))
}
