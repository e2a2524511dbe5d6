use crate::output::{print_bundle, print_json, write_project};
use crate::pipeline::{complete, PipelineOutput};
use crate::prelude::{eprintln, *};
use crate::status::LogSink;
use colored::Colorize;
use std::io::Read;
use std::path::PathBuf;

#[derive(Debug, clap::Args)]
pub struct MaterializeOptions {
    /// File holding a saved model reply, or "-" for stdin
    #[arg(default_value = "-")]
    input: String,

    /// Write the project into this directory
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    json: bool,
}

fn read_input(input: &str) -> Result<String> {
    if input == "-" {
        let mut raw = String::new();
        std::io::stdin()
            .read_to_string(&mut raw)
            .map_err(|e| eyre!("Failed to read reply from stdin: {}", e))?;
        return Ok(raw);
    }

    std::fs::read_to_string(input).map_err(|e| eyre!("Failed to read {}: {}", input, e))
}

/// Materialize a raw reply without calling the model
pub fn materialize_data(raw: String) -> PipelineOutput {
    complete(raw, &LogSink)
}

/// Handle the materialize command
pub async fn run(options: MaterializeOptions, global: crate::Global) -> Result<()> {
    let raw = read_input(&options.input)?;

    if global.verbose {
        eprintln!("Read {} bytes from {}", raw.len(), options.input);
        eprintln!();
    }

    let output = materialize_data(raw);

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

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_read_input_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "---FILES---\n---FILE:a.js---\n1\n---ENDFILE---\n---ENDFILES---").unwrap();

        let raw = read_input(file.path().to_str().unwrap()).unwrap();
        let output = materialize_data(raw);

        assert!(!output.fallback);
        assert_eq!(output.bundle.files["/a.js"], "1");
    }

    #[test]
    fn test_read_input_missing_file() {
        let err = read_input("/definitely/not/here.txt").unwrap_err();
        assert!(err.to_string().contains("Failed to read"));
    }

    #[test]
    fn test_materialize_data_fallback() {
        let output = materialize_data("I cannot help with that.".to_string());
        assert!(output.fallback);
        assert_eq!(output.bundle.entry, "/index.js");
    }
}
