//! Extract command - run field extraction on already-recognized text.

use std::fs;
use std::path::PathBuf;

use clap::Args;
use console::style;

use foodlabel_core::{FixtureRecognizer, LabelService};

use super::load_config;
use super::output::{format_response, OutputFormat};

/// Arguments for the extract command.
#[derive(Args)]
pub struct ExtractArgs {
    /// Text file with one OCR line per row, or a JSON array of {text, confidence}
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,
}

pub async fn run(args: ExtractArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    let content = fs::read_to_string(&args.input)?;
    let fixture = FixtureRecognizer::parse(&content);
    let lines = fixture.lines().to_vec();

    let service = LabelService::from_config(Box::new(fixture), &config);
    let response = service.recognize_lines(&lines);

    let output = format_response(&response, args.format)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        eprintln!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    Ok(())
}
