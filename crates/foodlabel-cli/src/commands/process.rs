//! Process command - extract label data from a single image.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::debug;

use foodlabel_core::{LabelService, RecognitionResponse};

use super::engine::EngineArgs;
use super::output::{format_response, OutputFormat};
use super::{load_config, source};

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Input image path or http(s) URL
    #[arg(required = true)]
    input: String,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    #[command(flatten)]
    engine: EngineArgs,

    /// Print the recognized lines that passed the confidence filter to stderr
    #[arg(long)]
    show_lines: bool,
}

pub async fn run(args: ProcessArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    let service = LabelService::from_config(args.engine.build(&config)?, &config);

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    pb.set_message(format!("Reading {}", args.input));

    let mut response = match source::read_input(&args.input, &config.fetch).await {
        Ok(bytes) => {
            pb.set_message(format!("Running OCR ({})", service.engine_name()));
            recognize(&service, &bytes, args.show_lines)
        }
        Err(e) => RecognitionResponse::failure(e.to_string(), start.elapsed()),
    };
    response.processing_time = start.elapsed().as_secs_f64();

    pb.finish_and_clear();

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

    debug!("Total processing time: {:?}", start.elapsed());

    if let Some(error) = response.error {
        anyhow::bail!("Recognition failed: {}", error);
    }

    Ok(())
}

fn recognize(service: &LabelService, bytes: &[u8], show_lines: bool) -> RecognitionResponse {
    if !show_lines {
        return service.recognize(bytes);
    }

    match service.read_lines(bytes) {
        Ok(lines) => {
            let corpus = service.parser().corpus(&lines);
            eprintln!(
                "{} {} of {} lines kept",
                style("ℹ").blue(),
                corpus.len(),
                lines.len()
            );
            for line in corpus.lines() {
                eprintln!("  {}", line);
            }
            service.recognize_lines(&lines)
        }
        Err(e) => RecognitionResponse::failure(e.to_string(), Default::default()),
    }
}
