//! Batch processing command for multiple label images.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, error, warn};

use foodlabel_core::{LabelService, RecognitionResponse};

use super::engine::EngineArgs;
use super::load_config;
use super::output::{describe, format_response, OutputFormat};

const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "webp", "bmp", "tif", "tiff"];

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Glob pattern matching label images
    #[arg(required = true)]
    input: String,

    /// Output directory for per-image results
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Output format for each image
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Also write summary.csv
    #[arg(long)]
    summary: bool,

    /// Continue on error
    #[arg(long)]
    continue_on_error: bool,

    #[command(flatten)]
    engine: EngineArgs,
}

/// Result of processing a single image.
struct ProcessResult {
    path: PathBuf,
    response: RecognitionResponse,
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    let files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| is_image(p))
        .collect();

    if files.is_empty() {
        anyhow::bail!("No matching images found for pattern: {}", args.input);
    }

    println!(
        "{} Found {} images to process ({})",
        style("ℹ").blue(),
        files.len(),
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );

    if let Some(ref output_dir) = args.output_dir {
        fs::create_dir_all(output_dir)?;
    }

    let service = LabelService::from_config(args.engine.build(&config)?, &config);

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("=>-"),
    );

    let mut results = Vec::with_capacity(files.len());

    for path in files {
        let file_start = Instant::now();
        let mut response = match fs::read(&path) {
            Ok(bytes) => service.recognize(&bytes),
            Err(e) => RecognitionResponse::failure(e.to_string(), file_start.elapsed()),
        };
        response.processing_time = file_start.elapsed().as_secs_f64();

        match (&response.data, &response.error) {
            (Some(record), _) => pb.set_message(describe(record)),
            (None, Some(error_msg)) if args.continue_on_error => {
                warn!("Failed to process {}: {}", path.display(), error_msg);
            }
            (None, error_msg) => {
                let error_msg = error_msg.as_deref().unwrap_or("unknown error");
                error!("Failed to process {}: {}", path.display(), error_msg);
                pb.abandon();
                anyhow::bail!("Processing failed for {}: {}", path.display(), error_msg);
            }
        }

        results.push(ProcessResult { path, response });
        pb.inc(1);
    }

    pb.finish_with_message("Complete");

    if let Some(output_dir) = &args.output_dir {
        for result in &results {
            let output_name = result
                .path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("label");
            let output_path = output_dir.join(format!("{}.{}", output_name, args.format.extension()));

            fs::write(&output_path, format_response(&result.response, args.format)?)?;
            debug!("Wrote output to {}", output_path.display());
        }
    }

    if args.summary {
        let summary_path = args
            .output_dir
            .as_ref()
            .map(|d| d.join("summary.csv"))
            .unwrap_or_else(|| PathBuf::from("summary.csv"));

        write_summary(&summary_path, &results)?;
        println!(
            "{} Summary written to {}",
            style("✓").green(),
            summary_path.display()
        );
    }

    let failed: Vec<_> = results.iter().filter(|r| !r.response.success).collect();

    println!();
    println!(
        "{} Processed {} images in {:?}",
        style("✓").green(),
        results.len(),
        start.elapsed()
    );
    println!(
        "   {} successful, {} failed",
        style(results.len() - failed.len()).green(),
        style(failed.len()).red()
    );

    if !failed.is_empty() {
        println!();
        println!("{}", style("Failed images:").red());
        for result in &failed {
            println!(
                "  - {}: {}",
                result.path.display(),
                result.response.error.as_deref().unwrap_or("unknown error")
            );
        }
    }

    Ok(())
}

fn is_image(path: &Path) -> bool {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();
    IMAGE_EXTENSIONS.contains(&ext.as_str())
}

fn write_summary(path: &Path, results: &[ProcessResult]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record([
        "filename",
        "status",
        "name",
        "producer",
        "productionDate",
        "shelfLife",
        "processing_time",
        "error",
    ])?;

    for result in results {
        let filename = result.path.file_name().and_then(|s| s.to_str()).unwrap_or("");
        let time = format!("{:.3}", result.response.processing_time);

        if let Some(record) = &result.response.data {
            wtr.write_record([
                filename,
                "success",
                &record.name,
                &record.producer,
                &record.production_date,
                &record.shelf_life,
                &time,
                "",
            ])?;
        } else {
            wtr.write_record([
                filename,
                "error",
                "",
                "",
                "",
                "",
                &time,
                result.response.error.as_deref().unwrap_or(""),
            ])?;
        }
    }

    wtr.flush()?;
    Ok(())
}
