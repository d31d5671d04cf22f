//! Models command - locate and check OCR model files.

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Subcommand};
use console::style;

use foodlabel_core::models::config::LabelConfig;
use foodlabel_core::TesseractRecognizer;

use super::load_config;

/// Arguments for the models command.
#[derive(Args)]
pub struct ModelsArgs {
    #[command(subcommand)]
    command: ModelsCommand,
}

#[derive(Subcommand)]
enum ModelsCommand {
    /// Check whether the OCR engines are ready
    Status(DirArgs),

    /// Print the model directory
    Path(DirArgs),

    /// Copy model files from a local directory into the model directory
    Install(InstallArgs),
}

#[derive(Args)]
struct DirArgs {
    /// Model directory (default: from config, then the platform data dir)
    #[arg(short, long)]
    model_dir: Option<PathBuf>,
}

#[derive(Args)]
struct InstallArgs {
    /// Directory holding the detection, recognition and dictionary files
    source: PathBuf,

    #[command(flatten)]
    dir: DirArgs,

    /// Overwrite files that are already installed
    #[arg(long)]
    force: bool,
}

/// Platform default model directory.
pub fn default_model_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("foodlabel")
        .join("models")
}

/// Model directory: explicit override, then config, then platform default.
pub fn resolve_model_dir(config: &LabelConfig, override_dir: Option<&Path>) -> PathBuf {
    if let Some(dir) = override_dir {
        return dir.to_path_buf();
    }
    if !config.models.model_dir.as_os_str().is_empty() {
        return config.models.model_dir.clone();
    }
    default_model_dir()
}

fn model_files(config: &LabelConfig) -> [(&str, &'static str); 3] {
    [
        (config.models.detection_model.as_str(), "text detection"),
        (config.models.recognition_model.as_str(), "text recognition"),
        (config.models.dictionary.as_str(), "character dictionary"),
    ]
}

pub async fn run(args: ModelsArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;

    match args.command {
        ModelsCommand::Status(dir) => check_status(&config, dir),
        ModelsCommand::Path(dir) => {
            println!("{}", resolve_model_dir(&config, dir.model_dir.as_deref()).display());
            Ok(())
        }
        ModelsCommand::Install(install) => install_models(&config, install),
    }
}

fn check_status(config: &LabelConfig, args: DirArgs) -> anyhow::Result<()> {
    let model_dir = resolve_model_dir(config, args.model_dir.as_deref());

    println!("{}", style("Model Status").bold());
    println!("Default engine: {}", style(config.ocr.engine.to_string()).cyan().bold());
    println!();

    println!("{} {}", style("▸ paddle").bold(), model_dir.display());

    let mut all_present = true;
    let mut total_size: u64 = 0;

    for (filename, description) in model_files(config) {
        let path = model_dir.join(filename);
        let (status, size_str) = if path.is_file() {
            let size = fs::metadata(&path)?.len();
            total_size += size;
            (style("✓").green(), format_size(size))
        } else {
            all_present = false;
            (style("✗").red(), "missing".to_string())
        };

        println!("    {} {:<20} {:>10}  {}", status, filename, size_str, description);
    }

    if all_present {
        println!("    {} Ready ({} total)", style("✓").green(), format_size(total_size));
    } else {
        println!(
            "    {} Run 'foodlabel models install <dir>' to install the model files",
            style("⚠").yellow()
        );
    }
    println!();

    println!("{}", style("▸ tesseract").bold());
    match TesseractRecognizer::new(&config.ocr).version() {
        Ok(version) => println!(
            "    {} {} (languages: {})",
            style("✓").green(),
            version,
            config.ocr.tesseract_languages
        ),
        Err(e) => println!("    {} {}", style("✗").red(), e),
    }

    Ok(())
}

fn install_models(config: &LabelConfig, args: InstallArgs) -> anyhow::Result<()> {
    let model_dir = resolve_model_dir(config, args.dir.model_dir.as_deref());

    let files = model_files(config);
    for (filename, _) in &files {
        let source = args.source.join(filename);
        if !source.is_file() {
            anyhow::bail!("Model file not found: {}", source.display());
        }
    }

    fs::create_dir_all(&model_dir)?;

    println!(
        "{} Installing models to {}",
        style("ℹ").blue(),
        model_dir.display()
    );

    for (filename, _) in files {
        let target = model_dir.join(filename);
        if target.exists() && !args.force {
            println!("  {} {} (already installed)", style("✓").green(), filename);
            continue;
        }

        let temp_path = target.with_extension("tmp");
        let size = fs::copy(args.source.join(filename), &temp_path)?;
        fs::rename(&temp_path, &target)?;

        println!("  {} {} ({})", style("✓").green(), filename, format_size(size));
    }

    Ok(())
}

fn format_size(bytes: u64) -> String {
    if bytes >= 1_000_000_000 {
        format!("{:.1}GB", bytes as f64 / 1_000_000_000.0)
    } else if bytes >= 1_000_000 {
        format!("{:.1}MB", bytes as f64 / 1_000_000.0)
    } else if bytes >= 1_000 {
        format!("{:.1}KB", bytes as f64 / 1_000.0)
    } else {
        format!("{}B", bytes)
    }
}
