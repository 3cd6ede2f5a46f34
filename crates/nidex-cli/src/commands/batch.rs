//! Batch command - extract many documents.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, error, warn};

use nidex_core::models::{ExtractionResult, NidexConfig};
use nidex_core::ExtractionOrchestrator;

use super::extract::{format_result, OutputFormat};
use super::{
    is_supported, load_config, load_document, new_request_id, warn_unstored_images, ImageMode,
};
use crate::store::ImageStore;

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Glob pattern for input files (PDF or plain text)
    #[arg(required = true)]
    input: String,

    /// Output directory
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Output format for each file
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Image representation (overrides config)
    #[arg(long, value_enum)]
    mode: Option<ImageMode>,

    /// Base URL for image URLs (overrides config)
    #[arg(long)]
    base_url: Option<String>,

    /// Directory to write classified images to
    #[arg(long)]
    image_dir: Option<PathBuf>,

    /// Also generate a summary CSV
    #[arg(long)]
    summary: bool,

    /// Continue on error
    #[arg(long)]
    continue_on_error: bool,
}

/// Outcome for one input file.
struct FileResult {
    path: PathBuf,
    result: Option<ExtractionResult>,
    error: Option<String>,
    processed_at: String,
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let mut config = load_config(config_path)?;
    if let Some(mode) = args.mode {
        config.output.image_mode = mode.into();
    }
    if let Some(base_url) = &args.base_url {
        config.output.image_base_url = base_url.clone();
    }
    config.validate()?;

    let files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| is_supported(p))
        .collect();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    eprintln!("{} Found {} files to process", style("ℹ").blue(), files.len());

    if let Some(ref output_dir) = args.output_dir {
        fs::create_dir_all(output_dir)?;
    }
    let store = args.image_dir.as_deref().map(ImageStore::open).transpose()?;

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")?
            .progress_chars("=>-"),
    );

    let orchestrator = ExtractionOrchestrator::from_config(&config);
    let mut results = Vec::with_capacity(files.len());

    for path in files {
        let outcome = process_file(&path, &orchestrator, &config, store.as_ref());
        let processed_at = chrono::Local::now().to_rfc3339();

        match outcome {
            Ok(result) => {
                for diagnostic in &result.diagnostics {
                    warn!("{}: {}", path.display(), diagnostic);
                }
                results.push(FileResult {
                    path,
                    result: Some(result),
                    error: None,
                    processed_at,
                });
            }
            Err(e) if args.continue_on_error => {
                warn!("Failed to process {}: {}", path.display(), e);
                results.push(FileResult {
                    path,
                    result: None,
                    error: Some(e.to_string()),
                    processed_at,
                });
            }
            Err(e) => {
                error!("Failed to process {}: {}", path.display(), e);
                anyhow::bail!("Processing failed for {}: {}", path.display(), e);
            }
        }

        pb.inc(1);
    }

    pb.finish_and_clear();

    let successful = results.iter().filter(|r| r.result.is_some()).count();
    let failed: Vec<_> = results.iter().filter(|r| r.error.is_some()).collect();

    if let Some(output_dir) = &args.output_dir {
        for file in &results {
            let Some(result) = &file.result else {
                continue;
            };
            let stem = file.path.file_stem().and_then(|s| s.to_str()).unwrap_or("document");
            let output_path = output_dir.join(format!("{}.{}", stem, args.format.extension()));

            fs::write(&output_path, format_result(result, args.format, config.output.pretty)?)?;
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
        eprintln!(
            "{} Summary written to {}",
            style("✓").green(),
            summary_path.display()
        );
    }

    eprintln!();
    eprintln!(
        "{} Processed {} files in {:?}",
        style("✓").green(),
        results.len(),
        start.elapsed()
    );
    eprintln!(
        "   {} successful, {} failed",
        style(successful).green(),
        style(failed.len()).red()
    );

    if !failed.is_empty() {
        eprintln!();
        eprintln!("{}", style("Failed files:").red());
        for file in &failed {
            eprintln!(
                "  - {}: {}",
                file.path.display(),
                file.error.as_deref().unwrap_or("unknown error")
            );
        }
    }

    Ok(())
}

fn process_file(
    path: &Path,
    orchestrator: &ExtractionOrchestrator,
    config: &NidexConfig,
    store: Option<&ImageStore>,
) -> anyhow::Result<ExtractionResult> {
    let request_id = new_request_id();
    let document = load_document(path, &[], config, &request_id)?;

    if document.text.trim().is_empty() {
        warn!("No text found in {}", path.display());
    }

    let result = orchestrator.extract(&document.text, &document.images)?;

    if let Some(store) = store {
        store.save_classified(&result, &document.images)?;
    }
    warn_unstored_images(&result, &document.images, config, store.is_some());

    Ok(result)
}

fn write_summary(path: &Path, results: &[FileResult]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record([
        "file",
        "national_id",
        "name_english",
        "division",
        "portrait",
        "signature",
        "error",
        "processed_at",
    ])?;

    for file in results {
        let result = file.result.as_ref();
        let found = |present: Option<bool>| match present {
            Some(true) => "yes",
            Some(false) => "no",
            None => "",
        };

        wtr.write_record([
            file.path.display().to_string().as_str(),
            result.and_then(|r| r.person.national_id.as_deref()).unwrap_or(""),
            result.and_then(|r| r.person.name_english.as_deref()).unwrap_or(""),
            result.and_then(|r| r.permanent_address.division.as_deref()).unwrap_or(""),
            found(result.map(|r| r.images.portrait().is_some())),
            found(result.map(|r| r.images.signature().is_some())),
            file.error.as_deref().unwrap_or(""),
            file.processed_at.as_str(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
