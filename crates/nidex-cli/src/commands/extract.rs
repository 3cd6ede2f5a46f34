//! Extract command - process a single document.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, warn};

use nidex_core::models::{AddressField, ExtractionResult, PersonField};
use nidex_core::ExtractionOrchestrator;

use super::{load_config, load_document, new_request_id, warn_unstored_images, ImageMode};
use crate::store::ImageStore;

/// Arguments for the extract command.
#[derive(Args)]
pub struct ExtractArgs {
    /// Input file (PDF or plain text)
    #[arg(required = true)]
    input: PathBuf,

    /// Additional image file to classify (repeatable)
    #[arg(long = "image")]
    images: Vec<PathBuf>,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
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

    /// Pretty-print JSON
    #[arg(long)]
    pretty: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text summary
    Text,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
            OutputFormat::Text => "txt",
        }
    }
}

pub async fn run(args: ExtractArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let mut config = load_config(config_path)?;
    if let Some(mode) = args.mode {
        config.output.image_mode = mode.into();
    }
    if let Some(base_url) = &args.base_url {
        config.output.image_base_url = base_url.clone();
    }
    config.output.pretty |= args.pretty;
    config.validate()?;

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    let pb = ProgressBar::new(100);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] {bar:40.cyan/blue} {msg}")?
            .progress_chars("##-"),
    );

    pb.set_message("Loading document...");
    pb.set_position(10);

    let request_id = new_request_id();
    let document = load_document(&args.input, &args.images, &config, &request_id)?;

    if document.text.trim().is_empty() {
        warn!("No text found in {}", args.input.display());
    }

    pb.set_message("Extracting fields...");
    pb.set_position(60);

    let orchestrator = ExtractionOrchestrator::from_config(&config);
    let result = orchestrator.extract(&document.text, &document.images)?;

    for diagnostic in &result.diagnostics {
        warn!("{}", diagnostic);
    }

    if let Some(image_dir) = &args.image_dir {
        pb.set_message("Saving images...");
        pb.set_position(80);
        let store = ImageStore::open(image_dir)?;
        store.save_classified(&result, &document.images)?;
    }
    warn_unstored_images(&result, &document.images, &config, args.image_dir.is_some());

    pb.set_position(100);
    pb.finish_and_clear();

    let output = format_result(&result, args.format, config.output.pretty)?;

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

    Ok(())
}

/// Flat `(key, value)` view of a result, in output order.
pub fn flatten_result(result: &ExtractionResult) -> Vec<(String, String)> {
    let mut rows = Vec::with_capacity(PersonField::ALL.len() + AddressField::ALL.len() + 3);

    for field in PersonField::ALL {
        rows.push((
            field.key().to_string(),
            result.person.get(field).unwrap_or_default().to_string(),
        ));
    }
    for field in AddressField::ALL {
        rows.push((
            format!("Permanent_Address.{}", field.key()),
            result.permanent_address.get(field).unwrap_or_default().to_string(),
        ));
    }
    rows.push(("full_address".to_string(), result.full_address.clone()));
    rows.push((
        "face_image".to_string(),
        result.images.portrait().unwrap_or_default().to_string(),
    ));
    rows.push((
        "signature_image".to_string(),
        result.images.signature().unwrap_or_default().to_string(),
    ));

    rows
}

pub fn format_result(result: &ExtractionResult, format: OutputFormat, pretty: bool) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(result.to_json(pretty)?),
        OutputFormat::Csv => format_csv(result),
        OutputFormat::Text => Ok(format_text(result)),
    }
}

fn format_csv(result: &ExtractionResult) -> anyhow::Result<String> {
    let rows = flatten_result(result);
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record(rows.iter().map(|(key, _)| key))?;
    wtr.write_record(rows.iter().map(|(_, value)| value))?;

    Ok(String::from_utf8(wtr.into_inner()?)?)
}

fn format_text(result: &ExtractionResult) -> String {
    let mut output = String::new();

    for (key, value) in flatten_result(result) {
        let value = if value.is_empty() { "-".to_string() } else { value };
        output.push_str(&format!("{:<32} {}\n", key, value));
    }

    if !result.diagnostics.is_empty() {
        output.push_str("\nImage warnings:\n");
        for diagnostic in &result.diagnostics {
            output.push_str(&format!("  - {}\n", diagnostic));
        }
    }

    output
}
