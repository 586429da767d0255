//! Process command - extract data from a single invoice file.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use tracing::{debug, info};

use invex_core::invoice::rules::parse_amount;
use invex_core::{export_as, ExportFormat, Field, InvoicePipeline, InvoiceRecord, SourceKind, TesseractEngine};

use super::config::load_config;

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Input file (PDF, JPG, JPEG or PNG)
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,
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

pub fn run(args: ProcessArgs, config_path: Option<&Path>, verbose: u8) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    let name = args
        .input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    if SourceKind::from_filename(&name).is_none() {
        anyhow::bail!("Unsupported file format: {} (expected pdf, jpg, jpeg or png)", name);
    }

    info!("Processing file: {}", args.input.display());

    let pipeline = InvoicePipeline::new(TesseractEngine::new(&config.ocr), &config);
    let processed = pipeline.process_file(&args.input)?;

    if let Some(warning) = &processed.warning {
        eprintln!("{} {}", style("⚠").yellow(), warning);
    }
    if verbose > 0 && !processed.report.empty_fields.is_empty() {
        let names: Vec<&str> = processed.report.empty_fields.iter().map(|f| f.label()).collect();
        eprintln!("{} Empty fields: {}", style("ℹ").blue(), names.join(", "));
    }

    let output = format_record(&processed.report.record, args.format)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
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

pub fn format_record(record: &InvoiceRecord, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(record)?),
        OutputFormat::Csv => {
            let bytes = export_as(std::slice::from_ref(record), ExportFormat::Csv, "")?;
            Ok(String::from_utf8(bytes)?)
        }
        OutputFormat::Text => Ok(format_text(record)),
    }
}

/// One `Label: value` line per field; multi-line items are indented.
pub fn format_text(record: &InvoiceRecord) -> String {
    let mut output = String::new();

    for field in Field::ALL {
        let value = record.get(field);
        match field {
            Field::InvoiceItems if value.contains('\n') => {
                output.push_str(&format!("{}:\n", field.label()));
                for line in value.lines() {
                    output.push_str(&format!("  {}\n", line));
                }
            }
            Field::TotalAmount | Field::TaxAmount => {
                output.push_str(&format!("{}: {}\n", field.label(), format_amount(value, &record.currency)));
            }
            _ => output.push_str(&format!("{}: {}\n", field.label(), value)),
        }
    }

    output
}

/// Amount with its currency code, when both are known.
fn format_amount(value: &str, currency: &str) -> String {
    match parse_amount(value) {
        Some(amount) if !currency.is_empty() => format!("{} {}", amount, currency),
        _ => value.to_string(),
    }
}
