//! Batch processing command for multiple invoice files.

use std::path::{Path, PathBuf};
use std::time::Instant;

use chrono::Local;
use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::debug;

use invex_core::export::{default_filename_with, normalize_filename_with};
use invex_core::models::config::ExportConfig;
use invex_core::{export_as, write_to_path, BatchReport, ExportFormat, InvoicePipeline, RecordStore, TesseractEngine};

use super::config::load_config;
use super::expand_inputs;

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Input files or glob patterns
    #[arg(required = true)]
    inputs: Vec<String>,

    /// Output spreadsheet (.xlsx or .csv; default: timestamped name)
    #[arg(short, long)]
    output: Option<String>,

    /// Hide the progress bar
    #[arg(long)]
    no_progress: bool,
}

pub fn run(args: BatchArgs, config_path: Option<&Path>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    let files = expand_inputs(&args.inputs)?;
    if files.is_empty() {
        anyhow::bail!("No matching files found for: {}", args.inputs.join(" "));
    }

    println!(
        "{} Found {} files to process",
        style("ℹ").blue(),
        files.len()
    );

    let pb = if args.no_progress {
        ProgressBar::hidden()
    } else {
        ProgressBar::new(files.len() as u64)
    };
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("=>-"),
    );

    let pipeline = InvoicePipeline::new(TesseractEngine::new(&config.ocr), &config);
    let mut store = RecordStore::new();
    let report = pipeline.process_batch_with_progress(&files, &mut store, |index, _, name| {
        pb.set_position(index as u64);
        pb.set_message(name.to_string());
    });
    pb.finish_and_clear();

    let output_path = output_path(args.output.as_deref(), &config.export);
    let format = ExportFormat::from_filename(&output_path.to_string_lossy()).unwrap_or(config.export.format);
    let bytes = export_as(store.records(), format, &config.export.sheet_name)?;
    write_to_path(&bytes, &output_path)?;
    debug!("Wrote {} bytes to {}", bytes.len(), output_path.display());

    print_summary(&report, &output_path, start);

    Ok(())
}

/// Explicit output name with its extension normalized, or a timestamped default.
pub fn output_path(requested: Option<&str>, export: &ExportConfig) -> PathBuf {
    match requested {
        Some(name) => PathBuf::from(normalize_filename_with(name, export.format)),
        None => PathBuf::from(default_filename_with(
            &export.filename_prefix,
            export.format,
            Local::now().naive_local(),
        )),
    }
}

fn print_summary(report: &BatchReport, output_path: &Path, start: Instant) {
    if report.has_warnings() {
        println!();
        println!("{}", style("Warnings:").yellow());
        for warning in &report.warnings {
            println!("  - {}", warning);
        }
    }

    println!();
    println!(
        "{} Processed {} files in {:?}",
        style("✓").green(),
        report.processed,
        start.elapsed()
    );
    println!(
        "   {} extracted, {} skipped",
        style(report.processed).green(),
        style(report.skipped).red()
    );
    println!(
        "{} Spreadsheet written to {}",
        style("✓").green(),
        output_path.display()
    );
}
