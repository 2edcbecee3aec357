//! Batch command - normalize a manifest of invoices into a CSV.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use chrono::NaiveDate;
use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Deserialize;
use tracing::{debug, error, warn};

use invnorm_core::{InvoicePipeline, InvoiceRecord};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Manifest CSV with columns: id, due_date, text_file
    #[arg(required = true)]
    manifest: PathBuf,

    /// Directory containing the OCR text files (default: manifest's directory)
    #[arg(long)]
    text_dir: Option<PathBuf>,

    /// Output CSV path
    #[arg(short, long, default_value = "invoices.csv")]
    output: PathBuf,

    /// Only process invoices due on or before this date; later rows are
    /// skipped without error
    #[arg(long, value_name = "DD-MM-YYYY")]
    due_by: Option<String>,

    /// Abort on the first failed invoice instead of skipping it
    #[arg(long)]
    strict: bool,
}

/// One manifest row: the identifiers the upstream collaborator supplies
/// alongside each invoice's OCR text.
#[derive(Debug, Deserialize)]
struct ManifestRow {
    id: String,
    due_date: String,
    text_file: String,
}

/// Outcome of one failed invoice.
struct Failure {
    id: String,
    error: String,
}

pub fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let config = super::load_config(config_path)?;

    let mut reader = csv::Reader::from_path(&args.manifest)?;
    let rows: Vec<ManifestRow> = reader.deserialize().collect::<Result<_, _>>()?;

    if rows.is_empty() {
        anyhow::bail!("Manifest is empty: {}", args.manifest.display());
    }

    println!(
        "{} Found {} invoices to process",
        style("ℹ").blue(),
        rows.len()
    );

    let due_by = args
        .due_by
        .as_deref()
        .map(|s| {
            NaiveDate::parse_from_str(s, "%d-%m-%Y")
                .map_err(|e| anyhow::anyhow!("invalid --due-by date {}: {}", s, e))
        })
        .transpose()?;

    let text_dir = args.text_dir.clone().unwrap_or_else(|| {
        args.manifest
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."))
    });

    let pb = ProgressBar::new(rows.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} invoices")
            .unwrap()
            .progress_chars("=>-"),
    );

    let pipeline = InvoicePipeline::with_config(config);

    let mut records: Vec<InvoiceRecord> = Vec::with_capacity(rows.len());
    let mut failures: Vec<Failure> = Vec::new();
    let mut not_yet_due = 0usize;

    for row in rows {
        if let Some(cutoff) = due_by {
            match NaiveDate::parse_from_str(&row.due_date, "%d-%m-%Y") {
                Ok(due) if due > cutoff => {
                    debug!("Invoice {} not yet due ({}), skipping", row.id, row.due_date);
                    not_yet_due += 1;
                    pb.inc(1);
                    continue;
                }
                Ok(_) => {}
                Err(e) => {
                    let message = format!("invalid due date {:?}: {}", row.due_date, e);
                    if args.strict {
                        anyhow::bail!("Processing failed for invoice {}: {}", row.id, message);
                    }
                    warn!("Skipping invoice {}: {}", row.id, message);
                    failures.push(Failure {
                        id: row.id,
                        error: message,
                    });
                    pb.inc(1);
                    continue;
                }
            }
        }

        match process_row(&pipeline, &text_dir, &row) {
            Ok(record) => records.push(record),
            Err(e) => {
                let message = e.to_string();
                if args.strict {
                    error!("Failed to process invoice {}: {}", row.id, message);
                    anyhow::bail!("Processing failed for invoice {}: {}", row.id, message);
                }
                warn!("Skipping invoice {}: {}", row.id, message);
                failures.push(Failure {
                    id: row.id,
                    error: message,
                });
            }
        }
        pb.inc(1);
    }

    pb.finish_with_message("Complete");

    write_records(&args.output, &records)?;

    println!();
    println!(
        "{} Processed {} invoices in {:?}",
        style("✓").green(),
        records.len() + failures.len(),
        start.elapsed()
    );
    println!(
        "   {} successful, {} failed",
        style(records.len()).green(),
        style(failures.len()).red()
    );
    if not_yet_due > 0 {
        println!("   {} not yet due, skipped", style(not_yet_due).yellow());
    }
    println!(
        "{} Records written to {}",
        style("✓").green(),
        args.output.display()
    );

    if !failures.is_empty() {
        println!();
        println!("{}", style("Failed invoices:").red());
        for failure in &failures {
            println!("  - {}: {}", failure.id, failure.error);
        }
    }

    Ok(())
}

fn process_row(
    pipeline: &InvoicePipeline,
    text_dir: &Path,
    row: &ManifestRow,
) -> anyhow::Result<InvoiceRecord> {
    let text_path = text_dir.join(&row.text_file);
    let text = fs::read_to_string(&text_path)
        .map_err(|e| anyhow::anyhow!("cannot read {}: {}", text_path.display(), e))?;

    if text.trim().is_empty() {
        anyhow::bail!("OCR text is empty: {}", text_path.display());
    }

    Ok(pipeline.process(&row.id, &row.due_date, &text)?)
}

/// Write the six-column export consumed by the downstream sink.
fn write_records(path: &Path, records: &[InvoiceRecord]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record(InvoiceRecord::HEADERS)?;
    for record in records {
        wtr.write_record(record.columns())?;
    }

    wtr.flush()?;
    Ok(())
}
