//! Process command - normalize a single invoice text file.

use std::fs;
use std::path::PathBuf;

use clap::Args;
use console::style;
use tracing::info;

use invnorm_core::{InvoicePipeline, InvoiceRecord};

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Input OCR text file
    #[arg(required = true)]
    input: PathBuf,

    /// Invoice identifier from the upstream source
    #[arg(long)]
    id: String,

    /// Due date from the upstream source (DD-MM-YYYY)
    #[arg(long)]
    due_date: String,

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

pub fn run(args: ProcessArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = super::load_config(config_path)?;

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    info!("Processing file: {}", args.input.display());

    let text = fs::read_to_string(&args.input)?;
    if text.trim().is_empty() {
        anyhow::bail!("Input file is empty: {}", args.input.display());
    }

    let pipeline = InvoicePipeline::with_config(config);
    let record = pipeline.process(&args.id, &args.due_date, &text)?;

    if record.is_degraded() {
        eprintln!(
            "{} Record uses fallback values for: {}",
            style("!").yellow(),
            record
                .degradations
                .iter()
                .map(|d| format!("{:?}", d).to_lowercase())
                .collect::<Vec<_>>()
                .join(", ")
        );
    }

    let output = format_record(&record, args.format)?;

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

    Ok(())
}

pub fn format_record(record: &InvoiceRecord, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(record)?),
        OutputFormat::Csv => format_csv(record),
        OutputFormat::Text => Ok(format_text(record)),
    }
}

fn format_csv(record: &InvoiceRecord) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record(InvoiceRecord::HEADERS)?;
    wtr.write_record(record.columns())?;

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(record: &InvoiceRecord) -> String {
    let mut output = String::new();

    output.push_str(&format!("Invoice: {}\n", record.invoice_no));
    output.push_str(&format!("Date:    {}\n", record.invoice_date));
    output.push_str(&format!("Company: {}\n", record.company_name));
    output.push_str(&format!("Total:   {}\n", record.total_due));
    output.push('\n');
    output.push_str(&format!("ID:       {}\n", record.id));
    output.push_str(&format!("Due date: {}\n", record.due_date));

    output
}
