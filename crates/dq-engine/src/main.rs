//! CLI entry point for the data quality analysis engine.

use anyhow::{Result, anyhow};
use chrono::Local;
use clap::{Parser, ValueEnum};
use dotenv::dotenv;
use dq_engine::{AggregateReport, AnalysisConfig, ReportAssembler};
use polars::io::csv::read::{CsvParseOptions, CsvReadOptions};
use polars::prelude::*;
use tracing::{debug, info, warn};

#[cfg(feature = "ai")]
use dq_engine::ai::{OpenAiProvider, explain_or_warn};
#[cfg(feature = "ai")]
use std::env;

/// Report shape to produce.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum ReportMode {
    /// Dataset-wide counts (fixed three-sigma outlier rule)
    Aggregate,
    /// Per-record narrative (adaptive IQR-or-sigma outlier rule)
    RowLevel,
}

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Data quality checks for tabular datasets",
    long_about = "Scans a CSV dataset for missing values, duplicate rows, and\n\
                  statistical outliers, and reports them as aggregate counts or a\n\
                  row-level narrative.\n\n\
                  ENVIRONMENT VARIABLES:\n  \
                  OPENAI_API_KEY    API key for OpenAI (required for --explain)\n\n\
                  EXAMPLES:\n  \
                  # Aggregate report as JSON\n  \
                  dq-engine -i data.csv --json\n\n  \
                  # Row-level narrative with a custom identifier column\n  \
                  dq-engine -i data.csv --mode row-level --id-column customer_id\n\n  \
                  # Compare duplicates on a column subset\n  \
                  dq-engine -i data.csv --duplicate-columns email,phone\n\n  \
                  # Add an AI-generated explanation\n  \
                  dq-engine -i data.csv --explain"
)]
struct Args {
    /// Path to the CSV file to analyze
    #[arg(short, long)]
    input: String,

    /// Report shape to produce
    #[arg(short, long, value_enum, default_value = "aggregate")]
    mode: ReportMode,

    /// Identifier column for row-level findings
    #[arg(long, default_value = "id")]
    id_column: String,

    /// Display column for row-level findings (placeholder when absent)
    #[arg(long, default_value = "name")]
    name_column: String,

    /// Comma-separated columns to compare for duplicates
    ///
    /// If not specified, all columns are compared
    #[arg(long)]
    duplicate_columns: Option<String>,

    /// Sample-size boundary between the IQR and sigma outlier methods
    #[arg(long, default_value = "50")]
    small_sample_threshold: usize,

    /// Multiplier applied to the interquartile range
    #[arg(long, default_value = "1.5")]
    iqr_multiplier: f64,

    /// Number of standard deviations beyond which a value is an outlier
    #[arg(long, default_value = "3.0")]
    sigma_multiplier: f64,

    /// Output JSON to stdout instead of a human-readable summary
    ///
    /// Disables all progress logs; only applies to aggregate mode
    #[arg(long)]
    json: bool,

    /// Generate an AI explanation of the aggregate report
    #[arg(long)]
    explain: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Suppress progress output (only show errors and the report)
    #[arg(short, long)]
    quiet: bool,
}

/// Initialize the tracing subscriber for logging.
///
/// When `json_output` is true, logging is completely disabled to ensure
/// only JSON is written to stdout.
fn init_logging(level: &str, quiet: bool, json_output: bool) {
    if json_output {
        return;
    }

    use tracing_subscriber::EnvFilter;

    let effective_level = if quiet { "warn" } else { level };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(effective_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(&args.log_level, args.quiet, args.json);

    // Load environment variables from .env file
    dotenv().ok();

    if !std::path::Path::new(&args.input).exists() {
        return Err(anyhow!("Input file not found: {}", args.input));
    }

    info!("Loading dataset from: {}", args.input);
    let data = load_csv_with_fallbacks(&args.input)?;
    info!("Dataset loaded successfully: {:?}", data.shape());

    let config = build_config(&args)?;

    match args.mode {
        ReportMode::Aggregate => run_aggregate(&data, &config, &args),
        ReportMode::RowLevel => run_row_level(&data, &config, &args),
    }
}

/// Build the analysis configuration from CLI arguments.
fn build_config(args: &Args) -> Result<AnalysisConfig> {
    let mut builder = AnalysisConfig::builder()
        .id_column(&args.id_column)
        .name_column(&args.name_column)
        .small_sample_threshold(args.small_sample_threshold)
        .iqr_multiplier(args.iqr_multiplier)
        .sigma_multiplier(args.sigma_multiplier);

    if let Some(ref columns) = args.duplicate_columns {
        let columns: Vec<String> = columns
            .split(',')
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .collect();
        builder = builder.duplicate_columns(columns);
    }

    Ok(builder.build()?)
}

/// Run aggregate mode and print the report.
fn run_aggregate(data: &DataFrame, config: &AnalysisConfig, args: &Args) -> Result<()> {
    let report = ReportAssembler::aggregate(data, config)
        .map_err(|e| anyhow!("Quality analysis failed: {}", e))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    print_aggregate_summary(&report, args);

    if args.explain {
        let explanation = generate_explanation(&report)?;
        println!();
        println!("AI Insights & Suggested Fixes");
        println!("{}", "-".repeat(40));
        println!("{}", explanation);
    }

    Ok(())
}

/// Run row-level mode and print the narrative.
fn run_row_level(data: &DataFrame, config: &AnalysisConfig, args: &Args) -> Result<()> {
    if args.explain {
        warn!("--explain applies to aggregate mode only; ignoring");
    }

    let narrative = ReportAssembler::row_level(data, config)
        .map_err(|e| anyhow!("Quality analysis failed: {}", e))?;

    println!("{}", narrative);
    Ok(())
}

/// Print a human-readable summary of the aggregate report.
///
/// This function uses `println!` intentionally for user-facing CLI output;
/// unlike logging, the report should always be visible.
fn print_aggregate_summary(report: &AggregateReport, args: &Args) {
    println!();
    println!("{}", "=".repeat(60));
    println!("DATA QUALITY REPORT");
    println!("{}", "=".repeat(60));
    println!();
    println!("Input:     {}", args.input);
    println!(
        "Generated: {}",
        Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    println!();

    println!("Missing Values");
    println!("{}", "-".repeat(40));
    if report.missing_values.is_empty() {
        println!("  none");
    } else {
        for (column, count) in &report.missing_values {
            println!("  {:<24} {}", column, count);
        }
    }
    println!();

    println!("Duplicate Rows");
    println!("{}", "-".repeat(40));
    println!("  {}", report.duplicates);
    println!();

    println!("Data Types");
    println!("{}", "-".repeat(40));
    for (column, dtype) in &report.data_types {
        println!("  {:<24} {}", column, dtype);
    }
    println!();

    println!("Outliers (beyond {} std dev)", args.sigma_multiplier);
    println!("{}", "-".repeat(40));
    if report.outliers.is_empty() {
        println!("  no numeric columns");
    } else {
        for (column, count) in &report.outliers {
            println!("  {:<24} {}", column, count);
        }
    }
    println!();

    println!("Use --json for machine-readable output");
    println!("Use --mode row-level for per-record findings");
    println!("{}", "=".repeat(60));
}

/// Generate the AI explanation for the aggregate report.
#[cfg(feature = "ai")]
fn generate_explanation(report: &AggregateReport) -> Result<String> {
    let api_key = env::var("OPENAI_API_KEY")
        .map_err(|_| anyhow!("OPENAI_API_KEY not set; required for --explain"))?;

    info!("Generating AI explanation (OpenAI)");
    let provider = OpenAiProvider::new(api_key)?;

    // Explanation failures surface as a warning string, never an error:
    // the analysis itself has already completed.
    Ok(explain_or_warn(&provider, report))
}

#[cfg(not(feature = "ai"))]
fn generate_explanation(_report: &AggregateReport) -> Result<String> {
    warn!("AI support not compiled in. Compile with --features ai to enable --explain.");
    Ok("Warning: AI support not compiled in; no explanation generated.".to_string())
}

/// Load CSV with fallback strategies for malformed quoting.
fn load_csv_with_fallbacks(path: &str) -> Result<DataFrame> {
    use std::path::PathBuf;

    // Strategy 1: standard loading with quote handling
    match CsvReadOptions::default()
        .with_infer_schema_length(Some(100))
        .with_has_header(true)
        .with_parse_options(CsvParseOptions::default().with_quote_char(Some(b'"')))
        .try_into_reader_with_file_path(Some(PathBuf::from(path)))?
        .finish()
    {
        Ok(df) => return Ok(df),
        Err(e) => {
            debug!("Standard loading failed: {}", e);
        }
    }

    // Strategy 2: pre-clean content (stray quotes, blank lines)
    let content = std::fs::read_to_string(path)?;
    let cleaned: String = content
        .replace("\"\"\"", "\"")
        .replace("\"\"", "\"")
        .lines()
        .filter(|line| !line.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n");

    use std::io::Cursor;
    CsvReadOptions::default()
        .with_infer_schema_length(Some(100))
        .with_has_header(true)
        .into_reader_with_file_handle(Cursor::new(cleaned))
        .finish()
        .map_err(|e| anyhow!("Failed to parse CSV: {}", e))
}
