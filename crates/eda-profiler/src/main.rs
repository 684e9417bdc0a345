//! CLI entry point for the exploratory data profiler.

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use eda_profiler::reporting::RelationEntry;
use eda_profiler::{
    ColumnDescription, ColumnProfile, DatasetProfile, ProfileReport, ProfilerConfig,
    ProfilingSession, RelationResult, ReportGenerator, load_csv,
};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Exploratory data profiler for CSV files",
    long_about = "Infers column types, summarizes missing values and duplicates, describes \
                  each column and relates pairs of columns.\n\n\
                  EXAMPLES:\n  \
                  # Overview of a dataset\n  \
                  eda-profiler -i data.csv\n\n  \
                  # Describe a single column\n  \
                  eda-profiler -i data.csv --column age\n\n  \
                  # Relate two columns\n  \
                  eda-profiler -i data.csv --relation age income\n\n  \
                  # Machine-readable output\n  \
                  eda-profiler -i data.csv --json | jq .highlights"
)]
struct Args {
    /// Path to the CSV file to profile (.csv, .tsv or .txt)
    #[arg(short, long)]
    input: String,

    /// Output directory for reports
    #[arg(short, long, default_value = "./outputs")]
    output: String,

    /// Describe a single column instead of the whole dataset
    #[arg(short, long, conflicts_with = "relation")]
    column: Option<String>,

    /// Relate two columns (correlation, grouped means or cross-tabulation)
    #[arg(long, num_args = 2, value_names = ["X", "Y"])]
    relation: Option<Vec<String>>,

    /// Profiler configuration file (JSON); flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Share of parseable values above which a column is numeric (0.0 - 1.0)
    #[arg(long)]
    numeric_threshold: Option<f64>,

    /// Distinct values at or below which a column is always categorical
    #[arg(long)]
    categorical_min_unique: Option<usize>,

    /// Distinct-to-count ratio at or below which a column is categorical (0.0 - 1.0)
    #[arg(long)]
    categorical_ratio: Option<f64>,

    /// Maximum number of histogram bins
    #[arg(long)]
    max_bins: Option<usize>,

    /// Number of most frequent values shown for non-numeric columns
    #[arg(long)]
    top_values: Option<usize>,

    /// Number of rows in the head and tail samples
    #[arg(long)]
    sample_rows: Option<usize>,

    /// Strip currency symbols, percent signs and thousands separators before
    /// numeric parsing
    #[arg(long)]
    strip_formatting: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Suppress progress output (only show errors and final result)
    #[arg(short, long)]
    quiet: bool,

    /// Output JSON to stdout instead of human-readable summary
    ///
    /// Disables all progress logs; only outputs the JSON result.
    #[arg(long)]
    json: bool,

    /// Write a detailed JSON report to the output directory
    ///
    /// The report will be saved as <input_name>_report.json
    #[arg(short = 'r', long)]
    emit_report: bool,
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

    if !Path::new(&args.input).exists() {
        return Err(anyhow!("Input file not found: {}", args.input));
    }

    let config = build_config(&args)?;
    debug!("Using configuration: {:?}", config);

    info!("Loading dataset from: {}", args.input);
    let dataset =
        load_csv(&args.input).with_context(|| format!("Failed to load {}", args.input))?;

    let session = ProfilingSession::new(dataset, config)?;

    if let Some(column) = &args.column {
        let profile = session.profile_column(column)?;
        if args.json {
            println!("{}", serde_json::to_string_pretty(&profile)?);
        } else {
            print_column_profile(&profile);
        }
        return emit_report_if_requested(&session, &args, Vec::new());
    }

    if let Some([x, y]) = args.relation.as_deref() {
        let result = session.relation(x, y)?;
        if args.json {
            println!("{}", serde_json::to_string_pretty(&result)?);
        } else {
            print_relation(x, y, &result);
        }
        let entry = RelationEntry {
            x: x.clone(),
            y: y.clone(),
            result,
        };
        return emit_report_if_requested(&session, &args, vec![entry]);
    }

    let report = ReportGenerator::build_report(&args.input, session.profile()?);
    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_overview(&report);
    }
    if args.emit_report {
        write_report(&report, &args)?;
    }

    Ok(())
}

/// Merge the optional config file with command-line overrides.
fn build_config(args: &Args) -> Result<ProfilerConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Could not read config {}", path.display()))?;
            serde_json::from_str::<ProfilerConfig>(&content)
                .with_context(|| format!("Invalid config {}", path.display()))?
        }
        None => ProfilerConfig::default(),
    };

    if let Some(v) = args.numeric_threshold {
        config.numeric_ratio_threshold = v;
    }
    if let Some(v) = args.categorical_min_unique {
        config.categorical_min_unique = v;
    }
    if let Some(v) = args.categorical_ratio {
        config.categorical_unique_ratio = v;
    }
    if let Some(v) = args.max_bins {
        config.max_histogram_bins = v;
    }
    if let Some(v) = args.top_values {
        config.top_values_limit = v;
    }
    if let Some(v) = args.sample_rows {
        config.sample_rows = v;
    }
    if args.strip_formatting {
        config.strip_numeric_formatting = true;
    }

    config.validate()?;
    Ok(config)
}

fn emit_report_if_requested(
    session: &ProfilingSession,
    args: &Args,
    relations: Vec<RelationEntry>,
) -> Result<()> {
    if !args.emit_report {
        return Ok(());
    }
    let mut report = ReportGenerator::build_report(&args.input, session.profile()?);
    report.relations = relations;
    write_report(&report, args)
}

fn write_report(report: &ProfileReport, args: &Args) -> Result<()> {
    let generator = ReportGenerator::new(PathBuf::from(&args.output));
    let report_path = generator.write_report_to_file(report, &extract_file_stem(&args.input))?;
    info!("Report written to: {}", report_path.display());
    Ok(())
}

/// Extract the file stem (name without extension) from a path.
fn extract_file_stem(path: &str) -> String {
    Path::new(path)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output")
        .to_string()
}

/// Truncate a string to max length with ellipsis
fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

// ============================================================================
// Human-readable output
// ============================================================================

fn print_overview(report: &ProfileReport) {
    let profile = &report.profile;
    let overview = &profile.overview;
    let types = overview.type_distribution;

    println!("\n{}", "=".repeat(80));
    println!("DATASET OVERVIEW");
    println!("{}\n", "=".repeat(80));

    println!("  File: {}", report.input_file);
    println!("  Rows: {}", overview.row_count);
    println!("  Columns: {}", overview.column_count);
    println!(
        "  Missing cells: {} of {} ({}%)",
        overview.total_missing,
        overview.total_cells,
        overview.missing_percentage_display()
    );
    println!(
        "  Duplicate rows: {} ({}%)",
        overview.duplicate_rows, report.highlights.duplicate_percentage
    );
    println!(
        "  Column types: {} numeric, {} categorical, {} text, {} unknown",
        types.numeric, types.categorical, types.text, types.unknown
    );
    println!();

    println!("COLUMN PROFILES");
    println!("{}", "-".repeat(40));
    println!(
        "{:<20} {:<12} {:<10} {:<36}",
        "Column", "Type", "Missing %", "Summary"
    );
    println!("{}", "-".repeat(80));
    for col in &profile.column_profiles {
        println!(
            "{:<20} {:<12} {:<10.1} {:<36}",
            truncate_str(&col.name, 19),
            col.column_type,
            col.missing_percentage,
            truncate_str(&describe_briefly(col), 36)
        );
    }
    println!();

    if !report.highlights.high_missing_columns.is_empty() {
        println!(
            "  Columns with more than half missing: {}",
            report.highlights.high_missing_columns.join(", ")
        );
        println!();
    }

    print_sample(profile);

    println!("Use --column NAME or --relation X Y for details");
    println!("Use --json for machine-readable output");
    println!("Use --emit-report to save detailed JSON report");
    println!("{}", "=".repeat(80));
}

fn describe_briefly(col: &ColumnProfile) -> String {
    match &col.description {
        ColumnDescription::Numeric(s) => format!(
            "mean {:.2}, median {:.2}, range {}..{}",
            s.mean, s.median, s.min, s.max
        ),
        ColumnDescription::Categorical(c) => match &c.top_value {
            Some(top) => format!(
                "{} unique, top '{}' ({})",
                c.unique_count, top.value, top.count
            ),
            None => "no values".to_string(),
        },
    }
}

fn print_sample(profile: &DatasetProfile) {
    if profile.head.is_empty() {
        return;
    }
    println!("FIRST {} ROWS", profile.head.len());
    println!("{}", "-".repeat(40));
    println!(
        "  {}",
        profile
            .schema
            .iter()
            .map(|c| truncate_str(c, 12))
            .collect::<Vec<_>>()
            .join(" | ")
    );
    for row in &profile.head {
        println!(
            "  {}",
            row.iter()
                .map(|cell| truncate_str(&cell.display(), 12))
                .collect::<Vec<_>>()
                .join(" | ")
        );
    }
    println!();
}

fn print_column_profile(profile: &ColumnProfile) {
    println!("\n{}", "=".repeat(80));
    println!("COLUMN: {}", profile.name);
    println!("{}\n", "=".repeat(80));

    println!("  Type: {}", profile.column_type);
    println!(
        "  Missing values: {} ({:.1}%)",
        profile.missing_count, profile.missing_percentage
    );
    println!();

    match &profile.description {
        ColumnDescription::Numeric(s) => {
            println!("STATISTICS");
            println!("{}", "-".repeat(40));
            println!("  Count:  {}", s.count);
            println!("  Mean:   {:.2}", s.mean);
            println!("  Std:    {:.2}", s.std);
            println!("  Min:    {:.2}", s.min);
            println!("  Q1:     {:.2}", s.q1);
            println!("  Median: {:.2}", s.median);
            println!("  Q3:     {:.2}", s.q3);
            println!("  Max:    {:.2}", s.max);
            println!();
        }
        ColumnDescription::Categorical(c) => {
            println!("VALUES");
            println!("{}", "-".repeat(40));
            println!("  Count:  {}", c.count);
            println!("  Unique: {}", c.unique_count);
            if let Some(top) = &c.top_value {
                println!("  Most frequent: '{}' ({} times)", top.value, top.count);
            }
            println!();
        }
    }

    if let Some(hist) = &profile.histogram {
        println!("DISTRIBUTION");
        println!("{}", "-".repeat(40));
        let widest = hist.counts.iter().copied().max().unwrap_or(0).max(1);
        for (label, count) in hist.labels().iter().zip(&hist.counts) {
            let bar = "#".repeat(count * 40 / widest);
            println!("  {:>17} | {:<40} {}", label, bar, count);
        }
        println!();
    }

    if !profile.top_values.is_empty() {
        println!("TOP VALUES");
        println!("{}", "-".repeat(40));
        for entry in &profile.top_values {
            println!("  {:<30} {}", truncate_str(&entry.value, 29), entry.count);
        }
        println!();
    }
}

fn print_relation(x: &str, y: &str, result: &RelationResult) {
    println!("\n{}", "=".repeat(80));
    println!("RELATION: {} vs {}", x, y);
    println!("{}\n", "=".repeat(80));

    match result {
        RelationResult::Correlation {
            coefficient,
            pair_count,
        } => {
            println!("  Correlation: {:.3}", coefficient);
            println!("  Pairs: {}", pair_count);
        }
        RelationResult::GroupedMeans {
            numeric_column,
            group_column,
            groups,
        } => {
            println!("  Mean of '{}' by '{}'", numeric_column, group_column);
            println!("{}", "-".repeat(40));
            for g in groups {
                println!(
                    "  {:<30} {:>12.2} (n={})",
                    truncate_str(&g.group, 29),
                    g.mean,
                    g.count
                );
            }
        }
        RelationResult::CrossTab(tab) => {
            if tab.is_empty() {
                println!("  No rows with both values present");
            } else {
                print!("  {:<14}", "");
                for c in &tab.column_categories {
                    print!(" {:>10}", truncate_str(c, 10));
                }
                println!();
                for (r, row) in tab.row_categories.iter().zip(&tab.counts) {
                    print!("  {:<14}", truncate_str(r, 14));
                    for count in row {
                        print!(" {:>10}", count);
                    }
                    println!();
                }
            }
        }
    }
    println!();
}
