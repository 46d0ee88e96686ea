//! CLI entry point for the data refinement pipeline.

use anyhow::{Context, Result, anyhow};
use clap::{Parser, ValueEnum};
use dotenv::dotenv;
use refine_processing::{
    BoundaryFill, RefineConfig, Refiner, ReportAssembler, ReportEnvelope, ReportWriter,
    load_table_from_path, write_table,
};
use std::path::Path;
use tracing::{debug, error, info};

/// CLI-compatible boundary fill policy enum
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliBoundaryFill {
    /// Carry the last known value forward over trailing gaps
    Forward,
    /// Copy the nearest known value into leading and trailing gaps
    Nearest,
    /// Leave boundary gaps absent
    Leave,
}

impl From<CliBoundaryFill> for BoundaryFill {
    fn from(cli: CliBoundaryFill) -> Self {
        match cli {
            CliBoundaryFill::Forward => BoundaryFill::Forward,
            CliBoundaryFill::Nearest => BoundaryFill::Nearest,
            CliBoundaryFill::Leave => BoundaryFill::Leave,
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Tabular data refinement with explained missing value repair",
    long_about = "Repairs missing values, removes duplicates and normalizes a CSV table.\n\n\
                  EXAMPLES:\n  \
                  # Clean a file with the default column rules\n  \
                  refine-processing -i people.csv\n\n  \
                  # Custom rules and output location\n  \
                  refine-processing -i people.csv --config rules.json -o results/\n\n  \
                  # Machine-readable report only\n  \
                  refine-processing -i people.csv --json"
)]
struct Args {
    /// Path to the CSV file to process
    #[arg(short, long)]
    input: String,

    /// Output directory for results
    #[arg(short, long, default_value = "./outputs")]
    output: String,

    /// Custom output file name (without extension)
    ///
    /// If not specified, uses "<input_name>_cleaned"
    #[arg(long)]
    output_name: Option<String>,

    /// JSON file with the refinement configuration
    #[arg(long)]
    config: Option<String>,

    /// How gaps at the start or end of a numeric column are handled
    #[arg(long, value_enum)]
    boundary_fill: Option<CliBoundaryFill>,

    /// Keep duplicate rows
    #[arg(long)]
    no_dedup: bool,

    /// Skip text casing and numeric type normalization
    #[arg(long)]
    no_normalize: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Suppress progress output (only show errors and final result)
    #[arg(short, long)]
    quiet: bool,

    /// Output JSON to stdout instead of the text report
    ///
    /// Disables all progress logs; only outputs the validation report.
    /// Useful for piping to other tools: `... --json | jq .missing_data`
    #[arg(long)]
    json: bool,

    /// Write a JSON report to the output directory
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
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    // Load environment variables from .env file before RUST_LOG is read
    dotenv().ok();

    let args = Args::parse();
    init_logging(&args.log_level, args.quiet, args.json);

    if !Path::new(&args.input).exists() {
        return Err(anyhow!("Input file not found: {}", args.input));
    }

    let config = build_config(&args)?;
    let refiner = Refiner::builder()
        .config(config)
        .on_progress(|update| {
            debug!(
                "[{:.0}%] {}: {}",
                update.progress * 100.0,
                update.stage.display_name(),
                update.message
            );
        })
        .build()?;

    run_refiner(&refiner, &args)
}

/// Merge the optional config file with the command line overrides.
fn build_config(args: &Args) -> Result<RefineConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {}", path))?;
            serde_json::from_str::<RefineConfig>(&text)
                .with_context(|| format!("Invalid config file: {}", path))?
        }
        None => RefineConfig::default(),
    };

    if let Some(policy) = args.boundary_fill {
        config.boundary_fill = policy.into();
    }
    if args.no_dedup {
        config.remove_duplicates = false;
    }
    if args.no_normalize {
        config.normalize = false;
    }

    config.validate()?;
    Ok(config)
}

fn run_refiner(refiner: &Refiner, args: &Args) -> Result<()> {
    info!("Loading dataset from: {}", args.input);
    let data = load_table_from_path(&args.input, refiner.config())?;
    info!("Dataset loaded successfully: {:?}", data.shape());

    let mut outcome = match refiner.process(data) {
        Ok(outcome) => outcome,
        Err(e) => {
            error!("Refinement failed: {}", e);
            return Err(anyhow!("Refinement failed: {}", e));
        }
    };

    let input_stem = extract_file_stem(&args.input);
    let writer = ReportWriter::new(&args.output);

    let csv = write_table(&mut outcome.data, refiner.config())?;
    let dataset_name = match &args.output_name {
        Some(name) => name.clone(),
        None => format!("{}_cleaned", input_stem),
    };
    writer.write_dataset(&csv, &dataset_name)?;

    if args.emit_report {
        let envelope = ReportEnvelope::new(&args.input, outcome.report.clone());
        let report_path = writer.write_json(&envelope, &input_stem)?;
        info!("Report written to: {}", report_path.display());
    }
    info!("Outputs written to: {}", writer.output_dir().display());

    if args.json {
        println!("{}", serde_json::to_string_pretty(&outcome.report)?);
    } else {
        println!("{}", ReportAssembler.render(&outcome.report));
    }

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

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_dir(name: &str) -> std::path::PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "refine-cli-{}-{}",
            name,
            std::process::id()
        ));
        let _ = std::fs::remove_dir_all(&dir);
        dir
    }

    fn fixture(name: &str) -> String {
        Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("tests/fixtures")
            .join(name)
            .display()
            .to_string()
    }

    #[test]
    fn test_json_output_still_emits_report_file() {
        let dir = temp_dir("json-report");
        let input = fixture("patients.csv");
        let output = dir.display().to_string();
        let args = Args::parse_from([
            "refine-processing",
            "-i",
            input.as_str(),
            "-o",
            output.as_str(),
            "--json",
            "-r",
        ]);

        let refiner = Refiner::builder()
            .config(build_config(&args).unwrap())
            .build()
            .unwrap();
        run_refiner(&refiner, &args).unwrap();

        assert!(dir.join("patients_report.json").exists());
        assert!(dir.join("patients_cleaned.csv").exists());

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_flags_override_config() {
        let args = Args::parse_from([
            "refine-processing",
            "-i",
            "people.csv",
            "--boundary-fill",
            "leave",
            "--no-dedup",
        ]);

        let config = build_config(&args).unwrap();
        assert_eq!(config.boundary_fill, BoundaryFill::Leave);
        assert!(!config.remove_duplicates);
        assert!(config.normalize);
    }
}
