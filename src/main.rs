use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use rust_data_summary::ingestion::{
    CompositeObserver, ExcelSheetSelection, FileObserver, IngestionFormat, IngestionObserver, LogObserver,
};
use rust_data_summary::pipeline::{run_with_ingestion, LogSummaryObserver, SummaryConfig};
use rust_data_summary::report::ReportFormat;
use rust_data_summary::{ErrorKind, SummaryError, SummaryResult};

/// Compute per-column summary statistics and write text, HTML and XLSX reports.
#[derive(Parser, Debug)]
#[command(name = "data-summary", version)]
struct Args {
    /// Dataset to summarize (.csv, .json, .ndjson, .parquet, .xlsx, ...)
    input: Option<PathBuf>,

    /// TOML configuration file; flags given on the command line win over it
    #[arg(long, short = 'c', value_name = "PATH")]
    config: Option<PathBuf>,

    /// Directory the reports are written to
    #[arg(long, short = 'o', value_name = "DIR")]
    out_dir: Option<PathBuf>,

    /// File name (without extension) shared by all reports
    #[arg(long, value_name = "NAME")]
    stem: Option<String>,

    /// Report format to produce: text, html or xlsx (repeatable; default all)
    #[arg(long = "format", short = 'f', value_name = "FORMAT")]
    formats: Vec<String>,

    /// Worksheet to read when the input is a spreadsheet
    #[arg(long, value_name = "NAME")]
    sheet: Option<String>,

    /// Input format, overriding the file extension: csv, json, parquet or excel
    #[arg(long, value_name = "FORMAT")]
    input_format: Option<String>,

    /// Also append ingestion events to this file
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Log progress at info level (RUST_LOG takes precedence)
    #[arg(long, short = 'v')]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let default_level = if args.verbose { "info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level)).init();

    match run_cli(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::from(exit_code(e.kind()))
        }
    }
}

fn run_cli(args: &Args) -> SummaryResult<()> {
    let config = build_config(args)?;

    let mut observers: Vec<Arc<dyn IngestionObserver>> = vec![Arc::new(LogObserver)];
    if let Some(path) = &args.log_file {
        observers.push(Arc::new(FileObserver::new(path)));
    }
    let mut ingestion = config.ingestion_options();
    ingestion.observer = Some(Arc::new(CompositeObserver::new(observers)));

    let bundle = run_with_ingestion(&config, &ingestion, Some(&LogSummaryObserver))?;
    for format in config.requested_formats() {
        let written = match format {
            ReportFormat::Text => bundle.text.is_some(),
            ReportFormat::Html => bundle.html.is_some(),
            ReportFormat::Xlsx => bundle.xlsx.is_some(),
        };
        if written {
            println!("{}", config.output_path(format).display());
        }
    }
    Ok(())
}

fn build_config(args: &Args) -> SummaryResult<SummaryConfig> {
    let mut config = match &args.config {
        Some(path) => SummaryConfig::from_toml_path(path)?,
        None => SummaryConfig::default(),
    };

    if let Some(input) = &args.input {
        config.input = input.clone();
    }
    if let Some(dir) = &args.out_dir {
        config.output_dir = dir.clone();
    }
    if let Some(stem) = &args.stem {
        config.file_stem = stem.clone();
    }
    if !args.formats.is_empty() {
        config.formats = args
            .formats
            .iter()
            .map(|f| f.parse::<ReportFormat>())
            .collect::<SummaryResult<Vec<_>>>()?;
    }
    if let Some(sheet) = &args.sheet {
        config.sheet = Some(sheet.clone());
    }
    if let Some(name) = &args.input_format {
        config.format = Some(parse_input_format(name)?);
    }

    config.validate()?;
    Ok(config)
}

fn parse_input_format(name: &str) -> SummaryResult<IngestionFormat> {
    let lowered = name.trim().to_ascii_lowercase();
    match lowered.as_str() {
        "excel" | "spreadsheet" => Ok(IngestionFormat::Excel),
        other => IngestionFormat::from_extension(other).ok_or_else(|| SummaryError::Config {
            message: format!("unknown input format '{name}' (expected csv, json, parquet or excel)"),
        }),
    }
}

fn exit_code(kind: ErrorKind) -> u8 {
    // sysexits.h
    match kind {
        ErrorKind::Format => 64,
        ErrorKind::Data => 65,
        ErrorKind::Write => 74,
    }
}
