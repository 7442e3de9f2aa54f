//! End-to-end summary runs: load a dataset, summarize it, write the requested reports.
//!
//! ```no_run
//! use rust_data_summary::pipeline::{run, LogSummaryObserver, SummaryConfig};
//! use rust_data_summary::report::ReportFormat;
//!
//! # fn main() -> Result<(), rust_data_summary::SummaryError> {
//! let mut config = SummaryConfig::for_input("iris.csv");
//! config.formats = vec![ReportFormat::Text, ReportFormat::Xlsx];
//!
//! let bundle = run(&config, Some(&LogSummaryObserver))?;
//! println!("{}", bundle.text.unwrap_or_default());
//! # Ok(())
//! # }
//! ```

mod config;
mod observer;

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::error::{SummaryError, SummaryResult};
use crate::ingestion::{load_dataset, IngestionOptions};
use crate::report::{output, render_html, render_text, render_xlsx_to_buffer, ReportBundle, ReportFormat};
use crate::summary::{summarize, ColumnResult};

pub use config::{SummaryConfig, DEFAULT_FILE_STEM};
pub use observer::{LogSummaryObserver, StdErrSummaryObserver, SummaryEvent, SummaryObserver};

/// Run a summary with the ingestion options derived from `config`.
pub fn run(config: &SummaryConfig, observer: Option<&dyn SummaryObserver>) -> SummaryResult<ReportBundle> {
    run_with_ingestion(config, &config.ingestion_options(), observer)
}

/// Like [`run`], with caller-provided ingestion options (for example, to attach an
/// [`crate::ingestion::IngestionObserver`]).
///
/// The dataset is read from `config.input`; `config.format` and `config.sheet` are ignored in
/// favour of `ingestion`.
pub fn run_with_ingestion(
    config: &SummaryConfig,
    ingestion: &IngestionOptions,
    observer: Option<&dyn SummaryObserver>,
) -> SummaryResult<ReportBundle> {
    let started = Instant::now();
    config.validate()?;

    let dataset = load_dataset(&config.input, ingestion)?;
    emit(observer, || SummaryEvent::DatasetLoaded {
        path: config.input.clone(),
        rows: dataset.row_count(),
        columns: dataset.column_count(),
    });

    let summary = summarize(&dataset)?;
    for skipped in &summary.skipped {
        emit(observer, || SummaryEvent::ColumnSkipped {
            column: skipped.name.clone(),
            data_type: skipped.data_type,
        });
    }
    for result in &summary.results {
        emit(observer, || SummaryEvent::ColumnSummarized {
            column: result.name().to_string(),
            kind: result.kind(),
        });
    }

    let bundle = write_reports(&summary.results, config, observer)?;

    emit(observer, || SummaryEvent::RunFinished {
        elapsed: started.elapsed(),
        columns: summary.results.len(),
    });
    Ok(bundle)
}

/// Render `results` in every requested format and write each report under `config.output_dir`.
///
/// Every report is rendered (concurrently) before the first file is touched, so a rendering
/// failure writes nothing. Each file is replaced atomically; if a later write fails, the reports
/// this call already wrote are removed again.
pub fn write_reports(
    results: &[ColumnResult],
    config: &SummaryConfig,
    observer: Option<&dyn SummaryObserver>,
) -> SummaryResult<ReportBundle> {
    let formats = config.requested_formats();
    let wants = |f: ReportFormat| formats.contains(&f);

    let ((mut text, mut html), xlsx) = rayon::join(
        || {
            rayon::join(
                || wants(ReportFormat::Text).then(|| render_text(results)),
                || wants(ReportFormat::Html).then(|| render_html(results)),
            )
        },
        || wants(ReportFormat::Xlsx).then(|| render_xlsx_to_buffer(results)),
    );
    let xlsx = xlsx.transpose().map_err(|source| SummaryError::Xlsx {
        path: config.output_path(ReportFormat::Xlsx),
        source,
    })?;

    let mut bundle = ReportBundle::default();
    let mut written: Vec<PathBuf> = Vec::with_capacity(formats.len());
    for format in formats.iter().copied() {
        let path = config.output_path(format);
        let outcome = match format {
            ReportFormat::Text => {
                let body = text.take().unwrap_or_default();
                let outcome = write_one(format, &path, body.as_bytes(), observer);
                bundle.text = Some(body);
                outcome
            }
            ReportFormat::Html => {
                let body = html.take().unwrap_or_default();
                let outcome = write_one(format, &path, body.as_bytes(), observer);
                bundle.html = Some(body);
                outcome
            }
            ReportFormat::Xlsx => {
                let bytes = xlsx.as_deref().unwrap_or_default();
                bundle.xlsx = Some(path.clone());
                write_one(format, &path, bytes, observer)
            }
        };
        if let Err(e) = outcome {
            remove_written(&written);
            return Err(e);
        }
        written.push(path);
    }
    Ok(bundle)
}

fn remove_written(paths: &[PathBuf]) {
    for path in paths {
        if let Err(e) = fs::remove_file(path) {
            log::warn!(target: "summary", "could not remove {} after a failed run: {e}", path.display());
        }
    }
}

fn write_one(
    format: ReportFormat,
    path: &Path,
    bytes: &[u8],
    observer: Option<&dyn SummaryObserver>,
) -> SummaryResult<()> {
    output::write_atomic(path, bytes)?;
    emit(observer, || SummaryEvent::ReportWritten {
        format,
        path: path.to_path_buf(),
        bytes: bytes.len(),
    });
    Ok(())
}

fn emit(observer: Option<&dyn SummaryObserver>, event: impl FnOnce() -> SummaryEvent) {
    if let Some(obs) = observer {
        obs.on_event(&event());
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::{run, StdErrSummaryObserver, SummaryConfig, SummaryEvent, SummaryObserver};
    use crate::error::ErrorKind;
    use crate::report::ReportFormat;
    use crate::types::DataType;

    #[derive(Default)]
    struct Recorder {
        events: Mutex<Vec<SummaryEvent>>,
    }

    impl SummaryObserver for Recorder {
        fn on_event(&self, event: &SummaryEvent) {
            self.events.lock().unwrap().push(event.clone());
        }
    }

    fn config_for(dir: &std::path::Path, csv: &str) -> SummaryConfig {
        let input = dir.join("input.csv");
        std::fs::write(&input, csv).unwrap();
        SummaryConfig {
            output_dir: dir.to_path_buf(),
            ..SummaryConfig::for_input(input)
        }
    }

    #[test]
    fn writes_every_requested_report_and_reports_events() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = config_for(dir.path(), "x,label,flag\n1,a,true\n2,b,false\n");
        let rec = Recorder::default();

        let bundle = run(&cfg, Some(&rec)).unwrap();

        assert!(bundle.text.as_deref().unwrap().contains("## x\n"));
        assert!(bundle.html.as_deref().unwrap().contains("<h2>label</h2>"));
        assert_eq!(bundle.xlsx.as_deref(), Some(cfg.output_path(ReportFormat::Xlsx).as_path()));
        for format in ReportFormat::ALL {
            assert!(cfg.output_path(format).exists(), "{format} report missing");
        }

        let events = rec.events.into_inner().unwrap();
        assert!(matches!(events[0], SummaryEvent::DatasetLoaded { rows: 2, columns: 3, .. }));
        assert!(events.contains(&SummaryEvent::ColumnSkipped {
            column: "flag".to_string(),
            data_type: DataType::Bool,
        }));
        let written = events
            .iter()
            .filter(|e| matches!(e, SummaryEvent::ReportWritten { .. }))
            .count();
        assert_eq!(written, 3);
        assert!(matches!(events.last(), Some(SummaryEvent::RunFinished { columns: 2, .. })));
    }

    #[test]
    fn only_requested_formats_are_written() {
        let dir = tempfile::tempdir().unwrap();
        let mut cfg = config_for(dir.path(), "x\n1\n");
        cfg.formats = vec![ReportFormat::Html];

        let bundle = run(&cfg, None).unwrap();

        assert!(bundle.text.is_none());
        assert!(bundle.xlsx.is_none());
        assert!(cfg.output_path(ReportFormat::Html).exists());
        assert!(!cfg.output_path(ReportFormat::Text).exists());
    }

    #[test]
    fn missing_output_directory_is_a_write_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut cfg = config_for(dir.path(), "x\n1\n");
        cfg.output_dir = dir.path().join("missing");

        let err = run(&cfg, None).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Write);
    }

    #[test]
    fn unreadable_input_is_a_data_error() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = SummaryConfig {
            output_dir: dir.path().to_path_buf(),
            ..SummaryConfig::for_input(dir.path().join("absent.csv"))
        };

        let err = run(&cfg, None).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Data);
    }

    #[test]
    fn stderr_observer_runs_to_completion() {
        let dir = tempfile::tempdir().unwrap();
        let mut cfg = config_for(dir.path(), "x,label\n0,a\n3,b\n");
        cfg.formats = vec![ReportFormat::Text];

        let bundle = run(&cfg, Some(&StdErrSummaryObserver)).unwrap();
        assert!(bundle.text.unwrap().contains("Percent of Zero Rows: 50.00%"));
    }

    #[test]
    fn unrenderable_workbook_leaves_no_reports_behind() {
        let dir = tempfile::tempdir().unwrap();
        // A workbook cell holds at most 32,767 characters.
        let csv = format!("label\n{}\n", "x".repeat(40_000));
        let cfg = config_for(dir.path(), &csv);

        let err = run(&cfg, None).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Write);
        for format in ReportFormat::ALL {
            assert!(!cfg.output_path(format).exists(), "{format} report was left behind");
        }
    }

    #[test]
    fn failed_write_removes_reports_from_the_same_run() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = config_for(dir.path(), "x\n1\n");
        // A directory in the workbook's place makes the final rename fail.
        std::fs::create_dir(cfg.output_path(ReportFormat::Xlsx)).unwrap();
        let rec = Recorder::default();

        let err = run(&cfg, Some(&rec)).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Write);
        assert!(!cfg.output_path(ReportFormat::Text).exists());
        assert!(!cfg.output_path(ReportFormat::Html).exists());
        let written = rec
            .events
            .into_inner()
            .unwrap()
            .into_iter()
            .filter(|e| matches!(e, SummaryEvent::ReportWritten { .. }))
            .count();
        assert_eq!(written, 2);
    }
}
