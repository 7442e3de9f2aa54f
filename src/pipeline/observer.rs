use std::path::PathBuf;
use std::time::Duration;

use crate::report::ReportFormat;
use crate::types::DataType;

/// Events emitted while a summary run progresses.
#[derive(Debug, Clone, PartialEq)]
pub enum SummaryEvent {
    DatasetLoaded {
        path: PathBuf,
        rows: usize,
        columns: usize,
    },
    ColumnSummarized {
        column: String,
        kind: &'static str,
    },
    /// The column's type has no summary; it is left out of every report.
    ColumnSkipped {
        column: String,
        data_type: DataType,
    },
    ReportWritten {
        format: ReportFormat,
        path: PathBuf,
        bytes: usize,
    },
    RunFinished {
        elapsed: Duration,
        columns: usize,
    },
}

/// Observer hook for summary runs.
pub trait SummaryObserver: Send + Sync {
    fn on_event(&self, event: &SummaryEvent);
}

/// A simple stderr logger for summary events.
#[derive(Debug, Default)]
pub struct StdErrSummaryObserver;

impl SummaryObserver for StdErrSummaryObserver {
    fn on_event(&self, event: &SummaryEvent) {
        eprintln!("{event:?}");
    }
}

/// Forwards summary events to the [`log`] facade (target `summary`).
///
/// Skipped columns are logged at `warn`, everything else at `info`.
#[derive(Debug, Default)]
pub struct LogSummaryObserver;

impl SummaryObserver for LogSummaryObserver {
    fn on_event(&self, event: &SummaryEvent) {
        match event {
            SummaryEvent::DatasetLoaded { path, rows, columns } => {
                log::info!(target: "summary", "loaded {} rows={rows} columns={columns}", path.display());
            }
            SummaryEvent::ColumnSummarized { column, kind } => {
                log::info!(target: "summary", "summarized column '{column}' as {kind}");
            }
            SummaryEvent::ColumnSkipped { column, data_type } => {
                log::warn!(target: "summary", "skipped column '{column}': no summary for type {data_type}");
            }
            SummaryEvent::ReportWritten { format, path, bytes } => {
                log::info!(target: "summary", "wrote {format} report {} ({bytes} bytes)", path.display());
            }
            SummaryEvent::RunFinished { elapsed, columns } => {
                log::info!(target: "summary", "finished columns={columns} elapsed={elapsed:?}");
            }
        }
    }
}
