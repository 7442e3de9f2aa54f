//! Unified ingestion entrypoint.
//!
//! Most callers should use [`load_dataset`], which infers a [`Schema`] from the file and then
//! ingests it into an in-memory [`crate::types::DataSet`]. [`ingest_from_path`] is available when
//! the schema is already known.
//!
//! - If [`IngestionOptions::format`] is `None`, the ingestion format is inferred from the file
//!   extension.
//! - If an [`super::observability::IngestionObserver`] is provided, success/failure/alerts are
//!   reported to it.

use std::error::Error as StdError;
use std::fmt;
use std::path::Path;
use std::sync::Arc;

use serde::Deserialize;

use crate::error::{IngestionError, IngestionResult};
use crate::types::{DataSet, Schema};

use super::observability::{
    IngestionContext, IngestionObserver, IngestionSeverity, IngestionStage, IngestionStats,
};
use super::{csv, json, parquet};

/// Supported ingestion formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IngestionFormat {
    /// Comma-separated values.
    Csv,
    /// JSON array-of-objects or NDJSON.
    Json,
    /// Apache Parquet.
    Parquet,
    /// Spreadsheet/workbook formats (feature-gated behind `excel`).
    Excel,
}

impl IngestionFormat {
    /// Parse an ingestion format from a file extension (case-insensitive).
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "csv" => Some(Self::Csv),
            "json" | "ndjson" => Some(Self::Json),
            "parquet" | "pq" => Some(Self::Parquet),
            "xlsx" | "xls" | "xlsm" | "xlsb" | "ods" => Some(Self::Excel),
            _ => None,
        }
    }
}

impl fmt::Display for IngestionFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Csv => "csv",
            Self::Json => "json",
            Self::Parquet => "parquet",
            Self::Excel => "excel",
        })
    }
}

/// How to choose sheet(s) when ingesting an Excel workbook.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ExcelSheetSelection {
    /// Ingest the first sheet (default).
    #[default]
    First,
    /// Ingest a single named sheet.
    Sheet(String),
    /// Ingest all sheets and concatenate rows.
    AllSheets,
    /// Ingest only the listed sheets (in order) and concatenate rows.
    Sheets(Vec<String>),
}

/// Options controlling unified ingestion behavior.
///
/// Use [`Default`] for common cases.
#[derive(Clone)]
pub struct IngestionOptions {
    /// If `None`, auto-detect format from file extension.
    pub format: Option<IngestionFormat>,
    /// Excel-specific options.
    pub excel_sheet_selection: ExcelSheetSelection,
    /// Optional observer for logging/alerts.
    pub observer: Option<Arc<dyn IngestionObserver>>,
    /// Severity threshold at which `on_alert` is invoked.
    pub alert_at_or_above: IngestionSeverity,
}

impl fmt::Debug for IngestionOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IngestionOptions")
            .field("format", &self.format)
            .field("excel_sheet_selection", &self.excel_sheet_selection)
            .field("observer_set", &self.observer.is_some())
            .field("alert_at_or_above", &self.alert_at_or_above)
            .finish()
    }
}

impl Default for IngestionOptions {
    fn default() -> Self {
        Self {
            format: None,
            excel_sheet_selection: ExcelSheetSelection::default(),
            observer: None,
            alert_at_or_above: IngestionSeverity::Critical,
        }
    }
}

/// Infer a schema for `path`, then ingest it.
///
/// Both stages are reported to `options.observer` when one is set.
///
/// ```no_run
/// use rust_data_summary::ingestion::{load_dataset, IngestionOptions};
///
/// # fn main() -> Result<(), rust_data_summary::IngestionError> {
/// let ds = load_dataset("people.csv", &IngestionOptions::default())?;
/// for field in &ds.schema.fields {
///     println!("{} is {}", field.name, field.data_type);
/// }
/// # Ok(())
/// # }
/// ```
pub fn load_dataset(path: impl AsRef<Path>, options: &IngestionOptions) -> IngestionResult<DataSet> {
    let path = path.as_ref();
    let schema = infer_schema_from_path(path, options)?;
    ingest_from_path(path, &schema, options)
}

/// Infer a [`Schema`] by scanning the file at `path`.
///
/// Column order follows the source (header order, first-seen JSON key order, Parquet column
/// order). See [`super::csv::infer_csv_schema_from_path`] and friends for per-format rules.
pub fn infer_schema_from_path(path: impl AsRef<Path>, options: &IngestionOptions) -> IngestionResult<Schema> {
    let path = path.as_ref();
    let fmt = resolve_format(path, options)?;

    let result = match fmt {
        IngestionFormat::Csv => csv::infer_csv_schema_from_path(path),
        IngestionFormat::Json => json::infer_json_schema_from_path(path),
        IngestionFormat::Parquet => parquet::infer_parquet_schema_from_path(path),
        IngestionFormat::Excel => infer_excel_dispatch(path, &options.excel_sheet_selection),
    };

    report(
        options,
        IngestionContext {
            path: path.to_path_buf(),
            format: fmt,
            stage: IngestionStage::Infer,
        },
        result.as_ref().map(|schema| IngestionStats {
            rows: 0,
            columns: schema.fields.len(),
        }),
    );
    result
}

/// Unified ingestion entry point for path-based sources.
///
/// - If `options.format` is `None`, format is inferred from the file extension.
/// - Use `options.excel_sheet_selection` for Excel multi-tab behavior.
///
/// When an observer is configured, this function reports:
///
/// - `on_success` on success, with row count stats
/// - `on_failure` on failure, with a computed severity
/// - `on_alert` on failure when the computed severity is >= `options.alert_at_or_above`
///
/// # Examples
///
/// ## CSV (auto-detect by extension)
///
/// ```no_run
/// use rust_data_summary::ingestion::{ingest_from_path, IngestionOptions};
/// use rust_data_summary::types::{DataType, Field, Schema};
///
/// # fn main() -> Result<(), rust_data_summary::IngestionError> {
/// let schema = Schema::new(vec![
///     Field::new("id", DataType::Int64),
///     Field::new("name", DataType::Utf8),
/// ]);
///
/// let ds = ingest_from_path("people.csv", &schema, &IngestionOptions::default())?;
/// println!("rows={}", ds.row_count());
/// # Ok(())
/// # }
/// ```
///
/// ## Force a format explicitly (override extension inference)
///
/// ```no_run
/// use rust_data_summary::ingestion::{ingest_from_path, IngestionFormat, IngestionOptions};
/// use rust_data_summary::types::{DataType, Field, Schema};
///
/// # fn main() -> Result<(), rust_data_summary::IngestionError> {
/// let schema = Schema::new(vec![Field::new("id", DataType::Int64)]);
///
/// let opts = IngestionOptions {
///     format: Some(IngestionFormat::Csv),
///     ..Default::default()
/// };
///
/// let ds = ingest_from_path("input_without_extension", &schema, &opts)?;
/// println!("rows={}", ds.row_count());
/// # Ok(())
/// # }
/// ```
///
/// ## Observability (log facade + alert threshold)
///
/// ```no_run
/// use std::sync::Arc;
///
/// use rust_data_summary::ingestion::{
///     ingest_from_path, IngestionOptions, IngestionSeverity, LogObserver,
/// };
/// use rust_data_summary::types::{DataType, Field, Schema};
///
/// let schema = Schema::new(vec![Field::new("id", DataType::Int64)]);
///
/// let opts = IngestionOptions {
///     observer: Some(Arc::new(LogObserver)),
///     alert_at_or_above: IngestionSeverity::Critical,
///     ..Default::default()
/// };
///
/// // Missing files are Critical and trigger `on_alert` at this threshold.
/// assert!(ingest_from_path("does_not_exist.csv", &schema, &opts).is_err());
/// ```
pub fn ingest_from_path(
    path: impl AsRef<Path>,
    schema: &Schema,
    options: &IngestionOptions,
) -> IngestionResult<DataSet> {
    let path = path.as_ref();
    let fmt = resolve_format(path, options)?;

    let result = match fmt {
        IngestionFormat::Csv => csv::ingest_csv_from_path(path, schema),
        IngestionFormat::Json => json::ingest_json_from_path(path, schema),
        IngestionFormat::Parquet => parquet::ingest_parquet_from_path(path, schema),
        IngestionFormat::Excel => ingest_excel_dispatch(path, schema, &options.excel_sheet_selection),
    };

    report(
        options,
        IngestionContext {
            path: path.to_path_buf(),
            format: fmt,
            stage: IngestionStage::Ingest,
        },
        result.as_ref().map(|ds| IngestionStats {
            rows: ds.row_count(),
            columns: ds.column_count(),
        }),
    );
    result
}

fn report(options: &IngestionOptions, ctx: IngestionContext, outcome: Result<IngestionStats, &IngestionError>) {
    let Some(obs) = options.observer.as_ref() else {
        return;
    };
    match outcome {
        Ok(stats) => obs.on_success(&ctx, stats),
        Err(e) => {
            let sev = severity_for_error(e);
            obs.on_failure(&ctx, sev, e);
            if sev >= options.alert_at_or_above {
                obs.on_alert(&ctx, sev, e);
            }
        }
    }
}

fn severity_for_error(e: &IngestionError) -> IngestionSeverity {
    match e {
        IngestionError::Io(_) => IngestionSeverity::Critical,
        IngestionError::Parquet(err) => {
            // Parquet wraps I/O failures without a structured kind; walk the source chain.
            if error_chain_contains_io(err) {
                IngestionSeverity::Critical
            } else {
                IngestionSeverity::Error
            }
        }
        IngestionError::Csv(err) => match err.kind() {
            ::csv::ErrorKind::Io(_) => IngestionSeverity::Critical,
            _ => IngestionSeverity::Error,
        },
        #[cfg(feature = "excel")]
        IngestionError::Excel(_) => IngestionSeverity::Error,
        IngestionError::SchemaMismatch { .. } => IngestionSeverity::Error,
        IngestionError::ParseError { .. } => IngestionSeverity::Error,
    }
}

fn error_chain_contains_io(e: &(dyn StdError + 'static)) -> bool {
    let mut cur: Option<&(dyn StdError + 'static)> = Some(e);
    while let Some(err) = cur {
        if err.is::<std::io::Error>() {
            return true;
        }
        cur = err.source();
    }
    false
}

fn resolve_format(path: &Path, options: &IngestionOptions) -> IngestionResult<IngestionFormat> {
    match options.format {
        Some(f) => Ok(f),
        None => infer_format_from_path(path),
    }
}

fn infer_format_from_path(path: &Path) -> IngestionResult<IngestionFormat> {
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .ok_or_else(|| IngestionError::SchemaMismatch {
            message: format!("cannot infer format: path has no extension ({})", path.display()),
        })?;

    IngestionFormat::from_extension(ext).ok_or_else(|| IngestionError::SchemaMismatch {
        message: format!(
            "cannot infer format from extension '{ext}' for path ({})",
            path.display()
        ),
    })
}

#[cfg(feature = "excel")]
fn ingest_excel_dispatch(path: &Path, schema: &Schema, sel: &ExcelSheetSelection) -> IngestionResult<DataSet> {
    super::excel::ingest_excel_selection(path, sel, schema)
}

#[cfg(feature = "excel")]
fn infer_excel_dispatch(path: &Path, sel: &ExcelSheetSelection) -> IngestionResult<Schema> {
    super::excel::infer_excel_schema_from_path(path, sel)
}

#[cfg(not(feature = "excel"))]
fn ingest_excel_dispatch(_path: &Path, _schema: &Schema, _sel: &ExcelSheetSelection) -> IngestionResult<DataSet> {
    Err(excel_disabled())
}

#[cfg(not(feature = "excel"))]
fn infer_excel_dispatch(_path: &Path, _sel: &ExcelSheetSelection) -> IngestionResult<Schema> {
    Err(excel_disabled())
}

#[cfg(not(feature = "excel"))]
fn excel_disabled() -> IngestionError {
    IngestionError::SchemaMismatch {
        message: "excel ingestion not enabled (enable cargo feature 'excel')".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::{infer_format_from_path, IngestionFormat};
    use std::path::Path;

    #[test]
    fn format_from_extension_is_case_insensitive() {
        assert_eq!(IngestionFormat::from_extension("CSV"), Some(IngestionFormat::Csv));
        assert_eq!(IngestionFormat::from_extension("ndjson"), Some(IngestionFormat::Json));
        assert_eq!(IngestionFormat::from_extension("ods"), Some(IngestionFormat::Excel));
        assert_eq!(IngestionFormat::from_extension("txt"), None);
    }

    #[test]
    fn path_without_extension_is_rejected() {
        assert!(infer_format_from_path(Path::new("data")).is_err());
    }
}
